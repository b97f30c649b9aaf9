use serde::{Deserialize, Serialize};

use idcard_core::{
    CardError, CardResult, DomainCode, EmployeeId, EmployeeType, Entity, JoiningYear, Series,
};

use crate::identity;
use crate::registry::DomainRegistry;

/// An issued ID card.
///
/// Field names on the wire are the flat layout of the `"ids"` collection:
/// `name, yoj, type, domain, domainId, empId, photo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    name: String,
    #[serde(rename = "yoj")]
    year_of_joining: JoiningYear,
    #[serde(rename = "type")]
    employee_type: EmployeeType,
    #[serde(rename = "domain")]
    domain_name: String,
    /// Registry code at issuance time; not refreshed if the registry changes.
    #[serde(rename = "domainId")]
    domain_code: DomainCode,
    #[serde(rename = "empId")]
    employee_id: EmployeeId,
    /// Opaque image payload (usually a data URL). Never inspected.
    #[serde(default)]
    photo: Option<String>,
}

impl EmployeeRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year_of_joining(&self) -> &JoiningYear {
        &self.year_of_joining
    }

    pub fn employee_type(&self) -> EmployeeType {
        self.employee_type
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn domain_code(&self) -> DomainCode {
        self.domain_code
    }

    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    /// Domain as printed on the card, e.g. `Sales (3)`.
    pub fn domain_label(&self) -> String {
        format!("{} ({})", self.domain_name, self.domain_code)
    }

    /// Case-insensitive substring match on id, name and domain.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn matches(&self, needle_lower: &str) -> bool {
        self.employee_id.contains_ignore_case(needle_lower)
            || self.name.to_lowercase().contains(needle_lower)
            || self.domain_name.to_lowercase().contains(needle_lower)
    }
}

impl Entity for EmployeeRecord {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.employee_id
    }
}

/// Operator-supplied fields for creating or editing a record.
///
/// The year stays raw text here so that a missing or malformed year surfaces
/// as a validation failure of the mutation rather than earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub name: String,
    pub year_of_joining: String,
    pub employee_type: EmployeeType,
    pub domain_name: String,
    pub photo: Option<String>,
}

impl RecordFields {
    /// Prefill from an existing record (the starting point of an edit).
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            name: record.name.clone(),
            year_of_joining: record.year_of_joining.to_string(),
            employee_type: record.employee_type,
            domain_name: record.domain_name.clone(),
            photo: record.photo.clone(),
        }
    }

    /// Validate against the registry and build the record with its derived id.
    ///
    /// Checks run in order: name, year, domain.
    pub(crate) fn into_record(self, registry: &DomainRegistry) -> CardResult<EmployeeRecord> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CardError::validation("enter a name"));
        }
        let year_of_joining = JoiningYear::parse(&self.year_of_joining)?;
        let domain_code = registry
            .lookup_code(&self.domain_name)
            .map_err(|_| CardError::UnknownDomain(self.domain_name.clone()))?;

        let employee_id = identity::derive(
            self.employee_type,
            Some(&year_of_joining),
            Some(domain_code),
            Series::FIRST,
        )
        .ok_or_else(|| CardError::validation("incomplete input for employee id"))?;

        Ok(EmployeeRecord {
            name: name.to_string(),
            year_of_joining,
            employee_type: self.employee_type,
            domain_name: self.domain_name,
            domain_code,
            employee_id,
            photo: self.photo,
        })
    }
}
