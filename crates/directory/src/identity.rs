//! Employee-id derivation: the single source of truth for the id format.
//!
//! `EMP<type><yearOfJoining><domainCode><series>`, concatenated without
//! separators, e.g. `EMPP2024401`.

use idcard_core::{DomainCode, EmployeeId, EmployeeType, JoiningYear, Series};

use crate::registry::DomainRegistry;

/// Fixed prefix of every employee id.
pub const ID_PREFIX: &str = "EMP";

/// Derive the canonical employee id.
///
/// Returns `None` when the year or the domain code is missing, so a form can
/// render a live preview while it is still being filled in. Pure and
/// deterministic: two employees sharing type, year and domain get the same id,
/// which callers must detect.
pub fn derive(
    employee_type: EmployeeType,
    year: Option<&JoiningYear>,
    domain_code: Option<DomainCode>,
    series: Series,
) -> Option<EmployeeId> {
    let year = year?;
    let domain_code = domain_code?;
    Some(EmployeeId::from_raw(format!(
        "{ID_PREFIX}{}{year}{domain_code}{series}",
        employee_type.token()
    )))
}

/// Derive an id straight from raw form input.
///
/// Malformed years and unknown domains count as incomplete input.
pub fn preview(
    employee_type: EmployeeType,
    raw_year: &str,
    domain_name: &str,
    registry: &DomainRegistry,
) -> Option<EmployeeId> {
    let year = JoiningYear::parse(raw_year).ok();
    let domain_code = registry.lookup_code(domain_name).ok();
    derive(employee_type, year.as_ref(), domain_code, Series::FIRST)
}
