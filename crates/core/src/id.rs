//! Strongly-typed identifiers and attribute values used across the card domain.

use core::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};

/// Derived employee identity (`EMP<type><year><code><series>`).
///
/// Only the identity deriver should mint new values; `from_raw` exists for
/// ids coming back from storage or from an operator typing one in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

/// Year of joining: exactly four ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JoiningYear(String);

macro_rules! impl_str_newtype {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_str_newtype!(EmployeeId);
impl_str_newtype!(JoiningYear);

impl EmployeeId {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Case-insensitive substring match, as used by record search.
    pub fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        self.0.to_lowercase().contains(needle_lower)
    }
}

impl JoiningYear {
    /// Number of years offered by [`JoiningYear::selectable`].
    pub const SELECTABLE_SPAN: usize = 50;

    pub fn parse(raw: &str) -> CardResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CardError::validation("select year of joining"));
        }
        if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::validation(format!(
                "year of joining must be four digits, got {raw:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// The `count` most recent years ending at `current_year`, newest first.
    ///
    /// Years outside the four-digit range are skipped.
    pub fn recent(count: usize, current_year: i32) -> Vec<Self> {
        (0..count)
            .filter_map(|offset| i32::try_from(offset).ok())
            .map(|offset| current_year - offset)
            .filter(|year| (1000..=9999).contains(year))
            .map(|year| Self(year.to_string()))
            .collect()
    }

    /// Years an operator may pick from, ending at the current UTC year.
    pub fn selectable() -> Vec<Self> {
        Self::recent(Self::SELECTABLE_SPAN, Utc::now().year())
    }

    pub fn value(&self) -> i32 {
        // Four ASCII digits always fit.
        self.0.parse().unwrap_or_default()
    }
}

impl TryFrom<String> for JoiningYear {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl FromStr for JoiningYear {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Numeric code of an organizational domain. Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct DomainCode(u32);

impl DomainCode {
    pub fn new(code: i64) -> CardResult<Self> {
        if code <= 0 {
            return Err(CardError::invalid_code(format!("{code} is not positive")));
        }
        u32::try_from(code)
            .map(Self)
            .map_err(|_| CardError::invalid_code(format!("{code} is out of range")))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for DomainCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for DomainCode {
    type Error = CardError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainCode> for u32 {
    fn from(value: DomainCode) -> Self {
        value.0
    }
}

impl FromStr for DomainCode {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let code: i64 = s
            .parse()
            .map_err(|_| CardError::invalid_code(format!("{s:?} is not a number")))?;
        Self::new(code)
    }
}

/// Two-digit series suffix of an employee id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Series(u8);

impl Series {
    /// The only series issued today; there is no allocator for a second one.
    pub const FIRST: Series = Series(1);

    pub fn new(n: u8) -> CardResult<Self> {
        if (1..=99).contains(&n) {
            Ok(Self(n))
        } else {
            Err(CardError::validation(format!("series must be 01-99, got {n}")))
        }
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::FIRST
    }
}

impl core::fmt::Display for Series {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Employment type, encoded externally as a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeType {
    #[default]
    #[serde(rename = "P")]
    Permanent,
    #[serde(rename = "T")]
    Temporary,
}

impl EmployeeType {
    /// Single-letter token used inside ids and in storage.
    pub fn token(self) -> &'static str {
        match self {
            EmployeeType::Permanent => "P",
            EmployeeType::Temporary => "T",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmployeeType::Permanent => "Permanent",
            EmployeeType::Temporary => "Temporary",
        }
    }
}

impl core::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for EmployeeType {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "permanent" => Ok(EmployeeType::Permanent),
            "t" | "temporary" => Ok(EmployeeType::Temporary),
            other => Err(CardError::validation(format!(
                "employee type must be P or T, got {other:?}"
            ))),
        }
    }
}
