use crate::utils::constants::{DEP_CODE_FILL, DEP_CODE_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// French department identifier, the join key between cities and weather.
///
/// Construction always left-pads to two characters (`"1"` becomes `"01"`).
/// Longer codes such as overseas `"971"` pass through unchanged; padding
/// never truncates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DepartmentCode(String);

impl DepartmentCode {
    pub fn new(raw: &str) -> Self {
        Self(pad_department_code(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DepartmentCode {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for DepartmentCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<DepartmentCode> for String {
    fn from(code: DepartmentCode) -> Self {
        code.0
    }
}

impl fmt::Display for DepartmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Left-pad a department code with '0' up to the canonical width
pub fn pad_department_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len >= DEP_CODE_WIDTH {
        return trimmed.to_string();
    }

    let mut padded = String::with_capacity(DEP_CODE_WIDTH);
    padded.extend(std::iter::repeat(DEP_CODE_FILL).take(DEP_CODE_WIDTH - len));
    padded.push_str(trimmed);
    padded
}
