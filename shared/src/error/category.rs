use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain of an [`ErrorCode`], taken from its thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Permission,
    Restaurant,
    Waitlist,
    Review,
    User,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 | 1 => Self::General,
            2 => Self::Permission,
            3 => Self::Restaurant,
            4 => Self::Waitlist,
            5 => Self::Review,
            6 => Self::User,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
