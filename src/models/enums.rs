//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Loan status of a physical copy. Stored as SMALLINT, restricted to 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum LoanStatus {
    #[default]
    Available = 0,
    Reserved = 1,
    Taken = 2,
    Unavailable = 3,
}

impl TryFrom<i16> for LoanStatus {
    type Error = i16;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(LoanStatus::Available),
            1 => Ok(LoanStatus::Reserved),
            2 => Ok(LoanStatus::Taken),
            3 => Ok(LoanStatus::Unavailable),
            other => Err(other),
        }
    }
}

impl From<LoanStatus> for i16 {
    fn from(s: LoanStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Available => "available",
            LoanStatus::Reserved => "reserved",
            LoanStatus::Taken => "taken",
            LoanStatus::Unavailable => "unavailable",
        };
        write!(f, "{}", label)
    }
}
