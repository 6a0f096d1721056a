//! Priority axis - which search dimension a student cares about most

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The search dimension given priority when ranking partial matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityAxis {
    Location,
    Activity,
}

impl PriorityAxis {
    /// The axis that was NOT prioritized
    pub fn secondary(self) -> Self {
        match self {
            Self::Location => Self::Activity,
            Self::Activity => Self::Location,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Activity => "activity",
        }
    }
}

impl FromStr for PriorityAxis {
    type Err = DomainError;

    /// Parse a priority axis, case-insensitively
    ///
    /// # Errors
    /// Returns `InvalidPriority` for any value other than "location" or
    /// "activity". Rejection happens before any filtering, so a typo never
    /// degrades into an unranked result list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "location" => Ok(Self::Location),
            "activity" => Ok(Self::Activity),
            _ => Err(DomainError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for PriorityAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
