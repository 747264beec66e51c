//! Host type enum for type-safe code-host handling.
//!
//! The host tag is part of every record's uniqueness scope: the same numeric
//! id or login can legitimately exist on two different hosts. Unknown tags
//! are rejected when parsed, not at lookup time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supported code-hosting platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum HostType {
    /// GitHub (github.com or GitHub Enterprise)
    #[sea_orm(string_value = "github")]
    GitHub,
    /// GitLab (gitlab.com or self-hosted GitLab). No client ships for it
    /// yet; the variant keeps the host scope of the uniqueness constraints
    /// honest and marks where the next client plugs in.
    #[sea_orm(string_value = "gitlab")]
    GitLab,
}

impl std::fmt::Display for HostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostType::GitHub => write!(f, "github"),
            HostType::GitLab => write!(f, "gitlab"),
        }
    }
}

impl std::str::FromStr for HostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(HostType::GitHub),
            "gitlab" => Ok(HostType::GitLab),
            _ => Err(format!("Unknown host type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(HostType::GitHub.to_string(), "github");
        assert_eq!(HostType::GitLab.to_string(), "gitlab");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("github".parse::<HostType>().unwrap(), HostType::GitHub);
        assert_eq!("GitHub".parse::<HostType>().unwrap(), HostType::GitHub);
        assert_eq!("gitlab".parse::<HostType>().unwrap(), HostType::GitLab);
        assert!("sourcehut".parse::<HostType>().is_err());
    }
}
