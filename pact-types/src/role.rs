//! Party roles in a PACT negotiation
//!
//! Every offer and deal has exactly two parties: the marketer who issues the
//! offer and the creator who performs the work.

use serde::{Deserialize, Serialize};

/// A party's role in an offer or deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Creator,
    Marketer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Creator => "creator",
            Role::Marketer => "marketer",
        }
    }

    /// Human-readable name used in display labels ("Viewed by Creator")
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Creator => "Creator",
            Role::Marketer => "Marketer",
        }
    }

    /// The other party of the negotiation
    pub fn counterpart(&self) -> Role {
        match self {
            Role::Creator => Role::Marketer,
            Role::Marketer => Role::Creator,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creator" => Ok(Role::Creator),
            "marketer" => Ok(Role::Marketer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}
