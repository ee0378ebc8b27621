//! Review platforms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// External platform a review originates from
///
/// Only Google has a live integration; the others exist for imported and
/// demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Facebook,
    Tripadvisor,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Google, Platform::Facebook, Platform::Tripadvisor];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Tripadvisor => "tripadvisor",
        }
    }

    /// Human readable name used in emails
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Tripadvisor => "Tripadvisor",
        }
    }

    /// Whether replies can be pushed back to the platform
    #[inline]
    pub const fn supports_reply(self) -> bool {
        matches!(self, Self::Google)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            "tripadvisor" => Ok(Self::Tripadvisor),
            other => Err(DomainError::UnknownPlatform(other.to_string())),
        }
    }
}
