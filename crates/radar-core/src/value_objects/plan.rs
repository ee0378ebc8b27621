//! Subscription tier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Subscription tier gating feature access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Pro,
}

impl Plan {
    /// Tiers that can be bought through checkout
    pub const PAID: [Plan; 2] = [Plan::Starter, Plan::Pro];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Pro => "pro",
        }
    }

    #[inline]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Replying to reviews requires any paid tier
    #[inline]
    pub const fn can_reply(self) -> bool {
        self.is_paid()
    }

    /// The public widget is a top-tier feature
    #[inline]
    pub const fn has_widget(self) -> bool {
        matches!(self, Self::Pro)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "pro" => Ok(Self::Pro),
            other => Err(DomainError::InvalidPlan(other.to_string())),
        }
    }
}
