use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a league member.
///
/// Used as the map key for balances and as the payer/payee of every
/// settlement, so it must be unique within a single computation.
///
/// # Examples
///
/// ```
/// use golf_settle::core::player::PlayerId;
///
/// let jake = PlayerId::new("jake");
/// let mike = PlayerId::new("mike");
/// assert_ne!(jake, mike);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this player ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
