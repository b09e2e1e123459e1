//! Handicap registry lookups.
//!
//! The league never calls a registry from inside the engines. Callers look
//! up a player's index through a [`HandicapLookup`] and feed the number into
//! [`HandicapEngine`](crate::handicap::engine::HandicapEngine).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A player's handicap as reported by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandicapRecord {
    pub handicap_index: Decimal,
    pub last_updated: DateTime<Utc>,
    pub player_name: String,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no handicap record for registry number {0}")]
    NotFound(String),
    #[error("handicap registry unavailable: {0}")]
    Unavailable(String),
}

/// Source of handicap records keyed by registry (GHIN) number.
pub trait HandicapLookup {
    fn lookup(&self, registry_number: &str) -> Result<HandicapRecord, LookupError>;
}

/// In-memory registry, used for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticHandicapDirectory {
    entries: HashMap<String, (Decimal, String)>,
    as_of: Option<DateTime<Utc>>,
}

impl StaticHandicapDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo league's members.
    pub fn demo() -> Self {
        let mut dir = Self::new();
        for (number, index, name) in [
            ("1234567", dec!(12.4), "Jake Fraser"),
            ("2345678", dec!(8.2), "Mike Sullivan"),
            ("3456789", dec!(15.1), "Chris Daniels"),
            ("4567890", dec!(10.5), "Tommy Park"),
            ("5678901", dec!(18.3), "Ryan Bennett"),
            ("6789012", dec!(5.8), "Dave Kowalski"),
            ("7890123", dec!(14.0), "Nick Alvarez"),
            ("8901234", dec!(20.7), "Brian Walsh"),
        ] {
            dir.insert(number, index, name);
        }
        dir
    }

    /// Pin `last_updated` instead of stamping each lookup with the current time.
    pub fn as_of(mut self, timestamp: DateTime<Utc>) -> Self {
        self.as_of = Some(timestamp);
        self
    }

    pub fn insert(
        &mut self,
        registry_number: impl Into<String>,
        handicap_index: Decimal,
        player_name: impl Into<String>,
    ) {
        self.entries
            .insert(registry_number.into(), (handicap_index, player_name.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HandicapLookup for StaticHandicapDirectory {
    fn lookup(&self, registry_number: &str) -> Result<HandicapRecord, LookupError> {
        let (handicap_index, player_name) = self
            .entries
            .get(registry_number)
            .ok_or_else(|| LookupError::NotFound(registry_number.to_string()))?;

        Ok(HandicapRecord {
            handicap_index: *handicap_index,
            last_updated: self.as_of.unwrap_or_else(Utc::now),
            player_name: player_name.clone(),
        })
    }
}
