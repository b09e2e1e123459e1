//! # golf-settle
//!
//! Settlement and handicap engine for social golf leagues.
//!
//! Given the side games played in a round (match play, skins, nassau, ...)
//! and their scores, this engine computes who owes whom with as few
//! payments as possible. It also converts handicap indexes into course
//! handicaps and strokes given for head-to-head matches.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: players, games, courses, balance ledger
//! - **handicap** — Course handicap and stroke allocation, registry lookups
//! - **settlement** — Per-game balances, transfer reduction, payment links,
//!   stored settlement records
//! - **league** — Backout fees and optimistic update helper
//! - **config** — JSON engine configuration
//! - **simulation** — Random seasons for stress testing

pub mod config;
pub mod core;
pub mod handicap;
pub mod league;
pub mod settlement;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::course::CourseRating;
    pub use crate::core::game::{Game, GameSet, GameType};
    pub use crate::core::ledger::Ledger;
    pub use crate::core::player::PlayerId;
    pub use crate::handicap::engine::{HandicapEngine, Player, StrokeAllocation};
    pub use crate::handicap::lookup::{HandicapLookup, HandicapRecord};
    pub use crate::settlement::engine::{
        calculate_settlements, DuplicatePolicy, SettlementEngine, SettlementReport,
    };
    pub use crate::settlement::records::{SettlementBook, SettlementRecord, SettlementStatus};
    pub use crate::settlement::transfers::Settlement;
    pub use crate::settlement::venmo::venmo_deep_link;
}
