//! Course handicaps, stroke allocation, and registry lookups.

pub mod engine;
pub mod lookup;
