//! League rules around the engines: backout fees and optimistic updates.

pub mod backout;
pub mod optimistic;
