pub mod course;
pub mod game;
pub mod ledger;
pub mod player;
