//! Game results to balances, balances to payments.

pub mod balances;
pub mod engine;
pub mod records;
pub mod transfers;
pub mod venmo;
