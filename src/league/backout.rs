use crate::core::player::PlayerId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a player withdrew relative to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoutTier {
    BeforeLock,
    AfterLock,
    NoShow,
}

impl BackoutTier {
    pub fn label(&self) -> &'static str {
        match self {
            BackoutTier::BeforeLock => "Early withdrawal fee",
            BackoutTier::AfterLock => "Late withdrawal fee",
            BackoutTier::NoShow => "No-show fee",
        }
    }
}

impl fmt::Display for BackoutTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fee charged per withdrawal tier, set by the league admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub before_lock: Decimal,
    pub after_lock: Decimal,
    pub no_show: Decimal,
}

impl FeeSchedule {
    pub fn fee(&self, tier: BackoutTier) -> Decimal {
        match tier {
            BackoutTier::BeforeLock => self.before_lock,
            BackoutTier::AfterLock => self.after_lock,
            BackoutTier::NoShow => self.no_show,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            before_lock: dec!(5),
            after_lock: dec!(15),
            no_show: dec!(25),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoutTiming {
    pub tier: BackoutTier,
    pub fee: Decimal,
}

impl BackoutTiming {
    pub fn label(&self) -> &'static str {
        self.tier.label()
    }
}

/// Classify a withdrawal made at `now`.
///
/// At or after tee time it is a no-show; at or after the signup deadline
/// (when there is one) it is late; otherwise it is early.
pub fn backout_timing(
    now: DateTime<Utc>,
    round_date: DateTime<Utc>,
    signup_deadline: Option<DateTime<Utc>>,
    schedule: &FeeSchedule,
) -> BackoutTiming {
    let tier = if now >= round_date {
        BackoutTier::NoShow
    } else if signup_deadline.is_some_and(|deadline| now >= deadline) {
        BackoutTier::AfterLock
    } else {
        BackoutTier::BeforeLock
    };

    BackoutTiming {
        tier,
        fee: schedule.fee(tier),
    }
}

/// A fee charged to one player for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoutFee {
    pub user_id: PlayerId,
    pub timing: BackoutTier,
    pub amount: Decimal,
    #[serde(default)]
    pub reason: Option<String>,
}

/// The group pot fed by backout fees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupPot {
    fees: Vec<BackoutFee>,
}

impl GroupPot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fee: BackoutFee) {
        self.fees.push(fee);
    }

    pub fn fees(&self) -> &[BackoutFee] {
        &self.fees
    }

    /// Sum of all recorded fees, saturating at the `Decimal` range.
    pub fn total(&self) -> Decimal {
        self.fees
            .iter()
            .fold(Decimal::ZERO, |acc, f| acc.saturating_add(f.amount))
    }

    /// Total charged to one player.
    pub fn total_for(&self, player: &PlayerId) -> Decimal {
        self.fees
            .iter()
            .filter(|f| &f.user_id == player)
            .fold(Decimal::ZERO, |acc, f| acc.saturating_add(f.amount))
    }
}
