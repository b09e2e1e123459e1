use crate::core::player::PlayerId;
use crate::settlement::transfers::Settlement;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Where a stored payment stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Paid,
    Disputed,
    Forgiven,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Paid => "paid",
            SettlementStatus::Disputed => "disputed",
            SettlementStatus::Forgiven => "forgiven",
        }
    }

    /// Whether a record in this state still counts toward balances.
    pub fn counts_toward_balance(&self) -> bool {
        matches!(self, SettlementStatus::Pending | SettlementStatus::Paid)
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A settlement once it has been stored against a round.
///
/// `settled_at` is set when the record is paid or forgiven and cleared when
/// it goes back to pending or into dispute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_id: Option<Uuid>,
    #[serde(flatten)]
    pub settlement: Settlement,
    #[serde(default)]
    pub status: SettlementStatus,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
}

impl SettlementRecord {
    /// A new pending record for `settlement`.
    pub fn pending(settlement: Settlement) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_id: None,
            settlement,
            status: SettlementStatus::Pending,
            settled_at: None,
        }
    }

    pub fn for_round(mut self, round_id: Uuid) -> Self {
        self.round_id = Some(round_id);
        self
    }

    pub fn mark_paid(&mut self, at: DateTime<Utc>) {
        self.status = SettlementStatus::Paid;
        self.settled_at = Some(at);
    }

    pub fn forgive(&mut self, at: DateTime<Utc>) {
        self.status = SettlementStatus::Forgiven;
        self.settled_at = Some(at);
    }

    pub fn dispute(&mut self) {
        self.status = SettlementStatus::Disputed;
        self.settled_at = None;
    }

    pub fn reopen(&mut self) {
        self.status = SettlementStatus::Pending;
        self.settled_at = None;
    }

    /// Signed effect on `player`: positive when they receive.
    pub fn effect_on(&self, player: &PlayerId) -> Decimal {
        let s = &self.settlement;
        if &s.to_user_id == player && &s.from_user_id != player {
            s.amount
        } else if &s.from_user_id == player && &s.to_user_id != player {
            -s.amount
        } else {
            Decimal::ZERO
        }
    }
}

impl From<Settlement> for SettlementRecord {
    fn from(settlement: Settlement) -> Self {
        Self::pending(settlement)
    }
}

/// Stored settlement records, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementBook {
    records: Vec<SettlementRecord>,
}

impl SettlementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `settlements` as pending records for one round.
    pub fn record_round(&mut self, round_id: Uuid, settlements: Vec<Settlement>) {
        self.records.extend(
            settlements
                .into_iter()
                .map(|s| SettlementRecord::pending(s).for_round(round_id)),
        );
    }

    pub fn record(&mut self, record: SettlementRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SettlementRecord] {
        &self.records
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut SettlementRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn with_status(&self, status: SettlementStatus) -> impl Iterator<Item = &SettlementRecord> {
        self.records.iter().filter(move |r| r.status == status)
    }

    pub fn pending(&self) -> impl Iterator<Item = &SettlementRecord> {
        self.with_status(SettlementStatus::Pending)
    }

    pub fn paid(&self) -> impl Iterator<Item = &SettlementRecord> {
        self.with_status(SettlementStatus::Paid)
    }

    /// What `player` is owed (positive) or owes (negative) across pending
    /// and paid records. Disputed and forgiven records are left out.
    /// Saturates at the `Decimal` range.
    pub fn net_balance_for(&self, player: &PlayerId) -> Decimal {
        self.records
            .iter()
            .filter(|r| r.status.counts_toward_balance())
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.effect_on(player)))
    }
}

impl FromIterator<SettlementRecord> for SettlementBook {
    fn from_iter<T: IntoIterator<Item = SettlementRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
