use crate::core::player::PlayerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Running net balance of each player across a batch of games.
///
/// A positive balance means the player is owed money.
/// A negative balance means the player owes money.
///
/// The ledger is rebuilt from scratch for every settlement run and is
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    balances: HashMap<PlayerId, Decimal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a zero balance for every listed player.
    pub fn with_players<'a, I>(players: I) -> Self
    where
        I: IntoIterator<Item = &'a PlayerId>,
    {
        Self {
            balances: players
                .into_iter()
                .map(|p| (p.clone(), Decimal::ZERO))
                .collect(),
        }
    }

    /// Add `amount` to a player's balance (negative amounts debit).
    ///
    /// Saturates at the `Decimal` bounds.
    pub fn adjust(&mut self, player: &PlayerId, amount: Decimal) {
        let balance = self
            .balances
            .entry(player.clone())
            .or_insert(Decimal::ZERO);
        *balance = balance.saturating_add(amount);
    }

    /// Move `amount` from `payer` to `payee`.
    ///
    /// Returns `false` and leaves the ledger untouched if either balance
    /// would overflow.
    pub fn transfer(&mut self, payer: &PlayerId, payee: &PlayerId, amount: Decimal) -> bool {
        self.apply(&[(payer, -amount), (payee, amount)])
    }

    /// Apply a batch of balance changes all at once.
    ///
    /// A player may appear more than once. Returns `false` and leaves the
    /// ledger untouched if any resulting balance would overflow.
    pub fn apply(&mut self, changes: &[(&PlayerId, Decimal)]) -> bool {
        let mut updated: HashMap<&PlayerId, Decimal> = HashMap::new();
        for (player, amount) in changes {
            let current = updated
                .get(*player)
                .copied()
                .unwrap_or_else(|| self.balance(player));
            match current.checked_add(*amount) {
                Some(next) => {
                    updated.insert(*player, next);
                }
                None => return false,
            }
        }

        for (player, balance) in updated {
            self.balances.insert(player.clone(), balance);
        }
        true
    }

    /// Net balance of a player; zero if the player never appeared.
    pub fn balance(&self, player: &PlayerId) -> Decimal {
        self.balances
            .get(player)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn balances(&self) -> &HashMap<PlayerId, Decimal> {
        &self.balances
    }

    /// Balances sorted by player id, for stable display.
    pub fn sorted(&self) -> Vec<(&PlayerId, Decimal)> {
        let mut rows: Vec<_> = self.balances.iter().map(|(p, b)| (p, *b)).collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Verify that every credit has an offsetting debit.
    ///
    /// Credits are cancelled against debits pairwise, so the answer stays
    /// exact when the totals would exceed `Decimal::MAX`.
    pub fn is_balanced(&self) -> bool {
        let mut credits: Vec<Decimal> = Vec::new();
        let mut debits: Vec<Decimal> = Vec::new();
        for v in self.balances.values() {
            if *v > Decimal::ZERO {
                credits.push(*v);
            } else if *v < Decimal::ZERO {
                debits.push(-*v);
            }
        }

        let (mut ci, mut di) = (0, 0);
        while ci < credits.len() && di < debits.len() {
            let amount = credits[ci].min(debits[di]);
            credits[ci] -= amount;
            debits[di] -= amount;
            if credits[ci].is_zero() {
                ci += 1;
            }
            if debits[di].is_zero() {
                di += 1;
            }
        }
        ci == credits.len() && di == debits.len()
    }

    /// Sum of positive balances (equal to the sum of |negative| ones).
    /// This is the money that actually has to change hands. Saturates.
    pub fn total_owed(&self) -> Decimal {
        self.balances
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
    }
}
