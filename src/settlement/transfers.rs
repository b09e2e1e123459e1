use crate::core::ledger::Ledger;
use crate::core::player::PlayerId;
use crate::settlement::venmo::venmo_deep_link;
use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A directive that one player pays another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from_user_id: PlayerId,
    pub to_user_id: PlayerId,
    /// Always positive.
    pub amount: Decimal,
}

impl Settlement {
    /// Payment link the payer can open to send this amount.
    pub fn venmo_link(&self, note: &str, recipient_username: Option<&str>) -> String {
        venmo_deep_link(self.amount, note, recipient_username)
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pays {} {:.2}",
            self.from_user_id, self.to_user_id, self.amount
        )
    }
}

/// Reduce net balances to a short list of payments.
///
/// Only players in `user_ids` take part; repeated ids are considered once.
/// Creditors and debtors are each ordered by amount, largest first, with
/// ties kept in `user_ids` order. The largest debtor then pays the largest
/// creditor until one of them is square, and the walk moves on.
///
/// # Examples
///
/// ```
/// use golf_settle::core::ledger::Ledger;
/// use golf_settle::core::player::PlayerId;
/// use golf_settle::settlement::transfers::reduce_balances;
/// use rust_decimal_macros::dec;
///
/// let (a, b) = (PlayerId::new("A"), PlayerId::new("B"));
/// let mut ledger = Ledger::new();
/// ledger.transfer(&b, &a, dec!(6));
///
/// let settlements = reduce_balances(&ledger, &[a.clone(), b.clone()]);
/// assert_eq!(settlements.len(), 1);
/// assert_eq!(settlements[0].from_user_id, b);
/// assert_eq!(settlements[0].amount, dec!(6));
/// ```
pub fn reduce_balances(ledger: &Ledger, user_ids: &[PlayerId]) -> Vec<Settlement> {
    let mut creditors: Vec<(&PlayerId, Decimal)> = Vec::new();
    let mut debtors: Vec<(&PlayerId, Decimal)> = Vec::new();
    let mut seen = HashSet::new();

    for id in user_ids {
        if !seen.insert(id) {
            continue;
        }
        let balance = ledger.balance(id);
        if balance > Decimal::ZERO {
            creditors.push((id, balance));
        } else if balance < Decimal::ZERO {
            debtors.push((id, -balance));
        }
    }

    // sort_by is stable, so equal amounts stay in user_ids order
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let (mut ci, mut di) = (0, 0);
    while ci < creditors.len() && di < debtors.len() {
        let amount = creditors[ci].1.min(debtors[di].1);
        if amount > Decimal::ZERO {
            trace!("{} -> {}: {}", debtors[di].0, creditors[ci].0, amount);
            settlements.push(Settlement {
                from_user_id: debtors[di].0.clone(),
                to_user_id: creditors[ci].0.clone(),
                amount,
            });
        }
        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;
        if creditors[ci].1.is_zero() {
            ci += 1;
        }
        if debtors[di].1.is_zero() {
            di += 1;
        }
    }

    settlements
}
