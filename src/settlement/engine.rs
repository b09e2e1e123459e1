use crate::core::game::{Game, GameSet};
use crate::core::ledger::Ledger;
use crate::core::player::PlayerId;
use crate::settlement::balances::{apply_game, GameOutcome};
use crate::settlement::transfers::{reduce_balances, Settlement};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How to treat a player listed more than once in the same game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Use the participant list as given; every listing stakes a buy-in.
    #[default]
    Accept,
    /// Keep only the first listing of each player.
    Dedupe,
}

/// Result of settling a batch of games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Net balance of every player touched or listed.
    ledger: Ledger,
    /// Payments that square the balances.
    settlements: Vec<Settlement>,
    /// Per-game outcome, in input order.
    outcomes: Vec<GameOutcome>,
    /// Money that would move if every game were paid separately.
    gross_total: Decimal,
    /// Number of payments if every game were paid separately.
    gross_payments: usize,
}

impl SettlementReport {
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self, player: &PlayerId) -> Decimal {
        self.ledger.balance(player)
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn into_settlements(self) -> Vec<Settlement> {
        self.settlements
    }

    pub fn outcomes(&self) -> &[GameOutcome] {
        &self.outcomes
    }

    /// Games that actually moved money.
    pub fn games_paid(&self) -> usize {
        self.outcomes.iter().filter(|o| o.moved_money()).count()
    }

    pub fn gross_total(&self) -> Decimal {
        self.gross_total
    }

    pub fn gross_payments(&self) -> usize {
        self.gross_payments
    }

    /// Total of all settlement amounts, saturating at `Decimal::MAX`.
    pub fn net_total(&self) -> Decimal {
        self.settlements
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.amount))
    }

    /// Share of the gross amount that netting removed, as a percentage.
    pub fn savings_percent(&self) -> f64 {
        if self.gross_total == Decimal::ZERO {
            return 0.0;
        }
        let saved = self.gross_total.saturating_sub(self.net_total());
        let pct = saved / self.gross_total * Decimal::from(100);
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }

    /// Every credit is matched by a debit.
    pub fn is_balanced(&self) -> bool {
        self.ledger.is_balanced()
    }
}

impl std::fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement ===")?;
        writeln!(f, "Games paid:     {} of {}", self.games_paid(), self.outcomes.len())?;
        writeln!(f, "Gross:          {:.2} in {} payments", self.gross_total, self.gross_payments)?;
        writeln!(f, "Net:            {:.2} in {} payments", self.net_total(), self.settlements.len())?;
        writeln!(f, "Savings %:      {:.1}%", self.savings_percent())?;
        writeln!(f, "Balanced:       {}", self.is_balanced())?;

        writeln!(f, "\n--- Balances ---")?;
        for (player, balance) in self.ledger.sorted() {
            writeln!(f, "  {:<20} {:>10.2}", player.as_str(), balance)?;
        }

        writeln!(f, "\n--- Payments ---")?;
        if self.settlements.is_empty() {
            writeln!(f, "  All square.")?;
        }
        for s in &self.settlements {
            writeln!(f, "  {}", s)?;
        }
        Ok(())
    }
}

/// Turns scored games into balances and then into payments.
///
/// Holds no state between calls; every run builds a fresh ledger.
///
/// # Examples
///
/// ```
/// use golf_settle::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let (a, b) = (PlayerId::new("A"), PlayerId::new("B"));
/// let games: GameSet = vec![
///     Game::new(GameType::MatchPlay, dec!(6), vec![a.clone(), b.clone()])
///         .with_results([(a.clone(), dec!(1)), (b.clone(), dec!(0))]),
/// ]
/// .into();
///
/// let report = SettlementEngine::default().settle(&games, &[a.clone(), b.clone()]);
/// assert_eq!(report.balance(&a), dec!(6));
/// assert_eq!(report.settlements()[0].from_user_id, b);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine {
    duplicate_policy: DuplicatePolicy,
}

impl SettlementEngine {
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Self { duplicate_policy }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Net balance of every player across all scored games.
    ///
    /// Every id in `user_ids` gets an entry even if it never played.
    pub fn balances(&self, games: &GameSet, user_ids: &[PlayerId]) -> Ledger {
        let mut ledger = Ledger::with_players(user_ids);
        for game in games.games() {
            apply_game(&mut ledger, &self.prepare(game));
        }
        ledger
    }

    /// Full settlement run: balances, per-game outcomes, and payments.
    pub fn settle(&self, games: &GameSet, user_ids: &[PlayerId]) -> SettlementReport {
        let mut ledger = Ledger::with_players(user_ids);
        let mut outcomes = Vec::with_capacity(games.len());
        let mut gross_total = Decimal::ZERO;
        let mut gross_payments = 0;

        for game in games.games() {
            let game = self.prepare(game);
            let outcome = apply_game(&mut ledger, &game);
            if let GameOutcome::Paid { payers, .. } = &outcome {
                gross_total = gross_total
                    .saturating_add(game.buy_in().saturating_mul(Decimal::from(*payers)));
                gross_payments += payers;
            }
            outcomes.push(outcome);
        }

        let settlements = reduce_balances(&ledger, user_ids);
        SettlementReport {
            ledger,
            settlements,
            outcomes,
            gross_total,
            gross_payments,
        }
    }

    /// Only the payment list.
    pub fn calculate_settlements(&self, games: &GameSet, user_ids: &[PlayerId]) -> Vec<Settlement> {
        self.settle(games, user_ids).into_settlements()
    }

    fn prepare<'a>(&self, game: &'a Game) -> Cow<'a, Game> {
        match self.duplicate_policy {
            DuplicatePolicy::Accept => Cow::Borrowed(game),
            DuplicatePolicy::Dedupe => Cow::Owned(game.deduplicated()),
        }
    }
}

/// Settle with the default engine.
pub fn calculate_settlements(games: &GameSet, user_ids: &[PlayerId]) -> Vec<Settlement> {
    SettlementEngine::default().calculate_settlements(games, user_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::GameType;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn p(id: &str) -> PlayerId {
        PlayerId::new(id)
    }

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| p(n)).collect()
    }

    #[test]
    fn test_match_play_end_to_end() {
        let games: GameSet = vec![Game::new(GameType::MatchPlay, dec!(6), ids(&["A", "B"]))
            .with_results([(p("A"), dec!(1)), (p("B"), dec!(0))])]
        .into();

        let report = SettlementEngine::default().settle(&games, &ids(&["A", "B"]));
        assert_eq!(report.balance(&p("A")), dec!(6));
        assert_eq!(report.balance(&p("B")), dec!(-6));
        assert_eq!(
            report.settlements(),
            &[Settlement {
                from_user_id: p("B"),
                to_user_id: p("A"),
                amount: dec!(6),
            }]
        );
    }

    #[test]
    fn test_skins_end_to_end() {
        let players = ids(&["P1", "P2", "P3", "P4"]);
        let games: GameSet = vec![Game::new(GameType::Skins, dec!(6), players.clone())
            .with_results([
                (p("P1"), dec!(4)),
                (p("P2"), dec!(2)),
                (p("P3"), dec!(1)),
                (p("P4"), dec!(0)),
            ])]
        .into();

        let settlements = calculate_settlements(&games, &players);
        assert_eq!(settlements.len(), 3);
        for (s, payer) in settlements.iter().zip(["P2", "P3", "P4"]) {
            assert_eq!(s.from_user_id, p(payer));
            assert_eq!(s.to_user_id, p("P1"));
            assert_eq!(s.amount, dec!(6));
        }
    }

    #[test]
    fn test_games_net_against_each_other() {
        let games: GameSet = vec![
            Game::new(GameType::MatchPlay, dec!(10), ids(&["A", "B"]))
                .with_results([(p("A"), dec!(1))]),
            Game::new(GameType::MatchPlay, dec!(10), ids(&["B", "C"]))
                .with_results([(p("B"), dec!(1))]),
            Game::new(GameType::MatchPlay, dec!(10), ids(&["C", "A"]))
                .with_results([(p("C"), dec!(1))]),
        ]
        .into();

        let report = SettlementEngine::default().settle(&games, &ids(&["A", "B", "C"]));
        assert!(report.settlements().is_empty());
        assert_eq!(report.gross_total(), dec!(30));
        assert_eq!(report.gross_payments(), 3);
        assert_relative_eq!(report.savings_percent(), 100.0);
    }

    #[test]
    fn test_unscored_and_malformed_games_ignored() {
        let games: GameSet = vec![
            Game::new(GameType::Skins, dec!(6), ids(&["A", "B"])),
            Game::new(GameType::MatchPlay, dec!(6), ids(&["A"])).with_results([(p("A"), dec!(1))]),
        ]
        .into();

        let report = SettlementEngine::default().settle(&games, &ids(&["A", "B"]));
        assert_eq!(report.games_paid(), 0);
        assert_eq!(report.outcomes()[0], GameOutcome::Unscored);
        assert_eq!(report.outcomes()[1], GameOutcome::Malformed { player_count: 1 });
        assert_eq!(report.balance(&p("A")), Decimal::ZERO);
        assert!(report.settlements().is_empty());
        assert_relative_eq!(report.savings_percent(), 0.0);
    }

    #[test]
    fn test_overflowing_games_are_voided_not_fatal() {
        let huge = Decimal::MAX / dec!(2) + dec!(1);
        let games: GameSet = vec![
            Game::new(GameType::Skins, huge, ids(&["A", "B"])).with_results([(p("A"), dec!(1))]),
            Game::new(GameType::MatchPlay, huge, ids(&["A", "B"]))
                .with_results([(p("A"), dec!(1))]),
            Game::new(GameType::MatchPlay, huge, ids(&["A", "B"]))
                .with_results([(p("A"), dec!(1))]),
        ]
        .into();

        let report = SettlementEngine::default().settle(&games, &ids(&["A", "B"]));
        assert_eq!(report.outcomes()[0], GameOutcome::Overflowed);
        assert!(report.outcomes()[1].moved_money());
        assert_eq!(report.outcomes()[2], GameOutcome::Overflowed);
        assert!(report.is_balanced());
        assert_eq!(report.gross_total(), huge);
        assert_eq!(
            report.settlements(),
            &[Settlement {
                from_user_id: p("B"),
                to_user_id: p("A"),
                amount: huge,
            }]
        );
        assert_relative_eq!(report.savings_percent(), 0.0);
    }

    #[test]
    fn test_gross_total_saturates() {
        let near_max = Decimal::MAX - dec!(1);
        let games: GameSet = vec![
            Game::new(GameType::MatchPlay, near_max, ids(&["A", "B"]))
                .with_results([(p("A"), dec!(1))]),
            Game::new(GameType::MatchPlay, near_max, ids(&["C", "D"]))
                .with_results([(p("C"), dec!(1))]),
        ]
        .into();

        let report = SettlementEngine::default().settle(&games, &ids(&["A", "B", "C", "D"]));
        assert_eq!(report.games_paid(), 2);
        assert_eq!(report.gross_total(), Decimal::MAX);
        assert_eq!(report.net_total(), Decimal::MAX);
        assert!(report.to_string().contains("Balanced:       true"));
    }

    #[test]
    fn test_listed_players_seeded_with_zero() {
        let ledger = SettlementEngine::default().balances(&GameSet::new(), &ids(&["A", "B"]));
        assert_eq!(ledger.balances().len(), 2);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_duplicate_policy_accept_counts_every_listing() {
        let games: GameSet = vec![Game::new(GameType::Skins, dec!(5), ids(&["A", "B", "B"]))
            .with_results([(p("A"), dec!(2))])]
        .into();

        let ledger = SettlementEngine::new(DuplicatePolicy::Accept).balances(&games, &ids(&["A", "B"]));
        assert_eq!(ledger.balance(&p("A")), dec!(10));
        assert_eq!(ledger.balance(&p("B")), dec!(-10));
    }

    #[test]
    fn test_duplicate_policy_dedupe() {
        let games: GameSet = vec![Game::new(GameType::Skins, dec!(5), ids(&["A", "B", "B"]))
            .with_results([(p("A"), dec!(2))])]
        .into();

        let ledger = SettlementEngine::new(DuplicatePolicy::Dedupe).balances(&games, &ids(&["A", "B"]));
        assert_eq!(ledger.balance(&p("A")), dec!(5));
        assert_eq!(ledger.balance(&p("B")), dec!(-5));
    }

    #[test]
    fn test_report_display_lists_payments() {
        let games: GameSet = vec![Game::new(GameType::MatchPlay, dec!(6), ids(&["A", "B"]))
            .with_results([(p("A"), dec!(1))])]
        .into();
        let text = SettlementEngine::default()
            .settle(&games, &ids(&["A", "B"]))
            .to_string();
        assert!(text.contains("B pays A 6.00"));
        assert!(text.contains("Balanced:       true"));
    }
}
