use crate::core::game::{Game, GameType};
use crate::core::ledger::Ledger;
use crate::core::player::PlayerId;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a single game contributed to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GameOutcome {
    /// No results recorded yet.
    Unscored,
    /// Match play without exactly two players.
    Malformed { player_count: usize },
    /// Match play with equal scores; nobody pays.
    Halved,
    /// Pot game whose best score was not positive; the pot is void.
    Void,
    /// Money moved to `winner` from `payers` other participants.
    Paid { winner: PlayerId, payers: usize },
    /// The stakes leave the representable money range; the game is void.
    Overflowed,
}

impl GameOutcome {
    pub fn moved_money(&self) -> bool {
        matches!(self, GameOutcome::Paid { .. })
    }
}

/// Apply one game to the running balances and report what happened.
///
/// Match play: the higher score wins the buy-in from the other player.
/// Every other type is winner-take-all: the first participant holding the
/// strictly highest score collects everyone else's buy-in, provided that
/// score is above zero. Missing scores count as zero.
///
/// A game whose stake arithmetic, or whose effect on any balance, would
/// leave the `Decimal` range is voided as [`GameOutcome::Overflowed`] and
/// leaves the ledger untouched.
pub fn apply_game(ledger: &mut Ledger, game: &Game) -> GameOutcome {
    if !game.is_scored() {
        return GameOutcome::Unscored;
    }

    let outcome = match game.game_type() {
        GameType::MatchPlay => apply_match_play(ledger, game),
        _ => apply_pot_game(ledger, game),
    };

    match &outcome {
        GameOutcome::Paid { winner, payers } => debug!(
            "{} game {}: {} collects {} x {}",
            game.game_type(),
            game.id(),
            winner,
            payers,
            game.buy_in()
        ),
        other => debug!("{} game {} moves no money: {:?}", game.game_type(), game.id(), other),
    }
    outcome
}

fn apply_match_play(ledger: &mut Ledger, game: &Game) -> GameOutcome {
    let [a, b] = match game.player_ids() {
        [a, b] => [a, b],
        players => {
            return GameOutcome::Malformed {
                player_count: players.len(),
            }
        }
    };

    let score_a = game.result(a);
    let score_b = game.result(b);
    let (winner, loser) = if score_a > score_b {
        (a, b)
    } else if score_b > score_a {
        (b, a)
    } else {
        return GameOutcome::Halved;
    };

    if !ledger.transfer(loser, winner, game.buy_in()) {
        return GameOutcome::Overflowed;
    }
    GameOutcome::Paid {
        winner: winner.clone(),
        payers: 1,
    }
}

fn apply_pot_game(ledger: &mut Ledger, game: &Game) -> GameOutcome {
    // Strictly greater keeps the first participant on a tie.
    let mut best: Option<(&PlayerId, Decimal)> = None;
    for player in game.player_ids() {
        let score = game.result(player);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((player, score));
        }
    }

    let winner = match best {
        Some((winner, score)) if score > Decimal::ZERO => winner,
        _ => return GameOutcome::Void,
    };

    let buy_in = game.buy_in();
    let winnings = match game.pot().and_then(|pot| pot.checked_sub(buy_in)) {
        Some(winnings) => winnings,
        None => return GameOutcome::Overflowed,
    };

    let mut payers = 0;
    let changes: Vec<(&PlayerId, Decimal)> = game
        .player_ids()
        .iter()
        .map(|player| {
            if player == winner {
                (player, winnings)
            } else {
                payers += 1;
                (player, -buy_in)
            }
        })
        .collect();
    if !ledger.apply(&changes) {
        return GameOutcome::Overflowed;
    }

    GameOutcome::Paid {
        winner: winner.clone(),
        payers,
    }
}
