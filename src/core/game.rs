use crate::core::player::PlayerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The side-game formats a league can wager on.
///
/// Settlement only distinguishes two buckets: head-to-head `MatchPlay`
/// and pot-style winner-take-all for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    MatchPlay,
    Skins,
    Nassau,
    Stroke,
    BestBall,
    Scramble,
}

impl GameType {
    pub const ALL: [GameType; 6] = [
        GameType::MatchPlay,
        GameType::Skins,
        GameType::Nassau,
        GameType::Stroke,
        GameType::BestBall,
        GameType::Scramble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::MatchPlay => "match_play",
            GameType::Skins => "skins",
            GameType::Nassau => "nassau",
            GameType::Stroke => "stroke",
            GameType::BestBall => "best_ball",
            GameType::Scramble => "scramble",
        }
    }

    /// Whether the game pays out as a single pot to one winner.
    pub fn is_pot_game(&self) -> bool {
        !matches!(self, GameType::MatchPlay)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problems found by [`Game::validate`].
///
/// The settlement engine never rejects games; validation exists for
/// callers that want to refuse bad input before it is stored.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("buy-in must not be negative, got {0}")]
    NegativeBuyIn(Decimal),
    #[error("game has no players")]
    NoPlayers,
    #[error("match play needs exactly two players, got {0}")]
    MatchPlayArity(usize),
    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),
}

/// A side game played during a round.
///
/// `results` is `None` until the game has been scored; unscored games are
/// ignored by settlement. The meaning of a score depends on the game type,
/// but in every case a higher value is better.
///
/// # Examples
///
/// ```
/// use golf_settle::core::game::{Game, GameType};
/// use golf_settle::core::player::PlayerId;
/// use rust_decimal_macros::dec;
///
/// let game = Game::new(
///     GameType::MatchPlay,
///     dec!(6),
///     vec![PlayerId::new("jake"), PlayerId::new("mike")],
/// )
/// .with_results([(PlayerId::new("jake"), dec!(1))]);
///
/// assert!(game.is_scored());
/// assert_eq!(game.result(&PlayerId::new("mike")), dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(rename = "type")]
    game_type: GameType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Stake per player.
    buy_in: Decimal,
    player_ids: Vec<PlayerId>,
    #[serde(default)]
    results: Option<HashMap<PlayerId, Decimal>>,
    #[serde(default)]
    settled: bool,
}

impl Game {
    /// Create an unscored game.
    pub fn new(game_type: GameType, buy_in: Decimal, player_ids: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_type,
            name: None,
            buy_in,
            player_ids,
            results: None,
            settled: false,
        }
    }

    /// Use a fixed id (useful for testing / determinism).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record scores. Players left out of `results` score zero.
    pub fn with_results<I>(mut self, results: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, Decimal)>,
    {
        self.results = Some(results.into_iter().collect());
        self
    }

    pub fn mark_settled(mut self) -> Self {
        self.settled = true;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn buy_in(&self) -> Decimal {
        self.buy_in
    }

    pub fn player_ids(&self) -> &[PlayerId] {
        &self.player_ids
    }

    pub fn results(&self) -> Option<&HashMap<PlayerId, Decimal>> {
        self.results.as_ref()
    }

    pub fn is_scored(&self) -> bool {
        self.results.is_some()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// A player's score, or zero when missing or unscored.
    pub fn result(&self, player: &PlayerId) -> Decimal {
        self.results
            .as_ref()
            .and_then(|r| r.get(player))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Total money at stake: buy-in times number of participants.
    ///
    /// `None` when the product leaves the `Decimal` range.
    pub fn pot(&self) -> Option<Decimal> {
        self.buy_in
            .checked_mul(Decimal::from(self.player_ids.len()))
    }

    /// The same game with repeated participants removed, first occurrence kept.
    pub fn deduplicated(&self) -> Game {
        let mut seen = HashSet::new();
        let mut game = self.clone();
        game.player_ids.retain(|p| seen.insert(p.clone()));
        game
    }

    /// Check the game against the league's input rules.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.buy_in < Decimal::ZERO {
            return Err(GameError::NegativeBuyIn(self.buy_in));
        }
        if self.player_ids.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if self.game_type == GameType::MatchPlay && self.player_ids.len() != 2 {
            return Err(GameError::MatchPlayArity(self.player_ids.len()));
        }
        let mut seen = HashSet::new();
        for p in &self.player_ids {
            if !seen.insert(p) {
                return Err(GameError::DuplicatePlayer(p.clone()));
            }
        }
        Ok(())
    }
}

/// An ordered collection of games submitted for settlement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSet {
    games: Vec<Game>,
}

impl GameSet {
    pub fn new() -> Self {
        Self { games: Vec::new() }
    }

    pub fn add(&mut self, game: Game) {
        self.games.push(game);
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games that have results recorded.
    pub fn scored(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| g.is_scored())
    }

    /// Scored games not yet marked as settled.
    pub fn pending(&self) -> GameSet {
        self.scored()
            .filter(|g| !g.is_settled())
            .cloned()
            .collect()
    }

    /// Every player referenced, in first-appearance order.
    pub fn players(&self) -> Vec<PlayerId> {
        let mut seen = HashSet::new();
        self.games
            .iter()
            .flat_map(|g| g.player_ids().iter())
            .filter(|p| seen.insert((*p).clone()))
            .cloned()
            .collect()
    }
}

impl FromIterator<Game> for GameSet {
    fn from_iter<T: IntoIterator<Item = Game>>(iter: T) -> Self {
        Self {
            games: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Game>> for GameSet {
    fn from(games: Vec<Game>) -> Self {
        Self { games }
    }
}
