//! Core game aggregate.
//!
//! `GameState` owns everything a match mutates (board, players, dice, deck,
//! log). `Game` pairs it with the active [`Phase`] and feeds the two kinds of
//! input events into that phase.

use crate::board::{Board, BoardSnapshot, PlayerId, Resource};
use crate::config::GameConfig;
use crate::coords::{CrossCoord, Direction, PathCoord, TileCoord};
use crate::events::{ActionLog, GameEvent};
use crate::phase::{BoardCursor, Menu, Phase};
use crate::player::{DevelopmentCard, Player, ResourceHand};
use crate::random::Randomness;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Smallest and largest supported table
pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;

/// Errors raised while restoring a saved match
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("tile {0} is not on the board or is malformed")]
    InvalidTile(TileCoord),

    #[error("expected {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },

    #[error("path {0} does not join two neighbouring crossings")]
    InvalidPath(PathCoord),

    #[error("crossing {0} is not on the board")]
    InvalidCrossing(CrossCoord),

    #[error("city at {0} has no matching settlement")]
    CityWithoutSettlement(CrossCoord),

    #[error("a match needs 3 or 4 players, found {0}")]
    PlayerCount(usize),

    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a match mutates apart from the active phase
#[derive(Debug)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// All players, indexed by seat
    pub players: Vec<Player>,
    /// Seat whose turn it is
    pub current_player: PlayerId,
    /// Last dice roll
    pub last_roll: Option<(u8, u8)>,
    /// Development card draw pile (top is the end)
    pub dev_deck: Vec<DevelopmentCard>,
    /// Most recent events
    pub log: ActionLog,
    pub config: GameConfig,
    winner: Option<PlayerId>,
    notice: Option<String>,
    rng: Box<dyn Randomness>,
}

impl GameState {
    fn new(
        players: Vec<Player>,
        board: Board,
        dev_deck: Vec<DevelopmentCard>,
        config: GameConfig,
        rng: Box<dyn Randomness>,
    ) -> Self {
        Self {
            board,
            players,
            current_player: 0,
            last_roll: None,
            dev_deck,
            log: ActionLog::with_capacity(config.log_capacity),
            config,
            winner: None,
            notice: None,
            rng,
        }
    }

    // ==================== Players ====================

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// The player whose turn it is
    pub fn current(&self) -> &Player {
        &self.players[self.current_player as usize]
    }

    pub(crate) fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player as usize]
    }

    /// Total victory points including hidden cards
    pub fn total_victory_points(&self, id: PlayerId) -> u32 {
        self.player(id)
            .map_or(0, |player| player.victory_points(&self.board))
    }

    /// Victory points visible to the other players
    pub fn visible_victory_points(&self, id: PlayerId) -> u32 {
        self.player(id)
            .map_or(0, |player| player.visible_victory_points(&self.board))
    }

    /// Owners (as returned by `Board::place_robber`) other than the current
    /// player who hold at least one resource, by seat
    pub fn stealable_players(&self, owners: impl IntoIterator<Item = PlayerId>) -> Vec<PlayerId> {
        let mut victims: Vec<PlayerId> = owners
            .into_iter()
            .filter(|&id| id != self.current_player)
            .filter(|&id| self.player(id).is_some_and(|p| !p.resources.is_empty()))
            .collect();
        victims.sort_unstable();
        victims
    }

    // ==================== Notices & Log ====================

    /// Message shown with the next help text (rule violations, outcomes)
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Notice for player {}: {}", self.current_player, message);
        self.notice = Some(message);
    }

    pub(crate) fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        info!("{}", event);
        self.log.push(event);
    }

    // ==================== Turn Actions ====================

    /// Roll two dice for the current player and log it
    pub(crate) fn roll_dice(&mut self) -> (u8, u8) {
        let roll = (self.rng.roll_die(), self.rng.roll_die());
        self.last_roll = Some(roll);
        self.record(GameEvent::DiceRolled {
            player: self.current_player,
            roll,
            total: roll.0 + roll.1,
        });
        roll
    }

    /// Hand out resources for a dice sum
    pub(crate) fn distribute_resources(&mut self, dice_sum: u8) {
        let mut produced: Vec<(PlayerId, ResourceHand)> = self
            .board
            .generate_resources(dice_sum)
            .into_iter()
            .map(|(id, units)| (id, units.into_iter().collect()))
            .collect();
        produced.sort_unstable_by_key(|(id, _)| *id);

        for (id, resources) in produced {
            if let Some(player) = self.players.get_mut(id as usize) {
                player.resources.add_hand(&resources);
                self.record(GameEvent::ResourcesProduced {
                    player: id,
                    resources,
                });
            }
        }
    }

    /// Pass the turn to the next seat
    pub(crate) fn end_turn(&mut self) {
        let player = self.current_player;
        let next_player = ((player as usize + 1) % self.player_count()) as PlayerId;
        self.current_player = next_player;
        self.last_roll = None;
        self.record(GameEvent::TurnEnded {
            player,
            next_player,
        });
    }

    /// Steal one random resource from `victim` for the current player
    pub(crate) fn steal_from(&mut self, victim: PlayerId) -> Option<Resource> {
        let thief = self.current_player;
        let resource = self
            .players
            .get_mut(victim as usize)?
            .resources
            .steal_random(self.rng.as_mut())?;
        self.current_mut().resources.add(resource, 1);
        self.record(GameEvent::ResourceStolen { thief, victim });
        Some(resource)
    }

    // ==================== Victory ====================

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// First player in seat order at or above the victory target, if any
    pub fn check_game_end(&mut self) -> Option<PlayerId> {
        if self.winner.is_some() {
            return self.winner;
        }

        let target = self.config.victory_points_to_win;
        let winner = self
            .players
            .iter()
            .map(|player| (player.id, player.victory_points(&self.board)))
            .find(|(_, points)| *points >= target);

        if let Some((player, victory_points)) = winner {
            self.winner = Some(player);
            self.record(GameEvent::GameWon {
                player,
                victory_points,
            });
        }
        self.winner
    }
}

/// A running match: the mutable state plus the active phase
#[derive(Debug)]
pub struct Game {
    state: GameState,
    phase: Phase,
}

impl Game {
    /// Create and start a match on a freshly generated standard board.
    ///
    /// Seat order is shuffled once here; the first seat places first.
    ///
    /// # Panics
    ///
    /// Panics unless 3 or 4 names are given.
    pub fn new(names: Vec<String>, config: GameConfig, mut rng: Box<dyn Randomness>) -> Self {
        let board = Board::standard(rng.as_mut());
        Self::with_board(names, board, config, rng)
    }

    /// Create and start a match on the given board
    pub fn with_board(
        mut names: Vec<String>,
        board: Board,
        config: GameConfig,
        mut rng: Box<dyn Randomness>,
    ) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()),
            "Must have 3-4 players"
        );

        names.shuffle(rng.as_mut());
        let players = names
            .into_iter()
            .enumerate()
            .map(|(seat, name)| Player::new(seat as PlayerId, name))
            .collect();
        let deck = DevelopmentCard::shuffled_deck(rng.as_mut());

        let state = GameState::new(players, board, deck, config, rng);
        info!(
            "Match started with {}",
            state
                .players
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            phase: Phase::start(&state),
            state,
        }
    }

    // ==================== Input ====================

    /// Move the cursor of the active phase
    pub fn move_cursor(&mut self, direction: Direction) {
        self.state.clear_notice();
        self.phase.move_cursor(direction, &self.state);
    }

    /// Confirm the current selection
    pub fn confirm(&mut self) {
        self.state.clear_notice();
        let phase = std::mem::take(&mut self.phase);
        let from = phase.name();
        let next = phase.confirm(&mut self.state);
        self.transition(from, next);
    }

    /// Back out of the current selection
    pub fn cancel(&mut self) {
        self.state.clear_notice();
        let phase = std::mem::take(&mut self.phase);
        let from = phase.name();
        let next = phase.cancel(&mut self.state);
        self.transition(from, next);
    }

    fn transition(&mut self, from: &'static str, next: Phase) {
        let next = match self.state.winner() {
            Some(winner) if !next.is_game_end() => Phase::game_end(winner),
            _ => next,
        };
        if from != next.name() {
            debug!("Phase {} -> {}", from, next.name());
        }
        self.phase = next;
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Help text for the active phase, preceded by any pending notice
    pub fn help_text(&self) -> String {
        let help = self.phase.help_text(&self.state);
        match self.state.notice() {
            Some(notice) => format!("{}\n{}", notice, help),
            None => help,
        }
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.phase.menu()
    }

    pub fn board_cursor(&self) -> Option<BoardCursor> {
        self.phase.board_cursor()
    }

    pub fn current_player(&self) -> &Player {
        self.state.current()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    // ==================== Snapshots ====================

    /// Capture everything except the active phase
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.state.players.clone(),
            board: self.state.board.to_snapshot(),
            current_player: self.state.current_player,
            last_roll: self.state.last_roll,
            dev_deck: self.state.dev_deck.clone(),
            log: self.state.log.clone(),
            winner: self.state.winner,
            config: self.state.config.clone(),
        }
    }

    /// Rebuild a match from a snapshot.
    ///
    /// The match keeps the snapshot's config; the log is cut down to its
    /// `log_capacity`. The active phase restarts at the dice roll of the saved
    /// current player, or at the end screen if the match was already won.
    pub fn restore(snapshot: GameSnapshot, rng: Box<dyn Randomness>) -> Result<Self, SnapshotError> {
        let count = snapshot.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SnapshotError::PlayerCount(count));
        }
        let known = |id: PlayerId| (id as usize) < count;

        if let Some((_, player)) = snapshot
            .players
            .iter()
            .enumerate()
            .find(|(seat, player)| player.id as usize != *seat)
        {
            return Err(SnapshotError::UnknownPlayer(player.id));
        }

        let owners = snapshot
            .board
            .roads
            .iter()
            .map(|e| e.owner)
            .chain(snapshot.board.settlements.iter().map(|e| e.owner))
            .chain(snapshot.board.cities.iter().map(|e| e.owner))
            .chain(std::iter::once(snapshot.current_player))
            .chain(snapshot.winner);
        for owner in owners {
            if !known(owner) {
                return Err(SnapshotError::UnknownPlayer(owner));
            }
        }

        let board = Board::from_snapshot(&snapshot.board)?;
        let mut state = GameState::new(
            snapshot.players,
            board,
            snapshot.dev_deck,
            snapshot.config,
            rng,
        );
        state.current_player = snapshot.current_player;
        state.last_roll = snapshot.last_roll;
        state.winner = snapshot.winner;
        for event in snapshot.log.iter() {
            state.log.push(event.clone());
        }

        let phase = match state.winner {
            Some(winner) => Phase::game_end(winner),
            None => Phase::dice_roll(),
        };
        info!("Match restored at player {}'s turn", state.current_player);

        Ok(Self { state, phase })
    }
}

/// Lossless serialisable copy of a match, without the active phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub board: BoardSnapshot,
    pub current_player: PlayerId,
    pub last_roll: Option<(u8, u8)>,
    pub dev_deck: Vec<DevelopmentCard>,
    pub log: ActionLog,
    #[serde(default)]
    pub winner: Option<PlayerId>,
    #[serde(default)]
    pub config: GameConfig,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
