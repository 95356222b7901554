//! Turn and phase state machine.
//!
//! Exactly one [`Phase`] is active at a time. Every phase reacts to the same
//! inputs (cursor movement, confirm, cancel) and describes itself through help
//! text, an optional menu and an optional board cursor. `confirm` and `cancel`
//! consume the phase and return the next one.
//!
//! Rule violations never fail: the phase sets a notice on the [`GameState`] and
//! returns itself (or a documented fallback).

mod build;
mod cards;
mod robber;
mod setup;
mod trading;
mod turn;

pub use build::{CityPlacement, RoadEnd, RoadKind, RoadStart, SettlementPlacement};
pub use cards::{Monopoly, PlayDevelopmentCard, YearOfPlenty};
pub use robber::{PlaceRobber, StealCard};
pub use setup::{snake_seat, InitialRoad, InitialSettlement};
pub use trading::{TradeOffer, TradeSelectReceive};
pub use turn::{Building, DiceRoll, GameEnd, Idle};

use crate::board::PlayerId;
use crate::coords::{CrossCoord, Direction, TileCoord};
use crate::game::GameState;
use serde::{Deserialize, Serialize};

/// What the board cursor currently points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "coord")]
pub enum BoardCursor {
    Cross(CrossCoord),
    Tile(TileCoord),
}

/// A vertical list of options with one selected entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    options: Vec<String>,
    selected: usize,
}

impl Menu {
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub fn new(options: Vec<String>) -> Self {
        assert!(!options.is_empty(), "a menu needs at least one option");
        Self {
            options,
            selected: 0,
        }
    }

    pub fn from_labels<S: ToString>(labels: &[S]) -> Self {
        Self::new(labels.iter().map(ToString::to_string).collect())
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        &self.options[self.selected]
    }

    /// Select an entry directly.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn select(&mut self, index: usize) {
        assert!(
            index < self.options.len(),
            "menu index {} out of range for {} options",
            index,
            self.options.len()
        );
        self.selected = index;
    }

    /// Up and Down move the selection, wrapping around; other directions are ignored
    pub fn move_cursor(&mut self, direction: Direction) {
        let len = self.options.len();
        match direction {
            Direction::Up => self.selected = (self.selected + len - 1) % len,
            Direction::Down => self.selected = (self.selected + 1) % len,
            Direction::Left | Direction::Right => {}
        }
    }

    /// Replace the labels, keeping the selection
    pub(crate) fn relabel(&mut self, options: Vec<String>) {
        debug_assert_eq!(options.len(), self.options.len());
        self.options = options;
    }
}

/// Where a detour (robber, free roads, card play) hands control back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    DiceRoll,
    Idle,
}

impl Resume {
    pub(crate) fn into_phase(self) -> Phase {
        match self {
            Resume::DiceRoll => DiceRoll::new().into(),
            Resume::Idle => Idle::new().into(),
        }
    }
}

/// Behaviour shared by every phase
pub(crate) trait Interaction: Sized + Into<Phase> {
    fn confirm(self, state: &mut GameState) -> Phase;

    fn cancel(self, _state: &mut GameState) -> Phase {
        self.into()
    }

    fn move_cursor(&mut self, _direction: Direction, _state: &GameState) {}

    fn help_text(&self, state: &GameState) -> String;

    fn board_cursor(&self) -> Option<BoardCursor> {
        None
    }

    fn menu(&self) -> Option<&Menu> {
        None
    }
}

pub(crate) fn step_cross(cursor: &mut CrossCoord, direction: Direction) {
    if let Some(next) = cursor.step(direction) {
        *cursor = next;
    }
}

pub(crate) fn step_tile(cursor: &mut TileCoord, direction: Direction) {
    if let Some(next) = cursor.step(direction) {
        *cursor = next;
    }
}

macro_rules! phases {
    ($($variant:ident),* $(,)?) => {
        /// The active interaction state of a match
        #[derive(Debug, Clone, PartialEq)]
        pub enum Phase {
            $($variant($variant),)*
        }

        $(
            impl From<$variant> for Phase {
                fn from(phase: $variant) -> Self {
                    Phase::$variant(phase)
                }
            }
        )*

        impl Phase {
            /// Variant name, used in logs
            pub fn name(&self) -> &'static str {
                match self {
                    $(Phase::$variant(_) => stringify!($variant),)*
                }
            }

            /// Apply the confirm input and return the next phase
            pub fn confirm(self, state: &mut GameState) -> Phase {
                match self {
                    $(Phase::$variant(phase) => phase.confirm(state),)*
                }
            }

            /// Apply the cancel input and return the next phase
            pub fn cancel(self, state: &mut GameState) -> Phase {
                match self {
                    $(Phase::$variant(phase) => phase.cancel(state),)*
                }
            }

            pub fn move_cursor(&mut self, direction: Direction, state: &GameState) {
                match self {
                    $(Phase::$variant(phase) => phase.move_cursor(direction, state),)*
                }
            }

            pub fn help_text(&self, state: &GameState) -> String {
                match self {
                    $(Phase::$variant(phase) => phase.help_text(state),)*
                }
            }

            pub fn board_cursor(&self) -> Option<BoardCursor> {
                match self {
                    $(Phase::$variant(phase) => phase.board_cursor(),)*
                }
            }

            pub fn menu(&self) -> Option<&Menu> {
                match self {
                    $(Phase::$variant(phase) => phase.menu(),)*
                }
            }
        }
    };
}

phases! {
    InitialSettlement,
    InitialRoad,
    DiceRoll,
    Idle,
    Building,
    RoadStart,
    RoadEnd,
    SettlementPlacement,
    CityPlacement,
    PlayDevelopmentCard,
    Monopoly,
    YearOfPlenty,
    PlaceRobber,
    StealCard,
    TradeOffer,
    TradeSelectReceive,
    GameEnd,
}

impl Default for Phase {
    fn default() -> Self {
        DiceRoll::new().into()
    }
}

impl Phase {
    /// First phase of a new match
    pub(crate) fn start(state: &GameState) -> Phase {
        InitialSettlement::first(state).into()
    }

    pub(crate) fn dice_roll() -> Phase {
        DiceRoll::new().into()
    }

    pub(crate) fn game_end(winner: PlayerId) -> Phase {
        GameEnd::new(winner).into()
    }

    pub fn is_game_end(&self) -> bool {
        matches!(self, Phase::GameEnd(_))
    }
}
