//! Placing roads, settlements and cities during a turn.

use super::{step_cross, BoardCursor, Building, Idle, Interaction, Phase, Resume};
use crate::coords::{CrossCoord, Direction, PathCoord};
use crate::events::GameEvent;
use crate::game::GameState;

/// Whether a road is bought or granted by a Road Building card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadKind {
    Paid,
    /// `remaining` counts this road too
    Free { remaining: u8, resume: Resume },
}

/// Pick the crossing a new road starts from
#[derive(Debug, Clone, PartialEq)]
pub struct RoadStart {
    kind: RoadKind,
    cursor: CrossCoord,
}

impl RoadStart {
    pub(crate) fn new(kind: RoadKind, state: &GameState) -> Self {
        Self {
            kind,
            cursor: network_anchor(state),
        }
    }

    /// Start the next free road, or skip it when no legal spot exists
    pub(crate) fn free(remaining: u8, resume: Resume, state: &mut GameState) -> Phase {
        if remaining == 0 {
            return resume.into_phase();
        }
        let player = state.current_player;
        if !state.board.has_road_spot(player) {
            state.record(GameEvent::RoadForfeited { player });
            state.notify("There is nowhere left to build a free road");
            return resume.into_phase();
        }
        Self::new(RoadKind::Free { remaining, resume }, state).into()
    }

    pub fn kind(&self) -> RoadKind {
        self.kind
    }
}

/// A crossing of the current player's network, or the board center
fn network_anchor(state: &GameState) -> CrossCoord {
    let player = state.current_player;
    state
        .board
        .settlements()
        .filter(|(_, owner)| **owner == player)
        .map(|(cross, _)| *cross)
        .min()
        .unwrap_or_else(CrossCoord::center)
}

impl Interaction for RoadStart {
    fn confirm(self, state: &mut GameState) -> Phase {
        if !state
            .board
            .is_connected_to_network(&self.cursor, state.current_player)
        {
            state.notify("A road has to start at one of your buildings or roads");
            return self.into();
        }
        RoadEnd {
            kind: self.kind,
            start: self.cursor,
            cursor: self.cursor,
        }
        .into()
    }

    /// Free roads are locked in once the card is played
    fn cancel(self, state: &mut GameState) -> Phase {
        match self.kind {
            RoadKind::Paid => Building::new().into(),
            RoadKind::Free { .. } => {
                state.notify("Free roads cannot be cancelled");
                self.into()
            }
        }
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_cross(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        let name = &state.current().name;
        match self.kind {
            RoadKind::Paid => format!("{}: choose where the road starts", name),
            RoadKind::Free { remaining, .. } => format!(
                "{}: choose where the free road starts ({} left)",
                name, remaining
            ),
        }
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Cross(self.cursor))
    }
}

/// Pick the crossing a new road ends at
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEnd {
    kind: RoadKind,
    start: CrossCoord,
    cursor: CrossCoord,
}

impl RoadEnd {
    pub fn start(&self) -> CrossCoord {
        self.start
    }
}

impl Interaction for RoadEnd {
    fn confirm(self, state: &mut GameState) -> Phase {
        let player = state.current_player;
        let Some(path) = PathCoord::between(self.start, self.cursor) else {
            state.notify(format!("Pick a crossing next to {}", self.start));
            return self.into();
        };
        if !state.board.can_place_road(&path, player) {
            state.notify("You cannot build a road there");
            return self.into();
        }
        if self.kind == RoadKind::Paid && !state.current_mut().build_road() {
            state.notify("Not enough resources for a road");
            return self.into();
        }

        state.board.place_road(path, player);
        state.record(GameEvent::RoadBuilt {
            player,
            location: path,
        });
        state.check_game_end();

        match self.kind {
            RoadKind::Paid => {
                state.notify("Road built");
                Idle::new().into()
            }
            RoadKind::Free { remaining, resume } => RoadStart::free(remaining - 1, resume, state),
        }
    }

    /// Back to choosing the start, which stays where it was
    fn cancel(self, _state: &mut GameState) -> Phase {
        RoadStart {
            kind: self.kind,
            cursor: self.start,
        }
        .into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_cross(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: choose where the road from {} ends",
            state.current().name,
            self.start
        )
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Cross(self.cursor))
    }
}

/// Build a settlement on a crossing reached by the player's roads
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementPlacement {
    cursor: CrossCoord,
}

impl SettlementPlacement {
    pub(crate) fn new(state: &GameState) -> Self {
        Self {
            cursor: network_anchor(state),
        }
    }
}

impl Interaction for SettlementPlacement {
    fn confirm(self, state: &mut GameState) -> Phase {
        let player = state.current_player;
        if !state
            .board
            .can_place_settlement_for_player(&self.cursor, player)
        {
            state.notify("A settlement needs a free spot on one of your roads");
            return self.into();
        }
        if !state.current_mut().build_settlement() {
            state.notify("Not enough resources for a settlement");
            return self.into();
        }

        state.board.place_settlement(self.cursor, player);
        state.record(GameEvent::SettlementBuilt {
            player,
            location: self.cursor,
        });
        state.check_game_end();
        state.notify("Settlement built");
        Idle::new().into()
    }

    fn cancel(self, _state: &mut GameState) -> Phase {
        Building::new().into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_cross(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!("{}: choose where to settle", state.current().name)
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Cross(self.cursor))
    }
}

/// Upgrade one of the player's settlements to a city
#[derive(Debug, Clone, PartialEq)]
pub struct CityPlacement {
    cursor: CrossCoord,
}

impl CityPlacement {
    pub(crate) fn new(state: &GameState) -> Self {
        Self {
            cursor: network_anchor(state),
        }
    }
}

impl Interaction for CityPlacement {
    fn confirm(self, state: &mut GameState) -> Phase {
        let player = state.current_player;
        if !state.board.can_upgrade_to_city(&self.cursor, player) {
            state.notify("Only your own settlements can become cities");
            return self.into();
        }
        if !state.current_mut().build_city() {
            state.notify("Not enough resources for a city");
            return self.into();
        }

        state.board.upgrade_to_city(self.cursor, player);
        state.record(GameEvent::CityBuilt {
            player,
            location: self.cursor,
        });
        state.check_game_end();
        state.notify("City built");
        Idle::new().into()
    }

    fn cancel(self, _state: &mut GameState) -> Phase {
        Building::new().into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_cross(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!("{}: choose a settlement to upgrade", state.current().name)
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Cross(self.cursor))
    }
}
