//! Initial placement: one settlement and one road per player per round,
//! in snake order.

use super::{step_cross, BoardCursor, DiceRoll, Interaction, Phase};
use crate::board::PlayerId;
use crate::coords::{CrossCoord, Direction, PathCoord};
use crate::events::GameEvent;
use crate::game::GameState;

/// Seat placing at `step` of the snake order 0..n-1, n-1..0
pub fn snake_seat(step: usize, players: usize) -> PlayerId {
    let seat = if step < players {
        step
    } else {
        2 * players - 1 - step
    };
    seat as PlayerId
}

fn ordinal(step: usize, players: usize) -> &'static str {
    if step < players {
        "first"
    } else {
        "second"
    }
}

/// Place a free settlement; only the distance rule applies
#[derive(Debug, Clone, PartialEq)]
pub struct InitialSettlement {
    step: usize,
    cursor: CrossCoord,
}

impl InitialSettlement {
    pub(crate) fn first(state: &GameState) -> Self {
        debug_assert_eq!(state.current_player, snake_seat(0, state.player_count()));
        Self {
            step: 0,
            cursor: CrossCoord::center(),
        }
    }

    /// Position in the snake order
    pub fn step(&self) -> usize {
        self.step
    }
}

impl Interaction for InitialSettlement {
    fn confirm(self, state: &mut GameState) -> Phase {
        if !state.board.can_place_settlement(&self.cursor) {
            state.notify("That crossing is taken or too close to another settlement");
            return self.into();
        }

        let player = state.current_player;
        state.board.place_settlement(self.cursor, player);
        state.record(GameEvent::SettlementBuilt {
            player,
            location: self.cursor,
        });

        InitialRoad {
            step: self.step,
            source: self.cursor,
            cursor: self.cursor,
        }
        .into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_cross(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: place your {} settlement",
            state.current().name,
            ordinal(self.step, state.player_count())
        )
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Cross(self.cursor))
    }
}

/// Place a free road next to the settlement just built
#[derive(Debug, Clone, PartialEq)]
pub struct InitialRoad {
    step: usize,
    source: CrossCoord,
    cursor: CrossCoord,
}

impl InitialRoad {
    /// The settlement the road has to start from
    pub fn source(&self) -> CrossCoord {
        self.source
    }
}

impl Interaction for InitialRoad {
    fn confirm(self, state: &mut GameState) -> Phase {
        let Some(path) = PathCoord::between(self.source, self.cursor) else {
            state.notify("Pick a crossing next to your new settlement");
            return self.into();
        };
        if state.board.road_owner(&path).is_some() {
            state.notify("There is already a road there");
            return self.into();
        }

        let player = state.current_player;
        state.board.place_road(path, player);
        state.record(GameEvent::RoadBuilt {
            player,
            location: path,
        });

        let players = state.player_count();
        let next = self.step + 1;
        if next == 2 * players {
            state.current_player = 0;
            return DiceRoll::new().into();
        }

        state.current_player = snake_seat(next, players);
        InitialSettlement {
            step: next,
            cursor: self.cursor,
        }
        .into()
    }

    /// Take the settlement back and place it again
    fn cancel(self, state: &mut GameState) -> Phase {
        state.board.remove_settlement(&self.source);
        state.log.retract(&GameEvent::SettlementBuilt {
            player: state.current_player,
            location: self.source,
        });
        InitialSettlement {
            step: self.step,
            cursor: self.source,
        }
        .into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_cross(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: build a road from {} to a neighbouring crossing",
            state.current().name,
            self.source
        )
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Cross(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::test_state;

    #[test]
    fn test_snake_order() {
        let order: Vec<PlayerId> = (0..6).map(|step| snake_seat(step, 3)).collect();
        assert_eq!(order, vec![0, 1, 2, 2, 1, 0]);

        let order: Vec<PlayerId> = (0..8).map(|step| snake_seat(step, 4)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 3, 2, 1, 0]);
    }

    #[test]
    fn test_cancel_road_takes_settlement_back() {
        let mut state = test_state(Vec::new());
        let phase = InitialSettlement::first(&state);
        let Phase::InitialRoad(road) = phase.confirm(&mut state) else {
            panic!("expected InitialRoad");
        };
        assert_eq!(state.board.settlement_owner(&CrossCoord::center()), Some(0));
        assert_eq!(state.log.len(), 1);

        let Phase::InitialSettlement(again) = road.cancel(&mut state) else {
            panic!("expected InitialSettlement");
        };
        assert_eq!(again.step(), 0);
        assert_eq!(state.board.settlement_owner(&CrossCoord::center()), None);
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_settlement_needs_distance() {
        let mut state = test_state(Vec::new());
        state.board.place_settlement(CrossCoord::center(), 1);
        let mut phase = InitialSettlement::first(&state);
        phase.move_cursor(Direction::Down, &state);

        let next = phase.confirm(&mut state);
        assert_eq!(next.name(), "InitialSettlement");
        assert!(state.notice().is_some());
        assert!(state.log.is_empty());
    }
}
