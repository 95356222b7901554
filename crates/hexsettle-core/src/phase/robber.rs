//! Moving the robber and stealing after a 7 or a Knight.

use super::{step_tile, BoardCursor, Interaction, Menu, Phase, Resume};
use crate::board::PlayerId;
use crate::coords::{Direction, TileCoord};
use crate::events::GameEvent;
use crate::game::GameState;

/// Move the robber to a different tile (cannot be cancelled)
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRobber {
    resume: Resume,
    cursor: TileCoord,
}

impl PlaceRobber {
    pub(crate) fn new(state: &GameState, resume: Resume) -> Self {
        Self {
            resume,
            cursor: state.board.robber(),
        }
    }
}

impl Interaction for PlaceRobber {
    fn confirm(self, state: &mut GameState) -> Phase {
        let from = state.board.robber();
        if self.cursor == from {
            state.notify("The robber has to move to a different tile");
            return self.into();
        }

        let owners = state.board.place_robber(self.cursor);
        state.record(GameEvent::RobberMoved {
            player: state.current_player,
            from,
            to: self.cursor,
        });

        let victims = state.stealable_players(owners);
        if victims.is_empty() {
            return self.resume.into_phase();
        }
        StealCard::new(state, victims, self.resume).into()
    }

    fn cancel(self, state: &mut GameState) -> Phase {
        state.notify("The robber must be moved");
        self.into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        step_tile(&mut self.cursor, direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!("{}: move the robber", state.current().name)
    }

    fn board_cursor(&self) -> Option<BoardCursor> {
        Some(BoardCursor::Tile(self.cursor))
    }
}

/// Pick the player to steal one random card from
#[derive(Debug, Clone, PartialEq)]
pub struct StealCard {
    resume: Resume,
    victims: Vec<PlayerId>,
    menu: Menu,
}

impl StealCard {
    fn new(state: &GameState, victims: Vec<PlayerId>, resume: Resume) -> Self {
        let menu = Menu::new(
            victims
                .iter()
                .filter_map(|id| state.player(*id))
                .map(|p| format!("{} ({} cards)", p.name, p.resources.total()))
                .collect(),
        );
        Self {
            resume,
            victims,
            menu,
        }
    }

    pub fn victims(&self) -> &[PlayerId] {
        &self.victims
    }
}

impl Interaction for StealCard {
    fn confirm(self, state: &mut GameState) -> Phase {
        let victim = self.victims[self.menu.selected()];
        if let Some(resource) = state.steal_from(victim) {
            state.notify(format!("You stole 1 {}", resource));
        }
        self.resume.into_phase()
    }

    fn cancel(self, state: &mut GameState) -> Phase {
        state.notify("Choose someone to steal from");
        self.into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!("{}: choose a player to steal from", state.current().name)
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}
