//! Playing development cards.
//!
//! Knight and Road Building are spent as soon as they are chosen because their
//! follow-up cannot be cancelled. Monopoly and Year of Plenty are only spent
//! once their resource choice is confirmed.

use super::{Interaction, Menu, Phase, PlaceRobber, Resume, RoadStart};
use crate::board::Resource;
use crate::coords::Direction;
use crate::events::GameEvent;
use crate::game::GameState;
use crate::player::DevelopmentCard;

/// Free roads granted by a Road Building card
const ROAD_BUILDING_ROADS: u8 = 2;

fn resource_menu() -> Menu {
    Menu::from_labels(&Resource::ALL)
}

/// Spend a held card and log it
fn spend(state: &mut GameState, card: DevelopmentCard) -> bool {
    if !state.current_mut().play_dev_card(card) {
        return false;
    }
    state.record(GameEvent::DevelopmentCardPlayed {
        player: state.current_player,
        card,
    });
    true
}

/// Choose one of the held development cards
#[derive(Debug, Clone, PartialEq)]
pub struct PlayDevelopmentCard {
    resume: Resume,
    menu: Menu,
}

impl PlayDevelopmentCard {
    pub(crate) fn new(state: &GameState, resume: Resume) -> Self {
        let player = state.current();
        let mut menu = Menu::new(
            DevelopmentCard::ALL
                .iter()
                .map(|card| format!("{} ({})", card, player.dev_card_count(*card)))
                .collect(),
        );
        if let Some(first_held) = DevelopmentCard::ALL
            .iter()
            .position(|card| card.is_playable() && player.has_dev_card(*card))
        {
            menu.select(first_held);
        }
        Self { resume, menu }
    }
}

impl Interaction for PlayDevelopmentCard {
    fn confirm(self, state: &mut GameState) -> Phase {
        let card = DevelopmentCard::ALL[self.menu.selected()];
        if !state.current().has_dev_card(card) {
            state.notify(format!("You do not hold a {} card", card));
            return self.into();
        }

        match card {
            DevelopmentCard::VictoryPoint => {
                state.notify("Victory point cards stay hidden until the end");
                self.resume.into_phase()
            }
            DevelopmentCard::Knight => {
                spend(state, card);
                PlaceRobber::new(state, self.resume).into()
            }
            DevelopmentCard::RoadBuilding => {
                spend(state, card);
                RoadStart::free(ROAD_BUILDING_ROADS, self.resume, state)
            }
            DevelopmentCard::Monopoly => Monopoly {
                resume: self.resume,
                menu: resource_menu(),
            }
            .into(),
            DevelopmentCard::YearOfPlenty => YearOfPlenty {
                resume: self.resume,
                first: None,
                menu: resource_menu(),
            }
            .into(),
        }
    }

    fn cancel(self, _state: &mut GameState) -> Phase {
        self.resume.into_phase()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!("{}: choose a card to play", state.current().name)
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

/// Take every unit of one resource from all other players
#[derive(Debug, Clone, PartialEq)]
pub struct Monopoly {
    resume: Resume,
    menu: Menu,
}

impl Interaction for Monopoly {
    fn confirm(self, state: &mut GameState) -> Phase {
        let resource = Resource::ALL[self.menu.selected()];
        if !spend(state, DevelopmentCard::Monopoly) {
            state.notify("You no longer hold a Monopoly card");
            return self.resume.into_phase();
        }

        let player = state.current_player;
        let mut total_taken = 0;
        for other in state.players.iter_mut().filter(|p| p.id != player) {
            total_taken += other.resources.get(resource);
            other.resources.set(resource, 0);
        }
        state.current_mut().resources.add(resource, total_taken);
        state.record(GameEvent::MonopolyCollected {
            player,
            resource,
            total_taken,
        });
        self.resume.into_phase()
    }

    fn cancel(self, state: &mut GameState) -> Phase {
        PlayDevelopmentCard::new(state, self.resume).into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: choose the resource to monopolise",
            state.current().name
        )
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

/// Take two resources of free choice from the bank
#[derive(Debug, Clone, PartialEq)]
pub struct YearOfPlenty {
    resume: Resume,
    first: Option<Resource>,
    menu: Menu,
}

impl YearOfPlenty {
    /// The resource picked first, once chosen
    pub fn first(&self) -> Option<Resource> {
        self.first
    }
}

impl Interaction for YearOfPlenty {
    fn confirm(mut self, state: &mut GameState) -> Phase {
        let picked = Resource::ALL[self.menu.selected()];
        let Some(first) = self.first else {
            self.first = Some(picked);
            return self.into();
        };

        if !spend(state, DevelopmentCard::YearOfPlenty) {
            state.notify("You no longer hold a Year of Plenty card");
            return self.resume.into_phase();
        }
        let resources = &mut state.current_mut().resources;
        resources.add(first, 1);
        resources.add(picked, 1);
        state.record(GameEvent::YearOfPlentyTaken {
            player: state.current_player,
            resources: (first, picked),
        });
        self.resume.into_phase()
    }

    /// Undo the first pick, or leave the card unplayed
    fn cancel(mut self, state: &mut GameState) -> Phase {
        if self.first.take().is_some() {
            return self.into();
        }
        PlayDevelopmentCard::new(state, self.resume).into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        let name = &state.current().name;
        match self.first {
            None => format!("{}: choose the first resource", name),
            Some(first) => format!("{}: {} and which second resource?", name, first),
        }
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}
