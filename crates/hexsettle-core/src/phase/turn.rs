//! The regular turn loop: roll, choose an action, end the turn.

use super::{
    CityPlacement, Interaction, Menu, Phase, PlaceRobber, PlayDevelopmentCard, Resume, RoadKind,
    RoadStart, SettlementPlacement, TradeOffer,
};
use crate::board::PlayerId;
use crate::coords::Direction;
use crate::events::GameEvent;
use crate::game::GameState;
use crate::player::DevelopmentCard;

const ROBBER_SUM: u8 = 7;

const DICE_OPTIONS: [&str; 2] = ["Roll dice", "Play Knight"];

/// Start of a turn: roll, or play a Knight first
#[derive(Debug, Clone, PartialEq)]
pub struct DiceRoll {
    menu: Menu,
}

impl DiceRoll {
    pub fn new() -> Self {
        Self {
            menu: Menu::from_labels(&DICE_OPTIONS),
        }
    }
}

impl Default for DiceRoll {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for DiceRoll {
    fn confirm(self, state: &mut GameState) -> Phase {
        if self.menu.selected() == 1 {
            if !state.current_mut().play_dev_card(DevelopmentCard::Knight) {
                state.notify("You have no Knight to play");
                return self.into();
            }
            state.record(GameEvent::DevelopmentCardPlayed {
                player: state.current_player,
                card: DevelopmentCard::Knight,
            });
            return PlaceRobber::new(state, Resume::DiceRoll).into();
        }

        let (a, b) = state.roll_dice();
        let sum = a + b;
        if sum == ROBBER_SUM {
            return PlaceRobber::new(state, Resume::Idle).into();
        }
        state.distribute_resources(sum);
        Idle::new().into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!("{}: roll the dice", state.current().name)
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdleAction {
    Build,
    Trade,
    PlayCard,
    EndTurn,
}

const IDLE_ACTIONS: [(IdleAction, &str); 4] = [
    (IdleAction::Build, "Build"),
    (IdleAction::Trade, "Trade"),
    (IdleAction::PlayCard, "Play development card"),
    (IdleAction::EndTurn, "End turn"),
];

/// Main menu of a turn after the dice were rolled
#[derive(Debug, Clone, PartialEq)]
pub struct Idle {
    menu: Menu,
}

impl Idle {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(IDLE_ACTIONS.iter().map(|(_, l)| l.to_string()).collect()),
        }
    }
}

impl Default for Idle {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for Idle {
    fn confirm(self, state: &mut GameState) -> Phase {
        match IDLE_ACTIONS[self.menu.selected()].0 {
            IdleAction::Build => Building::new().into(),
            IdleAction::Trade => TradeOffer::new().into(),
            IdleAction::PlayCard => PlayDevelopmentCard::new(state, Resume::Idle).into(),
            IdleAction::EndTurn => {
                state.end_turn();
                DiceRoll::new().into()
            }
        }
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        let player = state.current();
        format!(
            "{}: choose an action ({}; {} VP)",
            player.name,
            player.resources,
            state.total_victory_points(player.id)
        )
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildOption {
    Road,
    Settlement,
    City,
    DevelopmentCard,
}

const BUILD_OPTIONS: [(BuildOption, &str); 4] = [
    (BuildOption::Road, "Road (Wood, Brick)"),
    (BuildOption::Settlement, "Settlement (Wood, Brick, Wheat, Sheep)"),
    (BuildOption::City, "City (3 Ore, 2 Wheat)"),
    (BuildOption::DevelopmentCard, "Development card (Ore, Wheat, Sheep)"),
];

/// Choose what to build or buy
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    menu: Menu,
}

impl Building {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(BUILD_OPTIONS.iter().map(|(_, l)| l.to_string()).collect()),
        }
    }

    fn buy_development_card(self, state: &mut GameState) -> Phase {
        if state.dev_deck.is_empty() {
            state.notify("There are no development cards left");
            return self.into();
        }
        if !state.current().can_buy_development_card() {
            state.notify("Not enough resources for a development card");
            return self.into();
        }

        let Some(card) = state.dev_deck.pop() else {
            return self.into();
        };
        state.current_mut().buy_development_card(card);
        state.record(GameEvent::DevelopmentCardPurchased {
            player: state.current_player,
        });
        state.check_game_end();
        state.notify(format!("You drew a {} card", card));
        Idle::new().into()
    }
}

impl Default for Building {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for Building {
    fn confirm(self, state: &mut GameState) -> Phase {
        match BUILD_OPTIONS[self.menu.selected()].0 {
            BuildOption::Road => RoadStart::new(RoadKind::Paid, state).into(),
            BuildOption::Settlement => SettlementPlacement::new(state).into(),
            BuildOption::City => CityPlacement::new(state).into(),
            BuildOption::DevelopmentCard => self.buy_development_card(state),
        }
    }

    fn cancel(self, _state: &mut GameState) -> Phase {
        Idle::new().into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        self.menu.move_cursor(direction);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: choose what to build ({})",
            state.current().name,
            state.current().resources
        )
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

/// The match is over; nothing changes any more
#[derive(Debug, Clone, PartialEq)]
pub struct GameEnd {
    winner: PlayerId,
}

impl GameEnd {
    pub fn new(winner: PlayerId) -> Self {
        Self { winner }
    }

    pub fn winner(&self) -> PlayerId {
        self.winner
    }
}

impl Interaction for GameEnd {
    fn confirm(self, _state: &mut GameState) -> Phase {
        self.into()
    }

    fn help_text(&self, state: &GameState) -> String {
        let name = state
            .player(self.winner)
            .map_or("Unknown player", |p| p.name.as_str());
        format!(
            "{} wins with {} victory points!",
            name,
            state.total_victory_points(self.winner)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::test_state;
    use crate::player::ResourceHand;

    fn idle_state() -> GameState {
        test_state(Vec::new())
    }

    #[test]
    fn test_dev_card_purchase_draws_from_pile() {
        let mut state = idle_state();
        state.players[0].resources = ResourceHand::with_amounts(0, 0, 1, 1, 1);
        let top = *state.dev_deck.last().unwrap();

        let mut building = Building::new();
        building.menu.select(3);
        let next = building.confirm(&mut state);

        assert_eq!(next.name(), "Idle");
        assert_eq!(state.dev_deck.len(), 24);
        assert_eq!(state.players[0].dev_cards, vec![top]);
        assert!(state.players[0].resources.is_empty());
    }

    #[test]
    fn test_dev_card_purchase_needs_resources() {
        let mut state = idle_state();
        let mut building = Building::new();
        building.menu.select(3);
        let next = building.confirm(&mut state);

        assert_eq!(next.name(), "Building");
        assert_eq!(state.dev_deck.len(), 25);
        assert!(state.notice().is_some());
    }

    #[test]
    fn test_end_turn_passes_to_next_seat() {
        let mut state = idle_state();
        let mut idle = Idle::new();
        idle.menu.select(3);
        let next = idle.confirm(&mut state);

        assert_eq!(next.name(), "DiceRoll");
        assert_eq!(state.current_player, 1);
    }

    #[test]
    fn test_knight_before_roll_needs_card() {
        let mut state = idle_state();
        let mut roll = DiceRoll::new();
        roll.menu.select(1);
        let next = roll.confirm(&mut state);
        assert_eq!(next.name(), "DiceRoll");
        assert_eq!(state.last_roll, None);

        state.players[0].dev_cards.push(DevelopmentCard::Knight);
        let mut roll = DiceRoll::new();
        roll.menu.select(1);
        let next = roll.confirm(&mut state);
        assert_eq!(next.name(), "PlaceRobber");
        assert_eq!(state.players[0].played_cards, vec![DevelopmentCard::Knight]);
    }

    #[test]
    fn test_roll_and_idle_ignore_cancel() {
        let mut state = idle_state();
        let next = DiceRoll::new().cancel(&mut state);
        assert_eq!(next.name(), "DiceRoll");
        assert_eq!(state.last_roll, None);

        let mut idle = Idle::new();
        idle.menu.select(3);
        let next = idle.cancel(&mut state);
        assert_eq!(next.name(), "Idle");
        assert_eq!(state.current_player, 0);
    }

    #[test]
    fn test_building_cancel_returns_to_idle() {
        let mut state = idle_state();
        state.players[0].resources = ResourceHand::with_amounts(0, 0, 1, 1, 1);
        let mut building = Building::new();
        building.menu.select(3);

        let next = building.cancel(&mut state);
        assert_eq!(next.name(), "Idle");
        assert_eq!(state.dev_deck.len(), 25);
        assert_eq!(state.players[0].resources.total(), 3);
    }
}
