//! Building a trade offer: first what to give, then what to receive.
//!
//! Up/Down select a resource, Left/Right change its amount. Only the 4:1 bank
//! trade is carried out; any other shape is turned down with a notice.

use super::{Idle, Interaction, Menu, Phase};
use crate::board::Resource;
use crate::coords::Direction;
use crate::events::GameEvent;
use crate::game::GameState;
use crate::player::ResourceHand;
use crate::trade::{self, Counterparty};

fn amount_labels(hand: &ResourceHand) -> Vec<String> {
    Resource::ALL
        .iter()
        .map(|r| format!("{}: {}", r, hand.get(*r)))
        .collect()
}

/// Change the amount of the selected resource by one step
fn adjust(hand: &mut ResourceHand, menu: &mut Menu, direction: Direction, limit: Option<u32>) {
    let resource = Resource::ALL[menu.selected()];
    let amount = hand.get(resource);
    match direction {
        Direction::Left => hand.set(resource, amount.saturating_sub(1)),
        Direction::Right if limit.map_or(true, |max| amount < max) => {
            hand.set(resource, amount + 1)
        }
        Direction::Right => {}
        Direction::Up | Direction::Down => menu.move_cursor(direction),
    }
    menu.relabel(amount_labels(hand));
}

/// Choose the cards to give away
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOffer {
    offer: ResourceHand,
    menu: Menu,
}

impl TradeOffer {
    pub fn new() -> Self {
        Self::with_offer(ResourceHand::new())
    }

    fn with_offer(offer: ResourceHand) -> Self {
        Self {
            menu: Menu::new(amount_labels(&offer)),
            offer,
        }
    }

    pub fn offer(&self) -> &ResourceHand {
        &self.offer
    }
}

impl Default for TradeOffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for TradeOffer {
    fn confirm(self, state: &mut GameState) -> Phase {
        if self.offer.is_empty() {
            state.notify("Offer at least one card");
            return self.into();
        }
        TradeSelectReceive::new(self.offer).into()
    }

    fn cancel(self, _state: &mut GameState) -> Phase {
        Idle::new().into()
    }

    /// Offered amounts are bounded by what the player holds
    fn move_cursor(&mut self, direction: Direction, state: &GameState) {
        let held = state
            .current()
            .resources
            .get(Resource::ALL[self.menu.selected()]);
        adjust(&mut self.offer, &mut self.menu, direction, Some(held));
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: choose what to give ({} held)",
            state.current().name,
            state.current().resources
        )
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

/// Choose the cards to receive, then execute the trade
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSelectReceive {
    offer: ResourceHand,
    request: ResourceHand,
    menu: Menu,
}

impl TradeSelectReceive {
    fn new(offer: ResourceHand) -> Self {
        let request = ResourceHand::new();
        Self {
            offer,
            menu: Menu::new(amount_labels(&request)),
            request,
        }
    }

    pub fn offer(&self) -> &ResourceHand {
        &self.offer
    }

    pub fn request(&self) -> &ResourceHand {
        &self.request
    }
}

impl Interaction for TradeSelectReceive {
    fn confirm(self, state: &mut GameState) -> Phase {
        if self.request.is_empty() {
            state.notify("Ask for at least one card");
            return self.into();
        }

        let player = state.current_player;
        let mut offer = trade::TradeOffer::new(player, None, self.offer, self.request);
        if !offer.is_bank_trade() {
            state.notify("Only 4:1 trades with the bank are implemented");
            return Idle::new().into();
        }
        if !offer.execute(Counterparty::Bank, &mut state.players) {
            state.notify("You no longer hold the offered cards");
            return Idle::new().into();
        }

        let (Some((gave, gave_count)), Some((received, _))) =
            (offer.offering.single_kind(), offer.requesting.single_kind())
        else {
            return Idle::new().into();
        };
        state.record(GameEvent::BankTrade {
            player,
            gave,
            gave_count,
            received,
        });
        state.notify(format!(
            "Traded {} {} for 1 {} with the bank",
            gave_count, gave, received
        ));
        Idle::new().into()
    }

    /// Back to the offer, which keeps its amounts
    fn cancel(self, _state: &mut GameState) -> Phase {
        TradeOffer::with_offer(self.offer).into()
    }

    fn move_cursor(&mut self, direction: Direction, _state: &GameState) {
        adjust(&mut self.request, &mut self.menu, direction, None);
    }

    fn help_text(&self, state: &GameState) -> String {
        format!(
            "{}: choose what to receive for {}",
            state.current().name,
            self.offer
        )
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::test_state;

    fn press(phase: &mut Phase, state: &GameState, direction: Direction, times: usize) {
        for _ in 0..times {
            phase.move_cursor(direction, state);
        }
    }

    #[test]
    fn test_offer_bounded_by_holdings() {
        let mut state = test_state(Vec::new());
        state.players[0].resources = ResourceHand::with_amounts(2, 0, 0, 0, 0);
        let mut phase: Phase = TradeOffer::new().into();
        press(&mut phase, &state, Direction::Right, 5);

        let Phase::TradeOffer(offer) = &phase else {
            panic!("expected TradeOffer");
        };
        assert_eq!(offer.offer().wood, 2);
        assert_eq!(phase.menu().unwrap().selected_label(), "Wood: 2");
        let next = phase.confirm(&mut state);
        assert_eq!(next.name(), "TradeSelectReceive");
    }

    #[test]
    fn test_empty_offer_stays() {
        let mut state = test_state(Vec::new());
        let next = TradeOffer::new().confirm(&mut state);
        assert_eq!(next.name(), "TradeOffer");
    }

    #[test]
    fn test_non_bank_trade_is_declined() {
        let mut state = test_state(Vec::new());
        let before = ResourceHand::with_amounts(3, 0, 0, 0, 0);
        state.players[0].resources = before;
        let mut receive = TradeSelectReceive::new(ResourceHand::with_amounts(3, 0, 0, 0, 0));
        receive.request.set(Resource::Ore, 1);

        let next = receive.confirm(&mut state);
        assert_eq!(next.name(), "Idle");
        assert_eq!(state.players[0].resources, before);
        assert_eq!(
            state.notice(),
            Some("Only 4:1 trades with the bank are implemented")
        );
    }

    #[test]
    fn test_cancel_offer_returns_to_idle() {
        let mut state = test_state(Vec::new());
        let before = ResourceHand::with_amounts(1, 0, 0, 0, 0);
        state.players[0].resources = before;
        let mut phase: Phase = TradeOffer::new().into();
        press(&mut phase, &state, Direction::Right, 1);

        let next = phase.cancel(&mut state);
        assert_eq!(next.name(), "Idle");
        assert_eq!(state.players[0].resources, before);
    }
}
