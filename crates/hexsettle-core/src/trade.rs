//! Trade offers between players and with the bank.
//!
//! An offer is built by the offering player, checked with
//! [`TradeOffer::can_take`] and then executed atomically against a
//! [`Counterparty`]. Once completed or retracted it never changes again.

use crate::board::{PlayerId, Resource};
use crate::player::{Player, ResourceHand};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units per side of a bank trade
pub const BANK_GIVE: u32 = 4;
pub const BANK_TAKE: u32 = 1;

/// One side of a trade: known resources plus cards of unknown type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSide {
    pub hand: ResourceHand,
    /// Placeholder cards whose resource is not named yet
    pub unknown: u32,
}

impl TradeSide {
    pub fn new(hand: ResourceHand) -> Self {
        Self { hand, unknown: 0 }
    }

    pub fn total(&self) -> u32 {
        self.hand.total() + self.unknown
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Whether any card on this side has no named resource
    pub fn is_ambiguous(&self) -> bool {
        self.unknown > 0
    }

    /// The single resource type on this side with its count, if there is exactly one
    pub fn single_kind(&self) -> Option<(Resource, u32)> {
        if self.is_ambiguous() {
            return None;
        }
        match self.hand.kinds().as_slice() {
            [resource] => Some((*resource, self.hand.get(*resource))),
            _ => None,
        }
    }
}

impl From<ResourceHand> for TradeSide {
    fn from(hand: ResourceHand) -> Self {
        Self::new(hand)
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hand)?;
        if self.unknown > 0 {
            write!(f, " + {} unknown", self.unknown)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Pending,
    Retracted,
    Completed,
}

/// Answer to "may this party take the offer right now?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanTake {
    /// The offer is no longer pending
    Obsolete,
    /// The offer targets someone else (or the taker made it)
    ExcludedPlayer,
    /// A side still contains unknown cards
    Ambiguous,
    /// The taker does not hold the requested cards
    NotEnoughResources,
    Yes,
}

/// Who accepts the offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counterparty {
    Player(PlayerId),
    Bank,
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Counterparty::Player(id) => write!(f, "player {}", id),
            Counterparty::Bank => f.write_str("the bank"),
        }
    }
}

/// A trade offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    /// Player making the offer
    pub from: PlayerId,
    /// Specific player to trade with, or None for open offer
    pub to: Option<PlayerId>,
    /// Cards the offerer gives away
    pub offering: TradeSide,
    /// Cards the offerer wants in return
    pub requesting: TradeSide,
    status: TradeStatus,
}

impl TradeOffer {
    /// Create a new pending offer
    pub fn new(
        from: PlayerId,
        to: Option<PlayerId>,
        offering: impl Into<TradeSide>,
        requesting: impl Into<TradeSide>,
    ) -> Self {
        Self {
            from,
            to,
            offering: offering.into(),
            requesting: requesting.into(),
            status: TradeStatus::Pending,
        }
    }

    pub fn status(&self) -> TradeStatus {
        self.status
    }

    /// Exactly four of one resource for exactly one of one resource
    pub fn is_bank_trade(&self) -> bool {
        matches!(
            (self.offering.single_kind(), self.requesting.single_kind()),
            (Some((_, BANK_GIVE)), Some((_, BANK_TAKE)))
        )
    }

    /// Withdraw a pending offer
    pub fn retract(&mut self) -> bool {
        if self.status != TradeStatus::Pending {
            return false;
        }
        self.status = TradeStatus::Retracted;
        true
    }

    /// Check whether a counterparty may take this offer
    pub fn can_take(&self, taker: Counterparty, players: &[Player]) -> CanTake {
        if self.status != TradeStatus::Pending {
            return CanTake::Obsolete;
        }

        if let Counterparty::Player(id) = taker {
            if id == self.from || self.to.is_some_and(|to| to != id) {
                return CanTake::ExcludedPlayer;
            }
        }

        if self.offering.is_ambiguous() || self.requesting.is_ambiguous() {
            return CanTake::Ambiguous;
        }

        match taker {
            Counterparty::Bank => CanTake::Yes,
            Counterparty::Player(id) => match players.get(id as usize) {
                Some(player) if player.resources.can_afford(&self.requesting.hand) => CanTake::Yes,
                _ => CanTake::NotEnoughResources,
            },
        }
    }

    /// Swap the cards between offerer and counterparty.
    ///
    /// Returns false without touching any hand if the offer cannot be taken
    /// or the offerer no longer holds what they offered.
    pub fn execute(&mut self, taker: Counterparty, players: &mut [Player]) -> bool {
        if self.can_take(taker, players) != CanTake::Yes {
            return false;
        }

        let give = self.offering.hand;
        let take = self.requesting.hand;

        // Settle both hands on copies so a shortfall leaves everyone untouched
        let from = self.from as usize;
        let Some(mut offerer_hand) = players.get(from).map(|p| p.resources) else {
            return false;
        };
        if !offerer_hand.try_subtract(&give) {
            return false;
        }
        offerer_hand.add_hand(&take);

        let acceptor = match taker {
            Counterparty::Bank => None,
            Counterparty::Player(id) => {
                let Some(mut hand) = players.get(id as usize).map(|p| p.resources) else {
                    return false;
                };
                if !hand.try_subtract(&take) {
                    return false;
                }
                hand.add_hand(&give);
                Some((id as usize, hand))
            }
        };

        players[from].resources = offerer_hand;
        if let Some((id, hand)) = acceptor {
            players[id].resources = hand;
        }

        self.status = TradeStatus::Completed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(hands: &[ResourceHand]) -> Vec<Player> {
        hands
            .iter()
            .enumerate()
            .map(|(i, hand)| {
                let mut player = Player::new(i as PlayerId, format!("P{}", i));
                player.resources = *hand;
                player
            })
            .collect()
    }

    #[test]
    fn test_bank_trade_shape() {
        let four_brick = ResourceHand::single(Resource::Brick, 4);
        let one_ore = ResourceHand::single(Resource::Ore, 1);
        assert!(TradeOffer::new(0, None, four_brick, one_ore).is_bank_trade());

        let mixed = ResourceHand::with_amounts(2, 2, 0, 0, 0);
        assert!(!TradeOffer::new(0, None, mixed, one_ore).is_bank_trade());

        let three_brick = ResourceHand::single(Resource::Brick, 3);
        assert!(!TradeOffer::new(0, None, three_brick, one_ore).is_bank_trade());

        let two_ore = ResourceHand::single(Resource::Ore, 2);
        assert!(!TradeOffer::new(0, None, four_brick, two_ore).is_bank_trade());
    }

    #[test]
    fn test_can_take_rules() {
        let players = players(&[
            ResourceHand::with_amounts(1, 0, 0, 0, 0),
            ResourceHand::with_amounts(0, 1, 0, 0, 0),
            ResourceHand::new(),
        ]);
        let offer = TradeOffer::new(
            0,
            None,
            ResourceHand::single(Resource::Wood, 1),
            ResourceHand::single(Resource::Brick, 1),
        );

        assert_eq!(offer.can_take(Counterparty::Player(0), &players), CanTake::ExcludedPlayer);
        assert_eq!(offer.can_take(Counterparty::Player(1), &players), CanTake::Yes);
        assert_eq!(
            offer.can_take(Counterparty::Player(2), &players),
            CanTake::NotEnoughResources
        );

        let targeted = TradeOffer { to: Some(2), ..offer.clone() };
        assert_eq!(targeted.can_take(Counterparty::Player(1), &players), CanTake::ExcludedPlayer);

        let mut vague = offer.clone();
        vague.requesting.unknown = 1;
        assert_eq!(vague.can_take(Counterparty::Player(1), &players), CanTake::Ambiguous);

        let mut retracted = offer;
        assert!(retracted.retract());
        assert!(!retracted.retract());
        assert_eq!(retracted.can_take(Counterparty::Player(1), &players), CanTake::Obsolete);
    }

    #[test]
    fn test_execute_between_players() {
        let mut players = players(&[
            ResourceHand::with_amounts(2, 0, 0, 0, 0),
            ResourceHand::with_amounts(0, 0, 0, 3, 0),
        ]);
        let mut offer = TradeOffer::new(
            0,
            Some(1),
            ResourceHand::single(Resource::Wood, 2),
            ResourceHand::single(Resource::Wheat, 1),
        );

        assert!(offer.execute(Counterparty::Player(1), &mut players));
        assert_eq!(players[0].resources, ResourceHand::with_amounts(0, 0, 0, 1, 0));
        assert_eq!(players[1].resources, ResourceHand::with_amounts(2, 0, 0, 2, 0));
        assert_eq!(offer.status(), TradeStatus::Completed);

        // Completed offers cannot run twice
        assert!(!offer.execute(Counterparty::Player(1), &mut players));
    }

    #[test]
    fn test_execute_with_bank() {
        let mut players = players(&[ResourceHand::with_amounts(1, 4, 0, 0, 0)]);
        let mut offer = TradeOffer::new(
            0,
            None,
            ResourceHand::single(Resource::Brick, 4),
            ResourceHand::single(Resource::Ore, 1),
        );

        assert!(offer.execute(Counterparty::Bank, &mut players));
        assert_eq!(players[0].resources, ResourceHand::with_amounts(1, 0, 1, 0, 0));
    }

    #[test]
    fn test_failed_execute_changes_nothing() {
        let mut players = players(&[
            ResourceHand::with_amounts(0, 1, 0, 0, 0),
            ResourceHand::with_amounts(0, 0, 1, 0, 0),
        ]);
        let before = players.clone();
        // Offerer no longer holds the offered wood
        let mut offer = TradeOffer::new(
            0,
            None,
            ResourceHand::single(Resource::Wood, 1),
            ResourceHand::single(Resource::Ore, 1),
        );

        assert!(!offer.execute(Counterparty::Player(1), &mut players));
        assert_eq!(players, before);
        assert_eq!(offer.status(), TradeStatus::Pending);
    }

    #[test]
    fn test_bank_execute_needs_offered_cards() {
        let mut players = players(&[ResourceHand::with_amounts(0, 3, 0, 0, 0)]);
        let mut offer = TradeOffer::new(
            0,
            None,
            ResourceHand::single(Resource::Brick, 4),
            ResourceHand::single(Resource::Ore, 1),
        );

        assert!(!offer.execute(Counterparty::Bank, &mut players));
        assert_eq!(players[0].resources, ResourceHand::with_amounts(0, 3, 0, 0, 0));
        assert_eq!(offer.status(), TradeStatus::Pending);

        players[0].resources.add(Resource::Brick, 1);
        assert!(offer.execute(Counterparty::Bank, &mut players));
        assert_eq!(players[0].resources, ResourceHand::with_amounts(0, 0, 1, 0, 0));
    }
}
