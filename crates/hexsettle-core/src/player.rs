//! Player state and resource management.
//!
//! This module contains:
//! - Player struct with resources and development-card hands
//! - ResourceHand for managing resource counts
//! - Development card types and the standard deck
//! - Building costs

use crate::board::{Board, PlayerId, Resource};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Orange,
    White,
}

impl PlayerColor {
    /// Get color for a seat
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Orange,
            _ => PlayerColor::White,
        }
    }
}

/// Development card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DevelopmentCard {
    /// Move robber and steal
    Knight,
    /// Worth 1 VP; kept hidden, never played
    VictoryPoint,
    /// Build 2 roads for free
    RoadBuilding,
    /// Take any 2 resources from the bank
    YearOfPlenty,
    /// All players must give you all of one resource type
    Monopoly,
}

impl DevelopmentCard {
    /// All card kinds
    pub const ALL: [DevelopmentCard; 5] = [
        DevelopmentCard::Knight,
        DevelopmentCard::VictoryPoint,
        DevelopmentCard::RoadBuilding,
        DevelopmentCard::YearOfPlenty,
        DevelopmentCard::Monopoly,
    ];

    /// Create the standard development card deck (25 cards)
    pub fn standard_deck() -> Vec<DevelopmentCard> {
        let mut deck = Vec::with_capacity(25);
        deck.extend(std::iter::repeat(DevelopmentCard::Knight).take(14));
        deck.extend(std::iter::repeat(DevelopmentCard::VictoryPoint).take(5));
        deck.extend(std::iter::repeat(DevelopmentCard::RoadBuilding).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::YearOfPlenty).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::Monopoly).take(2));
        deck
    }

    /// Create and shuffle the standard deck
    pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<DevelopmentCard> {
        let mut deck = Self::standard_deck();
        deck.shuffle(rng);
        deck
    }

    /// Whether this card can be played (VP cards are never "played")
    pub fn is_playable(&self) -> bool {
        !matches!(self, DevelopmentCard::VictoryPoint)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DevelopmentCard::Knight => "Knight",
            DevelopmentCard::VictoryPoint => "Victory Point",
            DevelopmentCard::RoadBuilding => "Road Building",
            DevelopmentCard::YearOfPlenty => "Year of Plenty",
            DevelopmentCard::Monopoly => "Monopoly",
        }
    }
}

impl fmt::Display for DevelopmentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hand of resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub brick: u32,
    pub ore: u32,
    pub wheat: u32,
    pub sheep: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub fn with_amounts(wood: u32, brick: u32, ore: u32, wheat: u32, sheep: u32) -> Self {
        Self {
            wood,
            brick,
            ore,
            wheat,
            sheep,
        }
    }

    /// Create a hand with a single resource
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut hand = Self::new();
        hand.add(resource, amount);
        hand
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.wood + self.brick + self.ore + self.wheat + self.sheep
    }

    /// Check if hand is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Ore => self.ore,
            Resource::Wheat => self.wheat,
            Resource::Sheep => self.sheep,
        }
    }

    /// Set count of a specific resource
    pub fn set(&mut self, resource: Resource, count: u32) {
        match resource {
            Resource::Wood => self.wood = count,
            Resource::Brick => self.brick = count,
            Resource::Ore => self.ore = count,
            Resource::Wheat => self.wheat = count,
            Resource::Sheep => self.sheep = count,
        }
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        self.set(resource, self.get(resource) + amount);
    }

    /// Add another hand to this one
    pub fn add_hand(&mut self, other: &ResourceHand) {
        for resource in Resource::ALL {
            self.add(resource, other.get(resource));
        }
    }

    /// Check if can afford a cost
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        Resource::ALL
            .iter()
            .all(|&resource| self.get(resource) >= cost.get(resource))
    }

    /// Try to subtract, returning false (and leaving the hand untouched) if insufficient
    pub fn try_subtract(&mut self, cost: &ResourceHand) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for resource in Resource::ALL {
            self.set(resource, self.get(resource) - cost.get(resource));
        }
        true
    }

    /// Resource types with a non-zero count
    pub fn kinds(&self) -> Vec<Resource> {
        Resource::ALL
            .into_iter()
            .filter(|&resource| self.get(resource) > 0)
            .collect()
    }

    /// Remove one uniformly random unit (for robber stealing)
    pub fn steal_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Resource> {
        let available: Vec<Resource> = Resource::ALL
            .into_iter()
            .flat_map(|resource| std::iter::repeat(resource).take(self.get(resource) as usize))
            .collect();

        let resource = *available.choose(rng)?;
        self.set(resource, self.get(resource) - 1);
        Some(resource)
    }
}

impl FromIterator<Resource> for ResourceHand {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut hand = Self::new();
        for resource in iter {
            hand.add(resource, 1);
        }
        hand
    }
}

impl fmt::Display for ResourceHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Resource::ALL
            .iter()
            .filter(|r| self.get(**r) > 0)
            .map(|r| format!("{} {}", self.get(*r), r))
            .collect();
        if parts.is_empty() {
            f.write_str("nothing")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Building costs
pub mod costs {
    use super::ResourceHand;

    /// Cost to build a road: 1 wood, 1 brick
    pub fn road() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 0, 0)
    }

    /// Cost to build a settlement: 1 wood, 1 brick, 1 wheat, 1 sheep
    pub fn settlement() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 1, 1)
    }

    /// Cost to upgrade to city: 3 ore, 2 wheat
    pub fn city() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 3, 2, 0)
    }

    /// Cost to buy a development card: 1 ore, 1 wheat, 1 sheep
    pub fn development_card() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 1, 1, 1)
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Player color
    pub color: PlayerColor,
    /// Current resources
    pub resources: ResourceHand,
    /// Hidden development cards (unordered)
    pub dev_cards: Vec<DevelopmentCard>,
    /// Played development cards, in play order
    pub played_cards: Vec<DevelopmentCard>,
}

impl Player {
    /// Create a new player
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            color: PlayerColor::for_player(id),
            resources: ResourceHand::new(),
            dev_cards: Vec::new(),
            played_cards: Vec::new(),
        }
    }

    /// Can this player afford a road?
    pub fn can_build_road(&self) -> bool {
        self.resources.can_afford(&costs::road())
    }

    /// Can this player afford a settlement?
    pub fn can_build_settlement(&self) -> bool {
        self.resources.can_afford(&costs::settlement())
    }

    /// Can this player afford a city upgrade?
    pub fn can_build_city(&self) -> bool {
        self.resources.can_afford(&costs::city())
    }

    /// Can this player afford a development card?
    pub fn can_buy_development_card(&self) -> bool {
        self.resources.can_afford(&costs::development_card())
    }

    /// Pay for a road
    pub fn build_road(&mut self) -> bool {
        self.resources.try_subtract(&costs::road())
    }

    /// Pay for a settlement
    pub fn build_settlement(&mut self) -> bool {
        self.resources.try_subtract(&costs::settlement())
    }

    /// Pay for a city
    pub fn build_city(&mut self) -> bool {
        self.resources.try_subtract(&costs::city())
    }

    /// Pay for a development card and take it into the hidden hand
    pub fn buy_development_card(&mut self, card: DevelopmentCard) -> bool {
        if !self.resources.try_subtract(&costs::development_card()) {
            return false;
        }
        self.dev_cards.push(card);
        true
    }

    /// Check if player holds a card of the given type
    pub fn has_dev_card(&self, card: DevelopmentCard) -> bool {
        self.dev_cards.contains(&card)
    }

    /// Number of hidden cards of the given type
    pub fn dev_card_count(&self, card: DevelopmentCard) -> usize {
        self.dev_cards.iter().filter(|c| **c == card).count()
    }

    /// Move one matching card from the hidden hand to the played list
    pub fn play_dev_card(&mut self, card: DevelopmentCard) -> bool {
        let Some(pos) = self.dev_cards.iter().position(|c| *c == card) else {
            return false;
        };
        self.dev_cards.swap_remove(pos);
        self.played_cards.push(card);
        true
    }

    fn victory_cards(cards: &[DevelopmentCard]) -> u32 {
        cards
            .iter()
            .filter(|c| matches!(c, DevelopmentCard::VictoryPoint))
            .count() as u32
    }

    /// Points from buildings: 1 per settlement, 1 more per city upgrade
    pub fn building_points(&self, board: &Board) -> u32 {
        board.count_settlements(self.id) + board.count_cities(self.id)
    }

    /// Total victory points, hidden VP cards included
    pub fn victory_points(&self, board: &Board) -> u32 {
        self.visible_victory_points(board) + Self::victory_cards(&self.dev_cards)
    }

    /// Victory points other players can see (hidden VP cards excluded)
    pub fn visible_victory_points(&self, board: &Board) -> u32 {
        self.building_points(board) + Self::victory_cards(&self.played_cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::uniform_board;
    use crate::coords::CrossCoord;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_resource_hand_total() {
        let hand = ResourceHand::with_amounts(1, 2, 3, 4, 5);
        assert_eq!(hand.total(), 15);
    }

    #[test]
    fn test_resource_hand_can_afford() {
        let hand = ResourceHand::with_amounts(2, 2, 2, 2, 2);
        assert!(hand.can_afford(&ResourceHand::with_amounts(1, 1, 1, 1, 1)));
        assert!(!hand.can_afford(&ResourceHand::with_amounts(3, 0, 0, 0, 0)));
    }

    #[test]
    fn test_try_subtract_is_atomic() {
        let mut hand = ResourceHand::with_amounts(1, 0, 5, 0, 0);
        assert!(!hand.try_subtract(&costs::road()));
        assert_eq!(hand, ResourceHand::with_amounts(1, 0, 5, 0, 0));
    }

    #[test]
    fn test_building_costs() {
        assert_eq!(costs::road().total(), 2);
        assert_eq!(costs::settlement().total(), 4);
        assert_eq!(costs::city().total(), 5);
        assert_eq!(costs::development_card().total(), 3);
    }

    #[test]
    fn test_dev_card_deck_size() {
        let deck = DevelopmentCard::standard_deck();
        assert_eq!(deck.len(), 25);
        let knights = deck
            .iter()
            .filter(|c| matches!(c, DevelopmentCard::Knight))
            .count();
        assert_eq!(knights, 14);
    }

    #[test]
    fn test_build_only_when_affordable() {
        let mut player = Player::new(0, "Test".to_string());
        assert!(!player.build_road());
        assert!(player.resources.is_empty());

        player.resources = ResourceHand::with_amounts(5, 5, 5, 5, 5);
        assert!(player.build_road());
        assert_eq!(player.resources.wood, 4);
        assert_eq!(player.resources.brick, 4);

        assert!(player.build_city());
        assert_eq!(player.resources.ore, 2);
        assert_eq!(player.resources.wheat, 3);
    }

    #[test]
    fn test_buy_dev_card() {
        let mut player = Player::new(0, "Test".to_string());
        assert!(!player.buy_development_card(DevelopmentCard::Knight));
        assert!(player.dev_cards.is_empty());

        player.resources = ResourceHand::with_amounts(0, 0, 1, 1, 1);
        assert!(player.buy_development_card(DevelopmentCard::Knight));
        assert!(player.has_dev_card(DevelopmentCard::Knight));
        assert!(player.resources.is_empty());
    }

    #[test]
    fn test_play_dev_card_removes_one_instance() {
        let mut player = Player::new(0, "Test".to_string());
        player.dev_cards = vec![
            DevelopmentCard::Knight,
            DevelopmentCard::Monopoly,
            DevelopmentCard::Knight,
        ];

        assert!(player.play_dev_card(DevelopmentCard::Knight));
        assert_eq!(player.dev_card_count(DevelopmentCard::Knight), 1);
        assert_eq!(player.played_cards, vec![DevelopmentCard::Knight]);

        assert!(!player.play_dev_card(DevelopmentCard::YearOfPlenty));
        assert_eq!(player.dev_cards.len(), 2);
        assert_eq!(player.played_cards.len(), 1);
    }

    #[test]
    fn test_victory_points() {
        let mut board = uniform_board();
        let mut player = Player::new(1, "Test".to_string());
        assert_eq!(player.victory_points(&board), 0);

        let home = CrossCoord::new(2, 4);
        board.place_settlement(home, 1);
        assert_eq!(player.victory_points(&board), 1);

        board.upgrade_to_city(home, 1);
        assert_eq!(player.victory_points(&board), 2);

        player.dev_cards.push(DevelopmentCard::VictoryPoint);
        assert_eq!(player.victory_points(&board), 3);
        assert_eq!(player.visible_victory_points(&board), 2);

        player.played_cards.push(DevelopmentCard::VictoryPoint);
        assert_eq!(player.victory_points(&board), 4);
        assert_eq!(player.visible_victory_points(&board), 3);
    }

    #[test]
    fn test_steal_random() {
        let mut hand = ResourceHand::with_amounts(0, 0, 0, 1, 0);
        let mut rng = ScriptedRandom::new(Vec::new());
        assert_eq!(hand.steal_random(&mut rng), Some(Resource::Wheat));
        assert!(hand.is_empty());
        assert_eq!(hand.steal_random(&mut rng), None);
    }

    #[test]
    fn test_steal_random_takes_one_held_unit() {
        for seed in 0..20 {
            let mut hand = ResourceHand::with_amounts(1, 2, 1, 0, 0);
            let stolen = hand
                .steal_random(&mut SeededRandom::new(seed))
                .unwrap();
            assert_ne!(stolen, Resource::Wheat);
            assert_ne!(stolen, Resource::Sheep);
            assert_eq!(hand.total(), 3);
            hand.add(stolen, 1);
            assert_eq!(hand, ResourceHand::with_amounts(1, 2, 1, 0, 0));
        }
    }

    #[test]
    fn test_shuffled_deck_keeps_cards() {
        let mut deck = DevelopmentCard::shuffled_deck(&mut SeededRandom::new(3));
        let mut standard = DevelopmentCard::standard_deck();
        let key = |card: &DevelopmentCard| card.name();
        deck.sort_by_key(key);
        standard.sort_by_key(key);
        assert_eq!(deck, standard);
    }
}
