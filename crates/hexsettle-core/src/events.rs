//! Events recorded in the in-game action log.

use crate::board::{PlayerId, Resource};
use crate::coords::{CrossCoord, PathCoord, TileCoord};
use crate::player::{DevelopmentCard, ResourceHand};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of entries kept by the action log
pub const DEFAULT_LOG_CAPACITY: usize = 15;

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Dice were rolled
    DiceRolled {
        player: PlayerId,
        roll: (u8, u8),
        total: u8,
    },

    /// A player received resources from a roll
    ResourcesProduced {
        player: PlayerId,
        resources: ResourceHand,
    },

    /// A settlement was built
    SettlementBuilt {
        player: PlayerId,
        location: CrossCoord,
    },

    /// A settlement was upgraded to a city
    CityBuilt {
        player: PlayerId,
        location: CrossCoord,
    },

    /// A road was built
    RoadBuilt {
        player: PlayerId,
        location: PathCoord,
    },

    /// A free road was lost because no legal spot exists
    RoadForfeited { player: PlayerId },

    /// A development card was purchased
    DevelopmentCardPurchased { player: PlayerId },

    /// A development card was played
    DevelopmentCardPlayed {
        player: PlayerId,
        card: DevelopmentCard,
    },

    /// Year of plenty resources were taken
    YearOfPlentyTaken {
        player: PlayerId,
        resources: (Resource, Resource),
    },

    /// Monopoly collected a resource from everyone else
    MonopolyCollected {
        player: PlayerId,
        resource: Resource,
        total_taken: u32,
    },

    /// The robber was moved
    RobberMoved {
        player: PlayerId,
        from: TileCoord,
        to: TileCoord,
    },

    /// A resource was stolen (which one stays hidden)
    ResourceStolen { thief: PlayerId, victim: PlayerId },

    /// A 4:1 trade with the bank
    BankTrade {
        player: PlayerId,
        gave: Resource,
        gave_count: u32,
        received: Resource,
    },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// A player won the game
    GameWon {
        player: PlayerId,
        victory_points: u32,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::DiceRolled { player, roll, total } => write!(
                f,
                "Player {} rolled {} + {} = {}",
                player, roll.0, roll.1, total
            ),
            GameEvent::ResourcesProduced { player, resources } => {
                write!(f, "Player {} received {}", player, resources)
            }
            GameEvent::SettlementBuilt { player, location } => {
                write!(f, "Player {} built a settlement at {}", player, location)
            }
            GameEvent::CityBuilt { player, location } => {
                write!(f, "Player {} built a city at {}", player, location)
            }
            GameEvent::RoadBuilt { player, location } => {
                write!(f, "Player {} built a road at {}", player, location)
            }
            GameEvent::RoadForfeited { player } => {
                write!(f, "Player {} had nowhere to build a free road", player)
            }
            GameEvent::DevelopmentCardPurchased { player } => {
                write!(f, "Player {} bought a development card", player)
            }
            GameEvent::DevelopmentCardPlayed { player, card } => {
                write!(f, "Player {} played {}", player, card)
            }
            GameEvent::YearOfPlentyTaken { player, resources } => write!(
                f,
                "Player {} took {} and {} from the bank",
                player, resources.0, resources.1
            ),
            GameEvent::MonopolyCollected {
                player,
                resource,
                total_taken,
            } => write!(
                f,
                "Player {} collected {} {} with a monopoly",
                player, total_taken, resource
            ),
            GameEvent::RobberMoved { player, from, to } => {
                write!(f, "Player {} moved the robber from {} to {}", player, from, to)
            }
            GameEvent::ResourceStolen { thief, victim } => {
                write!(f, "Player {} stole a card from player {}", thief, victim)
            }
            GameEvent::BankTrade {
                player,
                gave,
                gave_count,
                received,
            } => write!(
                f,
                "Player {} traded {} {} for 1 {} with the bank",
                player, gave_count, gave, received
            ),
            GameEvent::TurnEnded {
                player,
                next_player,
            } => write!(
                f,
                "Player {} ended their turn, player {} is next",
                player, next_player
            ),
            GameEvent::GameWon {
                player,
                victory_points,
            } => write!(
                f,
                "Player {} won with {} victory points",
                player, victory_points
            ),
        }
    }
}

/// Bounded log of the most recent events; the oldest entry is evicted first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    entries: VecDeque<GameEvent>,
    capacity: usize,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl ActionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Drop the newest entry if it is `event`, for actions taken back
    pub fn retract(&mut self, event: &GameEvent) -> bool {
        if self.entries.back() != Some(event) {
            return false;
        }
        self.entries.pop_back();
        true
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&GameEvent> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Human-readable lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(player: PlayerId) -> GameEvent {
        GameEvent::TurnEnded {
            player,
            next_player: player + 1,
        }
    }

    #[test]
    fn test_log_evicts_oldest() {
        let mut log = ActionLog::default();
        for i in 0..20 {
            log.push(turn(i));
        }
        assert_eq!(log.len(), DEFAULT_LOG_CAPACITY);
        assert_eq!(log.iter().next(), Some(&turn(5)));
        assert_eq!(log.latest(), Some(&turn(19)));
    }

    #[test]
    fn test_retract_only_removes_newest_match() {
        let mut log = ActionLog::default();
        log.push(turn(0));
        log.push(turn(1));
        assert!(!log.retract(&turn(0)));
        assert!(log.retract(&turn(1)));
        assert_eq!(log.latest(), Some(&turn(0)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_zero_capacity_log_stays_empty() {
        let mut log = ActionLog::with_capacity(0);
        log.push(turn(0));
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_display() {
        let event = GameEvent::DiceRolled {
            player: 2,
            roll: (3, 4),
            total: 7,
        };
        assert_eq!(event.to_string(), "Player 2 rolled 3 + 4 = 7");

        let trade = GameEvent::BankTrade {
            player: 0,
            gave: Resource::Brick,
            gave_count: 4,
            received: Resource::Ore,
        };
        assert_eq!(trade.to_string(), "Player 0 traded 4 Brick for 1 Ore with the bank");
    }

    #[test]
    fn test_log_serde_round_trip() {
        let mut log = ActionLog::with_capacity(3);
        log.push(turn(0));
        log.push(GameEvent::ResourceStolen { thief: 1, victim: 0 });
        let json = serde_json::to_string(&log).unwrap();
        let back: ActionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
