//! Game board representation: tiles, buildings, roads and the robber.
//!
//! This module contains:
//! - Resource and terrain types
//! - The board grid with settlement, city and road ownership
//! - Placement-legality queries (distance rule, road connectivity)
//! - Resource generation for a dice roll
//! - A JSON-friendly snapshot of the board

use crate::coords::{CrossCoord, PathCoord, TileCoord};
use crate::game::SnapshotError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Player identifier (seat index, 0-3)
pub type PlayerId = u8;

/// The five resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Brick,
    Ore,
    Wheat,
    Sheep,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Ore,
        Resource::Wheat,
        Resource::Sheep,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Wood => "Wood",
            Resource::Brick => "Brick",
            Resource::Ore => "Ore",
            Resource::Wheat => "Wheat",
            Resource::Sheep => "Sheep",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terrain of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Wood,
    Brick,
    Ore,
    Wheat,
    Sheep,
    /// Produces nothing; the robber starts here
    Desert,
}

impl Terrain {
    /// The resource this terrain produces (`None` for the desert)
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Wood => Some(Resource::Wood),
            Terrain::Brick => Some(Resource::Brick),
            Terrain::Ore => Some(Resource::Ore),
            Terrain::Wheat => Some(Resource::Wheat),
            Terrain::Sheep => Some(Resource::Sheep),
            Terrain::Desert => None,
        }
    }
}

/// A single tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// What the tile produces
    pub terrain: Terrain,
    /// Dice sum that triggers production (2-12), 0 for the desert
    pub dice_number: u8,
}

impl Tile {
    /// Create a producing tile
    pub fn new(terrain: Terrain, dice_number: u8) -> Self {
        Self {
            terrain,
            dice_number,
        }
    }

    /// Create a desert tile
    pub fn desert() -> Self {
        Self {
            terrain: Terrain::Desert,
            dice_number: 0,
        }
    }

    /// The resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        self.terrain.resource()
    }

    fn is_well_formed(&self) -> bool {
        match self.terrain {
            Terrain::Desert => self.dice_number == 0,
            _ => (2..=12).contains(&self.dice_number) && self.dice_number != 7,
        }
    }
}

/// The complete game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// All tiles indexed by coordinate
    tiles: HashMap<TileCoord, Tile>,
    /// Road owners by path
    roads: HashMap<PathCoord, PlayerId>,
    /// Settlement owners by crossing
    settlements: HashMap<CrossCoord, PlayerId>,
    /// City upgrades; every key is also a settlement of the same owner
    cities: HashMap<CrossCoord, PlayerId>,
    /// Tile currently blocked by the robber
    robber: TileCoord,
}

impl Board {
    /// Create a board from tiles listed in [`TileCoord::all`] order.
    ///
    /// The robber starts on the first desert (or the first tile if there is none).
    ///
    /// # Panics
    ///
    /// Panics unless exactly one tile is given for every board position.
    pub fn with_tiles(tiles: Vec<Tile>) -> Self {
        let coords: Vec<TileCoord> = TileCoord::all().collect();
        assert_eq!(
            tiles.len(),
            coords.len(),
            "a board needs exactly {} tiles",
            coords.len()
        );

        let robber = coords
            .iter()
            .zip(&tiles)
            .find(|(_, tile)| tile.terrain == Terrain::Desert)
            .map(|(coord, _)| *coord)
            .unwrap_or(coords[0]);

        Self {
            tiles: coords.into_iter().zip(tiles).collect(),
            roads: HashMap::new(),
            settlements: HashMap::new(),
            cities: HashMap::new(),
            robber,
        }
    }

    /// Create the standard board with shuffled terrain and dice numbers
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // 4 Wood, 4 Wheat, 4 Sheep, 3 Ore, 3 Brick, 1 Desert
        let mut terrains: Vec<Terrain> = [
            (Terrain::Wood, 4),
            (Terrain::Wheat, 4),
            (Terrain::Sheep, 4),
            (Terrain::Ore, 3),
            (Terrain::Brick, 3),
            (Terrain::Desert, 1),
        ]
        .into_iter()
        .flat_map(|(terrain, count)| std::iter::repeat(terrain).take(count))
        .collect();
        terrains.shuffle(rng);

        let coords: Vec<TileCoord> = TileCoord::all().collect();
        let numbers = Self::assign_numbers_avoiding_adjacent_68(&coords, &terrains, rng);

        let mut numbers = numbers.into_iter();
        let tiles = terrains
            .into_iter()
            .map(|terrain| match terrain {
                Terrain::Desert => Tile::desert(),
                _ => Tile::new(terrain, numbers.next().unwrap_or_default()),
            })
            .collect();

        Self::with_tiles(tiles)
    }

    /// Shuffle the dice numbers until no 6 or 8 sits next to another 6 or 8
    fn assign_numbers_avoiding_adjacent_68<R: Rng + ?Sized>(
        coords: &[TileCoord],
        terrains: &[Terrain],
        rng: &mut R,
    ) -> Vec<u8> {
        const MAX_ATTEMPTS: usize = 100;
        const NUMBERS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

        let mut numbers = NUMBERS.to_vec();
        for _ in 0..MAX_ATTEMPTS {
            numbers.shuffle(rng);
            if Self::is_valid_number_placement(coords, terrains, &numbers) {
                break;
            }
        }
        numbers
    }

    fn is_valid_number_placement(coords: &[TileCoord], terrains: &[Terrain], numbers: &[u8]) -> bool {
        let mut numbers = numbers.iter();
        let coord_to_number: HashMap<TileCoord, u8> = coords
            .iter()
            .zip(terrains)
            .filter(|(_, terrain)| **terrain != Terrain::Desert)
            .filter_map(|(coord, _)| numbers.next().map(|n| (*coord, *n)))
            .collect();

        let is_hot = |n: u8| n == 6 || n == 8;
        coord_to_number.iter().all(|(coord, &number)| {
            !is_hot(number)
                || coord
                    .neighbors()
                    .iter()
                    .filter_map(|n| coord_to_number.get(n))
                    .all(|&other| !is_hot(other))
        })
    }

    // ==================== Query Methods ====================

    /// Get a tile by coordinate
    pub fn tile(&self, coord: &TileCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// All tiles
    pub fn tiles(&self) -> impl Iterator<Item = (&TileCoord, &Tile)> {
        self.tiles.iter()
    }

    /// All roads with their owners
    pub fn roads(&self) -> impl Iterator<Item = (&PathCoord, &PlayerId)> {
        self.roads.iter()
    }

    /// All settlements (including upgraded ones) with their owners
    pub fn settlements(&self) -> impl Iterator<Item = (&CrossCoord, &PlayerId)> {
        self.settlements.iter()
    }

    /// All city upgrades with their owners
    pub fn cities(&self) -> impl Iterator<Item = (&CrossCoord, &PlayerId)> {
        self.cities.iter()
    }

    /// The robber's current tile
    pub fn robber(&self) -> TileCoord {
        self.robber
    }

    pub fn road_owner(&self, path: &PathCoord) -> Option<PlayerId> {
        self.roads.get(path).copied()
    }

    pub fn settlement_owner(&self, cross: &CrossCoord) -> Option<PlayerId> {
        self.settlements.get(cross).copied()
    }

    pub fn city_owner(&self, cross: &CrossCoord) -> Option<PlayerId> {
        self.cities.get(cross).copied()
    }

    /// Whether the player has a settlement (or city) on this crossing
    pub fn has_building_of(&self, cross: &CrossCoord, player: PlayerId) -> bool {
        self.settlement_owner(cross) == Some(player)
    }

    pub fn count_settlements(&self, player: PlayerId) -> u32 {
        self.settlements.values().filter(|&&p| p == player).count() as u32
    }

    pub fn count_cities(&self, player: PlayerId) -> u32 {
        self.cities.values().filter(|&&p| p == player).count() as u32
    }

    pub fn count_roads(&self, player: PlayerId) -> u32 {
        self.roads.values().filter(|&&p| p == player).count() as u32
    }

    // ==================== Validation Methods ====================

    /// Check the distance rule: the crossing and all its neighbours are free
    pub fn can_place_settlement(&self, cross: &CrossCoord) -> bool {
        cross.is_valid()
            && !self.settlements.contains_key(cross)
            && cross
                .neighbors()
                .iter()
                .all(|n| !self.settlements.contains_key(n))
    }

    /// Distance rule plus a connecting road of the player
    pub fn can_place_settlement_for_player(&self, cross: &CrossCoord, player: PlayerId) -> bool {
        self.can_place_settlement(cross) && self.has_road_connected(cross, player)
    }

    /// Whether any path ending at the crossing carries the player's road
    pub fn has_road_connected(&self, cross: &CrossCoord, player: PlayerId) -> bool {
        cross
            .paths()
            .iter()
            .any(|path| self.road_owner(path) == Some(player))
    }

    /// Whether the player's network reaches this crossing (building or road)
    pub fn is_connected_to_network(&self, cross: &CrossCoord, player: PlayerId) -> bool {
        self.has_building_of(cross, player) || self.has_road_connected(cross, player)
    }

    /// The path must be free and touch the player's network at either end
    pub fn can_place_road(&self, path: &PathCoord, player: PlayerId) -> bool {
        !self.roads.contains_key(path)
            && path
                .endpoints()
                .iter()
                .any(|end| self.is_connected_to_network(end, player))
    }

    /// Whether any path on the board is currently open to the player
    pub fn has_road_spot(&self, player: PlayerId) -> bool {
        PathCoord::all().any(|path| self.can_place_road(&path, player))
    }

    /// The player owns a settlement here that is not yet a city
    pub fn can_upgrade_to_city(&self, cross: &CrossCoord, player: PlayerId) -> bool {
        self.has_building_of(cross, player) && !self.cities.contains_key(cross)
    }

    // ==================== Mutation Methods ====================

    /// Place a settlement (assumes validation already done)
    pub fn place_settlement(&mut self, cross: CrossCoord, player: PlayerId) {
        self.settlements.insert(cross, player);
    }

    /// Remove a settlement that has not been upgraded
    pub fn remove_settlement(&mut self, cross: &CrossCoord) -> Option<PlayerId> {
        if self.cities.contains_key(cross) {
            return None;
        }
        self.settlements.remove(cross)
    }

    /// Upgrade the player's settlement to a city (assumes validation already done)
    pub fn upgrade_to_city(&mut self, cross: CrossCoord, player: PlayerId) {
        debug_assert_eq!(self.settlement_owner(&cross), Some(player));
        self.cities.insert(cross, player);
    }

    /// Place a road (assumes validation already done)
    pub fn place_road(&mut self, path: PathCoord, player: PlayerId) {
        self.roads.insert(path, player);
    }

    /// Move the robber and report every player with a settlement on that tile
    pub fn place_robber(&mut self, tile: TileCoord) -> HashSet<PlayerId> {
        self.robber = tile;
        self.players_adjacent_to_tile(&tile)
    }

    /// Owners of settlements (and cities) on the corners of a tile
    pub fn players_adjacent_to_tile(&self, tile: &TileCoord) -> HashSet<PlayerId> {
        tile.crossings()
            .iter()
            .filter_map(|cross| self.settlement_owner(cross))
            .collect()
    }

    // ==================== Resource Distribution ====================

    /// Resources produced by a dice sum.
    ///
    /// Every settlement yields one unit per matching tile, and every city one more.
    /// The robber's tile produces nothing. Order inside each list is unspecified.
    pub fn generate_resources(&self, dice_sum: u8) -> HashMap<PlayerId, Vec<Resource>> {
        let mut produced: HashMap<PlayerId, Vec<Resource>> = HashMap::new();

        for (cross, &owner) in self.settlements.iter().chain(self.cities.iter()) {
            for tile_coord in cross.adjacent_tiles() {
                if tile_coord == self.robber {
                    continue;
                }
                let Some(tile) = self.tiles.get(&tile_coord) else {
                    continue;
                };
                if tile.dice_number != dice_sum {
                    continue;
                }
                if let Some(resource) = tile.resource() {
                    produced.entry(owner).or_default().push(resource);
                }
            }
        }

        produced
    }

    // ==================== Snapshots ====================

    /// Convert to a JSON-friendly representation with sorted entry lists
    pub fn to_snapshot(&self) -> BoardSnapshot {
        let mut tiles: Vec<TileEntry> = self
            .tiles
            .iter()
            .map(|(coord, tile)| TileEntry {
                coord: *coord,
                tile: *tile,
            })
            .collect();
        tiles.sort_by_key(|e| e.coord);

        let mut roads: Vec<RoadEntry> = self
            .roads
            .iter()
            .map(|(path, owner)| RoadEntry {
                path: *path,
                owner: *owner,
            })
            .collect();
        roads.sort_by_key(|e| e.path);

        BoardSnapshot {
            tiles,
            roads,
            settlements: Self::building_entries(&self.settlements),
            cities: Self::building_entries(&self.cities),
            robber: self.robber,
        }
    }

    fn building_entries(map: &HashMap<CrossCoord, PlayerId>) -> Vec<BuildingEntry> {
        let mut entries: Vec<BuildingEntry> = map
            .iter()
            .map(|(cross, owner)| BuildingEntry {
                cross: *cross,
                owner: *owner,
            })
            .collect();
        entries.sort_by_key(|e| e.cross);
        entries
    }

    /// Rebuild a board from a snapshot, validating every coordinate and invariant
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, SnapshotError> {
        let mut tiles = HashMap::new();
        for entry in &snapshot.tiles {
            if !entry.coord.is_valid() || !entry.tile.is_well_formed() {
                return Err(SnapshotError::InvalidTile(entry.coord));
            }
            tiles.insert(entry.coord, entry.tile);
        }
        let expected = TileCoord::all().count();
        if tiles.len() != expected {
            return Err(SnapshotError::TileCount {
                expected,
                found: tiles.len(),
            });
        }

        let mut roads = HashMap::new();
        for entry in &snapshot.roads {
            let [a, b] = entry.path.endpoints();
            if PathCoord::between(a, b) != Some(entry.path) {
                return Err(SnapshotError::InvalidPath(entry.path));
            }
            roads.insert(entry.path, entry.owner);
        }

        let mut settlements = HashMap::new();
        for entry in &snapshot.settlements {
            if !entry.cross.is_valid() {
                return Err(SnapshotError::InvalidCrossing(entry.cross));
            }
            settlements.insert(entry.cross, entry.owner);
        }

        let mut cities = HashMap::new();
        for entry in &snapshot.cities {
            if settlements.get(&entry.cross) != Some(&entry.owner) {
                return Err(SnapshotError::CityWithoutSettlement(entry.cross));
            }
            cities.insert(entry.cross, entry.owner);
        }

        if !snapshot.robber.is_valid() {
            return Err(SnapshotError::InvalidTile(snapshot.robber));
        }

        Ok(Self {
            tiles,
            roads,
            settlements,
            cities,
            robber: snapshot.robber,
        })
    }
}

/// JSON-friendly board representation with sorted lists instead of HashMaps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tiles: Vec<TileEntry>,
    pub roads: Vec<RoadEntry>,
    pub settlements: Vec<BuildingEntry>,
    pub cities: Vec<BuildingEntry>,
    pub robber: TileCoord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    pub coord: TileCoord,
    pub tile: Tile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadEntry {
    pub path: PathCoord,
    pub owner: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingEntry {
    pub cross: CrossCoord,
    pub owner: PlayerId,
}
