//! Hexsettle - rules engine for a hex settlement and trading board game
//!
//! This crate provides the core game logic, including:
//! - Coordinate system for crossings, tiles and paths
//! - Board representation with tiles, buildings, roads and the robber
//! - Player state and resource management
//! - Phase state machine driven by cursor, confirm and cancel inputs
//! - Trade offers and the 4:1 bank trade
//!
//! # Architecture
//!
//! The engine is platform-agnostic and has no I/O of its own. A frontend
//! feeds it [`Direction`] moves plus confirm/cancel, then renders the board,
//! the players and the active phase's help text, menu and cursor.
//! It can be compiled to native Rust or, with the `wasm` feature, to
//! WebAssembly.
//!
//! # Modules
//!
//! - [`coords`]: Crossing, tile and path coordinates
//! - [`board`]: Tiles, buildings, roads, robber and resource generation
//! - [`player`]: Resource hands, costs, development cards, victory points
//! - [`trade`]: Trade offers between players or with the bank
//! - [`phase`]: The phase state machine
//! - [`game`]: The match aggregate and snapshots

pub mod board;
pub mod config;
pub mod coords;
pub mod events;
pub mod game;
pub mod phase;
pub mod player;
pub mod random;
pub mod trade;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardSnapshot, PlayerId, Resource, Terrain, Tile};
pub use config::{ConfigError, GameConfig};
pub use coords::{CrossCoord, Direction, PathCoord, TileCoord};
pub use events::{ActionLog, GameEvent};
pub use game::{Game, GameSnapshot, GameState, SnapshotError};
pub use phase::{BoardCursor, Menu, Phase};
pub use player::{DevelopmentCard, Player, PlayerColor, ResourceHand};
pub use random::{Randomness, ScriptedRandom, SeededRandom};
pub use trade::{CanTake, Counterparty, TradeOffer, TradeSide, TradeStatus};
