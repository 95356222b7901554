//! WebAssembly bindings for the Hexsettle engine.
//!
//! This module exposes the input events and read accessors to JavaScript
//! through wasm-bindgen. Structured values cross the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::coords::Direction;
use crate::game::{Game, GameSnapshot};
use crate::random::SeededRandom;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a match; `config_json` may be empty for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(player_names_json: &str, config_json: &str) -> Result<WasmGame, JsValue> {
        let names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;
        if !(3..=4).contains(&names.len()) {
            return Err(JsValue::from_str("A match needs 3 or 4 players"));
        }

        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let rng = SeededRandom::from_optional_seed(config.seed);

        Ok(WasmGame {
            game: Game::new(names, config, Box::new(rng)),
        })
    }

    /// Restore a match (and its config) from snapshot JSON
    #[wasm_bindgen(js_name = fromSnapshot)]
    pub fn from_snapshot(snapshot_json: &str) -> Result<WasmGame, JsValue> {
        let snapshot = GameSnapshot::from_json(snapshot_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let rng = SeededRandom::from_optional_seed(snapshot.config.seed);
        let game = Game::restore(snapshot, Box::new(rng))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { game })
    }

    /// Move the cursor: "up", "down", "left" or "right"
    #[wasm_bindgen(js_name = moveCursor)]
    pub fn move_cursor(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction = match direction {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            other => return Err(JsValue::from_str(&format!("Unknown direction: {}", other))),
        };
        self.game.move_cursor(direction);
        Ok(())
    }

    pub fn confirm(&mut self) {
        self.game.confirm();
    }

    pub fn cancel(&mut self) {
        self.game.cancel();
    }

    /// Help text of the active phase
    #[wasm_bindgen(js_name = helpText)]
    pub fn help_text(&self) -> String {
        self.game.help_text()
    }

    /// Name of the active phase
    #[wasm_bindgen(js_name = phaseName)]
    pub fn phase_name(&self) -> String {
        self.game.phase().name().to_string()
    }

    /// Active menu as JSON, or "null"
    pub fn menu(&self) -> String {
        serde_json::to_string(&self.game.menu()).unwrap_or_else(|_| "null".to_string())
    }

    /// Board cursor as JSON, or "null"
    #[wasm_bindgen(js_name = boardCursor)]
    pub fn board_cursor(&self) -> String {
        serde_json::to_string(&self.game.board_cursor()).unwrap_or_else(|_| "null".to_string())
    }

    /// Full state snapshot as JSON (board, players, dice, deck, log)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.game
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Recent action log lines, oldest first, as a JSON array
    pub fn log(&self) -> String {
        serde_json::to_string(&self.game.state().log.lines()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the current player ID
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.game.state().current_player
    }

    /// Get visible victory points for a player
    #[wasm_bindgen(js_name = getVisibleVictoryPoints)]
    pub fn get_visible_victory_points(&self, player: u8) -> u32 {
        self.game.state().visible_victory_points(player)
    }

    /// Get the winner (if the match is over)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.game.winner()
    }
}
