//! Input scripts for headless replays.
//!
//! A script is a JSON array of input names, e.g.
//! `["down", "confirm", "left", "cancel"]`.

use hexsettle_core::{Direction, Game};
use serde::Deserialize;
use thiserror::Error;

/// One input event fed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
}

impl Input {
    /// Feed this input into a running match
    pub fn apply(self, game: &mut Game) {
        match self {
            Input::Up => game.move_cursor(Direction::Up),
            Input::Down => game.move_cursor(Direction::Down),
            Input::Left => game.move_cursor(Direction::Left),
            Input::Right => game.move_cursor(Direction::Right),
            Input::Confirm => game.confirm(),
            Input::Cancel => game.cancel(),
        }
    }
}

/// Parse a script document
pub fn parse(json: &str) -> Result<Vec<Input>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a script file
pub fn load(path: &str) -> Result<Vec<Input>, ScriptError> {
    let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_string(),
        source,
    })?;
    parse(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexsettle_core::{GameConfig, SeededRandom};

    #[test]
    fn test_parse_script() {
        let inputs = parse(r#"["up", "confirm", "cancel", "right"]"#).unwrap();
        assert_eq!(
            inputs,
            vec![Input::Up, Input::Confirm, Input::Cancel, Input::Right]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(matches!(parse(r#"["jump"]"#), Err(ScriptError::Json(_))));
    }

    #[test]
    fn test_apply_places_first_settlement() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut game = Game::new(names, GameConfig::default(), Box::new(SeededRandom::new(5)));
        // The starting crossing is empty, so confirming places a settlement
        for input in parse(r#"["confirm"]"#).unwrap() {
            input.apply(&mut game);
        }
        assert_eq!(game.phase().name(), "InitialRoad");
    }
}
