//! Game configuration
//!
//! Defaults come from [`crate::consts`]. A JSON file may override any subset
//! of fields; missing fields keep their defaults.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound on rows x columns
pub const MAX_BRICKS: u32 = 10_000;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Everything a round needs to be set up and simulated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub title: String,
    /// Target frame rate (pacing only)
    pub fps: u32,

    // === Paddle ===
    pub paddle_size: Vec2,
    pub paddle_start: Vec2,
    /// Horizontal distance moved per tick while a direction is held
    pub paddle_step: f32,
    /// Paddle only moves while its center is inside this many pixels from the bottom
    pub input_band_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start: Vec2,
    pub ball_start_vel: Vec2,

    // === Bricks ===
    pub brick_size: Vec2,
    /// Gap before the first column and between columns
    pub brick_horizontal_padding: f32,
    /// Gap before the first row and between rows
    pub brick_vertical_padding: f32,
    pub brick_rows: u32,
    pub brick_columns: u32,

    // === Palette ===
    pub background_color: Rgb,
    pub paddle_color: Rgb,
    pub brick_color: Rgb,
    pub accent_color: Rgb,
    pub text_color: Rgb,

    // === Text ===
    pub font_size_score: u16,
    pub font_size_start: u16,
    pub font_size_instructions: u16,
    pub font_size_gameover_title: u16,
    pub font_size_gameover_restart: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            title: TITLE.to_string(),
            fps: FPS,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_start: Vec2::new(PADDLE_START_X, PADDLE_START_Y),
            paddle_step: PADDLE_STEP,
            input_band_height: INPUT_BAND_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_start_vel: Vec2::new(BALL_START_VEL_X, BALL_START_VEL_Y),

            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            brick_horizontal_padding: BRICK_HORIZONTAL_PADDING,
            brick_vertical_padding: BRICK_VERTICAL_PADDING,
            brick_rows: BRICK_ROWS,
            brick_columns: BRICK_COLUMNS,

            background_color: BLACK,
            paddle_color: WHITE,
            brick_color: BLUE,
            accent_color: RED,
            text_color: WHITE,

            font_size_score: FONT_SIZE_SCORE,
            font_size_start: FONT_SIZE_START,
            font_size_instructions: FONT_SIZE_INSTRUCTIONS,
            font_size_gameover_title: FONT_SIZE_GAMEOVER_TITLE,
            font_size_gameover_restart: FONT_SIZE_GAMEOVER_RESTART,
        }
    }
}

/// Why a configuration was rejected
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigError::Parse(e) => write!(f, "malformed config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Half the paddle width
    #[inline]
    pub fn paddle_half_width(&self) -> f32 {
        self.paddle_size.x / 2.0
    }

    /// Top-left corner of the brick at (col, row)
    pub fn brick_origin(&self, col: u32, row: u32) -> Vec2 {
        Vec2::new(
            self.brick_horizontal_padding
                + col as f32 * (self.brick_size.x + self.brick_horizontal_padding),
            self.brick_vertical_padding
                + row as f32 * (self.brick_size.y + self.brick_vertical_padding),
        )
    }

    /// Reject geometry that would break the round invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid("screen dimensions must be positive");
        }
        if self.fps == 0 {
            return invalid("fps must be non-zero");
        }
        if self.paddle_size.cmple(Vec2::ZERO).any() || self.brick_size.cmple(Vec2::ZERO).any() {
            return invalid("paddle and brick sizes must be positive");
        }
        if self.paddle_size.x > self.screen_width {
            return invalid("paddle is wider than the screen");
        }
        if self.ball_radius <= 0.0 {
            return invalid("ball radius must be positive");
        }
        if self.ball_start_vel.x == 0.0 || self.ball_start_vel.y == 0.0 {
            return invalid("both ball velocity components must be non-zero");
        }
        if self.brick_horizontal_padding < 0.0 || self.brick_vertical_padding < 0.0 {
            return invalid("brick padding must not be negative");
        }
        if self.brick_rows == 0 || self.brick_columns == 0 {
            return invalid("brick grid must have at least one row and one column");
        }
        match self.brick_rows.checked_mul(self.brick_columns) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "brick grid {}x{} exceeds the limit of {} bricks",
                    self.brick_columns, self.brick_rows, MAX_BRICKS
                )));
            }
        }

        let last = self.brick_origin(self.brick_columns - 1, self.brick_rows - 1) + self.brick_size;
        if last.x > self.screen_width || last.y > self.screen_height {
            return Err(ConfigError::Invalid(format!(
                "brick grid ({}x{}) extends to ({}, {}), outside the {}x{} screen",
                self.brick_columns,
                self.brick_rows,
                last.x,
                last.y,
                self.screen_width,
                self.screen_height
            )));
        }

        let half = self.paddle_half_width();
        if self.paddle_start.x < half || self.paddle_start.x > self.screen_width - half {
            return invalid("paddle start is outside its travel band");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brick_rows * config.brick_columns, 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "fps": 60, "brick_rows": 3 }"#).unwrap();
        assert_eq!(config.fps, 60);
        assert_eq!(config.brick_rows, 3);
        assert_eq!(config.paddle_step, PADDLE_STEP);
        assert_eq!(config.title, TITLE);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ fps: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_offscreen_grid_rejected() {
        // Eight columns at the default pitch run past the right edge
        let err = GameConfig::from_json(r#"{ "brick_columns": 8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        // A huge screen lets any grid fit, so the count limit has to catch it
        let json = r#"{
            "screen_width": 1e12,
            "screen_height": 1e12,
            "brick_rows": 70000,
            "brick_columns": 70000
        }"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("limit"));

        let config = GameConfig {
            screen_width: 1e12,
            screen_height: 1e12,
            brick_rows: 100,
            brick_columns: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = GameConfig {
            brick_columns: 100,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_velocity_component_rejected() {
        let config = GameConfig {
            ball_start_vel: Vec2::new(8.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let config = GameConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load(Path::new("/nonexistent/breakout.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_brick_origin_grid_pitch() {
        let config = GameConfig::default();
        assert_eq!(config.brick_origin(0, 0), Vec2::new(50.0, 20.0));
        assert_eq!(config.brick_origin(1, 2), Vec2::new(200.0, 120.0));
    }
}
