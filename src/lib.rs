//! Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, collisions, scoring)
//! - `game`: Screen state machine driving rounds
//! - `renderer`: Scene drawing on top of a frontend
//! - `platform`: Rendering/input frontends (terminal, headless)
//! - `config`: Game configuration with JSON overrides

pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig, Rgb};
pub use game::{Game, Screen};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use crate::Rgb;

    /// Logical screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const TITLE: &str = "Breakout";
    /// Frame rate; pacing only, physics is per-frame
    pub const FPS: u32 = 30;

    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    pub const FONT_SIZE_SCORE: u16 = 36;
    pub const FONT_SIZE_START: u16 = 36;
    pub const FONT_SIZE_INSTRUCTIONS: u16 = 24;
    pub const FONT_SIZE_GAMEOVER_TITLE: u16 = 48;
    pub const FONT_SIZE_GAMEOVER_RESTART: u16 = 26;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 90.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PADDLE_START_Y: f32 = SCREEN_HEIGHT - 40.0;
    pub const PADDLE_STEP: f32 = 30.0;
    /// Height of the bottom band in which the paddle accepts input
    pub const INPUT_BAND_HEIGHT: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = SCREEN_HEIGHT / 2.0;
    pub const BALL_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    pub const BALL_START_VEL_X: f32 = 8.0;
    pub const BALL_START_VEL_Y: f32 = 12.0;

    /// Brick grid defaults
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_HORIZONTAL_PADDING: f32 = 50.0;
    pub const BRICK_VERTICAL_PADDING: f32 = 20.0;
    pub const BRICK_ROWS: u32 = 6;
    /// Five columns at this pitch is the widest grid that fits on screen
    pub const BRICK_COLUMNS: u32 = 5;
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// True if the interiors intersect; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
