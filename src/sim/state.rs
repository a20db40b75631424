//! Round state and entity types
//!
//! Everything that changes during a round lives here; fixed parameters come
//! from [`GameConfig`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Aabb, GameConfig, Rgb};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every brick destroyed
    Cleared,
    /// Ball fell off the bottom of the screen
    BallLost,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit,
    BrickDestroyed { id: u32 },
    RoundOver { phase: GamePhase, score: u32 },
}

/// Horizontal movement input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub left: bool,
    pub right: bool,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.paddle_start,
            size: config.paddle_size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Move one step per held direction, staying inside the travel band
    pub fn update(&mut self, input: PaddleInput, config: &GameConfig) {
        let half = self.size.x / 2.0;
        let max_x = config.screen_width - half;
        let in_band = self.pos.y > config.screen_height - config.input_band_height;
        if !in_band {
            return;
        }

        if input.right && self.pos.x <= max_x {
            self.pos.x = (self.pos.x + config.paddle_step).min(max_x);
        }
        if input.left && self.pos.x >= half {
            self.pos.x = (self.pos.x - config.paddle_step).max(half);
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.ball_start,
            vel: config.ball_start_vel,
            radius: config.ball_radius,
        }
    }

    /// Bounding square used for overlap tests
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Translate by one tick of velocity, then bounce off the side and top walls
    pub fn update(&mut self, screen_width: f32) {
        self.pos += self.vel;

        if self.pos.x <= self.radius || self.pos.x > screen_width - self.radius {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= self.radius {
            self.vel.y = -self.vel.y;
        }
    }
}

/// A brick in the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub bounds: Aabb,
    pub alive: bool,
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Bricks destroyed this round
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Sorted by id, alive or not
    pub bricks: Vec<Brick>,
    /// Paint color picked for this round's ball
    pub ball_color: Rgb,
    /// Events from the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh round: starting paddle and ball, full brick grid, zero score
    pub fn new(config: &GameConfig, ball_color: Rgb) -> Self {
        let mut bricks =
            Vec::with_capacity(config.brick_rows as usize * config.brick_columns as usize);
        for col in 0..config.brick_columns {
            for row in 0..config.brick_rows {
                bricks.push(Brick {
                    id: bricks.len() as u32,
                    bounds: Aabb::from_top_left(config.brick_origin(col, row), config.brick_size),
                    alive: true,
                });
            }
        }

        Self {
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            paddle: Paddle::new(config),
            ball: Ball::new(config),
            bricks,
            ball_color,
            events: Vec::new(),
        }
    }

    /// Start a round with a random ball color
    pub fn with_rng<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let color = Rgb(
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(0..255),
        );
        Self::new(config, color)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn alive_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive_bricks().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_round_layout() {
        let config = GameConfig::default();
        let state = GameState::new(&config, Rgb(1, 2, 3));

        assert_eq!(state.score, 0);
        assert!(state.is_playing());
        assert_eq!(state.alive_count(), 30);
        assert_eq!(state.paddle.pos, Vec2::new(400.0, 560.0));
        assert_eq!(state.ball.pos, Vec2::new(300.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(8.0, 12.0));
        assert_eq!(state.paddle.bounds().top(), 550.0);
    }

    #[test]
    fn test_brick_grid_has_no_overlaps() {
        let config = GameConfig::default();
        let state = GameState::new(&config, Rgb(0, 0, 0));
        for (i, a) in state.bricks.iter().enumerate() {
            for b in &state.bricks[i + 1..] {
                assert!(!a.bounds.intersects(&b.bounds), "bricks {} and {} overlap", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_ball_color_is_seeded() {
        let config = GameConfig::default();
        let a = GameState::with_rng(&config, &mut Pcg32::seed_from_u64(7));
        let b = GameState::with_rng(&config, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a.ball_color, b.ball_color);
    }

    #[test]
    fn test_paddle_ignores_input_outside_band() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.pos.y = 300.0;
        paddle.update(PaddleInput { left: false, right: true }, &config);
        assert_eq!(paddle.pos.x, config.paddle_start.x);
    }

    #[test]
    fn test_paddle_left_right_cancel() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.update(PaddleInput { left: true, right: true }, &config);
        assert_eq!(paddle.pos.x, config.paddle_start.x);
    }

    #[test]
    fn test_ball_bounces_off_top() {
        let config = GameConfig::default();
        let mut ball = Ball::new(&config);
        ball.pos = Vec2::new(400.0, 15.0);
        ball.vel = Vec2::new(8.0, -12.0);
        ball.update(config.screen_width);
        assert_eq!(ball.pos, Vec2::new(408.0, 3.0));
        assert_eq!(ball.vel, Vec2::new(8.0, 12.0));
    }
}
