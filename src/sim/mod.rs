//! Per-frame simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Per-tick integration only, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (bricks by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_rect_collision, resolve_bricks, resolve_paddle};
pub use state::{Ball, Brick, GameEvent, GamePhase, GameState, Paddle, PaddleInput};
pub use tick::{TickInput, tick};
