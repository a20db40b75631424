//! Rendering module
//!
//! Builds each screen out of frontend draw calls. Nothing here touches the
//! terminal directly.

pub mod scene;

pub use scene::{draw_game_over, draw_round, draw_start_screen, score_label};
