//! Platform abstraction layer
//!
//! The game core talks to the outside world only through [`Frontend`]:
//! - Input and quit events
//! - Held-key state
//! - Shape and text drawing in logical screen coordinates
//! - Frame presentation and pacing

pub mod headless;
pub mod terminal;

pub use headless::{DrawCall, HeadlessFrontend};
pub use terminal::TerminalFrontend;

use std::io;

use glam::Vec2;

use crate::{Aabb, Rgb};

/// Events gathered by one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// User asked to close the game
    pub quit: bool,
    /// Any key was pressed since the last poll
    pub key_pressed: bool,
}

/// Movement keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

/// Rendering and input service used by the game loop
///
/// Coordinates are logical screen pixels with the origin at the top-left and
/// y growing downward.
pub trait Frontend {
    /// Drain pending input since the last call
    fn poll_events(&mut self) -> io::Result<FrameEvents>;

    /// Movement keys held as of the last poll
    fn key_state(&self) -> KeyState;

    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Rgb);

    fn draw_rect(&mut self, rect: Aabb, color: Rgb);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    /// Draw `text` with its top edge centred on `anchor`
    fn draw_text(&mut self, text: &str, size: u16, color: Rgb, anchor: Vec2);

    /// Show everything drawn since the last `clear`
    fn present_frame(&mut self) -> io::Result<()>;

    /// Sleep until the next frame slot at `target_fps`
    fn tick(&mut self, target_fps: u32);
}
