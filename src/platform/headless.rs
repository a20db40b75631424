//! Scripted frontend with no display
//!
//! Plays back a queue of per-poll inputs and records what was drawn. Once the
//! script runs out every poll reports quit, so a run always terminates.

use std::collections::VecDeque;
use std::io;

use glam::Vec2;

use super::{FrameEvents, Frontend, KeyState};
use crate::{Aabb, Rgb};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgb),
    Rect(Aabb, Rgb),
    Circle(Vec2, f32, Rgb),
    Text(String, u16, Rgb, Vec2),
}

/// Input for one poll
#[derive(Debug, Clone, Copy, Default)]
struct ScriptStep {
    events: FrameEvents,
    keys: KeyState,
}

#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    script: VecDeque<ScriptStep>,
    keys: KeyState,
    pending: Vec<DrawCall>,
    /// Draw calls of every presented frame, oldest first
    pub frames: Vec<Vec<DrawCall>>,
    /// Number of `tick` calls
    pub ticks: u64,
    /// Number of `poll_events` calls
    pub polls: u64,
}

impl HeadlessFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `polls` polls that report nothing
    pub fn idle(mut self, polls: usize) -> Self {
        for _ in 0..polls {
            self.script.push_back(ScriptStep::default());
        }
        self
    }

    /// Queue one poll reporting a key press
    pub fn press_key(mut self) -> Self {
        self.script.push_back(ScriptStep {
            events: FrameEvents {
                key_pressed: true,
                quit: false,
            },
            keys: KeyState::default(),
        });
        self
    }

    /// Queue polls with movement keys held
    pub fn hold(mut self, keys: KeyState, polls: usize) -> Self {
        for _ in 0..polls {
            self.script.push_back(ScriptStep {
                events: FrameEvents::default(),
                keys,
            });
        }
        self
    }

    /// Queue one poll reporting quit
    pub fn quit(mut self) -> Self {
        self.script.push_back(ScriptStep {
            events: FrameEvents {
                quit: true,
                key_pressed: false,
            },
            keys: KeyState::default(),
        });
        self
    }

    /// Number of queued polls left
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// All text drawn across every presented frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().flatten().filter_map(|call| match call {
            DrawCall::Text(text, ..) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Frontend for HeadlessFrontend {
    fn poll_events(&mut self) -> io::Result<FrameEvents> {
        self.polls += 1;
        match self.script.pop_front() {
            Some(step) => {
                self.keys = step.keys;
                Ok(step.events)
            }
            None => {
                self.keys = KeyState::default();
                Ok(FrameEvents {
                    quit: true,
                    key_pressed: false,
                })
            }
        }
    }

    fn key_state(&self) -> KeyState {
        self.keys
    }

    fn clear(&mut self, color: Rgb) {
        self.pending.clear();
        self.pending.push(DrawCall::Clear(color));
    }

    fn draw_rect(&mut self, rect: Aabb, color: Rgb) {
        self.pending.push(DrawCall::Rect(rect, color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.pending.push(DrawCall::Circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, size: u16, color: Rgb, anchor: Vec2) {
        self.pending
            .push(DrawCall::Text(text.to_string(), size, color, anchor));
    }

    fn present_frame(&mut self) -> io::Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn tick(&mut self, _target_fps: u32) {
        self.ticks += 1;
    }
}
