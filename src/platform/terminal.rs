//! Terminal frontend built on crossterm and ratatui
//!
//! Draw calls are buffered and painted on `present_frame` into a half-block
//! canvas that maps the logical screen onto the terminal. Esc, `q` and Ctrl-C
//! quit; arrow keys or `a`/`d` (either case) move the paddle.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, queue};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use glam::Vec2;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};

use super::{FrameEvents, Frontend, KeyState};
use crate::{Aabb, GameConfig, Rgb};

/// Without release events a key counts as held this long after a fresh press,
/// long enough to cover the OS auto-repeat delay
const PRESS_HOLD_WINDOW: Duration = Duration::from_millis(600);

/// Once auto-repeat is running the hold only has to bridge one repeat interval
const REPEAT_HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Text at or above this size is drawn bold
const BOLD_TEXT_SIZE: u16 = 30;

#[derive(Debug, Clone)]
enum Command {
    Rect(Aabb, Rgb),
    Circle(Vec2, f32, Rgb),
    Text(String, u16, Rgb, Vec2),
}

/// Held state for one direction key
#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    down: bool,
    /// Expiry of an emulated hold (terminals without release events)
    until: Option<Instant>,
}

impl HeldKey {
    fn press(&mut self, exact: bool, repeat: bool, now: Instant) {
        self.down = true;
        if !exact {
            let window = if repeat { REPEAT_HOLD_WINDOW } else { PRESS_HOLD_WINDOW };
            self.until = Some(now + window);
        }
    }

    fn release(&mut self) {
        self.down = false;
        self.until = None;
    }

    fn expire(&mut self, now: Instant) {
        if self.until.is_some_and(|t| now >= t) {
            self.release();
        }
    }
}

pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    screen: Vec2,
    background: Rgb,
    commands: Vec<Command>,
    /// Terminal reports key release events
    exact_keys: bool,
    left: HeldKey,
    right: HeldKey,
    last_tick: Instant,
}

impl TerminalFrontend {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new(config: &GameConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        match Self::setup(config) {
            Ok(frontend) => Ok(frontend),
            Err(e) => {
                // Setup may have failed after any step; undo all of them
                let _ = restore_screen(&mut io::stdout(), true);
                let _ = disable_raw_mode();
                Err(e)
            }
        }
    }

    fn setup(config: &GameConfig) -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, SetTitle(&config.title))?;

        let exact_keys = supports_keyboard_enhancement().unwrap_or(false);
        if exact_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!(
            "Terminal frontend ready (key release events: {})",
            if exact_keys { "yes" } else { "emulated" }
        );

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            screen: Vec2::new(config.screen_width, config.screen_height),
            background: config.background_color,
            commands: Vec::new(),
            exact_keys,
            left: HeldKey::default(),
            right: HeldKey::default(),
            last_tick: Instant::now(),
        })
    }
}

impl Frontend for TerminalFrontend {
    fn poll_events(&mut self) -> io::Result<FrameEvents> {
        let mut events = FrameEvents::default();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                let key_events = apply_key(
                    &mut self.left,
                    &mut self.right,
                    self.exact_keys,
                    key,
                    Instant::now(),
                );
                events.quit |= key_events.quit;
                events.key_pressed |= key_events.key_pressed;
            }
        }

        let now = Instant::now();
        self.left.expire(now);
        self.right.expire(now);
        Ok(events)
    }

    fn key_state(&self) -> KeyState {
        KeyState {
            left: self.left.down,
            right: self.right.down,
        }
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.commands.clear();
    }

    fn draw_rect(&mut self, rect: Aabb, color: Rgb) {
        self.commands.push(Command::Rect(rect, color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(Command::Circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, size: u16, color: Rgb, anchor: Vec2) {
        self.commands
            .push(Command::Text(text.to_string(), size, color, anchor));
    }

    fn present_frame(&mut self) -> io::Result<()> {
        let commands = &self.commands;
        let screen = self.screen;
        let background = to_color(self.background);

        self.terminal.draw(|f| {
            let area = f.area();
            let scale = CanvasScale::new(screen, area);
            let canvas = Canvas::default()
                .marker(Marker::HalfBlock)
                .background_color(background)
                .x_bounds([0.0, screen.x as f64])
                .y_bounds([0.0, screen.y as f64])
                .paint(|ctx| {
                    for command in commands {
                        paint(ctx, command, &scale);
                    }
                });
            f.render_widget(canvas, area);
        })?;
        Ok(())
    }

    fn tick(&mut self, target_fps: u32) {
        let frame = Duration::from_secs(1) / target_fps.max(1);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = restore_screen(self.terminal.backend_mut(), self.exact_keys) {
            log::warn!("Failed to restore terminal screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {}", e);
        }
    }
}

/// Fold one key event into the held-key state
///
/// Esc, `q` and Ctrl-C quit. Only a fresh press counts as "any key"; repeats
/// and releases do not. Without release events, pressing one direction
/// releases the other.
fn apply_key(
    left: &mut HeldKey,
    right: &mut HeldKey,
    exact: bool,
    key: KeyEvent,
    now: Instant,
) -> FrameEvents {
    let pressed = key.kind == KeyEventKind::Press;
    let is_quit = matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL));

    let (held, other) = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => (left, right),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => (right, left),
        _ => {
            return FrameEvents {
                quit: is_quit && pressed,
                key_pressed: pressed,
            };
        }
    };

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            held.press(exact, key.kind == KeyEventKind::Repeat, now);
            if !exact {
                other.release();
            }
        }
        KeyEventKind::Release => held.release(),
    }

    FrameEvents {
        quit: false,
        key_pressed: pressed,
    }
}

/// Mapping between logical pixels and terminal cells
struct CanvasScale {
    height: f64,
    /// Logical pixels per half-block row
    row_step: f64,
    /// Logical pixels per terminal column
    col_width: f64,
}

impl CanvasScale {
    fn new(screen: Vec2, area: Rect) -> Self {
        let rows = (area.height.max(1) as f64) * 2.0;
        let cols = area.width.max(1) as f64;
        Self {
            height: screen.y as f64,
            row_step: screen.y as f64 / rows,
            col_width: screen.x as f64 / cols,
        }
    }

    /// Canvas y grows upward
    #[inline]
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }
}

fn paint(ctx: &mut Context, command: &Command, scale: &CanvasScale) {
    match command {
        Command::Rect(rect, color) => {
            let color = to_color(*color);
            let (x1, x2) = (rect.min.x as f64, rect.max.x as f64);
            let mut y = rect.min.y as f64;
            while y <= rect.max.y as f64 {
                let cy = scale.flip(y);
                ctx.draw(&CanvasLine::new(x1, cy, x2, cy, color));
                y += scale.row_step;
            }
        }
        Command::Circle(center, radius, color) => {
            let color = to_color(*color);
            let (cx, cy, r) = (center.x as f64, center.y as f64, *radius as f64);
            let mut dy = -r;
            while dy <= r {
                let half = (r * r - dy * dy).max(0.0).sqrt();
                let y = scale.flip(cy + dy);
                ctx.draw(&CanvasLine::new(cx - half, y, cx + half, y, color));
                dy += scale.row_step;
            }
        }
        Command::Text(text, size, color, anchor) => {
            let mut style = Style::default().fg(to_color(*color));
            if *size >= BOLD_TEXT_SIZE {
                style = style.add_modifier(Modifier::BOLD);
            }
            let width = text.chars().count() as f64 * scale.col_width;
            let x = (anchor.x as f64 - width / 2.0).max(0.0);
            let y = scale.flip(anchor.y as f64);
            ctx.print(x, y, Line::styled(text.clone(), style));
        }
    }
}

/// Leave the alternate screen and show the cursor, popping key flags first if asked
fn restore_screen<W: Write>(out: &mut W, pop_key_flags: bool) -> io::Result<()> {
    if pop_key_flags {
        queue!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, LeaveAlternateScreen, Show)
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}
