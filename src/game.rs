//! Screen state machine
//!
//! `Start -> Playing -> RoundOver -> (Playing | Quit)`. Every screen is a
//! blocking loop paced by the frontend clock, and a quit event from any of
//! them ends the game.

use std::io;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::GameConfig;
use crate::platform::Frontend;
use crate::renderer::{draw_game_over, draw_round, draw_start_screen};
use crate::sim::{GameEvent, GameState, PaddleInput, TickInput, tick};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    RoundOver,
    Quit,
}

/// Game instance holding the frontend and all session state
pub struct Game<F: Frontend> {
    frontend: F,
    config: GameConfig,
    /// Picks each round's ball color
    rng: Pcg32,
    screen: Screen,
    /// Cleared by a quit event
    running: bool,
    round: Option<GameState>,
    rounds_played: u32,
}

impl<F: Frontend> Game<F> {
    pub fn new(frontend: F, config: GameConfig, seed: u64) -> Self {
        Self {
            frontend,
            config,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Start,
            running: true,
            round: None,
            rounds_played: 0,
        }
    }

    /// Title screen once, then rounds until the player quits
    pub fn run(&mut self) -> io::Result<()> {
        self.show_start_screen()?;
        while self.running {
            self.start_round();
            self.play_round()?;
            self.show_game_over_screen()?;
        }
        self.screen = Screen::Quit;
        log::info!("Quit after {} round(s)", self.rounds_played);
        Ok(())
    }

    /// Replace the current round with a fresh one
    pub fn start_round(&mut self) -> &GameState {
        self.rounds_played += 1;
        let state = GameState::with_rng(&self.config, &mut self.rng);
        log::info!(
            "Round {} started: {} bricks, ball color {:?}",
            self.rounds_played,
            state.bricks.len(),
            state.ball_color
        );
        self.screen = Screen::Playing;
        self.round.insert(state)
    }

    /// Tick until the round ends or the player quits
    fn play_round(&mut self) -> io::Result<()> {
        let Some(state) = self.round.as_mut() else {
            return Ok(());
        };

        while state.is_playing() {
            self.frontend.tick(self.config.fps);
            if self.frontend.poll_events()?.quit {
                self.running = false;
                break;
            }

            let keys = self.frontend.key_state();
            let input = TickInput {
                paddle: PaddleInput {
                    left: keys.left,
                    right: keys.right,
                },
            };
            tick(state, &input, &self.config);
            log_events(state);

            draw_round(&mut self.frontend, state, &self.config);
            self.frontend.present_frame()?;
        }
        Ok(())
    }

    fn show_start_screen(&mut self) -> io::Result<()> {
        self.screen = Screen::Start;
        draw_start_screen(&mut self.frontend, &self.config);
        self.frontend.present_frame()?;
        self.wait_for_key()
    }

    /// Skipped when the player already quit
    fn show_game_over_screen(&mut self) -> io::Result<()> {
        if !self.running {
            return Ok(());
        }
        self.screen = Screen::RoundOver;
        let score = self.round.as_ref().map_or(0, |r| r.score);
        draw_game_over(&mut self.frontend, score, &self.config);
        self.frontend.present_frame()?;
        self.wait_for_key()
    }

    /// Block until a key press or quit
    fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            self.frontend.tick(self.config.fps);
            let events = self.frontend.poll_events()?;
            if events.quit {
                self.running = false;
                return Ok(());
            }
            if events.key_pressed {
                return Ok(());
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The current or most recent round
    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn log_events(state: &GameState) {
    for event in &state.events {
        match event {
            GameEvent::PaddleHit => log::debug!("Paddle hit at tick {}", state.time_ticks),
            GameEvent::BrickDestroyed { id } => {
                log::debug!("Brick {} destroyed, score {}", id, state.score)
            }
            GameEvent::RoundOver { phase, score } => {
                log::info!("Round over ({:?}) with score {}", phase, score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessFrontend, KeyState};
    use crate::sim::GamePhase;
    use glam::Vec2;

    fn game(frontend: HeadlessFrontend) -> Game<HeadlessFrontend> {
        Game::new(frontend, GameConfig::default(), 42)
    }

    #[test]
    fn test_quit_on_start_screen_never_plays() {
        let mut game = game(HeadlessFrontend::new().idle(3).quit());
        game.run().unwrap();

        assert!(!game.is_running());
        assert_eq!(game.screen(), Screen::Quit);
        assert_eq!(game.rounds_played(), 0);
        assert!(game.round().is_none());
        assert_eq!(game.frontend().frames.len(), 1);
        assert!(game.frontend().texts().any(|t| t == "Breakout Game!"));
    }

    #[test]
    fn test_lost_round_then_restart_then_quit() {
        // From the default serve the ball misses the paddle and falls out
        // after 26 ticks; the leftover idle polls wait on the game-over screen
        let frontend = HeadlessFrontend::new()
            .press_key()
            .idle(30)
            .press_key()
            .idle(3)
            .quit();
        let mut game = game(frontend);
        game.run().unwrap();

        assert_eq!(game.rounds_played(), 2);
        assert!(!game.is_running());
        let game_overs = game.frontend().texts().filter(|t| *t == "GAME OVER").count();
        assert_eq!(game_overs, 1, "quitting mid-round skips the game-over screen");

        let round = game.round().unwrap();
        assert_eq!(round.time_ticks, 3);
        assert!(round.is_playing());
        assert_eq!(game.frontend().remaining(), 0);
    }

    #[test]
    fn test_first_round_ends_with_ball_lost() {
        let mut game = game(HeadlessFrontend::new().press_key().idle(30));
        game.run().unwrap();

        // Script ran out on the game-over screen, which reports quit
        assert_eq!(game.rounds_played(), 1);
        let round = game.round().unwrap();
        assert_eq!(round.phase, GamePhase::BallLost);
        assert_eq!(round.time_ticks, 26);
        assert_eq!(round.score, 0);
        assert_eq!(round.alive_count(), 30);
        assert!(game.frontend().texts().any(|t| t == "GAME OVER"));
    }

    #[test]
    fn test_held_key_moves_paddle() {
        let keys = KeyState {
            left: false,
            right: true,
        };
        let mut game = game(HeadlessFrontend::new().press_key().hold(keys, 5));
        game.run().unwrap();

        let round = game.round().unwrap();
        assert_eq!(round.paddle.pos.x, 550.0);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut game = game(HeadlessFrontend::new());
        let config = game.config().clone();
        game.start_round();

        if let Some(round) = game.round.as_mut() {
            round.score = 12;
            round.bricks.iter_mut().take(12).for_each(|b| b.alive = false);
            round.ball.pos = Vec2::new(10.0, 700.0);
            round.ball.vel = -round.ball.vel;
            round.paddle.pos.x = 45.0;
            round.phase = GamePhase::BallLost;
        }

        let fresh = game.start_round();
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.alive_count(), 30);
        assert_eq!(fresh.ball.pos, config.ball_start);
        assert_eq!(fresh.ball.vel, config.ball_start_vel);
        assert_eq!(fresh.paddle.pos, config.paddle_start);
        assert!(fresh.is_playing());
        assert_eq!(game.rounds_played(), 2);
    }

    #[test]
    fn test_every_poll_is_paced() {
        let mut game = game(HeadlessFrontend::new().press_key().idle(5).quit());
        game.run().unwrap();
        assert_eq!(game.frontend().ticks, game.frontend().polls);
    }
}
