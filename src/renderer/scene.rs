//! Scene composition for each screen

use glam::Vec2;

use crate::GameConfig;
use crate::platform::Frontend;
use crate::sim::GameState;

/// Title screen shown once at startup
pub fn draw_start_screen(frontend: &mut impl Frontend, config: &GameConfig) {
    let (w, h) = (config.screen_width, config.screen_height);
    frontend.clear(config.background_color);
    frontend.draw_text(
        &format!("{} Game!", config.title),
        config.font_size_start,
        config.accent_color,
        Vec2::new(w / 2.0, h / 3.0),
    );
    frontend.draw_text(
        "Press any key to begin...",
        config.font_size_instructions,
        config.text_color,
        Vec2::new(w / 2.0, h / 2.0),
    );
}

/// One gameplay frame: bricks, paddle, ball and the score overlay
pub fn draw_round(frontend: &mut impl Frontend, state: &GameState, config: &GameConfig) {
    frontend.clear(config.background_color);

    for brick in state.alive_bricks() {
        frontend.draw_rect(brick.bounds, config.brick_color);
    }
    frontend.draw_rect(state.paddle.bounds(), config.paddle_color);
    frontend.draw_circle(state.ball.pos, state.ball.radius, state.ball_color);

    frontend.draw_text(
        &score_label(state.score),
        config.font_size_score,
        config.accent_color,
        Vec2::new(config.screen_width * 3.0 / 4.0, config.screen_height - 50.0),
    );
}

/// Banner, final score and restart prompt
pub fn draw_game_over(frontend: &mut impl Frontend, score: u32, config: &GameConfig) {
    let (w, h) = (config.screen_width, config.screen_height);
    frontend.clear(config.background_color);
    frontend.draw_text(
        "GAME OVER",
        config.font_size_gameover_title,
        config.accent_color,
        Vec2::new(w / 2.0, h / 4.0),
    );
    frontend.draw_text(
        &score_label(score),
        config.font_size_instructions,
        config.text_color,
        Vec2::new(w / 2.0, h / 2.0),
    );
    frontend.draw_text(
        "Press any key to play again...",
        config.font_size_gameover_restart,
        config.text_color,
        Vec2::new(w / 2.0, h * 3.0 / 4.0),
    );
}

pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;
    use crate::platform::{DrawCall, HeadlessFrontend};

    #[test]
    fn test_round_frame_skips_dead_bricks() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Rgb(9, 9, 9));
        state.bricks[0].alive = false;
        state.score = 1;

        let mut frontend = HeadlessFrontend::new();
        draw_round(&mut frontend, &state, &config);
        frontend.present_frame().unwrap();

        let frame = &frontend.frames[0];
        assert_eq!(frame[0], DrawCall::Clear(config.background_color));
        let bricks = frame
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect(_, color) if *color == config.brick_color))
            .count();
        assert_eq!(bricks, 29);
        assert!(frame.contains(&DrawCall::Circle(state.ball.pos, 10.0, Rgb(9, 9, 9))));
        assert!(frontend.texts().any(|t| t == "Score: 1"));
    }

    #[test]
    fn test_game_over_shows_score() {
        let config = GameConfig::default();
        let mut frontend = HeadlessFrontend::new();
        draw_game_over(&mut frontend, 17, &config);
        frontend.present_frame().unwrap();

        let texts: Vec<&str> = frontend.texts().collect();
        assert_eq!(texts, vec!["GAME OVER", "Score: 17", "Press any key to play again..."]);
    }
}
