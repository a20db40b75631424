//! Per-frame simulation tick
//!
//! Advances a round by exactly one frame. Velocities are per-tick
//! displacements, so there is no timestep parameter.

use super::collision::{resolve_bricks, resolve_paddle};
use super::state::{GameEvent, GamePhase, GameState, PaddleInput};
use crate::GameConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub paddle: PaddleInput,
}

/// Advance the round by one frame
///
/// Order: entity updates, paddle collision, brick collision, end-of-round
/// checks. Does nothing once the round is over.
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    state.events.clear();
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;

    state.paddle.update(input.paddle, config);
    state.ball.update(config.screen_width);

    if resolve_paddle(&mut state.ball, &state.paddle) {
        state.events.push(GameEvent::PaddleHit);
    }

    let destroyed = resolve_bricks(&mut state.ball, &mut state.bricks);
    state.score += destroyed.len() as u32;
    state
        .events
        .extend(destroyed.into_iter().map(|id| GameEvent::BrickDestroyed { id }));

    // A cleared grid wins even if the ball is also past the bottom edge
    if state.alive_count() == 0 {
        end_round(state, GamePhase::Cleared);
    } else if state.ball.bounds().top() > config.screen_height {
        end_round(state, GamePhase::BallLost);
    }
}

fn end_round(state: &mut GameState, phase: GamePhase) {
    state.phase = phase;
    state.events.push(GameEvent::RoundOver {
        phase,
        score: state.score,
    });
}
