//! Collision detection and response
//!
//! The ball is tested through its bounding square, so every check here is a
//! plain rectangle overlap.

use super::state::{Ball, Brick, Paddle};
use crate::Aabb;

/// Check overlap between the ball's bounding square and a rectangle
#[inline]
pub fn ball_rect_collision(ball: &Ball, rect: &Aabb) -> bool {
    ball.bounds().intersects(rect)
}

/// Bounce the ball off the paddle
///
/// Only a descending ball is deflected, which keeps it from re-bouncing while
/// it is still inside the paddle. The ball is lifted onto the paddle's top
/// edge before reversing. Returns true on a hit.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    let bounds = paddle.bounds();
    if ball.vel.y > 0.0 && ball_rect_collision(ball, &bounds) {
        ball.pos.y = bounds.top() - ball.radius;
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}

/// Destroy every alive brick the ball overlaps
///
/// The vertical velocity reverses once no matter how many bricks were hit.
/// Returns the ids of the destroyed bricks in grid order.
pub fn resolve_bricks(ball: &mut Ball, bricks: &mut [Brick]) -> Vec<u32> {
    let mut destroyed = Vec::new();
    for brick in bricks.iter_mut().filter(|b| b.alive) {
        if ball_rect_collision(ball, &brick.bounds) {
            brick.alive = false;
            destroyed.push(brick.id);
        }
    }

    if !destroyed.is_empty() {
        ball.vel.y = -ball.vel.y;
    }
    destroyed
}
