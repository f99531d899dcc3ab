//! Idle/demo steering
//!
//! Produces the input a simple player would give: while rising, drift under
//! the highest surface still reachable at the current upward speed (or a
//! collectible inside that band); while falling, line up with the nearest
//! surface below and spend a double jump when a fall gets long.

use super::state::GameState;
use super::tick::TickInput;

/// Horizontal error tolerated before steering
const DEAD_ZONE: f32 = 6.0;

/// Fraction of the fatal distance after which a double jump is spent
const PANIC_FALL_FRACTION: f32 = 0.6;

/// Choose the input for the next tick
pub fn steer(state: &GameState) -> TickInput {
    let body = state.body.rect();
    let feet = body.bottom();
    let center = body.center_x();
    let vy = state.body.vel.y;

    let target_x = if vy < 0.0 {
        let gravity = state.tuning.gravity * state.body.powerups.gravity_multiplier();
        let reach = vy * vy / (2.0 * gravity);
        rising_target(state, feet, reach)
    } else {
        falling_target(state, feet)
    };

    let move_axis = match target_x {
        Some(x) if x > center + DEAD_ZONE => 1,
        Some(x) if x < center - DEAD_ZONE => -1,
        _ => 0,
    };

    let jump = vy > 0.0
        && state.body.fall_distance() > state.tuning.max_fall_distance * PANIC_FALL_FRACTION
        && falling_target(state, feet).is_none_or(|x| (x - center).abs() > body.w);

    TickInput::new(move_axis, jump)
}

/// Highest surface (or collectible) whose top is above the feet and within `reach`
fn rising_target(state: &GameState, feet: f32, reach: f32) -> Option<f32> {
    let within = |top: f32| top < feet && feet - top <= reach;

    let pickup = state
        .collectibles
        .iter()
        .filter(|c| within(c.rect.bottom()))
        .min_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
        .map(|c| c.rect.center_x());

    pickup.or_else(|| {
        state
            .surfaces
            .iter()
            .filter(|s| within(s.y))
            .min_by(|a, b| a.y.total_cmp(&b.y))
            .map(|s| s.x + state.display_width(s) / 2.0)
            .or_else(|| falling_target(state, feet))
    })
}

/// Nearest surface at or below the feet
fn falling_target(state: &GameState, feet: f32) -> Option<f32> {
    state
        .surfaces
        .iter()
        .filter(|s| s.y >= feet)
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .map(|s| s.x + state.display_width(s) / 2.0)
}
