//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame.

use super::collision::{find_landing, take_overlapping};
use super::generator;
use super::particles;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use super::surface::GREEN;

/// Particles spawned per landing
const LANDING_BURST: usize = 5;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 left, 0 none, 1 right; anything else is clamped
    pub move_axis: i8,
    /// Mid-air jump (consumes a double-jump charge)
    pub jump: bool,
}

impl TickInput {
    pub fn new(move_axis: i8, jump: bool) -> Self {
        Self { move_axis, jump }
    }

    #[inline]
    pub fn axis(&self) -> f32 {
        f32::from(self.move_axis.clamp(-1, 1))
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }
    state.stats.ticks_survived += 1;

    apply_input(state, input);

    let prev_bottom = state.body.bottom();
    state.body.integrate(&state.tuning);
    particles::update(&mut state.particles);

    resolve_landing(state, prev_bottom);
    resolve_pickups(state);

    state.track_height();
    state.update_camera();

    generator::fill_ahead(state);
    generator::prune(state);

    check_termination(state);
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    state.body.vel.x = input.axis() * state.tuning.move_speed;

    if input.jump && state.body.jump(&state.tuning) {
        state.stats.jumps += 1;
        state.events.push(GameEvent::DoubleJumped);
    }
}

fn resolve_landing(state: &mut GameState, prev_bottom: f32) {
    let body = state.body.rect();
    let Some(index) = find_landing(
        prev_bottom,
        &body,
        state.body.vel.y,
        &state.surfaces,
        state.surfaces_enlarged(),
        state.tuning.base_width,
    ) else {
        return;
    };

    let (surface_id, surface_top) = {
        let surface = &state.surfaces[index];
        (surface.id, surface.y)
    };
    state.body.land_on(surface_top, &state.tuning);
    state.stats.jumps += 1;
    state.events.push(GameEvent::Landed { surface_id });
    log::trace!("Landed on surface {} at y {:.1}", surface_id, surface_top);

    let feet = glam::Vec2::new(state.body.rect().center_x(), state.body.bottom());
    particles::burst(
        &mut state.particles,
        &mut state.fx_rng,
        feet,
        GREEN,
        LANDING_BURST,
    );
}

fn resolve_pickups(state: &mut GameState) {
    let body = state.body.rect();
    for kind in take_overlapping(&body, &mut state.collectibles) {
        state.stats.pickups_collected += 1;
        state.body.powerups.apply(kind, &state.tuning);
        state.events.push(GameEvent::PickedUp(kind));
        log::debug!("Picked up {}", kind.as_str());
    }
}

/// End the run if the body left the viewport or fell too far
pub(crate) fn check_termination(state: &mut GameState) {
    let y = state.body.pos.y;
    if y - state.camera_y > state.tuning.viewport_height {
        state.end_run(GameOverCause::FellOffScreen);
    } else if state.body.falling && y - state.body.fall_start_y > state.tuning.max_fall_distance {
        state.end_run(GameOverCause::FellTooFar);
    }
}
