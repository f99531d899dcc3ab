//! Endless Jumper - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, collisions, level generation)
//! - `tuning`: Data-driven physics and generation numbers
//! - `highscores`: Leaderboard the persistence layer can serialize
//! - `achievements`: Run statistics milestones

pub mod achievements;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use achievements::{Achievement, Achievements};
pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation rate; one tick per frame
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Viewport dimensions (y grows downward)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied on every landing (negative = up)
    pub const JUMP_SPEED: f32 = -15.0;
    /// Terminal falling velocity
    pub const MAX_FALL_SPEED: f32 = 15.0;
    /// Uninterrupted fall distance that ends the run
    pub const MAX_FALL_DISTANCE: f32 = 400.0;
    /// Horizontal speed for a full move axis
    pub const MOVE_SPEED: f32 = 8.0;

    /// Player bounding box
    pub const BODY_SIZE: f32 = 40.0;

    /// Surface defaults
    pub const BASE_WIDTH: f32 = 200.0;
    pub const MIN_WIDTH: f32 = 60.0;
    pub const SURFACE_HEIGHT: f32 = 20.0;
    /// Per-row shrink factor for the initial seed batch
    pub const SEED_WIDTH_SCALE: f32 = 0.95;
    /// Surfaces in the initial seed batch (including the start surface)
    pub const SEED_BATCH_SIZE: usize = 10;
    /// Vertical spacing of the seed batch
    pub const SEED_ROW_SPACING: f32 = 100.0;

    /// Collectible defaults
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    pub const COLLECTIBLE_CHANCE: f64 = 0.15;

    /// Special surface odds (seed batch vs. later generation)
    pub const SEED_SPECIAL_CHANCE: f64 = 0.10;
    pub const SPECIAL_CHANCE: f64 = 0.08;

    /// Power-up nominal values
    pub const DOUBLE_JUMP_CHARGES: u8 = 2;
    pub const ENLARGE_TICKS: u32 = 600;
    pub const SLOW_MOTION_TICKS: u32 = 300;
    /// Width multiplier while surfaces are enlarged
    pub const ENLARGE_FACTOR: f32 = 1.5;
    /// Double jumps are weaker than landing bounces
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.8;
    /// Gravity/horizontal multiplier under slow motion
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;

    /// Trail points kept for rendering
    pub const TRAIL_LENGTH: usize = 5;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Score for a vertical position: tenths of the climb above the viewport floor
#[inline]
pub fn score_for_height(y: f32, viewport_height: f32) -> i64 {
    ((viewport_height - y) / 10.0).trunc() as i64
}
