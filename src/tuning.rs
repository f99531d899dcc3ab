//! Data-driven game balance
//!
//! Every number the physics and the generator read at runtime. Missing JSON
//! fields fall back to the values in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Physics and generation parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Body physics ===
    pub gravity: f32,
    pub jump_speed: f32,
    pub max_fall_speed: f32,
    pub max_fall_distance: f32,
    pub move_speed: f32,
    pub body_size: f32,
    pub trail_length: usize,

    // === Surfaces ===
    pub base_width: f32,
    pub min_width: f32,
    pub surface_height: f32,
    pub seed_width_scale: f32,
    pub seed_special_chance: f64,
    pub special_chance: f64,

    // === Collectibles ===
    pub collectible_size: f32,
    pub collectible_chance: f64,
    pub double_jump_charges: u8,
    pub enlarge_ticks: u32,
    pub slow_motion_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            max_fall_distance: MAX_FALL_DISTANCE,
            move_speed: MOVE_SPEED,
            body_size: BODY_SIZE,
            trail_length: TRAIL_LENGTH,

            base_width: BASE_WIDTH,
            min_width: MIN_WIDTH,
            surface_height: SURFACE_HEIGHT,
            seed_width_scale: SEED_WIDTH_SCALE,
            seed_special_chance: SEED_SPECIAL_CHANCE,
            special_chance: SPECIAL_CHANCE,

            collectible_size: COLLECTIBLE_SIZE,
            collectible_chance: COLLECTIBLE_CHANCE,
            double_jump_charges: DOUBLE_JUMP_CHARGES,
            enlarge_ticks: ENLARGE_TICKS,
            slow_motion_ticks: SLOW_MOTION_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("max_fall_distance", self.max_fall_distance),
            ("move_speed", self.move_speed),
            ("body_size", self.body_size),
            ("base_width", self.base_width),
            ("min_width", self.min_width),
            ("surface_height", self.surface_height),
            ("seed_width_scale", self.seed_width_scale),
            ("collectible_size", self.collectible_size),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("max_fall_distance", self.max_fall_distance),
            ("body_size", self.body_size),
            ("min_width", self.min_width),
            ("surface_height", self.surface_height),
            ("seed_width_scale", self.seed_width_scale),
            ("collectible_size", self.collectible_size),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }

        if self.jump_speed >= 0.0 {
            return Err(invalid(
                "jump_speed",
                format!("{} must be negative (upward)", self.jump_speed),
            ));
        }
        if self.move_speed < 0.0 {
            return Err(invalid(
                "move_speed",
                format!("{} must not be negative", self.move_speed),
            ));
        }
        if self.min_width > self.base_width {
            return Err(invalid(
                "min_width",
                format!("{} exceeds base_width {}", self.min_width, self.base_width),
            ));
        }
        if self.base_width > self.viewport_width {
            return Err(invalid(
                "base_width",
                format!("{} exceeds viewport_width {}", self.base_width, self.viewport_width),
            ));
        }

        let chances = [
            ("seed_special_chance", self.seed_special_chance),
            ("special_chance", self.special_chance),
            ("collectible_chance", self.collectible_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}
