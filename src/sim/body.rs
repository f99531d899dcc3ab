//! The player body and its power-up effects

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::surface::{BLUE, CollectibleKind, ORANGE, PURPLE, Rgb, WHITE};
use crate::consts::{DOUBLE_JUMP_FACTOR, SLOW_MOTION_FACTOR};
use crate::tuning::Tuning;

/// A countdown effect. Re-applying refreshes to the nominal duration, it never stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffectTimer {
    pub remaining: u32,
}

impl EffectTimer {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn refresh(&mut self, nominal_ticks: u32) {
        self.remaining = nominal_ticks;
    }

    /// Count down one tick, saturating at zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    /// Mid-air jumps available
    pub double_jumps: u8,
    pub enlarge: EffectTimer,
    pub slow_motion: EffectTimer,
}

impl PowerUps {
    /// Apply a picked-up effect, resetting it to its nominal value
    pub fn apply(&mut self, kind: CollectibleKind, tuning: &Tuning) {
        match kind {
            CollectibleKind::DoubleJump => self.double_jumps = tuning.double_jump_charges,
            CollectibleKind::EnlargeSurfaces => self.enlarge.refresh(tuning.enlarge_ticks),
            CollectibleKind::SlowMotion => self.slow_motion.refresh(tuning.slow_motion_ticks),
        }
    }

    /// Landing restores a single charge when none are left
    pub fn restore_charge(&mut self) {
        self.double_jumps = self.double_jumps.max(1);
    }

    /// 0.5 under slow motion, else 1.0
    #[inline]
    pub fn gravity_multiplier(&self) -> f32 {
        if self.slow_motion.is_active() {
            SLOW_MOTION_FACTOR
        } else {
            1.0
        }
    }

    fn tick(&mut self) {
        self.enlarge.tick();
        self.slow_motion.tick();
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// True while descending without interruption
    pub falling: bool,
    /// Where the current fall began
    pub fall_start_y: f32,
    pub powerups: PowerUps,
    /// Recent centres, oldest first (rendering only)
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
}

impl Body {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::splat(size),
            falling: false,
            fall_start_y: y,
            powerups: PowerUps::default(),
            trail: VecDeque::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance one tick of gravity and motion
    pub fn integrate(&mut self, tuning: &Tuning) {
        let multiplier = self.powerups.gravity_multiplier();

        self.vel.y += tuning.gravity * multiplier;
        self.vel.y = self.vel.y.min(tuning.max_fall_speed * multiplier);

        if self.vel.y > 0.0 {
            if !self.falling {
                self.falling = true;
                self.fall_start_y = self.pos.y;
            }
        } else {
            self.falling = false;
        }

        // Only horizontal motion is slowed; vertical uses the already-scaled velocity
        self.pos.x += self.vel.x * multiplier;
        self.pos.y += self.vel.y;

        self.wrap_horizontal(tuning.viewport_width);
        self.powerups.tick();
        self.record_trail(tuning.trail_length);
    }

    /// Reappear on the opposite edge once fully off-screen
    fn wrap_horizontal(&mut self, viewport_width: f32) {
        if self.pos.x + self.size.x < 0.0 {
            self.pos.x = viewport_width;
        } else if self.pos.x > viewport_width {
            self.pos.x = -self.size.x;
        }
    }

    fn record_trail(&mut self, capacity: usize) {
        self.trail.push_back(self.rect().center());
        while self.trail.len() > capacity {
            self.trail.pop_front();
        }
    }

    /// Mid-air jump. Only allowed while descending with a charge left.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.vel.y > 0.0 && self.powerups.double_jumps > 0 {
            self.vel.y = tuning.jump_speed * DOUBLE_JUMP_FACTOR;
            self.powerups.double_jumps -= 1;
            true
        } else {
            false
        }
    }

    /// Snap onto a surface top and bounce.
    ///
    /// The fall stays open until the next integration sees the upward
    /// velocity, so the landing tick is still judged against the fall limit.
    pub fn land_on(&mut self, surface_top: f32, tuning: &Tuning) {
        self.pos.y = surface_top - self.size.y;
        self.vel.y = tuning.jump_speed;
        self.powerups.restore_charge();
    }

    /// Distance fallen since the current fall began
    pub fn fall_distance(&self) -> f32 {
        if self.falling {
            self.pos.y - self.fall_start_y
        } else {
            0.0
        }
    }

    /// Tint reflecting the most significant active effect
    pub fn color(&self) -> Rgb {
        if self.powerups.slow_motion.is_active() {
            PURPLE
        } else if self.powerups.enlarge.is_active() {
            ORANGE
        } else if self.powerups.double_jumps > 0 {
            BLUE
        } else {
            WHITE
        }
    }
}
