//! Game state and core simulation types
//!
//! `GameState` is the whole session: one value, owned by whoever drives
//! `tick`. Nothing else keeps references into its collections.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, PowerUps};
use super::generator;
use super::particles::Particle;
use super::surface::{Collectible, CollectibleKind, Surface};
use crate::consts::TICKS_PER_SECOND;
use crate::score_for_height;
use crate::tuning::Tuning;

/// Stream for cosmetic randomness, so particles never shift level generation
const FX_STREAM: u64 = 0x5eed_f00d;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen until unpaused
    Paused,
    /// Run ended; only `restart` continues
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Body dropped below the visible area
    FellOffScreen,
    /// Uninterrupted fall exceeded the allowed distance
    FellTooFar,
}

/// Notifications for audio/HUD collaborators, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Landed { surface_id: u32 },
    DoubleJumped,
    PickedUp(CollectibleKind),
    NewHighScore(u64),
    GameOver(GameOverCause),
}

/// End-of-run statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Landings plus mid-air jumps
    pub jumps: u32,
    pub pickups_collected: u32,
    /// Live ticks (paused time excluded)
    pub ticks_survived: u64,
}

impl RunStats {
    pub fn seconds_survived(&self) -> u64 {
        self.ticks_survived / TICKS_PER_SECOND as u64
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Gameplay randomness (generation and pickups)
    pub rng: Pcg32,
    /// Cosmetic randomness
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    pub body: Body,
    /// Creation order; the last element is always the highest surface
    pub surfaces: Vec<Surface>,
    pub collectibles: Vec<Collectible>,
    /// Top of the viewport in world space
    pub camera_y: f32,
    /// Smallest body y reached this run
    pub highest_point: f32,
    pub score: u64,
    /// Best score known, including earlier sessions
    pub high_score: u64,
    /// Whether this run already announced beating the previous best
    pub high_score_beaten: bool,
    pub stats: RunStats,
    pub events: Vec<GameEvent>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New session with default tuning and no previous best
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), 0)
    }

    /// New session with explicit tuning and the best score from storage
    pub fn with_tuning(seed: u64, tuning: Tuning, previous_high_score: u64) -> Self {
        let body = Body::new(0.0, 0.0, tuning.body_size);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::new(seed, FX_STREAM),
            phase: GamePhase::Playing,
            body,
            surfaces: Vec::new(),
            collectibles: Vec::new(),
            camera_y: 0.0,
            highest_point: tuning.viewport_height,
            score: 0,
            high_score: previous_high_score,
            high_score_beaten: false,
            stats: RunStats::default(),
            events: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.reset_run();
        log::info!(
            "Session started (seed {}, previous best {})",
            seed,
            previous_high_score
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run. The RNG keeps advancing and the high score is kept.
    pub fn restart(&mut self) {
        log::info!("Restarting (last score {}, best {})", self.score, self.high_score);
        self.reset_run();
    }

    fn reset_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.camera_y = 0.0;
        self.highest_point = self.tuning.viewport_height;
        self.score = 0;
        self.high_score_beaten = false;
        self.stats = RunStats::default();
        self.events.clear();
        self.particles.clear();

        generator::seed_surfaces(self);

        self.body = Body::new(0.0, 0.0, self.tuning.body_size);
        if let Some(first) = self.surfaces.first() {
            let x = first.center_x() - self.body.size.x / 2.0;
            let y = first.y - self.body.size.y;
            self.body.pos = glam::Vec2::new(x, y);
            self.body.fall_start_y = y;
        }
    }

    /// Flip between playing and paused. Ignored once the run is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Whether surfaces currently render and collide enlarged
    #[inline]
    pub fn surfaces_enlarged(&self) -> bool {
        self.body.powerups.enlarge.is_active()
    }

    /// Effective width of a surface this tick
    pub fn display_width(&self, surface: &Surface) -> f32 {
        surface.display_width(self.surfaces_enlarged(), self.tuning.base_width)
    }

    pub fn powerups(&self) -> &PowerUps {
        &self.body.powerups
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record a new maximum height, updating score and best score
    pub(crate) fn track_height(&mut self) {
        if self.body.pos.y >= self.highest_point {
            return;
        }
        self.highest_point = self.body.pos.y;
        self.score = score_for_height(self.highest_point, self.tuning.viewport_height).max(0) as u64;

        if self.score > self.high_score {
            self.high_score = self.score;
            if !self.high_score_beaten {
                self.high_score_beaten = true;
                self.events.push(GameEvent::NewHighScore(self.score));
            }
        }
    }

    /// Centre the viewport on the body
    pub(crate) fn update_camera(&mut self) {
        self.camera_y = self.body.pos.y - self.tuning.viewport_height / 2.0;
    }

    pub(crate) fn end_run(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver(cause));
        log::info!(
            "Game over ({:?}): score {}, jumps {}, pickups {}, {}s",
            cause,
            self.score,
            self.stats.jumps,
            self.stats.pickups_collected,
            self.stats.seconds_survived()
        );
    }
}
