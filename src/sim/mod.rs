//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod generator;
pub mod particles;
pub mod rect;
pub mod state;
pub mod surface;
pub mod tick;

pub use body::{Body, EffectTimer, PowerUps};
pub use collision::{find_landing, lands_on, take_overlapping};
pub use generator::{difficulty, fill_ahead, prune, seed_surfaces, target_count};
pub use particles::Particle;
pub use rect::Rect;
pub use state::{GameEvent, GameOverCause, GamePhase, GameState, RunStats};
pub use surface::{Collectible, CollectibleKind, Rgb, Surface, SurfaceKind, SurfaceTint};
pub use tick::{TickInput, tick};
