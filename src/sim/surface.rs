//! Surfaces (platforms) and collectibles (power-ups)
//!
//! Both are passive: they carry geometry and a category, and all behaviour
//! lives in the collision resolver and the generator.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::ENLARGE_FACTOR;

/// RGB colour triple for presentation layers
pub type Rgb = [u8; 3];

pub const GREEN: Rgb = [0, 255, 0];
pub const ORANGE: Rgb = [255, 165, 0];
pub const RED: Rgb = [255, 0, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const BLUE: Rgb = [0, 0, 255];
pub const PURPLE: Rgb = [128, 0, 128];
pub const WHITE: Rgb = [255, 255, 255];

/// Surface category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceKind {
    #[default]
    Normal,
    /// Cosmetically highlighted; never enlarged
    Special,
}

/// Presentation class of a surface, derived from kind and display width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceTint {
    Special,
    Narrow,
    Medium,
    Wide,
}

impl SurfaceTint {
    pub fn color(&self) -> Rgb {
        match self {
            SurfaceTint::Special => YELLOW,
            SurfaceTint::Narrow => RED,
            SurfaceTint::Medium => ORANGE,
            SurfaceTint::Wide => GREEN,
        }
    }
}

/// A landing platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Width at creation; enlargement never mutates it
    pub width: f32,
    pub height: f32,
    pub kind: SurfaceKind,
}

impl Surface {
    pub fn new(id: u32, x: f32, y: f32, width: f32, height: f32, kind: SurfaceKind) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            kind,
        }
    }

    /// Effective width for this tick, shared by collision and rendering.
    ///
    /// Enlarged normal surfaces grow by half but never past `base_width`.
    pub fn display_width(&self, enlarged: bool, base_width: f32) -> f32 {
        if enlarged && self.kind == SurfaceKind::Normal {
            (self.width * ENLARGE_FACTOR).min(base_width)
        } else {
            self.width
        }
    }

    /// Bounding rectangle using the effective width
    pub fn rect(&self, enlarged: bool, base_width: f32) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.display_width(enlarged, base_width),
            self.height,
        )
    }

    /// Centre of the nominal footprint; the generator measures offsets from here
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn tint(&self, enlarged: bool, base_width: f32) -> SurfaceTint {
        if self.kind == SurfaceKind::Special {
            return SurfaceTint::Special;
        }
        let width = self.display_width(enlarged, base_width);
        if width < 100.0 {
            SurfaceTint::Narrow
        } else if width < 150.0 {
            SurfaceTint::Medium
        } else {
            SurfaceTint::Wide
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    DoubleJump,
    EnlargeSurfaces,
    SlowMotion,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::DoubleJump,
        CollectibleKind::EnlargeSurfaces,
        CollectibleKind::SlowMotion,
    ];

    pub fn color(&self) -> Rgb {
        match self {
            CollectibleKind::DoubleJump => BLUE,
            CollectibleKind::EnlargeSurfaces => ORANGE,
            CollectibleKind::SlowMotion => PURPLE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::DoubleJump => "double_jump",
            CollectibleKind::EnlargeSurfaces => "enlarge_surfaces",
            CollectibleKind::SlowMotion => "slow_motion",
        }
    }
}

/// A pickup sitting above a surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub rect: Rect,
}

impl Collectible {
    /// Place a collectible centred above `surface`
    pub fn above(id: u32, kind: CollectibleKind, surface: &Surface, size: f32) -> Self {
        let x = surface.center_x() - size / 2.0;
        let y = surface.y - size - 5.0;
        Self {
            id,
            kind,
            rect: Rect::new(x, y, size, size),
        }
    }
}
