//! The one and only level.
//!
//! Coordinates are in world units of the orthographic view, which spans
//! `-5..5` horizontally and `-3.75..3.75` vertically.

use glam::Vec3;

use crate::entity::TextureId;

pub const PLATFORM_COUNT: usize = 35;

/// Floor, walls and ledges. Some blocks are stacked twice at the same spot.
pub const PLATFORM_POSITIONS: [Vec3; PLATFORM_COUNT] = [
    Vec3::new(-1.0, -3.5, 0.0),
    Vec3::new(0.0, -3.5, 0.0),
    Vec3::new(1.0, -3.5, 0.0),
    Vec3::new(-3.0, -3.5, 0.0),
    Vec3::new(2.0, -3.5, 0.0),
    Vec3::new(-4.0, -3.5, 0.0),
    Vec3::new(-5.0, -3.5, 0.0),
    Vec3::new(3.0, -3.5, 0.0),
    Vec3::new(4.0, -3.5, 0.0),
    Vec3::new(5.0, -3.5, 0.0),
    // Right wall
    Vec3::new(5.0, -2.5, 0.0),
    Vec3::new(5.0, -1.5, 0.0),
    Vec3::new(5.0, -0.5, 0.0),
    Vec3::new(5.0, 0.5, 0.0),
    Vec3::new(5.0, 1.5, 0.0),
    Vec3::new(5.0, 2.5, 0.0),
    Vec3::new(5.0, 2.5, 0.0),
    Vec3::new(5.0, 3.5, 0.0),
    // Left wall
    Vec3::new(-5.0, -2.5, 0.0),
    Vec3::new(-5.0, -1.5, 0.0),
    Vec3::new(-5.0, -0.5, 0.0),
    Vec3::new(-5.0, 0.5, 0.0),
    Vec3::new(-5.0, 1.5, 0.0),
    Vec3::new(-5.0, 2.5, 0.0),
    Vec3::new(-5.0, 2.5, 0.0),
    Vec3::new(-5.0, 3.5, 0.0),
    // Upper ledge
    Vec3::new(-4.0, 2.5, 0.0),
    Vec3::new(-3.0, 2.5, 0.0),
    Vec3::new(-2.0, 2.5, 0.0),
    Vec3::new(-1.0, 2.5, 0.0),
    // Middle ledge
    Vec3::new(4.0, -1.0, 0.0),
    Vec3::new(3.0, -1.0, 0.0),
    Vec3::new(2.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
];

/// The landing pad, sitting in the gap of the floor row.
pub const TARGET_POSITION: Vec3 = Vec3::new(-2.0, -3.5, 0.0);

pub const PLAYER_START: Vec3 = Vec3::new(0.0, 3.0, 0.0);
pub const PLAYER_SIZE: f32 = 0.8;
pub const PLAYER_SPEED: f32 = 1.5;
pub const GRAVITY: Vec3 = Vec3::new(0.0, -0.25, 0.0);
/// Sideways acceleration while a direction key is held.
pub const LATERAL_THRUST: f32 = 0.25;

/// "MISSION SUCCESS" as font atlas indices. Glyph 9 is a blank cell.
pub static SUCCESS_MESSAGE: [u32; 15] = [77, 73, 83, 83, 73, 79, 78, 9, 83, 85, 67, 67, 69, 83, 83];
/// "MISSION FAILED"
pub static FAILURE_MESSAGE: [u32; 14] = [77, 73, 83, 83, 73, 79, 78, 9, 70, 65, 73, 76, 69, 68];

pub const TEXT_ORIGIN: Vec3 = Vec3::new(-3.5, 0.0, 0.0);
pub const TEXT_ADVANCE: f32 = 0.5;
pub const GLYPH_SIZE: f32 = 0.3;
/// The font atlas is a 16x16 grid of glyphs.
pub const FONT_GRID: u32 = 16;

/// Texture handles for everything the level draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTextures {
    pub font: TextureId,
    pub player: TextureId,
    pub platform: TextureId,
    pub target: TextureId,
}

/// Asset file names, relative to the asset directory.
pub const FONT_FILE: &str = "font1.png";
pub const PLAYER_FILE: &str = "rocket.png";
pub const PLATFORM_FILE: &str = "platformPack_tile016.png";
pub const TARGET_FILE: &str = "platformPack_tile042.png";
