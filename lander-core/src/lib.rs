//! The core of Rocket Lander. This crate contains the gameplay rules that do not
//! depend on a window or a GPU: entities and their collision handling, the fixed
//! timestep scheduler, the hardcoded level and the game state that ties them
//! together.
//!
//! Drawing goes through the [`render::SpriteRenderer`] trait so the client can
//! plug in its OpenGL backend while tests record draw calls instead.

pub mod entity;
pub mod game;
pub mod input;
pub mod level;
pub mod render;
pub mod timestep;

pub use entity::*;
pub use game::*;
pub use input::*;
pub use render::*;
pub use timestep::*;
