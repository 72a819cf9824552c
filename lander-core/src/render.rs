//! The drawing seam between the game and the graphics backend.

use glam::{Mat4, Vec2};

use crate::entity::TextureId;

/// Something that can draw textured unit quads.
///
/// The quad spans `-0.5..0.5` on both axes in model space; `model` places and
/// scales it. `uv_rect` is `[min, max]` in texture space with `v = 0` at the
/// top row of the image, mapped onto the top edge of the quad.
pub trait SpriteRenderer {
    /// Clears the frame.
    fn clear(&mut self);

    /// Draws one quad.
    fn draw_sprite(&mut self, model: Mat4, texture: TextureId, uv_rect: [Vec2; 2]);
}

impl<R: SpriteRenderer + ?Sized> SpriteRenderer for &mut R {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn draw_sprite(&mut self, model: Mat4, texture: TextureId, uv_rect: [Vec2; 2]) {
        (**self).draw_sprite(model, texture, uv_rect);
    }
}
