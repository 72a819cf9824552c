//! OpenGL backend for [`lander_core::SpriteRenderer`].
//!
//! Every entity is drawn with the same unit quad; the model matrix places and
//! scales it and a `vec4` uniform picks the sub-rectangle of the texture.

use std::{path::Path, sync::Arc};

use glam::{Mat4, Vec2, Vec4};
use glow::HasContext;
use lander_core::{SpriteRenderer, TextureId};

use crate::{
    abs::{Mesh, ShaderProgram, Texture, Vertex},
    error::ClientError,
};

/// Half extents of the visible world.
pub const VIEW_HALF_WIDTH: f32 = 5.0;
pub const VIEW_HALF_HEIGHT: f32 = 3.75;

const CLEAR_COLOR: Vec4 = Vec4::new(0.2, 0.2, 0.2, 1.0);

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteVertex {
    pub position: Vec2,
    pub uv: Vec2,
}

impl Vertex for SpriteVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<SpriteVertex>() as i32;
            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            // UV attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                stride,
                std::mem::size_of::<Vec2>() as i32,
            );
        }
    }
}

/// The unit quad, counter-clockwise from the top left. `uv` runs from `(0, 0)`
/// at the top left to `(1, 1)` at the bottom right.
pub fn unit_quad() -> ([SpriteVertex; 4], [u32; 6]) {
    let vertex = |x: f32, y: f32, u: f32, v: f32| SpriteVertex {
        position: Vec2::new(x, y),
        uv: Vec2::new(u, v),
    };
    (
        [
            vertex(-0.5, 0.5, 0.0, 0.0),
            vertex(-0.5, -0.5, 0.0, 1.0),
            vertex(0.5, -0.5, 1.0, 1.0),
            vertex(0.5, 0.5, 1.0, 0.0),
        ],
        [0, 1, 2, 0, 2, 3],
    )
}

/// Packs `[min, max]` into the `u_uv_rect` layout.
pub fn pack_uv_rect([min, max]: [Vec2; 2]) -> Vec4 {
    Vec4::new(min.x, min.y, max.x, max.y)
}

/// Owns every texture the game uses and hands out [`TextureId`]s for them.
#[derive(Default)]
pub struct TextureTable {
    textures: Vec<Texture>,
}

impl TextureTable {
    pub fn insert(&mut self, texture: Texture) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() as u32 - 1)
    }

    pub fn load(&mut self, gl: &Arc<glow::Context>, path: &Path) -> Result<TextureId, ClientError> {
        Ok(self.insert(Texture::load(gl, path)?))
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0 as usize)
    }
}

pub struct GlSpriteRenderer {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    quad: Mesh,
    pub textures: TextureTable,
    pub projection: Mat4,
    pub view: Mat4,
}

impl GlSpriteRenderer {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, ClientError> {
        let program = ShaderProgram::from_sources(
            gl,
            include_str!("shaders/sprite/vert.glsl"),
            include_str!("shaders/sprite/frag.glsl"),
        )
        .map_err(ClientError::Shader)?;
        let (vertices, indices) = unit_quad();
        let quad = Mesh::new(gl, &vertices, &indices).map_err(ClientError::Gl)?;

        unsafe {
            gl.clear_color(CLEAR_COLOR.x, CLEAR_COLOR.y, CLEAR_COLOR.z, CLEAR_COLOR.w);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            quad,
            textures: TextureTable::default(),
            projection: Mat4::orthographic_rh_gl(
                -VIEW_HALF_WIDTH,
                VIEW_HALF_WIDTH,
                -VIEW_HALF_HEIGHT,
                VIEW_HALF_HEIGHT,
                -1.0,
                1.0,
            ),
            view: Mat4::IDENTITY,
        })
    }

    /// Loads an image from disk into the texture table.
    pub fn load_texture(&mut self, path: &Path) -> Result<TextureId, ClientError> {
        self.textures.load(&self.gl, path)
    }
}

impl SpriteRenderer for GlSpriteRenderer {
    fn clear(&mut self) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
        self.program.use_program();
        self.program.set_uniform("u_projection", self.projection);
        self.program.set_uniform("u_view", self.view);
        self.program.set_uniform("u_tex", 0);
    }

    fn draw_sprite(&mut self, model: Mat4, texture: TextureId, uv_rect: [Vec2; 2]) {
        let Some(gpu_texture) = self.textures.get(texture) else {
            log::warn!("Skipping sprite with unknown texture {:?}", texture);
            return;
        };
        gpu_texture.bind(0);
        self.program.set_uniform("u_model", model);
        self.program.set_uniform("u_uv_rect", pack_uv_rect(uv_rect));
        self.quad.draw();
    }
}
