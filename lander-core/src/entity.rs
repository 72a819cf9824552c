//! Game entities for Rocket Lander.
//!
//! Every object on screen is an [`Entity`]: an axis-aligned rectangle with
//! simple kinematics that can collide against a list of other entities and draw
//! itself as a textured quad. Text is made of glyph entities, one character
//! cell of a fixed message each.

use glam::{Mat4, Vec2, Vec3};

use crate::render::SpriteRenderer;

/// Overlap on the cross axis below this is resting contact left over from a
/// previous correction, not a hit. A box skipped this way by the vertical pass
/// is always resolved by the horizontal one.
const CONTACT_SKIN: f32 = 1e-4;

/// An opaque handle to a texture owned by the graphics layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("glyph index {index} is out of range for a message of {len} glyphs")]
    GlyphOutOfRange { index: usize, len: usize },
}

/// What an entity draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A single quad showing the whole texture.
    Sprite,
    /// Character `message[index]` of a font atlas message.
    Glyph {
        message: &'static [u32],
        index: usize,
    },
}

/// The sides an entity touched during one [`Entity::update`] call.
///
/// This is returned by value so flags can never leak from one step into the
/// next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Collisions {
    /// Returns `true` if any side was touched.
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }

    /// Returns `true` if no side was touched.
    pub fn is_empty(&self) -> bool {
        !self.any()
    }
}

/// An axis-aligned bounding box stored as center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// How far the boxes overlap on each axis. Only meaningful when
    /// [`Aabb::overlaps`] is true.
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        (self.half + other.half) - (self.center - other.center).abs()
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub position: Vec3,
    pub movement: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub texture: TextureId,
    pub anim_cols: u32,
    pub anim_rows: u32,
    pub is_active: bool,
    pub kind: EntityKind,
    model: Mat4,
}

impl Entity {
    /// Creates an active 1x1 sprite at rest.
    pub fn new(texture: TextureId, position: Vec3) -> Self {
        let mut entity = Self {
            position,
            movement: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            speed: 0.0,
            width: 1.0,
            height: 1.0,
            texture,
            anim_cols: 1,
            anim_rows: 1,
            is_active: true,
            kind: EntityKind::Sprite,
            model: Mat4::IDENTITY,
        };
        entity.refresh_model();
        entity
    }

    /// Creates a glyph entity showing `message[index]` from a `cols x rows`
    /// font atlas.
    pub fn glyph(
        texture: TextureId,
        position: Vec3,
        message: &'static [u32],
        index: usize,
        cols: u32,
        rows: u32,
    ) -> Result<Self, EntityError> {
        if index >= message.len() {
            return Err(EntityError::GlyphOutOfRange {
                index,
                len: message.len(),
            });
        }
        let mut entity = Self::new(texture, position);
        entity.kind = EntityKind::Glyph { message, index };
        entity.anim_cols = cols.max(1);
        entity.anim_rows = rows.max(1);
        Ok(entity)
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self.refresh_model();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The model transform used for drawing, as of the last update.
    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.position.truncate(),
            Vec2::new(self.width / 2.0, self.height / 2.0),
        )
    }

    /// Inactive entities never collide.
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.is_active && other.is_active && self.aabb().overlaps(&other.aabb())
    }

    /// Advances the entity by `dt` seconds and resolves collisions against
    /// `others`, returning the sides that were touched.
    ///
    /// The vertical axis is integrated and resolved first, then the horizontal
    /// one. Overlaps are corrected in list order and each correction applies
    /// immediately, so a later entity in `others` is tested against the
    /// already corrected position.
    ///
    /// With `dt == 0` nothing moves: overlaps are only reported and the model
    /// transform is refreshed.
    pub fn update(&mut self, dt: f32, others: &[Entity]) -> Collisions {
        let mut collisions = Collisions::default();
        if !self.is_active {
            return collisions;
        }

        if dt > 0.0 {
            self.velocity.x = self.movement.x * self.speed;
            self.velocity += self.acceleration * dt;

            self.position.y += self.velocity.y * dt;
            let deferred = self.resolve_vertical(others, &mut collisions);

            self.position.x += self.velocity.x * dt;
            self.resolve_horizontal(others, &deferred, &mut collisions);
        } else {
            self.detect(others, &mut collisions);
        }

        self.refresh_model();
        collisions
    }

    /// Returns the indices of overlapping boxes left to the horizontal pass.
    fn resolve_vertical(&mut self, others: &[Entity], collisions: &mut Collisions) -> Vec<usize> {
        let mut deferred = Vec::new();
        for (index, other) in others.iter().enumerate() {
            if !self.collides_with(other) {
                continue;
            }
            let penetration = self.aabb().penetration(&other.aabb());
            if penetration.x < CONTACT_SKIN {
                deferred.push(index);
                continue;
            }
            let penetration = penetration.y;
            if other.position.y < self.position.y {
                self.position.y += penetration;
                collisions.bottom = true;
            } else {
                self.position.y -= penetration;
                collisions.top = true;
            }
            self.velocity.y = 0.0;
        }
        deferred
    }

    fn resolve_horizontal(
        &mut self,
        others: &[Entity],
        deferred: &[usize],
        collisions: &mut Collisions,
    ) {
        for (index, other) in others.iter().enumerate() {
            if !self.collides_with(other) {
                continue;
            }
            let penetration = self.aabb().penetration(&other.aabb());
            if penetration.y < CONTACT_SKIN && !deferred.contains(&index) {
                continue;
            }
            let penetration = penetration.x;
            if other.position.x < self.position.x {
                self.position.x += penetration;
                collisions.left = true;
            } else {
                self.position.x -= penetration;
                collisions.right = true;
            }
            self.velocity.x = 0.0;
            self.movement.x = 0.0;
        }
    }

    // Flags every overlapping side without moving anything. A box is tagged on
    // the axis where it penetrates least.
    fn detect(&self, others: &[Entity], collisions: &mut Collisions) {
        for other in others {
            if !self.collides_with(other) {
                continue;
            }
            let penetration = self.aabb().penetration(&other.aabb());
            if penetration.y <= penetration.x {
                if other.position.y < self.position.y {
                    collisions.bottom = true;
                } else {
                    collisions.top = true;
                }
            } else if other.position.x < self.position.x {
                collisions.left = true;
            } else {
                collisions.right = true;
            }
        }
    }

    fn refresh_model(&mut self) {
        self.model = Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::new(self.width, self.height, 1.0));
    }

    /// The texture sub-rectangle to sample, as `[min, max]` with `v` growing
    /// downwards from the top row of the image.
    pub fn uv_rect(&self) -> [Vec2; 2] {
        match self.kind {
            EntityKind::Sprite => [Vec2::ZERO, Vec2::ONE],
            EntityKind::Glyph { message, index } => {
                let glyph = message[index];
                let cols = self.anim_cols.max(1);
                let rows = self.anim_rows.max(1);
                let size = Vec2::new(1.0 / cols as f32, 1.0 / rows as f32);
                let min = Vec2::new((glyph % cols) as f32, (glyph / cols) as f32) * size;
                [min, min + size]
            }
        }
    }

    /// Draws the entity. Inactive entities draw nothing.
    pub fn render<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R) {
        if !self.is_active {
            return;
        }
        renderer.draw_sprite(self.model, self.texture, self.uv_rect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn block(x: f32, y: f32) -> Entity {
        Entity::new(TextureId(1), Vec3::new(x, y, 0.0))
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(0.5));
        assert!(a.overlaps(&Aabb::new(Vec2::new(0.99, 0.0), Vec2::splat(0.5))));
        assert!(a.overlaps(&Aabb::new(Vec2::new(-0.5, 0.5), Vec2::splat(0.5))));
        // Touching edges.
        assert!(!a.overlaps(&Aabb::new(Vec2::new(1.0, 0.0), Vec2::splat(0.5))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.0, -1.0), Vec2::splat(0.5))));
        // Overlapping on one axis only.
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.2, 3.0), Vec2::splat(0.5))));
    }

    #[test]
    fn test_aabb_overlap_uses_both_half_extents() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(0.4, 0.4));
        let b = Aabb::new(Vec2::new(0.85, 0.0), Vec2::new(0.5, 0.5));
        assert!(a.overlaps(&b));
        let c = Aabb::new(Vec2::new(0.95, 0.0), Vec2::new(0.5, 0.5));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_falling_onto_platform_sets_bottom() {
        let platform = block(0.0, 0.0);
        let mut player = block(0.0, 0.91).with_size(0.8, 0.8);
        player.velocity = Vec3::new(0.0, -1.0, 0.0);

        let collisions = player.update(STEP, std::slice::from_ref(&platform));
        assert!(collisions.bottom);
        assert!(!collisions.top);
        assert_eq!(player.velocity.y, 0.0);
        assert!((player.position.y - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_hitting_ceiling_sets_top() {
        let ceiling = block(0.0, 1.0);
        let mut player = block(0.0, 0.05);
        player.velocity = Vec3::new(0.0, 2.0, 0.0);

        let collisions = player.update(STEP, std::slice::from_ref(&ceiling));
        assert!(collisions.top);
        assert!(!collisions.bottom);
        assert_eq!(player.velocity.y, 0.0);
        assert!((player.position.y - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_side_contact_sets_left_and_right() {
        let wall = block(1.0, 0.0);
        let mut player = block(0.0, 0.0).with_speed(3.0);
        player.movement = Vec3::X;

        let collisions = player.update(STEP, std::slice::from_ref(&wall));
        assert!(collisions.right);
        assert!(!collisions.left);
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.movement.x, 0.0);
        assert!((player.position.x - 0.0).abs() < 1e-5);

        let wall = block(-1.0, 0.0);
        let mut player = block(0.0, 0.0).with_speed(3.0);
        player.movement = Vec3::NEG_X;
        let collisions = player.update(STEP, std::slice::from_ref(&wall));
        assert!(collisions.left);
        assert!(!collisions.right);
    }

    #[test]
    fn test_corner_sliver_is_still_resolved() {
        let corner = block(0.0, 0.0);
        let mut player = block(0.99995, 0.99995);
        assert!(player.aabb().overlaps(&corner.aabb()));

        let collisions = player.update(STEP, std::slice::from_ref(&corner));
        assert!(collisions.any());
        assert!(collisions.left);
        assert!(!player.aabb().overlaps(&corner.aabb()));
    }

    #[test]
    fn test_resting_contact_is_not_a_side_hit() {
        // The second floor tile sits a hair higher than the first, so after
        // landing on the first one the player grazes the second from the side.
        let floor = [block(0.0, 0.0), block(1.0, 0.00005)];
        let mut player = block(0.099, 0.9 - 0.00002)
            .with_size(0.8, 0.8)
            .with_speed(1.0);
        player.movement = Vec3::X;

        let collisions = player.update(STEP, &floor);
        assert!(collisions.bottom);
        assert!(!collisions.left && !collisions.right);
        assert_eq!(player.movement, Vec3::X);
        assert!((player.position.x - (0.099 + STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_sliver_beside_a_wall_is_resolved_sideways() {
        let wall = block(1.0, 0.0);
        let mut player = block(0.000001, 0.0);
        player.velocity = Vec3::new(0.0, -1.0, 0.0);

        let collisions = player.update(STEP, std::slice::from_ref(&wall));
        assert!(collisions.right);
        assert!(!collisions.top && !collisions.bottom);
        assert_eq!(player.velocity.y, -1.0);
        assert!((player.position.y + STEP).abs() < 1e-6);
        assert!(player.position.x.abs() < 1e-6);
    }

    #[test]
    fn test_flags_reset_every_update() {
        let platform = block(0.0, 0.0);
        let mut player = block(0.0, 0.99);
        player.velocity = Vec3::new(0.0, -1.0, 0.0);
        assert!(player.update(STEP, std::slice::from_ref(&platform)).bottom);

        player.position.y = 5.0;
        assert!(player.update(STEP, std::slice::from_ref(&platform)).is_empty());
    }

    #[test]
    fn test_zero_delta_never_moves() {
        let platform = block(0.0, 0.0);
        let mut player = block(0.2, 0.5)
            .with_speed(1.5)
            .with_acceleration(Vec3::new(0.25, -0.25, 0.0));
        player.movement = Vec3::X;
        player.velocity = Vec3::new(0.3, -0.7, 0.0);
        let (position, velocity) = (player.position, player.velocity);

        let collisions = player.update(0.0, std::slice::from_ref(&platform));
        assert_eq!(player.position, position);
        assert_eq!(player.velocity, velocity);
        assert!(collisions.bottom);

        assert!(player.update(0.0, &[]).is_empty());
        assert_eq!(player.position, position);
        assert_eq!(player.velocity, velocity);
    }

    #[test]
    fn test_inactive_entities_are_inert() {
        let platform = block(0.0, 0.0);
        let mut player = block(0.0, 0.95).inactive();
        player.velocity = Vec3::new(0.0, -1.0, 0.0);
        let before = player.position;
        assert!(player.update(STEP, std::slice::from_ref(&platform)).is_empty());
        assert_eq!(player.position, before);

        let ghost = block(0.0, 0.0).inactive();
        let mut player = block(0.0, 0.95);
        player.velocity = Vec3::new(0.0, -1.0, 0.0);
        assert!(player.update(STEP, std::slice::from_ref(&ghost)).is_empty());
    }

    #[test]
    fn test_others_are_not_mutated() {
        let others = vec![block(0.0, 0.0), block(1.0, 0.0)];
        let snapshot: Vec<Vec3> = others.iter().map(|e| e.position).collect();
        let mut player = block(0.5, 0.95);
        player.velocity = Vec3::new(0.0, -1.0, 0.0);
        player.update(STEP, &others);
        let after: Vec<Vec3> = others.iter().map(|e| e.position).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_corrections_apply_immediately() {
        // Two stacked floor tiles; the first pushes the player up out of both.
        let others = vec![block(0.0, 0.0), block(0.0, -0.5)];
        let mut player = block(0.0, 0.8);
        player.velocity = Vec3::new(0.0, -1.0, 0.0);
        let collisions = player.update(STEP, &others);
        assert!(collisions.bottom);
        assert!((player.position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_glyph_index_must_be_in_range() {
        static MESSAGE: [u32; 3] = [65, 66, 67];
        assert!(Entity::glyph(TextureId(0), Vec3::ZERO, &MESSAGE, 2, 16, 16).is_ok());
        assert_eq!(
            Entity::glyph(TextureId(0), Vec3::ZERO, &MESSAGE, 3, 16, 16).unwrap_err(),
            EntityError::GlyphOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_glyph_uv_selects_atlas_cell() {
        static MESSAGE: [u32; 2] = [77, 9];
        let m = Entity::glyph(TextureId(0), Vec3::ZERO, &MESSAGE, 0, 16, 16).unwrap();
        let [min, max] = m.uv_rect();
        assert_eq!(min, Vec2::new(13.0 / 16.0, 4.0 / 16.0));
        assert_eq!(max, Vec2::new(14.0 / 16.0, 5.0 / 16.0));

        let blank = Entity::glyph(TextureId(0), Vec3::ZERO, &MESSAGE, 1, 16, 16).unwrap();
        assert_eq!(blank.uv_rect()[0], Vec2::new(9.0 / 16.0, 0.0));

        assert_eq!(block(0.0, 0.0).uv_rect(), [Vec2::ZERO, Vec2::ONE]);
    }

    #[test]
    fn test_model_tracks_position_and_size() {
        let mut e = block(1.0, 2.0).with_size(0.5, 0.25);
        let corner = e.model().transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!((corner - Vec3::new(1.25, 2.125, 0.0)).length() < 1e-6);

        e.velocity = Vec3::new(0.0, -6.0, 0.0);
        e.update(0.5, &[]);
        let center = e.model().transform_point3(Vec3::ZERO);
        assert!((center - e.position).length() < 1e-6);
    }
}
