//! Player intent derived from the current keyboard state.

use glam::Vec3;

use crate::{entity::Entity, level};

/// The keys the game cares about, as held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub quit: bool,
    pub left: bool,
    pub right: bool,
}

impl Entity {
    /// Re-derives movement from the held keys. Movement is cleared every frame;
    /// acceleration keeps the last thrust direction after the key is released.
    pub fn apply_input(&mut self, input: &InputState) {
        self.movement = Vec3::ZERO;

        if input.left {
            self.movement.x = -1.0;
            self.acceleration = Vec3::new(-level::LATERAL_THRUST, level::GRAVITY.y, 0.0);
        } else if input.right {
            self.movement.x = 1.0;
            self.acceleration = Vec3::new(level::LATERAL_THRUST, level::GRAVITY.y, 0.0);
        }

        if self.movement.length() > 1.0 {
            self.movement = self.movement.normalize();
            self.acceleration = self.acceleration.normalize();
        }
    }
}
