//! The game state and its rules.
//!
//! [`GameState`] owns every entity of the level. The client threads one
//! instance through the three phases of a frame: [`GameState::apply_input`],
//! [`GameState::step`] (driven by [`crate::FixedTimestep`]) and
//! [`GameState::render`].

use crate::{
    entity::{Entity, EntityError},
    input::InputState,
    level::{self, LevelTextures},
    render::SpriteRenderer,
    timestep::StepControl,
};

/// How the run is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    /// The rocket touched down on the target.
    Success,
    /// The rocket hit a platform.
    Failure,
}

pub struct GameState {
    pub player: Entity,
    pub platforms: Vec<Entity>,
    pub target: Entity,
    pub success_text: Vec<Entity>,
    pub failure_text: Vec<Entity>,
    outcome: Outcome,
}

impl GameState {
    /// Builds the level. All text starts hidden.
    pub fn new(textures: &LevelTextures) -> Result<Self, EntityError> {
        let player = Entity::new(textures.player, level::PLAYER_START)
            .with_size(level::PLAYER_SIZE, level::PLAYER_SIZE)
            .with_speed(level::PLAYER_SPEED)
            .with_acceleration(level::GRAVITY);

        let platforms: Vec<Entity> = level::PLATFORM_POSITIONS
            .iter()
            .map(|&position| Entity::new(textures.platform, position))
            .collect();

        let target = Entity::new(textures.target, level::TARGET_POSITION);

        let success_text = text_row(textures, &level::SUCCESS_MESSAGE)?;
        let failure_text = text_row(textures, &level::FAILURE_MESSAGE)?;

        let mut state = Self {
            player,
            platforms,
            target,
            success_text,
            failure_text,
            outcome: Outcome::Playing,
        };

        for entity in state
            .platforms
            .iter_mut()
            .chain(state.success_text.iter_mut())
            .chain(state.failure_text.iter_mut())
            .chain(std::iter::once(&mut state.target))
        {
            entity.update(0.0, &[]);
        }

        log::debug!(
            "Level built: {} platforms, {} + {} glyphs",
            state.platforms.len(),
            state.success_text.len(),
            state.failure_text.len()
        );
        Ok(state)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Once finished the player is never updated again.
    pub fn finished(&self) -> bool {
        self.outcome != Outcome::Playing
    }

    pub fn apply_input(&mut self, input: &InputState) {
        if self.finished() {
            return;
        }
        self.player.apply_input(input);
    }

    /// Runs one fixed simulation step.
    ///
    /// The player is first moved against the target: landing on it wins.
    /// Otherwise it is moved against the platforms, and touching one from
    /// above or from the side loses. Either result halts the frame.
    pub fn step(&mut self, dt: f32) -> StepControl {
        if self.finished() {
            return StepControl::Continue;
        }

        let collisions = self.player.update(dt, std::slice::from_ref(&self.target));
        if collisions.bottom {
            finish(&mut self.player, &mut self.success_text);
            self.outcome = Outcome::Success;
            log::info!(
                "Mission success at ({:.3}, {:.3})",
                self.player.position.x,
                self.player.position.y
            );
            return StepControl::Halt;
        }

        let collisions = self.player.update(dt, &self.platforms);
        if collisions.bottom || collisions.left || collisions.right {
            finish(&mut self.player, &mut self.failure_text);
            self.outcome = Outcome::Failure;
            log::info!(
                "Mission failed at ({:.3}, {:.3})",
                self.player.position.x,
                self.player.position.y
            );
            return StepControl::Halt;
        }

        StepControl::Continue
    }

    /// Clears the frame and draws platforms, success text, failure text,
    /// player and target, in that order.
    pub fn render<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear();
        for platform in &self.platforms {
            platform.render(renderer);
        }
        for glyph in &self.success_text {
            glyph.render(renderer);
        }
        for glyph in &self.failure_text {
            glyph.render(renderer);
        }
        self.player.render(renderer);
        self.target.render(renderer);
    }
}

/// Freezes the player and shows the given text row.
fn finish(player: &mut Entity, text: &mut [Entity]) {
    for glyph in text.iter_mut() {
        glyph.is_active = true;
        glyph.update(0.0, &[]);
    }
    player.is_active = false;
}

fn text_row(textures: &LevelTextures, message: &'static [u32]) -> Result<Vec<Entity>, EntityError> {
    (0..message.len())
        .map(|index| {
            let mut position = level::TEXT_ORIGIN;
            position.x += index as f32 * level::TEXT_ADVANCE;
            Entity::glyph(
                textures.font,
                position,
                message,
                index,
                level::FONT_GRID,
                level::FONT_GRID,
            )
            .map(|glyph| {
                glyph
                    .with_size(level::GLYPH_SIZE, level::GLYPH_SIZE)
                    .inactive()
            })
        })
        .collect()
}
