//! Errors that stop the client.

use std::path::PathBuf;

use lander_core::EntityError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error("OpenGL error: {0}")]
    Gl(String),
    #[error("shader error: {0}")]
    Shader(String),
    #[error("unable to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid level: {0}")]
    Level(#[from] EntityError),
    #[error("failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
