//! Core types for secret rotation

mod error;
mod secret_string;
mod types;

pub use error::{DirectoryError, RotationError, RotationResult};
pub use secret_string::SecretString;
pub use types::{Application, RotationRequest, Secret};
