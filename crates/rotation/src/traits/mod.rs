//! Capability traits consumed by the engine

mod directory;

pub use directory::{CreatedSecret, SecretDirectory};
