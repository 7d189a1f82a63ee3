//! Secret Rotation - declarative credential reconciliation
//!
//! Reconciles a desired set of application secrets against the credentials an
//! identity directory actually holds, rotating or creating them as needed.
//!
//! # Features
//!
//! - **Idempotent reconciliation** - re-running after a partial failure only
//!   touches what is still expiring
//! - **Pure planning pipeline** - dedup, expiry classification and planning
//!   are pure functions over immutable snapshots
//! - **One-time secret capture** - plaintext values surface exactly once,
//!   wrapped in a zeroizing [`SecretString`]
//! - **Per-tenant engine instances** - atomic get-or-create keyed by tenant
//! - **Pluggable directory backends** - a three-operation capability trait
#![warn(missing_docs)]
#![deny(unsafe_code)]
#![forbid(unsafe_code)]

/// Core types, errors, and primitives
pub mod core;
/// Request orchestration - the Preview / CreateOrUpdate entry points
pub mod handler;
/// Per-tenant rotator registry
pub mod registry;
/// Flattened rotation reporting
pub mod report;
/// The reconciliation and rotation engine
pub mod rotator;
/// Capability traits consumed by the engine
pub mod traits;

// ── Root re-exports ─────────────────────────────────────────────────────────
// Commonly-used types available directly as `secret_rotation::TypeName`.

pub use crate::core::{
    Application, DirectoryError, RotationError, RotationRequest, RotationResult, Secret,
    SecretString,
};
pub use crate::handler::{RotationHandler, RotationProperties};
pub use crate::registry::RotatorRegistry;
pub use crate::report::{NO_SECRET_CHANGED, RotationRecord};
pub use crate::rotator::SecretRotator;
pub use crate::traits::{CreatedSecret, SecretDirectory};

/// Commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        Application, DirectoryError, RotationError, RotationRequest, RotationResult, Secret,
        SecretString,
    };
    pub use crate::handler::{RotationHandler, RotationProperties};
    pub use crate::registry::RotatorRegistry;
    pub use crate::report::{NO_SECRET_CHANGED, RotationRecord};
    pub use crate::rotator::SecretRotator;
    pub use crate::traits::{CreatedSecret, SecretDirectory};
    pub use async_trait::async_trait;
    pub use tokio_util::sync::CancellationToken;
}

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
