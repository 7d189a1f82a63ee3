//! Directory client capability contract
//!
//! The engine consumes the identity directory only through this trait: list
//! an application's credentials, create one with a chosen expiry, delete one
//! by key identifier. Transport, SDK, and auth are the implementor's concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::{Application, DirectoryError, SecretString};

/// The result of a successful create/rotate call
///
/// The plaintext value is visible only here; the directory never returns it
/// again.
#[derive(Debug)]
pub struct CreatedSecret {
    /// One-time plaintext secret value
    pub value: SecretString,
    /// Expiry granted by the directory
    pub end_time: DateTime<Utc>,
}

/// Capability contract for an identity directory backend
///
/// Implementations must be safe to share across concurrent reconciliation
/// runs; the engine itself issues calls strictly sequentially within one run.
///
/// # Example
///
/// ```rust,ignore
/// use secret_rotation::prelude::*;
///
/// struct GraphDirectory { /* SDK client */ }
///
/// #[async_trait]
/// impl SecretDirectory for GraphDirectory {
///     async fn list_applications(&self) -> Result<Vec<Application>, DirectoryError> {
///         // GET /applications?$select=displayName,id,passwordCredentials
///         # unimplemented!()
///     }
///
///     async fn recreate_secret(
///         &self,
///         application_id: &str,
///         secret_name: &str,
///         expires_in_days: i64,
///     ) -> Result<CreatedSecret, DirectoryError> {
///         // POST /applications/{id}/addPassword
///         # unimplemented!()
///     }
///
///     async fn delete_secret(
///         &self,
///         application_id: &str,
///         key_id: uuid::Uuid,
///     ) -> Result<(), DirectoryError> {
///         // POST /applications/{id}/removePassword
///         # unimplemented!()
///     }
/// }
/// ```
#[async_trait]
pub trait SecretDirectory: Send + Sync {
    /// List every application together with its credential entries
    ///
    /// Duplicate and historical entries for the same logical name may be
    /// present; the engine normalizes them.
    async fn list_applications(&self) -> Result<Vec<Application>, DirectoryError>;

    /// Create a new credential entry named `secret_name` on the application,
    /// valid for `expires_in_days` from now
    ///
    /// Used both for rotation (a fresh generation next to the old entry) and
    /// for first-time creation.
    async fn recreate_secret(
        &self,
        application_id: &str,
        secret_name: &str,
        expires_in_days: i64,
    ) -> Result<CreatedSecret, DirectoryError>;

    /// Delete one physical credential entry by its key identifier
    async fn delete_secret(&self, application_id: &str, key_id: Uuid)
    -> Result<(), DirectoryError>;
}
