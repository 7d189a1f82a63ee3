//! Directory state snapshots and desired-state types
//!
//! [`Application`] and [`Secret`] are read fresh from the directory on every
//! invocation and advance through the dedup → classify → plan → execute
//! pipeline as immutable snapshots: each stage builds new values through the
//! with-style constructors here, never by mutating in place.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SecretString;

/// One identity-provider application and the credentials it holds
#[derive(Debug, Clone)]
pub struct Application {
    /// Human-readable name; the join key against desired state. The provider
    /// does not guarantee global uniqueness.
    pub display_name: String,
    /// Opaque provider identifier, stable, used for API calls
    pub id: String,
    /// Credentials on this application, in directory listing order
    pub secrets: Vec<Secret>,
}

impl Application {
    /// Create an application snapshot
    pub fn new(display_name: impl Into<String>, id: impl Into<String>, secrets: Vec<Secret>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
            secrets,
        }
    }

    /// Replace the credential list, keeping name and id
    pub fn with_secrets(self, secrets: Vec<Secret>) -> Self {
        Self { secrets, ..self }
    }
}

/// One physical credential entry on an application
///
/// An application may hold several physical entries with the same display
/// name; they represent successive generations of the same logical secret.
/// Normalization keeps only the live generation.
#[derive(Debug, Clone)]
pub struct Secret {
    /// Logical credential name
    pub display_name: String,
    /// Unique identifier of this physical entry; required for deletion.
    /// Nil for pending entries that do not exist in the directory yet.
    pub key_id: Uuid,
    /// Start of the validity window
    pub start_time: DateTime<Utc>,
    /// Expiry of the validity window
    pub end_time: DateTime<Utc>,
    /// Derived: `end_time` falls within the rotation threshold. Never
    /// provider-supplied, always recomputed at evaluation time.
    pub is_expiring_soon: bool,
    /// Derived: this entry was rotated or created by the current run
    pub is_renewed: bool,
    /// Derived: this entry does not exist in the directory yet and must be
    /// created
    pub is_new: bool,
    /// Plaintext value; populated only immediately after creation or
    /// rotation. The directory never returns it again.
    pub value: Option<SecretString>,
}

impl Secret {
    /// A credential as listed by the directory (no derived flags set)
    pub fn existing(
        display_name: impl Into<String>,
        key_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            key_id,
            start_time,
            end_time,
            is_expiring_soon: false,
            is_renewed: false,
            is_new: false,
            value: None,
        }
    }

    /// A placeholder for a requested credential that has no directory entry
    /// yet. Carries a nil key id and a provisional `[now, now]` window until
    /// the create call fills in the real expiry.
    pub fn pending(display_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            display_name: display_name.into(),
            key_id: Uuid::nil(),
            start_time: now,
            end_time: now,
            is_expiring_soon: false,
            is_renewed: false,
            is_new: true,
            value: None,
        }
    }

    /// Recompute the expiry classification against a rotation threshold
    ///
    /// The threshold comes from the untrusted property bag, so the horizon
    /// arithmetic saturates instead of panicking: a threshold too large to
    /// represent classifies everything as expiring, a negative one too large
    /// classifies nothing.
    pub fn with_expiry_classified(self, threshold_days: i64, now: DateTime<Utc>) -> Self {
        let horizon = Duration::try_days(threshold_days)
            .and_then(|threshold| now.checked_add_signed(threshold));
        let is_expiring_soon = match horizon {
            Some(horizon) => self.end_time <= horizon,
            None => threshold_days >= 0,
        };
        Self {
            is_expiring_soon,
            ..self
        }
    }

    /// The snapshot after a successful create/rotate call: new expiry, the
    /// one-time plaintext value, and the renewed marker
    pub fn renewed(self, value: SecretString, end_time: DateTime<Utc>) -> Self {
        Self {
            end_time,
            is_renewed: true,
            value: Some(value),
            ..self
        }
    }
}

/// One entry of desired state: a secret the caller wants kept fresh
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationRequest {
    /// Display name of the application holding the secret
    pub application_name: String,
    /// Logical name of the secret
    pub secret_name: String,
}

impl RotationRequest {
    /// Create a desired-state entry
    pub fn new(application_name: impl Into<String>, secret_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            secret_name: secret_name.into(),
        }
    }
}
