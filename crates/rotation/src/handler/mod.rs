//! Request orchestration
//!
//! [`RotationHandler`] is the boundary between the declarative request shape
//! and the engine's domain types. It exposes the two entry operations:
//! [`preview`](RotationHandler::preview) (side-effect free) and
//! [`create_or_update`](RotationHandler::create_or_update) (the only path
//! that writes to the directory). The surrounding RPC host is expected to
//! deserialize inbound properties into [`RotationProperties`] and serialize
//! the returned value back; both use web-style camelCase JSON.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::core::{RotationRequest, RotationResult};
use crate::registry::RotatorRegistry;
use crate::report::{self, RotationRecord};

fn default_rotate_within_days() -> i64 {
    30
}

fn default_expires_in_days() -> i64 {
    180
}

/// Declarative request properties plus the read-only report output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationProperties {
    /// Tenant / resource identifier
    pub id: String,

    /// Rotate secrets expiring within this many days
    #[serde(default = "default_rotate_within_days")]
    pub rotate_secrets_expiring_within_days: i64,

    /// Validity in days of a newly issued secret
    #[serde(default = "default_expires_in_days")]
    pub expires_in_days: i64,

    /// Desired state: secrets to keep fresh or create
    #[serde(default)]
    pub secrets_to_rotate: Vec<RotationRequest>,

    /// Delete the superseded physical entry after a successful rotation
    #[serde(default)]
    pub delete_after_renew: bool,

    /// Output: flattened report of the run, absent until an operation ran
    /// and found credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps_with_expiring_secrets: Option<Vec<RotationRecord>>,
}

impl RotationProperties {
    /// Properties with default thresholds and no desired state
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rotate_secrets_expiring_within_days: default_rotate_within_days(),
            expires_in_days: default_expires_in_days(),
            secrets_to_rotate: Vec::new(),
            delete_after_renew: false,
            apps_with_expiring_secrets: None,
        }
    }
}

/// The two entry operations over a shared per-tenant registry
pub struct RotationHandler {
    registry: Arc<RotatorRegistry>,
}

impl RotationHandler {
    /// Create a handler over a rotator registry
    pub fn new(registry: Arc<RotatorRegistry>) -> Self {
        Self { registry }
    }

    /// Report what a reconciliation would act on, without mutating anything
    ///
    /// Resolves the tenant's rotator, fetches normalized state, and attaches
    /// the projection when any application has surviving credentials. Never
    /// writes to the directory.
    pub async fn preview(&self, mut props: RotationProperties) -> RotationResult<RotationProperties> {
        let rotator = self
            .registry
            .get_or_create(&props.id, props.rotate_secrets_expiring_within_days);

        let state = rotator.normalized_state().await?;
        if !state.is_empty() {
            props.apps_with_expiring_secrets = Some(report::project(&state));
        }

        Ok(props)
    }

    /// Apply the desired state and report the resulting credentials
    ///
    /// The only operation that writes to the directory. Idempotent under
    /// immediate retry: freshly rotated secrets are no longer expiring soon
    /// and will not be re-planned.
    pub async fn create_or_update(
        &self,
        mut props: RotationProperties,
        cancel: &CancellationToken,
    ) -> RotationResult<RotationProperties> {
        let rotator = self
            .registry
            .get_or_create(&props.id, props.rotate_secrets_expiring_within_days);

        let state = rotator
            .rotate_expiring(
                &props.secrets_to_rotate,
                props.expires_in_days,
                props.delete_after_renew,
                cancel,
            )
            .await?;
        props.apps_with_expiring_secrets = Some(report::project(&state));

        Ok(props)
    }
}
