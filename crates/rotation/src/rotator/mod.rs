//! The reconciliation and rotation engine
//!
//! [`SecretRotator`] drives one reconciliation run: fetch directory state,
//! normalize it, plan the writes, execute them strictly sequentially, and
//! merge the outcome back into the per-application credential lists. One
//! instance exists per tenant (see [`RotatorRegistry`]) and captures the
//! tenant's rotation threshold for its lifetime; beyond that it holds no
//! mutable state, so concurrent runs may interleave freely.
//!
//! [`RotatorRegistry`]: crate::registry::RotatorRegistry

mod normalize;
mod plan;

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::{Application, RotationError, RotationRequest, RotationResult};
use crate::traits::SecretDirectory;

use normalize::normalize;
use plan::plan_rotation;

/// Reconciles desired secrets against the directory for one tenant
pub struct SecretRotator {
    directory: Arc<dyn SecretDirectory>,
    rotate_within_days: i64,
}

impl SecretRotator {
    /// Create a rotator bound to a directory client and rotation threshold
    pub fn new(directory: Arc<dyn SecretDirectory>, rotate_within_days: i64) -> Self {
        Self {
            directory,
            rotate_within_days,
        }
    }

    /// The rotation threshold captured at construction, in days
    pub fn rotate_within_days(&self) -> i64 {
        self.rotate_within_days
    }

    /// Fetch and normalize current directory state
    ///
    /// One listing call, no writes. Applications without credentials are
    /// dropped, duplicate generations collapse to the latest `start_time`,
    /// and every survivor carries a fresh expiry classification.
    pub async fn normalized_state(&self) -> RotationResult<Vec<Application>> {
        let listed = self.directory.list_applications().await?;
        Ok(normalize(listed, self.rotate_within_days, Utc::now()))
    }

    /// Run one reconciliation pass: fetch, plan, execute, merge
    ///
    /// Writes are issued application-by-application, secret-by-secret, in
    /// normalized-state order. The first directory failure aborts the
    /// remainder and propagates; completed writes stay in place. A re-run
    /// skips them because freshly rotated secrets are no longer expiring
    /// soon.
    pub async fn rotate_expiring(
        &self,
        requests: &[RotationRequest],
        expires_in_days: i64,
        delete_after_renew: bool,
        cancel: &CancellationToken,
    ) -> RotationResult<Vec<Application>> {
        info!(
            rotate_within_days = self.rotate_within_days,
            "Starting rotation of secrets expiring within threshold"
        );

        let normalized = self.normalized_state().await?;
        info!(
            applications = normalized.len(),
            "Found applications with secrets"
        );

        let planned = plan_rotation(&normalized, requests, Utc::now());
        let rotated = self
            .execute(planned, expires_in_days, delete_after_renew, cancel)
            .await?;

        Ok(merge(normalized, rotated))
    }

    /// Execute the plan: one create per planned entry, plus the optional
    /// cleanup delete for genuine rotations
    async fn execute(
        &self,
        planned: Vec<Application>,
        expires_in_days: i64,
        delete_after_renew: bool,
        cancel: &CancellationToken,
    ) -> RotationResult<Vec<Application>> {
        let mut rotated = Vec::with_capacity(planned.len());

        for app in planned {
            info!(application = %app.display_name, "Rotating secrets for application");

            let mut secrets = Vec::with_capacity(app.secrets.len());
            for secret in app.secrets {
                if cancel.is_cancelled() {
                    return Err(RotationError::Cancelled {
                        operation: "recreate_secret",
                    });
                }

                let prior_key_id = secret.key_id;
                let was_new = secret.is_new;

                let created = self
                    .directory
                    .recreate_secret(&app.id, &secret.display_name, expires_in_days)
                    .await?;
                let renewed = secret.renewed(created.value, created.end_time);
                info!(
                    application = %app.display_name,
                    secret = %renewed.display_name,
                    expires_on = %renewed.end_time,
                    "Rotated secret"
                );

                // Only a genuine rotation has a superseded physical entry to
                // clean up; fresh creations are never deleted.
                if delete_after_renew && !was_new {
                    if cancel.is_cancelled() {
                        return Err(RotationError::Cancelled {
                            operation: "delete_secret",
                        });
                    }
                    self.directory.delete_secret(&app.id, prior_key_id).await?;
                    info!(
                        application = %app.display_name,
                        secret = %renewed.display_name,
                        "Deleted superseded secret"
                    );
                }

                secrets.push(renewed);
            }

            rotated.push(Application {
                display_name: app.display_name,
                id: app.id,
                secrets,
            });
        }

        Ok(rotated)
    }
}

/// Merge executed plan results back into normalized state
///
/// Rotated entries replace their originals by display name, created entries
/// are appended, and applications outside the plan pass through unchanged.
fn merge(normalized: Vec<Application>, rotated: Vec<Application>) -> Vec<Application> {
    normalized
        .into_iter()
        .map(|app| {
            let Some(changes) = rotated.iter().find(|r| r.id == app.id) else {
                return app;
            };

            let mut secrets: Vec<_> = app
                .secrets
                .iter()
                .map(|secret| {
                    changes
                        .secrets
                        .iter()
                        .find(|c| c.display_name == secret.display_name)
                        .unwrap_or(secret)
                        .clone()
                })
                .collect();
            secrets.extend(changes.secrets.iter().filter(|c| c.is_new).cloned());

            app.with_secrets(secrets)
        })
        .collect()
}
