//! Shared test double: an in-memory, call-recording directory.
#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use secret_rotation::prelude::*;
use uuid::Uuid;

/// One recorded directory write, in issue order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    Recreate {
        application_id: String,
        secret_name: String,
    },
    Delete {
        application_id: String,
        key_id: Uuid,
    },
}

/// In-memory directory that applies writes to its own state, so back-to-back
/// runs observe the credentials the previous run issued.
pub struct FakeDirectory {
    state: Mutex<Vec<Application>>,
    calls: Mutex<Vec<DirectoryCall>>,
    fail_listing: bool,
    fail_on_secret: Mutex<Option<String>>,
}

impl FakeDirectory {
    pub fn new(state: Vec<Application>) -> Self {
        Self {
            state: Mutex::new(state),
            calls: Mutex::new(Vec::new()),
            fail_listing: false,
            fail_on_secret: Mutex::new(None),
        }
    }

    /// The scenario seed: duplicate generations, an application without
    /// credentials, and a mix of expiring and fresh secrets.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let existing = |name: &str, started_days_ago: i64, expires_in_days: i64| {
            Secret::existing(
                name,
                Uuid::new_v4(),
                now - Duration::days(started_days_ago),
                now + Duration::days(expires_in_days),
            )
        };

        Self::new(vec![
            Application::new("app-without-secrets", "id-empty", vec![]),
            Application::new(
                "payments-api",
                "id-payments",
                vec![
                    existing("api-key", 10, 180),
                    existing("api-key", 1, 190),
                    existing("db-password", 30, 10),
                    existing("db-password", 5, 10),
                    existing("signing-key", 30, 10),
                ],
            ),
            Application::new(
                "reporting-api",
                "id-reporting",
                vec![
                    existing("db-password", 10, 180),
                    existing("cache-key", 10, 180),
                    existing("webhook-token", 10, 10),
                ],
            ),
        ])
    }

    pub fn with_listing_failure(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Fail the create call for one secret name, leaving earlier writes of
    /// the same run in place.
    pub fn failing_on(self, secret_name: &str) -> Self {
        *self.fail_on_secret.lock() = Some(secret_name.to_string());
        self
    }

    /// Let subsequent writes succeed again (retry-after-partial-failure tests)
    pub fn clear_write_failure(&self) {
        *self.fail_on_secret.lock() = None;
    }

    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().clone()
    }

    pub fn recreated(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DirectoryCall::Recreate {
                    application_id,
                    secret_name,
                } => Some((application_id, secret_name)),
                DirectoryCall::Delete { .. } => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<(String, Uuid)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DirectoryCall::Delete {
                    application_id,
                    key_id,
                } => Some((application_id, key_id)),
                DirectoryCall::Recreate { .. } => None,
            })
            .collect()
    }

    /// Key id of the live (latest start) generation of a secret
    pub fn live_key_id(&self, application_id: &str, secret_name: &str) -> Uuid {
        let state = self.state.lock();
        state
            .iter()
            .find(|app| app.id == application_id)
            .and_then(|app| {
                app.secrets
                    .iter()
                    .filter(|s| s.display_name == secret_name)
                    .max_by_key(|s| s.start_time)
            })
            .map(|s| s.key_id)
            .expect("secret not seeded")
    }
}

#[async_trait]
impl SecretDirectory for FakeDirectory {
    async fn list_applications(&self) -> Result<Vec<Application>, DirectoryError> {
        if self.fail_listing {
            return Err(DirectoryError::Unavailable {
                reason: "listing disabled by test".into(),
            });
        }
        Ok(self.state.lock().clone())
    }

    async fn recreate_secret(
        &self,
        application_id: &str,
        secret_name: &str,
        expires_in_days: i64,
    ) -> Result<CreatedSecret, DirectoryError> {
        self.calls.lock().push(DirectoryCall::Recreate {
            application_id: application_id.to_string(),
            secret_name: secret_name.to_string(),
        });

        if self.fail_on_secret.lock().as_deref() == Some(secret_name) {
            return Err(DirectoryError::WriteFailed {
                application_id: application_id.to_string(),
                reason: "write disabled by test".into(),
            });
        }

        let now = Utc::now();
        let end_time = now + Duration::days(expires_in_days);
        let fresh = Secret::existing(secret_name, Uuid::new_v4(), now, end_time);

        let mut state = self.state.lock();
        let app = state
            .iter_mut()
            .find(|app| app.id == application_id)
            .ok_or_else(|| DirectoryError::WriteFailed {
                application_id: application_id.to_string(),
                reason: "unknown application".into(),
            })?;
        app.secrets.push(fresh);

        Ok(CreatedSecret {
            value: SecretString::new(format!("{secret_name}-value")),
            end_time,
        })
    }

    async fn delete_secret(
        &self,
        application_id: &str,
        key_id: Uuid,
    ) -> Result<(), DirectoryError> {
        self.calls.lock().push(DirectoryCall::Delete {
            application_id: application_id.to_string(),
            key_id,
        });

        let mut state = self.state.lock();
        if let Some(app) = state.iter_mut().find(|app| app.id == application_id) {
            app.secrets.retain(|s| s.key_id != key_id);
        }
        Ok(())
    }
}

/// Handler wired to a single-tenant registry over the given fake
pub fn handler_over(directory: &Arc<FakeDirectory>) -> RotationHandler {
    let directory = Arc::clone(directory);
    RotationHandler::new(Arc::new(RotatorRegistry::new(move |_tenant| {
        Arc::clone(&directory) as Arc<dyn SecretDirectory>
    })))
}
