//! Flattened rotation reporting
//!
//! Projects the engine's per-application credential lists into a stable
//! list-of-records shape for external reporting. Pure, no I/O, no filtering,
//! no reordering beyond the natural iteration order of the input.

use serde::{Deserialize, Serialize};

use crate::core::Application;

/// Placeholder reported for secrets this run did not touch
pub const NO_SECRET_CHANGED: &str = "No Secret Changed";

const EXPIRES_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the rotation report: an application × secret outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationRecord {
    /// Application holding the secret
    pub application_name: String,
    /// Logical secret name
    pub secret_name: String,
    /// Expiry as a fixed-width UTC timestamp (`YYYY-MM-DD HH:MM:SS`)
    pub expires_on: String,
    /// The real value for rows rotated or created in this run, otherwise
    /// [`NO_SECRET_CHANGED`]
    pub secret_value: String,
    /// Whether the secret was classified as expiring soon
    pub is_expiring_soon: bool,
    /// Whether this run rotated or created the secret
    pub is_renewed: bool,
}

/// Flatten every application × secret pair into one report row
pub fn project(applications: &[Application]) -> Vec<RotationRecord> {
    applications
        .iter()
        .flat_map(|app| {
            app.secrets.iter().map(|secret| RotationRecord {
                application_name: app.display_name.clone(),
                secret_name: secret.display_name.clone(),
                expires_on: secret.end_time.format(EXPIRES_ON_FORMAT).to_string(),
                secret_value: secret
                    .value
                    .as_ref()
                    .map_or_else(|| NO_SECRET_CHANGED.to_string(), |v| {
                        v.expose_secret(str::to_string)
                    }),
                is_expiring_soon: secret.is_expiring_soon,
                is_renewed: secret.is_renewed,
            })
        })
        .collect()
}
