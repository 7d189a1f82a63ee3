//! Directory state normalization
//!
//! Raw listings may contain applications without credentials and several
//! physical generations of the same logical secret. Normalization drops the
//! former, keeps only the live generation of the latter, and stamps every
//! surviving entry with its expiry classification.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::core::{Application, Secret};

/// Normalize a raw directory listing
///
/// - applications with zero credentials are dropped
/// - within an application, entries sharing a display name collapse to the
///   one with the latest `start_time`; on an exact tie the entry the
///   directory listed later wins (a later listing position is treated as the
///   fresher generation)
/// - `is_expiring_soon` is recomputed for every survivor against
///   `threshold_days` and `now`
///
/// Pure: deterministic given identical input state and clock reading.
pub(crate) fn normalize(
    applications: Vec<Application>,
    threshold_days: i64,
    now: DateTime<Utc>,
) -> Vec<Application> {
    applications
        .into_iter()
        .filter(|app| !app.secrets.is_empty())
        .map(|mut app| {
            let secrets = live_generations(std::mem::take(&mut app.secrets))
                .into_iter()
                .map(|secret| secret.with_expiry_classified(threshold_days, now))
                .collect();
            app.with_secrets(secrets)
        })
        .collect()
}

/// Collapse successive generations to one entry per display name, keeping
/// the first-seen position of each name so output order stays deterministic.
fn live_generations(secrets: Vec<Secret>) -> Vec<Secret> {
    let mut live: Vec<Secret> = Vec::with_capacity(secrets.len());
    let mut slot_by_name: HashMap<String, usize> = HashMap::new();

    for secret in secrets {
        match slot_by_name.get(&secret.display_name) {
            Some(&slot) => {
                if secret.start_time >= live[slot].start_time {
                    live[slot] = secret;
                }
            }
            None => {
                slot_by_name.insert(secret.display_name.clone(), live.len());
                live.push(secret);
            }
        }
    }

    live
}
