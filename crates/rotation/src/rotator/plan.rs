//! Rotation and creation planning
//!
//! Diffs the desired-state requests against normalized directory state and
//! produces the execution plan: exactly the credentials that need a directory
//! write. Everything else passes through to the final result untouched.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::core::{Application, RotationRequest, Secret};

/// Compute the execution plan for a set of rotation requests
///
/// For every application referenced by at least one request:
/// - an existing credential enters the plan only if it is named in the
///   requests **and** classified as expiring soon
/// - a requested name with no existing credential on the application becomes
///   a pending entry that the executor will create
///
/// Requests naming an application absent from `normalized` are logged and
/// skipped, never fabricated. Pure apart from tracing; plan order follows
/// normalized state order.
pub(crate) fn plan_rotation(
    normalized: &[Application],
    requests: &[RotationRequest],
    now: DateTime<Utc>,
) -> Vec<Application> {
    for request in requests {
        if !normalized
            .iter()
            .any(|app| app.display_name == request.application_name)
        {
            warn!(
                application = %request.application_name,
                secret = %request.secret_name,
                "Skipping rotation request; application not found in directory"
            );
        }
    }

    let mut planned = Vec::new();
    for app in normalized {
        let wanted: Vec<&str> = requests
            .iter()
            .filter(|req| req.application_name == app.display_name)
            .map(|req| req.secret_name.as_str())
            .collect();
        if wanted.is_empty() {
            continue;
        }

        let mut entries: Vec<Secret> = Vec::new();
        for secret in &app.secrets {
            if !wanted.contains(&secret.display_name.as_str()) {
                debug!(
                    application = %app.display_name,
                    secret = %secret.display_name,
                    "Skipping secret; not in the list of secrets to rotate"
                );
                continue;
            }
            if !secret.is_expiring_soon {
                info!(
                    application = %app.display_name,
                    secret = %secret.display_name,
                    "Skipping secret; not expiring soon"
                );
                continue;
            }
            entries.push(secret.clone());
        }

        for name in wanted {
            let exists = app.secrets.iter().any(|s| s.display_name == name);
            if !exists && !entries.iter().any(|s| s.display_name == name) {
                info!(
                    application = %app.display_name,
                    secret = %name,
                    "Planning creation; no secret with this name exists"
                );
                entries.push(Secret::pending(name, now));
            }
        }

        if !entries.is_empty() {
            planned.push(app.clone().with_secrets(entries));
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn classified(name: &str, expiring: bool) -> Secret {
        let now = Utc::now();
        let days = if expiring { 10 } else { 180 };
        Secret::existing(name, Uuid::new_v4(), now, now + Duration::days(days))
            .with_expiry_classified(30, now)
    }

    fn app(name: &str, secrets: Vec<Secret>) -> Application {
        Application::new(name, format!("{name}-id"), secrets)
    }

    #[test]
    fn plans_only_requested_and_expiring() {
        let normalized = vec![app(
            "app",
            vec![
                classified("expiring-requested", true),
                classified("expiring-unrequested", true),
                classified("fresh-requested", false),
            ],
        )];
        let requests = vec![
            RotationRequest::new("app", "expiring-requested"),
            RotationRequest::new("app", "fresh-requested"),
        ];

        let plan = plan_rotation(&normalized, &requests, Utc::now());

        assert_eq!(plan.len(), 1);
        let names: Vec<_> = plan[0]
            .secrets
            .iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, ["expiring-requested"]);
    }

    #[test]
    fn synthesizes_pending_entry_for_missing_name() {
        let normalized = vec![app("app", vec![classified("existing", false)])];
        let requests = vec![RotationRequest::new("app", "brand-new")];

        let plan = plan_rotation(&normalized, &requests, Utc::now());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].secrets.len(), 1);
        let pending = &plan[0].secrets[0];
        assert_eq!(pending.display_name, "brand-new");
        assert!(pending.is_new);
        assert!(pending.key_id.is_nil());
    }

    #[test]
    fn skips_requests_for_unknown_applications() {
        let normalized = vec![app("known", vec![classified("s", true)])];
        let requests = vec![RotationRequest::new("unknown", "s")];

        let plan = plan_rotation(&normalized, &requests, Utc::now());

        assert!(plan.is_empty());
    }

    #[test]
    fn applications_without_requests_stay_out_of_the_plan() {
        let normalized = vec![
            app("wanted", vec![classified("s", true)]),
            app("ignored", vec![classified("s", true)]),
        ];
        let requests = vec![RotationRequest::new("wanted", "s")];

        let plan = plan_rotation(&normalized, &requests, Utc::now());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].display_name, "wanted");
    }

    #[test]
    fn duplicate_requests_plan_a_single_creation() {
        let normalized = vec![app("app", vec![classified("existing", false)])];
        let requests = vec![
            RotationRequest::new("app", "brand-new"),
            RotationRequest::new("app", "brand-new"),
        ];

        let plan = plan_rotation(&normalized, &requests, Utc::now());

        assert_eq!(plan[0].secrets.len(), 1);
    }
}
