//! Per-tenant rotator registry
//!
//! Guarantees at most one [`SecretRotator`] per tenant for the lifetime of
//! the process, so the rotation threshold is captured once per tenant and the
//! directory client is minted once per tenant. Get-or-create is atomic: under
//! a racing first access exactly one rotator is constructed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::rotator::SecretRotator;
use crate::traits::SecretDirectory;

/// Mints a directory client for a tenant
pub type DirectoryFactory = dyn Fn(&str) -> Arc<dyn SecretDirectory> + Send + Sync;

/// Process-wide map of tenant id to rotator instance
pub struct RotatorRegistry {
    make_directory: Box<DirectoryFactory>,
    rotators: Mutex<HashMap<String, Arc<SecretRotator>>>,
}

impl RotatorRegistry {
    /// Create a registry around a directory-client factory
    pub fn new<F>(make_directory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn SecretDirectory> + Send + Sync + 'static,
    {
        Self {
            make_directory: Box::new(make_directory),
            rotators: Mutex::new(HashMap::new()),
        }
    }

    /// Return the tenant's rotator, constructing it on first access
    ///
    /// The first caller for a tenant wins: its `rotate_within_days` is bound
    /// to the instance permanently, and later calls with a different
    /// threshold for the same tenant get the cached instance unchanged.
    pub fn get_or_create(&self, tenant_id: &str, rotate_within_days: i64) -> Arc<SecretRotator> {
        let mut rotators = self.rotators.lock();
        rotators
            .entry(tenant_id.to_string())
            .or_insert_with(|| {
                Arc::new(SecretRotator::new(
                    (self.make_directory)(tenant_id),
                    rotate_within_days,
                ))
            })
            .clone()
    }
}
