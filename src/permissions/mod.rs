// SPDX-License-Identifier: GPL-3.0-only

//! Camera and microphone permission gate
//!
//! Capture is only allowed while both permissions are granted. Probing and
//! requesting go through a [`PermissionProvider`] so the gate itself stays
//! free of D-Bus and can be exercised with fakes.

pub mod portal;

pub use portal::PortalPermissions;

use crate::errors::PermissionError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A runtime permission the app depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Camera,
    Microphone,
}

impl Permission {
    pub const ALL: [Permission; 2] = [Permission::Camera, Permission::Microphone];
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Camera => write!(f, "camera"),
            Permission::Microphone => write!(f, "microphone"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    Granted,
    Denied,
    #[default]
    NotDetermined,
}

/// Source of truth for permission state
///
/// Calls may block on D-Bus; run them off the UI thread.
pub trait PermissionProvider: Send + Sync {
    fn status(&self, permission: Permission) -> Result<PermissionStatus, PermissionError>;

    /// Ask the user for `permission`; the answer is not awaited
    fn request(&self, permission: Permission) -> Result<(), PermissionError>;
}

/// Result of probing every permission once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionSnapshot {
    pub camera: PermissionStatus,
    pub microphone: PermissionStatus,
}

impl PermissionSnapshot {
    pub fn get(&self, permission: Permission) -> PermissionStatus {
        match permission {
            Permission::Camera => self.camera,
            Permission::Microphone => self.microphone,
        }
    }

    pub fn all_granted(&self) -> bool {
        Permission::ALL
            .iter()
            .all(|p| self.get(*p) == PermissionStatus::Granted)
    }

    /// Permissions that are not granted
    pub fn missing(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.get(*p) != PermissionStatus::Granted)
            .collect()
    }
}

/// Check every permission, treating provider errors as undetermined
pub fn check(provider: &dyn PermissionProvider) -> PermissionSnapshot {
    let status_of = |permission| match provider.status(permission) {
        Ok(status) => status,
        Err(e) => {
            warn!(%permission, error = %e, "Permission check failed");
            PermissionStatus::NotDetermined
        }
    };
    let snapshot = PermissionSnapshot {
        camera: status_of(Permission::Camera),
        microphone: status_of(Permission::Microphone),
    };
    debug!(?snapshot, "Permissions checked");
    snapshot
}

/// Send requests for `permissions`, logging failures
pub fn send_requests(provider: &dyn PermissionProvider, permissions: &[Permission]) {
    for &permission in permissions {
        match provider.request(permission) {
            Ok(()) => info!(%permission, "Permission requested"),
            Err(e) => warn!(%permission, error = %e, "Permission request failed"),
        }
    }
}

/// Cached permission state plus the once-per-process request guard
pub struct PermissionGate {
    provider: Arc<dyn PermissionProvider>,
    snapshot: PermissionSnapshot,
    requested: bool,
}

impl PermissionGate {
    /// Create a gate with every permission undetermined
    pub fn new(provider: Arc<dyn PermissionProvider>) -> Self {
        Self {
            provider,
            snapshot: PermissionSnapshot::default(),
            requested: false,
        }
    }

    pub fn provider(&self) -> Arc<dyn PermissionProvider> {
        Arc::clone(&self.provider)
    }

    /// Store the result of a check run elsewhere
    pub fn apply(&mut self, snapshot: PermissionSnapshot) {
        if snapshot != self.snapshot {
            info!(?snapshot, "Permission state changed");
        }
        self.snapshot = snapshot;
    }

    /// Check synchronously and store the result
    pub fn refresh(&mut self) -> PermissionSnapshot {
        let snapshot = check(self.provider.as_ref());
        self.apply(snapshot);
        snapshot
    }

    pub fn snapshot(&self) -> PermissionSnapshot {
        self.snapshot
    }

    pub fn status(&self, permission: Permission) -> PermissionStatus {
        self.snapshot.get(permission)
    }

    /// True iff both camera and microphone are granted
    pub fn has_permission(&self) -> bool {
        self.snapshot.all_granted()
    }

    /// Claim the one request this process may issue
    ///
    /// Returns the permissions to request, or nothing once a request has
    /// already been made or everything is granted.
    pub fn request_missing(&mut self) -> Vec<Permission> {
        if self.requested {
            return Vec::new();
        }
        let missing = self.snapshot.missing();
        if !missing.is_empty() {
            self.requested = true;
        }
        missing
    }

    pub fn has_requested(&self) -> bool {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Fixed {
        camera: PermissionStatus,
        microphone: Result<PermissionStatus, PermissionError>,
        requests: Mutex<Vec<Permission>>,
    }

    impl PermissionProvider for Fixed {
        fn status(&self, permission: Permission) -> Result<PermissionStatus, PermissionError> {
            match permission {
                Permission::Camera => Ok(self.camera),
                Permission::Microphone => self.microphone.clone(),
            }
        }

        fn request(&self, permission: Permission) -> Result<(), PermissionError> {
            self.requests.lock().unwrap().push(permission);
            Ok(())
        }
    }

    fn make_gate(
        camera: PermissionStatus,
        microphone: Result<PermissionStatus, PermissionError>,
    ) -> (PermissionGate, Arc<Fixed>) {
        let provider = Arc::new(Fixed {
            camera,
            microphone,
            requests: Mutex::new(Vec::new()),
        });
        (PermissionGate::new(provider.clone()), provider)
    }

    #[test]
    fn test_has_permission_requires_both() {
        let (mut gate, _) = make_gate(PermissionStatus::Granted, Ok(PermissionStatus::Granted));
        assert!(!gate.has_permission());
        gate.refresh();
        assert!(gate.has_permission());

        let (mut gate, _) = gate_with_denied_mic();
        gate.refresh();
        assert!(!gate.has_permission());
        assert_eq!(gate.status(Permission::Camera), PermissionStatus::Granted);
    }

    fn gate_with_denied_mic() -> (PermissionGate, Arc<Fixed>) {
        make_gate(PermissionStatus::Granted, Ok(PermissionStatus::Denied))
    }

    #[test]
    fn test_check_error_is_not_determined() {
        let (mut gate, _) = make_gate(
            PermissionStatus::Granted,
            Err(PermissionError::Portal("no bus".to_string())),
        );
        let snapshot = gate.refresh();
        assert_eq!(snapshot.microphone, PermissionStatus::NotDetermined);
        assert_eq!(snapshot.missing(), vec![Permission::Microphone]);
    }

    #[test]
    fn test_request_missing_only_once() {
        let (mut gate, provider) = make_gate(PermissionStatus::Denied, Ok(PermissionStatus::Denied));
        gate.refresh();

        let first = gate.request_missing();
        assert_eq!(first, vec![Permission::Camera, Permission::Microphone]);
        send_requests(provider.as_ref(), &first);
        assert!(gate.request_missing().is_empty());
        assert_eq!(provider.requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_nothing_requested_when_granted() {
        let (mut gate, _) = make_gate(PermissionStatus::Granted, Ok(PermissionStatus::Granted));
        gate.refresh();
        assert!(gate.request_missing().is_empty());
        assert!(!gate.has_requested());
    }
}
