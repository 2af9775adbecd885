// SPDX-License-Identifier: GPL-3.0-only

//! xdg-desktop-portal backed permissions
//!
//! Unsandboxed processes own the devices outright. Inside Flatpak the Camera
//! portal decides: `OpenPipeWireRemote` only succeeds once access was granted,
//! and `AccessCamera` shows the consent dialog. Microphone access has no
//! portal, so it counts as granted whenever an input is visible.

use super::{Permission, PermissionProvider, PermissionStatus};
use crate::backends::audio::enumerate_audio_devices;
use crate::constants::{app_info, portal};
use crate::errors::PermissionError;
use std::collections::HashMap;
use tracing::{debug, info};
use zbus::zvariant::{OwnedFd, Value};

/// Permission provider using the desktop portal
#[derive(Debug, Clone, Copy)]
pub struct PortalPermissions {
    sandboxed: bool,
}

impl Default for PortalPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalPermissions {
    pub fn new() -> Self {
        let sandboxed = app_info::is_flatpak();
        debug!(sandboxed, "Permission provider created");
        Self { sandboxed }
    }

    fn camera_proxy(&self) -> Result<zbus::blocking::Proxy<'static>, PermissionError> {
        let connection = zbus::blocking::Connection::session()?;
        let proxy = zbus::blocking::Proxy::new(
            &connection,
            portal::DESTINATION,
            portal::PATH,
            portal::CAMERA_INTERFACE,
        )?;
        Ok(proxy)
    }

    fn camera_status(&self) -> Result<PermissionStatus, PermissionError> {
        if !self.sandboxed {
            return Ok(PermissionStatus::Granted);
        }

        let proxy = self.camera_proxy()?;
        let options: HashMap<&str, Value<'_>> = HashMap::new();
        let reply: Result<OwnedFd, zbus::Error> = proxy.call("OpenPipeWireRemote", &(options,));
        match reply {
            // The remote itself is not needed; dropping it closes the fd
            Ok(_remote) => Ok(PermissionStatus::Granted),
            Err(zbus::Error::MethodError(name, _, _))
                if name.as_str() == portal::NOT_ALLOWED_ERROR =>
            {
                Ok(PermissionStatus::Denied)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn microphone_status(&self) -> PermissionStatus {
        if enumerate_audio_devices().is_empty() {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        }
    }
}

impl PermissionProvider for PortalPermissions {
    fn status(&self, permission: Permission) -> Result<PermissionStatus, PermissionError> {
        match permission {
            Permission::Camera => self.camera_status(),
            Permission::Microphone => Ok(self.microphone_status()),
        }
    }

    fn request(&self, permission: Permission) -> Result<(), PermissionError> {
        match permission {
            Permission::Camera if self.sandboxed => {
                let proxy = self.camera_proxy()?;
                let options: HashMap<&str, Value<'_>> = HashMap::new();
                let handle: zbus::zvariant::OwnedObjectPath =
                    proxy.call("AccessCamera", &(options,))?;
                info!(request = %handle.as_str(), "Camera access requested");
                Ok(())
            }
            Permission::Camera => Ok(()),
            Permission::Microphone => {
                info!("Microphone access has no portal; connect an input device");
                Ok(())
            }
        }
    }
}
