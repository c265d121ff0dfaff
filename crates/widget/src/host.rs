//! Host environment capability.
//!
//! The widget reads nothing from ambient runtime state. Frame detection, cross-frame
//! messaging and mount-point lookup are provided by the host at construction.

use crate::messaging::FrameMessage;
use crate::overlay::Overlay;

/// Where the overlay element lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountPoint {
    /// The document body.
    DocumentRoot,
    /// A caller-specified element, by id.
    Element(String),
}

/// Capabilities the widget needs from the page it runs in.
pub trait HostEnvironment {
    /// `true` when the widget's window is not its own top-level window.
    fn is_embedded(&self) -> bool;

    /// Post a message to the parent frame. Fire-and-forget.
    fn post_to_parent(&self, message: &FrameMessage);

    /// Resolve a mount-point id. Hosts fall back to [`MountPoint::DocumentRoot`] when the id
    /// is absent or unknown.
    fn resolve_mount_point(&self, id: Option<&str>) -> MountPoint;

    /// Insert the overlay element under `mount`. Called exactly once per widget.
    fn attach_overlay(&self, mount: &MountPoint, overlay: &Overlay);

    /// Remove the overlay element from `mount`. Called exactly once, on destroy.
    fn detach_overlay(&self, mount: &MountPoint);

    /// The overlay changed (visibility, focus, results). Hosts that mirror the element
    /// re-render it here.
    fn overlay_changed(&self, _overlay: &Overlay) {}
}

/// Host for a widget running as its own top-level page with nothing to mirror into.
///
/// Never embedded; every mount point resolves to the document root; parent messages are
/// only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopLevelHost;

impl HostEnvironment for TopLevelHost {
    fn is_embedded(&self) -> bool {
        false
    }

    fn post_to_parent(&self, message: &FrameMessage) {
        tracing::debug!(message = %message.to_json(), "no parent frame; message dropped");
    }

    fn resolve_mount_point(&self, id: Option<&str>) -> MountPoint {
        if let Some(id) = id {
            tracing::debug!(id, "mount point not found; using document root");
        }
        MountPoint::DocumentRoot
    }

    fn attach_overlay(&self, mount: &MountPoint, _overlay: &Overlay) {
        tracing::debug!(?mount, "overlay attached");
    }

    fn detach_overlay(&self, mount: &MountPoint) {
        tracing::debug!(?mount, "overlay detached");
    }
}
