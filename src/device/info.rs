//! Device information types for video capture devices.

use std::fmt;

use serde::Serialize;

/// Description used when the device cannot be queried.
pub const UNKNOWN_DEVICE: &str = "Unknown device";

/// A video capture node and its one-line description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    /// Device node (e.g. `/dev/video0`)
    pub path: String,
    /// First line of `v4l2-ctl --info`, or [`UNKNOWN_DEVICE`]
    pub description: String,
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.description)
    }
}

/// USB vendor and product identifiers as reported by udev.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsbIds {
    /// `ID_VENDOR_ID`, e.g. `046d`
    pub vendor_id: String,
    /// `ID_MODEL_ID`, e.g. `085c`
    pub product_id: String,
}

impl fmt::Display for UsbIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor_id, self.product_id)
    }
}
