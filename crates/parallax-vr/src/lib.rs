#![forbid(unsafe_code)]

pub mod driver;
pub mod property;
pub mod types;

pub use driver::{HmdDisplayDriver, ServerDriverHost, TrackedDeviceDriver};
pub use property::{PropertyKey, PropertyStatus, PropertyType, PropertyValue};
pub use types::{
    DeviceClass, DistortionCoordinates, DriverPose, Eye, Matrix34, ProjectionRaw, TrackingResult,
    Viewport, WindowBounds,
};

use thiserror::Error;

/// Activation-time failures a device can report back to the host.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("driver initialization failed: {0}")]
    InitFailed(String),
    #[error("display not found: {0}")]
    DisplayNotFound(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type DriverResult<T> = Result<T, DriverError>;
