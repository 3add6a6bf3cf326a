//! HMD driver adapter.
//!
//! Translates between an external tracking stack's device model and the
//! host runtime's tracked-device plugin surface: a typed per-device
//! property store, display geometry queries, distortion coordinate
//! translation, and whole-snapshot pose publication. Tracking and
//! distortion math live behind seams; this crate only adapts.

#![forbid(unsafe_code)]

pub mod device;
pub mod display;
pub mod distortion;
pub mod properties;
pub mod server;
pub mod settings;
pub mod tracking;

pub use device::HmdDevice;
pub use display::{DisplayConfig, DisplayMode};
pub use distortion::{ColorChannel, DistortionModel, NullDistortion};
pub use properties::{PropertyStore, PropertyTypedValue};
pub use server::ServerDriver;
pub use settings::Settings;
pub use tracking::{PoseCell, PoseReport};
