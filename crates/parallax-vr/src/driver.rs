use crate::property::{PropertyKey, PropertyStatus};
use crate::types::{
    DistortionCoordinates, DriverPose, Eye, Matrix34, ProjectionRaw, Viewport, WindowBounds,
};
use crate::DriverResult;

/// Services the host runtime lends the driver.
///
/// The host serializes calls into each device; the one exception is pose
/// publication, which may arrive from the tracking client's notification
/// thread, so implementations must be `Send + Sync`.
pub trait ServerDriverHost: Send + Sync {
    /// A device published a new pose snapshot.
    fn tracked_device_pose_updated(&self, object_id: u32, pose: &DriverPose);

    /// A device's proximity sensor changed state.
    fn proximity_sensor_state(&self, object_id: u32, active: bool);

    /// Look up a string setting. `None` when the host has no value.
    fn setting_string(&self, section: &str, key: &str) -> Option<String>;

    /// Look up a boolean setting.
    fn setting_bool(&self, section: &str, key: &str) -> Option<bool>;

    /// Look up a float setting.
    fn setting_f32(&self, section: &str, key: &str) -> Option<f32>;
}

/// Host-facing surface of one tracked device.
///
/// Property accessors never fail hard: each returns the type's default
/// value together with a [`PropertyStatus`] describing the outcome, and an
/// unset or inapplicable property is an expected result, not an error.
pub trait TrackedDeviceDriver {
    /// Called before the device is returned to an application. Always
    /// precedes any display or tracking call.
    fn activate(&mut self, object_id: u32) -> DriverResult<()>;

    /// The host is switching away from this device; release what can be
    /// released.
    fn deactivate(&mut self);

    /// The host asked this device to power off.
    fn power_off(&mut self);

    /// Free-form debug channel between a client and the driver.
    fn debug_request(&self, request: &str) -> String;

    /// Latest published pose snapshot.
    fn get_pose(&self) -> DriverPose;

    fn bool_property(&self, key: PropertyKey) -> (bool, PropertyStatus);
    fn float_property(&self, key: PropertyKey) -> (f32, PropertyStatus);
    fn int32_property(&self, key: PropertyKey) -> (i32, PropertyStatus);
    fn uint64_property(&self, key: PropertyKey) -> (u64, PropertyStatus);
    fn matrix34_property(&self, key: PropertyKey) -> (Matrix34, PropertyStatus);
    fn string_property(&self, key: PropertyKey) -> (String, PropertyStatus);

    /// Bounded-buffer string read. On success returns the encoded length
    /// including the trailing NUL; if `buf` cannot hold the whole string
    /// the status is [`PropertyStatus::BufferTooSmall`], the required
    /// length is returned, and `buf` is not modified by the call.
    fn string_property_into(&self, key: PropertyKey, buf: &mut [u8]) -> (u32, PropertyStatus);
}

/// Display surface of an HMD device.
pub trait HmdDisplayDriver {
    fn window_bounds(&self) -> WindowBounds;
    fn is_display_on_desktop(&self) -> bool;
    fn is_display_real(&self) -> bool;
    fn recommended_render_target_size(&self) -> (u32, u32);
    fn eye_viewport(&self, eye: Eye) -> Viewport;
    fn projection_raw(&self, eye: Eye) -> ProjectionRaw;
    fn compute_distortion(&self, eye: Eye, u: f32, v: f32) -> DistortionCoordinates;
}
