/// Category of tracked device. Fixed at construction; the sentinel
/// `Invalid` class marks a device slot the host should not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DeviceClass {
    Invalid = 0,
    Hmd = 1,
    Controller = 2,
    GenericTracker = 3,
    Tracker = 4,
}

impl DeviceClass {
    /// Integer code as exchanged with the host.
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingResult {
    Uninitialized,
    Running,
    OutOfRange,
}

/// Row-major 3x4 transform matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix34(pub [[f32; 4]; 3]);

impl Matrix34 {
    pub const IDENTITY: Self = Self([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ]);
}

/// Complete pose snapshot for one tracked device.
///
/// Quaternions are `[w, x, y, z]`. The snapshot is always replaced as a
/// whole; consumers never see a partially updated pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverPose {
    pub world_from_driver_translation: [f64; 3],
    pub world_from_driver_rotation: [f64; 4],
    pub driver_from_head_translation: [f64; 3],
    pub driver_from_head_rotation: [f64; 4],
    pub position: [f64; 3],
    pub rotation: [f64; 4],
    pub velocity: [f64; 3],
    pub acceleration: [f64; 3],
    pub angular_velocity: [f64; 3],
    pub angular_acceleration: [f64; 3],
    pub time_offset_seconds: f64,
    pub result: TrackingResult,
    pub pose_is_valid: bool,
    pub device_is_connected: bool,
    pub will_drift_in_yaw: bool,
    pub should_apply_head_model: bool,
}

impl Default for DriverPose {
    fn default() -> Self {
        const IDENTITY_QUAT: [f64; 4] = [1.0, 0.0, 0.0, 0.0];
        Self {
            world_from_driver_translation: [0.0; 3],
            world_from_driver_rotation: IDENTITY_QUAT,
            driver_from_head_translation: [0.0; 3],
            driver_from_head_rotation: IDENTITY_QUAT,
            position: [0.0; 3],
            rotation: IDENTITY_QUAT,
            velocity: [0.0; 3],
            acceleration: [0.0; 3],
            angular_velocity: [0.0; 3],
            angular_acceleration: [0.0; 3],
            time_offset_seconds: 0.0,
            result: TrackingResult::Uninitialized,
            pose_is_valid: false,
            device_is_connected: false,
            will_drift_in_yaw: false,
            should_apply_head_model: false,
        }
    }
}

/// Per-channel texture coordinates after lens distortion correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistortionCoordinates {
    pub red: [f32; 2],
    pub green: [f32; 2],
    pub blue: [f32; 2],
}

/// Raw projection half-tangents, in the host's convention (top is the
/// negative half-tangent, bottom the positive one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRaw {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Viewport in the frame buffer for one eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Size and position of the driver's window on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}
