use std::sync::Mutex;

use glam::{DQuat, DVec3};
use parallax_vr::types::{DriverPose, TrackingResult};

/// Pose sample delivered by the tracking client on its notification
/// thread. Quaternion is `[w, x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseReport {
    pub position: [f64; 3],
    pub orientation: [f64; 4],
}

/// Latest-pose cell.
///
/// The tracker callback publishes a complete snapshot as a unit; readers
/// get a copy of whichever snapshot was published last and never observe
/// a partially written pose.
#[derive(Debug)]
pub struct PoseCell {
    pose: Mutex<DriverPose>,
}

impl PoseCell {
    pub fn new() -> Self {
        Self {
            pose: Mutex::new(DriverPose::default()),
        }
    }

    pub fn publish(&self, pose: DriverPose) {
        let mut guard = match self.pose.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = pose;
    }

    pub fn snapshot(&self) -> DriverPose {
        match self.pose.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Default for PoseCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a full driver pose from a tracker report.
///
/// World-from-driver and driver-from-head stay identity; velocity and
/// acceleration are not consistently provided by the tracking stack and
/// are reported as zero.
pub fn pose_from_report(report: &PoseReport) -> DriverPose {
    let [w, x, y, z] = report.orientation;
    let rotation = DQuat::from_xyzw(x, y, z, w);
    let rotation = if rotation.length_squared() > 0.0 {
        rotation.normalize()
    } else {
        DQuat::IDENTITY
    };

    DriverPose {
        position: DVec3::from_array(report.position).to_array(),
        rotation: [rotation.w, rotation.x, rotation.y, rotation.z],
        result: TrackingResult::Running,
        pose_is_valid: true,
        device_is_connected: true,
        will_drift_in_yaw: true,
        should_apply_head_model: true,
        ..DriverPose::default()
    }
}
