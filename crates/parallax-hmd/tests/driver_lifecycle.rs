use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use parallax_hmd::{NullDistortion, PoseReport, ServerDriver};
use parallax_vr::driver::{HmdDisplayDriver, ServerDriverHost, TrackedDeviceDriver};
use parallax_vr::property::{PropertyKey, PropertyStatus};
use parallax_vr::types::{DriverPose, Eye};

static TRACING: Once = Once::new();

fn init_test_tracing() {
    TRACING.call_once(parallax_common::init_tracing);
}

/// Host double: records driver callbacks and serves a settings table.
#[derive(Default)]
struct FakeHost {
    settings: HashMap<(String, String), String>,
    poses: Mutex<Vec<(u32, DriverPose)>>,
    proximity: Mutex<Vec<(u32, bool)>>,
}

impl FakeHost {
    fn with_setting(mut self, section: &str, key: &str, value: &str) -> Self {
        self.settings
            .insert((section.to_string(), key.to_string()), value.to_string());
        self
    }
}

impl ServerDriverHost for FakeHost {
    fn tracked_device_pose_updated(&self, object_id: u32, pose: &DriverPose) {
        self.poses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((object_id, *pose));
    }

    fn proximity_sensor_state(&self, object_id: u32, active: bool) {
        self.proximity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((object_id, active));
    }

    fn setting_string(&self, section: &str, key: &str) -> Option<String> {
        self.settings
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }

    fn setting_bool(&self, _section: &str, _key: &str) -> Option<bool> {
        None
    }

    fn setting_f32(&self, _section: &str, _key: &str) -> Option<f32> {
        None
    }
}

const DESCRIPTOR: &str = r#"{
    "monitor_name": "OSVR HDK 2",
    "width": 2160,
    "height": 1200,
    "vertical_refresh_hz": 90.0,
    "ipd_meters": 0.064
}"#;

#[test]
fn activate_then_query_properties_through_the_trait_surface() -> Result<()> {
    init_test_tracing();
    let host = Arc::new(FakeHost::default().with_setting("driver_parallax", "display_name", "HDK"));
    let mut server = ServerDriver::init(host.clone(), DESCRIPTOR, Box::new(NullDistortion))?;

    let device = server.device_mut(0).expect("one device");
    device.activate(1)?;
    assert_eq!(&*host.proximity.lock().unwrap(), &[(1, true)]);

    let (serial, status) = device.string_property(PropertyKey::SerialNumber);
    assert_eq!(serial, "OSVR HDK 2");
    assert!(status.is_success());

    let (frequency, status) = device.float_property(PropertyKey::DisplayFrequency);
    assert_eq!(frequency, 90.0);
    assert!(status.is_success());

    let (ipd, _) = device.float_property(PropertyKey::UserIpdMeters);
    assert_eq!(ipd, 0.064);

    // Failure statuses surface through the same accessors.
    let (_, status) = device.int32_property(PropertyKey::DisplayFrequency);
    assert_eq!(status, PropertyStatus::WrongDataType);
    let (_, status) = device.string_property(PropertyKey::AttachedDeviceId);
    assert_eq!(status, PropertyStatus::WrongDeviceClass);

    assert_eq!(device.debug_request("anything"), "");
    Ok(())
}

#[test]
fn bounded_string_reads_follow_the_buffer_contract() -> Result<()> {
    init_test_tracing();
    let host = Arc::new(FakeHost::default());
    let mut server = ServerDriver::init(host, DESCRIPTOR, Box::new(NullDistortion))?;
    let device = server.device_mut(0).expect("one device");
    device.activate(1)?;

    let mut buf = [0u8; 32];
    let (len, status) = device.string_property_into(PropertyKey::ModelNumber, &mut buf);
    assert_eq!(len, 9);
    assert!(status.is_success());
    assert_eq!(&buf[..9], b"OSVR HMD\0");

    let mut small = [0x55u8; 4];
    let (len, status) = device.string_property_into(PropertyKey::ModelNumber, &mut small);
    assert_eq!(len, 9);
    assert_eq!(status, PropertyStatus::BufferTooSmall);
    assert_eq!(small, [0x55u8; 4]);
    Ok(())
}

#[test]
fn pose_reports_reach_the_host_until_deactivation() -> Result<()> {
    init_test_tracing();
    let host = Arc::new(FakeHost::default());
    let mut server = ServerDriver::init(host.clone(), DESCRIPTOR, Box::new(NullDistortion))?;
    let device = server.device_mut(0).expect("one device");
    device.activate(4)?;

    let report = PoseReport {
        position: [0.1, 1.7, -0.2],
        orientation: [1.0, 0.0, 0.0, 0.0],
    };
    device.on_tracker_report(&report);
    device.on_tracker_report(&report);

    {
        let poses = host.poses.lock().unwrap();
        assert_eq!(poses.len(), 2);
        assert!(poses.iter().all(|(id, _)| *id == 4));
        assert_eq!(poses[0].1.position, [0.1, 1.7, -0.2]);
        assert!(poses[0].1.pose_is_valid);
    }
    assert_eq!(device.get_pose().position, [0.1, 1.7, -0.2]);

    server.cleanup();
    let device = server.device(0).expect("one device");
    device.on_tracker_report(&report);
    assert_eq!(host.poses.lock().unwrap().len(), 2);
    Ok(())
}

#[test]
fn display_surface_matches_the_descriptor() -> Result<()> {
    init_test_tracing();
    let host = Arc::new(FakeHost::default());
    let mut server = ServerDriver::init(host, DESCRIPTOR, Box::new(NullDistortion))?;
    let device = server.device_mut(0).expect("one device");
    device.activate(1)?;

    let bounds = device.window_bounds();
    assert_eq!((bounds.width, bounds.height), (2160, 1200));
    assert_eq!(device.recommended_render_target_size(), (2160, 1200));

    let left = device.eye_viewport(Eye::Left);
    let right = device.eye_viewport(Eye::Right);
    assert_eq!(left.width, 1080);
    assert_eq!(right.x, 1080);

    let raw = device.projection_raw(Eye::Left);
    assert!(raw.left < 0.0 && raw.right > 0.0);
    assert!(raw.top < 0.0 && raw.bottom > 0.0);

    // Identity distortion: coordinates pass through unchanged.
    let coords = device.compute_distortion(Eye::Left, 0.3, 0.7);
    assert_eq!(coords.green, [0.3, 0.7]);
    Ok(())
}
