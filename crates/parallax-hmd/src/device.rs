use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parallax_vr::driver::{HmdDisplayDriver, ServerDriverHost, TrackedDeviceDriver};
use parallax_vr::property::{PropertyKey, PropertyStatus, PropertyValue};
use parallax_vr::types::{
    DeviceClass, DistortionCoordinates, DriverPose, Eye, Matrix34, ProjectionRaw, Viewport,
    WindowBounds,
};
use parallax_vr::{DriverError, DriverResult};
use tracing::{debug, info, trace};

use crate::display::DisplayConfig;
use crate::distortion::{self, DistortionModel};
use crate::properties::PropertyStore;
use crate::tracking::{pose_from_report, PoseCell, PoseReport};

/// One head-mounted display, exposed to the host as a tracked device.
///
/// Owns the property store and the latest pose snapshot; display geometry
/// comes from the parsed descriptor and distortion is delegated to the
/// configured model.
pub struct HmdDevice {
    host: Arc<dyn ServerDriverHost>,
    device_class: DeviceClass,
    display: DisplayConfig,
    distortion: Box<dyn DistortionModel>,
    properties: PropertyStore,
    pose: PoseCell,
    object_id: u32,
    tracker_active: AtomicBool,
}

impl HmdDevice {
    pub fn new(
        host: Arc<dyn ServerDriverHost>,
        display: DisplayConfig,
        distortion: Box<dyn DistortionModel>,
    ) -> Self {
        let mut device = Self {
            host,
            device_class: DeviceClass::Hmd,
            display,
            distortion,
            properties: PropertyStore::new(),
            pose: PoseCell::new(),
            object_id: 0,
            tracker_active: AtomicBool::new(false),
        };
        device.log_display_profile();
        device.configure_properties();
        device
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    pub fn serial_number(&self) -> String {
        self.display.monitor_name.clone()
    }

    /// Entry point for the tracking client's notification thread. Builds
    /// a complete pose and publishes it as a unit, then notifies the
    /// host. Reports arriving while the device is inactive are dropped.
    pub fn on_tracker_report(&self, report: &PoseReport) {
        if !self.tracker_active.load(Ordering::Acquire) {
            return;
        }

        let pose = pose_from_report(report);
        self.pose.publish(pose);
        self.host.tracked_device_pose_updated(self.object_id, &pose);
    }

    fn log_display_profile(&self) {
        info!(
            monitor = %self.display.monitor_name,
            width = self.display.width,
            height = self.display.height,
            refresh_hz = self.display.vertical_refresh_hz,
            edid_vendor = self.display.edid_vendor_id,
            edid_product = self.display.edid_product_id,
            mode = if self.display.attached_to_desktop { "extended" } else { "direct" },
            "using display",
        );
    }

    /// Populate the property store. Runs once, before activation
    /// completes; afterwards the store is only read.
    fn configure_properties(&mut self) {
        let display = &self.display;
        let p = &mut self.properties;

        // General properties that apply to all device classes.
        p.set(PropertyKey::WillDriftInYaw, PropertyValue::Bool(true));
        p.set(PropertyKey::DeviceIsWireless, PropertyValue::Bool(false));
        p.set(PropertyKey::DeviceIsCharging, PropertyValue::Bool(false));
        p.set(PropertyKey::FirmwareUpdateAvailable, PropertyValue::Bool(false));
        p.set(PropertyKey::FirmwareManualUpdate, PropertyValue::Bool(false));
        p.set(PropertyKey::BlockServerShutdown, PropertyValue::Bool(false));
        p.set(PropertyKey::ContainsProximitySensor, PropertyValue::Bool(false));
        p.set(PropertyKey::DeviceProvidesBatteryStatus, PropertyValue::Bool(false));
        p.set(PropertyKey::DeviceCanPowerOff, PropertyValue::Bool(true));
        p.set(PropertyKey::HasCamera, PropertyValue::Bool(false));
        p.set(PropertyKey::DeviceBatteryPercentage, PropertyValue::Float(1.0));
        p.set(
            PropertyKey::DeviceClass,
            PropertyValue::Int32(self.device_class.code()),
        );
        p.set(
            PropertyKey::TrackingSystemName,
            PropertyValue::String("OSVR".to_string()),
        );
        p.set(
            PropertyKey::ModelNumber,
            PropertyValue::String("OSVR HMD".to_string()),
        );
        p.set(
            PropertyKey::SerialNumber,
            PropertyValue::String(display.monitor_name.clone()),
        );

        // HMD-specific properties.
        p.set(
            PropertyKey::IsOnDesktop,
            PropertyValue::Bool(display.attached_to_desktop),
        );
        p.set(
            PropertyKey::DisplayFrequency,
            PropertyValue::Float(display.vertical_refresh_hz),
        );
        p.set(
            PropertyKey::UserIpdMeters,
            PropertyValue::Float(display.ipd_meters()),
        );
        p.set(
            PropertyKey::EdidVendorId,
            PropertyValue::Int32(i32::from(display.edid_vendor_id)),
        );
        p.set(
            PropertyKey::EdidProductId,
            PropertyValue::Int32(i32::from(display.edid_product_id)),
        );
        p.set(PropertyKey::CurrentUniverseId, PropertyValue::Uint64(1));
        p.set(PropertyKey::PreviousUniverseId, PropertyValue::Uint64(1));
        p.set(
            PropertyKey::DisplayFirmwareVersion,
            PropertyValue::Uint64(192),
        );

        debug!(count = p.len(), "device properties configured");
    }

    fn verify_display(&self) -> DriverResult<()> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(DriverError::DisplayNotFound(
                "display has zero resolution".to_string(),
            ));
        }
        let left = self.display.eye_viewport(Eye::Left);
        let right = self.display.eye_viewport(Eye::Right);
        if left.width == 0 || left.height == 0 || right.width == 0 || right.height == 0 {
            return Err(DriverError::DisplayNotFound(
                "eye viewport has zero size".to_string(),
            ));
        }
        Ok(())
    }
}

impl TrackedDeviceDriver for HmdDevice {
    fn activate(&mut self, object_id: u32) -> DriverResult<()> {
        trace!(object_id, "HmdDevice::activate");

        self.verify_display()?;
        self.object_id = object_id;
        self.tracker_active.store(true, Ordering::Release);
        self.host.proximity_sensor_state(object_id, true);

        trace!("activation complete");
        Ok(())
    }

    fn deactivate(&mut self) {
        trace!("HmdDevice::deactivate");
        self.tracker_active.store(false, Ordering::Release);
    }

    fn power_off(&mut self) {
        trace!("HmdDevice::power_off");
        self.tracker_active.store(false, Ordering::Release);
    }

    fn debug_request(&self, request: &str) -> String {
        trace!(request, "HmdDevice::debug_request");
        String::new()
    }

    fn get_pose(&self) -> DriverPose {
        self.pose.snapshot()
    }

    fn bool_property(&self, key: PropertyKey) -> (bool, PropertyStatus) {
        self.properties.get(key, self.device_class)
    }

    fn float_property(&self, key: PropertyKey) -> (f32, PropertyStatus) {
        self.properties.get(key, self.device_class)
    }

    fn int32_property(&self, key: PropertyKey) -> (i32, PropertyStatus) {
        self.properties.get(key, self.device_class)
    }

    fn uint64_property(&self, key: PropertyKey) -> (u64, PropertyStatus) {
        self.properties.get(key, self.device_class)
    }

    fn matrix34_property(&self, key: PropertyKey) -> (Matrix34, PropertyStatus) {
        self.properties.get(key, self.device_class)
    }

    fn string_property(&self, key: PropertyKey) -> (String, PropertyStatus) {
        self.properties.get(key, self.device_class)
    }

    fn string_property_into(&self, key: PropertyKey, buf: &mut [u8]) -> (u32, PropertyStatus) {
        self.properties.string_into(key, self.device_class, buf)
    }
}

impl HmdDisplayDriver for HmdDevice {
    fn window_bounds(&self) -> WindowBounds {
        self.display.window_bounds()
    }

    fn is_display_on_desktop(&self) -> bool {
        self.display.attached_to_desktop
    }

    fn is_display_real(&self) -> bool {
        true
    }

    fn recommended_render_target_size(&self) -> (u32, u32) {
        self.display.recommended_render_target_size()
    }

    fn eye_viewport(&self, eye: Eye) -> Viewport {
        self.display.eye_viewport(eye)
    }

    fn projection_raw(&self, eye: Eye) -> ProjectionRaw {
        self.display.projection_raw(eye)
    }

    fn compute_distortion(&self, eye: Eye, u: f32, v: f32) -> DistortionCoordinates {
        distortion::compute_distortion(self.distortion.as_ref(), eye, u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortion::NullDistortion;
    use std::sync::Mutex;

    #[derive(Default)]
    struct NullHost {
        poses: Mutex<Vec<(u32, DriverPose)>>,
        proximity: Mutex<Vec<(u32, bool)>>,
    }

    impl ServerDriverHost for NullHost {
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

        fn setting_string(&self, _section: &str, _key: &str) -> Option<String> {
            None
        }

        fn setting_bool(&self, _section: &str, _key: &str) -> Option<bool> {
            None
        }

        fn setting_f32(&self, _section: &str, _key: &str) -> Option<f32> {
            None
        }
    }

    fn new_device(host: Arc<NullHost>) -> HmdDevice {
        HmdDevice::new(host, DisplayConfig::default(), Box::new(NullDistortion))
    }

    #[test]
    fn construction_populates_the_store() {
        let device = new_device(Arc::new(NullHost::default()));

        let (value, status) = device.string_property(PropertyKey::ModelNumber);
        assert_eq!(value, "OSVR HMD");
        assert!(status.is_success());

        let (value, status) = device.int32_property(PropertyKey::DeviceClass);
        assert_eq!(value, DeviceClass::Hmd.code());
        assert!(status.is_success());

        let (value, _) = device.float_property(PropertyKey::DisplayFrequency);
        assert_eq!(value, 60.0);
    }

    #[test]
    fn accessors_carry_store_statuses_through() {
        let device = new_device(Arc::new(NullHost::default()));

        let (value, status) = device.bool_property(PropertyKey::DisplayFrequency);
        assert!(!value);
        assert_eq!(status, PropertyStatus::WrongDataType);

        let (_, status) = device.uint64_property(PropertyKey::SupportedButtons);
        assert_eq!(status, PropertyStatus::WrongDeviceClass);

        let (_, status) = device.float_property(PropertyKey::SecondsFromVsyncToPhotons);
        assert_eq!(status, PropertyStatus::ValueNotProvidedByDevice);
    }

    #[test]
    fn activation_announces_proximity_and_enables_tracking() {
        let host = Arc::new(NullHost::default());
        let mut device = new_device(host.clone());

        device.activate(7).unwrap();
        assert_eq!(&*host.proximity.lock().unwrap(), &[(7, true)]);

        device.on_tracker_report(&PoseReport {
            position: [0.0, 1.6, 0.0],
            orientation: [1.0, 0.0, 0.0, 0.0],
        });

        let poses = host.poses.lock().unwrap();
        assert_eq!(poses.len(), 1);
        assert_eq!(poses[0].0, 7);
        assert_eq!(poses[0].1.position, [0.0, 1.6, 0.0]);
        drop(poses);

        assert_eq!(device.get_pose().position, [0.0, 1.6, 0.0]);
        assert!(device.get_pose().pose_is_valid);
    }

    #[test]
    fn reports_before_activation_and_after_deactivation_are_dropped() {
        let host = Arc::new(NullHost::default());
        let mut device = new_device(host.clone());
        let report = PoseReport {
            position: [1.0, 0.0, 0.0],
            orientation: [1.0, 0.0, 0.0, 0.0],
        };

        device.on_tracker_report(&report);
        assert!(host.poses.lock().unwrap().is_empty());

        device.activate(3).unwrap();
        device.on_tracker_report(&report);
        assert_eq!(host.poses.lock().unwrap().len(), 1);

        device.deactivate();
        device.on_tracker_report(&report);
        assert_eq!(host.poses.lock().unwrap().len(), 1);
    }

    #[test]
    fn activation_rejects_degenerate_display() {
        let host = Arc::new(NullHost::default());
        let display = DisplayConfig {
            width: 1,
            ..DisplayConfig::default()
        };
        let mut device = HmdDevice::new(host, display, Box::new(NullDistortion));
        // 1px wide horizontal split leaves a zero-width eye viewport.
        assert!(matches!(
            device.activate(1),
            Err(DriverError::DisplayNotFound(_))
        ));
    }

    #[test]
    fn debug_request_returns_empty_response() {
        let device = new_device(Arc::new(NullHost::default()));
        assert_eq!(device.debug_request("dump"), "");
    }
}
