use std::sync::Arc;

use parallax_vr::driver::{ServerDriverHost, TrackedDeviceDriver};
use parallax_vr::{DriverError, DriverResult};
use tracing::{info, warn};

use crate::device::HmdDevice;
use crate::display::DisplayConfig;
use crate::distortion::DistortionModel;
use crate::settings::Settings;

/// Top-level driver object the host instantiates: builds and owns the
/// tracked devices.
pub struct ServerDriver {
    devices: Vec<HmdDevice>,
}

impl ServerDriver {
    /// Construct the device list from the tracking stack's display
    /// descriptor and the host's settings.
    pub fn init(
        host: Arc<dyn ServerDriverHost>,
        display_json: &str,
        distortion: Box<dyn DistortionModel>,
    ) -> DriverResult<Self> {
        let settings = Settings::new(host.as_ref());
        let display_name = settings.get_string("display_name", "OSVR");

        let display_config = DisplayConfig::from_json(display_json)
            .map_err(|e| DriverError::Config(e.to_string()))?;

        if !display_config.monitor_name.contains(&display_name) {
            warn!(
                wanted = %display_name,
                found = %display_config.monitor_name,
                "configured display name does not match descriptor, using descriptor",
            );
        }

        let device = HmdDevice::new(host, display_config, distortion);
        info!(serial = %device.serial_number(), "server driver initialized with 1 device");

        Ok(Self {
            devices: vec![device],
        })
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn device(&self, index: usize) -> Option<&HmdDevice> {
        self.devices.get(index)
    }

    pub fn device_mut(&mut self, index: usize) -> Option<&mut HmdDevice> {
        self.devices.get_mut(index)
    }

    /// Host is unloading the driver; deactivate everything.
    pub fn cleanup(&mut self) {
        for device in &mut self.devices {
            device.deactivate();
        }
    }
}
