use parallax_vr::driver::ServerDriverHost;

/// Settings section the host reserves for this driver.
pub const DRIVER_SETTINGS_SECTION: &str = "driver_parallax";

/// Typed view over the host's settings store, with per-key defaults.
pub struct Settings<'a> {
    host: &'a dyn ServerDriverHost,
    section: &'static str,
}

impl<'a> Settings<'a> {
    pub fn new(host: &'a dyn ServerDriverHost) -> Self {
        Self {
            host,
            section: DRIVER_SETTINGS_SECTION,
        }
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.host
            .setting_string(self.section, key)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.host.setting_bool(self.section, key).unwrap_or(default)
    }

    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.host.setting_f32(self.section, key).unwrap_or(default)
    }
}
