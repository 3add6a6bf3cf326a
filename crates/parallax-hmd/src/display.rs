use parallax_common::Error;
use parallax_vr::types::{Eye, ProjectionRaw, Viewport, WindowBounds};
use serde::Deserialize;
use tracing::info;

/// How the two eyes share the physical display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    FullScreen,
    HorizontalSideBySide,
    VerticalSideBySide,
}

/// Display descriptor, parsed from the JSON document the tracking stack
/// publishes for the active HMD.
///
/// Missing fields fall back to the stock HDK profile (1920x1080 @ 60 Hz,
/// extended desktop), which is also what an empty descriptor yields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub monitor_name: String,
    pub width: u32,
    pub height: u32,
    pub position_x: i32,
    pub position_y: i32,
    pub vertical_refresh_hz: f32,
    pub display_mode: DisplayMode,
    /// Full horizontal field of view, degrees.
    pub horizontal_fov_degrees: f32,
    /// Full vertical field of view, degrees.
    pub vertical_fov_degrees: f32,
    pub ipd_meters: f32,
    /// Render-target scale over the raw display size.
    pub overfill_factor: f32,
    pub edid_vendor_id: u16,
    pub edid_product_id: u16,
    pub attached_to_desktop: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            monitor_name: "OSVR HDK".to_string(),
            width: 1920,
            height: 1080,
            position_x: 1920,
            position_y: 0,
            vertical_refresh_hz: 60.0,
            display_mode: DisplayMode::HorizontalSideBySide,
            horizontal_fov_degrees: 90.0,
            vertical_fov_degrees: 90.0,
            ipd_meters: 0.0635,
            overfill_factor: 1.0,
            edid_vendor_id: 0xd24e,
            edid_product_id: 0x1019,
            attached_to_desktop: true,
        }
    }
}

impl DisplayConfig {
    /// Parse a display descriptor. An empty descriptor is not an error:
    /// the tracking stack omits it when no display block is configured,
    /// and the stock profile applies.
    pub fn from_json(json: &str) -> parallax_common::Result<Self> {
        if json.trim().is_empty() || json.trim() == "{}" {
            info!("display descriptor is empty, using default display profile");
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_str(json).map_err(Error::serialization)?;
        if config.width == 0 || config.height == 0 {
            return Err(Error::config("display resolution must be nonzero"));
        }
        if config.horizontal_fov_degrees <= 0.0 || config.vertical_fov_degrees <= 0.0 {
            return Err(Error::config("display field of view must be positive"));
        }
        if config.vertical_refresh_hz <= 0.0 {
            return Err(Error::config("display refresh rate must be positive"));
        }
        if config.overfill_factor <= 0.0 {
            return Err(Error::config("overfill factor must be positive"));
        }
        Ok(config)
    }

    pub fn window_bounds(&self) -> WindowBounds {
        WindowBounds {
            x: self.position_x,
            y: self.position_y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn recommended_render_target_size(&self) -> (u32, u32) {
        let width = (self.width as f32 * self.overfill_factor) as u32;
        let height = (self.height as f32 * self.overfill_factor) as u32;
        (width, height)
    }

    /// Viewport in the frame buffer for one eye, per display mode.
    pub fn eye_viewport(&self, eye: Eye) -> Viewport {
        match self.display_mode {
            DisplayMode::HorizontalSideBySide => {
                let width = self.width / 2;
                Viewport {
                    x: if eye == Eye::Left { 0 } else { width },
                    y: 0,
                    width,
                    height: self.height,
                }
            }
            DisplayMode::VerticalSideBySide => {
                let height = self.height / 2;
                Viewport {
                    x: 0,
                    y: if eye == Eye::Left { 0 } else { height },
                    width: self.width,
                    height,
                }
            }
            DisplayMode::FullScreen => Viewport {
                x: 0,
                y: 0,
                width: self.width,
                height: self.height,
            },
        }
    }

    /// Raw projection clip planes as half-tangents of the field of view.
    ///
    /// The host expects top and bottom swapped relative to the usual math
    /// convention: top carries the negative half-tangent.
    pub fn projection_raw(&self, _eye: Eye) -> ProjectionRaw {
        let half_h = (self.horizontal_fov_degrees / 2.0).to_radians().tan();
        let half_v = (self.vertical_fov_degrees / 2.0).to_radians().tan();
        ProjectionRaw {
            left: -half_h,
            right: half_h,
            top: -half_v,
            bottom: half_v,
        }
    }

    pub fn ipd_meters(&self) -> f32 {
        self.ipd_meters
    }
}
