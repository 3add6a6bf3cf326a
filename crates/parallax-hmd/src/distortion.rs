use parallax_vr::types::{DistortionCoordinates, Eye};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

/// Seam for the external distortion math.
///
/// Coordinates use the model's convention: (0, 0) is the lower-left
/// corner of the eye's viewport, (1, 1) the upper-right.
pub trait DistortionModel: Send + Sync {
    fn correct(&self, eye: Eye, channel: ColorChannel, uv: [f32; 2]) -> [f32; 2];
}

/// Identity model for displays without lens correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDistortion;

impl DistortionModel for NullDistortion {
    fn correct(&self, _eye: Eye, _channel: ColorChannel, uv: [f32; 2]) -> [f32; 2] {
        uv
    }
}

/// Translate a host distortion query through the model.
///
/// The host puts (0, 0) in the upper-left of the eye's viewport while the
/// model expects (0, 0) in the lower-left, so the v coordinate is flipped
/// on the way in and flipped back on the way out.
pub fn compute_distortion(
    model: &dyn DistortionModel,
    eye: Eye,
    u: f32,
    v: f32,
) -> DistortionCoordinates {
    let input = [u, 1.0 - v];

    let red = model.correct(eye, ColorChannel::Red, input);
    let green = model.correct(eye, ColorChannel::Green, input);
    let blue = model.correct(eye, ColorChannel::Blue, input);

    DistortionCoordinates {
        red: [red[0], 1.0 - red[1]],
        green: [green[0], 1.0 - green[1]],
        blue: [blue[0], 1.0 - blue[1]],
    }
}
