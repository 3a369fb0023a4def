//! Color type and interpolation helpers.
//!
//! Output devices take 8-bit `Srgb<u8>` colors. Interpolation is done in
//! `Srgb<f32>` (0.0-1.0 range) through `palette` and converted back, so ramps
//! walk each channel linearly.

use palette::{Mix, Srgb};

/// 8-bit RGB color accepted by every output device.
pub type Rgb = Srgb<u8>;

pub const OFF: Rgb = Rgb::new(0, 0, 0);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 200, 0);
pub const ORANGE: Rgb = Rgb::new(255, 110, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Linearly interpolates between two colors.
///
/// `progress` is clamped to 0.0-1.0; 0.0 yields `from`, 1.0 yields `to`.
#[inline]
pub fn lerp(from: Rgb, to: Rgb, progress: f32) -> Rgb {
    let progress = progress.clamp(0.0, 1.0);
    let from: Srgb<f32> = from.into_format();
    let to: Srgb<f32> = to.into_format();
    from.mix(to, progress).into_format()
}

/// Scales a color by `level / max`, used for dim idle colors.
#[inline]
pub fn dim(color: Rgb, level: u8, max: u8) -> Rgb {
    if max == 0 {
        return OFF;
    }
    lerp(OFF, color, f32::from(level) / f32::from(max))
}
