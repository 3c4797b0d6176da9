//! RGB channel normalisation.
//!
//! Each channel is first taken from its native 16-bit range to `[0, 1]` and
//! then stretched independently from its observed per-file `[min, max]` into
//! the configured [`ColorBand`]. Low-dynamic-range files would otherwise
//! render almost black or fully saturated.

use crate::config::ColorBand;
use crate::raw::RawColors;

/// Native range of a LAS colour channel.
#[allow(clippy::cast_lossless)]
pub const CHANNEL_MAX: f64 = u16::MAX as f64;

/// Maps a stored channel value to `[0, 1]`.
#[inline]
#[must_use]
pub fn unit(value: u16) -> f64 {
    f64::from(value) / CHANNEL_MAX
}

/// Observed extent of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u16,
    pub max: u16,
}

impl ChannelRange {
    /// Scans a channel for its extent. `None` for an empty channel.
    #[must_use]
    pub fn of(values: &[u16]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Returns true if every value in the channel is the same.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }

    /// Position of `value` inside the range as a fraction in `[0, 1]`.
    ///
    /// Computed on the unit-scaled values; a constant channel yields `0.5`.
    #[must_use]
    pub fn fraction(&self, value: u16) -> f64 {
        if self.is_constant() {
            return 0.5;
        }
        let lo = unit(self.min);
        let hi = unit(self.max);
        ((unit(value) - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

/// Rescales a single channel into `band`.
///
/// The channel minimum maps to `band.low`, the maximum to `band.high`.
/// A constant channel maps every entry to the band midpoint.
#[must_use]
pub fn rescale_channel(values: &[u16], band: ColorBand) -> Vec<f64> {
    let Some(range) = ChannelRange::of(values) else {
        return Vec::new();
    };
    if range.is_constant() {
        return vec![band.midpoint(); values.len()];
    }
    values
        .iter()
        .map(|&v| band.lerp(range.fraction(v)))
        .collect()
}

/// Normalises three colour channels into per-point triples.
#[must_use]
pub fn normalize_rgb(colors: &RawColors, band: ColorBand) -> Vec<[f64; 3]> {
    let red = rescale_channel(&colors.red, band);
    let green = rescale_channel(&colors.green, band);
    let blue = rescale_channel(&colors.blue, band);
    red.into_iter()
        .zip(green)
        .zip(blue)
        .map(|((r, g), b)| [r, g, b])
        .collect()
}
