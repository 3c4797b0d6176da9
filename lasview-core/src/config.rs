//! Engine configuration.
//!
//! A single [`ViewerConfig`] is built once by the front end and passed by
//! reference into the loader, the folder ingestor and the session; nothing in
//! the engine reads process-wide state.

use std::path::Path;

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default divisor applied to Z at load time (and multiplied back when measuring).
pub const DEFAULT_Z_SCALE_FACTOR: f64 = 100_000.0;

/// Default ceiling on the number of candidate files in one folder.
pub const DEFAULT_MAX_FILES: usize = 100;

/// Visual band that RGB channels are rescaled into.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorBand {
    /// Value assigned to a channel's observed minimum.
    pub low: f64,
    /// Value assigned to a channel's observed maximum.
    pub high: f64,
}

impl Default for ColorBand {
    fn default() -> Self {
        Self {
            low: 0.2,
            high: 0.8,
        }
    }
}

impl ColorBand {
    /// Creates a band from its two endpoints.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Centre of the band, used for constant channels.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Linear interpolation across the band, clamped to its endpoints.
    #[must_use]
    pub fn lerp(&self, t: f64) -> f64 {
        let value = self.low * (1.0 - t) + self.high * t;
        value.clamp(self.low.min(self.high), self.low.max(self.high))
    }
}

/// Configuration shared by every stage of the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewerConfig {
    /// Z values are divided by this at load and multiplied by it when measuring.
    pub z_scale_factor: f64,
    /// Folders with more candidate files than this are rejected before any read.
    pub max_files: usize,
    /// File extensions (without the dot) treated as point clouds.
    pub extensions: Vec<String>,
    /// Band RGB channels are rescaled into.
    pub color_band: ColorBand,
    /// Load candidate files on the rayon pool instead of sequentially.
    pub parallel_load: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            z_scale_factor: DEFAULT_Z_SCALE_FACTOR,
            max_files: DEFAULT_MAX_FILES,
            extensions: vec!["las".to_string()],
            color_band: ColorBand::default(),
            parallel_load: false,
        }
    }
}

impl ViewerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Z scaling factor.
    #[must_use]
    pub fn with_z_scale_factor(mut self, factor: f64) -> Self {
        self.z_scale_factor = factor;
        self
    }

    /// Sets the folder batch ceiling.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Replaces the accepted extensions.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the colour band.
    #[must_use]
    pub fn with_color_band(mut self, band: ColorBand) -> Self {
        self.color_band = band;
        self
    }

    /// Enables or disables parallel loading.
    #[must_use]
    pub fn with_parallel_load(mut self, parallel: bool) -> Self {
        self.parallel_load = parallel;
        self
    }

    /// Checks the values the engine divides by or bounds batches with.
    ///
    /// # Errors
    /// [`ConfigError::InvalidZScale`] unless the Z scale factor is finite and
    /// positive, [`ConfigError::ZeroMaxFiles`] for a zero ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.z_scale_factor.is_finite() || self.z_scale_factor <= 0.0 {
            return Err(ConfigError::InvalidZScale(self.z_scale_factor));
        }
        if self.max_files == 0 {
            return Err(ConfigError::ZeroMaxFiles);
        }
        Ok(())
    }

    /// Returns true if `path` carries one of the accepted extensions (ASCII case-insensitive).
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}
