//! Point-cloud record: one file's normalised geometry and colour channel.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::normalize_rgb;
use crate::config::ViewerConfig;
use crate::error::{LoadError, RecordError};
use crate::raw::RawCloud;

/// A 3-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Creates a point.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Which attribute channel a renderer should bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorMode {
    Rgb,
    Elevation,
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Rgb => write!(f, "RGB"),
            ColorMode::Elevation => write!(f, "Elevation"),
        }
    }
}

/// Per-point colour attribute. Exactly one channel exists per record.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorAttribute {
    /// Normalised colour triples, each component inside the configured band.
    Rgb(Vec<[f64; 3]>),
    /// Scaled Z value of each point.
    Elevation(Vec<f64>),
}

impl ColorAttribute {
    /// The mode this attribute corresponds to.
    #[must_use]
    pub fn mode(&self) -> ColorMode {
        match self {
            ColorAttribute::Rgb(_) => ColorMode::Rgb,
            ColorAttribute::Elevation(_) => ColorMode::Elevation,
        }
    }

    /// Number of per-point entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColorAttribute::Rgb(colors) => colors.len(),
            ColorAttribute::Elevation(values) => values.len(),
        }
    }

    /// Returns true if the attribute has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One loaded file. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudRecord {
    source_path: PathBuf,
    points: Vec<Point3>,
    attribute: ColorAttribute,
}

impl PointCloudRecord {
    /// Creates a record, checking that it is non-empty and that the
    /// attribute has one entry per point.
    ///
    /// # Errors
    /// Returns [`RecordError::Empty`] for zero points and
    /// [`RecordError::LengthMismatch`] if the attribute length differs.
    pub fn new(
        source_path: impl Into<PathBuf>,
        points: Vec<Point3>,
        attribute: ColorAttribute,
    ) -> Result<Self, RecordError> {
        if points.is_empty() {
            return Err(RecordError::Empty);
        }
        if attribute.len() != points.len() {
            return Err(RecordError::LengthMismatch {
                points: points.len(),
                attributes: attribute.len(),
            });
        }
        Ok(Self {
            source_path: source_path.into(),
            points,
            attribute,
        })
    }

    /// Normalises a decoded cloud into a record.
    ///
    /// Coordinates become `raw * scale + offset`; Z is then divided by
    /// `config.z_scale_factor`. Clouds with colour columns get an RGB
    /// attribute rescaled per channel into `config.color_band`, all others an
    /// elevation attribute equal to the scaled Z.
    ///
    /// # Errors
    /// [`LoadError::Empty`] if the cloud has no points, [`LoadError::ReadFailed`]
    /// if the colour columns do not line up with the coordinates.
    pub fn from_raw(
        source_path: impl Into<PathBuf>,
        raw: &RawCloud,
        config: &ViewerConfig,
    ) -> Result<Self, LoadError> {
        if raw.is_empty() {
            return Err(LoadError::Empty);
        }
        if raw.y.len() != raw.len() || raw.z.len() != raw.len() {
            return Err(LoadError::ReadFailed(
                "coordinate columns have different lengths".to_string(),
            ));
        }

        let points: Vec<Point3> = (0..raw.len())
            .map(|i| {
                let [x, y, z] = raw.real(i);
                Point3::new(x, y, z / config.z_scale_factor)
            })
            .collect();

        let attribute = match &raw.colors {
            Some(colors) => {
                if !colors.is_consistent() || colors.len() != raw.len() {
                    return Err(LoadError::ReadFailed(format!(
                        "colour channels hold {} entries for {} points",
                        colors.len(),
                        raw.len()
                    )));
                }
                ColorAttribute::Rgb(normalize_rgb(colors, config.color_band))
            }
            None => ColorAttribute::Elevation(points.iter().map(|p| p.z).collect()),
        };

        Ok(Self::new(source_path, points, attribute)?)
    }

    /// The record's identifier: its absolute source path.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Filename for display (lossy UTF-8).
    #[must_use]
    pub fn file_name(&self) -> Cow<'_, str> {
        self.source_path
            .file_name()
            .map_or_else(|| self.source_path.to_string_lossy(), |name| name.to_string_lossy())
    }

    /// Normalised points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of points (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Colour mode of this record.
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.attribute.mode()
    }

    /// The populated attribute channel.
    #[must_use]
    pub fn attribute(&self) -> &ColorAttribute {
        &self.attribute
    }

    /// RGB triples, if the record is in RGB mode.
    #[must_use]
    pub fn colors(&self) -> Option<&[[f64; 3]]> {
        match &self.attribute {
            ColorAttribute::Rgb(colors) => Some(colors),
            ColorAttribute::Elevation(_) => None,
        }
    }

    /// Elevation scalars, if the record is in elevation mode.
    #[must_use]
    pub fn elevations(&self) -> Option<&[f64]> {
        match &self.attribute {
            ColorAttribute::Elevation(values) => Some(values),
            ColorAttribute::Rgb(_) => None,
        }
    }

    /// Minimum and maximum scaled Z.
    #[must_use]
    pub fn z_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.z), hi.max(p.z))
            })
    }
}
