//! Detection id and centroid coordinate export.

use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::record::{Point3, PointCloudRecord};

/// Literal that precedes the detection id in upstream filenames.
pub const DETECTION_MARKER: &str = "Detection_";

/// Returned by [`centroid_coordinate`] when there is nothing to average.
pub const NO_POINTS: &str = "No points available.";

/// Extracts the detection id from a path's filename.
///
/// The id is the text between [`DETECTION_MARKER`] and the file extension,
/// e.g. `.../site3_Detection_42.las` gives `"42"`.
///
/// # Errors
/// [`ExtractError::PatternNotFound`] if the marker is missing or nothing
/// follows it. `Detection_.las` is an error rather than an empty id, so an
/// empty string never reaches the clipboard or an export row.
pub fn detection_id_from_path(path: &Path) -> Result<String, ExtractError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let Some(start) = name.find(DETECTION_MARKER) else {
        return Err(ExtractError::PatternNotFound(name));
    };
    let rest = &name[start + DETECTION_MARKER.len()..];
    let id = rest.rsplit_once('.').map_or(rest, |(stem, _)| stem);
    if id.is_empty() {
        return Err(ExtractError::PatternNotFound(name));
    }
    Ok(id.to_string())
}

/// Detection id of a record.
///
/// # Errors
/// See [`detection_id_from_path`].
pub fn detection_id(record: &PointCloudRecord) -> Result<String, ExtractError> {
    detection_id_from_path(record.source_path())
}

/// Unweighted mean of the first two axes, as `(mean_x, mean_y)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point3]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some((sx / n, sy / n))
}

/// Formats a centroid as `"{mean_y:.6}, {mean_x:.6}"` (latitude-like first).
#[must_use]
pub fn format_coordinate(mean_x: f64, mean_y: f64) -> String {
    format!("{mean_y:.6}, {mean_x:.6}")
}

/// Centroid coordinate string of a record.
#[must_use]
pub fn centroid_coordinate(record: &PointCloudRecord) -> String {
    centroid(record.points()).map_or_else(
        || NO_POINTS.to_string(),
        |(mean_x, mean_y)| format_coordinate(mean_x, mean_y),
    )
}

/// One line of a batch export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportRow {
    pub file_name: String,
    /// `None` when the filename carries no detection id.
    pub detection_id: Option<String>,
    pub coordinates: String,
    pub point_count: usize,
}

impl ExportRow {
    /// Builds the export row for a record.
    #[must_use]
    pub fn from_record(record: &PointCloudRecord) -> Self {
        let detection_id = match detection_id(record) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        };
        Self {
            file_name: record.file_name().into_owned(),
            detection_id,
            coordinates: centroid_coordinate(record),
            point_count: record.len(),
        }
    }
}
