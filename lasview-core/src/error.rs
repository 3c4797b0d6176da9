//! Error types for lasview-core.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a single file into a [`crate::PointCloudRecord`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file decoded successfully but holds no points.
    #[error("no points found in point cloud")]
    Empty,

    /// Any I/O, header or format failure while reading the file.
    #[error("failed to read point cloud: {0}")]
    ReadFailed(String),
}

/// A record would violate its own invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Records always hold at least one point.
    #[error("point cloud record must contain at least one point")]
    Empty,

    /// The attribute channel does not line up with the points.
    #[error("attribute length {attributes} does not match point count {points}")]
    LengthMismatch { points: usize, attributes: usize },
}

impl From<RecordError> for LoadError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Empty => LoadError::Empty,
            other @ RecordError::LengthMismatch { .. } => LoadError::ReadFailed(other.to_string()),
        }
    }
}

/// The filename carries no detection identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// `Detection_` marker absent, or nothing between it and the extension.
    #[error("could not extract detection id from file name '{0}'")]
    PatternNotFound(String),
}

/// A [`crate::ViewerConfig`] value the engine cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Z is divided by this factor, so it must be finite and positive.
    #[error("z scale factor must be finite and greater than zero, got {0}")]
    InvalidZScale(f64),

    /// A ceiling of zero would reject every folder.
    #[error("max files must be at least 1")]
    ZeroMaxFiles,
}

/// Navigation hit the edge of the loaded collection.
///
/// This is informational: the session is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationBoundary {
    /// `previous` from the first record.
    AtFirst,
    /// `next` from the last record.
    AtLast,
}

impl fmt::Display for NavigationBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationBoundary::AtFirst => write!(f, "this is the first file"),
            NavigationBoundary::AtLast => write!(f, "this is the last file"),
        }
    }
}

/// Session store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The identifier is not a loaded record.
    #[error("no loaded record for '{}'", .0.display())]
    UnknownRecord(PathBuf),

    /// The index is outside the loaded collection.
    #[error("record index {index} out of range (loaded: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation needs at least one visible record.
    #[error("no file selected")]
    NoSelection,
}

/// The clipboard collaborator refused the text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to copy to clipboard: {0}")]
pub struct ClipboardError(pub String);

/// Failure of a per-action export (copy detection id / copy coordinates).
///
/// None of these affect session state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing is visible to export from.
    #[error("no file selected")]
    NoSelection,

    /// Detection id extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Clipboard collaborator failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
