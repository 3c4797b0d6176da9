//! Contracts for the collaborators the engine drives but does not implement.
//!
//! A front end supplies a [`RenderSurface`] (3-D view, camera, line overlay)
//! and a [`Clipboard`]. Picking is the reverse direction: the surface reports
//! picks by calling [`crate::Viewer::pick`].

use crate::error::ClipboardError;
use crate::measurement::MeasurementMarker;
use crate::record::PointCloudRecord;

/// How visible clouds are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// Bind each record's own channel (RGB or elevation).
    #[default]
    Attribute,
    /// A single flat colour for every point.
    Uniform,
}

impl DisplayStyle {
    /// The other style.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            DisplayStyle::Attribute => DisplayStyle::Uniform,
            DisplayStyle::Uniform => DisplayStyle::Attribute,
        }
    }
}

/// A 3-D rendering surface.
pub trait RenderSurface {
    /// Removes every cloud and line from the scene.
    fn clear(&mut self);

    /// Adds a cloud, coloured per `style`.
    fn add_cloud(&mut self, record: &PointCloudRecord, style: DisplayStyle);

    /// Draws a measurement line.
    fn add_line(&mut self, marker: &MeasurementMarker);

    /// Removes a previously drawn measurement line.
    fn remove_line(&mut self, marker: &MeasurementMarker);

    /// Fits the camera to the current scene.
    fn reset_camera(&mut self);
}

/// System clipboard access. Failures are returned, never panicked.
pub trait Clipboard {
    /// Places `text` on the clipboard.
    ///
    /// # Errors
    /// [`ClipboardError`] if the platform clipboard is unavailable.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}
