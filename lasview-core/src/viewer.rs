//! Session controller that keeps a [`RenderSurface`] in step with a [`Session`].
//!
//! Front-end handlers call into a single `Viewer` instead of capturing
//! session state themselves. Every visibility change redraws the surface;
//! completed measurements swap the surface line in place.

use crate::config::ViewerConfig;
use crate::error::{ExportError, SessionError};
use crate::export::{centroid_coordinate, detection_id};
use crate::measurement::PickOutcome;
use crate::record::{Point3, PointCloudRecord};
use crate::session::{Navigation, Session};
use crate::surface::{Clipboard, DisplayStyle, RenderSurface};

/// Owns a session and the surface it is displayed on.
pub struct Viewer<S: RenderSurface> {
    session: Session,
    surface: S,
    style: DisplayStyle,
    picking: bool,
}

impl<S: RenderSurface> Viewer<S> {
    /// Creates a viewer with an empty session. Picking starts enabled.
    pub fn new(config: &ViewerConfig, surface: S) -> Self {
        Self {
            session: Session::new(config),
            surface,
            style: DisplayStyle::default(),
            picking: true,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the viewer, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Replaces the loaded records and shows the first one.
    pub fn load_records(&mut self, records: Vec<PointCloudRecord>) {
        if let Some(marker) = self.session.load(records) {
            self.surface.remove_line(&marker);
        }
        match self.session.select_first() {
            Some(_) => log::info!("session loaded with {} records", self.session.len()),
            None => log::warn!("session loaded with no records"),
        }
        self.redraw();
    }

    /// Shows the record at `index` alongside whatever is already visible.
    ///
    /// # Errors
    /// [`SessionError::IndexOutOfRange`] for an unknown index.
    pub fn show(&mut self, index: usize) -> Result<(), SessionError> {
        if self.session.show_index(index)? {
            self.redraw();
        }
        Ok(())
    }

    /// Hides the record at `index`.
    ///
    /// # Errors
    /// [`SessionError::IndexOutOfRange`] for an unknown index.
    pub fn hide(&mut self, index: usize) -> Result<(), SessionError> {
        if self.session.hide_index(index)? {
            self.redraw();
        }
        Ok(())
    }

    /// Shows only the record at `index`.
    ///
    /// # Errors
    /// [`SessionError::IndexOutOfRange`] for an unknown index.
    pub fn select_only(&mut self, index: usize) -> Result<(), SessionError> {
        self.session.select_only_index(index)?;
        self.redraw();
        Ok(())
    }

    /// Hides everything.
    pub fn clear_visible(&mut self) {
        self.session.clear_visible();
        self.redraw();
    }

    /// Steps forward from the highest visible record.
    ///
    /// # Errors
    /// [`SessionError::NoSelection`] if nothing is visible.
    pub fn next(&mut self) -> Result<Navigation, SessionError> {
        let navigation = self.session.next()?;
        self.after_navigation(navigation);
        Ok(navigation)
    }

    /// Steps back from the lowest visible record.
    ///
    /// # Errors
    /// [`SessionError::NoSelection`] if nothing is visible.
    pub fn previous(&mut self) -> Result<Navigation, SessionError> {
        let navigation = self.session.previous()?;
        self.after_navigation(navigation);
        Ok(navigation)
    }

    fn after_navigation(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Moved { index } => {
                log::debug!("navigated to record {index}");
                self.redraw();
            }
            Navigation::Boundary(boundary) => log::info!("{boundary}"),
        }
    }

    /// Handles a pick reported by the surface.
    ///
    /// Returns `None` if picking is disabled.
    pub fn pick(&mut self, point: Point3) -> Option<PickOutcome> {
        if !self.picking {
            log::debug!("pick ignored, picking disabled");
            return None;
        }
        let outcome = self.session.record_pick(point);
        if let PickOutcome::Completed {
            measurement,
            released,
        } = &outcome
        {
            if let Some(old) = released {
                self.surface.remove_line(old);
            }
            self.surface.add_line(&measurement.marker());
        }
        Some(outcome)
    }

    /// Returns true if picks are being accepted.
    pub fn picking_enabled(&self) -> bool {
        self.picking
    }

    /// Enables or disables picking.
    ///
    /// Disabling discards any pending pick and removes the measurement line.
    pub fn set_picking(&mut self, enabled: bool) {
        if !enabled {
            if let Some(marker) = self.session.discard_measurement() {
                self.surface.remove_line(&marker);
            }
        }
        self.picking = enabled;
    }

    /// Current display style.
    pub fn style(&self) -> DisplayStyle {
        self.style
    }

    /// Switches between attribute and uniform colouring and redraws.
    pub fn toggle_style(&mut self) -> DisplayStyle {
        self.style = self.style.toggled();
        self.redraw();
        self.style
    }

    /// Copies the current record's detection id to `clipboard`.
    ///
    /// # Errors
    /// [`ExportError::NoSelection`], [`ExportError::Extract`] or
    /// [`ExportError::Clipboard`]. Session state is never affected.
    pub fn copy_detection_id<C: Clipboard>(&self, clipboard: &mut C) -> Result<String, ExportError> {
        let record = self.current_record()?;
        let id = detection_id(record)?;
        clipboard.copy(&id)?;
        Ok(id)
    }

    /// Copies the current record's centroid coordinate to `clipboard`.
    ///
    /// # Errors
    /// [`ExportError::NoSelection`] or [`ExportError::Clipboard`].
    pub fn copy_coordinates<C: Clipboard>(&self, clipboard: &mut C) -> Result<String, ExportError> {
        let record = self.current_record()?;
        let coordinates = centroid_coordinate(record);
        clipboard.copy(&coordinates)?;
        Ok(coordinates)
    }

    fn current_record(&self) -> Result<&PointCloudRecord, ExportError> {
        self.session.current().map_err(|_| ExportError::NoSelection)
    }

    /// Rebuilds the scene from the visible records and the live marker.
    pub fn redraw(&mut self) {
        self.surface.clear();
        for record in self.session.visible_records() {
            self.surface.add_cloud(record, self.style);
        }
        if let Some(marker) = self.session.active_marker() {
            self.surface.add_line(marker);
        }
        self.surface.reset_camera();
    }
}
