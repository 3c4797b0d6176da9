//! Session store: loaded records, visibility and navigation.
//!
//! The session is the only owner of the loaded collection, the visibility set
//! and the measurement pipeline. Single selection is simply a visibility set
//! of size one; `next`/`previous` anchor on the extreme visible index and
//! always collapse back to a single visible record.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::ViewerConfig;
use crate::error::{NavigationBoundary, SessionError};
use crate::measurement::{MeasurementMarker, MeasurementPipeline, PickOutcome};
use crate::record::{Point3, PointCloudRecord};

/// Outcome of `next` / `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Visibility now holds exactly the record at `index`.
    Moved { index: usize },
    /// Already at an edge; nothing changed.
    Boundary(NavigationBoundary),
}

/// The state of one browsing session.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<PointCloudRecord>,
    visible: BTreeSet<usize>,
    current: Option<usize>,
    measurement: MeasurementPipeline,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            records: Vec::new(),
            visible: BTreeSet::new(),
            current: None,
            measurement: MeasurementPipeline::new(config.z_scale_factor),
        }
    }

    /// Replaces the loaded collection wholesale.
    ///
    /// Visibility and pending picks are cleared. The previous measurement
    /// marker, if any, is returned so the caller can remove it from its
    /// surface.
    pub fn load(&mut self, records: Vec<PointCloudRecord>) -> Option<MeasurementMarker> {
        self.records = records;
        self.visible.clear();
        self.current = None;
        self.measurement.reset()
    }

    /// Loaded records in ingestion order.
    #[must_use]
    pub fn records(&self) -> &[PointCloudRecord] {
        &self.records
    }

    /// Number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&PointCloudRecord> {
        self.records.get(index)
    }

    /// Index of the record identified by `id`.
    #[must_use]
    pub fn index_of(&self, id: &Path) -> Option<usize> {
        self.records.iter().position(|r| r.source_path() == id)
    }

    fn resolve(&self, id: &Path) -> Result<usize, SessionError> {
        self.index_of(id)
            .ok_or_else(|| SessionError::UnknownRecord(id.to_path_buf()))
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    /// Makes `id` visible. Returns whether the visibility set changed.
    ///
    /// # Errors
    /// [`SessionError::UnknownRecord`] if `id` is not loaded.
    pub fn show(&mut self, id: &Path) -> Result<bool, SessionError> {
        let index = self.resolve(id)?;
        self.show_index(index)
    }

    /// Makes the record at `index` visible.
    ///
    /// # Errors
    /// [`SessionError::IndexOutOfRange`] if `index` is not loaded.
    pub fn show_index(&mut self, index: usize) -> Result<bool, SessionError> {
        self.check_index(index)?;
        self.current = Some(index);
        Ok(self.visible.insert(index))
    }

    /// Hides `id`. Returns whether the visibility set changed.
    ///
    /// # Errors
    /// [`SessionError::UnknownRecord`] if `id` is not loaded.
    pub fn hide(&mut self, id: &Path) -> Result<bool, SessionError> {
        let index = self.resolve(id)?;
        self.hide_index(index)
    }

    /// Hides the record at `index`.
    ///
    /// # Errors
    /// [`SessionError::IndexOutOfRange`] if `index` is not loaded.
    pub fn hide_index(&mut self, index: usize) -> Result<bool, SessionError> {
        self.check_index(index)?;
        Ok(self.visible.remove(&index))
    }

    /// Empties the visibility set. Records stay loaded.
    pub fn clear_visible(&mut self) {
        self.visible.clear();
        self.current = None;
    }

    /// Makes `id` the only visible record.
    ///
    /// # Errors
    /// [`SessionError::UnknownRecord`] if `id` is not loaded.
    pub fn select_only(&mut self, id: &Path) -> Result<(), SessionError> {
        let index = self.resolve(id)?;
        self.select_only_index(index)
    }

    /// Makes the record at `index` the only visible record.
    ///
    /// # Errors
    /// [`SessionError::IndexOutOfRange`] if `index` is not loaded.
    pub fn select_only_index(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.visible.clear();
        self.visible.insert(index);
        self.current = Some(index);
        Ok(())
    }

    /// Makes the first loaded record the only visible one and returns its
    /// index, or `None` if nothing is loaded.
    pub fn select_first(&mut self) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        self.visible.clear();
        self.visible.insert(0);
        self.current = Some(0);
        Some(0)
    }

    /// Moves to the record after the highest visible index.
    ///
    /// # Errors
    /// [`SessionError::NoSelection`] if nothing is visible.
    pub fn next(&mut self) -> Result<Navigation, SessionError> {
        let anchor = *self.visible.last().ok_or(SessionError::NoSelection)?;
        if anchor + 1 >= self.records.len() {
            return Ok(Navigation::Boundary(NavigationBoundary::AtLast));
        }
        self.jump(anchor + 1)
    }

    /// Moves to the record before the lowest visible index.
    ///
    /// # Errors
    /// [`SessionError::NoSelection`] if nothing is visible.
    pub fn previous(&mut self) -> Result<Navigation, SessionError> {
        let anchor = *self.visible.first().ok_or(SessionError::NoSelection)?;
        let Some(target) = anchor.checked_sub(1) else {
            return Ok(Navigation::Boundary(NavigationBoundary::AtFirst));
        };
        self.jump(target)
    }

    fn jump(&mut self, index: usize) -> Result<Navigation, SessionError> {
        self.clear_visible();
        self.select_only_index(index)?;
        Ok(Navigation::Moved { index })
    }

    /// Returns true if `id` is currently visible.
    #[must_use]
    pub fn is_visible(&self, id: &Path) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.visible.contains(&index))
    }

    /// Visible indices in ascending order.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible.iter().copied()
    }

    /// Visible records in ingestion order.
    pub fn visible_records(&self) -> impl Iterator<Item = &PointCloudRecord> + '_ {
        self.visible.iter().map(|&i| &self.records[i])
    }

    /// Number of visible records.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Index of the current record: the most recently shown record that is
    /// still visible, otherwise the lowest visible index.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
            .filter(|index| self.visible.contains(index))
            .or_else(|| self.visible.first().copied())
    }

    /// The current record.
    ///
    /// # Errors
    /// [`SessionError::NoSelection`] if nothing is visible.
    pub fn current(&self) -> Result<&PointCloudRecord, SessionError> {
        self.current_index()
            .map(|index| &self.records[index])
            .ok_or(SessionError::NoSelection)
    }

    /// Feeds a pick into the measurement pipeline.
    pub fn record_pick(&mut self, point: Point3) -> PickOutcome {
        self.measurement.pick(point)
    }

    /// Drops pending picks and returns the released marker, if any.
    pub fn discard_measurement(&mut self) -> Option<MeasurementMarker> {
        self.measurement.reset()
    }

    /// Read access to the measurement pipeline.
    #[must_use]
    pub fn measurement(&self) -> &MeasurementPipeline {
        &self.measurement
    }

    /// The live measurement marker.
    #[must_use]
    pub fn active_marker(&self) -> Option<&MeasurementMarker> {
        self.measurement.active_marker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ColorAttribute;
    use std::path::PathBuf;

    fn record(name: &str) -> PointCloudRecord {
        PointCloudRecord::new(
            format!("/data/{name}"),
            vec![Point3::new(1.0, 2.0, 3.0)],
            ColorAttribute::Elevation(vec![3.0]),
        )
        .unwrap()
    }

    fn session_with(n: usize) -> Session {
        let mut session = Session::new(&ViewerConfig::default());
        session.load((0..n).map(|i| record(&format!("Detection_{i}.las"))).collect());
        session
    }

    fn path(i: usize) -> PathBuf {
        PathBuf::from(format!("/data/Detection_{i}.las"))
    }

    fn visible(session: &Session) -> Vec<usize> {
        session.visible_indices().collect()
    }

    #[test]
    fn test_load_resets_state() {
        let mut session = session_with(3);
        session.show_index(1).unwrap();
        session.record_pick(Point3::default());
        session.record_pick(Point3::new(0.0, 0.0, 1.0));
        session.record_pick(Point3::default());

        let released = session.load(vec![record("other.las")]);
        assert!(released.is_some());
        assert_eq!(session.len(), 1);
        assert_eq!(session.visible_count(), 0);
        assert!(session.measurement().pending_picks().is_empty());
        assert!(session.active_marker().is_none());
    }

    #[test]
    fn test_select_first() {
        let mut session = session_with(3);
        session.show_index(2).unwrap();
        assert_eq!(session.select_first(), Some(0));
        assert_eq!(visible(&session), vec![0]);
        assert_eq!(session.current_index(), Some(0));

        let mut empty = session_with(0);
        assert_eq!(empty.select_first(), None);
        assert_eq!(empty.visible_count(), 0);
    }

    #[test]
    fn test_show_hide_are_idempotent() {
        let mut session = session_with(3);
        assert!(session.show(&path(2)).unwrap());
        assert!(!session.show(&path(2)).unwrap());
        assert!(session.is_visible(&path(2)));
        assert!(session.hide(&path(2)).unwrap());
        assert!(!session.hide(&path(2)).unwrap());
        assert!(!session.is_visible(&path(2)));
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut session = session_with(2);
        let missing = PathBuf::from("/data/missing.las");
        assert_eq!(
            session.show(&missing),
            Err(SessionError::UnknownRecord(missing.clone()))
        );
        assert_eq!(
            session.select_only_index(5),
            Err(SessionError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(session.visible_count(), 0);
    }

    #[test]
    fn test_multi_visibility_and_select_only() {
        let mut session = session_with(5);
        session.show_index(1).unwrap();
        session.show_index(3).unwrap();
        session.show_index(2).unwrap();
        assert_eq!(visible(&session), vec![1, 2, 3]);
        assert_eq!(session.current_index(), Some(2));

        session.select_only(&path(4)).unwrap();
        assert_eq!(visible(&session), vec![4]);

        session.clear_visible();
        assert_eq!(session.visible_count(), 0);
        assert_eq!(session.len(), 5);
        assert_eq!(session.current(), Err(SessionError::NoSelection));
    }

    #[test]
    fn test_next_previous_round_trip() {
        let mut session = session_with(4);
        session.select_only_index(1).unwrap();

        assert_eq!(session.next(), Ok(Navigation::Moved { index: 2 }));
        assert_eq!(visible(&session), vec![2]);
        assert_eq!(session.previous(), Ok(Navigation::Moved { index: 1 }));
        assert_eq!(visible(&session), vec![1]);
    }

    #[test]
    fn test_boundaries_leave_state_unchanged() {
        let mut session = session_with(3);
        session.select_only_index(2).unwrap();
        assert_eq!(
            session.next(),
            Ok(Navigation::Boundary(NavigationBoundary::AtLast))
        );
        assert_eq!(visible(&session), vec![2]);

        session.select_only_index(0).unwrap();
        assert_eq!(
            session.previous(),
            Ok(Navigation::Boundary(NavigationBoundary::AtFirst))
        );
        assert_eq!(visible(&session), vec![0]);
    }

    #[test]
    fn test_navigation_anchors_on_extremes() {
        let mut session = session_with(6);
        session.show_index(1).unwrap();
        session.show_index(3).unwrap();
        assert_eq!(session.next(), Ok(Navigation::Moved { index: 4 }));
        assert_eq!(visible(&session), vec![4]);

        session.show_index(2).unwrap();
        assert_eq!(session.previous(), Ok(Navigation::Moved { index: 1 }));
        assert_eq!(visible(&session), vec![1]);

        // max visible is the last record even though index 0 is also visible
        session.show_index(0).unwrap();
        session.show_index(5).unwrap();
        assert_eq!(
            session.next(),
            Ok(Navigation::Boundary(NavigationBoundary::AtLast))
        );
        assert_eq!(visible(&session), vec![0, 1, 5]);
    }

    #[test]
    fn test_navigation_requires_selection() {
        let mut session = session_with(2);
        assert_eq!(session.next(), Err(SessionError::NoSelection));
        assert_eq!(session.previous(), Err(SessionError::NoSelection));
    }

    #[test]
    fn test_current_falls_back_when_hidden() {
        let mut session = session_with(4);
        session.show_index(3).unwrap();
        session.show_index(1).unwrap();
        assert_eq!(session.current().unwrap().source_path(), path(1));

        session.hide_index(1).unwrap();
        assert_eq!(session.current_index(), Some(3));
    }
}
