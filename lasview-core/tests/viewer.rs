use lasview_core::{
    Clipboard, ClipboardError, ColorAttribute, DisplayStyle, ExportError, ExtractError,
    MeasurementMarker, Navigation, NavigationBoundary, PickOutcome, Point3, PointCloudRecord,
    RenderSurface, SessionError, Viewer, ViewerConfig,
};

#[derive(Debug, Default)]
struct RecordingSurface {
    clouds: Vec<(String, DisplayStyle)>,
    lines: Vec<MeasurementMarker>,
    clears: usize,
    camera_resets: usize,
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.clouds.clear();
        self.lines.clear();
        self.clears += 1;
    }

    fn add_cloud(&mut self, record: &PointCloudRecord, style: DisplayStyle) {
        self.clouds.push((record.file_name().into_owned(), style));
    }

    fn add_line(&mut self, marker: &MeasurementMarker) {
        self.lines.push(*marker);
    }

    fn remove_line(&mut self, marker: &MeasurementMarker) {
        self.lines.retain(|line| line != marker);
    }

    fn reset_camera(&mut self) {
        self.camera_resets += 1;
    }
}

#[derive(Default)]
struct MemoryClipboard {
    contents: Option<String>,
    broken: bool,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError("no display".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

fn record(name: &str, x: f64, y: f64) -> PointCloudRecord {
    PointCloudRecord::new(
        format!("/scans/{name}"),
        vec![Point3::new(x, y, 0.0), Point3::new(x + 2.0, y + 2.0, 0.1)],
        ColorAttribute::Elevation(vec![0.0, 0.1]),
    )
    .unwrap()
}

fn loaded_viewer() -> Viewer<RecordingSurface> {
    let mut viewer = Viewer::new(&ViewerConfig::default(), RecordingSurface::default());
    viewer.load_records(vec![
        record("Detection_10.las", 0.0, 0.0),
        record("Detection_11.las", 10.0, 20.0),
        record("unlabelled.las", 5.0, 5.0),
    ]);
    viewer
}

fn shown(viewer: &Viewer<RecordingSurface>) -> Vec<String> {
    viewer
        .surface()
        .clouds
        .iter()
        .map(|(name, _)| name.clone())
        .collect()
}

#[test]
fn test_load_shows_first_record() {
    let viewer = loaded_viewer();
    assert_eq!(shown(&viewer), vec!["Detection_10.las"]);
    assert_eq!(viewer.surface().camera_resets, 1);
}

#[test]
fn test_empty_load_shows_nothing() {
    let mut viewer = loaded_viewer();
    viewer.load_records(Vec::new());
    assert!(shown(&viewer).is_empty());
    assert_eq!(viewer.session().visible_count(), 0);
    assert_eq!(viewer.next(), Err(SessionError::NoSelection));
}

#[test]
fn test_navigation_redraws_single_record() {
    let mut viewer = loaded_viewer();
    viewer.show(2).unwrap();
    assert_eq!(shown(&viewer), vec!["Detection_10.las", "unlabelled.las"]);

    assert_eq!(
        viewer.next().unwrap(),
        Navigation::Boundary(NavigationBoundary::AtLast)
    );
    assert_eq!(shown(&viewer).len(), 2);

    assert_eq!(viewer.previous().unwrap(), Navigation::Boundary(NavigationBoundary::AtFirst));

    viewer.select_only(1).unwrap();
    assert_eq!(viewer.previous().unwrap(), Navigation::Moved { index: 0 });
    assert_eq!(shown(&viewer), vec!["Detection_10.las"]);

    viewer.clear_visible();
    assert!(shown(&viewer).is_empty());
    assert_eq!(viewer.next(), Err(SessionError::NoSelection));
}

#[test]
fn test_measurement_keeps_one_line() {
    let mut viewer = loaded_viewer();
    let first = viewer.pick(Point3::new(0.0, 0.0, 0.0)).unwrap();
    assert!(matches!(first, PickOutcome::Pending { .. }));
    assert!(viewer.surface().lines.is_empty());

    let Some(PickOutcome::Completed { measurement, .. }) =
        viewer.pick(Point3::new(0.0, 0.0, 5.0))
    else {
        panic!("second pick completes");
    };
    assert_eq!(format!("{:.3}", measurement.distance), "500000.000");
    assert_eq!(viewer.surface().lines.len(), 1);

    viewer.pick(Point3::new(1.0, 1.0, 1.0));
    viewer.pick(Point3::new(1.0, 1.0, 1.5));
    assert_eq!(viewer.surface().lines.len(), 1);
    assert_eq!(viewer.surface().lines[0].to, Point3::new(1.0, 1.0, 1.5));

    // redraw keeps the live marker
    viewer.select_only(1).unwrap();
    assert_eq!(viewer.surface().lines.len(), 1);
}

#[test]
fn test_disabling_picking_releases_marker() {
    let mut viewer = loaded_viewer();
    viewer.pick(Point3::new(0.0, 0.0, 0.0));
    viewer.pick(Point3::new(0.0, 0.0, 1.0));
    viewer.pick(Point3::new(0.0, 0.0, 2.0));

    viewer.set_picking(false);
    assert!(viewer.surface().lines.is_empty());
    assert!(viewer.session().measurement().pending_picks().is_empty());
    assert!(viewer.pick(Point3::default()).is_none());

    viewer.set_picking(true);
    assert!(matches!(
        viewer.pick(Point3::default()),
        Some(PickOutcome::Pending { .. })
    ));
}

#[test]
fn test_reload_releases_marker() {
    let mut viewer = loaded_viewer();
    viewer.pick(Point3::new(0.0, 0.0, 0.0));
    viewer.pick(Point3::new(0.0, 0.0, 1.0));
    viewer.load_records(vec![record("Detection_99.las", 1.0, 1.0)]);
    assert!(viewer.surface().lines.is_empty());
    assert!(viewer.session().active_marker().is_none());
    assert_eq!(shown(&viewer), vec!["Detection_99.las"]);
}

#[test]
fn test_toggle_style() {
    let mut viewer = loaded_viewer();
    assert_eq!(viewer.toggle_style(), DisplayStyle::Uniform);
    assert_eq!(viewer.surface().clouds[0].1, DisplayStyle::Uniform);
    assert_eq!(viewer.toggle_style(), DisplayStyle::Attribute);
}

#[test]
fn test_copy_exports() {
    let mut viewer = loaded_viewer();
    let mut clipboard = MemoryClipboard::default();

    assert_eq!(viewer.copy_detection_id(&mut clipboard).unwrap(), "10");
    assert_eq!(clipboard.contents.as_deref(), Some("10"));

    viewer.select_only(1).unwrap();
    let coords = viewer.copy_coordinates(&mut clipboard).unwrap();
    assert_eq!(coords, "21.000000, 11.000000");

    viewer.select_only(2).unwrap();
    assert!(matches!(
        viewer.copy_detection_id(&mut clipboard),
        Err(ExportError::Extract(ExtractError::PatternNotFound(_)))
    ));
    assert_eq!(clipboard.contents.as_deref(), Some("21.000000, 11.000000"));

    viewer.clear_visible();
    assert_eq!(
        viewer.copy_coordinates(&mut clipboard),
        Err(ExportError::NoSelection)
    );
}

#[test]
fn test_clipboard_failure_is_reported() {
    let viewer = loaded_viewer();
    let mut clipboard = MemoryClipboard {
        broken: true,
        ..MemoryClipboard::default()
    };
    assert!(matches!(
        viewer.copy_detection_id(&mut clipboard),
        Err(ExportError::Clipboard(_))
    ));
    assert_eq!(viewer.session().visible_count(), 1);
}
