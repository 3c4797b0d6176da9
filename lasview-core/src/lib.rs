//! lasview-core: Core types and state for the LiDAR point-cloud session engine.
//!
//! This crate provides the point-cloud data model, colour normalisation,
//! the session store with its navigation rules, the two-pick measurement
//! pipeline and the detection export helpers. File decoding lives in
//! `lasview-io`; rendering and clipboard access are consumed through the
//! traits in [`surface`].
//!

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod measurement;
pub mod raw;
pub mod record;
pub mod session;
pub mod surface;
pub mod viewer;

pub use config::{ColorBand, ViewerConfig};
pub use error::{
    ClipboardError, ConfigError, ExportError, ExtractError, LoadError, NavigationBoundary, RecordError,
    SessionError,
};
pub use export::{centroid_coordinate, detection_id, ExportRow};
pub use measurement::{Measurement, MeasurementMarker, MeasurementPipeline, PickOutcome};
pub use raw::{AxisTransform, RawCloud, RawColors};
pub use record::{ColorAttribute, ColorMode, Point3, PointCloudRecord};
pub use session::{Navigation, Session};
pub use surface::{Clipboard, DisplayStyle, RenderSurface};
pub use viewer::Viewer;
