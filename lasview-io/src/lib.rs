//! lasview-io: LAS cloud loading and folder ingestion for lasview.
//!
//! [`LasLoader`] memory-maps a single LAS file, decodes its raw integer
//! coordinates and colour channels and normalises them into a
//! [`lasview_core::PointCloudRecord`]. [`FolderIngestor`] applies a loader to
//! every candidate file in a directory.
//!

mod error;
pub mod ingest;
pub mod loader;

pub use error::{IngestError, Result};
pub use ingest::{ingest_folder, FolderIngestor};
pub use loader::{read_raw, CloudLoader, LasLoader};
