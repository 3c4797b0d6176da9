//! LAS cloud loader.
//!
//! Files are memory-mapped and decoded with the `las` crate. Every failure is
//! converted into [`LoadError`]; nothing from the underlying readers escapes
//! as a panic or a foreign error type.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use las::Reader;
use memmap2::Mmap;

use lasview_core::{AxisTransform, LoadError, PointCloudRecord, RawCloud, ViewerConfig};

/// Turns one file into a record.
///
/// Implementations must be pure functions of the path so that the ingestor
/// can run them in parallel.
pub trait CloudLoader: Send + Sync {
    /// Loads and normalises a single file.
    ///
    /// # Errors
    /// [`LoadError::Empty`] for a file without points,
    /// [`LoadError::ReadFailed`] for anything else that goes wrong.
    fn load(&self, path: &Path) -> Result<PointCloudRecord, LoadError>;
}

/// Production loader for `.las` files.
#[derive(Debug, Clone, Default)]
pub struct LasLoader {
    config: ViewerConfig,
}

impl LasLoader {
    /// Creates a loader using the Z scale factor and colour band of `config`.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Configuration this loader normalises with.
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

impl CloudLoader for LasLoader {
    fn load(&self, path: &Path) -> Result<PointCloudRecord, LoadError> {
        let raw = read_raw(path)?;
        log::debug!(
            "{}: {} points, colour: {}",
            path.display(),
            raw.len(),
            raw.colors.is_some()
        );
        PointCloudRecord::from_raw(path, &raw, &self.config)
    }
}

fn read_failed(path: &Path, err: impl std::fmt::Display) -> LoadError {
    LoadError::ReadFailed(format!("{}: {err}", path.display()))
}

fn axis(transform: &las::Transform) -> AxisTransform {
    AxisTransform::new(transform.scale, transform.offset)
}

/// Point count declared by `header`, provided a `file_len`-byte file is large
/// enough to hold that many point records.
fn checked_point_count(header: &las::Header, file_len: u64) -> Result<usize, String> {
    let declared = header.number_of_points();
    let record_len = u64::from(header.point_format().len()).max(1);
    let available = file_len / record_len;
    if declared > available {
        return Err(format!(
            "header declares {declared} points but the file holds at most {available}"
        ));
    }
    usize::try_from(declared).map_err(|e| e.to_string())
}

/// Decodes a LAS file into stored integer coordinates, header transforms and
/// optional colour columns.
///
/// # Errors
/// [`LoadError::ReadFailed`] if the file cannot be opened, mapped or parsed,
/// or if its header declares more points than the file contains.
pub fn read_raw(path: &Path) -> Result<RawCloud, LoadError> {
    let file = File::open(path).map_err(|e| read_failed(path, e))?;
    // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
    #[allow(unsafe_code)]
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| read_failed(path, e))?;

    let file_len = mmap.len() as u64;

    let mut reader = Reader::new(Cursor::new(mmap)).map_err(|e| read_failed(path, e))?;
    let header = reader.header();
    let transforms = *header.transforms();
    let has_color = header.point_format().has_color;
    let capacity = checked_point_count(header, file_len).map_err(|e| read_failed(path, e))?;

    let mut raw = RawCloud::with_capacity(
        capacity,
        [
            axis(&transforms.x),
            axis(&transforms.y),
            axis(&transforms.z),
        ],
        has_color,
    );

    for point in reader.points() {
        let point = point.map_err(|e| read_failed(path, e))?;
        let stored = point
            .into_raw(&transforms)
            .map_err(|e| read_failed(path, e))?;
        let color = stored.color.map(|c| [c.red, c.green, c.blue]);
        if has_color && color.is_none() {
            return Err(read_failed(path, "point format declares RGB but a point has none"));
        }
        raw.push([stored.x, stored.y, stored.z], color);
    }

    Ok(raw)
}
