//! Folder ingestion.
//!
//! Lists the immediate point-cloud files of a directory, rejects oversized
//! batches before touching any file, then loads every candidate. Loading is
//! best-effort: per-file failures are logged and dropped, and only a folder
//! with no loadable file at all is an error.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use lasview_core::{PointCloudRecord, ViewerConfig};

use crate::loader::{CloudLoader, LasLoader};
use crate::{IngestError, Result};

/// Applies a [`CloudLoader`] to every candidate file in a folder.
#[derive(Debug, Clone)]
pub struct FolderIngestor<L = LasLoader> {
    config: ViewerConfig,
    loader: L,
}

impl FolderIngestor<LasLoader> {
    /// Creates an ingestor backed by a [`LasLoader`] with the same configuration.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_loader(config, LasLoader::new(config))
    }
}

impl<L: CloudLoader> FolderIngestor<L> {
    /// Creates an ingestor with a custom loader.
    pub fn with_loader(config: &ViewerConfig, loader: L) -> Self {
        Self {
            config: config.clone(),
            loader,
        }
    }

    /// The loader used per file.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Immediate files of `dir` with an accepted extension, in directory
    /// enumeration order. Subdirectories are ignored.
    ///
    /// # Errors
    /// [`IngestError::ReadDir`] if the directory cannot be listed.
    pub fn candidates(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|source| IngestError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping unreadable entry in {}: {e}", dir.display());
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.config.matches_extension(&path) {
                candidates.push(path);
            }
        }
        Ok(candidates)
    }

    /// Loads every candidate in `dir`.
    ///
    /// The output keeps directory enumeration order, also when loading runs
    /// on the rayon pool.
    ///
    /// # Errors
    /// [`IngestError::ReadDir`] if the directory cannot be listed,
    /// [`IngestError::TooManyFiles`] if the candidate count exceeds
    /// `max_files` (checked before any file is read), and
    /// [`IngestError::NoneValid`] if no candidate loads.
    pub fn ingest(&self, dir: &Path) -> Result<Vec<PointCloudRecord>> {
        let candidates = self.candidates(dir)?;
        if candidates.len() > self.config.max_files {
            return Err(IngestError::TooManyFiles {
                found: candidates.len(),
                limit: self.config.max_files,
            });
        }

        let results: Vec<_> = if self.config.parallel_load {
            candidates
                .par_iter()
                .map(|path| self.loader.load(path))
                .collect()
        } else {
            candidates
                .iter()
                .map(|path| self.loader.load(path))
                .collect()
        };

        let mut records = Vec::with_capacity(candidates.len());
        for (path, result) in candidates.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("skipping {}: {e}", path.display()),
            }
        }

        if records.is_empty() {
            return Err(IngestError::NoneValid {
                path: dir.to_path_buf(),
            });
        }

        log::info!(
            "loaded {} of {} point-cloud files from {}",
            records.len(),
            candidates.len(),
            dir.display()
        );
        Ok(records)
    }
}

/// Ingests `dir` with a [`LasLoader`].
///
/// # Errors
/// See [`FolderIngestor::ingest`].
pub fn ingest_folder(dir: &Path, config: &ViewerConfig) -> Result<Vec<PointCloudRecord>> {
    FolderIngestor::new(config).ingest(dir)
}
