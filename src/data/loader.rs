//! Reference Data Loader Module
//! Reads the bundled reference CSV once and builds the option index.

use crate::data::{parse, ReferenceField, ReferenceIndex};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Owns the reference snapshot for one application run.
pub struct ReferenceLoader {
    index: Option<ReferenceIndex>,
    file_path: PathBuf,
}

impl ReferenceLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            index: None,
            file_path: file_path.into(),
        }
    }

    /// Read and index the CSV file.
    pub fn load_csv(path: &Path) -> Result<ReferenceIndex, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let rows = parse(text);
        debug!("Parsed {} CSV rows from {:?}", rows.len(), path);

        let index = ReferenceIndex::from_rows(&rows);
        if index.is_empty() {
            warn!("Reference CSV {:?} has no data rows", path);
        }
        info!(
            "Loaded reference data: {} rows, {} device names, {} manufacturers, {} classifications",
            index.row_count(),
            index.options(ReferenceField::DeviceName).len(),
            index.options(ReferenceField::Manufacturer).len(),
            index.options(ReferenceField::Classification).len(),
        );
        Ok(index)
    }

    /// Get the configured CSV path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Store the index produced by a background load.
    pub fn set_index(&mut self, index: ReferenceIndex) {
        self.index = Some(index);
    }

    /// Whether the one-time load has settled (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Option list for a field, empty until loaded.
    pub fn options(&self, field: ReferenceField) -> &[String] {
        self.index
            .as_ref()
            .map(|index| index.options(field))
            .unwrap_or(&[])
    }
}
