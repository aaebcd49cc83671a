//! Dataset descriptor reading.

use std::fs;
use std::path::Path;

use super::{Dataset, DatasetInfo};
use crate::error::{DapError, Result};

/// Reads dataset descriptors.
#[derive(Debug)]
pub struct DatasetReader;

impl DatasetReader {
    /// Read a JSON dataset descriptor from a file.
    pub fn read_file(path: &Path) -> Result<DatasetInfo> {
        let text = fs::read_to_string(path).map_err(|e| DapError::file_open(path.to_path_buf(), e))?;
        let dataset = Self::read_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            variables = dataset.variables.len(),
            "read dataset descriptor"
        );
        Ok(DatasetInfo::new(path.to_path_buf(), dataset))
    }

    /// Decode a JSON dataset descriptor.
    pub fn read_str(text: &str) -> Result<Dataset> {
        Ok(serde_json::from_str(text)?)
    }
}
