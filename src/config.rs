//! Conversion configuration.

use serde::Deserialize;
use std::path::Path;

use crate::error::{DapError, Result};

/// Names of the attributes the value pipeline looks up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributeNames {
    /// Unit attributes, in lookup order. The first string-typed match wins.
    pub units: Vec<String>,
    /// Two-valued valid range. Preferred over `valid_min`/`valid_max`.
    pub valid_range: String,
    /// Lower valid bound.
    pub valid_min: String,
    /// Upper valid bound.
    pub valid_max: String,
    /// Fill sentinel.
    pub fill_value: String,
    /// Missing-value sentinel.
    pub missing_value: String,
    /// Packing scale.
    pub scale_factor: String,
    /// Packing offset.
    pub add_offset: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            units: ["units", "unit", "UNITS", "UNIT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            valid_range: "valid_range".to_string(),
            valid_min: "valid_min".to_string(),
            valid_max: "valid_max".to_string(),
            fill_value: "_FillValue".to_string(),
            missing_value: "missing_value".to_string(),
            scale_factor: "scale_factor".to_string(),
            add_offset: "add_offset".to_string(),
        }
    }
}

/// Configuration of a conversion session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Attribute lookup names.
    pub attributes: AttributeNames,
    /// Maximum number of memoized unpackers. Zero is treated as one.
    pub unpacker_cache_capacity: usize,
    /// Suffix of the index type of sequences and lists.
    pub index_suffix: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            attributes: AttributeNames::default(),
            unpacker_cache_capacity: 64,
            index_suffix: "_index".to_string(),
        }
    }
}

impl ConversionConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DapError::file_open(path.to_path_buf(), e))?;
        Ok(serde_json::from_str(&text)?)
    }
}
