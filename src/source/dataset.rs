//! Dataset descriptor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::{AttributeTable, Value, Variable};

/// Attribute table name holding dataset-wide attributes.
pub const GLOBAL_ATTRIBUTES: &str = "NC_GLOBAL";

/// A self-describing dataset: variables, their attributes and optionally their data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Top-level variables in declared order.
    pub variables: Vec<Variable>,
    /// Attribute tables keyed by variable name, plus [`GLOBAL_ATTRIBUTES`].
    #[serde(default)]
    pub attributes: AttributeTable,
    /// Instance data keyed by variable name.
    #[serde(default)]
    pub values: HashMap<String, Value>,
}

impl Dataset {
    /// Attribute table of a top-level variable (empty if none is declared).
    pub fn attribute_table(&self, variable: &str) -> &AttributeTable {
        self.attributes.child_table(variable)
    }

    /// Dataset-wide attributes, if declared.
    pub fn global_attributes(&self) -> Option<&AttributeTable> {
        self.attributes.find_table(GLOBAL_ATTRIBUTES)
    }

    /// Instance data of a top-level variable.
    pub fn value(&self, variable: &str) -> Option<&Value> {
        self.values.get(variable)
    }
}

/// A dataset together with where it was read from.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    /// Path to the descriptor file.
    pub file_path: PathBuf,
    /// The decoded dataset.
    pub dataset: Dataset,
}

impl DatasetInfo {
    /// Create a new dataset info.
    pub fn new(file_path: PathBuf, dataset: Dataset) -> Self {
        Self { file_path, dataset }
    }
}
