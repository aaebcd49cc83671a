//! Adapter of sequences: a variable number of rows of members.

use std::sync::Arc;

use super::vector::function_data;
use super::VariableAdapter;
use crate::error::{DapError, Result};
use crate::model::{Data, DomainSet, MathType, RepresentationalSet, ScalarType};
use crate::source::{Value, Vector};

/// Adapter of a sequence, read as a function from row index to row.
#[derive(Debug, Clone)]
pub struct SequenceAdapter {
    name: String,
    ty: MathType,
    index: ScalarType,
    row: Arc<VariableAdapter>,
}

impl SequenceAdapter {
    /// Create a sequence adapter from its index type and row adapter.
    pub fn new(name: impl Into<String>, index: ScalarType, row: Arc<VariableAdapter>) -> Self {
        let ty = MathType::function(index.clone().into(), row.math_type().clone());
        Self {
            name: name.into(),
            ty,
            index,
            row,
        }
    }

    /// Sequence name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(index -> row)`.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Adapter of one row.
    pub fn row(&self) -> &Arc<VariableAdapter> {
        &self.row
    }

    /// Sets of the row members.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        self.row.representational_sets()
    }

    /// Convert a sequence instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        let rows = match value {
            Value::Sequence(rows) => rows,
            other => return Err(DapError::type_mismatch("sequence", other.kind().name())),
        };
        let domain = DomainSet::Integer1D {
            ty: self.index.clone(),
            length: rows.len(),
        };
        function_data(&self.ty, domain, &self.row, Vector::Compound(Arc::clone(rows)))
    }
}
