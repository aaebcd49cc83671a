//! Deferred materialization of flat field tables.

use ndarray::Array2;
use std::fmt::Debug;
use std::sync::Arc;

use crate::adapter::VariableAdapter;
use crate::error::{DapError, Result};
use crate::source::Vector;

/// Produces the value table of a flat field on request.
pub trait LazyFieldAccessor: Debug + Send + Sync {
    /// `(components, samples)` of the table.
    fn shape(&self) -> (usize, usize);

    /// Build a fresh table of processed values, one row per component.
    fn materialize(&self) -> Result<Array2<f64>>;
}

/// Accessor over a shared source vector whose elements follow a flat template.
#[derive(Debug, Clone)]
pub struct VectorFieldAccessor {
    template: Arc<VariableAdapter>,
    vector: Vector,
}

impl VectorFieldAccessor {
    /// Create an accessor. The template must be flat.
    pub fn new(template: Arc<VariableAdapter>, vector: Vector) -> Result<Self> {
        if !template.is_flat() {
            return Err(DapError::type_mismatch(
                "flat template",
                template.math_type().to_string(),
            ));
        }
        Ok(Self { template, vector })
    }
}

impl LazyFieldAccessor for VectorFieldAccessor {
    fn shape(&self) -> (usize, usize) {
        (self.template.real_leaf_count(), self.vector.len())
    }

    fn materialize(&self) -> Result<Array2<f64>> {
        let (components, samples) = self.shape();

        // Single real leaf: read the whole column and process it in one pass.
        if components == 1 {
            if let Some(column) = self.template.column(&self.vector) {
                return Array2::from_shape_vec((1, samples), column)
                    .map_err(|e| DapError::malformed(e.to_string()));
            }
        }

        let mut table = Array2::from_elem((components, samples), f64::NAN);
        let mut row = Vec::with_capacity(components);
        for sample in 0..samples {
            row.clear();
            let element = self.vector.element(sample).ok_or(DapError::IndexOutOfRange {
                index: sample,
                length: samples,
            })?;
            self.template.flat_values(element, &mut row)?;
            if row.len() != components {
                return Err(DapError::malformed(format!(
                    "sample {sample} has {} components, expected {components}",
                    row.len()
                )));
            }
            for (component, value) in row.iter().enumerate() {
                table[[component, sample]] = *value;
            }
        }
        Ok(table)
    }
}
