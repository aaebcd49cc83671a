//! Adapter of lists of scalars.

use std::sync::Arc;

use super::vector::function_data;
use super::VariableAdapter;
use crate::error::{DapError, Result};
use crate::model::{Data, DomainSet, MathType, RepresentationalSet, ScalarType};
use crate::source::Value;

/// Adapter of a list, read as a function from element index to element.
#[derive(Debug, Clone)]
pub struct ListAdapter {
    name: String,
    ty: MathType,
    index: ScalarType,
    template: Arc<VariableAdapter>,
}

impl ListAdapter {
    /// Create a list adapter. The template must not be compound.
    pub fn new(name: impl Into<String>, index: ScalarType, template: Arc<VariableAdapter>) -> Self {
        let ty = MathType::function(index.clone().into(), template.math_type().clone());
        Self {
            name: name.into(),
            ty,
            index,
            template,
        }
    }

    /// List name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(index -> element)`.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Adapter of one element.
    pub fn template(&self) -> &Arc<VariableAdapter> {
        &self.template
    }

    /// Sets of the element template.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        self.template.representational_sets()
    }

    /// Convert a list instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        let vector = match value {
            Value::List(vector) => vector,
            other => return Err(DapError::type_mismatch("list", other.kind().name())),
        };
        let domain = DomainSet::Integer1D {
            ty: self.index.clone(),
            length: vector.len(),
        };
        function_data(&self.ty, domain, &self.template, vector.clone())
    }
}
