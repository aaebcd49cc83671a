//! Adapter of multi-dimensional arrays.

use std::sync::Arc;

use super::vector::function_data;
use super::VariableAdapter;
use crate::error::{DapError, Result};
use crate::model::{Data, DomainSet, LinearAxis, MathType, RepresentationalSet, ScalarType};
use crate::source::{Dimension, Value};

/// One dimension of an array with its domain scalar type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAxis {
    /// Domain scalar of the dimension.
    pub ty: ScalarType,
    /// Declared dimension.
    pub dimension: Dimension,
    last: usize,
}

impl ArrayAxis {
    /// Pair a dimension with its domain scalar; `None` when the dimension's
    /// last index overflows.
    pub fn new(ty: ScalarType, dimension: Dimension) -> Option<Self> {
        let last = dimension.last()?;
        Some(Self { ty, dimension, last })
    }

    fn is_unconstrained(&self) -> bool {
        self.dimension.start == 0 && self.dimension.stride == 1
    }

    fn linear(&self) -> LinearAxis {
        LinearAxis {
            ty: self.ty.clone(),
            first: self.dimension.start as f64,
            last: self.last as f64,
            length: self.dimension.size,
        }
    }
}

/// Adapter of an array, read as a function from dimension indices to elements.
///
/// The domain lists dimensions innermost (fastest varying) first, the reverse
/// of their declared order.
#[derive(Debug, Clone)]
pub struct ArrayAdapter {
    name: String,
    ty: MathType,
    domain_ty: MathType,
    axes: Vec<ArrayAxis>,
    length: usize,
    template: Arc<VariableAdapter>,
}

impl ArrayAdapter {
    /// Create an array adapter from its axes (declared order) and element template.
    pub fn new(name: impl Into<String>, axes: Vec<ArrayAxis>, template: Arc<VariableAdapter>) -> Result<Self> {
        let name = name.into();
        let length = axes
            .iter()
            .try_fold(1usize, |acc, axis| acc.checked_mul(axis.dimension.size))
            .ok_or_else(|| DapError::malformed(format!("array {name} is too large")))?;
        let domain_ty = MathType::tuple(axes.iter().rev().map(|a| a.ty.clone().into()).collect())
            .map_err(|_| DapError::malformed(format!("array {name} has no dimensions")))?;
        let ty = MathType::function(domain_ty.clone(), template.math_type().clone());
        Ok(Self {
            name,
            ty,
            domain_ty,
            axes,
            length,
            template,
        })
    }

    /// Array name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(domain -> element)` with the domain in reversed dimension order.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Axes in declared order.
    pub fn axes(&self) -> &[ArrayAxis] {
        &self.axes
    }

    /// Adapter of one element.
    pub fn template(&self) -> &Arc<VariableAdapter> {
        &self.template
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Sets of the element template.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        self.template.representational_sets()
    }

    /// The sampled domain.
    pub fn domain(&self) -> DomainSet {
        match self.axes.as_slice() {
            [axis] if axis.is_unconstrained() => DomainSet::Integer1D {
                ty: axis.ty.clone(),
                length: axis.dimension.size,
            },
            [axis] => DomainSet::Linear1D(axis.linear()),
            axes => DomainSet::LinearND {
                ty: self.domain_ty.clone(),
                axes: axes.iter().rev().map(ArrayAxis::linear).collect(),
            },
        }
    }

    /// Convert an array instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        let vector = match value {
            Value::Array(vector) => vector,
            other => return Err(DapError::type_mismatch("array", other.kind().name())),
        };
        if vector.len() != self.length {
            return Err(DapError::malformed(format!(
                "array {} has {} samples, dimensions give {}",
                self.name,
                vector.len(),
                self.length
            )));
        }
        function_data(&self.ty, self.domain(), &self.template, vector.clone())
    }
}
