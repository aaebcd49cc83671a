//! Adapter of grids: a primary array sampled on explicit coordinate maps.

use std::sync::Arc;

use super::vector::{function_data, numeric_column};
use super::VariableAdapter;
use crate::error::{DapError, Result};
use crate::model::{Data, DomainSet, MathType, RepresentationalSet, ScalarType};
use crate::process::{NumericKind, Valuator};
use crate::source::{Value, Vector};

/// Adapter of one coordinate map of a grid.
#[derive(Debug, Clone)]
pub struct GridMapAdapter {
    ty: ScalarType,
    kind: NumericKind,
    valuator: Valuator,
    size: usize,
    set: RepresentationalSet,
}

impl GridMapAdapter {
    /// Create a map adapter for `size` coordinates of `kind`.
    pub fn new(
        ty: ScalarType,
        kind: NumericKind,
        valuator: Valuator,
        size: usize,
        set: RepresentationalSet,
    ) -> Self {
        Self {
            ty,
            kind,
            valuator,
            size,
            set,
        }
    }

    /// Domain scalar of the map.
    pub fn scalar_type(&self) -> &ScalarType {
        &self.ty
    }

    /// Number of coordinates.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Representation of the coordinate values.
    pub fn representational_set(&self) -> RepresentationalSet {
        self.set
    }

    /// Processed coordinates as a one-dimensional gridded set.
    pub fn domain_set(&self, vector: &Vector) -> Result<DomainSet> {
        if vector.len() != self.size {
            return Err(DapError::malformed(format!(
                "map {} has {} coordinates, expected {}",
                self.ty.name(),
                vector.len(),
                self.size
            )));
        }
        let raw = numeric_column(vector, self.kind).ok_or_else(|| {
            DapError::type_mismatch(self.kind.variable_kind().name(), vector.type_name())
        })?;
        Ok(DomainSet::Gridded1D {
            ty: self.ty.clone(),
            samples: self.valuator.process_all(raw),
        })
    }
}

/// Adapter of a grid, read as a function from map coordinates to array elements.
#[derive(Debug, Clone)]
pub struct GridAdapter {
    name: String,
    ty: MathType,
    domain_ty: MathType,
    template: Arc<VariableAdapter>,
    length: usize,
    maps: Vec<GridMapAdapter>,
}

impl GridAdapter {
    /// Create a grid adapter from the primary array's template and one map per
    /// dimension, in declared order.
    pub fn new(
        name: impl Into<String>,
        template: Arc<VariableAdapter>,
        maps: Vec<GridMapAdapter>,
    ) -> Result<Self> {
        let name = name.into();
        let length = maps
            .iter()
            .try_fold(1usize, |acc, map| acc.checked_mul(map.size))
            .ok_or_else(|| DapError::malformed(format!("grid {name} is too large")))?;
        let domain_ty = MathType::tuple(maps.iter().rev().map(|m| m.ty.clone().into()).collect())
            .map_err(|_| DapError::malformed(format!("grid {name} has no maps")))?;
        let ty = MathType::function(domain_ty.clone(), template.math_type().clone());
        Ok(Self {
            name,
            ty,
            domain_ty,
            template,
            length,
            maps,
        })
    }

    /// Grid name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(maps -> element)` with the maps in reversed order.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Adapter of one element of the primary array.
    pub fn template(&self) -> &Arc<VariableAdapter> {
        &self.template
    }

    /// Map adapters in declared order.
    pub fn maps(&self) -> &[GridMapAdapter] {
        &self.maps
    }

    /// Sets of the primary array's elements.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        self.template.representational_sets()
    }

    /// Convert a grid instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        let (array, maps) = match value {
            Value::Grid { array, maps } => (array, maps),
            other => return Err(DapError::type_mismatch("grid", other.kind().name())),
        };
        if maps.len() != self.maps.len() {
            return Err(DapError::malformed(format!(
                "grid {} has {} map vectors, expected {}",
                self.name,
                maps.len(),
                self.maps.len()
            )));
        }
        if array.len() != self.length {
            return Err(DapError::malformed(format!(
                "grid {} has {} samples, maps give {}",
                self.name,
                array.len(),
                self.length
            )));
        }

        let mut factors = self
            .maps
            .iter()
            .zip(maps)
            .map(|(map, vector)| map.domain_set(vector))
            .collect::<Result<Vec<_>>>()?;
        let domain = if factors.len() == 1 {
            factors.remove(0)
        } else {
            factors.reverse();
            DomainSet::Product {
                ty: self.domain_ty.clone(),
                factors,
            }
        };
        function_data(&self.ty, domain, &self.template, array.clone())
    }
}
