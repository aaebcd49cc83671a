//! Materialized data values.

use ndarray::Array2;
use std::sync::Arc;

use super::{DomainSet, MathType, RepresentationalSet, ScalarType};
use crate::error::{DapError, Result};
use crate::range::{LazyFieldAccessor, VirtualData};

/// A real number with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Real {
    /// Scalar type.
    pub ty: ScalarType,
    /// Value; NaN marks a missing value.
    pub value: f64,
}

/// A text value with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Scalar type.
    pub ty: ScalarType,
    /// Value.
    pub value: String,
}

/// A tuple of data values.
#[derive(Debug, Clone)]
pub struct Tuple {
    /// Tuple type.
    pub ty: MathType,
    /// Components in order.
    pub components: Vec<Data>,
}

/// A function whose range is flat, stored column-wise and materialized on demand.
#[derive(Debug, Clone)]
pub struct FlatField {
    ty: MathType,
    domain: DomainSet,
    range_sets: Vec<RepresentationalSet>,
    accessor: Arc<dyn LazyFieldAccessor>,
}

impl FlatField {
    /// Create a flat field.
    ///
    /// The accessor must produce one row per real range component and one
    /// column per domain point.
    pub fn new(
        ty: MathType,
        domain: DomainSet,
        range_sets: Vec<RepresentationalSet>,
        accessor: Arc<dyn LazyFieldAccessor>,
    ) -> Result<Self> {
        let (components, samples) = accessor.shape();
        let expected = ty
            .as_function()
            .map(|f| f.range().real_components().len())
            .unwrap_or(0);
        if components != expected {
            return Err(DapError::malformed(format!(
                "flat field of {ty} needs {expected} components, accessor provides {components}"
            )));
        }
        if samples != domain.len() {
            return Err(DapError::malformed(format!(
                "domain has {} points but range has {samples} samples",
                domain.len()
            )));
        }
        Ok(Self {
            ty,
            domain,
            range_sets,
            accessor,
        })
    }

    /// Function type.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Domain set.
    pub fn domain(&self) -> &DomainSet {
        &self.domain
    }

    /// One representational set per range component.
    pub fn range_sets(&self) -> &[RepresentationalSet] {
        &self.range_sets
    }

    /// Number of domain points.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Materialize the value table (components x samples).
    ///
    /// Every call re-derives the table from the source vectors.
    pub fn values(&self) -> Result<Array2<f64>> {
        self.accessor.materialize()
    }
}

/// A function whose range is not flat; samples are resolved on read.
#[derive(Debug, Clone)]
pub struct Field {
    ty: MathType,
    domain: DomainSet,
    samples: Vec<VirtualData>,
}

impl Field {
    /// Create a field.
    pub fn new(ty: MathType, domain: DomainSet, samples: Vec<VirtualData>) -> Result<Self> {
        if samples.len() != domain.len() {
            return Err(DapError::malformed(format!(
                "domain has {} points but {} samples were supplied",
                domain.len(),
                samples.len()
            )));
        }
        Ok(Self { ty, domain, samples })
    }

    /// Function type.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Domain set.
    pub fn domain(&self) -> &DomainSet {
        &self.domain
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Resolve the sample at `index`.
    pub fn sample(&self, index: usize) -> Result<Data> {
        self.samples
            .get(index)
            .ok_or(DapError::IndexOutOfRange {
                index,
                length: self.samples.len(),
            })?
            .resolve()
    }

    /// Resolve every sample.
    pub fn samples(&self) -> Result<Vec<Data>> {
        self.samples.iter().map(VirtualData::resolve).collect()
    }
}

/// A value of the internal data model.
#[derive(Debug, Clone)]
pub enum Data {
    /// Real scalar.
    Real(Real),
    /// Text scalar.
    Text(Text),
    /// Tuple of values.
    Tuple(Tuple),
    /// Function with a flat range.
    FlatField(FlatField),
    /// Function with a nested range.
    Field(Field),
    /// A set of points (used for multi-valued attributes).
    Set(DomainSet),
}

impl Data {
    /// Type of the value.
    pub fn math_type(&self) -> MathType {
        match self {
            Data::Real(r) => r.ty.clone().into(),
            Data::Text(t) => t.ty.clone().into(),
            Data::Tuple(t) => t.ty.clone(),
            Data::FlatField(f) => f.ty.clone(),
            Data::Field(f) => f.ty.clone(),
            Data::Set(s) => s.math_type(),
        }
    }

    /// The real value, if this is a real scalar.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Data::Real(r) => Some(r.value),
            _ => None,
        }
    }

    /// The text value, if this is a text scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Data::Text(t) => Some(&t.value),
            _ => None,
        }
    }

    /// Tuple components, if this is a tuple.
    pub fn components(&self) -> Option<&[Data]> {
        match self {
            Data::Tuple(t) => Some(&t.components),
            _ => None,
        }
    }

    /// The flat field, if this is one.
    pub fn as_flat_field(&self) -> Option<&FlatField> {
        match self {
            Data::FlatField(f) => Some(f),
            _ => None,
        }
    }

    /// The nested field, if this is one.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Data::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Short variant name, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Data::Real(_) => "Real",
            Data::Text(_) => "Text",
            Data::Tuple(_) => "Tuple",
            Data::FlatField(_) => "FlatField",
            Data::Field(_) => "Field",
            Data::Set(_) => "Set",
        }
    }
}
