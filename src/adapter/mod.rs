//! Adapters from source variables to the internal data model.
//!
//! The [`VariableAdapterFactory`] inspects a [`Variable`](crate::source::Variable)
//! and its attribute table once and builds an immutable [`VariableAdapter`].
//! The adapter knows the variable's [`MathType`] and representational sets and
//! converts any number of source instances into [`Data`].

mod array;
mod factory;
mod grid;
mod list;
mod scalar;
mod sequence;
mod structure;
mod type_mapper;
mod vector;

pub use array::{ArrayAdapter, ArrayAxis};
pub use factory::VariableAdapterFactory;
pub use grid::{GridAdapter, GridMapAdapter};
pub use list::ListAdapter;
pub use scalar::{ScalarAdapter, ScalarLeaf};
pub use sequence::SequenceAdapter;
pub use structure::StructureAdapter;
pub use type_mapper::TypeMapper;

use crate::error::{DapError, Result};
use crate::model::{Data, MathType, RepresentationalSet};
use crate::source::{Element, Value, VariableKind, Vector};

/// Adapter of one source variable, by structural kind.
#[derive(Debug, Clone)]
pub enum VariableAdapter {
    /// Text, boolean or numeric leaf.
    Scalar(ScalarAdapter),
    /// Record of members.
    Structure(StructureAdapter),
    /// Rows of members.
    Sequence(SequenceAdapter),
    /// Vector of scalars.
    List(ListAdapter),
    /// Multi-dimensional array.
    Array(ArrayAdapter),
    /// Array on coordinate maps.
    Grid(GridAdapter),
}

impl VariableAdapter {
    /// Structural kind of the adapted variable.
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::Scalar(a) => a.kind(),
            Self::Structure(_) => VariableKind::Structure,
            Self::Sequence(_) => VariableKind::Sequence,
            Self::List(_) => VariableKind::List,
            Self::Array(_) => VariableKind::Array,
            Self::Grid(_) => VariableKind::Grid,
        }
    }

    /// Name of the adapted variable.
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(a) => a.scalar_type().name(),
            Self::Structure(a) => a.name(),
            Self::Sequence(a) => a.name(),
            Self::List(a) => a.name(),
            Self::Array(a) => a.name(),
            Self::Grid(a) => a.name(),
        }
    }

    /// Type of the converted data.
    pub fn math_type(&self) -> &MathType {
        match self {
            Self::Scalar(a) => a.math_type(),
            Self::Structure(a) => a.math_type(),
            Self::Sequence(a) => a.math_type(),
            Self::List(a) => a.math_type(),
            Self::Array(a) => a.math_type(),
            Self::Grid(a) => a.math_type(),
        }
    }

    /// One slot per scalar leaf in flattening order, empty for text leaves;
    /// for functions, the slots of the range.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        match self {
            Self::Scalar(a) => a.representational_sets(),
            Self::Structure(a) => a.representational_sets(),
            Self::Sequence(a) => a.representational_sets(),
            Self::List(a) => a.representational_sets(),
            Self::Array(a) => a.representational_sets(),
            Self::Grid(a) => a.representational_sets(),
        }
    }

    /// Whether the converted data is a real scalar or a flat tuple.
    pub fn is_flat(&self) -> bool {
        self.math_type().is_flat()
    }

    /// Number of real leaves of a flat adapter; zero otherwise.
    pub fn real_leaf_count(&self) -> usize {
        self.math_type().real_components().len()
    }

    /// Convert one source instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        match self {
            Self::Scalar(a) => a.data(value),
            Self::Structure(a) => a.data(value),
            Self::Sequence(a) => a.data(value),
            Self::List(a) => a.data(value),
            Self::Array(a) => a.data(value),
            Self::Grid(a) => a.data(value),
        }
    }

    /// Convert one element of a vector whose elements follow this adapter.
    pub fn datum(&self, element: Element<'_>) -> Result<Data> {
        match (self, element) {
            (_, Element::Compound(value)) => self.data(value),
            (Self::Scalar(a), element) => a.datum(element),
            (_, element) => Err(self.mismatch(element)),
        }
    }

    /// Append the processed real leaves of one element, in flattening order.
    pub fn flat_values(&self, element: Element<'_>, out: &mut Vec<f64>) -> Result<()> {
        match (self, element) {
            (Self::Scalar(a), Element::Compound(value)) => out.push(a.real_value(Element::from(value))?),
            (Self::Scalar(a), element) => out.push(a.real_value(element)?),
            (Self::Structure(a), Element::Compound(value)) => a.flat_values(value, out)?,
            (_, element) => return Err(self.mismatch(element)),
        }
        Ok(())
    }

    /// Processed values of a whole vector of scalar leaves, if this is one.
    pub fn column(&self, vector: &Vector) -> Option<Vec<f64>> {
        match self {
            Self::Scalar(a) => a.column(vector),
            _ => None,
        }
    }

    fn mismatch(&self, element: Element<'_>) -> DapError {
        DapError::type_mismatch(
            format!("{} ({})", self.kind().name(), self.name()),
            element.kind().name(),
        )
    }
}
