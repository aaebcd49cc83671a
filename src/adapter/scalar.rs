//! Adapters of scalar leaves: text, boolean and numeric.

use super::vector::{boolean_column, numeric_column};
use crate::error::{DapError, Result};
use crate::model::{Data, MathType, Real, RepresentationalSet, ScalarType, Text};
use crate::process::{NumericKind, Valuator};
use crate::source::{Element, Value, VariableKind, Vector};

/// Value handling of a scalar leaf.
#[derive(Debug, Clone)]
pub enum ScalarLeaf {
    /// Text; its set slot is empty.
    Text,
    /// Boolean, read as 0 or 1.
    Boolean,
    /// Numeric, read through a valuator.
    Numeric {
        /// Storage kind.
        kind: NumericKind,
        /// Value pipeline.
        valuator: Valuator,
        /// Chosen representation.
        set: RepresentationalSet,
    },
}

/// Adapter of a single scalar variable.
#[derive(Debug, Clone)]
pub struct ScalarAdapter {
    scalar: ScalarType,
    ty: MathType,
    leaf: ScalarLeaf,
    sets: [Option<RepresentationalSet>; 1],
}

impl ScalarAdapter {
    /// Create an adapter for a leaf of type `scalar`.
    pub fn new(scalar: ScalarType, leaf: ScalarLeaf) -> Self {
        let sets = match &leaf {
            ScalarLeaf::Text => [None],
            ScalarLeaf::Boolean => [Some(RepresentationalSet::DiscreteRange { count: 2 })],
            ScalarLeaf::Numeric { set, .. } => [Some(*set)],
        };
        Self {
            ty: scalar.clone().into(),
            scalar,
            leaf,
            sets,
        }
    }

    /// Scalar type of the leaf.
    pub fn scalar_type(&self) -> &ScalarType {
        &self.scalar
    }

    /// Math type (always a scalar).
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Value handling.
    pub fn leaf(&self) -> &ScalarLeaf {
        &self.leaf
    }

    /// The leaf's single set slot, empty for text.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        &self.sets
    }

    /// Source kind this adapter reads.
    pub fn kind(&self) -> VariableKind {
        match &self.leaf {
            ScalarLeaf::Text => VariableKind::String,
            ScalarLeaf::Boolean => VariableKind::Boolean,
            ScalarLeaf::Numeric { kind, .. } => kind.variable_kind(),
        }
    }

    /// Convert a scalar instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        self.datum(Element::from(value))
    }

    /// Convert one raw element.
    pub fn datum(&self, element: Element<'_>) -> Result<Data> {
        match (&self.leaf, element) {
            (ScalarLeaf::Text, Element::String(s)) => Ok(Data::Text(Text {
                ty: self.scalar.clone(),
                value: s.to_string(),
            })),
            _ => Ok(Data::Real(Real {
                ty: self.scalar.clone(),
                value: self.real_value(element)?,
            })),
        }
    }

    /// Processed value of one element of a real leaf.
    pub fn real_value(&self, element: Element<'_>) -> Result<f64> {
        match (&self.leaf, element) {
            (ScalarLeaf::Boolean, Element::Boolean(b)) => Ok(if b { 1.0 } else { 0.0 }),
            (ScalarLeaf::Numeric { kind, valuator, .. }, element)
                if element.kind() == kind.variable_kind() =>
            {
                let raw = element
                    .as_f64()
                    .ok_or_else(|| self.mismatch(element))?;
                Ok(valuator.process(raw))
            },
            _ => Err(self.mismatch(element)),
        }
    }

    /// Processed values of a whole vector, when it holds this leaf's kind.
    pub fn column(&self, vector: &Vector) -> Option<Vec<f64>> {
        match &self.leaf {
            ScalarLeaf::Text => None,
            ScalarLeaf::Boolean => boolean_column(vector),
            ScalarLeaf::Numeric { kind, valuator, .. } => {
                numeric_column(vector, *kind).map(|raw| valuator.process_all(raw))
            },
        }
    }

    fn mismatch(&self, element: Element<'_>) -> DapError {
        DapError::type_mismatch(self.kind().name(), element.kind().name())
    }
}
