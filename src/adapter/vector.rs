//! Helpers shared by the adapters of vector-valued kinds.
//!
//! Arrays, lists, sequences and grids all end up as a function from a domain set
//! to the samples of one shared vector; [`function_data`] builds that function.

use std::sync::Arc;

use super::VariableAdapter;
use crate::error::Result;
use crate::model::{Data, DomainSet, Field, FlatField, MathType};
use crate::process::NumericKind;
use crate::range::{samples_of, AdapterDataMaker, Range, VectorFieldAccessor};
use crate::source::Vector;

/// Wrap `vector` as a function of type `ty` over `domain`.
///
/// A flat template yields a [`FlatField`] materialized on demand; any other
/// template yields a [`Field`] whose samples are converted on read.
pub(crate) fn function_data(
    ty: &MathType,
    domain: DomainSet,
    template: &Arc<VariableAdapter>,
    vector: Vector,
) -> Result<Data> {
    if template.is_flat() {
        let accessor = VectorFieldAccessor::new(Arc::clone(template), vector)?;
        let field = FlatField::new(
            ty.clone(),
            domain,
            template.representational_sets().iter().flatten().copied().collect(),
            Arc::new(accessor),
        )?;
        Ok(Data::FlatField(field))
    } else {
        let maker = AdapterDataMaker::new(Arc::clone(template));
        let range = Range::new(vector, Arc::new(maker));
        Ok(Data::Field(Field::new(ty.clone(), domain, samples_of(&range))?))
    }
}

/// Raw samples widened to `f64`, when the vector stores `kind`.
pub(crate) fn numeric_column(vector: &Vector, kind: NumericKind) -> Option<Vec<f64>> {
    let column = match (vector, kind) {
        (Vector::Byte(v), NumericKind::Byte) => v.iter().map(|x| f64::from(*x)).collect(),
        (Vector::Int16(v), NumericKind::Int16) => v.iter().map(|x| f64::from(*x)).collect(),
        (Vector::UInt16(v), NumericKind::UInt16) => v.iter().map(|x| f64::from(*x)).collect(),
        (Vector::Int32(v), NumericKind::Int32) => v.iter().map(|x| f64::from(*x)).collect(),
        (Vector::UInt32(v), NumericKind::UInt32) => v.iter().map(|x| f64::from(*x)).collect(),
        (Vector::Float32(v), NumericKind::Float32) => v.iter().map(|x| f64::from(*x)).collect(),
        (Vector::Float64(v), NumericKind::Float64) => v.to_vec(),
        _ => return None,
    };
    Some(column)
}

/// Boolean samples as 0 and 1.
pub(crate) fn boolean_column(vector: &Vector) -> Option<Vec<f64>> {
    match vector {
        Vector::Boolean(v) => Some(v.iter().map(|b| if *b { 1.0 } else { 0.0 }).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_column_requires_matching_kind() {
        let vector = Vector::from(vec![1u16, 65_535]);
        assert_eq!(
            numeric_column(&vector, NumericKind::UInt16),
            Some(vec![1.0, 65_535.0])
        );
        assert_eq!(numeric_column(&vector, NumericKind::Int16), None);
        assert_eq!(boolean_column(&vector), None);
    }
}
