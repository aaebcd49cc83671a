//! Conversion of attributes themselves into data values.
//!
//! Used to import dataset-wide metadata (for instance the global attribute
//! table) alongside the variables.

use crate::error::Result;
use crate::model::{Data, DomainSet, MathType, Real, ScalarType, Text, Tuple};
use crate::source::{Attribute, AttributeTable};

/// Convert one attribute into a data value.
///
/// Numeric attributes become a [`Real`] (NaN when empty) or, with several
/// values, a one-dimensional gridded set. String attributes become [`Text`] or a
/// tuple of texts. Nested tables become a tuple of their converted entries.
/// Attributes of unknown type yield `None`.
pub fn attribute_data(name: &str, attribute: &Attribute) -> Result<Option<Data>> {
    let data = match attribute {
        Attribute::Unknown => {
            tracing::debug!("Skipping attribute {} of unknown type", name);
            None
        },
        Attribute::Table(table) => table_data_named(name, table)?,
        Attribute::String(values) => {
            let ty = ScalarType::text(name);
            let mut texts: Vec<Data> = values
                .iter()
                .map(|value| {
                    Data::Text(Text {
                        ty: ty.clone(),
                        value: value.clone(),
                    })
                })
                .collect();
            match texts.len() {
                0 => None,
                1 => texts.pop(),
                _ => Some(tuple(texts)?),
            }
        },
        numeric => {
            let values = numeric.numbers().unwrap_or_default();
            let ty = ScalarType::real(name, None);
            match values.as_slice() {
                [] => Some(Data::Real(Real { ty, value: f64::NAN })),
                [value] => Some(Data::Real(Real { ty, value: *value })),
                _ => Some(Data::Set(DomainSet::Gridded1D { ty, samples: values })),
            }
        },
    };
    Ok(data)
}

/// Convert every convertible entry of a table.
///
/// Returns `None` when nothing in the table converts.
pub fn table_data(table: &AttributeTable) -> Result<Option<Data>> {
    table_data_named("attributes", table)
}

fn table_data_named(name: &str, table: &AttributeTable) -> Result<Option<Data>> {
    let mut components = Vec::with_capacity(table.len());
    for (entry, attribute) in table.iter() {
        if let Some(data) = attribute_data(entry, attribute)? {
            components.push(data);
        }
    }
    tracing::trace!("Converted {} of {} entries of {}", components.len(), table.len(), name);
    match components.len() {
        0 => Ok(None),
        1 => Ok(components.pop()),
        _ => Ok(Some(tuple(components)?)),
    }
}

fn tuple(components: Vec<Data>) -> Result<Data> {
    let ty = MathType::tuple(components.iter().map(Data::math_type).collect())?;
    Ok(Data::Tuple(Tuple { ty, components }))
}
