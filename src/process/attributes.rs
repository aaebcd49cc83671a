//! Typed lookups of the attributes that drive value processing.

use super::NumericKind;
use crate::config::AttributeNames;
use crate::error::{DapError, Result};
use crate::source::{Attribute, AttributeTable};

/// Attributes of one numeric variable, already folded into its storage domain.
///
/// `None` means "not declared". NaN-valued declarations are treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueAttributes {
    /// Lower valid bound (raw domain).
    pub lower: Option<f64>,
    /// Upper valid bound (raw domain).
    pub upper: Option<f64>,
    /// Fill sentinel (raw domain).
    pub fill: Option<f64>,
    /// Missing-value sentinel (raw domain).
    pub missing: Option<f64>,
    /// Packing scale.
    pub scale: Option<f64>,
    /// Packing offset.
    pub offset: Option<f64>,
}

/// Extracts typed attribute values from an [`AttributeTable`].
#[derive(Debug, Clone, Copy)]
pub struct AttributeResolver<'a> {
    names: &'a AttributeNames,
}

impl<'a> AttributeResolver<'a> {
    /// Create a resolver using the given attribute names.
    pub fn new(names: &'a AttributeNames) -> Self {
        Self { names }
    }

    /// The unit specification: the first unit attribute that holds a string.
    pub fn unit_spec<'t>(&self, table: &'t AttributeTable) -> Option<&'t str> {
        self.names.units.iter().find_map(|name| {
            table
                .get(name)
                .and_then(Attribute::strings)
                .and_then(|values| values.first())
                .map(String::as_str)
        })
    }

    /// Declared valid bounds, `valid_range` first, then `valid_min`/`valid_max`.
    pub fn valid_bounds(&self, table: &AttributeTable) -> Result<(Option<f64>, Option<f64>)> {
        if let Some(attribute) = table.get(&self.names.valid_range) {
            let values = numbers(attribute, &self.names.valid_range)?;
            if values.len() != 2 {
                return Err(DapError::malformed(format!(
                    "{} has {} values, expected 2",
                    self.names.valid_range,
                    values.len()
                )));
            }
            return Ok((present(values[0]), present(values[1])));
        }
        let lower = self.first_number(table, &self.names.valid_min)?;
        let upper = self.first_number(table, &self.names.valid_max)?;
        Ok((lower, upper))
    }

    /// The fill sentinel.
    pub fn fill_value(&self, table: &AttributeTable) -> Result<Option<f64>> {
        self.first_number(table, &self.names.fill_value)
    }

    /// The missing-value sentinel.
    pub fn missing_value(&self, table: &AttributeTable) -> Result<Option<f64>> {
        self.first_number(table, &self.names.missing_value)
    }

    /// The packing scale.
    pub fn scale_factor(&self, table: &AttributeTable) -> Result<Option<f64>> {
        self.first_number(table, &self.names.scale_factor)
    }

    /// The packing offset.
    pub fn add_offset(&self, table: &AttributeTable) -> Result<Option<f64>> {
        self.first_number(table, &self.names.add_offset)
    }

    /// All value-processing attributes of a variable of the given kind.
    ///
    /// Bounds and sentinels of unsigned kinds are folded into the unsigned domain.
    pub fn value_attributes(&self, table: &AttributeTable, kind: NumericKind) -> Result<ValueAttributes> {
        let (lower, upper) = self.valid_bounds(table)?;
        let fold = |v: Option<f64>| v.map(|v| kind.fold(v));
        let sentinel = |v: Option<f64>| fold(v).map(|v| kind.to_storage_precision(v));
        Ok(ValueAttributes {
            lower: fold(lower),
            upper: fold(upper),
            fill: sentinel(self.fill_value(table)?),
            missing: sentinel(self.missing_value(table)?),
            scale: self.scale_factor(table)?,
            offset: self.add_offset(table)?,
        })
    }

    fn first_number(&self, table: &AttributeTable, name: &str) -> Result<Option<f64>> {
        match table.get(name) {
            None => Ok(None),
            Some(attribute) => Ok(numbers(attribute, name)?.first().copied().and_then(present)),
        }
    }
}

fn numbers(attribute: &Attribute, name: &str) -> Result<Vec<f64>> {
    attribute.numbers().ok_or_else(|| {
        DapError::malformed(format!(
            "attribute {name} has non-numeric type {}",
            attribute.type_name()
        ))
    })
}

fn present(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_names() -> AttributeNames {
        AttributeNames::default()
    }

    #[test]
    fn test_unit_precedence() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new()
            .with("UNITS", Attribute::text("cm"))
            .with("unit", Attribute::text("m"));
        assert_eq!(resolver.unit_spec(&table), Some("m"));
    }

    #[test]
    fn test_unit_skips_non_string() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new()
            .with("units", Attribute::Int16(vec![3]))
            .with("UNIT", Attribute::text("K"));
        assert_eq!(resolver.unit_spec(&table), Some("K"));
        assert_eq!(resolver.unit_spec(&AttributeTable::new()), None);
    }

    #[test]
    fn test_valid_range_takes_precedence() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new()
            .with("valid_min", Attribute::Int16(vec![-5]))
            .with("valid_max", Attribute::Int16(vec![5]))
            .with("valid_range", Attribute::Int16(vec![0, 10]));
        assert_eq!(resolver.valid_bounds(&table).unwrap(), (Some(0.0), Some(10.0)));
    }

    #[test]
    fn test_one_sided_bounds() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new().with("valid_max", Attribute::Float32(vec![7.5]));
        assert_eq!(resolver.valid_bounds(&table).unwrap(), (None, Some(7.5)));
    }

    #[test]
    fn test_bad_valid_range_is_malformed() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new().with("valid_range", Attribute::Int16(vec![1]));
        assert!(matches!(
            resolver.valid_bounds(&table),
            Err(DapError::MalformedMetadata { .. })
        ));
        let table = AttributeTable::new().with("_FillValue", Attribute::text("none"));
        assert!(resolver.fill_value(&table).is_err());
    }

    #[test]
    fn test_nan_sentinel_is_absent() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new().with("_FillValue", Attribute::Float32(vec![f32::NAN]));
        assert_eq!(resolver.fill_value(&table).unwrap(), None);
    }

    #[test]
    fn test_unsigned_attributes_are_folded() {
        let names = resolver_names();
        let resolver = AttributeResolver::new(&names);
        let table = AttributeTable::new()
            .with("_FillValue", Attribute::Int16(vec![-1]))
            .with("scale_factor", Attribute::Float32(vec![0.5]));
        let attrs = resolver.value_attributes(&table, NumericKind::UInt16).unwrap();
        assert_eq!(attrs.fill, Some(65_535.0));
        assert_eq!(attrs.scale, Some(0.5));
        assert_eq!(attrs.offset, None);
    }
}
