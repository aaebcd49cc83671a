//! Raw and processed value bounds of a numeric variable.

use super::{NumericKind, Unpacker, ValueAttributes};
use crate::error::{DapError, Result};

/// Bounds of the values a numeric variable can take, before and after unpacking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBounds {
    /// Smallest valid stored value.
    pub raw_lower: f64,
    /// Largest valid stored value.
    pub raw_upper: f64,
    /// Smallest physical value.
    pub lower: f64,
    /// Largest physical value.
    pub upper: f64,
    /// Physical spacing of consecutive stored values.
    pub increment: f64,
}

impl ValueBounds {
    /// Compute bounds from the declared attributes and the kind's natural limits.
    pub fn new(kind: NumericKind, attrs: &ValueAttributes, unpacker: &Unpacker) -> Result<Self> {
        let (natural_lower, natural_upper) = kind.natural_range();
        let mut raw_lower = attrs.lower.map_or(natural_lower, |l| l.max(natural_lower));
        let mut raw_upper = attrs.upper.map_or(natural_upper, |u| u.min(natural_upper));

        if !kind.is_float() {
            raw_lower = raw_lower.ceil();
            raw_upper = raw_upper.floor();
            for sentinel in [attrs.fill, attrs.missing].into_iter().flatten() {
                if sentinel == raw_lower {
                    raw_lower += 1.0;
                }
                if sentinel == raw_upper {
                    raw_upper -= 1.0;
                }
            }
        }

        if raw_lower > raw_upper {
            return Err(DapError::malformed(format!(
                "empty valid range [{raw_lower}, {raw_upper}] for {}",
                kind.variable_kind()
            )));
        }

        let a = unpacker.unpack(raw_lower);
        let b = unpacker.unpack(raw_upper);
        Ok(Self {
            raw_lower,
            raw_upper,
            lower: a.min(b),
            upper: a.max(b),
            increment: unpacker.increment(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_bounds_without_attributes() {
        let bounds =
            ValueBounds::new(NumericKind::Int16, &ValueAttributes::default(), &Unpacker::Identity).unwrap();
        assert_eq!(bounds.raw_lower, -32_768.0);
        assert_eq!(bounds.upper, 32_767.0);
        assert_eq!(bounds.increment, 1.0);
    }

    #[test]
    fn test_declared_bounds_are_clipped() {
        let attrs = ValueAttributes {
            lower: Some(-10.0),
            upper: Some(200.0),
            ..Default::default()
        };
        let bounds = ValueBounds::new(NumericKind::Byte, &attrs, &Unpacker::Scale(2.0)).unwrap();
        assert_eq!((bounds.raw_lower, bounds.raw_upper), (0.0, 200.0));
        assert_eq!((bounds.lower, bounds.upper), (0.0, 400.0));
        assert_eq!(bounds.increment, 2.0);
    }

    #[test]
    fn test_sentinel_on_bound_moves_it_inward() {
        let attrs = ValueAttributes {
            fill: Some(65_535.0),
            missing: Some(0.0),
            ..Default::default()
        };
        let bounds = ValueBounds::new(NumericKind::UInt16, &attrs, &Unpacker::Identity).unwrap();
        assert_eq!((bounds.raw_lower, bounds.raw_upper), (1.0, 65_534.0));
    }

    #[test]
    fn test_negative_scale_orders_processed_bounds() {
        let attrs = ValueAttributes {
            lower: Some(0.0),
            upper: Some(10.0),
            ..Default::default()
        };
        let bounds = ValueBounds::new(NumericKind::Int16, &attrs, &Unpacker::Scale(-1.0)).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (-10.0, 0.0));
    }

    #[test]
    fn test_empty_bounds_are_malformed() {
        let attrs = ValueAttributes {
            lower: Some(5.0),
            upper: Some(4.0),
            ..Default::default()
        };
        let err = ValueBounds::new(NumericKind::Int32, &attrs, &Unpacker::Identity).unwrap_err();
        assert!(matches!(err, DapError::MalformedMetadata { .. }));
    }
}
