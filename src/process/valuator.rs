//! Per-variable composition of vetting, unpacking and ranging.

use std::sync::Arc;

use super::{AttributeResolver, NumericKind, Unpacker, UnpackerCache, ValueBounds, Vetter};
use crate::error::Result;
use crate::source::AttributeTable;

/// Turns stored values of one numeric variable into physical values.
#[derive(Debug, Clone)]
pub struct Valuator {
    vetter: Vetter,
    unpacker: Arc<Unpacker>,
    bounds: ValueBounds,
}

impl Valuator {
    /// Build the valuator of a numeric variable from its attribute table.
    ///
    /// The unpacker is taken from (and memoized in) `cache`.
    pub fn new(
        kind: NumericKind,
        table: &AttributeTable,
        resolver: &AttributeResolver<'_>,
        cache: &mut UnpackerCache,
    ) -> Result<Self> {
        let attrs = resolver.value_attributes(table, kind)?;
        let unpacker = cache.get_or_insert(attrs.scale, attrs.offset);
        let bounds = ValueBounds::new(kind, &attrs, &unpacker)?;
        let vetter = Vetter::new(attrs.lower, attrs.upper, attrs.fill, attrs.missing);
        Ok(Self {
            vetter,
            unpacker,
            bounds,
        })
    }

    /// A valuator that changes nothing except that NaN stays NaN.
    pub fn identity(kind: NumericKind) -> Result<Self> {
        let unpacker = Arc::new(Unpacker::Identity);
        let bounds = ValueBounds::new(kind, &Default::default(), &unpacker)?;
        Ok(Self {
            vetter: Vetter::pass_through(),
            unpacker,
            bounds,
        })
    }

    /// Process one stored value.
    pub fn process(&self, value: f64) -> f64 {
        self.unpacker.unpack(self.vetter.vet(value))
    }

    /// Process a buffer, returning it with physical values.
    pub fn process_all(&self, mut values: Vec<f64>) -> Vec<f64> {
        self.vetter.vet_all(&mut values);
        if !self.unpacker.is_identity() {
            values.iter_mut().for_each(|v| *v = self.unpacker.unpack(*v));
        }
        values
    }

    /// Whether processing never changes a non-NaN value.
    pub fn is_identity(&self) -> bool {
        self.vetter.is_pass_through() && self.unpacker.is_identity()
    }

    /// Raw and processed bounds.
    pub fn bounds(&self) -> &ValueBounds {
        &self.bounds
    }

    /// The shared unpacker.
    pub fn unpacker(&self) -> &Arc<Unpacker> {
        &self.unpacker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeNames;
    use crate::source::Attribute;

    fn valuator(kind: NumericKind, table: &AttributeTable) -> Valuator {
        let names = AttributeNames::default();
        let mut cache = UnpackerCache::new(8);
        Valuator::new(kind, table, &AttributeResolver::new(&names), &mut cache).unwrap()
    }

    #[test]
    fn test_fill_and_missing_become_nan() {
        let table = AttributeTable::new()
            .with("_FillValue", Attribute::Int16(vec![-999]))
            .with("missing_value", Attribute::Int16(vec![-1]));
        let valuator = valuator(NumericKind::Int16, &table);
        let out = valuator.process_all(vec![-999.0, -1.0, 5.0]);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 5.0);
    }

    #[test]
    fn test_vetting_precedes_unpacking() {
        let table = AttributeTable::new()
            .with("valid_range", Attribute::Int16(vec![0, 100]))
            .with("scale_factor", Attribute::Float32(vec![0.5]))
            .with("add_offset", Attribute::Float32(vec![10.0]));
        let valuator = valuator(NumericKind::Int16, &table);
        assert_eq!(valuator.process(100.0), 60.0);
        assert!(valuator.process(101.0).is_nan());
        assert_eq!(valuator.bounds().upper, 60.0);
    }

    #[test]
    fn test_identity_processing_is_idempotent() {
        let valuator = valuator(NumericKind::Float64, &AttributeTable::new());
        assert!(valuator.is_identity());
        let input = vec![1.5, -2.0, 1e300];
        let once = valuator.process_all(input.clone());
        let twice = valuator.process_all(once.clone());
        assert_eq!(once, input);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_unpacked_processing_is_idempotent() {
        let table = AttributeTable::new()
            .with("_FillValue", Attribute::Float64(vec![-999.0]))
            .with("valid_range", Attribute::Float64(vec![-100.0, 100.0]));
        let valuator = valuator(NumericKind::Float64, &table);
        assert!(valuator.process(f64::NAN).is_nan());
        for x in [f64::NAN, -999.0, -100.0, 0.25, 100.0, 150.0] {
            let once = valuator.process(x);
            let twice = valuator.process(once);
            assert!(once == twice || (once.is_nan() && twice.is_nan()), "{x}");
        }
        assert!(valuator.process(-999.0).is_nan());
        assert!(valuator.process(150.0).is_nan());
        assert_eq!(valuator.process(0.25), 0.25);
    }

    #[test]
    fn test_float32_fill_declared_as_float64() {
        let table = AttributeTable::new().with("_FillValue", Attribute::Float64(vec![-999.9]));
        let valuator = valuator(NumericKind::Float32, &table);
        assert!(valuator.process(f64::from(-999.9f32)).is_nan());
        assert_eq!(valuator.process(1.5), 1.5);
    }

    #[test]
    fn test_identity_constructor() {
        let valuator = Valuator::identity(NumericKind::UInt16).unwrap();
        assert_eq!(valuator.process(7.0), 7.0);
        assert_eq!(valuator.bounds().raw_upper, 65_535.0);
    }
}
