//! Choice of the representational set of a numeric scalar.

use super::{NumericKind, ValueBounds};
use crate::model::{RepresentationalSet, MAX_INDEX_COUNT};

/// Chooses a canonical value-domain representation for a numeric leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepresentationSetSelector;

impl RepresentationSetSelector {
    /// Set of a boolean leaf.
    pub fn boolean(&self) -> RepresentationalSet {
        RepresentationalSet::DiscreteRange { count: 2 }
    }

    /// Set of a numeric leaf with the given bounds.
    pub fn select(&self, kind: NumericKind, bounds: &ValueBounds) -> RepresentationalSet {
        match kind {
            NumericKind::Float32 => return RepresentationalSet::ArbitraryFloat,
            NumericKind::Float64 => return RepresentationalSet::ArbitraryDouble,
            _ => {},
        }

        let ValueBounds {
            raw_lower,
            raw_upper,
            lower,
            upper,
            increment,
        } = *bounds;

        if increment == 1.0 {
            let count = upper - lower + 1.0;
            match fitting_count(count) {
                Some(count) if lower == 0.0 => RepresentationalSet::DiscreteRange { count },
                Some(count) => RepresentationalSet::LinearRange {
                    lower,
                    upper,
                    count,
                },
                None => RepresentationalSet::ArbitraryDouble,
            }
        } else {
            let count = 1.0 + ((raw_upper - raw_lower) / increment.abs()).round();
            match fitting_count(count) {
                Some(count) => RepresentationalSet::LinearRange {
                    lower,
                    upper,
                    count,
                },
                None => RepresentationalSet::ArbitraryDouble,
            }
        }
    }
}

fn fitting_count(count: f64) -> Option<u32> {
    if count.is_finite() && count >= 1.0 && count <= MAX_INDEX_COUNT as f64 {
        Some(count as u32)
    } else {
        None
    }
}
