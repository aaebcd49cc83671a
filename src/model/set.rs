//! Value-domain representations and function domain sets.

use std::fmt;

use super::{MathType, ScalarType};

/// Largest index count a representational set may use (the 32-bit index space).
pub const MAX_INDEX_COUNT: u64 = i32::MAX as u64;

/// Canonical description of the values a real scalar can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepresentationalSet {
    /// Integers `0..count`.
    DiscreteRange {
        /// Number of values.
        count: u32,
    },
    /// `count` evenly spaced values from `lower` to `upper`.
    LinearRange {
        /// First value.
        lower: f64,
        /// Last value.
        upper: f64,
        /// Number of values.
        count: u32,
    },
    /// Any single-precision value.
    ArbitraryFloat,
    /// Any double-precision value.
    ArbitraryDouble,
}

impl RepresentationalSet {
    /// Number of discrete values, if the set is discretized.
    pub fn count(&self) -> Option<u32> {
        match *self {
            Self::DiscreteRange { count } | Self::LinearRange { count, .. } => Some(count),
            Self::ArbitraryFloat | Self::ArbitraryDouble => None,
        }
    }
}

impl fmt::Display for RepresentationalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiscreteRange { count } => write!(f, "DiscreteRange(count={count})"),
            Self::LinearRange {
                lower,
                upper,
                count,
            } => write!(f, "LinearRange(lower={lower}, upper={upper}, count={count})"),
            Self::ArbitraryFloat => f.write_str("ArbitraryFloat"),
            Self::ArbitraryDouble => f.write_str("ArbitraryDouble"),
        }
    }
}

/// One evenly spaced axis of a linear domain.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAxis {
    /// Axis type.
    pub ty: ScalarType,
    /// First coordinate.
    pub first: f64,
    /// Last coordinate.
    pub last: f64,
    /// Number of points.
    pub length: usize,
}

impl LinearAxis {
    /// Coordinate of point `index`.
    pub fn coordinate(&self, index: usize) -> f64 {
        if self.length <= 1 {
            return self.first;
        }
        let step = (self.last - self.first) / (self.length - 1) as f64;
        self.first + step * index as f64
    }
}

/// The sampled domain of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainSet {
    /// Integers `0..length`.
    Integer1D {
        /// Index type.
        ty: ScalarType,
        /// Number of points.
        length: usize,
    },
    /// One evenly spaced axis.
    Linear1D(LinearAxis),
    /// Cartesian product of evenly spaced axes, innermost first.
    LinearND {
        /// Domain tuple type.
        ty: MathType,
        /// Axes, innermost first.
        axes: Vec<LinearAxis>,
    },
    /// Explicit, irregular coordinates along one axis.
    Gridded1D {
        /// Axis type.
        ty: ScalarType,
        /// Coordinates.
        samples: Vec<f64>,
    },
    /// Cartesian product of one-dimensional sets, innermost first.
    Product {
        /// Domain tuple type.
        ty: MathType,
        /// Factor sets, innermost first.
        factors: Vec<DomainSet>,
    },
}

impl DomainSet {
    /// Number of points in the set.
    pub fn len(&self) -> usize {
        match self {
            Self::Integer1D { length, .. } => *length,
            Self::Linear1D(axis) => axis.length,
            Self::LinearND { axes, .. } => axes.iter().map(|a| a.length).product(),
            Self::Gridded1D { samples, .. } => samples.len(),
            Self::Product { factors, .. } => factors.iter().map(DomainSet::len).product(),
        }
    }

    /// Whether the set has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Points along each axis, innermost first.
    pub fn lengths(&self) -> Vec<usize> {
        match self {
            Self::Integer1D { length, .. } => vec![*length],
            Self::Linear1D(axis) => vec![axis.length],
            Self::LinearND { axes, .. } => axes.iter().map(|a| a.length).collect(),
            Self::Gridded1D { samples, .. } => vec![samples.len()],
            Self::Product { factors, .. } => factors.iter().flat_map(DomainSet::lengths).collect(),
        }
    }

    /// Type of a point of the set.
    pub fn math_type(&self) -> MathType {
        match self {
            Self::Integer1D { ty, .. } | Self::Gridded1D { ty, .. } => ty.clone().into(),
            Self::Linear1D(axis) => axis.ty.clone().into(),
            Self::LinearND { ty, .. } | Self::Product { ty, .. } => ty.clone(),
        }
    }
}
