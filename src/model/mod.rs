//! Internal strongly-typed data model.
//!
//! [`MathType`] describes the shape of a value, [`RepresentationalSet`] the
//! domain of a real scalar, and [`Data`] the materialized values themselves.

mod data;
mod math_type;
mod set;
mod unit;

pub use data::{Data, Field, FlatField, Real, Text, Tuple};
pub use math_type::{FunctionType, MathType, ScalarKind, ScalarType, TupleType};
pub use set::{DomainSet, LinearAxis, RepresentationalSet, MAX_INDEX_COUNT};
pub use unit::{BasicUnitParser, Unit, UnitError, UnitParser};
