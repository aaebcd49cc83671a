//! Source instances: the data carried by a variable.
//!
//! Vectors are stored as shared immutable slices, so a [`Vector`] clone is a
//! reference-count bump and views over it never copy samples.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::VariableKind;

/// A typed primitive vector, the payload of arrays, lists and grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum Vector {
    /// Boolean samples.
    Boolean(Arc<[bool]>),
    /// Unsigned 8-bit samples.
    Byte(Arc<[u8]>),
    /// Signed 16-bit samples.
    Int16(Arc<[i16]>),
    /// Unsigned 16-bit samples.
    UInt16(Arc<[u16]>),
    /// Signed 32-bit samples.
    Int32(Arc<[i32]>),
    /// Unsigned 32-bit samples.
    UInt32(Arc<[u32]>),
    /// 32-bit float samples.
    Float32(Arc<[f32]>),
    /// 64-bit float samples.
    Float64(Arc<[f64]>),
    /// Text samples.
    String(Arc<[String]>),
    /// Compound samples (structures, sequences, grids, ...).
    Compound(Arc<[Value]>),
}

macro_rules! impl_vector_from {
    ($ty:ty, $variant:ident) => {
        impl From<Vec<$ty>> for Vector {
            fn from(values: Vec<$ty>) -> Self {
                Vector::$variant(values.into())
            }
        }
    };
}

impl_vector_from!(bool, Boolean);
impl_vector_from!(u8, Byte);
impl_vector_from!(i16, Int16);
impl_vector_from!(u16, UInt16);
impl_vector_from!(i32, Int32);
impl_vector_from!(u32, UInt32);
impl_vector_from!(f32, Float32);
impl_vector_from!(f64, Float64);
impl_vector_from!(String, String);
impl_vector_from!(Value, Compound);

impl Vector {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::UInt16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::UInt32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::String(v) => v.len(),
            Self::Compound(v) => v.len(),
        }
    }

    /// Whether the vector has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow one raw element.
    pub fn element(&self, index: usize) -> Option<Element<'_>> {
        let element = match self {
            Self::Boolean(v) => Element::Boolean(*v.get(index)?),
            Self::Byte(v) => Element::Byte(*v.get(index)?),
            Self::Int16(v) => Element::Int16(*v.get(index)?),
            Self::UInt16(v) => Element::UInt16(*v.get(index)?),
            Self::Int32(v) => Element::Int32(*v.get(index)?),
            Self::UInt32(v) => Element::UInt32(*v.get(index)?),
            Self::Float32(v) => Element::Float32(*v.get(index)?),
            Self::Float64(v) => Element::Float64(*v.get(index)?),
            Self::String(v) => Element::String(v.get(index)?),
            Self::Compound(v) => Element::Compound(v.get(index)?),
        };
        Some(element)
    }

    /// Whether two vectors share the same storage.
    pub fn shares_storage(&self, other: &Vector) -> bool {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => Arc::ptr_eq(a, b),
            (Self::Byte(a), Self::Byte(b)) => Arc::ptr_eq(a, b),
            (Self::Int16(a), Self::Int16(b)) => Arc::ptr_eq(a, b),
            (Self::UInt16(a), Self::UInt16(b)) => Arc::ptr_eq(a, b),
            (Self::Int32(a), Self::Int32(b)) => Arc::ptr_eq(a, b),
            (Self::UInt32(a), Self::UInt32(b)) => Arc::ptr_eq(a, b),
            (Self::Float32(a), Self::Float32(b)) => Arc::ptr_eq(a, b),
            (Self::Float64(a), Self::Float64(b)) => Arc::ptr_eq(a, b),
            (Self::String(a), Self::String(b)) => Arc::ptr_eq(a, b),
            (Self::Compound(a), Self::Compound(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Type name of the samples, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "Boolean",
            Self::Byte(_) => "Byte",
            Self::Int16(_) => "Int16",
            Self::UInt16(_) => "UInt16",
            Self::Int32(_) => "Int32",
            Self::UInt32(_) => "UInt32",
            Self::Float32(_) => "Float32",
            Self::Float64(_) => "Float64",
            Self::String(_) => "String",
            Self::Compound(_) => "Compound",
        }
    }
}

/// One borrowed raw element: a scalar sample or a compound value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    /// Boolean sample.
    Boolean(bool),
    /// Unsigned 8-bit sample.
    Byte(u8),
    /// Signed 16-bit sample.
    Int16(i16),
    /// Unsigned 16-bit sample.
    UInt16(u16),
    /// Signed 32-bit sample.
    Int32(i32),
    /// Unsigned 32-bit sample.
    UInt32(u32),
    /// 32-bit float sample.
    Float32(f32),
    /// 64-bit float sample.
    Float64(f64),
    /// Text sample.
    String(&'a str),
    /// Compound value.
    Compound(&'a Value),
}

impl Element<'_> {
    /// Numeric sample widened to `f64`. Booleans map to 0 and 1.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
            Self::Byte(v) => Some(f64::from(v)),
            Self::Int16(v) => Some(f64::from(v)),
            Self::UInt16(v) => Some(f64::from(v)),
            Self::Int32(v) => Some(f64::from(v)),
            Self::UInt32(v) => Some(f64::from(v)),
            Self::Float32(v) => Some(f64::from(v)),
            Self::Float64(v) => Some(v),
            Self::String(_) | Self::Compound(_) => None,
        }
    }

    /// Structural kind of the element.
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::Boolean(_) => VariableKind::Boolean,
            Self::Byte(_) => VariableKind::Byte,
            Self::Int16(_) => VariableKind::Int16,
            Self::UInt16(_) => VariableKind::UInt16,
            Self::Int32(_) => VariableKind::Int32,
            Self::UInt32(_) => VariableKind::UInt32,
            Self::Float32(_) => VariableKind::Float32,
            Self::Float64(_) => VariableKind::Float64,
            Self::String(_) => VariableKind::String,
            Self::Compound(value) => value.kind(),
        }
    }
}

impl<'a> From<&'a Value> for Element<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(s) => Element::String(s),
            Value::Boolean(b) => Element::Boolean(*b),
            Value::Byte(v) => Element::Byte(*v),
            Value::Int16(v) => Element::Int16(*v),
            Value::UInt16(v) => Element::UInt16(*v),
            Value::Int32(v) => Element::Int32(*v),
            Value::UInt32(v) => Element::UInt32(*v),
            Value::Float32(v) => Element::Float32(*v),
            Value::Float64(v) => Element::Float64(*v),
            compound => Element::Compound(compound),
        }
    }
}

/// Data of one source variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Text scalar.
    String(String),
    /// Boolean scalar.
    Boolean(bool),
    /// Unsigned 8-bit scalar.
    Byte(u8),
    /// Signed 16-bit scalar.
    Int16(i16),
    /// Unsigned 16-bit scalar.
    UInt16(u16),
    /// Signed 32-bit scalar.
    Int32(i32),
    /// Unsigned 32-bit scalar.
    UInt32(u32),
    /// 32-bit float scalar.
    Float32(f32),
    /// 64-bit float scalar.
    Float64(f64),
    /// Member values in declared order.
    Structure(Vec<Value>),
    /// List samples.
    List(Vector),
    /// Rows; each row is a [`Value::Structure`] of the sequence members.
    Sequence(Arc<[Value]>),
    /// Array samples in row-major order.
    Array(Vector),
    /// Primary array samples plus one coordinate vector per dimension.
    Grid {
        /// Primary array samples in row-major order.
        array: Vector,
        /// Coordinate vectors in declared dimension order.
        maps: Vec<Vector>,
    },
}

impl Value {
    /// Create a sequence from rows of member values.
    pub fn sequence(rows: Vec<Vec<Value>>) -> Self {
        Value::Sequence(rows.into_iter().map(Value::Structure).collect())
    }

    /// Structural kind of this value.
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::String(_) => VariableKind::String,
            Self::Boolean(_) => VariableKind::Boolean,
            Self::Byte(_) => VariableKind::Byte,
            Self::Int16(_) => VariableKind::Int16,
            Self::UInt16(_) => VariableKind::UInt16,
            Self::Int32(_) => VariableKind::Int32,
            Self::UInt32(_) => VariableKind::UInt32,
            Self::Float32(_) => VariableKind::Float32,
            Self::Float64(_) => VariableKind::Float64,
            Self::Structure(_) => VariableKind::Structure,
            Self::List(_) => VariableKind::List,
            Self::Sequence(_) => VariableKind::Sequence,
            Self::Array(_) => VariableKind::Array,
            Self::Grid { .. } => VariableKind::Grid,
        }
    }
}
