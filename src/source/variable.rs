//! Source-side variable tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural kind of a source variable.
///
/// This is the closed set the adapter factory dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Text value.
    String,
    /// Boolean value.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Record of named members.
    Structure,
    /// Vector of a single template variable.
    List,
    /// Table of rows sharing the same members.
    Sequence,
    /// Multi-dimensional array of a template variable.
    Array,
    /// Array plus one coordinate map per dimension.
    Grid,
}

impl VariableKind {
    /// Whether this kind carries children.
    pub fn is_compound(self) -> bool {
        matches!(
            self,
            Self::Structure | Self::List | Self::Sequence | Self::Array | Self::Grid
        )
    }

    /// Type name as used in dataset descriptors.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Structure => "Structure",
            Self::List => "List",
            Self::Sequence => "Sequence",
            Self::Array => "Array",
            Self::Grid => "Grid",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One declared dimension of an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name. May be empty.
    #[serde(default)]
    pub name: String,
    /// Number of points along the dimension.
    pub size: usize,
    /// Index of the first point in the unconstrained dimension.
    #[serde(default)]
    pub start: usize,
    /// Step between points in the unconstrained dimension.
    #[serde(default = "default_stride")]
    pub stride: usize,
}

fn default_stride() -> usize {
    1
}

impl Dimension {
    /// Create an unconstrained dimension.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            start: 0,
            stride: 1,
        }
    }

    /// Create a dimension selected by a hyperslab constraint.
    pub fn constrained(name: impl Into<String>, size: usize, start: usize, stride: usize) -> Self {
        Self {
            name: name.into(),
            size,
            start,
            stride,
        }
    }

    /// Last index of the unconstrained dimension covered by this one, or
    /// `None` when it does not fit in `usize`.
    pub fn last(&self) -> Option<usize> {
        self.size
            .saturating_sub(1)
            .checked_mul(self.stride)
            .and_then(|span| span.checked_add(self.start))
    }
}

/// Type payload of a [`Variable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VariableType {
    /// Text scalar.
    String,
    /// Boolean scalar.
    Boolean,
    /// Unsigned 8-bit scalar.
    Byte,
    /// Signed 16-bit scalar.
    Int16,
    /// Unsigned 16-bit scalar.
    UInt16,
    /// Signed 32-bit scalar.
    Int32,
    /// Unsigned 32-bit scalar.
    UInt32,
    /// 32-bit float scalar.
    Float32,
    /// 64-bit float scalar.
    Float64,
    /// Record of named members.
    Structure {
        /// Members in declared order.
        members: Vec<Variable>,
    },
    /// Vector of a template.
    List {
        /// Element template.
        template: Box<Variable>,
    },
    /// Rows of members.
    Sequence {
        /// Row members in declared order.
        members: Vec<Variable>,
    },
    /// Multi-dimensional array of a template.
    Array {
        /// Element template.
        template: Box<Variable>,
        /// Dimensions, outermost first.
        dimensions: Vec<Dimension>,
    },
    /// Primary array plus coordinate maps.
    Grid {
        /// The primary array. Must be an array variable.
        array: Box<Variable>,
        /// One 1-D coordinate array per dimension of the primary array.
        maps: Vec<Variable>,
    },
}

/// A named node of the source variable tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Structural type.
    #[serde(flatten)]
    pub ty: VariableType,
}

impl Variable {
    /// Create a variable.
    pub fn new(name: impl Into<String>, ty: VariableType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Create a scalar variable of the given kind.
    ///
    /// Returns `None` for compound kinds.
    pub fn scalar(name: impl Into<String>, kind: VariableKind) -> Option<Self> {
        let ty = match kind {
            VariableKind::String => VariableType::String,
            VariableKind::Boolean => VariableType::Boolean,
            VariableKind::Byte => VariableType::Byte,
            VariableKind::Int16 => VariableType::Int16,
            VariableKind::UInt16 => VariableType::UInt16,
            VariableKind::Int32 => VariableType::Int32,
            VariableKind::UInt32 => VariableType::UInt32,
            VariableKind::Float32 => VariableType::Float32,
            VariableKind::Float64 => VariableType::Float64,
            _ => return None,
        };
        Some(Self::new(name, ty))
    }

    /// Create a structure.
    pub fn structure(name: impl Into<String>, members: Vec<Variable>) -> Self {
        Self::new(name, VariableType::Structure { members })
    }

    /// Create a sequence.
    pub fn sequence(name: impl Into<String>, members: Vec<Variable>) -> Self {
        Self::new(name, VariableType::Sequence { members })
    }

    /// Create a list.
    pub fn list(name: impl Into<String>, template: Variable) -> Self {
        Self::new(
            name,
            VariableType::List {
                template: Box::new(template),
            },
        )
    }

    /// Create an array.
    pub fn array(name: impl Into<String>, template: Variable, dimensions: Vec<Dimension>) -> Self {
        Self::new(
            name,
            VariableType::Array {
                template: Box::new(template),
                dimensions,
            },
        )
    }

    /// Create a grid.
    pub fn grid(name: impl Into<String>, array: Variable, maps: Vec<Variable>) -> Self {
        Self::new(
            name,
            VariableType::Grid {
                array: Box::new(array),
                maps,
            },
        )
    }

    /// Structural kind of this variable.
    pub fn kind(&self) -> VariableKind {
        match &self.ty {
            VariableType::String => VariableKind::String,
            VariableType::Boolean => VariableKind::Boolean,
            VariableType::Byte => VariableKind::Byte,
            VariableType::Int16 => VariableKind::Int16,
            VariableType::UInt16 => VariableKind::UInt16,
            VariableType::Int32 => VariableKind::Int32,
            VariableType::UInt32 => VariableKind::UInt32,
            VariableType::Float32 => VariableKind::Float32,
            VariableType::Float64 => VariableKind::Float64,
            VariableType::Structure { .. } => VariableKind::Structure,
            VariableType::List { .. } => VariableKind::List,
            VariableType::Sequence { .. } => VariableKind::Sequence,
            VariableType::Array { .. } => VariableKind::Array,
            VariableType::Grid { .. } => VariableKind::Grid,
        }
    }

    /// Direct children in declared order.
    pub fn children(&self) -> Vec<&Variable> {
        match &self.ty {
            VariableType::Structure { members } | VariableType::Sequence { members } => {
                members.iter().collect()
            },
            VariableType::List { template } | VariableType::Array { template, .. } => {
                vec![template.as_ref()]
            },
            VariableType::Grid { array, maps } => {
                std::iter::once(array.as_ref()).chain(maps.iter()).collect()
            },
            _ => Vec::new(),
        }
    }
}
