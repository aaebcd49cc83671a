//! Internal math types: scalars, tuples and functions.

use std::fmt;

use super::Unit;
use crate::error::{DapError, Result};

/// Whether a scalar holds numbers or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Real number.
    Real,
    /// Text.
    Text,
}

/// A named scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarType {
    name: String,
    kind: ScalarKind,
    unit: Option<Unit>,
}

impl ScalarType {
    /// Create a real scalar type.
    pub fn real(name: impl Into<String>, unit: Option<Unit>) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Real,
            unit,
        }
    }

    /// Create a text scalar type. Text has no unit.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Text,
            unit: None,
        }
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Real or text.
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Unit of a real scalar.
    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    /// Whether this is a real scalar.
    pub fn is_real(&self) -> bool {
        self.kind == ScalarKind::Real
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.unit) {
            (ScalarKind::Text, _) => write!(f, "{}(Text)", self.name),
            (ScalarKind::Real, Some(unit)) => write!(f, "{}[{}]", self.name, unit),
            (ScalarKind::Real, None) => f.write_str(&self.name),
        }
    }
}

/// A tuple of two or more components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleType {
    components: Vec<MathType>,
    flat: bool,
}

impl TupleType {
    /// Components in order.
    pub fn components(&self) -> &[MathType] {
        &self.components
    }

    /// Whether every component is a real scalar or a flat tuple.
    pub fn is_flat(&self) -> bool {
        self.flat
    }
}

/// A mapping from a domain type to a range type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    domain: Box<MathType>,
    range: Box<MathType>,
}

impl FunctionType {
    /// Domain type.
    pub fn domain(&self) -> &MathType {
        &self.domain
    }

    /// Range type.
    pub fn range(&self) -> &MathType {
        &self.range
    }
}

/// Shape of a value in the internal data model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MathType {
    /// Real or text scalar.
    Scalar(ScalarType),
    /// Tuple of at least two components.
    Tuple(TupleType),
    /// Function from a domain to a range.
    Function(FunctionType),
}

impl MathType {
    /// Combine component types.
    ///
    /// No components is malformed; a single component is returned as is.
    pub fn tuple(mut components: Vec<MathType>) -> Result<MathType> {
        match components.len() {
            0 => Err(DapError::malformed("compound with no components")),
            1 => Ok(components.remove(0)),
            _ => {
                let flat = components.iter().all(MathType::is_flat);
                Ok(MathType::Tuple(TupleType { components, flat }))
            },
        }
    }

    /// Create a function type.
    pub fn function(domain: MathType, range: MathType) -> MathType {
        MathType::Function(FunctionType {
            domain: Box::new(domain),
            range: Box::new(range),
        })
    }

    /// Whether this is a real scalar or a flat tuple.
    pub fn is_flat(&self) -> bool {
        match self {
            MathType::Scalar(s) => s.is_real(),
            MathType::Tuple(t) => t.flat,
            MathType::Function(_) => false,
        }
    }

    /// Real scalar leaves in flattening order, for flat types.
    ///
    /// Returns an empty list when the type is not flat.
    pub fn real_components(&self) -> Vec<&ScalarType> {
        let mut out = Vec::new();
        if self.is_flat() {
            self.collect_reals(&mut out);
        }
        out
    }

    fn collect_reals<'a>(&'a self, out: &mut Vec<&'a ScalarType>) {
        match self {
            MathType::Scalar(s) => out.push(s),
            MathType::Tuple(t) => t.components.iter().for_each(|c| c.collect_reals(out)),
            MathType::Function(_) => {},
        }
    }

    /// The scalar type, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            MathType::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The tuple type, if this is a tuple.
    pub fn as_tuple(&self) -> Option<&TupleType> {
        match self {
            MathType::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// The function type, if this is a function.
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            MathType::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Number of components: 1 for scalars and functions.
    pub fn dimension(&self) -> usize {
        match self {
            MathType::Tuple(t) => t.components.len(),
            _ => 1,
        }
    }
}

impl fmt::Display for MathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathType::Scalar(s) => write!(f, "{s}"),
            MathType::Tuple(t) => {
                f.write_str("(")?;
                for (i, c) in t.components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            },
            MathType::Function(func) => write!(f, "({} -> {})", func.domain, func.range),
        }
    }
}

impl From<ScalarType> for MathType {
    fn from(scalar: ScalarType) -> Self {
        MathType::Scalar(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(name: &str) -> MathType {
        ScalarType::real(name, None).into()
    }

    #[test]
    fn test_empty_tuple_is_malformed() {
        let err = MathType::tuple(Vec::new()).unwrap_err();
        assert!(matches!(err, DapError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_single_component_collapses() {
        let t = MathType::tuple(vec![real("a")]).unwrap();
        assert_eq!(t, real("a"));
    }

    #[test]
    fn test_flat_tuple_of_reals() {
        for n in 2..6 {
            let comps = (0..n).map(|i| real(&format!("v{i}"))).collect();
            let t = MathType::tuple(comps).unwrap();
            let tuple = t.as_tuple().unwrap();
            assert!(tuple.is_flat());
            assert_eq!(t.dimension(), n);
        }
    }

    #[test]
    fn test_text_component_is_not_flat() {
        let t = MathType::tuple(vec![real("a"), ScalarType::text("s").into()]).unwrap();
        assert!(!t.is_flat());
        assert!(t.real_components().is_empty());
    }

    #[test]
    fn test_nested_flat_tuple_stays_flat() {
        let inner = MathType::tuple(vec![real("a"), real("b")]).unwrap();
        let outer = MathType::tuple(vec![inner, real("c")]).unwrap();
        assert!(outer.is_flat());
        let names: Vec<&str> = outer.real_components().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_function_in_tuple_is_not_flat() {
        let func = MathType::function(real("i"), real("v"));
        let t = MathType::tuple(vec![func, real("c")]).unwrap();
        assert!(!t.is_flat());
    }

    #[test]
    fn test_display() {
        let domain = MathType::tuple(vec![real("lon"), real("lat")]).unwrap();
        let range = ScalarType::real("sst", Some(Unit::new("K")));
        let func = MathType::function(domain, range.into());
        assert_eq!(func.to_string(), "((lon, lat) -> sst[K])");
    }
}
