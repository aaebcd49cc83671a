//! Attribute tables attached to source variables.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A typed attribute value.
///
/// Attributes are vectors; a scalar attribute is a vector of one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum Attribute {
    /// Text values.
    String(Vec<String>),
    /// Unsigned 8-bit values.
    Byte(Vec<u8>),
    /// Signed 16-bit values.
    Int16(Vec<i16>),
    /// Unsigned 16-bit values.
    UInt16(Vec<u16>),
    /// Signed 32-bit values.
    Int32(Vec<i32>),
    /// Unsigned 32-bit values.
    UInt32(Vec<u32>),
    /// 32-bit float values.
    Float32(Vec<f32>),
    /// 64-bit float values.
    Float64(Vec<f64>),
    /// Nested attribute table (a container).
    Table(AttributeTable),
    /// Attribute of a type this layer does not understand.
    Unknown,
}

impl Attribute {
    /// Create a single-string attribute.
    pub fn text(value: impl Into<String>) -> Self {
        Self::String(vec![value.into()])
    }

    /// Numeric values widened to `f64`, or `None` for non-numeric attributes.
    pub fn numbers(&self) -> Option<Vec<f64>> {
        let values = match self {
            Self::Byte(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Int16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::UInt16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Int32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::UInt32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Float32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Float64(v) => v.clone(),
            Self::String(_) | Self::Table(_) | Self::Unknown => return None,
        };
        Some(values)
    }

    /// String values, or `None` for non-string attributes.
    pub fn strings(&self) -> Option<&[String]> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Nested table, or `None` if this is not a container.
    pub fn table(&self) -> Option<&AttributeTable> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        match self {
            Self::String(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::UInt16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::UInt32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Table(t) => t.len(),
            Self::Unknown => 0,
        }
    }

    /// Whether no values are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Byte(_) => "Byte",
            Self::Int16(_) => "Int16",
            Self::UInt16(_) => "UInt16",
            Self::Int32(_) => "Int32",
            Self::UInt32(_) => "UInt32",
            Self::Float32(_) => "Float32",
            Self::Float64(_) => "Float64",
            Self::Table(_) => "Container",
            Self::Unknown => "Unknown",
        }
    }
}

static EMPTY_TABLE: AttributeTable = AttributeTable::new();

/// Ordered mapping from attribute name to [`Attribute`].
///
/// Insertion order is preserved, including through JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    entries: Vec<(String, Attribute)>,
}

impl AttributeTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace an attribute. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, attribute: Attribute) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = attribute,
            None => self.entries.push((name, attribute)),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.insert(name, attribute);
        self
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    /// Whether an attribute of this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The nested table called `name`, or an empty table.
    pub fn child_table(&self, name: &str) -> &AttributeTable {
        self.get(name)
            .and_then(Attribute::table)
            .unwrap_or(&EMPTY_TABLE)
    }

    /// The nested table called `name`, if present.
    pub fn find_table(&self, name: &str) -> Option<&AttributeTable> {
        self.get(name).and_then(Attribute::table)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AttributeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, attribute) in &self.entries {
            map.serialize_entry(name, attribute)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = AttributeTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to attributes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = AttributeTable::new();
                while let Some((name, attribute)) = access.next_entry::<String, Attribute>()? {
                    table.insert(name, attribute);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
