//! Structural mapping of source variables onto math types.

use crate::config::ConversionConfig;
use crate::error::{DapError, Result};
use crate::model::{MathType, ScalarType, Unit, UnitParser};
use crate::process::AttributeResolver;
use crate::source::{AttributeTable, Dimension, Variable, VariableKind, VariableType};

/// Maps variables to math types, looking up units as it goes.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    resolver: AttributeResolver<'a>,
    units: &'a dyn UnitParser,
    index_suffix: &'a str,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper using the configured attribute names and `units` parser.
    pub fn new(config: &'a ConversionConfig, units: &'a dyn UnitParser) -> Self {
        Self {
            resolver: AttributeResolver::new(&config.attributes),
            units,
            index_suffix: &config.index_suffix,
        }
    }

    /// Unit declared in `table`, if it decodes.
    ///
    /// A unit that fails to decode is logged and dropped.
    pub fn unit(&self, name: &str, table: &AttributeTable) -> Option<Unit> {
        let spec = self.resolver.unit_spec(table)?;
        match self.units.parse(spec) {
            Ok(unit) => Some(unit),
            Err(e) => {
                tracing::warn!("Ignoring unit of {}: {}", name, e);
                None
            },
        }
    }

    /// Scalar type of a leaf of `kind`. Text leaves carry no unit.
    pub fn scalar_type(&self, name: &str, kind: VariableKind, table: &AttributeTable) -> ScalarType {
        match kind {
            VariableKind::String => ScalarType::text(name),
            _ => ScalarType::real(name, self.unit(name, table)),
        }
    }

    /// Domain scalar of every dimension of an array, in declared order.
    ///
    /// Unnamed dimensions are named `<array>_dim<i>`; units come from the nested
    /// table named after the dimension.
    pub fn dimension_types(
        &self,
        array: &str,
        dimensions: &[Dimension],
        table: &AttributeTable,
    ) -> Vec<ScalarType> {
        dimensions
            .iter()
            .enumerate()
            .map(|(i, dim)| {
                let name = if dim.name.is_empty() {
                    format!("{array}_dim{i}")
                } else {
                    dim.name.clone()
                };
                let unit = self.unit(&name, table.child_table(&name));
                ScalarType::real(name, unit)
            })
            .collect()
    }

    /// Index scalar of a sequence or list.
    pub fn index_type(&self, name: &str) -> ScalarType {
        ScalarType::real(format!("{name}{}", self.index_suffix), None)
    }

    /// Math type of `variable` described by `table`.
    pub fn map(&self, variable: &Variable, table: &AttributeTable) -> Result<MathType> {
        let name = variable.name.as_str();
        match &variable.ty {
            VariableType::Structure { members } => self.compound(name, members, table),
            VariableType::Sequence { members } => {
                let row = self.compound(name, members, table)?;
                Ok(MathType::function(self.index_type(name).into(), row))
            },
            VariableType::List { template } => {
                let element = self.map(template, table)?;
                Ok(MathType::function(self.index_type(name).into(), element))
            },
            VariableType::Array {
                template,
                dimensions,
            } => {
                let domain = reversed(self.dimension_types(name, dimensions, table))
                    .map_err(|_| DapError::malformed(format!("array {name} has no dimensions")))?;
                Ok(MathType::function(domain, self.map(template, table)?))
            },
            VariableType::Grid { array, maps } => {
                let array_table = grid_array_table(table, &array.name);
                let template = match &array.ty {
                    VariableType::Array { template, .. } => template,
                    _ => {
                        return Err(DapError::malformed(format!(
                            "grid {name} has a {} as its array",
                            array.kind()
                        )))
                    },
                };
                let map_types = maps
                    .iter()
                    .map(|m| ScalarType::real(m.name.clone(), self.unit(&m.name, table.child_table(&m.name))))
                    .collect();
                let domain = reversed(map_types)
                    .map_err(|_| DapError::malformed(format!("grid {name} has no maps")))?;
                Ok(MathType::function(domain, self.map(template, array_table)?))
            },
            _ => Ok(self.scalar_type(name, variable.kind(), table).into()),
        }
    }

    fn compound(&self, name: &str, members: &[Variable], table: &AttributeTable) -> Result<MathType> {
        let components = members
            .iter()
            .map(|m| self.map(m, table.child_table(&m.name)))
            .collect::<Result<Vec<_>>>()?;
        MathType::tuple(components)
            .map_err(|_| DapError::malformed(format!("{name} has no members")))
    }
}

/// Attribute table of a grid's primary array: the nested table named after it,
/// else the grid's own table.
pub(crate) fn grid_array_table<'t>(table: &'t AttributeTable, array: &str) -> &'t AttributeTable {
    table.find_table(array).unwrap_or(table)
}

fn reversed(types: Vec<ScalarType>) -> Result<MathType> {
    MathType::tuple(types.into_iter().rev().map(MathType::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BasicUnitParser;
    use crate::source::Attribute;

    fn scalar(name: &str, kind: VariableKind) -> Variable {
        Variable::scalar(name, kind).unwrap()
    }

    #[test]
    fn test_array_domain_is_reversed() {
        let config = ConversionConfig::default();
        let mapper = TypeMapper::new(&config, &BasicUnitParser);
        let sst = Variable::array(
            "sst",
            scalar("sst", VariableKind::Float32),
            vec![Dimension::new("time", 2), Dimension::new("lat", 3), Dimension::new("lon", 4)],
        );
        let ty = mapper.map(&sst, &AttributeTable::new()).unwrap();
        assert_eq!(ty.to_string(), "((lon, lat, time) -> sst)");
    }

    #[test]
    fn test_single_member_structure_collapses() {
        let config = ConversionConfig::default();
        let mapper = TypeMapper::new(&config, &BasicUnitParser);
        let s = Variable::structure("s", vec![scalar("x", VariableKind::Int16)]);
        let ty = mapper.map(&s, &AttributeTable::new()).unwrap();
        assert_eq!(ty, MathType::from(ScalarType::real("x", None)));
    }

    #[test]
    fn test_empty_structure_is_malformed() {
        let config = ConversionConfig::default();
        let mapper = TypeMapper::new(&config, &BasicUnitParser);
        let s = Variable::structure("s", Vec::new());
        assert!(matches!(
            mapper.map(&s, &AttributeTable::new()),
            Err(DapError::MalformedMetadata { .. })
        ));
    }

    #[test]
    fn test_units_and_unnamed_dimensions() {
        let config = ConversionConfig::default();
        let mapper = TypeMapper::new(&config, &BasicUnitParser);
        let table = AttributeTable::new()
            .with("units", Attribute::text("m s-1"))
            .with("x", Attribute::Table(AttributeTable::new().with("units", Attribute::text("km"))));
        let u = Variable::array(
            "u",
            scalar("u", VariableKind::Float64),
            vec![Dimension::new("", 2), Dimension::new("x", 3)],
        );
        let ty = mapper.map(&u, &table).unwrap();
        assert_eq!(ty.to_string(), "((x[km], u_dim0) -> u[m s^-1])");
    }

    #[test]
    fn test_bad_unit_is_dropped() {
        let config = ConversionConfig::default();
        let mapper = TypeMapper::new(&config, &BasicUnitParser);
        let table = AttributeTable::new().with("units", Attribute::text("3 $$"));
        let ty = mapper.scalar_type("v", VariableKind::Float32, &table);
        assert_eq!(ty.unit(), None);
    }

    #[test]
    fn test_sequence_index_name() {
        let config = ConversionConfig::default();
        let mapper = TypeMapper::new(&config, &BasicUnitParser);
        let seq = Variable::sequence(
            "obs",
            vec![scalar("t", VariableKind::Float32), scalar("p", VariableKind::Float32)],
        );
        let ty = mapper.map(&seq, &AttributeTable::new()).unwrap();
        assert_eq!(ty.to_string(), "(obs_index -> (t, p))");
    }
}
