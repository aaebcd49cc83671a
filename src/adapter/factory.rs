//! Construction of adapters by structural kind.

use std::fmt;
use std::sync::Arc;

use super::type_mapper::grid_array_table;
use super::{
    ArrayAdapter, ArrayAxis, GridAdapter, GridMapAdapter, ListAdapter, ScalarAdapter, ScalarLeaf,
    SequenceAdapter, StructureAdapter, TypeMapper, VariableAdapter,
};
use crate::config::ConversionConfig;
use crate::error::{DapError, Result};
use crate::model::{BasicUnitParser, UnitParser};
use crate::process::{AttributeResolver, NumericKind, RepresentationSetSelector, UnpackerCache, Valuator};
use crate::source::{AttributeTable, Dimension, Variable, VariableKind, VariableType};

/// Builds [`VariableAdapter`]s and owns the unpacker memo table they share.
pub struct VariableAdapterFactory {
    config: ConversionConfig,
    units: Box<dyn UnitParser>,
    unpackers: UnpackerCache,
}

impl fmt::Debug for VariableAdapterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableAdapterFactory")
            .field("config", &self.config)
            .field("units", &self.units)
            .field("cached_unpackers", &self.unpackers.len())
            .finish()
    }
}

impl Default for VariableAdapterFactory {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl VariableAdapterFactory {
    /// Create a factory using the default unit parser.
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_unit_parser(config, Box::new(BasicUnitParser))
    }

    /// Create a factory using `units` to decode unit attributes.
    pub fn with_unit_parser(config: ConversionConfig, units: Box<dyn UnitParser>) -> Self {
        let unpackers = UnpackerCache::new(config.unpacker_cache_capacity);
        Self {
            config,
            units,
            unpackers,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Number of memoized unpackers.
    pub fn cached_unpackers(&self) -> usize {
        self.unpackers.len()
    }

    /// Drop every memoized unpacker. Existing adapters keep theirs.
    pub fn clear_cache(&mut self) {
        self.unpackers.clear();
    }

    /// Build the adapter of `variable`, described by `table`.
    pub fn variable_adapter(&mut self, variable: &Variable, table: &AttributeTable) -> Result<VariableAdapter> {
        tracing::debug!("Adapting {} ({})", variable.name, variable.kind());
        let name = variable.name.as_str();
        let adapter = match &variable.ty {
            VariableType::String
            | VariableType::Boolean
            | VariableType::Byte
            | VariableType::Int16
            | VariableType::UInt16
            | VariableType::Int32
            | VariableType::UInt32
            | VariableType::Float32
            | VariableType::Float64 => VariableAdapter::Scalar(self.scalar_adapter(name, variable.kind(), table)?),
            VariableType::Structure { members } => {
                VariableAdapter::Structure(self.structure_adapter(name, members, table)?)
            },
            VariableType::Sequence { members } => {
                let row = self.structure_adapter(name, members, table)?;
                let index = self.mapper().index_type(name);
                VariableAdapter::Sequence(SequenceAdapter::new(
                    name,
                    index,
                    Arc::new(VariableAdapter::Structure(row)),
                ))
            },
            VariableType::List { template } => {
                if template.kind().is_compound() {
                    return Err(DapError::unsupported(
                        VariableKind::List,
                        format!("list {name} of {}", template.kind()),
                    ));
                }
                let element = self.variable_adapter(template, table)?;
                let index = self.mapper().index_type(name);
                VariableAdapter::List(ListAdapter::new(name, index, Arc::new(element)))
            },
            VariableType::Array {
                template,
                dimensions,
            } => VariableAdapter::Array(self.array_adapter(name, template, dimensions, table)?),
            VariableType::Grid { array, maps } => VariableAdapter::Grid(self.grid_adapter(name, array, maps, table)?),
        };
        Ok(adapter)
    }

    /// Build the adapter of one coordinate map of a grid.
    ///
    /// The map must be a one-dimensional numeric array of `size` points.
    pub fn grid_map_adapter(
        &mut self,
        grid: &str,
        map: &Variable,
        size: usize,
        table: &AttributeTable,
    ) -> Result<GridMapAdapter> {
        let (template, dimensions) = match &map.ty {
            VariableType::Array {
                template,
                dimensions,
            } => (template, dimensions),
            _ => {
                return Err(DapError::malformed(format!(
                    "map {} of grid {grid} is a {}, not an array",
                    map.name,
                    map.kind()
                )))
            },
        };
        let kind = NumericKind::from_variable_kind(template.kind()).ok_or_else(|| {
            DapError::malformed(format!(
                "map {} of grid {grid} holds {} values",
                map.name,
                template.kind()
            ))
        })?;
        match dimensions.as_slice() {
            [dim] if dim.size == size => {},
            _ => {
                return Err(DapError::malformed(format!(
                    "map {} of grid {grid} must be one-dimensional with {size} points",
                    map.name
                )))
            },
        }

        let ty = self.mapper().scalar_type(&map.name, template.kind(), table);
        let resolver = AttributeResolver::new(&self.config.attributes);
        let valuator = Valuator::new(kind, table, &resolver, &mut self.unpackers)?;
        let set = RepresentationSetSelector.select(kind, valuator.bounds());
        Ok(GridMapAdapter::new(ty, kind, valuator, size, set))
    }

    fn mapper(&self) -> TypeMapper<'_> {
        TypeMapper::new(&self.config, self.units.as_ref())
    }

    fn scalar_adapter(&mut self, name: &str, kind: VariableKind, table: &AttributeTable) -> Result<ScalarAdapter> {
        let scalar = self.mapper().scalar_type(name, kind, table);
        let leaf = match (kind, NumericKind::from_variable_kind(kind)) {
            (_, Some(numeric)) => {
                let resolver = AttributeResolver::new(&self.config.attributes);
                let valuator = Valuator::new(numeric, table, &resolver, &mut self.unpackers)?;
                let set = RepresentationSetSelector.select(numeric, valuator.bounds());
                ScalarLeaf::Numeric {
                    kind: numeric,
                    valuator,
                    set,
                }
            },
            (VariableKind::Boolean, None) => ScalarLeaf::Boolean,
            (VariableKind::String, None) => ScalarLeaf::Text,
            (other, None) => return Err(DapError::unsupported(other, format!("scalar {name}"))),
        };
        Ok(ScalarAdapter::new(scalar, leaf))
    }

    fn structure_adapter(
        &mut self,
        name: &str,
        members: &[Variable],
        table: &AttributeTable,
    ) -> Result<StructureAdapter> {
        let adapters = members
            .iter()
            .map(|m| self.variable_adapter(m, table.child_table(&m.name)).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        StructureAdapter::new(name, adapters)
    }

    fn array_adapter(
        &mut self,
        name: &str,
        template: &Variable,
        dimensions: &[Dimension],
        table: &AttributeTable,
    ) -> Result<ArrayAdapter> {
        if dimensions.iter().any(|d| d.stride == 0) {
            return Err(DapError::malformed(format!("array {name} has a zero stride")));
        }
        let axes = self
            .mapper()
            .dimension_types(name, dimensions, table)
            .into_iter()
            .zip(dimensions)
            .map(|(ty, dimension)| {
                ArrayAxis::new(ty, dimension.clone()).ok_or_else(|| {
                    DapError::malformed(format!(
                        "dimension {} of array {name} overflows the index range",
                        dimension.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let element = self.variable_adapter(template, table)?;
        ArrayAdapter::new(name, axes, Arc::new(element))
    }

    fn grid_adapter(
        &mut self,
        name: &str,
        array: &Variable,
        maps: &[Variable],
        table: &AttributeTable,
    ) -> Result<GridAdapter> {
        let (template, dimensions) = match &array.ty {
            VariableType::Array {
                template,
                dimensions,
            } => (template, dimensions),
            _ => {
                return Err(DapError::malformed(format!(
                    "grid {name} has a {} as its array",
                    array.kind()
                )))
            },
        };
        if maps.len() != dimensions.len() {
            return Err(DapError::malformed(format!(
                "grid {name} has {} maps for {} dimensions",
                maps.len(),
                dimensions.len()
            )));
        }

        let element = self.variable_adapter(template, grid_array_table(table, &array.name))?;
        let map_adapters = maps
            .iter()
            .zip(dimensions)
            .map(|(map, dim)| self.grid_map_adapter(name, map, dim.size, table.child_table(&map.name)))
            .collect::<Result<Vec<_>>>()?;
        GridAdapter::new(name, Arc::new(element), map_adapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DomainSet, MathType, RepresentationalSet, ScalarType};
    use crate::range::{AdapterDataMaker, Range};
    use crate::source::{Attribute, Value, Vector};

    fn scalar(name: &str, kind: VariableKind) -> Variable {
        Variable::scalar(name, kind).unwrap()
    }

    fn adapt(variable: &Variable, table: &AttributeTable) -> Result<VariableAdapter> {
        VariableAdapterFactory::default().variable_adapter(variable, table)
    }

    #[test]
    fn test_structure_of_reals_is_flat_tuple() {
        for n in 1..5 {
            let members = (0..n)
                .map(|i| scalar(&format!("m{i}"), VariableKind::Float32))
                .collect();
            let adapter = adapt(&Variable::structure("s", members), &AttributeTable::new()).unwrap();
            let ty = adapter.math_type();
            assert!(ty.is_flat());
            if n == 1 {
                assert_eq!(ty, &MathType::from(ScalarType::real("m0", None)));
            } else {
                assert_eq!(ty.dimension(), n);
            }
            assert_eq!(adapter.representational_sets().len(), n);
        }
    }

    #[test]
    fn test_adapter_type_matches_mapper() {
        let variable = Variable::sequence(
            "obs",
            vec![
                scalar("name", VariableKind::String),
                Variable::structure(
                    "pos",
                    vec![scalar("lat", VariableKind::Float32), scalar("lon", VariableKind::Float32)],
                ),
            ],
        );
        let table = AttributeTable::new();
        let factory = VariableAdapterFactory::default();
        let mapped = TypeMapper::new(factory.config(), &BasicUnitParser)
            .map(&variable, &table)
            .unwrap();
        let adapter = adapt(&variable, &table).unwrap();
        assert_eq!(adapter.math_type(), &mapped);
        let sets = adapter.representational_sets();
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0], None);
        assert_eq!(sets[1], Some(RepresentationalSet::ArbitraryFloat));
        assert_eq!(sets[2], Some(RepresentationalSet::ArbitraryFloat));
    }

    #[test]
    fn test_lat_lon_array_domain_is_reversed() {
        let variable = Variable::array(
            "t",
            scalar("t", VariableKind::Float64),
            vec![Dimension::new("lat", 2), Dimension::new("lon", 3)],
        );
        let adapter = adapt(&variable, &AttributeTable::new()).unwrap();
        let function = adapter.math_type().as_function().unwrap();
        let domain = function.domain().as_tuple().unwrap();
        let names: Vec<String> = domain.components().iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["lon", "lat"]);
    }

    #[test]
    fn test_array_flat_field_values() {
        let table = AttributeTable::new()
            .with("_FillValue", Attribute::Int16(vec![-1]))
            .with("add_offset", Attribute::Float64(vec![100.0]));
        let variable = Variable::array(
            "t",
            scalar("t", VariableKind::Int16),
            vec![Dimension::new("lat", 2), Dimension::new("lon", 3)],
        );
        let adapter = adapt(&variable, &table).unwrap();
        let data = adapter
            .data(&Value::Array(Vector::from(vec![0i16, 1, 2, -1, 4, 5])))
            .unwrap();
        let field = data.as_flat_field().unwrap();
        assert_eq!(field.domain().lengths(), vec![3, 2]);
        assert!(matches!(field.domain(), DomainSet::LinearND { .. }));

        let values = field.values().unwrap();
        assert_eq!(values.dim(), (1, 6));
        assert_eq!(values[[0, 0]], 100.0);
        assert!(values[[0, 3]].is_nan());
        assert_eq!(values[[0, 5]], 105.0);

        let again = field.values().unwrap();
        assert_eq!(again[[0, 5]], 105.0);
    }

    #[test]
    fn test_overflowing_dimension_is_malformed() {
        let variable = Variable::array(
            "t",
            scalar("t", VariableKind::Float32),
            vec![Dimension::constrained("time", 3, 5, usize::MAX)],
        );
        let err = adapt(&variable, &AttributeTable::new()).unwrap_err();
        assert!(matches!(err, DapError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_array_sample_count_mismatch() {
        let variable = Variable::array("t", scalar("t", VariableKind::Int16), vec![Dimension::new("x", 3)]);
        let adapter = adapt(&variable, &AttributeTable::new()).unwrap();
        let err = adapter.data(&Value::Array(Vector::from(vec![1i16, 2]))).unwrap_err();
        assert!(matches!(err, DapError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_constrained_array_domain() {
        let variable = Variable::array(
            "t",
            scalar("t", VariableKind::Float32),
            vec![Dimension::constrained("time", 3, 10, 5)],
        );
        let adapter = adapt(&variable, &AttributeTable::new()).unwrap();
        let data = adapter
            .data(&Value::Array(Vector::from(vec![1.0f32, 2.0, 3.0])))
            .unwrap();
        match data.as_flat_field().unwrap().domain() {
            DomainSet::Linear1D(axis) => {
                assert_eq!((axis.first, axis.last, axis.length), (10.0, 20.0, 3));
            },
            other => panic!("unexpected domain {other:?}"),
        }
    }

    #[test]
    fn test_uint16_without_range_is_discrete() {
        let adapter = adapt(&scalar("count", VariableKind::UInt16), &AttributeTable::new()).unwrap();
        assert_eq!(
            adapter.representational_sets(),
            &[Some(RepresentationalSet::DiscreteRange { count: 65_536 })]
        );
    }

    #[test]
    fn test_int32_is_arbitrary() {
        let adapter = adapt(&scalar("n", VariableKind::Int32), &AttributeTable::new()).unwrap();
        assert_eq!(adapter.representational_sets(), &[Some(RepresentationalSet::ArbitraryDouble)]);
    }

    #[test]
    fn test_scaled_byte_scenario() {
        let table = AttributeTable::new()
            .with("valid_min", Attribute::Byte(vec![0]))
            .with("valid_max", Attribute::Byte(vec![200]))
            .with("scale_factor", Attribute::Float32(vec![2.0]));
        let adapter = adapt(&scalar("b", VariableKind::Byte), &table).unwrap();
        assert_eq!(
            adapter.representational_sets(),
            &[Some(RepresentationalSet::LinearRange {
                lower: 0.0,
                upper: 400.0,
                count: 101
            })]
        );
        assert_eq!(adapter.data(&Value::Byte(150)).unwrap().as_real(), Some(300.0));
        assert!(adapter.data(&Value::Byte(201)).unwrap().as_real().unwrap().is_nan());
    }

    #[test]
    fn test_list_of_structure_is_unsupported() {
        let variable = Variable::list(
            "l",
            Variable::structure("s", vec![scalar("a", VariableKind::Int16)]),
        );
        let err = adapt(&variable, &AttributeTable::new()).unwrap_err();
        assert!(matches!(
            err,
            DapError::UnsupportedVariableKind {
                kind: VariableKind::List,
                ..
            }
        ));
    }

    #[test]
    fn test_list_of_scalars() {
        let variable = Variable::list("l", scalar("l", VariableKind::Float64));
        let adapter = adapt(&variable, &AttributeTable::new()).unwrap();
        assert_eq!(adapter.math_type().to_string(), "(l_index -> l)");
        let data = adapter
            .data(&Value::List(Vector::from(vec![1.5f64, 2.5])))
            .unwrap();
        let values = data.as_flat_field().unwrap().values().unwrap();
        assert_eq!(values.row(0).to_vec(), vec![1.5, 2.5]);
    }

    #[test]
    fn test_flat_sequence_materializes_rows() {
        let variable = Variable::sequence(
            "obs",
            vec![scalar("t", VariableKind::Float32), scalar("q", VariableKind::Int16)],
        );
        let table = AttributeTable::new().with(
            "q",
            Attribute::Table(AttributeTable::new().with("scale_factor", Attribute::Float64(vec![0.5]))),
        );
        let adapter = adapt(&variable, &table).unwrap();
        let value = Value::sequence(vec![
            vec![Value::Float32(1.0), Value::Int16(4)],
            vec![Value::Float32(2.0), Value::Int16(6)],
            vec![Value::Float32(3.0), Value::Int16(8)],
        ]);
        let data = adapter.data(&value).unwrap();
        let field = data.as_flat_field().unwrap();
        assert_eq!(field.len(), 3);
        let values = field.values().unwrap();
        assert_eq!(values.dim(), (2, 3));
        assert_eq!(values.row(0).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(values.row(1).to_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sequence_with_text_is_nested_field() {
        let variable = Variable::sequence(
            "obs",
            vec![scalar("name", VariableKind::String), scalar("v", VariableKind::Float64)],
        );
        let adapter = adapt(&variable, &AttributeTable::new()).unwrap();
        assert!(!adapter.is_flat());
        let value = Value::sequence(vec![
            vec![Value::String("a".into()), Value::Float64(1.0)],
            vec![Value::String("b".into()), Value::Float64(2.0)],
        ]);
        let data = adapter.data(&value).unwrap();
        let field = data.as_field().unwrap();
        let second = field.sample(1).unwrap();
        let parts = second.components().unwrap();
        assert_eq!(parts[0].as_text(), Some("b"));
        assert_eq!(parts[1].as_real(), Some(2.0));
        assert!(matches!(field.sample(2), Err(DapError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_grid_domain_from_maps() {
        let array = Variable::array(
            "sst",
            scalar("sst", VariableKind::Float32),
            vec![Dimension::new("lat", 2), Dimension::new("lon", 3)],
        );
        let lat = Variable::array("lat", scalar("lat", VariableKind::Float32), vec![Dimension::new("lat", 2)]);
        let lon = Variable::array("lon", scalar("lon", VariableKind::Float32), vec![Dimension::new("lon", 3)]);
        let grid = Variable::grid("sst", array, vec![lat, lon]);
        let table = AttributeTable::new()
            .with("units", Attribute::text("K"))
            .with("lon", Attribute::Table(AttributeTable::new().with("units", Attribute::text("degrees_east"))));
        let adapter = adapt(&grid, &table).unwrap();
        assert_eq!(adapter.math_type().to_string(), "((lon[degrees_east], lat) -> sst[K])");

        let value = Value::Grid {
            array: Vector::from(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]),
            maps: vec![Vector::from(vec![-10.0f32, 10.0]), Vector::from(vec![0.0f32, 1.0, 2.0])],
        };
        let data = adapter.data(&value).unwrap();
        let field = data.as_flat_field().unwrap();
        match field.domain() {
            DomainSet::Product { factors, .. } => {
                assert_eq!(factors[0].lengths(), vec![3]);
                assert_eq!(factors[1].lengths(), vec![2]);
            },
            other => panic!("unexpected domain {other:?}"),
        }
    }

    #[test]
    fn test_one_dimensional_grid_uses_map_set() {
        let array = Variable::array("a", scalar("a", VariableKind::Float64), vec![Dimension::new("x", 3)]);
        let x = Variable::array("x", scalar("x", VariableKind::Float64), vec![Dimension::new("x", 3)]);
        let adapter = adapt(&Variable::grid("a", array, vec![x]), &AttributeTable::new()).unwrap();
        assert_eq!(adapter.math_type().to_string(), "(x -> a)");

        let value = Value::Grid {
            array: Vector::from(vec![1.0f64, 2.0, 3.0]),
            maps: vec![Vector::from(vec![0.5f64, 1.5, 4.0])],
        };
        let data = adapter.data(&value).unwrap();
        let field = data.as_flat_field().unwrap();
        assert!(matches!(field.domain(), DomainSet::Gridded1D { .. }));
        assert_eq!(field.domain().lengths(), vec![3]);
        assert_eq!(field.values().unwrap().row(0).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_grid_map_count_must_match_rank() {
        let array = Variable::array(
            "a",
            scalar("a", VariableKind::Int16),
            vec![Dimension::new("y", 2), Dimension::new("x", 2)],
        );
        let y = Variable::array("y", scalar("y", VariableKind::Float32), vec![Dimension::new("y", 2)]);
        let err = adapt(&Variable::grid("g", array.clone(), vec![y.clone()]), &AttributeTable::new()).unwrap_err();
        assert!(matches!(err, DapError::MalformedMetadata { .. }));

        let bad_x = Variable::array("x", scalar("x", VariableKind::Float32), vec![Dimension::new("x", 5)]);
        let err = adapt(&Variable::grid("g", array, vec![y, bad_x]), &AttributeTable::new()).unwrap_err();
        assert!(matches!(err, DapError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_unpackers_are_memoized() {
        let table = AttributeTable::new().with("scale_factor", Attribute::Float32(vec![0.5]));
        let mut factory = VariableAdapterFactory::default();
        let a = factory.variable_adapter(&scalar("a", VariableKind::Int16), &table).unwrap();
        let b = factory.variable_adapter(&scalar("b", VariableKind::UInt16), &table).unwrap();
        assert_eq!(factory.cached_unpackers(), 1);
        let (VariableAdapter::Scalar(a), VariableAdapter::Scalar(b)) = (&a, &b) else {
            panic!("expected scalar adapters");
        };
        match (a.leaf(), b.leaf()) {
            (ScalarLeaf::Numeric { valuator: va, .. }, ScalarLeaf::Numeric { valuator: vb, .. }) => {
                assert!(Arc::ptr_eq(va.unpacker(), vb.unpacker()));
            },
            _ => panic!("expected numeric leaves"),
        }
        factory.clear_cache();
        assert_eq!(factory.cached_unpackers(), 0);
    }

    #[test]
    fn test_sub_range_datum_matches_parent() {
        let template = adapt(&scalar("v", VariableKind::Int32), &AttributeTable::new()).unwrap();
        let maker = Arc::new(AdapterDataMaker::new(Arc::new(template)));
        let range = Range::new(Vector::from((0..10).collect::<Vec<i32>>()), maker);
        let sub = range.sub_range(3, 4).unwrap();
        assert_eq!(sub.datum(0).unwrap().as_real(), range.datum(3).unwrap().as_real());
        assert!(sub.shares_storage(&range));
    }
}
