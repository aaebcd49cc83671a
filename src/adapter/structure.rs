//! Adapter of structures: records of named members.

use std::sync::Arc;

use super::VariableAdapter;
use crate::error::{DapError, Result};
use crate::model::{Data, MathType, RepresentationalSet, Tuple};
use crate::source::{Element, Value};

/// Adapter of a structure; also the row adapter of sequences.
#[derive(Debug, Clone)]
pub struct StructureAdapter {
    name: String,
    ty: MathType,
    members: Vec<Arc<VariableAdapter>>,
    sets: Vec<Option<RepresentationalSet>>,
}

impl StructureAdapter {
    /// Combine member adapters.
    ///
    /// A structure without members is malformed; a single member's type is used as is.
    pub fn new(name: impl Into<String>, members: Vec<Arc<VariableAdapter>>) -> Result<Self> {
        let name = name.into();
        let components = members.iter().map(|m| m.math_type().clone()).collect();
        let ty = MathType::tuple(components)
            .map_err(|_| DapError::malformed(format!("structure {name} has no members")))?;
        let sets = members
            .iter()
            .flat_map(|m| m.representational_sets().iter().copied())
            .collect();
        Ok(Self {
            name,
            ty,
            members,
            sets,
        })
    }

    /// Structure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tuple type, or the lone member's type.
    pub fn math_type(&self) -> &MathType {
        &self.ty
    }

    /// Member adapters in declared order.
    pub fn members(&self) -> &[Arc<VariableAdapter>] {
        &self.members
    }

    /// Member set slots, concatenated in declared order.
    pub fn representational_sets(&self) -> &[Option<RepresentationalSet>] {
        &self.sets
    }

    /// Convert a structure instance.
    pub fn data(&self, value: &Value) -> Result<Data> {
        let values = self.member_values(value)?;
        if let [member] = self.members.as_slice() {
            return member.data(&values[0]);
        }
        let components = self
            .members
            .iter()
            .zip(values)
            .map(|(member, value)| member.data(value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Data::Tuple(Tuple {
            ty: self.ty.clone(),
            components,
        }))
    }

    /// Append the processed real leaves of a structure instance.
    pub fn flat_values(&self, value: &Value, out: &mut Vec<f64>) -> Result<()> {
        let values = self.member_values(value)?;
        for (member, value) in self.members.iter().zip(values) {
            member.flat_values(Element::from(value), out)?;
        }
        Ok(())
    }

    fn member_values<'v>(&self, value: &'v Value) -> Result<&'v [Value]> {
        match value {
            Value::Structure(values) if values.len() == self.members.len() => Ok(values),
            Value::Structure(values) => Err(DapError::type_mismatch(
                format!("{} members in {}", self.members.len(), self.name),
                format!("{} members", values.len()),
            )),
            other => Err(DapError::type_mismatch("structure", other.kind().name())),
        }
    }
}
