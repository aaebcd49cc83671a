//! Source-side dataset model.
//!
//! This module describes the externally supplied dataset: the variable type tree,
//! the attribute tables attached to it, and the instance data that is later
//! materialized by the adapters.

mod attribute;
mod dataset;
mod reader;
mod value;
mod variable;

pub use attribute::{Attribute, AttributeTable};
pub use dataset::{Dataset, DatasetInfo, GLOBAL_ATTRIBUTES};
pub use reader::DatasetReader;
pub use value::{Element, Value, Vector};
pub use variable::{Dimension, Variable, VariableKind, VariableType};
