//! Conversion of raw elements into data values.

use std::fmt::Debug;
use std::sync::Arc;

use crate::adapter::VariableAdapter;
use crate::error::Result;
use crate::model::Data;
use crate::source::Element;

/// Turns one raw element of a range into a [`Data`] value.
pub trait DataMaker: Debug + Send + Sync {
    /// Convert `element`.
    fn data(&self, element: Element<'_>) -> Result<Data>;
}

/// Maker that delegates to the adapter of the range's element template.
#[derive(Debug, Clone)]
pub struct AdapterDataMaker {
    template: Arc<VariableAdapter>,
}

impl AdapterDataMaker {
    /// Create a maker for elements of `template`.
    pub fn new(template: Arc<VariableAdapter>) -> Self {
        Self { template }
    }

    /// The element template.
    pub fn template(&self) -> &Arc<VariableAdapter> {
        &self.template
    }
}

impl DataMaker for AdapterDataMaker {
    fn data(&self, element: Element<'_>) -> Result<Data> {
        self.template.datum(element)
    }
}
