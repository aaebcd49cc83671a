//! Deferred samples of nested fields.

use super::Range;
use crate::error::Result;
use crate::model::Data;

/// One sample of a range, converted only when read.
#[derive(Debug, Clone)]
pub struct VirtualData {
    range: Range,
    index: usize,
}

impl VirtualData {
    /// Defer element `index` of `range`.
    pub fn new(range: Range, index: usize) -> Self {
        Self { range, index }
    }

    /// Position of the sample in its range.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Convert the sample. Nothing is cached; every call converts again.
    pub fn resolve(&self) -> Result<Data> {
        self.range.datum(self.index)
    }
}

/// One deferred sample per element of `range`.
pub(crate) fn samples_of(range: &Range) -> Vec<VirtualData> {
    (0..range.len())
        .map(|index| VirtualData::new(range.clone(), index))
        .collect()
}
