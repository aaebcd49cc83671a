//! Read-side views over source vectors.
//!
//! A [`Range`] is an offset/length window over a shared [`Vector`] paired with a
//! [`DataMaker`] that turns one raw element into a [`Data`] value. Fields are
//! built from ranges lazily: flat ranges through a [`LazyFieldAccessor`], nested
//! ranges through one [`VirtualData`] per sample.

mod lazy;
mod maker;
mod virtual_data;

pub use lazy::{LazyFieldAccessor, VectorFieldAccessor};
pub use maker::{AdapterDataMaker, DataMaker};
pub use virtual_data::VirtualData;
pub(crate) use virtual_data::samples_of;

use std::sync::Arc;

use crate::error::{DapError, Result};
use crate::model::Data;
use crate::source::{Element, Vector};

/// A window over a shared vector plus the maker that converts its elements.
#[derive(Debug, Clone)]
pub struct Range {
    vector: Vector,
    maker: Arc<dyn DataMaker>,
    offset: usize,
    length: usize,
}

impl Range {
    /// A range covering the whole vector.
    pub fn new(vector: Vector, maker: Arc<dyn DataMaker>) -> Self {
        let length = vector.len();
        Self {
            vector,
            maker,
            offset: 0,
            length,
        }
    }

    /// Number of elements in the window.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Position of the window in the underlying vector.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The underlying vector.
    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    /// The maker shared by every view of this range.
    pub fn maker(&self) -> &Arc<dyn DataMaker> {
        &self.maker
    }

    /// Raw element at `index` within the window.
    pub fn element(&self, index: usize) -> Result<Element<'_>> {
        let out_of_range = DapError::IndexOutOfRange {
            index,
            length: self.length,
        };
        if index >= self.length {
            return Err(out_of_range);
        }
        self.vector.element(self.offset + index).ok_or(out_of_range)
    }

    /// Convert the element at `index`.
    pub fn datum(&self, index: usize) -> Result<Data> {
        self.maker.data(self.element(index)?)
    }

    /// A narrower window sharing this range's storage and maker.
    pub fn sub_range(&self, offset: usize, length: usize) -> Result<Range> {
        let end = offset.checked_add(length).filter(|end| *end <= self.length);
        if end.is_none() {
            return Err(DapError::malformed(format!(
                "sub-range {offset}+{length} exceeds range of length {}",
                self.length
            )));
        }
        Ok(Range {
            vector: self.vector.clone(),
            maker: Arc::clone(&self.maker),
            offset: self.offset + offset,
            length,
        })
    }

    /// Whether both ranges view the same storage.
    pub fn shares_storage(&self, other: &Range) -> bool {
        self.vector.shares_storage(&other.vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Real, ScalarType};

    #[derive(Debug)]
    struct Widen;

    impl DataMaker for Widen {
        fn data(&self, element: Element<'_>) -> Result<Data> {
            let value = element
                .as_f64()
                .ok_or_else(|| DapError::type_mismatch("number", element.kind().name()))?;
            Ok(Data::Real(Real {
                ty: ScalarType::real("v", None),
                value,
            }))
        }
    }

    fn range() -> Range {
        Range::new(Vector::from(vec![10i16, 11, 12, 13, 14]), Arc::new(Widen))
    }

    #[test]
    fn test_datum_and_bounds() {
        let range = range();
        assert_eq!(range.len(), 5);
        assert_eq!(range.datum(4).unwrap().as_real(), Some(14.0));
        assert!(matches!(
            range.datum(5),
            Err(DapError::IndexOutOfRange { index: 5, length: 5 })
        ));
    }

    #[test]
    fn test_sub_range_matches_parent() {
        let range = range();
        let sub = range.sub_range(1, 3).unwrap();
        assert_eq!(sub.len(), 3);
        assert!(sub.shares_storage(&range));
        assert!(Arc::ptr_eq(sub.maker(), range.maker()));
        for i in 0..3 {
            assert_eq!(
                sub.datum(i).unwrap().as_real(),
                range.datum(1 + i).unwrap().as_real()
            );
        }
        assert!(sub.datum(3).is_err());
    }

    #[test]
    fn test_sub_range_rejects_overflow() {
        let range = range();
        assert!(range.sub_range(3, 3).is_err());
        assert!(range.sub_range(usize::MAX, 2).is_err());
        assert!(range.sub_range(5, 0).unwrap().is_empty());
    }
}
