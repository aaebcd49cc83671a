//! Numeric value pipeline: attribute lookup, vetting, unpacking and ranging.

mod attributes;
mod numeric;
mod ranger;
mod selector;
mod unpacker;
mod valuator;
mod vetter;

pub use attributes::{AttributeResolver, ValueAttributes};
pub use numeric::NumericKind;
pub use ranger::ValueBounds;
pub use selector::RepresentationSetSelector;
pub use unpacker::{Unpacker, UnpackerCache};
pub use valuator::Valuator;
pub use vetter::Vetter;
