//! Linear unpacking of stored values and its memo table.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Maps packed values to physical values with `v * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unpacker {
    /// No packing.
    Identity,
    /// Scale only.
    Scale(f64),
    /// Offset only.
    Offset(f64),
    /// Scale, then offset.
    ScaleAndOffset {
        /// Multiplier.
        scale: f64,
        /// Addend.
        offset: f64,
    },
}

impl Unpacker {
    /// Choose the simplest unpacker for the given attributes.
    ///
    /// An absent scale or a scale of 1 is neutral, as is an absent or zero offset.
    pub fn new(scale: Option<f64>, offset: Option<f64>) -> Self {
        let scale = scale.filter(|s| *s != 1.0);
        let offset = offset.filter(|o| *o != 0.0);
        match (scale, offset) {
            (None, None) => Self::Identity,
            (Some(scale), None) => Self::Scale(scale),
            (None, Some(offset)) => Self::Offset(offset),
            (Some(scale), Some(offset)) => Self::ScaleAndOffset { scale, offset },
        }
    }

    /// Unpack one value. NaN stays NaN.
    pub fn unpack(&self, value: f64) -> f64 {
        match *self {
            Self::Identity => value,
            Self::Scale(scale) => value * scale,
            Self::Offset(offset) => value + offset,
            Self::ScaleAndOffset { scale, offset } => value * scale + offset,
        }
    }

    /// Spacing of unpacked values for unit spacing of packed values.
    pub fn increment(&self) -> f64 {
        match *self {
            Self::Scale(scale) | Self::ScaleAndOffset { scale, .. } => scale,
            Self::Identity | Self::Offset(_) => 1.0,
        }
    }

    /// Whether this unpacker leaves values unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }
}

/// Bounded memo table of unpackers keyed by `(scale, offset)`.
#[derive(Debug)]
pub struct UnpackerCache {
    entries: LruCache<(u64, u64), Arc<Unpacker>>,
}

impl UnpackerCache {
    /// Create a cache holding at most `capacity` unpackers (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// The shared unpacker for `(scale, offset)`, building it on a miss.
    pub fn get_or_insert(&mut self, scale: Option<f64>, offset: Option<f64>) -> Arc<Unpacker> {
        let unpacker = Unpacker::new(scale, offset);
        let key = match unpacker {
            Unpacker::Identity => (1.0f64.to_bits(), 0.0f64.to_bits()),
            Unpacker::Scale(s) => (s.to_bits(), 0.0f64.to_bits()),
            Unpacker::Offset(o) => (1.0f64.to_bits(), o.to_bits()),
            Unpacker::ScaleAndOffset { scale, offset } => (scale.to_bits(), offset.to_bits()),
        };
        if let Some(hit) = self.entries.get(&key) {
            tracing::trace!("Unpacker cache hit: {:?}", unpacker);
            return Arc::clone(hit);
        }
        let shared = Arc::new(unpacker);
        self.entries.put(key, Arc::clone(&shared));
        shared
    }

    /// Number of memoized unpackers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every memoized unpacker.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
