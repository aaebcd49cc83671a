//! Numeric storage kinds and their natural limits.

use crate::source::VariableKind;

/// Storage kind of a numeric scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
}

impl NumericKind {
    /// Numeric kind of a variable kind, if it is numeric.
    pub fn from_variable_kind(kind: VariableKind) -> Option<Self> {
        match kind {
            VariableKind::Byte => Some(Self::Byte),
            VariableKind::Int16 => Some(Self::Int16),
            VariableKind::UInt16 => Some(Self::UInt16),
            VariableKind::Int32 => Some(Self::Int32),
            VariableKind::UInt32 => Some(Self::UInt32),
            VariableKind::Float32 => Some(Self::Float32),
            VariableKind::Float64 => Some(Self::Float64),
            _ => None,
        }
    }

    /// The corresponding variable kind.
    pub fn variable_kind(self) -> VariableKind {
        match self {
            Self::Byte => VariableKind::Byte,
            Self::Int16 => VariableKind::Int16,
            Self::UInt16 => VariableKind::UInt16,
            Self::Int32 => VariableKind::Int32,
            Self::UInt32 => VariableKind::UInt32,
            Self::Float32 => VariableKind::Float32,
            Self::Float64 => VariableKind::Float64,
        }
    }

    /// Whether values are floating point.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Whether values are unsigned integers.
    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::Byte | Self::UInt16 | Self::UInt32)
    }

    /// Smallest and largest representable values.
    pub fn natural_range(self) -> (f64, f64) {
        match self {
            Self::Byte => (0.0, f64::from(u8::MAX)),
            Self::Int16 => (f64::from(i16::MIN), f64::from(i16::MAX)),
            Self::UInt16 => (0.0, f64::from(u16::MAX)),
            Self::Int32 => (f64::from(i32::MIN), f64::from(i32::MAX)),
            Self::UInt32 => (0.0, f64::from(u32::MAX)),
            Self::Float32 => (-f64::from(f32::MAX), f64::from(f32::MAX)),
            Self::Float64 => (-f64::MAX, f64::MAX),
        }
    }

    /// Fold a negative bit pattern of an unsigned kind into its unsigned value.
    ///
    /// Attributes of unsigned variables are often declared with the signed type of
    /// the same width, so `-1` on a 16-bit unsigned variable means `65535`.
    pub fn fold(self, value: f64) -> f64 {
        if value >= 0.0 || value.is_nan() {
            return value;
        }
        let modulus = match self {
            Self::Byte => 256.0,
            Self::UInt16 => 65_536.0,
            Self::UInt32 => 4_294_967_296.0,
            _ => return value,
        };
        if value >= -modulus {
            value + modulus
        } else {
            value
        }
    }

    /// Round a value to the precision stored values of this kind carry.
    pub fn to_storage_precision(self, value: f64) -> f64 {
        match self {
            Self::Float32 => f64::from(value as f32),
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_fold() {
        assert_eq!(NumericKind::UInt16.fold(-1.0), 65_535.0);
        assert_eq!(NumericKind::Byte.fold(-56.0), 200.0);
        assert_eq!(NumericKind::UInt32.fold(-1.0), 4_294_967_295.0);
        assert_eq!(NumericKind::Int16.fold(-1.0), -1.0);
        assert_eq!(NumericKind::UInt16.fold(12.0), 12.0);
    }

    #[test]
    fn test_storage_precision() {
        assert_eq!(NumericKind::Float32.to_storage_precision(-999.9), f64::from(-999.9f32));
        assert_eq!(NumericKind::Float64.to_storage_precision(-999.9), -999.9);
    }

    #[test]
    fn test_natural_ranges() {
        assert_eq!(NumericKind::UInt16.natural_range(), (0.0, 65_535.0));
        assert_eq!(NumericKind::Byte.natural_range(), (0.0, 255.0));
        assert_eq!(
            NumericKind::Int32.natural_range(),
            (-2_147_483_648.0, 2_147_483_647.0)
        );
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            VariableKind::Byte,
            VariableKind::Int16,
            VariableKind::UInt16,
            VariableKind::Int32,
            VariableKind::UInt32,
            VariableKind::Float32,
            VariableKind::Float64,
        ] {
            let numeric = NumericKind::from_variable_kind(kind).unwrap();
            assert_eq!(numeric.variable_kind(), kind);
        }
        assert!(NumericKind::from_variable_kind(VariableKind::String).is_none());
    }
}
