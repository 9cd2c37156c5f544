//! Numeric types that can be recorded in a named index.
//!
//! Four kinds are supported: 32-bit and 64-bit signed integers and 32-bit and
//! 64-bit IEEE floats. Each kind has a one-byte tag that is written into every
//! index key, so an entry recorded as a `long` is never matched by an `int`
//! range even when the numbers coincide.
//!
//! # Order-preserving encoding
//!
//! - Integers: the sign bit is flipped and the result is stored big-endian.
//! - Floats: positive values get the sign bit flipped, negative values get all
//!   bits flipped. `-0.0` is stored as `+0.0`. NaN is stored as all ones and
//!   sorts after `+inf`.
//!
//! Comparing encoded bytes gives the same result as comparing the numbers.
//!
//! ```
//! use valuectx_core::Numeric;
//!
//! let mut a = Vec::new();
//! let mut b = Vec::new();
//! (-3i64).encode_sortable(&mut a);
//! 2i64.encode_sortable(&mut b);
//! assert!(a < b);
//! assert_eq!(i64::decode_sortable(&a).unwrap(), -3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The numeric type of an indexed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit IEEE float.
    Float,
    /// 64-bit IEEE float.
    Double,
}

impl NumericKind {
    /// All kinds, in tag order.
    pub const ALL: [Self; 4] = [Self::Int, Self::Long, Self::Float, Self::Double];

    /// The tag byte written into index keys.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Int => 0x01,
            Self::Long => 0x02,
            Self::Float => 0x03,
            Self::Double => 0x04,
        }
    }

    /// Look up a kind by its tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::Int),
            0x02 => Some(Self::Long),
            0x03 => Some(Self::Float),
            0x04 => Some(Self::Double),
            _ => None,
        }
    }

    /// The lowercase name used in endpoint names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Number of bytes in the sortable encoding.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double => 8,
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown numeric kind: {s}")))
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A number that can be stored in a named numeric index.
///
/// This trait is sealed; it is implemented for `i32`, `i64`, `f32` and `f64`.
pub trait Numeric:
    sealed::Sealed + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The kind tag for this type.
    const KIND: NumericKind;
    /// Smallest value, used when a range has no lower bound.
    const MIN: Self;
    /// Largest value, used when a range has no upper bound.
    const MAX: Self;

    /// Append the order-preserving encoding of `self` to `buf`.
    fn encode_sortable(self, buf: &mut Vec<u8>);

    /// Decode a value previously written by [`Numeric::encode_sortable`].
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not exactly `KIND.width()` bytes long.
    fn decode_sortable(bytes: &[u8]) -> Result<Self, CoreError>;

    /// Wrap this value in a [`NumericValue`].
    fn into_numeric(self) -> NumericValue;
}

fn fixed<const W: usize>(bytes: &[u8], kind: NumericKind) -> Result<[u8; W], CoreError> {
    bytes.try_into().map_err(|_| {
        CoreError::Encoding(format!(
            "expected {W} bytes for {kind}, got {}",
            bytes.len()
        ))
    })
}

macro_rules! impl_numeric_int {
    ($ty:ty, $unsigned:ty, $kind:ident, $variant:ident) => {
        impl Numeric for $ty {
            const KIND: NumericKind = NumericKind::$kind;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            #[allow(clippy::cast_sign_loss)]
            fn encode_sortable(self, buf: &mut Vec<u8>) {
                let flipped = (self as $unsigned) ^ (1 << (<$unsigned>::BITS - 1));
                buf.extend_from_slice(&flipped.to_be_bytes());
            }

            #[allow(clippy::cast_possible_wrap)]
            fn decode_sortable(bytes: &[u8]) -> Result<Self, CoreError> {
                let raw = <$unsigned>::from_be_bytes(fixed(bytes, Self::KIND)?);
                Ok((raw ^ (1 << (<$unsigned>::BITS - 1))) as $ty)
            }

            fn into_numeric(self) -> NumericValue {
                NumericValue::$variant(self)
            }
        }
    };
}

macro_rules! impl_numeric_float {
    ($ty:ty, $bits:ty, $kind:ident, $variant:ident) => {
        impl Numeric for $ty {
            const KIND: NumericKind = NumericKind::$kind;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            fn encode_sortable(self, buf: &mut Vec<u8>) {
                const SIGN: $bits = 1 << (<$bits>::BITS - 1);
                let encoded = if self.is_nan() {
                    <$bits>::MAX
                } else if self == 0.0 {
                    // -0.0 and +0.0 compare equal, so they share one encoding.
                    SIGN
                } else {
                    let bits = self.to_bits();
                    if bits & SIGN == 0 {
                        bits ^ SIGN
                    } else {
                        !bits
                    }
                };
                buf.extend_from_slice(&encoded.to_be_bytes());
            }

            fn decode_sortable(bytes: &[u8]) -> Result<Self, CoreError> {
                const SIGN: $bits = 1 << (<$bits>::BITS - 1);
                let encoded = <$bits>::from_be_bytes(fixed(bytes, Self::KIND)?);
                if encoded == <$bits>::MAX {
                    return Ok(<$ty>::NAN);
                }
                let bits = if encoded & SIGN == 0 { !encoded } else { encoded ^ SIGN };
                Ok(<$ty>::from_bits(bits))
            }

            fn into_numeric(self) -> NumericValue {
                NumericValue::$variant(self)
            }
        }
    };
}

impl_numeric_int!(i32, u32, Int, Int);
impl_numeric_int!(i64, u64, Long, Long);
impl_numeric_float!(f32, u32, Float, Float);
impl_numeric_float!(f64, u64, Double, Double);

/// A number whose kind is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit IEEE float.
    Float(f32),
    /// 64-bit IEEE float.
    Double(f64),
}

impl NumericValue {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> NumericKind {
        match self {
            Self::Int(_) => NumericKind::Int,
            Self::Long(_) => NumericKind::Long,
            Self::Float(_) => NumericKind::Float,
            Self::Double(_) => NumericKind::Double,
        }
    }

    /// Append the order-preserving encoding of this value to `buf`.
    pub fn encode_sortable(self, buf: &mut Vec<u8>) {
        match self {
            Self::Int(v) => v.encode_sortable(buf),
            Self::Long(v) => v.encode_sortable(buf),
            Self::Float(v) => v.encode_sortable(buf),
            Self::Double(v) => v.encode_sortable(buf),
        }
    }

    /// Decode a value of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` has the wrong width for `kind`.
    pub fn decode_sortable(kind: NumericKind, bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(match kind {
            NumericKind::Int => Self::Int(i32::decode_sortable(bytes)?),
            NumericKind::Long => Self::Long(i64::decode_sortable(bytes)?),
            NumericKind::Float => Self::Float(f32::decode_sortable(bytes)?),
            NumericKind::Double => Self::Double(f64::decode_sortable(bytes)?),
        })
    }

    /// Extract a statically typed value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeMismatch`] if this value is of a different kind.
    pub fn get<N: Numeric>(self) -> Result<N, CoreError> {
        if self.kind() != N::KIND {
            return Err(CoreError::type_mismatch(N::KIND.name(), self.kind().name()));
        }
        let mut buf = Vec::with_capacity(N::KIND.width());
        self.encode_sortable(&mut buf);
        N::decode_sortable(&buf)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
        }
    }
}
