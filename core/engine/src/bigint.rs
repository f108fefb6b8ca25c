//! This module implements the JavaScript bigint primitive type.

use crate::gc::{empty_trace, Finalize, Trace};
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use std::{
    fmt::{self, Display},
    ops::Neg,
    rc::Rc,
};

/// The raw bigint type.
pub type RawBigInt = num_bigint::BigInt;

/// JavaScript bigint primitive rust type.
#[derive(Debug, Finalize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsBigInt {
    inner: Rc<RawBigInt>,
}

unsafe impl Trace for JsBigInt {
    empty_trace!();
}

impl JsBigInt {
    /// Create a new [`JsBigInt`].
    #[inline]
    pub fn new<T: Into<Self>>(value: T) -> Self {
        value.into()
    }

    /// Create a [`JsBigInt`] with value `0`.
    #[inline]
    pub fn zero() -> Self {
        Self {
            inner: Rc::new(RawBigInt::zero()),
        }
    }

    /// Check if it is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    /// Create a [`JsBigInt`] with value `1`.
    #[inline]
    pub fn one() -> Self {
        Self {
            inner: Rc::new(RawBigInt::one()),
        }
    }

    /// Convert the bigint to a string with the given radix.
    #[inline]
    pub fn to_string_radix(&self, radix: u32) -> String {
        self.inner.to_str_radix(radix)
    }

    /// Converts the `BigInt` to a `f64` type.
    ///
    /// Returns `f64::INFINITY` if the `BigInt` is too big.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.inner.to_f64().unwrap_or(f64::INFINITY)
    }

    /// Converts a string to a `BigInt` with the specified radix.
    #[inline]
    pub fn from_string_radix(buf: &str, radix: u32) -> Option<Self> {
        Some(Self {
            inner: Rc::new(RawBigInt::parse_bytes(buf.as_bytes(), radix)?),
        })
    }

    /// The `StringToBigInt` abstract operation.
    ///
    /// Binary, octal and hexadecimal literals take no sign; only the decimal
    /// form may be signed. The empty string is `0n`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-stringtobigint
    pub fn from_string(string: &str) -> Option<Self> {
        let string = string.trim_matches(crate::string::is_trimmable_whitespace);

        if string.is_empty() {
            return Some(Self::zero());
        }

        let mut radix = 10;
        let mut rest = string;
        if let Some(stripped) = string
            .strip_prefix("0b")
            .or_else(|| string.strip_prefix("0B"))
        {
            radix = 2;
            rest = stripped;
        } else if let Some(stripped) = string
            .strip_prefix("0x")
            .or_else(|| string.strip_prefix("0X"))
        {
            radix = 16;
            rest = stripped;
        } else if let Some(stripped) = string
            .strip_prefix("0o")
            .or_else(|| string.strip_prefix("0O"))
        {
            radix = 8;
            rest = stripped;
        }

        if radix != 10 && (rest.is_empty() || rest.starts_with(['+', '-'])) {
            return None;
        }

        Self::from_string_radix(rest, radix)
    }

    /// Checks for `SameValueZero` equality.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-bigint-sameValueZero
    #[inline]
    pub fn same_value_zero(x: &Self, y: &Self) -> bool {
        Self::equal(x, y)
    }

    /// Checks for `SameValue` equality.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-bigint-sameValue
    #[inline]
    pub fn same_value(x: &Self, y: &Self) -> bool {
        Self::equal(x, y)
    }

    /// Checks for mathematical equality.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-bigint-equal
    #[inline]
    pub fn equal(x: &Self, y: &Self) -> bool {
        x == y
    }

    /// Performs the unary `-` operation.
    #[inline]
    pub fn neg(x: &Self) -> Self {
        Self::new(x.as_inner().clone().neg())
    }

    /// The `ToBigInt64` element coercion: the bigint modulo 2⁶⁴, interpreted
    /// as a signed 64-bit integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tobigint64
    pub fn to_big_int64(&self) -> i64 {
        let two_e_64: RawBigInt = RawBigInt::one() << 64u32;
        let int64_bit = self.inner.mod_floor(&two_e_64);
        let two_e_63: RawBigInt = RawBigInt::one() << 63u32;

        if int64_bit >= two_e_63 {
            (int64_bit - two_e_64)
                .to_i64()
                .expect("value is in i64 range after wrapping")
        } else {
            int64_bit
                .to_i64()
                .expect("value is in i64 range after wrapping")
        }
    }

    /// The `ToBigUint64` element coercion: the bigint modulo 2⁶⁴.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tobiguint64
    pub fn to_big_uint64(&self) -> u64 {
        let two_e_64: RawBigInt = RawBigInt::one() << 64u32;
        self.inner
            .mod_floor(&two_e_64)
            .to_u64()
            .expect("value is in u64 range after wrapping")
    }

    /// Check if the bigint is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }

    pub(crate) fn as_inner(&self) -> &RawBigInt {
        &self.inner
    }
}

impl Display for JsBigInt {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl From<RawBigInt> for JsBigInt {
    #[inline]
    fn from(value: RawBigInt) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }
}

impl From<i8> for JsBigInt {
    #[inline]
    fn from(value: i8) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

impl From<u8> for JsBigInt {
    #[inline]
    fn from(value: u8) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

impl From<i32> for JsBigInt {
    #[inline]
    fn from(value: i32) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

impl From<u32> for JsBigInt {
    #[inline]
    fn from(value: u32) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

impl From<i64> for JsBigInt {
    #[inline]
    fn from(value: i64) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

impl From<u64> for JsBigInt {
    #[inline]
    fn from(value: u64) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

impl From<usize> for JsBigInt {
    #[inline]
    fn from(value: usize) -> Self {
        Self {
            inner: Rc::new(RawBigInt::from(value)),
        }
    }
}

/// The error indicates that the conversion from [`f64`] to [`JsBigInt`] failed.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TryFromF64Error;

impl Display for TryFromF64Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not convert f64 value to a BigInt type")
    }
}

impl TryFrom<f64> for JsBigInt {
    type Error = TryFromF64Error;

    #[inline]
    fn try_from(n: f64) -> Result<Self, Self::Error> {
        // A float with a fractional part has no mathematically equal bigint.
        if n.trunc() != n {
            return Err(TryFromF64Error);
        }
        RawBigInt::from_f64(n).map_or(Err(TryFromF64Error), |bigint| Ok(Self::new(bigint)))
    }
}
