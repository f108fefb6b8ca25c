//! This module implements the `Number` primitive semantics.
//!
//! It carries the numeric abstract operations the rest of the core leans on:
//! equality and ordering of IEEE-754 doubles with ECMAScript's NaN/±0 rules,
//! the shortest-round-trip number-to-string conversion, and `StringToNumber`.

mod conversions;

pub(crate) use conversions::{
    f64_to_int16, f64_to_int32, f64_to_int8, f64_to_uint16, f64_to_uint32, f64_to_uint8,
    f64_to_uint8_clamp,
};

use crate::{
    builtins::function::{make_constructor_fn, ordinary_create_from_constructor},
    context::{Context, StandardObjects},
    object::ObjectData,
    string::is_trimmable_whitespace,
    value::{AbstractRelation, JsValue},
    JsResult, JsString,
};

/// JavaScript `Number` primitive semantics.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Number;

impl Number {
    /// The largest integer `n` such that `n` and `n + 1` are both exactly
    /// representable as a `f64`, i.e. 2⁵³ − 1.
    pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991_f64;

    /// The smallest safe integer, −(2⁵³ − 1).
    pub(crate) const MIN_SAFE_INTEGER: f64 = -9_007_199_254_740_991_f64;

    /// The abstract operation `Number::equal`.
    ///
    /// `NaN` compares unequal to everything, and `+0` equals `-0`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-number-equal
    #[inline]
    #[allow(clippy::float_cmp)]
    pub(crate) fn equal(x: f64, y: f64) -> bool {
        x == y
    }

    /// The abstract operation `Number::sameValue`.
    ///
    /// `NaN` equals `NaN`, and `+0` is distinguished from `-0`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-number-sameValue
    #[inline]
    pub(crate) fn same_value(x: f64, y: f64) -> bool {
        if x.is_nan() && y.is_nan() {
            return true;
        }
        x.to_bits() == y.to_bits()
    }

    /// The abstract operation `Number::sameValueZero`.
    ///
    /// Like `sameValue`, except `+0` equals `-0`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-number-sameValueZero
    #[inline]
    #[allow(clippy::float_cmp)]
    pub(crate) fn same_value_zero(x: f64, y: f64) -> bool {
        if x.is_nan() && y.is_nan() {
            return true;
        }
        x == y
    }

    /// The abstract operation `Number::lessThan`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-number-lessThan
    #[inline]
    pub(crate) fn less_than(x: f64, y: f64) -> AbstractRelation {
        if x.is_nan() || y.is_nan() {
            return AbstractRelation::Undefined;
        }
        (x < y).into()
    }

    /// The abstract operation `Number::toString`, i.e. the exact string the
    /// language produces for a number.
    ///
    /// `ryu-js` implements the shortest-round-trip algorithm with the
    /// ECMAScript formatting rules (integers print without a trailing `.0`,
    /// exponent notation is used exactly when the specification says so).
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-number-tostring
    pub(crate) fn to_js_string(value: f64) -> JsString {
        if value.is_nan() {
            return "NaN".into();
        }
        if value.is_infinite() {
            return if value.is_sign_positive() {
                "Infinity".into()
            } else {
                "-Infinity".into()
            };
        }

        // Fast path for the i32 range, which the engine stores unboxed.
        if value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
            let as_int = value as i32;
            if as_int != 0 || value.is_sign_positive() {
                let mut buffer = itoa::Buffer::new();
                return buffer.format(as_int).into();
            }
        }

        let mut buffer = ryu_js::Buffer::new();
        buffer.format_finite(value).into()
    }

    /// The `StringToNumber` abstract operation.
    ///
    /// Leading and trailing ECMAScript white space is ignored, the empty
    /// string is `+0`, `Infinity` forms are recognized verbatim, and the
    /// `0b`/`0o`/`0x` prefixes denote unsigned radix literals. Anything else
    /// must be a (signed) decimal literal, or the result is `NaN`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-stringtonumber
    pub(crate) fn string_to_number(string: &str) -> f64 {
        let string = string.trim_matches(is_trimmable_whitespace);

        match string {
            "" => return 0.0,
            "Infinity" | "+Infinity" => return f64::INFINITY,
            "-Infinity" => return f64::NEG_INFINITY,
            _ => {}
        }

        if let Some(rest) = string
            .strip_prefix("0b")
            .or_else(|| string.strip_prefix("0B"))
        {
            return Self::radix_literal_to_number(rest, 2);
        }
        if let Some(rest) = string
            .strip_prefix("0o")
            .or_else(|| string.strip_prefix("0O"))
        {
            return Self::radix_literal_to_number(rest, 8);
        }
        if let Some(rest) = string
            .strip_prefix("0x")
            .or_else(|| string.strip_prefix("0X"))
        {
            return Self::radix_literal_to_number(rest, 16);
        }

        // `fast-float2` accepts the special spellings `inf`/`infinity`/`nan`
        // in any case, which are not decimal literals. The only letters a
        // decimal literal may contain are the exponent markers.
        if string
            .bytes()
            .any(|byte| matches!(byte, b'i' | b'I' | b'n' | b'N' | b'f' | b'F'))
        {
            return f64::NAN;
        }

        fast_float2::parse(string).unwrap_or(f64::NAN)
    }

    /// Parse an unsigned radix literal, rounding through an arbitrary
    /// precision integer so that literals above 2⁶⁴ still convert exactly.
    fn radix_literal_to_number(digits: &str, radix: u32) -> f64 {
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        if let Ok(value) = u64::from_str_radix(digits, radix) {
            return value as f64;
        }
        num_bigint::BigInt::parse_bytes(digits.as_bytes(), radix)
            .map_or(f64::NAN, |big| crate::JsBigInt::from(big).to_f64())
    }
}

/// The `Number` constructor.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-number-constructor-number-value
fn constructor(new_target: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    // 1 - 2. Coerce the value; bigints collapse to their nearest number.
    let number = match args.first() {
        Some(value) => value.to_numeric_number(context)?,
        None => 0.0,
    };

    // 3. If NewTarget is undefined, return n.
    if new_target.is_undefined() {
        return Ok(number.into());
    }

    // 4 - 6. OrdinaryCreateFromConstructor with [[NumberData]] set to n.
    let object = ordinary_create_from_constructor(
        new_target,
        StandardObjects::number_object,
        ObjectData::number(number),
        context,
    )?;
    Ok(object.into())
}

/// Initialize the `Number` constructor and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().number_object().clone();
    let object_prototype = context.standard_objects().object_object().prototype();

    standard
        .prototype()
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    make_constructor_fn(
        "Number",
        1,
        constructor,
        &standard.constructor(),
        &standard.prototype(),
        context,
    );

    context.register_global_builtin("Number", standard.constructor());
}
