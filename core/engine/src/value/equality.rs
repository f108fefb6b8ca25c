//! Equality comparisons between [`JsValue`]s.

use super::{JsValue, PreferredType, Type};
use crate::{
    bigint::JsBigInt, builtins::number::Number, context::Context, object::JsObject, JsResult,
};

impl JsValue {
    /// Strict equality comparison.
    ///
    /// This method is executed when doing strict equality comparisons with the `===` operator.
    /// For more information, check <https://tc39.es/ecma262/#sec-strict-equality-comparison>.
    pub fn strict_equals(&self, other: &Self) -> bool {
        // 1. If Type(x) is different from Type(y), return false.
        if self.get_type() != other.get_type() {
            return false;
        }

        match (self, other) {
            // 2. If Type(x) is Number or BigInt, then
            //    a. Return ! Type(x)::equal(x, y).
            (Self::BigInt(x), Self::BigInt(y)) => JsBigInt::equal(x, y),
            (Self::Rational(x), Self::Rational(y)) => Number::equal(*x, *y),
            (Self::Rational(x), Self::Integer(y)) => Number::equal(*x, f64::from(*y)),
            (Self::Integer(x), Self::Rational(y)) => Number::equal(f64::from(*x), *y),
            (Self::Integer(x), Self::Integer(y)) => x == y,

            // 3. Return ! SameValueNonNumeric(x, y).
            (_, _) => Self::same_value_non_numeric(self, other),
        }
    }

    /// Abstract equality comparison.
    ///
    /// This method is executed when doing abstract equality comparisons with the `==` operator.
    /// For more information, check <https://tc39.es/ecma262/#sec-abstract-equality-comparison>.
    pub fn equals(&self, other: &Self, context: &mut Context) -> JsResult<bool> {
        // 1. If Type(x) is the same as Type(y), then
        //     a. Return the result of performing Strict Equality Comparison x === y.
        if self.get_type() == other.get_type() {
            return Ok(self.strict_equals(other));
        }

        Ok(match (self, other) {
            // 2. If x is null and y is undefined, return true.
            // 3. If x is undefined and y is null, return true.
            //
            // The Annex B `[[IsHTMLDDA]]` rule makes such objects loosely
            // equal to both null and undefined.
            (Self::Null, Self::Undefined) | (Self::Undefined, Self::Null) => true,
            (Self::Object(object), Self::Null | Self::Undefined)
            | (Self::Null | Self::Undefined, Self::Object(object)) => {
                object.borrow().is_htmldda()
            }

            // 4. If Type(x) is Number and Type(y) is String, return the result of the comparison
            //    x == ! ToNumber(y).
            // 5. If Type(x) is String and Type(y) is Number, return the result of the comparison
            //    ! ToNumber(x) == y.
            (Self::Integer(_) | Self::Rational(_), Self::String(string)) => {
                let number = self.as_number().expect("value must be a number");
                Number::equal(number, Number::string_to_number(string))
            }
            (Self::String(string), Self::Integer(_) | Self::Rational(_)) => {
                let number = other.as_number().expect("value must be a number");
                Number::equal(Number::string_to_number(string), number)
            }

            // 6. If Type(x) is BigInt and Type(y) is String, then
            //    a. Let n be ! StringToBigInt(y).
            //    b. If n is NaN, return false.
            //    c. Return the result of the comparison x == n.
            (Self::BigInt(a), Self::String(b)) => match JsBigInt::from_string(b) {
                Some(ref b) => a == b,
                None => false,
            },

            // 7. If Type(x) is String and Type(y) is BigInt, return the result of the comparison
            //    y == x.
            (Self::String(a), Self::BigInt(b)) => match JsBigInt::from_string(a) {
                Some(ref a) => a == b,
                None => false,
            },

            // 8. If Type(x) is Boolean, return the result of the comparison ! ToNumber(x) == y.
            (Self::Boolean(x), _) => {
                return other.equals(&Self::integer(i32::from(*x)), context)
            }

            // 9. If Type(y) is Boolean, return the result of the comparison x == ! ToNumber(y).
            (_, Self::Boolean(y)) => {
                return self.equals(&Self::integer(i32::from(*y)), context)
            }

            // 10. If Type(x) is either String, Number, BigInt, or Symbol and Type(y) is Object,
            //     return the result of the comparison x == ? ToPrimitive(y).
            (
                Self::Object(_),
                Self::String(_)
                | Self::Rational(_)
                | Self::Integer(_)
                | Self::BigInt(_)
                | Self::Symbol(_),
            ) => {
                let primitive = self.to_primitive(context, PreferredType::Default)?;
                return primitive.equals(other, context);
            }

            // 11. If Type(x) is Object and Type(y) is either String, Number, BigInt, or Symbol,
            //     return the result of the comparison ? ToPrimitive(x) == y.
            (
                Self::String(_)
                | Self::Rational(_)
                | Self::Integer(_)
                | Self::BigInt(_)
                | Self::Symbol(_),
                Self::Object(_),
            ) => {
                let primitive = other.to_primitive(context, PreferredType::Default)?;
                return primitive.equals(self, context);
            }

            // 12. If Type(x) is BigInt and Type(y) is Number, or if Type(x) is Number and
            //     Type(y) is BigInt, then
            //    a. If x or y are any of NaN, +∞, or -∞, return false.
            //    b. If ℝ(x) = ℝ(y), return true; otherwise return false.
            (Self::BigInt(a), Self::Rational(_) | Self::Integer(_)) => {
                let b = other.as_number().expect("value must be a number");
                bigint_equals_number(a, b)
            }
            (Self::Rational(_) | Self::Integer(_), Self::BigInt(b)) => {
                let a = self.as_number().expect("value must be a number");
                bigint_equals_number(b, a)
            }

            // 13. Return false.
            _ => false,
        })
    }

    /// The internal comparison abstract operation `SameValue(x, y)`,
    /// where `x` and `y` are ECMAScript language values, produces `true` or `false`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-samevalue
    pub fn same_value(x: &Self, y: &Self) -> bool {
        // 1. If Type(x) is different from Type(y), return false.
        if x.get_type() != y.get_type() {
            return false;
        }

        match (x, y) {
            // 2. If Type(x) is Number or BigInt, then
            //    a. Return ! Type(x)::SameValue(x, y).
            (Self::BigInt(x), Self::BigInt(y)) => JsBigInt::same_value(x, y),
            (Self::Rational(x), Self::Rational(y)) => Number::same_value(*x, *y),
            (Self::Rational(x), Self::Integer(y)) => Number::same_value(*x, f64::from(*y)),
            (Self::Integer(x), Self::Rational(y)) => Number::same_value(f64::from(*x), *y),
            (Self::Integer(x), Self::Integer(y)) => x == y,

            // 3. Return ! SameValueNonNumeric(x, y).
            (_, _) => Self::same_value_non_numeric(x, y),
        }
    }

    /// The internal comparison abstract operation `SameValueZero(x, y)`,
    /// where `x` and `y` are ECMAScript language values, produces `true` or `false`.
    ///
    /// `SameValueZero` differs from `SameValue` only in its treatment of `+0` and `-0`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-samevaluezero
    pub fn same_value_zero(x: &Self, y: &Self) -> bool {
        if x.get_type() != y.get_type() {
            return false;
        }

        match (x, y) {
            // 2. If Type(x) is Number or BigInt, then
            //    a. Return ! Type(x)::SameValueZero(x, y).
            (Self::BigInt(x), Self::BigInt(y)) => JsBigInt::same_value_zero(x, y),
            (Self::Rational(x), Self::Rational(y)) => Number::same_value_zero(*x, *y),
            (Self::Rational(x), Self::Integer(y)) => Number::same_value_zero(*x, f64::from(*y)),
            (Self::Integer(x), Self::Rational(y)) => Number::same_value_zero(f64::from(*x), *y),
            (Self::Integer(x), Self::Integer(y)) => x == y,

            // 3. Return ! SameValueNonNumeric(x, y).
            (_, _) => Self::same_value_non_numeric(x, y),
        }
    }

    fn same_value_non_numeric(x: &Self, y: &Self) -> bool {
        debug_assert!(x.get_type() == y.get_type());
        match (x, y) {
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            (Self::String(x), Self::String(y)) => x == y,
            (Self::Boolean(x), Self::Boolean(y)) => x == y,
            (Self::Symbol(x), Self::Symbol(y)) => x == y,
            (Self::Object(x), Self::Object(y)) => JsObject::equals(x, y),
            _ => false,
        }
    }
}

/// `ℝ(x) = ℝ(y)` for a bigint and a number; never true for non-finite or
/// fractional numbers.
fn bigint_equals_number(x: &JsBigInt, y: f64) -> bool {
    if !y.is_finite() || y.fract() != 0.0 {
        return false;
    }
    JsBigInt::try_from(y).map_or(false, |y| x == &y)
}
