//! This module implements the JavaScript Value.
//!
//! Javascript values, utility methods and conversion between Javascript values and Rust values.

use crate::{
    bigint::JsBigInt,
    builtins::number::{
        f64_to_int16, f64_to_int32, f64_to_int8, f64_to_uint16, f64_to_uint32, f64_to_uint8,
        f64_to_uint8_clamp, Number,
    },
    context::Context,
    gc::{Finalize, Trace},
    object::{JsObject, Object, ObjectData},
    profiler::Profiler,
    property::{PropertyDescriptor, PropertyKey},
    string::JsString,
    symbol::JsSymbol,
    JsResult,
};

mod conversions;
mod display;
mod equality;
mod integer;
mod operations;
mod r#type;

pub use display::ValueDisplay;
pub use integer::IntegerOrInfinity;
pub use operations::AbstractRelation;
pub use r#type::Type;

/// A Javascript value.
#[derive(Trace, Finalize, Debug, Clone, PartialEq)]
pub enum JsValue {
    /// `null` - A null value, for when a value doesn't exist.
    Null,
    /// `undefined` - An undefined value, for when a field or index doesn't exist.
    Undefined,
    /// `boolean` - A `true` / `false` value.
    Boolean(bool),
    /// `String` - A UTF-16 semantics string, such as `"Hello, world"`.
    String(JsString),
    /// `Number` - A 64-bit floating point number, such as `3.1415`.
    Rational(f64),
    /// `Number` - A 32-bit integer, such as `42`.
    Integer(i32),
    /// `BigInt` - holds any arbitrary large signed integer.
    BigInt(JsBigInt),
    /// `Object` - An object, such as `Math`, represented by a reference counted handle.
    Object(JsObject),
    /// `Symbol` - A Symbol primitive type.
    Symbol(JsSymbol),
}

impl JsValue {
    /// Create a new [`JsValue`].
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<Self>,
    {
        value.into()
    }

    /// Creates a new `undefined` value.
    #[inline]
    pub fn undefined() -> Self {
        Self::Undefined
    }

    /// Creates a new `null` value.
    #[inline]
    pub fn null() -> Self {
        Self::Null
    }

    /// Creates a new number with `NaN` value.
    #[inline]
    pub fn nan() -> Self {
        Self::Rational(f64::NAN)
    }

    /// Creates a new string value.
    #[inline]
    pub fn string<S>(value: S) -> Self
    where
        S: Into<JsString>,
    {
        Self::String(value.into())
    }

    /// Creates a new floating point number value.
    #[inline]
    pub fn rational<N>(value: N) -> Self
    where
        N: Into<f64>,
    {
        Self::Rational(value.into())
    }

    /// Creates a new integer number value.
    #[inline]
    pub fn integer<I>(value: I) -> Self
    where
        I: Into<i32>,
    {
        Self::Integer(value.into())
    }

    /// Creates a new boolean value.
    #[inline]
    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    /// Creates a new bigint value.
    #[inline]
    pub fn bigint<B>(value: B) -> Self
    where
        B: Into<JsBigInt>,
    {
        Self::BigInt(value.into())
    }

    /// Creates a new symbol value.
    #[inline]
    pub fn symbol(symbol: JsSymbol) -> Self {
        Self::Symbol(symbol)
    }

    /// Creates a new object value from the object's internal representation.
    #[inline]
    pub fn object(object: Object) -> Self {
        Self::Object(JsObject::new(object))
    }

    /// Returns true if the value is an object.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the object handle if the value is an object.
    #[inline]
    pub fn as_object(&self) -> Option<&JsObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the object handle if the value is a callable object.
    #[inline]
    pub fn as_callable(&self) -> Option<&JsObject> {
        self.as_object().filter(|object| object.is_callable())
    }

    /// Returns the object handle if the value is a constructor.
    #[inline]
    pub fn as_constructor(&self) -> Option<&JsObject> {
        self.as_object().filter(|object| object.is_constructor())
    }

    /// Returns true if the value is a callable object.
    #[inline]
    pub fn is_callable(&self) -> bool {
        self.as_callable().is_some()
    }

    /// Returns true if the value is a function object.
    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Object(object) if object.borrow().is_function())
    }

    /// Returns true if the value is a symbol.
    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns the symbol if the value is a symbol.
    #[inline]
    pub fn as_symbol(&self) -> Option<JsSymbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol.clone()),
            _ => None,
        }
    }

    /// Returns true if the value is undefined.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if the value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is null or undefined.
    #[inline]
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Returns true if the value is a 64-bit floating-point number.
    #[inline]
    pub fn is_double(&self) -> bool {
        matches!(self, Self::Rational(_))
    }

    /// Returns true if the value is a number.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Rational(_) | Self::Integer(_))
    }

    /// Returns the number if the value is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Integer(integer) => Some(integer.into()),
            Self::Rational(rational) => Some(rational),
            _ => None,
        }
    }

    /// Returns true if the value is a string.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns the string if the value is a string.
    #[inline]
    pub fn as_string(&self) -> Option<&JsString> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }

    /// Returns true if the value is a boolean.
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Returns the boolean if the value is a boolean.
    #[inline]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns true if the value is a bigint.
    #[inline]
    pub fn is_bigint(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }

    /// Returns an optional reference to a `BigInt` if the value is a bigint primitive.
    #[inline]
    pub fn as_bigint(&self) -> Option<&JsBigInt> {
        match self {
            Self::BigInt(bigint) => Some(bigint),
            _ => None,
        }
    }

    /// The abstract operation `ToBoolean`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toboolean
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Symbol(_) => true,
            // The `[[IsHTMLDDA]]` internal slot (`document.all` emulation)
            // makes an object falsy.
            Self::Object(object) => !object.borrow().is_htmldda(),
            Self::String(string) => !string.is_empty(),
            Self::Rational(number) => *number != 0.0 && !number.is_nan(),
            Self::Integer(integer) => *integer != 0,
            Self::BigInt(bigint) => !bigint.is_zero(),
            Self::Boolean(boolean) => *boolean,
        }
    }

    /// The abstract operation `ToPrimitive`.
    ///
    /// Wrapper objects short-circuit to their `[[PrimitiveValue]]`; other
    /// objects consult `@@toPrimitive` before the ordinary
    /// `valueOf`/`toString` protocol.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toprimitive
    pub fn to_primitive(
        &self,
        context: &mut Context,
        preferred_type: PreferredType,
    ) -> JsResult<Self> {
        // 1. If input is an Object, then
        if let Self::Object(object) = self {
            // Primitive wrappers carry the answer in their internal slot.
            let primitive = object.borrow().primitive_value();
            if let Some(primitive) = primitive {
                return Ok(primitive);
            }

            // a. Let exoticToPrim be ? GetMethod(input, @@toPrimitive).
            let to_primitive_symbol = context.well_known_symbols().to_primitive_symbol();
            let exotic_to_prim = self.get_method(to_primitive_symbol.into(), context)?;

            // b. If exoticToPrim is not undefined, then
            if let Some(exotic_to_prim) = exotic_to_prim {
                // i. Let hint be the string corresponding to preferredType.
                let hint = match preferred_type {
                    PreferredType::Default => "default",
                    PreferredType::String => "string",
                    PreferredType::Number => "number",
                };
                // iii. Let result be ? Call(exoticToPrim, input, « hint »).
                let result = exotic_to_prim.call(self, &[hint.into()], context)?;
                // iv. If result is not an Object, return result.
                if !result.is_object() {
                    return Ok(result);
                }
                // v. Throw a TypeError exception.
                return context
                    .throw_type_error("Symbol.toPrimitive cannot return an object");
            }

            // c. If preferredType is not present, let preferredType be number.
            let preferred_type = match preferred_type {
                PreferredType::Default | PreferredType::Number => PreferredType::Number,
                PreferredType::String => PreferredType::String,
            };

            // d. Return ? OrdinaryToPrimitive(input, preferredType).
            context.ordinary_to_primitive(self, preferred_type)
        } else {
            // 2. Return input.
            Ok(self.clone())
        }
    }

    /// The abstract operation `ToBigInt`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tobigint
    pub fn to_bigint(&self, context: &mut Context) -> JsResult<JsBigInt> {
        match self {
            Self::Null => Err(context.construct_type_error("cannot convert null to a BigInt")),
            Self::Undefined => {
                Err(context.construct_type_error("cannot convert undefined to a BigInt"))
            }
            Self::String(string) => JsBigInt::from_string(string).map_or_else(
                || {
                    Err(context.construct_syntax_error(format!(
                        "cannot convert string '{string}' to a BigInt"
                    )))
                },
                Ok,
            ),
            Self::Boolean(true) => Ok(JsBigInt::one()),
            Self::Boolean(false) => Ok(JsBigInt::zero()),
            Self::Integer(_) | Self::Rational(_) => {
                Err(context.construct_type_error("cannot convert a Number to a BigInt"))
            }
            Self::BigInt(bigint) => Ok(bigint.clone()),
            Self::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::Number)?;
                primitive.to_bigint(context)
            }
            Self::Symbol(_) => {
                Err(context.construct_type_error("cannot convert a Symbol to a BigInt"))
            }
        }
    }

    /// Returns an object that implements `Display`.
    #[inline]
    pub fn display(&self) -> ValueDisplay<'_> {
        ValueDisplay { value: self }
    }

    /// The abstract operation `ToString`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tostring
    pub fn to_string(&self, context: &mut Context) -> JsResult<JsString> {
        match self {
            Self::Null => Ok("null".into()),
            Self::Undefined => Ok("undefined".into()),
            Self::Boolean(boolean) => Ok(if *boolean { "true".into() } else { "false".into() }),
            Self::Rational(rational) => Ok(Number::to_js_string(*rational)),
            Self::Integer(integer) => {
                let mut buffer = itoa::Buffer::new();
                Ok(buffer.format(*integer).into())
            }
            Self::String(string) => Ok(string.clone()),
            Self::Symbol(_) => {
                Err(context.construct_type_error("can't convert symbol to string"))
            }
            Self::BigInt(bigint) => Ok(bigint.to_string().into()),
            Self::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::String)?;
                primitive.to_string(context)
            }
        }
    }

    /// The abstract operation `ToObject`.
    ///
    /// Primitives are boxed into their wrapper kinds, whose prototypes come
    /// from the context's registry.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toobject
    pub fn to_object(&self, context: &mut Context) -> JsResult<JsObject> {
        match self {
            Self::Undefined | Self::Null => Err(context
                .construct_type_error("cannot convert 'null' or 'undefined' to object")),
            Self::Boolean(boolean) => {
                let prototype = context.standard_objects().boolean_object().prototype();
                Ok(JsObject::from_proto_and_data(
                    prototype.into(),
                    ObjectData::boolean(*boolean),
                ))
            }
            Self::Integer(integer) => {
                let prototype = context.standard_objects().number_object().prototype();
                Ok(JsObject::from_proto_and_data(
                    prototype.into(),
                    ObjectData::number(f64::from(*integer)),
                ))
            }
            Self::Rational(rational) => {
                let prototype = context.standard_objects().number_object().prototype();
                Ok(JsObject::from_proto_and_data(
                    prototype.into(),
                    ObjectData::number(*rational),
                ))
            }
            Self::String(string) => {
                let prototype = context.standard_objects().string_object().prototype();
                Ok(crate::builtins::string::new_string_wrapper(
                    string.clone(),
                    prototype.into(),
                ))
            }
            Self::Symbol(symbol) => {
                let prototype = context.standard_objects().symbol_object().prototype();
                Ok(JsObject::from_proto_and_data(
                    prototype.into(),
                    ObjectData::symbol(symbol.clone()),
                ))
            }
            Self::BigInt(bigint) => {
                let prototype = context.standard_objects().bigint_object().prototype();
                Ok(JsObject::from_proto_and_data(
                    prototype.into(),
                    ObjectData::big_int(bigint.clone()),
                ))
            }
            Self::Object(object) => Ok(object.clone()),
        }
    }

    /// The abstract operation `ToPropertyKey`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-topropertykey
    pub fn to_property_key(&self, context: &mut Context) -> JsResult<PropertyKey> {
        Ok(match self {
            // Fast path:
            Self::String(string) => string.clone().into(),
            Self::Symbol(symbol) => symbol.clone().into(),
            // Slow path:
            _ => match self.to_primitive(context, PreferredType::String)? {
                Self::String(ref string) => string.clone().into(),
                Self::Symbol(ref symbol) => symbol.clone().into(),
                primitive => primitive.to_string(context)?.into(),
            },
        })
    }

    /// The abstract operation `ToNumeric`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tonumeric
    pub fn to_numeric(&self, context: &mut Context) -> JsResult<Numeric> {
        let primitive = self.to_primitive(context, PreferredType::Number)?;
        if let Some(bigint) = primitive.as_bigint() {
            return Ok(bigint.clone().into());
        }
        Ok(primitive.to_number(context)?.into())
    }

    /// This is a more specialized version of `to_numeric`, where the `BigInt`
    /// branch collapses into a `f64`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tonumeric
    pub fn to_numeric_number(&self, context: &mut Context) -> JsResult<f64> {
        let primitive = self.to_primitive(context, PreferredType::Number)?;
        if let Some(bigint) = primitive.as_bigint() {
            return Ok(bigint.to_f64());
        }
        primitive.to_number(context)
    }

    /// Converts a value to an integral 32 bit unsigned integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-touint32
    pub fn to_u32(&self, context: &mut Context) -> JsResult<u32> {
        // This is the fast path, if the value is Integer we can just return it.
        if let Self::Integer(number) = *self {
            if let Ok(number) = u32::try_from(number) {
                return Ok(number);
            }
        }
        let number = self.to_number(context)?;

        Ok(f64_to_uint32(number))
    }

    /// Converts a value to an integral 32 bit signed integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toint32
    pub fn to_i32(&self, context: &mut Context) -> JsResult<i32> {
        // This is the fast path, if the value is Integer we can just return it.
        if let Self::Integer(number) = *self {
            return Ok(number);
        }
        let number = self.to_number(context)?;

        Ok(f64_to_int32(number))
    }

    /// Converts a value to an integral 16 bit unsigned integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-touint16
    pub fn to_u16(&self, context: &mut Context) -> JsResult<u16> {
        let number = self.to_number(context)?;

        Ok(f64_to_uint16(number))
    }

    /// Converts a value to an integral 16 bit signed integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toint16
    pub fn to_i16(&self, context: &mut Context) -> JsResult<i16> {
        let number = self.to_number(context)?;

        Ok(f64_to_int16(number))
    }

    /// Converts a value to an integral 8 bit unsigned integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-touint8
    pub fn to_u8(&self, context: &mut Context) -> JsResult<u8> {
        let number = self.to_number(context)?;

        Ok(f64_to_uint8(number))
    }

    /// Converts a value to an integral 8 bit signed integer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toint8
    pub fn to_i8(&self, context: &mut Context) -> JsResult<i8> {
        let number = self.to_number(context)?;

        Ok(f64_to_int8(number))
    }

    /// Converts a value to an integral 8 bit unsigned integer, clamping
    /// instead of wrapping, with ties rounding to even.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-touint8clamp
    pub fn to_uint8_clamp(&self, context: &mut Context) -> JsResult<u8> {
        let number = self.to_number(context)?;

        Ok(f64_to_uint8_clamp(number))
    }

    /// Converts a value to a non-negative integer if it is a valid integer index value.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toindex
    pub fn to_index(&self, context: &mut Context) -> JsResult<u64> {
        // 1. If value is undefined, then
        if self.is_undefined() {
            // a. Return 0.
            return Ok(0);
        }

        // 2. Else,
        // a. Let integer be ? ToIntegerOrInfinity(value).
        let integer_index = self.to_integer_or_infinity(context)?;

        // b. Let clamped be ! ToLength(𝔽(integer)).
        // c. If SameValue(𝔽(integer), clamped) is false, throw a RangeError exception.
        match integer_index {
            IntegerOrInfinity::Integer(integer) if (0..=(2i64.pow(53) - 1)).contains(&integer) => {
                Ok(integer as u64)
            }
            _ => Err(context.construct_range_error("Index must be a non-negative safe integer")),
        }
    }

    /// Converts argument to an integer suitable for use as the length of an array-like object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tolength
    pub fn to_length(&self, context: &mut Context) -> JsResult<u64> {
        // 1. Let len be ? ToInteger(argument).
        // 2. If len ≤ +0, return +0.
        // 3. Return min(len, 2^53 - 1).
        Ok(self
            .to_integer_or_infinity(context)?
            .clamp_finite(0, 2i64.pow(53) - 1) as u64)
    }

    /// The abstract operation `ToIntegerOrInfinity`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tointegerorinfinity
    pub fn to_integer_or_infinity(&self, context: &mut Context) -> JsResult<IntegerOrInfinity> {
        // 1. Let number be ? ToNumber(argument).
        let number = self.to_number(context)?;

        Ok(IntegerOrInfinity::from(number))
    }

    /// The abstract operation `ToNumber`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tonumber
    pub fn to_number(&self, context: &mut Context) -> JsResult<f64> {
        match *self {
            Self::Null => Ok(0.0),
            Self::Undefined => Ok(f64::NAN),
            Self::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
            Self::String(ref string) => Ok(Number::string_to_number(string)),
            Self::Rational(number) => Ok(number),
            Self::Integer(integer) => Ok(f64::from(integer)),
            Self::Symbol(_) => {
                Err(context.construct_type_error("argument must not be a symbol"))
            }
            Self::BigInt(_) => {
                Err(context.construct_type_error("argument must not be a bigint"))
            }
            Self::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::Number)?;
                primitive.to_number(context)
            }
        }
    }

    /// The abstract operation `RequireObjectCoercible`.
    ///
    /// It throws an error if the argument is a value that cannot be
    /// converted to an Object using `ToObject`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-requireobjectcoercible
    #[inline]
    pub fn require_object_coercible(&self, context: &mut Context) -> JsResult<&Self> {
        if self.is_null_or_undefined() {
            Err(context.construct_type_error("cannot convert null or undefined to Object"))
        } else {
            Ok(self)
        }
    }

    /// The abstract operation `GetV`: get the property `key` of this value,
    /// boxing primitives so the lookup reaches their wrapper prototypes.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-getv
    pub fn get_v(&self, key: PropertyKey, context: &mut Context) -> JsResult<Self> {
        let object = self.to_object(context)?;
        object.__get__(&key, self.clone(), context)
    }

    /// The abstract operation `GetMethod`: a property that must be either
    /// undefined or callable.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-getmethod
    pub fn get_method(&self, key: PropertyKey, context: &mut Context) -> JsResult<Option<JsObject>> {
        // 1. Let func be ? GetV(V, P).
        let func = self.get_v(key, context)?;

        // 2. If func is either undefined or null, return undefined.
        if func.is_null_or_undefined() {
            return Ok(None);
        }

        // 3. If IsCallable(func) is false, throw a TypeError exception.
        // 4. Return func.
        func.as_callable().cloned().map(Some).ok_or_else(|| {
            context.construct_type_error("value returned for property of object is not a function")
        })
    }

    /// The abstract operation `ToPropertyDescriptor`.
    ///
    /// Reifies a descriptor object (`{value?, writable?, get?, set?,
    /// enumerable?, configurable?}`) into a [`PropertyDescriptor`],
    /// rejecting objects that mix data and accessor fields.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-topropertydescriptor
    pub fn to_property_descriptor(&self, context: &mut Context) -> JsResult<PropertyDescriptor> {
        let _timer = Profiler::global().start_event("JsValue::to_property_descriptor", "value");

        // 1. If Type(Obj) is not Object, throw a TypeError exception.
        let obj = match self {
            Self::Object(object) => object.clone(),
            _ => {
                return Err(context
                    .construct_type_error("cannot construct a property descriptor from a non-object"))
            }
        };

        // 2. Let desc be a new Property Descriptor that initially has no fields.
        let mut builder = PropertyDescriptor::builder();

        // 3 - 4: [[Enumerable]]
        if obj.has_property("enumerable", context)? {
            builder = builder.enumerable(obj.get("enumerable", context)?.to_boolean());
        }

        // 5 - 6: [[Configurable]]
        if obj.has_property("configurable", context)? {
            builder = builder.configurable(obj.get("configurable", context)?.to_boolean());
        }

        // 7 - 8: [[Value]]
        if obj.has_property("value", context)? {
            builder = builder.value(obj.get("value", context)?);
        }

        // 9 - 10: [[Writable]]
        if obj.has_property("writable", context)? {
            builder = builder.writable(obj.get("writable", context)?.to_boolean());
        }

        // 11 - 12: [[Get]]
        if obj.has_property("get", context)? {
            let getter = obj.get("get", context)?;
            if !getter.is_undefined() && getter.as_callable().is_none() {
                return Err(context.construct_type_error("Property descriptor getter must be callable"));
            }
            builder = builder.get(getter);
        }

        // 13 - 14: [[Set]]
        if obj.has_property("set", context)? {
            let setter = obj.get("set", context)?;
            if !setter.is_undefined() && setter.as_callable().is_none() {
                return Err(context.construct_type_error("Property descriptor setter must be callable"));
            }
            builder = builder.set(setter);
        }

        // 15. If desc.[[Get]] is present or desc.[[Set]] is present, then
        //     a. If desc.[[Value]] is present or desc.[[Writable]] is present, throw a TypeError.
        let desc = builder.build();
        if desc.is_accessor_descriptor() {
            // The builder switches kinds on conflicting fields; re-read the
            // raw object so a mixed descriptor is detected either way.
            let has_value = obj.has_property("value", context)?;
            let has_writable = obj.has_property("writable", context)?;
            if has_value || has_writable {
                return Err(context.construct_type_error(
                    "property descriptor cannot specify both accessor and data fields",
                ));
            }
        }

        // 16. Return desc.
        Ok(desc)
    }

    /// The abstract operation `FromPropertyDescriptor`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-frompropertydescriptor
    pub fn from_property_descriptor(
        desc: Option<&PropertyDescriptor>,
        context: &mut Context,
    ) -> JsResult<Self> {
        // 1. If Desc is undefined, return undefined.
        let desc = match desc {
            Some(desc) => desc,
            None => return Ok(Self::undefined()),
        };

        // 2. Let obj be ! OrdinaryObjectCreate(%Object.prototype%).
        let obj = context.construct_object();

        // 4 - 9: CreateDataPropertyOrThrow for every present field.
        if let Some(value) = desc.value() {
            obj.create_data_property_or_throw("value", value.clone(), context)?;
        }
        if let Some(writable) = desc.writable() {
            obj.create_data_property_or_throw("writable", writable, context)?;
        }
        if let Some(get) = desc.get() {
            obj.create_data_property_or_throw("get", get.clone(), context)?;
        }
        if let Some(set) = desc.set() {
            obj.create_data_property_or_throw("set", set.clone(), context)?;
        }
        if let Some(enumerable) = desc.enumerable() {
            obj.create_data_property_or_throw("enumerable", enumerable, context)?;
        }
        if let Some(configurable) = desc.configurable() {
            obj.create_data_property_or_throw("configurable", configurable, context)?;
        }

        // 10. Return obj.
        Ok(obj.into())
    }

    /// The `typeof` operator.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-typeof-operator
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Rational(_) | Self::Integer(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Symbol(_) => "symbol",
            Self::Null => "object",
            Self::Undefined => "undefined",
            Self::BigInt(_) => "bigint",
            Self::Object(object) => {
                if object.borrow().is_htmldda() {
                    "undefined"
                } else if object.is_callable() {
                    "function"
                } else {
                    "object"
                }
            }
        }
    }

    /// Abstract operation `InstanceofOperator ( V, target )`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-instanceofoperator
    pub fn instance_of(&self, target: &Self, context: &mut Context) -> JsResult<bool> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        if !target.is_object() {
            return context.throw_type_error(format!(
                "right-hand side of 'instanceof' should be an object, got {}",
                target.type_of()
            ));
        }

        // 2. Let instOfHandler be ? GetMethod(target, @@hasInstance).
        let has_instance_symbol = context.well_known_symbols().has_instance_symbol();
        match target.get_method(has_instance_symbol.into(), context)? {
            // 3. If instOfHandler is not undefined, then
            Some(instance_of_handler) => {
                // a. Return ! ToBoolean(? Call(instOfHandler, target, « V »)).
                Ok(instance_of_handler
                    .call(target, std::slice::from_ref(self), context)?
                    .to_boolean())
            }
            None if target.is_callable() => {
                // 5. Return ? OrdinaryHasInstance(target, V).
                Self::ordinary_has_instance(target, self, context)
            }
            None => {
                // 4. If IsCallable(target) is false, throw a TypeError exception.
                context.throw_type_error("right-hand side of 'instanceof' is not callable")
            }
        }
    }

    /// Abstract operation `OrdinaryHasInstance ( C, O )`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ordinaryhasinstance
    pub fn ordinary_has_instance(
        constructor: &Self,
        object: &Self,
        context: &mut Context,
    ) -> JsResult<bool> {
        // 1. If IsCallable(C) is false, return false.
        let constructor = match constructor.as_callable() {
            Some(constructor) => constructor.clone(),
            None => return Ok(false),
        };

        // 3. If Type(O) is not Object, return false.
        let mut object = match object.as_object() {
            Some(object) => object.clone(),
            None => return Ok(false),
        };

        // 4. Let P be ? Get(C, "prototype").
        // 5. If Type(P) is not Object, throw a TypeError exception.
        let prototype = constructor.get("prototype", context)?;
        let prototype = prototype.as_object().ok_or_else(|| {
            context.construct_type_error("function has non-object prototype in instanceof check")
        })?;

        // 6. Repeat,
        loop {
            // a. Set O to ? O.[[GetPrototypeOf]]().
            let parent = object.__get_prototype_of__(context)?;
            match parent {
                // b. If O is null, return false.
                Self::Null => return Ok(false),
                Self::Object(ref parent) => {
                    // c. If SameValue(P, O) is true, return true.
                    if JsObject::equals(parent, prototype) {
                        return Ok(true);
                    }
                    object = parent.clone();
                }
                _ => {
                    return context
                        .throw_type_error("object prototype must be an object or null")
                }
            }
        }
    }
}

impl Default for JsValue {
    fn default() -> Self {
        Self::Undefined
    }
}

/// The preferred type hint passed to `ToPrimitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreferredType {
    /// Hint `"string"`.
    String,
    /// Hint `"number"`.
    Number,
    /// No hint; almost always treated as `Number`.
    Default,
}

/// Numeric value which can be of two types `Number`, `BigInt`.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    /// Double precision floating point number.
    Number(f64),
    /// BigInt an integer of arbitrary size.
    BigInt(JsBigInt),
}

impl From<f64> for Numeric {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Numeric {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<JsBigInt> for Numeric {
    #[inline]
    fn from(value: JsBigInt) -> Self {
        Self::BigInt(value)
    }
}

impl From<Numeric> for JsValue {
    fn from(value: Numeric) -> Self {
        match value {
            Numeric::Number(number) => Self::rational(number),
            Numeric::BigInt(bigint) => Self::bigint(bigint),
        }
    }
}
