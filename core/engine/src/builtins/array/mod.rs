//! This module implements the `Array` exotic object builtin.
//!
//! The mutation operations are written over the indexed `[[Get]]`/`[[Set]]`
//! protocol and the `length` property, never over the raw storage, so they
//! observe accessors, holes and integrity levels exactly like user code
//! would, and `shift`/`unshift` re-key dense and sparse storage alike.

use crate::{
    builtins::function::{get_prototype_from_constructor, make_builtin_fn, make_constructor_fn},
    context::{Context, StandardObjects},
    object::{JsObject, ObjectData},
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
    JsResult,
};

/// The maximum number of elements `push`/`unshift` may produce, 2⁵³ − 1.
const MAX_SAFE_LENGTH: u64 = (1 << 53) - 1;

/// JavaScript `Array` builtin implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Array;

impl Array {
    /// The abstract operation `ArrayCreate`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arraycreate
    pub(crate) fn array_create(
        length: u64,
        prototype: Option<JsObject>,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        // 1. If length > 2³² - 1, throw a RangeError exception.
        if length > u64::from(u32::MAX) {
            return Err(context.construct_range_error("invalid array length"));
        }

        // 2 - 5. Allocate the array exotic object.
        let prototype = prototype
            .unwrap_or_else(|| context.standard_objects().array_object().prototype());
        let array = JsObject::from_proto_and_data(prototype.into(), ObjectData::array());

        // 6. Perform ! OrdinaryDefineOwnProperty(A, "length", { [[Value]]: length,
        //    [[Writable]]: true, [[Enumerable]]: false, [[Configurable]]: false }).
        array.insert(
            "length",
            PropertyDescriptor::builder()
                .value(length)
                .writable(true)
                .enumerable(false)
                .configurable(false),
        );

        // 7. Return A.
        Ok(array)
    }

    /// The abstract operation `CreateArrayFromList`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createarrayfromlist
    pub(crate) fn create_array_from_list<I>(elements: I, context: &mut Context) -> JsObject
    where
        I: IntoIterator<Item = JsValue>,
    {
        // 1. Let array be ! ArrayCreate(0).
        let array = Self::array_create(0, None, context)
            .expect("creating an empty array must not fail");

        // 2 - 3. Append every element as a plain data property.
        for (index, value) in elements.into_iter().enumerate() {
            array
                .create_data_property_or_throw(index, value, context)
                .expect("new array must be extensible");
        }

        // 4. Return array.
        array
    }

    /// The `Array` constructor.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array-len
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let prototype = if new_target.is_undefined() {
            None
        } else {
            Some(get_prototype_from_constructor(
                new_target,
                StandardObjects::array_object,
                context,
            )?)
        };

        match args {
            // 2. If numberOfArgs = 0, return ! ArrayCreate(0).
            [] => Ok(Self::array_create(0, prototype, context)?.into()),
            // 3. A single numeric argument is a length.
            [len] if len.is_number() => {
                let int_len = to_valid_array_length(len, context)?;
                Ok(Self::array_create(int_len, prototype, context)?.into())
            }
            // 3 (cont). A single non-numeric argument is the first element.
            [value] => {
                let array = Self::array_create(0, prototype, context)?;
                array.create_data_property_or_throw(0, value.clone(), context)?;
                array.set("length", 1, true, context)?;
                Ok(array.into())
            }
            // 4. Otherwise the arguments are the elements.
            values => {
                let array = Self::array_create(values.len() as u64, prototype, context)?;
                for (index, value) in values.iter().enumerate() {
                    array.create_data_property_or_throw(index, value.clone(), context)?;
                }
                Ok(array.into())
            }
        }
    }

    /// `Array.prototype.push ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.push
    pub(crate) fn push(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;

        // 2. Let len be ? LengthOfArrayLike(O).
        let mut len = obj.length_of_array_like(context)?;

        // 3 - 4. If len + argCount > 2⁵³ - 1, throw a TypeError exception.
        if len + args.len() as u64 > MAX_SAFE_LENGTH {
            return Err(context.construct_type_error(
                "pushing to this array would exceed the maximum safe integer length",
            ));
        }

        // 5. For each element E of items, do
        for value in args {
            // a. Perform ? Set(O, ! ToString(len), E, true).
            obj.set(len, value.clone(), true, context)?;
            // b. Set len to len + 1.
            len += 1;
        }

        // 6. Perform ? Set(O, "length", len, true).
        obj.set("length", len, true, context)?;

        // 7. Return len.
        Ok(len.into())
    }

    /// `Array.prototype.pop ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.pop
    pub(crate) fn pop(
        this: &JsValue,
        _args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;

        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3. If len = 0, then
        if len == 0 {
            // a. Perform ? Set(O, "length", +0𝔽, true).
            obj.set("length", 0, true, context)?;
            // b. Return undefined.
            return Ok(JsValue::undefined());
        }

        // 4. Else,
        // a. Let newLen be len - 1.
        let new_len = len - 1;
        // c. Let element be ? Get(O, index).
        let element = obj.get(new_len, context)?;
        // d. Perform ? DeletePropertyOrThrow(O, index).
        obj.delete_property_or_throw(new_len, context)?;
        // e. Perform ? Set(O, "length", newLen, true).
        obj.set("length", new_len, true, context)?;
        // f. Return element.
        Ok(element)
    }

    /// `Array.prototype.shift ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.shift
    pub(crate) fn shift(
        this: &JsValue,
        _args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;

        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3. If len = 0, then
        if len == 0 {
            obj.set("length", 0, true, context)?;
            return Ok(JsValue::undefined());
        }

        // 4. Let first be ? Get(O, "0").
        let first = obj.get(0, context)?;

        // 5 - 6. Move every element one slot down, re-keying dense and
        // sparse entries through the ordinary protocol.
        for from in 1..len {
            let to = from - 1;
            // c. If fromPresent is true, move the value; else delete the target.
            if obj.has_property(from, context)? {
                let from_value = obj.get(from, context)?;
                obj.set(to, from_value, true, context)?;
            } else {
                obj.delete_property_or_throw(to, context)?;
            }
        }

        // 7. Perform ? DeletePropertyOrThrow(O, ! ToString(len - 1)).
        obj.delete_property_or_throw(len - 1, context)?;

        // 8. Perform ? Set(O, "length", len - 1, true).
        obj.set("length", len - 1, true, context)?;

        // 9. Return first.
        Ok(first)
    }

    /// `Array.prototype.unshift ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.unshift
    pub(crate) fn unshift(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;

        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3. Let argCount be the number of elements in items.
        let arg_count = args.len() as u64;

        // 4. If argCount > 0, then
        if arg_count > 0 {
            // a. If len + argCount > 2⁵³ - 1, throw a TypeError exception.
            if len + arg_count > MAX_SAFE_LENGTH {
                return Err(context.construct_type_error(
                    "unshifting onto this array would exceed the maximum safe integer length",
                ));
            }

            // b - c. Shift the existing elements up, from the top down.
            let mut k = len;
            while k > 0 {
                let from = k - 1;
                let to = k + arg_count - 1;
                if obj.has_property(from, context)? {
                    let from_value = obj.get(from, context)?;
                    obj.set(to, from_value, true, context)?;
                } else {
                    obj.delete_property_or_throw(to, context)?;
                }
                k -= 1;
            }

            // d. Insert the new elements at the front.
            for (j, value) in args.iter().enumerate() {
                obj.set(j, value.clone(), true, context)?;
            }
        }

        // 5. Perform ? Set(O, "length", len + argCount, true).
        obj.set("length", len + arg_count, true, context)?;

        // 6. Return len + argCount.
        Ok((len + arg_count).into())
    }

    /// `Array.isArray ( arg )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.isarray
    fn is_array(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        match args.first().and_then(JsValue::as_object) {
            Some(object) => Ok(object.is_array_abstract(context)?.into()),
            None => Ok(false.into()),
        }
    }
}

/// Validate a value destined to become an array length, per the `Array`
/// constructor rules: `ToUint32` and `ToNumber` must agree exactly.
pub(crate) fn to_valid_array_length(value: &JsValue, context: &mut Context) -> JsResult<u64> {
    let int_len = value.to_u32(context)?;
    // If SameValueZero(intLen, len) is false, throw a RangeError exception.
    #[allow(clippy::float_cmp)]
    if f64::from(int_len) != value.to_number(context)? {
        return Err(context.construct_range_error("invalid array length"));
    }
    Ok(u64::from(int_len))
}

/// Initialize the `Array` constructor, its prototype methods, and register
/// them on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().array_object().clone();
    let object_prototype = context.standard_objects().object_object().prototype();
    let prototype = standard.prototype();

    prototype
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    for (name, length, function) in [
        ("push", 1, Array::push as crate::builtins::function::NativeFunction),
        ("pop", 0, Array::pop),
        ("shift", 0, Array::shift),
        ("unshift", 1, Array::unshift),
    ] {
        let method = make_builtin_fn(function, name, length, context);
        prototype.insert(
            name,
            PropertyDescriptor::builder().value(method).attributes(attribute),
        );
    }

    make_constructor_fn(
        "Array",
        1,
        Array::constructor,
        &standard.constructor(),
        &prototype,
        context,
    );

    let is_array = make_builtin_fn(Array::is_array, "isArray", 1, context);
    standard.constructor().insert(
        "isArray",
        PropertyDescriptor::builder().value(is_array).attributes(attribute),
    );

    context.register_global_builtin("Array", standard.constructor());
}
