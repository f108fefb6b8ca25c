//! This module implements the integer-indexed exotic object internal methods.
//!
//! Canonical numeric keys bypass the ordinary property storage entirely and
//! address the backing buffer; every other key takes the ordinary path.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects

use super::{InternalObjectMethods, ORDINARY_INTERNAL_METHODS};
use crate::{
    builtins::{
        number::Number,
        typed_array::{
            integer_indexed_element_get, integer_indexed_element_set, is_valid_integer_index,
        },
    },
    context::Context,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    string::JsString,
    value::JsValue,
    JsResult,
};

/// The internal method table of integer-indexed exotic objects.
pub(crate) static INTEGER_INDEXED_EXOTIC_INTERNAL_METHODS: InternalObjectMethods =
    InternalObjectMethods {
        __get_own_property__: integer_indexed_exotic_get_own_property,
        __has_property__: integer_indexed_exotic_has_property,
        __define_own_property__: integer_indexed_exotic_define_own_property,
        __get__: integer_indexed_exotic_get,
        __set__: integer_indexed_exotic_set,
        __delete__: integer_indexed_exotic_delete,
        __own_property_keys__: integer_indexed_exotic_own_property_keys,
        ..ORDINARY_INTERNAL_METHODS
    };

/// The abstract operation `CanonicalNumericIndexString`, over an already
/// split property key.
///
/// `PropertyKey::Index` is canonical by construction. A string key is a
/// canonical numeric index iff it round-trips through
/// `ToString(ToNumber(s))` (which also covers `"-0"`, `"NaN"`,
/// `"Infinity"`, and exponent forms).
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-canonicalnumericindexstring
fn canonical_numeric_index(key: &PropertyKey) -> Option<f64> {
    match key {
        PropertyKey::Index(index) => Some(f64::from(*index)),
        PropertyKey::String(string) => canonical_numeric_index_string(string),
        PropertyKey::Symbol(_) => None,
    }
}

fn canonical_numeric_index_string(string: &JsString) -> Option<f64> {
    if string.as_str() == "-0" {
        return Some(-0.0);
    }
    let n = Number::string_to_number(string);
    if Number::to_js_string(n).as_str() == string.as_str() {
        Some(n)
    } else {
        None
    }
}

/// `[[GetOwnProperty]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-getownproperty-p
pub(crate) fn integer_indexed_exotic_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<Option<PropertyDescriptor>> {
    // 1. If P is a canonical numeric index, then
    if let Some(numeric_index) = canonical_numeric_index(key) {
        // b. Let value be ! IntegerIndexedElementGet(O, numericIndex).
        let value = integer_indexed_element_get(obj, numeric_index);

        // c. If value is undefined, return undefined.
        if value.is_undefined() {
            return Ok(None);
        }

        // d. Return the PropertyDescriptor { [[Value]]: value, [[Writable]]: true,
        //    [[Enumerable]]: true, [[Configurable]]: true }.
        return Ok(Some(
            PropertyDescriptor::builder()
                .value(value)
                .writable(true)
                .enumerable(true)
                .configurable(true)
                .build(),
        ));
    }

    // 2. Return OrdinaryGetOwnProperty(O, P).
    super::ordinary_get_own_property(obj, key, context)
}

/// `[[HasProperty]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-hasproperty-p
pub(crate) fn integer_indexed_exotic_has_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If P is a canonical numeric index, return ! IsValidIntegerIndex(O, numericIndex).
    if let Some(numeric_index) = canonical_numeric_index(key) {
        return Ok(is_valid_integer_index(obj, numeric_index));
    }

    // 2. Return ? OrdinaryHasProperty(O, P).
    super::ordinary_has_property(obj, key, context)
}

/// `[[DefineOwnProperty]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-defineownproperty-p-desc
pub(crate) fn integer_indexed_exotic_define_own_property(
    obj: &JsObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If P is a canonical numeric index, then
    if let Some(numeric_index) = canonical_numeric_index(&key) {
        // a. If ! IsValidIntegerIndex(O, numericIndex) is false, return false.
        if !is_valid_integer_index(obj, numeric_index) {
            return Ok(false);
        }

        // b - e. The element descriptor is fixed: a configurable, enumerable,
        // writable data property.
        if desc.is_accessor_descriptor()
            || matches!(desc.configurable(), Some(false))
            || matches!(desc.enumerable(), Some(false))
            || matches!(desc.writable(), Some(false))
        {
            return Ok(false);
        }

        // f. If Desc has a [[Value]] field, perform
        //    ? IntegerIndexedElementSet(O, numericIndex, Desc.[[Value]]).
        if let Some(value) = desc.value() {
            integer_indexed_element_set(obj, numeric_index, value, context)?;
        }

        // g. Return true.
        return Ok(true);
    }

    // 2. Return ! OrdinaryDefineOwnProperty(O, P, Desc).
    super::ordinary_define_own_property(obj, key, desc, context)
}

/// `[[Get]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-get-p-receiver
pub(crate) fn integer_indexed_exotic_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. If P is a canonical numeric index, return ! IntegerIndexedElementGet(O, numericIndex).
    if let Some(numeric_index) = canonical_numeric_index(key) {
        return Ok(integer_indexed_element_get(obj, numeric_index));
    }

    // 2. Return ? OrdinaryGet(O, P, Receiver).
    super::ordinary_get(obj, key, receiver, context)
}

/// `[[Set]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-set-p-v-receiver
pub(crate) fn integer_indexed_exotic_set(
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If P is a canonical numeric index, then
    if let Some(numeric_index) = canonical_numeric_index(&key) {
        // a. If SameValue(O, Receiver) is true, then
        let same_receiver =
            matches!(receiver.as_object(), Some(receiver) if JsObject::equals(obj, receiver));
        if same_receiver {
            // i. Perform ? IntegerIndexedElementSet(O, numericIndex, V).
            integer_indexed_element_set(obj, numeric_index, &value, context)?;

            // ii. Return true. An invalid index is a silent no-op.
            return Ok(true);
        }

        // b. If ! IsValidIntegerIndex(O, numericIndex) is false, return true.
        if !is_valid_integer_index(obj, numeric_index) {
            return Ok(true);
        }
    }

    // 2. Return ? OrdinarySet(O, P, V, Receiver).
    super::ordinary_set(obj, key, value, receiver, context)
}

/// `[[Delete]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-delete-p
pub(crate) fn integer_indexed_exotic_delete(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If P is a canonical numeric index, return whether the index is *not*
    //    a valid element: deleting an out-of-range index vacuously succeeds,
    //    deleting a live element fails.
    if let Some(numeric_index) = canonical_numeric_index(key) {
        return Ok(!is_valid_integer_index(obj, numeric_index));
    }

    // 2. Return ? OrdinaryDelete(O, P).
    super::ordinary_delete(obj, key, context)
}

/// `[[OwnPropertyKeys]]` of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects-ownpropertykeys
pub(crate) fn integer_indexed_exotic_own_property_keys(
    obj: &JsObject,
    _context: &mut Context,
) -> JsResult<Vec<PropertyKey>> {
    let object = obj.borrow();
    let inner = object
        .as_integer_indexed()
        .expect("integer indexed exotic method should only be callable from integer indexed objects");

    // 1. If the backing buffer is usable, the element indices come first,
    //    ascending.
    let mut keys: Vec<PropertyKey> = if inner.is_detached() {
        Vec::new()
    } else {
        (0..inner.array_length())
            .map(|index| PropertyKey::from(index))
            .collect()
    };

    // 2 - 3. String keys, then symbol keys, in insertion order.
    keys.extend(
        object
            .properties()
            .string_property_keys()
            .into_iter()
            .map(PropertyKey::String),
    );
    keys.extend(
        object
            .properties()
            .symbol_property_keys()
            .into_iter()
            .map(PropertyKey::Symbol),
    );

    Ok(keys)
}
