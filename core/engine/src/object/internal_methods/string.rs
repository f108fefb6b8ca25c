//! This module implements the `String` exotic object internal methods.
//!
//! A `String` wrapper has an own, non-writable, enumerable, non-configurable
//! data property for every UTF-16 code unit of its primitive value. The
//! ordinary `[[Get]]`/`[[Set]]`/`[[HasProperty]]` compose these through
//! `[[GetOwnProperty]]`, so only the own-property surface is overridden.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects

use super::{InternalObjectMethods, ORDINARY_INTERNAL_METHODS};
use crate::{
    context::Context,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    value::JsValue,
    JsResult,
};

/// The internal method table of `String` exotic objects.
pub(crate) static STRING_EXOTIC_INTERNAL_METHODS: InternalObjectMethods = InternalObjectMethods {
    __get_own_property__: string_exotic_get_own_property,
    __define_own_property__: string_exotic_define_own_property,
    __own_property_keys__: string_exotic_own_property_keys,
    ..ORDINARY_INTERNAL_METHODS
};

/// Gets an own property of a `String` exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects-getownproperty-p
pub(crate) fn string_exotic_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<Option<PropertyDescriptor>> {
    // 1. Let desc be OrdinaryGetOwnProperty(S, P).
    let desc = super::ordinary_get_own_property(obj, key, context)?;

    // 2. If desc is not undefined, return desc.
    if desc.is_some() {
        Ok(desc)
    } else {
        // 3. Return StringGetOwnProperty(S, P).
        Ok(string_get_own_property(obj, key))
    }
}

/// Defines an own property of a `String` exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects-defineownproperty-p-desc
pub(crate) fn string_exotic_define_own_property(
    obj: &JsObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let stringDesc be StringGetOwnProperty(S, P).
    let string_desc = string_get_own_property(obj, &key);

    // 2. If stringDesc is not undefined, then
    if let Some(string_desc) = string_desc {
        // a. Let extensible be S.[[Extensible]].
        // b. Return IsCompatiblePropertyDescriptor(extensible, Desc, stringDesc).
        let extensible = obj.borrow().extensible();
        Ok(is_compatible_property_descriptor(
            extensible,
            desc,
            Some(string_desc),
        ))
    } else {
        // 3. Return ! OrdinaryDefineOwnProperty(S, P, Desc).
        super::ordinary_define_own_property(obj, key, desc, context)
    }
}

/// The abstract operation `IsCompatiblePropertyDescriptor`: validation
/// against an immutable current descriptor, without applying anything.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-iscompatiblepropertydescriptor
pub(crate) fn is_compatible_property_descriptor(
    extensible: bool,
    desc: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // ValidateAndApplyPropertyDescriptor with undefined O and P.
    // 2. If current is undefined: only an extensible holder can take it.
    let current = match current {
        Some(current) => current,
        None => return extensible,
    };

    if desc.is_empty() {
        return true;
    }

    if !current.expect_configurable() {
        if matches!(desc.configurable(), Some(true)) {
            return false;
        }
        if matches!(desc.enumerable(), Some(enumerable) if enumerable != current.expect_enumerable())
        {
            return false;
        }
        if desc.is_generic_descriptor() {
            return true;
        }
        if current.is_data_descriptor() != desc.is_data_descriptor() {
            return false;
        }
        if current.is_data_descriptor() {
            if !current.expect_writable() {
                if matches!(desc.writable(), Some(true)) {
                    return false;
                }
                if matches!(desc.value(), Some(value) if !JsValue::same_value(value, current.expect_value()))
                {
                    return false;
                }
            }
        } else {
            if matches!(desc.get(), Some(get) if !JsValue::same_value(get, current.expect_get())) {
                return false;
            }
            if matches!(desc.set(), Some(set) if !JsValue::same_value(set, current.expect_set())) {
                return false;
            }
        }
    }
    true
}

/// The abstract operation `StringGetOwnProperty`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-stringgetownproperty
pub(crate) fn string_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
) -> Option<PropertyDescriptor> {
    // 2. If Type(P) is not String, return undefined; non-canonical indices
    // already live in the `String` key space.
    let pos = match key {
        PropertyKey::Index(index) => *index as usize,
        _ => return None,
    };

    // 5 - 7. Out of range of the code units means undefined.
    let string = obj.borrow().as_string()?;
    let code_unit = string.code_unit_at(pos)?;
    let result_str = JsValue::new(String::from_utf16_lossy(&[code_unit]));

    // 8. Return the PropertyDescriptor { [[Value]]: resultStr, [[Writable]]: false,
    //    [[Enumerable]]: true, [[Configurable]]: false }.
    let desc = PropertyDescriptor::builder()
        .value(result_str)
        .writable(false)
        .enumerable(true)
        .configurable(false)
        .build();

    Some(desc)
}

/// Gets the own property keys of a `String` exotic object: the code unit
/// indices in ascending order, then everything the shape tracks.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects-ownpropertykeys
pub(crate) fn string_exotic_own_property_keys(
    obj: &JsObject,
    _context: &mut Context,
) -> JsResult<Vec<PropertyKey>> {
    let object = obj.borrow();
    let len = object
        .as_string()
        .expect("string exotic object must have a string value")
        .encode_utf16_len();

    let mut keys = Vec::with_capacity(len);

    // 3. For each integer i starting with 0 such that i < len, in ascending order.
    keys.extend((0..len as u32).map(PropertyKey::Index));

    // 4. Remaining integer-indexed properties, ascending.
    keys.extend(
        object
            .properties()
            .index_property_keys()
            .into_iter()
            .filter(|index| *index as usize >= len)
            .map(PropertyKey::Index),
    );

    // 5 - 6. String keys, then symbol keys, in insertion order.
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
