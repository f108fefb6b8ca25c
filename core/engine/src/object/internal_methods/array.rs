//! This module implements the `Array` exotic object internal methods.
//!
//! Only `[[DefineOwnProperty]]` deviates from the ordinary behaviour; the
//! coupling between indexed properties and `length` lives entirely there.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-array-exotic-objects

use super::{InternalObjectMethods, ORDINARY_INTERNAL_METHODS};
use crate::{
    context::Context,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    JsResult,
};

/// The internal method table of `Array` exotic objects.
pub(crate) static ARRAY_EXOTIC_INTERNAL_METHODS: InternalObjectMethods = InternalObjectMethods {
    __define_own_property__: array_exotic_define_own_property,
    ..ORDINARY_INTERNAL_METHODS
};

/// Define an own property of an array exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-array-exotic-objects-defineownproperty-p-desc
pub(crate) fn array_exotic_define_own_property(
    obj: &JsObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    match key {
        // 2. If P is "length", then
        PropertyKey::String(ref s) if s == "length" => {
            // a. Return ? ArraySetLength(A, Desc).
            array_set_length(obj, desc, context)
        }
        // 3. Else if P is an array index, then
        PropertyKey::Index(index) => {
            // a. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
            // b. Assert: ! IsDataDescriptor(oldLenDesc) and oldLenDesc.[[Configurable]] is false.
            let old_len_desc = obj
                .__get_own_property__(&"length".into(), context)?
                .expect("array exotic object must have a length property");

            // c. Let oldLen be oldLenDesc.[[Value]].
            let old_len = old_len_desc.expect_value().to_u32(context)?;

            // d. If index ≥ oldLen and oldLenDesc.[[Writable]] is false, return false.
            if index >= old_len && !old_len_desc.expect_writable() {
                return Ok(false);
            }

            // e. Let succeeded be ! OrdinaryDefineOwnProperty(A, P, Desc).
            if super::ordinary_define_own_property(obj, key, desc, context)? {
                // g. If index ≥ oldLen, then
                if index >= old_len && index < u32::MAX {
                    // i. Set oldLenDesc.[[Value]] to index + 1.
                    // ii. Perform ! OrdinaryDefineOwnProperty(A, "length", oldLenDesc).
                    let new_len_desc = PropertyDescriptor::builder()
                        .value(index + 1)
                        .maybe_writable(old_len_desc.writable())
                        .maybe_enumerable(old_len_desc.enumerable())
                        .maybe_configurable(old_len_desc.configurable());
                    super::ordinary_define_own_property(
                        obj,
                        "length".into(),
                        new_len_desc.into(),
                        context,
                    )?;
                }
                // h. Return true.
                Ok(true)
            } else {
                // f. If succeeded is false, return false.
                Ok(false)
            }
        }
        // 4. Return ! OrdinaryDefineOwnProperty(A, P, Desc).
        _ => super::ordinary_define_own_property(obj, key, desc, context),
    }
}

/// The abstract operation `ArraySetLength`.
///
/// The incoming value is coerced (and range-checked) *before* the old
/// length's writability is consulted; a `'1'` written to a non-writable
/// length must coerce first and only then be rejected.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-arraysetlength
pub(crate) fn array_set_length(
    obj: &JsObject,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If Desc.[[Value]] is absent, then
    let new_len_val = match desc.value() {
        Some(value) => value.clone(),
        None => {
            // a. Return OrdinaryDefineOwnProperty(A, "length", Desc).
            return super::ordinary_define_own_property(obj, "length".into(), desc, context);
        }
    };

    // 3. Let newLen be ? ToUint32(Desc.[[Value]]).
    let new_len = new_len_val.to_u32(context)?;

    // 4. Let numberLen be ? ToNumber(Desc.[[Value]]).
    let number_len = new_len_val.to_number(context)?;

    // 5. If SameValueZero(newLen, numberLen) is false, throw a RangeError exception.
    #[allow(clippy::float_cmp)]
    if f64::from(new_len) != number_len {
        return Err(context.construct_range_error("invalid array length"));
    }

    // 6. Set newLenDesc.[[Value]] to newLen.
    let mut new_len_desc = PropertyDescriptor::builder()
        .value(new_len)
        .maybe_writable(desc.writable())
        .maybe_enumerable(desc.enumerable())
        .maybe_configurable(desc.configurable());

    // 7. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
    let old_len_desc = obj
        .__get_own_property__(&"length".into(), context)?
        .expect("array exotic object must have a length property");

    // 9. Let oldLen be oldLenDesc.[[Value]].
    let old_len = old_len_desc.expect_value().to_u32(context)?;

    // 11. If newLen ≥ oldLen, then
    if new_len >= old_len {
        // a. Return OrdinaryDefineOwnProperty(A, "length", newLenDesc).
        return super::ordinary_define_own_property(
            obj,
            "length".into(),
            new_len_desc.build(),
            context,
        );
    }

    // 12. If oldLenDesc.[[Writable]] is false, return false.
    if !old_len_desc.expect_writable() {
        return Ok(false);
    }

    // 13 - 14. Remember whether the shrink also turns the length read-only;
    // the length stays writable until every index is gone.
    let new_writable = if new_len_desc.inner().writable().unwrap_or(true) {
        true
    } else {
        new_len_desc = new_len_desc.writable(true);
        false
    };

    // 15 - 16. Let succeeded be ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
    if !super::ordinary_define_own_property(
        obj,
        "length".into(),
        new_len_desc.clone().build(),
        context,
    )? {
        return Ok(false);
    }

    // 17. For each own property key P of A that is an array index, whose numeric value is
    //     greater than or equal to newLen, in descending numeric index order, do
    let mut doomed: Vec<u32> = obj
        .borrow()
        .properties()
        .index_property_keys()
        .into_iter()
        .filter(|index| *index >= new_len)
        .collect();
    doomed.sort_unstable_by(|x, y| y.cmp(x));

    for index in doomed {
        // a. Let deleteSucceeded be ! A.[[Delete]](P).
        if !obj.__delete__(&index.into(), context)? {
            // b. If deleteSucceeded is false: the shrink stops here.
            // i. Set newLenDesc.[[Value]] to ! ToUint32(P) + 1𝔽.
            new_len_desc = new_len_desc.value(index + 1);

            // ii. If newWritable is false, set newLenDesc.[[Writable]] to false.
            if !new_writable {
                new_len_desc = new_len_desc.writable(false);
            }

            // iii. Perform ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
            super::ordinary_define_own_property(
                obj,
                "length".into(),
                new_len_desc.build(),
                context,
            )?;

            // iv. Return false.
            return Ok(false);
        }
    }

    // 18. If newWritable is false, then
    if !new_writable {
        // a. Perform ! OrdinaryDefineOwnProperty(A, "length",
        //    PropertyDescriptor { [[Writable]]: false }).
        super::ordinary_define_own_property(
            obj,
            "length".into(),
            PropertyDescriptor::builder().writable(false).build(),
            context,
        )?;
    }

    // 19. Return true.
    Ok(true)
}

/// Shared helper for the array builtins: the current `length` value of an
/// array exotic object.
pub(crate) fn array_length(obj: &JsObject, context: &mut Context) -> JsResult<u32> {
    let desc = obj
        .__get_own_property__(&"length".into(), context)?
        .expect("array exotic object must have a length property");
    desc.expect_value().to_u32(context)
}
