//! The entry points the executor drives the object model through.
//!
//! Errors never unwind across this boundary. Every operation either returns
//! its result, or parks the thrown error value in the context's
//! pending-exception slot and returns a sentinel (`undefined` for values,
//! `false` for booleans, an empty list for key lists); the executor checks
//! [`Context::has_pending_exception`] after each step.
//!
//! In strict mode, rejected `[[Set]]` and `[[Delete]]` operations raise
//! `TypeError` through the same slot.

use crate::{
    builtins::{
        array::{to_valid_array_length, Array},
        proxy::Proxy,
    },
    context::Context,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    value::JsValue,
    JsResult,
};

/// Unwrap an operation result, parking errors in the pending-exception slot.
fn catch<T>(context: &mut Context, result: JsResult<T>, sentinel: T) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            context.set_pending_exception(error);
            sentinel
        }
    }
}

/// `O.[[Get]](key, receiver)`.
pub fn value_get(
    context: &mut Context,
    obj: &JsObject,
    key: PropertyKey,
    receiver: &JsValue,
) -> JsValue {
    let result = obj.__get__(&key, receiver.clone(), context);
    catch(context, result, JsValue::undefined())
}

/// `O.[[Set]](key, value, receiver)`.
///
/// Returns `false` on rejection; in strict mode the rejection additionally
/// raises `TypeError` through the pending-exception slot.
pub fn value_set(
    context: &mut Context,
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: &JsValue,
) -> bool {
    let result = obj.__set__(key.clone(), value, receiver.clone(), context);
    let success = catch(context, result, false);
    if !success && context.strict_mode() && !context.has_pending_exception() {
        let error =
            context.construct_type_error(format!("cannot set non-writable property: {key}"));
        context.set_pending_exception(error);
    }
    success
}

/// `O.[[HasProperty]](key)`.
pub fn value_has(context: &mut Context, obj: &JsObject, key: &PropertyKey) -> bool {
    let result = obj.__has_property__(key, context);
    catch(context, result, false)
}

/// `O.[[Delete]](key)`.
///
/// Returns `false` on rejection; in strict mode the rejection additionally
/// raises `TypeError` through the pending-exception slot.
pub fn value_delete(context: &mut Context, obj: &JsObject, key: &PropertyKey) -> bool {
    let result = obj.__delete__(key, context);
    let success = catch(context, result, false);
    if !success && context.strict_mode() && !context.has_pending_exception() {
        let error = context.construct_type_error(format!("cannot delete property: {key}"));
        context.set_pending_exception(error);
    }
    success
}

/// `O.[[DefineOwnProperty]](key, desc)`.
pub fn value_define_own(
    context: &mut Context,
    obj: &JsObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
) -> bool {
    let result = obj.__define_own_property__(key, desc, context);
    catch(context, result, false)
}

/// `O.[[GetOwnProperty]](key)`.
pub fn value_get_own_descriptor(
    context: &mut Context,
    obj: &JsObject,
    key: &PropertyKey,
) -> Option<PropertyDescriptor> {
    let result = obj.__get_own_property__(key, context);
    catch(context, result, None)
}

/// `O.[[OwnPropertyKeys]]()`.
pub fn value_own_keys(context: &mut Context, obj: &JsObject) -> Vec<PropertyKey> {
    let result = obj.__own_property_keys__(context);
    catch(context, result, Vec::new())
}

/// `O.[[GetPrototypeOf]]()`.
pub fn value_get_prototype(context: &mut Context, obj: &JsObject) -> JsValue {
    let result = obj.__get_prototype_of__(context);
    catch(context, result, JsValue::null())
}

/// `O.[[SetPrototypeOf]](proto)`.
pub fn value_set_prototype(context: &mut Context, obj: &JsObject, prototype: JsValue) -> bool {
    let result = obj.__set_prototype_of__(prototype, context);
    catch(context, result, false)
}

/// `O.[[IsExtensible]]()`.
pub fn value_is_extensible(context: &mut Context, obj: &JsObject) -> bool {
    let result = obj.__is_extensible__(context);
    catch(context, result, false)
}

/// `O.[[PreventExtensions]]()`.
pub fn value_prevent_extensions(context: &mut Context, obj: &JsObject) -> bool {
    let result = obj.__prevent_extensions__(context);
    catch(context, result, false)
}

/// `ProxyCreate(target, handler)`.
///
/// Returns `undefined` (with a pending `TypeError`) when either argument is
/// not an object.
pub fn proxy_new(context: &mut Context, target: &JsValue, handler: &JsValue) -> JsValue {
    let result = Proxy::create(target, handler, context).map(JsValue::from);
    catch(context, result, JsValue::undefined())
}

/// Revoke a proxy in place. Returns `false` when the object is not a proxy.
pub fn proxy_revoke(proxy: &JsObject) -> bool {
    match proxy.borrow_mut().as_proxy_mut() {
        Some(proxy) => {
            proxy.revoke();
            true
        }
        None => false,
    }
}

/// `ArrayCreate` driven by a length value, with the `Array(len)` coercion
/// rules (the coerced length must round-trip exactly, else `RangeError`).
pub fn array_new(context: &mut Context, length: &JsValue) -> JsValue {
    let result = to_valid_array_length(length, context)
        .and_then(|length| Array::array_create(length, None, context))
        .map(JsValue::from);
    catch(context, result, JsValue::undefined())
}

/// `Array.prototype.push` over `array`, returning the new length.
pub fn array_push(context: &mut Context, array: &JsObject, values: &[JsValue]) -> JsValue {
    let result = Array::push(&array.clone().into(), values, context);
    catch(context, result, JsValue::undefined())
}

/// `Array.prototype.pop` over `array`, returning the removed element.
pub fn array_pop(context: &mut Context, array: &JsObject) -> JsValue {
    let result = Array::pop(&array.clone().into(), &[], context);
    catch(context, result, JsValue::undefined())
}

/// `Array.prototype.shift` over `array`, returning the removed element.
pub fn array_shift(context: &mut Context, array: &JsObject) -> JsValue {
    let result = Array::shift(&array.clone().into(), &[], context);
    catch(context, result, JsValue::undefined())
}

/// `Array.prototype.unshift` over `array`, returning the new length.
pub fn array_unshift(context: &mut Context, array: &JsObject, values: &[JsValue]) -> JsValue {
    let result = Array::unshift(&array.clone().into(), values, context);
    catch(context, result, JsValue::undefined())
}
