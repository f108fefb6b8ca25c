//! This module implements the `Proxy` exotic object internal methods.
//!
//! Every method checks for revocation, looks the trap up on the handler,
//! forwards to the target when the trap is absent, and otherwise validates
//! the trap result against the target *after* the call. Invariant violations
//! throw `TypeError` regardless of what the trap reported.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots

use super::{string::is_compatible_property_descriptor, InternalObjectMethods};
use crate::{
    context::Context,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    value::{JsValue, Type},
    JsResult,
};
use rustc_hash::FxHashSet;

/// The internal method table of `Proxy` exotic objects.
pub(crate) static PROXY_EXOTIC_INTERNAL_METHODS: InternalObjectMethods = InternalObjectMethods {
    __get_prototype_of__: proxy_exotic_get_prototype_of,
    __set_prototype_of__: proxy_exotic_set_prototype_of,
    __is_extensible__: proxy_exotic_is_extensible,
    __prevent_extensions__: proxy_exotic_prevent_extensions,
    __get_own_property__: proxy_exotic_get_own_property,
    __define_own_property__: proxy_exotic_define_own_property,
    __has_property__: proxy_exotic_has_property,
    __get__: proxy_exotic_get,
    __set__: proxy_exotic_set,
    __delete__: proxy_exotic_delete,
    __own_property_keys__: proxy_exotic_own_property_keys,
};

/// Fetch `(target, handler)`, or throw `TypeError` on a revoked proxy.
fn try_data(obj: &JsObject, context: &mut Context) -> JsResult<(JsObject, JsObject)> {
    let data = obj
        .borrow()
        .as_proxy()
        .expect("proxy exotic method called on non-proxy object")
        .data();
    data.ok_or_else(|| context.construct_type_error("Proxy object has been revoked"))
}

/// `GetMethod(handler, trap_name)`.
fn trap(handler: &JsObject, name: &str, context: &mut Context) -> JsResult<Option<JsObject>> {
    JsValue::new(handler.clone()).get_method(name.into(), context)
}

/// `[[GetPrototypeOf]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-getprototypeof
pub(crate) fn proxy_exotic_get_prototype_of(
    obj: &JsObject,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1 - 4. Revocation check, then trap lookup.
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[GetPrototypeOf]]().
    let trap = match trap(&handler, "getPrototypeOf", context)? {
        Some(trap) => trap,
        None => return target.__get_prototype_of__(context),
    };

    // 7. Let handlerProto be ? Call(trap, handler, « target »).
    let handler_proto = trap.call(
        &handler.clone().into(),
        &[target.clone().into()],
        context,
    )?;

    // 8. If Type(handlerProto) is neither Object nor Null, throw a TypeError exception.
    if !handler_proto.is_object() && !handler_proto.is_null() {
        return Err(
            context.construct_type_error("proxy getPrototypeOf trap result is neither object nor null")
        );
    }

    // 9 - 10. If target is extensible, the trap may report anything.
    if target.__is_extensible__(context)? {
        return Ok(handler_proto);
    }

    // 11 - 12. A non-extensible target pins the answer to its own prototype.
    let target_proto = target.__get_prototype_of__(context)?;
    if !JsValue::same_value(&handler_proto, &target_proto) {
        return Err(context.construct_type_error(
            "proxy getPrototypeOf trap violates the invariant for non-extensible targets",
        ));
    }

    // 13. Return handlerProto.
    Ok(handler_proto)
}

/// `[[SetPrototypeOf]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-setprototypeof-v
pub(crate) fn proxy_exotic_set_prototype_of(
    obj: &JsObject,
    val: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[SetPrototypeOf]](V).
    let trap = match trap(&handler, "setPrototypeOf", context)? {
        Some(trap) => trap,
        None => return target.__set_prototype_of__(val, context),
    };

    // 7 - 8. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target, V »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), val.clone()],
            context,
        )?
        .to_boolean()
    {
        return Ok(false);
    }

    // 9 - 10. An extensible target accepts the report as is.
    if target.__is_extensible__(context)? {
        return Ok(true);
    }

    // 11 - 12. A non-extensible target must really end up with V.
    let target_proto = target.__get_prototype_of__(context)?;
    if !JsValue::same_value(&val, &target_proto) {
        return Err(context.construct_type_error(
            "proxy setPrototypeOf trap violates the invariant for non-extensible targets",
        ));
    }

    // 13. Return true.
    Ok(true)
}

/// `[[IsExtensible]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-isextensible
pub(crate) fn proxy_exotic_is_extensible(obj: &JsObject, context: &mut Context) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? IsExtensible(target).
    let trap = match trap(&handler, "isExtensible", context)? {
        Some(trap) => trap,
        None => return target.__is_extensible__(context),
    };

    // 7. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target »)).
    let boolean_trap_result = trap
        .call(&handler.clone().into(), &[target.clone().into()], context)?
        .to_boolean();

    // 8 - 9. The report must match the target's actual extensibility.
    if boolean_trap_result != target.__is_extensible__(context)? {
        return Err(context.construct_type_error(
            "proxy isExtensible trap must return the target's extensibility",
        ));
    }

    // 10. Return booleanTrapResult.
    Ok(boolean_trap_result)
}

/// `[[PreventExtensions]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-preventextensions
pub(crate) fn proxy_exotic_prevent_extensions(
    obj: &JsObject,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[PreventExtensions]]().
    let trap = match trap(&handler, "preventExtensions", context)? {
        Some(trap) => trap,
        None => return target.__prevent_extensions__(context),
    };

    // 7. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target »)).
    let boolean_trap_result = trap
        .call(&handler.clone().into(), &[target.clone().into()], context)?
        .to_boolean();

    // 8. If booleanTrapResult is true, the target must now be non-extensible.
    if boolean_trap_result && target.__is_extensible__(context)? {
        return Err(context.construct_type_error(
            "proxy preventExtensions trap reported success on an extensible target",
        ));
    }

    // 9. Return booleanTrapResult.
    Ok(boolean_trap_result)
}

/// `[[GetOwnProperty]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-getownproperty-p
pub(crate) fn proxy_exotic_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<Option<PropertyDescriptor>> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[GetOwnProperty]](P).
    let trap = match trap(&handler, "getOwnPropertyDescriptor", context)? {
        Some(trap) => trap,
        None => return target.__get_own_property__(key, context),
    };

    // 7. Let trapResultObj be ? Call(trap, handler, « target, P »).
    let trap_result_obj = trap.call(
        &handler.clone().into(),
        &[target.clone().into(), key.into()],
        context,
    )?;

    // 8. If Type(trapResultObj) is neither Object nor Undefined, throw a TypeError exception.
    if !trap_result_obj.is_object() && !trap_result_obj.is_undefined() {
        return Err(context.construct_type_error(
            "proxy getOwnPropertyDescriptor trap result is neither object nor undefined",
        ));
    }

    // 9. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = target.__get_own_property__(key, context)?;

    // 10. If trapResultObj is undefined, then
    if trap_result_obj.is_undefined() {
        return match target_desc {
            // a. If targetDesc is undefined, return undefined.
            None => Ok(None),
            Some(target_desc) => {
                // b. A non-configurable property cannot be hidden.
                if !target_desc.expect_configurable() {
                    return Err(context.construct_type_error(
                        "proxy getOwnPropertyDescriptor trap hid a non-configurable property",
                    ));
                }
                // c - e. Neither can any own property of a non-extensible target.
                if !target.__is_extensible__(context)? {
                    return Err(context.construct_type_error(
                        "proxy getOwnPropertyDescriptor trap hid a property of a non-extensible target",
                    ));
                }
                Ok(None)
            }
        };
    }

    // 11. Let extensibleTarget be ? IsExtensible(target).
    let extensible_target = target.__is_extensible__(context)?;

    // 12 - 13. Reify and complete the reported descriptor.
    let result_desc = trap_result_obj
        .to_property_descriptor(context)?
        .complete_property_descriptor();

    // 14 - 15. The report must be compatible with the real property.
    if !is_compatible_property_descriptor(
        extensible_target,
        result_desc.clone(),
        target_desc.clone(),
    ) {
        return Err(context.construct_type_error(
            "proxy getOwnPropertyDescriptor trap result is incompatible with the target property",
        ));
    }

    // 16. If resultDesc.[[Configurable]] is false, then
    if !result_desc.expect_configurable() {
        match &target_desc {
            // a. A non-configurable property cannot be conjured out of thin
            //    air nor over a configurable one.
            Some(target_desc) if !target_desc.expect_configurable() => {
                // b. Reporting non-writable additionally requires the target
                //    property to be non-writable.
                if result_desc.is_data_descriptor()
                    && !result_desc.expect_writable()
                    && target_desc.is_data_descriptor()
                    && target_desc.expect_writable()
                {
                    return Err(context.construct_type_error(
                        "proxy getOwnPropertyDescriptor trap reported a writable property as non-writable",
                    ));
                }
            }
            _ => {
                return Err(context.construct_type_error(
                    "proxy getOwnPropertyDescriptor trap reported a configurable or missing property as non-configurable",
                ));
            }
        }
    }

    // 18. Return resultDesc.
    Ok(Some(result_desc))
}

/// `[[DefineOwnProperty]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-defineownproperty-p-desc
pub(crate) fn proxy_exotic_define_own_property(
    obj: &JsObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[DefineOwnProperty]](P, Desc).
    let trap = match trap(&handler, "defineProperty", context)? {
        Some(trap) => trap,
        None => return target.__define_own_property__(key, desc, context),
    };

    // 7. Let descObj be FromPropertyDescriptor(Desc).
    let desc_obj = JsValue::from_property_descriptor(Some(&desc), context)?;

    // 8. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target, P, descObj »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), (&key).into(), desc_obj],
            context,
        )?
        .to_boolean()
    {
        // 9. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 10. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = target.__get_own_property__(&key, context)?;

    // 11. Let extensibleTarget be ? IsExtensible(target).
    let extensible_target = target.__is_extensible__(context)?;

    // 12 - 13. Whether the definition pinned the property non-configurable.
    let setting_config_false = matches!(desc.configurable(), Some(false));

    match target_desc {
        // 15. If targetDesc is undefined, then
        None => {
            // a. A new property cannot appear on a non-extensible target.
            if !extensible_target {
                return Err(context.construct_type_error(
                    "proxy defineProperty trap added a property to a non-extensible target",
                ));
            }
            // b. Nor can a fresh non-configurable property.
            if setting_config_false {
                return Err(context.construct_type_error(
                    "proxy defineProperty trap defined a non-configurable property that does not exist on the target",
                ));
            }
        }
        // 16. Else,
        Some(target_desc) => {
            // a. The definition must be compatible with the existing property.
            if !is_compatible_property_descriptor(
                extensible_target,
                desc.clone(),
                Some(target_desc.clone()),
            ) {
                return Err(context.construct_type_error(
                    "proxy defineProperty trap result is incompatible with the target property",
                ));
            }
            // b. Configurable properties cannot be reported as pinned.
            if setting_config_false && target_desc.expect_configurable() {
                return Err(context.construct_type_error(
                    "proxy defineProperty trap defined a configurable target property as non-configurable",
                ));
            }
            // c. A non-configurable writable data property cannot become
            //    non-writable through the trap alone.
            if target_desc.is_data_descriptor()
                && !target_desc.expect_configurable()
                && target_desc.expect_writable()
                && matches!(desc.writable(), Some(false))
            {
                return Err(context.construct_type_error(
                    "proxy defineProperty trap made a non-configurable writable property non-writable",
                ));
            }
        }
    }

    // 17. Return true.
    Ok(true)
}

/// `[[HasProperty]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-hasproperty-p
pub(crate) fn proxy_exotic_has_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[HasProperty]](P).
    let trap = match trap(&handler, "has", context)? {
        Some(trap) => trap,
        None => return target.__has_property__(key, context),
    };

    // 7. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target, P »)).
    let boolean_trap_result = trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), key.into()],
            context,
        )?
        .to_boolean();

    // 8. If booleanTrapResult is false, then
    if !boolean_trap_result {
        if let Some(target_desc) = target.__get_own_property__(key, context)? {
            // b.i. A non-configurable own property cannot be reported absent.
            if !target_desc.expect_configurable() {
                return Err(context.construct_type_error(
                    "proxy has trap hid a non-configurable property",
                ));
            }
            // b.ii - iii. Nor can any own property of a non-extensible target.
            if !target.__is_extensible__(context)? {
                return Err(context.construct_type_error(
                    "proxy has trap hid a property of a non-extensible target",
                ));
            }
        }
    }

    // 9. Return booleanTrapResult.
    Ok(boolean_trap_result)
}

/// `[[Get]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-get-p-receiver
pub(crate) fn proxy_exotic_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[Get]](P, Receiver).
    let trap = match trap(&handler, "get", context)? {
        Some(trap) => trap,
        None => return target.__get__(key, receiver, context),
    };

    // 7. Let trapResult be ? Call(trap, handler, « target, P, Receiver »).
    let trap_result = trap.call(
        &handler.clone().into(),
        &[target.clone().into(), key.into(), receiver],
        context,
    )?;

    // 8. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = target.__get_own_property__(key, context)?;

    // 9. If targetDesc is not undefined and targetDesc.[[Configurable]] is false, then
    if let Some(target_desc) = target_desc {
        if !target_desc.expect_configurable() {
            // a. A non-writable data property pins the reported value.
            if target_desc.is_data_descriptor()
                && !target_desc.expect_writable()
                && !JsValue::same_value(&trap_result, target_desc.expect_value())
            {
                return Err(context.construct_type_error(
                    "proxy get trap violates the invariant for non-writable non-configurable properties",
                ));
            }
            // b. A getter-less accessor pins the report to undefined.
            if target_desc.is_accessor_descriptor()
                && target_desc.expect_get().is_undefined()
                && !trap_result.is_undefined()
            {
                return Err(context.construct_type_error(
                    "proxy get trap returned a value for a non-configurable accessor without getter",
                ));
            }
        }
    }

    // 10. Return trapResult.
    Ok(trap_result)
}

/// `[[Set]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-set-p-v-receiver
pub(crate) fn proxy_exotic_set(
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[Set]](P, V, Receiver).
    let trap = match trap(&handler, "set", context)? {
        Some(trap) => trap,
        None => return target.__set__(key, value, receiver, context),
    };

    // 7. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target, P, V, Receiver »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[
                target.clone().into(),
                (&key).into(),
                value.clone(),
                receiver,
            ],
            context,
        )?
        .to_boolean()
    {
        // 8. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 9. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = target.__get_own_property__(&key, context)?;

    // 10. If targetDesc is not undefined and targetDesc.[[Configurable]] is false, then
    if let Some(target_desc) = target_desc {
        if !target_desc.expect_configurable() {
            // a. A non-writable data property rejects differing values.
            if target_desc.is_data_descriptor()
                && !target_desc.expect_writable()
                && !JsValue::same_value(&value, target_desc.expect_value())
            {
                return Err(context.construct_type_error(
                    "proxy set trap violates the invariant for non-writable non-configurable properties",
                ));
            }
            // b. A setter-less accessor rejects every write.
            if target_desc.is_accessor_descriptor() && target_desc.expect_set().is_undefined() {
                return Err(context.construct_type_error(
                    "proxy set trap reported success on a non-configurable accessor without setter",
                ));
            }
        }
    }

    // 11. Return true.
    Ok(true)
}

/// `[[Delete]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-delete-p
pub(crate) fn proxy_exotic_delete(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[Delete]](P).
    let trap = match trap(&handler, "deleteProperty", context)? {
        Some(trap) => trap,
        None => return target.__delete__(key, context),
    };

    // 7. Let booleanTrapResult be ! ToBoolean(? Call(trap, handler, « target, P »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), key.into()],
            context,
        )?
        .to_boolean()
    {
        // 8. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 9. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = match target.__get_own_property__(key, context)? {
        // 10. If targetDesc is undefined, return true.
        None => return Ok(true),
        Some(target_desc) => target_desc,
    };

    // 11. A non-configurable property cannot be reported deleted.
    if !target_desc.expect_configurable() {
        return Err(context.construct_type_error(
            "proxy deleteProperty trap deleted a non-configurable property",
        ));
    }

    // 12 - 13. Nor can any own property of a non-extensible target.
    if !target.__is_extensible__(context)? {
        return Err(context.construct_type_error(
            "proxy deleteProperty trap deleted a property of a non-extensible target",
        ));
    }

    // 14. Return true.
    Ok(true)
}

/// `[[OwnPropertyKeys]]` of a proxy object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-ownpropertykeys
pub(crate) fn proxy_exotic_own_property_keys(
    obj: &JsObject,
    context: &mut Context,
) -> JsResult<Vec<PropertyKey>> {
    let (target, handler) = try_data(obj, context)?;

    // 5 - 6. If trap is undefined, return ? target.[[OwnPropertyKeys]]().
    let trap = match trap(&handler, "ownKeys", context)? {
        Some(trap) => trap,
        None => return target.__own_property_keys__(context),
    };

    // 7. Let trapResultArray be ? Call(trap, handler, « target »).
    let trap_result_array =
        trap.call(&handler.clone().into(), &[target.clone().into()], context)?;

    // 8. Let trapResult be ? CreateListFromArrayLike(trapResultArray, « String, Symbol »).
    let trap_result_raw = trap_result_array
        .as_object()
        .ok_or_else(|| {
            context.construct_type_error("proxy ownKeys trap must return an array-like object")
        })?
        .create_list_from_array_like(&[Type::String, Type::Symbol], context)?;

    let mut trap_result = Vec::with_capacity(trap_result_raw.len());
    let mut seen = FxHashSet::default();
    for value in trap_result_raw {
        let key = match value {
            JsValue::String(ref string) => PropertyKey::from(string.clone()),
            JsValue::Symbol(ref symbol) => PropertyKey::from(symbol.clone()),
            _ => unreachable!("CreateListFromArrayLike restricted the types"),
        };
        // 9. If trapResult contains any duplicate entries, throw a TypeError exception.
        if !seen.insert(key.clone()) {
            return Err(
                context.construct_type_error("proxy ownKeys trap result contains duplicate keys")
            );
        }
        trap_result.push(key);
    }

    // 10. Let extensibleTarget be ? IsExtensible(target).
    let extensible_target = target.__is_extensible__(context)?;

    // 11. Let targetKeys be ? target.[[OwnPropertyKeys]]().
    // 14 - 15. Split them by configurability.
    let mut target_configurable_keys = Vec::new();
    let mut target_nonconfigurable_keys = Vec::new();
    for key in target.__own_property_keys__(context)? {
        match target.__get_own_property__(&key, context)? {
            Some(desc) if !desc.expect_configurable() => {
                target_nonconfigurable_keys.push(key);
            }
            _ => target_configurable_keys.push(key),
        }
    }

    // 16. If extensibleTarget is true and targetNonconfigurableKeys is empty, return trapResult.
    if extensible_target && target_nonconfigurable_keys.is_empty() {
        return Ok(trap_result);
    }

    // 17. Let uncheckedResultKeys be a List whose elements are the elements of trapResult.
    let mut unchecked_result_keys: FxHashSet<&PropertyKey> = trap_result.iter().collect();

    // 18. Every non-configurable own key must be reported.
    for key in &target_nonconfigurable_keys {
        if !unchecked_result_keys.remove(key) {
            return Err(context.construct_type_error(
                "proxy ownKeys trap hid a non-configurable key of its target",
            ));
        }
    }

    // 19. If extensibleTarget is true, return trapResult.
    if extensible_target {
        return Ok(trap_result);
    }

    // 20. A non-extensible target must be reported exactly.
    for key in &target_configurable_keys {
        if !unchecked_result_keys.remove(key) {
            return Err(context.construct_type_error(
                "proxy ownKeys trap hid a key of its non-extensible target",
            ));
        }
    }

    // 21. If uncheckedResultKeys is not empty, throw a TypeError exception.
    if !unchecked_result_keys.is_empty() {
        return Err(context.construct_type_error(
            "proxy ownKeys trap returned extra keys for its non-extensible target",
        ));
    }

    // 22. Return trapResult.
    Ok(trap_result)
}
