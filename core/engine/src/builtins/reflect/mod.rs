//! This module implements the global `Reflect` object.
//!
//! The `Reflect` global object is a built-in object that provides methods
//! for interceptable ECMAScript operations: a thin functional surface over
//! the internal methods, with exact argument coercion.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-reflect-object

use crate::{
    builtins::{array::Array, function::make_builtin_fn},
    context::Context,
    object::JsObject,
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
    JsResult,
};

#[cfg(test)]
mod tests;

/// Javascript `Reflect` object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reflect;

impl Reflect {
    /// `Reflect.apply ( target, thisArgument, argumentsList )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.apply
    pub(crate) fn apply(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If IsCallable(target) is false, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_callable)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be a function"))?;
        let this_arg = args.get(1).cloned().unwrap_or_default();
        let args_list = args.get(2).cloned().unwrap_or_default();

        // 2. Let args be ? CreateListFromArrayLike(argumentsList).
        let args = args_list
            .as_object()
            .ok_or_else(|| {
                context.construct_type_error("argumentsList must be an array-like object")
            })?
            .create_list_from_array_like(&[], context)?;

        // 3. Return ? Call(target, thisArgument, args).
        target.call(&this_arg, &args, context)
    }

    /// `Reflect.construct ( target, argumentsList [ , newTarget ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.construct
    pub(crate) fn construct(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If IsConstructor(target) is false, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_constructor)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be a constructor"))?;

        // 2 - 3. newTarget defaults to target, and must itself be a constructor.
        let new_target = match args.get(2) {
            Some(new_target) => {
                if new_target.as_constructor().is_none() {
                    return Err(
                        context.construct_type_error("newTarget must be a constructor")
                    );
                }
                new_target.clone()
            }
            None => target.clone().into(),
        };

        // 4. Let args be ? CreateListFromArrayLike(argumentsList).
        let args = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .as_object()
            .ok_or_else(|| {
                context.construct_type_error("argumentsList must be an array-like object")
            })?
            .create_list_from_array_like(&[], context)?;

        // 5. Return ? Construct(target, args, newTarget).
        target.construct(&args, &new_target, context)
    }

    /// `Reflect.defineProperty ( target, propertyKey, attributes )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.defineproperty
    pub(crate) fn define_property(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let key be ? ToPropertyKey(propertyKey).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. Let desc be ? ToPropertyDescriptor(attributes).
        let desc = args
            .get(2)
            .cloned()
            .unwrap_or_default()
            .to_property_descriptor(context)?;

        // 4. Return ? target.[[DefineOwnProperty]](key, desc).
        target
            .__define_own_property__(key, desc, context)
            .map(Into::into)
    }

    /// `Reflect.deleteProperty ( target, propertyKey )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.deleteproperty
    pub(crate) fn delete_property(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let key be ? ToPropertyKey(propertyKey).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. Return ? target.[[Delete]](key).
        Ok(target.__delete__(&key, context)?.into())
    }

    /// `Reflect.get ( target, propertyKey [ , receiver ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.get
    pub(crate) fn get(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let key be ? ToPropertyKey(propertyKey).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. If receiver is not present, set receiver to target.
        let receiver = args
            .get(2)
            .cloned()
            .unwrap_or_else(|| target.clone().into());

        // 4. Return ? target.[[Get]](key, receiver).
        target.__get__(&key, receiver, context)
    }

    /// `Reflect.getOwnPropertyDescriptor ( target, propertyKey )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.getownpropertydescriptor
    pub(crate) fn get_own_property_descriptor(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let key be ? ToPropertyKey(propertyKey).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. Let desc be ? target.[[GetOwnProperty]](key).
        let desc = target.__get_own_property__(&key, context)?;

        // 4. Return FromPropertyDescriptor(desc).
        JsValue::from_property_descriptor(desc.as_ref(), context)
    }

    /// `Reflect.getPrototypeOf ( target )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.getprototypeof
    pub(crate) fn get_prototype_of(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Return ? target.[[GetPrototypeOf]]().
        target.__get_prototype_of__(context)
    }

    /// `Reflect.has ( target, propertyKey )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.has
    pub(crate) fn has(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let key be ? ToPropertyKey(propertyKey).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. Return ? target.[[HasProperty]](key).
        Ok(target.__has_property__(&key, context)?.into())
    }

    /// `Reflect.isExtensible ( target )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.isextensible
    pub(crate) fn is_extensible(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Return ? IsExtensible(target).
        Ok(target.__is_extensible__(context)?.into())
    }

    /// `Reflect.ownKeys ( target )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.ownkeys
    pub(crate) fn own_keys(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let keys be ? target.[[OwnPropertyKeys]]().
        let keys: Vec<JsValue> = target
            .__own_property_keys__(context)?
            .iter()
            .map(Into::into)
            .collect();

        // 3. Return CreateArrayFromList(keys).
        Ok(Array::create_array_from_list(keys, context).into())
    }

    /// `Reflect.preventExtensions ( target )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.preventextensions
    pub(crate) fn prevent_extensions(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Return ? target.[[PreventExtensions]]().
        Ok(target.__prevent_extensions__(context)?.into())
    }

    /// `Reflect.set ( target, propertyKey, V [ , receiver ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.set
    pub(crate) fn set(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. Let key be ? ToPropertyKey(propertyKey).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        let value = args.get(2).cloned().unwrap_or_default();

        // 3. If receiver is not present, set receiver to target.
        let receiver = args
            .get(3)
            .cloned()
            .unwrap_or_else(|| target.clone().into());

        // 4. Return ? target.[[Set]](key, V, receiver).
        Ok(target.__set__(key, value, receiver, context)?.into())
    }

    /// `Reflect.setPrototypeOf ( target, proto )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-reflect.setprototypeof
    pub(crate) fn set_prototype_of(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| context.construct_type_error("target must be an object"))?;

        // 2. If Type(proto) is not Object and proto is not null, throw a TypeError exception.
        let proto = match args.get(1).cloned().unwrap_or_default() {
            proto @ (JsValue::Object(_) | JsValue::Null) => proto,
            _ => {
                return Err(
                    context.construct_type_error("proto must be an object or null")
                )
            }
        };

        // 3. Return ? target.[[SetPrototypeOf]](proto).
        Ok(target.__set_prototype_of__(proto, context)?.into())
    }
}

/// Initialize the `Reflect` object and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let reflect = context.standard_objects().reflect_object();
    let object_prototype = context.standard_objects().object_object().prototype();
    reflect
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    let methods: [(&str, usize, crate::builtins::function::NativeFunction); 13] = [
        ("apply", 3, Reflect::apply),
        ("construct", 2, Reflect::construct),
        ("defineProperty", 3, Reflect::define_property),
        ("deleteProperty", 2, Reflect::delete_property),
        ("get", 2, Reflect::get),
        ("getOwnPropertyDescriptor", 2, Reflect::get_own_property_descriptor),
        ("getPrototypeOf", 1, Reflect::get_prototype_of),
        ("has", 2, Reflect::has),
        ("isExtensible", 1, Reflect::is_extensible),
        ("ownKeys", 1, Reflect::own_keys),
        ("preventExtensions", 1, Reflect::prevent_extensions),
        ("set", 3, Reflect::set),
        ("setPrototypeOf", 2, Reflect::set_prototype_of),
    ];

    for (name, length, function) in methods {
        let method = make_builtin_fn(function, name, length, context);
        reflect.insert(
            name,
            PropertyDescriptor::builder().value(method).attributes(attribute),
        );
    }

    let to_string_tag = context.well_known_symbols().to_string_tag_symbol();
    reflect.insert(
        to_string_tag,
        PropertyDescriptor::builder()
            .value("Reflect")
            .writable(false)
            .enumerable(false)
            .configurable(true),
    );

    context.register_global_property(
        "Reflect",
        reflect,
        Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
    );
}
