//! This module implements the global `Object` constructor and the static
//! methods of its reflective surface.

use crate::{
    builtins::{
        array::Array,
        function::{get_prototype_from_constructor, make_builtin_fn, make_constructor_fn},
    },
    context::{Context, StandardObjects},
    object::{IntegrityLevel, JsObject, Object as ObjectRecord},
    property::{Attribute, PropertyDescriptor, PropertyNameKind},
    value::JsValue,
    JsResult,
};

/// JavaScript `Object` builtin implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Object;

impl Object {
    /// The `Object` constructor.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object-value
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let value = args.first().cloned().unwrap_or_default();

        // 2. If value is undefined or null, return OrdinaryObjectCreate off
        //    the resolved prototype.
        if value.is_null_or_undefined() {
            let prototype = if new_target.is_undefined() {
                context.standard_objects().object_object().prototype()
            } else {
                get_prototype_from_constructor(
                    new_target,
                    StandardObjects::object_object,
                    context,
                )?
            };
            return Ok(JsObject::new(ObjectRecord::create(prototype.into())).into());
        }

        // 3. Return ! ToObject(value).
        Ok(value.to_object(context)?.into())
    }

    /// `Object.keys ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.keys
    fn keys(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args
            .first()
            .cloned()
            .unwrap_or_default()
            .to_object(context)?;

        // 2. Let nameList be ? EnumerableOwnPropertyNames(obj, key).
        let name_list = obj.enumerable_own_property_names(PropertyNameKind::Key, context)?;

        // 3. Return CreateArrayFromList(nameList).
        Ok(Array::create_array_from_list(name_list, context).into())
    }

    /// `Object.values ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.values
    fn values(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let obj = args
            .first()
            .cloned()
            .unwrap_or_default()
            .to_object(context)?;
        let value_list = obj.enumerable_own_property_names(PropertyNameKind::Value, context)?;
        Ok(Array::create_array_from_list(value_list, context).into())
    }

    /// `Object.entries ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.entries
    fn entries(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let obj = args
            .first()
            .cloned()
            .unwrap_or_default()
            .to_object(context)?;
        let entry_list =
            obj.enumerable_own_property_names(PropertyNameKind::KeyAndValue, context)?;
        Ok(Array::create_array_from_list(entry_list, context).into())
    }

    /// `Object.defineProperty ( O, P, Attributes )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.defineproperty
    fn define_property(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(O) is not Object, throw a TypeError exception.
        let obj = args
            .first()
            .and_then(JsValue::as_object)
            .cloned()
            .ok_or_else(|| {
                context.construct_type_error("Object.defineProperty called on non-object")
            })?;

        // 2. Let key be ? ToPropertyKey(P).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. Let desc be ? ToPropertyDescriptor(Attributes).
        let desc = args
            .get(2)
            .cloned()
            .unwrap_or_default()
            .to_property_descriptor(context)?;

        // 4. Perform ? DefinePropertyOrThrow(O, key, desc).
        obj.define_property_or_throw(key, desc, context)?;

        // 5. Return O.
        Ok(obj.into())
    }

    /// `Object.getOwnPropertyDescriptor ( O, P )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.getownpropertydescriptor
    fn get_own_property_descriptor(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args
            .first()
            .cloned()
            .unwrap_or_default()
            .to_object(context)?;

        // 2. Let key be ? ToPropertyKey(P).
        let key = args
            .get(1)
            .cloned()
            .unwrap_or_default()
            .to_property_key(context)?;

        // 3. Let desc be ? obj.[[GetOwnProperty]](key).
        let desc = obj.__get_own_property__(&key, context)?;

        // 4. Return FromPropertyDescriptor(desc).
        JsValue::from_property_descriptor(desc.as_ref(), context)
    }

    /// `Object.seal ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.seal
    fn seal(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let value = args.first().cloned().unwrap_or_default();
        if let Some(obj) = value.as_object() {
            // 2. Let status be ? SetIntegrityLevel(O, sealed).
            if !obj.set_integrity_level(IntegrityLevel::Sealed, context)? {
                return Err(context.construct_type_error("unable to seal object"));
            }
        }
        // 1/4. Non-objects pass through; return O.
        Ok(value)
    }

    /// `Object.isSealed ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.issealed
    fn is_sealed(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        match args.first().and_then(JsValue::as_object) {
            // 2. Return ? TestIntegrityLevel(O, sealed).
            Some(obj) => Ok(obj.test_integrity_level(IntegrityLevel::Sealed, context)?.into()),
            // 1. If Type(O) is not Object, return true.
            None => Ok(true.into()),
        }
    }

    /// `Object.freeze ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.freeze
    fn freeze(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let value = args.first().cloned().unwrap_or_default();
        if let Some(obj) = value.as_object() {
            if !obj.set_integrity_level(IntegrityLevel::Frozen, context)? {
                return Err(context.construct_type_error("unable to freeze object"));
            }
        }
        Ok(value)
    }

    /// `Object.isFrozen ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.isfrozen
    fn is_frozen(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        match args.first().and_then(JsValue::as_object) {
            Some(obj) => Ok(obj.test_integrity_level(IntegrityLevel::Frozen, context)?.into()),
            None => Ok(true.into()),
        }
    }
}

/// Initialize the `Object` constructor and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().object_object().clone();

    make_constructor_fn(
        "Object",
        1,
        Object::constructor,
        &standard.constructor(),
        &standard.prototype(),
        context,
    );

    let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    let constructor = standard.constructor();
    for (name, length, function) in [
        (
            "keys",
            1,
            Object::keys as crate::builtins::function::NativeFunction,
        ),
        ("values", 1, Object::values),
        ("entries", 1, Object::entries),
        ("defineProperty", 3, Object::define_property),
        (
            "getOwnPropertyDescriptor",
            2,
            Object::get_own_property_descriptor,
        ),
        ("seal", 1, Object::seal),
        ("isSealed", 1, Object::is_sealed),
        ("freeze", 1, Object::freeze),
        ("isFrozen", 1, Object::is_frozen),
    ] {
        let method = make_builtin_fn(function, name, length, context);
        constructor.insert(
            name,
            PropertyDescriptor::builder().value(method).attributes(attribute),
        );
    }

    context.register_global_builtin("Object", constructor);
}
