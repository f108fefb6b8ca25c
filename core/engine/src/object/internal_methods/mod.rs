//! This module defines the object internal methods.
//!
//! Every object carries a `&'static` table of function pointers selected by
//! its exotic kind; the `__method__` wrappers on [`JsObject`] dispatch
//! through that table. The `ordinary_*` functions implement the behaviour of
//! ordinary objects, and the exotic modules override entries where the
//! specification deviates.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots

use crate::{
    context::Context,
    object::JsObject,
    profiler::Profiler,
    property::{DescriptorKind, PropertyDescriptor, PropertyKey},
    value::JsValue,
    JsResult,
};

pub(crate) mod array;
pub(crate) mod integer_indexed;
pub(crate) mod proxy;
pub(crate) mod string;

pub(crate) use array::ARRAY_EXOTIC_INTERNAL_METHODS;
pub(crate) use integer_indexed::INTEGER_INDEXED_EXOTIC_INTERNAL_METHODS;
pub(crate) use proxy::PROXY_EXOTIC_INTERNAL_METHODS;
pub(crate) use string::STRING_EXOTIC_INTERNAL_METHODS;

impl JsObject {
    /// Check if object has property.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-hasproperty
    #[inline]
    pub fn has_property<K>(&self, key: K, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
    {
        // 1. Return ? O.[[HasProperty]](P).
        self.__has_property__(&key.into(), context)
    }

    /// Check if it is extensible.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isextensible-o
    #[inline]
    pub fn is_extensible(&self, context: &mut Context) -> JsResult<bool> {
        // 1. Return ? O.[[IsExtensible]]().
        self.__is_extensible__(context)
    }

    /// Deletes the property or throws a `TypeError` if the operation fails.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-deletepropertyorthrow
    #[inline]
    pub fn delete_property_or_throw<K>(&self, key: K, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
    {
        let key = key.into();
        // 1. Let success be ? O.[[Delete]](P).
        let success = self.__delete__(&key, context)?;
        // 2. If success is false, throw a TypeError exception.
        if !success {
            return Err(context.construct_type_error(format!("cannot delete property: {key}")));
        }
        // 3. Return success.
        Ok(success)
    }

    /// Check if object has an own property.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-hasownproperty
    #[inline]
    pub fn has_own_property<K>(&self, key: K, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
    {
        let key = key.into();
        // 1. Let desc be ? O.[[GetOwnProperty]](P).
        let desc = self.__get_own_property__(&key, context)?;
        // 2. If desc is undefined, return false; otherwise return true.
        Ok(desc.is_some())
    }

    /// Get property from object or throw.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-o-p
    #[inline]
    pub fn get<K>(&self, key: K, context: &mut Context) -> JsResult<JsValue>
    where
        K: Into<PropertyKey>,
    {
        // 1. Return ? O.[[Get]](P, O).
        self.__get__(&key.into(), self.clone().into(), context)
    }

    /// Set property of object, or throw if `throw` is set.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set-o-p-v-throw
    #[inline]
    pub fn set<K, V>(&self, key: K, value: V, throw: bool, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        let key = key.into();
        // 1. Let success be ? O.[[Set]](P, V, O).
        let success = self.__set__(key.clone(), value.into(), self.clone().into(), context)?;
        // 2. If success is false and Throw is true, throw a TypeError exception.
        if !success && throw {
            return Err(
                context.construct_type_error(format!("cannot set non-writable property: {key}"))
            );
        }
        // 3. Return success.
        Ok(success)
    }

    /// Define property or throw.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-definepropertyorthrow
    #[inline]
    pub fn define_property_or_throw<K, P>(
        &self,
        key: K,
        desc: P,
        context: &mut Context,
    ) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        let key = key.into();
        // 1. Let success be ? O.[[DefineOwnProperty]](P, desc).
        let success = self.__define_own_property__(key.clone(), desc.into(), context)?;
        // 2. If success is false, throw a TypeError exception.
        if !success {
            return Err(context.construct_type_error(format!("cannot redefine property: {key}")));
        }
        // 3. Return success.
        Ok(success)
    }

    /// Create a data property.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createdataproperty
    pub fn create_data_property<K, V>(
        &self,
        key: K,
        value: V,
        context: &mut Context,
    ) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]: true,
        //    [[Enumerable]]: true, [[Configurable]]: true }.
        let new_desc = PropertyDescriptor::builder()
            .value(value)
            .writable(true)
            .enumerable(true)
            .configurable(true);
        // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
        self.__define_own_property__(key.into(), new_desc.into(), context)
    }

    /// Create a data property, or throw.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createdatapropertyorthrow
    pub fn create_data_property_or_throw<K, V>(
        &self,
        key: K,
        value: V,
        context: &mut Context,
    ) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        let key = key.into();
        // 1. Let success be ? CreateDataProperty(O, P, V).
        let success = self.create_data_property(key.clone(), value, context)?;
        // 2. If success is false, throw a TypeError exception.
        if !success {
            return Err(context.construct_type_error(format!("cannot redefine property: {key}")));
        }
        // 3. Return success.
        Ok(success)
    }

    /// Helper function for property insertion that bypasses
    /// `[[DefineOwnProperty]]`, used to set up exotic and built-in objects.
    #[inline]
    #[track_caller]
    pub(crate) fn insert<K, P>(&self, key: K, property: P) -> bool
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        self.borrow_mut().insert(key, property)
    }

    /// Helper function for property removal that bypasses `[[Delete]]`.
    #[inline]
    #[track_caller]
    pub(crate) fn remove(&self, key: &PropertyKey) -> bool {
        self.borrow_mut().remove(key)
    }

    /// `[[GetPrototypeOf]]`
    #[inline]
    #[track_caller]
    pub fn __get_prototype_of__(&self, context: &mut Context) -> JsResult<JsValue> {
        let _timer = Profiler::global().start_event("Object::__get_prototype_of__", "object");
        let func = self.borrow().data.internal_methods.__get_prototype_of__;
        func(self, context)
    }

    /// `[[SetPrototypeOf]]`
    #[inline]
    pub fn __set_prototype_of__(&self, val: JsValue, context: &mut Context) -> JsResult<bool> {
        let _timer = Profiler::global().start_event("Object::__set_prototype_of__", "object");
        let func = self.borrow().data.internal_methods.__set_prototype_of__;
        func(self, val, context)
    }

    /// `[[IsExtensible]]`
    #[inline]
    pub fn __is_extensible__(&self, context: &mut Context) -> JsResult<bool> {
        let func = self.borrow().data.internal_methods.__is_extensible__;
        func(self, context)
    }

    /// `[[PreventExtensions]]`
    #[inline]
    pub fn __prevent_extensions__(&self, context: &mut Context) -> JsResult<bool> {
        let func = self.borrow().data.internal_methods.__prevent_extensions__;
        func(self, context)
    }

    /// `[[GetOwnProperty]]`
    #[inline]
    pub fn __get_own_property__(
        &self,
        key: &PropertyKey,
        context: &mut Context,
    ) -> JsResult<Option<PropertyDescriptor>> {
        let _timer = Profiler::global().start_event("Object::__get_own_property__", "object");
        let func = self.borrow().data.internal_methods.__get_own_property__;
        func(self, key, context)
    }

    /// `[[DefineOwnProperty]]`
    #[inline]
    pub fn __define_own_property__(
        &self,
        key: PropertyKey,
        desc: PropertyDescriptor,
        context: &mut Context,
    ) -> JsResult<bool> {
        let _timer = Profiler::global().start_event("Object::__define_own_property__", "object");
        let func = self.borrow().data.internal_methods.__define_own_property__;
        func(self, key, desc, context)
    }

    /// `[[HasProperty]]`
    #[inline]
    pub fn __has_property__(&self, key: &PropertyKey, context: &mut Context) -> JsResult<bool> {
        context.enter_nested()?;
        let func = self.borrow().data.internal_methods.__has_property__;
        let result = func(self, key, context);
        context.leave_nested();
        result
    }

    /// `[[Get]]`
    pub fn __get__(
        &self,
        key: &PropertyKey,
        receiver: JsValue,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let _timer = Profiler::global().start_event("Object::__get__", "object");
        context.enter_nested()?;
        let func = self.borrow().data.internal_methods.__get__;
        let result = func(self, key, receiver, context);
        context.leave_nested();
        result
    }

    /// `[[Set]]`
    pub fn __set__(
        &self,
        key: PropertyKey,
        value: JsValue,
        receiver: JsValue,
        context: &mut Context,
    ) -> JsResult<bool> {
        let _timer = Profiler::global().start_event("Object::__set__", "object");
        context.enter_nested()?;
        let func = self.borrow().data.internal_methods.__set__;
        let result = func(self, key, value, receiver, context);
        context.leave_nested();
        result
    }

    /// `[[Delete]]`
    #[inline]
    pub fn __delete__(&self, key: &PropertyKey, context: &mut Context) -> JsResult<bool> {
        let func = self.borrow().data.internal_methods.__delete__;
        func(self, key, context)
    }

    /// `[[OwnPropertyKeys]]`
    #[inline]
    pub fn __own_property_keys__(&self, context: &mut Context) -> JsResult<Vec<PropertyKey>> {
        let func = self.borrow().data.internal_methods.__own_property_keys__;
        func(self, context)
    }
}

/// The internal method table of an object.
///
/// Every exotic kind fills this table with a mix of `ordinary_*` functions
/// and its own overrides; the set of tables is closed and `'static`.
#[derive(Clone, Copy, Debug)]
#[allow(clippy::type_complexity)]
pub(crate) struct InternalObjectMethods {
    pub(crate) __get_prototype_of__: fn(&JsObject, &mut Context) -> JsResult<JsValue>,
    pub(crate) __set_prototype_of__: fn(&JsObject, JsValue, &mut Context) -> JsResult<bool>,
    pub(crate) __is_extensible__: fn(&JsObject, &mut Context) -> JsResult<bool>,
    pub(crate) __prevent_extensions__: fn(&JsObject, &mut Context) -> JsResult<bool>,
    pub(crate) __get_own_property__:
        fn(&JsObject, &PropertyKey, &mut Context) -> JsResult<Option<PropertyDescriptor>>,
    pub(crate) __define_own_property__:
        fn(&JsObject, PropertyKey, PropertyDescriptor, &mut Context) -> JsResult<bool>,
    pub(crate) __has_property__: fn(&JsObject, &PropertyKey, &mut Context) -> JsResult<bool>,
    pub(crate) __get__: fn(&JsObject, &PropertyKey, JsValue, &mut Context) -> JsResult<JsValue>,
    pub(crate) __set__:
        fn(&JsObject, PropertyKey, JsValue, JsValue, &mut Context) -> JsResult<bool>,
    pub(crate) __delete__: fn(&JsObject, &PropertyKey, &mut Context) -> JsResult<bool>,
    pub(crate) __own_property_keys__: fn(&JsObject, &mut Context) -> JsResult<Vec<PropertyKey>>,
}

/// The internal method table of ordinary objects.
pub(crate) static ORDINARY_INTERNAL_METHODS: InternalObjectMethods = InternalObjectMethods {
    __get_prototype_of__: ordinary_get_prototype_of,
    __set_prototype_of__: ordinary_set_prototype_of,
    __is_extensible__: ordinary_is_extensible,
    __prevent_extensions__: ordinary_prevent_extensions,
    __get_own_property__: ordinary_get_own_property,
    __define_own_property__: ordinary_define_own_property,
    __has_property__: ordinary_has_property,
    __get__: ordinary_get,
    __set__: ordinary_set,
    __delete__: ordinary_delete,
    __own_property_keys__: ordinary_own_property_keys,
};

/// `OrdinaryGetPrototypeOf`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-getprototypeof
#[inline]
pub(crate) fn ordinary_get_prototype_of(
    obj: &JsObject,
    _context: &mut Context,
) -> JsResult<JsValue> {
    // 1. Return O.[[Prototype]].
    Ok(obj.borrow().prototype().clone())
}

/// `OrdinarySetPrototypeOf`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-setprototypeof-v
pub(crate) fn ordinary_set_prototype_of(
    obj: &JsObject,
    val: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    debug_assert!(val.is_object() || val.is_null());

    // 1. Let current be O.[[Prototype]].
    let current = obj.__get_prototype_of__(context)?;

    // 2. If SameValue(V, current) is true, return true.
    if JsValue::same_value(&current, &val) {
        return Ok(true);
    }

    // 3. Let extensible be O.[[Extensible]].
    // 4. If extensible is false, return false.
    if !obj.__is_extensible__(context)? {
        return Ok(false);
    }

    // 5. Let p be V.
    let mut p = val.clone();

    // 6 - 7. Walk the candidate chain; if O appears, setting V would create
    // a cycle, so refuse. The loop stops at the first exotic prototype
    // handler, which is allowed to hide arbitrary graphs behind traps.
    let mut done = false;
    while !done {
        match p {
            JsValue::Null => done = true,
            JsValue::Object(ref proto) => {
                if JsObject::equals(proto, obj) {
                    return Ok(false);
                } else if proto.borrow().data.internal_methods.__get_prototype_of__ as usize
                    != ordinary_get_prototype_of as usize
                {
                    done = true;
                } else {
                    p = proto.__get_prototype_of__(context)?;
                }
            }
            _ => unreachable!("prototype must be an object or null"),
        }
    }

    // 8. Set O.[[Prototype]] to V.
    obj.borrow_mut().set_prototype_instance(val);

    // 9. Return true.
    Ok(true)
}

/// `OrdinaryIsExtensible`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-isextensible
#[inline]
pub(crate) fn ordinary_is_extensible(obj: &JsObject, _context: &mut Context) -> JsResult<bool> {
    // 1. Return O.[[Extensible]].
    Ok(obj.borrow().extensible())
}

/// `OrdinaryPreventExtensions`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-preventextensions
#[inline]
pub(crate) fn ordinary_prevent_extensions(
    obj: &JsObject,
    _context: &mut Context,
) -> JsResult<bool> {
    // 1. Set O.[[Extensible]] to false.
    obj.borrow_mut().set_extensible(false);

    // 2. Return true.
    Ok(true)
}

/// `OrdinaryGetOwnProperty`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-getownproperty-p
#[inline]
pub(crate) fn ordinary_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    _context: &mut Context,
) -> JsResult<Option<PropertyDescriptor>> {
    // 1. If O does not have an own property with key P, return undefined.
    // 2 - 9. Reify the stored property as a complete descriptor.
    Ok(obj.borrow().properties().get(key))
}

/// `OrdinaryDefineOwnProperty`, which folds in
/// `ValidateAndApplyPropertyDescriptor`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-defineownproperty-p-desc
pub(crate) fn ordinary_define_own_property(
    obj: &JsObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    // 2. Let extensible be ? IsExtensible(O).
    let extensible = obj.__is_extensible__(context)?;

    let mut current = if let Some(own) = obj.__get_own_property__(&key, context)? {
        own
    } else {
        // ValidateAndApplyPropertyDescriptor, step 2: current is undefined.
        if !extensible {
            return Ok(false);
        }

        obj.borrow_mut().properties_mut().insert(
            &key,
            if desc.is_generic_descriptor() || desc.is_data_descriptor() {
                desc.into_data_defaulted()
            } else {
                desc.into_accessor_defaulted()
            },
        );

        return Ok(true);
    };

    // 3. If every field in Desc is absent, return true.
    if desc.is_empty() {
        return Ok(true);
    }

    // 4. If current.[[Configurable]] is false, then
    if !current.expect_configurable() {
        // a. If Desc.[[Configurable]] is present and its value is true, return false.
        if matches!(desc.configurable(), Some(true)) {
            return Ok(false);
        }

        // b. If Desc.[[Enumerable]] is present and SameValue(Desc.[[Enumerable]],
        //    current.[[Enumerable]]) is false, return false.
        if matches!(desc.enumerable(), Some(desc_enum) if desc_enum != current.expect_enumerable())
        {
            return Ok(false);
        }
    }

    // 5. Validate the kind-specific fields.
    if desc.is_generic_descriptor() {
        // no further validation is required
    } else if current.is_data_descriptor() != desc.is_data_descriptor() {
        // 6. Else if SameType(IsDataDescriptor(current), IsDataDescriptor(Desc)) is false:
        // a. If current.[[Configurable]] is false, return false.
        if !current.expect_configurable() {
            return Ok(false);
        }
        // b - c. Convert the property from one kind to the other, keeping the
        // shared attributes.
        if current.is_data_descriptor() {
            current = current.into_accessor_defaulted();
        } else {
            current = current.into_data_defaulted();
        }
    } else if current.is_data_descriptor() && desc.is_data_descriptor() {
        // 7. Else if IsDataDescriptor(current) and IsDataDescriptor(Desc) are both true:
        // a. If current.[[Configurable]] and current.[[Writable]] are both false, then
        if !current.expect_configurable() && !current.expect_writable() {
            // i. If Desc.[[Writable]] is present and Desc.[[Writable]] is true, return false.
            if matches!(desc.writable(), Some(true)) {
                return Ok(false);
            }
            // ii. If Desc.[[Value]] is present and SameValue(Desc.[[Value]],
            //     current.[[Value]]) is false, return false.
            if matches!(desc.value(), Some(value) if !JsValue::same_value(value, current.expect_value()))
            {
                return Ok(false);
            }
            // iii. Return true.
            return Ok(true);
        }
    } else if !current.expect_configurable() {
        // 8. Else: both are accessor descriptors and current is non-configurable.
        // a. If Desc.[[Set]] is present and SameValue(Desc.[[Set]], current.[[Set]])
        //    is false, return false.
        if matches!(desc.set(), Some(set) if !JsValue::same_value(set, current.expect_set())) {
            return Ok(false);
        }
        // b. Same for [[Get]].
        if matches!(desc.get(), Some(get) if !JsValue::same_value(get, current.expect_get())) {
            return Ok(false);
        }
        // c. Return true.
        return Ok(true);
    }

    // 9. Apply every present field of Desc to current, and store it.
    current.fill_with(&desc);
    obj.borrow_mut().properties_mut().insert(&key, current);

    Ok(true)
}

/// `OrdinaryHasProperty`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-hasproperty-p
pub(crate) fn ordinary_has_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    // 2. If hasOwn is not undefined, return true.
    if obj.__get_own_property__(key, context)?.is_some() {
        return Ok(true);
    }

    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    let parent = obj.__get_prototype_of__(context)?;

    // 4. If parent is not null, return ? parent.[[HasProperty]](P).
    if let JsValue::Object(ref parent) = parent {
        // A cyclic prototype graph (reachable through exotic prototype
        // handlers) answers "not found" instead of recursing forever.
        if !context.enter_prototype_chain(parent) {
            return Ok(false);
        }
        let result = parent.__has_property__(key, context);
        context.leave_prototype_chain(parent);
        return result;
    }

    // 5. Return false.
    Ok(false)
}

/// `OrdinaryGet`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-get-p-receiver
pub(crate) fn ordinary_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    match obj.__get_own_property__(key, context)? {
        // 2. If desc is undefined, then
        None => {
            // a. Let parent be ? O.[[GetPrototypeOf]]().
            let parent = obj.__get_prototype_of__(context)?;
            if let Some(parent) = parent.as_object() {
                if !context.enter_prototype_chain(parent) {
                    return Ok(JsValue::undefined());
                }
                // c. Return ? parent.[[Get]](P, Receiver). The receiver is
                // threaded unchanged down the chain.
                let result = parent.__get__(key, receiver, context);
                context.leave_prototype_chain(parent);
                result
            } else {
                // b. If parent is null, return undefined.
                Ok(JsValue::undefined())
            }
        }
        Some(ref desc) => match desc.kind() {
            // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
            DescriptorKind::Data {
                value: Some(value), ..
            } => Ok(value.clone()),
            // 5. Let getter be desc.[[Get]].
            // 7. Return ? Call(getter, Receiver).
            DescriptorKind::Accessor { get: Some(get), .. } if !get.is_undefined() => {
                context.call(get, &receiver, &[])
            }
            // 6. If getter is undefined, return undefined.
            _ => Ok(JsValue::undefined()),
        },
    }
}

/// `OrdinarySet`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-set-p-v-receiver
pub(crate) fn ordinary_set(
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    // OrdinarySetWithOwnDescriptor:
    // 1. Let ownDesc be ? O.[[GetOwnProperty]](P).
    let own_desc = if let Some(desc) = obj.__get_own_property__(&key, context)? {
        desc
    } else if let JsValue::Object(ref parent) = obj.__get_prototype_of__(context)? {
        // 2.a. Return ? parent.[[Set]](P, V, Receiver).
        if !context.enter_prototype_chain(parent) {
            return Ok(false);
        }
        let result = parent.__set__(key, value, receiver, context);
        context.leave_prototype_chain(parent);
        return result;
    } else {
        // 2.b. ownDesc := { [[Value]]: undefined, [[Writable]]: true,
        //      [[Enumerable]]: true, [[Configurable]]: true }.
        PropertyDescriptor::builder()
            .value(JsValue::undefined())
            .writable(true)
            .enumerable(true)
            .configurable(true)
            .build()
    };

    // 3. If IsDataDescriptor(ownDesc) is true, then
    if own_desc.is_data_descriptor() {
        // a. If ownDesc.[[Writable]] is false, return false.
        if !own_desc.expect_writable() {
            return Ok(false);
        }

        // b. If Type(Receiver) is not Object, return false.
        let receiver = match receiver.as_object() {
            Some(receiver) => receiver.clone(),
            _ => return Ok(false),
        };

        // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
        if let Some(ref existing_desc) = receiver.__get_own_property__(&key, context)? {
            // d.i. If IsAccessorDescriptor(existingDescriptor) is true, return false.
            if existing_desc.is_accessor_descriptor() {
                return Ok(false);
            }
            // d.ii. If existingDescriptor.[[Writable]] is false, return false.
            if !existing_desc.expect_writable() {
                return Ok(false);
            }

            // d.iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
            receiver.__define_own_property__(
                key,
                PropertyDescriptor::builder().value(value).build(),
                context,
            )
        } else {
            // e. Else: Return ? CreateDataProperty(Receiver, P, V).
            receiver.create_data_property(key, value, context)
        }
    } else {
        // 4. Assert: IsAccessorDescriptor(ownDesc) is true.
        // 5. Let setter be ownDesc.[[Set]].
        match own_desc.set() {
            Some(set) if !set.is_undefined() => {
                // 7. Perform ? Call(setter, Receiver, « V »).
                context.call(set, &receiver, &[value])?;

                // 8. Return true.
                Ok(true)
            }
            // 6. If setter is undefined, return false.
            _ => Ok(false),
        }
    }
}

/// `OrdinaryDelete`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-delete-p
pub(crate) fn ordinary_delete(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    Ok(match obj.__get_own_property__(key, context)? {
        // 4. If desc.[[Configurable]] is true, then remove the property.
        Some(desc) if desc.expect_configurable() => {
            obj.remove(key);
            true
        }
        // 5. Return false.
        Some(_) => false,
        // 2. If desc is undefined, return true.
        None => true,
    })
}

/// `OrdinaryOwnPropertyKeys`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-ownpropertykeys
#[inline]
pub(crate) fn ordinary_own_property_keys(
    obj: &JsObject,
    _context: &mut Context,
) -> JsResult<Vec<PropertyKey>> {
    // 1 - 4. Integer indices in ascending order, then strings and symbols in
    // property creation order.
    Ok(obj.borrow().properties().keys())
}
