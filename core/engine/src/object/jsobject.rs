//! This module implements the `JsObject` structure.
//!
//! The `JsObject` is a garbage collected handle to an [`Object`]; cloning it
//! clones the handle, and identity (`===`) is identity of the allocation.

use super::{Object, ObjectKind, PropertyMap};
use crate::{
    builtins::{array::Array, function::Function, proxy::Proxy},
    context::Context,
    gc::{Finalize, Gc, Trace},
    property::{PropertyDescriptor, PropertyKey, PropertyNameKind},
    value::{JsValue, Type},
    JsResult,
};
use std::{
    fmt::{self, Debug},
    result::Result as StdResult,
};

/// A wrapper type for an immutably borrowed `Object`.
pub type Ref<'a, T> = crate::gc::Ref<'a, T>;

/// A wrapper type for a mutably borrowed `Object`.
pub type RefMut<'a, T> = crate::gc::RefMut<'a, T>;

/// Garbage collected `Object`.
#[derive(Trace, Finalize, Clone, Default)]
pub struct JsObject(Gc<crate::gc::Cell<Object>>);

/// The body of a function object, cloned out of the borrow before invocation
/// so that re-entrant property access does not observe a locked object.
enum FunctionBody {
    Native(crate::builtins::function::NativeFunction),
    Closure {
        function: std::rc::Rc<crate::builtins::function::ClosureFunction>,
        captures: JsValue,
    },
    Proxy,
}

/// The integrity level to pass to [`JsObject::set_integrity_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityLevel {
    /// `Object.seal`: every own property becomes non-configurable.
    Sealed,
    /// `Object.freeze`: additionally, every own data property becomes
    /// non-writable.
    Frozen,
}

impl JsObject {
    /// Create a new `JsObject` from an `Object`.
    #[inline]
    pub fn new(object: Object) -> Self {
        Self(Gc::new(crate::gc::Cell::new(object)))
    }

    /// Create a new object with the given prototype and object data.
    ///
    /// Array kinds get dense element storage; every other kind starts with
    /// plain shape storage.
    pub fn from_proto_and_data(prototype: JsValue, data: super::ObjectData) -> Self {
        debug_assert!(prototype.is_null() || prototype.is_object());
        let mut object = Object::new();
        if matches!(data.kind, ObjectKind::Array) {
            *object.properties_mut() = PropertyMap::dense();
        }
        object.data = data;
        object.set_prototype_instance(prototype);
        Self::new(object)
    }

    /// Immutably borrows the `Object`.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently mutably borrowed.
    #[inline]
    #[track_caller]
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.try_borrow().expect("Object already mutably borrowed")
    }

    /// Mutably borrows the `Object`.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently borrowed.
    #[inline]
    #[track_caller]
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.try_borrow_mut().expect("Object already borrowed")
    }

    /// Immutably borrows the `Object`, returning an error if the object is
    /// currently mutably borrowed.
    #[inline]
    pub fn try_borrow(&self) -> StdResult<Ref<'_, Object>, BorrowError> {
        self.0.try_borrow().map_err(|_| BorrowError)
    }

    /// Mutably borrows the `Object`, returning an error if the object is
    /// currently borrowed.
    #[inline]
    pub fn try_borrow_mut(&self) -> StdResult<RefMut<'_, Object>, BorrowMutError> {
        self.0.try_borrow_mut().map_err(|_| BorrowMutError)
    }

    /// Checks if the garbage collected memory is the same.
    #[inline]
    pub fn equals(lhs: &Self, rhs: &Self) -> bool {
        std::ptr::eq(lhs.as_ref(), rhs.as_ref())
    }
}

impl PartialEq for JsObject {
    fn eq(&self, other: &Self) -> bool {
        Self::equals(self, other)
    }
}

impl JsObject {
    /// Internal method `[[Call]]`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ecmascript-function-objects-call-thisargument-argumentslist
    pub fn call(&self, this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        context.enter_nested()?;
        // The callee starts a fresh chain walk; it must not inherit the
        // visited set of whatever lookup invoked it.
        let chain = context.take_prototype_chain();
        let result = self.call_internal(this, args, context);
        context.restore_prototype_chain(chain);
        context.leave_nested();
        result
    }

    fn call_internal(
        &self,
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let body = self.function_body(false, context)?;
        match body {
            FunctionBody::Native(function) => function(this, args, context),
            FunctionBody::Closure { function, captures } => {
                function(this, args, &captures, context)
            }
            FunctionBody::Proxy => Proxy::call(self, this, args, context),
        }
    }

    /// Internal method `[[Construct]]`.
    ///
    /// The convention for native constructors follows the built-in pattern:
    /// the function receives `new_target` in the `this` position and
    /// allocates the instance itself, resolving `new_target.prototype` before
    /// the allocation.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ecmascript-function-objects-construct-argumentslist-newtarget
    pub fn construct(
        &self,
        args: &[JsValue],
        new_target: &JsValue,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        context.enter_nested()?;
        let chain = context.take_prototype_chain();
        let result = self.construct_internal(args, new_target, context);
        context.restore_prototype_chain(chain);
        context.leave_nested();
        result
    }

    fn construct_internal(
        &self,
        args: &[JsValue],
        new_target: &JsValue,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let body = self.function_body(true, context)?;
        match body {
            FunctionBody::Native(function) => function(new_target, args, context),
            FunctionBody::Closure { function, captures } => {
                function(new_target, args, &captures, context)
            }
            FunctionBody::Proxy => Proxy::construct(self, args, new_target, context),
        }
    }

    /// Clone the invocable body out of the object, failing with a `TypeError`
    /// when the object is not callable (or not a constructor).
    fn function_body(&self, construct: bool, context: &mut Context) -> JsResult<FunctionBody> {
        let object = self.borrow();
        match &object.data.kind {
            ObjectKind::Function(function) => {
                if construct && !function.is_constructor() {
                    drop(object);
                    return Err(context.construct_type_error("not a constructor"));
                }
                match function {
                    Function::Native { function, .. } => Ok(FunctionBody::Native(*function)),
                    Function::Closure {
                        function, captures, ..
                    } => Ok(FunctionBody::Closure {
                        function: function.clone(),
                        captures: captures.clone(),
                    }),
                }
            }
            ObjectKind::Proxy(proxy) => {
                let valid = if construct {
                    proxy.is_constructor()
                } else {
                    proxy.is_callable()
                };
                if valid {
                    Ok(FunctionBody::Proxy)
                } else {
                    drop(object);
                    Err(context.construct_type_error(if construct {
                        "not a constructor"
                    } else {
                        "not a function"
                    }))
                }
            }
            _ => {
                drop(object);
                Err(context.construct_type_error(if construct {
                    "not a constructor"
                } else {
                    "not a function"
                }))
            }
        }
    }

    /// It determines if the object is a callable function with a `[[Call]]` internal method.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-iscallable
    #[inline]
    #[track_caller]
    pub fn is_callable(&self) -> bool {
        self.borrow().is_callable()
    }

    /// It determines if the object is a function object with a `[[Construct]]` internal method.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isconstructor
    #[inline]
    #[track_caller]
    pub fn is_constructor(&self) -> bool {
        self.borrow().is_constructor()
    }

    /// The abstract operation `IsArray`, which pierces proxies.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isarray
    pub fn is_array_abstract(&self, context: &mut Context) -> JsResult<bool> {
        if self.borrow().is_array() {
            return Ok(true);
        }
        let proxy_target = match self.borrow().as_proxy() {
            Some(proxy) => Some(proxy.try_data(context)?.0),
            None => None,
        };
        match proxy_target {
            Some(target) => target.is_array_abstract(context),
            None => Ok(false),
        }
    }

    /// The abstract operation `SetIntegrityLevel`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-setintegritylevel
    pub fn set_integrity_level(
        &self,
        level: IntegrityLevel,
        context: &mut Context,
    ) -> JsResult<bool> {
        // 3. Let status be ? O.[[PreventExtensions]]().
        let status = self.__prevent_extensions__(context)?;
        // 4. If status is false, return false.
        if !status {
            return Ok(false);
        }

        // 5. Let keys be ? O.[[OwnPropertyKeys]]().
        let keys = self.__own_property_keys__(context)?;

        match level {
            // 6. If level is sealed, then
            IntegrityLevel::Sealed => {
                // a. For each element k of keys, do
                for key in keys {
                    // i. Perform ? DefinePropertyOrThrow(O, k, PropertyDescriptor { [[Configurable]]: false }).
                    self.define_property_or_throw(
                        key,
                        PropertyDescriptor::builder().configurable(false),
                        context,
                    )?;
                }
                self.borrow_mut().set_sealed();
            }
            // 7. Else,
            IntegrityLevel::Frozen => {
                // a. For each element k of keys, do
                for key in keys {
                    // i. Let currentDesc be ? O.[[GetOwnProperty]](k).
                    let current = self.__get_own_property__(&key, context)?;
                    // ii. If currentDesc is not undefined, then
                    if let Some(current) = current {
                        // 1 - 2: accessor properties only lose configurability,
                        // data properties also lose writability.
                        let desc = if current.is_accessor_descriptor() {
                            PropertyDescriptor::builder().configurable(false).build()
                        } else {
                            PropertyDescriptor::builder()
                                .configurable(false)
                                .writable(false)
                                .build()
                        };
                        // 3. Perform ? DefinePropertyOrThrow(O, k, desc).
                        self.define_property_or_throw(key, desc, context)?;
                    }
                }
                self.borrow_mut().set_frozen();
            }
        }

        // 8. Return true.
        Ok(true)
    }

    /// The abstract operation `TestIntegrityLevel`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-testintegritylevel
    pub fn test_integrity_level(
        &self,
        level: IntegrityLevel,
        context: &mut Context,
    ) -> JsResult<bool> {
        // 1. Let extensible be ? IsExtensible(O).
        // 2. If extensible is true, return false.
        if self.__is_extensible__(context)? {
            return Ok(false);
        }

        // 4. Let keys be ? O.[[OwnPropertyKeys]]().
        // 5. For each element k of keys, do
        for key in self.__own_property_keys__(context)? {
            // a. Let currentDesc be ? O.[[GetOwnProperty]](k).
            if let Some(desc) = self.__get_own_property__(&key, context)? {
                // b.i. If currentDesc.[[Configurable]] is true, return false.
                if desc.expect_configurable() {
                    return Ok(false);
                }
                // b.ii. If level is frozen and IsDataDescriptor(currentDesc) is true, then
                if level == IntegrityLevel::Frozen
                    && desc.is_data_descriptor()
                    && desc.expect_writable()
                {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Abstract operation `EnumerableOwnPropertyNames`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-enumerableownpropertynames
    pub(crate) fn enumerable_own_property_names(
        &self,
        kind: PropertyNameKind,
        context: &mut Context,
    ) -> JsResult<Vec<JsValue>> {
        // 1. Let ownKeys be ? O.[[OwnPropertyKeys]]().
        let own_keys = self.__own_property_keys__(context)?;
        // 2. Let properties be a new empty List.
        let mut properties = vec![];

        // 3. For each element key of ownKeys, do
        for key in own_keys {
            // a. If Type(key) is String, then
            let key_str = match &key {
                PropertyKey::String(string) => Some(string.clone()),
                PropertyKey::Index(index) => Some(index.to_string().into()),
                PropertyKey::Symbol(_) => None,
            };

            if let Some(key_str) = key_str {
                // i. Let desc be ? O.[[GetOwnProperty]](key).
                let desc = self.__get_own_property__(&key, context)?;
                // ii. If desc is not undefined and desc.[[Enumerable]] is true, then
                if let Some(desc) = desc {
                    if desc.expect_enumerable() {
                        match kind {
                            // 1. If kind is key, append key to properties.
                            PropertyNameKind::Key => properties.push(key_str.into()),
                            // 2. Else,
                            // a. Let value be ? Get(O, key).
                            PropertyNameKind::Value => {
                                properties.push(self.get(key.clone(), context)?);
                            }
                            // b. Else, entry be ! CreateArrayFromList(« key, value »).
                            PropertyNameKind::KeyAndValue => {
                                let entry = Array::create_array_from_list(
                                    [key_str.into(), self.get(key.clone(), context)?],
                                    context,
                                );
                                properties.push(entry.into());
                            }
                        }
                    }
                }
            }
        }

        // 4. Return properties.
        Ok(properties)
    }

    /// Abstract operation `LengthOfArrayLike`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-lengthofarraylike
    pub(crate) fn length_of_array_like(&self, context: &mut Context) -> JsResult<u64> {
        // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
        self.get("length", context)?.to_length(context)
    }

    /// Abstract operation `CreateListFromArrayLike`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createlistfromarraylike
    pub(crate) fn create_list_from_array_like(
        &self,
        element_types: &[Type],
        context: &mut Context,
    ) -> JsResult<Vec<JsValue>> {
        // 1. If elementTypes is not present, set elementTypes to « Undefined, Null, Boolean,
        //    String, Symbol, Number, BigInt, Object ».
        let types = if element_types.is_empty() {
            &[
                Type::Undefined,
                Type::Null,
                Type::Boolean,
                Type::String,
                Type::Symbol,
                Type::Number,
                Type::BigInt,
                Type::Object,
            ]
        } else {
            element_types
        };

        // 3. Let len be ? LengthOfArrayLike(obj).
        let len = self.length_of_array_like(context)?;

        // 4. Let list be a new empty List.
        let mut list = Vec::with_capacity(len as usize);

        // 6. Repeat, while index < len,
        for index in 0..len {
            // b. Let next be ? Get(obj, indexName).
            let next = self.get(index, context)?;
            // c. If Type(next) is not an element of elementTypes, throw a TypeError exception.
            if !types.contains(&next.get_type()) {
                return Err(
                    context.construct_type_error("array-like contains element of wrong type")
                );
            }
            // d. Append next as the last element of list.
            list.push(next);
        }

        // 7. Return list.
        Ok(list)
    }
}

impl AsRef<crate::gc::Cell<Object>> for JsObject {
    #[inline]
    fn as_ref(&self) -> &crate::gc::Cell<Object> {
        &self.0
    }
}

impl Debug for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Ok(object) = self.try_borrow() {
            f.debug_struct("JsObject")
                .field("kind", &object.kind().to_string())
                .field("properties", &object.properties().len())
                .finish()
        } else {
            f.write_str("JsObject(<borrowed>)")
        }
    }
}

/// An error returned by [`JsObject::try_borrow`](struct.JsObject.html#method.try_borrow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowError;

impl fmt::Display for BorrowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt("Object already mutably borrowed", f)
    }
}

/// An error returned by [`JsObject::try_borrow_mut`](struct.JsObject.html#method.try_borrow_mut).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowMutError;

impl fmt::Display for BorrowMutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt("Object already borrowed", f)
    }
}
