//! This module implements the callable object kinds the core needs.
//!
//! Ordinary JavaScript function bodies are compiled and run by the external
//! executor; what the core itself requires is the minimum callable surface
//! its own algorithms invoke: getters and setters, proxy traps,
//! `@@toPrimitive` methods, and the built-in constructors. Those come in two
//! flavors, plain function pointers and closures with a traced captures
//! value.

use crate::{
    context::Context,
    gc::{custom_trace, Finalize, Trace},
    object::{JsObject, Object, ObjectData, PROTOTYPE},
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
    JsResult,
};
use std::{fmt, rc::Rc};

/// The signature of a built-in function.
///
/// When invoked through `[[Call]]`, the first argument is the `this` value;
/// when invoked through `[[Construct]]`, it is the `new_target`.
pub type NativeFunction = fn(&JsValue, &[JsValue], &mut Context) -> JsResult<JsValue>;

/// The signature of a closure function: like [`NativeFunction`], plus the
/// captures value stored in the function object.
pub type ClosureFunction =
    dyn Fn(&JsValue, &[JsValue], &JsValue, &mut Context) -> JsResult<JsValue>;

/// The callable state of a function object.
#[derive(Finalize)]
pub enum Function {
    /// A function implemented as a plain Rust function pointer.
    Native {
        /// The function itself.
        function: NativeFunction,
        /// Whether the function has a `[[Construct]]` internal method.
        constructor: bool,
    },
    /// A function implemented as a Rust closure, with a captures value that
    /// the collector can see.
    Closure {
        /// The closure itself.
        function: Rc<ClosureFunction>,
        /// Data the closure works over; passed as its third argument.
        captures: JsValue,
        /// Whether the function has a `[[Construct]]` internal method.
        constructor: bool,
    },
}

unsafe impl Trace for Function {
    custom_trace!(this, {
        match this {
            Function::Native { .. } => {}
            Function::Closure { captures, .. } => mark(captures),
        }
    });
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native { constructor, .. } => f
                .debug_struct("Native")
                .field("constructor", constructor)
                .finish(),
            Self::Closure { constructor, .. } => f
                .debug_struct("Closure")
                .field("constructor", constructor)
                .finish(),
        }
    }
}

impl Function {
    /// Whether this function has a `[[Construct]]` internal method.
    #[inline]
    pub fn is_constructor(&self) -> bool {
        match self {
            Self::Native { constructor, .. } | Self::Closure { constructor, .. } => *constructor,
        }
    }
}

/// Create a built-in function object with the conventional `length` and
/// `name` properties.
pub fn make_builtin_fn(
    function: NativeFunction,
    name: &str,
    length: usize,
    context: &mut Context,
) -> JsObject {
    let _timer = crate::profiler::Profiler::global().start_event(name, "make_builtin_fn");

    let function_prototype = context.standard_objects().function_object().prototype();
    let object = JsObject::from_proto_and_data(
        function_prototype.into(),
        ObjectData::function(Function::Native {
            function,
            constructor: false,
        }),
    );

    let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    object.insert(
        "length",
        PropertyDescriptor::builder().value(length).attributes(attribute),
    );
    object.insert(
        "name",
        PropertyDescriptor::builder().value(name).attributes(attribute),
    );

    object
}

/// Create a closure function object.
///
/// The `captures` value is stored in the function object (and traced), and
/// handed back to the closure on every call.
pub fn make_closure_fn<F>(
    function: F,
    captures: JsValue,
    name: &str,
    length: usize,
    constructor: bool,
    context: &mut Context,
) -> JsObject
where
    F: Fn(&JsValue, &[JsValue], &JsValue, &mut Context) -> JsResult<JsValue> + 'static,
{
    let function_prototype = context.standard_objects().function_object().prototype();
    let object = JsObject::from_proto_and_data(
        function_prototype.into(),
        ObjectData::function(Function::Closure {
            function: Rc::new(function),
            captures,
            constructor,
        }),
    );

    let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    object.insert(
        "length",
        PropertyDescriptor::builder().value(length).attributes(attribute),
    );
    object.insert(
        "name",
        PropertyDescriptor::builder().value(name).attributes(attribute),
    );

    object
}

/// Create a constructor function object, wiring the `constructor` ↔
/// `prototype` pair the way built-in constructors are wired.
pub(crate) fn make_constructor_fn(
    name: &str,
    length: usize,
    function: NativeFunction,
    constructor: &JsObject,
    prototype: &JsObject,
    context: &mut Context,
) {
    let function_prototype = context.standard_objects().function_object().prototype();
    {
        let mut object = constructor.borrow_mut();
        object.data = ObjectData::function(Function::Native {
            function,
            constructor: true,
        });
        object.set_prototype_instance(function_prototype.into());
    }

    let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    constructor.insert(
        "length",
        PropertyDescriptor::builder().value(length).attributes(attribute),
    );
    constructor.insert(
        "name",
        PropertyDescriptor::builder().value(name).attributes(attribute),
    );
    constructor.insert(
        PROTOTYPE,
        PropertyDescriptor::builder()
            .value(prototype.clone())
            .writable(false)
            .enumerable(false)
            .configurable(false),
    );

    prototype.insert(
        "constructor",
        PropertyDescriptor::builder()
            .value(constructor.clone())
            .writable(true)
            .enumerable(false)
            .configurable(true),
    );
}

/// The abstract operation `GetPrototypeFromConstructor`.
///
/// The `prototype` property of `new_target` is resolved *before* the caller
/// allocates its instance, so that getter side effects happen in
/// specification order.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-getprototypefromconstructor
pub(crate) fn get_prototype_from_constructor(
    new_target: &JsValue,
    default: fn(&crate::context::StandardObjects) -> &crate::context::StandardConstructor,
    context: &mut Context,
) -> JsResult<JsObject> {
    // 1 - 2. Let proto be ? Get(constructor, "prototype").
    if let Some(object) = new_target.as_object() {
        let proto = object.get(PROTOTYPE, context)?;
        // 3. If Type(proto) is Object, return proto.
        if let JsValue::Object(ref proto) = proto {
            return Ok(proto.clone());
        }
    }
    // 3 (cont.). Otherwise take the realm's default prototype for this kind.
    Ok(default(context.standard_objects()).prototype())
}

/// `Object::create` off the resolved prototype of a constructor.
pub(crate) fn ordinary_create_from_constructor(
    new_target: &JsValue,
    default: fn(&crate::context::StandardObjects) -> &crate::context::StandardConstructor,
    data: ObjectData,
    context: &mut Context,
) -> JsResult<JsObject> {
    let prototype = get_prototype_from_constructor(new_target, default, context)?;
    let mut object = Object::create(prototype.into());
    object.data = data;
    Ok(JsObject::new(object))
}
