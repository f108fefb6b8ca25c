//! This module implements the built-in objects the core carries.
//!
//! The set is deliberately small: the constructors whose exotic behaviour
//! the object model implements, the error hierarchy, and `Reflect`. The
//! larger standard library (`Math`, `JSON`, `Date`, `Intl`, …) belongs to
//! the embedding runtime.

pub(crate) mod array;
pub mod array_buffer;
pub(crate) mod bigint;
pub(crate) mod boolean;
pub(crate) mod error;
pub mod function;
pub(crate) mod number;
pub(crate) mod object;
pub mod proxy;
pub(crate) mod reflect;
pub(crate) mod string;
pub(crate) mod symbol;
pub mod typed_array;

pub use error::ErrorKind;
pub use function::{make_builtin_fn, make_closure_fn, NativeFunction};
pub use proxy::Proxy;
pub use typed_array::{IntegerIndexed, TypedArrayKind};

use crate::{
    context::Context,
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
};

/// Initializes the built-in objects and registers them on the global object.
pub(crate) fn init(context: &mut Context) {
    let _timer = crate::profiler::Profiler::global().start_event("builtins::init", "init");

    object::init(context);
    error::init(context);
    array::init(context);
    boolean::init(context);
    number::init(context);
    string::init(context);
    symbol::init(context);
    bigint::init(context);
    proxy::init(context);
    reflect::init(context);

    // Value properties of the global object.
    let global = context.global_object().clone();
    let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;
    global.insert(
        "undefined",
        PropertyDescriptor::builder()
            .value(JsValue::undefined())
            .attributes(attribute),
    );
    global.insert(
        "Infinity",
        PropertyDescriptor::builder()
            .value(f64::INFINITY)
            .attributes(attribute),
    );
    global.insert(
        "NaN",
        PropertyDescriptor::builder().value(f64::NAN).attributes(attribute),
    );
    global.insert(
        "globalThis",
        PropertyDescriptor::builder()
            .value(global.clone())
            .writable(true)
            .enumerable(false)
            .configurable(true),
    );
}
