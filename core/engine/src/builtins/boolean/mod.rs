//! This module implements the `Boolean` wrapper object.

use crate::{
    builtins::function::{make_constructor_fn, ordinary_create_from_constructor},
    context::{Context, StandardObjects},
    object::ObjectData,
    value::JsValue,
    JsResult,
};

/// The `Boolean` constructor.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-boolean-constructor-boolean-value
fn constructor(new_target: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    // 1. Let b be ! ToBoolean(value).
    let boolean = args.first().map_or(false, JsValue::to_boolean);

    // 2. If NewTarget is undefined, return b.
    if new_target.is_undefined() {
        return Ok(boolean.into());
    }

    // 3 - 5. OrdinaryCreateFromConstructor with [[BooleanData]] set to b.
    let object = ordinary_create_from_constructor(
        new_target,
        StandardObjects::boolean_object,
        ObjectData::boolean(boolean),
        context,
    )?;
    Ok(object.into())
}

/// Initialize the `Boolean` constructor and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().boolean_object().clone();
    let object_prototype = context.standard_objects().object_object().prototype();

    standard
        .prototype()
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    make_constructor_fn(
        "Boolean",
        1,
        constructor,
        &standard.constructor(),
        &standard.prototype(),
        context,
    );

    context.register_global_builtin("Boolean", standard.constructor());
}
