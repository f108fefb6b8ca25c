//! This module implements the global `BigInt` function.

use crate::{
    bigint::JsBigInt,
    builtins::function::make_constructor_fn,
    context::Context,
    value::{JsValue, PreferredType},
    JsResult,
};

/// The `BigInt` function.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-bigint-constructor-number-value
fn constructor(new_target: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    // 1. If NewTarget is not undefined, throw a TypeError exception.
    if !new_target.is_undefined() {
        return Err(context.construct_type_error("BigInt is not a constructor"));
    }

    let value = args.first().cloned().unwrap_or_default();

    // 2. Let prim be ? ToPrimitive(value, number).
    let primitive = value.to_primitive(context, PreferredType::Number)?;

    // 3. If Type(prim) is Number, return ? NumberToBigInt(prim).
    if let Some(number) = primitive.as_number() {
        return JsBigInt::try_from(number).map(JsValue::from).map_err(|_| {
            context.construct_range_error(
                "cannot convert a non-integral Number to a BigInt",
            )
        });
    }

    // 4. Otherwise, return ? ToBigInt(prim).
    Ok(primitive.to_bigint(context)?.into())
}

/// Initialize the `BigInt` function and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().bigint_object().clone();
    let object_prototype = context.standard_objects().object_object().prototype();

    standard
        .prototype()
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    make_constructor_fn(
        "BigInt",
        1,
        constructor,
        &standard.constructor(),
        &standard.prototype(),
        context,
    );

    context.register_global_builtin("BigInt", standard.constructor());
}
