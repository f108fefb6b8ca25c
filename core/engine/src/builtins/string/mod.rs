//! This module implements the `String` wrapper object.

use crate::{
    builtins::function::{get_prototype_from_constructor, make_constructor_fn},
    context::{Context, StandardObjects},
    object::{JsObject, ObjectData},
    property::PropertyDescriptor,
    string::JsString,
    value::JsValue,
    JsResult,
};

/// Create a `String` wrapper object over `string`, with the string exotic
/// index behaviour and the fixed `length` property.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-stringcreate
pub(crate) fn new_string_wrapper(string: JsString, prototype: JsValue) -> JsObject {
    let len = string.encode_utf16_len();
    let object = JsObject::from_proto_and_data(prototype, ObjectData::string(string));

    // 4. Set S.[[StringData]] to value; the `length` is a plain non-writable,
    //    non-enumerable, non-configurable own property.
    object.insert(
        "length",
        PropertyDescriptor::builder()
            .value(len)
            .writable(false)
            .enumerable(false)
            .configurable(false),
    );

    object
}

/// The `String` constructor.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-constructor-string-value
fn constructor(new_target: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    // 1 - 2. Compute the primitive string value.
    let string = match args.first() {
        None => JsString::default(),
        // 2.a. If NewTarget is undefined and value is a Symbol, return SymbolDescriptiveString.
        Some(JsValue::Symbol(symbol)) if new_target.is_undefined() => {
            return Ok(symbol.to_string().into())
        }
        Some(value) => value.to_string(context)?,
    };

    // 3. If NewTarget is undefined, return s.
    if new_target.is_undefined() {
        return Ok(string.into());
    }

    // 4. Return ! StringCreate(s, ? GetPrototypeFromConstructor(NewTarget, "%String.prototype%")).
    let prototype =
        get_prototype_from_constructor(new_target, StandardObjects::string_object, context)?;
    Ok(new_string_wrapper(string, prototype.into()).into())
}

/// Initialize the `String` constructor and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().string_object().clone();
    let object_prototype = context.standard_objects().object_object().prototype();

    standard
        .prototype()
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    make_constructor_fn(
        "String",
        1,
        constructor,
        &standard.constructor(),
        &standard.prototype(),
        context,
    );

    context.register_global_builtin("String", standard.constructor());
}
