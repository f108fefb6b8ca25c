//! This module implements the global `Symbol` function.

use crate::{
    builtins::function::make_constructor_fn,
    context::Context,
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
    JsResult,
};

/// The `Symbol` function.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-symbol-description
fn constructor(new_target: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    // 1. If NewTarget is not undefined, throw a TypeError exception.
    if !new_target.is_undefined() {
        return Err(context.construct_type_error("Symbol is not a constructor"));
    }

    // 2 - 3. Let descString be undefined or ? ToString(description).
    let description = match args.first() {
        Some(value) if !value.is_undefined() => Some(value.to_string(context)?),
        _ => None,
    };

    // 4. Return a new unique Symbol value whose [[Description]] value is descString.
    Ok(context.construct_symbol(description).into())
}

/// Initialize the `Symbol` function, its well known symbol properties, and
/// register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().symbol_object().clone();
    let object_prototype = context.standard_objects().object_object().prototype();

    standard
        .prototype()
        .borrow_mut()
        .set_prototype_instance(object_prototype.into());

    make_constructor_fn(
        "Symbol",
        0,
        constructor,
        &standard.constructor(),
        &standard.prototype(),
        context,
    );

    // The well known symbols are exposed as non-writable, non-enumerable,
    // non-configurable data properties of the constructor.
    let symbols = context.well_known_symbols().clone();
    let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;
    let constructor_object = standard.constructor();
    for (name, symbol) in [
        ("asyncIterator", symbols.async_iterator_symbol()),
        ("hasInstance", symbols.has_instance_symbol()),
        ("isConcatSpreadable", symbols.is_concat_spreadable_symbol()),
        ("iterator", symbols.iterator_symbol()),
        ("match", symbols.match_symbol()),
        ("matchAll", symbols.match_all_symbol()),
        ("replace", symbols.replace_symbol()),
        ("search", symbols.search_symbol()),
        ("species", symbols.species_symbol()),
        ("split", symbols.split_symbol()),
        ("toPrimitive", symbols.to_primitive_symbol()),
        ("toStringTag", symbols.to_string_tag_symbol()),
        ("unscopables", symbols.unscopables_symbol()),
    ] {
        constructor_object.insert(
            name,
            PropertyDescriptor::builder().value(symbol).attributes(attribute),
        );
    }

    context.register_global_builtin("Symbol", constructor_object);
}
