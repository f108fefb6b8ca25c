use super::Reflect;
use crate::{
    builtins::{array::Array, function::make_builtin_fn},
    Context, JsValue,
};

fn undefined_this() -> JsValue {
    JsValue::undefined()
}

#[test]
fn get() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("p", 42, &mut context).unwrap();

    let result = Reflect::get(
        &undefined_this(),
        &[obj.into(), "p".into()],
        &mut context,
    )
    .unwrap();
    assert!(result.strict_equals(&JsValue::new(42)));
}

#[test]
fn get_requires_an_object() {
    let mut context = Context::default();

    let result = Reflect::get(&undefined_this(), &[JsValue::new(1), "p".into()], &mut context);
    assert!(result.is_err());
}

#[test]
fn set_and_has() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let set = Reflect::set(
        &undefined_this(),
        &[obj.clone().into(), "p".into(), 42.into()],
        &mut context,
    )
    .unwrap();
    assert!(set.to_boolean());

    let has = Reflect::has(
        &undefined_this(),
        &[obj.clone().into(), "p".into()],
        &mut context,
    )
    .unwrap();
    assert!(has.to_boolean());

    let missing = Reflect::has(
        &undefined_this(),
        &[obj.into(), "p2".into()],
        &mut context,
    )
    .unwrap();
    assert!(!missing.to_boolean());
}

#[test]
fn define_property_rejects_mixed_descriptors() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let getter = make_builtin_fn(|_, _, _| Ok(JsValue::new(1)), "get", 0, &mut context);

    // { value: 1, get() {} } must be rejected by ToPropertyDescriptor.
    let desc = context.construct_object();
    desc.create_data_property("value", 1, &mut context).unwrap();
    desc.create_data_property("get", getter, &mut context).unwrap();

    let result = Reflect::define_property(
        &undefined_this(),
        &[obj.into(), "p".into(), desc.into()],
        &mut context,
    );
    assert!(result.is_err());
}

#[test]
fn define_property_and_read_descriptor_back() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let desc = context.construct_object();
    desc.create_data_property("value", 42, &mut context).unwrap();

    let defined = Reflect::define_property(
        &undefined_this(),
        &[obj.clone().into(), "p".into(), desc.into()],
        &mut context,
    )
    .unwrap();
    assert!(defined.to_boolean());

    let reified = Reflect::get_own_property_descriptor(
        &undefined_this(),
        &[obj.clone().into(), "p".into()],
        &mut context,
    )
    .unwrap();
    let reified = reified.as_object().unwrap();

    // Absent fields complete to false on the way in.
    assert!(reified
        .get("value", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(42)));
    assert!(!reified.get("writable", &mut context).unwrap().to_boolean());
    assert!(!reified.get("enumerable", &mut context).unwrap().to_boolean());
    assert!(!reified.get("configurable", &mut context).unwrap().to_boolean());
}

#[test]
fn delete_property() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("p", 42, &mut context).unwrap();

    let deleted = Reflect::delete_property(
        &undefined_this(),
        &[obj.clone().into(), "p".into()],
        &mut context,
    )
    .unwrap();
    assert!(deleted.to_boolean());
    assert!(obj.get("p", &mut context).unwrap().is_undefined());
}

#[test]
fn own_keys_are_strings_and_symbols_in_order() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("b", 1, &mut context).unwrap();
    obj.create_data_property(2, 2, &mut context).unwrap();
    obj.create_data_property("a", 3, &mut context).unwrap();
    obj.create_data_property(0, 4, &mut context).unwrap();

    let keys = Reflect::own_keys(&undefined_this(), &[obj.into()], &mut context).unwrap();
    let keys = keys.as_object().unwrap();

    // Indices first (ascending, as strings), then the strings in insertion
    // order.
    let expected = ["0", "2", "b", "a"];
    for (index, expected) in expected.iter().enumerate() {
        let key = keys.get(index, &mut context).unwrap();
        assert_eq!(key.as_string().unwrap().as_str(), *expected);
    }
    assert_eq!(keys.length_of_array_like(&mut context).unwrap(), 4);
}

#[test]
fn apply() {
    let mut context = Context::default();

    let double = make_builtin_fn(
        |_, args, context| {
            let n = args
                .first()
                .cloned()
                .unwrap_or_default()
                .to_number(context)?;
            Ok(JsValue::new(n * 2.0))
        },
        "double",
        1,
        &mut context,
    );

    let args_list = Array::create_array_from_list([JsValue::new(21)], &mut context);
    let result = Reflect::apply(
        &undefined_this(),
        &[double.into(), JsValue::undefined(), args_list.into()],
        &mut context,
    )
    .unwrap();
    assert!(result.strict_equals(&JsValue::new(42.0)));
}

#[test]
fn construct_resolves_new_target_prototype_first() {
    let mut context = Context::default();

    // `Reflect.construct(Object, [], Array)` creates an ordinary object
    // whose prototype is `Array.prototype`.
    let object_ctor = context.standard_objects().object_object().constructor();
    let array_ctor = context.standard_objects().array_object().constructor();
    let array_proto = context.standard_objects().array_object().prototype();

    let args_list = Array::create_array_from_list([], &mut context);
    let result = Reflect::construct(
        &undefined_this(),
        &[object_ctor.into(), args_list.into(), array_ctor.into()],
        &mut context,
    )
    .unwrap();

    let result = result.as_object().unwrap();
    let proto = result.__get_prototype_of__(&mut context).unwrap();
    assert!(JsValue::same_value(&proto, &array_proto.into()));
}

#[test]
fn prevent_extensions_and_is_extensible() {
    let mut context = Context::default();

    let obj = context.construct_object();
    assert!(Reflect::is_extensible(&undefined_this(), &[obj.clone().into()], &mut context)
        .unwrap()
        .to_boolean());

    assert!(
        Reflect::prevent_extensions(&undefined_this(), &[obj.clone().into()], &mut context)
            .unwrap()
            .to_boolean()
    );
    assert!(!Reflect::is_extensible(&undefined_this(), &[obj.into()], &mut context)
        .unwrap()
        .to_boolean());
}

#[test]
fn set_prototype_of() {
    let mut context = Context::default();

    let proto = context.construct_object();
    let obj = context.construct_object();

    assert!(Reflect::set_prototype_of(
        &undefined_this(),
        &[obj.clone().into(), proto.clone().into()],
        &mut context,
    )
    .unwrap()
    .to_boolean());

    let result = Reflect::get_prototype_of(&undefined_this(), &[obj.into()], &mut context).unwrap();
    assert!(JsValue::same_value(&result, &proto.into()));
}
