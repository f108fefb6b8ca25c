//! Tests for the `Proxy` exotic object: trap dispatch, post-trap invariant
//! checks and revocation.

use crate::{
    builtins::{function::make_builtin_fn, proxy::Proxy},
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    Context, JsValue,
};

fn new_proxy(target: &JsObject, handler: &JsObject, context: &mut Context) -> JsObject {
    Proxy::create(
        &target.clone().into(),
        &handler.clone().into(),
        context,
    )
    .unwrap()
}

fn expect_type_error<T: std::fmt::Debug>(result: crate::JsResult<T>, context: &mut Context) {
    let error = result.unwrap_err();
    let name = error
        .as_object()
        .expect("thrown value must be an error object")
        .get("name", context)
        .unwrap();
    assert_eq!(name.as_string().unwrap().as_str(), "TypeError");
}

#[test]
fn proxy_requires_object_target_and_handler() {
    let mut context = Context::default();

    let obj = context.construct_object();
    expect_type_error(
        Proxy::create(&JsValue::new(1), &obj.clone().into(), &mut context),
        &mut context,
    );
    expect_type_error(
        Proxy::create(&obj.into(), &JsValue::undefined(), &mut context),
        &mut context,
    );
}

#[test]
fn empty_handler_forwards_every_operation() {
    let mut context = Context::default();

    let target = context.construct_object();
    target.create_data_property("x", 1, &mut context).unwrap();
    let handler = context.construct_object();
    let proxy = new_proxy(&target, &handler, &mut context);

    // get / has / set / delete / keys / prototype round-trip to the target.
    assert!(proxy
        .get("x", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(1)));
    assert!(proxy.has_property("x", &mut context).unwrap());
    assert!(proxy.set("y", 2, false, &mut context).unwrap());
    assert!(target
        .get("y", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(2)));

    let keys = proxy.__own_property_keys__(&mut context).unwrap();
    assert_eq!(keys, vec![PropertyKey::from("x"), PropertyKey::from("y")]);

    assert!(proxy.__delete__(&"y".into(), &mut context).unwrap());
    assert!(!target.has_own_property("y", &mut context).unwrap());

    let proto = proxy.__get_prototype_of__(&mut context).unwrap();
    let target_proto = target.__get_prototype_of__(&mut context).unwrap();
    assert!(JsValue::same_value(&proto, &target_proto));

    assert!(proxy.__is_extensible__(&mut context).unwrap());
    assert!(proxy.__prevent_extensions__(&mut context).unwrap());
    assert!(!target.__is_extensible__(&mut context).unwrap());
}

#[test]
fn get_trap_intercepts_reads() {
    let mut context = Context::default();

    let target = context.construct_object();
    target.create_data_property("x", 1, &mut context).unwrap();

    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(2)), "get", 3, &mut context);
    handler.create_data_property("get", trap, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    assert!(proxy
        .get("x", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(2)));
    // The target is untouched.
    assert!(target
        .get("x", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(1)));
}

#[test]
fn get_trap_invariant_on_non_writable_non_configurable_data() {
    let mut context = Context::default();

    // t = Object.defineProperty({}, "x", { value: 1, configurable: false, writable: false })
    let target = context.construct_object();
    target
        .define_property_or_throw(
            "x",
            PropertyDescriptor::builder()
                .value(1)
                .writable(false)
                .configurable(false)
                .enumerable(false),
            &mut context,
        )
        .unwrap();

    // p = new Proxy(t, { get: () => 2 }); p.x must throw a TypeError.
    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(2)), "get", 3, &mut context);
    handler.create_data_property("get", trap, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.get("x", &mut context), &mut context);

    // Reporting the pinned value is fine.
    let honest = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(1)), "get", 3, &mut context);
    honest.create_data_property("get", trap, &mut context).unwrap();
    let proxy = new_proxy(&target, &honest, &mut context);
    assert!(proxy
        .get("x", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(1)));
}

#[test]
fn set_trap_invariant_on_non_writable_non_configurable_data() {
    let mut context = Context::default();

    let target = context.construct_object();
    target
        .define_property_or_throw(
            "x",
            PropertyDescriptor::builder()
                .value(1)
                .writable(false)
                .configurable(false)
                .enumerable(false),
            &mut context,
        )
        .unwrap();

    // A set trap that claims success over a pinned property throws.
    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(true)), "set", 4, &mut context);
    handler.create_data_property("set", trap, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    let receiver = JsValue::new(proxy.clone());
    expect_type_error(
        proxy.__set__("x".into(), JsValue::new(2), receiver.clone(), &mut context),
        &mut context,
    );

    // Claiming success with the same value is allowed.
    assert!(proxy
        .__set__("x".into(), JsValue::new(1), receiver, &mut context)
        .unwrap());
}

#[test]
fn has_trap_cannot_hide_non_configurable_properties() {
    let mut context = Context::default();

    let target = context.construct_object();
    target
        .define_property_or_throw(
            "x",
            PropertyDescriptor::builder()
                .value(1)
                .writable(true)
                .configurable(false)
                .enumerable(true),
            &mut context,
        )
        .unwrap();

    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(false)), "has", 2, &mut context);
    handler.create_data_property("has", trap, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.__has_property__(&"x".into(), &mut context), &mut context);

    // Hiding a configurable property of an extensible target is fine.
    target.create_data_property("y", 2, &mut context).unwrap();
    assert!(!proxy.__has_property__(&"y".into(), &mut context).unwrap());
}

#[test]
fn get_own_property_trap_cannot_report_non_configurable_as_missing() {
    let mut context = Context::default();

    let target = context.construct_object();
    target
        .define_property_or_throw(
            "x",
            PropertyDescriptor::builder()
                .value(1)
                .writable(true)
                .configurable(false)
                .enumerable(true),
            &mut context,
        )
        .unwrap();

    let handler = context.construct_object();
    let trap = make_builtin_fn(
        |_, _, _| Ok(JsValue::undefined()),
        "getOwnPropertyDescriptor",
        2,
        &mut context,
    );
    handler
        .create_data_property("getOwnPropertyDescriptor", trap, &mut context)
        .unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(
        proxy.__get_own_property__(&"x".into(), &mut context),
        &mut context,
    );
}

#[test]
fn define_property_trap_cannot_extend_a_non_extensible_target() {
    let mut context = Context::default();

    let target = context.construct_object();
    target.__prevent_extensions__(&mut context).unwrap();

    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(true)), "defineProperty", 3, &mut context);
    handler
        .create_data_property("defineProperty", trap, &mut context)
        .unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(
        proxy.__define_own_property__(
            "fresh".into(),
            PropertyDescriptor::builder().value(1).build(),
            &mut context,
        ),
        &mut context,
    );
}

#[test]
fn prevent_extensions_trap_must_be_honest() {
    let mut context = Context::default();

    let target = context.construct_object();
    let handler = context.construct_object();
    let trap = make_builtin_fn(
        |_, _, _| Ok(JsValue::new(true)),
        "preventExtensions",
        1,
        &mut context,
    );
    handler
        .create_data_property("preventExtensions", trap, &mut context)
        .unwrap();

    // The trap claims success but the target is still extensible.
    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.__prevent_extensions__(&mut context), &mut context);
}

#[test]
fn is_extensible_trap_must_match_the_target() {
    let mut context = Context::default();

    let target = context.construct_object();
    target.__prevent_extensions__(&mut context).unwrap();

    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(true)), "isExtensible", 1, &mut context);
    handler
        .create_data_property("isExtensible", trap, &mut context)
        .unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.__is_extensible__(&mut context), &mut context);
}

#[test]
fn own_keys_trap_must_report_every_pinned_key_without_duplicates() {
    let mut context = Context::default();

    let target = context.construct_object();
    target
        .define_property_or_throw(
            "pinned",
            PropertyDescriptor::builder()
                .value(1)
                .writable(true)
                .configurable(false)
                .enumerable(true),
            &mut context,
        )
        .unwrap();

    // Returning a list without the non-configurable key throws.
    let handler = context.construct_object();
    let trap = make_builtin_fn(
        |_, _, context| {
            Ok(crate::builtins::array::Array::create_array_from_list(
                ["other".into()],
                context,
            )
            .into())
        },
        "ownKeys",
        1,
        &mut context,
    );
    handler.create_data_property("ownKeys", trap, &mut context).unwrap();
    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.__own_property_keys__(&mut context), &mut context);

    // Duplicate keys throw too.
    let handler = context.construct_object();
    let trap = make_builtin_fn(
        |_, _, context| {
            Ok(crate::builtins::array::Array::create_array_from_list(
                ["pinned".into(), "pinned".into()],
                context,
            )
            .into())
        },
        "ownKeys",
        1,
        &mut context,
    );
    handler.create_data_property("ownKeys", trap, &mut context).unwrap();
    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.__own_property_keys__(&mut context), &mut context);

    // Reporting exactly the pinned key is accepted.
    let handler = context.construct_object();
    let trap = make_builtin_fn(
        |_, _, context| {
            Ok(crate::builtins::array::Array::create_array_from_list(
                ["pinned".into()],
                context,
            )
            .into())
        },
        "ownKeys",
        1,
        &mut context,
    );
    handler.create_data_property("ownKeys", trap, &mut context).unwrap();
    let proxy = new_proxy(&target, &handler, &mut context);
    assert_eq!(
        proxy.__own_property_keys__(&mut context).unwrap(),
        vec![PropertyKey::from("pinned")]
    );
}

#[test]
fn get_prototype_of_trap_pins_on_non_extensible_targets() {
    let mut context = Context::default();

    let target = context.construct_object();
    target.__prevent_extensions__(&mut context).unwrap();

    let other_proto = context.construct_object();
    let handler = context.construct_object();
    let trap = make_closure_fn_returning(other_proto.clone(), &mut context);
    handler
        .create_data_property("getPrototypeOf", trap, &mut context)
        .unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    expect_type_error(proxy.__get_prototype_of__(&mut context), &mut context);
}

fn make_closure_fn_returning(value: JsObject, context: &mut Context) -> JsObject {
    crate::builtins::function::make_closure_fn(
        |_, _, captures, _| Ok(captures.clone()),
        value.into(),
        "trap",
        0,
        false,
        context,
    )
}

#[test]
fn apply_and_construct_traps() {
    let mut context = Context::default();

    // A callable target makes the proxy callable.
    let target = make_builtin_fn(
        |_, args, _| Ok(args.first().cloned().unwrap_or_default()),
        "identity",
        1,
        &mut context,
    );
    let handler = context.construct_object();
    let proxy = new_proxy(&target, &handler, &mut context);

    // Trap absent: forwards to the target.
    let result = context
        .call(&proxy.clone().into(), &JsValue::undefined(), &[7.into()])
        .unwrap();
    assert!(result.strict_equals(&JsValue::new(7)));

    // apply trap present: intercepts.
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(42)), "apply", 3, &mut context);
    handler.create_data_property("apply", trap, &mut context).unwrap();
    let result = context
        .call(&proxy.into(), &JsValue::undefined(), &[7.into()])
        .unwrap();
    assert!(result.strict_equals(&JsValue::new(42)));

    // A construct trap returning a primitive throws.
    let ctor = context.standard_objects().object_object().constructor();
    let handler = context.construct_object();
    let trap = make_builtin_fn(|_, _, _| Ok(JsValue::new(1)), "construct", 3, &mut context);
    handler
        .create_data_property("construct", trap, &mut context)
        .unwrap();
    let proxy = new_proxy(&ctor, &handler, &mut context);
    let new_target = JsValue::new(ctor);
    expect_type_error(proxy.construct(&[], &new_target, &mut context), &mut context);
}

#[test]
fn non_callable_target_makes_a_non_callable_proxy() {
    let mut context = Context::default();

    let target = context.construct_object();
    let handler = context.construct_object();
    let proxy = new_proxy(&target, &handler, &mut context);

    assert!(!proxy.is_callable());
    expect_type_error(
        context.call(&proxy.into(), &JsValue::undefined(), &[]),
        &mut context,
    );
}

#[test]
fn revoked_proxy_throws_from_every_internal_method() {
    let mut context = Context::default();

    // const { proxy, revoke } = Proxy.revocable(t, {}); revoke();
    let target = context.construct_object();
    let handler = context.construct_object();
    let result = Proxy::revocable(
        &JsValue::undefined(),
        &[target.into(), handler.into()],
        &mut context,
    )
    .unwrap();
    let result = result.as_object().unwrap();

    let proxy = result.get("proxy", &mut context).unwrap();
    let proxy = proxy.as_object().unwrap().clone();
    let revoke = result.get("revoke", &mut context).unwrap();

    // Before revocation the proxy works.
    assert!(proxy.set("x", 1, false, &mut context).unwrap());

    context.call(&revoke, &JsValue::undefined(), &[]).unwrap();
    assert!(proxy.borrow().as_proxy().unwrap().is_revoked());

    // Revoking twice is a no-op.
    context.call(&revoke, &JsValue::undefined(), &[]).unwrap();

    let key = PropertyKey::from("x");
    expect_type_error(proxy.__get__(&key, proxy.clone().into(), &mut context), &mut context);
    expect_type_error(
        proxy.__set__(key.clone(), 1.into(), proxy.clone().into(), &mut context),
        &mut context,
    );
    expect_type_error(proxy.__has_property__(&key, &mut context), &mut context);
    expect_type_error(proxy.__delete__(&key, &mut context), &mut context);
    expect_type_error(
        proxy.__define_own_property__(
            key.clone(),
            PropertyDescriptor::builder().value(1).build(),
            &mut context,
        ),
        &mut context,
    );
    expect_type_error(proxy.__get_own_property__(&key, &mut context), &mut context);
    expect_type_error(proxy.__own_property_keys__(&mut context), &mut context);
    expect_type_error(proxy.__get_prototype_of__(&mut context), &mut context);
    expect_type_error(
        proxy.__set_prototype_of__(JsValue::null(), &mut context),
        &mut context,
    );
    expect_type_error(proxy.__is_extensible__(&mut context), &mut context);
    expect_type_error(proxy.__prevent_extensions__(&mut context), &mut context);
}
