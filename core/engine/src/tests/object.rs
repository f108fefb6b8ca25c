//! Tests for the ordinary object internal methods.

use crate::{
    builtins::function::{make_builtin_fn, make_closure_fn},
    object::{IntegrityLevel, JsObject},
    property::{PropertyDescriptor, PropertyKey},
    Context, JsValue,
};

#[test]
fn get_set_has_delete_round_trip() {
    let mut context = Context::default();

    let obj = context.construct_object();
    assert!(obj.set("foo", 42, false, &mut context).unwrap());
    assert!(obj
        .get("foo", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(42)));
    assert!(obj.has_property("foo", &mut context).unwrap());
    assert!(!obj.has_property("bar", &mut context).unwrap());

    assert!(obj.__delete__(&"foo".into(), &mut context).unwrap());
    assert!(!obj.has_property("foo", &mut context).unwrap());
    assert!(obj.get("foo", &mut context).unwrap().is_undefined());
}

#[test]
fn get_falls_back_to_the_prototype_chain() {
    let mut context = Context::default();

    let proto = context.construct_object();
    proto.set("inherited", 7, false, &mut context).unwrap();

    let obj = JsObject::new(crate::object::Object::create(proto.clone().into()));
    assert!(obj
        .get("inherited", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(7)));
    assert!(obj.has_property("inherited", &mut context).unwrap());
    // But it is not an own property.
    assert!(!obj.has_own_property("inherited", &mut context).unwrap());
}

#[test]
fn prototype_getter_sees_the_receiver() {
    let mut context = Context::default();

    // get tag() { return this.ownTag }
    let getter = make_builtin_fn(
        |this, _, context| {
            this.as_object()
                .expect("receiver must be an object")
                .get("ownTag", context)
        },
        "get tag",
        0,
        &mut context,
    );

    let proto = context.construct_object();
    proto
        .__define_own_property__(
            "tag".into(),
            PropertyDescriptor::builder()
                .get(getter)
                .enumerable(true)
                .configurable(true)
                .build(),
            &mut context,
        )
        .unwrap();

    let obj = JsObject::new(crate::object::Object::create(proto.clone().into()));
    obj.set("ownTag", "child", false, &mut context).unwrap();
    proto.set("ownTag", "proto", false, &mut context).unwrap();

    // `this` inside the getter is the receiver, not the prototype that
    // holds the accessor.
    let through_child = obj.get("tag", &mut context).unwrap();
    assert_eq!(through_child.as_string().unwrap().as_str(), "child");

    let through_proto = proto.get("tag", &mut context).unwrap();
    assert_eq!(through_proto.as_string().unwrap().as_str(), "proto");
}

#[test]
fn prototype_setter_writes_through_the_receiver() {
    let mut context = Context::default();

    // proto = { set foo(v) { this._v = v } }
    let setter = make_builtin_fn(
        |this, args, context| {
            let receiver = this.as_object().expect("receiver must be an object");
            receiver.set("_v", args.first().cloned().unwrap_or_default(), true, context)?;
            Ok(JsValue::undefined())
        },
        "set foo",
        1,
        &mut context,
    );

    let proto = context.construct_object();
    proto
        .__define_own_property__(
            "foo".into(),
            PropertyDescriptor::builder()
                .set(setter)
                .enumerable(true)
                .configurable(true)
                .build(),
            &mut context,
        )
        .unwrap();

    // obj = Object.create(proto); obj.foo = 7
    let obj = JsObject::new(crate::object::Object::create(proto.clone().into()));
    assert!(obj.set("foo", 7, false, &mut context).unwrap());

    assert!(obj
        .get("_v", &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(7)));
    assert!(!proto.has_own_property("_v", &mut context).unwrap());
}

#[test]
fn inherited_writable_data_creates_own_property_on_the_receiver() {
    let mut context = Context::default();

    let proto = context.construct_object();
    proto.set("x", 1, false, &mut context).unwrap();

    let obj = JsObject::new(crate::object::Object::create(proto.clone().into()));
    assert!(obj.set("x", 2, false, &mut context).unwrap());

    // The prototype keeps its value; the receiver shadows it.
    assert!(obj.has_own_property("x", &mut context).unwrap());
    assert!(obj.get("x", &mut context).unwrap().strict_equals(&JsValue::new(2)));
    assert!(proto.get("x", &mut context).unwrap().strict_equals(&JsValue::new(1)));
}

#[test]
fn inherited_non_writable_data_rejects_the_set() {
    let mut context = Context::default();

    let proto = context.construct_object();
    proto
        .define_property_or_throw(
            "x",
            PropertyDescriptor::builder()
                .value(1)
                .writable(false)
                .enumerable(true)
                .configurable(true),
            &mut context,
        )
        .unwrap();

    let obj = JsObject::new(crate::object::Object::create(proto.into()));
    assert!(!obj.set("x", 2, false, &mut context).unwrap());
    assert!(!obj.has_own_property("x", &mut context).unwrap());
}

#[test]
fn accessor_without_setter_rejects_the_set() {
    let mut context = Context::default();

    let getter = make_builtin_fn(|_, _, _| Ok(JsValue::new(1)), "get x", 0, &mut context);
    let obj = context.construct_object();
    obj.__define_own_property__(
        "x".into(),
        PropertyDescriptor::builder()
            .get(getter)
            .enumerable(true)
            .configurable(true)
            .build(),
        &mut context,
    )
    .unwrap();

    assert!(!obj.set("x", 2, false, &mut context).unwrap());
    assert!(obj.get("x", &mut context).unwrap().strict_equals(&JsValue::new(1)));
}

#[test]
fn define_own_property_validates_against_non_configurable() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.__define_own_property__(
        "x".into(),
        PropertyDescriptor::builder()
            .value(1)
            .writable(false)
            .enumerable(true)
            .configurable(false)
            .build(),
        &mut context,
    )
    .unwrap();

    // Upgrading configurable is rejected.
    assert!(!obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().configurable(true).build(),
            &mut context,
        )
        .unwrap());

    // Flipping enumerable is rejected.
    assert!(!obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().enumerable(false).build(),
            &mut context,
        )
        .unwrap());

    // Re-enabling writable is rejected.
    assert!(!obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().writable(true).build(),
            &mut context,
        )
        .unwrap());

    // Changing the value of a non-writable property is rejected...
    assert!(!obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().value(2).build(),
            &mut context,
        )
        .unwrap());

    // ...but "redefining" the same value succeeds vacuously.
    assert!(obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().value(1).build(),
            &mut context,
        )
        .unwrap());

    // Switching to an accessor is rejected.
    let getter = make_builtin_fn(|_, _, _| Ok(JsValue::undefined()), "get", 0, &mut context);
    assert!(!obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().get(getter).build(),
            &mut context,
        )
        .unwrap());

    assert!(obj.get("x", &mut context).unwrap().strict_equals(&JsValue::new(1)));
}

#[test]
fn define_own_property_switches_kind_when_configurable() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("x", 1, &mut context).unwrap();

    let getter = make_builtin_fn(|_, _, _| Ok(JsValue::new(9)), "get x", 0, &mut context);
    assert!(obj
        .__define_own_property__(
            "x".into(),
            PropertyDescriptor::builder().get(getter).build(),
            &mut context,
        )
        .unwrap());

    // The data fields are gone, the shared attributes survive.
    let desc = obj.__get_own_property__(&"x".into(), &mut context).unwrap().unwrap();
    assert!(desc.is_accessor_descriptor());
    assert_eq!(desc.enumerable(), Some(true));
    assert!(obj.get("x", &mut context).unwrap().strict_equals(&JsValue::new(9)));
}

#[test]
fn non_extensible_rejects_new_properties() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("present", 1, &mut context).unwrap();
    assert!(obj.__prevent_extensions__(&mut context).unwrap());
    assert!(!obj.__is_extensible__(&mut context).unwrap());

    assert!(!obj.set("fresh", 1, false, &mut context).unwrap());
    assert!(!obj.create_data_property("fresh", 1, &mut context).unwrap());
    // Existing properties are still writable.
    assert!(obj.set("present", 2, false, &mut context).unwrap());
}

#[test]
fn deleting_a_non_configurable_property_fails_and_keeps_it() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.define_property_or_throw(
        "x",
        PropertyDescriptor::builder()
            .value(1)
            .writable(true)
            .enumerable(true)
            .configurable(false),
        &mut context,
    )
    .unwrap();

    assert!(!obj.__delete__(&"x".into(), &mut context).unwrap());
    assert!(obj.has_own_property("x", &mut context).unwrap());
    assert!(obj.get("x", &mut context).unwrap().strict_equals(&JsValue::new(1)));

    // Deleting something absent succeeds vacuously.
    assert!(obj.__delete__(&"missing".into(), &mut context).unwrap());
}

#[test]
fn own_property_keys_are_ordered() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let symbol = context.construct_symbol(Some("sym".into()));

    obj.create_data_property("beta", 1, &mut context).unwrap();
    obj.create_data_property(9, 2, &mut context).unwrap();
    obj.create_data_property(symbol.clone(), 3, &mut context).unwrap();
    obj.create_data_property("alpha", 4, &mut context).unwrap();
    obj.create_data_property(1, 5, &mut context).unwrap();

    let keys = obj.__own_property_keys__(&mut context).unwrap();
    assert_eq!(
        keys,
        vec![
            PropertyKey::Index(1),
            PropertyKey::Index(9),
            PropertyKey::from("beta"),
            PropertyKey::from("alpha"),
            PropertyKey::Symbol(symbol),
        ]
    );
}

#[test]
fn set_prototype_of_respects_extensibility_and_cycles() {
    let mut context = Context::default();

    let a = context.construct_object();
    let b = context.construct_object();

    // a -> b
    assert!(a
        .__set_prototype_of__(b.clone().into(), &mut context)
        .unwrap());

    // b -> a would be a cycle.
    assert!(!b
        .__set_prototype_of__(a.clone().into(), &mut context)
        .unwrap());

    // A non-extensible object only accepts its current prototype.
    assert!(a.__prevent_extensions__(&mut context).unwrap());
    assert!(!a.__set_prototype_of__(JsValue::null(), &mut context).unwrap());
    assert!(a
        .__set_prototype_of__(b.clone().into(), &mut context)
        .unwrap());
}

#[test]
fn cyclic_prototype_graphs_terminate_lookups() {
    let mut context = Context::default();

    let a = context.construct_object();
    let b = context.construct_object();

    // Force a cycle behind the back of [[SetPrototypeOf]].
    a.borrow_mut().set_prototype_instance(b.clone().into());
    b.borrow_mut().set_prototype_instance(a.clone().into());

    // Lookup terminates with "not found" instead of recursing forever.
    assert!(!a.has_property("missing", &mut context).unwrap());
    assert!(a.get("missing", &mut context).unwrap().is_undefined());
    assert!(!a.set("missing", 1, false, &mut context).unwrap());
}

#[test]
fn runaway_recursion_raises_range_error() {
    let mut context = Context::default();
    context.set_max_stack_depth(64);

    // get boom() { return this.boom }
    let getter = make_builtin_fn(
        |this, _, context| {
            this.as_object()
                .expect("receiver must be an object")
                .get("boom", context)
        },
        "get boom",
        0,
        &mut context,
    );

    let obj = context.construct_object();
    obj.__define_own_property__(
        "boom".into(),
        PropertyDescriptor::builder()
            .get(getter)
            .enumerable(true)
            .configurable(true)
            .build(),
        &mut context,
    )
    .unwrap();

    let error = obj.get("boom", &mut context).unwrap_err();
    let name = error
        .as_object()
        .unwrap()
        .get("name", &mut context)
        .unwrap();
    assert_eq!(name.as_string().unwrap().as_str(), "RangeError");
}

#[test]
fn seal_makes_properties_non_configurable_but_writable() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("x", 1, &mut context).unwrap();

    assert!(obj
        .set_integrity_level(IntegrityLevel::Sealed, &mut context)
        .unwrap());
    assert!(obj
        .test_integrity_level(IntegrityLevel::Sealed, &mut context)
        .unwrap());
    assert!(!obj
        .test_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap());

    // Writes still work, deletes and additions fail.
    assert!(obj.set("x", 2, false, &mut context).unwrap());
    assert!(!obj.__delete__(&"x".into(), &mut context).unwrap());
    assert!(!obj.create_data_property("fresh", 1, &mut context).unwrap());
    assert!(obj.borrow().sealed());
}

#[test]
fn freeze_is_idempotent_and_pins_values() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("x", 1, &mut context).unwrap();

    assert!(obj
        .set_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap());
    // Freezing again is a no-op that still reports success.
    assert!(obj
        .set_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap());

    assert!(obj
        .test_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap());
    assert!(obj.borrow().frozen());
    assert!(obj.borrow().sealed());

    assert!(!obj.set("x", 2, false, &mut context).unwrap());
    assert!(!obj.__delete__(&"x".into(), &mut context).unwrap());
    assert!(obj.get("x", &mut context).unwrap().strict_equals(&JsValue::new(1)));
}

#[test]
fn closure_functions_carry_traced_captures() {
    let mut context = Context::default();

    let sink = context.construct_object();
    let recorder = make_closure_fn(
        |_, args, captures, context| {
            let sink = captures.as_object().expect("captures must be the sink");
            sink.set("last", args.first().cloned().unwrap_or_default(), true, context)?;
            Ok(JsValue::undefined())
        },
        sink.clone().into(),
        "record",
        1,
        false,
        &mut context,
    );

    context
        .call(&recorder.into(), &JsValue::undefined(), &[JsValue::new(5)])
        .unwrap();
    assert!(sink.get("last", &mut context).unwrap().strict_equals(&JsValue::new(5)));
}

#[test]
fn object_builtin_enumerates_enumerable_string_keys() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.create_data_property("a", 1, &mut context).unwrap();
    obj.create_data_property(3, 2, &mut context).unwrap();
    obj.define_property_or_throw(
        "hidden",
        PropertyDescriptor::builder()
            .value(9)
            .writable(true)
            .enumerable(false)
            .configurable(true),
        &mut context,
    )
    .unwrap();
    let symbol = context.construct_symbol(None);
    obj.create_data_property(symbol, 3, &mut context).unwrap();

    let global = context.global_object().clone();
    let object_ctor = global.get("Object", &mut context).unwrap();
    let keys_fn = object_ctor
        .as_object()
        .unwrap()
        .get("keys", &mut context)
        .unwrap();

    // Symbols and non-enumerable properties are skipped; indices lead.
    let keys = context
        .call(&keys_fn, &JsValue::undefined(), &[obj.clone().into()])
        .unwrap();
    let keys = keys.as_object().unwrap().clone();
    assert_eq!(keys.length_of_array_like(&mut context).unwrap(), 2);
    assert_eq!(
        keys.get(0, &mut context).unwrap().as_string().unwrap().as_str(),
        "3"
    );
    assert_eq!(
        keys.get(1, &mut context).unwrap().as_string().unwrap().as_str(),
        "a"
    );

    // entries pairs keys with values.
    let entries_fn = object_ctor
        .as_object()
        .unwrap()
        .get("entries", &mut context)
        .unwrap();
    let entries = context
        .call(&entries_fn, &JsValue::undefined(), &[obj.into()])
        .unwrap();
    let entries = entries.as_object().unwrap().clone();
    let first = entries.get(0, &mut context).unwrap();
    let first = first.as_object().unwrap().clone();
    assert_eq!(
        first.get(0, &mut context).unwrap().as_string().unwrap().as_str(),
        "3"
    );
    assert!(first.get(1, &mut context).unwrap().strict_equals(&JsValue::new(2)));
}

#[test]
fn htmldda_objects_are_falsy_and_loosely_equal_to_undefined() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.borrow_mut().set_is_htmldda();

    let value = JsValue::new(obj);
    assert!(!value.to_boolean());
    assert_eq!(value.type_of(), "undefined");
    assert!(value.equals(&JsValue::undefined(), &mut context).unwrap());
    assert!(value.equals(&JsValue::null(), &mut context).unwrap());
    // But strict equality still sees an object.
    assert!(!value.strict_equals(&JsValue::undefined()));
}
