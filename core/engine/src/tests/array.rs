//! Tests for the `Array` exotic object: length coupling, dense/sparse
//! storage and the mutation builtins.

use crate::{
    api,
    builtins::array::Array,
    object::{IntegrityLevel, JsObject, MAX_DENSE},
    property::{PropertyDescriptor, PropertyKey},
    Context, JsValue,
};

fn array_of(values: &[i32], context: &mut Context) -> JsObject {
    let array = Array::array_create(0, None, context).unwrap();
    for (index, value) in values.iter().enumerate() {
        array
            .create_data_property_or_throw(index, *value, context)
            .unwrap();
    }
    array
}

fn length_of(array: &JsObject, context: &mut Context) -> u64 {
    array.length_of_array_like(context).unwrap()
}

#[test]
fn indexed_writes_extend_length() {
    let mut context = Context::default();

    let array = Array::array_create(0, None, &mut context).unwrap();
    assert_eq!(length_of(&array, &mut context), 0);

    assert!(array.set(5, "five", false, &mut context).unwrap());
    assert!(array
        .get(5, &mut context)
        .unwrap()
        .strict_equals(&"five".into()));
    assert_eq!(length_of(&array, &mut context), 6);

    // Lower indices do not shrink the length.
    assert!(array.set(2, "two", false, &mut context).unwrap());
    assert_eq!(length_of(&array, &mut context), 6);
}

#[test]
fn large_indices_go_to_sparse_storage() {
    let mut context = Context::default();

    let array = Array::array_create(0, None, &mut context).unwrap();
    let big = MAX_DENSE + 100;

    array.set(0, "dense", false, &mut context).unwrap();
    array.set(big, "sparse", false, &mut context).unwrap();

    assert!(array
        .get(big, &mut context)
        .unwrap()
        .strict_equals(&"sparse".into()));
    assert_eq!(length_of(&array, &mut context), u64::from(big) + 1);

    let keys = array.borrow().properties().index_property_keys();
    assert_eq!(keys, vec![0, big]);

    // Deleting a sparse element leaves a hole but not the length.
    assert!(array.__delete__(&big.into(), &mut context).unwrap());
    assert!(array.get(big, &mut context).unwrap().is_undefined());
    assert_eq!(length_of(&array, &mut context), u64::from(big) + 1);
}

#[test]
fn reads_beyond_length_consult_the_prototype() {
    let mut context = Context::default();

    let array = array_of(&[1], &mut context);
    let proto = context.standard_objects().array_object().prototype();
    proto.set(7, "inherited", false, &mut context).unwrap();

    assert!(array
        .get(7, &mut context)
        .unwrap()
        .strict_equals(&"inherited".into()));
    // It is not an own element, and the length is untouched.
    assert!(!array.has_own_property(7, &mut context).unwrap());
    assert_eq!(length_of(&array, &mut context), 1);

    proto.__delete__(&7.into(), &mut context).unwrap();
}

#[test]
fn length_write_coerces_before_rejecting_non_writable() {
    let mut context = Context::default();

    // A fresh array with a non-writable length of 0.
    let array = Array::array_create(0, None, &mut context).unwrap();
    assert!(array
        .__define_own_property__(
            "length".into(),
            PropertyDescriptor::builder().writable(false).build(),
            &mut context,
        )
        .unwrap());

    // defineProperty(a, "length", { value: "1" }): the string coerces to the
    // number 1 first, and only then the write is rejected.
    let result = array
        .__define_own_property__(
            "length".into(),
            PropertyDescriptor::builder().value("1").build(),
            &mut context,
        )
        .unwrap();
    assert!(!result);
    assert_eq!(length_of(&array, &mut context), 0);

    // A length that does not round-trip through ToUint32 is a RangeError,
    // even on a non-writable length.
    let error = array
        .__define_own_property__(
            "length".into(),
            PropertyDescriptor::builder().value("1.5").build(),
            &mut context,
        )
        .unwrap_err();
    let name = error.as_object().unwrap().get("name", &mut context).unwrap();
    assert_eq!(name.as_string().unwrap().as_str(), "RangeError");
}

#[test]
fn length_shrink_stops_at_a_non_configurable_index() {
    let mut context = Context::default();

    let array = array_of(&[10, 20, 30], &mut context);
    assert!(array
        .__define_own_property__(
            1.into(),
            PropertyDescriptor::builder().configurable(false).build(),
            &mut context,
        )
        .unwrap());

    // a.length = 0 deletes index 2, stops at index 1, and reports failure.
    let result = array
        .__define_own_property__(
            "length".into(),
            PropertyDescriptor::builder().value(0).build(),
            &mut context,
        )
        .unwrap();
    assert!(!result);

    assert_eq!(length_of(&array, &mut context), 2);
    assert!(array
        .get(1, &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(20)));
    assert!(!array.has_own_property(2, &mut context).unwrap());
    assert!(array.get(0, &mut context).unwrap().strict_equals(&JsValue::new(10)));
}

#[test]
fn length_shrink_deletes_dense_sparse_and_shape_indices() {
    let mut context = Context::default();

    let array = array_of(&[1, 2, 3], &mut context);
    let big = MAX_DENSE + 3;
    array.set(big, 9, false, &mut context).unwrap();

    assert!(array
        .__define_own_property__(
            "length".into(),
            PropertyDescriptor::builder().value(1).build(),
            &mut context,
        )
        .unwrap());

    assert_eq!(length_of(&array, &mut context), 1);
    assert!(array.get(0, &mut context).unwrap().strict_equals(&JsValue::new(1)));
    for index in [1u32, 2, big] {
        assert!(!array.has_own_property(index, &mut context).unwrap());
    }
}

#[test]
fn push_and_pop() {
    let mut context = Context::default();

    let array = array_of(&[1, 2], &mut context);
    let this = JsValue::new(array.clone());

    let new_len = Array::push(&this, &[3.into(), 4.into()], &mut context).unwrap();
    assert!(new_len.strict_equals(&JsValue::new(4)));
    assert_eq!(length_of(&array, &mut context), 4);
    assert!(array.get(3, &mut context).unwrap().strict_equals(&JsValue::new(4)));

    let popped = Array::pop(&this, &[], &mut context).unwrap();
    assert!(popped.strict_equals(&JsValue::new(4)));
    assert_eq!(length_of(&array, &mut context), 3);
    assert!(!array.has_own_property(3, &mut context).unwrap());

    // Popping an empty array yields undefined.
    let empty = array_of(&[], &mut context);
    assert!(Array::pop(&empty.into(), &[], &mut context)
        .unwrap()
        .is_undefined());
}

#[test]
fn shift_and_unshift_rekey_storage() {
    let mut context = Context::default();

    let array = array_of(&[1, 2, 3], &mut context);
    let this = JsValue::new(array.clone());

    let first = Array::shift(&this, &[], &mut context).unwrap();
    assert!(first.strict_equals(&JsValue::new(1)));
    assert_eq!(length_of(&array, &mut context), 2);
    assert!(array.get(0, &mut context).unwrap().strict_equals(&JsValue::new(2)));
    assert!(array.get(1, &mut context).unwrap().strict_equals(&JsValue::new(3)));
    assert!(!array.has_own_property(2, &mut context).unwrap());

    let new_len = Array::unshift(&this, &[(-1).into(), 0.into()], &mut context).unwrap();
    assert!(new_len.strict_equals(&JsValue::new(4)));
    for (index, expected) in [(-1i32), 0, 2, 3].into_iter().enumerate() {
        assert!(array
            .get(index, &mut context)
            .unwrap()
            .strict_equals(&JsValue::new(expected)));
    }

    // Holes shift as holes: [1, <hole>, 3] keeps the hole moving down.
    let holey = array_of(&[7, 8, 9], &mut context);
    holey.__delete__(&1.into(), &mut context).unwrap();
    let this = JsValue::new(holey.clone());
    Array::shift(&this, &[], &mut context).unwrap();
    assert!(!holey.has_own_property(0, &mut context).unwrap());
    assert!(holey.get(1, &mut context).unwrap().strict_equals(&JsValue::new(9)));
}

#[test]
fn push_fails_on_non_extensible_and_non_writable_length() {
    let mut context = Context::default();

    // Push into a non-extensible array with writable length fails: the new
    // element cannot be created.
    let array = array_of(&[1], &mut context);
    array.__prevent_extensions__(&mut context).unwrap();
    assert!(Array::push(&JsValue::new(array.clone()), &[2.into()], &mut context).is_err());
    assert_eq!(length_of(&array, &mut context), 1);

    // Push when length is non-writable fails even on an extensible array.
    let pinned = array_of(&[1], &mut context);
    pinned
        .__define_own_property__(
            "length".into(),
            PropertyDescriptor::builder().writable(false).build(),
            &mut context,
        )
        .unwrap();
    assert!(Array::push(&JsValue::new(pinned.clone()), &[2.into()], &mut context).is_err());
    assert!(!pinned.has_own_property(1, &mut context).unwrap());
}

#[test]
fn frozen_array_rejects_element_writes() {
    let mut context = Context::default();

    let array = array_of(&[1, 2], &mut context);
    array
        .set_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap();

    assert!(!array.set(0, 9, false, &mut context).unwrap());
    assert!(array.get(0, &mut context).unwrap().strict_equals(&JsValue::new(1)));

    // Strict callers surface the failure as a TypeError.
    assert!(array.set(0, 9, true, &mut context).is_err());
}

#[test]
fn defined_index_stays_on_the_shape_path() {
    let mut context = Context::default();

    let array = array_of(&[1, 2, 3], &mut context);
    assert!(array
        .__define_own_property__(
            1.into(),
            PropertyDescriptor::builder().writable(false).build(),
            &mut context,
        )
        .unwrap());

    // The element still reads, but writes now respect the shape descriptor.
    assert!(array.get(1, &mut context).unwrap().strict_equals(&JsValue::new(2)));
    assert!(!array.set(1, 9, false, &mut context).unwrap());
    assert!(array.get(1, &mut context).unwrap().strict_equals(&JsValue::new(2)));
}

#[test]
fn array_new_surface_validates_the_length() {
    let mut context = Context::default();

    let array = api::array_new(&mut context, &JsValue::new(3));
    assert!(!context.has_pending_exception());
    let array = array.as_object().unwrap().clone();
    assert_eq!(length_of(&array, &mut context), 3);

    let bogus = api::array_new(&mut context, &JsValue::rational(1.5));
    assert!(bogus.is_undefined());
    assert!(context.has_pending_exception());
    context.clear_pending_exception();

    let negative = api::array_new(&mut context, &JsValue::new(-1));
    assert!(negative.is_undefined());
    assert!(context.has_pending_exception());
    context.clear_pending_exception();
}

#[test]
fn surface_mutators_round_trip() {
    let mut context = Context::default();

    let array = api::array_new(&mut context, &JsValue::new(0));
    let array = array.as_object().unwrap().clone();

    api::array_push(&mut context, &array, &[1.into(), 2.into(), 3.into()]);
    assert_eq!(length_of(&array, &mut context), 3);

    let shifted = api::array_shift(&mut context, &array);
    assert!(shifted.strict_equals(&JsValue::new(1)));

    api::array_unshift(&mut context, &array, &[0.into()]);
    assert!(array.get(0, &mut context).unwrap().strict_equals(&JsValue::new(0)));

    let popped = api::array_pop(&mut context, &array);
    assert!(popped.strict_equals(&JsValue::new(3)));
    assert!(!context.has_pending_exception());
}

#[test]
fn create_array_from_list_preserves_order() {
    let mut context = Context::default();

    let array =
        Array::create_array_from_list([1.into(), "two".into(), JsValue::null()], &mut context);
    assert_eq!(length_of(&array, &mut context), 3);
    assert!(array.get(0, &mut context).unwrap().strict_equals(&JsValue::new(1)));
    assert!(array.get(1, &mut context).unwrap().strict_equals(&"two".into()));
    assert!(array.get(2, &mut context).unwrap().is_null());

    let keys = array.__own_property_keys__(&mut context).unwrap();
    assert_eq!(
        &keys[..3],
        &[
            PropertyKey::Index(0),
            PropertyKey::Index(1),
            PropertyKey::Index(2)
        ]
    );
}
