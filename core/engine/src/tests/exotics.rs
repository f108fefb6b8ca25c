//! Tests for the `String` and integer-indexed exotic objects.

use crate::{
    builtins::{
        array_buffer::{allocate_array_buffer, allocate_resizable_array_buffer},
        typed_array::{integer_indexed_object_create, TypedArrayKind},
    },
    property::{PropertyDescriptor, PropertyKey},
    Context, JsBigInt, JsValue,
};

#[test]
fn string_wrapper_exposes_indexed_elements() {
    let mut context = Context::default();

    let wrapper = JsValue::new("ab𝒜").to_object(&mut context).unwrap();

    // Code units, not characters: the astral char occupies two indices.
    assert_eq!(
        wrapper
            .get("length", &mut context)
            .unwrap()
            .to_number(&mut context)
            .unwrap(),
        4.0
    );

    assert_eq!(
        wrapper.get(0, &mut context).unwrap().as_string().unwrap().as_str(),
        "a"
    );
    assert_eq!(
        wrapper.get(1, &mut context).unwrap().as_string().unwrap().as_str(),
        "b"
    );
    assert!(wrapper.has_property(3, &mut context).unwrap());
    assert!(!wrapper.has_property(4, &mut context).unwrap());
    assert!(wrapper.get(9, &mut context).unwrap().is_undefined());

    let desc = wrapper
        .__get_own_property__(&PropertyKey::Index(0), &mut context)
        .unwrap()
        .unwrap();
    assert_eq!(desc.writable(), Some(false));
    assert_eq!(desc.enumerable(), Some(true));
    assert_eq!(desc.configurable(), Some(false));
}

#[test]
fn string_wrapper_rejects_writes_and_deletes_in_range() {
    let mut context = Context::default();

    let wrapper = JsValue::new("abc").to_object(&mut context).unwrap();

    assert!(!wrapper.set(0, "z", false, &mut context).unwrap());
    assert_eq!(
        wrapper.get(0, &mut context).unwrap().as_string().unwrap().as_str(),
        "a"
    );

    // The indices are non-configurable, so deletion fails...
    assert!(!wrapper.__delete__(&PropertyKey::Index(1), &mut context).unwrap());
    // ...and redefining them incompatibly fails too.
    assert!(!wrapper
        .__define_own_property__(
            PropertyKey::Index(1),
            PropertyDescriptor::builder().value("z").build(),
            &mut context,
        )
        .unwrap());
    // Redefining an index to its current value is compatible.
    assert!(wrapper
        .__define_own_property__(
            PropertyKey::Index(1),
            PropertyDescriptor::builder().value("b").build(),
            &mut context,
        )
        .unwrap());

    // Regular expando properties still work.
    assert!(wrapper.set("tag", 1, false, &mut context).unwrap());
    assert!(wrapper.get("tag", &mut context).unwrap().strict_equals(&JsValue::new(1)));
}

#[test]
fn string_wrapper_own_keys_lead_with_indices() {
    let mut context = Context::default();

    let wrapper = JsValue::new("ab").to_object(&mut context).unwrap();
    wrapper.set("expando", 1, false, &mut context).unwrap();

    let keys = wrapper.__own_property_keys__(&mut context).unwrap();
    assert_eq!(
        keys,
        vec![
            PropertyKey::Index(0),
            PropertyKey::Index(1),
            PropertyKey::from("length"),
            PropertyKey::from("expando"),
        ]
    );
}

#[test]
fn typed_array_reads_and_writes_with_element_coercion() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(4, &mut context).unwrap();
    let view =
        integer_indexed_object_create(buffer, TypedArrayKind::Uint8, 0, Some(4), &mut context)
            .unwrap();

    // Writes wrap modulo 2⁸.
    assert!(view.set(0, 300, false, &mut context).unwrap());
    assert!(view.get(0, &mut context).unwrap().strict_equals(&JsValue::new(44)));

    // Fractions truncate, strings coerce.
    view.set(1, JsValue::rational(7.9), false, &mut context).unwrap();
    assert!(view.get(1, &mut context).unwrap().strict_equals(&JsValue::new(7)));
    view.set(2, "12", false, &mut context).unwrap();
    assert!(view.get(2, &mut context).unwrap().strict_equals(&JsValue::new(12)));

    // Out of range: reads are undefined, writes succeed without effect,
    // deletes of dead indices succeed while live ones fail.
    assert!(view.get(10, &mut context).unwrap().is_undefined());
    assert!(view.set(10, 1, false, &mut context).unwrap());
    assert!(!view.has_property(10, &mut context).unwrap());
    assert!(view.__delete__(&PropertyKey::Index(10), &mut context).unwrap());
    assert!(!view.__delete__(&PropertyKey::Index(0), &mut context).unwrap());

    let keys = view.__own_property_keys__(&mut context).unwrap();
    assert_eq!(
        keys,
        vec![
            PropertyKey::Index(0),
            PropertyKey::Index(1),
            PropertyKey::Index(2),
            PropertyKey::Index(3),
        ]
    );
}

#[test]
fn typed_array_clamped_kind_uses_ties_to_even() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(4, &mut context).unwrap();
    let view = integer_indexed_object_create(
        buffer,
        TypedArrayKind::Uint8Clamped,
        0,
        Some(4),
        &mut context,
    )
    .unwrap();

    for (index, input, expected) in [
        (0u32, JsValue::rational(300.0), 255),
        (1, JsValue::rational(-5.0), 0),
        (2, JsValue::rational(2.5), 2),
        (3, JsValue::rational(3.5), 4),
    ] {
        view.set(index, input, false, &mut context).unwrap();
        assert!(view
            .get(index, &mut context)
            .unwrap()
            .strict_equals(&JsValue::new(expected)));
    }
}

#[test]
fn typed_array_non_canonical_keys_take_the_ordinary_path() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(2, &mut context).unwrap();
    let view =
        integer_indexed_object_create(buffer, TypedArrayKind::Int8, 0, Some(2), &mut context)
            .unwrap();

    // "01" is not a canonical numeric index: it becomes a regular property.
    assert!(view.set("01", 7, false, &mut context).unwrap());
    assert!(view.get("01", &mut context).unwrap().strict_equals(&JsValue::new(7)));
    assert!(view.get(1, &mut context).unwrap().strict_equals(&JsValue::new(0)));

    // "1.5" and "-0" are canonical numeric indices without elements.
    assert!(view.get("1.5", &mut context).unwrap().is_undefined());
    assert!(view.set("1.5", 1, false, &mut context).unwrap());
    assert!(!view.has_property("1.5", &mut context).unwrap());
    assert!(view.get("-0", &mut context).unwrap().is_undefined());
}

#[test]
fn typed_array_element_defineproperty_is_restricted() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(2, &mut context).unwrap();
    let view =
        integer_indexed_object_create(buffer, TypedArrayKind::Int8, 0, Some(2), &mut context)
            .unwrap();

    // A plain value definition writes the element.
    assert!(view
        .__define_own_property__(
            PropertyKey::Index(0),
            PropertyDescriptor::builder().value(5).build(),
            &mut context,
        )
        .unwrap());
    assert!(view.get(0, &mut context).unwrap().strict_equals(&JsValue::new(5)));

    // Out of bounds, accessors and non-default attributes are rejected.
    assert!(!view
        .__define_own_property__(
            PropertyKey::Index(9),
            PropertyDescriptor::builder().value(1).build(),
            &mut context,
        )
        .unwrap());
    assert!(!view
        .__define_own_property__(
            PropertyKey::Index(0),
            PropertyDescriptor::builder().value(1).writable(false).build(),
            &mut context,
        )
        .unwrap());
}

#[test]
fn detached_buffer_empties_the_view() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(2, &mut context).unwrap();
    let view = integer_indexed_object_create(
        buffer.clone(),
        TypedArrayKind::Int8,
        0,
        Some(2),
        &mut context,
    )
    .unwrap();

    view.set(0, 1, false, &mut context).unwrap();
    buffer.borrow_mut().as_array_buffer_mut().unwrap().detach();

    assert!(view.get(0, &mut context).unwrap().is_undefined());
    assert!(!view.has_property(0, &mut context).unwrap());
    // Writes silently vanish.
    assert!(view.set(0, 2, false, &mut context).unwrap());
    assert!(view.__own_property_keys__(&mut context).unwrap().is_empty());
}

#[test]
fn length_tracking_view_follows_buffer_resizes() {
    let mut context = Context::default();

    let buffer = allocate_resizable_array_buffer(2, 8, &mut context).unwrap();
    let view = integer_indexed_object_create(
        buffer.clone(),
        TypedArrayKind::Int8,
        0,
        None,
        &mut context,
    )
    .unwrap();

    assert!(view.has_property(1, &mut context).unwrap());
    assert!(!view.has_property(4, &mut context).unwrap());

    assert!(buffer.borrow_mut().as_array_buffer_mut().unwrap().resize(8));
    assert!(view.has_property(4, &mut context).unwrap());
    view.set(7, 9, false, &mut context).unwrap();
    assert!(view.get(7, &mut context).unwrap().strict_equals(&JsValue::new(9)));

    // Shrinking drops the tail.
    assert!(buffer.borrow_mut().as_array_buffer_mut().unwrap().resize(4));
    assert!(!view.has_property(7, &mut context).unwrap());
    assert!(view.get(7, &mut context).unwrap().is_undefined());
}

#[test]
fn bigint_typed_array_requires_bigint_values() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(16, &mut context).unwrap();
    let view = integer_indexed_object_create(
        buffer,
        TypedArrayKind::BigInt64,
        0,
        Some(2),
        &mut context,
    )
    .unwrap();

    view.set(0, JsBigInt::from(-5i32), false, &mut context).unwrap();
    let read = view.get(0, &mut context).unwrap();
    assert_eq!(read.as_bigint().unwrap(), &JsBigInt::from(-5i32));

    // Numbers refuse to convert to bigint elements.
    assert!(view.set(1, 5, false, &mut context).is_err());
}

#[test]
fn typed_array_creation_validates_offset_and_fit() {
    let mut context = Context::default();

    let buffer = allocate_array_buffer(8, &mut context).unwrap();

    // Misaligned offset.
    assert!(integer_indexed_object_create(
        buffer.clone(),
        TypedArrayKind::Int32,
        2,
        Some(1),
        &mut context,
    )
    .is_err());

    // View does not fit.
    assert!(integer_indexed_object_create(
        buffer.clone(),
        TypedArrayKind::Int32,
        0,
        Some(3),
        &mut context,
    )
    .is_err());

    // A valid view over the tail of the buffer.
    let view =
        integer_indexed_object_create(buffer, TypedArrayKind::Int32, 4, Some(1), &mut context)
            .unwrap();
    view.set(0, 0x0102_0304, false, &mut context).unwrap();
    assert!(view
        .get(0, &mut context)
        .unwrap()
        .strict_equals(&JsValue::new(0x0102_0304)));
}
