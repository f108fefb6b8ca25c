//! Tests for the type-conversion abstract operations and the comparison
//! algorithms.

use crate::{
    builtins::function::make_builtin_fn,
    property::PropertyDescriptor,
    value::{IntegerOrInfinity, PreferredType},
    Context, JsBigInt, JsValue,
};

#[test]
fn to_primitive_prefers_symbol_to_primitive() {
    let mut context = Context::default();

    // Both valueOf and toString are callable, but @@toPrimitive wins.
    let obj = context.construct_object();
    let value_of = make_builtin_fn(|_, _, _| Ok(JsValue::new(1)), "valueOf", 0, &mut context);
    obj.create_data_property("valueOf", value_of, &mut context).unwrap();
    let to_string = make_builtin_fn(|_, _, _| Ok(JsValue::new("nope")), "toString", 0, &mut context);
    obj.create_data_property("toString", to_string, &mut context).unwrap();

    let exotic = make_builtin_fn(|_, _, _| Ok(JsValue::new("x")), "[Symbol.toPrimitive]", 1, &mut context);
    let to_primitive = context.well_known_symbols().to_primitive_symbol();
    obj.create_data_property(to_primitive, exotic, &mut context).unwrap();

    let value = JsValue::new(obj);
    for hint in [PreferredType::Default, PreferredType::String, PreferredType::Number] {
        let result = value.to_primitive(&mut context, hint).unwrap();
        assert_eq!(result.as_string().unwrap().as_str(), "x");
    }

    // `"" + obj` boils down to ToPrimitive(Default) then string concatenation.
    let concatenated = format!("{}", value.to_primitive(&mut context, PreferredType::Default)
        .unwrap()
        .to_string(&mut context)
        .unwrap());
    assert_eq!(concatenated, "x");
}

#[test]
fn to_primitive_object_result_from_symbol_to_primitive_throws() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let exotic = make_builtin_fn(
        |_, _, context| Ok(context.construct_object().into()),
        "[Symbol.toPrimitive]",
        1,
        &mut context,
    );
    let to_primitive = context.well_known_symbols().to_primitive_symbol();
    obj.create_data_property(to_primitive, exotic, &mut context).unwrap();

    assert!(JsValue::new(obj)
        .to_primitive(&mut context, PreferredType::Number)
        .is_err());
}

#[test]
fn ordinary_to_primitive_hint_order() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let value_of = make_builtin_fn(|_, _, _| Ok(JsValue::new(42)), "valueOf", 0, &mut context);
    obj.create_data_property("valueOf", value_of, &mut context).unwrap();
    let to_string = make_builtin_fn(|_, _, _| Ok(JsValue::new("str")), "toString", 0, &mut context);
    obj.create_data_property("toString", to_string, &mut context).unwrap();

    let value = JsValue::new(obj);

    // Number hint: valueOf first.
    let number_hint = value.to_primitive(&mut context, PreferredType::Number).unwrap();
    assert!(number_hint.strict_equals(&JsValue::new(42)));

    // String hint: toString first.
    let string_hint = value.to_primitive(&mut context, PreferredType::String).unwrap();
    assert_eq!(string_hint.as_string().unwrap().as_str(), "str");

    // A plain object with no own methods falls back to a TypeError only when
    // the prototype chain has no usable method either; the default
    // prototypes here carry none.
    let blank = crate::object::JsObject::new(crate::object::Object::new());
    assert!(JsValue::new(blank)
        .to_primitive(&mut context, PreferredType::Number)
        .is_err());
}

#[test]
fn wrappers_unbox_their_primitive_value() {
    let mut context = Context::default();

    let number = JsValue::rational(6.5).to_object(&mut context).unwrap();
    assert_eq!(JsValue::new(number).to_number(&mut context).unwrap(), 6.5);

    let string = JsValue::new("12").to_object(&mut context).unwrap();
    assert_eq!(JsValue::new(string).to_number(&mut context).unwrap(), 12.0);

    let boolean = JsValue::new(true).to_object(&mut context).unwrap();
    assert_eq!(
        JsValue::new(boolean.clone()).to_number(&mut context).unwrap(),
        1.0
    );
    // The wrapper itself is an object, hence truthy.
    assert!(JsValue::new(boolean).to_boolean());
}

#[test]
fn to_number_handles_objects_through_to_primitive() {
    let mut context = Context::default();

    let obj = context.construct_object();
    let value_of = make_builtin_fn(|_, _, _| Ok(JsValue::new("0x10")), "valueOf", 0, &mut context);
    obj.create_data_property("valueOf", value_of, &mut context).unwrap();

    assert_eq!(JsValue::new(obj).to_number(&mut context).unwrap(), 16.0);
}

#[test]
fn to_string_formats_numbers_like_the_language() {
    let mut context = Context::default();

    for (value, expected) in [
        (JsValue::rational(f64::NAN), "NaN"),
        (JsValue::rational(f64::INFINITY), "Infinity"),
        (JsValue::rational(f64::NEG_INFINITY), "-Infinity"),
        (JsValue::rational(-0.0), "0"),
        (JsValue::new(123), "123"),
        (JsValue::rational(1.5), "1.5"),
        (JsValue::rational(1e21), "1e+21"),
        (JsValue::new(JsBigInt::from(10u32)), "10"),
        (JsValue::new(true), "true"),
        (JsValue::undefined(), "undefined"),
        (JsValue::null(), "null"),
    ] {
        assert_eq!(value.to_string(&mut context).unwrap().as_str(), expected);
    }

    // Symbols refuse ToString.
    let symbol = context.construct_symbol(None);
    assert!(JsValue::new(symbol).to_string(&mut context).is_err());
}

#[test]
fn to_bigint_conversions() {
    let mut context = Context::default();

    assert_eq!(
        JsValue::new(true).to_bigint(&mut context).unwrap(),
        JsBigInt::one()
    );
    assert_eq!(
        JsValue::new("42").to_bigint(&mut context).unwrap(),
        JsBigInt::from(42u32)
    );
    assert_eq!(
        JsValue::new("0xff").to_bigint(&mut context).unwrap(),
        JsBigInt::from(255u32)
    );

    // Numbers do not implicitly convert.
    assert!(JsValue::new(1).to_bigint(&mut context).is_err());
    // Invalid literals are syntax errors.
    let error = JsValue::new("10n").to_bigint(&mut context).unwrap_err();
    let name = error.as_object().unwrap().get("name", &mut context).unwrap();
    assert_eq!(name.as_string().unwrap().as_str(), "SyntaxError");
}

#[test]
fn to_length_and_to_index_clamp_and_validate() {
    let mut context = Context::default();

    assert_eq!(JsValue::new(-5).to_length(&mut context).unwrap(), 0);
    assert_eq!(
        JsValue::rational(f64::INFINITY).to_length(&mut context).unwrap(),
        (1u64 << 53) - 1
    );
    assert_eq!(JsValue::rational(3.7).to_length(&mut context).unwrap(), 3);

    assert_eq!(JsValue::undefined().to_index(&mut context).unwrap(), 0);
    assert_eq!(JsValue::new(5).to_index(&mut context).unwrap(), 5);
    assert!(JsValue::new(-1).to_index(&mut context).is_err());
    assert!(JsValue::rational(f64::INFINITY).to_index(&mut context).is_err());
}

#[test]
fn to_integer_or_infinity_preserves_infinities() {
    let mut context = Context::default();

    assert_eq!(
        JsValue::rational(f64::INFINITY)
            .to_integer_or_infinity(&mut context)
            .unwrap(),
        IntegerOrInfinity::PositiveInfinity
    );
    assert_eq!(
        JsValue::rational(f64::NEG_INFINITY)
            .to_integer_or_infinity(&mut context)
            .unwrap(),
        IntegerOrInfinity::NegativeInfinity
    );
    assert_eq!(
        JsValue::nan().to_integer_or_infinity(&mut context).unwrap(),
        IntegerOrInfinity::Integer(0)
    );
}

#[test]
fn abstract_equality_coerces_across_types() {
    let mut context = Context::default();

    let cases = [
        (JsValue::null(), JsValue::undefined(), true),
        (JsValue::new("1"), JsValue::new(1), true),
        (JsValue::new(true), JsValue::new(1), true),
        (JsValue::new(false), JsValue::new(""), true),
        (JsValue::new("0x10"), JsValue::new(16), true),
        (JsValue::new(JsBigInt::one()), JsValue::new(1), true),
        (JsValue::new(JsBigInt::one()), JsValue::new("1"), true),
        (JsValue::new(JsBigInt::one()), JsValue::rational(1.5), false),
        (JsValue::nan(), JsValue::nan(), false),
        (JsValue::new("abc"), JsValue::new(1), false),
    ];
    for (x, y, expected) in cases {
        assert_eq!(
            x.equals(&y, &mut context).unwrap(),
            expected,
            "{} == {}",
            x.display(),
            y.display()
        );
        assert_eq!(y.equals(&x, &mut context).unwrap(), expected);
    }

    // An object coerces through ToPrimitive for ==.
    let obj = context.construct_object();
    let value_of = make_builtin_fn(|_, _, _| Ok(JsValue::new(3)), "valueOf", 0, &mut context);
    obj.create_data_property("valueOf", value_of, &mut context).unwrap();
    assert!(JsValue::new(obj)
        .equals(&JsValue::new(3), &mut context)
        .unwrap());
}

#[test]
fn less_than_compares_strings_numbers_and_bigints() {
    let mut context = Context::default();

    assert!(JsValue::new(1).lt(&JsValue::new(2), &mut context).unwrap());
    assert!(!JsValue::new(2).lt(&JsValue::new(2), &mut context).unwrap());
    assert!(JsValue::new("a").lt(&JsValue::new("b"), &mut context).unwrap());
    assert!(JsValue::new("a").lt(&JsValue::new("ab"), &mut context).unwrap());
    // String/string comparison is lexicographic, not numeric.
    assert!(JsValue::new("10").lt(&JsValue::new("9"), &mut context).unwrap());
    // String/number comparison is numeric.
    assert!(!JsValue::new("10").lt(&JsValue::new(9), &mut context).unwrap());

    // NaN makes the relation undefined, which is false for `<` both ways.
    assert!(!JsValue::nan().lt(&JsValue::new(1), &mut context).unwrap());
    assert!(!JsValue::new(1).lt(&JsValue::nan(), &mut context).unwrap());

    // BigInt vs Number compares exactly.
    let big = JsValue::new(JsBigInt::from(2u32));
    assert!(big.lt(&JsValue::rational(2.5), &mut context).unwrap());
    assert!(!big.lt(&JsValue::rational(2.0), &mut context).unwrap());
    assert!(JsValue::rational(1.5).lt(&big, &mut context).unwrap());
}

#[test]
fn to_property_key_collapses_canonical_indices() {
    let mut context = Context::default();

    use crate::property::PropertyKey;
    assert_eq!(
        JsValue::new("42").to_property_key(&mut context).unwrap(),
        PropertyKey::Index(42)
    );
    assert_eq!(
        JsValue::new(42).to_property_key(&mut context).unwrap(),
        PropertyKey::Index(42)
    );
    assert!(matches!(
        JsValue::new("042").to_property_key(&mut context).unwrap(),
        PropertyKey::String(_)
    ));
    assert!(matches!(
        JsValue::rational(1.5).to_property_key(&mut context).unwrap(),
        PropertyKey::String(_)
    ));

    let symbol = context.construct_symbol(None);
    assert_eq!(
        JsValue::new(symbol.clone()).to_property_key(&mut context).unwrap(),
        PropertyKey::Symbol(symbol)
    );
}

#[test]
fn instance_of_walks_the_prototype_chain() {
    let mut context = Context::default();

    let object_ctor = context.standard_objects().object_object().constructor();
    let array_ctor = context.standard_objects().array_object().constructor();

    let array = crate::builtins::array::Array::array_create(0, None, &mut context).unwrap();
    let value = JsValue::new(array);

    assert!(value
        .instance_of(&array_ctor.clone().into(), &mut context)
        .unwrap());
    // Array.prototype inherits from Object.prototype.
    assert!(value.instance_of(&object_ctor.into(), &mut context).unwrap());

    let plain = JsValue::new(context.construct_object());
    assert!(!plain.instance_of(&array_ctor.into(), &mut context).unwrap());

    // A non-object right-hand side throws.
    assert!(plain.instance_of(&JsValue::new(1), &mut context).is_err());
}

#[test]
fn to_property_descriptor_requires_consistent_fields() {
    let mut context = Context::default();

    let desc_obj = context.construct_object();
    desc_obj.create_data_property("value", 1, &mut context).unwrap();
    desc_obj.create_data_property("writable", true, &mut context).unwrap();

    let desc = JsValue::new(desc_obj.clone())
        .to_property_descriptor(&mut context)
        .unwrap();
    assert!(desc.is_data_descriptor());
    assert_eq!(desc.writable(), Some(true));

    // Mixing in an accessor field poisons the descriptor.
    let getter = make_builtin_fn(|_, _, _| Ok(JsValue::undefined()), "get", 0, &mut context);
    desc_obj.create_data_property("get", getter, &mut context).unwrap();
    assert!(JsValue::new(desc_obj)
        .to_property_descriptor(&mut context)
        .is_err());

    // A non-callable getter is rejected outright.
    let bad = context.construct_object();
    bad.create_data_property("get", 1, &mut context).unwrap();
    assert!(JsValue::new(bad).to_property_descriptor(&mut context).is_err());
}

#[test]
fn from_property_descriptor_reifies_every_present_field() {
    let mut context = Context::default();

    let desc = PropertyDescriptor::builder()
        .value(7)
        .writable(true)
        .enumerable(false)
        .configurable(true)
        .build();
    let reified = JsValue::from_property_descriptor(Some(&desc), &mut context).unwrap();
    let reified = reified.as_object().unwrap();

    assert!(reified.get("value", &mut context).unwrap().strict_equals(&JsValue::new(7)));
    assert!(reified.get("writable", &mut context).unwrap().to_boolean());
    assert!(!reified.get("enumerable", &mut context).unwrap().to_boolean());
    assert!(reified.get("configurable", &mut context).unwrap().to_boolean());

    assert!(JsValue::from_property_descriptor(None, &mut context)
        .unwrap()
        .is_undefined());
}
