//! Behaviour tests over the Rust API.
//!
//! The executor is an external collaborator, so everything here drives the
//! object model directly: internal methods, conversions and the executor
//! surface in [`crate::api`].

mod array;
mod conversions;
mod exotics;
mod object;
mod proxy;

use crate::{Context, JsValue};

fn sample_values(context: &mut Context) -> Vec<JsValue> {
    vec![
        JsValue::undefined(),
        JsValue::null(),
        JsValue::new(true),
        JsValue::new(false),
        JsValue::new(0),
        JsValue::new(-1),
        JsValue::rational(0.0),
        JsValue::rational(-0.0),
        JsValue::rational(1.5),
        JsValue::rational(f64::INFINITY),
        JsValue::new(""),
        JsValue::new("abc"),
        JsValue::new(crate::JsBigInt::zero()),
        JsValue::new(crate::JsBigInt::from(7u32)),
        context.construct_symbol(Some("sample".into())).into(),
        context.construct_object().into(),
    ]
}

#[test]
fn same_value_is_reflexive_even_for_nan() {
    let mut context = Context::default();

    for value in sample_values(&mut context) {
        assert!(
            JsValue::same_value(&value, &value),
            "SameValue({v}, {v}) must hold",
            v = value.display()
        );
    }

    let nan = JsValue::nan();
    assert!(JsValue::same_value(&nan, &nan));
    assert!(JsValue::same_value_zero(&nan, &nan));
    assert!(!nan.strict_equals(&nan));
}

#[test]
fn strict_equality_matches_same_value_for_non_nan() {
    let mut context = Context::default();
    let values = sample_values(&mut context);

    for x in &values {
        for y in &values {
            if x.as_number().map_or(false, f64::is_nan) || y.as_number().map_or(false, f64::is_nan)
            {
                continue;
            }
            // The only disagreement is the sign of zero.
            let zero_signs = JsValue::same_value_zero(x, y) && !JsValue::same_value(x, y);
            if zero_signs {
                assert!(x.strict_equals(y));
            } else {
                assert_eq!(x.strict_equals(y), JsValue::same_value(x, y));
            }
        }
    }
}

#[test]
fn zeros_are_strictly_equal_but_not_same_value() {
    let pos = JsValue::rational(0.0);
    let neg = JsValue::rational(-0.0);

    assert!(pos.strict_equals(&neg));
    assert!(JsValue::same_value_zero(&pos, &neg));
    assert!(!JsValue::same_value(&pos, &neg));
}

#[test]
fn uint32_round_trip_through_string() {
    let mut context = Context::default();

    for n in [0u32, 1, 42, 255, 1 << 16, i32::MAX as u32, 1 << 31, u32::MAX] {
        let string = JsValue::new(n).to_string(&mut context).unwrap();
        let number = JsValue::new(string).to_number(&mut context).unwrap();
        assert_eq!(JsValue::new(number).to_u32(&mut context).unwrap(), n);
    }
}

#[test]
fn object_identity_is_reference_identity() {
    let mut context = Context::default();

    let a = context.construct_object();
    let b = context.construct_object();

    assert!(JsValue::new(a.clone()).strict_equals(&a.clone().into()));
    assert!(!JsValue::new(a).strict_equals(&b.into()));
}

#[test]
fn symbols_are_identity_only() {
    let mut context = Context::default();

    let a = context.construct_symbol(Some("desc".into()));
    let b = context.construct_symbol(Some("desc".into()));

    assert!(JsValue::new(a.clone()).strict_equals(&a.clone().into()));
    assert!(!JsValue::new(a).strict_equals(&b.into()));
}

#[test]
fn microtasks_run_in_fifo_order_when_drained() {
    let mut context = Context::default();

    let log = context.construct_object();
    for value in 0..3 {
        let log = log.clone();
        context.enqueue_microtask(crate::context::NativeJob::new(move |context| {
            let len = log.length_of_array_like(context)?;
            log.set(len, value, true, context)?;
            log.set("length", len + 1, true, context)?;
            Ok(JsValue::undefined())
        }));
    }

    // Nothing runs until the embedder drains the queue.
    assert_eq!(log.length_of_array_like(&mut context).unwrap(), 0);

    context.run_microtasks();
    assert_eq!(log.length_of_array_like(&mut context).unwrap(), 3);
    for index in 0..3u32 {
        assert!(log
            .get(index, &mut context)
            .unwrap()
            .strict_equals(&JsValue::new(index)));
    }
}

#[test]
fn executor_surface_parks_errors_in_the_pending_slot() {
    let mut context = Context::default();

    let target = context.construct_object();
    let handler = context.construct_object();
    let proxy = crate::api::proxy_new(&mut context, &target.into(), &handler.into());
    let proxy = proxy.as_object().unwrap().clone();

    assert!(crate::api::proxy_revoke(&proxy));

    // A revoked proxy throws; the surface converts that into a sentinel
    // plus a pending exception.
    let value = crate::api::value_get(&mut context, &proxy, "x".into(), &proxy.clone().into());
    assert!(value.is_undefined());
    assert!(context.has_pending_exception());

    let error = context.take_pending_exception().unwrap();
    let name = error
        .as_object()
        .unwrap()
        .get("name", &mut context)
        .unwrap();
    assert_eq!(name.as_string().unwrap().as_str(), "TypeError");
    assert!(!context.has_pending_exception());
}

#[test]
fn strict_mode_turns_set_rejection_into_type_error() {
    let mut context = Context::default();

    let obj = context.construct_object();
    obj.define_property_or_throw(
        "x",
        crate::property::PropertyDescriptor::builder()
            .value(1)
            .writable(false)
            .enumerable(true)
            .configurable(true),
        &mut context,
    )
    .unwrap();

    // Sloppy mode: a silent false.
    let receiver = JsValue::new(obj.clone());
    assert!(!crate::api::value_set(
        &mut context,
        &obj,
        "x".into(),
        JsValue::new(2),
        &receiver
    ));
    assert!(!context.has_pending_exception());

    // Strict mode: the same rejection parks a TypeError.
    context.set_strict_mode(true);
    assert!(!crate::api::value_set(
        &mut context,
        &obj,
        "x".into(),
        JsValue::new(2),
        &receiver
    ));
    assert!(context.has_pending_exception());
    context.clear_pending_exception();
}
