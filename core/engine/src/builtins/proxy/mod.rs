//! This module implements the global `Proxy` object.
//!
//! The `Proxy` object enables you to create a proxy for another object,
//! which can intercept and redefine fundamental operations for that object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-proxy-objects

use crate::{
    builtins::{
        array::Array,
        function::{make_builtin_fn, make_closure_fn},
    },
    context::Context,
    gc::{custom_trace, Finalize, Trace},
    object::{JsObject, ObjectData},
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
    JsResult,
};

/// JavaScript `Proxy` object state.
#[derive(Debug, Finalize)]
pub struct Proxy {
    /// `(target, handler)`; emptied on revocation.
    data: Option<(JsObject, JsObject)>,
    /// Whether the proxy has a `[[Call]]` internal method.
    call: bool,
    /// Whether the proxy has a `[[Construct]]` internal method.
    construct: bool,
}

unsafe impl Trace for Proxy {
    custom_trace!(this, {
        if let Some((target, handler)) = &this.data {
            mark(target);
            mark(handler);
        }
    });
}

impl Proxy {
    pub(crate) fn new(target: JsObject, handler: JsObject) -> Self {
        let call = target.is_callable();
        let construct = target.is_constructor();
        Self {
            data: Some((target, handler)),
            call,
            construct,
        }
    }

    /// The `(target, handler)` pair, or `None` when revoked.
    pub(crate) fn data(&self) -> Option<(JsObject, JsObject)> {
        self.data.clone()
    }

    /// The `(target, handler)` pair, or a `TypeError` when revoked.
    pub(crate) fn try_data(&self, context: &mut Context) -> JsResult<(JsObject, JsObject)> {
        self.data
            .clone()
            .ok_or_else(|| context.construct_type_error("Proxy object has been revoked"))
    }

    /// Empty the target/handler pair; every internal method throws afterwards.
    pub(crate) fn revoke(&mut self) {
        self.data = None;
    }

    /// Whether the proxy is revoked.
    pub fn is_revoked(&self) -> bool {
        self.data.is_none()
    }

    /// Whether the proxy has a `[[Call]]` internal method.
    pub(crate) fn is_callable(&self) -> bool {
        self.call
    }

    /// Whether the proxy has a `[[Construct]]` internal method.
    pub(crate) fn is_constructor(&self) -> bool {
        self.construct
    }

    /// The abstract operation `ProxyCreate`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxycreate
    pub fn create(
        target: &JsValue,
        handler: &JsValue,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let target = target.as_object().ok_or_else(|| {
            context.construct_type_error("Proxy constructor called with non-object target")
        })?;

        // 2. If Type(handler) is not Object, throw a TypeError exception.
        let handler = handler.as_object().ok_or_else(|| {
            context.construct_type_error("Proxy constructor called with non-object handler")
        })?;

        // 3 - 7. Allocate the proxy with its trap-dispatching internal
        // methods; callability mirrors the target.
        let prototype = context.standard_objects().object_object().prototype();
        let proxy = JsObject::from_proto_and_data(
            prototype.into(),
            ObjectData::proxy(Self::new(target.clone(), handler.clone())),
        );

        // 8. Return P.
        Ok(proxy)
    }

    /// `[[Call]]` of a proxy object: the `apply` trap.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-call-thisargument-argumentslist
    pub(crate) fn call(
        obj: &JsObject,
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1 - 3. Revocation check.
        let (target, handler) = {
            let object = obj.borrow();
            let proxy = object.as_proxy().expect("proxy [[Call]] on non-proxy");
            proxy.data()
        }
        .ok_or_else(|| context.construct_type_error("Proxy object has been revoked"))?;

        // 4 - 6. If trap is undefined, return ? Call(target, thisArgument, argumentsList).
        let trap = match JsValue::new(handler.clone()).get_method("apply".into(), context)? {
            Some(trap) => trap,
            None => return context.call(&target.into(), this, args),
        };

        // 7. Let argArray be ! CreateArrayFromList(argumentsList).
        let arg_array = Array::create_array_from_list(args.to_vec(), context);

        // 8. Return ? Call(trap, handler, « target, thisArgument, argArray »).
        trap.call(
            &handler.into(),
            &[target.into(), this.clone(), arg_array.into()],
            context,
        )
    }

    /// `[[Construct]]` of a proxy object: the `construct` trap.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-construct-argumentslist-newtarget
    pub(crate) fn construct(
        obj: &JsObject,
        args: &[JsValue],
        new_target: &JsValue,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1 - 3. Revocation check.
        let (target, handler) = {
            let object = obj.borrow();
            let proxy = object.as_proxy().expect("proxy [[Construct]] on non-proxy");
            proxy.data()
        }
        .ok_or_else(|| context.construct_type_error("Proxy object has been revoked"))?;

        // 5 - 6. If trap is undefined, return ? Construct(target, argumentsList, newTarget).
        let trap = match JsValue::new(handler.clone()).get_method("construct".into(), context)? {
            Some(trap) => trap,
            None => return target.construct(args, new_target, context),
        };

        // 7. Let argArray be ! CreateArrayFromList(argumentsList).
        let arg_array = Array::create_array_from_list(args.to_vec(), context);

        // 8. Let newObj be ? Call(trap, handler, « target, argArray, newTarget »).
        let new_obj = trap.call(
            &handler.into(),
            &[target.into(), arg_array.into(), new_target.clone()],
            context,
        )?;

        // 9. If Type(newObj) is not Object, throw a TypeError exception.
        if !new_obj.is_object() {
            return Err(
                context.construct_type_error("proxy construct trap must return an object")
            );
        }

        // 10. Return newObj.
        Ok(new_obj)
    }

    /// The `Proxy` constructor.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxy-target-handler
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(context.construct_type_error(
                "Proxy constructor requires 'new'",
            ));
        }

        // 2. Return ? ProxyCreate(target, handler).
        let target = args.first().cloned().unwrap_or_default();
        let handler = args.get(1).cloned().unwrap_or_default();
        Self::create(&target, &handler, context).map(JsValue::from)
    }

    /// `Proxy.revocable ( target, handler )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxy.revocable
    pub fn revocable(
        _this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let p be ? ProxyCreate(target, handler).
        let target = args.first().cloned().unwrap_or_default();
        let handler = args.get(1).cloned().unwrap_or_default();
        let proxy = Self::create(&target, &handler, context)?;

        // 3 - 4. The revoker captures the proxy and empties it when called.
        let revoker = make_closure_fn(
            |_this, _args, captures, _context| {
                if let Some(proxy) = captures.as_object() {
                    if let Some(proxy) = proxy.borrow_mut().as_proxy_mut() {
                        proxy.revoke();
                    }
                }
                Ok(JsValue::undefined())
            },
            proxy.clone().into(),
            "",
            0,
            false,
            context,
        );

        // 5. Let result be ! OrdinaryObjectCreate(%Object.prototype%).
        let result = context.construct_object();

        // 6 - 7. Attach the pair.
        result
            .create_data_property_or_throw("proxy", proxy, context)
            .expect("CreateDataPropertyOrThrow cannot fail here");
        result
            .create_data_property_or_throw("revoke", revoker, context)
            .expect("CreateDataPropertyOrThrow cannot fail here");

        // 8. Return result.
        Ok(result.into())
    }
}

/// Initialize the `Proxy` constructor and register it on the global object.
pub(crate) fn init(context: &mut Context) {
    let standard = context.standard_objects().proxy_object().clone();
    let constructor = standard.constructor();

    let function_prototype = context.standard_objects().function_object().prototype();
    {
        let mut object = constructor.borrow_mut();
        object.data = ObjectData::function(crate::builtins::function::Function::Native {
            function: Proxy::constructor,
            constructor: true,
        });
        object.set_prototype_instance(function_prototype.into());
    }

    let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    let revocable = make_builtin_fn(Proxy::revocable, "revocable", 2, context);
    constructor.insert(
        "revocable",
        PropertyDescriptor::builder().value(revocable).attributes(attribute),
    );
    constructor.insert(
        "length",
        PropertyDescriptor::builder()
            .value(2)
            .writable(false)
            .enumerable(false)
            .configurable(true),
    );
    constructor.insert(
        "name",
        PropertyDescriptor::builder()
            .value("Proxy")
            .writable(false)
            .enumerable(false)
            .configurable(true),
    );

    context.register_global_builtin("Proxy", constructor);
}
