//! This module implements the error object hierarchy.
//!
//! Every error the core raises is an ordinary object tagged with an
//! [`ErrorKind`], carrying `message` (own) and `name` (on the prototype)
//! plus a `stack` label captured from the context's frame stack at
//! construction time.

use crate::{
    builtins::function::{make_constructor_fn, ordinary_create_from_constructor},
    context::{Context, StandardConstructor, StandardObjects},
    gc::{empty_trace, Finalize, Trace},
    object::{JsObject, ObjectData},
    property::{Attribute, PropertyDescriptor},
    value::JsValue,
    JsResult,
};

/// The kind of an error object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `AggregateError`
    Aggregate,
    /// Plain `Error`
    Base,
    /// `EvalError`
    Eval,
    /// `RangeError`
    Range,
    /// `ReferenceError`
    Reference,
    /// `SyntaxError`
    Syntax,
    /// `TypeError`
    Type,
    /// `URIError`
    Uri,
}

impl Finalize for ErrorKind {}

unsafe impl Trace for ErrorKind {
    empty_trace!();
}

impl ErrorKind {
    /// The `name` of this error kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aggregate => "AggregateError",
            Self::Base => "Error",
            Self::Eval => "EvalError",
            Self::Range => "RangeError",
            Self::Reference => "ReferenceError",
            Self::Syntax => "SyntaxError",
            Self::Type => "TypeError",
            Self::Uri => "URIError",
        }
    }

    /// The registry accessor for this kind's standard constructor.
    pub(crate) fn standard_constructor(
        self,
    ) -> fn(&StandardObjects) -> &StandardConstructor {
        match self {
            Self::Aggregate => StandardObjects::aggregate_error_object,
            Self::Base => StandardObjects::error_object,
            Self::Eval => StandardObjects::eval_error_object,
            Self::Range => StandardObjects::range_error_object,
            Self::Reference => StandardObjects::reference_error_object,
            Self::Syntax => StandardObjects::syntax_error_object,
            Self::Type => StandardObjects::type_error_object,
            Self::Uri => StandardObjects::uri_error_object,
        }
    }
}

/// Build a new error object of the given kind directly off the registry.
///
/// This is the path `Context::construct_type_error` and friends use; it
/// deliberately avoids the internal-method machinery so that constructing a
/// stack-overflow error cannot itself recurse.
pub(crate) fn create_error_object(
    kind: ErrorKind,
    message: String,
    context: &mut Context,
) -> JsValue {
    let prototype = kind.standard_constructor()(context.standard_objects()).prototype();
    let object = JsObject::from_proto_and_data(prototype.into(), ObjectData::error(kind));

    let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
    object.insert(
        "message",
        PropertyDescriptor::builder().value(message).attributes(attribute),
    );
    object.insert(
        "stack",
        PropertyDescriptor::builder()
            .value(context.capture_stack_trace())
            .attributes(attribute),
    );

    object.into()
}

/// The constructor shared by every error kind.
fn error_constructor(
    kind: ErrorKind,
    new_target: &JsValue,
    args: &[JsValue],
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1 - 2. OrdinaryCreateFromConstructor(newTarget, "%<Kind>.prototype%").
    let obj = ordinary_create_from_constructor(
        new_target,
        kind.standard_constructor(),
        ObjectData::error(kind),
        context,
    )?;

    // 3. If message is not undefined, define an own `message` property.
    if let Some(message) = args.first() {
        if !message.is_undefined() {
            let message = message.to_string(context)?;
            obj.insert(
                "message",
                PropertyDescriptor::builder()
                    .value(message)
                    .writable(true)
                    .enumerable(false)
                    .configurable(true),
            );
        }
    }

    obj.insert(
        "stack",
        PropertyDescriptor::builder()
            .value(context.capture_stack_trace())
            .writable(true)
            .enumerable(false)
            .configurable(true),
    );

    Ok(obj.into())
}

macro_rules! error_constructors {
    ($( $fn_name:ident => $kind:expr ),* $(,)?) => {
        $(
            fn $fn_name(
                new_target: &JsValue,
                args: &[JsValue],
                context: &mut Context,
            ) -> JsResult<JsValue> {
                error_constructor($kind, new_target, args, context)
            }
        )*
    };
}

error_constructors! {
    aggregate_error => ErrorKind::Aggregate,
    base_error => ErrorKind::Base,
    eval_error => ErrorKind::Eval,
    range_error => ErrorKind::Range,
    reference_error => ErrorKind::Reference,
    syntax_error => ErrorKind::Syntax,
    type_error => ErrorKind::Type,
    uri_error => ErrorKind::Uri,
}

const fn native_constructor(kind: ErrorKind) -> crate::builtins::function::NativeFunction {
    match kind {
        ErrorKind::Aggregate => aggregate_error,
        ErrorKind::Base => base_error,
        ErrorKind::Eval => eval_error,
        ErrorKind::Range => range_error,
        ErrorKind::Reference => reference_error,
        ErrorKind::Syntax => syntax_error,
        ErrorKind::Type => type_error,
        ErrorKind::Uri => uri_error,
    }
}

/// Initialize the error constructors and prototypes, and register them on
/// the global object.
pub(crate) fn init(context: &mut Context) {
    let object_prototype = context.standard_objects().object_object().prototype();
    let base = context.standard_objects().error_object().clone();

    let kinds = [
        ErrorKind::Base,
        ErrorKind::Aggregate,
        ErrorKind::Eval,
        ErrorKind::Range,
        ErrorKind::Reference,
        ErrorKind::Syntax,
        ErrorKind::Type,
        ErrorKind::Uri,
    ];

    for kind in kinds {
        let standard = kind.standard_constructor()(context.standard_objects()).clone();
        let prototype = standard.prototype();
        let constructor = standard.constructor();

        // Every native error prototype inherits from `Error.prototype`,
        // which inherits from `Object.prototype`.
        let parent = if kind == ErrorKind::Base {
            object_prototype.clone()
        } else {
            base.prototype()
        };
        prototype.borrow_mut().set_prototype_instance(parent.into());

        let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
        prototype.insert(
            "name",
            PropertyDescriptor::builder().value(kind.name()).attributes(attribute),
        );
        prototype.insert(
            "message",
            PropertyDescriptor::builder().value("").attributes(attribute),
        );

        make_constructor_fn(
            kind.name(),
            1,
            native_constructor(kind),
            &constructor,
            &prototype,
            context,
        );

        context.register_global_property(
            kind.name(),
            constructor,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        );
    }
}
