//! The prototype registry of a context: the standard constructors and
//! prototype objects that constructor helpers install prototypes from.

use crate::object::{JsObject, Object};

/// Store a builtin constructor (such as `Object`) and its corresponding
/// prototype.
#[derive(Debug, Clone)]
pub struct StandardConstructor {
    constructor: JsObject,
    prototype: JsObject,
}

impl Default for StandardConstructor {
    fn default() -> Self {
        Self {
            constructor: JsObject::new(Object::default()),
            prototype: JsObject::new(Object::default()),
        }
    }
}

impl StandardConstructor {
    /// Return the prototype of the constructor object.
    ///
    /// This is the same as `Object.prototype`, `Array.prototype`, etc.
    #[inline]
    pub fn prototype(&self) -> JsObject {
        self.prototype.clone()
    }

    /// Return the constructor object.
    ///
    /// This is the same as `Object`, `Array`, etc.
    #[inline]
    pub fn constructor(&self) -> JsObject {
        self.constructor.clone()
    }
}

/// The registry of every standard builtin a context carries.
///
/// All of these are allocated empty when the context is created and wired up
/// by `builtins::init`; they are referenced by identity afterwards.
#[derive(Debug, Default, Clone)]
pub struct StandardObjects {
    object: StandardConstructor,
    function: StandardConstructor,
    array: StandardConstructor,
    boolean: StandardConstructor,
    number: StandardConstructor,
    string: StandardConstructor,
    symbol: StandardConstructor,
    bigint: StandardConstructor,
    proxy: StandardConstructor,
    error: StandardConstructor,
    type_error: StandardConstructor,
    range_error: StandardConstructor,
    reference_error: StandardConstructor,
    syntax_error: StandardConstructor,
    eval_error: StandardConstructor,
    uri_error: StandardConstructor,
    aggregate_error: StandardConstructor,
    reflect: JsObject,
}

impl StandardObjects {
    /// Return the `Object` constructor entry.
    #[inline]
    pub fn object_object(&self) -> &StandardConstructor {
        &self.object
    }

    /// Return the `Function` constructor entry.
    #[inline]
    pub fn function_object(&self) -> &StandardConstructor {
        &self.function
    }

    /// Return the `Array` constructor entry.
    #[inline]
    pub fn array_object(&self) -> &StandardConstructor {
        &self.array
    }

    /// Return the `Boolean` constructor entry.
    #[inline]
    pub fn boolean_object(&self) -> &StandardConstructor {
        &self.boolean
    }

    /// Return the `Number` constructor entry.
    #[inline]
    pub fn number_object(&self) -> &StandardConstructor {
        &self.number
    }

    /// Return the `String` constructor entry.
    #[inline]
    pub fn string_object(&self) -> &StandardConstructor {
        &self.string
    }

    /// Return the `Symbol` constructor entry.
    #[inline]
    pub fn symbol_object(&self) -> &StandardConstructor {
        &self.symbol
    }

    /// Return the `BigInt` constructor entry.
    #[inline]
    pub fn bigint_object(&self) -> &StandardConstructor {
        &self.bigint
    }

    /// Return the `Proxy` constructor entry.
    #[inline]
    pub fn proxy_object(&self) -> &StandardConstructor {
        &self.proxy
    }

    /// Return the `Error` constructor entry.
    #[inline]
    pub fn error_object(&self) -> &StandardConstructor {
        &self.error
    }

    /// Return the `TypeError` constructor entry.
    #[inline]
    pub fn type_error_object(&self) -> &StandardConstructor {
        &self.type_error
    }

    /// Return the `RangeError` constructor entry.
    #[inline]
    pub fn range_error_object(&self) -> &StandardConstructor {
        &self.range_error
    }

    /// Return the `ReferenceError` constructor entry.
    #[inline]
    pub fn reference_error_object(&self) -> &StandardConstructor {
        &self.reference_error
    }

    /// Return the `SyntaxError` constructor entry.
    #[inline]
    pub fn syntax_error_object(&self) -> &StandardConstructor {
        &self.syntax_error
    }

    /// Return the `EvalError` constructor entry.
    #[inline]
    pub fn eval_error_object(&self) -> &StandardConstructor {
        &self.eval_error
    }

    /// Return the `URIError` constructor entry.
    #[inline]
    pub fn uri_error_object(&self) -> &StandardConstructor {
        &self.uri_error
    }

    /// Return the `AggregateError` constructor entry.
    #[inline]
    pub fn aggregate_error_object(&self) -> &StandardConstructor {
        &self.aggregate_error
    }

    /// Return the `Reflect` namespace object.
    #[inline]
    pub fn reflect_object(&self) -> JsObject {
        self.reflect.clone()
    }
}
