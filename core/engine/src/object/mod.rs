//! This module implements the Rust representation of a JavaScript object.
//!
//! An [`Object`] is a fixed record (property storage, prototype link,
//! integrity flags) plus an [`ObjectData`] that tags the object's exotic
//! kind and selects the function table its internal methods dispatch
//! through. The set of exotic kinds is closed.

use crate::{
    bigint::JsBigInt,
    builtins::{
        array_buffer::ArrayBuffer, error::ErrorKind, function::Function, proxy::Proxy,
        typed_array::IntegerIndexed,
    },
    gc::{custom_trace, Finalize, Trace},
    property::{PropertyDescriptor, PropertyKey},
    string::JsString,
    symbol::JsSymbol,
    value::JsValue,
};
use std::fmt::{self, Display};

mod jsobject;
mod property_map;
mod shape;

pub(crate) mod internal_methods;

pub use jsobject::{BorrowError, BorrowMutError, IntegrityLevel, JsObject, Ref, RefMut};
pub use property_map::PropertyMap;
pub use shape::Shape;

pub(crate) use internal_methods::InternalObjectMethods;
pub(crate) use property_map::MAX_DENSE;

use internal_methods::{
    ARRAY_EXOTIC_INTERNAL_METHODS, INTEGER_INDEXED_EXOTIC_INTERNAL_METHODS,
    ORDINARY_INTERNAL_METHODS, PROXY_EXOTIC_INTERNAL_METHODS, STRING_EXOTIC_INTERNAL_METHODS,
};

/// Static `prototype`, usually set on constructors as a key to point to their respective
/// prototype object.
pub static PROTOTYPE: &str = "prototype";

/// The internal representation of a JavaScript object.
#[derive(Debug, Finalize)]
pub struct Object {
    /// The type of the object.
    pub data: ObjectData,
    /// The collection of properties contained in the object.
    properties: PropertyMap,
    /// Instance prototype `__proto__`.
    prototype: JsValue,
    /// Whether it can have new properties added to it.
    extensible: bool,
    /// Whether the object went through `Object.seal`.
    sealed: bool,
    /// Whether the object went through `Object.freeze`.
    frozen: bool,
    /// The Annex B `[[IsHTMLDDA]]` marker (`document.all` emulation).
    htmldda: bool,
}

unsafe impl Trace for Object {
    custom_trace!(this, {
        mark(&this.data);
        mark(&this.properties);
        mark(&this.prototype);
    });
}

/// Defines the kind of an object and its internal methods.
#[derive(Debug, Finalize)]
pub struct ObjectData {
    /// The exotic kind of the object, together with its kind-specific state.
    pub kind: ObjectKind,
    pub(crate) internal_methods: &'static InternalObjectMethods,
}

unsafe impl Trace for ObjectData {
    custom_trace!(this, {
        mark(&this.kind);
    });
}

/// The different kinds of objects.
#[derive(Debug, Finalize)]
pub enum ObjectKind {
    /// An `Array` exotic object.
    Array,
    /// An `ArrayBuffer` backing store.
    ArrayBuffer(ArrayBuffer),
    /// A `BigInt` wrapper object.
    BigInt(JsBigInt),
    /// A `Boolean` wrapper object.
    Boolean(bool),
    /// An error object, tagged with its error kind.
    Error(ErrorKind),
    /// A callable (and possibly constructable) function object.
    Function(Function),
    /// The global object of a context.
    Global,
    /// An integer-indexed (typed array) exotic object.
    IntegerIndexed(IntegerIndexed),
    /// A `Number` wrapper object.
    Number(f64),
    /// An ordinary object.
    Ordinary,
    /// A `Proxy` exotic object.
    Proxy(Proxy),
    /// A `String` wrapper, with its string exotic index properties.
    String(JsString),
    /// A `Symbol` wrapper object.
    Symbol(JsSymbol),
}

unsafe impl Trace for ObjectKind {
    custom_trace!(this, {
        match this {
            ObjectKind::ArrayBuffer(buffer) => mark(buffer),
            ObjectKind::Function(function) => mark(function),
            ObjectKind::IntegerIndexed(view) => mark(view),
            ObjectKind::Proxy(proxy) => mark(proxy),
            ObjectKind::BigInt(_)
            | ObjectKind::Boolean(_)
            | ObjectKind::Error(_)
            | ObjectKind::Global
            | ObjectKind::Number(_)
            | ObjectKind::Ordinary
            | ObjectKind::Array
            | ObjectKind::String(_)
            | ObjectKind::Symbol(_) => {}
        }
    });
}

impl ObjectData {
    /// Create an `ObjectData` for an ordinary object.
    pub fn ordinary() -> Self {
        Self {
            kind: ObjectKind::Ordinary,
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for an array exotic object.
    pub fn array() -> Self {
        Self {
            kind: ObjectKind::Array,
            internal_methods: &ARRAY_EXOTIC_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for an `ArrayBuffer`.
    pub fn array_buffer(buffer: ArrayBuffer) -> Self {
        Self {
            kind: ObjectKind::ArrayBuffer(buffer),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a `BigInt` wrapper.
    pub fn big_int(bigint: JsBigInt) -> Self {
        Self {
            kind: ObjectKind::BigInt(bigint),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a `Boolean` wrapper.
    pub fn boolean(boolean: bool) -> Self {
        Self {
            kind: ObjectKind::Boolean(boolean),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for an error object.
    pub fn error(kind: ErrorKind) -> Self {
        Self {
            kind: ObjectKind::Error(kind),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a function object.
    pub fn function(function: Function) -> Self {
        Self {
            kind: ObjectKind::Function(function),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for the global object.
    pub fn global() -> Self {
        Self {
            kind: ObjectKind::Global,
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for an integer-indexed exotic object.
    pub fn integer_indexed(view: IntegerIndexed) -> Self {
        Self {
            kind: ObjectKind::IntegerIndexed(view),
            internal_methods: &INTEGER_INDEXED_EXOTIC_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a `Number` wrapper.
    pub fn number(number: f64) -> Self {
        Self {
            kind: ObjectKind::Number(number),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a `Proxy` exotic object.
    pub fn proxy(proxy: Proxy) -> Self {
        Self {
            kind: ObjectKind::Proxy(proxy),
            internal_methods: &PROXY_EXOTIC_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a `String` wrapper, with the string exotic
    /// internal methods.
    pub fn string(string: JsString) -> Self {
        Self {
            kind: ObjectKind::String(string),
            internal_methods: &STRING_EXOTIC_INTERNAL_METHODS,
        }
    }

    /// Create an `ObjectData` for a `Symbol` wrapper.
    pub fn symbol(symbol: JsSymbol) -> Self {
        Self {
            kind: ObjectKind::Symbol(symbol),
            internal_methods: &ORDINARY_INTERNAL_METHODS,
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Array => "Array",
                Self::ArrayBuffer(_) => "ArrayBuffer",
                Self::BigInt(_) => "BigInt",
                Self::Boolean(_) => "Boolean",
                Self::Error(_) => "Error",
                Self::Function(_) => "Function",
                Self::Global => "Global",
                Self::IntegerIndexed(_) => "TypedArray",
                Self::Number(_) => "Number",
                Self::Ordinary => "Ordinary",
                Self::Proxy(_) => "Proxy",
                Self::String(_) => "String",
                Self::Symbol(_) => "Symbol",
            }
        )
    }
}

impl Default for Object {
    /// Return a new `Object` with an ordinary kind and no prototype.
    #[inline]
    fn default() -> Self {
        Self {
            data: ObjectData::ordinary(),
            properties: PropertyMap::new(),
            prototype: JsValue::Null,
            extensible: true,
            sealed: false,
            frozen: false,
            htmldda: false,
        }
    }
}

impl Object {
    /// Create a new ordinary object with no prototype.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// `OrdinaryObjectCreate`: a new ordinary object with the given prototype.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ordinaryobjectcreate
    #[inline]
    pub fn create(prototype: JsValue) -> Self {
        let mut object = Self::default();
        object.prototype = prototype;
        object
    }

    /// The exotic kind of this object.
    #[inline]
    pub fn kind(&self) -> &ObjectKind {
        &self.data.kind
    }

    /// Borrow the property storage.
    #[inline]
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Mutably borrow the property storage.
    #[inline]
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Get the prototype instance of this object.
    #[inline]
    pub fn prototype(&self) -> &JsValue {
        &self.prototype
    }

    /// Set the prototype instance of the object without any checks.
    ///
    /// # Panics
    ///
    /// Panics if the value is neither an object nor null.
    #[inline]
    pub fn set_prototype_instance(&mut self, prototype: JsValue) {
        assert!(prototype.is_null() || prototype.is_object());
        self.prototype = prototype;
    }

    /// Whether new properties may be added.
    #[inline]
    pub fn extensible(&self) -> bool {
        self.extensible
    }

    pub(crate) fn set_extensible(&mut self, extensible: bool) {
        self.extensible = extensible;
    }

    /// Whether `seal` was applied to this object.
    #[inline]
    pub fn sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn set_sealed(&mut self) {
        self.sealed = true;
    }

    /// Whether `freeze` was applied to this object.
    #[inline]
    pub fn frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn set_frozen(&mut self) {
        // frozen implies sealed implies non-extensible
        self.frozen = true;
        self.sealed = true;
    }

    /// Whether this object carries the `[[IsHTMLDDA]]` marker.
    #[inline]
    pub fn is_htmldda(&self) -> bool {
        self.htmldda
    }

    /// Mark this object as an `[[IsHTMLDDA]]` object.
    #[inline]
    pub fn set_is_htmldda(&mut self) {
        self.htmldda = true;
    }

    /// The `[[PrimitiveValue]]` of a wrapper object, if this is one.
    pub fn primitive_value(&self) -> Option<JsValue> {
        match &self.data.kind {
            ObjectKind::Boolean(boolean) => Some(JsValue::new(*boolean)),
            ObjectKind::Number(number) => Some(JsValue::new(*number)),
            ObjectKind::String(string) => Some(JsValue::new(string.clone())),
            ObjectKind::BigInt(bigint) => Some(JsValue::new(bigint.clone())),
            ObjectKind::Symbol(symbol) => Some(JsValue::new(symbol.clone())),
            _ => None,
        }
    }

    /// It determines if the object is a callable function with a `[[Call]]` internal method.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-iscallable
    #[inline]
    pub fn is_callable(&self) -> bool {
        match &self.data.kind {
            ObjectKind::Function(_) => true,
            ObjectKind::Proxy(proxy) => proxy.is_callable(),
            _ => false,
        }
    }

    /// It determines if the object is a function object with a `[[Construct]]` internal method.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isconstructor
    #[inline]
    pub fn is_constructor(&self) -> bool {
        match &self.data.kind {
            ObjectKind::Function(function) => function.is_constructor(),
            ObjectKind::Proxy(proxy) => proxy.is_constructor(),
            _ => false,
        }
    }

    /// Checks if this object is an `Array` exotic object.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.data.kind, ObjectKind::Array)
    }

    /// Checks if this object is a function object.
    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self.data.kind, ObjectKind::Function(_))
    }

    /// Gets the function data if the object is a function object.
    #[inline]
    pub fn as_function(&self) -> Option<&Function> {
        match &self.data.kind {
            ObjectKind::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Checks if this object is a `Proxy` exotic object.
    #[inline]
    pub fn is_proxy(&self) -> bool {
        matches!(self.data.kind, ObjectKind::Proxy(_))
    }

    /// Gets the proxy data if the object is a `Proxy`.
    #[inline]
    pub fn as_proxy(&self) -> Option<&Proxy> {
        match &self.data.kind {
            ObjectKind::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// Gets the proxy data mutably if the object is a `Proxy`.
    #[inline]
    pub fn as_proxy_mut(&mut self) -> Option<&mut Proxy> {
        match &mut self.data.kind {
            ObjectKind::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// Gets the string if the object is a `String` wrapper.
    #[inline]
    pub fn as_string(&self) -> Option<JsString> {
        match &self.data.kind {
            ObjectKind::String(string) => Some(string.clone()),
            _ => None,
        }
    }

    /// Gets the error kind if the object is an error object.
    #[inline]
    pub fn as_error(&self) -> Option<ErrorKind> {
        match &self.data.kind {
            ObjectKind::Error(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Gets the buffer data if the object is an `ArrayBuffer`.
    #[inline]
    pub fn as_array_buffer(&self) -> Option<&ArrayBuffer> {
        match &self.data.kind {
            ObjectKind::ArrayBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Gets the buffer data mutably if the object is an `ArrayBuffer`.
    #[inline]
    pub fn as_array_buffer_mut(&mut self) -> Option<&mut ArrayBuffer> {
        match &mut self.data.kind {
            ObjectKind::ArrayBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Gets the integer-indexed data if the object is a typed array view.
    #[inline]
    pub fn as_integer_indexed(&self) -> Option<&IntegerIndexed> {
        match &self.data.kind {
            ObjectKind::IntegerIndexed(view) => Some(view),
            _ => None,
        }
    }

    /// Helper function for property insertion.
    #[inline]
    pub(crate) fn insert<K, P>(&mut self, key: K, property: P) -> bool
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        let key = key.into();
        let present = self.properties.contains_key(&key);
        self.properties.insert(&key, property.into());
        present
    }

    /// Helper function for property removal.
    #[inline]
    pub(crate) fn remove(&mut self, key: &PropertyKey) -> bool {
        self.properties.remove(key)
    }

    /// Inserts a field in the object `properties` without checking if it's writable.
    #[inline]
    pub fn insert_property<K, P>(&mut self, key: K, property: P) -> bool
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        self.insert(key.into(), property.into())
    }
}
