//! This module implements the Property Descriptor.
//!
//! The Property Descriptor type is used to explain the manipulation and reification of Object
//! property attributes. Values of the Property Descriptor type are Records. Each field's name is
//! an attribute name and its value is a corresponding attribute value as specified in
//! [6.2.6][section]. In addition, any field may be present or absent.
//!
//! More information:
//!  - [MDN documentation][mdn]
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-property-descriptor-specification-type
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/defineProperty
//! [section]: https://tc39.es/ecma262/#sec-property-attributes

use crate::{
    gc::{custom_trace, Finalize, Trace},
    string::JsString,
    symbol::JsSymbol,
    value::JsValue,
};
use std::fmt;

mod attribute;
pub use attribute::Attribute;

/// This represents an ECMAScript Property Descriptor.
///
/// A property descriptor comes in three flavors:
///  - data descriptors, with `value` and/or `writable` fields;
///  - accessor descriptors, with `get` and/or `set` fields;
///  - generic descriptors, with neither.
///
/// Every field is optional; a fully populated descriptor is obtained with
/// [`PropertyDescriptor::complete_property_descriptor`].
#[derive(Default, Debug, Clone, Finalize)]
pub struct PropertyDescriptor {
    enumerable: Option<bool>,
    configurable: Option<bool>,
    kind: DescriptorKind,
}

/// The kind of a [`PropertyDescriptor`].
#[derive(Debug, Clone, Finalize)]
pub enum DescriptorKind {
    /// A data descriptor.
    Data {
        /// The `[[Value]]` field.
        value: Option<JsValue>,
        /// The `[[Writable]]` field.
        writable: Option<bool>,
    },
    /// An accessor descriptor.
    Accessor {
        /// The `[[Get]]` field.
        get: Option<JsValue>,
        /// The `[[Set]]` field.
        set: Option<JsValue>,
    },
    /// A generic descriptor.
    Generic,
}

unsafe impl Trace for PropertyDescriptor {
    custom_trace!(this, {
        mark(&this.kind);
    });
}

unsafe impl Trace for DescriptorKind {
    custom_trace!(this, {
        match this {
            DescriptorKind::Data { value, .. } => mark(value),
            DescriptorKind::Accessor { get, set } => {
                mark(get);
                mark(set);
            }
            DescriptorKind::Generic => {}
        }
    });
}

impl Default for DescriptorKind {
    fn default() -> Self {
        Self::Generic
    }
}

impl PropertyDescriptor {
    /// An accessor property descriptor is one that includes any fields named either
    /// `[[Get]]` or `[[Set]]`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isaccessordescriptor
    #[inline]
    pub fn is_accessor_descriptor(&self) -> bool {
        matches!(self.kind, DescriptorKind::Accessor { .. })
    }

    /// A data property descriptor is one that includes any fields named either
    /// `[[Value]]` or `[[Writable]]`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isdatadescriptor
    #[inline]
    pub fn is_data_descriptor(&self) -> bool {
        matches!(self.kind, DescriptorKind::Data { .. })
    }

    /// A generic property descriptor is one that is neither a data descriptor nor an
    /// accessor descriptor.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isgenericdescriptor
    #[inline]
    pub fn is_generic_descriptor(&self) -> bool {
        matches!(self.kind, DescriptorKind::Generic)
    }

    /// Check if all fields are absent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_generic_descriptor() && self.enumerable.is_none() && self.configurable.is_none()
    }

    /// Return the `[[Enumerable]]` field, if present.
    #[inline]
    pub fn enumerable(&self) -> Option<bool> {
        self.enumerable
    }

    /// Return the `[[Configurable]]` field, if present.
    #[inline]
    pub fn configurable(&self) -> Option<bool> {
        self.configurable
    }

    /// Return the `[[Writable]]` field, if present.
    #[inline]
    pub fn writable(&self) -> Option<bool> {
        match self.kind {
            DescriptorKind::Data { writable, .. } => writable,
            _ => None,
        }
    }

    /// Return the `[[Value]]` field, if present.
    #[inline]
    pub fn value(&self) -> Option<&JsValue> {
        match &self.kind {
            DescriptorKind::Data { value, .. } => value.as_ref(),
            _ => None,
        }
    }

    /// Return the `[[Get]]` field, if present.
    #[inline]
    pub fn get(&self) -> Option<&JsValue> {
        match &self.kind {
            DescriptorKind::Accessor { get, .. } => get.as_ref(),
            _ => None,
        }
    }

    /// Return the `[[Set]]` field, if present.
    #[inline]
    pub fn set(&self) -> Option<&JsValue> {
        match &self.kind {
            DescriptorKind::Accessor { set, .. } => set.as_ref(),
            _ => None,
        }
    }

    /// Return the `[[Enumerable]]` field, or panic if absent.
    #[inline]
    #[track_caller]
    pub fn expect_enumerable(&self) -> bool {
        self.enumerable.expect("[[Enumerable]] field not in property descriptor")
    }

    /// Return the `[[Configurable]]` field, or panic if absent.
    #[inline]
    #[track_caller]
    pub fn expect_configurable(&self) -> bool {
        self.configurable.expect("[[Configurable]] field not in property descriptor")
    }

    /// Return the `[[Writable]]` field, or panic if absent.
    #[inline]
    #[track_caller]
    pub fn expect_writable(&self) -> bool {
        self.writable().expect("[[Writable]] field not in property descriptor")
    }

    /// Return the `[[Value]]` field, or panic if absent.
    #[inline]
    #[track_caller]
    pub fn expect_value(&self) -> &JsValue {
        self.value().expect("[[Value]] field not in property descriptor")
    }

    /// Return the `[[Get]]` field, or panic if absent.
    #[inline]
    #[track_caller]
    pub fn expect_get(&self) -> &JsValue {
        self.get().expect("[[Get]] field not in property descriptor")
    }

    /// Return the `[[Set]]` field, or panic if absent.
    #[inline]
    #[track_caller]
    pub fn expect_set(&self) -> &JsValue {
        self.set().expect("[[Set]] field not in property descriptor")
    }

    /// Return the kind of the descriptor.
    #[inline]
    pub fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    /// Create a new [`PropertyDescriptorBuilder`].
    #[inline]
    pub fn builder() -> PropertyDescriptorBuilder {
        PropertyDescriptorBuilder::new()
    }

    /// Populate every absent field of a data descriptor with its default.
    #[inline]
    pub fn into_data_defaulted(mut self) -> Self {
        if !self.is_data_descriptor() {
            self.kind = DescriptorKind::Data {
                value: None,
                writable: None,
            };
        }
        if let DescriptorKind::Data { value, writable } = &mut self.kind {
            if value.is_none() {
                *value = Some(JsValue::undefined());
            }
            if writable.is_none() {
                *writable = Some(false);
            }
        }
        self.enumerable = self.enumerable.or(Some(false));
        self.configurable = self.configurable.or(Some(false));
        self
    }

    /// Populate every absent field of an accessor descriptor with its default.
    #[inline]
    pub fn into_accessor_defaulted(mut self) -> Self {
        if !self.is_accessor_descriptor() {
            self.kind = DescriptorKind::Accessor {
                get: None,
                set: None,
            };
        }
        if let DescriptorKind::Accessor { get, set } = &mut self.kind {
            if get.is_none() {
                *get = Some(JsValue::undefined());
            }
            if set.is_none() {
                *set = Some(JsValue::undefined());
            }
        }
        self.enumerable = self.enumerable.or(Some(false));
        self.configurable = self.configurable.or(Some(false));
        self
    }

    /// The abstract operation `CompletePropertyDescriptor`.
    ///
    /// More information:
    /// - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-completepropertydescriptor
    #[inline]
    pub fn complete_property_descriptor(self) -> Self {
        if self.is_accessor_descriptor() {
            self.into_accessor_defaulted()
        } else {
            self.into_data_defaulted()
        }
    }

    /// Replace the fields of this descriptor with every *present* field of `desc`.
    ///
    /// Switching the kind replaces the whole kind record, which clears the
    /// fields of the previous kind.
    pub fn fill_with(&mut self, desc: &Self) {
        match (&mut self.kind, &desc.kind) {
            (
                DescriptorKind::Data { value, writable },
                DescriptorKind::Data {
                    value: new_value,
                    writable: new_writable,
                },
            ) => {
                if let Some(new_value) = new_value {
                    *value = Some(new_value.clone());
                }
                if let Some(new_writable) = new_writable {
                    *writable = Some(*new_writable);
                }
            }
            (
                DescriptorKind::Accessor { get, set },
                DescriptorKind::Accessor {
                    get: new_get,
                    set: new_set,
                },
            ) => {
                if let Some(new_get) = new_get {
                    *get = Some(new_get.clone());
                }
                if let Some(new_set) = new_set {
                    *set = Some(new_set.clone());
                }
            }
            (_, DescriptorKind::Generic) => {}
            _ => self.kind = desc.kind.clone(),
        }

        if let Some(enumerable) = desc.enumerable {
            self.enumerable = Some(enumerable);
        }
        if let Some(configurable) = desc.configurable {
            self.configurable = Some(configurable);
        }
    }
}

/// A builder for [`PropertyDescriptor`].
#[derive(Default, Debug, Clone)]
pub struct PropertyDescriptorBuilder {
    inner: PropertyDescriptor,
}

impl PropertyDescriptorBuilder {
    /// Create a new builder with an empty descriptor.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `[[Value]]` field.
    pub fn value<V: Into<JsValue>>(mut self, value: V) -> Self {
        match self.inner.kind {
            DescriptorKind::Data {
                value: ref mut v, ..
            } => *v = Some(value.into()),
            _ => {
                self.inner.kind = DescriptorKind::Data {
                    value: Some(value.into()),
                    writable: None,
                }
            }
        }
        self
    }

    /// Set the `[[Writable]]` field.
    pub fn writable(mut self, writable: bool) -> Self {
        match self.inner.kind {
            DescriptorKind::Data {
                writable: ref mut w,
                ..
            } => *w = Some(writable),
            _ => {
                self.inner.kind = DescriptorKind::Data {
                    value: None,
                    writable: Some(writable),
                }
            }
        }
        self
    }

    /// Set the `[[Get]]` field.
    pub fn get<V: Into<JsValue>>(mut self, get: V) -> Self {
        match self.inner.kind {
            DescriptorKind::Accessor { get: ref mut g, .. } => *g = Some(get.into()),
            _ => {
                self.inner.kind = DescriptorKind::Accessor {
                    get: Some(get.into()),
                    set: None,
                }
            }
        }
        self
    }

    /// Set the `[[Set]]` field.
    pub fn set<V: Into<JsValue>>(mut self, set: V) -> Self {
        match self.inner.kind {
            DescriptorKind::Accessor { set: ref mut s, .. } => *s = Some(set.into()),
            _ => {
                self.inner.kind = DescriptorKind::Accessor {
                    set: Some(set.into()),
                    get: None,
                }
            }
        }
        self
    }

    /// Set the `[[Enumerable]]` field.
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.inner.enumerable = Some(enumerable);
        self
    }

    /// Set the `[[Configurable]]` field.
    pub fn configurable(mut self, configurable: bool) -> Self {
        self.inner.configurable = Some(configurable);
        self
    }

    /// Set the `[[Value]]` field if `value` is `Some`.
    pub fn maybe_value<V: Into<JsValue>>(self, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.value(value)
        } else {
            self
        }
    }

    /// Set the `[[Writable]]` field if `writable` is `Some`.
    pub fn maybe_writable(self, writable: Option<bool>) -> Self {
        if let Some(writable) = writable {
            self.writable(writable)
        } else {
            self
        }
    }

    /// Set the `[[Get]]` field if `get` is `Some`.
    pub fn maybe_get<V: Into<JsValue>>(self, get: Option<V>) -> Self {
        if let Some(get) = get {
            self.get(get)
        } else {
            self
        }
    }

    /// Set the `[[Set]]` field if `set` is `Some`.
    pub fn maybe_set<V: Into<JsValue>>(self, set: Option<V>) -> Self {
        if let Some(set) = set {
            self.set(set)
        } else {
            self
        }
    }

    /// Set the `[[Enumerable]]` field if `enumerable` is `Some`.
    pub fn maybe_enumerable(mut self, enumerable: Option<bool>) -> Self {
        if let Some(enumerable) = enumerable {
            self.inner.enumerable = Some(enumerable);
        }
        self
    }

    /// Set the `[[Configurable]]` field if `configurable` is `Some`.
    pub fn maybe_configurable(mut self, configurable: Option<bool>) -> Self {
        if let Some(configurable) = configurable {
            self.inner.configurable = Some(configurable);
        }
        self
    }

    /// Fill the writable/enumerable/configurable fields from an [`Attribute`] set.
    pub fn attributes(self, attributes: Attribute) -> Self {
        self.writable(attributes.writable())
            .enumerable(attributes.enumerable())
            .configurable(attributes.configurable())
    }

    /// Peek at the descriptor under construction.
    #[inline]
    pub fn inner(&self) -> &PropertyDescriptor {
        &self.inner
    }

    /// Build the [`PropertyDescriptor`].
    #[inline]
    pub fn build(self) -> PropertyDescriptor {
        self.inner
    }
}

impl From<PropertyDescriptorBuilder> for PropertyDescriptor {
    #[inline]
    fn from(builder: PropertyDescriptorBuilder) -> Self {
        builder.build()
    }
}

/// This abstracts away the need for `IsPropertyKey` by transforming the
/// `PropertyKey` values into an enum with both valid types: String and Symbol.
///
/// Strings that spell a canonical numeric index (the decimal representation
/// of an integer in `0..2³²−1`, with no leading zero except `"0"` itself)
/// collapse into the `Index` form, which is what drives the exotic dispatch
/// of `Array`, `String` and integer-indexed objects.
///
/// More information:
/// - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ispropertykey
#[derive(Finalize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// A string property key.
    String(JsString),
    /// A symbol property key.
    Symbol(JsSymbol),
    /// A canonical numeric index property key.
    Index(u32),
}

unsafe impl Trace for PropertyKey {
    custom_trace!(this, {
        match this {
            PropertyKey::String(string) => mark(string),
            PropertyKey::Symbol(symbol) => mark(symbol),
            PropertyKey::Index(_) => {}
        }
    });
}

/// Parse a string as a canonical numeric index.
///
/// Leading zeros and signs disqualify the string; the resulting index must
/// be strictly below `2³²−1`.
fn parse_canonical_index(string: &str) -> Option<u32> {
    if string == "0" {
        return Some(0);
    }
    if string.is_empty()
        || !string.bytes().all(|byte| byte.is_ascii_digit())
        || string.starts_with('0')
    {
        return None;
    }
    string.parse::<u32>().ok().filter(|&index| index < u32::MAX)
}

impl From<JsString> for PropertyKey {
    #[inline]
    fn from(string: JsString) -> Self {
        if let Some(index) = parse_canonical_index(&string) {
            Self::Index(index)
        } else {
            Self::String(string)
        }
    }
}

impl From<&str> for PropertyKey {
    #[inline]
    fn from(string: &str) -> Self {
        if let Some(index) = parse_canonical_index(string) {
            Self::Index(index)
        } else {
            Self::String(string.into())
        }
    }
}

impl From<String> for PropertyKey {
    #[inline]
    fn from(string: String) -> Self {
        if let Some(index) = parse_canonical_index(&string) {
            Self::Index(index)
        } else {
            Self::String(string.into())
        }
    }
}

impl From<JsSymbol> for PropertyKey {
    #[inline]
    fn from(symbol: JsSymbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<u8> for PropertyKey {
    #[inline]
    fn from(index: u8) -> Self {
        Self::Index(index.into())
    }
}

impl From<u16> for PropertyKey {
    #[inline]
    fn from(index: u16) -> Self {
        Self::Index(index.into())
    }
}

impl From<u32> for PropertyKey {
    #[inline]
    fn from(index: u32) -> Self {
        if index < u32::MAX {
            Self::Index(index)
        } else {
            Self::String(index.to_string().into())
        }
    }
}

impl From<i32> for PropertyKey {
    #[inline]
    fn from(value: i32) -> Self {
        if let Ok(index) = u32::try_from(value) {
            index.into()
        } else {
            Self::String(value.to_string().into())
        }
    }
}

impl From<usize> for PropertyKey {
    #[inline]
    fn from(value: usize) -> Self {
        if let Ok(index) = u32::try_from(value) {
            index.into()
        } else {
            Self::String(value.to_string().into())
        }
    }
}

impl From<u64> for PropertyKey {
    #[inline]
    fn from(value: u64) -> Self {
        if let Ok(index) = u32::try_from(value) {
            index.into()
        } else {
            Self::String(value.to_string().into())
        }
    }
}

impl fmt::Display for PropertyKey {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(string) => string.fmt(f),
            Self::Symbol(symbol) => symbol.fmt(f),
            Self::Index(index) => index.fmt(f),
        }
    }
}

impl From<&PropertyKey> for JsValue {
    /// Reify a property key as a language value, the way trap arguments see
    /// it: numeric indices become their decimal strings.
    #[inline]
    fn from(property_key: &PropertyKey) -> Self {
        match property_key {
            PropertyKey::String(string) => string.clone().into(),
            PropertyKey::Symbol(symbol) => symbol.clone().into(),
            PropertyKey::Index(index) => JsValue::from(JsString::from(index.to_string())),
        }
    }
}

impl From<PropertyKey> for JsValue {
    #[inline]
    fn from(property_key: PropertyKey) -> Self {
        Self::from(&property_key)
    }
}

impl PartialEq<&str> for PropertyKey {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Self::String(string) => string == other,
            _ => false,
        }
    }
}

/// The kind of a produced name when enumerating properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyNameKind {
    /// Produce the keys.
    Key,
    /// Produce the values.
    Value,
    /// Produce `[key, value]` pairs.
    KeyAndValue,
}

#[cfg(test)]
mod tests {
    use super::{PropertyDescriptor, PropertyKey};

    #[test]
    fn canonical_index_parsing() {
        assert_eq!(PropertyKey::from("0"), PropertyKey::Index(0));
        assert_eq!(PropertyKey::from("42"), PropertyKey::Index(42));
        // Leading zeros, signs and non-digits are regular string keys.
        assert!(matches!(PropertyKey::from("01"), PropertyKey::String(_)));
        assert!(matches!(PropertyKey::from("-0"), PropertyKey::String(_)));
        assert!(matches!(PropertyKey::from("1.5"), PropertyKey::String(_)));
        assert!(matches!(PropertyKey::from(""), PropertyKey::String(_)));
        // 2³²−1 is not a valid array index.
        assert!(matches!(
            PropertyKey::from(u32::MAX.to_string()),
            PropertyKey::String(_)
        ));
        assert_eq!(
            PropertyKey::from((u32::MAX - 1).to_string()),
            PropertyKey::Index(u32::MAX - 1)
        );
    }

    #[test]
    fn descriptor_kinds() {
        let data = PropertyDescriptor::builder().value(1).writable(true).build();
        assert!(data.is_data_descriptor());
        assert!(!data.is_accessor_descriptor());

        let accessor = PropertyDescriptor::builder().get(crate::JsValue::undefined()).build();
        assert!(accessor.is_accessor_descriptor());

        let generic = PropertyDescriptor::builder().enumerable(true).build();
        assert!(generic.is_generic_descriptor());
        assert!(!generic.is_empty());
        assert!(PropertyDescriptor::default().is_empty());
    }

    #[test]
    fn fill_with_switches_kind() {
        let mut current = PropertyDescriptor::builder()
            .value(1)
            .writable(true)
            .enumerable(true)
            .configurable(true)
            .build();
        let incoming = PropertyDescriptor::builder().get(crate::JsValue::undefined()).build();
        current.fill_with(&incoming);
        assert!(current.is_accessor_descriptor());
        // The data fields are gone after the kind switch.
        assert!(current.value().is_none());
        assert_eq!(current.enumerable(), Some(true));
    }

    #[test]
    fn completion_defaults() {
        let desc = PropertyDescriptor::builder().value(3).build().complete_property_descriptor();
        assert_eq!(desc.writable(), Some(false));
        assert_eq!(desc.enumerable(), Some(false));
        assert_eq!(desc.configurable(), Some(false));

        let desc = PropertyDescriptor::default().complete_property_descriptor();
        assert!(desc.is_data_descriptor());
        assert!(desc.expect_value().is_undefined());
    }
}
