//! This module implements the `Attribute` flags of a property descriptor.

use crate::gc::{empty_trace, Finalize, Trace};
use bitflags::bitflags;

bitflags! {
    /// This struct constains the property flags as described in the ECMAScript specification.
    ///
    /// It contains the following flags:
    ///  - `[[Writable]]` (`WRITABLE`) - If `false`, attempts by ECMAScript code to change the
    ///    property's `[[Value]]` attribute using `[[Set]]` will not succeed.
    ///  - `[[Enumerable]]` (`ENUMERABLE`) - If the property will be enumerated by a
    ///    `for-in` enumeration.
    ///  - `[[Configurable]]` (`CONFIGURABLE`) - If `false`, attempts to delete the property,
    ///    change the property to be an accessor property, or change its attributes (other than
    ///    `[[Value]]`, or changing `[[Writable]]` to `false`) will fail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attribute: u8 {
        /// The `Writable` attribute decides whether the value associated with the property can be changed or not, from its initial value.
        const WRITABLE = 0b0000_0001;

        /// If the property can be enumerated by a `for-in` loop.
        const ENUMERABLE = 0b0000_0010;

        /// If the property descriptor can be changed later.
        const CONFIGURABLE = 0b0000_0100;

        /// The property is not writable.
        const READONLY = 0b0000_0000;

        /// The property can not be enumerated in a `for-in` loop.
        const NON_ENUMERABLE = 0b0000_0000;

        /// The property descriptor cannot be changed.
        const PERMANENT = 0b0000_0000;
    }
}

impl Finalize for Attribute {}

unsafe impl Trace for Attribute {
    empty_trace!();
}

impl Attribute {
    /// Check whether the property is writable.
    #[inline]
    pub fn writable(self) -> bool {
        self.contains(Self::WRITABLE)
    }

    /// Set whether the property is writable.
    #[inline]
    pub fn set_writable(&mut self, value: bool) {
        self.set(Self::WRITABLE, value);
    }

    /// Check whether the property is enumerable.
    #[inline]
    pub fn enumerable(self) -> bool {
        self.contains(Self::ENUMERABLE)
    }

    /// Set whether the property is enumerable.
    #[inline]
    pub fn set_enumerable(&mut self, value: bool) {
        self.set(Self::ENUMERABLE, value);
    }

    /// Check whether the property is configurable.
    #[inline]
    pub fn configurable(self) -> bool {
        self.contains(Self::CONFIGURABLE)
    }

    /// Set whether the property is configurable.
    #[inline]
    pub fn set_configurable(&mut self, value: bool) {
        self.set(Self::CONFIGURABLE, value);
    }
}

impl Default for Attribute {
    /// Returns the default flags according to the [ECMAScript specification][spec].
    ///
    /// [spec]: https://tc39.es/ecma262/#table-default-attribute-values
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Attribute;

    #[test]
    fn default_attributes_are_all_false() {
        let attribute = Attribute::default();
        assert!(!attribute.writable());
        assert!(!attribute.enumerable());
        assert!(!attribute.configurable());
    }

    #[test]
    fn setters_toggle_single_flags() {
        let mut attribute = Attribute::WRITABLE | Attribute::CONFIGURABLE;
        attribute.set_writable(false);
        attribute.set_enumerable(true);
        assert!(!attribute.writable());
        assert!(attribute.enumerable());
        assert!(attribute.configurable());
    }
}
