//! This module implements the JavaScript primitive string type.
//!
//! Strings are immutable and reference counted; cloning a [`JsString`] only
//! bumps a counter. The backing storage is UTF-8, but every operation that
//! the language can observe (indexing, `length`, ordering of surrogate
//! pairs) is defined over the UTF-16 code units of the string.

use crate::gc::{empty_trace, Finalize, Trace};
use std::{
    borrow::Borrow,
    fmt::{self, Display},
    ops::Deref,
    rc::Rc,
};

/// This represents a JavaScript primitive string.
#[derive(Debug, Finalize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsString(Rc<str>);

unsafe impl Trace for JsString {
    empty_trace!();
}

impl JsString {
    /// Create a new `JsString` from a string slice.
    #[inline]
    pub fn new<S: AsRef<str>>(string: S) -> Self {
        Self(Rc::from(string.as_ref()))
    }

    /// Obtain the underlying `&str` slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the number of UTF-16 code units in the string.
    ///
    /// This is the value of the `length` property of a String wrapper, which
    /// can differ from the UTF-8 byte length whenever the string contains
    /// characters outside the Basic Multilingual Plane.
    #[inline]
    pub fn encode_utf16_len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// Return the UTF-16 code unit at `position`, if any.
    #[inline]
    pub fn code_unit_at(&self, position: usize) -> Option<u16> {
        self.0.encode_utf16().nth(position)
    }
}

impl Default for JsString {
    #[inline]
    fn default() -> Self {
        Self(Rc::from(String::new()))
    }
}

impl Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl PartialEq<str> for JsString {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<JsString> for str {
    #[inline]
    fn eq(&self, other: &JsString) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<&str> for JsString {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<JsString> for &str {
    #[inline]
    fn eq(&self, other: &JsString) -> bool {
        *self == other.as_str()
    }
}

impl Deref for JsString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for JsString {
    #[inline]
    fn borrow(&self) -> &str {
        self.0.borrow()
    }
}

impl AsRef<str> for JsString {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for JsString {
    #[inline]
    fn from(string: String) -> Self {
        Self(Rc::from(string))
    }
}

impl From<&JsString> for String {
    #[inline]
    fn from(string: &JsString) -> Self {
        string.to_string()
    }
}

impl From<Box<str>> for JsString {
    #[inline]
    fn from(string: Box<str>) -> Self {
        Self(Rc::from(string))
    }
}

impl From<&str> for JsString {
    #[inline]
    fn from(string: &str) -> Self {
        Self(Rc::from(string))
    }
}

/// Check if the given char is trimmable per the `StringToNumber` and
/// `String.prototype.trim` definitions of white space.
pub(crate) fn is_trimmable_whitespace(c: char) -> bool {
    // The rust implementation of `trim` does not regard the same characters
    // whitespace as ECMAScript does.
    //
    // ECMAScript standard characters that are trimmed:
    matches!(
        c,
        // TAB, LINE FEED, VERTICAL TAB, FORM FEED, CARRIAGE RETURN
        '\u{0009}' | '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{000D}' |
        // SPACE, NO-BREAK SPACE, ZERO WIDTH NO-BREAK SPACE
        '\u{0020}' | '\u{00A0}' | '\u{FEFF}' |
        // LINE SEPARATOR, PARAGRAPH SEPARATOR
        '\u{2028}' | '\u{2029}' |
        // Unicode Space_Separator category
        '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

#[cfg(test)]
mod tests {
    use super::JsString;

    #[test]
    fn utf16_length_counts_code_units() {
        let ascii = JsString::new("hello");
        assert_eq!(ascii.encode_utf16_len(), 5);

        // '𝒜' is U+1D49C, which encodes to a surrogate pair in UTF-16.
        let astral = JsString::new("a𝒜b");
        assert_eq!(astral.encode_utf16_len(), 4);
        assert_eq!(astral.code_unit_at(0), Some(u16::from(b'a')));
        assert_eq!(astral.code_unit_at(1), Some(0xD835));
        assert_eq!(astral.code_unit_at(2), Some(0xDC9C));
        assert_eq!(astral.code_unit_at(3), Some(u16::from(b'b')));
        assert_eq!(astral.code_unit_at(4), None);
    }

    #[test]
    fn equality_is_by_contents() {
        let a = JsString::new("abc");
        let b = JsString::from("abc".to_string());
        assert_eq!(a, b);
        assert_eq!(a, "abc");
    }
}
