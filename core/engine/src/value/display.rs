//! Display implementation for [`JsValue`].

use super::JsValue;
use crate::{builtins::number::Number, object::ObjectKind};
use std::fmt::{self, Display};

/// A wrapper to display a `JsValue` the way the language would print it.
#[derive(Debug, Clone, Copy)]
pub struct ValueDisplay<'a> {
    pub(super) value: &'a JsValue,
}

impl Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            JsValue::Null => write!(f, "null"),
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Boolean(boolean) => write!(f, "{boolean}"),
            JsValue::Symbol(symbol) => write!(f, "{symbol}"),
            JsValue::String(string) => write!(f, "\"{string}\""),
            JsValue::Rational(rational) => write!(f, "{}", Number::to_js_string(*rational)),
            JsValue::Integer(integer) => write!(f, "{integer}"),
            JsValue::BigInt(bigint) => write!(f, "{bigint}n"),
            JsValue::Object(object) => {
                let object = object.borrow();
                match object.kind() {
                    ObjectKind::Array => write!(f, "[object Array]"),
                    ObjectKind::Function(_) => write!(f, "[Function]"),
                    ObjectKind::Proxy(_) => write!(f, "[object Proxy]"),
                    ObjectKind::Error(_) => write!(f, "[object Error]"),
                    ObjectKind::String(string) => write!(f, "[String: \"{string}\"]"),
                    ObjectKind::Number(number) => {
                        write!(f, "[Number: {}]", Number::to_js_string(*number))
                    }
                    ObjectKind::Boolean(boolean) => write!(f, "[Boolean: {boolean}]"),
                    ObjectKind::BigInt(bigint) => write!(f, "[BigInt: {bigint}n]"),
                    ObjectKind::Symbol(symbol) => write!(f, "[Symbol: {symbol}]"),
                    _ => write!(f, "[object Object]"),
                }
            }
        }
    }
}
