//! Shrike is the object-model and value-semantics core of an ECMAScript
//! engine: the tagged value universe, the property system with its seven
//! (plus four) essential internal methods, the exotic objects (`Array`,
//! `String`, integer-indexed views, `Proxy`), the `Reflect` surface and the
//! type-conversion abstract operations.
//!
//! Parsing, compilation and the bytecode executor are external collaborators;
//! they drive this crate through [`Context`] and the entry points in
//! [`api`]. Errors never unwind across that boundary: the executor observes
//! them through the context's pending-exception slot.

#![deny(
    unused_qualifications,
    unused_import_braces,
    unused_lifetimes,
    trivial_numeric_casts,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style
)]
#![warn(clippy::perf, clippy::single_match_else, clippy::dbg_macro)]
#![allow(
    clippy::missing_inline_in_public_items,
    clippy::cognitive_complexity,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::as_conversions
)]

pub mod api;
pub mod bigint;
pub mod builtins;
pub mod context;
pub mod gc;
pub mod object;
pub mod profiler;
pub mod property;
pub mod string;
pub mod symbol;
pub mod value;

pub use crate::{
    bigint::JsBigInt,
    context::Context,
    object::JsObject,
    profiler::Profiler,
    string::JsString,
    symbol::JsSymbol,
    value::JsValue,
};

/// The result of every fallible operation in this crate.
///
/// The error variant is always a JavaScript error *value*; the executor (or
/// the [`api`] layer) decides whether it becomes a pending exception or an
/// uncaught error.
pub type JsResult<T> = Result<T, JsValue>;

#[cfg(test)]
mod tests;
