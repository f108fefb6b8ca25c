//! This module implements the JavaScript `Symbol` primitive.
//!
//! Every symbol returned from `Symbol()` is unique; identity is the only
//! equality symbols have. The well known symbols are allocated once per
//! [`Context`][crate::Context] during initialization and are referenced by
//! identity afterwards.

use crate::{
    gc::{empty_trace, Finalize, Trace},
    string::JsString,
};
use std::{
    fmt::{self, Display},
    rc::Rc,
};

#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
struct Inner {
    hash: u64,
    description: Option<JsString>,
}

/// This represents a JavaScript symbol primitive.
#[derive(Debug, Finalize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsSymbol {
    inner: Rc<Inner>,
}

unsafe impl Trace for JsSymbol {
    empty_trace!();
}

impl JsSymbol {
    /// Create a new symbol with the given hash and description.
    ///
    /// The hash is what gives a symbol its identity, so callers must hand
    /// out a fresh one per symbol; [`Context::construct_symbol`] does this.
    ///
    /// [`Context::construct_symbol`]: crate::Context::construct_symbol
    #[inline]
    pub(crate) fn new(hash: u64, description: Option<JsString>) -> Self {
        Self {
            inner: Rc::new(Inner { hash, description }),
        }
    }

    /// Returns the `Symbol`s description.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Returns the `Symbol`s hash.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.inner.hash
    }
}

impl Display for JsSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(desc) => write!(f, "Symbol({desc})"),
            None => write!(f, "Symbol()"),
        }
    }
}

/// A structure that contains the JavaScript well known symbols.
///
/// Each field is allocated exactly once, when the owning context is created.
#[derive(Debug, Clone)]
pub struct WellKnownSymbols {
    async_iterator: JsSymbol,
    has_instance: JsSymbol,
    is_concat_spreadable: JsSymbol,
    iterator: JsSymbol,
    match_: JsSymbol,
    match_all: JsSymbol,
    replace: JsSymbol,
    search: JsSymbol,
    species: JsSymbol,
    split: JsSymbol,
    to_primitive: JsSymbol,
    to_string_tag: JsSymbol,
    unscopables: JsSymbol,
}

impl WellKnownSymbols {
    /// Allocate the full set, returning it together with the next free
    /// symbol hash.
    pub(crate) fn new() -> (Self, u64) {
        let mut count = 0;
        let mut next = |description: &str| {
            let symbol = JsSymbol::new(count, Some(description.into()));
            count += 1;
            symbol
        };

        let async_iterator = next("Symbol.asyncIterator");
        let has_instance = next("Symbol.hasInstance");
        let is_concat_spreadable = next("Symbol.isConcatSpreadable");
        let iterator = next("Symbol.iterator");
        let match_ = next("Symbol.match");
        let match_all = next("Symbol.matchAll");
        let replace = next("Symbol.replace");
        let search = next("Symbol.search");
        let species = next("Symbol.species");
        let split = next("Symbol.split");
        let to_primitive = next("Symbol.toPrimitive");
        let to_string_tag = next("Symbol.toStringTag");
        let unscopables = next("Symbol.unscopables");

        (
            Self {
                async_iterator,
                has_instance,
                is_concat_spreadable,
                iterator,
                match_,
                match_all,
                replace,
                search,
                species,
                split,
                to_primitive,
                to_string_tag,
                unscopables,
            },
            count,
        )
    }

    /// The `Symbol.asyncIterator` well known symbol.
    #[inline]
    pub fn async_iterator_symbol(&self) -> JsSymbol {
        self.async_iterator.clone()
    }

    /// The `Symbol.hasInstance` well known symbol.
    ///
    /// Called by the semantics of the `instanceof` operator.
    #[inline]
    pub fn has_instance_symbol(&self) -> JsSymbol {
        self.has_instance.clone()
    }

    /// The `Symbol.isConcatSpreadable` well known symbol.
    #[inline]
    pub fn is_concat_spreadable_symbol(&self) -> JsSymbol {
        self.is_concat_spreadable.clone()
    }

    /// The `Symbol.iterator` well known symbol.
    #[inline]
    pub fn iterator_symbol(&self) -> JsSymbol {
        self.iterator.clone()
    }

    /// The `Symbol.match` well known symbol.
    #[inline]
    pub fn match_symbol(&self) -> JsSymbol {
        self.match_.clone()
    }

    /// The `Symbol.matchAll` well known symbol.
    #[inline]
    pub fn match_all_symbol(&self) -> JsSymbol {
        self.match_all.clone()
    }

    /// The `Symbol.replace` well known symbol.
    #[inline]
    pub fn replace_symbol(&self) -> JsSymbol {
        self.replace.clone()
    }

    /// The `Symbol.search` well known symbol.
    #[inline]
    pub fn search_symbol(&self) -> JsSymbol {
        self.search.clone()
    }

    /// The `Symbol.species` well known symbol.
    #[inline]
    pub fn species_symbol(&self) -> JsSymbol {
        self.species.clone()
    }

    /// The `Symbol.split` well known symbol.
    #[inline]
    pub fn split_symbol(&self) -> JsSymbol {
        self.split.clone()
    }

    /// The `Symbol.toPrimitive` well known symbol.
    ///
    /// Consulted by the `ToPrimitive` abstract operation before the ordinary
    /// `toString`/`valueOf` protocol runs.
    #[inline]
    pub fn to_primitive_symbol(&self) -> JsSymbol {
        self.to_primitive.clone()
    }

    /// The `Symbol.toStringTag` well known symbol.
    #[inline]
    pub fn to_string_tag_symbol(&self) -> JsSymbol {
        self.to_string_tag.clone()
    }

    /// The `Symbol.unscopables` well known symbol.
    #[inline]
    pub fn unscopables_symbol(&self) -> JsSymbol {
        self.unscopables.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{JsSymbol, WellKnownSymbols};

    #[test]
    fn symbols_with_equal_descriptions_are_distinct() {
        let a = JsSymbol::new(1, Some("desc".into()));
        let b = JsSymbol::new(2, Some("desc".into()));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn well_known_symbols_are_stable() {
        let (symbols, count) = WellKnownSymbols::new();
        assert_eq!(count, 13);
        assert_eq!(
            symbols.to_primitive_symbol(),
            symbols.to_primitive_symbol()
        );
        assert_eq!(
            symbols.iterator_symbol().description(),
            Some("Symbol.iterator")
        );
    }
}
