//! This module implements the per-object property shape.
//!
//! A [`Shape`] is an insertion-ordered map from property key to the slot the
//! property's payload lives in, together with the property attributes. Every
//! object owns its shape exclusively; shapes are not shared and there is no
//! transition tree. Deleting a property leaves a tombstone in the owner's
//! slot vector, and once enough tombstones pile up the owner compacts the
//! shape and rebuilds the slots in step.

use crate::{
    gc::{custom_trace, empty_trace, Finalize, Trace},
    property::{Attribute, PropertyKey},
};
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

/// The compaction threshold: tombstones only trigger a rebuild once at least
/// this many have accumulated.
const TOMBSTONE_THRESHOLD: u32 = 8;

/// A single shape entry: where the payload lives and how the property behaves.
#[derive(Debug, Clone, Copy, Finalize)]
pub(crate) struct ShapeEntry {
    /// Index into the owning object's slot vector.
    pub(crate) slot: u32,
    /// The writable/enumerable/configurable flags.
    pub(crate) attributes: Attribute,
    /// Whether the slot holds an accessor pair instead of a data value.
    pub(crate) accessor: bool,
}

unsafe impl Trace for ShapeEntry {
    empty_trace!();
}

/// The mutable, per-object ordered mapping from property key to slot.
#[derive(Debug, Default, Finalize)]
pub struct Shape {
    entries: IndexMap<PropertyKey, ShapeEntry, BuildHasherDefault<FxHasher>>,
    tombstones: u32,
}

unsafe impl Trace for Shape {
    custom_trace!(this, {
        for (key, _) in this.entries.iter() {
            mark(key);
        }
    });
}

impl Shape {
    /// Create an empty shape.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for `key`.
    #[inline]
    pub(crate) fn get(&self, key: &PropertyKey) -> Option<&ShapeEntry> {
        self.entries.get(key)
    }

    /// Check whether `key` is tracked by this shape.
    #[inline]
    pub(crate) fn contains_key(&self, key: &PropertyKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Record a new property at the given slot, preserving insertion order.
    pub(crate) fn add(
        &mut self,
        key: PropertyKey,
        slot: u32,
        attributes: Attribute,
        accessor: bool,
    ) {
        let previous = self.entries.insert(
            key,
            ShapeEntry {
                slot,
                attributes,
                accessor,
            },
        );
        debug_assert!(previous.is_none(), "property added twice to a shape");
    }

    /// Update the attributes (and slot kind) of an existing property.
    pub(crate) fn set_attributes(&mut self, key: &PropertyKey, attributes: Attribute, accessor: bool) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.attributes = attributes;
            entry.accessor = accessor;
        }
    }

    /// Remove a property, returning the slot it occupied.
    ///
    /// The caller is responsible for tombstoning that slot; the remaining
    /// entries keep their insertion order.
    pub(crate) fn remove(&mut self, key: &PropertyKey) -> Option<u32> {
        let entry = self.entries.shift_remove(key)?;
        self.tombstones += 1;
        Some(entry.slot)
    }

    /// The number of live properties.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether enough tombstones piled up to warrant a rebuild: at least
    /// [`TOMBSTONE_THRESHOLD`] of them, and at least half the live count.
    #[inline]
    pub(crate) fn should_compact(&self) -> bool {
        self.tombstones >= TOMBSTONE_THRESHOLD && self.tombstones as usize * 2 >= self.len()
    }

    /// Renumber every slot densely in insertion order, handing each entry to
    /// `relocate` with its old slot so the owner can rebuild its slot vector.
    ///
    /// Every previously handed out slot index is invalid afterwards.
    pub(crate) fn compact<F>(&mut self, mut relocate: F)
    where
        F: FnMut(u32, u32),
    {
        for (index, (_, entry)) in self.entries.iter_mut().enumerate() {
            let new_slot = index as u32;
            relocate(entry.slot, new_slot);
            entry.slot = new_slot;
        }
        self.tombstones = 0;
    }

    /// An iterator over the keys in insertion order.
    #[inline]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &PropertyKey> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;
    use crate::property::{Attribute, PropertyKey};

    fn key(name: &str) -> PropertyKey {
        PropertyKey::from(name)
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut shape = Shape::new();
        shape.add(key("b"), 0, Attribute::all(), false);
        shape.add(key("a"), 1, Attribute::all(), false);
        shape.add(key("c"), 2, Attribute::all(), false);

        let keys: Vec<_> = shape.keys().cloned().collect();
        assert_eq!(keys, vec![key("b"), key("a"), key("c")]);
    }

    #[test]
    fn removal_keeps_order_and_counts_tombstones() {
        let mut shape = Shape::new();
        shape.add(key("a"), 0, Attribute::all(), false);
        shape.add(key("b"), 1, Attribute::all(), false);
        shape.add(key("c"), 2, Attribute::all(), false);

        assert_eq!(shape.remove(&key("b")), Some(1));
        assert_eq!(shape.remove(&key("b")), None);

        let keys: Vec<_> = shape.keys().cloned().collect();
        assert_eq!(keys, vec![key("a"), key("c")]);
        assert!(!shape.should_compact());
    }

    #[test]
    fn compaction_renumbers_in_order() {
        let mut shape = Shape::new();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            shape.add(key(name), i as u32, Attribute::all(), false);
        }
        shape.remove(&key("b"));

        let mut moves = Vec::new();
        shape.compact(|old, new| moves.push((old, new)));
        assert_eq!(moves, vec![(0, 0), (2, 1), (3, 2)]);
        assert_eq!(shape.get(&key("d")).unwrap().slot, 2);
    }

    #[test]
    fn compaction_threshold() {
        let mut shape = Shape::new();
        for i in 0..16u32 {
            shape.add(PropertyKey::Index(i), i, Attribute::all(), false);
        }
        for i in 0..7u32 {
            shape.remove(&PropertyKey::Index(i));
        }
        // Seven tombstones: below the absolute threshold.
        assert!(!shape.should_compact());
        shape.remove(&PropertyKey::Index(7));
        // Eight tombstones against eight live entries.
        assert!(shape.should_compact());
    }
}
