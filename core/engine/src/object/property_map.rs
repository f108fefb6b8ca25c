//! The property storage of an object: a [`Shape`] plus its parallel slot
//! vector, and the dense/sparse indexed storage that backs arrays and other
//! integer-keyed data.
//!
//! Plain writable/enumerable/configurable indexed data lives outside the
//! shape, as bare values: in the dense vector while the index is small, in
//! the sparse map otherwise. The moment an index acquires a non-default
//! descriptor (via `defineProperty`) it migrates into the shape, and every
//! later access on that index is served by the shape path.

use super::shape::Shape;
use crate::{
    gc::{custom_trace, Finalize, Trace},
    property::{Attribute, DescriptorKind, PropertyDescriptor, PropertyKey},
    string::JsString,
    symbol::JsSymbol,
    value::JsValue,
};
use rustc_hash::FxHashMap;

/// Indices below this bound are stored in the dense vector of an array;
/// anything at or above it goes to the sparse map.
pub(crate) const MAX_DENSE: u32 = 10_000;

/// The payload of a shape slot.
#[derive(Debug, Clone, Finalize)]
pub(crate) enum Slot {
    /// A data property value.
    Data(JsValue),
    /// An accessor property pair; `undefined` marks an absent side.
    Accessor {
        /// The getter function.
        get: JsValue,
        /// The setter function.
        set: JsValue,
    },
    /// A tombstone left behind by a deletion, reclaimed on compaction.
    Free,
}

unsafe impl Trace for Slot {
    custom_trace!(this, {
        match this {
            Slot::Data(value) => mark(value),
            Slot::Accessor { get, set } => {
                mark(get);
                mark(set);
            }
            Slot::Free => {}
        }
    });
}

/// Storage for integer-keyed plain data properties.
#[derive(Debug, Default, Finalize)]
struct IndexedProperties {
    /// The dense vector; only allocated for arrays. `None` entries are holes.
    dense: Option<Vec<Option<JsValue>>>,
    /// Scattered or large indices.
    sparse: FxHashMap<u32, JsValue>,
}

unsafe impl Trace for IndexedProperties {
    custom_trace!(this, {
        if let Some(dense) = &this.dense {
            for element in dense.iter().flatten() {
                mark(element);
            }
        }
        for value in this.sparse.values() {
            mark(value);
        }
    });
}

/// The full property storage of one object.
#[derive(Debug, Default, Finalize)]
pub struct PropertyMap {
    shape: Shape,
    slots: Vec<Slot>,
    indexed: IndexedProperties,
}

unsafe impl Trace for PropertyMap {
    custom_trace!(this, {
        mark(&this.shape);
        for slot in &this.slots {
            mark(slot);
        }
        mark(&this.indexed);
    });
}

impl PropertyMap {
    /// Create the storage of an ordinary object, with no dense vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the storage of an array, with dense element storage enabled.
    pub(crate) fn dense() -> Self {
        Self {
            indexed: IndexedProperties {
                dense: Some(Vec::new()),
                sparse: FxHashMap::default(),
            },
            ..Self::default()
        }
    }

    /// Get the full descriptor of a property, if present.
    ///
    /// Indexed values outside the shape reify as
    /// writable/enumerable/configurable data descriptors.
    pub fn get(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        if let PropertyKey::Index(index) = key {
            if let Some(value) = self.indexed_value(*index) {
                return Some(Self::plain_data_descriptor(value.clone()));
            }
        }

        let entry = self.shape.get(key)?;
        match self.slots.get(entry.slot as usize)? {
            Slot::Data(value) => Some(
                PropertyDescriptor::builder()
                    .value(value.clone())
                    .writable(entry.attributes.writable())
                    .enumerable(entry.attributes.enumerable())
                    .configurable(entry.attributes.configurable())
                    .build(),
            ),
            Slot::Accessor { get, set } => Some(
                PropertyDescriptor::builder()
                    .get(get.clone())
                    .set(set.clone())
                    .enumerable(entry.attributes.enumerable())
                    .configurable(entry.attributes.configurable())
                    .build(),
            ),
            Slot::Free => None,
        }
    }

    /// Store a (complete) descriptor under `key`.
    ///
    /// Plain indexed data that the shape does not already track goes to the
    /// dense/sparse storage; everything else lands in the shape, evicting
    /// any indexed-storage entry for the same key.
    pub fn insert(&mut self, key: &PropertyKey, property: PropertyDescriptor) {
        if let PropertyKey::Index(index) = key {
            if !self.shape.contains_key(key) && Self::is_plain_data(&property) {
                let value = property.expect_value().clone();
                self.insert_indexed_value(*index, value);
                return;
            }
            // The shape takes over this index for good.
            self.remove_indexed_value(*index);
        }

        self.shape_insert(key, property);
    }

    /// Remove a property. Returns `false` if it was absent.
    pub fn remove(&mut self, key: &PropertyKey) -> bool {
        if let PropertyKey::Index(index) = key {
            if self.remove_indexed_value(*index) {
                return true;
            }
        }

        match self.shape.remove(key) {
            Some(slot) => {
                if let Some(slot) = self.slots.get_mut(slot as usize) {
                    *slot = Slot::Free;
                }
                if self.shape.should_compact() {
                    self.compact();
                }
                true
            }
            None => false,
        }
    }

    /// Check whether a property is present.
    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        if let PropertyKey::Index(index) = key {
            if self.indexed_value(*index).is_some() {
                return true;
            }
        }
        self.shape.contains_key(key)
    }

    /// Every own integer index, ascending: dense, sparse and shape-installed.
    pub fn index_property_keys(&self) -> Vec<u32> {
        let mut keys: Vec<u32> = Vec::new();
        if let Some(dense) = &self.indexed.dense {
            keys.extend(
                dense
                    .iter()
                    .enumerate()
                    .filter(|(_, element)| element.is_some())
                    .map(|(index, _)| index as u32),
            );
        }
        keys.extend(self.indexed.sparse.keys().copied());
        keys.extend(self.shape.keys().filter_map(|key| match key {
            PropertyKey::Index(index) => Some(*index),
            _ => None,
        }));
        keys.sort_unstable();
        keys
    }

    /// Every own string key, in insertion order.
    pub fn string_property_keys(&self) -> Vec<JsString> {
        self.shape
            .keys()
            .filter_map(|key| match key {
                PropertyKey::String(string) => Some(string.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every own symbol key, in insertion order.
    pub fn symbol_property_keys(&self) -> Vec<JsSymbol> {
        self.shape
            .keys()
            .filter_map(|key| match key {
                PropertyKey::Symbol(symbol) => Some(symbol.clone()),
                _ => None,
            })
            .collect()
    }

    /// All own keys in `[[OwnPropertyKeys]]` order: integer indices
    /// ascending, then strings in insertion order, then symbols in insertion
    /// order.
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut keys: Vec<PropertyKey> = self
            .index_property_keys()
            .into_iter()
            .map(PropertyKey::Index)
            .collect();
        keys.extend(self.string_property_keys().into_iter().map(PropertyKey::String));
        keys.extend(self.symbol_property_keys().into_iter().map(PropertyKey::Symbol));
        keys
    }

    /// The number of live properties, indexed storage included.
    pub fn len(&self) -> usize {
        let dense = self
            .indexed
            .dense
            .as_ref()
            .map_or(0, |dense| dense.iter().filter(|e| e.is_some()).count());
        dense + self.indexed.sparse.len() + self.shape.len()
    }

    /// Whether there are no own properties at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn plain_data_descriptor(value: JsValue) -> PropertyDescriptor {
        PropertyDescriptor::builder()
            .value(value)
            .writable(true)
            .enumerable(true)
            .configurable(true)
            .build()
    }

    fn is_plain_data(property: &PropertyDescriptor) -> bool {
        property.is_data_descriptor()
            && property.value().is_some()
            && property.writable() == Some(true)
            && property.enumerable() == Some(true)
            && property.configurable() == Some(true)
    }

    fn indexed_value(&self, index: u32) -> Option<&JsValue> {
        if let Some(dense) = &self.indexed.dense {
            if (index as usize) < dense.len() {
                return dense[index as usize].as_ref();
            }
        }
        self.indexed.sparse.get(&index)
    }

    fn insert_indexed_value(&mut self, index: u32, value: JsValue) {
        if index < MAX_DENSE {
            if let Some(dense) = &mut self.indexed.dense {
                if index as usize >= dense.len() {
                    dense.resize(index as usize + 1, None);
                }
                dense[index as usize] = Some(value);
                return;
            }
        }
        self.indexed.sparse.insert(index, value);
    }

    fn remove_indexed_value(&mut self, index: u32) -> bool {
        if let Some(dense) = &mut self.indexed.dense {
            if (index as usize) < dense.len() {
                return dense[index as usize].take().is_some();
            }
        }
        self.indexed.sparse.remove(&index).is_some()
    }

    fn shape_insert(&mut self, key: &PropertyKey, property: PropertyDescriptor) {
        let mut attributes = Attribute::empty();
        attributes.set_writable(property.writable().unwrap_or(false));
        attributes.set_enumerable(property.enumerable().unwrap_or(false));
        attributes.set_configurable(property.configurable().unwrap_or(false));

        let accessor = property.is_accessor_descriptor();
        let payload = match property.kind() {
            DescriptorKind::Data { value, .. } => {
                Slot::Data(value.clone().unwrap_or_default())
            }
            DescriptorKind::Accessor { get, set } => Slot::Accessor {
                get: get.clone().unwrap_or_default(),
                set: set.clone().unwrap_or_default(),
            },
            DescriptorKind::Generic => Slot::Data(JsValue::undefined()),
        };

        if let Some(entry) = self.shape.get(key) {
            let slot = entry.slot as usize;
            self.slots[slot] = payload;
            self.shape.set_attributes(key, attributes, accessor);
        } else {
            let slot = self.slots.len() as u32;
            self.slots.push(payload);
            self.shape.add(key.clone(), slot, attributes, accessor);
        }
    }

    /// Rebuild the slot vector, dropping tombstones. Slot indices handed out
    /// before this call are invalidated together with the shape's.
    fn compact(&mut self) {
        let old_slots = std::mem::take(&mut self.slots);
        let mut new_slots = Vec::with_capacity(self.shape.len());
        self.shape.compact(|old, new| {
            debug_assert_eq!(new as usize, new_slots.len());
            new_slots.push(old_slots[old as usize].clone());
        });
        self.slots = new_slots;
    }
}
