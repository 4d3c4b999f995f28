// replica-value - Key-value mappings
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Key-value mappings with unique keys.
//!
//! Entries are kept in an `IndexMap`, so iteration order is stable: insertion
//! order for dictionaries, key order for sorted mappings. Sorted mappings
//! order keys by content (see [`content_cmp`]), so a copied key lands where
//! its source did.

// Keys may hold reference cells; their hash and equality use identity.
#![allow(clippy::mutable_key_type)]

use std::cell::{Ref, RefCell, RefMut};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::equiv::content_cmp;
use crate::types::TypeTag;
use crate::value::{Identity, Value};

/// Concrete mapping kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKind {
    /// Iterates in insertion order
    Dictionary,
    /// Iterates in key order
    Sorted,
}

impl MapKind {
    pub fn name(self) -> &'static str {
        match self {
            MapKind::Dictionary => "Dictionary",
            MapKind::Sorted => "SortedDictionary",
        }
    }
}

/// A mapping with declared key and value types.
#[derive(Clone, Debug)]
pub struct Mapping {
    kind: MapKind,
    key: TypeTag,
    value: TypeTag,
    entries: IndexMap<Value, Value>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new(kind: MapKind, key: TypeTag, value: TypeTag) -> Self {
        Mapping {
            kind,
            key,
            value,
            entries: IndexMap::new(),
        }
    }

    /// Create a mapping from key-value pairs. Later duplicates win.
    pub fn from_pairs(
        kind: MapKind,
        key: TypeTag,
        value: TypeTag,
        pairs: Vec<(Value, Value)>,
    ) -> Self {
        let mut mapping = Mapping::new(kind, key, value);
        for (k, v) in pairs {
            mapping.insert(k, v);
        }
        mapping
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn key_type(&self) -> &TypeTag {
        &self.key
    }

    pub fn value_type(&self) -> &TypeTag {
        &self.value
    }

    pub fn entries(&self) -> &IndexMap<Value, Value> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    /// Insert an entry, returning the value previously bound to `key`.
    ///
    /// Dictionaries append new keys; sorted mappings place them by key order,
    /// after any keys with equal content. An existing key keeps its position
    /// either way.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.kind {
            MapKind::Dictionary => self.entries.insert(key, value),
            MapKind::Sorted => {
                if let Some(slot) = self.entries.get_mut(&key) {
                    return Some(std::mem::replace(slot, value));
                }
                let index = self
                    .entries
                    .partition_point(|k, _| content_cmp(k, &key) != Ordering::Greater);
                self.entries.shift_insert(index, key, value);
                None
            }
        }
    }

    /// Append an entry after the existing ones, whatever the kind.
    ///
    /// For entries that already arrive in iteration order, such as those of
    /// another mapping of the same kind. An existing key keeps its position.
    pub fn append(&mut self, key: Value, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Remove an entry, preserving the order of the others.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries.shift_remove(key)
    }
}

/// A shared, mutable mapping.
#[derive(Clone)]
pub struct MapRef(Rc<RefCell<Mapping>>);

impl MapRef {
    pub fn new(mapping: Mapping) -> Self {
        MapRef(Rc::new(RefCell::new(mapping)))
    }

    pub fn borrow(&self) -> Ref<'_, Mapping> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Mapping> {
        self.0.borrow_mut()
    }

    /// Borrow unless the cell is being mutated.
    pub fn try_borrow(&self) -> Option<Ref<'_, Mapping>> {
        self.0.try_borrow().ok()
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Map(self.clone()))
    }
}
