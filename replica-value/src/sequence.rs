// replica-value - Ordered sequences
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Variable-length ordered containers.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::types::TypeTag;
use crate::value::{Identity, Value};

/// Concrete sequence kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeqKind {
    List,
    Array,
    Queue,
}

impl SeqKind {
    pub fn name(self) -> &'static str {
        match self {
            SeqKind::List => "List",
            SeqKind::Array => "Array",
            SeqKind::Queue => "Queue",
        }
    }
}

/// An ordered sequence with a declared element type.
#[derive(Clone, Debug)]
pub struct Sequence {
    kind: SeqKind,
    elem: TypeTag,
    items: Vector<Value>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new(kind: SeqKind, elem: TypeTag) -> Self {
        Sequence {
            kind,
            elem,
            items: Vector::new(),
        }
    }

    /// Create a sequence holding `items`.
    pub fn from_items(kind: SeqKind, elem: TypeTag, items: Vec<Value>) -> Self {
        Sequence {
            kind,
            elem,
            items: items.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    pub fn elem(&self) -> &TypeTag {
        &self.elem
    }

    pub fn items(&self) -> &Vector<Value> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> im::vector::Iter<'_, Value> {
        self.items.iter()
    }

    /// Append to the back.
    pub fn push(&mut self, value: Value) {
        self.items.push_back(value);
    }

    /// Remove from the front (queue order).
    pub fn pop_front(&mut self) -> Option<Value> {
        self.items.pop_front()
    }

    /// Replace an element, returning the previous one.
    pub fn set(&mut self, index: usize, value: Value) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.set(index, value))
        } else {
            None
        }
    }
}

/// A shared, mutable sequence.
#[derive(Clone)]
pub struct SeqRef(Rc<RefCell<Sequence>>);

impl SeqRef {
    pub fn new(seq: Sequence) -> Self {
        SeqRef(Rc::new(RefCell::new(seq)))
    }

    pub fn borrow(&self) -> Ref<'_, Sequence> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Sequence> {
        self.0.borrow_mut()
    }

    /// Borrow unless the cell is being mutated.
    pub fn try_borrow(&self) -> Option<Ref<'_, Sequence>> {
        self.0.try_borrow().ok()
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &SeqRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SeqRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Seq(self.clone()))
    }
}
