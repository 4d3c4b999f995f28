// replica-value - Fixed-arity tuples
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Fixed-arity positional composites with value semantics.
//!
//! A tuple owns its positions. Cloning a `Tuple` copies the positions but
//! any sequence or mapping held in a position is still shared, exactly like
//! a value tuple holding a list reference.

use std::rc::Rc;

use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple {
    labels: Option<Rc<[Rc<str>]>>,
    items: Vec<Value>,
}

impl Tuple {
    /// Create an unlabelled tuple.
    pub fn new(items: Vec<Value>) -> Self {
        Tuple {
            labels: None,
            items,
        }
    }

    /// Create a tuple whose positions carry names, e.g. `(Age: 27, Name: "Ted")`.
    pub fn labelled(pairs: Vec<(&str, Value)>) -> Self {
        let (labels, items): (Vec<Rc<str>>, Vec<Value>) = pairs
            .into_iter()
            .map(|(label, value)| (Rc::from(label), value))
            .unzip();
        Tuple {
            labels: Some(labels.into()),
            items,
        }
    }

    /// Create a tuple reusing another tuple's labels.
    ///
    /// Returns `None` if the label count does not match the arity.
    pub fn with_labels(labels: Option<Rc<[Rc<str>]>>, items: Vec<Value>) -> Option<Self> {
        match &labels {
            Some(l) if l.len() != items.len() => None,
            _ => Some(Tuple { labels, items }),
        }
    }

    pub fn arity(&self) -> usize {
        self.items.len()
    }

    pub fn labels(&self) -> Option<&Rc<[Rc<str>]>> {
        self.labels.as_ref()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Look up a position by label.
    pub fn field(&self, label: &str) -> Option<&Value> {
        let labels = self.labels.as_ref()?;
        let index = labels.iter().position(|l| &**l == label)?;
        self.items.get(index)
    }

    /// Replace a position, returning the previous value.
    pub fn set(&mut self, index: usize, value: Value) -> Option<Value> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, value))
    }
}
