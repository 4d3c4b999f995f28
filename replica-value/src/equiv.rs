// replica-value - Structural comparison of value graphs
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Structural equivalence, content ordering and storage sharing.
//!
//! `Value`'s `PartialEq` and `Ord` treat reference cells by identity. The
//! functions here look through identity instead: two graphs are equivalent
//! when they have the same shape and the same contents, even if every cell
//! differs.

// Allow mutable key types - Identity is an address, not the cell contents
#![allow(clippy::mutable_key_type)]

use std::cmp::Ordering;
use std::collections::HashSet;
use std::rc::Rc;

use crate::record::Record;
use crate::tuple::Tuple;
use crate::value::{Identity, Value};

/// Returns true if `a` and `b` are structurally equivalent.
///
/// Atomics compare by value and opaque foreign handles by host identity.
/// Records compare their layout and every stored slot, including fields
/// without a getter. Sequences and mappings compare kind, declared types
/// and contents in iteration order.
///
/// Cycles are handled coinductively: a pair of cells already under
/// comparison is assumed equivalent, so two isomorphic cyclic graphs
/// compare equal.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    Comparator {
        assumed: HashSet::new(),
    }
    .compare(a, b)
}

struct Comparator {
    assumed: HashSet<(Identity, Identity)>,
}

impl Comparator {
    fn compare(&mut self, a: &Value, b: &Value) -> bool {
        if let (Some(ia), Some(ib)) = (a.identity(), b.identity()) {
            if !self.assumed.insert((ia, ib)) {
                return true;
            }
        }

        match (a, b) {
            (Value::Foreign(x), Value::Foreign(y)) => x.ptr_eq(y),
            (Value::Tuple(x), Value::Tuple(y)) => self.compare_tuples(x, y),
            (Value::Struct(x), Value::Struct(y)) => self.compare_records(x, y),
            (Value::Object(x), Value::Object(y)) => {
                let (x, y) = (x.borrow(), y.borrow());
                self.compare_records(&x, &y)
            }
            (Value::Seq(x), Value::Seq(y)) => {
                let (x, y) = (x.borrow(), y.borrow());
                x.kind() == y.kind()
                    && x.elem() == y.elem()
                    && x.len() == y.len()
                    && x.iter().zip(y.iter()).all(|(p, q)| self.compare(p, q))
            }
            (Value::Map(x), Value::Map(y)) => {
                let (x, y) = (x.borrow(), y.borrow());
                x.kind() == y.kind()
                    && x.key_type() == y.key_type()
                    && x.value_type() == y.value_type()
                    && x.len() == y.len()
                    && x
                        .iter()
                        .zip(y.iter())
                        .all(|((kx, vx), (ky, vy))| self.compare(kx, ky) && self.compare(vx, vy))
            }
            (x, y) if !x.is_reference() && !y.is_reference() => x == y,
            _ => false,
        }
    }

    fn compare_tuples(&mut self, a: &Tuple, b: &Tuple) -> bool {
        a.labels() == b.labels()
            && a.arity() == b.arity()
            && a.items()
                .iter()
                .zip(b.items())
                .all(|(p, q)| self.compare(p, q))
    }

    fn compare_records(&mut self, a: &Record, b: &Record) -> bool {
        (Rc::ptr_eq(a.shape(), b.shape()) || a.shape().same_layout(b.shape()))
            && a.slots()
                .iter()
                .zip(b.slots())
                .all(|(p, q)| self.compare(p, q))
    }
}

/// Order two values by content.
///
/// Atomics and foreign handles use `Value`'s `Ord`. Reference cells order by
/// what they hold instead of where they live: records by shape name then
/// slots, sequences by kind, element type then items, mappings by kind,
/// declared types then entries. Equivalent values compare `Equal`, so a copy
/// sorts exactly where its source does.
///
/// A pair of cells already under comparison is assumed equal. A cell that
/// is mutably borrowed cannot be read and falls back to address order.
pub fn content_cmp(a: &Value, b: &Value) -> Ordering {
    Orderer {
        assumed: HashSet::new(),
    }
    .order(a, b)
}

struct Orderer {
    assumed: HashSet<(Identity, Identity)>,
}

impl Orderer {
    fn order(&mut self, a: &Value, b: &Value) -> Ordering {
        if let (Some(ia), Some(ib)) = (a.identity(), b.identity()) {
            if ia == ib || !self.assumed.insert((ia, ib)) {
                return Ordering::Equal;
            }
        }

        match (a, b) {
            (Value::Tuple(x), Value::Tuple(y)) => x
                .labels()
                .cmp(&y.labels())
                .then_with(|| self.order_items(x.items().iter(), y.items().iter())),
            (Value::Struct(x), Value::Struct(y)) => self.order_records(x, y),
            (Value::Object(x), Value::Object(y)) => match (x.try_borrow(), y.try_borrow()) {
                (Some(x), Some(y)) => self.order_records(&x, &y),
                _ => a.cmp(b),
            },
            (Value::Seq(x), Value::Seq(y)) => match (x.try_borrow(), y.try_borrow()) {
                (Some(x), Some(y)) => x
                    .kind()
                    .cmp(&y.kind())
                    .then_with(|| x.elem().cmp(y.elem()))
                    .then_with(|| self.order_items(x.iter(), y.iter())),
                _ => a.cmp(b),
            },
            (Value::Map(x), Value::Map(y)) => match (x.try_borrow(), y.try_borrow()) {
                (Some(x), Some(y)) => x
                    .kind()
                    .cmp(&y.kind())
                    .then_with(|| x.key_type().cmp(y.key_type()))
                    .then_with(|| x.value_type().cmp(y.value_type()))
                    .then_with(|| {
                        self.order_items(
                            x.iter().flat_map(|(k, v)| [k, v]),
                            y.iter().flat_map(|(k, v)| [k, v]),
                        )
                    }),
                _ => a.cmp(b),
            },
            _ => a.cmp(b),
        }
    }

    fn order_records(&mut self, a: &Record, b: &Record) -> Ordering {
        a.shape()
            .name()
            .cmp(b.shape().name())
            .then_with(|| self.order_items(a.slots().iter(), b.slots().iter()))
    }

    /// Lexicographic; a shorter run of equal items sorts first.
    fn order_items<'v>(
        &mut self,
        mut xs: impl Iterator<Item = &'v Value>,
        mut ys: impl Iterator<Item = &'v Value>,
    ) -> Ordering {
        loop {
            match (xs.next(), ys.next()) {
                (Some(x), Some(y)) => match self.order(x, y) {
                    Ordering::Equal => {}
                    other => return other,
                },
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => return Ordering::Equal,
            }
        }
    }
}

/// Collect the identities of every reference cell reachable from `value`,
/// including `value` itself.
pub fn reachable_identities(value: &Value) -> HashSet<Identity> {
    let mut seen = HashSet::new();
    let mut stack = vec![value.clone()];

    while let Some(current) = stack.pop() {
        if let Some(id) = current.identity() {
            if !seen.insert(id) {
                continue;
            }
        }
        match &current {
            Value::Tuple(t) => stack.extend(t.items().iter().cloned()),
            Value::Struct(r) => stack.extend(r.slots().iter().cloned()),
            Value::Object(o) => stack.extend(o.borrow().slots().iter().cloned()),
            Value::Seq(s) => stack.extend(s.borrow().iter().cloned()),
            Value::Map(m) => {
                for (k, v) in m.borrow().iter() {
                    stack.push(k.clone());
                    stack.push(v.clone());
                }
            }
            _ => {}
        }
    }

    seen
}

/// Returns true if any reference cell is reachable from both values.
///
/// Opaque foreign handles are not counted; they are always shared.
pub fn shares_storage(a: &Value, b: &Value) -> bool {
    let left = reachable_identities(a);
    reachable_identities(b).iter().any(|id| left.contains(id))
}
