// replica-value - Value types for replica
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for replica.
//!
//! `Value` is the central enum representing every datum the copy engine can
//! see. Atomics are immutable, tuples and `Struct` records are owned (value
//! semantics), and `Object`, `Seq` and `Map` are shared mutable cells whose
//! allocation is their identity (reference semantics).
//!
//! Equality, ordering and hashing are *key* semantics: content for atomics
//! and value composites, identity for reference cells. Structural
//! comparison of whole graphs lives in [`crate::equiv`].

// Allow mutable key types - reference cells hash by identity, never by content
#![allow(clippy::mutable_key_type)]

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::decimal::Decimal;
use crate::foreign::ForeignRef;
use crate::mapping::{MapKind, MapRef, Mapping};
use crate::record::{ObjectRef, Record};
use crate::sequence::{SeqKind, SeqRef, Sequence};
use crate::tuple::Tuple;
use crate::types::TypeTag;

// ============================================================================
// Identity
// ============================================================================

/// Opaque identity of a reference cell.
///
/// Two values have the same identity exactly when they share one allocation.
/// Only meaningful while that allocation is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub(crate) fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Identity(Rc::as_ptr(rc) as *const () as usize)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:x}", self.0)
    }
}

// ============================================================================
// Enumerants
// ============================================================================

/// A member of a named enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Enumerant {
    pub ty: Rc<str>,
    pub variant: Rc<str>,
    pub ordinal: i64,
}

impl Enumerant {
    pub fn new(ty: &str, variant: &str, ordinal: i64) -> Self {
        Enumerant {
            ty: Rc::from(ty),
            variant: Rc::from(variant),
            ordinal,
        }
    }
}

// ============================================================================
// Value
// ============================================================================

#[derive(Clone)]
pub enum Value {
    /// Absence of a value
    Nil,
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Fixed-precision decimal
    Decimal(Decimal),
    /// Unicode character
    Char(char),
    /// Immutable string
    String(Rc<str>),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    /// Enumeration member
    Enum(Enumerant),
    /// Host object handle
    Foreign(ForeignRef),
    /// Fixed-arity positional composite (value semantics)
    Tuple(Tuple),
    /// Value-type record (value semantics)
    Struct(Box<Record>),
    /// Reference-type or anonymous record (reference semantics)
    Object(ObjectRef),
    /// Ordered sequence (reference semantics)
    Seq(SeqRef),
    /// Key-value mapping (reference semantics)
    Map(MapRef),
}

impl Value {
    /// Create a nil value
    pub fn nil() -> Self {
        Value::Nil
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create an integer value
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a float value
    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    /// Create a decimal value
    pub fn decimal(d: Decimal) -> Self {
        Value::Decimal(d)
    }

    /// Create a character value
    pub fn char(c: char) -> Self {
        Value::Char(c)
    }

    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a timestamp value
    pub fn timestamp(millis: i64) -> Self {
        Value::Timestamp(millis)
    }

    /// Create an enumerant value
    pub fn enumerant(ty: &str, variant: &str, ordinal: i64) -> Self {
        Value::Enum(Enumerant::new(ty, variant, ordinal))
    }

    /// Create an unlabelled tuple
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Tuple::new(items))
    }

    /// Create a labelled tuple
    pub fn labelled_tuple(pairs: Vec<(&str, Value)>) -> Self {
        Value::Tuple(Tuple::labelled(pairs))
    }

    /// Wrap a record as a value-type record
    pub fn structure(record: Record) -> Self {
        Value::Struct(Box::new(record))
    }

    /// Wrap a record in a new reference cell
    pub fn object(record: Record) -> Self {
        Value::Object(ObjectRef::new(record))
    }

    /// Create a sequence of the given kind
    pub fn seq(kind: SeqKind, elem: TypeTag, items: Vec<Value>) -> Self {
        Value::Seq(SeqRef::new(Sequence::from_items(kind, elem, items)))
    }

    /// Create a `List` sequence
    pub fn list(elem: TypeTag, items: Vec<Value>) -> Self {
        Value::seq(SeqKind::List, elem, items)
    }

    /// Create a mapping of the given kind
    pub fn map(kind: MapKind, key: TypeTag, value: TypeTag, pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(MapRef::new(Mapping::from_pairs(kind, key, value, pairs)))
    }

    /// Create a `Dictionary` mapping
    pub fn dictionary(key: TypeTag, value: TypeTag, pairs: Vec<(Value, Value)>) -> Self {
        Value::map(MapKind::Dictionary, key, value, pairs)
    }

    /// Check if this value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns true for values with identity.
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Seq(_) | Value::Map(_))
    }

    /// Identity of a reference cell, `None` for everything else.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Object(o) => Some(o.identity()),
            Value::Seq(s) => Some(s.identity()),
            Value::Map(m) => Some(m.identity()),
            _ => None,
        }
    }

    /// Returns true if both values are the same reference cell.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Foreign(a), Value::Foreign(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Enum(_) => "enum",
            Value::Foreign(_) => "foreign",
            Value::Tuple(_) => "tuple",
            Value::Struct(_) => "struct",
            Value::Object(_) => "object",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }

    /// Name of the concrete runtime type, e.g. a shape or foreign type name.
    pub fn runtime_type(&self) -> String {
        match self {
            Value::Struct(r) => r.shape().name().to_string(),
            Value::Object(o) => o.borrow().shape().name().to_string(),
            Value::Seq(s) => {
                let s = s.borrow();
                format!("{}<{}>", s.kind().name(), s.elem())
            }
            Value::Map(m) => {
                let m = m.borrow();
                format!("{}<{}, {}>", m.kind().name(), m.key_type(), m.value_type())
            }
            Value::Enum(e) => e.ty.to_string(),
            Value::Foreign(h) => h.type_name().to_string(),
            other => other.type_name().to_string(),
        }
    }

    /// Read a record field by name, for `Struct` and `Object` values.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Struct(r) => r.get(name).cloned(),
            Value::Object(o) => o.borrow().get(name).cloned(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

// ============================================================================
// Display implementation
// ============================================================================

/// Writes values, tracking the reference cells currently being printed so
/// cyclic graphs terminate.
struct Printer {
    active: Vec<Identity>,
}

impl Printer {
    fn write(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        if let Some(id) = value.identity() {
            if self.active.contains(&id) {
                return write!(f, "#<cycle {}>", value.runtime_type());
            }
            self.active.push(id);
            let result = self.write_inner(f, value);
            self.active.pop();
            return result;
        }
        self.write_inner(f, value)
    }

    fn write_inner(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        match value {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    write!(f, "{}.0", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Decimal(d) => write!(f, "{}m", d),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Timestamp(t) => write!(f, "#inst {}", t),
            Value::Enum(e) => write!(f, "{}.{}", e.ty, e.variant),
            Value::Foreign(h) => write!(f, "{}", h),
            Value::Tuple(t) => {
                write!(f, "(")?;
                for (i, item) in t.items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(labels) = t.labels() {
                        write!(f, "{}: ", labels[i])?;
                    }
                    self.write(f, item)?;
                }
                write!(f, ")")
            }
            Value::Struct(r) => self.write_record(f, r),
            Value::Object(o) => {
                let record = o.borrow();
                self.write_record(f, &record)
            }
            Value::Seq(s) => {
                let seq = s.borrow();
                match seq.kind() {
                    SeqKind::List => write!(f, "[")?,
                    kind => write!(f, "{}[", kind.name())?,
                }
                for (i, item) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.write(f, item)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                let map = m.borrow();
                if map.kind() == MapKind::Sorted {
                    write!(f, "sorted")?;
                }
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.write(f, k)?;
                    write!(f, " => ")?;
                    self.write(f, v)?;
                }
                write!(f, "}}")
            }
        }
    }

    fn write_record(&mut self, f: &mut fmt::Formatter<'_>, record: &Record) -> fmt::Result {
        write!(f, "{} {{", record.shape().name())?;
        let mut first = true;
        for (field, slot) in record.shape().fields().iter().zip(record.slots()) {
            if !field.access.is_readable() {
                continue;
            }
            write!(f, "{}{}: ", if first { " " } else { ", " }, field.name)?;
            first = false;
            self.write(f, slot)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { active: Vec::new() }.write(f, self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Equality and ordering (for use as mapping keys)
// ============================================================================

fn same_shape(a: &Record, b: &Record) -> bool {
    Rc::ptr_eq(a.shape(), b.shape()) || a.shape().same_layout(b.shape())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Foreign(a), Value::Foreign(b)) => a.ptr_eq(b),
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => same_shape(a, b) && a.slots() == b.slots(),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        // Type ordering for heterogeneous comparison
        fn type_order(v: &Value) -> u8 {
            match v {
                Value::Nil => 0,
                Value::Bool(_) => 1,
                Value::Int(_) => 2,
                Value::Float(_) => 3,
                Value::Decimal(_) => 4,
                Value::Char(_) => 5,
                Value::String(_) => 6,
                Value::Timestamp(_) => 7,
                Value::Enum(_) => 8,
                Value::Foreign(_) => 9,
                Value::Tuple(_) => 10,
                Value::Struct(_) => 11,
                Value::Object(_) => 12,
                Value::Seq(_) => 13,
                Value::Map(_) => 14,
            }
        }

        let ta = type_order(self);
        let tb = type_order(other);
        if ta != tb {
            return ta.cmp(&tb);
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Enum(a), Value::Enum(b)) => a.cmp(b),
            (Value::Foreign(a), Value::Foreign(b)) => a.address().cmp(&b.address()),
            (Value::Tuple(a), Value::Tuple(b)) => a.cmp(b),
            (Value::Struct(a), Value::Struct(b)) => a
                .shape()
                .name()
                .cmp(b.shape().name())
                .then_with(|| a.slots().cmp(b.slots()))
                .then_with(|| {
                    if same_shape(a, b) {
                        Ordering::Equal
                    } else {
                        Rc::as_ptr(a.shape()).cmp(&Rc::as_ptr(b.shape()))
                    }
                }),
            // Reference cells order by address for a consistent key order
            (a, b) => a.identity().cmp(&b.identity()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(n) => n.to_bits().hash(state),
            Value::Decimal(d) => d.hash(state),
            Value::Char(c) => c.hash(state),
            Value::String(s) => s.hash(state),
            Value::Timestamp(t) => t.hash(state),
            Value::Enum(e) => e.hash(state),
            Value::Foreign(h) => h.address().hash(state),
            Value::Tuple(t) => t.hash(state),
            Value::Struct(r) => {
                r.shape().name().hash(state);
                r.slots().hash(state);
            }
            // Hash by pointer address (reference cells are identity-compared)
            Value::Object(_) | Value::Seq(_) | Value::Map(_) => self.identity().hash(state),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
