// replica-embed - Type conversion traits
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type conversion between Rust and replica values.
//!
//! This module provides the [`IntoValue`] and [`FromValue`] traits for
//! converting between Rust types and [`Value`].
//!
//! # Built-in Conversions
//!
//! | Rust Type | Value |
//! |-----------|-------|
//! | `()` | `nil` |
//! | `bool` | `bool` |
//! | `i32`, `i64` | `int` |
//! | `usize` | `int`, or `decimal` above `i64::MAX` |
//! | `f32`, `f64` | `float` |
//! | `char` | `char` |
//! | `String`, `&str`, `Rc<str>` | `string` |
//! | `Decimal` | `decimal` |
//! | `Vec<T>` | `List<T>` |
//! | `VecDeque<T>` | `Queue<T>` |
//! | `HashMap<K, V>`, `IndexMap<K, V>` | `Dictionary<K, V>` |
//! | `BTreeMap<K, V>` | `SortedDictionary<K, V>` |
//! | `(A, B)` .. `(A, B, C, D)` | tuple |
//! | `Option<T>` | `T` or `nil` |
//!
//! # Custom Conversions
//!
//! A record type describes itself by implementing both traits against a
//! [`Shape`](replica_value::Shape):
//!
//! ```rust
//! use replica_embed::{Error, FromValue, IntoValue, Result, Value};
//! use replica_value::{Record, Shape, TypeTag};
//!
//! struct Point { x: i64, y: i64 }
//!
//! impl IntoValue for Point {
//!     fn into_value(self) -> Value {
//!         let shape = Shape::value_record("Point")
//!             .field("X", TypeTag::Int)
//!             .field("Y", TypeTag::Int)
//!             .build();
//!         Value::structure(
//!             Record::zeroed(shape)
//!                 .with("X", self.x.into_value())
//!                 .with("Y", self.y.into_value()),
//!         )
//!     }
//! }
//!
//! impl FromValue for Point {
//!     fn from_value(val: &Value) -> Result<Self> {
//!         match (val.field("X"), val.field("Y")) {
//!             (Some(x), Some(y)) => Ok(Point {
//!                 x: i64::from_value(&x)?,
//!                 y: i64::from_value(&y)?,
//!             }),
//!             _ => Err(Error::type_mismatch("Point", val.runtime_type())),
//!         }
//!     }
//! }
//! ```

// Allow mutable key types - Value keys hash by identity for reference cells
#![allow(clippy::mutable_key_type)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;
use std::rc::Rc;

use indexmap::IndexMap;
use replica_core::{Error, Result};
use replica_value::{BigInt, Decimal, MapKind, SeqKind, TypeTag, Value};

/// Convert a Rust type into a `Value`.
pub trait IntoValue {
    fn into_value(self) -> Value;

    /// Declared type used when this type is a container element.
    fn type_tag() -> TypeTag
    where
        Self: Sized,
    {
        TypeTag::Any
    }
}

/// Convert a `Value` into a Rust type.
pub trait FromValue: Sized {
    fn from_value(val: &Value) -> Result<Self>;
}

// ============================================================================
// IntoValue implementations
// ============================================================================

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Nil
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Bool
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::int(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Int
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::int(self as i64)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Int
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        match i64::try_from(self) {
            Ok(n) => Value::int(n),
            // Widened so the round trip stays lossless
            Err(_) => Value::decimal(Decimal::new(BigInt::from(self), 0)),
        }
    }

    fn type_tag() -> TypeTag {
        TypeTag::Int
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::float(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Float
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::float(self as f64)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Float
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::char(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Char
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::string(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::String
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::string(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::String
    }
}

impl IntoValue for Rc<str> {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::String
    }
}

impl IntoValue for Decimal {
    fn into_value(self) -> Value {
        Value::Decimal(self)
    }

    fn type_tag() -> TypeTag {
        TypeTag::Decimal
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::list(
            T::type_tag(),
            self.into_iter().map(|x| x.into_value()).collect(),
        )
    }

    fn type_tag() -> TypeTag {
        TypeTag::list(T::type_tag())
    }
}

impl<T: IntoValue> IntoValue for VecDeque<T> {
    fn into_value(self) -> Value {
        Value::seq(
            SeqKind::Queue,
            T::type_tag(),
            self.into_iter().map(|x| x.into_value()).collect(),
        )
    }

    fn type_tag() -> TypeTag {
        TypeTag::Seq(SeqKind::Queue, Box::new(T::type_tag()))
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Nil,
        }
    }

    fn type_tag() -> TypeTag {
        T::type_tag()
    }
}

fn map_into_value<K, V>(kind: MapKind, entries: impl Iterator<Item = (K, V)>) -> Value
where
    K: IntoValue,
    V: IntoValue,
{
    let pairs: Vec<(Value, Value)> = entries
        .map(|(k, v)| (k.into_value(), v.into_value()))
        .collect();
    Value::map(kind, K::type_tag(), V::type_tag(), pairs)
}

impl<K: IntoValue, V: IntoValue> IntoValue for HashMap<K, V> {
    fn into_value(self) -> Value {
        map_into_value(MapKind::Dictionary, self.into_iter())
    }

    fn type_tag() -> TypeTag {
        TypeTag::dictionary(K::type_tag(), V::type_tag())
    }
}

impl<K: IntoValue, V: IntoValue> IntoValue for IndexMap<K, V> {
    fn into_value(self) -> Value {
        map_into_value(MapKind::Dictionary, self.into_iter())
    }

    fn type_tag() -> TypeTag {
        TypeTag::dictionary(K::type_tag(), V::type_tag())
    }
}

impl<K: IntoValue, V: IntoValue> IntoValue for BTreeMap<K, V> {
    fn into_value(self) -> Value {
        map_into_value(MapKind::Sorted, self.into_iter())
    }

    fn type_tag() -> TypeTag {
        TypeTag::Map(
            MapKind::Sorted,
            Box::new(K::type_tag()),
            Box::new(V::type_tag()),
        )
    }
}

// ============================================================================
// FromValue implementations
// ============================================================================

impl FromValue for Value {
    fn from_value(val: &Value) -> Result<Self> {
        Ok(val.clone())
    }
}

impl FromValue for () {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Nil => Ok(()),
            other => Err(Error::type_mismatch("nil", other.type_name())),
        }
    }
}

impl FromValue for bool {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("bool", other.type_name())),
        }
    }
}

impl FromValue for i64 {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Int(n) => Ok(*n),
            other => Err(Error::type_mismatch("int", other.type_name())),
        }
    }
}

impl FromValue for i32 {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Int(n) => i32::try_from(*n)
                .map_err(|_| Error::type_mismatch("i32", format!("integer {}", n))),
            other => Err(Error::type_mismatch("int", other.type_name())),
        }
    }
}

impl FromValue for usize {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Int(n) => usize::try_from(*n)
                .map_err(|_| Error::type_mismatch("usize", format!("integer {}", n))),
            Value::Decimal(d) => d
                .to_integer()
                .and_then(|n| usize::try_from(&n).ok())
                .ok_or_else(|| Error::type_mismatch("usize", format!("decimal {}", d))),
            other => Err(Error::type_mismatch("int", other.type_name())),
        }
    }
}

impl FromValue for f64 {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Float(n) => Ok(*n),
            Value::Int(n) => Ok(*n as f64),
            other => Err(Error::type_mismatch("float", other.type_name())),
        }
    }
}

impl FromValue for f32 {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Float(n) => {
                let result = *n as f32;
                if result.is_infinite() && n.is_finite() {
                    Err(Error::type_mismatch("f32", format!("float {}", n)))
                } else {
                    Ok(result)
                }
            }
            Value::Int(n) => Ok(*n as f32),
            other => Err(Error::type_mismatch("float", other.type_name())),
        }
    }
}

impl FromValue for char {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Char(c) => Ok(*c),
            other => Err(Error::type_mismatch("char", other.type_name())),
        }
    }
}

impl FromValue for String {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::String(s) => Ok(s.to_string()),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl FromValue for Rc<str> {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Decimal(d) => Ok(d.clone()),
            Value::Int(n) => Ok(Decimal::from(*n)),
            other => Err(Error::type_mismatch("decimal", other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Seq(s) => s.borrow().iter().map(T::from_value).collect(),
            other => Err(Error::type_mismatch("sequence", other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Seq(s) => s.borrow().iter().map(T::from_value).collect(),
            other => Err(Error::type_mismatch("sequence", other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn map_entries<K, V, C>(val: &Value) -> Result<C>
where
    K: FromValue,
    V: FromValue,
    C: FromIterator<(K, V)>,
{
    match val {
        Value::Map(m) => m
            .borrow()
            .iter()
            .map(|(k, v)| -> Result<(K, V)> { Ok((K::from_value(k)?, V::from_value(v)?)) })
            .collect(),
        other => Err(Error::type_mismatch("map", other.type_name())),
    }
}

impl<K: FromValue + Eq + Hash, V: FromValue> FromValue for HashMap<K, V> {
    fn from_value(val: &Value) -> Result<Self> {
        map_entries(val)
    }
}

impl<K: FromValue + Eq + Hash, V: FromValue> FromValue for IndexMap<K, V> {
    fn from_value(val: &Value) -> Result<Self> {
        map_entries(val)
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(val: &Value) -> Result<Self> {
        map_entries(val)
    }
}

// ============================================================================
// Tuples
// ============================================================================

macro_rules! impl_tuple {
    ($arity:expr; $($name:ident : $index:tt),+) => {
        impl<$($name: IntoValue),+> IntoValue for ($($name,)+) {
            fn into_value(self) -> Value {
                Value::tuple(vec![$(self.$index.into_value()),+])
            }

            fn type_tag() -> TypeTag {
                TypeTag::Tuple(vec![$($name::type_tag()),+])
            }
        }

        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(val: &Value) -> Result<Self> {
                match val {
                    Value::Tuple(t) if t.arity() == $arity => {
                        let items = t.items();
                        Ok(($($name::from_value(&items[$index])?,)+))
                    }
                    Value::Tuple(t) => Err(Error::type_mismatch(
                        format!("tuple of {}", $arity),
                        format!("tuple of {}", t.arity()),
                    )),
                    other => Err(Error::type_mismatch("tuple", other.type_name())),
                }
            }
        }
    };
}

impl_tuple!(2; A: 0, B: 1);
impl_tuple!(3; A: 0, B: 1, C: 2);
impl_tuple!(4; A: 0, B: 1, C: 2, D: 3);

// ============================================================================
// Convenience functions
// ============================================================================

/// Convert a Rust value into a `Value`.
///
/// This is a convenience function that calls `IntoValue::into_value`.
#[must_use]
pub fn to_value<T: IntoValue>(value: T) -> Value {
    value.into_value()
}

/// Convert a `Value` into a Rust type.
///
/// This is a convenience function that calls `FromValue::from_value`.
pub fn from_value<T: FromValue>(val: &Value) -> Result<T> {
    T::from_value(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        assert_eq!(i64::from_value(&42i64.into_value()), Ok(42));
        assert_eq!(String::from_value(&"hi".into_value()), Ok("hi".to_string()));
        assert_eq!(
            Option::<i64>::from_value(&None::<i64>.into_value()),
            Ok(None)
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(i32::from_value(&Value::int(i64::MAX)).is_err());
        assert!(usize::from_value(&Value::int(-1)).is_err());
        assert!(f32::from_value(&Value::float(f64::MAX)).is_err());
    }

    #[test]
    fn test_usize_beyond_int_range() {
        for n in [usize::MAX, i64::MAX as usize + 1] {
            let val = n.into_value();
            assert!(matches!(val, Value::Decimal(_)));
            assert_eq!(usize::from_value(&val), Ok(n));
        }
        assert_eq!(7usize.into_value(), Value::int(7));
        assert!(usize::from_value(&Value::decimal(Decimal::new(15, 1))).is_err());
        assert!(usize::from_value(&Value::decimal(Decimal::new(-1, 0))).is_err());
    }

    #[test]
    fn test_container_type_tags() {
        let list = vec![1i64, 2].into_value();
        assert_eq!(list.runtime_type(), "List<int>");

        let mut table = BTreeMap::new();
        table.insert("b".to_string(), vec!["x".to_string()]);
        let table = table.into_value();
        assert_eq!(
            table.runtime_type(),
            "SortedDictionary<string, List<string>>"
        );
    }

    #[test]
    fn test_tuple_arity_checked() {
        let pair = (1i64, "a").into_value();
        assert_eq!(
            <(i64, String)>::from_value(&pair),
            Ok((1, "a".to_string()))
        );
        assert!(matches!(
            <(i64, String, bool)>::from_value(&pair),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
