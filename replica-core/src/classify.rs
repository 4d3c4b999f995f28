// replica-core - Type classifier
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Assigns each value a copy category.

use std::fmt;

use replica_value::{Sharing, Value};

use crate::error::{Error, Result};

/// Whether a record is shared by reference or copied by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Semantics {
    Reference,
    Value,
}

/// How a value is copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyCategory {
    Atomic,
    CompositeRecord(Semantics),
    OrderedSequence,
    KeyValueMapping,
    FixedTuple,
}

impl CopyCategory {
    /// Returns true if values in this category have identity and take part
    /// in cycle tracking.
    pub fn tracks_identity(self) -> bool {
        matches!(
            self,
            CopyCategory::CompositeRecord(Semantics::Reference)
                | CopyCategory::OrderedSequence
                | CopyCategory::KeyValueMapping
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            CopyCategory::Atomic => "atomic",
            CopyCategory::CompositeRecord(Semantics::Reference) => "reference-record",
            CopyCategory::CompositeRecord(Semantics::Value) => "value-record",
            CopyCategory::OrderedSequence => "ordered-sequence",
            CopyCategory::KeyValueMapping => "key-value-mapping",
            CopyCategory::FixedTuple => "fixed-tuple",
        }
    }
}

impl fmt::Display for CopyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify a value.
///
/// Atomics are checked first, then tuples, mappings, sequences and finally
/// records. `Nil` is atomic.
pub fn classify(value: &Value) -> Result<CopyCategory> {
    match value {
        Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Decimal(_)
        | Value::Char(_)
        | Value::String(_)
        | Value::Timestamp(_)
        | Value::Enum(_) => Ok(CopyCategory::Atomic),
        Value::Foreign(handle) => match handle.sharing() {
            Sharing::Opaque => Ok(CopyCategory::Atomic),
            Sharing::Unspecified => Err(Error::unclassifiable(
                handle.type_name(),
                "foreign handle is not declared shareable",
            )),
        },
        Value::Tuple(_) => Ok(CopyCategory::FixedTuple),
        Value::Map(_) => Ok(CopyCategory::KeyValueMapping),
        Value::Seq(_) => Ok(CopyCategory::OrderedSequence),
        Value::Object(obj) => {
            let record = obj.borrow();
            if record.shape().is_reference() {
                Ok(CopyCategory::CompositeRecord(Semantics::Reference))
            } else {
                Err(Error::unclassifiable(
                    record.shape().name(),
                    "value-record shape held by reference",
                ))
            }
        }
        Value::Struct(record) => {
            if record.shape().is_reference() {
                Err(Error::unclassifiable(
                    record.shape().name(),
                    "reference shape held by value",
                ))
            } else {
                Ok(CopyCategory::CompositeRecord(Semantics::Value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_value::{Decimal, ForeignRef, Record, Shape, TypeTag};

    #[test]
    fn test_atomics() {
        for value in [
            Value::nil(),
            Value::bool(true),
            Value::int(1),
            Value::float(1.5),
            Value::decimal(Decimal::new(5, 1)),
            Value::char('x'),
            Value::string("s"),
            Value::timestamp(0),
            Value::enumerant("Color", "Red", 0),
            Value::Foreign(ForeignRef::opaque("File", 3u8)),
        ] {
            assert_eq!(classify(&value), Ok(CopyCategory::Atomic), "{:?}", value);
        }
    }

    #[test]
    fn test_composites() {
        let class = Shape::class("C").build();
        let value_record = Shape::value_record("V").build();
        let anon = Shape::anonymous().build();

        assert_eq!(
            classify(&Value::tuple(vec![Value::int(1)])),
            Ok(CopyCategory::FixedTuple)
        );
        assert_eq!(
            classify(&Value::dictionary(TypeTag::Int, TypeTag::Int, vec![])),
            Ok(CopyCategory::KeyValueMapping)
        );
        assert_eq!(
            classify(&Value::list(TypeTag::Int, vec![])),
            Ok(CopyCategory::OrderedSequence)
        );
        assert_eq!(
            classify(&Value::object(Record::zeroed(class))),
            Ok(CopyCategory::CompositeRecord(Semantics::Reference))
        );
        assert_eq!(
            classify(&Value::object(Record::zeroed(anon))),
            Ok(CopyCategory::CompositeRecord(Semantics::Reference))
        );
        assert_eq!(
            classify(&Value::structure(Record::zeroed(value_record))),
            Ok(CopyCategory::CompositeRecord(Semantics::Value))
        );
    }

    #[test]
    fn test_unclassifiable() {
        let handle = Value::Foreign(ForeignRef::unspecified("Socket", ()));
        assert!(matches!(
            classify(&handle),
            Err(Error::UnclassifiableShape { type_name, .. }) if type_name == "Socket"
        ));

        let boxed_value = Value::object(Record::zeroed(Shape::value_record("V").build()));
        assert!(classify(&boxed_value).is_err());

        let unboxed_class = Value::structure(Record::zeroed(Shape::class("C").build()));
        assert!(classify(&unboxed_class).is_err());
    }

    #[test]
    fn test_tracks_identity() {
        assert!(CopyCategory::OrderedSequence.tracks_identity());
        assert!(CopyCategory::KeyValueMapping.tracks_identity());
        assert!(CopyCategory::CompositeRecord(Semantics::Reference).tracks_identity());
        assert!(!CopyCategory::CompositeRecord(Semantics::Value).tracks_identity());
        assert!(!CopyCategory::FixedTuple.tracks_identity());
        assert!(!CopyCategory::Atomic.tracks_identity());
    }
}
