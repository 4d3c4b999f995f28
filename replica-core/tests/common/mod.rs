// replica-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for replica integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`dummy_shape`] - Shape with list, number, text, decimal and table fields
//! - [`dummy_object`] / [`dummy_struct`] / [`dummy_anonymous`] - Populated records
//! - [`push`] / [`insert`] - Mutate a sequence or mapping in place
//! - [`scenario_registry`] - Shapes the generators can produce
//! - [`arb_type_tag`] / [`arb_value_for`] / [`arb_value`] - proptest strategies

#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::mutable_key_type)]

use std::rc::Rc;

use proptest::prelude::*;

pub use replica_core::{CopyOptions, Error, MemberPolicy, copy, copy_with};
pub use replica_value::{
    Decimal, FieldAccess, ForeignRef, MapKind, Record, SeqKind, Shape, ShapeBuilder,
    ShapeRegistry, TypeTag, Value, equivalent, reachable_identities, shares_storage,
};

// =============================================================================
// Scenario shapes
// =============================================================================

fn with_dummy_fields(builder: ShapeBuilder) -> Rc<Shape> {
    builder
        .field("List", TypeTag::list(TypeTag::String))
        .field("Age", TypeTag::Int)
        .field("Name", TypeTag::String)
        .field("Money", TypeTag::Decimal)
        .field("Table", TypeTag::dictionary(TypeTag::Int, TypeTag::String))
        .field(
            "ComplexTable",
            TypeTag::dictionary(TypeTag::String, TypeTag::list(TypeTag::String)),
        )
        .build()
}

/// Shape of `DummyObject` (class) or `DummyStruct` (value record).
pub fn dummy_shape(reference: bool) -> Rc<Shape> {
    if reference {
        with_dummy_fields(Shape::class("DummyObject"))
    } else {
        with_dummy_fields(Shape::value_record("DummyStruct"))
    }
}

/// Fill a record with the fixed scenario data.
pub fn fill_dummy(shape: Rc<Shape>) -> Record {
    Record::zeroed(shape)
        .with(
            "List",
            Value::list(
                TypeTag::String,
                vec![Value::string("alpha"), Value::string("beta")],
            ),
        )
        .with("Age", Value::int(27))
        .with("Name", Value::string("Ted"))
        .with("Money", Value::decimal("1024.50".parse().unwrap()))
        .with(
            "Table",
            Value::dictionary(
                TypeTag::Int,
                TypeTag::String,
                vec![
                    (Value::int(1), Value::string("one")),
                    (Value::int(2), Value::string("two")),
                ],
            ),
        )
        .with(
            "ComplexTable",
            Value::dictionary(
                TypeTag::String,
                TypeTag::list(TypeTag::String),
                vec![
                    (
                        Value::string("first"),
                        Value::list(TypeTag::String, vec![Value::string("a")]),
                    ),
                    (
                        Value::string("second"),
                        Value::list(
                            TypeTag::String,
                            vec![Value::string("b"), Value::string("c")],
                        ),
                    ),
                ],
            ),
        )
}

pub fn dummy_object() -> Value {
    Value::object(fill_dummy(dummy_shape(true)))
}

pub fn dummy_struct() -> Value {
    Value::structure(fill_dummy(dummy_shape(false)))
}

/// Anonymous record holding a list and two dictionaries.
pub fn dummy_anonymous() -> Value {
    let shape = Shape::anonymous()
        .field("List", TypeTag::list(TypeTag::String))
        .field("Table", TypeTag::dictionary(TypeTag::Int, TypeTag::String))
        .field(
            "ComplexTable",
            TypeTag::dictionary(TypeTag::String, TypeTag::list(TypeTag::String)),
        )
        .build();
    let record = fill_dummy(dummy_shape(true));
    Value::object(
        Record::zeroed(shape)
            .with("List", record.get("List").cloned().unwrap())
            .with("Table", record.get("Table").cloned().unwrap())
            .with("ComplexTable", record.get("ComplexTable").cloned().unwrap()),
    )
}

// =============================================================================
// Mutation helpers
// =============================================================================

/// Append to a sequence value.
pub fn push(seq: &Value, item: Value) {
    match seq {
        Value::Seq(s) => s.borrow_mut().push(item),
        other => panic!("expected sequence, got {}", other.type_name()),
    }
}

/// Insert into a mapping value.
pub fn insert(map: &Value, key: Value, value: Value) {
    match map {
        Value::Map(m) => {
            m.borrow_mut().insert(key, value);
        }
        other => panic!("expected mapping, got {}", other.type_name()),
    }
}

/// Number of elements in a sequence or entries in a mapping.
pub fn len(value: &Value) -> usize {
    match value {
        Value::Seq(s) => s.borrow().len(),
        Value::Map(m) => m.borrow().len(),
        other => panic!("expected container, got {}", other.type_name()),
    }
}

/// Look up a mapping entry.
pub fn lookup(map: &Value, key: &Value) -> Option<Value> {
    match map {
        Value::Map(m) => m.borrow().get(key).cloned(),
        other => panic!("expected mapping, got {}", other.type_name()),
    }
}

// =============================================================================
// Strategies for generating values
// =============================================================================

/// Registry of the shapes the generators can produce.
pub fn scenario_registry() -> Rc<ShapeRegistry> {
    let mut registry = ShapeRegistry::new();
    registry.register(dummy_shape(true));
    registry.register(dummy_shape(false));
    registry.register(
        Shape::value_record("Point")
            .field("X", TypeTag::Int)
            .field("Y", TypeTag::Int)
            .build(),
    );
    registry.register(
        Shape::class("Route")
            .field("Label", TypeTag::String)
            .field("Stops", TypeTag::list(TypeTag::named("Point")))
            .derived("Length", TypeTag::Float)
            .build(),
    );
    Rc::new(registry)
}

fn arb_leaf_tag() -> impl Strategy<Value = TypeTag> {
    prop_oneof![
        Just(TypeTag::Bool),
        Just(TypeTag::Int),
        Just(TypeTag::Float),
        Just(TypeTag::Decimal),
        Just(TypeTag::Char),
        Just(TypeTag::String),
        Just(TypeTag::Timestamp),
        Just(TypeTag::named("Point")),
        Just(TypeTag::named("Route")),
        Just(TypeTag::named("DummyObject")),
        Just(TypeTag::named("DummyStruct")),
    ]
}

/// Mapping key types: atomics, plus list cells that key by identity.
fn arb_key_tag() -> impl Strategy<Value = TypeTag> {
    prop_oneof![
        Just(TypeTag::Int),
        Just(TypeTag::String),
        Just(TypeTag::Char),
        Just(TypeTag::list(TypeTag::Int)),
    ]
}

fn arb_seq_kind() -> impl Strategy<Value = SeqKind> {
    prop_oneof![
        Just(SeqKind::List),
        Just(SeqKind::Array),
        Just(SeqKind::Queue)
    ]
}

fn arb_map_kind() -> impl Strategy<Value = MapKind> {
    prop_oneof![Just(MapKind::Dictionary), Just(MapKind::Sorted)]
}

/// Generate declared types, nesting sequences, mappings and tuples.
pub fn arb_type_tag() -> impl Strategy<Value = TypeTag> {
    arb_leaf_tag().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (arb_seq_kind(), inner.clone()).prop_map(|(k, e)| TypeTag::Seq(k, Box::new(e))),
            (arb_map_kind(), arb_key_tag(), inner.clone())
                .prop_map(|(m, k, v)| TypeTag::Map(m, Box::new(k), Box::new(v))),
            prop::collection::vec(inner, 1..4).prop_map(TypeTag::Tuple),
        ]
    })
}

/// Generate a record of `shape`, filling every stored field.
fn arb_record(shape: Rc<Shape>, registry: &Rc<ShapeRegistry>) -> BoxedStrategy<Value> {
    let stored: Vec<(Rc<str>, BoxedStrategy<Value>)> = shape
        .fields()
        .iter()
        .filter(|f| f.access != FieldAccess::Derived)
        .map(|f| (f.name.clone(), arb_value_for(&f.ty, registry)))
        .collect();
    let (names, strategies): (Vec<_>, Vec<_>) = stored.into_iter().unzip();

    strategies
        .prop_map(move |values| {
            let mut record = Record::zeroed(shape.clone());
            for (name, value) in names.iter().zip(values) {
                record.init(name, value);
            }
            if shape.is_reference() {
                Value::object(record)
            } else {
                Value::structure(record)
            }
        })
        .boxed()
}

/// Generate a well-formed value of the declared type.
///
/// `Named` tags are resolved through `registry`; unknown names yield nil.
pub fn arb_value_for(tag: &TypeTag, registry: &Rc<ShapeRegistry>) -> BoxedStrategy<Value> {
    match tag {
        TypeTag::Bool => any::<bool>().prop_map(Value::bool).boxed(),
        TypeTag::Int => any::<i64>().prop_map(Value::int).boxed(),
        TypeTag::Float => (-1.0e9f64..1.0e9).prop_map(Value::float).boxed(),
        TypeTag::Decimal => (-1_000_000i64..1_000_000, 0u32..6)
            .prop_map(|(m, s)| Value::decimal(Decimal::new(m, s)))
            .boxed(),
        TypeTag::Char => any::<char>().prop_map(Value::char).boxed(),
        TypeTag::String => "[a-z]{0,8}".prop_map(Value::string).boxed(),
        TypeTag::Timestamp => (0i64..4_102_444_800_000).prop_map(Value::timestamp).boxed(),
        TypeTag::Named(_) => match registry.resolve(tag) {
            Some(shape) => arb_record(shape.clone(), registry),
            None => Just(Value::Nil).boxed(),
        },
        TypeTag::Seq(kind, elem) => {
            let (kind, elem_tag) = (*kind, (**elem).clone());
            prop::collection::vec(arb_value_for(elem, registry), 0..5)
                .prop_map(move |items| Value::seq(kind, elem_tag.clone(), items))
                .boxed()
        }
        TypeTag::Map(kind, key, value) => {
            let (kind, key_tag, value_tag) = (*kind, (**key).clone(), (**value).clone());
            prop::collection::vec(
                (arb_value_for(key, registry), arb_value_for(value, registry)),
                0..5,
            )
            .prop_map(move |pairs| Value::map(kind, key_tag.clone(), value_tag.clone(), pairs))
            .boxed()
        }
        TypeTag::Tuple(items) => items
            .iter()
            .map(|item| arb_value_for(item, registry))
            .collect::<Vec<_>>()
            .prop_map(Value::tuple)
            .boxed(),
        _ => Just(Value::Nil).boxed(),
    }
}

/// Generate an arbitrary value graph over the scenario shapes.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let registry = scenario_registry();
    arb_type_tag().prop_flat_map(move |tag| arb_value_for(&tag, &registry))
}
