// replica-value - Dynamic value model for replica
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # replica-value
//!
//! The dynamic value model copied by the replica engine.
//! Reference-semantic containers live behind `Rc<RefCell<_>>` and carry an
//! identity; tuples, value records and atomics are owned data.

pub mod decimal;
pub mod equiv;
pub mod foreign;
pub mod mapping;
pub mod record;
pub mod sequence;
pub mod shape;
pub mod tuple;
pub mod types;
pub mod value;

pub use decimal::{Decimal, ParseDecimalError};
pub use equiv::{content_cmp, equivalent, reachable_identities, shares_storage};
pub use foreign::{ForeignRef, Sharing};
pub use im::Vector;
pub use indexmap::IndexMap;
pub use mapping::{MapKind, MapRef, Mapping};
pub use num_bigint::BigInt;
pub use record::{ObjectRef, Record};
pub use sequence::{SeqKind, SeqRef, Sequence};
pub use shape::{FieldAccess, FieldDef, Shape, ShapeBuilder, ShapeKind, ShapeRegistry};
pub use tuple::Tuple;
pub use types::TypeTag;
pub use value::{Enumerant, Identity, Value};
