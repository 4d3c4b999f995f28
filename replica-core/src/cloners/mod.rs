// replica-core - Category cloners
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! One cloner per copy category.
//!
//! Cloners for reference categories allocate an empty shell, register it
//! with the tracker and only then copy children, so a child that refers
//! back to its parent resolves to the shell.

mod atomic;
mod mapping;
mod record;
mod sequence;
mod tuple;

use replica_value::Value;

use crate::classify::CopyCategory;
use crate::engine::CopyContext;
use crate::error::Result;

/// Copy `value` using the cloner for `category`.
pub(crate) fn clone_value(
    ctx: &mut CopyContext<'_>,
    category: CopyCategory,
    value: &Value,
) -> Result<Value> {
    match category {
        CopyCategory::Atomic => atomic::clone_atomic(value),
        CopyCategory::CompositeRecord(semantics) => record::clone_record(ctx, semantics, value),
        CopyCategory::OrderedSequence => sequence::clone_sequence(ctx, value),
        CopyCategory::KeyValueMapping => mapping::clone_mapping(ctx, value),
        CopyCategory::FixedTuple => tuple::clone_tuple(ctx, value),
    }
}

/// Error for a value handed to the wrong cloner.
fn mismatch(category: CopyCategory, value: &Value) -> crate::error::Error {
    crate::error::Error::internal(format!(
        "{} cloner received {}",
        category.name(),
        value.type_name()
    ))
}
