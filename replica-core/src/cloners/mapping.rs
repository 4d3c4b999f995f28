// replica-core - Key-value mapping cloner
// Copyright (c) 2025 Tom Waddington. MIT licensed.

// Keys may hold reference cells; their hash and equality use identity.
#![allow(clippy::mutable_key_type)]

use replica_value::{MapRef, Mapping, Value};

use super::mismatch;
use crate::classify::CopyCategory;
use crate::engine::CopyContext;
use crate::error::{Error, Result};

/// Copy a mapping entry by entry, keys and values alike, into a new mapping
/// of the same kind and declared types.
pub(super) fn clone_mapping(ctx: &mut CopyContext<'_>, value: &Value) -> Result<Value> {
    let Value::Map(source) = value else {
        return Err(mismatch(CopyCategory::KeyValueMapping, value));
    };

    let snapshot = source.borrow().clone();
    let shell = MapRef::new(Mapping::new(
        snapshot.kind(),
        snapshot.key_type().clone(),
        snapshot.value_type().clone(),
    ));
    ctx.register(value, Value::Map(shell.clone()))?;

    for (key, val) in snapshot.iter() {
        let key = ctx.copy(key)?;
        let val = ctx.copy(val)?;
        if shell.borrow().contains_key(&key) {
            return Err(Error::internal(format!(
                "copied key {} collides in {}",
                key,
                snapshot.kind().name()
            )));
        }
        // Source order is already key order; copied keys may still be filling
        shell.borrow_mut().append(key, val);
    }
    Ok(Value::Map(shell))
}
