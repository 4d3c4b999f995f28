// replica-core - Fixed-arity tuple cloner
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use replica_value::{Tuple, Value};

use super::mismatch;
use crate::classify::CopyCategory;
use crate::engine::CopyContext;
use crate::error::{Error, Result};

/// Copy every position of a tuple. The result keeps the arity and labels.
pub(super) fn clone_tuple(ctx: &mut CopyContext<'_>, value: &Value) -> Result<Value> {
    let Value::Tuple(source) = value else {
        return Err(mismatch(CopyCategory::FixedTuple, value));
    };

    let items = source
        .items()
        .iter()
        .map(|item| ctx.copy(item))
        .collect::<Result<Vec<_>>>()?;

    Tuple::with_labels(source.labels().cloned(), items)
        .map(Value::Tuple)
        .ok_or_else(|| Error::internal("tuple arity changed while copying"))
}
