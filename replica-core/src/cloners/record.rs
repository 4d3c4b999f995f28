// replica-core - Composite record cloner
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Copies class, anonymous and value records field by field.

use tracing::trace;

use replica_value::{FieldAccess, ObjectRef, Record, Value};

use super::mismatch;
use crate::classify::{CopyCategory, Semantics};
use crate::engine::CopyContext;
use crate::error::{Error, Result};
use crate::options::MemberPolicy;

pub(super) fn clone_record(
    ctx: &mut CopyContext<'_>,
    semantics: Semantics,
    value: &Value,
) -> Result<Value> {
    match (semantics, value) {
        (Semantics::Reference, Value::Object(source)) => {
            // Snapshot so no borrow of the source is held while recursing
            let snapshot = source.borrow().clone();
            let shell = ObjectRef::new(allocate(&snapshot)?);
            ctx.register(value, Value::Object(shell.clone()))?;
            copy_fields(ctx, &snapshot, |index, copied| {
                shell.borrow_mut().write(index, copied)
            })?;
            Ok(Value::Object(shell))
        }
        (Semantics::Value, Value::Struct(source)) => {
            let mut target = allocate(source)?;
            copy_fields(ctx, source, |index, copied| target.write(index, copied))?;
            Ok(Value::structure(target))
        }
        _ => Err(mismatch(CopyCategory::CompositeRecord(semantics), value)),
    }
}

/// Zero-initialize an instance with the same shape as `source`.
fn allocate(source: &Record) -> Result<Record> {
    let shape = source.shape();
    if !shape.is_constructible() {
        return Err(Error::unconstructible(shape));
    }
    Ok(Record::zeroed(shape.clone()))
}

/// Copy every member of `source` in declaration order, handing each copy to
/// `write` together with its field index.
fn copy_fields<W>(ctx: &mut CopyContext<'_>, source: &Record, mut write: W) -> Result<()>
where
    W: FnMut(usize, Value) -> bool,
{
    let shape = source.shape();
    for (index, field) in shape.fields().iter().enumerate() {
        let refusal = match field.access {
            FieldAccess::Stored => None,
            FieldAccess::Derived => {
                trace!(shape = shape.name(), member = %field.name, "skipping derived member");
                continue;
            }
            FieldAccess::SetOnly => Some(Error::unreadable(shape, &field.name)),
            FieldAccess::GetOnly => Some(Error::unwritable(shape, &field.name)),
        };
        if let Some(err) = refusal {
            match ctx.options().member_policy {
                MemberPolicy::Strict => return Err(err),
                MemberPolicy::SkipInaccessible => {
                    trace!(shape = shape.name(), member = %field.name, "skipping inaccessible member");
                    continue;
                }
            }
        }

        let child = source
            .read(index)
            .ok_or_else(|| Error::unreadable(shape, &field.name))?;
        let copied = ctx.copy(child)?;
        if !write(index, copied) {
            return Err(Error::unwritable(shape, &field.name));
        }
    }
    Ok(())
}
