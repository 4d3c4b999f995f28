// replica-core - Ordered sequence cloner
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use replica_value::{SeqRef, Sequence, Value};

use super::mismatch;
use crate::classify::CopyCategory;
use crate::engine::CopyContext;
use crate::error::Result;

/// Copy a sequence into a new one of the same kind and element type,
/// preserving element order.
pub(super) fn clone_sequence(ctx: &mut CopyContext<'_>, value: &Value) -> Result<Value> {
    let Value::Seq(source) = value else {
        return Err(mismatch(CopyCategory::OrderedSequence, value));
    };

    // Structural sharing makes this snapshot cheap
    let items = source.borrow().items().clone();
    let shell = {
        let source = source.borrow();
        SeqRef::new(Sequence::new(source.kind(), source.elem().clone()))
    };
    ctx.register(value, Value::Seq(shell.clone()))?;

    for item in items.iter() {
        let copied = ctx.copy(item)?;
        shell.borrow_mut().push(copied);
    }
    Ok(Value::Seq(shell))
}

#[cfg(test)]
mod tests {
    use crate::engine::copy;
    use replica_value::{SeqKind, TypeTag, Value, equivalent};

    #[test]
    fn test_kind_and_order_preserved() {
        for kind in [SeqKind::List, SeqKind::Array, SeqKind::Queue] {
            let source = Value::seq(
                kind,
                TypeTag::Int,
                vec![Value::int(3), Value::int(1), Value::int(2)],
            );
            let clone = copy(&source).unwrap();
            assert!(equivalent(&source, &clone));
            assert!(!clone.ptr_eq(&source));
        }
    }

    #[test]
    fn test_self_containing_sequence() {
        let source = Value::list(TypeTag::Any, vec![Value::int(1)]);
        if let Value::Seq(s) = &source {
            s.borrow_mut().push(source.clone());
        }

        let clone = copy(&source).unwrap();
        let Value::Seq(s) = &clone else {
            panic!("expected sequence");
        };
        assert!(s.borrow().get(1).unwrap().ptr_eq(&clone));
        assert!(equivalent(&source, &clone));
    }
}
