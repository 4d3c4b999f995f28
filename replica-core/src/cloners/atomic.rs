// replica-core - Atomic cloner
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use replica_value::Value;

use super::mismatch;
use crate::classify::CopyCategory;
use crate::error::Result;

/// Copy an atomic value.
///
/// Decimals get a fresh mantissa. Strings are immutable and stay shared, as
/// do opaque foreign handles.
pub(super) fn clone_atomic(value: &Value) -> Result<Value> {
    match value {
        Value::Decimal(d) => Ok(Value::Decimal(d.clone())),
        Value::Tuple(_) | Value::Struct(_) | Value::Object(_) | Value::Seq(_) | Value::Map(_) => {
            Err(mismatch(CopyCategory::Atomic, value))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_value::{Decimal, ForeignRef, TypeTag};

    #[test]
    fn test_atomic_copies_are_equal() {
        let d = Value::decimal("12.50".parse::<Decimal>().unwrap());
        assert_eq!(clone_atomic(&d).unwrap(), d);
        assert_eq!(clone_atomic(&Value::string("x")).unwrap(), Value::string("x"));
        assert!(clone_atomic(&Value::nil()).unwrap().is_nil());
    }

    #[test]
    fn test_foreign_handle_is_shared() {
        let handle = Value::Foreign(ForeignRef::opaque("Mutex", 0u32));
        assert!(clone_atomic(&handle).unwrap().ptr_eq(&handle));
    }

    #[test]
    fn test_composite_is_rejected() {
        assert!(clone_atomic(&Value::list(TypeTag::Int, vec![])).is_err());
    }
}
