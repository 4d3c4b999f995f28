// replica-embed - Replicator implementation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The `Replicator` struct - typed entry point for deep copies.

use tracing::trace;

use replica_core::{CopyOptions, Copier, Result};
use replica_value::Value;

use crate::convert::{FromValue, IntoValue};

/// Deep-copies Rust values through the replica value model.
///
/// A `Replicator` only holds its [`CopyOptions`]; each call runs with a
/// fresh tracker, so one replicator can be reused freely.
///
/// # Thread Safety
///
/// Values are built from `Rc` cells and are not `Send`. Create one
/// `Replicator` per thread and copy each graph on the thread that owns it.
///
/// # Example
///
/// ```rust
/// use replica_embed::Replicator;
///
/// let replicator = Replicator::new();
/// let names = vec!["ann".to_string(), "bob".to_string()];
/// let copied: Vec<String> = replicator.replicate(names.clone()).unwrap();
/// assert_eq!(copied, names);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Replicator {
    copier: Copier,
}

impl Replicator {
    /// Create a replicator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a replicator with the given options.
    pub fn with_options(options: CopyOptions) -> Self {
        Replicator {
            copier: Copier::new(options),
        }
    }

    pub fn options(&self) -> &CopyOptions {
        self.copier.options()
    }

    /// Deep-copy a dynamic value.
    pub fn copy(&self, value: &Value) -> Result<Value> {
        self.copier.copy(value)
    }

    /// Deep-copy a typed value.
    ///
    /// The value is converted with [`IntoValue`], copied, and converted back
    /// with [`FromValue`]. Any `Value` handles it holds come back as fresh
    /// cells; handles shared inside `value` stay shared in the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails or the copied value does not
    /// convert back to `T`.
    pub fn replicate<T: IntoValue + FromValue>(&self, value: T) -> Result<T> {
        let source = value.into_value();
        trace!(root = %source.runtime_type(), "replicating");
        let clone = self.copier.copy(&source)?;
        T::from_value(&clone)
    }
}

/// Deep-copy a typed value with default options.
pub fn replicate<T: IntoValue + FromValue>(value: T) -> Result<T> {
    Replicator::new().replicate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_core::{Error, MemberPolicy};
    use replica_value::{TypeTag, shares_storage};

    #[test]
    fn test_options_are_kept() {
        let options = CopyOptions::new()
            .with_max_depth(4)
            .with_member_policy(MemberPolicy::SkipInaccessible);
        let replicator = Replicator::with_options(options.clone());
        assert_eq!(replicator.options(), &options);
    }

    #[test]
    fn test_replicate_value_handle() {
        let source = Value::list(TypeTag::Int, vec![Value::int(1)]);
        let copied: Value = replicate(source.clone()).unwrap();
        assert!(!copied.ptr_eq(&source));
        assert!(!shares_storage(&copied, &source));
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let replicator = Replicator::with_options(CopyOptions::new().with_max_depth(1));
        let nested = vec![vec![1i64]];
        assert_eq!(
            replicator.replicate(nested),
            Err(Error::DepthExceeded { limit: 1 })
        );
    }
}
