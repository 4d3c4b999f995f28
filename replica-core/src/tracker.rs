// replica-core - Cycle tracker
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Maps source identities to the clones produced for them.
//!
//! One tracker lives for exactly one top-level copy. Each entry pins its
//! source value, so no tracked allocation can be freed and its address
//! reused while the copy is running.

// Allow mutable key types - Identity is an address, not the cell contents
#![allow(clippy::mutable_key_type)]

use std::collections::HashMap;

use replica_value::{Identity, Value};

use crate::error::{Error, Result};

struct Visit {
    _source: Value,
    clone: Value,
}

#[derive(Default)]
pub struct Tracker {
    visited: HashMap<Identity, Visit>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the clone already produced for `id`.
    pub fn lookup(&self, id: Identity) -> Option<Value> {
        self.visited.get(&id).map(|visit| visit.clone.clone())
    }

    /// Record `clone` as the copy of `source`.
    ///
    /// `source` must be a reference cell that has not been registered yet.
    pub fn register(&mut self, source: &Value, clone: Value) -> Result<()> {
        let id = source.identity().ok_or_else(|| {
            Error::internal(format!(
                "cannot track {} without identity",
                source.type_name()
            ))
        })?;
        if self.visited.contains_key(&id) {
            return Err(Error::internal(format!(
                "{} {} registered twice",
                source.runtime_type(),
                id
            )));
        }
        self.visited.insert(
            id,
            Visit {
                _source: source.clone(),
                clone,
            },
        );
        Ok(())
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
