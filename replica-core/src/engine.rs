// replica-core - Clone dispatcher
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The recursive copy engine and its public entry points.

use tracing::{debug, trace};

use replica_value::Value;

use crate::classify::classify;
use crate::cloners;
use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::tracker::Tracker;

/// Deep-copies values with a fixed set of options.
///
/// A `Copier` holds no state between calls; every [`Copier::copy`] starts
/// with an empty tracker.
#[derive(Clone, Debug, Default)]
pub struct Copier {
    options: CopyOptions,
}

impl Copier {
    pub fn new(options: CopyOptions) -> Self {
        Copier { options }
    }

    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Produce a deep copy of `value`.
    ///
    /// The result is structurally equivalent to `value` and shares no
    /// mutable storage with it. Cells reachable along several paths are
    /// copied once and stay shared within the copy, so cycles are preserved.
    pub fn copy(&self, value: &Value) -> Result<Value> {
        let mut ctx = CopyContext::new(&self.options);
        let result = ctx.copy(value);
        match &result {
            Ok(_) => debug!(
                root = value.type_name(),
                tracked = ctx.tracker.len(),
                "copy complete"
            ),
            Err(e) => debug!(root = value.type_name(), error = %e, "copy failed"),
        }
        result
    }
}

/// Deep-copy `value` with default options.
pub fn copy(value: &Value) -> Result<Value> {
    Copier::default().copy(value)
}

/// Deep-copy `value` with the given options.
pub fn copy_with(value: &Value, options: &CopyOptions) -> Result<Value> {
    Copier::new(options.clone()).copy(value)
}

/// State for one top-level copy.
pub struct CopyContext<'a> {
    options: &'a CopyOptions,
    tracker: Tracker,
    depth: usize,
}

impl<'a> CopyContext<'a> {
    pub fn new(options: &'a CopyOptions) -> Self {
        CopyContext {
            options,
            tracker: Tracker::new(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &CopyOptions {
        self.options
    }

    /// Copy one value, reusing the clone of any cell seen before.
    pub fn copy(&mut self, value: &Value) -> Result<Value> {
        let category = classify(value)?;

        if category.tracks_identity() {
            if let Some(id) = value.identity() {
                if let Some(clone) = self.tracker.lookup(id) {
                    trace!(%category, %id, "reusing clone");
                    return Ok(clone);
                }
            }
        }

        self.enter()?;
        trace!(%category, depth = self.depth, "dispatch");
        let result = cloners::clone_value(self, category, value);
        self.depth -= 1;
        result
    }

    /// Register `clone` as the copy of `source` before its contents are
    /// copied.
    pub(crate) fn register(&mut self, source: &Value, clone: Value) -> Result<()> {
        self.tracker.register(source, clone)
    }

    fn enter(&mut self) -> Result<()> {
        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(Error::DepthExceeded { limit });
            }
        }
        self.depth += 1;
        Ok(())
    }
}
