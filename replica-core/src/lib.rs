// replica-core - Deep-copy engine for replica values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # replica-core
//!
//! A generic deep-copy engine. [`copy`] takes any [`Value`] graph, however
//! nested or self-referential, and returns a structurally equivalent graph
//! that shares no mutable storage with the input.
//!
//! ```rust
//! use replica_core::{Value, copy};
//! use replica_value::{TypeTag, equivalent, shares_storage};
//!
//! let source = Value::list(TypeTag::Int, vec![Value::int(1), Value::int(2)]);
//! let clone = copy(&source).unwrap();
//! assert!(equivalent(&source, &clone));
//! assert!(!shares_storage(&source, &clone));
//! ```

pub mod classify;
mod cloners;
pub mod engine;
pub mod error;
pub mod options;
pub mod tracker;

pub use classify::{CopyCategory, Semantics, classify};
pub use engine::{CopyContext, Copier, copy, copy_with};
pub use error::{Error, Result};
pub use options::{CopyOptions, MemberPolicy};
pub use tracker::Tracker;

// Re-export value types for convenience
pub use replica_value::Value;
