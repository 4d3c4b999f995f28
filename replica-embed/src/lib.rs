// replica-embed - Typed embedding API for replica
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # replica-embed
//!
//! A typed interface to the replica deep-copy engine.
//!
//! Rust types describe themselves to the engine through [`IntoValue`] and
//! [`FromValue`]; [`Replicator::replicate`] converts, copies and converts
//! back.
//!
//! ## Quick Start
//!
//! ```rust
//! use replica_embed::replicate;
//!
//! let scores = vec![("ann".to_string(), 3i64), ("bob".to_string(), 5i64)];
//! let copied = replicate(scores.clone()).unwrap();
//! assert_eq!(copied, scores);
//! ```
//!
//! ## Copying Dynamic Values
//!
//! ```rust
//! use replica_embed::{Replicator, Value};
//! use replica_value::{TypeTag, equivalent};
//!
//! let list = Value::list(TypeTag::Int, vec![Value::int(1)]);
//! let copy = Replicator::new().copy(&list).unwrap();
//! assert!(equivalent(&list, &copy));
//! assert!(!copy.ptr_eq(&list));
//! ```

mod convert;
mod engine;

pub use convert::{FromValue, IntoValue, from_value, to_value};
pub use engine::{Replicator, replicate};

// Re-export core types for convenience
pub use replica_core::{CopyOptions, Error, MemberPolicy, Result};
pub use replica_value::Value;
