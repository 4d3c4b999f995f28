// replica-value - Declared type tags
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Declared types of fields, sequence elements and mapping entries.
//!
//! A `TypeTag` is what a container or field was declared to hold. It is
//! carried onto clones unchanged so a copied `List<string>` is still a
//! `List<string>` even when it is empty.

use std::fmt;
use std::rc::Rc;

use crate::mapping::MapKind;
use crate::sequence::SeqKind;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// No declared constraint
    Any,
    Bool,
    Int,
    Float,
    Decimal,
    Char,
    String,
    Timestamp,
    /// Enumeration type, by name
    Enum(Rc<str>),
    /// Record type, by shape name
    Named(Rc<str>),
    Seq(SeqKind, Box<TypeTag>),
    Map(MapKind, Box<TypeTag>, Box<TypeTag>),
    Tuple(Vec<TypeTag>),
}

impl TypeTag {
    /// `List<elem>`
    pub fn list(elem: TypeTag) -> Self {
        TypeTag::Seq(SeqKind::List, Box::new(elem))
    }

    /// `Dictionary<key, value>`
    pub fn dictionary(key: TypeTag, value: TypeTag) -> Self {
        TypeTag::Map(MapKind::Dictionary, Box::new(key), Box::new(value))
    }

    /// Tag for a named record shape.
    pub fn named(name: &str) -> Self {
        TypeTag::Named(Rc::from(name))
    }

    /// Returns true for tags whose values are atomic.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            TypeTag::Bool
                | TypeTag::Int
                | TypeTag::Float
                | TypeTag::Decimal
                | TypeTag::Char
                | TypeTag::String
                | TypeTag::Timestamp
                | TypeTag::Enum(_)
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Any => write!(f, "any"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Decimal => write!(f, "decimal"),
            TypeTag::Char => write!(f, "char"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Timestamp => write!(f, "timestamp"),
            TypeTag::Enum(name) | TypeTag::Named(name) => write!(f, "{}", name),
            TypeTag::Seq(kind, elem) => write!(f, "{}<{}>", kind.name(), elem),
            TypeTag::Map(kind, key, value) => write!(f, "{}<{}, {}>", kind.name(), key, value),
            TypeTag::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
