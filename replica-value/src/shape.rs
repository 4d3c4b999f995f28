// replica-value - Record shapes
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime layout descriptors for records.
//!
//! A `Shape` lists the fields of a record type in declaration order, each with
//! a declared type and an access mode. The copy engine enumerates fields from
//! the shape alone; it never needs to know the record type ahead of time.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::types::TypeTag;

thread_local! {
    /// Counter for synthesized anonymous shape names.
    static ANONYMOUS_COUNTER: Cell<usize> = const { Cell::new(0) };
}

/// What kind of record a shape describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Declared reference type: instances have identity
    Class,
    /// Declared value type: instances are copied by value
    ValueRecord,
    /// Compiler-synthesized reference type with a fixed field set
    Anonymous,
}

impl ShapeKind {
    /// Returns true if instances of this kind have identity.
    pub fn is_reference(self) -> bool {
        !matches!(self, ShapeKind::ValueRecord)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Class => "class",
            ShapeKind::ValueRecord => "value-record",
            ShapeKind::Anonymous => "anonymous",
        }
    }
}

/// How a field may be accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldAccess {
    /// Backed by storage; readable and writable
    Stored,
    /// Computed from other fields; no backing store, never copied
    Derived,
    /// Readable, but can only be set when the record is built
    GetOnly,
    /// Writable, but has no getter
    SetOnly,
}

impl FieldAccess {
    pub fn is_readable(self) -> bool {
        matches!(self, FieldAccess::Stored | FieldAccess::GetOnly)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, FieldAccess::Stored | FieldAccess::SetOnly)
    }
}

/// A single field of a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: Rc<str>,
    pub ty: TypeTag,
    pub access: FieldAccess,
}

/// Layout of a record type.
#[derive(Debug)]
pub struct Shape {
    name: Rc<str>,
    kind: ShapeKind,
    fields: Vec<FieldDef>,
    constructible: bool,
}

impl Shape {
    /// Start describing a reference type.
    pub fn class(name: &str) -> ShapeBuilder {
        ShapeBuilder::new(Rc::from(name), ShapeKind::Class)
    }

    /// Start describing a value type.
    pub fn value_record(name: &str) -> ShapeBuilder {
        ShapeBuilder::new(Rc::from(name), ShapeKind::ValueRecord)
    }

    /// Start describing an anonymous record. The name is synthesized.
    pub fn anonymous() -> ShapeBuilder {
        let n = ANONYMOUS_COUNTER.with(|c| {
            let n = c.get();
            c.set(n + 1);
            n
        });
        ShapeBuilder::new(Rc::from(format!("<anonymous#{}>", n)), ShapeKind::Anonymous)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field position by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| &*f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| &*f.name == name)
    }

    /// Whether a zero-initialized instance can be allocated.
    pub fn is_constructible(&self) -> bool {
        self.constructible
    }

    pub fn is_reference(&self) -> bool {
        self.kind.is_reference()
    }

    /// Returns true if both shapes describe the same layout.
    pub fn same_layout(&self, other: &Shape) -> bool {
        std::ptr::eq(self, other)
            || (self.name == other.name && self.kind == other.kind && self.fields == other.fields)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {{", self.kind.name(), self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", field.name, field.ty)?;
        }
        write!(f, " }}")
    }
}

/// Builder for [`Shape`].
pub struct ShapeBuilder {
    name: Rc<str>,
    kind: ShapeKind,
    fields: Vec<FieldDef>,
    constructible: bool,
}

impl ShapeBuilder {
    fn new(name: Rc<str>, kind: ShapeKind) -> Self {
        ShapeBuilder {
            name,
            kind,
            fields: Vec::new(),
            constructible: true,
        }
    }

    fn push(mut self, name: &str, ty: TypeTag, access: FieldAccess) -> Self {
        self.fields.push(FieldDef {
            name: Rc::from(name),
            ty,
            access,
        });
        self
    }

    /// Add a stored (read/write) field.
    pub fn field(self, name: &str, ty: TypeTag) -> Self {
        self.push(name, ty, FieldAccess::Stored)
    }

    /// Add a computed field with no backing store.
    pub fn derived(self, name: &str, ty: TypeTag) -> Self {
        self.push(name, ty, FieldAccess::Derived)
    }

    /// Add a field that is only set at construction.
    pub fn get_only(self, name: &str, ty: TypeTag) -> Self {
        self.push(name, ty, FieldAccess::GetOnly)
    }

    /// Add a field with a setter but no getter.
    pub fn set_only(self, name: &str, ty: TypeTag) -> Self {
        self.push(name, ty, FieldAccess::SetOnly)
    }

    /// Mark the shape as having no zero-initialization path.
    pub fn non_constructible(mut self) -> Self {
        self.constructible = false;
        self
    }

    pub fn build(self) -> Rc<Shape> {
        Rc::new(Shape {
            name: self.name,
            kind: self.kind,
            fields: self.fields,
            constructible: self.constructible,
        })
    }
}

/// Shapes known by name, for resolving `TypeTag::Named`.
#[derive(Default, Debug)]
pub struct ShapeRegistry {
    shapes: HashMap<Rc<str>, Rc<Shape>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape under its name. Returns the shape it replaced.
    pub fn register(&mut self, shape: Rc<Shape>) -> Option<Rc<Shape>> {
        self.shapes.insert(shape.name.clone(), shape)
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Shape>> {
        self.shapes.get(name)
    }

    /// Resolve a `TypeTag::Named` to its shape.
    pub fn resolve(&self, tag: &TypeTag) -> Option<&Rc<Shape>> {
        match tag {
            TypeTag::Named(name) => self.shapes.get(name),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
