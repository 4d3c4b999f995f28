// replica-value - Record instances
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Record instances: one slot per field of their [`Shape`].
//!
//! The same `Record` backs both value records (`Value::Struct`, owned) and
//! reference records (`Value::Object`, shared through [`ObjectRef`]).

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::shape::{FieldAccess, Shape};
use crate::value::{Identity, Value};

#[derive(Clone)]
pub struct Record {
    shape: Rc<Shape>,
    slots: Vec<Value>,
}

impl Record {
    /// Allocate an instance with every slot set to nil.
    ///
    /// No constructor logic runs; callers assign each field afterwards.
    pub fn zeroed(shape: Rc<Shape>) -> Self {
        let slots = vec![Value::Nil; shape.fields().len()];
        Record { shape, slots }
    }

    pub fn shape(&self) -> &Rc<Shape> {
        &self.shape
    }

    /// Raw slot contents, in field order. Derived fields hold nil.
    pub fn slots(&self) -> &[Value] {
        &self.slots
    }

    /// Read a field through its getter.
    ///
    /// Returns `None` if the field does not exist or has no getter.
    pub fn read(&self, index: usize) -> Option<&Value> {
        let field = self.shape.fields().get(index)?;
        if field.access.is_readable() {
            self.slots.get(index)
        } else {
            None
        }
    }

    /// Write a field through its setter.
    ///
    /// Returns false if the field does not exist or has no setter.
    pub fn write(&mut self, index: usize, value: Value) -> bool {
        match self.shape.fields().get(index) {
            Some(field) if field.access.is_writable() => {
                self.slots[index] = value;
                true
            }
            _ => false,
        }
    }

    /// Read a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.read(self.shape.field_index(name)?)
    }

    /// Write a field by name. Returns false if it has no setter.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.shape.field_index(name) {
            Some(index) => self.write(index, value),
            None => false,
        }
    }

    /// Initialize a field as a constructor would.
    ///
    /// Unlike [`Record::set`] this also assigns get-only and set-only
    /// fields. Derived fields have no storage and are rejected.
    pub fn init(&mut self, name: &str, value: Value) -> bool {
        match self.shape.field_index(name) {
            Some(index) if self.shape.fields()[index].access != FieldAccess::Derived => {
                self.slots[index] = value;
                true
            }
            _ => false,
        }
    }

    /// Builder form of [`Record::init`]. Unknown and derived names are ignored.
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.init(name, value);
        self
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Struct(Box::new(self.clone())))
    }
}

/// A shared, mutable reference record.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Record>>);

impl ObjectRef {
    pub fn new(record: Record) -> Self {
        ObjectRef(Rc::new(RefCell::new(record)))
    }

    pub fn borrow(&self) -> Ref<'_, Record> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Record> {
        self.0.borrow_mut()
    }

    /// Borrow unless the cell is being mutated.
    pub fn try_borrow(&self) -> Option<Ref<'_, Record>> {
        self.0.try_borrow().ok()
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.clone()))
    }
}
