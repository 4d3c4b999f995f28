// replica-value - Foreign host handles
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Handles to host objects that live outside the value model.
//!
//! File handles, locks, channels and similar live resources must never be
//! duplicated. A handle declared [`Sharing::Opaque`] is copied as an atomic
//! value: the copy refers to the same host object. A handle whose sharing is
//! [`Sharing::Unspecified`] cannot be classified and copying it fails.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// How a foreign handle may be treated by a copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sharing {
    /// Shared as-is; the handle is an atomic value.
    Opaque,
    /// No copy strategy was declared.
    Unspecified,
}

/// A type-erased host object.
#[derive(Clone)]
pub struct ForeignRef {
    type_name: Rc<str>,
    sharing: Sharing,
    handle: Rc<dyn Any>,
}

impl ForeignRef {
    /// Wrap a live resource that copies must share.
    pub fn opaque<T: Any>(type_name: &str, handle: T) -> Self {
        ForeignRef {
            type_name: Rc::from(type_name),
            sharing: Sharing::Opaque,
            handle: Rc::new(handle),
        }
    }

    /// Wrap a host object without declaring how it may be copied.
    pub fn unspecified<T: Any>(type_name: &str, handle: T) -> Self {
        ForeignRef {
            type_name: Rc::from(type_name),
            sharing: Sharing::Unspecified,
            handle: Rc::new(handle),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn sharing(&self) -> Sharing {
        self.sharing
    }

    /// Borrow the host object as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }

    /// Returns true if both handles refer to the same host object.
    pub fn ptr_eq(&self, other: &ForeignRef) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.handle) as *const () as usize
    }
}

impl fmt::Debug for ForeignRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{} {:#x}>", self.type_name, self.address())
    }
}

impl fmt::Display for ForeignRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{}>", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let handle = ForeignRef::opaque("Port", 8080u16);
        assert_eq!(handle.downcast_ref::<u16>(), Some(&8080));
        assert!(handle.downcast_ref::<String>().is_none());
        assert_eq!(handle.sharing(), Sharing::Opaque);
    }

    #[test]
    fn test_identity() {
        let a = ForeignRef::opaque("Port", 1u8);
        let b = a.clone();
        let c = ForeignRef::opaque("Port", 1u8);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
