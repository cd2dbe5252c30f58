use std::{
    fmt,
    hash::{Hash, Hasher},
    ptr::{self, NonNull},
};

/// A wrapper for comparing, ordering, and hashing pointer addresses
///
/// Metadata of wide pointers (slice lengths, vtables) is discarded, so two owners of different
/// pointee types can be compared as long as they refer to the same place in memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(*const u8);

impl Address {
    /// The address held by an empty owner
    pub const NULL: Self = Self(ptr::null());

    /// Returns true if this is the null address
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Returns the address of an optional pointer, with `None` mapping to [`Address::NULL`]
    pub fn of<T: ?Sized>(pointer: Option<NonNull<T>>) -> Self {
        pointer.map_or(Self::NULL, Self::from)
    }
}

// The wrapped pointer is only ever compared, never dereferenced
unsafe impl Send for Address {}
unsafe impl Sync for Address {}

impl Default for Address {
    fn default() -> Self {
        Self::NULL
    }
}

impl<T: ?Sized> From<*const T> for Address {
    fn from(pointer: *const T) -> Self {
        Self(pointer as *const u8)
    }
}

impl<T: ?Sized> From<*mut T> for Address {
    fn from(pointer: *mut T) -> Self {
        Self(pointer as *const u8)
    }
}

impl<T: ?Sized> From<NonNull<T>> for Address {
    fn from(pointer: NonNull<T>) -> Self {
        Self(pointer.as_ptr() as *const u8)
    }
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0.addr());
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Pointer for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_pointer_metadata_is_ignored() {
        let mut values = [1u32, 2, 3];
        let whole: *mut [u32] = &mut values;
        let first: *mut u32 = &mut values[0];

        assert_eq!(Address::from(whole), Address::from(first));
    }

    #[test]
    fn null_orders_before_everything() {
        let value = 42u8;
        let address = Address::from(&value as *const u8);

        assert!(Address::NULL < address);
        assert!(Address::of::<u8>(None).is_null());
        assert_eq!(Address::default(), Address::NULL);
    }
}
