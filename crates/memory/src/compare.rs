//! Address-based comparisons between owners
//!
//! Owners compare by the address they hold, not by the values they refer to. Two empty owners
//! are equal, and an empty owner orders before every non-empty one. Owners of different but
//! related types can be compared with each other, and any owner can be compared with [`Null`].

use crate::{Address, Deleter, Owned, OwnedSlice};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// The null marker, comparable with any owner
///
/// # Example
///
/// ```
/// use solo_memory::{create, Null, Owned};
///
/// let empty = Owned::<u8>::null();
/// let full = create::<u8, _>((1,));
///
/// assert!(empty == Null);
/// assert!(full != Null);
/// assert!(Null < full);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null;

impl From<Null> for Address {
    fn from(_: Null) -> Self {
        Address::NULL
    }
}

/// Exchanges the contents of two owners
pub fn swap<T: ?Sized, D: Deleter<T>>(a: &mut Owned<T, D>, b: &mut Owned<T, D>) {
    a.swap(b)
}

/// Exchanges the contents of two array owners
pub fn swap_slices<T, D: Deleter<[T]>>(a: &mut OwnedSlice<T, D>, b: &mut OwnedSlice<T, D>) {
    a.swap(b)
}

impl<T, D, U, E> PartialEq<Owned<U, E>> for Owned<T, D>
where
    T: ?Sized,
    D: Deleter<T>,
    U: ?Sized,
    E: Deleter<U>,
{
    fn eq(&self, other: &Owned<U, E>) -> bool {
        self.address() == other.address()
    }
}

impl<T: ?Sized, D: Deleter<T>> Eq for Owned<T, D> {}

impl<T, D, U, E> PartialOrd<Owned<U, E>> for Owned<T, D>
where
    T: ?Sized,
    D: Deleter<T>,
    U: ?Sized,
    E: Deleter<U>,
{
    fn partial_cmp(&self, other: &Owned<U, E>) -> Option<Ordering> {
        Some(self.address().cmp(&other.address()))
    }
}

impl<T: ?Sized, D: Deleter<T>> Ord for Owned<T, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address().cmp(&other.address())
    }
}

impl<T: ?Sized, D: Deleter<T>> Hash for Owned<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state)
    }
}

impl<T, D, U, E> PartialEq<OwnedSlice<U, E>> for OwnedSlice<T, D>
where
    D: Deleter<[T]>,
    E: Deleter<[U]>,
{
    fn eq(&self, other: &OwnedSlice<U, E>) -> bool {
        self.address() == other.address()
    }
}

impl<T, D: Deleter<[T]>> Eq for OwnedSlice<T, D> {}

impl<T, D, U, E> PartialOrd<OwnedSlice<U, E>> for OwnedSlice<T, D>
where
    D: Deleter<[T]>,
    E: Deleter<[U]>,
{
    fn partial_cmp(&self, other: &OwnedSlice<U, E>) -> Option<Ordering> {
        Some(self.address().cmp(&other.address()))
    }
}

impl<T, D: Deleter<[T]>> Ord for OwnedSlice<T, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address().cmp(&other.address())
    }
}

impl<T, D: Deleter<[T]>> Hash for OwnedSlice<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state)
    }
}

// Comparisons with the null marker only need the owner's address, in either operand order
macro_rules! null_comparisons {
    ($owner:ident<$t:ident, $d:ident>, $pointee:ty, $($bounds:tt)*) => {
        impl<$t $($bounds)*, $d: Deleter<$pointee>> PartialEq<Null> for $owner<$t, $d> {
            fn eq(&self, _: &Null) -> bool {
                self.is_null()
            }
        }

        impl<$t $($bounds)*, $d: Deleter<$pointee>> PartialEq<$owner<$t, $d>> for Null {
            fn eq(&self, other: &$owner<$t, $d>) -> bool {
                other.is_null()
            }
        }

        impl<$t $($bounds)*, $d: Deleter<$pointee>> PartialOrd<Null> for $owner<$t, $d> {
            fn partial_cmp(&self, _: &Null) -> Option<Ordering> {
                Some(self.address().cmp(&Address::NULL))
            }
        }

        impl<$t $($bounds)*, $d: Deleter<$pointee>> PartialOrd<$owner<$t, $d>> for Null {
            fn partial_cmp(&self, other: &$owner<$t, $d>) -> Option<Ordering> {
                Some(Address::NULL.cmp(&other.address()))
            }
        }
    };
}

null_comparisons!(Owned<T, D>, T, : ?Sized);
null_comparisons!(OwnedSlice<T, D>, [T],);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create, create_slice};

    #[test]
    fn empty_owners_are_equal() {
        let a = Owned::<u32>::null();
        let b = Owned::<String>::null();

        assert!(a == b);
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
    }

    #[test]
    fn ordering_follows_addresses() {
        let a = create::<u32, _>((1,));
        let b = create::<u32, _>((2,));

        assert_eq!(a.cmp(&b), a.address().cmp(&b.address()));
        assert_eq!(a < b, b > a);
        assert!(a != b);
    }

    #[test]
    fn null_marker() {
        let empty = OwnedSlice::<u8>::null();
        let full = create_slice::<u8>(3);

        assert!(empty == Null);
        assert!(Null == empty);
        assert!(full != Null);
        assert!(full > Null);
        assert!(!(full < Null));
        assert!(Null < full);
        assert!(empty <= Null);
    }
}
