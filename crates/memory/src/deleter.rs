use crate::raw_impl;
use std::{fmt, ptr::NonNull};

/// Releases resources held by an owner
///
/// A deleter declares the pointee type that it is able to release through its type parameter.
/// `Deleter<[T]>` releases arrays, any other `Deleter<T>` releases single objects.
///
/// The following types implement `Deleter`:
/// - [`DefaultDelete`], which releases memory produced by the factory functions or by `Box`.
/// - Function pointers, `fn(NonNull<T>)` and `unsafe fn(NonNull<T>)`.
/// - Closures, wrapped in [`FnDelete`].
/// - `&mut D` where `D` is a deleter, allowing a deleter to be shared between owners in sequence.
pub trait Deleter<T: ?Sized> {
    /// Releases the resource at the given address
    ///
    /// # Safety
    ///
    /// `pointer` must be owned by the caller, and must not be used again after the call.
    unsafe fn delete(&mut self, pointer: NonNull<T>);
}

/// The default deleter, releases memory that was allocated by the factory functions or by `Box`
///
/// `DefaultDelete` is stateless, so owners that use it are the size of a pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultDelete;

impl<T: ?Sized> Deleter<T> for DefaultDelete {
    #[inline]
    unsafe fn delete(&mut self, pointer: NonNull<T>) {
        unsafe { raw_impl::release(pointer) }
    }
}

impl<T: ?Sized> Deleter<T> for fn(NonNull<T>) {
    #[inline]
    unsafe fn delete(&mut self, pointer: NonNull<T>) {
        (*self)(pointer)
    }
}

impl<T: ?Sized> Deleter<T> for unsafe fn(NonNull<T>) {
    #[inline]
    unsafe fn delete(&mut self, pointer: NonNull<T>) {
        unsafe { (*self)(pointer) }
    }
}

impl<T: ?Sized, D: Deleter<T> + ?Sized> Deleter<T> for &mut D {
    #[inline]
    unsafe fn delete(&mut self, pointer: NonNull<T>) {
        unsafe { (**self).delete(pointer) }
    }
}

/// Wraps a closure so that it can be used as a [`Deleter`]
///
/// # Example
///
/// ```
/// use solo_memory::{FnDelete, Owned};
/// use std::ptr::NonNull;
///
/// let mut released = 0;
/// let pointer = NonNull::from(Box::leak(Box::new(42)));
/// {
///     let deleter = FnDelete(|pointer: NonNull<i32>| {
///         released += 1;
///         drop(unsafe { Box::from_raw(pointer.as_ptr()) });
///     });
///     let _owner = unsafe { Owned::from_raw_with(pointer, deleter) };
/// }
/// assert_eq!(released, 1);
/// ```
#[derive(Clone, Copy, Default)]
pub struct FnDelete<F>(pub F);

impl<T: ?Sized, F: FnMut(NonNull<T>)> Deleter<T> for FnDelete<F> {
    #[inline]
    unsafe fn delete(&mut self, pointer: NonNull<T>) {
        (self.0)(pointer)
    }
}

impl<F> fmt::Debug for FnDelete<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDelete")
    }
}

/// Storage for an owner's deleter
///
/// Stateless deleters are zero-sized, so the slot adds nothing to the size of the owner that
/// contains it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleterSlot<D>(D);

impl<D> DeleterSlot<D> {
    /// Stores the given deleter
    #[inline]
    pub const fn new(deleter: D) -> Self {
        Self(deleter)
    }

    /// Returns true if the slot occupies no storage
    pub const fn is_elided() -> bool {
        crate::is_stateless::<D>()
    }

    /// Returns a reference to the stored deleter
    #[inline]
    pub fn get(&self) -> &D {
        &self.0
    }

    /// Returns a mutable reference to the stored deleter
    #[inline]
    pub fn get_mut(&mut self) -> &mut D {
        &mut self.0
    }

    /// Consumes the slot, returning the stored deleter
    #[inline]
    pub fn into_inner(self) -> D {
        self.0
    }
}

impl<D> From<D> for DeleterSlot<D> {
    fn from(deleter: D) -> Self {
        Self::new(deleter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stateless_slots_are_elided() {
        assert!(DeleterSlot::<DefaultDelete>::is_elided());
        assert_eq!(size_of::<DeleterSlot<DefaultDelete>>(), 0);
        assert!(!DeleterSlot::<fn(NonNull<u8>)>::is_elided());
        assert_eq!(
            size_of::<DeleterSlot<fn(NonNull<u8>)>>(),
            size_of::<fn(NonNull<u8>)>()
        );
    }

    #[test]
    fn slot_access() {
        let mut slot = DeleterSlot::new(3u32);
        *slot.get_mut() += 1;
        assert_eq!(*slot.get(), 4);
        assert_eq!(slot.into_inner(), 4);
    }

    fn release_with<D: Deleter<u64>>(mut deleter: D, value: u64) {
        unsafe { deleter.delete(NonNull::from(Box::leak(Box::new(value)))) }
    }

    #[test]
    fn reference_deleter_forwards() {
        let mut count = 0;
        let mut deleter = FnDelete(|pointer: NonNull<u64>| {
            count += 1;
            drop(unsafe { Box::from_raw(pointer.as_ptr()) });
        });

        release_with(&mut deleter, 1);
        release_with(&mut deleter, 2);

        drop(deleter);
        assert_eq!(count, 2);
    }
}
