//! Algorithms that construct and destroy values in raw storage
//!
//! None of these functions assume that the destination holds live values. Construction is
//! panic-safe: if an element constructor panics, the elements built so far by the same call are
//! destroyed before the panic continues.
//!
//! The slice forms operate on `[MaybeUninit<T>]` and are safe to call. The pointer forms mirror
//! them for storage that isn't available as a slice, and leave the range checks to the caller.

use crate::{Construct, raw_impl};
use std::{mem, mem::MaybeUninit, ptr};

/// Destroys the elements that were constructed so far if construction is interrupted
struct ConstructionGuard<T> {
    first: *mut T,
    constructed: usize,
}

impl<T> Drop for ConstructionGuard<T> {
    fn drop(&mut self) {
        unsafe { raw_impl::destroy_n(self.first, self.constructed) }
    }
}

/// Constructs `n` values starting at `first`, using `f` to produce the value for each index
///
/// Returns the position following the last constructed element.
///
/// # Safety
///
/// `first` must be valid for writes of `n` consecutive values of `T`.
pub(crate) unsafe fn construct_with<T, F>(first: *mut T, n: usize, mut f: F) -> *mut T
where
    F: FnMut(usize) -> T,
{
    let mut guard = ConstructionGuard {
        first,
        constructed: 0,
    };

    while guard.constructed < n {
        let value = f(guard.constructed);
        unsafe { first.add(guard.constructed).write(value) };
        guard.constructed += 1;
    }

    mem::forget(guard);
    unsafe { first.add(n) }
}

/// Reinterprets storage whose slots have all been initialized
///
/// # Safety
///
/// Every slot must hold a live value.
unsafe fn assume_init_slice<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    unsafe { &mut *(slots as *mut [MaybeUninit<T>] as *mut [T]) }
}

/// Default-constructs a value in every slot, returning the now-initialized slice
///
/// Any values previously in the slots are overwritten without being dropped.
pub fn default_construct<T: Default>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    unsafe {
        construct_with(slots.as_mut_ptr().cast::<T>(), slots.len(), |_| T::default());
        assume_init_slice(slots)
    }
}

/// Default-constructs `n` values starting at `first`
///
/// Returns the position following the last constructed element.
///
/// # Safety
///
/// `first` must be valid for writes of `n` consecutive values of `T`.
pub unsafe fn default_construct_n<T: Default>(first: *mut T, n: usize) -> *mut T {
    unsafe { construct_with(first, n, |_| T::default()) }
}

/// Value-constructs every slot using the no-argument constructor, e.g. zero for scalars
pub fn value_construct<T: Construct<()>>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    unsafe {
        construct_with(slots.as_mut_ptr().cast::<T>(), slots.len(), |_| {
            T::construct(())
        });
        assume_init_slice(slots)
    }
}

/// Value-constructs `n` values starting at `first`
///
/// Returns the position following the last constructed element.
///
/// # Safety
///
/// `first` must be valid for writes of `n` consecutive values of `T`.
pub unsafe fn value_construct_n<T: Construct<()>>(first: *mut T, n: usize) -> *mut T {
    unsafe { construct_with(first, n, |_| T::construct(())) }
}

/// Moves the values in `first..last` into the storage starting at `destination`
///
/// Returns the end of the source range and the position following the last constructed
/// destination element. The source values are moved bitwise and aren't dropped; they must be
/// treated as uninitialized afterwards.
///
/// # Safety
///
/// - `first..last` must be a range of live values within a single allocation.
/// - `destination` must be valid for writes of `last - first` values.
/// - The source and destination ranges must not overlap.
pub unsafe fn uninitialized_move<T>(
    first: *const T,
    last: *const T,
    destination: *mut T,
) -> (*const T, *mut T) {
    unsafe {
        let n = last.offset_from(first) as usize;
        uninitialized_move_n(first, n, destination)
    }
}

/// Moves `n` values starting at `first` into the storage starting at `destination`
///
/// See [`uninitialized_move`].
///
/// # Safety
///
/// - `first` must point to `n` consecutive live values.
/// - `destination` must be valid for writes of `n` values.
/// - The source and destination ranges must not overlap.
pub unsafe fn uninitialized_move_n<T>(
    first: *const T,
    n: usize,
    destination: *mut T,
) -> (*const T, *mut T) {
    unsafe {
        ptr::copy_nonoverlapping(first, destination, n);
        (first.add(n), destination.add(n))
    }
}

/// Moves each value in `source` into the corresponding slot in `destination`
///
/// The source values are replaced with their defaults, leaving them in a valid moved-from state
/// for the caller to keep or drop. Returns the initialized prefix of `destination`.
///
/// # Panics
///
/// Panics if `destination` is shorter than `source`.
pub fn move_construct<'a, T: Default>(
    source: &mut [T],
    destination: &'a mut [MaybeUninit<T>],
) -> &'a mut [T] {
    let destination = &mut destination[..source.len()];
    for (slot, value) in destination.iter_mut().zip(source.iter_mut()) {
        slot.write(mem::take(value));
    }
    unsafe { assume_init_slice(destination) }
}

/// Destroys the value at `pointer`
///
/// # Safety
///
/// `pointer` must refer to a live value, which must not be used again.
pub unsafe fn destroy_at<T>(pointer: *mut T) {
    unsafe { ptr::drop_in_place(pointer) }
}

/// Destroys each value in `first..last`, in order
///
/// # Safety
///
/// `first..last` must be a range of live values within a single allocation, and the values must
/// not be used again.
pub unsafe fn destroy<T>(first: *mut T, last: *mut T) {
    unsafe {
        let n = last.offset_from(first) as usize;
        raw_impl::destroy_n(first, n);
    }
}

/// Destroys `n` values starting at `first`, in order
///
/// Returns the position following the last destroyed element.
///
/// # Safety
///
/// `first` must point to `n` consecutive live values, which must not be used again.
pub unsafe fn destroy_n<T>(first: *mut T, n: usize) -> *mut T {
    unsafe {
        raw_impl::destroy_n(first, n);
        first.add(n)
    }
}

/// Destroys the values in every slot, in order
///
/// # Safety
///
/// Every slot must hold a live value. The slots are uninitialized afterwards.
pub unsafe fn destroy_slice<T>(slots: &mut [MaybeUninit<T>]) {
    unsafe { raw_impl::destroy_n(slots.as_mut_ptr().cast::<T>(), slots.len()) }
}
