//! Allocation and release delegated to the standard library's owning types

use crate::{Error, Result};
use std::{alloc::Layout, ptr::NonNull};

fn reserve<T>(len: usize) -> Result<Vec<T>> {
    let layout = Layout::array::<T>(len).map_err(|_| {
        log::debug!("array of {len} elements exceeds the maximum allocation size");
        Error::capacity_overflow::<T>(len)
    })?;

    let mut storage = Vec::new();
    storage.try_reserve_exact(len).map_err(|error| {
        log::debug!("reserving {len} elements failed: {error}");
        Error::AllocationFailed { layout }
    })?;
    Ok(storage)
}

pub(crate) fn allocate<T>(value: T) -> Result<NonNull<T>> {
    let mut storage = reserve(1)?;
    storage.push(value);
    let single: Box<[T; 1]> = match storage.into_boxed_slice().try_into() {
        Ok(single) => single,
        Err(_) => unreachable!("storage holds exactly one element"),
    };
    unsafe { adopt_boxed(NonNull::from(Box::leak(single)).cast::<T>()) }
}

pub(crate) fn allocate_slice_with<T, F>(len: usize, f: F) -> Result<NonNull<[T]>>
where
    F: FnMut(usize) -> T,
{
    let mut storage = reserve(len)?;
    storage.extend((0..len).map(f));
    unsafe { adopt_boxed(NonNull::from(Box::leak(storage.into_boxed_slice()))) }
}

/// Gives zero-size storage from `Box` its own address, dropping the values if that fails
unsafe fn adopt_boxed<T: ?Sized>(pointer: NonNull<T>) -> Result<NonNull<T>> {
    unsafe { super::adopt(pointer) }
        .inspect_err(|_| drop(unsafe { Box::from_raw(pointer.as_ptr()) }))
}

pub(crate) unsafe fn release<T: ?Sized>(pointer: NonNull<T>) {
    unsafe {
        let pointer = super::disown(pointer);
        drop(Box::from_raw(pointer.as_ptr()));
    }
}
