//! Allocation and release performed directly against the global allocator

use crate::{Error, Result, uninit};
use std::{
    alloc::{self, Layout},
    ptr::{self, NonNull},
};

/// Allocates uninitialized storage for the given layout
///
/// Zero-sized layouts are given a placeholder block, so that the address is still unique.
fn allocate_layout<T>(layout: Layout) -> Result<NonNull<T>> {
    if layout.size() == 0 {
        return super::allocate_placeholder(layout.align()).map(NonNull::cast);
    }

    match NonNull::new(unsafe { alloc::alloc(layout) }) {
        Some(pointer) => Ok(pointer.cast()),
        None => {
            log::debug!(
                "allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            );
            Err(Error::AllocationFailed { layout })
        }
    }
}

unsafe fn deallocate_layout(pointer: NonNull<u8>, layout: Layout) {
    unsafe {
        if layout.size() == 0 {
            super::release_placeholder(pointer.addr().get(), layout.align());
        } else {
            alloc::dealloc(pointer.as_ptr(), layout);
        }
    }
}

pub(crate) fn allocate<T>(value: T) -> Result<NonNull<T>> {
    let pointer = allocate_layout::<T>(Layout::new::<T>())?;
    unsafe { pointer.as_ptr().write(value) };
    Ok(pointer)
}

pub(crate) fn allocate_slice_with<T, F>(len: usize, f: F) -> Result<NonNull<[T]>>
where
    F: FnMut(usize) -> T,
{
    let layout = Layout::array::<T>(len).map_err(|_| {
        log::debug!("array of {len} elements exceeds the maximum allocation size");
        Error::capacity_overflow::<T>(len)
    })?;
    let first = allocate_layout::<T>(layout)?;

    // Releases the storage if an element constructor panics,
    // the constructed elements are cleaned up by `construct_with`
    struct Storage {
        pointer: NonNull<u8>,
        layout: Layout,
    }

    impl Drop for Storage {
        fn drop(&mut self) {
            unsafe { deallocate_layout(self.pointer, self.layout) }
        }
    }

    let storage = Storage {
        pointer: first.cast(),
        layout,
    };
    unsafe { uninit::construct_with(first.as_ptr(), len, f) };
    std::mem::forget(storage);

    Ok(NonNull::slice_from_raw_parts(first, len))
}

pub(crate) unsafe fn release<T: ?Sized>(pointer: NonNull<T>) {
    unsafe {
        let layout = Layout::for_value(pointer.as_ref());
        ptr::drop_in_place(pointer.as_ptr());
        deallocate_layout(pointer.cast(), layout);
    }
}
