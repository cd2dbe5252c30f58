#[cfg(feature = "backport")]
mod backport;
#[cfg(feature = "backport")]
pub(crate) use backport::*;

#[cfg(feature = "host")]
mod host;
#[cfg(feature = "host")]
pub(crate) use host::*;

use crate::{Error, Result};
use std::{
    alloc::{self, Layout},
    ptr::{self, NonNull},
};

// Zero-size pointees are given a placeholder block by both implementations, so that every live
// owner made by the crate has its own address. `Box` and `Vec` use the dangling address instead,
// which is equal to the alignment and owns no memory.

fn placeholder_layout(align: usize) -> Layout {
    // `align` is always taken from an existing layout
    unsafe { Layout::from_size_align_unchecked(align, align) }
}

/// Reserves a block that gives a zero-size pointee with the given alignment its own address
///
/// The block's provenance is exposed, so that it can be released through any pointer that carries
/// its address.
pub(crate) fn allocate_placeholder(align: usize) -> Result<NonNull<u8>> {
    let layout = placeholder_layout(align);
    match NonNull::new(unsafe { alloc::alloc(layout) }) {
        Some(block) => {
            let _ = block.as_ptr().expose_provenance();
            Ok(block)
        }
        None => {
            log::debug!("placeholder allocation (align {align}) failed");
            Err(Error::AllocationFailed { layout })
        }
    }
}

/// Frees the placeholder block at `address`
///
/// Returns false without doing anything if `address` is the dangling address for `align`.
///
/// # Safety
///
/// `address` must be dangling, or the address of a live block from [allocate_placeholder] with
/// the same alignment.
pub(crate) unsafe fn release_placeholder(address: usize, align: usize) -> bool {
    if address == align {
        return false;
    }
    let block = ptr::with_exposed_provenance_mut::<u8>(address);
    unsafe { alloc::dealloc(block, placeholder_layout(align)) };
    true
}

/// Moves a zero-size pointee from the dangling address to a placeholder block
///
/// Pointees with a size are returned unchanged.
///
/// # Safety
///
/// `pointer` must refer to a live value.
pub(crate) unsafe fn adopt<T: ?Sized>(pointer: NonNull<T>) -> Result<NonNull<T>> {
    let layout = Layout::for_value(unsafe { pointer.as_ref() });
    if layout.size() != 0 {
        return Ok(pointer);
    }
    let block = allocate_placeholder(layout.align())?;
    Ok(pointer.with_addr(block.addr()))
}

/// Hands a pointee back in the form that `Box` expects
///
/// A zero-size pointee's placeholder block is freed and the dangling address is returned in its
/// place. Pointees with a size are returned unchanged.
///
/// # Safety
///
/// `pointer` must refer to a live value that's owned by the caller.
pub(crate) unsafe fn disown<T: ?Sized>(pointer: NonNull<T>) -> NonNull<T> {
    let layout = Layout::for_value(unsafe { pointer.as_ref() });
    if layout.size() == 0
        && unsafe { release_placeholder(pointer.addr().get(), layout.align()) }
    {
        let dangling = pointer.as_ptr().with_addr(layout.align());
        // Alignments are never zero
        unsafe { NonNull::new_unchecked(dangling) }
    } else {
        pointer
    }
}

/// Drops `n` consecutive values starting at `first`
///
/// If a destructor panics, the remaining values are still dropped before the panic continues.
pub(crate) unsafe fn destroy_n<T>(first: *mut T, n: usize) {
    unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, n)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_have_distinct_addresses() {
        let a = allocate_placeholder(8).unwrap();
        let b = allocate_placeholder(8).unwrap();

        assert_ne!(a, b);
        assert_eq!(a.addr().get() % 8, 0);

        unsafe {
            assert!(release_placeholder(a.addr().get(), 8));
            assert!(release_placeholder(b.addr().get(), 8));
        }
    }

    #[test]
    fn dangling_address_is_not_released() {
        let dangling = NonNull::<u64>::dangling();

        assert!(!unsafe { release_placeholder(dangling.addr().get(), align_of::<u64>()) });
    }

    #[test]
    fn adopt_and_disown_zero_size_slice() {
        let dangling = NonNull::<[u32]>::slice_from_raw_parts(NonNull::dangling(), 0);

        let adopted = unsafe { adopt(dangling) }.unwrap();
        assert_ne!(adopted.addr(), dangling.addr());
        assert_eq!(adopted.len(), 0);

        let disowned = unsafe { disown(adopted) };
        assert_eq!(disowned.addr(), dangling.addr());
    }
}
