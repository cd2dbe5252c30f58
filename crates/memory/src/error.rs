use std::alloc::Layout;
use thiserror::Error;

/// The errors that can be returned by the fallible factory functions
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The allocator was unable to provide memory for the requested layout
    #[error("Failed to allocate {} bytes with alignment {}", layout.size(), layout.align())]
    AllocationFailed {
        /// The layout that was requested
        layout: Layout,
    },
    /// The total size of the requested array doesn't fit in `isize`
    #[error("Unable to allocate {len} elements of {element_size} bytes, capacity overflow")]
    CapacityOverflow {
        /// The requested number of elements
        len: usize,
        /// The size of a single element
        element_size: usize,
    },
}

impl Error {
    /// Makes a capacity overflow error for an array of `len` elements of type `T`
    pub(crate) fn capacity_overflow<T>(len: usize) -> Self {
        Self::CapacityOverflow {
            len,
            element_size: size_of::<T>(),
        }
    }
}

/// The Result type used by the fallible factory functions
pub type Result<T> = std::result::Result<T, Error>;

/// Applies the host allocation-failure policy to a failed allocation
///
/// Allocator failures are forwarded to [`std::alloc::handle_alloc_error`], capacity overflows
/// panic, matching the behaviour of `Box` and `Vec`.
pub(crate) fn unwrap_allocation<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(Error::AllocationFailed { layout }) => std::alloc::handle_alloc_error(layout),
        Err(error) => panic!("{error}"),
    }
}
