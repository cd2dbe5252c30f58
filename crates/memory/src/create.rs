use crate::{Construct, Owned, OwnedSlice, Result, error::unwrap_allocation, raw_impl};

/// Allocates a `T` built from the given constructor arguments
///
/// Allocation failure is handled with [`std::alloc::handle_alloc_error`].
///
/// # Example
///
/// ```
/// use solo_memory::create;
///
/// let number = create::<u64, _>((99,));
/// assert_eq!(*number, 99);
///
/// let zero = create::<u64, _>(());
/// assert_eq!(*zero, 0);
/// ```
pub fn create<T, Args>(args: Args) -> Owned<T>
where
    T: Construct<Args>,
{
    unwrap_allocation(try_create(args))
}

/// Allocates a `T` built from the given constructor arguments, returning an error on failure
pub fn try_create<T, Args>(args: Args) -> Result<Owned<T>>
where
    T: Construct<Args>,
{
    let pointer = raw_impl::allocate(T::construct(args))?;
    Ok(unsafe { Owned::from_raw(pointer) })
}

/// Allocates an array of `len` default-constructed elements
///
/// # Panics
///
/// Panics if the size of the array overflows `isize`.
///
/// # Example
///
/// ```
/// use solo_memory::create_slice;
///
/// let elements = create_slice::<i32>(5);
/// assert_eq!(elements.len(), 5);
/// assert!(elements.as_slice().iter().all(|&x| x == 0));
/// ```
pub fn create_slice<T: Default>(len: usize) -> OwnedSlice<T> {
    unwrap_allocation(try_create_slice(len))
}

/// Allocates an array of `len` default-constructed elements, returning an error on failure
pub fn try_create_slice<T: Default>(len: usize) -> Result<OwnedSlice<T>> {
    try_create_slice_with(len, |_| T::default())
}

/// Allocates an array of `len` elements, calling `f` with each index to produce the elements
///
/// # Panics
///
/// Panics if the size of the array overflows `isize`. If `f` panics, the elements produced so far
/// are dropped and the storage is released.
pub fn create_slice_with<T, F>(len: usize, f: F) -> OwnedSlice<T>
where
    F: FnMut(usize) -> T,
{
    unwrap_allocation(try_create_slice_with(len, f))
}

/// Allocates an array of `len` elements produced by `f`, returning an error on failure
pub fn try_create_slice_with<T, F>(len: usize, f: F) -> Result<OwnedSlice<T>>
where
    F: FnMut(usize) -> T,
{
    let pointer = raw_impl::allocate_slice_with(len, f)?;
    Ok(unsafe { OwnedSlice::from_raw(pointer) })
}
