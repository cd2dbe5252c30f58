use crate::{
    Address, DefaultDelete, Deleter, DeleterSlot, ElementCast, error::unwrap_allocation, raw_impl,
};
use std::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
};

/// An exclusive owner of a heap array
///
/// `OwnedSlice` follows the same ownership rules as [`Owned`](crate::Owned), with the held address
/// referring to a run of elements that are released together. Elements are accessed by index
/// rather than by dereferencing the owner.
///
/// Only array addresses of the same element type can be installed with `reset`:
///
/// ```compile_fail
/// use solo_memory::{create, create_slice};
///
/// let mut elements = create_slice::<u32>(4);
/// let single = create::<u32, _>((1,)).into_raw();
/// unsafe { elements.reset(single) };
/// ```
pub struct OwnedSlice<T, D: Deleter<[T]> = DefaultDelete> {
    pointer: Option<NonNull<[T]>>,
    deleter: DeleterSlot<D>,
    _owns: PhantomData<[T]>,
}

impl<T, D: Deleter<[T]> + Default> OwnedSlice<T, D> {
    /// Makes an empty owner
    pub fn null() -> Self {
        Self::with_deleter(D::default())
    }

    /// Takes ownership of the elements at `pointer`, using a default deleter
    ///
    /// # Safety
    ///
    /// `pointer` must be valid for the deleter to release, and nothing else may release it.
    pub unsafe fn from_raw(pointer: NonNull<[T]>) -> Self {
        unsafe { Self::from_raw_with(pointer, D::default()) }
    }
}

impl<T, D: Deleter<[T]>> OwnedSlice<T, D> {
    /// Makes an empty owner that will use the given deleter
    pub fn with_deleter(deleter: D) -> Self {
        Self {
            pointer: None,
            deleter: DeleterSlot::new(deleter),
            _owns: PhantomData,
        }
    }

    /// Takes ownership of the elements at `pointer`, to be released with `deleter`
    ///
    /// # Safety
    ///
    /// `pointer` must be valid for `deleter` to release, and nothing else may release it.
    pub unsafe fn from_raw_with(pointer: NonNull<[T]>, deleter: D) -> Self {
        Self {
            pointer: Some(pointer),
            deleter: DeleterSlot::new(deleter),
            _owns: PhantomData,
        }
    }

    /// Returns the held address without giving up ownership
    #[inline]
    pub fn get(&self) -> Option<NonNull<[T]>> {
        self.pointer
    }

    /// Returns a pointer to the first element, or null if the owner is empty
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.pointer
            .map_or(ptr::null(), |pointer| pointer.as_ptr().cast_const().cast())
    }

    /// Returns a mutable pointer to the first element, or null if the owner is empty
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.pointer
            .map_or(ptr::null_mut(), |pointer| pointer.as_ptr().cast())
    }

    /// Returns the held address in comparable form
    #[inline]
    pub fn address(&self) -> Address {
        Address::of(self.pointer)
    }

    /// Returns true if the owner holds an array
    ///
    /// An owner of a zero-length array holds an array.
    #[inline]
    pub fn is_some(&self) -> bool {
        self.pointer.is_some()
    }

    /// Returns true if the owner is empty
    #[inline]
    pub fn is_null(&self) -> bool {
        self.pointer.is_none()
    }

    /// Returns the number of owned elements, zero if the owner is empty
    pub fn len(&self) -> usize {
        self.pointer.map_or(0, |pointer| pointer.len())
    }

    /// Returns true if there are no owned elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the owned elements, an empty slice if the owner is empty
    pub fn as_slice(&self) -> &[T] {
        match self.pointer {
            Some(pointer) => unsafe { pointer.as_ref() },
            None => &[],
        }
    }

    /// Returns the owned elements mutably, an empty slice if the owner is empty
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.pointer {
            Some(mut pointer) => unsafe { pointer.as_mut() },
            None => &mut [],
        }
    }

    /// Returns a reference to the element at `index` without bounds checking
    ///
    /// # Safety
    ///
    /// The owner must not be empty, and `index` must be less than the number of owned elements.
    #[inline]
    pub unsafe fn element_at(&self, index: usize) -> &T {
        unsafe { &*self.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds checking
    ///
    /// # Safety
    ///
    /// The owner must not be empty, and `index` must be less than the number of owned elements.
    #[inline]
    pub unsafe fn element_at_mut(&mut self, index: usize) -> &mut T {
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }

    /// Returns a reference to the deleter
    pub fn deleter(&self) -> &D {
        self.deleter.get()
    }

    /// Returns a mutable reference to the deleter
    pub fn deleter_mut(&mut self) -> &mut D {
        self.deleter.get_mut()
    }

    /// Gives up ownership, returning the held address
    ///
    /// The owner is left empty and the deleter isn't invoked.
    #[must_use = "the released elements will leak unless they're released by the caller"]
    pub fn release(&mut self) -> Option<NonNull<[T]>> {
        self.pointer.take()
    }

    /// Consumes the owner, returning the held address without invoking the deleter
    #[must_use = "the released elements will leak unless they're released by the caller"]
    pub fn into_raw(self) -> Option<NonNull<[T]>> {
        self.into_parts().0
    }

    /// Consumes the owner, returning the held address and the deleter
    #[must_use = "the released elements will leak unless they're released by the caller"]
    pub fn into_parts(self) -> (Option<NonNull<[T]>>, D) {
        let this = ManuallyDrop::new(self);
        let deleter = unsafe { ptr::read(&this.deleter) };
        (this.pointer, deleter.into_inner())
    }

    /// Replaces the held address, then invokes the deleter on the previous address, if any
    ///
    /// # Safety
    ///
    /// `pointer` must be valid for the owner's deleter to release, nothing else may release it, and
    /// it must not be the address that is currently held.
    pub unsafe fn reset(&mut self, pointer: Option<NonNull<[T]>>) {
        let previous = mem::replace(&mut self.pointer, pointer);
        if let Some(previous) = previous {
            unsafe { self.deleter.get_mut().delete(previous) }
        }
    }

    /// Releases the held elements, if any, leaving the owner empty
    pub fn clear(&mut self) {
        unsafe { self.reset(None) }
    }

    /// Exchanges the addresses and deleters of two owners
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Converts into an array owner with a compatible element type and deleter
    pub fn convert<U, E>(self) -> OwnedSlice<U, E>
    where
        T: ElementCast<U>,
        E: Deleter<[U]> + From<D>,
    {
        let (pointer, deleter) = self.into_parts();
        OwnedSlice {
            pointer: pointer
                .map(|pointer| NonNull::slice_from_raw_parts(pointer.cast::<U>(), pointer.len())),
            deleter: DeleterSlot::new(E::from(deleter)),
            _owns: PhantomData,
        }
    }

    /// Takes ownership from an array owner with a compatible element type and deleter
    ///
    /// The currently held elements are released with the current deleter first.
    pub fn assign_from<V, F>(&mut self, other: OwnedSlice<V, F>)
    where
        V: ElementCast<T>,
        F: Deleter<[V]>,
        D: From<F>,
    {
        *self = other.convert();
    }
}

impl<T> OwnedSlice<T> {
    /// Takes ownership of a boxed slice
    pub fn from_boxed_slice(boxed: Box<[T]>) -> Self {
        let pointer = NonNull::from(Box::leak(boxed));
        unsafe { Self::from_raw(unwrap_allocation(raw_impl::adopt(pointer))) }
    }

    /// Takes ownership of the elements of a `Vec`
    ///
    /// Spare capacity is released before ownership is taken.
    pub fn from_vec(elements: Vec<T>) -> Self {
        if elements.capacity() > elements.len() {
            log::trace!(
                "shrinking vec from {} to {} elements",
                elements.capacity(),
                elements.len()
            );
        }
        Self::from_boxed_slice(elements.into_boxed_slice())
    }

    /// Converts into a boxed slice, or `None` if the owner is empty
    pub fn into_boxed_slice(self) -> Option<Box<[T]>> {
        self.into_raw()
            .map(|pointer| unsafe { Box::from_raw(raw_impl::disown(pointer).as_ptr()) })
    }
}

impl<T, D: Deleter<[T]>> Drop for OwnedSlice<T, D> {
    fn drop(&mut self) {
        if let Some(pointer) = self.pointer.take() {
            unsafe { self.deleter.get_mut().delete(pointer) }
        }
    }
}

impl<T, D: Deleter<[T]> + Default> Default for OwnedSlice<T, D> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Box<[T]>> for OwnedSlice<T> {
    fn from(boxed: Box<[T]>) -> Self {
        Self::from_boxed_slice(boxed)
    }
}

impl<T> From<Vec<T>> for OwnedSlice<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: fmt::Debug, D: Deleter<[T]>> fmt::Debug for OwnedSlice<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pointer {
            Some(_) => f.debug_tuple("OwnedSlice").field(&self.as_slice()).finish(),
            None => f.write_str("OwnedSlice(null)"),
        }
    }
}

impl<T, D: Deleter<[T]>> fmt::Pointer for OwnedSlice<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.address(), f)
    }
}

unsafe impl<T: Send, D: Deleter<[T]> + Send> Send for OwnedSlice<T, D> {}
unsafe impl<T: Sync, D: Deleter<[T]> + Sync> Sync for OwnedSlice<T, D> {}
