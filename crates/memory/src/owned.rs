use crate::{
    Address, DefaultDelete, Deleter, DeleterSlot, Upcast, error::unwrap_allocation, raw_impl,
};
use std::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
};

/// An exclusive owner of a single object
///
/// The owner is either empty, or it holds the address of an object that it is solely responsible
/// for releasing. When the owner is dropped, reset, or replaced, its deleter is invoked exactly once
/// on the held address. Ownership moves with the value; [`release`](Self::release) and
/// [`into_raw`](Self::into_raw) hand responsibility back to the caller without invoking the
/// deleter.
///
/// `Owned` can't be cloned:
///
/// ```compile_fail
/// let a = solo_memory::create::<i32, _>((1,));
/// let b = a.clone();
/// ```
///
/// Borrowed deleters can't outlive the owner, so a temporary deleter is rejected:
///
/// ```compile_fail
/// use solo_memory::{DefaultDelete, Owned};
/// use std::ptr::NonNull;
///
/// let pointer = NonNull::from(Box::leak(Box::new(1)));
/// let owner = {
///     let mut deleter = DefaultDelete;
///     unsafe { Owned::from_raw_with(pointer, &mut deleter) }
/// };
/// drop(owner);
/// ```
pub struct Owned<T: ?Sized, D: Deleter<T> = DefaultDelete> {
    pointer: Option<NonNull<T>>,
    deleter: DeleterSlot<D>,
    _owns: PhantomData<T>,
}

impl<T: ?Sized, D: Deleter<T> + Default> Owned<T, D> {
    /// Makes an empty owner
    pub fn null() -> Self {
        Self::with_deleter(D::default())
    }

    /// Takes ownership of the object at `pointer`, using a default deleter
    ///
    /// # Safety
    ///
    /// `pointer` must be valid for the deleter to release, and nothing else may release it.
    pub unsafe fn from_raw(pointer: NonNull<T>) -> Self {
        unsafe { Self::from_raw_with(pointer, D::default()) }
    }
}

impl<T: ?Sized, D: Deleter<T>> Owned<T, D> {
    /// Makes an empty owner that will use the given deleter
    pub fn with_deleter(deleter: D) -> Self {
        Self {
            pointer: None,
            deleter: DeleterSlot::new(deleter),
            _owns: PhantomData,
        }
    }

    /// Takes ownership of the object at `pointer`, to be released with `deleter`
    ///
    /// # Safety
    ///
    /// `pointer` must be valid for `deleter` to release, and nothing else may release it.
    pub unsafe fn from_raw_with(pointer: NonNull<T>, deleter: D) -> Self {
        Self {
            pointer: Some(pointer),
            deleter: DeleterSlot::new(deleter),
            _owns: PhantomData,
        }
    }

    /// Returns the held address without giving up ownership
    #[inline]
    pub fn get(&self) -> Option<NonNull<T>> {
        self.pointer
    }

    /// Returns the held address in comparable form
    #[inline]
    pub fn address(&self) -> Address {
        Address::of(self.pointer)
    }

    /// Returns true if the owner holds an object
    #[inline]
    pub fn is_some(&self) -> bool {
        self.pointer.is_some()
    }

    /// Returns true if the owner is empty
    #[inline]
    pub fn is_null(&self) -> bool {
        self.pointer.is_none()
    }

    /// Returns a reference to the owned object, or `None` if the owner is empty
    pub fn as_ref(&self) -> Option<&T> {
        self.pointer.map(|pointer| unsafe { pointer.as_ref() })
    }

    /// Returns a mutable reference to the owned object, or `None` if the owner is empty
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.pointer.map(|mut pointer| unsafe { pointer.as_mut() })
    }

    /// Returns a reference to the owned object without checking that the owner holds one
    ///
    /// # Safety
    ///
    /// The owner must not be empty.
    #[inline]
    pub unsafe fn as_ref_unchecked(&self) -> &T {
        unsafe { self.pointer.unwrap_unchecked().as_ref() }
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
    /// The owner is left empty and the deleter isn't invoked, the caller becomes responsible for
    /// releasing the object.
    #[must_use = "the released object will leak unless it's released by the caller"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.pointer.take()
    }

    /// Consumes the owner, returning the held address without invoking the deleter
    #[must_use = "the released object will leak unless it's released by the caller"]
    pub fn into_raw(self) -> Option<NonNull<T>> {
        self.into_parts().0
    }

    /// Consumes the owner, returning the held address and the deleter
    #[must_use = "the released object will leak unless it's released by the caller"]
    pub fn into_parts(self) -> (Option<NonNull<T>>, D) {
        let this = ManuallyDrop::new(self);
        // The owner is never dropped, so the deleter is moved out exactly once
        let deleter = unsafe { ptr::read(&this.deleter) };
        (this.pointer, deleter.into_inner())
    }

    /// Replaces the held address
    ///
    /// The new address is installed first, then the deleter is invoked on the previously held
    /// address, if any.
    ///
    /// # Safety
    ///
    /// `pointer` must be valid for the owner's deleter to release, nothing else may release it, and
    /// it must not be the address that is currently held.
    pub unsafe fn reset(&mut self, pointer: Option<NonNull<T>>) {
        let previous = mem::replace(&mut self.pointer, pointer);
        if let Some(previous) = previous {
            unsafe { self.deleter.get_mut().delete(previous) }
        }
    }

    /// Releases the held object, if any, leaving the owner empty
    pub fn clear(&mut self) {
        unsafe { self.reset(None) }
    }

    /// Exchanges the addresses and deleters of two owners
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Converts into an owner of a related type
    ///
    /// The conversion is available when the held address can be upcast to `U`, and when the
    /// target deleter can be made from this owner's deleter. The original deleter is carried
    /// through the conversion, so the complete object is still released correctly.
    ///
    /// A deleter that is unrelated to the target deleter type is rejected:
    ///
    /// ```compile_fail
    /// use solo_memory::{DefaultDelete, Owned};
    /// use std::ptr::NonNull;
    ///
    /// fn release_number(pointer: NonNull<i32>) {
    ///     drop(unsafe { Box::from_raw(pointer.as_ptr()) });
    /// }
    ///
    /// let pointer = NonNull::from(Box::leak(Box::new(1)));
    /// let owner = unsafe {
    ///     Owned::from_raw_with(pointer, release_number as fn(NonNull<i32>))
    /// };
    /// let converted: Owned<i32, DefaultDelete> = owner.convert();
    /// ```
    pub fn convert<U, E>(self) -> Owned<U, E>
    where
        T: Upcast<U>,
        U: ?Sized,
        E: Deleter<U> + From<D>,
    {
        let (pointer, deleter) = self.into_parts();
        Owned {
            pointer: pointer.map(<T as Upcast<U>>::upcast),
            deleter: DeleterSlot::new(E::from(deleter)),
            _owns: PhantomData,
        }
    }

    /// Takes ownership from an owner of a related type
    ///
    /// The currently held object is released with the current deleter, then the address and
    /// deleter of `other` are installed. The same restrictions apply as with
    /// [`convert`](Self::convert).
    pub fn assign_from<V, F>(&mut self, other: Owned<V, F>)
    where
        V: Upcast<T> + ?Sized,
        F: Deleter<V>,
        D: From<F>,
    {
        *self = other.convert();
    }
}

impl<T, D: Deleter<T>> Owned<T, D> {
    /// Returns the held address as a raw pointer, null if the owner is empty
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.pointer
            .map_or(ptr::null(), |pointer| pointer.as_ptr().cast_const())
    }

    /// Returns the held address as a raw mutable pointer, null if the owner is empty
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.pointer.map_or(ptr::null_mut(), NonNull::as_ptr)
    }
}

impl<T> Owned<T> {
    /// Moves `value` into a new allocation
    ///
    /// # Panics
    ///
    /// Allocation failure is reported through [`std::alloc::handle_alloc_error`], see
    /// [`try_create`](crate::try_create) for a fallible alternative.
    pub fn new(value: T) -> Self {
        unsafe { Self::from_raw(unwrap_allocation(raw_impl::allocate(value))) }
    }
}

impl<T: ?Sized> Owned<T> {
    /// Takes ownership of a boxed object
    ///
    /// Boxed zero-size values share a single dangling address, so they're moved to an address of
    /// their own.
    pub fn from_box(boxed: Box<T>) -> Self {
        let pointer = NonNull::from(Box::leak(boxed));
        unsafe { Self::from_raw(unwrap_allocation(raw_impl::adopt(pointer))) }
    }

    /// Converts into a `Box`, or `None` if the owner is empty
    pub fn into_box(self) -> Option<Box<T>> {
        self.into_raw()
            .map(|pointer| unsafe { Box::from_raw(raw_impl::disown(pointer).as_ptr()) })
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for Owned<T, D> {
    fn drop(&mut self) {
        if let Some(pointer) = self.pointer.take() {
            unsafe { self.deleter.get_mut().delete(pointer) }
        }
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for Owned<T, D> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Box<T>> for Owned<T> {
    fn from(boxed: Box<T>) -> Self {
        Self::from_box(boxed)
    }
}

impl<T: ?Sized, D: Deleter<T>> Deref for Owned<T, D> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the owner is empty.
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => panic!("Attempted to dereference an empty owner"),
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> DerefMut for Owned<T, D> {
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => panic!("Attempted to dereference an empty owner"),
        }
    }
}

impl<T: ?Sized + fmt::Debug, D: Deleter<T>> fmt::Debug for Owned<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("Owned").field(&value).finish(),
            None => f.write_str("Owned(null)"),
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Pointer for Owned<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.address(), f)
    }
}

// Ownership is exclusive, so moving an owner to another thread moves the object along with it
unsafe impl<T: ?Sized + Send, D: Deleter<T> + Send> Send for Owned<T, D> {}
unsafe impl<T: ?Sized + Sync, D: Deleter<T> + Sync> Sync for Owned<T, D> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create;

    #[test]
    fn default_deleter_is_elided() {
        assert_eq!(size_of::<Owned<u64>>(), size_of::<*mut u64>());
        assert_eq!(size_of::<Owned<[u64]>>(), size_of::<*mut [u64]>());
    }

    #[test]
    fn release_leaves_owner_empty() {
        let mut owner = create::<u32, _>((7,));
        let address = owner.address();

        let released = owner.release();

        assert!(owner.is_null());
        assert_eq!(Address::of(released), address);
        drop(owner);
        drop(unsafe { Owned::<u32>::from_raw(released.unwrap()) });
    }

    #[test]
    #[should_panic(expected = "empty owner")]
    fn deref_of_empty_owner_panics() {
        let owner = Owned::<u32>::null();
        let _value: u32 = *owner;
    }

    #[test]
    fn new_moves_value_into_owner() {
        let mut owner = Owned::new(String::from("solo"));

        assert_eq!(*owner, "solo");
        assert_eq!(Address::from(owner.as_ptr()), owner.address());
        unsafe { (*owner.as_mut_ptr()).push('!') };
        assert_eq!(*owner, "solo!");
    }

    #[test]
    fn raw_pointers_of_empty_owner_are_null() {
        let mut owner = Owned::<u32>::null();

        assert!(owner.as_ptr().is_null());
        assert!(owner.as_mut_ptr().is_null());
    }

    #[test]
    fn box_round_trip_keeps_address() {
        let boxed = Box::new(String::from("hello"));
        let address = Address::from(&*boxed as *const String);

        let owner = Owned::from_box(boxed);
        assert_eq!(owner.address(), address);
        assert_eq!(*owner, "hello");

        let boxed = owner.into_box().unwrap();
        assert_eq!(Address::from(&*boxed as *const String), address);
    }
}
