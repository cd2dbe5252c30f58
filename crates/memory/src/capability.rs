//! Compile-time capability queries used to select owner behaviour
//!
//! Each conversion or construction that an owner supports is gated by one of the traits in this
//! module. When a bound isn't satisfied the operation simply doesn't exist for that combination of
//! types, so misuse is reported by the compiler rather than at runtime.

use std::ptr::NonNull;

/// Returns true if values of type `D` carry no state
///
/// Stateless deleters occupy no space inside an owner.
pub const fn is_stateless<D>() -> bool {
    size_of::<D>() == 0
}

/// Declares that a pointer to `Self` can be converted into a pointer to `U`
///
/// This is the address-compatibility check used when converting an [`Owned`](crate::Owned) into
/// an owner of a related type, e.g. from `Owned<Circle>` to `Owned<dyn Shape>`.
///
/// Every type can be converted to itself. Conversions into trait objects can be declared with the
/// [`upcast!`](crate::upcast) macro.
///
/// # Safety
///
/// The returned pointer must refer to the same allocation as the input, and must describe the
/// complete object, so that a deleter releasing a `U` releases everything that the `Self` pointer
/// owned.
pub unsafe trait Upcast<U: ?Sized> {
    /// Converts the pointer
    fn upcast(pointer: NonNull<Self>) -> NonNull<U>;
}

unsafe impl<T: ?Sized> Upcast<T> for T {
    #[inline]
    fn upcast(pointer: NonNull<Self>) -> NonNull<T> {
        pointer
    }
}

/// Declares that an array of `Self` can be reinterpreted as an array of `U`
///
/// Array owners release their elements as a whole, so unlike [`Upcast`] the element types must
/// share a layout. Only the identity conversion is provided.
///
/// # Safety
///
/// `Self` and `U` must have identical size and alignment, and dropping a `U` must be equivalent
/// to dropping the `Self` it was reinterpreted from (e.g. a `#[repr(transparent)]` wrapper).
pub unsafe trait ElementCast<U>: Sized {}

unsafe impl<T> ElementCast<T> for T {}

/// Builds a value from a set of constructor arguments
///
/// This is the constructor predicate used by [`create`](crate::create). The arguments are passed
/// as a tuple, with `()` acting as the no-argument constructor.
///
/// Fixed-size arrays never implement `Construct`, so they can't be passed to `create`:
///
/// ```compile_fail
/// let owner = solo_memory::create::<[i32; 4], _>(());
/// ```
pub trait Construct<Args>: Sized {
    /// Makes a new value from the given arguments
    fn construct(args: Args) -> Self;
}

macro_rules! construct_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Construct<()> for $ty {
                #[inline]
                fn construct(_: ()) -> Self {
                    Self::default()
                }
            }

            impl Construct<($ty,)> for $ty {
                #[inline]
                fn construct((value,): ($ty,)) -> Self {
                    value
                }
            }
        )+
    };
}

construct_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl Construct<(&str,)> for String {
    fn construct((value,): (&str,)) -> Self {
        value.to_string()
    }
}

/// Declares that a type can be upcast to one or more related pointee types
///
/// The target types are usually trait objects that the source type implements.
///
/// # Example
///
/// ```
/// use solo_memory::{create, upcast, Construct, Owned};
///
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// impl Construct<(f64,)> for Square {
///     fn construct((side,): (f64,)) -> Self {
///         Self(side)
///     }
/// }
///
/// upcast!(Square => dyn Shape);
///
/// let shape: Owned<dyn Shape> = create::<Square, _>((2.0,)).convert();
/// assert_eq!(shape.area(), 4.0);
/// ```
#[macro_export]
macro_rules! upcast {
    ($($from:ty => $to:ty),+ $(,)?) => {
        $(
            unsafe impl $crate::Upcast<$to> for $from {
                #[inline]
                fn upcast(pointer: ::core::ptr::NonNull<Self>) -> ::core::ptr::NonNull<$to> {
                    let converted: ::core::ptr::NonNull<$to> = pointer;
                    converted
                }
            }
        )+
    };
}
