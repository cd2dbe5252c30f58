//! Exclusive-ownership pointers and raw-memory construction algorithms
//!
//! [`Owned`] holds a single object and [`OwnedSlice`] holds an array, each with a [`Deleter`]
//! that's invoked exactly once when the owner gives up the object. Ownership moves with the owner
//! value, leaving no way for two owners to release the same address.
//!
//! Owners are made with the factory functions ([`create`], [`create_slice`]), from `Box`, or from
//! raw addresses with an explicit deleter. An owner can be converted into an owner of a related
//! type when the address can be upcast and the deleter is carried over unchanged:
//!
//! ```
//! use solo_memory::{create, upcast, Construct, Owned};
//!
//! trait Animal {
//!     fn name(&self) -> String;
//! }
//!
//! struct Dog {
//!     name: String,
//! }
//!
//! impl Animal for Dog {
//!     fn name(&self) -> String {
//!         self.name.clone()
//!     }
//! }
//!
//! impl Construct<(&str,)> for Dog {
//!     fn construct((name,): (&str,)) -> Self {
//!         Self { name: name.into() }
//!     }
//! }
//!
//! upcast!(Dog => dyn Animal);
//!
//! let dog = create::<Dog, _>(("Rex",));
//! let animal: Owned<dyn Animal> = dog.convert();
//! assert_eq!(animal.name(), "Rex");
//! ```
//!
//! Converting into an owner whose deleter can't be made from the source's deleter fails to
//! compile, so a specialized deleter is never silently discarded:
//!
//! ```compile_fail
//! use solo_memory::{upcast, DefaultDelete, Owned};
//! use std::ptr::NonNull;
//!
//! trait Animal {}
//! struct Cat;
//! impl Animal for Cat {}
//! upcast!(Cat => dyn Animal);
//!
//! fn release_cat(pointer: NonNull<Cat>) {
//!     drop(unsafe { Box::from_raw(pointer.as_ptr()) });
//! }
//!
//! let cat = unsafe {
//!     Owned::from_raw_with(NonNull::from(Box::leak(Box::new(Cat))), release_cat as fn(NonNull<Cat>))
//! };
//! let animal: Owned<dyn Animal, DefaultDelete> = cat.convert();
//! ```
//!
//! The [`uninit`] module contains the construction and destruction algorithms that the owners are
//! built on, for use with storage that doesn't hold live values.
//!
//! # Features
//!
//! One implementation can be enabled at a time:
//! - `backport` (default): allocation and release are performed against the global allocator
//!   with explicit layouts.
//! - `host`: allocation and release are delegated to `Box` and `Vec`.
//!
//! The behaviour of every operation is the same with either feature.

#![warn(missing_docs)]

#[cfg(all(feature = "backport", feature = "host"))]
compile_error!("A single implementation feature can be enabled at a time");

#[cfg(not(any(feature = "backport", feature = "host")))]
compile_error!("Either the 'backport' or the 'host' feature must be enabled");

mod address;
mod capability;
mod compare;
mod create;
mod deleter;
mod error;
mod owned;
mod owned_slice;
mod raw_impl;
pub mod uninit;

pub use crate::{
    address::Address,
    capability::{Construct, ElementCast, Upcast, is_stateless},
    compare::{Null, swap, swap_slices},
    create::{
        create, create_slice, create_slice_with, try_create, try_create_slice,
        try_create_slice_with,
    },
    deleter::{DefaultDelete, Deleter, DeleterSlot, FnDelete},
    error::{Error, Result},
    owned::Owned,
    owned_slice::OwnedSlice,
};
