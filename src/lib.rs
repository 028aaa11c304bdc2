#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! A type-erased callable wrapper with explicit signature types.
//!
//! ## Overview
//!
//! This crate provides [`Function`], a value type that can hold *any*
//! callable matching one fixed call signature — a closure, a `fn` item, a
//! function pointer, or a hand-written invocable — and invoke it later
//! through a uniform interface. The type of the holder depends only on the
//! signature, never on the concrete callable, so heterogeneous callables can
//! be stored in the same slot, passed across module boundaries, and swapped
//! at runtime.
//!
//! ## Quick Example
//!
//! ```
//! use anycall::Function;
//!
//! fn add(x: i32, y: i32) -> i32 {
//!     x + y
//! }
//!
//! // One wrapper type holds a named function...
//! let mut f: Function<(i32, i32), i32> = Function::new(add);
//! assert_eq!(f.call((1, 2)), 3);
//!
//! // ...and later a closure with captured state, through the same interface.
//! let offset = 100;
//! f.assign(move |x, y| x + y + offset);
//! assert_eq!(f.call((1, 2)), 103);
//! ```
//!
//! ## Core Concepts
//!
//! **Signatures are types.** A call signature is a pair of an argument tuple
//! type and a result type: `Function<(i32, i32), i32>` holds callables taking
//! two `i32`s and returning one, `Function<()>` holds callables taking
//! nothing and returning nothing (the result type defaults to `()`).
//! Arguments are always passed as one tuple: `f.call((1, 2))`.
//!
//! **A wrapper is empty or holding.** A [`Function`] owns at most one
//! callable. It starts empty ([`Function::empty`]) or holding
//! ([`Function::new`]); [`Function::assign`] installs a callable, destroying
//! any previous one. Invoking an empty wrapper is a programmer error and
//! panics — it never silently returns a default value.
//!
//! **Ownership is exclusive.** The held callable is captured by value, owned
//! by exactly one wrapper, destroyed exactly once when replaced or when the
//! wrapper is dropped. The wrapper is a single-owner value type: it is
//! neither `Send` nor `Sync`, and it does not implement `Clone`.
//!
//! **The wrapper is transparent.** Invocation forwards the argument tuple
//! and returns the callable's result unchanged. Failures the callable itself
//! produces — a returned `Err`, a panic — propagate to the caller untouched:
//!
//! ```
//! use anycall::Function;
//!
//! let mut checked_div: Function<(u32, u32), Option<u32>> =
//!     Function::new(|a: u32, b: u32| a.checked_div(b));
//!
//! assert_eq!(checked_div.call((10, 2)), Some(5));
//! assert_eq!(checked_div.call((10, 0)), None);
//! ```
//!
//! ## The Callable Trait
//!
//! Values are stored through the [`Callable`] trait: one operation,
//! `invoke(Args) -> Output`. Blanket implementations cover every [`FnMut`]
//! callable of arity 0 through 12, which is why ordinary closures and
//! functions work without any adaptation. Implementing [`Callable`] by hand
//! is only needed for invocable types that are not closures, and allows
//! their state to be inspected later via [`Function::downcast_ref`].
//!
//! ## Implementation
//!
//! Type erasure is implemented in the [`anycall-internals`] crate: each
//! stored callable is boxed together with a per-type vtable whose function
//! pointers invoke, identify, and drop it after its type has been erased.
//! That crate is an implementation detail with no stability guarantees;
//! depend on this one.
//!
//! [`anycall-internals`]: anycall_internals
//!
//! ## `no_std` Support
//!
//! The crate is `no_std` (with `alloc` for the erased allocation) and has no
//! required dependencies beyond its own internals crate.

extern crate alloc;

pub mod function;
pub mod prelude;

pub use anycall_internals::invoke::Callable;
pub use function::Function;
