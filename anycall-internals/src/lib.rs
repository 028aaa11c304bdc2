#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`anycall`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased data structures and unsafe
//! operations that power the [`anycall`] callable-wrapper library. It
//! provides the foundation for zero-cost type erasure through vtable-based
//! dispatch.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`anycall`] crate, not
//! this one.
//!
//! # Architecture
//!
//! The crate is organized around one type hierarchy for erased callables plus
//! the capability trait they are invoked through:
//!
//! - **[`callable`]**: Type-erased callable storage
//!   - [`RawCallable`]: Owned callable with [`Box`]-based allocation
//!   - [`RawCallableRef`]: Borrowed shared reference to a callable
//!   - [`RawCallableMut`]: Borrowed exclusive reference, used for invocation
//!   - [`CallableData`]: `#[repr(C)]` wrapper enabling field access on erased
//!     types
//!   - [`CallableVtable`]: Function pointers for type-erased dispatch
//!
//! - **[`invoke`]**: The invocation capability
//!   - [`Callable`]: One operation, `invoke(Args) -> Output`, implemented by
//!     every ordinary Rust callable via blanket impls
//!
//! A call signature is a pair of an argument tuple type `Args` and a result
//! type `R`. Only the concrete callable type `F` is ever erased; the
//! signature types stay in every pointer type, so a handle can always be
//! invoked without runtime signature checks.
//!
//! # Safety Strategy
//!
//! Type erasure requires careful handling to maintain Rust's type safety
//! guarantees. When we erase a type like `CallableData<Args, R, MyClosure>`
//! to `CallableData<Args, R, Erased>`, we must ensure that the vtable
//! function pointers still match the actual concrete type stored in memory.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: Safety-critical types keep fields
//!   module-private, making invariants locally verifiable within a single
//!   file
//! - **`#[repr(C)]` layout**: Enables safe field projection on type-erased
//!   pointers without constructing invalid references
//! - **Documented vtable contracts**: Each vtable method specifies exactly
//!   when it can be safely called
//!
//! See the individual module documentation for detailed explanations of how
//! these patterns are applied.
//!
//! [`anycall`]: https://docs.rs/anycall/latest/anycall/
//! [`CallableData`]: callable::data::CallableData
//! [`CallableVtable`]: callable::vtable::CallableVtable
//! [`Callable`]: invoke::Callable
//! [`Box`]: alloc::boxed::Box

extern crate alloc;

mod callable;
pub mod invoke;
mod util;

pub use callable::{RawCallable, RawCallableMut, RawCallableRef};
