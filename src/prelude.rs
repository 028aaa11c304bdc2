//! Commonly used items for convenient importing.
//!
//! The prelude re-exports the types needed in almost any use of the crate:
//! the [`Function`] wrapper itself and the [`Callable`] trait bound that
//! appears when writing code generic over callables.
//!
//! # Usage
//!
//! ```
//! use anycall::prelude::*;
//!
//! fn make_counter(start: i32) -> Function<(), i32> {
//!     let mut current = start;
//!     Function::new(move || {
//!         current += 1;
//!         current
//!     })
//! }
//!
//! let mut counter = make_counter(10);
//! assert_eq!(counter.call(()), 11);
//! assert_eq!(counter.call(()), 12);
//! ```

pub use crate::{Callable, Function};
