//! Module containing the main callable data structures

mod data;
mod raw;
mod vtable;

pub use self::raw::{RawCallable, RawCallableMut, RawCallableRef};
