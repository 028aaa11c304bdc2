//! Vtable for type-erased callable operations.
//!
//! This module contains the [`CallableVtable`] which enables invoking and
//! dropping a stored callable after its concrete type `F` has been erased.
//! The vtable stores function pointers that dispatch to the correct typed
//! implementations.
//!
//! This module encapsulates the fields of [`CallableVtable`] so they cannot
//! be accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's callable type must match the actual callable
//! stored in the [`CallableData`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`CallableVtable::new`], which pairs the function pointers
//! with a specific callable type `F` at compile time.

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{
    callable::{data::CallableData, raw::RawCallableMut},
    invoke::Callable,
    util::Erased,
};

/// Vtable for type-erased callable operations.
///
/// Contains function pointers for invoking and destroying a stored callable
/// without knowing its concrete type at compile time. The signature types
/// `Args` and `R` are *not* erased: a vtable only ever dispatches for
/// callables of the one signature it was instantiated with.
///
/// # Safety Invariant
///
/// The fields `call` and `drop` are guaranteed to point to the functions
/// defined below instantiated with the callable type `F` that was used to
/// create this [`CallableVtable`].
pub(crate) struct CallableVtable<Args: 'static, R: 'static> {
    /// Gets the [`TypeId`] of the callable type that was used to create this
    /// [`CallableVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the callable type that was used
    /// to create this [`CallableVtable`].
    type_name: fn() -> &'static str,
    /// Invokes the stored callable with an argument tuple.
    call: unsafe fn(RawCallableMut<'_, Args, R>, Args) -> R,
    /// Drops the [`Box<CallableData<Args, R, F>>`] instance pointed to by
    /// this pointer.
    drop: unsafe fn(NonNull<CallableData<Args, R, Erased>>),
}

impl<Args: 'static, R: 'static> CallableVtable<Args, R> {
    /// Creates a new [`CallableVtable`] for the callable type `F`.
    pub(super) const fn new<F: Callable<Args, Output = R>>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<F>,
                type_name: core::any::type_name::<F>,
                call: call::<Args, R, F>,
                drop: drop::<Args, R, F>,
            }
        }
    }

    /// Gets the [`TypeId`] of the callable type that was used to create this
    /// [`CallableVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the callable type that was used
    /// to create this [`CallableVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Invokes the stored callable using the [`Callable::invoke`]
    /// implementation of the type used when creating this [`CallableVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CallableVtable`] must be a vtable for the callable type
    ///    stored in the [`RawCallableMut`].
    #[inline]
    pub(super) unsafe fn call(&self, ptr: RawCallableMut<'_, Args, R>, args: Args) -> R {
        // SAFETY: We know that the `self.call` field points to the function
        // `call::<Args, R, F>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.call)(ptr, args) }
    }

    /// Drops the `Box<CallableData<Args, R, F>>` instance pointed to by this
    /// pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from [`Box<CallableData<Args, R, F>>`] via
    ///    [`Box::into_raw`]
    /// 2. This [`CallableVtable`] must be a vtable for the callable type
    ///    stored in the [`CallableData`].
    /// 3. This method drops the [`Box<CallableData<Args, R, F>>`], so the
    ///    caller must ensure that the pointer has not previously been
    ///    dropped, that it is able to transfer ownership of the pointer, and
    ///    that it will not use the pointer after calling this method.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<CallableData<Args, R, Erased>>) {
        // SAFETY: We know that `self.drop` points to the function
        // `drop::<Args, R, F>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }
}

/// Invokes the stored callable through its [`Callable::invoke`]
/// implementation, forwarding the argument tuple and returning the result
/// unchanged.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `F` matches the actual callable type stored in the
///    [`CallableData`]
unsafe fn call<Args: 'static, R: 'static, F: Callable<Args, Output = R>>(
    ptr: RawCallableMut<'_, Args, R>,
    args: Args,
) -> R {
    // SAFETY:
    // 1. Guaranteed by the caller
    let callable: &mut F = unsafe { ptr.callable_downcast_mut_unchecked::<F>() };
    callable.invoke(args)
}

/// Drops the [`Box<CallableData<Args, R, F>>`] instance pointed to by this
/// pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`Box<CallableData<Args, R, F>>`] via
///    [`Box::into_raw`]
/// 2. The callable type `F` matches the actual callable type stored in the
///    [`CallableData`]
/// 3. This method drops the [`Box<CallableData<Args, R, F>>`], so the caller
///    must ensure that the pointer has not previously been dropped, that it
///    is able to transfer ownership of the pointer, and that it will not use
///    the pointer after calling this method.
unsafe fn drop<Args: 'static, R: 'static, F: 'static>(ptr: NonNull<CallableData<Args, R, Erased>>) {
    let ptr: NonNull<CallableData<Args, R, F>> = ptr.cast();
    let ptr = ptr.as_ptr();
    // SAFETY: Our pointer has the correct type as guaranteed by the caller,
    // and it came from a call to `Box::into_raw` as also guaranteed by our
    // caller.
    let boxed = unsafe { Box::from_raw(ptr) };
    core::mem::drop(boxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_vtable_eq() {
        // Vtables for the same signature and callable type must be the exact
        // same static instance
        let vtable1 = CallableVtable::<(i32, i32), i32>::new::<fn(i32, i32) -> i32>();
        let vtable2 = CallableVtable::<(i32, i32), i32>::new::<fn(i32, i32) -> i32>();

        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_callable_vtables_distinct_per_type() {
        struct Fixed;
        impl Callable<(i32, i32)> for Fixed {
            type Output = i32;

            fn invoke(&mut self, _args: (i32, i32)) -> i32 {
                0
            }
        }

        let fn_ptr_vtable = CallableVtable::<(i32, i32), i32>::new::<fn(i32, i32) -> i32>();
        let struct_vtable = CallableVtable::<(i32, i32), i32>::new::<Fixed>();

        assert!(!core::ptr::eq(fn_ptr_vtable, struct_vtable));
    }

    #[test]
    fn test_callable_type_id() {
        let vtable = CallableVtable::<(), ()>::new::<fn()>();
        assert_eq!(vtable.type_id(), TypeId::of::<fn()>());
    }
}
