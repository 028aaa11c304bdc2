//! This module encapsulates the fields of the [`CallableData`]. Since this is
//! the only place they are visible, this means that the type of the
//! [`CallableVtable`] is guaranteed to always be in sync with the type of the
//! actual callable. This follows from the fact that they are in sync when
//! created and that the API offers no way to change the [`CallableVtable`] or
//! callable type after creation.

use crate::{
    callable::{
        raw::{RawCallableMut, RawCallableRef},
        vtable::CallableVtable,
    },
    invoke::Callable,
};

/// Type-erased callable data structure with vtable-based dispatch.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased
/// contexts, allowing access to the vtable field even when the concrete
/// callable type `F` is unknown. The signature types `Args` and `R` are never
/// erased, so the vtable reference keeps its full type.
#[repr(C)]
pub(super) struct CallableData<Args: 'static, R: 'static, F: 'static> {
    /// The vtable of this callable
    vtable: &'static CallableVtable<Args, R>,
    /// The actual stored callable
    callable: F,
}

impl<Args: 'static, R: 'static, F: 'static> CallableData<Args, R, F> {
    /// Creates a new [`CallableData`] capturing the given callable by value.
    ///
    /// This method creates the vtable for type-erased dispatch and pairs it
    /// with the captured callable.
    #[inline]
    pub(super) fn new(callable: F) -> Self
    where
        F: Callable<Args, Output = R>,
    {
        Self {
            vtable: CallableVtable::new::<F>(),
            callable,
        }
    }
}

impl<'a, Args: 'static, R: 'static> RawCallableRef<'a, Args, R> {
    /// Returns a reference to the [`CallableVtable`] of the [`CallableData`]
    /// instance.
    #[inline]
    pub(super) fn vtable(self) -> &'static CallableVtable<Args, R> {
        let ptr = self.as_ptr();
        // SAFETY: We don't know the actual inner callable type, but we do
        // know that it points to an instance of `CallableData<Args, R, F>`
        // for some specific `F`. Since `CallableData` is `#[repr(C)]`, that
        // means that it's safe to create pointers to the fields before the
        // actual callable.
        //
        // We need to take care to avoid creating an actual reference to the
        // `CallableData` itself though, as that would still be undefined
        // behavior since we don't have the right type.
        let vtable_ptr: *const &'static CallableVtable<Args, R> =
            unsafe { &raw const (*ptr).vtable };

        // SAFETY: Dereferencing the pointer and getting out the `&'static
        // CallableVtable` is valid for the same reasons
        unsafe { *vtable_ptr }
    }

    /// Accesses the inner callable of the [`CallableData`] instance as a
    /// reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `F` matches the actual callable
    /// type stored in the [`CallableData`].
    #[inline]
    pub unsafe fn callable_downcast_unchecked<F: 'static>(self) -> &'a F {
        // SAFETY: The inner function requires that `F` matches the type
        // stored, but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<F>() };
        &this.callable
    }
}

impl<'a, Args: 'static, R: 'static> RawCallableMut<'a, Args, R> {
    /// Accesses the inner callable of the [`CallableData`] instance as a
    /// mutable reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `F` matches the actual callable
    /// type stored in the [`CallableData`].
    #[inline]
    pub unsafe fn callable_downcast_mut_unchecked<F: 'static>(self) -> &'a mut F {
        // SAFETY: The inner function requires that `F` matches the type
        // stored, but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<F>() };
        &mut this.callable
    }
}
