//! Type-erased callable pointer types.
//!
//! This module encapsulates the `ptr` field of [`RawCallable`],
//! [`RawCallableRef`], and [`RawCallableMut`], ensuring it is only visible
//! within this module. This visibility restriction guarantees the safety
//! invariant: **the pointer always comes from `Box<CallableData<Args, R,
//! F>>`**.
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawCallable::new`] (which
//! creates it from `Box::into_raw`), and cannot be modified afterward (no
//! `pub` or `pub(crate)` fields), the pointer provenance remains valid
//! throughout the value's lifetime.
//!
//! The [`RawCallable::drop`] implementation relies on this invariant to
//! safely reconstruct the `Box` and deallocate the memory.
//!
//! # Type Erasure
//!
//! The concrete type parameter `F` is erased by casting to
//! `CallableData<Args, R, Erased>`. The vtable stored within the
//! `CallableData` provides the runtime type information needed to invoke the
//! callable, drop it, and safely downcast it. The signature types `Args` and
//! `R` stay in the pointer type: erasure hides *which* callable is stored,
//! never *what signature* it can be invoked with.
//!
//! # Allocation Strategy
//!
//! A `RawCallable` exclusively owns its allocation. There is no reference
//! counting and no sharing: replacing or dropping the handle destroys the
//! stored callable exactly once.

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{callable::data::CallableData, invoke::Callable, util::Erased};

/// A pointer to a [`CallableData`] that is guaranteed to point to an
/// initialized instance of a [`CallableData<Args, R, F>`] for some specific
/// `F`, though we do not know which actual `F` it is.
///
/// However, the pointer is allowed to transition into a non-initialized state
/// inside the [`RawCallable::drop`] method.
///
/// The pointer is guaranteed to have been created using [`Box::into_raw`].
///
/// We cannot use a [`Box<CallableData<Args, R, F>>`] directly, because that
/// does not allow us to type-erase the `F`.
#[repr(transparent)]
pub struct RawCallable<Args: 'static, R: 'static> {
    /// Pointer to the inner callable data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<CallableData<Args,
    ///    R, F>>` for some `F` using `Box::into_raw`.
    /// 2. The pointer will point to the same `CallableData<Args, R, F>` for
    ///    the entire lifetime of this object.
    /// 3. The pointee is properly initialized for the entire lifetime of this
    ///    object, except during the execution of the `Drop` implementation.
    /// 4. This object has exclusive access to the pointee; no other live
    ///    pointer to it exists outside of borrows handed out by this object.
    ptr: NonNull<CallableData<Args, R, Erased>>,
}

impl<Args: 'static, R: 'static> RawCallable<Args, R> {
    /// Creates a new [`RawCallable`] capturing the specified callable.
    ///
    /// The callable is moved into a fresh heap allocation together with the
    /// vtable for its concrete type, and the concrete type is erased.
    #[inline]
    pub fn new<F>(callable: F) -> Self
    where
        F: Callable<Args, Output = R>,
    {
        let ptr = Box::new(CallableData::<Args, R, F>::new(callable));
        let ptr: *mut CallableData<Args, R, F> = Box::into_raw(ptr);
        let ptr: *mut CallableData<Args, R, Erased> = ptr.cast::<CallableData<Args, R, Erased>>();

        // SAFETY: `Box::into_raw` returns a non-null pointer
        let ptr: NonNull<CallableData<Args, R, Erased>> = unsafe { NonNull::new_unchecked(ptr) };

        Self { ptr }
    }

    /// Returns a shared reference to the [`CallableData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawCallableRef<'_, Args, R> {
        RawCallableRef {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns an exclusive reference to the [`CallableData`] instance.
    ///
    /// This is safe because a `RawCallable` exclusively owns its allocation
    /// (invariant 4 on the `ptr` field), so holding `&mut self` proves no
    /// other access to the pointee can exist.
    #[inline]
    pub fn as_mut(&mut self) -> RawCallableMut<'_, Args, R> {
        RawCallableMut {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<Args: 'static, R: 'static> core::ops::Drop for RawCallable<Args, R> {
    #[inline]
    fn drop(&mut self) {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The pointer comes from `Box::into_raw` (guaranteed by
        //    `RawCallable::new`)
        // 2. The vtable returned by `self.as_ref().vtable()` is guaranteed to
        //    match the callable in the `CallableData`.
        // 3. The pointer is initialized and has not previously been freed as
        //    guaranteed by the invariants on this type. We are correctly
        //    transferring ownership here and the pointer is not used
        //    afterwards, as we are in the drop function.
        unsafe {
            vtable.drop(self.ptr);
        }
    }
}

/// A lifetime-bound pointer to a [`CallableData`] that is guaranteed to point
/// to an initialized instance of a [`CallableData<Args, R, F>`] for some
/// specific `F`, though we do not know which actual `F` it is.
///
/// We cannot use a [`&'a CallableData<Args, R, F>`] directly, because that
/// would require us to know the actual type of the callable, which we do not.
///
/// [`&'a CallableData<Args, R, F>`]: CallableData
#[repr(transparent)]
pub struct RawCallableRef<'a, Args: 'static, R: 'static> {
    /// Pointer to the inner callable data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<CallableData<Args,
    ///    R, F>>` for some `F` using `Box::into_raw`.
    /// 2. The pointer will point to the same `CallableData<Args, R, F>` for
    ///    the entire lifetime of this object.
    ptr: NonNull<CallableData<Args, R, Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a CallableData<Args, R, Erased>`
    _marker: core::marker::PhantomData<&'a CallableData<Args, R, Erased>>,
}

impl<Args: 'static, R: 'static> Clone for RawCallableRef<'_, Args, R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args: 'static, R: 'static> Copy for RawCallableRef<'_, Args, R> {}

impl<'a, Args: 'static, R: 'static> RawCallableRef<'a, Args, R> {
    /// Casts the [`RawCallableRef`] to a [`CallableData<Args, R, F>`]
    /// reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `F` matches the actual callable type stored in the
    ///    [`CallableData`].
    #[inline]
    pub(super) unsafe fn cast_inner<F: 'static>(self) -> &'a CallableData<Args, R, F> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.vtable().type_id(), TypeId::of::<F>());

        let this = self.ptr.cast::<CallableData<Args, R, F>>();
        // SAFETY: Converting the NonNull pointer to a reference is sound
        // because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawCallableRef's type invariants)
        // - The pointee is properly initialized (RawCallableRef's doc comment
        //   guarantees it points to an initialized CallableData<Args, R, F>
        //   for some F)
        // - The type `F` matches the actual callable type (guaranteed by
        //   caller)
        // - Shared access is allowed
        // - The reference lifetime 'a is valid (tied to RawCallableRef<'a>'s
        //   lifetime)
        unsafe { this.as_ref() }
    }

    /// Returns a [`NonNull`] pointer to the [`CallableData`] instance.
    #[inline]
    pub(super) fn as_ptr(self) -> *const CallableData<Args, R, Erased> {
        self.ptr.as_ptr()
    }

    /// Returns the [`TypeId`] of the stored callable.
    #[inline]
    pub fn callable_type_id(self) -> TypeId {
        self.vtable().type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored callable.
    #[inline]
    pub fn callable_type_name(self) -> &'static str {
        self.vtable().type_name()
    }
}

/// A lifetime-bound pointer to a [`CallableData`] with exclusive access, which
/// is guaranteed to point to an initialized instance of a
/// [`CallableData<Args, R, F>`] for some specific `F`, though we do not know
/// which actual `F` it is.
///
/// We cannot use a [`&'a mut CallableData<Args, R, F>`] directly, because that
/// would require us to know the actual type of the callable, which we do not.
///
/// [`&'a mut CallableData<Args, R, F>`]: CallableData
#[repr(transparent)]
pub struct RawCallableMut<'a, Args: 'static, R: 'static> {
    /// Pointer to the inner callable data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<CallableData<Args,
    ///    R, F>>` for some `F` using `Box::into_raw`.
    /// 2. The pointer will point to the same `CallableData<Args, R, F>` for
    ///    the entire lifetime of this object.
    /// 3. This pointer is valid for exclusive mutable access to the
    ///    `CallableData` with the same semantics as a `&'a mut
    ///    CallableData<Args, R, F>`.
    ptr: NonNull<CallableData<Args, R, Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a mut CallableData<Args, R, Erased>`
    _marker: core::marker::PhantomData<&'a mut CallableData<Args, R, Erased>>,
}

impl<'a, Args: 'static, R: 'static> RawCallableMut<'a, Args, R> {
    /// Reborrows the [`RawCallableMut`] as a shared [`RawCallableRef`].
    #[inline]
    pub fn as_ref(&self) -> RawCallableRef<'_, Args, R> {
        RawCallableRef {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }

    /// Casts the [`RawCallableMut`] to a mutable [`CallableData<Args, R, F>`]
    /// reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `F` matches the actual callable type stored in the
    ///    [`CallableData`].
    #[inline]
    pub(super) unsafe fn cast_inner<F: 'static>(self) -> &'a mut CallableData<Args, R, F> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.as_ref().vtable().type_id(), TypeId::of::<F>());

        let mut this = self.ptr.cast::<CallableData<Args, R, F>>();
        // SAFETY: Converting the NonNull pointer to a mutable reference is
        // sound because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawCallableMut's type invariants)
        // - The pointee is properly initialized (RawCallableMut's doc comment
        //   guarantees it points to an initialized CallableData<Args, R, F>
        //   for some F)
        // - The type `F` matches the actual callable type (guaranteed by
        //   caller)
        // - Exclusive access is guaranteed by invariant 3 on the `ptr` field,
        //   and `self` is consumed so no second exclusive borrow can be
        //   created from it
        // - The reference lifetime 'a is valid (tied to RawCallableMut<'a>'s
        //   lifetime)
        unsafe { this.as_mut() }
    }

    /// Invokes the stored callable with the given argument tuple, returning
    /// its result unchanged.
    ///
    /// The callable is invoked through the vtable created for its concrete
    /// type, so this works without knowing which type is stored. Consumes the
    /// exclusive borrow for the duration of the call; obtain a fresh one from
    /// [`RawCallable::as_mut`] to invoke again.
    #[inline]
    pub fn call(self, args: Args) -> R {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The vtable returned by `self.as_ref().vtable()` is guaranteed to
        //    match the callable in the `CallableData`.
        unsafe { vtable.call(self, args) }
    }
}
