//! The user-facing callable wrapper type.
//!
//! [`Function`] is a value type that can hold any callable matching one fixed
//! call signature and invoke it later through a uniform interface. See the
//! [crate-level documentation](crate) for an overview of the signature model.

use core::any::TypeId;

use anycall_internals::{RawCallable, invoke::Callable};

/// A type-erased owner of a single callable with the signature
/// `Args -> R`.
///
/// A `Function` is parameterized by a call signature: an argument tuple type
/// `Args` and a result type `R` (defaulting to `()`). It holds at most one
/// callable of that signature — any closure, `fn` item, function pointer, or
/// other [`Callable`] implementor — without its own type depending on which
/// concrete callable is stored.
///
/// # States
///
/// A `Function` is either *empty* (holds nothing) or *holding* (owns exactly
/// one erased callable). It is created empty by [`empty`](Function::empty) or
/// [`default`](Function::default), created holding by
/// [`new`](Function::new), and moves between states only through
/// [`assign`](Function::assign), which replaces (and destroys) any previously
/// held callable. There is no operation that clears a holding `Function`
/// back to empty; dropping it releases the held callable.
///
/// # Invocation
///
/// [`call`](Function::call) forwards the argument tuple to the held callable
/// and returns its result unchanged. Calling an empty `Function` is a
/// precondition violation and panics; it never silently returns a default
/// value. Failures produced by the callable itself (a returned `Err`, a
/// panic) propagate to the caller untouched.
///
/// # Ownership
///
/// The wrapper exclusively owns its callable: assigning moves the callable
/// into a fresh heap allocation, replacing destroys the previous one, and
/// dropping the `Function` destroys the stored callable exactly once. A
/// `Function` is a single-owner value type and is neither [`Send`] nor
/// [`Sync`]; sharing across threads is out of its scope.
///
/// # Examples
///
/// ```
/// use anycall::Function;
///
/// fn add(x: i32, y: i32) -> i32 {
///     x + y
/// }
///
/// let mut f: Function<(i32, i32), i32> = Function::new(add);
/// assert_eq!(f.call((1, 2)), 3);
///
/// // Replace the held callable with a closure of the same signature
/// f.assign(|x, y| x * y);
/// assert_eq!(f.call((3, 4)), 12);
/// ```
pub struct Function<Args: 'static, R: 'static = ()> {
    /// The ownership slot: `None` when empty, the erased callable otherwise.
    held: Option<RawCallable<Args, R>>,
}

impl<Args: 'static, R: 'static> Function<Args, R> {
    /// Creates an empty `Function`.
    ///
    /// The returned wrapper holds no callable; [`call`](Function::call) on it
    /// panics until a callable is installed with [`assign`](Function::assign).
    ///
    /// # Examples
    ///
    /// ```
    /// use anycall::Function;
    ///
    /// let f: Function<(), i32> = Function::empty();
    /// assert!(f.is_empty());
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Function { held: None }
    }

    /// Creates a `Function` holding the given callable.
    ///
    /// The callable is captured by value: ownership moves into the wrapper.
    /// To keep using the original, clone it before passing it in.
    ///
    /// # Examples
    ///
    /// ```
    /// use anycall::Function;
    ///
    /// let mut double: Function<(i32,), i32> = Function::new(|x| x * 2);
    /// assert_eq!(double.call((21,)), 42);
    /// ```
    #[must_use]
    pub fn new<F>(callable: F) -> Self
    where
        F: Callable<Args, Output = R>,
    {
        Function {
            held: Some(RawCallable::new(callable)),
        }
    }

    /// Installs a callable, replacing any previously held one.
    ///
    /// The new callable is captured into a fresh allocation before the slot
    /// is overwritten; the previous callable (if any) is destroyed when the
    /// slot is replaced, before this method returns, and is never invoked
    /// again.
    ///
    /// # Examples
    ///
    /// ```
    /// use anycall::Function;
    ///
    /// let mut f: Function<(), &'static str> = Function::empty();
    /// f.assign(|| "first");
    /// assert_eq!(f.call(()), "first");
    ///
    /// f.assign(|| "second");
    /// assert_eq!(f.call(()), "second");
    /// ```
    pub fn assign<F>(&mut self, callable: F)
    where
        F: Callable<Args, Output = R>,
    {
        self.held = Some(RawCallable::new(callable));
    }

    /// Invokes the held callable with the given argument tuple, returning its
    /// result unchanged.
    ///
    /// Arguments are forwarded by value. The wrapper adds no behavior of its
    /// own: no retry, no default result, no interception of failures raised
    /// by the callable.
    ///
    /// # Panics
    ///
    /// Panics if the `Function` is empty. This is a programmer error, not a
    /// recoverable condition; check [`is_empty`](Function::is_empty) first if
    /// the state is not known.
    ///
    /// # Examples
    ///
    /// ```
    /// use anycall::Function;
    ///
    /// let mut len: Function<(&'static str,), usize> = Function::new(|s: &str| s.len());
    /// assert_eq!(len.call(("four",)), 4);
    /// ```
    ///
    /// Calling an empty `Function` panics:
    ///
    /// ```should_panic
    /// use anycall::Function;
    ///
    /// let mut f: Function<(), ()> = Function::empty();
    /// f.call(());
    /// ```
    pub fn call(&mut self, args: Args) -> R {
        match self.held.as_mut() {
            Some(held) => held.as_mut().call(args),
            None => panic!(
                "called an empty Function<{}, {}>",
                core::any::type_name::<Args>(),
                core::any::type_name::<R>(),
            ),
        }
    }

    /// Returns `true` if no callable is currently held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Returns the [`TypeId`] of the held callable, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::any::TypeId;
    ///
    /// use anycall::Function;
    ///
    /// let f: Function<(i32,), i32> = Function::new::<fn(i32) -> i32>(|x| x + 1);
    /// assert_eq!(f.callable_type_id(), Some(TypeId::of::<fn(i32) -> i32>()));
    /// ```
    #[must_use]
    pub fn callable_type_id(&self) -> Option<TypeId> {
        Some(self.held.as_ref()?.as_ref().callable_type_id())
    }

    /// Returns the [`core::any::type_name`] of the held callable, or `None`
    /// if empty.
    ///
    /// Like all `type_name` output this is best-effort and intended for
    /// diagnostics, not for identity checks; use
    /// [`callable_type_id`](Function::callable_type_id) for those.
    #[must_use]
    pub fn callable_type_name(&self) -> Option<&'static str> {
        Some(self.held.as_ref()?.as_ref().callable_type_name())
    }

    /// Returns a shared reference to the held callable if it has type `F`.
    ///
    /// Returns `None` if the `Function` is empty or the held callable is of a
    /// different type.
    ///
    /// # Examples
    ///
    /// ```
    /// use anycall::Function;
    ///
    /// let f: Function<(i32,), i32> = Function::new::<fn(i32) -> i32>(|x| x + 1);
    ///
    /// assert!(f.downcast_ref::<fn(i32) -> i32>().is_some());
    /// assert!(f.downcast_ref::<fn(i32) -> u8>().is_none());
    /// ```
    #[must_use]
    pub fn downcast_ref<F: 'static>(&self) -> Option<&F> {
        let raw = self.held.as_ref()?.as_ref();
        if raw.callable_type_id() == TypeId::of::<F>() {
            // SAFETY: We have just checked that the stored callable has
            // type `F`.
            Some(unsafe { raw.callable_downcast_unchecked::<F>() })
        } else {
            None
        }
    }

    /// Returns an exclusive reference to the held callable if it has type
    /// `F`.
    ///
    /// Returns `None` if the `Function` is empty or the held callable is of a
    /// different type. This allows mutating the callable's captured state
    /// without invoking it.
    #[must_use]
    pub fn downcast_mut<F: 'static>(&mut self) -> Option<&mut F> {
        let raw = self.held.as_mut()?.as_mut();
        if raw.as_ref().callable_type_id() == TypeId::of::<F>() {
            // SAFETY: We have just checked that the stored callable has
            // type `F`.
            Some(unsafe { raw.callable_downcast_mut_unchecked::<F>() })
        } else {
            None
        }
    }
}

impl<Args: 'static, R: 'static> Default for Function<Args, R> {
    /// Creates an empty `Function`, equivalent to [`Function::empty`].
    fn default() -> Self {
        Self::empty()
    }
}

impl<Args: 'static, R: 'static> core::fmt::Debug for Function<Args, R> {
    /// Formats the wrapper state and the held callable's type name.
    ///
    /// The stored callable value itself is never formatted, so it does not
    /// need to implement [`Debug`](core::fmt::Debug).
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.held {
            Some(held) => f
                .debug_tuple("Function")
                .field(&held.as_ref().callable_type_name())
                .finish(),
            None => f.write_str("Function(<empty>)"),
        }
    }
}
