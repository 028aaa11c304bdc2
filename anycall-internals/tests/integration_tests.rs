//! Integration tests for the anycall-internals crate.
//!
//! This suite exercises the raw, type-erased layer end to end through its
//! public API:
//!
//! - Creation and invocation for every common callable shape (`fn` items,
//!   function pointers, capturing and non-capturing closures, hand-written
//!   [`Callable`] implementors) across several signatures and arities
//! - Exact forwarding of arguments and results, including `Result` values
//!   produced by the stored callable
//! - Mutable captured state persisting across invocations
//! - Type identification and checked downcasting of the erased callable
//! - Memory management: the stored callable is destroyed exactly once, never
//!   while the handle is live, and owned captures are released on drop

use std::{any::TypeId, cell::Cell, rc::Rc};

use anycall_internals::{RawCallable, invoke::Callable};

fn add(x: i32, y: i32) -> i32 {
    x + y
}

fn concat(prefix: &'static str, n: u32) -> String {
    format!("{prefix}{n}")
}

/// Counts how many times its captured cell has been dropped.
struct DropTracker(Rc<Cell<usize>>);

impl Drop for DropTracker {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn test_fn_item_invocation() {
    let mut raw: RawCallable<(i32, i32), i32> = RawCallable::new(add);

    assert_eq!(raw.as_mut().call((1, 2)), 3);
    assert_eq!(raw.as_mut().call((-5, 5)), 0);
}

#[test]
fn test_fn_pointer_invocation() {
    let f: fn(&'static str, u32) -> String = concat;
    let mut raw: RawCallable<(&'static str, u32), String> = RawCallable::new(f);

    assert_eq!(raw.as_mut().call(("item-", 7)), "item-7");
}

#[test]
fn test_zero_arity_closure() {
    let mut raw: RawCallable<(), i32> = RawCallable::new(|| 42);

    assert_eq!(raw.as_mut().call(()), 42);
}

#[test]
fn test_higher_arity_closure() {
    let mut raw: RawCallable<(i32, i32, i32, i32), i32> =
        RawCallable::new(|a: i32, b: i32, c: i32, d: i32| a + b + c + d);

    assert_eq!(raw.as_mut().call((1, 2, 3, 4)), 10);
}

#[test]
fn test_unit_returning_callable() {
    let hits = Rc::new(Cell::new(0_u32));
    let recorder = Rc::clone(&hits);
    let mut raw: RawCallable<(u32,), ()> = RawCallable::new(move |n: u32| {
        recorder.set(recorder.get() + n);
    });

    raw.as_mut().call((3,));
    raw.as_mut().call((4,));
    assert_eq!(hits.get(), 7);
}

#[test]
fn test_manual_callable_implementor() {
    struct Accumulator {
        total: i64,
    }

    impl Callable<(i64,)> for Accumulator {
        type Output = i64;

        fn invoke(&mut self, (amount,): (i64,)) -> i64 {
            self.total += amount;
            self.total
        }
    }

    let mut raw: RawCallable<(i64,), i64> = RawCallable::new(Accumulator { total: 100 });

    assert_eq!(raw.as_mut().call((1,)), 101);
    assert_eq!(raw.as_mut().call((-2,)), 99);
}

#[test]
fn test_captured_by_value_state_is_independent() {
    let x = 5;
    let y = 10;
    let mut raw: RawCallable<(), i32> = RawCallable::new(move || x + y);

    assert_eq!(raw.as_mut().call(()), 15);

    // Shadow the originals; the captured copies are unaffected
    let x = 100;
    let y = 200;
    assert_eq!(raw.as_mut().call(()), 15);
    assert_eq!(x + y, 300);
}

#[test]
fn test_shared_state_mutation_is_observable() {
    let z = Rc::new(Cell::new(1_i32));
    let handle = Rc::clone(&z);
    let mut raw: RawCallable<(), ()> = RawCallable::new(move || {
        handle.set(handle.get() + 1);
    });

    raw.as_mut().call(());
    assert_eq!(z.get(), 2);
    raw.as_mut().call(());
    assert_eq!(z.get(), 3);
}

#[test]
fn test_mutable_capture_persists_across_invocations() {
    let mut history = Vec::new();
    let mut raw: RawCallable<(i32,), usize> = RawCallable::new(move |n: i32| {
        history.push(n);
        history.len()
    });

    assert_eq!(raw.as_mut().call((10,)), 1);
    assert_eq!(raw.as_mut().call((20,)), 2);
    assert_eq!(raw.as_mut().call((30,)), 3);
}

#[test]
fn test_result_values_propagate_unchanged() {
    let mut raw: RawCallable<(i32, i32), Result<i32, String>> =
        RawCallable::new(|a: i32, b: i32| {
            if b == 0 {
                Err(String::from("division by zero"))
            } else {
                Ok(a / b)
            }
        });

    assert_eq!(raw.as_mut().call((10, 2)), Ok(5));
    assert_eq!(
        raw.as_mut().call((10, 0)),
        Err(String::from("division by zero"))
    );
}

#[test]
fn test_type_identification() {
    // Stored as a fn pointer: the erased type is the pointer type
    let f: fn(i32, i32) -> i32 = add;
    let as_pointer: RawCallable<(i32, i32), i32> = RawCallable::new(f);
    assert_eq!(
        as_pointer.as_ref().callable_type_id(),
        TypeId::of::<fn(i32, i32) -> i32>()
    );

    // Stored as the fn item itself: a distinct zero-sized type
    let as_item: RawCallable<(i32, i32), i32> = RawCallable::new(add);
    assert_ne!(
        as_item.as_ref().callable_type_id(),
        TypeId::of::<fn(i32, i32) -> i32>()
    );
    assert!(as_item.as_ref().callable_type_name().contains("add"));
}

#[test]
fn test_checked_downcast_roundtrip() {
    let f: fn(i32, i32) -> i32 = add;
    let mut raw: RawCallable<(i32, i32), i32> = RawCallable::new(f);

    assert_eq!(
        raw.as_ref().callable_type_id(),
        TypeId::of::<fn(i32, i32) -> i32>()
    );

    // SAFETY: The type was checked above
    let recovered: &fn(i32, i32) -> i32 = unsafe { raw.as_ref().callable_downcast_unchecked() };
    assert_eq!(recovered(2, 3), 5);

    // SAFETY: The type was checked above
    let recovered: &mut fn(i32, i32) -> i32 =
        unsafe { raw.as_mut().callable_downcast_mut_unchecked() };
    assert_eq!(recovered(7, 8), 15);
}

#[test]
fn test_stored_callable_dropped_exactly_once() {
    let drops = Rc::new(Cell::new(0));
    let tracker = DropTracker(Rc::clone(&drops));

    let mut raw: RawCallable<(), usize> = RawCallable::new(move || tracker.0.get());

    assert_eq!(raw.as_mut().call(()), 0);
    assert_eq!(raw.as_mut().call(()), 0);
    assert_eq!(drops.get(), 0, "callable must not be dropped while live");

    drop(raw);
    assert_eq!(drops.get(), 1, "callable must be dropped exactly once");
}

#[test]
fn test_owned_captures_released_on_drop() {
    let payload = vec![String::from("a"), String::from("b")];
    let anchor = Rc::new(());
    let probe = Rc::downgrade(&anchor);

    let raw: RawCallable<(), usize> = RawCallable::new(move || {
        let _ = &anchor;
        payload.len()
    });

    assert_eq!(probe.strong_count(), 1);
    drop(raw);
    assert_eq!(probe.strong_count(), 0);
}

#[test]
fn test_two_handles_do_not_interfere() {
    let drops_a = Rc::new(Cell::new(0));
    let drops_b = Rc::new(Cell::new(0));
    let tracker_a = DropTracker(Rc::clone(&drops_a));
    let tracker_b = DropTracker(Rc::clone(&drops_b));

    let mut a: RawCallable<(), usize> = RawCallable::new(move || tracker_a.0.get());
    let mut b: RawCallable<(), usize> = RawCallable::new(move || tracker_b.0.get() + 1);

    assert_eq!(a.as_mut().call(()), 0);
    assert_eq!(b.as_mut().call(()), 1);

    drop(a);
    assert_eq!(drops_a.get(), 1);
    assert_eq!(drops_b.get(), 0);

    drop(b);
    assert_eq!(drops_b.get(), 1);
}
