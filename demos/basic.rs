//! A hands-on tour of the callable wrapper.
//!
//! Run with: `cargo run --example basic`

use std::{cell::Cell, rc::Rc};

use anycall::Function;

fn add(x: i32, y: i32) -> i32 {
    x + y
}

fn main() {
    // A named function, wrapped and invoked through the uniform interface.
    let mut sum: Function<(i32, i32), i32> = Function::new(add);
    println!("add(1, 2) = {}", sum.call((1, 2)));

    // An empty wrapper, assigned a closure later.
    let mut greet: Function<()> = Function::empty();
    greet.assign(|| println!("hello from a closure"));
    greet.call(());

    // Reassignment replaces the held callable; the first closure is gone.
    greet.assign(|| println!("hello from another closure"));
    greet.call(());

    // Captured-by-value state: the wrapper keeps its own copies.
    let x = 5;
    let y = 10;
    let mut captured: Function<(), i32> = Function::new(move || add(x, y));
    println!("captured x + y = {}", captured.call(()));

    // Shared mutable state: each invocation bumps the counter.
    let z = Rc::new(Cell::new(1));
    let handle = Rc::clone(&z);
    let mut bump: Function<()> = Function::new(move || {
        handle.set(handle.get() + 1);
    });
    bump.call(());
    println!("counter after one bump: {}", z.get());
    bump.call(());
    println!("counter after two bumps: {}", z.get());

    // Introspection: the wrapper knows what it is holding.
    println!("sum holds: {sum:?}");
    println!("empty wrapper: {:?}", Function::<(), ()>::empty());

    // Calling an empty wrapper is a programmer error and panics; uncomment
    // to see the failure mode.
    // let mut nothing: Function<()> = Function::empty();
    // nothing.call(());
}
