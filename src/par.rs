// src/par.rs
//! Order-preserving parallel map. Ticket hashing is embarrassingly parallel
//! across records (each ticket depends only on its own record plus the
//! frozen configuration), so workers share nothing but an index counter and
//! write results into pre-indexed slots.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

/// Maps `f` over `items`, keeping output order identical to input order.
/// Spawns `threads` workers; with `threads <= 1` it runs serially.
///
/// I: Sync so workers can share &I
/// T: Send because results cross back into the shared slot vector
/// F: Sync so all workers borrow the same callable
pub fn parallel_map_indexed<I, T, F>(items: &[I], threads: usize, f: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I, usize) -> T + Sync,
{
    let n = items.len();
    if n == 0 || threads <= 1 {
        return (0..n).map(|i| f(&items[i], i)).collect();
    }

    // One Option slot per input; filled by index, so no Clone bound on T.
    let slots = Mutex::new({
        let mut v: Vec<Option<T>> = Vec::with_capacity(n);
        v.resize_with(n, || None);
        v
    });
    let next = AtomicUsize::new(0);

    // Scoped threads borrow `items` and `f` without 'static.
    thread::scope(|scope| {
        for _ in 0..threads.min(n) {
            scope.spawn(|| loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= n {
                    break;
                }
                let res = f(&items[i], i);
                let mut guard = slots.lock().expect("slot lock poisoned");
                guard[i] = Some(res);
            });
        }
    });

    let filled = slots.into_inner().expect("slot lock poisoned");
    filled.into_iter().map(|x| x.expect("missing slot")).collect()
}
