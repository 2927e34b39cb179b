//! Startup rendezvous between the pool and its workers.

use parking_lot::{Condvar, Mutex};

/// Counts workers that have not yet reached their dispatch loop.
///
/// The pool calls `begin` before each spawn, every worker calls
/// `signal_ready` exactly once from its own thread, and `wait_all` blocks
/// the pool until the count returns to zero. No command is routed to any
/// worker before `wait_all` returns.
pub(crate) struct ReadinessBarrier {
    pending: Mutex<usize>,
    all_ready: Condvar,
}

impl ReadinessBarrier {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(0),
            all_ready: Condvar::new(),
        }
    }

    /// Register one worker about to be spawned.
    pub fn begin(&self) {
        *self.pending.lock() += 1;
    }

    /// Report one worker as initialized. Called on the worker's own thread.
    pub fn signal_ready(&self) {
        self.decrement();
    }

    /// Undo a `begin` whose worker never spawned.
    pub fn retract(&self) {
        self.decrement();
    }

    fn decrement(&self) {
        let mut pending = self.pending.lock();
        debug_assert!(*pending > 0);
        *pending -= 1;
        if *pending == 0 {
            self.all_ready.notify_all();
        }
    }

    /// Block until every registered worker has signalled ready.
    pub fn wait_all(&self) {
        let mut pending = self.pending.lock();
        while *pending > 0 {
            self.all_ready.wait(&mut pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_all_with_nothing_pending_returns() {
        let barrier = ReadinessBarrier::new();
        barrier.wait_all();
    }

    #[test]
    fn test_wait_all_blocks_until_every_signal() {
        let barrier = Arc::new(ReadinessBarrier::new());
        barrier.begin();
        barrier.begin();

        let mut signalers = Vec::new();
        for _ in 0..2 {
            let barrier = barrier.clone();
            signalers.push(thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                barrier.signal_ready();
            }));
        }

        barrier.wait_all();
        for handle in signalers {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_retract_releases_the_waiter() {
        let barrier = ReadinessBarrier::new();
        barrier.begin();
        barrier.retract();
        barrier.wait_all();
    }
}
