//! Targeted interrupt delivery between the pool and a single worker.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// What an external interrupt does to the targeted worker's dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptMode {
    /// Abort the running task and start it over at the same index.
    Restart,
    /// Abort the running task and force the sequence back to task 0.
    Reset,
}

/// Full signal set a worker can receive. `Terminate` is raised only by the
/// pool itself during shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Interrupt(InterruptMode),
    Terminate,
}

/// One-slot signal mailbox owned by a single worker.
///
/// `raise` may be called from any thread; `take` and the waits only run on
/// the owning worker. A newer interrupt overwrites an unconsumed one, so
/// repeated delivery of the same mode is idempotent in effect. `Terminate`
/// is never displaced once raised.
pub(crate) struct SignalCell {
    slot: Mutex<Option<Signal>>,
    signalled: Condvar,
}

impl SignalCell {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            signalled: Condvar::new(),
        }
    }

    /// Deliver a signal, waking the worker if it is blocked in a wait.
    pub fn raise(&self, signal: Signal) {
        let mut slot = self.slot.lock();
        if *slot != Some(Signal::Terminate) {
            *slot = Some(signal);
        }
        self.signalled.notify_one();
    }

    /// Consume a pending signal without blocking.
    pub fn take(&self) -> Option<Signal> {
        self.slot.lock().take()
    }

    /// Block until a signal arrives, then consume it.
    pub fn wait(&self) -> Signal {
        let mut slot = self.slot.lock();
        loop {
            if let Some(signal) = slot.take() {
                return signal;
            }
            self.signalled.wait(&mut slot);
        }
    }

    /// Block for at most `timeout`, consuming a signal if one arrives.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Signal> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.slot.lock();
        loop {
            if let Some(signal) = slot.take() {
                return Some(signal);
            }
            if self.signalled.wait_until(&mut slot, deadline).timed_out() {
                return slot.take();
            }
        }
    }
}
