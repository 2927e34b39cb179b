//! Per-worker dispatch loop and the context handed to task bodies.

use super::barrier::ReadinessBarrier;
use super::signal::{InterruptMode, Signal, SignalCell};
use crate::task::TaskSequence;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Stable index of a worker within its pool.
pub type WorkerId = usize;

/// State shared between a worker thread and the pool that owns it.
pub(crate) struct WorkerShared {
    pub id: WorkerId,
    pub signal: SignalCell,
    /// Single-writer: mutated only on the worker's own thread. Atomic so the
    /// pool can read it for diagnostics.
    pub task_index: AtomicUsize,
}

impl WorkerShared {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            signal: SignalCell::new(),
            task_index: AtomicUsize::new(0),
        }
    }
}

/// Unwind payload carrying a consumed signal back to the resumption frame.
struct Aborted(Signal);

/// Per-invocation handle passed to every task body.
///
/// Replaces ambient thread-local identity: a task learns which worker is
/// running it and cooperates with forced aborts through this value.
/// [`checkpoint`](Self::checkpoint) and [`sleep`](Self::sleep) are the
/// declared safe points at which a pending interrupt takes effect.
pub struct WorkerContext {
    shared: Arc<WorkerShared>,
}

impl WorkerContext {
    /// Pool index of the worker running the current task.
    pub fn worker_id(&self) -> WorkerId {
        self.shared.id
    }

    /// Index of the task currently being dispatched.
    pub fn task_index(&self) -> usize {
        self.shared.task_index.load(Ordering::Acquire)
    }

    /// Abort here if an interrupt is pending; otherwise return immediately.
    pub fn checkpoint(&self) {
        if let Some(signal) = self.shared.signal.take() {
            abort(signal);
        }
    }

    /// Sleep, waking early (and aborting) the moment an interrupt arrives.
    pub fn sleep(&self, duration: Duration) {
        if let Some(signal) = self.shared.signal.wait_timeout(duration) {
            abort(signal);
        }
    }
}

impl fmt::Debug for WorkerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerContext")
            .field("worker_id", &self.shared.id)
            .field("task_index", &self.task_index())
            .finish()
    }
}

/// Non-local jump back to the dispatch loop's resumption frame.
///
/// `resume_unwind` skips the panic hook, so an abort is invisible except to
/// the `catch_unwind` at the top of [`Worker::run`].
fn abort(signal: Signal) -> ! {
    resume_unwind(Box::new(Aborted(signal)))
}

pub(crate) struct Worker {
    shared: Arc<WorkerShared>,
    tasks: TaskSequence,
}

impl Worker {
    pub fn new(shared: Arc<WorkerShared>, tasks: TaskSequence) -> Self {
        Self { shared, tasks }
    }

    /// Worker thread body.
    ///
    /// The `catch_unwind` below is the worker's single resumption point:
    /// every forced abort lands here, the interrupt mode is applied on this
    /// thread (never the sender's), and the possibly-rewritten index is
    /// re-read by the next `dispatch`.
    pub fn run(&self, barrier: &ReadinessBarrier) {
        barrier.signal_ready();

        loop {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.dispatch()));
            match outcome {
                // Terminate observed between tasks
                Ok(()) => break,
                Err(payload) => match payload.downcast::<Aborted>() {
                    Ok(aborted) => match aborted.0 {
                        Signal::Terminate => break,
                        Signal::Interrupt(InterruptMode::Restart) => {
                            // index untouched: same task runs again from its start
                        }
                        Signal::Interrupt(InterruptMode::Reset) => {
                            self.shared.task_index.store(0, Ordering::Release);
                        }
                    },
                    Err(panic) => {
                        // genuine task panic: isolate, log, move on
                        eprintln!(
                            "worker {}: task {} panicked: {}",
                            self.shared.id,
                            self.shared.task_index.load(Ordering::Relaxed),
                            panic_message(panic.as_ref()),
                        );
                        self.advance();
                    }
                },
            }
        }
    }

    /// Run tasks in sequence order until a `Terminate` is consumed between
    /// tasks. Interrupts inside a task body unwind out of this call.
    fn dispatch(&self) {
        loop {
            let index = self.shared.task_index.load(Ordering::Acquire);
            if index >= self.tasks.len() {
                // sequence exhausted: park until someone resets us
                match self.shared.signal.wait() {
                    Signal::Terminate => return,
                    Signal::Interrupt(InterruptMode::Reset) => {
                        self.shared.task_index.store(0, Ordering::Release);
                    }
                    Signal::Interrupt(InterruptMode::Restart) => {
                        // idle stays idle
                    }
                }
                continue;
            }

            let ctx = WorkerContext {
                shared: self.shared.clone(),
            };
            // consume anything raised while we were between tasks
            ctx.checkpoint();
            self.tasks.invoke(index, &ctx);
            self.advance();
        }
    }

    /// Advance past the task at the current index. Worker-thread only.
    fn advance(&self) {
        let index = self.shared.task_index.load(Ordering::Relaxed);
        let next = (index + 1).min(self.tasks.len());
        self.shared.task_index.store(next, Ordering::Release);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
