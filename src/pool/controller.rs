//! Pool lifecycle and the command loop that drives it.

use super::barrier::ReadinessBarrier;
use super::signal::{InterruptMode, Signal};
use super::worker::{Worker, WorkerId, WorkerShared};
use crate::command::{Command, CommandTable};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::TaskSequence;
use std::fmt;
use std::io::BufRead;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

struct WorkerHandle {
    id: WorkerId,
    thread: Option<JoinHandle<()>>,
    shared: Arc<WorkerShared>,
}

/// Fixed, immutable-after-startup collection of workers.
///
/// The pool is the only component that spawns, interrupts, or terminates
/// workers. [`Pool::start`] returns only after every worker has reached its
/// dispatch loop, so readiness gating holds by construction: there is no way
/// to route a command to a worker that has not signalled ready.
pub struct Pool {
    workers: Vec<WorkerHandle>,
    terminated: bool,
}

impl Pool {
    /// Spawn the configured number of workers over `tasks` and wait until
    /// every one of them has reached its dispatch loop.
    ///
    /// On spawn failure the already-running workers are terminated and the
    /// error propagates; no partially-started pool is ever handed out.
    pub fn start(config: &Config, tasks: TaskSequence) -> Result<Self> {
        config.validate()?;
        if tasks.is_empty() {
            return Err(Error::config("task sequence must not be empty"));
        }

        let num_workers = config.worker_count();
        let barrier = Arc::new(ReadinessBarrier::new());
        let mut workers = Vec::with_capacity(num_workers);

        for id in 0..num_workers {
            let shared = Arc::new(WorkerShared::new(id));
            let worker = Worker::new(shared.clone(), tasks.clone());
            let barrier_clone = barrier.clone();
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            barrier.begin();
            let spawned = builder.spawn(move || worker.run(&barrier_clone));

            let thread = match spawned {
                Ok(thread) => thread,
                Err(e) => {
                    barrier.retract();
                    let mut partial = Pool {
                        workers,
                        terminated: false,
                    };
                    partial.shutdown();
                    return Err(Error::spawn(format!("worker {id}: {e}")));
                }
            };

            workers.push(WorkerHandle {
                id,
                thread: Some(thread),
                shared,
            });
        }

        barrier.wait_all();

        Ok(Self {
            workers,
            terminated: false,
        })
    }

    /// Number of workers in the pool.
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Deliver a targeted interrupt to one worker.
    ///
    /// The abort happens on the worker's own thread at its next safe point;
    /// under [`InterruptMode::Reset`] the index mutation happens there too,
    /// never on the caller's thread. No other worker is affected.
    pub fn interrupt(&self, worker: WorkerId, mode: InterruptMode) -> Result<()> {
        let handle = self.handle(worker)?;
        handle.shared.signal.raise(Signal::Interrupt(mode));
        Ok(())
    }

    /// Diagnostic read of a worker's current task index.
    ///
    /// An index equal to the sequence length means the worker is idle.
    pub fn task_index(&self, worker: WorkerId) -> Result<usize> {
        let handle = self.handle(worker)?;
        Ok(handle.shared.task_index.load(Ordering::Acquire))
    }

    fn handle(&self, worker: WorkerId) -> Result<&WorkerHandle> {
        if self.terminated {
            return Err(Error::Terminated);
        }
        self.workers.get(worker).ok_or(Error::WorkerNotFound {
            worker,
            pool_size: self.workers.len(),
        })
    }

    /// Forcibly stop every worker and join the threads.
    ///
    /// There is no drain: each worker quits at its next safe point,
    /// abandoning whatever task was running. Idempotent.
    pub fn shutdown(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;

        for handle in &self.workers {
            handle.shared.signal.raise(Signal::Terminate);
        }
        for handle in &mut self.workers {
            if let Some(thread) = handle.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("num_workers", &self.workers.len())
            .field("terminated", &self.terminated)
            .finish()
    }
}

/// Routes single-token commands from an input source to a pool it owns.
pub struct Controller {
    pool: Pool,
    table: CommandTable,
}

impl Controller {
    /// Take ownership of a started pool and the table to serve against.
    pub fn new(pool: Pool, table: CommandTable) -> Self {
        Self { pool, table }
    }

    /// Read-only view of the pool being commanded.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Serve commands until the quit token, then shut the pool down.
    ///
    /// Tokens absent from the table (including whitespace) are ignored
    /// silently. End of input counts as quit. A table entry addressing a
    /// worker outside the pool surfaces as [`Error::WorkerNotFound`].
    pub fn serve<R: BufRead>(mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            for token in line.chars() {
                match self.table.lookup(token) {
                    Some(Command::Interrupt { worker, mode }) => {
                        self.pool.interrupt(worker, mode)?;
                    }
                    Some(Command::Quit) => {
                        self.pool.shutdown();
                        return Ok(());
                    }
                    None => {}
                }
            }
        }

        self.pool.shutdown();
        Ok(())
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("pool", &self.pool)
            .field("table", &self.table)
            .finish()
    }
}
