//! FOREMAN - interrupt-driven worker pool
//!
//! A fixed pool of worker threads, each dispatching an ordered sequence of
//! long-running tasks, commanded from outside: a targeted interrupt aborts a
//! worker's current task mid-flight and either restarts it from its
//! beginning or resets the worker's whole sequence back to task 0.
//!
//! # Quick Start
//!
//! ```no_run
//! use foreman_rs::prelude::*;
//! use std::time::Duration;
//!
//! let tasks = TaskSequence::builder()
//!     .task(|ctx: &WorkerContext| {
//!         for i in 0..20 {
//!             println!("step {} on worker {}...", i, ctx.worker_id());
//!             ctx.sleep(Duration::from_secs(1));
//!         }
//!     })
//!     .build();
//!
//! let config = Config::builder().num_workers(2).build().unwrap();
//! let pool = Pool::start(&config, tasks).unwrap();
//!
//! // Force worker 0 to start its current task over from the top.
//! pool.interrupt(0, InterruptMode::Restart).unwrap();
//! ```
//!
//! # Features
//!
//! - **Fixed Pools**: Workers are spawned once and terminated once; no
//!   scaling, no graceful drain
//! - **Forced Aborts**: `Restart` and `Reset` interrupts take effect inside
//!   a running task, including during blocking sleeps
//! - **Targeted Delivery**: An interrupt names exactly one worker and is
//!   handled on that worker's own thread
//! - **Readiness Gating**: `Pool::start` returns only after every worker has
//!   reached its dispatch loop
//! - **Command Loops**: Explicit single-token command tables served from any
//!   `BufRead` source

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod command;
pub mod config;
pub mod error;
pub mod pool;
pub mod prelude;
pub mod task;

// Re-export key types at crate root
pub use command::{Command, CommandTable};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use pool::{Controller, InterruptMode, Pool, WorkerContext, WorkerId};
pub use task::{TaskFn, TaskSequence, TaskSequenceBuilder};
