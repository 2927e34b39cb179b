//! Worker pool infrastructure.
//!
//! This module provides the interrupt-driven dispatch core: the readiness
//! barrier, targeted signal delivery, the per-worker dispatch loop, and the
//! pool controller that owns them all.

pub mod barrier;
pub mod controller;
pub mod signal;
pub mod worker;

pub use controller::{Controller, Pool};
pub use signal::InterruptMode;
pub use worker::{WorkerContext, WorkerId};
