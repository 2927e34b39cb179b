//! Convenience re-exports for typical use.

pub use crate::command::{Command, CommandTable};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::pool::{Controller, InterruptMode, Pool, WorkerContext, WorkerId};
pub use crate::task::{TaskFn, TaskSequence, TaskSequenceBuilder};
