//! Crate-wide error type.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or commanding a pool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// A worker thread could not be spawned at startup.
    #[error("spawn error: {0}")]
    Spawn(String),

    /// An interrupt or diagnostic read addressed a worker outside the pool.
    #[error("no worker {worker} in pool of {pool_size}")]
    WorkerNotFound {
        /// The worker id that was addressed.
        worker: usize,
        /// Number of workers the pool actually holds.
        pool_size: usize,
    },

    /// The pool has already been shut down.
    #[error("pool already shut down")]
    Terminated,

    /// I/O failure in the command loop's input source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::Config`] with a message.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Shorthand for an [`Error::Spawn`] with a message.
    pub fn spawn<S: Into<String>>(msg: S) -> Self {
        Error::Spawn(msg.into())
    }
}
