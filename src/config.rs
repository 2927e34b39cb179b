//! Pool configuration.

use crate::error::{Error, Result};

/// Parameters fixed at pool startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed number of workers; defaults to the number of CPUs when unset.
    pub num_workers: Option<usize>,
    /// Prefix for worker thread names (the worker id is appended).
    pub thread_name_prefix: String,
    /// Stack size for worker threads, if overridden.
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_workers: None,
            thread_name_prefix: "foreman-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
        }
    }
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Check the configuration for values the pool cannot honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_workers {
            if n == 0 {
                return Err(Error::config("num_workers must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("num_workers too large (max 1024)"));
            }
        }

        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }

        Ok(())
    }

    /// The worker count the pool will actually spawn.
    pub fn worker_count(&self) -> usize {
        self.num_workers.unwrap_or_else(num_cpus::get)
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the fixed worker count.
    pub fn num_workers(mut self, n: usize) -> Self {
        self.config.num_workers = Some(n);
        self
    }

    /// Set the worker thread name prefix.
    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker thread stack size.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = Config::builder().num_workers(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_huge_pool_rejected() {
        let result = Config::builder().num_workers(4096).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = Config::builder()
            .num_workers(2)
            .thread_name_prefix("crew")
            .stack_size(64 * 1024)
            .build()
            .unwrap();

        assert_eq!(config.worker_count(), 2);
        assert_eq!(config.thread_name_prefix, "crew");
        assert_eq!(config.stack_size, Some(64 * 1024));
    }
}
