//! Single-token command surface mapping input tokens to interrupts.

use crate::pool::{InterruptMode, WorkerId};
use std::collections::HashMap;

/// What a recognized token does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Interrupt exactly one worker.
    Interrupt {
        /// Targeted worker.
        worker: WorkerId,
        /// Restart the current task or reset the whole sequence.
        mode: InterruptMode,
    },
    /// End the command loop and shut the pool down.
    Quit,
}

/// Explicit token-to-command table.
///
/// An integration defines its whole command surface here; the command loop
/// ignores any token the table does not bind.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: HashMap<char, Command>,
}

impl CommandTable {
    /// Start with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` to an interrupt against one worker. Rebinding replaces.
    pub fn bind(mut self, token: char, worker: WorkerId, mode: InterruptMode) -> Self {
        self.entries.insert(token, Command::Interrupt { worker, mode });
        self
    }

    /// Bind the distinguished quit token.
    pub fn bind_quit(mut self, token: char) -> Self {
        self.entries.insert(token, Command::Quit);
        self
    }

    /// Resolve a token; `None` means the token is ignored.
    pub fn lookup(&self, token: char) -> Option<Command> {
        self.entries.get(&token).copied()
    }

    /// Number of bound tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tokens are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bound_and_unbound() {
        let table = CommandTable::new()
            .bind('a', 0, InterruptMode::Restart)
            .bind_quit('q');

        assert_eq!(
            table.lookup('a'),
            Some(Command::Interrupt {
                worker: 0,
                mode: InterruptMode::Restart
            })
        );
        assert_eq!(table.lookup('q'), Some(Command::Quit));
        assert_eq!(table.lookup('x'), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rebinding_replaces() {
        let table = CommandTable::new()
            .bind('a', 0, InterruptMode::Restart)
            .bind('a', 1, InterruptMode::Reset);

        assert_eq!(
            table.lookup('a'),
            Some(Command::Interrupt {
                worker: 1,
                mode: InterruptMode::Reset
            })
        );
        assert_eq!(table.len(), 1);
    }
}
