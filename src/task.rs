//! Task entry points and the ordered sequences workers dispatch over.

use crate::pool::WorkerContext;
use std::fmt;
use std::sync::Arc;

/// A task entry point: a unit of work invocable repeatedly from its start.
///
/// A body receives the [`WorkerContext`] of the worker running it and is
/// expected to route blocking waits through [`WorkerContext::sleep`] (or to
/// call [`WorkerContext::checkpoint`] in compute loops) so a forced abort
/// can take effect. A body may run for an unbounded duration; it is not
/// assumed to return at all.
pub type TaskFn = Arc<dyn Fn(&WorkerContext) + Send + Sync + 'static>;

/// Ordered, fixed list of task entry points.
///
/// Cheap to clone; every worker in a pool dispatches over its own clone of
/// the same sequence, so state captured by a task closure is shared across
/// all workers running that task.
#[derive(Clone)]
pub struct TaskSequence {
    tasks: Arc<[TaskFn]>,
}

impl TaskSequence {
    /// Start building a sequence.
    pub fn builder() -> TaskSequenceBuilder {
        TaskSequenceBuilder::new()
    }

    /// Number of tasks in the sequence.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the sequence holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Invoke the task at `index` on the worker behind `ctx`.
    pub(crate) fn invoke(&self, index: usize, ctx: &WorkerContext) {
        (self.tasks[index])(ctx);
    }
}

impl fmt::Debug for TaskSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSequence")
            .field("len", &self.tasks.len())
            .finish()
    }
}

/// Builder for [`TaskSequence`].
pub struct TaskSequenceBuilder {
    tasks: Vec<TaskFn>,
}

impl TaskSequenceBuilder {
    /// Start with an empty sequence.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a task entry point.
    pub fn task<F>(mut self, f: F) -> Self
    where
        F: Fn(&WorkerContext) + Send + Sync + 'static,
    {
        self.tasks.push(Arc::new(f));
        self
    }

    /// Append an already-shared task entry point.
    pub fn task_fn(mut self, f: TaskFn) -> Self {
        self.tasks.push(f);
        self
    }

    /// Produce the sequence.
    pub fn build(self) -> TaskSequence {
        TaskSequence {
            tasks: self.tasks.into(),
        }
    }
}

impl Default for TaskSequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskSequenceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSequenceBuilder")
            .field("len", &self.tasks.len())
            .finish()
    }
}
