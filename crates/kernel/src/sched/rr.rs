//! The round-robin scheduling algorithm.

use super::{RunQueue, Tcb};
use alloc::sync::Arc;

/// The task occupying the CPU, and whether it should be dropped instead
/// of re-enqueued at the next scheduling point.
struct CurrentTask {
    task: Option<Arc<Tcb>>,
    to_remove: bool,
}

/// Round-robin scheduling: runnable tasks rotate through a FIFO, and the
/// task leaving the CPU goes to the tail.
///
/// Removing the *running* task is deferred. Detaching it while it is the
/// active context would corrupt the state it observes when it returns,
/// so removal only marks the current slot; the next scheduling point
/// simply does not re-enqueue the task.
pub struct RoundRobin {
    runqueue: RunQueue,
    current: CurrentTask,
}

impl RoundRobin {
    /// Create a scheduler with an empty run queue and no current task.
    pub fn new() -> Self {
        Self {
            runqueue: RunQueue::new(),
            current: CurrentTask {
                task: None,
                to_remove: false,
            },
        }
    }

    /// Make a task runnable by appending it to the run queue.
    pub fn add_to_runqueue(&mut self, task: Arc<Tcb>) {
        self.runqueue.enqueue(task);
    }

    /// Take a task out of the scheduler's care.
    ///
    /// If `task` is currently running, it is only marked: the next call
    /// to [`select_next_task`](Self::select_next_task) drops it.
    /// Removing a task that is neither running nor queued is a no-op
    /// (it may have exited on its own in the meantime).
    pub fn remove_from_runqueue(&mut self, task: &Tcb) {
        let is_current = self
            .current
            .task
            .as_deref()
            .map_or(false, |current| current.id() == task.id());

        if is_current {
            self.current.to_remove = true;
        } else {
            self.runqueue.remove(task);
        }
    }

    /// Pick the task to run next.
    ///
    /// With an empty queue the current task keeps the CPU, unless it was
    /// marked for removal, in which case the system goes idle and `None`
    /// is returned. Otherwise the leaving task is re-enqueued at the
    /// tail (or dropped, if marked) and the head of the queue takes
    /// over.
    pub fn select_next_task(&mut self) -> Option<Arc<Tcb>> {
        if self.runqueue.is_empty() {
            if self.current.to_remove {
                self.current.task = None;
                self.current.to_remove = false;
            }

            return self.current.task.clone();
        }

        if !self.current.to_remove {
            if let Some(previous) = self.current.task.take() {
                self.runqueue.enqueue(previous);
            }
        }

        self.current.to_remove = false;
        self.current.task = self.runqueue.pop();
        self.current.task.clone()
    }

    /// The task currently occupying the CPU.
    pub fn current_task(&self) -> Option<&Arc<Tcb>> {
        self.current.task.as_ref()
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler_with(names: &[&'static str]) -> (RoundRobin, Vec<Arc<Tcb>>) {
        let mut scheduler = RoundRobin::new();
        let tasks: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(id, &name)| Tcb::new(id as u64, name))
            .collect();

        for task in &tasks {
            scheduler.add_to_runqueue(task.clone());
        }

        (scheduler, tasks)
    }

    fn next_name(scheduler: &mut RoundRobin) -> Option<&'static str> {
        scheduler.select_next_task().map(|task| task.name())
    }

    #[test]
    fn tasks_rotate_in_fifo_order() {
        let (mut scheduler, _tasks) = scheduler_with(&["a", "b", "c"]);

        assert_eq!(next_name(&mut scheduler), Some("a"));
        assert_eq!(next_name(&mut scheduler), Some("b"));
        assert_eq!(next_name(&mut scheduler), Some("c"));
        assert_eq!(next_name(&mut scheduler), Some("a"));
        assert_eq!(next_name(&mut scheduler), Some("b"));
    }

    #[test]
    fn sole_task_keeps_the_cpu() {
        let (mut scheduler, tasks) = scheduler_with(&["a"]);

        assert_eq!(next_name(&mut scheduler), Some("a"));
        assert_eq!(next_name(&mut scheduler), Some("a"));
        assert_eq!(scheduler.current_task().unwrap().id(), tasks[0].id());
    }

    #[test]
    fn removed_running_task_is_not_reenqueued() {
        let (mut scheduler, tasks) = scheduler_with(&["a", "b", "c"]);
        assert_eq!(next_name(&mut scheduler), Some("a"));

        // a removes itself while it is the active context
        scheduler.remove_from_runqueue(&tasks[0]);

        assert_eq!(next_name(&mut scheduler), Some("b"));
        assert_eq!(scheduler.runqueue.len(), 1);
        assert_eq!(next_name(&mut scheduler), Some("c"));
        assert_eq!(next_name(&mut scheduler), Some("b"));
        assert_eq!(next_name(&mut scheduler), Some("c"));
    }

    #[test]
    fn removing_the_last_task_idles_the_system() {
        let (mut scheduler, tasks) = scheduler_with(&["a"]);
        assert_eq!(next_name(&mut scheduler), Some("a"));

        scheduler.remove_from_runqueue(&tasks[0]);

        assert_eq!(next_name(&mut scheduler), None);
        assert!(scheduler.current_task().is_none());

        // the removal mark must not leak into the next task
        let late = Tcb::new(99, "late");
        scheduler.add_to_runqueue(late);
        assert_eq!(next_name(&mut scheduler), Some("late"));
        assert_eq!(next_name(&mut scheduler), Some("late"));
    }

    #[test]
    fn queued_tasks_can_be_removed_directly() {
        let (mut scheduler, tasks) = scheduler_with(&["a", "b", "c"]);
        assert_eq!(next_name(&mut scheduler), Some("a"));

        scheduler.remove_from_runqueue(&tasks[1]);

        assert_eq!(next_name(&mut scheduler), Some("c"));
        assert_eq!(next_name(&mut scheduler), Some("a"));
        assert_eq!(next_name(&mut scheduler), Some("c"));
    }

    #[test]
    fn removing_an_unknown_task_is_a_noop() {
        let (mut scheduler, _tasks) = scheduler_with(&["a", "b"]);
        let stranger = Tcb::new(42, "stranger");

        scheduler.remove_from_runqueue(&stranger);

        assert_eq!(next_name(&mut scheduler), Some("a"));
        assert_eq!(next_name(&mut scheduler), Some("b"));
        assert_eq!(next_name(&mut scheduler), Some("a"));
    }
}
