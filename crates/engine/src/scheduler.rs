//! Tick-driven task scheduler for session tick tasks.
//!
//! The host calls [`TickScheduler::advance`] once per server tick from its
//! main thread. Tasks are repeating and cancellable; due tasks are returned
//! earliest first, ties broken by scheduling order, and the caller runs the
//! owning session's tick.

use arcade_core::SessionId;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use tracing::{debug, trace};

/// Handle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw sequence number
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Scheduler metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Number of live tasks.
    pub scheduled: usize,
    /// Ticks advanced since creation.
    pub current_tick: u64,
    /// Total task runs handed out since creation.
    pub runs: u64,
    /// Total tasks cancelled since creation.
    pub cancelled: u64,
}

#[derive(Debug)]
struct TaskEntry {
    owner: SessionId,
    period: u64,
    next_run: u64,
}

#[derive(Debug, PartialEq, Eq)]
struct TaskEnvelope {
    next_run: u64,
    task: TaskId,
}

// Earliest tick first, then lower sequence (older) first
impl Ord for TaskEnvelope {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .next_run
            .cmp(&self.next_run)
            .then(other.task.cmp(&self.task))
    }
}

impl PartialOrd for TaskEnvelope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Repeating, cancellable tick tasks keyed by owning session
#[derive(Debug, Default)]
pub struct TickScheduler {
    tasks: HashMap<TaskId, TaskEntry>,
    queue: BinaryHeap<TaskEnvelope>,
    sequence: u64,
    current_tick: u64,
    runs: u64,
    cancelled: u64,
}

impl TickScheduler {
    /// An empty scheduler at tick zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a repeating task for `owner`
    ///
    /// The first run happens `delay` ticks after the next tick; afterwards the
    /// task runs every `period` ticks. A zero period is treated as one.
    pub fn schedule_repeating(&mut self, owner: SessionId, delay: u64, period: u64) -> TaskId {
        let task = TaskId(self.sequence);
        self.sequence += 1;
        let next_run = self.current_tick + 1 + delay;
        self.tasks.insert(
            task,
            TaskEntry {
                owner,
                period: period.max(1),
                next_run,
            },
        );
        self.queue.push(TaskEnvelope { next_run, task });
        debug!(target: "arcade::scheduler", task = %task, owner = %owner, next_run, "Task scheduled");
        task
    }

    /// Cancel a task; `false` if it was not scheduled
    pub fn cancel(&mut self, task: TaskId) -> bool {
        match self.tasks.remove(&task) {
            Some(entry) => {
                self.cancelled += 1;
                debug!(target: "arcade::scheduler", task = %task, owner = %entry.owner, "Task cancelled");
                true
            }
            None => false,
        }
    }

    /// Whether a task is still live
    pub fn is_scheduled(&self, task: TaskId) -> bool {
        self.tasks.contains_key(&task)
    }

    /// Advance one tick and return the owners of every task due on it
    pub fn advance(&mut self) -> Vec<SessionId> {
        self.current_tick += 1;
        let mut due = Vec::new();
        while let Some(head) = self.queue.peek() {
            if head.next_run > self.current_tick {
                break;
            }
            let Some(envelope) = self.queue.pop() else {
                break;
            };
            // Cancelled tasks leave stale envelopes behind.
            let Some(entry) = self.tasks.get_mut(&envelope.task) else {
                continue;
            };
            if entry.next_run != envelope.next_run {
                continue;
            }
            due.push(entry.owner);
            entry.next_run = self.current_tick + entry.period;
            self.queue.push(TaskEnvelope {
                next_run: entry.next_run,
                task: envelope.task,
            });
        }
        self.runs += due.len() as u64;
        if !due.is_empty() {
            trace!(target: "arcade::scheduler", tick = self.current_tick, due = due.len(), "Tick advanced");
        }
        due
    }

    /// Ticks advanced so far
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Get scheduler statistics.
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            scheduled: self.tasks.len(),
            current_tick: self.current_tick,
            runs: self.runs,
            cancelled: self.cancelled,
        }
    }
}
