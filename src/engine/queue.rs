//! FIFO task queue with a single background runner.
//!
//! The first enqueue on an idle queue spawns a runner thread; tasks added
//! while it drains are picked up by the same runner. A failing task is
//! recorded and logged, and the next task still runs.

use super::busy::{BusyStack, BusyToken};
use crate::error::{DeskError, Result};
use crate::ui::ActivityLog;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

pub type TaskFn = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub id: TaskId,
    pub label: String,
    pub result: TaskResult,
}

impl TaskOutcome {
    pub fn succeeded(&self) -> bool {
        self.result == TaskResult::Succeeded
    }
}

struct QueuedTask {
    id: TaskId,
    label: String,
    run: TaskFn,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<QueuedTask>,
    /// Set from the runner's spawn until it has released its busy entry
    draining: bool,
    next_id: u64,
    outcomes: Vec<TaskOutcome>,
}

struct Shared {
    state: Mutex<QueueState>,
    idle: Condvar,
    busy: BusyStack,
    log: Arc<ActivityLog>,
}

#[derive(Clone)]
pub struct TaskQueue {
    shared: Arc<Shared>,
}

impl TaskQueue {
    pub fn new(busy: BusyStack, log: Arc<ActivityLog>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState::default()),
                idle: Condvar::new(),
                busy,
                log,
            }),
        }
    }

    /// Append a task and start a runner if none is active.
    pub fn enqueue<F>(&self, label: impl Into<String>, task: F) -> Result<TaskId>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let label = label.into();
        let (id, start_runner) = {
            let mut state = self.lock();
            state.next_id += 1;
            let id = TaskId(state.next_id);
            state.pending.push_back(QueuedTask {
                id,
                label: label.clone(),
                run: Box::new(task),
            });
            let start = !state.draining;
            if start {
                state.draining = true;
            }
            (id, start)
        };
        self.shared.log.info(&format!("Queued: {}", label));

        if start_runner {
            let shared = Arc::clone(&self.shared);
            let spawned = thread::Builder::new()
                .name("task-queue".to_string())
                .spawn(move || drain(shared));
            if let Err(e) = spawned {
                let mut state = self.lock();
                state.draining = false;
                state.pending.clear();
                self.shared.idle.notify_all();
                return Err(DeskError::Other(format!(
                    "Failed to start task runner: {}",
                    e
                )));
            }
        }
        Ok(id)
    }

    /// True while a runner is draining the queue.
    pub fn is_draining(&self) -> bool {
        self.lock().draining
    }

    /// Block until the queue is empty and the runner has stopped.
    pub fn wait_idle(&self) {
        let mut state = self.lock();
        while state.draining {
            state = self
                .shared
                .idle
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    pub fn outcomes(&self) -> Vec<TaskOutcome> {
        self.lock().outcomes.clone()
    }

    pub fn take_outcomes(&self) -> Vec<TaskOutcome> {
        std::mem::take(&mut self.lock().outcomes)
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn drain(shared: Arc<Shared>) {
    loop {
        let initial = shared
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pending
            .len();
        let token = shared
            .busy
            .push(format!("Processing queue ({} items)", initial));
        run_pending(&shared, token);
        shared.busy.pop(token);

        // enqueue does not spawn while draining, so late arrivals are ours
        let mut state = shared.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.pending.is_empty() {
            state.draining = false;
            shared.idle.notify_all();
            return;
        }
    }
}

fn run_pending(shared: &Shared, token: BusyToken) {
    loop {
        let next = {
            let mut state = shared.state.lock().unwrap_or_else(|e| e.into_inner());
            state
                .pending
                .pop_front()
                .map(|task| (task, state.pending.len()))
        };
        let Some((task, remaining)) = next else {
            return;
        };

        shared.busy.relabel(
            token,
            format!("Running: {} ({} remaining)", task.label, remaining),
        );
        let result = match panic::catch_unwind(AssertUnwindSafe(task.run)) {
            Ok(Ok(())) => TaskResult::Succeeded,
            Ok(Err(e)) => TaskResult::Failed(e.to_string()),
            Err(_) => TaskResult::Failed("task panicked".to_string()),
        };
        if let TaskResult::Failed(reason) = &result {
            shared
                .log
                .error(&format!("Task '{}' failed: {}", task.label, reason));
        }

        let mut state = shared.state.lock().unwrap_or_else(|e| e.into_inner());
        state.outcomes.push(TaskOutcome {
            id: task.id,
            label: task.label,
            result,
        });
    }
}
