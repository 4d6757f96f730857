//! Cancellable deferred tasks on a virtual clock.
//!
//! Every delay in the game (match check, mismatch rollback, countdown tick)
//! is a task keyed to the session that scheduled it. Rebuilding a session
//! cancels everything keyed to the old one, so no stale callback can act on
//! a fresh board.
//!
//! Time only moves when the owner calls [`Scheduler::pop_due`] or
//! [`Scheduler::advance_to`]; a front end maps wall-clock time onto it.
//!
//! ```
//! use memory_match::schedule::{Scheduler, TaskKind};
//! use memory_match::session::SessionId;
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(SessionId(1), TaskKind::MatchCheck, 800);
//!
//! assert!(scheduler.pop_due(799).is_none());
//! let task = scheduler.pop_due(800).unwrap();
//! assert_eq!(task.kind, TaskKind::MatchCheck);
//! assert_eq!(scheduler.now_ms(), 800);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// Unique id of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

/// What a task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Compare the two revealed tiles.
    MatchCheck,
    /// Turn a mismatched pair face down again.
    MismatchRollback,
    /// One countdown second elapsed.
    CountdownTick,
}

/// A pending one-shot or repeating task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub session: SessionId,
    pub kind: TaskKind,
    /// Virtual time at which the task fires.
    pub due_ms: u64,
    /// Repeat period; `None` for one-shot tasks.
    pub interval_ms: Option<u64>,
}

/// Virtual-clock task queue.
///
/// Tasks fire in due-time order; ties fire in scheduling order.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: FxHashMap<TaskId, ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Schedule a one-shot task `delay_ms` from now.
    pub fn schedule(&mut self, session: SessionId, kind: TaskKind, delay_ms: u64) -> TaskId {
        self.insert(session, kind, delay_ms, None)
    }

    /// Schedule a task that fires every `interval_ms`, first one interval from now.
    pub fn schedule_repeating(
        &mut self,
        session: SessionId,
        kind: TaskKind,
        interval_ms: u64,
    ) -> TaskId {
        assert!(interval_ms > 0, "Repeat interval must be positive");
        self.insert(session, kind, interval_ms, Some(interval_ms))
    }

    fn insert(
        &mut self,
        session: SessionId,
        kind: TaskKind,
        delay_ms: u64,
        interval_ms: Option<u64>,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            ScheduledTask {
                id,
                session,
                kind,
                due_ms: self.now_ms.saturating_add(delay_ms),
                interval_ms,
            },
        );
        id
    }

    /// Cancel every task keyed to `session`. Returns how many were dropped.
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| t.session != session);
        before - self.tasks.len()
    }

    /// Cancel tasks of one kind for `session`.
    pub fn cancel_kind(&mut self, session: SessionId, kind: TaskKind) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| !(t.session == session && t.kind == kind));
        before - self.tasks.len()
    }

    /// Pending tasks for `session`, in firing order.
    #[must_use]
    pub fn pending_for(&self, session: SessionId) -> Vec<&ScheduledTask> {
        let mut tasks: Vec<_> = self
            .tasks
            .values()
            .filter(|t| t.session == session)
            .collect();
        tasks.sort_by_key(|t| (t.due_ms, t.id));
        tasks
    }

    /// Take the earliest task due at or before `until`, moving the clock to
    /// its due time. Repeating tasks stay queued for their next period,
    /// unless that period would run past the end of the clock.
    pub fn pop_due(&mut self, until: u64) -> Option<ScheduledTask> {
        let id = self
            .tasks
            .values()
            .filter(|t| t.due_ms <= until)
            .min_by_key(|t| (t.due_ms, t.id))
            .map(|t| t.id)?;

        let interval_ms = self.tasks.get(&id)?.interval_ms;
        let task = match interval_ms {
            Some(interval) => {
                let fired = self.tasks.get(&id)?.clone();
                match fired.due_ms.checked_add(interval) {
                    Some(next) => {
                        if let Some(queued) = self.tasks.get_mut(&id) {
                            queued.due_ms = next;
                        }
                    }
                    None => {
                        self.tasks.remove(&id);
                    }
                }
                fired
            }
            None => self.tasks.remove(&id)?,
        };

        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time_ms: u64) {
        self.now_ms = self.now_ms.max(time_ms);
    }
}
