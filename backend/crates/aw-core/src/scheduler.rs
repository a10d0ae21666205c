use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use tokio::task::AbortHandle;

/// Timer families owned by the orchestrator. Each has at most one pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    StartupPoll,
    EmptyCheck,
    ManualShutdown,
}

/// Slot-based timer service.
///
/// Scheduling into an occupied slot aborts the task already there. A one-shot
/// task leaves its slot when it fires, so the body it runs is never aborted
/// by a later `schedule` or by `close`; bodies must re-check state instead.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

#[derive(Default)]
struct SchedulerInner {
    closed: bool,
    next_seq: u64,
    slots: HashMap<TimerKind, Slot>,
}

struct Slot {
    seq: u64,
    handle: AbortHandle,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `task` once after `delay`. Returns false once closed.
    pub fn schedule<F>(&self, kind: TimerKind, delay: Duration, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.closed {
            debug!("Scheduler closed, not scheduling {:?}", kind);
            return false;
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;

        let scheduler = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if scheduler.fire(kind, seq) {
                task.await;
            }
        })
        .abort_handle();

        Self::replace(&mut inner, kind, Slot { seq, handle });
        true
    }

    /// Call `make_task` every `period`, first after one period. Each run is
    /// spawned on its own so aborting the timer never interrupts a run
    /// already in progress.
    pub fn schedule_repeating<F, Fut>(&self, kind: TimerKind, period: Duration, make_task: F) -> bool
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.closed {
            debug!("Scheduler closed, not scheduling {:?}", kind);
            return false;
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tokio::spawn(make_task());
            }
        })
        .abort_handle();

        Self::replace(&mut inner, kind, Slot { seq, handle });
        true
    }

    /// Abort the pending task in `kind`, if any
    pub fn cancel(&self, kind: TimerKind) {
        if let Some(slot) = self.lock().slots.remove(&kind) {
            debug!("Cancelled {:?} timer", kind);
            slot.handle.abort();
        }
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.lock().slots.contains_key(&kind)
    }

    /// Abort everything and refuse further scheduling
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        for (kind, slot) in inner.slots.drain() {
            debug!("Aborting {:?} timer", kind);
            slot.handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn replace(inner: &mut SchedulerInner, kind: TimerKind, slot: Slot) {
        if let Some(previous) = inner.slots.insert(kind, slot) {
            previous.handle.abort();
        }
    }

    /// Claim the slot for a one-shot task about to run. False if it was
    /// replaced or cancelled in the meantime.
    fn fire(&self, kind: TimerKind, seq: u64) -> bool {
        let mut inner = self.lock();
        if inner.closed {
            return false;
        }
        match inner.slots.get(&kind) {
            Some(slot) if slot.seq == seq => {
                inner.slots.remove(&kind);
                true
            }
            _ => false,
        }
    }
}
