//! Main-thread scheduler driven by explicit ticks
//!
//! Nothing runs until [`TickScheduler::tick`] is called, which makes the
//! order of deferred work fully deterministic for embedding and tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use firstspawn_sdk::{MainThreadScheduler, Rejected, Task};

/// Capacity of the next-tick queue
const QUEUE_CAPACITY: usize = 1024;

new_key_type! {
    /// Key for pending delayed tasks
    pub struct TimerKey;
}

/// A delayed task waiting for its tick
struct Timer {
    fire_at: u64,
    task: Task,
}

/// Single-threaded scheduler with a bounded next-tick queue, delayed
/// timers and an async queue.
pub struct TickScheduler {
    sender: Sender<Task>,
    receiver: Receiver<Task>,
    async_sender: Sender<Task>,
    async_receiver: Receiver<Task>,
    timers: Mutex<SlotMap<TimerKey, Timer>>,
    current_tick: AtomicU64,
    rejecting: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(QUEUE_CAPACITY);
        let (async_sender, async_receiver) = unbounded();
        Self {
            sender,
            receiver,
            async_sender,
            async_receiver,
            timers: Mutex::new(SlotMap::with_key()),
            current_tick: AtomicU64::new(0),
            rejecting: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent submission fail (simulates a broken scheduler)
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::Relaxed);
    }

    /// Names of the scheduler methods called so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// Ticks processed so far
    pub fn current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Relaxed)
    }

    /// Work waiting to run (next-tick, delayed and async)
    pub fn pending(&self) -> usize {
        self.receiver.len() + self.async_receiver.len() + self.timers.lock().len()
    }

    /// Advance one tick.
    ///
    /// Runs async work, then queued next-tick work, then timers that are due.
    /// Returns the number of tasks executed.
    pub fn tick(&self) -> usize {
        let now = self.current_tick.fetch_add(1, Ordering::Relaxed) + 1;
        let mut count = 0;

        while let Ok(task) = self.async_receiver.try_recv() {
            task();
            count += 1;
        }

        // Only drain what was queued before this tick started
        let queued = self.receiver.len();
        for _ in 0..queued {
            match self.receiver.try_recv() {
                Ok(task) => {
                    task();
                    count += 1;
                }
                Err(_) => break,
            }
        }

        let due: Vec<Task> = {
            let mut timers = self.timers.lock();
            let keys: Vec<TimerKey> = timers
                .iter()
                .filter(|(_, timer)| timer.fire_at <= now)
                .map(|(key, _)| key)
                .collect();
            keys.into_iter()
                .filter_map(|key| timers.remove(key))
                .map(|timer| timer.task)
                .collect()
        };
        for task in due {
            task();
            count += 1;
        }

        if count > 0 {
            tracing::trace!("Tick {} ran {} tasks", now, count);
        }
        count
    }

    /// Tick until nothing is pending or `max_ticks` is reached
    pub fn run_until_idle(&self, max_ticks: u64) -> usize {
        let mut total = 0;
        for _ in 0..max_ticks {
            if self.pending() == 0 {
                break;
            }
            total += self.tick();
        }
        total
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }

    fn check_rejecting(&self, task: Task) -> Result<Task, Rejected> {
        if self.rejecting.load(Ordering::Relaxed) {
            Err(Rejected::new(task, "scheduler is not accepting tasks"))
        } else {
            Ok(task)
        }
    }
}

impl MainThreadScheduler for TickScheduler {
    fn run_task(&self, task: Task) -> Result<(), Rejected> {
        self.record("run_task");
        let task = self.check_rejecting(task)?;
        match self.sender.try_send(task) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(task)) => {
                tracing::warn!("Task queue full, rejecting task");
                Err(Rejected::new(task, "task queue full"))
            }
            Err(TrySendError::Disconnected(task)) => {
                Err(Rejected::new(task, "task queue disconnected"))
            }
        }
    }

    fn run_task_later(&self, task: Task, delay_ticks: u64) -> Result<(), Rejected> {
        self.record("run_task_later");
        let task = self.check_rejecting(task)?;
        let fire_at = self.current_tick() + delay_ticks.max(1);
        self.timers.lock().insert(Timer { fire_at, task });
        Ok(())
    }

    fn run_task_async(&self, task: Task) -> Result<(), Rejected> {
        self.record("run_task_async");
        let task = self.check_rejecting(task)?;
        self.async_sender
            .send(task)
            .map_err(|e| Rejected::new(e.into_inner(), "async queue disconnected"))
    }
}
