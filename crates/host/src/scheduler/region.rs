//! Region-aware scheduler of a regionized host
//!
//! Locations map to regions of 32x32 chunks per world. Each region has its
//! own queue; entity tasks follow the region the entity is tracked in.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;

use firstspawn_sdk::{Location, PlayerId, RegionizedScheduler, Rejected, Task};

/// Region size in blocks along x and z (32 chunks of 16 blocks)
const REGION_SHIFT: u32 = 9;

/// Identifies one independently ticked region
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionKey {
    pub world: String,
    pub x: i64,
    pub z: i64,
}

impl RegionKey {
    /// Region containing `location`
    pub fn of(location: &Location) -> Self {
        let (bx, _, bz) = location.block();
        Self {
            world: location.world.clone(),
            x: bx >> REGION_SHIFT,
            z: bz >> REGION_SHIFT,
        }
    }
}

struct Delayed {
    fire_at: u64,
    task: Task,
}

/// In-process regionized scheduler.
///
/// Work is held until [`RegionScheduler::tick`] is called.
pub struct RegionScheduler {
    regions: DashMap<RegionKey, Mutex<Vec<Task>>>,
    entities: DashSet<PlayerId>,
    global: Mutex<Vec<Delayed>>,
    entity_delayed: Mutex<Vec<(PlayerId, Delayed)>>,
    async_tasks: Mutex<Vec<Task>>,
    current_tick: AtomicU64,
    rejecting: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
    region_runs: DashMap<RegionKey, usize>,
}

impl Default for RegionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionScheduler {
    pub fn new() -> Self {
        Self {
            regions: DashMap::new(),
            entities: DashSet::new(),
            global: Mutex::new(Vec::new()),
            entity_delayed: Mutex::new(Vec::new()),
            async_tasks: Mutex::new(Vec::new()),
            current_tick: AtomicU64::new(0),
            rejecting: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
            region_runs: DashMap::new(),
        }
    }

    /// Start tracking an entity so entity-scoped tasks are accepted
    pub fn track_entity(&self, entity: PlayerId) {
        self.entities.insert(entity);
    }

    /// Stop tracking an entity; its pending tasks are retired on next tick
    pub fn untrack_entity(&self, entity: PlayerId) {
        self.entities.remove(&entity);
    }

    /// Make every subsequent submission fail
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::Relaxed);
    }

    /// Names of the scheduler methods called so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// How many location tasks have run in `region`
    pub fn runs_in(&self, region: &RegionKey) -> usize {
        self.region_runs.get(region).map(|n| *n).unwrap_or(0)
    }

    /// Work waiting to run
    pub fn pending(&self) -> usize {
        let regional: usize = self.regions.iter().map(|entry| entry.value().lock().len()).sum();
        regional
            + self.global.lock().len()
            + self.entity_delayed.lock().len()
            + self.async_tasks.lock().len()
    }

    /// Advance every region by one tick. Returns tasks executed.
    pub fn tick(&self) -> usize {
        let now = self.current_tick.fetch_add(1, Ordering::Relaxed) + 1;
        let mut count = 0;

        let async_tasks: Vec<Task> = std::mem::take(&mut *self.async_tasks.lock());
        for task in async_tasks {
            task();
            count += 1;
        }

        let keys: Vec<RegionKey> = self.regions.iter().map(|e| e.key().clone()).collect();
        for key in keys {
            let tasks: Vec<Task> = match self.regions.get(&key) {
                Some(queue) => {
                    let mut queue = queue.lock();
                    std::mem::take(&mut *queue)
                }
                None => Vec::new(),
            };
            let ran = tasks.len();
            for task in tasks {
                task();
            }
            if ran > 0 {
                *self.region_runs.entry(key).or_insert(0) += ran;
                count += ran;
            }
        }

        let due_global: Vec<Task> = {
            let mut global = self.global.lock();
            let (due, waiting): (Vec<_>, Vec<_>) =
                global.drain(..).partition(|d| d.fire_at <= now);
            *global = waiting;
            due.into_iter().map(|d| d.task).collect()
        };
        for task in due_global {
            task();
            count += 1;
        }

        let due_entity: Vec<(PlayerId, Task)> = {
            let mut delayed = self.entity_delayed.lock();
            let (due, waiting): (Vec<_>, Vec<_>) =
                delayed.drain(..).partition(|(_, d)| d.fire_at <= now);
            *delayed = waiting;
            due.into_iter().map(|(id, d)| (id, d.task)).collect()
        };
        for (entity, task) in due_entity {
            if self.entities.contains(&entity) {
                task();
                count += 1;
            } else {
                tracing::debug!("Entity {} retired, dropping scheduled task", entity);
            }
        }

        count
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }

    fn check_rejecting(&self, task: Task) -> Result<Task, Rejected> {
        if self.rejecting.load(Ordering::Relaxed) {
            Err(Rejected::new(task, "region scheduler is not accepting tasks"))
        } else {
            Ok(task)
        }
    }

    fn fire_at(&self, delay_ticks: u64) -> u64 {
        self.current_tick.load(Ordering::Relaxed) + delay_ticks.max(1)
    }
}

impl RegionizedScheduler for RegionScheduler {
    fn run_async_now(&self, task: Task) -> Result<(), Rejected> {
        self.record("run_async_now");
        let task = self.check_rejecting(task)?;
        self.async_tasks.lock().push(task);
        Ok(())
    }

    fn run_global_delayed(&self, task: Task, delay_ticks: u64) -> Result<(), Rejected> {
        self.record("run_global_delayed");
        let task = self.check_rejecting(task)?;
        let fire_at = self.fire_at(delay_ticks);
        self.global.lock().push(Delayed { fire_at, task });
        Ok(())
    }

    fn run_entity_delayed(
        &self,
        entity: PlayerId,
        task: Task,
        delay_ticks: u64,
    ) -> Result<(), Rejected> {
        self.record("run_entity_delayed");
        let task = self.check_rejecting(task)?;
        if !self.entities.contains(&entity) {
            return Err(Rejected::new(task, format!("entity {} is not tracked", entity)));
        }
        let fire_at = self.fire_at(delay_ticks);
        self.entity_delayed
            .lock()
            .push((entity, Delayed { fire_at, task }));
        Ok(())
    }

    fn run_at_location(&self, location: &Location, task: Task) -> Result<(), Rejected> {
        self.record("run_at_location");
        let task = self.check_rejecting(task)?;
        self.regions
            .entry(RegionKey::of(location))
            .or_default()
            .lock()
            .push(task);
        Ok(())
    }
}
