//! Worker team: the persistent pool and the per-tick sizing heuristic.
//!
//! The pool is built once per run and its threads live until the `Sim` is
//! dropped.  What changes from tick to tick is only the *active* team size:
//! the number of contiguous chunks the vehicle slice is split into for the
//! reset and motion phases.  Each chunk is one unit of work on the pool, so
//! `active` chunks occupy at most `active` workers.
//!
//! Team size never affects results.  Every vehicle update is independent and
//! the per-chunk crossing counts are combined with an integer sum, which is
//! exact in any order.

use xing_core::TeamPolicy;

use crate::SimResult;

/// Roughly one worker per this many vehicles.
pub const VEHICLES_PER_WORKER: usize = 16;

/// Pick how many workers should share this tick's vehicle updates.
///
/// ```text
/// k = ceil(vehicles / 16) + bonus,   bonus = 1 + greens / 2  if greens > 0
///                                          = 1               otherwise
/// k clamped to [1, max_workers]
/// ```
///
/// Vehicle updates dominate the cost of a tick, hence the per-16 share.  More
/// green lights mean more vehicles reaching the crossing branch, which earns
/// a small bonus.
pub fn choose_team_size(vehicle_count: usize, lights_green: usize, max_workers: usize) -> usize {
    let vehicle_share = vehicle_count.div_ceil(VEHICLES_PER_WORKER);
    let branch_bonus = if lights_green > 0 { 1 + lights_green / 2 } else { 1 };
    (vehicle_share + branch_bonus).clamp(1, max_workers.max(1))
}

// ── Team ──────────────────────────────────────────────────────────────────────

/// The persistent worker pool plus the currently active team size.
pub struct Team {
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,

    policy:      TeamPolicy,
    max_workers: usize,
    active:      usize,
}

impl Team {
    /// Start the pool.  `num_threads = None` uses every logical core.
    ///
    /// A pool of one thread is never built; such a team runs inline on the
    /// caller.
    #[cfg(feature = "parallel")]
    pub fn new(policy: TeamPolicy, num_threads: Option<usize>) -> SimResult<Self> {
        let threads = num_threads
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1)
            .max(1);
        if threads == 1 {
            return Ok(Self::sequential(policy));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("xing-worker-{i}"))
            .build()?;
        let max_workers = pool.current_num_threads();
        log::debug!("worker pool started with {max_workers} threads");
        Ok(Self {
            pool: Some(pool),
            policy,
            max_workers,
            active: 1,
        })
    }

    #[cfg(not(feature = "parallel"))]
    pub fn new(policy: TeamPolicy, _num_threads: Option<usize>) -> SimResult<Self> {
        Ok(Self::sequential(policy))
    }

    /// A team of exactly one worker: the calling thread.
    pub fn sequential(policy: TeamPolicy) -> Self {
        Self {
            #[cfg(feature = "parallel")]
            pool: None,
            policy,
            max_workers: 1,
            active: 1,
        }
    }

    /// Pool size `M`, the upper bound for any team.
    #[inline]
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Team size chosen by the last [`retarget`](Self::retarget).
    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn policy(&self) -> TeamPolicy {
        self.policy
    }

    /// Resize the active team for the coming tick and return the new size.
    pub fn retarget(&mut self, active_vehicles: usize, lights_green: usize) -> usize {
        self.active = match self.policy {
            TeamPolicy::Adaptive => {
                choose_team_size(active_vehicles, lights_green, self.max_workers)
            }
            TeamPolicy::Fixed(k) => k.clamp(1, self.max_workers),
        };
        self.active
    }

    /// Chunk length that splits `len` elements into `active` pieces.
    #[inline]
    pub fn chunk_len(&self, len: usize) -> usize {
        len.div_ceil(self.active).max(1)
    }

    /// `true` when this tick's parallel phases should go to the pool.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        #[cfg(feature = "parallel")]
        {
            self.active > 1 && self.pool.is_some()
        }
        #[cfg(not(feature = "parallel"))]
        {
            false
        }
    }

    /// Run `op` inside the pool so that Rayon parallel iterators started by
    /// `op` use this team's threads.  Returns once every spawned task has
    /// finished, which makes the call a full barrier.
    #[cfg(feature = "parallel")]
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R:  Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
