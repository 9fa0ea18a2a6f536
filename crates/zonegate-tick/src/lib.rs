//! Fixed-period tick scheduler for ZoneGate.
//!
//! Entitlements decay by one second per tick, so the decay pass must run
//! on a steady cadence (one second by default) regardless of how busy the
//! event side is. The scheduler only decides *when*; the caller runs the
//! pass and reports back how long it took.
//!
//! # Host-driven mode
//!
//! A `period` of `None` disables the timer: [`TickScheduler::wait_for_tick`]
//! pends forever. Use this when the host already has its own clock and
//! calls the decay pass directly.
//!
//! # Integration
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         _ = shutdown.changed() => break,
//!         tick = scheduler.wait_for_tick() => {
//!             engine.lock().await.decay_tick();
//!             scheduler.record_tick_end();
//!         }
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use rand::Rng;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when the scheduler wakes up late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPolicy {
    /// Count the missed ticks as skipped and schedule the next one a full
    /// period from now. A stalled server never fires a burst of passes.
    #[default]
    Skip,
    /// Keep the original cadence: the next tick fires one period after
    /// the one that was missed, however late this one ran.
    Drop,
}

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Time between ticks. `None` means host-driven (never fires).
    pub period: Option<Duration>,
    pub policy: TickPolicy,
    /// Fraction of the period (0.0–1.0) a pass may use before a warning
    /// is logged.
    pub budget_warn_threshold: f64,
    /// Upper bound of the random delay added before the first tick.
    pub initial_jitter: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period: Some(Duration::from_secs(1)),
            policy: TickPolicy::default(),
            budget_warn_threshold: 0.5,
            initial_jitter: Duration::ZERO,
        }
    }
}

impl TickConfig {
    /// Shortest period accepted. Anything below is clamped up.
    pub const MIN_PERIOD: Duration = Duration::from_millis(10);

    /// A config ticking every `ms` milliseconds; `0` is host-driven.
    pub fn from_millis(ms: u64) -> Self {
        Self {
            period: (ms > 0).then(|| Duration::from_millis(ms)),
            ..Default::default()
        }
    }

    /// Host-driven: the timer never fires.
    pub fn host_driven() -> Self {
        Self {
            period: None,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values. Called by [`TickScheduler::new`].
    pub fn validated(mut self) -> Self {
        if let Some(period) = self.period {
            if period < Self::MIN_PERIOD {
                warn!(
                    period_ms = period.as_secs_f64() * 1000.0,
                    min_ms = Self::MIN_PERIOD.as_millis() as u64,
                    "tick period below minimum, clamping"
                );
                self.period = Some(Self::MIN_PERIOD);
            }
        }
        self.budget_warn_threshold = self.budget_warn_threshold.clamp(0.0, 1.0);
        self
    }
}

// ---------------------------------------------------------------------------
// TickInfo / TickMetrics
// ---------------------------------------------------------------------------

/// One fired tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Starts at 1.
    pub tick: u64,
    /// `true` if the scheduler woke more than a tenth of a period late.
    pub late: bool,
    /// Whole periods that passed without a tick.
    pub ticks_skipped: u64,
}

/// Counters since the scheduler was created.
#[derive(Debug, Clone, Default)]
pub struct TickMetrics {
    pub total_ticks: u64,
    pub total_late: u64,
    pub total_skipped: u64,
    pub last_pass_time: Duration,
    pub max_pass_time: Duration,
    /// Passes that used more than `budget_warn_threshold` of the period.
    pub slow_passes: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Decides when the next decay pass runs.
pub struct TickScheduler {
    config: TickConfig,
    tick_count: u64,
    next_tick: Option<TokioInstant>,
    pass_start: Option<Instant>,
    paused: bool,
    metrics: TickMetrics,
}

impl TickScheduler {
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();

        let next_tick = config.period.map(|period| {
            let jitter = if config.initial_jitter.is_zero() {
                Duration::ZERO
            } else {
                let max_us = config.initial_jitter.as_micros() as u64;
                Duration::from_micros(rand::rng().random_range(0..max_us.max(1)))
            };
            TokioInstant::now() + period + jitter
        });

        match config.period {
            Some(period) => debug!(
                period_ms = period.as_secs_f64() * 1000.0,
                policy = ?config.policy,
                "tick scheduler created"
            ),
            None => debug!("tick scheduler created in host-driven mode"),
        }

        Self {
            config,
            tick_count: 0,
            next_tick,
            pass_start: None,
            paused: false,
            metrics: TickMetrics::default(),
        }
    }

    /// Resolves when the next tick is due.
    ///
    /// Host-driven or paused schedulers pend forever, which lets the call
    /// sit in a `tokio::select!` next to a shutdown branch.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let (due, period) = match (self.next_tick, self.config.period) {
            (Some(due), Some(period)) if !self.paused => (due, period),
            _ => std::future::pending().await,
        };

        time::sleep_until(due).await;

        let now = TokioInstant::now();
        self.tick_count += 1;
        self.pass_start = Some(Instant::now());

        let late_by = now.saturating_duration_since(due);
        let late = late_by > period / 10;
        let ticks_skipped = if late {
            (late_by.as_nanos() / period.as_nanos()) as u64
        } else {
            0
        };

        self.next_tick = Some(match self.config.policy {
            TickPolicy::Skip => now + period,
            TickPolicy::Drop => due + period * (ticks_skipped as u32 + 1),
        });

        if late {
            self.metrics.total_late += 1;
            if ticks_skipped > 0 {
                warn!(
                    tick = self.tick_count,
                    skipped = ticks_skipped,
                    late_ms = late_by.as_secs_f64() * 1000.0,
                    "decay tick ran late"
                );
            }
        }
        self.metrics.total_skipped += ticks_skipped;
        self.metrics.total_ticks += 1;

        trace!(tick = self.tick_count, late, "tick fired");

        TickInfo {
            tick: self.tick_count,
            late,
            ticks_skipped,
        }
    }

    /// Records that the pass for the current tick has finished.
    pub fn record_tick_end(&mut self) {
        let Some(start) = self.pass_start.take() else {
            return;
        };
        let elapsed = start.elapsed();
        self.metrics.last_pass_time = elapsed;
        if elapsed > self.metrics.max_pass_time {
            self.metrics.max_pass_time = elapsed;
        }

        if let Some(period) = self.config.period {
            let used = elapsed.as_secs_f64() / period.as_secs_f64();
            if used >= self.config.budget_warn_threshold {
                self.metrics.slow_passes += 1;
                warn!(
                    tick = self.tick_count,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    period_ms = period.as_secs_f64() * 1000.0,
                    "decay pass is using most of its period"
                );
            }
        }
    }

    /// Stops ticking until [`resume`](Self::resume). Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(tick = self.tick_count, "tick scheduler paused");
        }
    }

    /// Resumes ticking one full period from now.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            if let Some(period) = self.config.period {
                self.next_tick = Some(TokioInstant::now() + period);
            }
            debug!(tick = self.tick_count, "tick scheduler resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_host_driven(&self) -> bool {
        self.config.period.is_none()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn period(&self) -> Option<Duration> {
        self.config.period
    }

    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }
}
