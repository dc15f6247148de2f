//! Driver loop: periodic sampling, decision, and lease side effects.
//!
//! One cooperative loop owns all mutable state (previous snapshot, engine
//! state, held lease). Each tick runs to completion before the next event is
//! considered, and a pending termination always wins over a pending tick.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::engine::{DecisionEngine, Transition};
use super::lease::PowerLeaseService;
use super::netdev::{InterfaceSnapshot, MetricsSource};
use super::notify::StatusNotifier;
use super::sampler::aggregate_traffic;
use crate::error::Result;

const INHIBIT_WHAT: &str = "sleep:shutdown";
const INHIBIT_WHO: &str = "wakeguard";
const INHIBIT_WHY: &str = "network activity";
const INHIBIT_MODE: &str = "block";

const STATUS_INHIBITED: &str = "Inhibited";
const STATUS_UNINHIBITED: &str = "Uninhibited";

/// Daemon configuration. Threshold and wait are expressed against the tick
/// interval: threshold in KB/s scaled to bytes-per-tick, wait in ticks.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub threshold_kib_per_sec: u64,
    pub wait_ticks: u64,
    pub tick_interval: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            threshold_kib_per_sec: 50,
            wait_ticks: 30,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl DaemonConfig {
    /// The strict trigger level in bytes moved per tick.
    pub fn threshold_bytes_per_tick(&self) -> u64 {
        let bytes_per_sec = self.threshold_kib_per_sec.saturating_mul(1024);
        (bytes_per_sec as f64 * self.tick_interval.as_secs_f64()).round() as u64
    }
}

/// The sampling/decision loop and all state it mutates.
pub struct Daemon<M, L, N>
where
    M: MetricsSource,
    L: PowerLeaseService,
    N: StatusNotifier,
{
    config: DaemonConfig,
    metrics: M,
    leases: L,
    notifier: N,
    engine: DecisionEngine,
    previous: InterfaceSnapshot,
    lease: Option<L::Lease>,
}

impl<M, L, N> Daemon<M, L, N>
where
    M: MetricsSource,
    L: PowerLeaseService,
    N: StatusNotifier,
{
    pub fn new(config: DaemonConfig, metrics: M, leases: L, notifier: N) -> Self {
        let engine = DecisionEngine::new(config.threshold_bytes_per_tick(), config.wait_ticks);
        Self {
            config,
            metrics,
            leases,
            notifier,
            engine,
            previous: InterfaceSnapshot::new(),
            lease: None,
        }
    }

    /// Take the baseline snapshot and announce readiness.
    ///
    /// The first tick needs a previous snapshot to diff against; without this
    /// the first delta would be the interfaces' lifetime totals.
    pub fn start(&mut self) -> Result<()> {
        self.previous = self.metrics.read_snapshot()?;
        self.notifier.ready();
        self.notifier.status(STATUS_UNINHIBITED);
        Ok(())
    }

    /// One sample → aggregate → decide → act cycle.
    ///
    /// Any error out of here is fatal to the daemon; a tick is never retried
    /// or skipped, since measuring nothing and believing something was
    /// measured are different states.
    pub async fn tick(&mut self) -> Result<()> {
        let current = self.metrics.read_snapshot()?;
        let bytes_moved = aggregate_traffic(&self.previous, &current);
        self.previous = current;

        match self.engine.observe(bytes_moved) {
            Transition::Inhibit => {
                let lease = self
                    .leases
                    .acquire(INHIBIT_WHAT, INHIBIT_WHO, INHIBIT_WHY, INHIBIT_MODE)
                    .await?;
                self.lease = Some(lease);
                self.notifier.status(STATUS_INHIBITED);
            }
            Transition::Uninhibit => {
                if let Some(lease) = self.lease.take() {
                    self.leases.release(lease)?;
                }
                self.notifier.status(STATUS_UNINHIBITED);
            }
            Transition::Hold => {}
        }

        Ok(())
    }

    /// Release the lease if one is held and announce stopping.
    ///
    /// Runs on every exit path, exactly once; the lease must never outlive
    /// the loop.
    pub fn shutdown(&mut self) -> Result<()> {
        let outcome = match self.lease.take() {
            Some(lease) => self.leases.release(lease),
            None => Ok(()),
        };
        if let Err(ref err) = outcome {
            log::error!("Failed to release inhibitor lease: {err}");
        }
        self.notifier.stopping();
        outcome
    }

    /// Run the loop until the shutdown future resolves or a fatal error.
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if let Err(err) = self.start() {
            log::error!("Fatal: {err}");
            return Err(err);
        }

        let mut ticker = interval(self.config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; consume it so the
        // first sample lands one full interval after the baseline.
        ticker.tick().await;

        tokio::pin!(shutdown);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break Ok(()),
                _ = ticker.tick() => {
                    if let Err(err) = self.tick().await {
                        break Err(err);
                    }
                }
            }
        };

        if let Err(ref err) = outcome {
            log::error!("Fatal: {err}");
        }

        let teardown = self.shutdown();
        outcome.and(teardown)
    }
}
