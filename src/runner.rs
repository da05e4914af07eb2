//! Driver Loop
//!
//! A counted, single-threaded loop: classify the iteration, build one
//! record, push it, independently roll for a burst batch, sleep, and
//! repeat. The only blocking point is the deliberate inter-iteration
//! sleep; a cooperative shutdown flag is checked between iterations, so
//! an operator interrupt ends the run through the normal exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::info;

use rand::Rng;

use crate::broker::Broker;
use crate::error::SynthError;
use crate::generator::{LogGenerator, RecordKind, classify};
use crate::record::LogRecord;
use std::ops::RangeInclusive;

/// Chance that any iteration also emits a burst batch, independent of
/// the anomaly draw; a burst can co-occur with an anomalous record.
pub const BURST_PROBABILITY: f64 = 0.05;

/// Burst batch sizes are drawn uniformly from this range.
pub const BURST_SIZE: RangeInclusive<usize> = 5..=15;

/// Runner lifecycle. Aborted covers both connectivity failure and
/// operator interrupt; the two are told apart by the run result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Completed,
    Aborted,
}

/// Parameters for one run.
pub struct RunOptions {
    /// Number of loop iterations (each pushes one record, plus bursts).
    pub count: u64,
    /// Sleep between iterations.
    pub interval: Duration,
    /// Probability that an iteration's record is anomalous, in [0, 1].
    pub anomaly_ratio: f64,
    /// List key the records are pushed onto.
    pub key: String,
    /// Burst trigger chance. Fixed at [`BURST_PROBABILITY`] in
    /// production; tests set 0.0 or 1.0 to pin the branch.
    pub burst_probability: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            count: 100,
            interval: Duration::from_secs(1),
            anomaly_ratio: 0.1,
            key: "firewall_logs".to_string(),
            burst_probability: BURST_PROBABILITY,
        }
    }
}

/// What a run pushed, and how it ended.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub normal: u64,
    pub anomalous: u64,
    pub bursts: u64,
    pub burst_records: u64,
    /// Set when the shutdown flag cut the run short.
    pub interrupted: bool,
}

impl RunReport {
    pub fn total_published(&self) -> u64 {
        self.normal + self.anomalous + self.burst_records
    }
}

pub struct Runner<B: Broker> {
    generator: LogGenerator,
    broker: B,
    shutdown: Arc<AtomicBool>,
    state: RunnerState,
}

impl<B: Broker> Runner<B> {
    pub fn new(generator: LogGenerator, broker: B) -> Self {
        Self {
            generator,
            broker,
            shutdown: Arc::new(AtomicBool::new(false)),
            state: RunnerState::Idle,
        }
    }

    /// Handle for an interrupt handler to request a graceful stop.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Run the generate-and-push loop.
    ///
    /// Returns the report on completion or graceful interrupt; any
    /// publish failure aborts the whole run and propagates.
    pub fn run<R: Rng>(
        &mut self,
        opts: &RunOptions,
        rng: &mut R,
    ) -> Result<RunReport, SynthError> {
        self.state = RunnerState::Running;
        match self.drive(opts, rng) {
            Ok(report) => {
                self.state = if report.interrupted {
                    RunnerState::Aborted
                } else {
                    RunnerState::Completed
                };
                Ok(report)
            }
            Err(err) => {
                self.state = RunnerState::Aborted;
                Err(err)
            }
        }
    }

    fn drive<R: Rng>(&mut self, opts: &RunOptions, rng: &mut R) -> Result<RunReport, SynthError> {
        let mut report = RunReport::default();

        for iteration in 0..opts.count {
            if self.shutdown.load(Ordering::SeqCst) {
                info!(pushed = report.total_published(), "interrupt received, stopping");
                report.interrupted = true;
                return Ok(report);
            }

            let roll = rng.random_range(0.0..1.0);
            let log_source = self.generator.pick_log_source(rng);
            let (record, kind) = match classify(roll, opts.anomaly_ratio) {
                RecordKind::Anomalous => {
                    report.anomalous += 1;
                    (self.generator.anomalous(rng, log_source), "anomalous")
                }
                RecordKind::Normal => {
                    report.normal += 1;
                    (self.generator.normal(rng, log_source), "normal")
                }
            };
            self.publish(&opts.key, &record)?;
            info!(
                iteration = iteration + 1,
                count = opts.count,
                log_source,
                kind,
                "pushed record"
            );

            // Independent of the anomaly draw; both can fire in one
            // iteration.
            if rng.random_bool(opts.burst_probability) {
                let size = rng.random_range(BURST_SIZE);
                let burst_source = self.generator.pick_log_source(rng);
                let batch = self.generator.burst(rng, burst_source, size);
                for record in &batch {
                    self.publish(&opts.key, record)?;
                }
                report.bursts += 1;
                report.burst_records += size as u64;
                info!(size, log_source = burst_source, "pushed burst batch");
            }

            if !opts.interval.is_zero() {
                thread::sleep(opts.interval);
            }
        }

        Ok(report)
    }

    fn publish(&mut self, key: &str, record: &LogRecord) -> Result<(), SynthError> {
        let payload = record.to_json()?;
        self.broker.push(key, &payload)
    }
}
