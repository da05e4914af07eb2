//! # fwlog-sim - Synthetic Firewall Log Generator
//!
//! Generates fake firewall log records (normal, anomalous, and burst
//! patterns) and pushes them onto a Redis list so an anomaly-detection
//! consumer has something to chew on.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         fwlog-sim                            │
//! │                                                              │
//! │  ┌──────────────┐   ┌────────────────┐   ┌───────────────┐   │
//! │  │ AddressPools │──▶│  LogGenerator  │──▶│    Runner     │   │
//! │  │ (built once) │   │ normal/anomal/ │   │ classify→push │   │
//! │  └──────────────┘   │     burst      │   │    →sleep     │   │
//! │                     └────────────────┘   └───────┬───────┘   │
//! │                                                  ▼           │
//! │                                         ┌───────────────┐    │
//! │                                         │ Broker trait  │    │
//! │                                         │ Redis | Memory│    │
//! │                                         └───────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **No detection logic** - this crate only produces records. The
//!    consumer decides what counts as an anomaly.
//!
//! 2. **Pure generation** - builders take a caller-supplied `Rng` and
//!    an immutable pool context, so a seeded rng reproduces a run and
//!    property tests never touch the broker.
//!
//! 3. **Narrow broker seam** - publishing is one `push(key, payload)`
//!    operation behind a trait; tests substitute an in-memory recorder.
//!
//! 4. **Fail fast** - broker unreachable means the run aborts. No
//!    retries, no skipping records.
//!
//! ## Record classes
//!
//! | Class     | Trigger                        | Signature                           |
//! |-----------|--------------------------------|-------------------------------------|
//! | normal    | default                        | low volumes                         |
//! | anomalous | roll < anomaly ratio           | volumes ≥2 orders higher, high sev  |
//! | burst     | independent 5% per iteration   | 5-15 denies from a single source    |

pub mod broker;
pub mod error;
pub mod generator;
pub mod record;
pub mod runner;

pub use broker::{Broker, MemoryBroker, RedisBroker};
pub use error::SynthError;
pub use generator::{AddressPools, LOG_SOURCES, LogGenerator, RecordKind, classify};
pub use record::{Action, LogRecord, Protocol, RawDetails, Severity};
pub use runner::{BURST_PROBABILITY, BURST_SIZE, RunOptions, RunReport, Runner, RunnerState};
