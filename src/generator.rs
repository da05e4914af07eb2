//! Log Synthesizer
//!
//! Shapes the three traffic classes pushed at the detector under test:
//!
//! | Class     | connection_count | bytes_sent/recv   | severity | action  |
//! |-----------|------------------|-------------------|----------|---------|
//! | normal    | 1..=50           | 100..=10_000      | drawn    | drawn   |
//! | anomalous | 100..=1_000      | 50_000..=500_000  | high     | drawn   |
//! | burst     | 50..=200         | 10_000..=50_000   | high     | deny    |
//!
//! "Anomalous" means statistically distinguishable volume, not a
//! different schema: the anomalous ranges sit at least two orders of
//! magnitude above the normal lower bounds. A burst batch models a
//! single attacking source, so every record in it shares one source
//! address.
//!
//! All builders are pure given the caller's `Rng`; seeding the rng
//! reproduces a run exactly. Nothing here touches the broker.

use chrono::Utc;
use rand::prelude::*;
use std::ops::RangeInclusive;

use crate::record::{Action, LogRecord, Protocol, RawDetails, Severity};

/// Vendor/product identifiers stamped into `log_source`.
pub const LOG_SOURCES: [&str; 5] = [
    "fortinet.firewall",
    "paloalto.firewall",
    "checkpoint.firewall",
    "cisco.asa",
    "juniper.srx",
];

pub const NORMAL_CONNECTIONS: RangeInclusive<u64> = 1..=50;
pub const NORMAL_BYTES: RangeInclusive<u64> = 100..=10_000;
pub const ANOMALOUS_CONNECTIONS: RangeInclusive<u64> = 100..=1_000;
pub const ANOMALOUS_BYTES: RangeInclusive<u64> = 50_000..=500_000;
pub const BURST_CONNECTIONS: RangeInclusive<u64> = 50..=200;
pub const BURST_BYTES: RangeInclusive<u64> = 10_000..=50_000;

const SRC_PORTS: RangeInclusive<u16> = 1024..=65535;
const DST_PORTS: RangeInclusive<u16> = 1..=65535;
const SESSION_IDS: RangeInclusive<u32> = 10_000..=99_999;

// A flood from one host is connection-oriented traffic; no icmp here.
const BURST_PROTOCOLS: [Protocol; 2] = [Protocol::Tcp, Protocol::Udp];

/// Which record class an iteration produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Normal,
    Anomalous,
}

/// Map a uniform roll against the configured anomaly ratio.
///
/// Pure so the probability branch is testable without a broker or a
/// real rng: `roll < ratio` selects the anomalous class.
pub fn classify(roll: f64, ratio: f64) -> RecordKind {
    if roll < ratio {
        RecordKind::Anomalous
    } else {
        RecordKind::Normal
    }
}

/// Finite pools of synthetic addresses, built once at initialization
/// and read-only for the process lifetime.
///
/// Source addresses live in 192.168.x.y (x,y in 1..=254), destinations
/// in 10.x.y.z (z in 1..=254) - two disjoint private ranges, so a
/// record's endpoints can never collide.
pub struct AddressPools {
    sources: Vec<String>,
    dests: Vec<String>,
}

impl AddressPools {
    pub const DEFAULT_SIZE: usize = 1024;

    /// Sample `size` addresses into each pool.
    pub fn sample<R: Rng>(rng: &mut R, size: usize) -> Self {
        let sources = (0..size)
            .map(|_| {
                format!(
                    "192.168.{}.{}",
                    rng.random_range(1..=254),
                    rng.random_range(1..=254)
                )
            })
            .collect();
        let dests = (0..size)
            .map(|_| {
                format!(
                    "10.{}.{}.{}",
                    rng.random_range(0..=254),
                    rng.random_range(0..=254),
                    rng.random_range(1..=254)
                )
            })
            .collect();
        Self { sources, dests }
    }

    pub fn pick_source<R: Rng>(&self, rng: &mut R) -> &str {
        self.sources.choose(rng).unwrap()
    }

    pub fn pick_dest<R: Rng>(&self, rng: &mut R) -> &str {
        self.dests.choose(rng).unwrap()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn dest_count(&self) -> usize {
        self.dests.len()
    }
}

/// Record builder for all three traffic classes.
pub struct LogGenerator {
    pools: AddressPools,
}

impl LogGenerator {
    pub fn new(pools: AddressPools) -> Self {
        Self { pools }
    }

    pub fn pools(&self) -> &AddressPools {
        &self.pools
    }

    pub fn pick_log_source<R: Rng>(&self, rng: &mut R) -> &'static str {
        *LOG_SOURCES.choose(rng).unwrap()
    }

    /// Baseline traffic: low volumes, action and severity both drawn.
    pub fn normal<R: Rng>(&self, rng: &mut R, log_source: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            log_source: log_source.to_string(),
            source_ip: self.pools.pick_source(rng).to_string(),
            dest_ip: self.pools.pick_dest(rng).to_string(),
            connection_count: rng.random_range(NORMAL_CONNECTIONS),
            bytes_sent: rng.random_range(NORMAL_BYTES),
            bytes_recv: rng.random_range(NORMAL_BYTES),
            action: *Action::ALL.choose(rng).unwrap(),
            severity: *Severity::ALL.choose(rng).unwrap(),
            raw: raw_details(rng, &Protocol::ALL),
        }
    }

    /// Same shape as [`normal`](Self::normal) with volumes drawn from
    /// the disjoint high ranges and severity pinned to high.
    pub fn anomalous<R: Rng>(&self, rng: &mut R, log_source: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            log_source: log_source.to_string(),
            source_ip: self.pools.pick_source(rng).to_string(),
            dest_ip: self.pools.pick_dest(rng).to_string(),
            connection_count: rng.random_range(ANOMALOUS_CONNECTIONS),
            bytes_sent: rng.random_range(ANOMALOUS_BYTES),
            bytes_recv: rng.random_range(ANOMALOUS_BYTES),
            action: *Action::ALL.choose(rng).unwrap(),
            severity: Severity::High,
            raw: raw_details(rng, &Protocol::ALL),
        }
    }

    /// A batch of `size` records from one attacking source.
    ///
    /// The source address is picked once and shared by the whole batch;
    /// everything else is drawn per record. Action is pinned to deny,
    /// severity to high.
    pub fn burst<R: Rng>(&self, rng: &mut R, log_source: &str, size: usize) -> Vec<LogRecord> {
        let source_ip = self.pools.pick_source(rng).to_string();
        (0..size)
            .map(|_| LogRecord {
                timestamp: Utc::now(),
                log_source: log_source.to_string(),
                source_ip: source_ip.clone(),
                dest_ip: self.pools.pick_dest(rng).to_string(),
                connection_count: rng.random_range(BURST_CONNECTIONS),
                bytes_sent: rng.random_range(BURST_BYTES),
                bytes_recv: rng.random_range(BURST_BYTES),
                action: Action::Deny,
                severity: Severity::High,
                raw: raw_details(rng, &BURST_PROTOCOLS),
            })
            .collect()
    }
}

fn raw_details<R: Rng>(rng: &mut R, protocols: &[Protocol]) -> RawDetails {
    RawDetails {
        session_id: format!("sess_{}", rng.random_range(SESSION_IDS)),
        protocol: *protocols.choose(rng).unwrap(),
        src_port: rng.random_range(SRC_PORTS),
        dst_port: rng.random_range(DST_PORTS),
    }
}
