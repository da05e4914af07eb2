//! Core Record Types
//!
//! The single entity this crate emits: one synthetic firewall log entry.
//! Types are co-located here as the single source of truth. Field order
//! in `LogRecord` is the canonical wire order; serde serializes structs
//! in declaration order, so every emitted JSON object carries its keys
//! in the same stable sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Firewall verdict on the connection.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Accept,
    Deny,
    Drop,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Accept, Action::Deny, Action::Drop];
}

/// Severity assigned by the (simulated) firewall.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Tcp, Protocol::Udp, Protocol::Icmp];
}

/// Vendor-specific session details nested under `raw`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawDetails {
    /// Synthetic session identifier, `sess_` + five digits.
    pub session_id: String,
    pub protocol: Protocol,
    /// Ephemeral client port, [1024, 65535].
    pub src_port: u16,
    /// Service port, [1, 65535].
    pub dst_port: u16,
}

/// One synthetic firewall log entry.
///
/// Records are immutable once constructed: created, serialized, pushed,
/// never mutated or read back. Every field is present and non-null in
/// every emitted record; there is no schema versioning.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Creation instant, RFC 3339 UTC.
    pub timestamp: DateTime<Utc>,
    /// Vendor/product identifier, one of [`crate::generator::LOG_SOURCES`].
    pub log_source: String,
    /// Client address, drawn from the 192.168.x.y pool.
    pub source_ip: String,
    /// Target address, drawn from the 10.x.y.z pool.
    pub dest_ip: String,
    pub connection_count: u64,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub action: Action,
    pub severity: Severity,
    pub raw: RawDetails,
}

impl LogRecord {
    /// Canonical text encoding pushed onto the broker.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
