//! Error taxonomy.
//!
//! Three outcomes end a run: broker connectivity failure (fatal, exit
//! 1), operator interrupt (graceful, exit 0, not an error), and
//! anything else (exit 1). There are no retries and no partial-failure
//! recovery; a failed push aborts the run rather than skipping the
//! record.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    /// Broker unreachable at startup or at publish time.
    #[error("redis broker unreachable at {addr}: {source}")]
    BrokerConnectivity {
        addr: String,
        #[source]
        source: redis::RedisError,
    },

    /// A record failed to serialize before publish.
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
