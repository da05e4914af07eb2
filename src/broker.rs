//! Broker Seam
//!
//! The publish side is a single narrow operation: append a serialized
//! record onto a named list. [`RedisBroker`] is the production
//! implementation; [`MemoryBroker`] records pushes in order so tests
//! never need a live server.

use redis::Commands;

use crate::error::SynthError;

/// Append-only publish interface consumed by the runner.
pub trait Broker {
    fn push(&mut self, key: &str, payload: &str) -> Result<(), SynthError>;
}

/// Live Redis connection, acquired once at startup and used for the
/// process lifetime. No pooling, no retry, no reconnection.
pub struct RedisBroker {
    conn: redis::Connection,
    addr: String,
}

impl RedisBroker {
    /// Connect and verify reachability with a PING.
    ///
    /// An unreachable broker surfaces here, before the run is entered.
    pub fn connect(host: &str, port: u16, db: i64) -> Result<Self, SynthError> {
        let addr = format!("{host}:{port}");
        let unreachable = |source| SynthError::BrokerConnectivity {
            addr: addr.clone(),
            source,
        };

        let client = redis::Client::open(format!("redis://{host}:{port}/{db}"))
            .map_err(unreachable)?;
        let mut conn = client.get_connection().map_err(unreachable)?;
        redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(unreachable)?;

        Ok(Self { conn, addr })
    }
}

impl Broker for RedisBroker {
    fn push(&mut self, key: &str, payload: &str) -> Result<(), SynthError> {
        self.conn
            .lpush::<_, _, ()>(key, payload)
            .map_err(|source| SynthError::BrokerConnectivity {
                addr: self.addr.clone(),
                source,
            })
    }
}

/// In-memory recorder: keeps `(key, payload)` pairs in call order.
#[derive(Debug, Default)]
pub struct MemoryBroker {
    entries: Vec<(String, String)>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl Broker for MemoryBroker {
    fn push(&mut self, key: &str, payload: &str) -> Result<(), SynthError> {
        self.entries.push((key.to_string(), payload.to_string()));
        Ok(())
    }
}
