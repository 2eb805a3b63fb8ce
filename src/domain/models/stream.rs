//! Stream types shared by stream-capable backends.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One entry of an append-only stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    /// Backend-assigned or caller-supplied entry id.
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

/// Entries read from one stream key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBatch {
    pub key: String,
    pub entries: Vec<StreamEntry>,
}

/// Options shared by `xread` and `xread_group`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Maximum entries per stream; `None` lets the backend decide.
    pub count: Option<u64>,
    /// How long to block waiting for entries; `None` returns immediately.
    pub block: Option<Duration>,
}

impl ReadOptions {
    #[must_use]
    pub const fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub const fn block(mut self, block: Duration) -> Self {
        self.block = Some(block);
        self
    }
}
