// src/utils.rs
use std::time::{SystemTime, UNIX_EPOCH};

// Heartbeat timestamps are epoch milliseconds everywhere. Every staleness
// comparison goes through this one clock so the unit cannot drift.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
