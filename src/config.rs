// src/config.rs
use std::env;

#[derive(Clone)]
pub struct Config {
    // Liveness
    pub staleness_threshold_ms: u64,

    // Capacity
    pub max_ram_mb: u64,

    // Port allocation
    pub port_range_min: u16,
    pub port_range_max: u16,
    pub port_conflict_band: u16,
    pub port_alloc_max_attempts: u32,

    // Monitor loop
    pub monitor_interval_secs: u64,

    // Process control
    pub stop_command: String,
    pub server_host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staleness_threshold_ms: 10_000,
            max_ram_mb: 6000,
            port_range_min: 25000,
            port_range_max: 26000,
            port_conflict_band: 10,
            port_alloc_max_attempts: 1000,
            monitor_interval_secs: 10,
            stop_command: "./stopServer.sh".to_string(),
            server_host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            staleness_threshold_ms: env::var("STALENESS_THRESHOLD_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            max_ram_mb: env::var("MAX_RAM_MB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6000),

            port_range_min: env::var("PORT_RANGE_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(25000),

            port_range_max: env::var("PORT_RANGE_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(26000),

            port_conflict_band: env::var("PORT_CONFLICT_BAND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            port_alloc_max_attempts: env::var("PORT_ALLOC_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),

            monitor_interval_secs: env::var("MONITOR_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            stop_command: env::var("STOP_COMMAND")
                .unwrap_or_else(|_| "./stopServer.sh".to_string()),

            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }
}
