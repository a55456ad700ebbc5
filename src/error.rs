// src/error.rs
use std::fmt;

#[derive(Debug)]
pub enum FleetError {
    GroupNotFound(String),
    InstanceNotFound(String),
    Decode { key: String, reason: String },
    PortRangeExhausted { attempts: u32 },
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupNotFound(prefix) => write!(f, "server group not found: {}", prefix),
            Self::InstanceNotFound(name) => write!(f, "server instance not found: {}", name),
            Self::Decode { key, reason } => write!(f, "failed to decode record {}: {}", key, reason),
            Self::PortRangeExhausted { attempts } => {
                write!(f, "no free port section after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for FleetError {}
