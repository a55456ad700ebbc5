// src/lib.rs
pub mod config;
pub mod error;
pub mod games;
pub mod models;
pub mod ports;
pub mod process;
pub mod reconciler;
pub mod repository;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::FleetError;
pub use models::group::ServerGroup;
pub use models::instance::ServerInstance;
pub use models::motd::{GameJoinStatus, GameStatusDisplay, MotdInfo};
pub use models::region::Region;
pub use reconciler::{FleetReconciler, GroupSummary};
