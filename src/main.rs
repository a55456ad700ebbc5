// src/main.rs
use env_logger::Env;
use fleetd::process::ShellProcessController;
use fleetd::storage::memory::MemoryStore;
use fleetd::{Config, FleetReconciler};
use log::{error, info};
use std::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();
    let config = Config::from_env();

    // Heartbeats land in this process's store; a remote adapter
    // implementing KeyValueStore slots in here for a shared deployment.
    let store = MemoryStore::new();
    let controller = ShellProcessController::from_config(&config);

    info!(
        "fleet monitor starting (tick {}s, staleness {}ms, ram budget {}MB)",
        config.monitor_interval_secs, config.staleness_threshold_ms, config.max_ram_mb
    );

    let mut tick = tokio::time::interval(Duration::from_secs(config.monitor_interval_secs));
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let reconciler = FleetReconciler::new(&store, &config);
                run_tick(&reconciler, &controller, &config);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }
}

fn run_tick(
    reconciler: &FleetReconciler<'_>,
    controller: &ShellProcessController,
    config: &Config,
) {
    let summaries = match reconciler.group_summaries() {
        Ok(summaries) => summaries,
        Err(e) => {
            error!("failed to read fleet state: {}", e);
            return;
        }
    };

    for summary in &summaries {
        info!(
            "[{}] port {} | {}/{} online ({} desired) | {} players",
            summary.prefix,
            summary.port_section,
            summary.online_servers,
            summary.launched_servers,
            summary.desired_servers,
            summary.player_count
        );
    }

    match reconciler.ram_in_use(None) {
        Ok(ram) => info!("ram in use: {}/{}MB", ram, config.max_ram_mb),
        Err(e) => error!("failed to compute ram in use: {}", e),
    }

    match reconciler.reap_dead_instances(controller) {
        Ok(reaped) if !reaped.is_empty() => {
            info!(
                "reaped {} dead instance(s): {}",
                reaped.len(),
                reaped
                    .iter()
                    .map(|instance| instance.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(_) => {}
        Err(e) => error!("reap pass failed: {}", e),
    }
}
