// src/process.rs
use crate::config::Config;
use log::debug;
use std::io;
use std::process::Command;

// Process teardown is an external concern; the reconciler only needs a way
// to ask for an instance to be killed and to learn whether it worked.
pub trait ProcessController: Send + Sync {
    fn kill_instance(&self, name: &str) -> io::Result<()>;
}

// Runs the configured teardown command as `<command> <host> <name>`.
pub struct ShellProcessController {
    command: String,
    host: String,
}

impl ShellProcessController {
    pub fn new(command: &str, host: &str) -> Self {
        Self {
            command: command.to_string(),
            host: host.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.stop_command, &config.server_host)
    }
}

impl ProcessController for ShellProcessController {
    fn kill_instance(&self, name: &str) -> io::Result<()> {
        debug!("running {} {} {}", self.command, self.host, name);
        let status = Command::new(&self.command)
            .arg(&self.host)
            .arg(name)
            .status()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("stop command exited with {}", status),
            ));
        }
        Ok(())
    }
}

// Records the kill without touching any process; for tests and dry runs.
#[derive(Default)]
pub struct NoopProcessController {
    pub fail_for: Vec<String>,
    killed: std::sync::Mutex<Vec<String>>,
}

impl NoopProcessController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            fail_for: names.iter().map(|n| n.to_string()).collect(),
            killed: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn killed(&self) -> Vec<String> {
        self.killed.lock().unwrap().clone()
    }
}

impl ProcessController for NoopProcessController {
    fn kill_instance(&self, name: &str) -> io::Result<()> {
        if self.fail_for.iter().any(|n| n == name) {
            return Err(io::Error::new(io::ErrorKind::Other, "kill refused"));
        }
        self.killed.lock().unwrap().push(name.to_string());
        Ok(())
    }
}
