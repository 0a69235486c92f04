//! Transport layer
//!
//! A [`Communicator`] writes raw command lines to the controller. Writes are
//! blocking; `send_command` applies the pacing delay after every line.

pub mod tcp;

use scarakit_core::{ConnectionError, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Where and how to reach the robot controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    /// Connect timeout in milliseconds
    pub timeout_ms: u64,
    /// Pause after every command line in milliseconds
    pub send_delay_ms: u64,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1270,
            timeout_ms: 5000,
            send_delay_ms: 200,
        }
    }
}

impl ConnectionParams {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

/// A blocking line-oriented connection to the controller.
pub trait Communicator {
    fn connect(&mut self, params: &ConnectionParams) -> Result<()>;

    fn disconnect(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// Writes every byte of `data`, returning the number written.
    fn send(&mut self, data: &[u8]) -> Result<usize>;

    fn connection_params(&self) -> Option<&ConnectionParams>;

    /// Pause applied after each command line.
    fn send_delay(&self) -> Duration {
        self.connection_params()
            .map(ConnectionParams::send_delay)
            .unwrap_or(Duration::ZERO)
    }

    /// Sends one command line, adding the newline terminator when missing.
    fn send_command(&mut self, command: &str) -> Result<usize> {
        let mut line = command.to_string();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        let written = self.send(line.as_bytes())?;
        tracing::debug!("Sent: {}", command.trim_end());

        let delay = self.send_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        Ok(written)
    }
}

/// Dry-run communicator. Accepts everything and only traces it.
#[derive(Debug, Default)]
pub struct NoOpCommunicator {
    params: Option<ConnectionParams>,
}

impl NoOpCommunicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Communicator for NoOpCommunicator {
    fn connect(&mut self, params: &ConnectionParams) -> Result<()> {
        tracing::info!("Dry run: not connecting to {}", params.address());
        self.params = Some(params.clone());
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.params = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.params.is_some()
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        tracing::info!("Dry run: {}", String::from_utf8_lossy(data).trim_end());
        Ok(data.len())
    }

    fn connection_params(&self) -> Option<&ConnectionParams> {
        self.params.as_ref()
    }

    fn send_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Keeps every sent line in a shared buffer. Clones share the buffer.
///
/// `fail_after(n)` makes every send after the first `n` fail with a write error.
#[derive(Debug, Clone, Default)]
pub struct RecordingCommunicator {
    sent: Arc<Mutex<Vec<String>>>,
    params: Option<ConnectionParams>,
    fail_after: Option<usize>,
}

impl RecordingCommunicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A communicator that is already connected with default parameters.
    pub fn connected() -> Self {
        Self {
            params: Some(ConnectionParams::default()),
            ..Self::default()
        }
    }

    pub fn fail_after(mut self, sends: usize) -> Self {
        self.fail_after = Some(sends);
        self
    }

    /// Lines sent so far, without their terminators.
    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Communicator for RecordingCommunicator {
    fn connect(&mut self, params: &ConnectionParams) -> Result<()> {
        self.params = Some(params.clone());
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.params = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.params.is_some()
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        if !self.is_connected() {
            return Err(ConnectionError::NotConnected.into());
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|e| Error::other(format!("Failed to lock send buffer: {}", e)))?;
        if self.fail_after.is_some_and(|limit| sent.len() >= limit) {
            return Err(ConnectionError::WriteFailed {
                reason: "connection reset by peer".to_string(),
            }
            .into());
        }
        sent.push(String::from_utf8_lossy(data).trim_end().to_string());
        Ok(data.len())
    }

    fn connection_params(&self) -> Option<&ConnectionParams> {
        self.params.as_ref()
    }

    fn send_delay(&self) -> Duration {
        Duration::ZERO
    }
}
