//! TCP connection to the robot controller

use super::{Communicator, ConnectionParams};
use scarakit_core::{ConnectionError, Result};
use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

/// Blocking TCP communicator.
#[derive(Debug, Default)]
pub struct TcpCommunicator {
    stream: Option<TcpStream>,
    params: Option<ConnectionParams>,
}

impl TcpCommunicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Communicator for TcpCommunicator {
    fn connect(&mut self, params: &ConnectionParams) -> Result<()> {
        let address = params.address();
        let addrs: Vec<_> = (params.host.as_str(), params.port)
            .to_socket_addrs()
            .map_err(|_| ConnectionError::InvalidAddress {
                address: address.clone(),
            })?
            .collect();
        if addrs.is_empty() {
            return Err(ConnectionError::InvalidAddress { address }.into());
        }

        let mut last_error = None;
        for addr in &addrs {
            match TcpStream::connect_timeout(addr, params.timeout()) {
                Ok(stream) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::warn!("Failed to disable Nagle on {}: {}", addr, e);
                    }
                    tracing::info!("Connected to robot controller at {}", addr);
                    self.stream = Some(stream);
                    self.params = Some(params.clone());
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no address to try".to_string());
        tracing::error!("Unable to connect to {}: {}", address, reason);
        Err(ConnectionError::FailedToConnect { address, reason }.into())
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                tracing::debug!("Shutdown after disconnect: {}", e);
            }
            tracing::info!("Disconnected from robot controller");
        }
        self.params = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotConnected)?;
        let written = stream.write_all(data).and_then(|_| stream.flush());
        if let Err(e) = written {
            tracing::error!("Write to robot controller failed: {}", e);
            return Err(ConnectionError::WriteFailed {
                reason: e.to_string(),
            }
            .into());
        }
        Ok(data.len())
    }

    fn connection_params(&self) -> Option<&ConnectionParams> {
        self.params.as_ref()
    }
}

impl Drop for TcpCommunicator {
    fn drop(&mut self) {
        let _ = self.disconnect();
    }
}
