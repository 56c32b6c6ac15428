//! Finds a terminal attached to a serial port.
//!
//! Each candidate device is tried at each configured line speed, in order.
//! The first handshake that succeeds wins; a terminal left at an unexpected
//! speed simply fails to answer and the next speed is tried.

use std::path::{Path, PathBuf};

use minitel_session::transport::serial::candidate_ports;
use minitel_session::{Minitel, SerialSettings, SerialTransport, SessionConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{SerialConfig, TerminalConfig};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no serial device to probe")]
    NoCandidates,

    #[error("no terminal answered on {tried} device/speed combinations")]
    NoTerminal { tried: usize },
}

/// Devices and speeds to try, in probing order.
pub fn probe_plan(serial: &SerialConfig, candidates: Vec<PathBuf>) -> Vec<(PathBuf, u32)> {
    let ports = match &serial.port {
        Some(port) => vec![port.clone()],
        None => candidates,
    };
    ports
        .into_iter()
        .flat_map(|port| {
            serial
                .probe_baudrates
                .iter()
                .map(move |&baud| (port.clone(), baud))
        })
        .collect()
}

/// Returns a session with the first terminal that completes the handshake.
pub fn probe_serial(
    serial: &SerialConfig,
    terminal: &TerminalConfig,
) -> Result<Minitel<SerialTransport>, ProbeError> {
    let plan = probe_plan(serial, candidate_ports());
    if plan.is_empty() {
        return Err(ProbeError::NoCandidates);
    }

    let session_config = terminal.session_config();
    for (port, baudrate) in &plan {
        match try_port(port, *baudrate, terminal, &session_config) {
            Ok(minitel) => {
                info!(port = %port.display(), baudrate, "terminal found");
                return Ok(minitel);
            }
            Err(e) => debug!(port = %port.display(), baudrate, "no terminal: {e}"),
        }
    }
    Err(ProbeError::NoTerminal { tried: plan.len() })
}

fn try_port(
    port: &Path,
    baudrate: u32,
    terminal: &TerminalConfig,
    session_config: &SessionConfig,
) -> Result<Minitel<SerialTransport>, minitel_session::SessionError> {
    let settings = SerialSettings {
        baudrate,
        paced: terminal.paced_writes,
        timeout: terminal.read_timeout(),
        ..SerialSettings::default()
    };
    Minitel::connect(SerialTransport::new(port, settings), session_config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_tries_every_speed_per_device() {
        // Arrange
        let serial = SerialConfig::default();
        let candidates = vec![PathBuf::from("/dev/ttyS0"), PathBuf::from("/dev/ttyUSB0")];

        // Act
        let plan = probe_plan(&serial, candidates);

        // Assert
        assert_eq!(plan.len(), 6);
        assert_eq!(plan[0], (PathBuf::from("/dev/ttyS0"), 1200));
        assert_eq!(plan[1], (PathBuf::from("/dev/ttyS0"), 4800));
        assert_eq!(plan[2], (PathBuf::from("/dev/ttyS0"), 300));
        assert_eq!(plan[3], (PathBuf::from("/dev/ttyUSB0"), 1200));
    }

    #[test]
    fn test_configured_port_replaces_candidates() {
        let serial = SerialConfig {
            port: Some(PathBuf::from("/dev/ttyAMA0")),
            probe_baudrates: vec![9600],
        };

        let plan = probe_plan(&serial, vec![PathBuf::from("/dev/ttyS0")]);

        assert_eq!(plan, vec![(PathBuf::from("/dev/ttyAMA0"), 9600)]);
    }

    #[test]
    fn test_missing_device_is_not_a_terminal() {
        // Arrange
        let serial = SerialConfig {
            port: Some(PathBuf::from("/nonexistent/ttyMINITEL")),
            probe_baudrates: vec![1200, 4800],
        };

        // Act
        let result = probe_serial(&serial, &TerminalConfig::default());

        // Assert
        assert!(matches!(result, Err(ProbeError::NoTerminal { tried: 2 })));
    }
}
