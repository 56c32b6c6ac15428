//! Terminal identity read from the ROM identification reply, and the
//! character-ROM revision it implies.
//!
//! # How identification works (for beginners)
//!
//! Sending `PRO1 0x7B` makes the terminal answer five bytes:
//!
//! ```text
//! SOH  manufacturer  model  firmware  EOT
//! 0x01     'C'        'v'     ';'     0x04
//! ```
//!
//! The manufacturer and model letters are fixed per hardware family.  The
//! firmware letter grows with each ROM revision, so "firmware ≥ '<'" is a
//! meaningful comparison.  From those three values we derive which
//! [`VisualizationModule`] the terminal understands and whether its connector
//! must run at the same speed in both directions.

use std::fmt;

use tracing::warn;

use crate::charset::{hex, VisualizationModule};
use crate::protocol::command::EOT;
use crate::protocol::error::ProtocolError;

/// First Alcatel Minitel 1B firmware that ships the VGP5 ROM.
const VGP5_ALCATEL_1B_FIRMWARE: u8 = b'<';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manufacturer {
    Alcatel,
    Philips,
    Other(u8),
}

impl Manufacturer {
    pub fn from_code(code: u8) -> Self {
        match code {
            b'C' => Manufacturer::Alcatel,
            b'B' => Manufacturer::Philips,
            other => Manufacturer::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Minitel1,
    Minitel1Color,
    Minitel1Standard,
    Minitel1ColorStandard,
    Terminatel252,
    Minitel1B,
    Minitel2,
    Minitel10,
    Minitel10B,
    Minitel5,
    Minitel12,
    Other(u8),
}

impl Model {
    pub fn from_code(code: u8) -> Self {
        match code {
            b'b' => Model::Minitel1,
            b'c' => Model::Minitel1Color,
            b'r' => Model::Minitel1Standard,
            b's' => Model::Minitel1ColorStandard,
            b't' => Model::Terminatel252,
            b'u' => Model::Minitel1B,
            b'v' => Model::Minitel2,
            b'w' => Model::Minitel10,
            b'y' => Model::Minitel10B,
            b'z' => Model::Minitel5,
            b'{' => Model::Minitel12,
            other => Model::Other(other),
        }
    }

    fn is_minitel1(self) -> bool {
        matches!(
            self,
            Model::Minitel1
                | Model::Minitel1Color
                | Model::Minitel1Standard
                | Model::Minitel1ColorStandard
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Minitel1 => f.write_str("Minitel 1"),
            Model::Minitel1Color => f.write_str("Minitel 1 colour"),
            Model::Minitel1Standard => f.write_str("Minitel 1 standard"),
            Model::Minitel1ColorStandard => f.write_str("Minitel 1 colour standard"),
            Model::Terminatel252 => f.write_str("Terminatel 252"),
            Model::Minitel1B => f.write_str("Minitel 1B"),
            Model::Minitel2 => f.write_str("Minitel 2"),
            Model::Minitel10 => f.write_str("Minitel 10"),
            Model::Minitel10B => f.write_str("Minitel 10B"),
            Model::Minitel5 => f.write_str("Minitel 5"),
            Model::Minitel12 => f.write_str("Minitel 12"),
            Model::Other(code) => write!(f, "unknown model {code:#04x}"),
        }
    }
}

/// Manufacturer, model and firmware revision of the attached terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalIdentity {
    pub manufacturer: Manufacturer,
    pub model: Model,
    pub firmware: u8,
}

impl TerminalIdentity {
    /// Parses the payload following `SOH`: manufacturer, model, firmware, `EOT`.
    pub fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        match payload {
            [manufacturer, model, firmware, EOT, ..] => Ok(Self {
                manufacturer: Manufacturer::from_code(*manufacturer),
                model: Model::from_code(*model),
                firmware: *firmware,
            }),
            _ => Err(ProtocolError::UnexpectedResponse {
                operation: "identify",
                expected: "manufacturer model firmware 04".to_string(),
                received: hex(payload),
            }),
        }
    }

    /// Character-ROM revision implied by this identity.
    ///
    /// Unrecognised combinations fall back to VGP5 with a warning.
    pub fn visualization_module(&self) -> VisualizationModule {
        match (self.manufacturer, self.model) {
            (_, Model::Minitel2 | Model::Minitel12) => VisualizationModule::Vgp5,
            (Manufacturer::Alcatel, Model::Minitel1B)
                if self.firmware >= VGP5_ALCATEL_1B_FIRMWARE =>
            {
                VisualizationModule::Vgp5
            }
            (Manufacturer::Philips, model) if model.is_minitel1() || model == Model::Minitel1B => {
                VisualizationModule::Vgp2
            }
            (Manufacturer::Other(_), _) | (_, Model::Other(_)) => {
                warn!(
                    identity = ?self,
                    "unrecognised terminal, assuming the VGP5 character set"
                );
                VisualizationModule::Vgp5
            }
            _ => VisualizationModule::Vgp2,
        }
    }

    /// Whether emission and reception speeds must be equal.
    pub fn requires_symmetric_baudrate(&self) -> bool {
        !matches!(self.model, Model::Minitel2 | Model::Minitel12)
    }
}

impl fmt::Display for TerminalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let maker = match self.manufacturer {
            Manufacturer::Alcatel => "Alcatel".to_string(),
            Manufacturer::Philips => "Philips".to_string(),
            Manufacturer::Other(code) => format!("maker {code:#04x}"),
        };
        write!(f, "{} {} (firmware {})", maker, self.model, char::from(self.firmware))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(manufacturer: u8, model: u8, firmware: u8) -> TerminalIdentity {
        TerminalIdentity::parse(&[manufacturer, model, firmware, EOT]).unwrap()
    }

    #[test]
    fn test_parse_identity() {
        let id = identity(b'C', b'v', b';');
        assert_eq!(id.manufacturer, Manufacturer::Alcatel);
        assert_eq!(id.model, Model::Minitel2);
        assert_eq!(id.firmware, b';');
    }

    #[test]
    fn test_parse_rejects_missing_end_marker() {
        assert!(TerminalIdentity::parse(&[b'C', b'v', b';', 0x00]).is_err());
        assert!(TerminalIdentity::parse(&[b'C']).is_err());
    }

    #[test]
    fn test_minitel2_and_12_use_vgp5() {
        assert_eq!(identity(b'B', b'v', b'0').visualization_module(), VisualizationModule::Vgp5);
        assert_eq!(identity(b'C', b'{', b'0').visualization_module(), VisualizationModule::Vgp5);
    }

    #[test]
    fn test_alcatel_1b_depends_on_firmware() {
        // Arrange
        let old = identity(b'C', b'u', b';');
        let new = identity(b'C', b'u', b'<');

        // Act / Assert
        assert_eq!(old.visualization_module(), VisualizationModule::Vgp2);
        assert_eq!(new.visualization_module(), VisualizationModule::Vgp5);
    }

    #[test]
    fn test_philips_minitel1_family_uses_vgp2() {
        assert_eq!(identity(b'B', b'b', b'9').visualization_module(), VisualizationModule::Vgp2);
        assert_eq!(identity(b'B', b'u', b'>').visualization_module(), VisualizationModule::Vgp2);
    }

    #[test]
    fn test_unknown_terminal_falls_back_to_vgp5() {
        assert_eq!(identity(b'Z', b'b', b'1').visualization_module(), VisualizationModule::Vgp5);
        assert_eq!(identity(b'C', b'!', b'1').visualization_module(), VisualizationModule::Vgp5);
    }

    #[test]
    fn test_symmetric_baudrate_requirement() {
        assert!(identity(b'C', b'u', b'<').requires_symmetric_baudrate());
        assert!(!identity(b'C', b'v', b'<').requires_symmetric_baudrate());
    }

    #[test]
    fn test_display() {
        assert_eq!(identity(b'C', b'v', b';').to_string(), "Alcatel Minitel 2 (firmware ;)");
    }
}
