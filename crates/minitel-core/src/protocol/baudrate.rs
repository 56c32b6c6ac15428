//! Connector speeds and the `PROG` byte that selects them.
//!
//! The `PROG` payload packs two 3-bit speed codes: emission in bits 3..5 and
//! reception in bits 0..2, with bit 6 set.  The status byte of the reply uses
//! the same layout.

use std::fmt;

use crate::protocol::error::ProtocolError;

/// A connector (DIN socket) speed supported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Baudrate {
    B75,
    B300,
    B1200,
    B4800,
    B9600,
}

impl Baudrate {
    pub const ALL: [Baudrate; 5] = [
        Baudrate::B75,
        Baudrate::B300,
        Baudrate::B1200,
        Baudrate::B4800,
        Baudrate::B9600,
    ];

    pub fn bits_per_second(self) -> u32 {
        match self {
            Baudrate::B75 => 75,
            Baudrate::B300 => 300,
            Baudrate::B1200 => 1200,
            Baudrate::B4800 => 4800,
            Baudrate::B9600 => 9600,
        }
    }

    /// 3-bit speed code used in the `PROG` byte.
    pub fn code(self) -> u8 {
        match self {
            Baudrate::B75 => 1,
            Baudrate::B300 => 2,
            Baudrate::B1200 => 4,
            Baudrate::B4800 => 6,
            Baudrate::B9600 => 7,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, ProtocolError> {
        Self::ALL
            .into_iter()
            .find(|b| b.code() == code)
            .ok_or(ProtocolError::UnknownBaudrate(u32::from(code)))
    }

    pub fn from_bits_per_second(bps: u32) -> Result<Self, ProtocolError> {
        Self::ALL
            .into_iter()
            .find(|b| b.bits_per_second() == bps)
            .ok_or(ProtocolError::UnknownBaudrate(bps))
    }
}

impl fmt::Display for Baudrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bauds", self.bits_per_second())
    }
}

/// Builds the `PROG` payload byte for an (emission, reception) pair.
pub fn prog_byte(emit: Baudrate, receive: Baudrate) -> u8 {
    0x40 | (emit.code() << 3) | receive.code()
}

/// Decodes the (emission, reception) pair from a `PROG` reply status byte.
pub fn parse_prog_status(status: u8) -> Result<(Baudrate, Baudrate), ProtocolError> {
    let bits = status & 0x3F;
    let emit = Baudrate::from_code(bits >> 3)?;
    let receive = Baudrate::from_code(bits & 0x07)?;
    Ok((emit, receive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prog_byte_packs_emit_then_receive() {
        assert_eq!(prog_byte(Baudrate::B1200, Baudrate::B1200), 0x64);
        assert_eq!(prog_byte(Baudrate::B4800, Baudrate::B4800), 0x76);
        assert_eq!(prog_byte(Baudrate::B75, Baudrate::B1200), 0x4C);
    }

    #[test]
    fn test_parse_prog_status_ignores_high_bits() {
        // Arrange: a status byte with bit 7 set by the parity-stripped line
        let status = 0x80 | prog_byte(Baudrate::B300, Baudrate::B9600);

        // Act
        let parsed = parse_prog_status(status).unwrap();

        // Assert
        assert_eq!(parsed, (Baudrate::B300, Baudrate::B9600));
    }

    #[test]
    fn test_parse_prog_status_rejects_unknown_code() {
        assert_eq!(
            parse_prog_status(0x40 | (3 << 3) | 4),
            Err(ProtocolError::UnknownBaudrate(3))
        );
    }

    #[test]
    fn test_from_bits_per_second() {
        assert_eq!(Baudrate::from_bits_per_second(4800), Ok(Baudrate::B4800));
        assert!(Baudrate::from_bits_per_second(2400).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Baudrate::B1200.to_string(), "1200 bauds");
    }
}
