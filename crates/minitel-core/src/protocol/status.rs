//! Status bytes returned by the terminal, decoded positionally.

use bitflags::bitflags;

bitflags! {
    /// Which modules are currently linked, as echoed by switching and I/O
    /// status replies.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModuleStatus: u8 {
        const SCREEN    = 0b0001;
        const KEYBOARD  = 0b0010;
        const MODEM     = 0b0100;
        const CONNECTOR = 0b1000;
    }
}

bitflags! {
    /// Screen operating status (`PRO2 0x73` reply).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OperatingStatus: u8 {
        const COLUMNS_80 = 0b0001;
        const SCROLL     = 0b0010;
        const PCE        = 0b0100;
        const LOWERCASE  = 0b1000;
    }
}

bitflags! {
    /// Keyboard status (`PRO3 0x73 0x59` reply).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyboardStatus: u8 {
        const EXTENDED = 0b0001;
        const C0       = 0b0100;
    }
}

bitflags! {
    /// Protocol status (`PRO2 0x77` reply).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ProtocolStatus: u8 {
        const D1     = 0b0_0001;
        const D2     = 0b0_0010;
        const A1     = 0b0_0100;
        const A2     = 0b0_1000;
        const PAD_X3 = 0b1_0000;
    }
}

/// Operating state tracked by a session.  Only successful exchanges update it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatingState {
    pub columns_80: bool,
    pub scroll: bool,
    pub pce: bool,
    pub lowercase: bool,
    pub keyboard_extended: bool,
    pub keyboard_c0: bool,
}

impl OperatingState {
    pub fn apply_operating(&mut self, status: OperatingStatus) {
        self.columns_80 = status.contains(OperatingStatus::COLUMNS_80);
        self.scroll = status.contains(OperatingStatus::SCROLL);
        self.pce = status.contains(OperatingStatus::PCE);
        self.lowercase = status.contains(OperatingStatus::LOWERCASE);
    }

    pub fn apply_keyboard(&mut self, status: KeyboardStatus) {
        self.keyboard_extended = status.contains(KeyboardStatus::EXTENDED);
        self.keyboard_c0 = status.contains(KeyboardStatus::C0);
    }

    /// Caps lock is on whenever lowercase entry is off.
    pub fn caps_lock(&self) -> bool {
        !self.lowercase
    }

    /// Usable columns in the current screen mode.
    pub fn columns(&self) -> u16 {
        if self.columns_80 {
            80
        } else {
            40
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operating_status_ignores_marker_bits() {
        let status = OperatingStatus::from_bits_truncate(0x40 | 0b1010);
        assert_eq!(status, OperatingStatus::SCROLL | OperatingStatus::LOWERCASE);
    }

    #[test]
    fn test_apply_operating_and_caps_lock() {
        // Arrange
        let mut state = OperatingState::default();

        // Act
        state.apply_operating(OperatingStatus::SCROLL);

        // Assert
        assert!(state.scroll);
        assert!(!state.lowercase);
        assert!(state.caps_lock());
        assert_eq!(state.columns(), 40);
    }

    #[test]
    fn test_apply_keyboard() {
        let mut state = OperatingState::default();
        state.apply_keyboard(KeyboardStatus::from_bits_truncate(0x45));
        assert!(state.keyboard_extended);
        assert!(state.keyboard_c0);
    }
}
