//! Terminal configuration exchanges.

use std::time::Duration;

use minitel_core::protocol::command::{self, ScreenFlag};
use minitel_core::protocol::{parse_prog_status, KeyboardStatus, OperatingStatus, ProtocolStatus};
use minitel_core::{Baudrate, Io, KeyboardMode, Module, ModuleStatus, ProtocolError, VideoMode};
use tracing::{error, info, warn};

use super::Minitel;
use crate::error::SessionError;
use crate::transport::Transport;

/// How long to wait for the `PROG` command to leave the host before switching
/// the local line speed.
const PROGRAM_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

impl<T: Transport> Minitel<T> {
    // ── Module switching ────────────────────────────────────────────────────

    /// Links (`on`) or unlinks `transmitter`'s output to `receiver`'s input
    /// and returns the modules now feeding `receiver`.
    ///
    /// Pairs the terminal cannot link are rejected before anything is sent.
    pub fn switch_receiver_transmitter(
        &mut self,
        receiver: Module,
        transmitter: Module,
        on: bool,
    ) -> Result<ModuleStatus, SessionError> {
        let request = command::switch(receiver, transmitter, on).map_err(|e| {
            error!("refusing to switch {transmitter} -> {receiver}");
            e
        })?;
        let status = self.exchange_status(&request)?;
        Ok(ModuleStatus::from_bits_truncate(status))
    }

    /// Cuts a module off from itself.  Blocking the keyboard also hides the
    /// cursor when `cursor_follows_keyboard` is set.
    pub fn block_module(&mut self, module: Module) -> Result<ModuleStatus, SessionError> {
        let status = self.switch_receiver_transmitter(module, module, false)?;
        if module == Module::Keyboard && self.config.cursor_follows_keyboard {
            self.hide_cursor()?;
        }
        Ok(status)
    }

    pub fn unblock_module(&mut self, module: Module) -> Result<ModuleStatus, SessionError> {
        let status = self.switch_receiver_transmitter(module, module, true)?;
        if module == Module::Keyboard && self.config.cursor_follows_keyboard {
            self.show_cursor()?;
        }
        Ok(status)
    }

    /// Turns off the modem-to-screen link so keystrokes are not echoed twice
    /// over a bridged connection.
    pub fn disable_echo(&mut self) -> Result<ModuleStatus, SessionError> {
        self.switch_receiver_transmitter(Module::Screen, Module::Modem, false)
    }

    pub fn module_io_status(&mut self, module: Module, io: Io) -> Result<ModuleStatus, SessionError> {
        let status = self.exchange_status(&command::module_io_status(module, io))?;
        Ok(ModuleStatus::from_bits_truncate(status))
    }

    pub fn protocol_status(&mut self) -> Result<ProtocolStatus, SessionError> {
        let status = self.exchange_status(&command::protocol_status())?;
        Ok(ProtocolStatus::from_bits_truncate(status))
    }

    /// Makes the terminal pass the next `n` bytes (1..=127) through untouched.
    pub fn set_protocol_transparency(&mut self, n: u8) -> Result<(), SessionError> {
        self.exchange(&command::transparency(n)?)?;
        Ok(())
    }

    pub fn connect_modem(&mut self) -> Result<(), SessionError> {
        self.send(&command::CONNECT_MODEM)
    }

    pub fn disconnect_modem(&mut self) -> Result<(), SessionError> {
        self.send(&command::DISCONNECT_MODEM)
    }

    // ── Screen and keyboard modes ───────────────────────────────────────────

    fn set_screen_flag(&mut self, flag: ScreenFlag, enable: bool) -> Result<(), SessionError> {
        let status = self.exchange_status(&command::screen_flag(flag, enable))?;
        self.state
            .apply_operating(OperatingStatus::from_bits_truncate(status));
        Ok(())
    }

    /// Scroll mode (`true`) or page mode (`false`).
    pub fn set_scroll_mode(&mut self, enable: bool) -> Result<(), SessionError> {
        self.set_screen_flag(ScreenFlag::Scroll, enable)
    }

    /// Lowercase entry; caps lock is its inverse.
    pub fn set_lowercase(&mut self, enable: bool) -> Result<(), SessionError> {
        self.set_screen_flag(ScreenFlag::Lowercase, enable)
    }

    pub fn set_pce(&mut self, enable: bool) -> Result<(), SessionError> {
        self.set_screen_flag(ScreenFlag::Pce, enable)
    }

    pub fn set_video_mode(&mut self, mode: VideoMode) -> Result<(), SessionError> {
        self.exchange(&command::video_mode(mode))?;
        self.video_mode = mode;
        self.state.columns_80 = mode == VideoMode::Mixed;
        Ok(())
    }

    pub fn set_keyboard_mode(&mut self, mode: KeyboardMode, enable: bool) -> Result<(), SessionError> {
        let status = self.exchange_status(&command::keyboard_mode(mode, enable))?;
        self.state
            .apply_keyboard(KeyboardStatus::from_bits_truncate(status));
        Ok(())
    }

    // ── Connector speed ─────────────────────────────────────────────────────

    /// Reprograms the connector speed and follows on the local side.
    ///
    /// On a serial line the command goes out at the old rate, the local rate
    /// switches, and an identification probe confirms the terminal followed.
    /// If it did not, the old rate is restored and probed once more:
    /// [`SessionError::BaudrateRejected`] means the session is usable at the
    /// old rate, [`SessionError::BaudrateRollbackFailed`] means the terminal is
    /// lost.
    pub fn set_connector_baud(
        &mut self,
        emit: Baudrate,
        receive: Baudrate,
    ) -> Result<(Baudrate, Baudrate), SessionError> {
        if emit != receive && self.identity.requires_symmetric_baudrate() {
            error!(%emit, %receive, "{} needs identical rates", self.identity.model);
            return Err(ProtocolError::AsymmetricBaudrate { emit, receive }.into());
        }
        let request = command::connector_baudrate(emit, receive);

        let Some(previous) = self.transport.baudrate() else {
            // No local line speed: the reply reports the rates in effect.
            let status = self.exchange_status(&request)?;
            let applied = parse_prog_status(status)?;
            if applied != (emit, receive) {
                warn!("terminal kept {} / {}", applied.0, applied.1);
                return Err(SessionError::BaudrateRejected {
                    restored: applied.1.bits_per_second(),
                });
            }
            return Ok(applied);
        };

        self.transport.enqueue(&request.command)?;
        if !self.transport.drain(PROGRAM_DRAIN_TIMEOUT) {
            warn!("speed command still queued after {PROGRAM_DRAIN_TIMEOUT:?}");
        }
        // The terminal receives what we emit and vice versa.
        self.transport
            .set_baud(receive.bits_per_second(), emit.bits_per_second())?;
        self.transport.flush()?;

        match self.identify() {
            Ok(_) => {
                info!(%emit, %receive, "connector speed changed");
                Ok((emit, receive))
            }
            Err(e) => {
                warn!("no answer at {receive}: {e}; restoring {previous} bauds");
                self.restore_baud(previous)
            }
        }
    }

    fn restore_baud(&mut self, previous: u32) -> Result<(Baudrate, Baudrate), SessionError> {
        let probe = self
            .transport
            .set_baud(previous, previous)
            .and_then(|()| self.transport.flush())
            .map_err(SessionError::from)
            .and_then(|()| self.identify());
        match probe {
            Ok(_) => Err(SessionError::BaudrateRejected { restored: previous }),
            Err(e) => {
                error!("terminal lost after restoring {previous} bauds: {e}");
                Err(SessionError::BaudrateRollbackFailed { previous })
            }
        }
    }
}
