//! The protocol session: one terminal, one transport, one owner.
//!
//! # Lifecycle (for beginners)
//!
//! [`Minitel::connect`] opens the transport and runs the handshake:
//!
//! 1. open the transport;
//! 2. ask the ROM for its identity and derive the character set from it;
//! 3. read the operating status (columns, scrolling, PCE, lowercase);
//! 4. switch the video mode if the terminal is not already in the requested one;
//! 5. read the keyboard status and toggle extended / C0 mode where it differs.
//!
//! Any failing step aborts the whole construction with
//! [`SessionError::CannotInitialize`]; a half-initialised session is never
//! returned.  After that the session owns every piece of mutable state
//! (operating flags, active attributes, key bindings) and is driven by a
//! single caller.
//!
//! Commands are strictly half-duplex: [`Minitel::exchange`] enqueues one
//! command and immediately reads the reply length it declares.
//!
//! Operations are split across files: `commands.rs` holds the terminal
//! configuration exchanges, `display.rs` the output helpers.

mod commands;
mod display;

use std::time::Duration;

use minitel_core::charset::hex;
use minitel_core::keyboard::{FrameAssembler, FrameStatus};
use minitel_core::protocol::command::{self, Request};
use minitel_core::protocol::{KeyboardStatus, OperatingStatus};
use minitel_core::{
    KeyEvent, KeyboardMode, OperatingState, TerminalIdentity, TextAttributes, VideoMode,
    VisualizationModule, ZoneAttributes,
};
use tracing::{debug, info, warn};

use crate::bindings::{BindingTable, Filter, KeyCallback};
use crate::error::SessionError;
use crate::transport::Transport;

pub use display::{layout_text, Piece};

/// Options applied during the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub video_mode: VideoMode,
    pub keyboard_extended: bool,
    pub keyboard_c0: bool,
    /// Wait for command replies and the first byte of a keystroke.
    pub read_timeout: Duration,
    /// Wait for the remaining bytes of a multi-byte keystroke.
    pub frame_timeout: Duration,
    /// Hide the cursor while the keyboard is blocked, show it when unblocked.
    pub cursor_follows_keyboard: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            video_mode: VideoMode::Videotex,
            keyboard_extended: true,
            keyboard_c0: false,
            read_timeout: Duration::from_secs(1),
            frame_timeout: Duration::from_millis(500),
            cursor_follows_keyboard: true,
        }
    }
}

/// A connected terminal.
pub struct Minitel<T: Transport> {
    transport: T,
    config: SessionConfig,
    identity: TerminalIdentity,
    vm: VisualizationModule,
    state: OperatingState,
    video_mode: VideoMode,
    text: TextAttributes,
    zone: ZoneAttributes,
    bindings: BindingTable,
}

impl<T: Transport> Minitel<T> {
    /// Opens `transport` and runs the handshake.
    pub fn connect(mut transport: T, config: SessionConfig) -> Result<Self, SessionError> {
        transport
            .open()
            .map_err(|e| SessionError::during("open")(e.into()))?;
        transport.set_timeout(config.read_timeout);

        let identity = match identify_on(&mut transport) {
            Ok(identity) => identity,
            Err(e) => {
                transport.close();
                return Err(SessionError::during("identify")(e));
            }
        };
        debug!("terminal identified as {identity}");

        // Dropping the session on error closes the transport.
        let mut session = Self::from_parts(transport, identity, config);
        session.negotiate()?;

        info!(
            terminal = %session.identity,
            vm = %session.vm,
            columns = session.state.columns(),
            "session ready"
        );
        Ok(session)
    }

    pub(crate) fn from_parts(transport: T, identity: TerminalIdentity, config: SessionConfig) -> Self {
        Self {
            transport,
            vm: identity.visualization_module(),
            identity,
            video_mode: config.video_mode,
            config,
            state: OperatingState::default(),
            text: TextAttributes::default(),
            zone: ZoneAttributes::default(),
            bindings: BindingTable::new(),
        }
    }

    fn negotiate(&mut self) -> Result<(), SessionError> {
        let status = self
            .exchange_status(&command::operating_status())
            .map_err(SessionError::during("operating status"))?;
        self.state
            .apply_operating(OperatingStatus::from_bits_truncate(status));

        let current = if self.state.columns_80 {
            VideoMode::Mixed
        } else {
            VideoMode::Videotex
        };
        self.video_mode = current;
        if current != self.config.video_mode {
            self.set_video_mode(self.config.video_mode)
                .map_err(SessionError::during("video mode"))?;
        }

        let keyboard = self
            .exchange_status(&command::keyboard_status())
            .map_err(SessionError::during("keyboard status"))?;
        self.state
            .apply_keyboard(KeyboardStatus::from_bits_truncate(keyboard));

        if self.state.keyboard_extended != self.config.keyboard_extended {
            self.set_keyboard_mode(KeyboardMode::Extended, self.config.keyboard_extended)
                .map_err(SessionError::during("keyboard mode"))?;
        }
        if self.state.keyboard_c0 != self.config.keyboard_c0 {
            self.set_keyboard_mode(KeyboardMode::C0, self.config.keyboard_c0)
                .map_err(SessionError::during("keyboard mode"))?;
        }
        Ok(())
    }

    // ── Exchanges ───────────────────────────────────────────────────────────

    /// Sends `request` and returns the reply payload following the echoed
    /// prefix.
    pub fn exchange(&mut self, request: &Request) -> Result<Vec<u8>, SessionError> {
        exchange_on(&mut self.transport, request)
    }

    /// Like [`exchange`](Self::exchange) for replies ending in one status byte.
    pub fn exchange_status(&mut self, request: &Request) -> Result<u8, SessionError> {
        self.transport.enqueue(&request.command)?;
        let reply = self.transport.read(request.reply_len, None)?;
        Ok(request.check_status(&reply)?)
    }

    /// Re-reads the ROM identification.  Also serves as a liveness probe.
    pub fn identify(&mut self) -> Result<TerminalIdentity, SessionError> {
        identify_on(&mut self.transport)
    }

    // ── Keyboard ────────────────────────────────────────────────────────────

    /// Waits up to `timeout` (the configured read timeout when `None`) for a
    /// keystroke, assembles its frame and runs the bindings.
    ///
    /// An empty read runs the no-key filter and returns `Ok(None)`.
    pub fn read_keyboard(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<Option<KeyEvent>, SessionError> {
        let first = self.transport.read(1, timeout)?;
        let Some(&byte) = first.first() else {
            self.bindings.dispatch_timeout();
            return Ok(None);
        };

        let mut assembler = FrameAssembler::new();
        let mut status = assembler.push(byte);
        while status == FrameStatus::NeedMore {
            let next = self
                .transport
                .read(1, Some(self.config.frame_timeout))?;
            match next.first() {
                Some(&b) => status = assembler.push(b),
                None => {
                    let partial = assembler.take();
                    warn!("keystroke frame cut short: {}", hex(&partial));
                    let event = KeyEvent::from_frame(partial);
                    self.bindings.dispatch(&event);
                    return Ok(Some(event));
                }
            }
        }

        let event = KeyEvent::from_frame(assembler.take());
        debug!(frame = %hex(&event.frame), key = ?event.key, "keystroke");
        self.bindings.dispatch(&event);
        Ok(Some(event))
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.bindings.set_filter(filter);
    }

    pub fn bind(&mut self, frame: impl Into<Vec<u8>>, callback: KeyCallback) {
        self.bindings.bind(frame, callback);
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn identity(&self) -> TerminalIdentity {
        self.identity
    }

    pub fn visualization_module(&self) -> VisualizationModule {
        self.vm
    }

    pub fn operating_state(&self) -> OperatingState {
        self.state
    }

    pub fn caps_lock(&self) -> bool {
        self.state.caps_lock()
    }

    pub fn video_mode(&self) -> VideoMode {
        self.video_mode
    }

    pub fn text_attributes(&self) -> TextAttributes {
        self.text
    }

    pub fn zone_attributes(&self) -> ZoneAttributes {
        self.zone
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Waits for queued output, then tears the transport down.
    pub fn close(self) {
        let timeout = self.config.read_timeout;
        if !self.transport.drain(timeout) {
            warn!("closing with output still queued");
        }
        // Drop closes the transport.
    }
}

impl<T: Transport> Drop for Minitel<T> {
    fn drop(&mut self) {
        self.transport.close();
    }
}

fn exchange_on<T: Transport>(transport: &mut T, request: &Request) -> Result<Vec<u8>, SessionError> {
    transport.enqueue(&request.command)?;
    let reply = transport.read(request.reply_len, None)?;
    let payload = request.check_reply(&reply)?;
    Ok(payload.to_vec())
}

fn identify_on<T: Transport>(transport: &mut T) -> Result<TerminalIdentity, SessionError> {
    let payload = exchange_on(transport, &command::identify())?;
    Ok(TerminalIdentity::parse(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::SimulatedTerminal;
    use minitel_core::protocol::Manufacturer;

    #[test]
    fn test_connect_negotiates_keyboard_and_video_mode() {
        // Arrange: terminal starts in 80 columns with a plain keyboard
        let terminal =
            SimulatedTerminal::new().with_operating_status(OperatingStatus::COLUMNS_80);
        let handle = terminal.handle();

        // Act
        let session = Minitel::connect(terminal, SessionConfig::default()).unwrap();

        // Assert
        assert_eq!(session.video_mode(), VideoMode::Videotex);
        assert!(!session.operating_state().columns_80);
        assert!(session.operating_state().keyboard_extended);
        assert_eq!(handle.keyboard_status(), KeyboardStatus::EXTENDED);
        assert_eq!(session.identity().manufacturer, Manufacturer::Alcatel);
        assert_eq!(session.visualization_module(), VisualizationModule::Vgp5);
    }

    #[test]
    fn test_connect_skips_commands_already_in_effect() {
        let terminal =
            SimulatedTerminal::new().with_keyboard_status(KeyboardStatus::EXTENDED);
        let handle = terminal.handle();

        let _session = Minitel::connect(terminal, SessionConfig::default()).unwrap();

        // identify, operating status, keyboard status and nothing else
        assert_eq!(handle.writes().len(), 3);
    }

    #[test]
    fn test_silent_terminal_cannot_initialize() {
        let terminal = SimulatedTerminal::new();
        terminal.handle().set_silent(true);
        let config = SessionConfig {
            read_timeout: Duration::from_millis(20),
            ..SessionConfig::default()
        };

        let result = Minitel::connect(terminal, config);

        assert!(matches!(
            result,
            Err(SessionError::CannotInitialize {
                step: "identify",
                ..
            })
        ));
    }

    #[test]
    fn test_wrong_echo_is_reported_not_panicking() {
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();

        handle.corrupt_next_reply();
        let result = session.identify();

        assert!(matches!(result, Err(SessionError::Protocol(_))));
    }
}
