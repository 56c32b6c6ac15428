//! An in-memory terminal for tests and demos.
//!
//! [`SimulatedTerminal`] implements [`Transport`] without any device.  Every
//! enqueued buffer is recorded, and buffers that form a known command get the
//! reply a Minitel would send, computed from a small model of the terminal's
//! state (identity, operating flags, keyboard mode, module links, line speed).
//!
//! A [`TerminalHandle`] shares that state and can be moved to another thread to
//! type keys while the session is blocked in a read.
//!
//! Failure injection:
//! - [`SimulatedTerminal::with_serial_line`] gives the terminal a line speed;
//!   while the local and terminal speeds differ every command goes unanswered.
//! - [`SimulatedTerminal::ignore_program`] makes the terminal acknowledge a
//!   speed change without applying it.
//! - [`TerminalHandle::set_silent`] drops every reply.
//! - [`TerminalHandle::corrupt_next_reply`] flips the first byte of the next
//!   reply.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use minitel_core::attributes::ESC;
use minitel_core::protocol::command::{
    EOT, FROM, MINUSCULE, OFF, ON, PCE, PRO2, PRO3, PROG, ROULEAU, SEP, SOH, START, STOP, TO,
    US,
};
use minitel_core::protocol::{prog_byte, Baudrate, KeyboardStatus, OperatingStatus};
use minitel_core::Module;
use tracing::trace;

use super::{Transport, DEFAULT_TIMEOUT};
use crate::error::TransportError;

/// Status bytes travel with bit 6 set.
const STATUS_MARKER: u8 = 0x40;

#[derive(Debug)]
struct TerminalState {
    writes: Vec<Vec<u8>>,
    identity: [u8; 3],
    operating: OperatingStatus,
    keyboard: KeyboardStatus,
    protocol: u8,
    cursor: (u8, u8),
    /// Transmitters linked to each receiver.
    links: HashMap<Module, u8>,
    /// `None` for a channel without line speed (TCP bridge).
    terminal_baud: Option<u32>,
    ignore_program: bool,
    silent: bool,
    corrupt_next: bool,
}

impl Default for TerminalState {
    fn default() -> Self {
        Self {
            writes: Vec::new(),
            // Alcatel Minitel 2, firmware ';'
            identity: [b'C', b'v', b';'],
            operating: OperatingStatus::empty(),
            keyboard: KeyboardStatus::empty(),
            protocol: 0,
            cursor: (1, 1),
            links: HashMap::new(),
            terminal_baud: None,
            ignore_program: false,
            silent: false,
            corrupt_next: false,
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<TerminalState>,
    inbound: Mutex<VecDeque<u8>>,
    arrived: Condvar,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn inbound(&self) -> MutexGuard<'_, VecDeque<u8>> {
        self.inbound.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push_inbound(&self, bytes: &[u8]) {
        self.inbound().extend(bytes.iter().copied());
        self.arrived.notify_all();
    }
}

/// Test-side view of a [`SimulatedTerminal`].
#[derive(Debug, Clone)]
pub struct TerminalHandle {
    shared: Arc<Shared>,
}

impl TerminalHandle {
    /// Types `bytes` on the keyboard.
    pub fn press(&self, bytes: &[u8]) {
        self.shared.push_inbound(bytes);
    }

    /// Every byte the host sent, concatenated.
    pub fn sent(&self) -> Vec<u8> {
        self.shared.state().writes.concat()
    }

    /// The host's writes, one entry per enqueue call.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.shared.state().writes.clone()
    }

    pub fn clear_sent(&self) {
        self.shared.state().writes.clear();
    }

    pub fn set_silent(&self, silent: bool) {
        self.shared.state().silent = silent;
    }

    pub fn corrupt_next_reply(&self) {
        self.shared.state().corrupt_next = true;
    }

    pub fn set_cursor(&self, row: u8, col: u8) {
        self.shared.state().cursor = (row, col);
    }

    pub fn terminal_baud(&self) -> Option<u32> {
        self.shared.state().terminal_baud
    }

    pub fn operating_status(&self) -> OperatingStatus {
        self.shared.state().operating
    }

    pub fn keyboard_status(&self) -> KeyboardStatus {
        self.shared.state().keyboard
    }
}

/// In-memory [`Transport`] answering like a Minitel.
#[derive(Debug)]
pub struct SimulatedTerminal {
    shared: Arc<Shared>,
    local_baud: Option<u32>,
    timeout: Duration,
    open: bool,
}

impl Default for SimulatedTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTerminal {
    /// An Alcatel Minitel 2 behind a TCP bridge, 40 columns, keyboard in
    /// default mode.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            local_baud: None,
            timeout: DEFAULT_TIMEOUT,
            open: false,
        }
    }

    pub fn handle(&self) -> TerminalHandle {
        TerminalHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Manufacturer, model and firmware codes returned by identification.
    pub fn with_identity(self, manufacturer: u8, model: u8, firmware: u8) -> Self {
        self.shared.state().identity = [manufacturer, model, firmware];
        self
    }

    /// Puts the terminal on a serial line running at `baud` on both ends.
    pub fn with_serial_line(mut self, baud: u32) -> Self {
        self.local_baud = Some(baud);
        self.shared.state().terminal_baud = Some(baud);
        self
    }

    pub fn with_operating_status(self, status: OperatingStatus) -> Self {
        self.shared.state().operating = status;
        self
    }

    pub fn with_keyboard_status(self, status: KeyboardStatus) -> Self {
        self.shared.state().keyboard = status;
        self
    }

    pub fn with_protocol_status(self, status: u8) -> Self {
        self.shared.state().protocol = status;
        self
    }

    /// Acknowledge `PROG` commands but keep the current line speed.
    pub fn ignore_program(self) -> Self {
        self.shared.state().ignore_program = true;
        self
    }

    fn line_in_sync(&self, state: &TerminalState) -> bool {
        match (self.local_baud, state.terminal_baud) {
            (Some(local), Some(terminal)) => local == terminal,
            _ => true,
        }
    }
}

/// Computes the terminal's reply to one command, updating its state.
fn answer(state: &mut TerminalState, command: &[u8]) -> Option<Vec<u8>> {
    let status = |bits: u8| bits | STATUS_MARKER;
    match command {
        [ESC, 0x39, 0x7B] => {
            let [m, model, fw] = state.identity;
            Some(vec![SOH, m, model, fw, EOT])
        }
        [ESC, 0x39, 0x72] => Some(vec![ESC, PRO2[1], 0x73, status(state.operating.bits())]),
        [ESC, 0x39, 0x76] => Some(vec![ESC, PRO2[1], 0x77, status(state.protocol)]),
        [ESC, 0x3A, toggle @ (START | STOP), flag] => {
            let bit = match *flag {
                ROULEAU => OperatingStatus::SCROLL,
                PCE => OperatingStatus::PCE,
                MINUSCULE => OperatingStatus::LOWERCASE,
                _ => return None,
            };
            state.operating.set(bit, *toggle == START);
            Some(vec![ESC, PRO2[1], 0x73, status(state.operating.bits())])
        }
        [ESC, 0x3A, 0x32, selector @ (0x7D | 0x7E)] => {
            let mixed = *selector == 0x7D;
            state.operating.set(OperatingStatus::COLUMNS_80, mixed);
            Some(vec![SEP, if mixed { 0x70 } else { 0x71 }])
        }
        [ESC, 0x3A, 0x72, 0x59] => Some(vec![ESC, PRO3[1], 0x73, 0x59, status(state.keyboard.bits())]),
        [ESC, 0x3B, toggle @ (START | STOP), 0x59, mode] => {
            let bit = match *mode {
                0x41 => KeyboardStatus::EXTENDED,
                0x43 => KeyboardStatus::C0,
                _ => return None,
            };
            state.keyboard.set(bit, *toggle == START);
            Some(vec![ESC, PRO3[1], 0x73, 0x59, status(state.keyboard.bits())])
        }
        [ESC, 0x3B, on @ (ON | OFF), receiver_in, transmitter_out] => {
            let receiver = module_from_code(*receiver_in)?;
            let transmitter = module_from_code(*transmitter_out)?;
            let links = state.links.entry(receiver).or_insert(0);
            let bit = module_bit(transmitter);
            if *on == ON {
                *links |= bit;
            } else {
                *links &= !bit;
            }
            Some(vec![ESC, PRO3[1], FROM, receiver_in & !0x08, status(*links)])
        }
        [ESC, 0x3A, TO, code] => {
            let module = module_from_code(*code)?;
            let links = state.links.get(&module).copied().unwrap_or(0);
            Some(vec![ESC, PRO3[1], FROM, *code, status(links)])
        }
        [ESC, 0x3A, 0x66, n] if n & 0x80 != 0 => Some(vec![SEP, 0x57]),
        [ESC, 0x3A, PROG, program] => {
            let (emit, receive) = minitel_core::protocol::parse_prog_status(*program).ok()?;
            let reply_rates = if state.ignore_program {
                state
                    .terminal_baud
                    .and_then(|b| Baudrate::from_bits_per_second(b).ok())
                    .map(|b| (b, b))
                    .unwrap_or((emit, receive))
            } else {
                state.terminal_baud = state.terminal_baud.map(|_| receive.bits_per_second());
                (emit, receive)
            };
            Some(vec![ESC, PRO2[1], 0x75, prog_byte(reply_rates.0, reply_rates.1)])
        }
        [ESC, 0x61] => {
            let (row, col) = state.cursor;
            Some(vec![US, row | STATUS_MARKER, col | STATUS_MARKER])
        }
        _ => None,
    }
}

fn module_from_code(code: u8) -> Option<Module> {
    Module::ALL
        .into_iter()
        .find(|m| m.code(minitel_core::Io::Out) == code & !0x08)
}

fn module_bit(module: Module) -> u8 {
    match module {
        Module::Screen => 0b0001,
        Module::Keyboard => 0b0010,
        Module::Modem => 0b0100,
        Module::Connector => 0b1000,
    }
}

impl Transport for SimulatedTerminal {
    fn open(&mut self) -> Result<(), TransportError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn read(&mut self, n: usize, timeout: Option<Duration>) -> Result<Vec<u8>, TransportError> {
        if !self.open {
            return Err(TransportError::Stopped);
        }
        let deadline = Instant::now() + timeout.unwrap_or(self.timeout);
        let mut inbound = self.shared.inbound();
        while inbound.len() < n {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            inbound = self
                .shared
                .arrived
                .wait_timeout(inbound, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
        let take = n.min(inbound.len());
        Ok(inbound.drain(..take).collect())
    }

    fn enqueue(&self, data: &[u8]) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::Stopped);
        }
        let reply = {
            let mut state = self.shared.state();
            state.writes.push(data.to_vec());
            if state.silent || !self.line_in_sync(&state) {
                None
            } else {
                let reply = answer(&mut state, data);
                match reply {
                    Some(mut bytes) if state.corrupt_next => {
                        state.corrupt_next = false;
                        bytes[0] ^= 0x20;
                        Some(bytes)
                    }
                    other => other,
                }
            }
        };
        if let Some(bytes) = reply {
            trace!("simulated reply {:02x?}", bytes);
            self.shared.push_inbound(&bytes);
        }
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn set_baud(&mut self, output: u32, _input: u32) -> Result<(), TransportError> {
        match self.local_baud {
            Some(_) => {
                self.local_baud = Some(output);
                Ok(())
            }
            None => Err(TransportError::Unsupported("changing the line speed")),
        }
    }

    fn baudrate(&self) -> Option<u32> {
        self.local_baud
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.shared.inbound().clear();
        Ok(())
    }

    fn drain(&self, _timeout: Duration) -> bool {
        true
    }
}
