//! Integration tests for the protocol session against the simulated terminal.
//!
//! These tests drive `Minitel` only through its public API, the way the server
//! does.  They cover:
//!
//! - the handshake on different terminal families;
//! - connector speed renegotiation with rollback when the terminal does not
//!   follow;
//! - keyboard dispatch ordering;
//! - frame assembly across slow, byte-by-byte delivery (three- and four-byte
//!   frames).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use minitel_core::keyboard::FunctionKey;
use minitel_core::protocol::Manufacturer;
use minitel_core::{Baudrate, Key, VisualizationModule};
use minitel_session::{Filter, Minitel, SessionConfig, SessionError, SimulatedTerminal};

type Log = Arc<Mutex<Vec<String>>>;

fn fast_config() -> SessionConfig {
    SessionConfig {
        read_timeout: Duration::from_millis(100),
        frame_timeout: Duration::from_millis(300),
        ..SessionConfig::default()
    }
}

fn record(log: &Log, name: &'static str) -> Box<dyn FnMut(&minitel_core::KeyEvent) + Send> {
    let log = Arc::clone(log);
    Box::new(move |_| log.lock().unwrap().push(name.to_string()))
}

// ── Handshake ─────────────────────────────────────────────────────────────────

#[test]
fn test_handshake_on_philips_minitel_1_uses_vgp2() {
    // Arrange
    let terminal = SimulatedTerminal::new().with_identity(b'B', b'b', b'5');

    // Act
    let session = Minitel::connect(terminal, fast_config()).unwrap();

    // Assert
    assert_eq!(session.identity().manufacturer, Manufacturer::Philips);
    assert_eq!(session.visualization_module(), VisualizationModule::Vgp2);
}

#[test]
fn test_handshake_starts_with_identification() {
    let terminal = SimulatedTerminal::new();
    let handle = terminal.handle();

    let _session = Minitel::connect(terminal, fast_config()).unwrap();

    assert_eq!(handle.writes()[0], vec![0x1B, 0x39, 0x7B]);
}

// ── Connector speed ───────────────────────────────────────────────────────────

#[test]
fn test_speed_change_followed_by_terminal() {
    // Arrange: Alcatel Minitel 1B on a 1200 baud line
    let terminal = SimulatedTerminal::new()
        .with_identity(b'C', b'u', b'<')
        .with_serial_line(1200);
    let handle = terminal.handle();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();

    // Act
    let applied = session
        .set_connector_baud(Baudrate::B4800, Baudrate::B4800)
        .unwrap();

    // Assert
    assert_eq!(applied, (Baudrate::B4800, Baudrate::B4800));
    assert_eq!(handle.terminal_baud(), Some(4800));
    assert!(session.identify().is_ok());
}

#[test]
fn test_speed_change_not_followed_rolls_back() {
    // Arrange: the terminal acknowledges but never switches
    let terminal = SimulatedTerminal::new()
        .with_identity(b'C', b'u', b'<')
        .with_serial_line(1200)
        .ignore_program();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();

    // Act
    let result = session.set_connector_baud(Baudrate::B4800, Baudrate::B4800);

    // Assert: failure is reported and the old rate still works
    assert!(matches!(
        result,
        Err(SessionError::BaudrateRejected { restored: 1200 })
    ));
    assert!(session.identify().is_ok());
    assert!(session.protocol_status().is_ok());
}

// ── Keyboard dispatch ─────────────────────────────────────────────────────────

#[test]
fn test_any_key_fires_before_exact_binding() {
    // Arrange
    let terminal = SimulatedTerminal::new();
    let handle = terminal.handle();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();
    let log: Log = Arc::default();
    session.set_filter(Filter::AnyKey(record(&log, "any")));
    session.bind(Key::Function(FunctionKey::Send).frame(), record(&log, "send"));

    // Act
    handle.press(&[0x13, 0x41]);
    let event = session.read_keyboard(None).unwrap().unwrap();

    // Assert
    assert_eq!(event.key, Some(Key::Function(FunctionKey::Send)));
    assert_eq!(*log.lock().unwrap(), vec!["any", "send"]);
}

#[test]
fn test_unregistered_control_frame_reaches_other_key_only() {
    let terminal = SimulatedTerminal::new();
    let handle = terminal.handle();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();
    let log: Log = Arc::default();
    session.set_filter(Filter::OtherKey(record(&log, "other")));
    session.set_filter(Filter::PrintableKey(Box::new(|_| panic!("not printable"))));
    session.bind(Key::Function(FunctionKey::Send).frame(), record(&log, "send"));

    handle.press(&[0x13, 0x46]);
    session.read_keyboard(None).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["other"]);
}

#[test]
fn test_empty_read_runs_no_key_filter() {
    let mut session = Minitel::connect(SimulatedTerminal::new(), fast_config()).unwrap();
    let idle = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&idle);
    session.set_filter(Filter::NoKey(Box::new(move || *counter.lock().unwrap() += 1)));

    let event = session
        .read_keyboard(Some(Duration::from_millis(20)))
        .unwrap();

    assert!(event.is_none());
    assert_eq!(*idle.lock().unwrap(), 1);
}

#[test]
fn test_slow_frame_assembles_into_one_event() {
    // Arrange: an accented key (SS2 cedilla c) typed one byte every 50 ms
    let terminal = SimulatedTerminal::new();
    let handle = terminal.handle();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    session.set_filter(Filter::AnyKey(Box::new(move |_| {
        *counter.lock().unwrap() += 1
    })));

    let typist = std::thread::spawn(move || {
        for byte in [0x19, 0x4B, b'c'] {
            handle.press(&[byte]);
            std::thread::sleep(Duration::from_millis(50));
        }
    });

    // Act
    let event = session.read_keyboard(Some(Duration::from_secs(1))).unwrap();
    typist.join().unwrap();
    let next = session
        .read_keyboard(Some(Duration::from_millis(50)))
        .unwrap();

    // Assert
    assert_eq!(event.unwrap().frame, vec![0x19, 0x4B, b'c']);
    assert!(next.is_none());
    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_slow_four_byte_escape_frame_assembles_into_one_event() {
    // Arrange: ESC [ 4 h (insert) typed one byte every 50 ms
    let terminal = SimulatedTerminal::new();
    let handle = terminal.handle();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    session.set_filter(Filter::AnyKey(Box::new(move |_| {
        *counter.lock().unwrap() += 1
    })));

    let typist = std::thread::spawn(move || {
        for byte in [0x1B, 0x5B, 0x34, 0x68] {
            handle.press(&[byte]);
            std::thread::sleep(Duration::from_millis(50));
        }
    });

    // Act
    let event = session.read_keyboard(Some(Duration::from_secs(1))).unwrap();
    typist.join().unwrap();
    let next = session
        .read_keyboard(Some(Duration::from_millis(50)))
        .unwrap();

    // Assert
    assert_eq!(event.unwrap().frame, vec![0x1B, 0x5B, 0x34, 0x68]);
    assert!(next.is_none());
    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_clear_bindings_silences_callbacks() {
    let terminal = SimulatedTerminal::new();
    let handle = terminal.handle();
    let mut session = Minitel::connect(terminal, fast_config()).unwrap();
    let log: Log = Arc::default();
    session.set_filter(Filter::AnyKey(record(&log, "any")));

    session.clear_bindings();
    handle.press(b"a");
    session.read_keyboard(None).unwrap();

    assert!(log.lock().unwrap().is_empty());
}
