//! Serial line transport (7 data bits, even parity, 1 stop bit).
//!
//! The line is configured with termios through `nix`: raw mode, `CS7 |
//! PARENB`, parity checked and stripped on input.  Reads use `VMIN = 0,
//! VTIME = 1` so a single `read(2)` never blocks for more than 100 ms, and the
//! transport loops until the caller's deadline.
//!
//! With pacing enabled the writer sleeps `bytes * bits_per_byte / baud`
//! seconds after each item, then waits for the kernel output buffer to drain,
//! so a slow terminal never sees queued items merged or truncated.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use nix::sys::termios::{
    self, BaudRate, ControlFlags, FlushArg, InputFlags, SetArg, SpecialCharacterIndices,
};
use tracing::{debug, info, warn};

use super::writer::{write_resumable, Sink, Writer};
use super::{Transport, DEFAULT_TIMEOUT};
use crate::error::TransportError;

/// Line parameters for a serial transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub baudrate: u32,
    /// Line time of one byte in bit periods, used for pacing.  7E1 framing is
    /// 10 bits; the default adds a two-bit guard.
    pub bits_per_byte: u32,
    pub paced: bool,
    pub timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baudrate: 1200,
            bits_per_byte: 12,
            paced: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn termios_speed(bps: u32) -> io::Result<BaudRate> {
    match bps {
        75 => Ok(BaudRate::B75),
        300 => Ok(BaudRate::B300),
        1200 => Ok(BaudRate::B1200),
        4800 => Ok(BaudRate::B4800),
        9600 => Ok(BaudRate::B9600),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported line speed {other}"),
        )),
    }
}

/// Puts `file` in raw 7E1 mode at the given speeds.
fn configure_line(file: &File, output: u32, input: u32) -> io::Result<()> {
    let mut tio = termios::tcgetattr(file)?;
    termios::cfmakeraw(&mut tio);

    tio.control_flags &= !(ControlFlags::CSIZE | ControlFlags::PARODD | ControlFlags::CSTOPB);
    tio.control_flags |=
        ControlFlags::CS7 | ControlFlags::PARENB | ControlFlags::CREAD | ControlFlags::CLOCAL;
    tio.input_flags |= InputFlags::INPCK | InputFlags::ISTRIP;

    termios::cfsetospeed(&mut tio, termios_speed(output)?)?;
    termios::cfsetispeed(&mut tio, termios_speed(input)?)?;

    tio.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    tio.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;

    termios::tcflush(file, FlushArg::TCIOFLUSH)?;
    termios::tcsetattr(file, SetArg::TCSANOW, &tio)?;
    Ok(())
}

/// Writer side of the line.
struct SerialSink {
    file: File,
    baud: Arc<AtomicU32>,
    bits_per_byte: u32,
    paced: bool,
    offset: usize,
}

impl Sink for SerialSink {
    fn write_item(&mut self, data: &[u8]) -> io::Result<()> {
        write_resumable(&mut self.file, data, &mut self.offset)?;
        if self.paced {
            let baud = self.baud.load(Ordering::Relaxed).max(1);
            let bits = data.len() as u64 * u64::from(self.bits_per_byte);
            std::thread::sleep(Duration::from_micros(bits * 1_000_000 / u64::from(baud)));
            termios::tcdrain(&self.file)?;
        }
        Ok(())
    }
}

/// Transport over a local serial device such as `/dev/ttyUSB0`.
pub struct SerialTransport {
    path: PathBuf,
    settings: SerialSettings,
    file: Option<File>,
    writer: Option<Writer>,
    baud: Arc<AtomicU32>,
}

impl SerialTransport {
    pub fn new(path: impl AsRef<Path>, settings: SerialSettings) -> Self {
        let baud = Arc::new(AtomicU32::new(settings.baudrate));
        Self {
            path: path.as_ref().to_path_buf(),
            settings,
            file: None,
            writer: None,
            baud,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self) -> Result<&File, TransportError> {
        self.file.as_ref().ok_or(TransportError::Stopped)
    }

    fn writer(&self) -> Result<&Writer, TransportError> {
        self.writer.as_ref().ok_or(TransportError::Stopped)
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.file.is_some() {
            return Ok(());
        }
        let target = self.path.display().to_string();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(nix::libc::O_NOCTTY)
            .open(&self.path)
            .map_err(|source| TransportError::Open {
                target: target.clone(),
                source,
            })?;

        let rate = self.baud.load(Ordering::Relaxed);
        configure_line(&file, rate, rate).map_err(|source| TransportError::Open {
            target: target.clone(),
            source,
        })?;

        let sink = SerialSink {
            file: file.try_clone()?,
            baud: Arc::clone(&self.baud),
            bits_per_byte: self.settings.bits_per_byte,
            paced: self.settings.paced,
            offset: 0,
        };
        self.writer = Some(Writer::spawn("minitel-serial-writer", sink)?);
        self.file = Some(file);
        info!("opened {target} at {rate} bauds");
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            writer.shutdown();
        }
        if self.file.take().is_some() {
            debug!("closed {}", self.path.display());
        }
    }

    fn read(&mut self, n: usize, timeout: Option<Duration>) -> Result<Vec<u8>, TransportError> {
        let deadline = Instant::now() + timeout.unwrap_or(self.settings.timeout);
        let mut file = self.file()?;
        let mut buf = vec![0u8; n];
        let mut filled = 0;
        while filled < n {
            match file.read(&mut buf[filled..]) {
                Ok(got) => filled += got,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
            if filled < n && Instant::now() >= deadline {
                break;
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }

    fn enqueue(&self, data: &[u8]) -> Result<(), TransportError> {
        self.writer()?.queue().push(data.to_vec())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.settings.timeout = timeout;
    }

    fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    fn set_baud(&mut self, output: u32, input: u32) -> Result<(), TransportError> {
        let dropped = self.writer()?.queue().clear();
        if dropped > 0 {
            warn!("dropped {dropped} queued writes before changing speed");
        }
        configure_line(self.file()?, output, input)?;
        self.baud.store(output, Ordering::Relaxed);
        info!("{} now at {output}/{input} bauds", self.path.display());
        Ok(())
    }

    fn baudrate(&self) -> Option<u32> {
        Some(self.baud.load(Ordering::Relaxed))
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer()?.queue().clear();
        termios::tcflush(self.file()?, FlushArg::TCIOFLUSH).map_err(io::Error::from)?;
        Ok(())
    }

    fn drain(&self, timeout: Duration) -> bool {
        let Ok(writer) = self.writer() else {
            return true;
        };
        if !writer.queue().wait_idle(timeout) {
            return false;
        }
        match self.file() {
            Ok(file) => termios::tcdrain(file).is_ok(),
            Err(_) => true,
        }
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Serial devices worth probing: `/dev/tty` followed by a letter
/// (`ttyS0`, `ttyUSB0`, `ttyACM0`), sorted by name.
pub fn candidate_ports() -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir("/dev") else {
        return Vec::new();
    };
    let mut ports: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| is_candidate_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    ports.sort();
    ports
}

fn is_candidate_name(name: &str) -> bool {
    name.strip_prefix("tty")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_names() {
        assert!(is_candidate_name("ttyS0"));
        assert!(is_candidate_name("ttyUSB1"));
        assert!(is_candidate_name("ttyACM0"));
        assert!(!is_candidate_name("tty0"));
        assert!(!is_candidate_name("tty"));
        assert!(!is_candidate_name("console"));
    }

    #[test]
    fn test_termios_speed_rejects_unknown_rates() {
        assert!(termios_speed(1200).is_ok());
        assert!(termios_speed(2400).is_err());
    }

    #[test]
    fn test_new_transport_is_closed() {
        // Arrange
        let transport = SerialTransport::new("/dev/ttyS9", SerialSettings::default());

        // Assert
        assert_eq!(transport.baudrate(), Some(1200));
        assert!(matches!(transport.enqueue(b"x"), Err(TransportError::Stopped)));
        assert!(transport.drain(Duration::from_millis(1)));
    }

    #[test]
    fn test_open_missing_device_reports_target() {
        let mut transport =
            SerialTransport::new("/dev/does-not-exist-minitel", SerialSettings::default());
        match transport.open() {
            Err(TransportError::Open { target, .. }) => {
                assert_eq!(target, "/dev/does-not-exist-minitel")
            }
            other => panic!("expected Open error, got {other:?}"),
        }
    }
}
