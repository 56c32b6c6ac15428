//! TCP front end and the per-terminal page loop.
//!
//! # Threading (for beginners)
//!
//! The accept loop is async (Tokio), but a session is blocking: every read
//! waits on the socket with a timeout.  Each accepted client therefore runs on
//! its own `spawn_blocking` thread, so a slow terminal never stalls the accept
//! loop or the other terminals.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use minitel_core::keyboard::FunctionKey;
use minitel_core::layout::{erase_in_line, EraseLine};
use minitel_core::{Key, KeyEvent, VideotexPage};
use minitel_session::{Minitel, SessionError, SocketTransport, Transport, TransportError};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::config::TerminalConfig;
use crate::welcome;

/// Row where decoded keystrokes are echoed.
const ECHO_ROW: u16 = 19;
/// How often the accept loop checks the shutdown flag.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

/// Binds the listener and serves terminals until `running` is cleared.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn run_server(
    addr: SocketAddr,
    terminal: TerminalConfig,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind terminal listener on {addr}"))?;
    info!("serving Minitel terminals on {addr}");
    accept_loop(listener, terminal, running).await;
    Ok(())
}

/// Accepts clients on an already bound listener.
pub async fn accept_loop(listener: TcpListener, terminal: TerminalConfig, running: Arc<AtomicBool>) {
    let terminal = Arc::new(terminal);

    while running.load(Ordering::Relaxed) {
        match timeout(ACCEPT_POLL, listener.accept()).await {
            Ok(Ok((stream, peer))) => {
                let terminal = Arc::clone(&terminal);
                let running = Arc::clone(&running);
                tokio::task::spawn_blocking(move || {
                    let span = info_span!("terminal", session = %Uuid::new_v4(), %peer);
                    let _enter = span.enter();
                    handle_client(stream, peer, &terminal, &running);
                });
            }
            Ok(Err(e)) => error!("accept error: {e}"),
            // No client in the last poll interval.
            Err(_) => {}
        }
    }
    info!("shutdown flag set; stopping accept loop");
}

fn handle_client(stream: TcpStream, peer: SocketAddr, terminal: &TerminalConfig, running: &AtomicBool) {
    info!("terminal connected");
    let stream = match stream.into_std().and_then(|s| {
        s.set_nonblocking(false)?;
        Ok(s)
    }) {
        Ok(stream) => stream,
        Err(e) => {
            error!("cannot take over the client socket: {e}");
            return;
        }
    };

    let mut minitel = match Minitel::connect(SocketTransport::new(stream), terminal.session_config()) {
        Ok(minitel) => minitel,
        Err(e) => {
            warn!("handshake failed: {e}");
            return;
        }
    };

    // Keystrokes already appear on screen through the modem loop-back.
    if let Err(e) = minitel.disable_echo() {
        warn!("could not disable local echo: {e}");
    }

    let page = match welcome::page(Some(&peer.to_string())) {
        Ok(page) => page,
        Err(e) => {
            error!("cannot build the welcome page: {e}");
            return;
        }
    };
    match run_terminal(&mut minitel, &page, running) {
        Ok(()) => info!("terminal session ended"),
        Err(e) => warn!("terminal session aborted: {e}"),
    }
    minitel.close();
}

/// Shows `page`, then echoes every keystroke until the user presses
/// Connection/End, the peer goes away or `running` is cleared.
pub fn run_terminal<T: Transport>(
    minitel: &mut Minitel<T>,
    page: &VideotexPage,
    running: &AtomicBool,
) -> Result<(), SessionError> {
    minitel.clear()?;
    minitel.send_page(page)?;
    minitel.hide_cursor()?;

    while running.load(Ordering::Relaxed) {
        let event = match minitel.read_keyboard(None) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(SessionError::Transport(TransportError::Disconnected)) => {
                debug!("peer closed the connection");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if event.key == Some(Key::Function(FunctionKey::ConnectionSwitch)) {
            minitel.clear()?;
            return Ok(());
        }
        echo_key(minitel, &event)?;
    }
    Ok(())
}

fn echo_key<T: Transport>(minitel: &mut Minitel<T>, event: &KeyEvent) -> Result<(), SessionError> {
    let label = describe(event);
    minitel.move_cursor(ECHO_ROW, 8)?;
    minitel.send(&erase_in_line(EraseLine::CursorToEnd))?;
    minitel.print(&label)
}

/// Text shown for a keystroke: the character itself, the key name, or the raw
/// frame for keys the table does not know.
pub fn describe(event: &KeyEvent) -> String {
    match event.key {
        Some(key) => match key.printable() {
            Some(c) => format!("Touche : {c}"),
            None => format!("Touche : {key:?}"),
        },
        None => format!("Code : {}", minitel_core::charset::hex(&event.frame)),
    }
}
