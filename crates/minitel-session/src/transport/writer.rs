//! Background writer shared by every transport.
//!
//! Callers push byte buffers onto a [`WriteQueue`]; one dedicated thread pops
//! them in order and hands each to a [`Sink`] that performs the physical
//! write (and, for serial lines, paces it).  Distinct enqueue calls are never
//! merged into one write.
//!
//! # Shutdown
//!
//! The writer waits on the queue for at most [`POP_WAIT`] so it notices a stop
//! request promptly.  [`Writer::shutdown`] signals, wakes and joins the
//! thread; items still queued at that point are written first.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::error::TransportError;

/// Longest time the writer blocks on an empty queue before re-checking the
/// stop flag.
pub const POP_WAIT: Duration = Duration::from_secs(1);

/// Physical side of a transport, driven by the writer thread.
pub trait Sink: Send + 'static {
    /// Writes one queued item completely.
    ///
    /// `ErrorKind::TimedOut` and `ErrorKind::WouldBlock` put the item back at
    /// the head of the queue; any other error stops the writer.
    fn write_item(&mut self, data: &[u8]) -> io::Result<()>;
}

/// Writes `data[*offset..]`, advancing `offset` as bytes go out.
///
/// On error `offset` keeps the progress made, so a retried item resumes where
/// the previous attempt stopped instead of resending its head.  On success
/// `offset` is reset for the next item.
pub fn write_resumable<W: io::Write>(
    out: &mut W,
    data: &[u8],
    offset: &mut usize,
) -> io::Result<()> {
    while *offset < data.len() {
        match out.write(&data[*offset..]) {
            Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero)),
            Ok(n) => *offset += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    *offset = 0;
    out.flush()
}

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<Vec<u8>>,
    in_flight: bool,
    closed: bool,
}

/// FIFO of pending writes shared between callers and the writer thread.
#[derive(Debug, Default)]
pub struct WriteQueue {
    state: Mutex<QueueState>,
    available: Condvar,
    idle: Condvar,
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // A poisoned queue still holds consistent data: every critical section
        // is a plain field update.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Appends `data`.  Fails once the queue is closed.
    pub fn push(&self, data: Vec<u8>) -> Result<(), TransportError> {
        let mut state = self.lock();
        if state.closed {
            error!("writer stopped, cannot queue {} bytes", data.len());
            return Err(TransportError::Stopped);
        }
        state.items.push_back(data);
        self.available.notify_one();
        Ok(())
    }

    /// Takes the next item, waiting up to `wait`.  The item counts as in
    /// flight until [`finish`](Self::finish) or [`requeue`](Self::requeue).
    pub fn pop_timeout(&self, wait: Duration) -> Option<Vec<u8>> {
        let deadline = Instant::now() + wait;
        let mut state = self.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                state.in_flight = true;
                return Some(item);
            }
            if state.closed {
                return None;
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            state = self
                .available
                .wait_timeout(state, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
    }

    /// Marks the in-flight item as written.
    pub fn finish(&self) {
        let mut state = self.lock();
        state.in_flight = false;
        if state.items.is_empty() {
            self.idle.notify_all();
        }
    }

    /// Puts a partially failed item back at the head of the queue.
    pub fn requeue(&self, data: Vec<u8>) {
        let mut state = self.lock();
        state.in_flight = false;
        state.items.push_front(data);
    }

    /// Drops every pending item (the in-flight one is unaffected).
    pub fn clear(&self) -> usize {
        let mut state = self.lock();
        let dropped = state.items.len();
        state.items.clear();
        if !state.in_flight {
            self.idle.notify_all();
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks until nothing is queued or in flight.  Returns `false` on timeout.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        while !state.items.is_empty() || state.in_flight {
            if state.closed && !state.in_flight && state.items.is_empty() {
                break;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            state = self
                .idle
                .wait_timeout(state, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
        true
    }

    /// Refuses further pushes and wakes the writer.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        self.available.notify_all();
        self.idle.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Handle on a running writer thread.
pub struct Writer {
    queue: Arc<WriteQueue>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Writer {
    /// Spawns the writer thread draining a fresh queue into `sink`.
    pub fn spawn<S: Sink>(name: &str, sink: S) -> Result<Self, TransportError> {
        let queue = Arc::new(WriteQueue::new());
        let running = Arc::new(AtomicBool::new(true));

        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn({
                let queue = Arc::clone(&queue);
                let running = Arc::clone(&running);
                move || writer_loop(sink, queue, running)
            })
            .map_err(TransportError::Io)?;

        debug!("writer thread {name} started");
        Ok(Self {
            queue,
            running,
            handle: Some(handle),
        })
    }

    pub fn queue(&self) -> &Arc<WriteQueue> {
        &self.queue
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Signals the thread, wakes it and waits for it to exit.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.queue.close();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("writer thread panicked");
            }
        }
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn writer_loop<S: Sink>(mut sink: S, queue: Arc<WriteQueue>, running: Arc<AtomicBool>) {
    loop {
        let Some(item) = queue.pop_timeout(POP_WAIT) else {
            if !running.load(Ordering::Relaxed) || queue.is_closed() {
                break;
            }
            continue;
        };

        match sink.write_item(&item) {
            Ok(()) => queue.finish(),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                warn!("write timed out, retrying {} bytes", item.len());
                queue.requeue(item);
                if !running.load(Ordering::Relaxed) {
                    break;
                }
            }
            Err(e) => {
                error!("write failed: {e}");
                queue.finish();
                running.store(false, Ordering::Relaxed);
                queue.close();
                break;
            }
        }
    }
    debug!("writer thread stopped");
}
