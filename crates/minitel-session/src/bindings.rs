//! Keyboard binding table and its dispatch rule.
//!
//! Four optional filter slots sit next to an exact-frame table:
//!
//! | Slot        | Fires when                                                  |
//! |-------------|-------------------------------------------------------------|
//! | `AnyKey`    | every frame, first                                          |
//! | `Printable` | the frame names a key with a printable character            |
//! | exact frame | the raw frame bytes were bound with [`BindingTable::bind`]  |
//! | `OtherKey`  | none of the three above fired                               |
//! | `NoKey`     | a read timed out with no byte at all                        |
//!
//! At most one exact binding fires per frame.

use std::collections::HashMap;

use minitel_core::KeyEvent;
use minitel_core::Key;
use tracing::trace;

pub type KeyCallback = Box<dyn FnMut(&KeyEvent) + Send>;
pub type CharCallback = Box<dyn FnMut(char) + Send>;
pub type IdleCallback = Box<dyn FnMut() + Send>;

/// A filter slot with the callback it holds.
pub enum Filter {
    AnyKey(KeyCallback),
    PrintableKey(CharCallback),
    OtherKey(KeyCallback),
    NoKey(IdleCallback),
}

/// Which callbacks ran for one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatched {
    pub any_key: bool,
    pub printable: bool,
    pub exact: bool,
    pub other_key: bool,
}

impl Dispatched {
    pub fn fired(&self) -> bool {
        self.any_key || self.printable || self.exact || self.other_key
    }
}

/// Callbacks owned by a session.
#[derive(Default)]
pub struct BindingTable {
    any_key: Option<KeyCallback>,
    printable: Option<CharCallback>,
    other_key: Option<KeyCallback>,
    no_key: Option<IdleCallback>,
    exact: HashMap<Vec<u8>, KeyCallback>,
}

impl std::fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingTable")
            .field("any_key", &self.any_key.is_some())
            .field("printable", &self.printable.is_some())
            .field("other_key", &self.other_key.is_some())
            .field("no_key", &self.no_key.is_some())
            .field("exact", &self.exact.len())
            .finish()
    }
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills (or replaces) one filter slot.
    pub fn set_filter(&mut self, filter: Filter) {
        match filter {
            Filter::AnyKey(cb) => self.any_key = Some(cb),
            Filter::PrintableKey(cb) => self.printable = Some(cb),
            Filter::OtherKey(cb) => self.other_key = Some(cb),
            Filter::NoKey(cb) => self.no_key = Some(cb),
        }
    }

    /// Binds raw frame bytes, replacing any previous binding for them.
    pub fn bind(&mut self, frame: impl Into<Vec<u8>>, callback: KeyCallback) {
        self.exact.insert(frame.into(), callback);
    }

    pub fn bind_key(&mut self, key: Key, callback: KeyCallback) {
        self.bind(key.frame(), callback);
    }

    /// Removes the exact binding for `frame`; returns whether one existed.
    pub fn unbind(&mut self, frame: &[u8]) -> bool {
        self.exact.remove(frame).is_some()
    }

    pub fn is_bound(&self, frame: &[u8]) -> bool {
        self.exact.contains_key(frame)
    }

    /// Drops every filter and binding.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Runs the callbacks for one keystroke.
    pub fn dispatch(&mut self, event: &KeyEvent) -> Dispatched {
        let mut fired = Dispatched::default();

        if let Some(cb) = self.any_key.as_mut() {
            cb(event);
            fired.any_key = true;
        }
        if let (Some(c), Some(cb)) = (event.printable(), self.printable.as_mut()) {
            cb(c);
            fired.printable = true;
        }
        if let Some(cb) = self.exact.get_mut(&event.frame) {
            cb(event);
            fired.exact = true;
        }
        if !fired.fired() {
            if let Some(cb) = self.other_key.as_mut() {
                cb(event);
                fired.other_key = true;
            }
        }
        trace!(frame = ?event.frame, ?fired, "dispatched");
        fired
    }

    /// Runs the no-key filter after an empty read.  Returns whether it ran.
    pub fn dispatch_timeout(&mut self) -> bool {
        match self.no_key.as_mut() {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log, name: &'static str) -> KeyCallback {
        let log = Arc::clone(log);
        Box::new(move |_| log.lock().unwrap().push(name.to_string()))
    }

    #[test]
    fn test_any_key_fires_before_exact() {
        // Arrange
        let log: Log = Arc::default();
        let mut table = BindingTable::new();
        table.set_filter(Filter::AnyKey(recorder(&log, "any")));
        table.bind(vec![0x13, 0x41], recorder(&log, "send"));

        // Act
        let fired = table.dispatch(&KeyEvent::from_frame(vec![0x13, 0x41]));

        // Assert
        assert_eq!(*log.lock().unwrap(), vec!["any", "send"]);
        assert!(fired.any_key && fired.exact && !fired.other_key);
    }

    #[test]
    fn test_printable_filter_gets_character() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut table = BindingTable::new();
        let sink = Arc::clone(&seen);
        table.set_filter(Filter::PrintableKey(Box::new(move |c| {
            sink.lock().unwrap().push(c)
        })));

        table.dispatch(&KeyEvent::from_frame(b"a".to_vec()));

        assert_eq!(*seen.lock().unwrap(), vec!['a']);
    }

    #[test]
    fn test_other_key_only_when_nothing_else_fired() {
        let log: Log = Arc::default();
        let mut table = BindingTable::new();
        table.set_filter(Filter::OtherKey(recorder(&log, "other")));
        table.bind(vec![0x13, 0x41], recorder(&log, "send"));

        table.dispatch(&KeyEvent::from_frame(vec![0x13, 0x41]));
        table.dispatch(&KeyEvent::from_frame(vec![0x13, 0x42]));

        assert_eq!(*log.lock().unwrap(), vec!["send", "other"]);
    }

    #[test]
    fn test_printable_key_suppresses_other_key() {
        let log: Log = Arc::default();
        let mut table = BindingTable::new();
        table.set_filter(Filter::OtherKey(recorder(&log, "other")));
        table.set_filter(Filter::PrintableKey(Box::new(|_| {})));

        let fired = table.dispatch(&KeyEvent::from_frame(b"z".to_vec()));

        assert!(fired.printable);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_timeout_runs_no_key_filter_only() {
        let count = Arc::new(Mutex::new(0));
        let mut table = BindingTable::new();
        assert!(!table.dispatch_timeout());

        let c = Arc::clone(&count);
        table.set_filter(Filter::NoKey(Box::new(move || *c.lock().unwrap() += 1)));

        assert!(table.dispatch_timeout());
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_clear_and_unbind() {
        let log: Log = Arc::default();
        let mut table = BindingTable::new();
        table.bind(vec![0x13, 0x41], recorder(&log, "send"));
        table.set_filter(Filter::AnyKey(recorder(&log, "any")));

        assert!(table.unbind(&[0x13, 0x41]));
        assert!(!table.unbind(&[0x13, 0x41]));
        table.clear();
        let fired = table.dispatch(&KeyEvent::from_frame(vec![0x13, 0x41]));

        assert!(!fired.fired());
        assert!(log.lock().unwrap().is_empty());
    }
}
