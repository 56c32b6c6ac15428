//! Keyboard decoding: frame assembly and the key table.
//!
//! Raw bytes from the terminal go through [`FrameAssembler`] to produce one
//! frame per keystroke; [`Key::from_frame`] then names the keystroke.  A frame
//! that names no known key is still delivered as a [`KeyEvent`] so exact-frame
//! bindings and the "other key" filter can see it.

pub mod frame;
pub mod key;

pub use frame::{split_frames, FrameAssembler, FrameStatus};
pub use key::{CursorKey, FunctionKey, Key, VideotexKey};

/// One keystroke as read from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub frame: Vec<u8>,
    pub key: Option<Key>,
}

impl KeyEvent {
    pub fn from_frame(frame: Vec<u8>) -> Self {
        let key = Key::from_frame(&frame);
        Self { frame, key }
    }

    /// Printable projection of the key, if any.
    pub fn printable(&self) -> Option<char> {
        self.key.and_then(Key::printable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_from_known_frame() {
        let event = KeyEvent::from_frame(b"\x13\x41".to_vec());
        assert_eq!(event.key, Some(Key::Function(FunctionKey::Send)));
        assert_eq!(event.printable(), None);
    }

    #[test]
    fn test_key_event_from_unknown_frame() {
        let event = KeyEvent::from_frame(vec![0x13, 0x7F]);
        assert_eq!(event.key, None);
        assert_eq!(event.frame, vec![0x13, 0x7F]);
    }
}
