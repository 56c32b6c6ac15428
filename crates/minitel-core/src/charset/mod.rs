//! Bidirectional character codec between Unicode and the Minitel alphanumeric set.
//!
//! # How Minitel text is encoded (for beginners)
//!
//! The terminal understands a 7-bit character set.  Plain ASCII letters,
//! digits and punctuation are sent as a single byte (the *G0* set).  Everything
//! else (currency signs, arrows, accented letters) lives in the *G2* set and is
//! introduced by the `SS2` byte (0x19):
//!
//! ```text
//! '£'  ->  SS2 0x23
//! 'é'  ->  SS2 0x42 'e'      (acute accent selector + base letter)
//! ```
//!
//! Two character-ROM revisions exist.  [`VisualizationModule::Vgp5`] has the
//! complete G2 set; [`VisualizationModule::Vgp2`] lacks a few glyphs, which are
//! spelled out as text instead.
//!
//! # Lookup order
//!
//! Encoding tries the base table, then the ROM table, then the supplementary
//! table, then the table of closest equivalents.  A glyph found nowhere is
//! replaced by `'_'` and an error is logged; encoding never fails.
//!
//! Decoding is VM-independent: the accented three-byte form is tried first,
//! then the two-byte `SS2` form, then single bytes.

pub mod tables;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::error;

use tables::{EQUIVALENTS, G0, G2_UNASSIGNED, SS2, SUPPLEMENTARY, VGP2, VGP5};

/// Byte emitted when a glyph has no encoding.
pub const FALLBACK_BYTE: u8 = 0x5F;

/// Glyph returned when bytes cannot be decoded.
pub const FALLBACK_GLYPH: char = '_';

/// Character-ROM revision of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualizationModule {
    /// Older ROM without the paragraph sign and eszett.
    #[serde(rename = "VGP2")]
    Vgp2,
    /// Newer ROM with the full G2 set.
    #[serde(rename = "VGP5")]
    Vgp5,
}

impl VisualizationModule {
    /// Every revision, in file-export order.
    pub const ALL: [VisualizationModule; 2] = [VisualizationModule::Vgp2, VisualizationModule::Vgp5];

    /// Short name used in logs and exported file names.
    pub fn name(self) -> &'static str {
        match self {
            VisualizationModule::Vgp2 => "VGP2",
            VisualizationModule::Vgp5 => "VGP5",
        }
    }
}

impl fmt::Display for VisualizationModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Lookup tables ─────────────────────────────────────────────────────────────

struct CodecTables {
    g0: HashMap<char, &'static [u8]>,
    vgp2: HashMap<char, &'static [u8]>,
    vgp5: HashMap<char, &'static [u8]>,
    supplementary: HashMap<char, &'static [u8]>,
    equivalents: HashMap<char, &'static [u8]>,
    /// Inverse of G0 + supplementary (single bytes).
    single: HashMap<u8, char>,
    /// Inverse of the G2 tables (two- and three-byte forms).
    g2: HashMap<&'static [u8], char>,
}

fn forward(table: &'static [(char, &'static [u8])]) -> HashMap<char, &'static [u8]> {
    let mut map = HashMap::with_capacity(table.len());
    for &(glyph, bytes) in table {
        map.entry(glyph).or_insert(bytes);
    }
    map
}

fn codec_tables() -> &'static CodecTables {
    static TABLES: OnceLock<CodecTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut single = HashMap::new();
        for &(glyph, bytes) in G0.iter().chain(SUPPLEMENTARY) {
            single.entry(bytes[0]).or_insert(glyph);
        }

        // VGP5 is a superset of the VGP2 escape codes; spelled-out VGP2
        // entries are plain G0 text and are not inverted.
        let mut g2: HashMap<&'static [u8], char> = HashMap::new();
        for &(glyph, bytes) in VGP5 {
            if bytes.first() == Some(&SS2) {
                g2.entry(bytes).or_insert(glyph);
            }
        }
        for code in G2_UNASSIGNED {
            let pair: &'static [u8] = unassigned_pair(*code);
            g2.entry(pair).or_insert(FALLBACK_GLYPH);
        }

        CodecTables {
            g0: forward(G0),
            vgp2: forward(VGP2),
            vgp5: forward(VGP5),
            supplementary: forward(SUPPLEMENTARY),
            equivalents: forward(EQUIVALENTS),
            single,
            g2,
        }
    })
}

/// Returns a `'static` `[SS2, code]` slice for an unassigned G2 code.
fn unassigned_pair(code: u8) -> &'static [u8] {
    static PAIRS: OnceLock<Vec<[u8; 2]>> = OnceLock::new();
    let pairs = PAIRS.get_or_init(|| (0u8..0x80).map(|c| [SS2, c]).collect());
    &pairs[usize::from(code & 0x7F)]
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Looks up the encoding of `glyph` without substituting the fallback.
///
/// Returns `None` when no table knows the glyph.
pub fn lookup(glyph: char, vm: VisualizationModule) -> Option<&'static [u8]> {
    let t = codec_tables();
    let rom = match vm {
        VisualizationModule::Vgp2 => &t.vgp2,
        VisualizationModule::Vgp5 => &t.vgp5,
    };
    t.g0.get(&glyph)
        .or_else(|| rom.get(&glyph))
        .or_else(|| t.supplementary.get(&glyph))
        .or_else(|| t.equivalents.get(&glyph))
        .copied()
}

/// Appends the encoding of `glyph` to `out`.
///
/// Returns `false` (after logging) when the fallback glyph was substituted.
pub fn encode_into(glyph: char, vm: VisualizationModule, out: &mut Vec<u8>) -> bool {
    match lookup(glyph, vm) {
        Some(bytes) => {
            out.extend_from_slice(bytes);
            true
        }
        None => {
            error!("unable to encode {glyph:?} for {vm}; substituting '_'");
            out.push(FALLBACK_BYTE);
            false
        }
    }
}

/// Encodes a single glyph.
///
/// # Examples
///
/// ```rust
/// use minitel_core::charset::{encode, VisualizationModule};
///
/// assert_eq!(encode('A', VisualizationModule::Vgp5), vec![0x41]);
/// assert_eq!(encode('é', VisualizationModule::Vgp5), vec![0x19, 0x42, b'e']);
/// ```
pub fn encode(glyph: char, vm: VisualizationModule) -> Vec<u8> {
    let mut out = Vec::with_capacity(3);
    encode_into(glyph, vm, &mut out);
    out
}

/// Encodes every glyph of `text` in order.
pub fn encode_str(text: &str, vm: VisualizationModule) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for glyph in text.chars() {
        encode_into(glyph, vm, &mut out);
    }
    out
}

/// Decodes the glyph at the start of `data`.
///
/// Returns the number of bytes consumed and the glyph.  Undecodable input
/// consumes one byte and yields [`FALLBACK_GLYPH`].  Empty input consumes
/// nothing.
pub fn decode(data: &[u8]) -> (usize, char) {
    let Some(&first) = data.first() else {
        return (0, FALLBACK_GLYPH);
    };
    let t = codec_tables();

    if first == SS2 {
        if data.len() >= 3 && tables::is_accent(data[1]) {
            if let Some(&glyph) = t.g2.get(&data[..3]) {
                return (3, glyph);
            }
        }
        if data.len() >= 2 {
            if let Some(&glyph) = t.g2.get(&data[..2]) {
                return (2, glyph);
            }
        } else {
            error!("SS2 found but only {} byte(s) available", data.len());
        }
    }

    if let Some(&glyph) = t.single.get(&first) {
        return (1, glyph);
    }

    error!("unable to decode bytes {}", hex(data));
    (1, FALLBACK_GLYPH)
}

/// Decodes a whole byte string.
pub fn decode_all(mut data: &[u8]) -> String {
    let mut text = String::with_capacity(data.len());
    while !data.is_empty() {
        let (used, glyph) = decode(data);
        text.push(glyph);
        data = &data[used.max(1)..];
    }
    text
}

/// Formats bytes as lowercase hex for log messages.
pub fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
