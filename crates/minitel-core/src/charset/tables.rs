//! Static glyph tables for the Minitel alphanumeric character set.
//!
//! Each table is a list of `(glyph, bytes)` pairs.  When two glyphs share the
//! same byte sequence, the first one listed is the canonical glyph returned by
//! decoding.
//!
//! | Table            | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`G0`]           | Base set, one byte per glyph (0x21–0x7E)              |
//! | [`VGP2`]/[`VGP5`]| `SS2`-prefixed currency, arrows, fractions, accents   |
//! | [`SUPPLEMENTARY`]| Space and the full block                              |
//! | [`EQUIVALENTS`]  | Closest rendering for glyphs the ROM cannot show      |

/// Single shift 2: introduces a G2 (supplementary) character.
pub const SS2: u8 = 0x19;

/// Accent selectors that combine with a following base letter.
pub const ACCENT_GRAVE: u8 = 0x41;
pub const ACCENT_ACUTE: u8 = 0x42;
pub const ACCENT_CIRCUMFLEX: u8 = 0x43;
pub const ACCENT_DIAERESIS: u8 = 0x48;
pub const ACCENT_CEDILLA: u8 = 0x4B;

/// Returns `true` if `b` is one of the accent selectors following `SS2`.
pub fn is_accent(b: u8) -> bool {
    matches!(
        b,
        ACCENT_GRAVE | ACCENT_ACUTE | ACCENT_CIRCUMFLEX | ACCENT_DIAERESIS | ACCENT_CEDILLA
    )
}

/// Base table: digits, punctuation and unaccented letters.
pub static G0: &[(char, &[u8])] = &[
    ('!', b"\x21"),
    ('"', b"\x22"),
    ('#', b"\x23"),
    ('$', b"\x24"),
    ('%', b"\x25"),
    ('&', b"\x26"),
    ('\'', b"\x27"),
    ('\u{2019}', b"\x27"),
    ('(', b"\x28"),
    (')', b"\x29"),
    ('*', b"\x2a"),
    ('+', b"\x2b"),
    (',', b"\x2c"),
    ('-', b"\x2d"),
    ('.', b"\x2e"),
    ('/', b"\x2f"),
    ('0', b"\x30"),
    ('1', b"\x31"),
    ('2', b"\x32"),
    ('3', b"\x33"),
    ('4', b"\x34"),
    ('5', b"\x35"),
    ('6', b"\x36"),
    ('7', b"\x37"),
    ('8', b"\x38"),
    ('9', b"\x39"),
    (':', b"\x3a"),
    (';', b"\x3b"),
    ('<', b"\x3c"),
    ('=', b"\x3d"),
    ('>', b"\x3e"),
    ('?', b"\x3f"),
    ('@', b"\x40"),
    ('A', b"\x41"),
    ('B', b"\x42"),
    ('C', b"\x43"),
    ('D', b"\x44"),
    ('E', b"\x45"),
    ('F', b"\x46"),
    ('G', b"\x47"),
    ('H', b"\x48"),
    ('I', b"\x49"),
    ('J', b"\x4a"),
    ('K', b"\x4b"),
    ('L', b"\x4c"),
    ('M', b"\x4d"),
    ('N', b"\x4e"),
    ('O', b"\x4f"),
    ('P', b"\x50"),
    ('Q', b"\x51"),
    ('R', b"\x52"),
    ('S', b"\x53"),
    ('T', b"\x54"),
    ('U', b"\x55"),
    ('V', b"\x56"),
    ('W', b"\x57"),
    ('X', b"\x58"),
    ('Y', b"\x59"),
    ('Z', b"\x5a"),
    ('[', b"\x5b"),
    ('\\', b"\x5c"),
    (']', b"\x5d"),
    ('\u{2191}', b"\x5e"), // ↑
    ('_', b"\x5f"),
    ('\u{2013}', b"\x60"), // –
    ('a', b"\x61"),
    ('b', b"\x62"),
    ('c', b"\x63"),
    ('d', b"\x64"),
    ('e', b"\x65"),
    ('f', b"\x66"),
    ('g', b"\x67"),
    ('h', b"\x68"),
    ('i', b"\x69"),
    ('j', b"\x6a"),
    ('k', b"\x6b"),
    ('l', b"\x6c"),
    ('m', b"\x6d"),
    ('n', b"\x6e"),
    ('o', b"\x6f"),
    ('p', b"\x70"),
    ('q', b"\x71"),
    ('r', b"\x72"),
    ('s', b"\x73"),
    ('t', b"\x74"),
    ('u', b"\x75"),
    ('v', b"\x76"),
    ('w', b"\x77"),
    ('x', b"\x78"),
    ('y', b"\x79"),
    ('z', b"\x7a"),
    ('\u{fe33}', b"\x7b"), // ︳
    ('|', b"\x7c"),
    ('\u{23b9}', b"\x7d"), // ⎹
    ('\u{203e}', b"\x7e"), // ‾
];

/// Older ROM: no paragraph sign or eszett, spelled out instead.
pub static VGP2: &[(char, &[u8])] = &[
    ('£', b"\x19\x23"),
    ('$', b"\x19\x24"),
    ('#', b"\x19\x26"),
    ('←', b"\x19\x2c"),
    ('↑', b"\x19\x2d"),
    ('→', b"\x19\x2e"),
    ('↓', b"\x19\x2f"),
    ('°', b"\x19\x30"),
    ('±', b"\x19\x31"),
    ('÷', b"\x19\x38"),
    ('¼', b"\x19\x3c"),
    ('½', b"\x19\x3d"),
    ('¾', b"\x19\x3e"),
    ('À', b"\x19\x41A"),
    ('à', b"\x19\x41a"),
    ('È', b"\x19\x41E"),
    ('è', b"\x19\x41e"),
    ('Ì', b"\x19\x41I"),
    ('ì', b"\x19\x41i"),
    ('Ò', b"\x19\x41O"),
    ('ò', b"\x19\x41o"),
    ('Ù', b"\x19\x41U"),
    ('ù', b"\x19\x41u"),
    ('Á', b"\x19\x42A"),
    ('á', b"\x19\x42a"),
    ('Ć', b"\x19\x42C"),
    ('ć', b"\x19\x42c"),
    ('É', b"\x19\x42E"),
    ('é', b"\x19\x42e"),
    ('Í', b"\x19\x42I"),
    ('í', b"\x19\x42i"),
    ('Ń', b"\x19\x43N"),
    ('ń', b"\x19\x43n"),
    ('Ó', b"\x19\x42O"),
    ('ó', b"\x19\x42o"),
    ('Ú', b"\x19\x42U"),
    ('ú', b"\x19\x42u"),
    ('Â', b"\x19\x43A"),
    ('â', b"\x19\x43a"),
    ('Ê', b"\x19\x43E"),
    ('ê', b"\x19\x43e"),
    ('Î', b"\x19\x43I"),
    ('î', b"\x19\x43i"),
    ('Ô', b"\x19\x43O"),
    ('ô', b"\x19\x43o"),
    ('Û', b"\x19\x43U"),
    ('û', b"\x19\x43u"),
    ('Ä', b"\x19\x48A"),
    ('ä', b"\x19\x48a"),
    ('Ë', b"\x19\x48E"),
    ('ë', b"\x19\x48e"),
    ('Ï', b"\x19\x48I"),
    ('ï', b"\x19\x48i"),
    ('Ö', b"\x19\x48O"),
    ('ö', b"\x19\x48o"),
    ('Ü', b"\x19\x48U"),
    ('ü', b"\x19\x48u"),
    ('Ÿ', b"\x19\x48Y"),
    ('ÿ', b"\x19\x48y"),
    // The ROM only has a lowercase cedilla; 'Ç' borrows it.
    ('ç', b"\x19\x4bc"),
    ('Ç', b"\x19\x4bc"),
    ('Ę', b"\x19\x4bE"),
    ('ę', b"\x19\x4be"),
    ('Į', b"\x19\x4bI"),
    ('į', b"\x19\x4bi"),
    ('Œ', b"\x19\x6a"),
    ('œ', b"\x19\x7a"),
    ('§', b"Paragraphe"),
    ('β', b"Beta"),
];

/// Newer ROM: full G2 set.
pub static VGP5: &[(char, &[u8])] = &[
    ('£', b"\x19\x23"),
    ('$', b"\x19\x24"),
    ('#', b"\x19\x26"),
    ('←', b"\x19\x2c"),
    ('↑', b"\x19\x2d"),
    ('→', b"\x19\x2e"),
    ('↓', b"\x19\x2f"),
    ('°', b"\x19\x30"),
    ('±', b"\x19\x31"),
    ('÷', b"\x19\x38"),
    ('¼', b"\x19\x3c"),
    ('½', b"\x19\x3d"),
    ('¾', b"\x19\x3e"),
    ('À', b"\x19\x41A"),
    ('à', b"\x19\x41a"),
    ('È', b"\x19\x41E"),
    ('è', b"\x19\x41e"),
    ('Ì', b"\x19\x41I"),
    ('ì', b"\x19\x41i"),
    ('Ò', b"\x19\x41O"),
    ('ò', b"\x19\x41o"),
    ('Ù', b"\x19\x41U"),
    ('ù', b"\x19\x41u"),
    ('Á', b"\x19\x42A"),
    ('á', b"\x19\x42a"),
    ('Ć', b"\x19\x42C"),
    ('ć', b"\x19\x42c"),
    ('É', b"\x19\x42E"),
    ('é', b"\x19\x42e"),
    ('Í', b"\x19\x42I"),
    ('í', b"\x19\x42i"),
    ('Ń', b"\x19\x43N"),
    ('ń', b"\x19\x43n"),
    ('Ó', b"\x19\x42O"),
    ('ó', b"\x19\x42o"),
    ('Ú', b"\x19\x42U"),
    ('ú', b"\x19\x42u"),
    ('Â', b"\x19\x43A"),
    ('â', b"\x19\x43a"),
    ('Ê', b"\x19\x43E"),
    ('ê', b"\x19\x43e"),
    ('Î', b"\x19\x43I"),
    ('î', b"\x19\x43i"),
    ('Ô', b"\x19\x43O"),
    ('ô', b"\x19\x43o"),
    ('Û', b"\x19\x43U"),
    ('û', b"\x19\x43u"),
    ('Ä', b"\x19\x48A"),
    ('ä', b"\x19\x48a"),
    ('Ë', b"\x19\x48E"),
    ('ë', b"\x19\x48e"),
    ('Ï', b"\x19\x48I"),
    ('ï', b"\x19\x48i"),
    ('Ö', b"\x19\x48O"),
    ('ö', b"\x19\x48o"),
    ('Ü', b"\x19\x48U"),
    ('ü', b"\x19\x48u"),
    ('Ÿ', b"\x19\x48Y"),
    ('ÿ', b"\x19\x48y"),
    // The ROM only has a lowercase cedilla; 'Ç' borrows it.
    ('ç', b"\x19\x4bc"),
    ('Ç', b"\x19\x4bc"),
    ('Ę', b"\x19\x4bE"),
    ('ę', b"\x19\x4be"),
    ('Į', b"\x19\x4bI"),
    ('į', b"\x19\x4bi"),
    ('Œ', b"\x19\x6a"),
    ('œ', b"\x19\x7a"),
    ('§', b"\x19\x27"),
    ('β', b"\x19\x7b"),
];

/// `SS2` second bytes with no assigned glyph.  They decode to `'_'`.
pub static G2_UNASSIGNED: &[u8] = &[
    0x21, 0x22, 0x25, 0x28, 0x29, 0x2a, 0x2b, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x39, 0x3a,
    0x3b, 0x3f, 0x40, 0x44, 0x45, 0x46, 0x47, 0x49, 0x4a, 0x4c, 0x4d, 0x4e, 0x4f, 0x50, 0x51,
    0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x5b, 0x5c, 0x5d, 0x5e, 0x5f, 0x60,
    0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6b, 0x6c, 0x6d, 0x6e, 0x6f, 0x70,
    0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7c, 0x7d, 0x7e,
];

/// Space and the full block mosaic.
pub static SUPPLEMENTARY: &[(char, &[u8])] = &[(' ', b"\x20"), ('█', b"\x7f")];

/// Closest rendering for glyphs absent from every ROM table.
pub static EQUIVALENTS: &[(char, &[u8])] = &[
    ('ª', b"a"),
    ('Æ', b"AE"),
    ('æ', b"ae"),
    ('Ã', b"A"),
    ('ã', b"a"),
    ('Å', b"A"),
    ('å', b"a"),
    ('Ā', b"A"),
    ('ā', b"a"),
    ('Č', b"C"),
    ('č', b"c"),
    ('Ė', b"E"),
    ('ė', b"e"),
    ('Ē', b"E"),
    ('ē', b"e"),
    ('Ī', b"I"),
    ('ī', b"i"),
    ('Ñ', b"N"),
    ('ñ', b"n"),
    ('Õ', b"O"),
    ('õ', b"o"),
    ('Ø', b"O"),
    ('ø', b"o"),
    ('Ō', b"O"),
    ('ō', b"o"),
    ('Ū', b"U"),
    ('ū', b"u"),
    ('€', b"Euro(s)"),
    ('¥', b"Yen(s)"),
];
