//! WinAnsiEncoding (Windows-1252) mapping
//!
//! Stamped text is written into content streams as single-byte strings with
//! WinAnsiEncoding, so every character has to be mapped to its cp1252 code.

/// cp1252 codes 0x80-0x9F, which differ from Latin-1. `\u{0}` marks the
/// five undefined codes in that range.
const HIGH_TABLE: [char; 32] = [
    '\u{20AC}', '\u{0}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{0}', '\u{017D}', '\u{0}',
    '\u{0}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{0}', '\u{017E}', '\u{0178}',
];

/// Map a WinAnsi code in the printable range to its Unicode character.
/// Returns `None` for control codes and the undefined cp1252 slots.
pub fn winansi_to_char(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E => Some(code as char),
        0x80..=0x9F => {
            let ch = HIGH_TABLE[(code - 0x80) as usize];
            (ch != '\u{0}').then_some(ch)
        }
        0xA0..=0xFF => char::from_u32(code as u32),
        _ => None,
    }
}

/// Map a Unicode character to its WinAnsi code, if representable.
pub fn char_to_winansi(ch: char) -> Option<u8> {
    match ch {
        '\u{20}'..='\u{7E}' => Some(ch as u8),
        '\u{A0}'..='\u{FF}' => Some(ch as u32 as u8),
        _ => HIGH_TABLE
            .iter()
            .position(|&c| c == ch && c != '\u{0}')
            .map(|i| 0x80 + i as u8),
    }
}

/// Encode text as WinAnsi bytes. Characters outside the encoding are
/// replaced with `?` so a name never silently disappears from the page.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| char_to_winansi(ch).unwrap_or(b'?'))
        .collect()
}
