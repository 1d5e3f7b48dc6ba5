//! MeatPack G-code packing codec.
//!
//! MeatPack squeezes the fifteen characters that dominate G-code (`0-9`,
//! `.`, space, newline, `G`, `X`) into 4-bit codes, two per output byte. The
//! sixteenth code (`0xF`) marks the other nibble's character as unpackable:
//! it follows as a full byte. Two escape nibbles (`0xFF`) mean both
//! characters follow verbatim, and `0xFF 0xFF` introduces a three-byte
//! command word understood by the firmware.

use bytes::{BufMut, BytesMut};

/// Byte that, repeated twice, introduces a command word.
pub const COMMAND_BYTE: u8 = 0xFF;

/// Nibble code marking the paired character as unpackable.
const ESCAPE: u8 = 0x0F;

/// Both characters of the pair are sent as full bytes.
const BOTH_UNPACKABLE: u8 = 0xFF;

/// Control commands sent to the device as `0xFF 0xFF <command>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    TogglePacking = 0b1111_1101,
    PackingEnable = 0b1111_1011,
    PackingDisable = 0b1111_1010,
    ResetDeviceState = 0b1111_1001,
    QueryPackingState = 0b1111_1000,
}

impl Command {
    /// Wire form of the command word.
    pub fn to_bytes(self) -> [u8; 3] {
        [COMMAND_BYTE, COMMAND_BYTE, self as u8]
    }
}

/// 4-bit code for a packable character, or `None` if it must be escaped.
fn pack_code(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'.' => Some(0b1010),
        b' ' => Some(0b1011),
        b'\n' => Some(0b1100),
        b'G' => Some(0b1101),
        b'X' => Some(0b1110),
        _ => None,
    }
}

/// Whether a byte has a 4-bit code in the lookup table.
pub fn is_packable(byte: u8) -> bool {
    pack_code(byte).is_some()
}

fn pack_pair(low: u8, high: u8) -> u8 {
    (high << 4) | low
}

/// Pack one G-code line into `out`.
///
/// Comment and blank lines produce no output. An inline `;` comment is
/// stripped and the line re-terminated. Characters are packed in pairs; an
/// odd trailing character is paired behind a space so the stream stays
/// byte-aligned.
pub fn pack_line(line: &str, out: &mut BytesMut) {
    let first = match line.bytes().next() {
        Some(byte) => byte,
        None => return,
    };
    if first == b';' || first == b'\n' || first == b'\r' {
        return;
    }
    if line.len() < 2 {
        return;
    }

    let stripped;
    let line = if line.contains(';') {
        stripped = format!(
            "{}\n",
            line.split(';').next().unwrap_or_default().trim_end()
        );
        stripped.as_str()
    } else {
        line
    };

    let bytes = line.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        // Odd trailing character: pack it behind a leading space.
        let (first, second) = if idx == bytes.len() - 1 {
            (b' ', bytes[idx])
        } else {
            (bytes[idx], bytes[idx + 1])
        };

        match (pack_code(first), pack_code(second)) {
            (Some(low), Some(high)) => out.put_u8(pack_pair(low, high)),
            (Some(low), None) => {
                out.put_u8(pack_pair(low, ESCAPE));
                out.put_u8(second);
            }
            (None, Some(high)) => {
                out.put_u8(pack_pair(ESCAPE, high));
                out.put_u8(first);
            }
            (None, None) => {
                out.put_u8(BOTH_UNPACKABLE);
                out.put_u8(first);
                out.put_u8(second);
            }
        }

        idx += 2;
    }
}

/// Pack a whole G-code stream, bracketed by the command words that switch
/// the device into packed mode and reset it afterwards.
pub fn pack_gcode(src: &str) -> BytesMut {
    let mut out = BytesMut::with_capacity(src.len() / 2 + 8);

    out.put_slice(&Command::PackingEnable.to_bytes());
    for line in src.split_inclusive('\n') {
        pack_line(line, &mut out);
    }
    out.put_slice(&Command::ResetDeviceState.to_bytes());

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(line: &str) -> Vec<u8> {
        let mut out = BytesMut::new();
        pack_line(line, &mut out);
        out.to_vec()
    }

    #[test]
    fn packs_fully_packable_pairs() {
        // (G,1) -> 0x1D, (' ',X) -> 0xEB, (1,\n) -> 0xC1
        assert_eq!(packed("G1 X1\n"), vec![0x1D, 0xEB, 0xC1]);
    }

    #[test]
    fn escapes_single_unpackable_character() {
        // 'M' has no code: the '8' nibble carries the escape marker and the
        // full byte follows.
        assert_eq!(packed("M84\n"), vec![0x8F, b'M', 0xC4]);
    }

    #[test]
    fn escapes_fully_unpackable_pair() {
        assert_eq!(packed("MM\n"), vec![0xFF, b'M', b'M', 0xCB]);
    }

    #[test]
    fn odd_trailing_character_is_padded_with_space() {
        // Final '\n' stands alone and is paired behind a space.
        assert_eq!(packed("G1\n"), vec![0x1D, 0xCB]);
    }

    #[test]
    fn comment_lines_produce_nothing() {
        assert_eq!(packed("; homing\n"), Vec::<u8>::new());
        assert_eq!(packed("\n"), Vec::<u8>::new());
        assert_eq!(packed("\r\n"), Vec::<u8>::new());
    }

    #[test]
    fn inline_comment_is_stripped() {
        assert_eq!(packed("G1 ; move\n"), packed("G1\n"));
    }

    #[test]
    fn command_words_are_three_bytes() {
        assert_eq!(
            Command::QueryPackingState.to_bytes(),
            [0xFF, 0xFF, 0b1111_1000]
        );
        assert_eq!(Command::PackingEnable.to_bytes(), [0xFF, 0xFF, 0b1111_1011]);
    }

    #[test]
    fn stream_is_bracketed_by_commands() {
        let out = pack_gcode("G1 X1\n");
        assert_eq!(
            out.to_vec(),
            vec![0xFF, 0xFF, 0xFB, 0x1D, 0xEB, 0xC1, 0xFF, 0xFF, 0xF9]
        );
    }

    #[test]
    fn packable_set_matches_lookup_table() {
        for byte in [b'0', b'9', b'.', b' ', b'\n', b'G', b'X'] {
            assert!(is_packable(byte));
        }
        for byte in [b'M', b'Y', b'Z', b'\r', b';'] {
            assert!(!is_packable(byte));
        }
    }
}
