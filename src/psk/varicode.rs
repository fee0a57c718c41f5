//! Varicode table for PSK31.
//!
//! Varicode is a variable-length code where common characters have shorter
//! codes. Every code starts and ends with a `1` and never contains `00`, so
//! two consecutive zero bits mark the gap between characters.
//!
//! Only the 7-bit ASCII range has standard codes. Bytes 128-255 have no
//! entry and [`lookup_or_fallback`] substitutes the fallback character.

use crate::config::FALLBACK_CHAR;

/// Width of the encoder's pending-bits register
pub const REGISTER_BITS: u8 = 16;

/// Longest code in the table
pub const MAX_CODE_BITS: u8 = 10;

/// Varicode lookup table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaricodeEntry {
    /// Varicode bits, right-aligned, first transmitted bit is the MSB
    pub code: u16,
    /// Number of bits in code
    pub bits: u8,
}

impl VaricodeEntry {
    /// Code shifted so its first bit sits in the register's top position
    #[must_use]
    pub const fn left_justified(self) -> u16 {
        self.code << (REGISTER_BITS - self.bits)
    }

    /// Iterate over the code bits in transmit order
    pub fn bit_iter(self) -> impl Iterator<Item = bool> {
        (0..self.bits).rev().map(move |n| self.code & (1 << n) != 0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for VaricodeEntry {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Varicode({=u16:#b}/{})", self.code, self.bits);
    }
}

const fn entry(code: u16, bits: u8) -> VaricodeEntry {
    VaricodeEntry { code, bits }
}

/// Varicode table (PSK31 standard), indexed by ASCII value.
pub static VARICODE_TABLE: [VaricodeEntry; 128] = [
    entry(0b1010101011, 10),      // 0x00 NUL
    entry(0b1011011011, 10),      // 0x01 SOH
    entry(0b1011101101, 10),      // 0x02 STX
    entry(0b1101110111, 10),      // 0x03 ETX
    entry(0b1011101011, 10),      // 0x04 EOT
    entry(0b1101011111, 10),      // 0x05 ENQ
    entry(0b1011101111, 10),      // 0x06 ACK
    entry(0b1011111101, 10),      // 0x07 BEL
    entry(0b1011111111, 10),      // 0x08 BS
    entry(0b11101111, 8),         // 0x09 HT
    entry(0b11101, 5),            // 0x0a LF
    entry(0b1101101111, 10),      // 0x0b VT
    entry(0b1011011101, 10),      // 0x0c FF
    entry(0b11111, 5),            // 0x0d CR
    entry(0b1101110101, 10),      // 0x0e SO
    entry(0b1110101011, 10),      // 0x0f SI
    entry(0b1011110111, 10),      // 0x10 DLE
    entry(0b1011110101, 10),      // 0x11 DC1
    entry(0b1110101101, 10),      // 0x12 DC2
    entry(0b1110101111, 10),      // 0x13 DC3
    entry(0b1101011011, 10),      // 0x14 DC4
    entry(0b1101101011, 10),      // 0x15 NAK
    entry(0b1101101101, 10),      // 0x16 SYN
    entry(0b1101010111, 10),      // 0x17 ETB
    entry(0b1101111011, 10),      // 0x18 CAN
    entry(0b1101111101, 10),      // 0x19 EM
    entry(0b1110110111, 10),      // 0x1a SUB
    entry(0b1101010101, 10),      // 0x1b ESC
    entry(0b1101011101, 10),      // 0x1c FS
    entry(0b1110111011, 10),      // 0x1d GS
    entry(0b1011111011, 10),      // 0x1e RS
    entry(0b1101111111, 10),      // 0x1f US
    entry(0b1, 1),                // 0x20 SP
    entry(0b111111111, 9),        // 0x21 !
    entry(0b101011111, 9),        // 0x22 "
    entry(0b111110101, 9),        // 0x23 #
    entry(0b111011011, 9),        // 0x24 $
    entry(0b1011010101, 10),      // 0x25 %
    entry(0b1010111011, 10),      // 0x26 &
    entry(0b101111111, 9),        // 0x27 '
    entry(0b11111011, 8),         // 0x28 (
    entry(0b11110111, 8),         // 0x29 )
    entry(0b101101111, 9),        // 0x2a *
    entry(0b111011111, 9),        // 0x2b +
    entry(0b1110101, 7),          // 0x2c ,
    entry(0b110101, 6),           // 0x2d -
    entry(0b1010111, 7),          // 0x2e .
    entry(0b110101111, 9),        // 0x2f /
    entry(0b10110111, 8),         // 0x30 0
    entry(0b10111101, 8),         // 0x31 1
    entry(0b11101101, 8),         // 0x32 2
    entry(0b11111111, 8),         // 0x33 3
    entry(0b101110111, 9),        // 0x34 4
    entry(0b101011011, 9),        // 0x35 5
    entry(0b101101011, 9),        // 0x36 6
    entry(0b110101101, 9),        // 0x37 7
    entry(0b110101011, 9),        // 0x38 8
    entry(0b110110111, 9),        // 0x39 9
    entry(0b11110101, 8),         // 0x3a :
    entry(0b110111101, 9),        // 0x3b ;
    entry(0b111101101, 9),        // 0x3c <
    entry(0b1010101, 7),          // 0x3d =
    entry(0b111010111, 9),        // 0x3e >
    entry(0b1010101111, 10),      // 0x3f ?
    entry(0b1010111101, 10),      // 0x40 @
    entry(0b1111101, 7),          // 0x41 A
    entry(0b11101011, 8),         // 0x42 B
    entry(0b10101101, 8),         // 0x43 C
    entry(0b10110101, 8),         // 0x44 D
    entry(0b1110111, 7),          // 0x45 E
    entry(0b11011011, 8),         // 0x46 F
    entry(0b11111101, 8),         // 0x47 G
    entry(0b101010101, 9),        // 0x48 H
    entry(0b1111111, 7),          // 0x49 I
    entry(0b111111101, 9),        // 0x4a J
    entry(0b101111101, 9),        // 0x4b K
    entry(0b11010111, 8),         // 0x4c L
    entry(0b10111011, 8),         // 0x4d M
    entry(0b11011101, 8),         // 0x4e N
    entry(0b10101011, 8),         // 0x4f O
    entry(0b11010101, 8),         // 0x50 P
    entry(0b111011101, 9),        // 0x51 Q
    entry(0b10101111, 8),         // 0x52 R
    entry(0b1101111, 7),          // 0x53 S
    entry(0b1101101, 7),          // 0x54 T
    entry(0b101010111, 9),        // 0x55 U
    entry(0b110110101, 9),        // 0x56 V
    entry(0b101011101, 9),        // 0x57 W
    entry(0b101110101, 9),        // 0x58 X
    entry(0b101111011, 9),        // 0x59 Y
    entry(0b1010101101, 10),      // 0x5a Z
    entry(0b111110111, 9),        // 0x5b [
    entry(0b111101111, 9),        // 0x5c \
    entry(0b111111011, 9),        // 0x5d ]
    entry(0b1010111111, 10),      // 0x5e ^
    entry(0b101101101, 9),        // 0x5f _
    entry(0b1011011111, 10),      // 0x60 `
    entry(0b1011, 4),             // 0x61 a
    entry(0b1011111, 7),          // 0x62 b
    entry(0b101111, 6),           // 0x63 c
    entry(0b101101, 6),           // 0x64 d
    entry(0b11, 2),               // 0x65 e
    entry(0b111101, 6),           // 0x66 f
    entry(0b1011011, 7),          // 0x67 g
    entry(0b101011, 6),           // 0x68 h
    entry(0b1101, 4),             // 0x69 i
    entry(0b111101011, 9),        // 0x6a j
    entry(0b10111111, 8),         // 0x6b k
    entry(0b11011, 5),            // 0x6c l
    entry(0b111011, 6),           // 0x6d m
    entry(0b1111, 4),             // 0x6e n
    entry(0b111, 3),              // 0x6f o
    entry(0b111111, 6),           // 0x70 p
    entry(0b110111111, 9),        // 0x71 q
    entry(0b10101, 5),            // 0x72 r
    entry(0b10111, 5),            // 0x73 s
    entry(0b101, 3),              // 0x74 t
    entry(0b110111, 6),           // 0x75 u
    entry(0b1111011, 7),          // 0x76 v
    entry(0b1101011, 7),          // 0x77 w
    entry(0b11011111, 8),         // 0x78 x
    entry(0b1011101, 7),          // 0x79 y
    entry(0b111010101, 9),        // 0x7a z
    entry(0b1010110111, 10),      // 0x7b {
    entry(0b110111011, 9),        // 0x7c |
    entry(0b1010110101, 10),      // 0x7d }
    entry(0b1011010111, 10),      // 0x7e ~
    entry(0b1110110101, 10),      // 0x7f DEL
];

/// Look up the code for `byte`, `None` if the byte has no code
#[inline]
#[must_use]
pub fn lookup(byte: u8) -> Option<VaricodeEntry> {
    VARICODE_TABLE.get(usize::from(byte)).copied()
}

/// Look up the code for `byte`, substituting `fallback` for unmapped bytes
///
/// The second value is `true` when the substitution happened. An unmapped
/// `fallback` resolves to [`FALLBACK_CHAR`].
#[inline]
#[must_use]
pub fn lookup_or_fallback(byte: u8, fallback: u8) -> (VaricodeEntry, bool) {
    match lookup(byte) {
        Some(entry) => (entry, false),
        None => {
            let entry = lookup(fallback)
                .unwrap_or(VARICODE_TABLE[FALLBACK_CHAR as usize]);
            (entry, true)
        }
    }
}
