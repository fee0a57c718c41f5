//! Varicode Symbol Encoder
//!
//! Turns the character stream into an endless sequence of line-code
//! symbols. The code is differential: a `1` bit keeps the carrier phase
//! ([`Symbol::NoPhaseChange`]), a `0` bit reverses it
//! ([`Symbol::PhaseReverse`]).
//!
//! Each character costs `bits + 2` symbols. Loading a code emits a zero
//! without consuming a bit, the code bits follow MSB first, and the emptied
//! register raises the end marker so one more zero goes out before the next
//! load. The two zeros form the `00` gap that separates varicode words.
//!
//! Keying items bypass the bit path and are only taken between characters.
//! While keyed off the encoder leaves characters in the source and sends
//! idle, so text typed ahead of `CarrierOn` goes out once the carrier is up.

use crate::config::ModulatorConfig;
use crate::psk::queue::CharacterSource;
use crate::psk::varicode;
use crate::types::{Symbol, TxItem};

/// Register bit holding the next code bit
const TOP_BIT: u16 = 0x8000;

/// Symbol encoder state
#[derive(Clone, Debug)]
pub struct SymbolEncoder {
    /// Pending code bits, left-justified; zero when the character is done
    shift_reg: u16,
    /// The inter-character separator is still owed
    end_marker: bool,
    /// Phase reversals left in the preamble
    preamble: u8,
    /// Last keying symbol sent was `CarrierOn`
    keyed: bool,
    /// Steady symbols left before keying off, `None` when not stopping
    postamble: Option<u8>,
    /// Preamble length applied on `CarrierOn`
    preamble_len: u8,
    /// Postamble length applied on `CarrierOff`
    postamble_len: u8,
    /// Byte substituted for unmapped characters
    fallback_char: u8,
    /// Characters loaded so far
    characters: u32,
    /// Characters that had no varicode entry
    unmapped: u32,
}

impl SymbolEncoder {
    /// Create an encoder with the given framing settings
    #[must_use]
    pub const fn new(config: &ModulatorConfig) -> Self {
        Self {
            shift_reg: 0,
            // A fresh encoder owes a separator, matching the state after a
            // completed character.
            end_marker: true,
            preamble: 0,
            keyed: false,
            postamble: None,
            preamble_len: config.preamble_symbols,
            postamble_len: config.postamble_symbols,
            fallback_char: config.fallback_char,
            characters: 0,
            unmapped: 0,
        }
    }

    /// Produce the next symbol, pulling from `source` only at a character
    /// boundary
    pub fn next_symbol<S: CharacterSource + ?Sized>(&mut self, source: &mut S) -> Symbol {
        if self.shift_reg != 0 {
            return self.next_code_bit();
        }

        if self.end_marker {
            self.end_marker = false;
            return Symbol::PhaseReverse;
        }

        if self.preamble > 0 {
            self.preamble -= 1;
            return Symbol::PhaseReverse;
        }

        if let Some(remaining) = self.postamble {
            return self.next_postamble(remaining);
        }

        if !self.keyed {
            return self.next_unkeyed(source);
        }

        match source.next_item() {
            TxItem::Char(byte) => {
                self.load(byte);
                Symbol::PhaseReverse
            }
            TxItem::Idle => Symbol::PhaseReverse,
            TxItem::CarrierOn => self.key_on(),
            TxItem::CarrierOff => self.next_postamble(self.postamble_len),
        }
    }

    /// Keyed off: only keying items are taken, characters wait in the source
    fn next_unkeyed<S: CharacterSource + ?Sized>(&mut self, source: &mut S) -> Symbol {
        if source.take_key_on() {
            return self.key_on();
        }
        match source.peek_item() {
            TxItem::CarrierOn => {
                source.next_item();
                self.key_on()
            }
            TxItem::CarrierOff => {
                // Already off, nothing to ramp down
                source.next_item();
                Symbol::CarrierOff
            }
            TxItem::Char(_) | TxItem::Idle => Symbol::PhaseReverse,
        }
    }

    fn key_on(&mut self) -> Symbol {
        self.keyed = true;
        self.preamble = self.preamble_len;
        Symbol::CarrierOn
    }

    fn next_code_bit(&mut self) -> Symbol {
        let symbol = Symbol::from_bit(self.shift_reg & TOP_BIT != 0);
        self.shift_reg <<= 1;
        if self.shift_reg == 0 {
            self.end_marker = true;
        }
        symbol
    }

    fn next_postamble(&mut self, remaining: u8) -> Symbol {
        if remaining == 0 {
            self.postamble = None;
            self.keyed = false;
            Symbol::CarrierOff
        } else {
            self.postamble = Some(remaining - 1);
            Symbol::NoPhaseChange
        }
    }

    fn load(&mut self, byte: u8) {
        let (entry, substituted) = varicode::lookup_or_fallback(byte, self.fallback_char);
        if substituted {
            self.unmapped = self.unmapped.wrapping_add(1);
        }
        self.characters = self.characters.wrapping_add(1);
        self.shift_reg = entry.left_justified();
    }

    /// Check if the encoder is between characters with nothing owed
    #[must_use]
    pub const fn at_boundary(&self) -> bool {
        self.shift_reg == 0 && !self.end_marker
    }

    /// Pending-bits register, left-justified
    #[must_use]
    pub const fn pending_bits(&self) -> u16 {
        self.shift_reg
    }

    /// Check if a separator is owed
    #[must_use]
    pub const fn end_marker(&self) -> bool {
        self.end_marker
    }

    /// Check if the encoder has keyed the carrier on
    #[must_use]
    pub const fn is_keyed(&self) -> bool {
        self.keyed
    }

    /// Check if a preamble or postamble is running
    #[must_use]
    pub const fn is_framing(&self) -> bool {
        self.preamble > 0 || self.postamble.is_some()
    }

    /// Characters loaded so far
    #[must_use]
    pub const fn characters(&self) -> u32 {
        self.characters
    }

    /// Characters replaced by the fallback code
    #[must_use]
    pub const fn unmapped(&self) -> u32 {
        self.unmapped
    }

    /// Drop any partially sent character and framing
    pub fn reset(&mut self) {
        self.shift_reg = 0;
        self.end_marker = true;
        self.preamble = 0;
        self.keyed = false;
        self.postamble = None;
    }
}

impl Default for SymbolEncoder {
    fn default() -> Self {
        Self::new(&ModulatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl CharacterSource for Empty {
        fn next_item(&mut self) -> TxItem {
            TxItem::Idle
        }

        fn peek_item(&self) -> TxItem {
            TxItem::Idle
        }
    }

    #[test]
    fn fresh_encoder_owes_separator() {
        let mut encoder = SymbolEncoder::default();
        assert!(encoder.end_marker());
        assert_eq!(encoder.next_symbol(&mut Empty), Symbol::PhaseReverse);
        assert!(encoder.at_boundary());
    }

    #[test]
    fn idle_is_continuous_reversals() {
        let mut encoder = SymbolEncoder::default();
        for _ in 0..64 {
            assert_eq!(encoder.next_symbol(&mut Empty), Symbol::PhaseReverse);
        }
        assert_eq!(encoder.characters(), 0);
    }

    #[test]
    fn zero_postamble_keys_off_immediately() {
        let config = ModulatorConfig::default().without_framing();
        let mut encoder = SymbolEncoder::new(&config);
        encoder.end_marker = false;
        let mut source = Scripted::new(&[TxItem::CarrierOn, TxItem::CarrierOff]);
        assert_eq!(encoder.next_symbol(&mut source), Symbol::CarrierOn);
        assert!(encoder.is_keyed());
        assert_eq!(encoder.next_symbol(&mut source), Symbol::CarrierOff);
        assert!(!encoder.is_keyed());
        assert!(!encoder.is_framing());
    }

    #[test]
    fn keyed_off_leaves_characters_queued() {
        let mut encoder = SymbolEncoder::default();
        encoder.end_marker = false;
        let mut source = Scripted::new(&[TxItem::Char(b'e'), TxItem::CarrierOn]);
        for _ in 0..8 {
            assert_eq!(encoder.next_symbol(&mut source), Symbol::PhaseReverse);
        }
        assert_eq!(source.pos, 0);
        assert_eq!(encoder.characters(), 0);
        assert!(!encoder.is_keyed());
    }

    #[test]
    fn carrier_off_while_unkeyed_skips_postamble() {
        let mut encoder = SymbolEncoder::default();
        encoder.end_marker = false;
        let mut source = Scripted::new(&[TxItem::CarrierOff, TxItem::CarrierOn]);
        assert_eq!(encoder.next_symbol(&mut source), Symbol::CarrierOff);
        assert!(!encoder.is_framing());
        assert_eq!(encoder.next_symbol(&mut source), Symbol::CarrierOn);
    }

    struct Scripted {
        items: &'static [TxItem],
        pos: usize,
    }

    impl Scripted {
        fn new(items: &'static [TxItem]) -> Self {
            Self { items, pos: 0 }
        }
    }

    impl CharacterSource for Scripted {
        fn next_item(&mut self) -> TxItem {
            let item = self.peek_item();
            if item != TxItem::Idle {
                self.pos += 1;
            }
            item
        }

        fn peek_item(&self) -> TxItem {
            self.items.get(self.pos).copied().unwrap_or(TxItem::Idle)
        }
    }
}
