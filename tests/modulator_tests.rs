//! Modulator Tests
//!
//! Tests for the per-tick sample synthesizer: symbol timing, shape offsets,
//! keying envelopes and counters.
//! Run with: cargo test --features std --test modulator_tests

use sdr_psk_tx::config::{ModulatorConfig, SAMPLES_PER_SYMBOL, SHAPE_BIAS};
use sdr_psk_tx::dsp::pulse_shape::Segment;
use sdr_psk_tx::psk::queue::{self, CharacterSource, TxConsumer};
use sdr_psk_tx::psk::{transition, Modulator};
use sdr_psk_tx::types::{IqSample, Phase, Symbol, TxItem};

/// Full-scale modulator with the given framing
fn full_scale(rx: TxConsumer<'_>, config: ModulatorConfig) -> Modulator<TxConsumer<'_>> {
    Modulator::new(rx, config.with_amplitude(1.0))
}

/// Run `symbols` whole symbol periods and collect the samples
fn run_symbols<S: CharacterSource>(modulator: &mut Modulator<S>, symbols: usize) -> Vec<IqSample> {
    let mut out = vec![IqSample::ZERO; symbols * SAMPLES_PER_SYMBOL];
    modulator.fill(&mut out);
    out
}

/// Source that always reports an empty queue
struct Silent;

impl CharacterSource for Silent {
    fn next_item(&mut self) -> TxItem {
        TxItem::Idle
    }

    fn peek_item(&self) -> TxItem {
        TxItem::Idle
    }
}

// ============================================================================
// Timing Tests
// ============================================================================

#[test]
fn test_first_symbol_consumed_on_256th_call() {
    let mut modulator = Modulator::new(Silent, ModulatorConfig::default());

    for _ in 0..SAMPLES_PER_SYMBOL - 1 {
        modulator.next_sample();
    }
    assert_eq!(modulator.stats().symbols, 0);
    assert_eq!(modulator.last_symbol(), None);

    modulator.next_sample();
    assert_eq!(modulator.stats().symbols, 1);
    assert_eq!(modulator.last_symbol(), Some(Symbol::PhaseReverse));

    let step = transition(Symbol::PhaseReverse, Phase::Off);
    let cursor = modulator.cursor();
    assert_eq!((cursor.i, cursor.q), (step.i, step.q));
    assert_eq!(cursor.offset, SHAPE_BIAS);
}

#[test]
fn test_one_symbol_per_256_samples() {
    let mut modulator = Modulator::new(Silent, ModulatorConfig::default());
    run_symbols(&mut modulator, 40);

    let stats = modulator.stats();
    assert_eq!(stats.samples, 40 * SAMPLES_PER_SYMBOL as u32);
    assert_eq!(stats.symbols, 40);
    assert_eq!(modulator.ramp(), 0);
}

#[test]
fn test_offsets_run_from_bias_to_segment_end() {
    let mut modulator = Modulator::new(Silent, ModulatorConfig::default());

    let mut previous = 0;
    for n in 0..3 * SAMPLES_PER_SYMBOL {
        let offset = modulator.cursor().offset;
        assert_ne!(offset, 0);
        assert!(offset <= SAMPLES_PER_SYMBOL);
        if n % SAMPLES_PER_SYMBOL == 0 {
            assert_eq!(offset, SHAPE_BIAS);
        } else {
            assert_eq!(offset, previous + 1);
        }
        previous = offset;
        modulator.next_sample();
    }
}

// ============================================================================
// Keying Envelope Tests
// ============================================================================

#[test]
fn test_fresh_modulator_is_silent() {
    let mut modulator = Modulator::new(Silent, ModulatorConfig::default());
    let samples = run_symbols(&mut modulator, 20);

    assert!(samples.iter().all(IqSample::is_silent));
    assert!(!modulator.is_keyed());
    assert_eq!(modulator.phase(), Phase::Off);
}

#[test]
fn test_carrier_on_ramps_up_from_zero() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.start();
    let mut modulator = full_scale(rx, ModulatorConfig::default());

    // Initial separator plays out silent
    let first = run_symbols(&mut modulator, 2);
    assert!(first.iter().all(IqSample::is_silent));
    assert_eq!(modulator.last_symbol(), Some(Symbol::CarrierOn));
    assert_eq!(modulator.cursor().i, Segment::AttackToPositive);
    assert_eq!(modulator.phase(), Phase::Deg0);

    let attack = run_symbols(&mut modulator, 1);
    for (n, sample) in attack.iter().enumerate() {
        assert_eq!(sample.i, Segment::AttackToPositive.level(n + SHAPE_BIAS));
        assert_eq!(sample.q, 0.0);
    }
    assert!(attack.windows(2).all(|w| w[1].i >= w[0].i));
    assert_eq!(attack[SAMPLES_PER_SYMBOL - 1].i, 1.0);
}

#[test]
fn test_transmission_has_no_steps() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.start();
    tx.push_str("Hello PSK31").unwrap();
    tx.stop().unwrap();
    let mut modulator = full_scale(rx, ModulatorConfig::default());

    let samples = run_symbols(&mut modulator, 300);
    assert!(samples.iter().any(|s| !s.is_silent()));

    // Steepest segment is a full-swing half cosine over one symbol
    let max_step = samples
        .windows(2)
        .map(|w| (w[1].i - w[0].i).abs().max((w[1].q - w[0].q).abs()))
        .fold(0.0_f32, f32::max);
    assert!(max_step < 0.013, "max step {max_step}");
}

#[test]
fn test_magnitude_never_exceeds_amplitude() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.start();
    tx.push_str("The quick brown fox").unwrap();
    let mut modulator = Modulator::new(rx, ModulatorConfig::default().with_amplitude(0.5));

    let samples = run_symbols(&mut modulator, 250);
    let peak = samples.iter().map(IqSample::magnitude).fold(0.0_f32, f32::max);
    assert!(peak <= 0.5 + 1e-6, "peak {peak}");
    assert!(peak > 0.49);
}

#[test]
fn test_stays_silent_after_carrier_off() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.start();
    tx.push(b'e').unwrap();
    tx.stop().unwrap();
    let mut modulator = full_scale(rx, ModulatorConfig::default());

    // separator + on + preamble + 'e' + postamble + off
    let keyed_symbols = 1 + 1 + 32 + 4 + 32 + 1;
    let keyed = run_symbols(&mut modulator, keyed_symbols);
    assert_eq!(modulator.last_symbol(), Some(Symbol::CarrierOff));
    assert!(keyed.iter().any(|s| !s.is_silent()));
    assert!(modulator.is_keyed());

    let decay = run_symbols(&mut modulator, 1);
    assert_eq!(decay[0].i.abs(), Segment::DecayFromPositive.level(SHAPE_BIAS));
    assert_eq!(decay[SAMPLES_PER_SYMBOL - 1], IqSample::ZERO);
    assert!(!modulator.is_keyed());

    // Text typed after key-off waits in the queue, off the air
    tx.push_str("next").unwrap();
    let after = run_symbols(&mut modulator, 200);
    assert!(after.iter().all(IqSample::is_silent));
    assert_eq!(modulator.phase(), Phase::Off);
    assert_eq!(modulator.source().len(), 4);
    assert_eq!(modulator.stats().characters, 1);
}

#[test]
fn test_type_ahead_is_sent_after_start() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    let mut modulator = full_scale(rx, ModulatorConfig::default());

    tx.push_str("cq cq").unwrap();
    let typing = run_symbols(&mut modulator, 60);
    assert!(typing.iter().all(IqSample::is_silent));
    assert_eq!(modulator.stats().characters, 0);
    assert_eq!(modulator.source().len(), 5);

    tx.start();
    let keyed = run_symbols(&mut modulator, 200);
    assert!(keyed.iter().any(|s| !s.is_silent()));
    assert_eq!(modulator.stats().characters, 5);
    assert!(modulator.source().is_empty());
    assert!(modulator.is_keyed());
}

// ============================================================================
// Counter and Control Tests
// ============================================================================

#[test]
fn test_stats_track_characters_and_fallbacks() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.start();
    tx.push_bytes(&[b'a', 0xC8, b'b']).unwrap();
    let mut modulator = Modulator::new(rx, ModulatorConfig::default().without_framing());

    run_symbols(&mut modulator, 60);
    let stats = modulator.stats();
    assert_eq!(stats.characters, 3);
    assert_eq!(stats.unmapped, 1);
    assert!(modulator.source().is_empty());
}

#[test]
fn test_reset_returns_to_silence() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.start();
    tx.push_str("abc").unwrap();
    let mut modulator = full_scale(rx, ModulatorConfig::default());

    run_symbols(&mut modulator, 3);
    modulator.next_sample();
    assert!(modulator.is_keyed());

    modulator.reset();
    assert_eq!(modulator.ramp(), 0);
    assert_eq!(modulator.phase(), Phase::Off);
    assert_eq!(modulator.last_symbol(), None);
    assert_eq!(modulator.next_sample(), IqSample::ZERO);
    // Queued text is still there
    assert_eq!(modulator.source().len(), 3);
}

#[test]
fn test_amplitude_is_clamped() {
    let mut modulator = Modulator::new(Silent, ModulatorConfig::default());
    modulator.set_amplitude(1.7);
    assert_eq!(modulator.amplitude(), 1.0);
    modulator.set_amplitude(-0.2);
    assert_eq!(modulator.amplitude(), 0.0);

    let config = ModulatorConfig {
        amplitude: 3.0,
        ..ModulatorConfig::default()
    };
    assert_eq!(Modulator::new(Silent, config).amplitude(), 1.0);
}

#[test]
fn test_source_handed_back() {
    let mut storage = queue::new_queue();
    let (mut tx, rx) = queue::split(&mut storage);
    tx.push_str("xy").unwrap();
    let mut modulator = Modulator::new(rx, ModulatorConfig::default());

    assert_eq!(modulator.source_mut().next_item(), TxItem::Char(b'x'));
    let mut rx = modulator.into_source();
    assert_eq!(rx.next_item(), TxItem::Char(b'y'));
}
