//! PSK31 Beacon Firmware
//!
//! Entry point for the STM32G474 transmit modulator. Sets up the DAC pair and
//! the sample tick, then spawns:
//! - the modulator task, which owns the modulator context and feeds the DAC
//! - the beacon task, which keys up and queues the beacon text periodically
//! - the status task, which logs counters and tick overruns

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::dac::Dac;
use embassy_stm32::dma::NoDma;
use embassy_stm32::peripherals::DAC1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sdr_psk_tx::hal::dac::IqDac;
use sdr_psk_tx::hal::timer::SampleClock;
use sdr_psk_tx::prelude::*;
use sdr_psk_tx::psk::queue::{self, TxQueue};
use sdr_psk_tx::psk::ModulatorStats;

/// Seconds between beacon transmissions
const BEACON_INTERVAL_S: u64 = 60;

static TX_QUEUE: StaticCell<TxQueue> = StaticCell::new();
static MONITOR: DeadlineMonitor = DeadlineMonitor::new();
static STATS: Signal<CriticalSectionRawMutex, ModulatorStats> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PSK31 beacon firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    // DAC1: channel 1 = I on PA4, channel 2 = Q on PA5
    let dac = Dac::new(p.DAC1, NoDma, NoDma, p.PA4, p.PA5);
    let (ch_i, ch_q) = dac.split();
    let output = IqDac::new(ch_i, ch_q);

    let (producer, consumer) = queue::split(TX_QUEUE.init(queue::new_queue()));

    let settings = ModulatorConfig::default();
    info!("{}", settings);
    let modulator = Modulator::new(consumer, settings);

    spawner.must_spawn(modulator_task(modulator, output));
    spawner.must_spawn(beacon_task(producer));
    spawner.must_spawn(status_task());

    info!(
        "Modulator running at {} Hz, {} samples/symbol",
        SAMPLE_RATE_HZ,
        SAMPLES_PER_SYMBOL
    );
}

/// Sample tick: one `next_sample()` per period, straight to the DAC
#[embassy_executor::task]
async fn modulator_task(
    mut modulator: Modulator<TxConsumer<'static>>,
    mut output: IqDac<'static, DAC1>,
) {
    let mut clock = SampleClock::from_rate(SAMPLE_RATE_HZ);
    info!("{}", clock);

    loop {
        let missed = clock.tick().await;
        MONITOR.record_missed(missed);

        let _tick = MONITOR.enter();
        output.write(modulator.next_sample());

        if modulator.ramp() == 0 && modulator.stats().symbols % 32 == 0 {
            STATS.signal(modulator.stats());
        }
    }
}

/// Key up, send the beacon text, key down, repeat
#[embassy_executor::task]
async fn beacon_task(mut tx: TxProducer<'static>) {
    loop {
        tx.start();
        send_text(&mut tx, BEACON_TEXT.as_bytes()).await;
        while let Err(err) = tx.stop() {
            warn!("stop deferred: {}", err);
            Timer::after(Duration::from_millis(100)).await;
        }
        info!("Beacon queued");

        Timer::after(Duration::from_secs(BEACON_INTERVAL_S)).await;
    }
}

/// Queue `text`, waiting for room whenever the queue fills up
async fn send_text(tx: &mut TxProducer<'static>, mut text: &[u8]) {
    while !text.is_empty() {
        match tx.push_bytes(text) {
            Ok(()) => break,
            Err(TxError::Truncated { accepted }) => {
                text = &text[accepted..];
                // One character takes roughly 0.3 s at 31.25 Bd
                Timer::after(Duration::from_millis(300)).await;
            }
            Err(err) => {
                warn!("dropping beacon text: {}", err);
                break;
            }
        }
    }
}

/// Report counters and overruns
#[embassy_executor::task]
async fn status_task() {
    loop {
        let stats = STATS.wait().await;
        let overruns = MONITOR.take_overruns();
        if overruns > 0 {
            warn!("{} sample tick overruns", overruns);
        }
        info!("{}", stats);
    }
}
