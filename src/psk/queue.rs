//! Transmit Character Queue
//!
//! Single-producer/single-consumer ring buffer between the text-entry
//! context (producer) and the sample tick (consumer). Built on
//! `heapless::spsc`, so neither side takes a lock and the consumer never
//! blocks.
//!
//! Overflow policy is reject-newest: a push into a full character area
//! returns the byte to the caller and leaves queued data untouched. One slot
//! beyond the character area is kept free for keying requests, so a `stop()`
//! can always be queued behind a full line of text.
//!
//! `stop()` travels in-band so the carrier drops only after the text ahead
//! of it is sent. `start()` is a flag beside the ring: text typed while the
//! transmitter is off stays queued, and the key-on request must not wait
//! behind it.

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::spsc::{Consumer, Producer, Queue};

use crate::config::{TX_QUEUE_CAPACITY, TX_QUEUE_SLOTS};
use crate::error::{TxError, TxResult};
use crate::types::TxItem;

/// Backing storage for the transmit queue
pub struct TxQueue {
    items: Queue<TxItem, TX_QUEUE_SLOTS>,
    key_on: AtomicBool,
}

impl TxQueue {
    /// Create an empty queue, usable in a `static` initializer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Queue::new(),
            key_on: AtomicBool::new(false),
        }
    }
}

impl Default for TxQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the symbol encoder pulls its characters from
///
/// Implementations must never block. An empty source returns
/// [`TxItem::Idle`].
pub trait CharacterSource {
    /// Take the next item
    fn next_item(&mut self) -> TxItem;

    /// Look at the next item without taking it
    fn peek_item(&self) -> TxItem;

    /// Take a key-on request made outside the item stream
    ///
    /// Sources that carry [`TxItem::CarrierOn`] in-band keep the default.
    fn take_key_on(&mut self) -> bool {
        false
    }
}

impl<S: CharacterSource + ?Sized> CharacterSource for &mut S {
    fn next_item(&mut self) -> TxItem {
        (**self).next_item()
    }

    fn peek_item(&self) -> TxItem {
        (**self).peek_item()
    }

    fn take_key_on(&mut self) -> bool {
        (**self).take_key_on()
    }
}

/// Create an empty queue, usable in a `static` initializer
#[must_use]
pub const fn new_queue() -> TxQueue {
    TxQueue::new()
}

/// Split a queue into its producer and consumer halves
pub fn split(queue: &mut TxQueue) -> (TxProducer<'_>, TxConsumer<'_>) {
    let TxQueue { items, key_on } = queue;
    let key_on = &*key_on;
    let (producer, consumer) = items.split();
    (
        TxProducer {
            inner: producer,
            key_on,
        },
        TxConsumer {
            inner: consumer,
            key_on,
        },
    )
}

/// Producer half, owned by the text-entry side
pub struct TxProducer<'q> {
    inner: Producer<'q, TxItem, TX_QUEUE_SLOTS>,
    key_on: &'q AtomicBool,
}

impl TxProducer<'_> {
    /// Queue one character for transmission
    ///
    /// # Errors
    ///
    /// [`TxError::QueueFull`] with the rejected byte when the character
    /// area is full.
    pub fn push(&mut self, byte: u8) -> TxResult<()> {
        if self.inner.len() >= TX_QUEUE_CAPACITY {
            #[cfg(feature = "embedded")]
            defmt::warn!("tx queue full, dropping {=u8:#x}", byte);
            return Err(TxError::QueueFull(byte));
        }
        self.inner
            .enqueue(TxItem::Char(byte))
            .map_err(|_| TxError::QueueFull(byte))
    }

    /// Queue a run of bytes, stopping at the first one that does not fit
    ///
    /// # Errors
    ///
    /// [`TxError::Truncated`] with the number of bytes queued when the
    /// queue fills up part way.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> TxResult<()> {
        for (accepted, &byte) in bytes.iter().enumerate() {
            if self.push(byte).is_err() {
                return Err(TxError::Truncated { accepted });
            }
        }
        Ok(())
    }

    /// Queue the bytes of a string
    ///
    /// # Errors
    ///
    /// See [`TxProducer::push_bytes`].
    pub fn push_str(&mut self, text: &str) -> TxResult<()> {
        self.push_bytes(text.as_bytes())
    }

    /// Queue the lowercase alphabet as a bring-up test pattern
    ///
    /// # Errors
    ///
    /// See [`TxProducer::push_bytes`].
    pub fn load_test_pattern(&mut self) -> TxResult<()> {
        let mut pattern = [0u8; 26];
        for (slot, ch) in pattern.iter_mut().zip(b'a'..=b'z') {
            *slot = ch;
        }
        self.push_bytes(&pattern)
    }

    /// Key the transmitter on
    ///
    /// Taken by the encoder at the next character boundary while keyed
    /// off, ahead of any text already queued. A request made while keyed on
    /// waits for the next key-off.
    pub fn start(&mut self) {
        self.key_on.store(true, Ordering::Release);
    }

    /// Key the transmitter off once the queued text is sent
    ///
    /// # Errors
    ///
    /// [`TxError::ControlFull`] when even the reserved slot is taken.
    pub fn stop(&mut self) -> TxResult<()> {
        self.inner
            .enqueue(TxItem::CarrierOff)
            .map_err(|_| TxError::ControlFull)
    }

    /// Check if a key-on request is still waiting
    #[must_use]
    pub fn start_pending(&self) -> bool {
        self.key_on.load(Ordering::Acquire)
    }

    /// Items waiting to be sent
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if nothing is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Characters that can still be pushed
    #[must_use]
    pub fn free(&self) -> usize {
        TX_QUEUE_CAPACITY.saturating_sub(self.inner.len())
    }
}

/// Consumer half, owned by the modulator
pub struct TxConsumer<'q> {
    inner: Consumer<'q, TxItem, TX_QUEUE_SLOTS>,
    key_on: &'q AtomicBool,
}

impl TxConsumer<'_> {
    /// Items waiting to be sent
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if nothing is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl CharacterSource for TxConsumer<'_> {
    fn next_item(&mut self) -> TxItem {
        self.inner.dequeue().unwrap_or(TxItem::Idle)
    }

    fn peek_item(&self) -> TxItem {
        self.inner.peek().copied().unwrap_or(TxItem::Idle)
    }

    fn take_key_on(&mut self) -> bool {
        self.key_on.swap(false, Ordering::AcqRel)
    }
}
