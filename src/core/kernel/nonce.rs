use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where nonce values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceSource {
    EpochMillis,
    EpochMicros,
    /// Plain counter starting after the given seed.
    Counter(u64),
}

/// Strictly increasing nonces for one credential set.
///
/// Clock-based sources never repeat or go backwards inside the process, even when several
/// calls land in the same clock tick or the wall clock steps back: each value is
/// `max(now, previous + 1)`.
#[derive(Debug)]
pub struct NonceGenerator {
    source: NonceSource,
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new(source: NonceSource) -> Self {
        let seed = match source {
            NonceSource::Counter(seed) => seed,
            NonceSource::EpochMillis | NonceSource::EpochMicros => 0,
        };
        Self {
            source,
            last: AtomicU64::new(seed),
        }
    }

    pub fn epoch_millis() -> Self {
        Self::new(NonceSource::EpochMillis)
    }

    pub fn epoch_micros() -> Self {
        Self::new(NonceSource::EpochMicros)
    }

    pub fn counter(seed: u64) -> Self {
        Self::new(NonceSource::Counter(seed))
    }

    pub const fn source(&self) -> NonceSource {
        self.source
    }

    pub fn next(&self) -> u64 {
        match self.source {
            NonceSource::Counter(_) => self.last.fetch_add(1, Ordering::SeqCst) + 1,
            NonceSource::EpochMillis | NonceSource::EpochMicros => {
                let now = self.now();
                let previous = self
                    .last
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                        Some(now.max(last + 1))
                    })
                    .unwrap_or_else(|last| last);
                now.max(previous + 1)
            }
        }
    }

    fn now(&self) -> u64 {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        match self.source {
            NonceSource::EpochMicros => elapsed.as_micros() as u64,
            NonceSource::EpochMillis | NonceSource::Counter(_) => elapsed.as_millis() as u64,
        }
    }
}
