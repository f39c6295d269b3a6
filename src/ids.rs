//! Process-wide unique 64-bit identifiers.
//!
//! [`SequenceGenerator`] lays ids out snowflake style: 41 bits of
//! milliseconds since [`EPOCH_MILLIS`], 10 bits of node id and a 12-bit
//! sequence within the millisecond. The top bit is never set, so ids are
//! always positive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// 2020-01-01T00:00:00Z
pub const EPOCH_MILLIS: u64 = 1_577_836_800_000;

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const TIMESTAMP_BITS: u32 = 41;

pub const MAX_NODE_ID: u16 = (1 << NODE_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_MASK: u64 = (1 << TIMESTAMP_BITS) - 1;

pub trait IdGenerator: Send + Sync {
    /// Returns an id never handed out before by this generator.
    fn next_globally_unique(&self) -> i64;
}

pub struct SequenceGenerator {
    node_id: u64,
    /// Last issued `(timestamp << SEQUENCE_BITS) | sequence`.
    state: AtomicU64,
}

impl SequenceGenerator {
    /// Node ids above [`MAX_NODE_ID`] are masked down to 10 bits;
    /// `Config::validate` rejects them before they get here.
    #[must_use]
    pub fn new(node_id: u16) -> Self {
        Self {
            node_id: u64::from(node_id & MAX_NODE_ID),
            state: AtomicU64::new(0),
        }
    }

    fn current_millis() -> u64 {
        let since_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));

        since_unix.saturating_sub(EPOCH_MILLIS) & TIMESTAMP_MASK
    }

    /// Computes the state following `prev` given the wall clock `now`.
    ///
    /// The logical timestamp never goes backwards: a stalled or rewound clock
    /// keeps counting through the sequence, and an exhausted sequence borrows
    /// the next millisecond.
    const fn advance(prev: u64, now: u64) -> u64 {
        let prev_ts = prev >> SEQUENCE_BITS;
        let prev_seq = prev & SEQUENCE_MASK;

        if now > prev_ts {
            now << SEQUENCE_BITS
        } else if prev_seq < SEQUENCE_MASK {
            (prev_ts << SEQUENCE_BITS) | (prev_seq + 1)
        } else {
            (prev_ts + 1) << SEQUENCE_BITS
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn compose(&self, state: u64) -> i64 {
        let ts = (state >> SEQUENCE_BITS) & TIMESTAMP_MASK;
        let seq = state & SEQUENCE_MASK;
        ((ts << (NODE_BITS + SEQUENCE_BITS)) | (self.node_id << SEQUENCE_BITS) | seq) as i64
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl IdGenerator for SequenceGenerator {
    /// Unique for the lifetime of this generator only. Ids issued from
    /// borrowed future milliseconds can be issued again by a restarted
    /// process on the same node until the wall clock passes them.
    fn next_globally_unique(&self) -> i64 {
        let mut prev = self.state.load(Ordering::Acquire);

        loop {
            let next = Self::advance(prev, Self::current_millis());

            match self
                .state
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return self.compose(next),
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn ids_are_positive_and_unique() {
        let generator = SequenceGenerator::new(3);
        let ids: Vec<i64> = (0..10_000).map(|_| generator.next_globally_unique()).collect();

        assert!(ids.iter().all(|id| *id > 0));
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let generator = Arc::new(SequenceGenerator::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..5_000)
                        .map(|_| generator.next_globally_unique())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 20_000);
    }

    #[test]
    fn node_id_is_embedded() {
        let generator = SequenceGenerator::new(MAX_NODE_ID);
        let id = generator.next_globally_unique();
        let node = (id >> SEQUENCE_BITS) & i64::from(MAX_NODE_ID);
        assert_eq!(node, i64::from(MAX_NODE_ID));
    }

    #[test]
    fn advance_borrows_next_millisecond_when_sequence_is_exhausted() {
        let full = (100 << SEQUENCE_BITS) | SEQUENCE_MASK;
        assert_eq!(SequenceGenerator::advance(full, 100), 101 << SEQUENCE_BITS);
    }

    #[test]
    fn advance_ignores_clock_going_backwards() {
        let prev = (500 << SEQUENCE_BITS) | 7;
        assert_eq!(SequenceGenerator::advance(prev, 10), (500 << SEQUENCE_BITS) | 8);
    }
}
