use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{info, warn};
use rand::rngs::OsRng;
use rand::Rng;

use crate::common::util::time;

/// Strategy for generating document ids.
///
/// The collection engine asks its configured generator for an id whenever an
/// inserted document supplies none. Implementations must produce ids that
/// are unique within the process; tests typically inject a deterministic
/// sequence.
pub trait IdGenerator: Send + Sync {
    /// Produces the next opaque unique id.
    fn next_id(&self) -> String;
}

/// The default id generator.
///
/// Combines epoch milliseconds, random node bits and a per-call sequence
/// counter into a 64-bit value, rendered as an opaque lowercase hex string.
/// The node bits keep two processes started in the same millisecond from
/// colliding; the sequence keeps calls within one millisecond apart.
pub struct UniqueIdGenerator {
    node_id: u64,
    sequence: AtomicU64,
    last_timestamp: AtomicU64,
    sequence_bits: u64,
    timestamp_left_shift: u64,
    epoch: u64,
    mutex: Mutex<()>,
}

impl UniqueIdGenerator {
    pub fn new() -> Self {
        let node_id_bits = 10;
        let sequence_bits = 12;
        let max_node_id = (1_u64 << node_id_bits) - 1;
        let timestamp_left_shift = sequence_bits + node_id_bits;
        // 2010-11-04, keeps the shifted timestamp well inside 64 bits
        let epoch = 1288834974657;

        let mut generator = UniqueIdGenerator {
            node_id: 0,
            sequence: AtomicU64::new(0),
            last_timestamp: AtomicU64::new(0),
            sequence_bits,
            timestamp_left_shift,
            epoch,
            mutex: Mutex::new(()),
        };

        generator.node_id = generator.derive_node_id();
        if generator.node_id > max_node_id {
            warn!("Node id can't be greater than {}", max_node_id);
            generator.node_id = OsRng.gen_range(1..=max_node_id);
        }
        info!("Id generator initialized with node id: {}", generator.node_id);

        generator
    }

    fn derive_node_id(&self) -> u64 {
        let uuid = uuid::Uuid::new_v4();
        let uid = uuid.as_bytes();
        let rnd_byte = OsRng.gen::<u64>() & 0x000000FF;

        ((0x000000FF & uid[uid.len() - 1] as u64) | (0x0000FF00 & (rnd_byte << 8))) >> 6
    }

    fn next_raw(&self) -> u64 {
        // Acquire the lock with poison recovery
        let _lock = match self.mutex.lock() {
            Ok(lock) => lock,
            Err(poisoned) => {
                warn!("Id generator lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };

        let current_time = time::epoch_millis() as u64;
        let mut timestamp = current_time;
        let last_timestamp = self.last_timestamp.load(Ordering::Relaxed);
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);

        // clock moved backwards: stay at the last observed timestamp and
        // let the sequence keep ids apart
        if timestamp <= last_timestamp {
            timestamp = last_timestamp;
        }

        self.last_timestamp.store(timestamp, Ordering::Relaxed);
        drop(_lock);

        ((timestamp - self.epoch) << self.timestamp_left_shift)
            | (self.node_id << self.sequence_bits)
            | (sequence & ((1 << self.sequence_bits) - 1))
    }
}

impl Default for UniqueIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UniqueIdGenerator {
    fn next_id(&self) -> String {
        format!("{:016x}", self.next_raw())
    }
}
