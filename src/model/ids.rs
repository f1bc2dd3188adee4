use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Short random base-36 identifier for log entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    /// Falls back to a clock-seeded id when the OS entropy source fails.
    pub fn random() -> Self {
        let mut bytes = [0u8; ID_LEN];
        if let Err(err) = getrandom::getrandom(&mut bytes) {
            tracing::warn!(error = %err, "getrandom failed; using clock-seeded id");
            bytes = seeded_bytes(clock_seed());
        }
        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8; ID_LEN]) -> Self {
        let s = bytes
            .iter()
            .map(|b| ALPHABET[(*b as usize) % ALPHABET.len()] as char)
            .collect();
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn clock_seed() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() as u64;
    nanos ^ COUNTER.fetch_add(1, Ordering::Relaxed).rotate_left(32)
}

// splitmix64
fn seeded_bytes(seed: u64) -> [u8; ID_LEN] {
    let mut state = seed;
    let mut out = [0u8; ID_LEN];
    for chunk in out.chunks_mut(8) {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        chunk.copy_from_slice(&z.to_le_bytes()[..chunk.len()]);
    }
    out
}
