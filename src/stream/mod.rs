//! HashStream - slices one 256-bit hash into an unbounded sequence of bounded draws.
//!
//! Each slot reads an 8 hex character (32 bit) window. The first 8 slots
//! are the raw non-overlapping windows. Later slots shift the window start by
//! one character per lap so slots 0..64 visit all 64 cyclic windows exactly
//! once; those re-read windows are passed through an avalanche mixer so they
//! do not track their neighbours. Past slot 64 the cycle repeats with a
//! different rotation before mixing.
//!
//! The mixer maps 0 to 0, so the all-zero hash draws 0 from every slot.

use crate::error::{EngineError, EngineResult};
use crate::hash::{EntityHash, HASH_HEX_LEN};

/// Hex characters per window
pub const WINDOW_HEX: usize = 8;

/// Non-overlapping windows in one pass over the hash
pub const WINDOWS_PER_LAP: usize = HASH_HEX_LEN / WINDOW_HEX;

/// Distinct cyclic window offsets
const SLOTS_PER_ROUND: usize = WINDOWS_PER_LAP * WINDOWS_PER_LAP;

/// Draw a value in `[0, modulus)` from `slot` of `hash`.
pub fn draw(hash: &EntityHash, slot: usize, modulus: u32) -> EngineResult<u32> {
    if modulus == 0 {
        return Err(EngineError::InvalidRange(modulus));
    }
    Ok(window_value(hash, slot) % modulus)
}

/// Parse a hex hash and draw from it in one step.
pub fn draw_hex(hex: &str, slot: usize, modulus: u32) -> EngineResult<u32> {
    let hash = EntityHash::parse(hex)?;
    draw(&hash, slot, modulus)
}

fn window_value(hash: &EntityHash, slot: usize) -> u32 {
    let round = slot / SLOTS_PER_ROUND;
    let inner = slot % SLOTS_PER_ROUND;
    let lap = inner / WINDOWS_PER_LAP;
    let pos = inner % WINDOWS_PER_LAP;

    let start = pos * WINDOW_HEX + lap;
    let mut value = 0u32;
    for i in 0..WINDOW_HEX {
        value = (value << 4) | hash.nibble((start + i) % HASH_HEX_LEN);
    }

    if slot < WINDOWS_PER_LAP {
        return value;
    }
    let rotation = ((lap + WINDOWS_PER_LAP * round) % 32) as u32;
    avalanche(value.rotate_left(rotation))
}

/// murmur3 fmix32: bijective, and 0 stays 0
fn avalanche(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Hands out slots for a single generation call in strictly increasing order.
#[derive(Debug, Clone)]
pub struct SlotCursor<'a> {
    hash: &'a EntityHash,
    next_slot: usize,
}

impl<'a> SlotCursor<'a> {
    pub fn new(hash: &'a EntityHash) -> Self {
        Self { hash, next_slot: 0 }
    }

    /// Consume the next slot and reduce it to `[0, modulus)`.
    pub fn draw(&mut self, modulus: u32) -> EngineResult<u32> {
        let slot = self.next_slot;
        self.next_slot += 1;
        draw(self.hash, slot, modulus)
    }

    /// Draw an index into a table of `len` entries.
    pub fn next_index(&mut self, len: usize) -> EngineResult<usize> {
        let modulus = u32::try_from(len).map_err(|_| EngineError::InvalidRange(u32::MAX))?;
        self.draw(modulus).map(|v| v as usize)
    }

    /// Slots consumed so far
    pub fn consumed(&self) -> usize {
        self.next_slot
    }

    pub fn hash(&self) -> &EntityHash {
        self.hash
    }
}
