/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 * SPDX-License-Identifier: MIT
 */

//! ChaCha block function: quarter round, double round and keystream block.

use super::state::{initial_state, STATE_WORDS};
use super::words::write_le_words;
use crate::error::{Error, Result};

/// Keystream block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Number of rounds applied by the block function.
///
/// Rounds are applied as column/diagonal pairs, so only even counts exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rounds(u32);

impl Rounds {
    pub const R8: Rounds = Rounds(8);
    pub const R12: Rounds = Rounds(12);
    pub const R20: Rounds = Rounds(20);

    pub fn new(rounds: u32) -> Result<Self> {
        if rounds % 2 != 0 {
            return Err(Error::OddRounds(rounds));
        }
        Ok(Rounds(rounds))
    }

    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub fn double_rounds(self) -> u32 {
        self.0 / 2
    }
}

impl Default for Rounds {
    fn default() -> Self {
        Rounds::R20
    }
}

/// Column groupings followed by diagonal groupings.
const ROUND_INDICES: [(usize, usize, usize, usize); 8] = [
    (0, 4, 8, 12),
    (1, 5, 9, 13),
    (2, 6, 10, 14),
    (3, 7, 11, 15),
    (0, 5, 10, 15),
    (1, 6, 11, 12),
    (2, 7, 8, 13),
    (3, 4, 9, 14),
];

/// ChaCha quarter round over `state[a]`, `state[b]`, `state[c]`, `state[d]`.
#[inline(always)]
pub fn quarter_round(state: &mut [u32], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// One column round followed by one diagonal round.
#[inline(always)]
pub fn double_round(state: &mut [u32; STATE_WORDS]) {
    for &(a, b, c, d) in ROUND_INDICES.iter() {
        quarter_round(state, a, b, c, d);
    }
}

/// Computes one keystream block as 16 words.
///
/// The output depends only on the arguments; identical inputs always give
/// identical blocks.
#[inline(always)]
pub fn chacha_block(
    key: &[u32; 8],
    counter: u32,
    nonce: &[u32; 3],
    rounds: Rounds,
) -> [u32; STATE_WORDS] {
    let initial = initial_state(key, counter, nonce);
    let mut working_state = initial;
    for _ in 0..rounds.double_rounds() {
        double_round(&mut working_state);
    }
    for (w, s) in working_state.iter_mut().zip(initial.iter()) {
        *w = w.wrapping_add(*s);
    }
    working_state
}

/// Serializes a block to keystream bytes, each word little-endian.
#[inline(always)]
pub fn words_to_bytes(words: &[u32; STATE_WORDS]) -> [u8; BLOCK_LEN] {
    let mut block = [0u8; BLOCK_LEN];
    write_le_words(words, &mut block);
    block
}
