/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 * SPDX-License-Identifier: MIT
 */

//! Initial ChaCha state layout.
//!
//! ```text
//!  0  1  2  3    constants ("expand 32-byte k")
//!  4  5  6  7    key words 0..4
//!  8  9 10 11    key words 4..8
//! 12 13 14 15    counter, nonce words 0..3
//! ```

pub const STATE_WORDS: usize = 16;

/// "expand 32-byte k" as four little-endian words.
pub const CONSTANTS: [u32; 4] = [0x61707865, 0x3320646e, 0x79622d32, 0x6b206574];

/// Builds the 16-word initial state for one block.
#[inline(always)]
pub fn initial_state(key: &[u32; 8], counter: u32, nonce: &[u32; 3]) -> [u32; STATE_WORDS] {
    let mut state = [0u32; STATE_WORDS];
    state[..4].copy_from_slice(&CONSTANTS);
    state[4..12].copy_from_slice(key);
    state[12] = counter;
    state[13..].copy_from_slice(nonce);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::words::le_words;

    #[test]
    fn test_constants_spell_expand_32_byte_k() {
        let words: [u32; 4] = le_words(b"expand 32-byte k");
        assert_eq!(words, CONSTANTS);
    }

    /// RFC 7539 §2.3.2 state setup.
    #[test]
    fn test_initial_state_layout() {
        let key_bytes: Vec<u8> = (0u8..32).collect();
        let key: [u32; 8] = le_words(&key_bytes);
        let nonce: [u32; 3] =
            le_words(&[0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00]);

        let state = initial_state(&key, 1, &nonce);

        assert_eq!(
            state,
            [
                0x61707865, 0x3320646e, 0x79622d32, 0x6b206574, 0x03020100, 0x07060504,
                0x0b0a0908, 0x0f0e0d0c, 0x13121110, 0x17161514, 0x1b1a1918, 0x1f1e1d1c,
                0x00000001, 0x09000000, 0x4a000000, 0x00000000,
            ]
        );
    }
}
