/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 * SPDX-License-Identifier: MIT
 */

//! Little-endian conversion between byte strings and 32-bit words.
//!
//! Every place the cipher moves between bytes and words (key, nonce,
//! keystream) goes through these two helpers.

/// Reads `N` little-endian words from the front of `bytes`.
///
/// `bytes` must hold at least `4 * N` bytes; callers validate lengths first.
#[inline(always)]
pub fn le_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Writes `words` into `out` as little-endian bytes, word 0 first.
#[inline(always)]
pub fn write_le_words(words: &[u32], out: &mut [u8]) {
    for (chunk, word) in out.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_words_byte_order() {
        let words: [u32; 2] = le_words(&[0x00, 0x01, 0x02, 0x03, 0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(words, [0x03020100, 0xddccbbaa]);
    }

    #[test]
    fn test_write_le_words_inverts_le_words() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let words: [u32; 8] = le_words(&bytes);
        let mut out = [0u8; 32];
        write_le_words(&words, &mut out);
        assert_eq!(&out[..], &bytes[..]);
    }
}
