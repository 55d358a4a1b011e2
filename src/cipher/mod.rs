//! ChaCha stream cipher (RFC 7539: 256-bit key, 96-bit nonce, 32-bit counter).
//!
//! [`ChaCha`] owns the key, the nonce and a block counter. Every call to
//! [`ChaCha::process`] (or [`ChaCha::apply_keystream`]) consumes one keystream
//! block per started 64-byte chunk and advances the counter accordingly, so
//! consecutive calls continue the same keystream.
//!
//! The explicit-counter forms [`ChaCha::keystream_block`] and
//! [`ChaCha::apply_keystream_at`] leave the instance untouched, which lets
//! callers hand disjoint counter ranges to separate workers.
//!
//! The cipher provides confidentiality only. Pair it with an authenticator.

use std::fmt;

use log::{debug, trace, warn};

use crate::error::{Error, Result};

mod block;
mod state;
pub mod words;

pub use block::{chacha_block, double_round, quarter_round, words_to_bytes, Rounds, BLOCK_LEN};
pub use state::{initial_state, CONSTANTS, STATE_WORDS};

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;

pub struct ChaCha {
    key: [u32; 8],
    nonce: [u32; 3],
    counter: u32,
    rounds: Rounds,
}

impl fmt::Debug for ChaCha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaCha")
            .field("counter", &self.counter)
            .field("rounds", &self.rounds.get())
            .finish_non_exhaustive()
    }
}

impl ChaCha {
    /// Creates a 20-round cipher. Fails if `key` is not 32 bytes or `nonce`
    /// is not 12 bytes.
    pub fn new(key: &[u8], nonce: &[u8], counter: u32) -> Result<Self> {
        Self::with_rounds(key, nonce, counter, Rounds::R20)
    }

    /// Creates a cipher with a reduced (or extended) round count.
    pub fn with_rounds(key: &[u8], nonce: &[u8], counter: u32, rounds: Rounds) -> Result<Self> {
        if key.len() != KEY_LEN {
            return Err(Error::InvalidKeyLength { len: key.len() });
        }
        if nonce.len() != NONCE_LEN {
            return Err(Error::InvalidNonceLength { len: nonce.len() });
        }
        debug!("ChaCha{} initialised at block counter {}", rounds.get(), counter);
        Ok(Self { key: words::le_words(key), nonce: words::le_words(nonce), counter, rounds })
    }

    #[inline]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Repositions the keystream at the start of block `counter`.
    #[inline]
    pub fn set_counter(&mut self, counter: u32) {
        self.counter = counter;
    }

    #[inline]
    pub fn rounds(&self) -> Rounds {
        self.rounds
    }

    /// Blocks that can still be produced before the counter wraps to zero.
    #[inline]
    pub fn blocks_remaining(&self) -> u64 {
        (1u64 << 32) - u64::from(self.counter)
    }

    /// Keystream block number `counter` as bytes. Does not touch the
    /// instance counter.
    #[inline]
    pub fn keystream_block(&self, counter: u32) -> [u8; BLOCK_LEN] {
        words_to_bytes(&chacha_block(&self.key, counter, &self.nonce, self.rounds))
    }

    /// XORs `data` in place with the keystream starting at block `counter`.
    /// Returns the counter following the last block used.
    pub fn apply_keystream_at(&self, counter: u32, data: &mut [u8]) -> u32 {
        let mut counter = counter;
        for chunk in data.chunks_mut(BLOCK_LEN) {
            let block = self.keystream_block(counter);
            for (b, k) in chunk.iter_mut().zip(block.iter()) {
                *b ^= *k;
            }
            counter = counter.wrapping_add(1);
            if counter == 0 {
                warn!("ChaCha block counter wrapped, keystream is repeating");
            }
        }
        counter
    }

    /// XORs `data` in place with the next keystream bytes and advances the
    /// counter by one per started 64-byte chunk.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        trace!("ChaCha applying {} bytes at block {}", data.len(), self.counter);
        self.counter = self.apply_keystream_at(self.counter, data);
    }

    /// Returns `data` XORed with the keystream. Output length equals input
    /// length; encryption and decryption are the same operation.
    pub fn process(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        self.apply_keystream(&mut out);
        out
    }

    #[inline]
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Vec<u8> {
        self.process(plaintext)
    }

    #[inline]
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Vec<u8> {
        self.process(ciphertext)
    }
}
