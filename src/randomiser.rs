/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 *
 * This file is licensed under the MIT License.
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Random key and nonce generation.
//!
//! Keys and nonces come from the thread-local generator of `rand`, which is a
//! cryptographically secure generator reseeded from the operating system.

use rand::{CryptoRng, RngCore};

use crate::cipher::{KEY_LEN, NONCE_LEN};

/// Fills `key` from the given generator.
#[inline(always)]
pub fn fill_key<R: RngCore + CryptoRng>(key: &mut [u8; KEY_LEN], rng: &mut R) {
    rng.fill_bytes(key);
}

/// Fills `nonce` from the given generator.
#[inline(always)]
pub fn fill_nonce<R: RngCore + CryptoRng>(nonce: &mut [u8; NONCE_LEN], rng: &mut R) {
    rng.fill_bytes(nonce);
}

/// Generates a fresh random key.
///
/// # Example
/// ```
/// let key = chacha_stream::randomiser::random_key();
/// assert_eq!(key.len(), 32);
/// ```
pub fn random_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    fill_key(&mut key, &mut rand::rng());
    key
}

/// Generates a fresh random nonce. A nonce must never repeat under one key.
pub fn random_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    fill_nonce(&mut nonce, &mut rand::rng());
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fill_is_seed_deterministic() {
        let mut a = [0u8; KEY_LEN];
        let mut b = [0u8; KEY_LEN];
        fill_key(&mut a, &mut StdRng::seed_from_u64(1));
        fill_key(&mut b, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);

        let mut n = [0u8; NONCE_LEN];
        fill_nonce(&mut n, &mut StdRng::seed_from_u64(2));
        assert_ne!(n, [0u8; NONCE_LEN]);
    }

    #[test]
    fn test_random_values_differ() {
        assert_ne!(random_key(), random_key());
        assert_ne!(random_nonce(), random_nonce());
    }
}
