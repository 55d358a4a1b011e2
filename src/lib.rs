/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 * SPDX-License-Identifier: MIT
 */

//! ChaCha stream cipher as specified in RFC 7539.
//!
//! ```
//! use chacha_stream::ChaCha;
//!
//! let key = [0x42u8; 32];
//! let nonce = [0x24u8; 12];
//! let mut cipher = ChaCha::new(&key, &nonce, 1)?;
//! let ciphertext = cipher.encrypt(b"attack at dawn");
//!
//! let mut cipher = ChaCha::new(&key, &nonce, 1)?;
//! assert_eq!(cipher.decrypt(&ciphertext), b"attack at dawn");
//! # Ok::<(), chacha_stream::Error>(())
//! ```

pub mod cipher;
pub mod cli;
pub mod config;
pub mod error;
pub mod randomiser;
pub mod selftest;

pub use cipher::{ChaCha, Rounds};
pub use error::{Error, Result};
