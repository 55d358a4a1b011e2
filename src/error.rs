/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 * SPDX-License-Identifier: MIT
 */

//! Error type shared by the cipher, the profile loader and the command line.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Key was not exactly 32 bytes.
    #[error("invalid key length: expected 32 bytes, got {len}")]
    InvalidKeyLength { len: usize },

    /// Nonce was not exactly 12 bytes.
    #[error("invalid nonce length: expected 12 bytes, got {len}")]
    InvalidNonceLength { len: usize },

    /// Round count must be even, rounds are applied in column/diagonal pairs.
    #[error("invalid round count {0}: must be even")]
    OddRounds(u32),

    #[error("config line {line}: {reason}")]
    Config { line: usize, reason: String },

    #[error("duplicate profile name: {0}")]
    DuplicateProfile(String),

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("hex decoding failed: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A known-answer vector did not reproduce.
    #[error("self test failed: {0}")]
    SelfTest(&'static str),
}

impl Error {
    /// True for the input-contract violations raised by cipher construction.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidKeyLength { .. } | Error::InvalidNonceLength { .. } | Error::OddRounds(_)
        )
    }
}
