/*
 * Copyright (c) 2025 sh0rch <sh0rch@iwl.dev>
 * SPDX-License-Identifier: MIT
 *
 * This module provides cipher profile parsing for the chacha_stream tool.
 * A profile names a key, a nonce, a starting block counter and a round count
 * so that the command line never needs raw key material as an argument.
 */

use log::debug;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use crate::cipher::{ChaCha, Rounds, KEY_LEN, NONCE_LEN};
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/chacha_stream/config";
pub const CONFIG_ENV: &str = "CHACHA_STREAM_CONF";

/// Holds the configuration for a single named cipher profile.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherProfile {
    /// Name used to select the profile on the command line.
    pub name: String,
    /// 32-byte key, raw hex or derived from a passphrase.
    pub key: [u8; KEY_LEN],
    /// 12-byte nonce.
    pub nonce: [u8; NONCE_LEN],
    /// First block counter.
    pub counter: u32,
    pub rounds: Rounds,
}

impl std::fmt::Debug for CipherProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherProfile")
            .field("name", &self.name)
            .field("nonce", &hex::encode(self.nonce))
            .field("counter", &self.counter)
            .field("rounds", &self.rounds.get())
            .finish_non_exhaustive()
    }
}

impl CipherProfile {
    /// Builds a fresh cipher positioned at the profile's counter.
    pub fn cipher(&self) -> Result<ChaCha> {
        ChaCha::with_rounds(&self.key, &self.nonce, self.counter, self.rounds)
    }
}

/// Converts a passphrase to a 32-byte key using SHA-256.
pub fn passphrase_to_key(s: &str) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&result);
    key
}

/// Interprets 64 hex digits as a raw key and anything else as a passphrase.
pub fn parse_key(s: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    match hex::decode_to_slice(s, &mut key) {
        Ok(()) => key,
        Err(_) => passphrase_to_key(s),
    }
}

/// Parses a nonce given as exactly 24 hex digits.
pub fn parse_nonce(s: &str) -> Result<[u8; NONCE_LEN]> {
    let bytes = hex::decode(s)?;
    bytes.as_slice().try_into().map_err(|_| Error::InvalidNonceLength { len: bytes.len() })
}

/// Resolves the config path: `$CHACHA_STREAM_CONF` if set, otherwise the
/// default location.
pub fn config_path() -> String {
    env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Loads and parses the profiles file.
pub fn load_config() -> Result<Vec<CipherProfile>> {
    let config_path = config_path();
    if !Path::new(&config_path).exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Config not found: {config_path} (set {CONFIG_ENV} to override)"),
        )));
    }
    debug!("loading cipher profiles from {config_path}");

    let file = fs::File::open(&config_path)?;
    let reader = std::io::BufReader::new(file);
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    parse_config(&lines)
}

/// Parses config lines into profiles.
/// Each line should be in the format: name:key:nonce\[:counter\[:rounds\]\]
/// Blank lines and `#` comments are skipped. Duplicate names are an error.
/// Fields are separated by `:`, so a passphrase key cannot contain one.
pub fn parse_config(input: &[String]) -> Result<Vec<CipherProfile>> {
    let mut profiles = Vec::with_capacity(input.len());
    let mut seen_names = HashSet::with_capacity(input.len());
    for (idx, raw) in input.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = idx + 1;
        let bad = |reason: &str| Error::Config { line: line_no, reason: reason.to_string() };

        let mut parts = line.split(':').map(str::trim);
        let name = parts.next().filter(|s| !s.is_empty()).ok_or_else(|| bad("missing name"))?;
        if !seen_names.insert(name.to_string()) {
            return Err(Error::DuplicateProfile(name.to_string()));
        }
        let key = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(parse_key)
            .ok_or_else(|| bad("missing key"))?;
        let nonce = parts.next().ok_or_else(|| bad("missing nonce"))?;
        let nonce = parse_nonce(nonce).map_err(|e| {
            bad(&format!("bad nonce: {e} (fields are ':'-separated, keys cannot contain ':')"))
        })?;

        let counter = match parts.next() {
            Some(s) => {
                s.parse::<u32>().map_err(|_| bad("counter must be a 32-bit unsigned integer"))?
            }
            None => 0,
        };
        let rounds = match parts.next() {
            Some(s) => {
                let n = s.parse::<u32>().map_err(|_| bad("rounds must be a number"))?;
                Rounds::new(n).map_err(|e| bad(&e.to_string()))?
            }
            None => Rounds::default(),
        };
        if parts.next().is_some() {
            return Err(bad("too many fields"));
        }

        profiles.push(CipherProfile { name: name.to_string(), key, nonce, counter, rounds });
    }
    debug!("parsed {} cipher profile(s)", profiles.len());
    Ok(profiles)
}

/// Picks a profile by name.
pub fn find_profile(profiles: Vec<CipherProfile>, name: &str) -> Result<CipherProfile> {
    profiles
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::UnknownProfile(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    /// Tests that passphrase_to_key produces consistent results for the same input.
    #[test]
    fn test_passphrase_to_key_consistency() {
        assert_eq!(passphrase_to_key("testkey"), passphrase_to_key("testkey"));
        assert_ne!(passphrase_to_key("testkey1"), passphrase_to_key("testkey2"));
    }

    #[test]
    fn test_parse_key_hex_or_passphrase() {
        let key = parse_key(HEX_KEY);
        assert_eq!(key[0], 0x00);
        assert_eq!(key[31], 0x1f);
        assert_eq!(parse_key("not hex at all"), passphrase_to_key("not hex at all"));
        // 62 digits is valid hex but the wrong size, so it is a passphrase.
        assert_eq!(parse_key(&HEX_KEY[..62]), passphrase_to_key(&HEX_KEY[..62]));
    }

    #[test]
    fn test_parse_nonce_length() {
        assert_eq!(parse_nonce("000000000000004a00000000").unwrap()[7], 0x4a);
        assert!(matches!(parse_nonce("0000"), Err(Error::InvalidNonceLength { len: 2 })));
        assert!(matches!(parse_nonce("zz"), Err(Error::Hex(_))));
    }

    /// Tests parsing a full config line with all fields present.
    #[test]
    fn test_parse_config_line_full() {
        let input = lines(&[format!("rfc:{HEX_KEY}:000000000000004a00000000:1:12").as_str()]);
        let profiles = parse_config(&input).unwrap();
        assert_eq!(profiles.len(), 1);
        let p = &profiles[0];
        assert_eq!(p.name, "rfc");
        assert_eq!(p.key, parse_key(HEX_KEY));
        assert_eq!(p.nonce[7], 0x4a);
        assert_eq!(p.counter, 1);
        assert_eq!(p.rounds, Rounds::R12);
    }

    #[test]
    fn test_parse_config_defaults_and_comments() {
        let input = lines(&[
            "# profiles",
            "",
            "a:secret words:000000000000000000000001",
            "  b:other:000000000000000000000002:7  ",
        ]);
        let profiles = parse_config(&input).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].key, passphrase_to_key("secret words"));
        assert_eq!(profiles[0].counter, 0);
        assert_eq!(profiles[0].rounds, Rounds::R20);
        assert_eq!(profiles[1].name, "b");
        assert_eq!(profiles[1].counter, 7);
    }

    #[test]
    fn test_example_config_parses() {
        let input: Vec<String> =
            include_str!("../config.example").lines().map(str::to_string).collect();
        let profiles = parse_config(&input).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].cipher().unwrap().counter(), 1);
        assert_eq!(profiles[1].key, passphrase_to_key("correct horse battery staple"));
    }

    /// Tests that duplicate profile names cause an error.
    #[test]
    fn test_parse_config_duplicate_name() {
        let input = lines(&["x:k1:000000000000000000000000", "x:k2:000000000000000000000000"]);
        assert!(matches!(parse_config(&input), Err(Error::DuplicateProfile(n)) if n == "x"));
    }

    #[test]
    fn test_parse_config_rejects_bad_fields() {
        for (input, at) in [
            ("x:k:0000", 1),
            ("x:k", 1),
            ("x:k:000000000000000000000000:-1", 1),
            ("x:k:000000000000000000000000:0:7", 1),
            ("x:k:000000000000000000000000:0:20:extra", 1),
            (":k:000000000000000000000000", 1),
        ] {
            match parse_config(&lines(&[input])) {
                Err(Error::Config { line, .. }) => assert_eq!(line, at),
                other => panic!("expected config error for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_config_colon_in_passphrase_is_reported() {
        let input = lines(&["p:pass:word:000000000000000000000000"]);
        match parse_config(&input) {
            Err(Error::Config { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("bad nonce"), "{reason}");
                assert!(reason.contains("keys cannot contain ':'"), "{reason}");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_profile_cipher_uses_counter_and_rounds() {
        let input = lines(&["p:pass:000000000000000000000000:9:8"]);
        let profile = find_profile(parse_config(&input).unwrap(), "p").unwrap();
        let cipher = profile.cipher().unwrap();
        assert_eq!(cipher.counter(), 9);
        assert_eq!(cipher.rounds(), Rounds::R8);
        assert!(matches!(find_profile(vec![profile], "q"), Err(Error::UnknownProfile(_))));
    }

    #[test]
    fn test_profile_debug_hides_key() {
        let input = lines(&[format!("p:{HEX_KEY}:000000000000000000000000").as_str()]);
        let profile = &parse_config(&input).unwrap()[0];
        assert!(!format!("{profile:?}").contains(HEX_KEY));
    }
}
