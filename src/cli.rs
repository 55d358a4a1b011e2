//! Command line front end: stream stdin through the cipher, generate keys,
//! run the self test.

use std::io::{self, ErrorKind, Read, Write};

use clap::{Parser, Subcommand};
use log::info;

use crate::cipher::{ChaCha, Rounds, BLOCK_LEN};
use crate::config;
use crate::error::Result;
use crate::randomiser::{random_key, random_nonce};
use crate::selftest;

/// Stream buffer size. A multiple of the block size, so buffered calls
/// produce exactly the keystream of a single call.
pub const STREAM_BUF_LEN: usize = 1024 * BLOCK_LEN;

#[derive(Debug, Parser)]
#[command(name = "chacha_stream", version, about = "ChaCha20 (RFC 7539) stream cipher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt or decrypt stdin to stdout with a configured profile
    Process {
        /// Profile name from the config file
        profile: String,
    },
    /// Encrypt or decrypt stdin to stdout with a key and nonce given in hex
    Raw {
        #[arg(long)]
        key: String,
        #[arg(long)]
        nonce: String,
        #[arg(long, default_value_t = 0)]
        counter: u32,
        #[arg(long, default_value_t = 20)]
        rounds: u32,
    },
    /// Print a random key and nonce as a config line
    Keygen {
        #[arg(default_value = "default")]
        name: String,
    },
    /// Run the RFC 7539 known-answer tests
    SelfTest,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Process { profile } => {
            let profile = config::find_profile(config::load_config()?, &profile)?;
            let mut cipher = profile.cipher()?;
            let total = process_stream(&mut cipher, io::stdin().lock(), io::stdout().lock())?;
            info!("profile {}: {} bytes, next block {}", profile.name, total, cipher.counter());
        }
        Command::Raw { key, nonce, counter, rounds } => {
            let rounds = Rounds::new(rounds)?;
            let mut cipher =
                ChaCha::with_rounds(&hex::decode(key)?, &hex::decode(nonce)?, counter, rounds)?;
            let total = process_stream(&mut cipher, io::stdin().lock(), io::stdout().lock())?;
            info!("{} bytes, next block {}", total, cipher.counter());
        }
        Command::Keygen { name } => {
            println!("{}", keygen_line(&name, &random_key(), &random_nonce()));
        }
        Command::SelfTest => {
            selftest::run()?;
            println!("ChaCha self test: OK");
        }
    }
    Ok(())
}

/// Formats a config line for a freshly generated key and nonce.
pub fn keygen_line(name: &str, key: &[u8], nonce: &[u8]) -> String {
    format!("{}:{}:{}", name, hex::encode(key), hex::encode(nonce))
}

/// XORs everything read from `input` with the keystream and writes it to
/// `output`. Returns the number of bytes processed.
pub fn process_stream<R: Read, W: Write>(
    cipher: &mut ChaCha,
    mut input: R,
    mut output: W,
) -> Result<u64> {
    let mut buf = vec![0u8; STREAM_BUF_LEN];
    let mut total = 0u64;
    loop {
        let len = read_full(&mut input, &mut buf)?;
        if len == 0 {
            break;
        }
        cipher.apply_keystream(&mut buf[..len]);
        output.write_all(&buf[..len])?;
        total += len as u64;
        if len < buf.len() {
            break;
        }
    }
    output.flush()?;
    Ok(total)
}

/// Reads until `buf` is full or the input ends. Short reads must not leave a
/// partial block in the middle of the stream.
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
