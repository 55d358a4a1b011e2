use std::process::ExitCode;

use chacha_stream::cli::{self, Cli};
use clap::Parser;

fn main() -> ExitCode {
    let env = env_logger::Env::new()
        .filter_or("CHACHA_STREAM_LOG", "warn")
        .write_style("CHACHA_STREAM_LOG_STYLE");
    env_logger::init_from_env(env);

    match cli::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("chacha_stream: {e}");
            ExitCode::FAILURE
        }
    }
}
