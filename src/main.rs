//! toctoc - knock on a host's ports, in order.

use anyhow::{Context, Result};
use std::process::ExitCode;
use toctoc::cli::{self, Args};
use toctoc::output;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let argv = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let args = match Args::parse_lenient(argv) {
        Ok((args, rejected)) => {
            for flag in rejected {
                output::print_error(&flag.to_string());
                output::print_usage();
            }
            args
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_tracing(args.verbose) {
        output::print_warning(&format!("{:#}", e));
    }

    debug!("Parsed CLI arguments: {:?}", args);

    match cli::execute(&args).await {
        Ok(summary) => {
            debug!(?summary, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::print_error(&e.to_string());
            if e.wants_usage() {
                output::print_usage();
            }
            ExitCode::from(1)
        }
    }
}

/// Initialize the tracing subscriber on stderr.
///
/// # Verbosity Levels
/// - 0 (default): `RUST_LOG`, or warnings and errors
/// - 1 (-v): Info level
/// - 2 (-vv): Debug level
/// - 3+ (-vvv): Trace level
fn init_tracing(verbose: u8) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
