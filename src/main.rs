//! Terminal entry point.
use std::io::{self, BufRead, Write};

use anyhow::Result;
use strategy_console::config::ConsoleConfig;
use strategy_console::console::{Console, ConsoleError, Flow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = ConsoleConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    let stdout = io::stdout();
    let mut console = Console::new(config.build_game(), stdout.lock())?;
    console.greet()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(io::stderr(), "> ")?;
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match console.handle_line(&line?) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(ConsoleError::Session(err)) => {
                tracing::error!(%err, "command aborted");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only the game transcript.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
