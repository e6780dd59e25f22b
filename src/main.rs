//! keyprobe - a raw-mode keyboard input diagnostic
//!
//! keyprobe switches the controlling terminal into raw (non-canonical,
//! non-echoing) mode, reads keystrokes one byte at a time and prints each
//! byte's classification, then restores the terminal's original mode when
//! `q` is pressed.
//!
//! # Output
//!
//! One line per byte read:
//!
//! ```text
//! 41 A      # printable byte: hex, space, character
//! 3         # control byte (Ctrl-C): bare hex
//! ```
//!
//! Ctrl-C does not interrupt the session; signal generation is disabled as
//! part of entering raw mode. Only `q` (or an external kill) ends it.

#[cfg(unix)]
mod core;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    init_logging();
    info!("keyprobe {} starting...", VERSION);

    run()
}

/// Initialize logging to file.
///
/// Stdout is the diagnostic output channel and stderr may be attached to a
/// raw terminal, so log lines go to `~/.keyprobe/keyprobe.log`.
fn init_logging() {
    let home = std::env::var_os("HOME").map(std::path::PathBuf::from);

    let log_path = home
        .map(|h| h.join(".keyprobe").join("keyprobe.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("keyprobe.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    // Open log file (append mode)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

/// Run the interactive session on the controlling terminal.
#[cfg(unix)]
fn run() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::io;

    use crate::core::capability::LibcTerminalIo;
    use crate::core::session::SessionLoop;

    let tio = LibcTerminalIo::resolve(libc::STDIN_FILENO)
        .context("terminal I/O capability unavailable on stdin")?;

    let stdout = io::stdout();
    let mut session = SessionLoop::new(tio, stdout.lock(), libc::STDIN_FILENO);
    session.run()?;

    info!("keyprobe exiting");
    Ok(())
}

#[cfg(not(unix))]
fn run() -> anyhow::Result<()> {
    anyhow::bail!("keyprobe requires a Unix terminal (termios)");
}
