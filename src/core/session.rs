//! The interactive session loop.
//!
//! [`SessionLoop`] orchestrates the whole run: engage raw mode, read and
//! print keystrokes one byte at a time, and restore the terminal when the
//! quit key arrives. It is generic over the [`TerminalIo`] capability and
//! the output sink so the end-to-end scenarios run against a fake terminal
//! with a captured output buffer.

use std::io::Write;
use std::os::unix::io::RawFd;

use tracing::{info, warn};

use super::capability::{Result, TerminalIo};
use super::input::{InputReader, ReadOutcome};
use super::keys::KeyClassifier;
use super::raw::RawModeSession;

/// Byte that ends the session.
pub const QUIT_KEY: u8 = b'q';

/// Session lifecycle. There is no path back to `Init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    RawActive,
    Terminating,
}

/// Drives enable → read/classify/print → disable.
pub struct SessionLoop<T: TerminalIo, W: Write> {
    tio: T,
    out: W,
    session: RawModeSession,
    reader: InputReader,
    #[allow(dead_code)]
    state: State,
}

impl<T: TerminalIo, W: Write> SessionLoop<T, W> {
    pub fn new(tio: T, out: W, fd: RawFd) -> Self {
        Self {
            tio,
            out,
            session: RawModeSession::new(fd),
            reader: InputReader::new(fd),
            state: State::Init,
        }
    }

    /// Run the session to completion.
    ///
    /// A failed enable propagates as fatal; raw mode was never engaged, so
    /// no restoration is owed. Once the active region is entered,
    /// restoration runs on every exit from it, and a restoration failure is
    /// reported without overriding a successful quit.
    pub fn run(&mut self) -> Result<()> {
        self.session.enable(&mut self.tio)?;
        self.state = State::RawActive;
        info!("raw mode enabled, press 'q' to quit");

        let result = self.pump();

        self.state = State::Terminating;
        match self.session.disable(&mut self.tio) {
            Ok(()) => info!("terminal attributes restored"),
            Err(e) => {
                warn!("failed to restore terminal attributes: {}", e);
                eprintln!("keyprobe: failed to restore terminal attributes: {}", e);
            }
        }
        result
    }

    fn pump(&mut self) -> Result<()> {
        loop {
            match self.reader.read_one(&mut self.tio) {
                // The read itself blocks for up to VTIME, so looping again
                // immediately is a bounded-rate poll, not a busy spin.
                ReadOutcome::ShortRead => continue,
                ReadOutcome::Byte(QUIT_KEY) => {
                    info!("quit key received");
                    return Ok(());
                }
                ReadOutcome::Byte(byte) => {
                    let kind = KeyClassifier::classify(&self.tio, byte);
                    let line = KeyClassifier::render(byte, kind);
                    let _ = writeln!(self.out, "{}", line);
                    let _ = self.out.flush();
                }
            }
        }
    }

    /// Tear down into the capability and output sink.
    pub fn into_parts(self) -> (T, W) {
        (self.tio, self.out)
    }
}
