//! One-byte blocking reads.

use std::os::unix::io::RawFd;

use super::capability::TerminalIo;

/// Result of one read attempt.
///
/// The reader never requests more than one byte, so there is no partial
/// multi-byte outcome: a transfer count of exactly 1 is [`ReadOutcome::Byte`]
/// and everything else (zero bytes on VTIME expiry, or a platform error) is
/// [`ReadOutcome::ShortRead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Exactly one byte was obtained.
    Byte(u8),
    /// Anything else; silently retried by the caller.
    ShortRead,
}

/// Performs one blocking byte read against a descriptor.
pub struct InputReader {
    fd: RawFd,
    buf: [u8; 1],
}

impl InputReader {
    pub fn new(fd: RawFd) -> Self {
        Self { fd, buf: [0] }
    }

    /// Issue a read for exactly one byte.
    ///
    /// Under the raw-mode VMIN=0/VTIME=1 policy this blocks until a byte is
    /// available or 100 ms elapse, whichever is first.
    pub fn read_one<T: TerminalIo>(&mut self, tio: &mut T) -> ReadOutcome {
        match tio.read_bytes(self.fd, &mut self.buf) {
            Ok(1) => ReadOutcome::Byte(self.buf[0]),
            Ok(_) | Err(_) => ReadOutcome::ShortRead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::capability::testing::{FakeTerminalIo, ReadStep};
    use super::*;

    #[test]
    fn test_single_byte_transfer() {
        let mut tio = FakeTerminalIo::new(vec![ReadStep::Byte(0x41)]);
        let mut reader = InputReader::new(0);
        assert_eq!(reader.read_one(&mut tio), ReadOutcome::Byte(0x41));
    }

    #[test]
    fn test_zero_transfer_is_short_read() {
        let mut tio = FakeTerminalIo::new(vec![ReadStep::Empty]);
        let mut reader = InputReader::new(0);
        assert_eq!(reader.read_one(&mut tio), ReadOutcome::ShortRead);
    }

    #[test]
    fn test_read_error_is_short_read() {
        let mut tio = FakeTerminalIo::new(vec![ReadStep::Fail]);
        let mut reader = InputReader::new(0);
        assert_eq!(reader.read_one(&mut tio), ReadOutcome::ShortRead);
    }
}
