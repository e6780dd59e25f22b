//! Terminal I/O capability boundary.
//!
//! The session core needs exactly four primitives from the platform:
//! querying and applying line-discipline attributes, the control-byte
//! predicate and a byte read. [`TerminalIo`] captures them as one trait so
//! the production [`LibcTerminalIo`] bindings and an injectable test fake
//! are interchangeable, and so unavailability of the capability is a single
//! constructible error instead of scattered ad hoc checks.

use std::io;
use std::os::unix::io::RawFd;

use thiserror::Error;

use super::termios::TerminalAttributes;

#[derive(Error, Debug)]
pub enum TermError {
    #[error("terminal I/O capability unavailable: {0}")]
    CapabilityResolution(#[source] io::Error),

    #[error("failed to query terminal attributes: {0}")]
    AttributeQuery(#[source] io::Error),

    #[error("failed to apply terminal attributes: {0}")]
    AttributeApply(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, TermError>;

/// Attribute-application timing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyWhen {
    /// Apply immediately (`TCSANOW`).
    Now,
    /// Apply after pending output has drained (`TCSADRAIN`).
    Drain,
    /// Apply after pending output has drained, discarding pending unread
    /// input (`TCSAFLUSH`). The session always uses this policy.
    DrainAndFlush,
}

impl ApplyWhen {
    fn optional_actions(self) -> libc::c_int {
        match self {
            Self::Now => libc::TCSANOW,
            Self::Drain => libc::TCSADRAIN,
            Self::DrainAndFlush => libc::TCSAFLUSH,
        }
    }
}

/// The four platform primitives the session core depends on.
pub trait TerminalIo {
    /// Query the current line-discipline attributes of `fd`.
    fn get_attributes(&self, fd: RawFd) -> Result<TerminalAttributes>;

    /// Apply `attrs` to `fd` under the given timing policy.
    fn set_attributes(
        &mut self,
        fd: RawFd,
        attrs: &TerminalAttributes,
        when: ApplyWhen,
    ) -> Result<()>;

    /// Whether `byte` is a control character.
    fn is_control_byte(&self, byte: u8) -> bool;

    /// Read up to `buf.len()` bytes from `fd`, returning the transfer count.
    fn read_bytes(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize>;
}

/// Production capability backed by direct libc bindings.
pub struct LibcTerminalIo {
    _private: (),
}

impl LibcTerminalIo {
    /// Verify the termios primitives are usable on `fd`.
    ///
    /// With static linking the bindings themselves cannot fail to resolve;
    /// the one real-world unavailability is a descriptor that is not a
    /// terminal, so that is what this checks.
    pub fn resolve(fd: RawFd) -> Result<Self> {
        if unsafe { libc::isatty(fd) } != 1 {
            return Err(TermError::CapabilityResolution(io::Error::last_os_error()));
        }
        Ok(Self { _private: () })
    }
}

impl TerminalIo for LibcTerminalIo {
    fn get_attributes(&self, fd: RawFd) -> Result<TerminalAttributes> {
        let mut native: libc::termios = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::tcgetattr(fd, &mut native) };
        if rc != 0 {
            return Err(TermError::AttributeQuery(io::Error::last_os_error()));
        }
        Ok(TerminalAttributes::from_native(native))
    }

    fn set_attributes(
        &mut self,
        fd: RawFd,
        attrs: &TerminalAttributes,
        when: ApplyWhen,
    ) -> Result<()> {
        let native = attrs.to_native();
        let rc = unsafe { libc::tcsetattr(fd, when.optional_actions(), &native) };
        if rc != 0 {
            return Err(TermError::AttributeApply(io::Error::last_os_error()));
        }
        Ok(())
    }

    fn is_control_byte(&self, byte: u8) -> bool {
        unsafe { libc::iscntrl(libc::c_int::from(byte)) != 0 }
    }

    fn read_bytes(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n as usize)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::io::AsRawFd;

    #[test]
    fn test_resolve_rejects_non_terminal() {
        let file = File::open("/dev/null").expect("open /dev/null");
        let result = LibcTerminalIo::resolve(file.as_raw_fd());
        assert!(matches!(result, Err(TermError::CapabilityResolution(_))));
    }

    #[test]
    fn test_apply_when_maps_to_platform_actions() {
        assert_eq!(ApplyWhen::Now.optional_actions(), libc::TCSANOW);
        assert_eq!(ApplyWhen::Drain.optional_actions(), libc::TCSADRAIN);
        assert_eq!(ApplyWhen::DrainAndFlush.optional_actions(), libc::TCSAFLUSH);
    }
}
