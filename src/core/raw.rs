//! Raw-mode session management.
//!
//! [`RawModeSession`] owns the attribute snapshots for one raw-mode
//! engagement: the original configuration captured at enable time and the
//! raw configuration derived from it. Restoration always uses the exact
//! snapshot taken at query time, never a recomputed approximation.

use std::os::unix::io::RawFd;

use tracing::debug;

use super::capability::{ApplyWhen, Result, TerminalIo};
use super::termios::TerminalAttributes;

/// One active or inactive raw-mode engagement for a descriptor.
///
/// The descriptor is borrowed, not owned; its line discipline is the one
/// piece of kernel-held state this process mutates, and this session is its
/// sole writer.
pub struct RawModeSession {
    fd: RawFd,
    original: Option<TerminalAttributes>,
    raw: Option<TerminalAttributes>,
    active: bool,
}

impl RawModeSession {
    /// Create an inactive session for `fd`.
    pub fn new(fd: RawFd) -> Self {
        Self {
            fd,
            original: None,
            raw: None,
            active: false,
        }
    }

    /// Whether raw mode is currently engaged.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The snapshot captured at enable time, if any.
    pub fn original(&self) -> Option<&TerminalAttributes> {
        self.original.as_ref()
    }

    /// The raw configuration in effect, if any.
    pub fn raw(&self) -> Option<&TerminalAttributes> {
        self.raw.as_ref()
    }

    /// Capture the current configuration, derive and apply the raw one.
    ///
    /// On error the session stays inactive: a failed query leaves the
    /// terminal untouched, and a failed apply means the caller must not
    /// treat raw mode as engaged (and owes no restoration).
    pub fn enable<T: TerminalIo>(&mut self, tio: &mut T) -> Result<()> {
        let original = tio.get_attributes(self.fd)?;
        debug!("original attributes: {:?}", original);

        let raw = original.make_raw();
        tio.set_attributes(self.fd, &raw, ApplyWhen::DrainAndFlush)?;

        // Re-query what the driver actually accepted; unsupported bits are
        // silently dropped. A failed re-query keeps the computed snapshot.
        let accepted = tio.get_attributes(self.fd).unwrap_or(raw);
        debug!("raw attributes in effect: {:?}", accepted);

        self.original = Some(original);
        self.raw = Some(accepted);
        self.active = true;
        Ok(())
    }

    /// Restore the original configuration, unconditionally.
    ///
    /// The session is marked inactive even when the apply fails; there is no
    /// further recovery layer, so the caller reports the error and proceeds.
    pub fn disable<T: TerminalIo>(&mut self, tio: &mut T) -> Result<()> {
        let original = match self.original {
            Some(attrs) => attrs,
            None => return Ok(()),
        };
        self.active = false;
        tio.set_attributes(self.fd, &original, ApplyWhen::DrainAndFlush)
    }
}
