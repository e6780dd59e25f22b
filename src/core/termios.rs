//! Terminal line-discipline data model.
//!
//! [`TerminalAttributes`] is a typed view of one termios configuration: the
//! four flag groups, the control-character table and the line speeds. Values
//! are never built from scratch — they are either decoded from a platform
//! snapshot ([`TerminalAttributes::from_native`]) or derived from one by the
//! pure [`TerminalAttributes::make_raw`] transformation.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Input-mode flags (`c_iflag`).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct InputFlags: libc::tcflag_t {
        /// Break condition generates an interrupt (`BRKINT`).
        const BRKINT = libc::BRKINT;
        /// Translate CR to NL on input (`ICRNL`).
        const ICRNL = libc::ICRNL;
        /// Enable input parity checking (`INPCK`).
        const INPCK = libc::INPCK;
        /// Strip the 8th bit off input bytes (`ISTRIP`).
        const ISTRIP = libc::ISTRIP;
        /// XON/XOFF start/stop output control (`IXON`).
        const IXON = libc::IXON;
    }
}

bitflags! {
    /// Output-mode flags (`c_oflag`).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct OutputFlags: libc::tcflag_t {
        /// Output post-processing (`OPOST`).
        const OPOST = libc::OPOST;
    }
}

bitflags! {
    /// Control-mode flags (`c_cflag`).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ControlFlags: libc::tcflag_t {
        /// Character-size field mask (`CSIZE`).
        const CSIZE = libc::CSIZE;
        /// 8-bit character size (`CS8`).
        const CS8 = libc::CS8;
    }
}

bitflags! {
    /// Local-mode flags (`c_lflag`).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct LocalFlags: libc::tcflag_t {
        /// Local echo (`ECHO`).
        const ECHO = libc::ECHO;
        /// Canonical (line-buffered) input (`ICANON`).
        const ICANON = libc::ICANON;
        /// Extended input processing (`IEXTEN`).
        const IEXTEN = libc::IEXTEN;
        /// Signal generation from INTR/QUIT/SUSP keys (`ISIG`).
        const ISIG = libc::ISIG;
    }
}

/// Named slots of the control-character table.
///
/// Indexing `c_cc` goes through this enum only, never a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChar {
    /// Minimum bytes before a read returns (`VMIN`).
    MinBytes,
    /// Read timeout in tenths of a second (`VTIME`).
    ReadTimeout,
}

impl ControlChar {
    fn index(self) -> usize {
        match self {
            Self::MinBytes => libc::VMIN,
            Self::ReadTimeout => libc::VTIME,
        }
    }
}

/// One terminal line-discipline configuration.
#[derive(Clone, Copy)]
pub struct TerminalAttributes {
    /// Input-mode flags.
    pub input_flags: InputFlags,
    /// Output-mode flags.
    pub output_flags: OutputFlags,
    /// Control-mode flags.
    pub control_flags: ControlFlags,
    /// Local-mode flags.
    pub local_flags: LocalFlags,
    /// Control-character table, addressed through [`ControlChar`].
    pub control_chars: [libc::cc_t; libc::NCCS],
    /// Input line speed.
    pub input_speed: libc::speed_t,
    /// Output line speed.
    pub output_speed: libc::speed_t,
    /// Snapshot this value was decoded from. Platform fields the model does
    /// not decode (e.g. `c_line` on Linux) survive a round-trip through it.
    native: libc::termios,
}

impl TerminalAttributes {
    /// Decode a platform termios snapshot.
    pub fn from_native(native: libc::termios) -> Self {
        Self {
            input_flags: InputFlags::from_bits_retain(native.c_iflag),
            output_flags: OutputFlags::from_bits_retain(native.c_oflag),
            control_flags: ControlFlags::from_bits_retain(native.c_cflag),
            local_flags: LocalFlags::from_bits_retain(native.c_lflag),
            control_chars: native.c_cc,
            input_speed: unsafe { libc::cfgetispeed(&native) },
            output_speed: unsafe { libc::cfgetospeed(&native) },
            native,
        }
    }

    /// Re-encode as a platform termios, overlaying the typed fields on the
    /// base snapshot.
    pub fn to_native(&self) -> libc::termios {
        let mut native = self.native;
        native.c_iflag = self.input_flags.bits();
        native.c_oflag = self.output_flags.bits();
        native.c_cflag = self.control_flags.bits();
        native.c_lflag = self.local_flags.bits();
        native.c_cc = self.control_chars;
        unsafe {
            let _ = libc::cfsetispeed(&mut native, self.input_speed);
            let _ = libc::cfsetospeed(&mut native, self.output_speed);
        }
        native
    }

    /// Read one control-character slot.
    pub fn control_char(&self, which: ControlChar) -> libc::cc_t {
        self.control_chars[which.index()]
    }

    /// Write one control-character slot.
    pub fn set_control_char(&mut self, which: ControlChar, value: libc::cc_t) {
        self.control_chars[which.index()] = value;
    }

    /// Derive the raw-mode configuration from this snapshot.
    ///
    /// Clears the input translations and flow control, output
    /// post-processing, echo, canonical mode, extended processing and signal
    /// generation; selects 8-bit characters; and sets VMIN=0 / VTIME=1 so a
    /// read returns after at least one byte or 100 ms, whichever is first.
    pub fn make_raw(&self) -> Self {
        let mut raw = *self;
        raw.input_flags.remove(
            InputFlags::BRKINT
                | InputFlags::ICRNL
                | InputFlags::INPCK
                | InputFlags::ISTRIP
                | InputFlags::IXON,
        );
        raw.output_flags.remove(OutputFlags::OPOST);
        raw.control_flags.remove(ControlFlags::CSIZE);
        raw.control_flags.insert(ControlFlags::CS8);
        raw.local_flags.remove(
            LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
        );
        raw.set_control_char(ControlChar::MinBytes, 0);
        raw.set_control_char(ControlChar::ReadTimeout, 1);
        raw
    }
}

impl PartialEq for TerminalAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.input_flags == other.input_flags
            && self.output_flags == other.output_flags
            && self.control_flags == other.control_flags
            && self.local_flags == other.local_flags
            && self.control_chars == other.control_chars
            && self.input_speed == other.input_speed
            && self.output_speed == other.output_speed
    }
}

impl fmt::Debug for TerminalAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalAttributes")
            .field("c_iflag", &self.input_flags.bits())
            .field("c_oflag", &self.output_flags.bits())
            .field("c_cflag", &self.control_flags.bits())
            .field("c_lflag", &self.local_flags.bits())
            .field("c_cc", &self.control_chars)
            .field("c_ispeed", &self.input_speed)
            .field("c_ospeed", &self.output_speed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cooked() -> TerminalAttributes {
        let mut native: libc::termios = unsafe { std::mem::zeroed() };
        native.c_iflag = libc::BRKINT | libc::ICRNL | libc::IXON;
        native.c_oflag = libc::OPOST;
        native.c_lflag = libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;
        native.c_cc[libc::VMIN] = 1;
        TerminalAttributes::from_native(native)
    }

    #[test]
    fn test_make_raw_clears_local_modes() {
        let raw = cooked().make_raw();
        assert!(!raw.local_flags.contains(LocalFlags::ECHO));
        assert!(!raw.local_flags.contains(LocalFlags::ICANON));
        assert!(!raw.local_flags.contains(LocalFlags::IEXTEN));
        assert!(!raw.local_flags.contains(LocalFlags::ISIG));
    }

    #[test]
    fn test_make_raw_clears_input_translations() {
        let raw = cooked().make_raw();
        assert!(!raw.input_flags.contains(InputFlags::BRKINT));
        assert!(!raw.input_flags.contains(InputFlags::ICRNL));
        assert!(!raw.input_flags.contains(InputFlags::IXON));
        assert!(!raw.output_flags.contains(OutputFlags::OPOST));
        assert!(raw.control_flags.contains(ControlFlags::CS8));
    }

    #[test]
    fn test_make_raw_sets_read_policy() {
        let raw = cooked().make_raw();
        assert_eq!(raw.control_char(ControlChar::MinBytes), 0);
        assert_eq!(raw.control_char(ControlChar::ReadTimeout), 1);
    }

    #[test]
    fn test_make_raw_leaves_snapshot_untouched() {
        let orig = cooked();
        let _ = orig.make_raw();
        assert!(orig.local_flags.contains(LocalFlags::ECHO));
        assert_eq!(orig.control_char(ControlChar::MinBytes), 1);
    }

    #[test]
    fn test_native_round_trip() {
        let orig = cooked();
        let round = TerminalAttributes::from_native(orig.to_native());
        assert_eq!(orig, round);
    }

    #[test]
    fn test_unknown_bits_survive_derivation() {
        // IGNPAR is not part of the modelled input flags; derivation must
        // not disturb it.
        let mut native: libc::termios = unsafe { std::mem::zeroed() };
        native.c_iflag = libc::IGNPAR | libc::ICRNL;
        let raw = TerminalAttributes::from_native(native).make_raw();
        assert_eq!(raw.to_native().c_iflag & libc::IGNPAR, libc::IGNPAR);
        assert_eq!(raw.to_native().c_iflag & libc::ICRNL, 0);
    }
}
