//! Core raw-mode session components.
//!
//! This module contains the raw-mode terminal session manager:
//!
//! - **termios**: typed terminal attributes and the raw-mode derivation
//! - **capability**: the Terminal I/O boundary (libc-backed or injectable)
//! - **raw**: snapshot ownership and enable/disable sequencing
//! - **input**: one-byte blocking reads
//! - **keys**: byte classification and display rendering
//! - **session**: the orchestrating loop
//!
//! # Architecture
//!
//! ```text
//! SessionLoop
//! ├── RawModeSession (original + raw snapshots)
//! │   └── TerminalIo (tcgetattr/tcsetattr)
//! ├── InputReader (one-byte reads via TerminalIo)
//! └── KeyClassifier (iscntrl via TerminalIo + hex rendering)
//! ```

pub mod capability;
pub mod input;
pub mod keys;
pub mod raw;
pub mod session;
pub mod termios;
