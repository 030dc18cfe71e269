//! # libshell - Embedded command shell engine
//!
//! An interactive command-line shell for resource-constrained devices that
//! talk to a human operator over a byte-oriented transport (UART, USB-CDC,
//! telnet). The engine accepts characters one at a time, edits an in-memory
//! input line, dispatches recognized commands to host-registered handlers,
//! and renders echoes, prompts and asynchronous prints back over the same
//! transport without garbling the live input line.
//!
//! ## Features
//!
//! ### Line editor
//! - **Single-line editing**: printable echo, backspace/DEL erase, CR/LF/CRLF
//!   line terminators
//! - **Escape filtering**: CSI sequences (arrow keys etc.) are consumed and
//!   ignored
//! - **Overflow recovery**: over-long lines are discarded at the next
//!   terminator and the session keeps working
//!
//! ### Command dispatch
//! - **Binding registry**: append-only table of named commands with optional
//!   help text and in-place argument tokenization
//! - **Tab completion**: prefix completion against the registry, including
//!   common-prefix extension and candidate listing
//! - **Built-in `help`**: lists bindings or prints help for one
//!
//! ### Memory model
//! - All working memory is carved from a single caller-supplied byte buffer
//!   at construction; the engine never allocates afterwards
//! - Works on `core` alone; `no_std` by default
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libshell = "0.1.0"
//! ```
//!
//! ### Basic session
//!
//! ```rust
//! use libshell::arena::Pool;
//! use libshell::shell::config::Config;
//! use libshell::shell::Shell;
//!
//! struct Uart;
//!
//! impl libshell::io::Write for Uart {
//!     type Error = core::convert::Infallible;
//!
//!     fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
//!         // Send to the transport; here: host stdout.
//!         print!("{}", byte as char);
//!         Ok(())
//!     }
//! }
//!
//! let mut pool = Pool::new();
//! let mut shell: Shell<'_, Uart> =
//!     Shell::new(pool.as_mut_slice(), Uart, Config::default()).unwrap();
//!
//! // Feed bytes from the transport (may happen in an ISR)...
//! for byte in b"help\r\n" {
//!     let _ = shell.receive_char(*byte);
//! }
//! // ...and run the engine from the main loop.
//! shell.process();
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based devices exposing a serial console
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Construction-time memory carving.
///
/// Splits the caller-supplied buffer into the disjoint working buffers of the
/// engine (RX/TX rings, edit buffer, last-line buffer) and provides a
/// default-size pool for hosts that do not want to size the buffer themselves.
pub mod arena;

/// Byte ring queues used between the transport and the engine.
///
/// One ring carries incoming characters from the receive path (possibly an
/// ISR) into the engine; the other stages everything the engine emits before
/// it is flushed into the host transport.
pub mod fifo;

/// Byte transport traits.
///
/// The seam between the engine and the host's character output. Implement
/// [`io::Write`] for a UART, USB-CDC endpoint or socket.
pub mod io;

/// In-place command-line tokenization.
///
/// Destructive null-separation of a space-separated command line plus
/// index-based token accessors, shared by the engine and by command handlers.
pub mod token;

/// The shell engine.
///
/// Line editor, binding registry, tab completion, output multiplexing and the
/// built-in `help` command.
pub mod shell;
