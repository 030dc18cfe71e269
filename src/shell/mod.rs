//! The shell engine.
//!
//! A single-threaded state machine that ingests a raw byte stream, maintains
//! a live edit buffer, performs prefix completion against a registry of
//! command bindings, tokenizes submitted lines in place, and multiplexes
//! asynchronous prints with the live input line.
//!
//! # Execution model
//!
//! Two entry points drive the engine:
//!
//! - [`Shell::receive_char`] pushes one incoming byte into the RX ring. It
//!   touches nothing else, so it may run in an interrupt handler.
//! - [`Shell::process`] drains the RX ring, runs the editor, dispatches
//!   submitted commands, and flushes the TX ring into the host transport. It
//!   must run in a task or main-loop context; handlers execute synchronously
//!   on its stack.
//!
//! There is no internal blocking and no timer: partial input lines persist
//! across any number of `process` calls until a line terminator arrives.
//!
//! # Usage
//!
//! ```rust
//! use libshell::arena::Pool;
//! use libshell::shell::config::Config;
//! use libshell::shell::registry::{Binding, CommandHandler, Request};
//! use libshell::shell::output::CliOutput;
//! use libshell::shell::Shell;
//!
//! struct Sink;
//! impl libshell::io::Write for Sink {
//!     type Error = core::convert::Infallible;
//!     fn write(&mut self, _byte: u8) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! struct Status;
//! impl CommandHandler for Status {
//!     fn execute(&self, out: &mut dyn CliOutput, _request: Request<'_>) {
//!         out.print("Device: Online");
//!     }
//! }
//!
//! let status = Status;
//! let mut pool = Pool::new();
//! let mut shell: Shell<'_, Sink> =
//!     Shell::new(pool.as_mut_slice(), Sink, Config::default()).unwrap();
//! shell
//!     .add_binding(Binding {
//!         name: "status",
//!         help: Some("Show device status"),
//!         tokenize_args: false,
//!         handler: Some(&status),
//!     })
//!     .unwrap();
//!
//! for byte in b"status\r\n" {
//!     let _ = shell.receive_char(*byte);
//! }
//! shell.process();
//! ```

/// Engine configuration.
pub mod config;
/// Common error types for shell operations.
pub mod error;
/// Output multiplexing and the handler-facing printing capability.
pub mod output;
/// Command bindings and the append-only registry.
pub mod registry;

mod complete;
mod help;

use config::Config;
use error::Error;
use output::{CliOutput, OutputMux, ERASE_CHAR, LINE_BREAK};
use registry::{Binding, CommandHandler, Registry, Request, HELP_COMMAND};

use crate::arena::Arena;
use crate::fifo::ByteFifo;
use crate::io::Write;

/// ASCII backspace, erases the last character.
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII horizontal tab, requests completion.
pub const ASCII_TAB: u8 = 0x09;
/// ASCII line feed, submits the line.
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return, submits the line.
pub const ASCII_CR: u8 = 0x0D;
/// ASCII escape, introduces a control sequence.
pub const ASCII_ESC: u8 = 0x1B;
/// ASCII delete, treated as backspace.
pub const ASCII_DEL: u8 = 0x7F;

/// Smallest usable edit buffer: one character plus the two bytes reserved for
/// the tokenizer's terminators.
const MIN_CMD_BUFFER_SIZE: usize = 4;

/// Control-flag bitfield of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Flags(u8);

impl Flags {
    /// Construction finished; the engine owns its carved buffers.
    pub(crate) const INIT_COMPLETE: Flags = Flags(1 << 0);
    /// A submitted line is being dispatched; prints skip the erase/redraw
    /// protocol because no input is echoed on the terminal.
    pub(crate) const PROCESSING: Flags = Flags(1 << 1);
    /// Bytes were dropped (ring full, sink error, or line too long).
    pub(crate) const OVERFLOW: Flags = Flags(1 << 2);
    /// The current line content came from a single-candidate completion.
    pub(crate) const AUTOCOMPLETED: Flags = Flags(1 << 3);
    /// A completion candidate list was printed above the prompt line.
    pub(crate) const CANDIDATES_SHOWN: Flags = Flags(1 << 4);

    pub(crate) fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    pub(crate) fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }
}

/// Input parser state.
///
/// Only `Normal` appends characters; the escape states swallow CSI sequences
/// (arrow keys etc.) and `Dropping` discards an over-long line up to its
/// terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputState {
    Normal,
    EscapeSeen,
    CsiSeen,
    Dropping,
}

/// The shell engine. One per session.
///
/// Borrows all of its working memory from the buffer handed to
/// [`Shell::new`] and owns the transport sink `W`. `MAX_BINDINGS` is the
/// registry capacity, including the built-in `help` binding.
pub struct Shell<'a, W: Write, const MAX_BINDINGS: usize = 8> {
    writer: W,
    rx: ByteFifo<'a>,
    tx: ByteFifo<'a>,
    cmd: &'a mut [u8],
    cmd_size: usize,
    history: &'a mut [u8],
    history_size: usize,
    registry: Registry<'a, MAX_BINDINGS>,
    fallback: Option<&'a dyn CommandHandler>,
    invitation: &'a str,
    state: InputState,
    flags: Flags,
    prev_byte: u8,
    last_autocompleted: bool,
}

impl<'a, W: Write, const MAX_BINDINGS: usize> Shell<'a, W, MAX_BINDINGS> {
    /// Create an engine, carving all working buffers from `buffer`.
    ///
    /// Fails with [`Error::BufferTooSmall`] when `buffer` cannot fit the
    /// layout described by `config`. Nothing is written to the transport
    /// until the first submission produces output.
    pub fn new(buffer: &'a mut [u8], writer: W, config: Config<'a>) -> Result<Self, Error> {
        if config.cmd_buffer_size < MIN_CMD_BUFFER_SIZE {
            return Err(Error::BufferTooSmall);
        }

        let mut arena = Arena::new(buffer);
        let rx = ByteFifo::new(arena.take(config.rx_buffer_size)?);
        let tx = ByteFifo::new(arena.take(config.tx_buffer_size)?);
        let cmd = arena.take(config.cmd_buffer_size)?;
        let history = arena.take(config.history_buffer_size)?;

        let mut flags = Flags::default();
        flags.insert(Flags::INIT_COMPLETE);

        Ok(Self {
            writer,
            rx,
            tx,
            cmd,
            cmd_size: 0,
            history,
            history_size: 0,
            registry: Registry::new(),
            fallback: None,
            invitation: config.invitation,
            state: InputState::Normal,
            flags,
            prev_byte: 0,
            last_autocompleted: false,
        })
    }

    /// Queue one incoming byte.
    ///
    /// Only touches the RX ring, so it is safe to call from an interrupt
    /// handler while [`process`](Shell::process) runs in the main loop. When
    /// the ring is full the byte is dropped and [`Error::RxOverflow`] is
    /// returned; queued bytes are unaffected and the session recovers on the
    /// next drain.
    pub fn receive_char(&mut self, byte: u8) -> Result<(), Error> {
        if self.rx.push(byte) {
            Ok(())
        } else {
            Err(Error::RxOverflow)
        }
    }

    /// Drain the RX ring, run the editor, dispatch submissions, flush TX.
    ///
    /// May be called at any cadence; bytes are consumed strictly in arrival
    /// order and handler output preserves its interleaving with the engine's
    /// own echoes.
    pub fn process(&mut self) {
        while let Some(byte) = self.rx.pop() {
            self.handle_byte(byte);
        }
        self.rx.clear_overflow();
        self.mux().flush();
    }

    /// Register a command binding.
    ///
    /// Bindings are append-only; insertion order is the enumeration order for
    /// `help` and completion. The name must be unique and non-empty, and the
    /// built-in `help` cannot be rebound.
    pub fn add_binding(&mut self, binding: Binding<'a>) -> Result<(), Error> {
        self.registry.add(binding)
    }

    /// Install (or clear) the fallback hook invoked for every submitted line
    /// no binding consumed. The hook receives the raw, untokenized argument
    /// text.
    pub fn set_fallback(&mut self, hook: Option<&'a dyn CommandHandler>) {
        self.fallback = hook;
    }

    /// Print a line from the host without garbling the terminal.
    ///
    /// If the operator has typed characters, they are erased with `\b \b`
    /// sequences, `text` is written followed by `\r\n`, and the invitation
    /// plus the typed characters are reprinted. With no pending input the
    /// text alone is written. Output is flushed before returning.
    ///
    /// Must not be called while the engine itself is running (handlers use
    /// the [`CliOutput`](output::CliOutput) capability instead).
    pub fn print(&mut self, text: &str) {
        let pending = if self.flags.contains(Flags::PROCESSING) {
            0
        } else {
            self.cmd_size
        };
        let mut out = OutputMux {
            tx: &mut self.tx,
            writer: &mut self.writer,
            flags: &mut self.flags,
            invitation: self.invitation,
            pending: &self.cmd[..pending],
        };
        CliOutput::print(&mut out, text);
    }

    /// `true` after bytes were dropped: an RX or TX ring rejected a byte,
    /// the sink failed a write, or the current line overran the edit buffer.
    pub fn overflow(&self) -> bool {
        self.flags.contains(Flags::OVERFLOW) || self.rx.overflow()
    }

    /// The last submitted line, as recorded before tokenization.
    pub fn last_submitted(&self) -> &str {
        core::str::from_utf8(&self.history[..self.history_size]).unwrap_or("")
    }

    /// `true` when the last submitted line was produced by a
    /// single-candidate completion and not edited before submission.
    pub fn last_submission_was_autocompleted(&self) -> bool {
        self.last_autocompleted
    }

    /// Number of registered bindings, including the built-in `help`.
    pub fn binding_count(&self) -> usize {
        self.registry.len()
    }

    fn mux(&mut self) -> OutputMux<'_, 'a, W> {
        OutputMux {
            tx: &mut self.tx,
            writer: &mut self.writer,
            flags: &mut self.flags,
            invitation: self.invitation,
            pending: &[],
        }
    }

    fn handle_byte(&mut self, byte: u8) {
        let prev = self.prev_byte;
        self.prev_byte = byte;

        // The LF of a CR/LF pair never produces a second submission.
        if byte == ASCII_LF && prev == ASCII_CR {
            return;
        }

        match self.state {
            InputState::EscapeSeen => {
                self.state = if byte == b'[' {
                    InputState::CsiSeen
                } else {
                    InputState::Normal
                };
            }
            InputState::CsiSeen => {
                if (0x40..=0x7E).contains(&byte) {
                    self.state = InputState::Normal;
                }
            }
            InputState::Dropping => {
                if byte == ASCII_CR || byte == ASCII_LF {
                    self.discard_line();
                }
            }
            InputState::Normal => self.handle_normal(byte),
        }
    }

    fn handle_normal(&mut self, byte: u8) {
        match byte {
            ASCII_CR | ASCII_LF => self.submit(),
            ASCII_BACKSPACE | ASCII_DEL => {
                if self.cmd_size > 0 {
                    self.cmd_size -= 1;
                    self.cmd[self.cmd_size] = 0;
                    self.flags.remove(Flags::AUTOCOMPLETED);
                    self.mux().write_str(ERASE_CHAR);
                }
            }
            ASCII_TAB => {
                let mut out = OutputMux {
                    tx: &mut self.tx,
                    writer: &mut self.writer,
                    flags: &mut self.flags,
                    invitation: self.invitation,
                    pending: &[],
                };
                complete::autocomplete(&self.registry, self.cmd, &mut self.cmd_size, &mut out);
            }
            ASCII_ESC => self.state = InputState::EscapeSeen,
            0x20..=0x7E => {
                if self.cmd_size < self.cmd.len() - 2 {
                    self.cmd[self.cmd_size] = byte;
                    self.cmd_size += 1;
                    self.flags.remove(Flags::AUTOCOMPLETED);
                    self.mux().write_byte(byte);
                } else {
                    self.flags.insert(Flags::OVERFLOW);
                    self.state = InputState::Dropping;
                }
            }
            _ => {}
        }
    }

    /// Throw away an over-long line at its terminator and start fresh.
    fn discard_line(&mut self) {
        self.cmd_size = 0;
        self.cmd.fill(0);
        self.state = InputState::Normal;
        self.flags.remove(Flags::OVERFLOW);

        let mut out = self.mux();
        out.write_str(LINE_BREAK);
        out.write_invitation();
        out.flush();
    }

    fn submit(&mut self) {
        self.mux().write_str(LINE_BREAK);

        let size = self.cmd_size;

        let mut name_start = 0;
        while name_start < size && self.cmd[name_start] == b' ' {
            name_start += 1;
        }
        if name_start == size {
            // Blank line: just redraw the prompt.
            self.reset_line();
            return;
        }

        // Record the line before tokenization mangles it.
        let copy = size.min(self.history.len());
        self.history[..copy].copy_from_slice(&self.cmd[..copy]);
        self.history_size = copy;

        let mut name_end = name_start;
        while name_end < size && self.cmd[name_end] != b' ' {
            name_end += 1;
        }
        let mut args_start = name_end;
        if name_end < size {
            self.cmd[name_end] = 0;
            args_start = name_end + 1;
            while args_start < size && self.cmd[args_start] == b' ' {
                args_start += 1;
            }
        }
        let args_len = size - args_start;

        let binding = core::str::from_utf8(&self.cmd[name_start..name_end])
            .ok()
            .and_then(|name| self.registry.find(name))
            .copied();

        // Sample the completion mark for this submission; the live bit only
        // tracks the in-progress edit.
        self.last_autocompleted = self.flags.contains(Flags::AUTOCOMPLETED);
        self.flags.remove(Flags::AUTOCOMPLETED);

        self.flags.insert(Flags::PROCESSING);
        self.dispatch(binding, name_start, name_end, args_start, args_len);
        self.flags.remove(Flags::PROCESSING);
        self.flags.remove(Flags::CANDIDATES_SHOWN);

        self.reset_line();
    }

    fn dispatch(
        &mut self,
        binding: Option<Binding<'a>>,
        name_start: usize,
        name_end: usize,
        args_start: usize,
        args_len: usize,
    ) {
        match binding {
            Some(binding) => {
                if let Some(handler) = binding.handler {
                    if binding.tokenize_args {
                        crate::token::tokenize(&mut self.cmd[args_start..]);
                    }
                    let args = if binding.tokenize_args {
                        &self.cmd[args_start..]
                    } else {
                        &self.cmd[args_start..args_start + args_len]
                    };
                    let name =
                        core::str::from_utf8(&self.cmd[name_start..name_end]).unwrap_or("");
                    let args = core::str::from_utf8(args).unwrap_or("");
                    let request = Request::new(name, args, binding.tokenize_args);
                    let mut out = OutputMux {
                        tx: &mut self.tx,
                        writer: &mut self.writer,
                        flags: &mut self.flags,
                        invitation: self.invitation,
                        pending: &[],
                    };
                    handler.execute(&mut out, request);
                } else if binding.name == HELP_COMMAND {
                    self.run_help(args_start);
                } else {
                    self.run_fallback(name_start, name_end, args_start, args_len);
                }
            }
            None => {
                let is_help = &self.cmd[name_start..name_end] == HELP_COMMAND.as_bytes();
                if is_help {
                    // Reachable only with a zero-capacity registry.
                    self.run_help(args_start);
                } else {
                    self.run_fallback(name_start, name_end, args_start, args_len);
                }
            }
        }
    }

    fn run_help(&mut self, args_start: usize) {
        crate::token::tokenize(&mut self.cmd[args_start..]);
        let mut out = OutputMux {
            tx: &mut self.tx,
            writer: &mut self.writer,
            flags: &mut self.flags,
            invitation: self.invitation,
            pending: &[],
        };
        help::execute(&self.registry, &self.cmd[args_start..], &mut out);
    }

    /// Hand the line to the fallback hook, or report it as unknown.
    fn run_fallback(
        &mut self,
        name_start: usize,
        name_end: usize,
        args_start: usize,
        args_len: usize,
    ) {
        let name = core::str::from_utf8(&self.cmd[name_start..name_end]).unwrap_or("");
        let args =
            core::str::from_utf8(&self.cmd[args_start..args_start + args_len]).unwrap_or("");
        let mut out = OutputMux {
            tx: &mut self.tx,
            writer: &mut self.writer,
            flags: &mut self.flags,
            invitation: self.invitation,
            pending: &[],
        };
        match self.fallback {
            Some(hook) => hook.execute(&mut out, Request::new(name, args, false)),
            None => help::unknown_command(&mut out, name),
        }
    }

    /// Clear the edit buffer and print a fresh prompt.
    fn reset_line(&mut self) {
        self.cmd_size = 0;
        self.cmd.fill(0);
        let mut out = self.mux();
        out.write_invitation();
        out.flush();
    }
}

impl<W: Write, const MAX_BINDINGS: usize> core::fmt::Debug for Shell<'_, W, MAX_BINDINGS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shell")
            .field("cmd_size", &self.cmd_size)
            .field("bindings", &self.registry.len())
            .field("rx_available", &self.rx.available())
            .field("state", &self.state)
            .field("flags", &self.flags)
            .finish()
    }
}
