//! Output multiplexing.
//!
//! Every byte the engine emits — echoes, diagnostics, help listings, handler
//! prints — is staged through the TX ring and drained into the host's
//! transport. Asynchronous prints are interleaved with the live input line by
//! erasing the echoed characters, writing the message, and reprinting the
//! invitation and the edit buffer, so the terminal never garbles.

use super::Flags;
use crate::fifo::ByteFifo;
use crate::io::Write;

/// Backspace-space-backspace, erases one echoed character.
pub(crate) const ERASE_CHAR: &str = "\x08 \x08";
/// Line terminator emitted by the engine.
pub(crate) const LINE_BREAK: &str = "\r\n";

/// Printing capability handed to command handlers and the fallback hook.
///
/// A type-erased view of the engine's output multiplexer: printed text goes
/// through the TX ring with the same terminal-preserving protocol as
/// [`Shell::print`](crate::shell::Shell::print).
pub trait CliOutput {
    /// Print `text` followed by a line break.
    fn print(&mut self, text: &str);
}

/// The engine-side writer: TX staging ring plus the host sink.
///
/// Holds disjoint borrows of the engine's fields so dispatch can hand it to a
/// handler while the edit buffer is lent out as the request.
pub(crate) struct OutputMux<'m, 'a, W: Write> {
    pub(crate) tx: &'m mut ByteFifo<'a>,
    pub(crate) writer: &'m mut W,
    pub(crate) flags: &'m mut Flags,
    pub(crate) invitation: &'a str,
    /// Characters currently echoed on the operator's line; empty while a
    /// submitted line is being dispatched.
    pub(crate) pending: &'m [u8],
}

impl<W: Write> OutputMux<'_, '_, W> {
    /// Stage one byte. A full ring drops the byte and latches the overflow
    /// flag, mirroring the ring's own silent-fail push; whatever is already
    /// staged is drained by the next flush.
    pub(crate) fn write_byte(&mut self, byte: u8) {
        if !self.tx.push(byte) {
            self.flags.insert(Flags::OVERFLOW);
        }
    }

    pub(crate) fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Print the prompt at the start of a fresh line.
    pub(crate) fn write_invitation(&mut self) {
        let invitation = self.invitation;
        self.write_str(invitation);
    }

    /// Erase `count` echoed characters with the `\b \b` sequence.
    pub(crate) fn erase(&mut self, count: usize) {
        for _ in 0..count {
            self.write_str(ERASE_CHAR);
        }
    }

    /// Drain the TX ring into the host sink.
    pub(crate) fn flush(&mut self) {
        while let Some(byte) = self.tx.pop() {
            if self.writer.write(byte).is_err() {
                self.flags.insert(Flags::OVERFLOW);
            }
        }
    }
}

impl<W: Write> CliOutput for OutputMux<'_, '_, W> {
    fn print(&mut self, text: &str) {
        let pending = self.pending;
        if !pending.is_empty() && !self.flags.contains(Flags::PROCESSING) {
            self.erase(pending.len());
            self.write_str(text);
            self.write_str(LINE_BREAK);
            self.write_invitation();
            self.write_bytes(pending);
        } else {
            self.write_str(text);
            self.write_str(LINE_BREAK);
        }
        self.flush();
    }
}

impl<W: Write> core::fmt::Debug for OutputMux<'_, '_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutputMux")
            .field("staged", &self.tx.available())
            .field("pending", &self.pending.len())
            .finish()
    }
}
