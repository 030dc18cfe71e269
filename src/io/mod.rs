//! Byte transport traits.
//!
//! The engine emits everything it prints through a single byte sink owned by
//! the shell. The host implements [`Write`] for its transport (UART, USB-CDC,
//! a socket) and hands the sink over at construction.

/// A byte sink towards the operator's terminal.
///
/// The engine calls [`Write::write`] once per output byte while draining its
/// TX ring. The implementation must either accept the byte or report an
/// error; on error the engine drops the byte and latches its overflow flag,
/// it never blocks or retries.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Write a single byte to the transport
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<W: Write> Write for &mut W {
    type Error = W::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write(byte)
    }
}
