//! Common error types for shell operations
//!
//! Everything that can go wrong after construction is non-fatal and handled
//! locally by the engine (dropped bytes latch the overflow flag, bad command
//! lines produce diagnostics on the terminal). The variants below are the
//! conditions that surface through the API itself.

/// A common error type for shell operations.
///
/// This enum defines the errors returned by the engine's entry points. It is
/// designed to be simple and portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The caller-supplied buffer cannot fit the configured layout.
    BufferTooSmall,
    /// The RX ring was full; the received byte was dropped.
    RxOverflow,
    /// The binding registry is full.
    RegistryFull,
    /// A binding with the same name is already registered.
    DuplicateCommand,
    /// The command name is reserved by a built-in and cannot be rebound.
    ReservedCommand,
    /// The binding is malformed (e.g. an empty command name).
    InvalidBinding,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
            Error::RxOverflow => defmt::write!(f, "RxOverflow"),
            Error::RegistryFull => defmt::write!(f, "RegistryFull"),
            Error::DuplicateCommand => defmt::write!(f, "DuplicateCommand"),
            Error::ReservedCommand => defmt::write!(f, "ReservedCommand"),
            Error::InvalidBinding => defmt::write!(f, "InvalidBinding"),
        }
    }
}
