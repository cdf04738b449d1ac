//! Error types for the offload registry and dispatchers.
//!
//! The error space is shared with the offload callbacks: a callback reports its
//! outcome through the same [`Error`] the registry uses, and [`Error::code`] /
//! [`check_code`] convert to and from the integer result codes used by the
//! surrounding primitive library.

use std::fmt;

use crate::device::DeviceId;

/// Result type for registry and dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic failure code.
pub const GENERIC_E: i32 = -1;

/// Out of buffer space (returned when the device table is full).
pub const BUFFER_E: i32 = -132;

/// Bad argument passed to a function.
pub const BAD_FUNC_ARG: i32 = -173;

/// Feature not compiled in / operation not handled by a device.
pub const NOT_COMPILED_IN: i32 = -174;

/// Errors produced by the registry, the dispatchers or an offload callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No free or matching slot is left in the device table.
    CapacityExceeded {
        /// Number of slots in the table
        capacity: usize,
    },

    /// The device identifier cannot be registered (the reserved sentinel).
    InvalidDeviceId(DeviceId),

    /// No device handled the operation; the caller should run it in software.
    NotHandled,

    /// Failure code reported by an offload device.
    DeviceFailure(i32),

    /// Failure described by an offload device.
    CryptoError(String),

    /// Invalid registry configuration.
    InvalidConfig(String),
}

impl Error {
    /// Returns `true` for the fallback signal.
    ///
    /// A caller seeing this should run its software implementation instead.
    pub fn is_not_handled(&self) -> bool {
        matches!(self, Error::NotHandled)
    }

    /// Integer result code for this error in the library's shared code space.
    pub fn code(&self) -> i32 {
        match self {
            Error::CapacityExceeded { .. } => BUFFER_E,
            Error::InvalidDeviceId(_) => BAD_FUNC_ARG,
            Error::NotHandled => NOT_COMPILED_IN,
            Error::DeviceFailure(code) => *code,
            Error::CryptoError(_) => GENERIC_E,
            Error::InvalidConfig(_) => BAD_FUNC_ARG,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded { capacity } => {
                write!(f, "Device table full: all {} slots in use", capacity)
            },
            Error::InvalidDeviceId(id) => write!(f, "Invalid device id: {}", id),
            Error::NotHandled => write!(f, "Operation not handled by any device"),
            Error::DeviceFailure(code) => write!(f, "Device failure: code {}", code),
            Error::CryptoError(msg) => write!(f, "Cryptographic error: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convert an integer result code into a [`Result`].
///
/// `0` is success, [`NOT_COMPILED_IN`] is the fallback signal and every other
/// value is carried through as [`Error::DeviceFailure`].
pub fn check_code(code: i32) -> Result<()> {
    match code {
        0 => Ok(()),
        NOT_COMPILED_IN => Err(Error::NotHandled),
        other => Err(Error::DeviceFailure(other)),
    }
}
