//! Per-operation dispatchers.
//!
//! Each dispatcher reads the device id from the object it is handed, looks it
//! up in the [`Registry`](crate::Registry) and, when a callback is registered,
//! builds the matching [`CryptoInfo`](crate::CryptoInfo) and invokes it once.
//!
//! Every dispatcher returns [`Error::NotHandled`](crate::Error::NotHandled)
//! when no device takes the operation. Callers must treat that as a request
//! to run their software implementation, not as a failure:
//!
//! ```rust,ignore
//! match registry.rsa(input, &mut out, &mut out_len, op, &key, None) {
//!     Err(Error::NotHandled) => software_rsa(input, &mut out, op, &key),
//!     other => other,
//! }
//! ```
//!
//! Dispatchers only read the registry and never retry.

#[cfg(any(feature = "aes-gcm", feature = "aes-cbc"))]
mod cipher;
#[cfg(any(feature = "sha", feature = "sha256"))]
mod hash;
#[cfg(any(feature = "rsa", feature = "ecc"))]
mod pk;
#[cfg(feature = "rng")]
mod rng;
