//! Device identifiers and the object interfaces that carry them.
//!
//! Every key, cipher, hash and RNG state owned by the primitive library
//! exposes the identifier of the device that should handle its operations.
//! The registry only reads this identifier; it never creates or validates it.

use std::any::Any;
use std::fmt;

/// Identifier selecting the offload device for a cryptographic object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(i32);

impl DeviceId {
    /// Reserved "no device" value. Marks empty registry slots and objects
    /// that always run in software.
    pub const INVALID: DeviceId = DeviceId(-2);

    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        DeviceId(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Check whether this is the reserved sentinel.
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<i32> for DeviceId {
    fn from(id: i32) -> Self {
        DeviceId(id)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access to the concrete type behind an object reference.
///
/// Implemented for every `'static` type, so offload callbacks can recover
/// their own key or state types from the descriptor. On a `&mut dyn` field
/// use `as_any_mut`, or dereference first (`(*info.rng).as_any()`), so the
/// call resolves to the object rather than to the reference:
///
/// ```rust
/// use cryptocb::{CryptoObject, DeviceId, RsaKey};
///
/// #[derive(Debug)]
/// struct HwKey { dev: DeviceId, handle: u32 }
///
/// impl CryptoObject for HwKey {
///     fn device_id(&self) -> DeviceId { self.dev }
/// }
/// impl RsaKey for HwKey {}
///
/// fn handle_of(key: &dyn RsaKey) -> Option<u32> {
///     key.as_any().downcast_ref::<HwKey>().map(|k| k.handle)
/// }
/// ```
pub trait AsAny {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A cryptographic object tagged with a device identifier.
pub trait CryptoObject: AsAny + fmt::Debug {
    /// Identifier of the device that should handle this object's operations.
    fn device_id(&self) -> DeviceId;
}

/// RSA key (public or private).
pub trait RsaKey: CryptoObject {}

/// ECC key (public or private).
pub trait EccKey: CryptoObject {}

/// AES cipher state.
pub trait AesCipher: CryptoObject {}

/// SHA-1 hash state.
pub trait ShaState: CryptoObject {}

/// SHA-256 hash state.
pub trait Sha256State: CryptoObject {}

/// Random number generator state.
pub trait RngState: CryptoObject {}
