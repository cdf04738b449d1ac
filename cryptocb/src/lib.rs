//! # cryptocb - Crypto Offload Dispatch Registry
//!
//! This crate lets an external accelerator (hardware engine, co-processor,
//! remote crypto service) take over individual cryptographic operations from
//! a primitives library. Every key, cipher, hash and RNG object carries a
//! [`DeviceId`]; the [`Registry`] maps ids to offload callbacks, and the
//! primitive calls the matching dispatcher before running its own software
//! path.
//!
//! ## Architecture
//!
//! ```text
//! Registry (device id -> callback + context, fixed slot count)
//! └── Dispatchers
//!     ├── Pk      rsa, make_rsa_key, make_ecc_key, ecdh, ecc_sign, ecc_verify
//!     ├── Cipher  aes_gcm_encrypt/decrypt, aes_cbc_encrypt/decrypt
//!     ├── Hash    sha_hash, sha256_hash
//!     └── Rng     random_block
//! ```
//!
//! A dispatcher returns [`Error::NotHandled`] when no device is registered for
//! the object's id or when the device declines; the primitive then runs in
//! software. Any other result comes straight from the device.
//!
//! ## Example Usage
//!
//! ```rust
//! use cryptocb::{CryptoInfo, CryptoObject, DeviceId, Error, Registry, RngState};
//!
//! #[derive(Debug)]
//! struct Drbg { dev: DeviceId }
//!
//! impl CryptoObject for Drbg {
//!     fn device_id(&self) -> DeviceId { self.dev }
//! }
//! impl RngState for Drbg {}
//!
//! let registry = Registry::new();
//! registry.register_device(
//!     DeviceId::new(1),
//!     |_, info, _| match info {
//!         CryptoInfo::Rng(rng) => {
//!             rng.output.fill(0x42);
//!             Ok(())
//!         },
//!         _ => Err(Error::NotHandled),
//!     },
//!     None,
//! )?;
//!
//! let mut block = [0u8; 16];
//! registry.random_block(&mut Drbg { dev: DeviceId::new(1) }, &mut block)?;
//! assert_eq!(block, [0x42; 16]);
//!
//! // Objects without a device fall back to software.
//! let result = registry.random_block(&mut Drbg { dev: DeviceId::INVALID }, &mut block);
//! assert!(result.unwrap_err().is_not_handled());
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! Each operation family can be compiled out; a missing dispatcher is
//! equivalent to "not handled" for the primitive calling it.
//!
//! - `rsa` (default): RSA public/private operations
//! - `rsa-keygen` (default): RSA key generation
//! - `ecc` (default): ECC key generation, ECDH, ECDSA
//! - `aes-gcm` (default): AES-GCM
//! - `aes-cbc` (default): AES-CBC
//! - `sha` (default): SHA-1
//! - `sha256` (default): SHA-256
//! - `rng` (default): random block generation

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod config;
pub mod device;
mod dispatch;
pub mod error;
pub mod info;
pub mod registry;

pub use config::{ConfigBuilder, RegistryConfig, DEFAULT_MAX_DEVICES};
pub use device::{
    AesCipher, AsAny, CryptoObject, DeviceId, EccKey, RngState, RsaKey, Sha256State, ShaState,
};
pub use error::{Error, Result};
pub use info::{
    AlgoType, CipherInfo, CipherType, CryptoInfo, Direction, EccCurveId, HashInfo, HashType,
    PkInfo, PkType, RsaOperation,
};
pub use registry::{DeviceCallback, DeviceContext, DeviceEntry, Registry};

use std::any::Any;

lazy_static::lazy_static! {
    static ref GLOBAL_REGISTRY: Registry = Registry::with_config(&RegistryConfig::from_env());
}

/// Process-wide registry.
///
/// Sized from [`RegistryConfig::from_env`] on first use. Primitives with no
/// registry of their own to carry dispatch through this instance.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Reset the process-wide registry.
pub fn init() {
    global().initialize();
}

/// Register a device in the process-wide registry.
///
/// See [`Registry::register_device`].
pub fn register_device<F>(
    device_id: DeviceId,
    callback: F,
    context: Option<DeviceContext>,
) -> Result<()>
where
    F: Fn(DeviceId, &mut CryptoInfo<'_>, Option<&(dyn Any + Send + Sync)>) -> Result<()>
        + Send
        + Sync
        + 'static,
{
    global().register_device(device_id, callback, context)
}

/// Remove a device from the process-wide registry.
pub fn unregister_device(device_id: DeviceId) {
    global().unregister_device(device_id);
}
