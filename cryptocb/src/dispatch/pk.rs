//! Public-key dispatchers: RSA and ECC.

use crate::device::RngState;
#[cfg(feature = "ecc")]
use crate::device::EccKey;
#[cfg(feature = "rsa")]
use crate::device::RsaKey;
use crate::error::Result;
use crate::info::{CryptoInfo, PkInfo};
#[cfg(feature = "ecc")]
use crate::info::{EccCurveId, EccKeyGenInfo, EcdhInfo, EcdsaSignInfo, EcdsaVerifyInfo};
#[cfg(feature = "rsa")]
use crate::info::{RsaInfo, RsaOperation};
#[cfg(feature = "rsa-keygen")]
use crate::info::RsaKeyGenInfo;
use crate::registry::Registry;

impl Registry {
    /// Offload an RSA public or private operation on `key`.
    ///
    /// The device writes the result into `output` and its length into
    /// `out_len`.
    #[cfg(feature = "rsa")]
    pub fn rsa<'a>(
        &self,
        input: &'a [u8],
        output: &'a mut [u8],
        out_len: &'a mut usize,
        op: RsaOperation,
        key: &'a dyn RsaKey,
        rng: Option<&'a mut dyn RngState>,
    ) -> Result<()> {
        self.dispatch(key.device_id(), move || {
            CryptoInfo::Pk(PkInfo::Rsa(RsaInfo {
                input,
                output,
                out_len,
                op,
                key,
                rng,
            }))
        })
    }

    /// Offload generation of a `size`-bit RSA key with public exponent `e`
    /// into `key`.
    #[cfg(feature = "rsa-keygen")]
    pub fn make_rsa_key<'a>(
        &self,
        key: &'a mut dyn RsaKey,
        size: u32,
        e: u64,
        rng: &'a mut dyn RngState,
    ) -> Result<()> {
        let device_id = key.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Pk(PkInfo::RsaKeyGen(RsaKeyGenInfo { key, size, e, rng }))
        })
    }

    /// Offload generation of a `key_size`-byte ECC key on `curve_id` into `key`.
    #[cfg(feature = "ecc")]
    pub fn make_ecc_key<'a>(
        &self,
        rng: &'a mut dyn RngState,
        key_size: usize,
        key: &'a mut dyn EccKey,
        curve_id: EccCurveId,
    ) -> Result<()> {
        let device_id = key.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Pk(PkInfo::EcKeyGen(EccKeyGenInfo {
                rng,
                size: key_size,
                key,
                curve_id,
            }))
        })
    }

    /// Offload an ECDH shared secret computation.
    ///
    /// The device is selected by `private_key`.
    #[cfg(feature = "ecc")]
    pub fn ecdh<'a>(
        &self,
        private_key: &'a dyn EccKey,
        public_key: &'a dyn EccKey,
        output: &'a mut [u8],
        out_len: &'a mut usize,
    ) -> Result<()> {
        self.dispatch(private_key.device_id(), move || {
            CryptoInfo::Pk(PkInfo::Ecdh(EcdhInfo {
                private_key,
                public_key,
                output,
                out_len,
            }))
        })
    }

    /// Offload ECDSA signing of the hash `input` with `key`.
    #[cfg(feature = "ecc")]
    pub fn ecc_sign<'a>(
        &self,
        input: &'a [u8],
        output: &'a mut [u8],
        out_len: &'a mut usize,
        rng: &'a mut dyn RngState,
        key: &'a dyn EccKey,
    ) -> Result<()> {
        self.dispatch(key.device_id(), move || {
            CryptoInfo::Pk(PkInfo::EcdsaSign(EcdsaSignInfo {
                input,
                output,
                out_len,
                rng,
                key,
            }))
        })
    }

    /// Offload ECDSA verification of `sig` over `hash`.
    ///
    /// On `Ok(())` the outcome is in `verified`; a bad signature is not an
    /// error.
    #[cfg(feature = "ecc")]
    pub fn ecc_verify<'a>(
        &self,
        sig: &'a [u8],
        hash: &'a [u8],
        verified: &'a mut bool,
        key: &'a dyn EccKey,
    ) -> Result<()> {
        self.dispatch(key.device_id(), move || {
            CryptoInfo::Pk(PkInfo::EcdsaVerify(EcdsaVerifyInfo {
                sig,
                hash,
                verified,
                key,
            }))
        })
    }
}
