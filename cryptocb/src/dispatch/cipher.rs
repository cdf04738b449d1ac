//! Symmetric cipher dispatchers: AES-GCM and AES-CBC.

use crate::device::AesCipher;
use crate::error::Result;
#[cfg(feature = "aes-cbc")]
use crate::info::{AesCbcInfo, Direction};
#[cfg(feature = "aes-gcm")]
use crate::info::{AesGcmDecryptInfo, AesGcmEncryptInfo};
use crate::info::{CipherInfo, CryptoInfo};
use crate::registry::Registry;

impl Registry {
    /// Offload AES-GCM encryption of `input` into `output`.
    ///
    /// The device writes `auth_tag.len()` bytes of tag into `auth_tag`.
    #[cfg(feature = "aes-gcm")]
    pub fn aes_gcm_encrypt<'a>(
        &self,
        aes: &'a mut dyn AesCipher,
        output: &'a mut [u8],
        input: &'a [u8],
        iv: &'a [u8],
        auth_tag: &'a mut [u8],
        aad: &'a [u8],
    ) -> Result<()> {
        let device_id = aes.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Cipher(CipherInfo::AesGcmEncrypt(AesGcmEncryptInfo {
                aes,
                output,
                input,
                iv,
                auth_tag,
                aad,
            }))
        })
    }

    /// Offload AES-GCM decryption of `input` into `output`, checking
    /// `auth_tag`.
    #[cfg(feature = "aes-gcm")]
    pub fn aes_gcm_decrypt<'a>(
        &self,
        aes: &'a mut dyn AesCipher,
        output: &'a mut [u8],
        input: &'a [u8],
        iv: &'a [u8],
        auth_tag: &'a [u8],
        aad: &'a [u8],
    ) -> Result<()> {
        let device_id = aes.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Cipher(CipherInfo::AesGcmDecrypt(AesGcmDecryptInfo {
                aes,
                output,
                input,
                iv,
                auth_tag,
                aad,
            }))
        })
    }

    /// Offload AES-CBC encryption of `input` into `output`.
    #[cfg(feature = "aes-cbc")]
    pub fn aes_cbc_encrypt<'a>(
        &self,
        aes: &'a mut dyn AesCipher,
        output: &'a mut [u8],
        input: &'a [u8],
    ) -> Result<()> {
        self.aes_cbc(aes, output, input, Direction::Encrypt)
    }

    /// Offload AES-CBC decryption of `input` into `output`.
    #[cfg(feature = "aes-cbc")]
    pub fn aes_cbc_decrypt<'a>(
        &self,
        aes: &'a mut dyn AesCipher,
        output: &'a mut [u8],
        input: &'a [u8],
    ) -> Result<()> {
        self.aes_cbc(aes, output, input, Direction::Decrypt)
    }

    #[cfg(feature = "aes-cbc")]
    fn aes_cbc<'a>(
        &self,
        aes: &'a mut dyn AesCipher,
        output: &'a mut [u8],
        input: &'a [u8],
        direction: Direction,
    ) -> Result<()> {
        let device_id = aes.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Cipher(CipherInfo::AesCbc(AesCbcInfo {
                aes,
                output,
                input,
                direction,
            }))
        })
    }
}
