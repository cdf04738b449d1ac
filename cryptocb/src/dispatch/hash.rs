//! Hash dispatchers: SHA-1 and SHA-256.
//!
//! One call either absorbs `input` (no digest buffer) or finalizes into
//! `digest` (empty input).

#[cfg(feature = "sha256")]
use crate::device::Sha256State;
#[cfg(feature = "sha")]
use crate::device::ShaState;
use crate::error::Result;
use crate::info::{CryptoInfo, HashInfo};
#[cfg(feature = "sha256")]
use crate::info::{Sha256Info, SHA256_DIGEST_SIZE};
#[cfg(feature = "sha")]
use crate::info::{ShaInfo, SHA_DIGEST_SIZE};
use crate::registry::Registry;

impl Registry {
    /// Offload a SHA-1 update or finalization.
    #[cfg(feature = "sha")]
    pub fn sha_hash<'a>(
        &self,
        sha: &'a mut dyn ShaState,
        input: &'a [u8],
        digest: Option<&'a mut [u8; SHA_DIGEST_SIZE]>,
    ) -> Result<()> {
        let device_id = sha.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Hash(HashInfo::Sha(ShaInfo { sha, input, digest }))
        })
    }

    /// Offload a SHA-256 update or finalization.
    #[cfg(feature = "sha256")]
    pub fn sha256_hash<'a>(
        &self,
        sha256: &'a mut dyn Sha256State,
        input: &'a [u8],
        digest: Option<&'a mut [u8; SHA256_DIGEST_SIZE]>,
    ) -> Result<()> {
        let device_id = sha256.device_id();
        self.dispatch(device_id, move || {
            CryptoInfo::Hash(HashInfo::Sha256(Sha256Info {
                sha256,
                input,
                digest,
            }))
        })
    }
}
