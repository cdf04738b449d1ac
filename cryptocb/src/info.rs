//! Operation descriptors passed to offload callbacks.
//!
//! A [`CryptoInfo`] is built by a dispatcher for a single call and dropped as
//! soon as the callback returns. It owns nothing: every buffer and object in
//! it is borrowed from the primitive that made the call, and output buffers
//! are written in place by the device.
//!
//! ```text
//! CryptoInfo
//! ├── Pk      Rsa, RsaKeyGen, EcKeyGen, Ecdh, EcdsaSign, EcdsaVerify
//! ├── Cipher  AesGcmEncrypt, AesGcmDecrypt, AesCbc
//! ├── Hash    Sha, Sha256
//! └── Rng
//! ```

use std::fmt;

use crate::device::{AesCipher, EccKey, RngState, RsaKey, Sha256State, ShaState};
use crate::error::{Error, Result};

/// SHA-1 digest size in bytes.
pub const SHA_DIGEST_SIZE: usize = 20;

/// SHA-256 digest size in bytes.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Top-level algorithm class of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgoType {
    /// Public-key operation
    Pk,
    /// Symmetric cipher operation
    Cipher,
    /// Hash operation
    Hash,
    /// Random number generation
    Rng,
}

/// Public-key operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PkType {
    /// RSA public or private operation
    Rsa,
    /// RSA key generation
    RsaKeyGen,
    /// ECC key generation
    EcKeyGen,
    /// ECDH shared secret
    Ecdh,
    /// ECDSA signing
    EcdsaSign,
    /// ECDSA verification
    EcdsaVerify,
}

/// Symmetric cipher kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherType {
    /// AES in Galois/Counter Mode
    AesGcm,
    /// AES in Cipher Block Chaining mode
    AesCbc,
}

/// Hash function kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashType {
    /// SHA-1
    Sha,
    /// SHA-256
    Sha256,
}

/// Cipher direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Encrypt
    Encrypt,
    /// Decrypt
    Decrypt,
}

impl Direction {
    /// Check if this is the encrypt direction.
    pub const fn is_encrypt(self) -> bool {
        matches!(self, Direction::Encrypt)
    }
}

/// RSA primitive operation type.
///
/// Raw values match the primitive library's operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaOperation {
    /// Encrypt with the public key
    PublicEncrypt,
    /// Decrypt with the public key (signature verification)
    PublicDecrypt,
    /// Encrypt with the private key (signing)
    PrivateEncrypt,
    /// Decrypt with the private key
    PrivateDecrypt,
}

impl RsaOperation {
    /// Raw operation code.
    pub const fn as_raw(self) -> i32 {
        match self {
            RsaOperation::PublicEncrypt => 0,
            RsaOperation::PublicDecrypt => 1,
            RsaOperation::PrivateEncrypt => 2,
            RsaOperation::PrivateDecrypt => 3,
        }
    }

    /// Check whether the operation uses the private key.
    pub const fn is_private(self) -> bool {
        matches!(
            self,
            RsaOperation::PrivateEncrypt | RsaOperation::PrivateDecrypt
        )
    }
}

impl TryFrom<i32> for RsaOperation {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(RsaOperation::PublicEncrypt),
            1 => Ok(RsaOperation::PublicDecrypt),
            2 => Ok(RsaOperation::PrivateEncrypt),
            3 => Ok(RsaOperation::PrivateDecrypt),
            other => Err(Error::CryptoError(format!(
                "unknown RSA operation type {}",
                other
            ))),
        }
    }
}

/// Elliptic curve requested for key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EccCurveId {
    /// Let the device pick the curve from the key size
    #[default]
    Unspecified,
    /// NIST P-256
    Secp256r1,
    /// NIST P-384
    Secp384r1,
    /// NIST P-521
    Secp521r1,
    /// Any other curve, by the primitive library's raw identifier
    Other(i32),
}

/// Descriptor for one offloaded cryptographic operation.
#[derive(Debug)]
pub enum CryptoInfo<'a> {
    /// Public-key operation
    Pk(PkInfo<'a>),
    /// Symmetric cipher operation
    Cipher(CipherInfo<'a>),
    /// Hash operation
    Hash(HashInfo<'a>),
    /// Random block generation
    Rng(RngInfo<'a>),
}

impl CryptoInfo<'_> {
    /// Top-level algorithm class.
    pub fn algo_type(&self) -> AlgoType {
        match self {
            CryptoInfo::Pk(_) => AlgoType::Pk,
            CryptoInfo::Cipher(_) => AlgoType::Cipher,
            CryptoInfo::Hash(_) => AlgoType::Hash,
            CryptoInfo::Rng(_) => AlgoType::Rng,
        }
    }
}

impl fmt::Display for CryptoInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoInfo::Pk(pk) => write!(f, "pk/{:?}", pk.pk_type()),
            CryptoInfo::Cipher(cipher) => write!(
                f,
                "cipher/{:?}/{:?}",
                cipher.cipher_type(),
                cipher.direction()
            ),
            CryptoInfo::Hash(hash) => write!(f, "hash/{:?}", hash.hash_type()),
            CryptoInfo::Rng(_) => write!(f, "rng"),
        }
    }
}

/// Public-key operations.
#[derive(Debug)]
pub enum PkInfo<'a> {
    /// RSA public or private operation
    Rsa(RsaInfo<'a>),
    /// RSA key generation
    RsaKeyGen(RsaKeyGenInfo<'a>),
    /// ECC key generation
    EcKeyGen(EccKeyGenInfo<'a>),
    /// ECDH shared secret
    Ecdh(EcdhInfo<'a>),
    /// ECDSA signing
    EcdsaSign(EcdsaSignInfo<'a>),
    /// ECDSA verification
    EcdsaVerify(EcdsaVerifyInfo<'a>),
}

impl PkInfo<'_> {
    /// Operation kind.
    pub fn pk_type(&self) -> PkType {
        match self {
            PkInfo::Rsa(_) => PkType::Rsa,
            PkInfo::RsaKeyGen(_) => PkType::RsaKeyGen,
            PkInfo::EcKeyGen(_) => PkType::EcKeyGen,
            PkInfo::Ecdh(_) => PkType::Ecdh,
            PkInfo::EcdsaSign(_) => PkType::EcdsaSign,
            PkInfo::EcdsaVerify(_) => PkType::EcdsaVerify,
        }
    }
}

/// RSA public or private operation.
#[derive(Debug)]
pub struct RsaInfo<'a> {
    /// Input data
    pub input: &'a [u8],
    /// Output buffer; its length is the space available
    pub output: &'a mut [u8],
    /// Set by the device to the number of bytes written to `output`
    pub out_len: &'a mut usize,
    /// Operation type
    pub op: RsaOperation,
    /// Key to operate with
    pub key: &'a dyn RsaKey,
    /// RNG for blinding and padding, when the caller supplied one
    pub rng: Option<&'a mut dyn RngState>,
}

/// RSA key generation.
#[derive(Debug)]
pub struct RsaKeyGenInfo<'a> {
    /// Key to populate
    pub key: &'a mut dyn RsaKey,
    /// Requested modulus size in bits
    pub size: u32,
    /// Public exponent
    pub e: u64,
    /// RNG to generate with
    pub rng: &'a mut dyn RngState,
}

/// ECC key generation.
#[derive(Debug)]
pub struct EccKeyGenInfo<'a> {
    /// RNG to generate with
    pub rng: &'a mut dyn RngState,
    /// Requested key size in bytes
    pub size: usize,
    /// Key to populate
    pub key: &'a mut dyn EccKey,
    /// Requested curve
    pub curve_id: EccCurveId,
}

/// ECDH shared secret computation.
#[derive(Debug)]
pub struct EcdhInfo<'a> {
    /// Local private key
    pub private_key: &'a dyn EccKey,
    /// Peer public key
    pub public_key: &'a dyn EccKey,
    /// Shared secret output buffer
    pub output: &'a mut [u8],
    /// Set by the device to the secret length
    pub out_len: &'a mut usize,
}

/// ECDSA signing.
#[derive(Debug)]
pub struct EcdsaSignInfo<'a> {
    /// Hash to sign
    pub input: &'a [u8],
    /// Signature output buffer
    pub output: &'a mut [u8],
    /// Set by the device to the signature length
    pub out_len: &'a mut usize,
    /// RNG for the nonce
    pub rng: &'a mut dyn RngState,
    /// Signing key
    pub key: &'a dyn EccKey,
}

/// ECDSA verification.
#[derive(Debug)]
pub struct EcdsaVerifyInfo<'a> {
    /// Signature to check
    pub sig: &'a [u8],
    /// Hash that was signed
    pub hash: &'a [u8],
    /// Set by the device to the verification outcome
    pub verified: &'a mut bool,
    /// Verification key
    pub key: &'a dyn EccKey,
}

/// Symmetric cipher operations.
#[derive(Debug)]
pub enum CipherInfo<'a> {
    /// AES-GCM encryption
    AesGcmEncrypt(AesGcmEncryptInfo<'a>),
    /// AES-GCM decryption
    AesGcmDecrypt(AesGcmDecryptInfo<'a>),
    /// AES-CBC encryption or decryption
    AesCbc(AesCbcInfo<'a>),
}

impl CipherInfo<'_> {
    /// Cipher kind.
    pub fn cipher_type(&self) -> CipherType {
        match self {
            CipherInfo::AesGcmEncrypt(_) | CipherInfo::AesGcmDecrypt(_) => CipherType::AesGcm,
            CipherInfo::AesCbc(_) => CipherType::AesCbc,
        }
    }

    /// Direction of the operation.
    pub fn direction(&self) -> Direction {
        match self {
            CipherInfo::AesGcmEncrypt(_) => Direction::Encrypt,
            CipherInfo::AesGcmDecrypt(_) => Direction::Decrypt,
            CipherInfo::AesCbc(cbc) => cbc.direction,
        }
    }
}

/// AES-GCM encryption.
#[derive(Debug)]
pub struct AesGcmEncryptInfo<'a> {
    /// Cipher state holding the key
    pub aes: &'a mut dyn AesCipher,
    /// Ciphertext output
    pub output: &'a mut [u8],
    /// Plaintext input
    pub input: &'a [u8],
    /// Initialization vector
    pub iv: &'a [u8],
    /// Authentication tag output; its length is the requested tag size
    pub auth_tag: &'a mut [u8],
    /// Additional authenticated data
    pub aad: &'a [u8],
}

/// AES-GCM decryption.
#[derive(Debug)]
pub struct AesGcmDecryptInfo<'a> {
    /// Cipher state holding the key
    pub aes: &'a mut dyn AesCipher,
    /// Plaintext output
    pub output: &'a mut [u8],
    /// Ciphertext input
    pub input: &'a [u8],
    /// Initialization vector
    pub iv: &'a [u8],
    /// Authentication tag to check
    pub auth_tag: &'a [u8],
    /// Additional authenticated data
    pub aad: &'a [u8],
}

/// AES-CBC encryption or decryption.
#[derive(Debug)]
pub struct AesCbcInfo<'a> {
    /// Cipher state holding the key and chaining IV
    pub aes: &'a mut dyn AesCipher,
    /// Output buffer
    pub output: &'a mut [u8],
    /// Input data, a whole number of blocks
    pub input: &'a [u8],
    /// Encrypt or decrypt
    pub direction: Direction,
}

/// Hash operations.
///
/// A call carries either data to absorb (`digest` is `None`) or a digest
/// buffer to produce (`input` is empty), matching how the hash primitives
/// split update and finalization.
#[derive(Debug)]
pub enum HashInfo<'a> {
    /// SHA-1
    Sha(ShaInfo<'a>),
    /// SHA-256
    Sha256(Sha256Info<'a>),
}

impl HashInfo<'_> {
    /// Hash kind.
    pub fn hash_type(&self) -> HashType {
        match self {
            HashInfo::Sha(_) => HashType::Sha,
            HashInfo::Sha256(_) => HashType::Sha256,
        }
    }
}

/// SHA-1 update or finalization.
#[derive(Debug)]
pub struct ShaInfo<'a> {
    /// Running hash state
    pub sha: &'a mut dyn ShaState,
    /// Data to absorb
    pub input: &'a [u8],
    /// Digest output, present on finalization
    pub digest: Option<&'a mut [u8; SHA_DIGEST_SIZE]>,
}

/// SHA-256 update or finalization.
#[derive(Debug)]
pub struct Sha256Info<'a> {
    /// Running hash state
    pub sha256: &'a mut dyn Sha256State,
    /// Data to absorb
    pub input: &'a [u8],
    /// Digest output, present on finalization
    pub digest: Option<&'a mut [u8; SHA256_DIGEST_SIZE]>,
}

/// Random block generation.
#[derive(Debug)]
pub struct RngInfo<'a> {
    /// RNG state
    pub rng: &'a mut dyn RngState,
    /// Buffer to fill
    pub output: &'a mut [u8],
}
