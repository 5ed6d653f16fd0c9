use std::{fmt::Debug, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine};
use bip39::Mnemonic;
use blake2::{digest::consts::U32, Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::{address::SuiAddress, error::CredentialError};

type Blake2b256 = Blake2b<U32>;
type HmacSha512 = Hmac<Sha512>;

/// Signature scheme flag of Ed25519 in Sui serialized keys and signatures
pub const ED25519_FLAG: u8 = 0x00;
/// Intent prefix (scope TransactionData, version V0, app Sui)
pub const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];
/// `m/44'/784'/0'/0'/0'`, every level hardened
pub const SUI_DERIVATION_PATH: [u32; 5] = [44, 784, 0, 0, 0];

const HARDENED_OFFSET: u32 = 0x8000_0000;
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";
const SECRET_KEY_LENGTH: usize = 32;

/// Which configured secret the signing identity is derived from
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum KeySource {
    #[default]
    SeedPhrase,
    PrivateKey,
}

impl FromStr for KeySource {
    type Err = eyre::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "seed" | "seed-phrase" => Ok(KeySource::SeedPhrase),
            "private-key" => Ok(KeySource::PrivateKey),
            _ => Err(eyre::eyre!("invalid key source, options are `seed` or `private-key`")),
        }
    }
}

/// Secrets the credential provider may pick from, normally filled from environment
#[derive(Clone, Default)]
pub struct KeyConfig {
    pub seed_phrase: Option<String>,
    pub private_key: Option<String>,
}

impl KeyConfig {
    /// Resolve the signing identity from the secret selected by `source`
    pub fn keypair(&self, source: KeySource) -> Result<Keypair, CredentialError> {
        match source {
            KeySource::SeedPhrase => {
                let phrase =
                    non_blank(&self.seed_phrase).ok_or(CredentialError::MissingSeedPhrase)?;
                Keypair::from_mnemonic(phrase)
            }
            KeySource::PrivateKey => {
                let encoded =
                    non_blank(&self.private_key).ok_or(CredentialError::MissingPrivateKey)?;
                Keypair::from_base64_private_key(encoded)
            }
        }
    }
}

impl Debug for KeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyConfig")
            .field("seed_phrase", &self.seed_phrase.as_ref().map(|_| "<redacted>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Ed25519 signing identity of a Sui account
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    pub fn from_secret_bytes(secret: [u8; SECRET_KEY_LENGTH]) -> Self {
        Keypair {
            signing_key: SigningKey::from_bytes(&secret),
        }
    }

    /// Derive the account key from a BIP-39 mnemonic along the default Sui path
    pub fn from_mnemonic(phrase: &str) -> Result<Self, CredentialError> {
        let mnemonic = Mnemonic::parse_normalized(phrase)
            .map_err(|e| CredentialError::InvalidMnemonic(format!("invalid mnemonic: {e}")))?;
        let seed = mnemonic.to_seed_normalized("");
        let secret = derive_slip10_ed25519(&seed, &SUI_DERIVATION_PATH)?;
        Ok(Keypair::from_secret_bytes(secret))
    }

    /// Reconstruct the key from base64(`flag || secret`), the flag byte is discarded
    pub fn from_base64_private_key(encoded: &str) -> Result<Self, CredentialError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CredentialError::InvalidPrivateKey(e.to_string()))?;
        let secret: [u8; SECRET_KEY_LENGTH] = bytes
            .get(1..)
            .and_then(|v| v.try_into().ok())
            .ok_or_else(|| {
                CredentialError::InvalidPrivateKey(format!(
                    "expected {} bytes after the scheme flag, got {}",
                    SECRET_KEY_LENGTH,
                    bytes.len().saturating_sub(1)
                ))
            })?;
        Ok(Keypair::from_secret_bytes(secret))
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn address(&self) -> SuiAddress {
        let mut hasher = Blake2b256::new();
        hasher.update([ED25519_FLAG]);
        hasher.update(self.public_key_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        digest.into()
    }

    /// Sign BCS transaction bytes, returning the base64 serialized signature `flag || sig || pubkey`
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let digest = transaction_signing_digest(tx_bytes);
        let signature = self.signing_key.sign(&digest);
        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key_bytes());
        STANDARD.encode(serialized)
    }
}

impl Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address().to_string())
            .finish()
    }
}

pub fn transaction_signing_digest(tx_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(TRANSACTION_INTENT);
    hasher.update(tx_bytes);
    hasher.finalize().into()
}

/// SLIP-10 private key derivation for ed25519, which only defines hardened children
pub fn derive_slip10_ed25519(
    seed: &[u8],
    path: &[u32],
) -> Result<[u8; SECRET_KEY_LENGTH], CredentialError> {
    let (mut key, mut chain_code) = hmac_halves(ED25519_SEED_KEY, &[seed])?;
    for index in path {
        let hardened = (index | HARDENED_OFFSET).to_be_bytes();
        (key, chain_code) = hmac_halves(&chain_code, &[&[0u8][..], &key[..], &hardened[..]])?;
    }
    Ok(key)
}

fn hmac_halves(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32]), CredentialError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| CredentialError::InvalidMnemonic(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let output = mac.finalize().into_bytes();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    Ok((left, right))
}
