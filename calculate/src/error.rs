use thiserror::Error;

pub const SEED_PHRASE_ENV: &str = "SEED_PHRASE";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY_USER_1";

/// Failures while resolving the signing identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{SEED_PHRASE_ENV} not set as env variable.")]
    MissingSeedPhrase,
    #[error("{0}")]
    InvalidMnemonic(String),
    #[error("{PRIVATE_KEY_ENV} not set as env variable.")]
    MissingPrivateKey,
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

impl CredentialError {
    /// Remediation for the failure modes an operator can fix without reading the message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CredentialError::MissingSeedPhrase => Some(
                "Please set up the mnemonic as SEED_PHRASE in the .env file, or export it in your shell, to start deploying.",
            ),
            _ => None,
        }
    }
}

/// Failures while reading the results of the publish transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    #[error("Balance Changes was undefined")]
    MissingBalanceChanges,
    #[error("Object Changes was undefined")]
    MissingObjectChanges,
    #[error("Did not find correct published change")]
    MissingPublishedChange,
    #[error("Could not find {0} object")]
    MissingObject(&'static str),
    #[error("invalid balance change amount: {0}")]
    InvalidAmount(String),
}
