use std::{fmt::Display, str::FromStr};

use eyre::eyre;
use serde::{Deserialize, Serialize};

pub const SUI_ADDRESS_LENGTH: usize = 32;

/// 32-byte Sui account address, also used as the identifier of on-chain objects and packages
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SuiAddress([u8; SUI_ADDRESS_LENGTH]);

pub type ObjectId = SuiAddress;

impl SuiAddress {
    pub const fn new(bytes: [u8; SUI_ADDRESS_LENGTH]) -> Self {
        SuiAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SUI_ADDRESS_LENGTH] {
        &self.0
    }
}

impl From<[u8; SUI_ADDRESS_LENGTH]> for SuiAddress {
    fn from(value: [u8; SUI_ADDRESS_LENGTH]) -> Self {
        SuiAddress(value)
    }
}

impl From<SuiAddress> for [u8; SUI_ADDRESS_LENGTH] {
    fn from(value: SuiAddress) -> Self {
        value.0
    }
}

impl FromStr for SuiAddress {
    type Err = eyre::Error;

    /// Accepts both the full form and the short form (e.g. `0x2`) by left-padding with zeros
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex_str = value.trim_start_matches("0x");
        if hex_str.is_empty() || hex_str.len() > SUI_ADDRESS_LENGTH * 2 {
            return Err(eyre!("invalid sui address length: {value}"));
        }
        let padded = format!("{hex_str:0>64}");
        let bytes = hex::decode(padded).map_err(|_| eyre!("invalid hex string: {value}"))?;
        let mut inner = [0u8; SUI_ADDRESS_LENGTH];
        inner.copy_from_slice(&bytes);
        Ok(SuiAddress(inner))
    }
}

impl Display for SuiAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_is_left_padded() {
        let address: SuiAddress = "0x2".parse().unwrap();
        assert_eq!(
            address.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn rejects_oversized_and_non_hex_input() {
        assert!(format!("0x{}", "1".repeat(65)).parse::<SuiAddress>().is_err());
        assert!("0xzz".parse::<SuiAddress>().is_err());
        assert!("0x".parse::<SuiAddress>().is_err());
    }

    #[test]
    fn serializes_as_prefixed_hex_string() {
        let address = SuiAddress::new([0xab; SUI_ADDRESS_LENGTH]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(32)));
        let back: SuiAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
