use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eyre::{eyre, Error};
use jsonrpc_core::futures::FutureExt;
use jsonrpc_core::response::Output;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{
    address::{ObjectId, SuiAddress},
    changes::TransactionBlockResponse,
};

pub type Rpc<T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'static>>;

pub const MAINNET_RPC_URL: &str = "https://fullnode.mainnet.sui.io:443";
pub const TESTNET_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";
pub const DEVNET_RPC_URL: &str = "https://fullnode.devnet.sui.io:443";
pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:9000";

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
    Custom(Url),
}

impl Network {
    pub fn url(&self) -> &str {
        match self {
            Network::Mainnet => MAINNET_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
            Network::Devnet => DEVNET_RPC_URL,
            Network::Localnet => LOCALNET_RPC_URL,
            Network::Custom(url) => url.as_str(),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Devnet => write!(f, "devnet"),
            Network::Localnet => write!(f, "localnet"),
            Network::Custom(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for Network {
    type Err = eyre::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "localnet" => Ok(Network::Localnet),
            _ => Ok(Network::Custom(
                value
                    .parse()
                    .map_err(|_| eyre!("invalid network or url: {value}"))?,
            )),
        }
    }
}

/// Unsigned transaction returned by the transaction builder API of a fullnode
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockBytes {
    /// BCS serialized `TransactionData`, base64 encoded
    pub tx_bytes: String,
    #[serde(default)]
    pub gas: serde_json::Value,
    #[serde(default)]
    pub input_objects: serde_json::Value,
}

/// Which parts of the execution result the node should include
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponseOptions {
    pub show_input: bool,
    pub show_raw_input: bool,
    pub show_effects: bool,
    pub show_events: bool,
    pub show_object_changes: bool,
    pub show_balance_changes: bool,
}

impl TransactionBlockResponseOptions {
    /// Effects, events and every object and balance change, without echoing the input back
    pub fn full_changes() -> Self {
        TransactionBlockResponseOptions {
            show_input: false,
            show_raw_input: false,
            show_effects: true,
            show_events: true,
            show_object_changes: true,
            show_balance_changes: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecuteTransactionRequestType {
    WaitForEffectsCert,
    #[default]
    WaitForLocalExecution,
}

macro_rules! jsonrpc {
    ($method:expr, $self:ident, $return:ty$(, $params:ident$(,)?)*) => {{
        let id = $self.id.fetch_add(1, Ordering::Relaxed);
        let params = serde_json::to_value(($($params,)*));
        let c = $self.raw.post($self.uri.clone());
        async move {
            let req_json = serde_json::json!({
                "id": id,
                "jsonrpc": "2.0",
                "method": $method,
                "params": params?,
            });
            let resp = c
                .json(&req_json)
                .send()
                .await
                .map_err::<Error, _>(|e| eyre!("bad sui request url: {e}"))?;
            let output = resp
                .json::<Output>()
                .await
                .map_err::<Error, _>(|_| eyre!("failed to parse json response"))?;

            match output {
                Output::Success(success) => {
                    Ok::<$return, Error>(serde_json::from_value::<$return>(success.result)?)
                }
                Output::Failure(failure) => {
                    Err(eyre!("{} failed: {}", $method, failure.error.message))
                }
            }
        }
    }}
}

#[allow(clippy::upper_case_acronyms)]
pub trait RPC: Clone + Send + Sync {
    fn url(&self) -> String;
    /// Build a transaction that publishes `modules` and transfers the `UpgradeCap` to `sender`
    fn unsafe_publish(
        &self,
        sender: SuiAddress,
        modules: Vec<String>,
        dependencies: Vec<ObjectId>,
        gas: Option<ObjectId>,
        gas_budget: u64,
    ) -> Rpc<TransactionBlockBytes>;
    fn execute_transaction_block(
        &self,
        tx_bytes: String,
        signatures: Vec<String>,
        options: TransactionBlockResponseOptions,
        request_type: ExecuteTransactionRequestType,
    ) -> Rpc<TransactionBlockResponse>;
}

#[derive(Clone)]
pub struct RpcClient {
    raw: Client,
    uri: Url,
    id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(uri: &str) -> eyre::Result<Self> {
        let uri = Url::parse(uri).map_err(|e| eyre!("invalid sui rpc url {uri}: {e}"))?;
        Ok(RpcClient {
            raw: Client::new(),
            uri,
            id: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn new_with_network(network: &Network) -> eyre::Result<Self> {
        RpcClient::new(network.url())
    }
}

impl RPC for RpcClient {
    fn url(&self) -> String {
        self.uri.to_string()
    }

    fn unsafe_publish(
        &self,
        sender: SuiAddress,
        modules: Vec<String>,
        dependencies: Vec<ObjectId>,
        gas: Option<ObjectId>,
        gas_budget: u64,
    ) -> Rpc<TransactionBlockBytes> {
        // BigInt<u64> travels as a decimal string
        let gas_budget = gas_budget.to_string();
        jsonrpc!(
            "unsafe_publish",
            self,
            TransactionBlockBytes,
            sender,
            modules,
            dependencies,
            gas,
            gas_budget,
        )
        .boxed()
    }

    fn execute_transaction_block(
        &self,
        tx_bytes: String,
        signatures: Vec<String>,
        options: TransactionBlockResponseOptions,
        request_type: ExecuteTransactionRequestType,
    ) -> Rpc<TransactionBlockResponse> {
        jsonrpc!(
            "sui_executeTransactionBlock",
            self,
            TransactionBlockResponse,
            tx_bytes,
            signatures,
            options,
            request_type,
        )
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_names_and_urls() {
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("mainnet".parse::<Network>().unwrap().url(), MAINNET_RPC_URL);
        let custom: Network = "http://localhost:9123".parse().unwrap();
        assert_eq!(custom.url(), "http://localhost:9123/");
        assert!("not a network".parse::<Network>().is_err());
    }

    #[test]
    fn response_options_use_node_field_names() {
        let value = serde_json::to_value(TransactionBlockResponseOptions::full_changes()).unwrap();
        assert_eq!(value["showBalanceChanges"], true);
        assert_eq!(value["showObjectChanges"], true);
        assert_eq!(value["showRawInput"], false);
        assert_eq!(
            serde_json::to_value(ExecuteTransactionRequestType::default()).unwrap(),
            "WaitForLocalExecution"
        );
    }
}
