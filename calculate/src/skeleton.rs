use base64::{engine::general_purpose::STANDARD, Engine};
use eyre::{eyre, Result};

use crate::{
    address::SuiAddress,
    changes::TransactionBlockResponse,
    keypair::transaction_signing_digest,
    rpc::{ExecuteTransactionRequestType, TransactionBlockResponseOptions, RPC},
};

/// TransactionSkeleton for building a Sui transaction
#[derive(Default, Clone, Debug)]
pub struct TransactionSkeleton {
    pub sender: Option<SuiAddress>,
    /// BCS serialized `TransactionData`
    pub tx_bytes: Vec<u8>,
    /// Base64 serialized signatures, one per required signer
    pub signatures: Vec<String>,
}

impl TransactionSkeleton {
    pub fn sender(&mut self, sender: SuiAddress) -> &mut Self {
        self.sender = Some(sender);
        self
    }

    /// Replace transaction data, which invalidates every collected signature
    pub fn tx_bytes(&mut self, tx_bytes: Vec<u8>) -> &mut Self {
        self.tx_bytes = tx_bytes;
        self.signatures.clear();
        self
    }

    pub fn tx_bytes_from_base64(&mut self, encoded: &str) -> Result<&mut Self> {
        let tx_bytes = STANDARD
            .decode(encoded)
            .map_err(|e| eyre!("invalid transaction bytes: {e}"))?;
        Ok(self.tx_bytes(tx_bytes))
    }

    pub fn signature(&mut self, signature: String) -> &mut Self {
        self.signatures.push(signature);
        self
    }

    /// Digest that each signer has to sign
    pub fn signing_digest(&self) -> Result<[u8; 32]> {
        if self.tx_bytes.is_empty() {
            return Err(eyre!("transaction data not built"));
        }
        Ok(transaction_signing_digest(&self.tx_bytes))
    }

    /// Submit the signed transaction and wait until the node has executed it locally
    pub async fn send_and_wait<T: RPC>(
        self,
        rpc: &T,
        options: TransactionBlockResponseOptions,
    ) -> Result<TransactionBlockResponse> {
        if self.tx_bytes.is_empty() {
            return Err(eyre!("transaction data not built"));
        }
        if self.signatures.is_empty() {
            return Err(eyre!("transaction not signed"));
        }
        rpc.execute_transaction_block(
            STANDARD.encode(&self.tx_bytes),
            self.signatures,
            options,
            ExecuteTransactionRequestType::WaitForLocalExecution,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::FakeRpcClient;

    #[tokio::test]
    async fn unsigned_transaction_is_not_submitted() {
        let rpc = FakeRpcClient::default();
        let mut skeleton = TransactionSkeleton::default();
        assert!(skeleton.signing_digest().is_err());
        skeleton.tx_bytes(vec![1, 2, 3]);
        let err = skeleton
            .send_and_wait(&rpc, TransactionBlockResponseOptions::full_changes())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "transaction not signed");
    }

    #[test]
    fn new_tx_bytes_drop_stale_signatures() {
        let mut skeleton = TransactionSkeleton::default();
        skeleton.tx_bytes(vec![1]).signature("sig".into());
        skeleton.tx_bytes(vec![2]);
        assert!(skeleton.signatures.is_empty());
    }
}
