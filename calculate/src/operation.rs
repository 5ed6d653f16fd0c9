use async_trait::async_trait;
use eyre::{eyre, Result};

use crate::{
    address::{ObjectId, SuiAddress},
    builder::BuildArtifact,
    keypair::Keypair,
    rpc::RPC,
    skeleton::TransactionSkeleton,
};

#[async_trait]
pub trait Operation<T: RPC> {
    async fn run(self: Box<Self>, rpc: &T, skeleton: &mut TransactionSkeleton) -> Result<()>;
}

/// Operation that builds transaction data publishing a package and handing its `UpgradeCap` to the sender
///
/// `gas`: Option<ObjectId>, the coin to pay gas with, if None, the node picks one owned by sender
/// `gas_budget`: u64, upper bound of the fee in MIST
pub struct PublishPackage {
    pub sender: SuiAddress,
    pub artifact: BuildArtifact,
    pub gas: Option<ObjectId>,
    pub gas_budget: u64,
}

#[async_trait]
impl<T: RPC> Operation<T> for PublishPackage {
    async fn run(self: Box<Self>, rpc: &T, skeleton: &mut TransactionSkeleton) -> Result<()> {
        if self.artifact.modules.is_empty() {
            return Err(eyre!("no modules to publish"));
        }
        let tx = rpc
            .unsafe_publish(
                self.sender,
                self.artifact.modules,
                self.artifact.dependencies,
                self.gas,
                self.gas_budget,
            )
            .await?;
        skeleton
            .sender(self.sender)
            .tx_bytes_from_base64(&tx.tx_bytes)?;
        Ok(())
    }
}

/// Operation that signs the transaction data with an Ed25519 keypair
pub struct AddEd25519Signature {
    pub keypair: Keypair,
}

#[async_trait]
impl<T: RPC> Operation<T> for AddEd25519Signature {
    async fn run(self: Box<Self>, _: &T, skeleton: &mut TransactionSkeleton) -> Result<()> {
        if skeleton.tx_bytes.is_empty() {
            return Err(eyre!("transaction data not built"));
        }
        if let Some(sender) = skeleton.sender {
            if sender != self.keypair.address() {
                return Err(eyre!("signer is not the transaction sender"));
            }
        }
        let signature = self.keypair.sign_transaction(&skeleton.tx_bytes);
        skeleton.signature(signature);
        Ok(())
    }
}
