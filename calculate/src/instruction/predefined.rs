use crate::{
    builder::BuildArtifact,
    instruction::Instruction,
    keypair::Keypair,
    operation::{AddEd25519Signature, PublishPackage},
    rpc::RPC,
};

/// Publish a package as upgradeable, the `UpgradeCap` goes to the signer
///
/// # Parameters
/// - `signer`: The keypair who sends, pays for and signs the transaction
/// - `artifact`: Compiled modules and their dependencies
/// - `gas_budget`: The maximum fee in MIST
pub fn publish_upgradeable<T: RPC>(
    signer: &Keypair,
    artifact: BuildArtifact,
    gas_budget: u64,
) -> Instruction<T> {
    Instruction::new(vec![
        Box::new(PublishPackage {
            sender: signer.address(),
            artifact,
            gas: None,
            gas_budget,
        }),
        Box::new(AddEd25519Signature {
            keypair: signer.clone(),
        }),
    ])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::{engine::general_purpose::STANDARD, Engine};

    use super::*;
    use crate::{
        instruction::TransactionCalculator,
        keypair::transaction_signing_digest,
        rpc::TransactionBlockBytes,
        simulation::{fake_artifact, FakeRpcClient, FnUnsafePublish},
    };

    #[tokio::test]
    async fn publish_is_built_for_and_signed_by_signer() {
        let signer = Keypair::from_secret_bytes([3u8; 32]);
        let expected_sender = signer.address();
        let tx_bytes = STANDARD.encode(b"publish tx data");
        let encoded = tx_bytes.clone();
        let unsafe_publish: FnUnsafePublish =
            Box::new(move |sender, modules, dependencies, gas, gas_budget| {
                assert_eq!(sender, expected_sender);
                assert_eq!(modules.len(), 1);
                assert_eq!(dependencies.len(), 2);
                assert!(gas.is_none());
                assert_eq!(gas_budget, 100_000_000);
                TransactionBlockBytes {
                    tx_bytes: encoded.clone(),
                    ..Default::default()
                }
            });
        let rpc = FakeRpcClient {
            method_unsafe_publish: Some(Arc::new(unsafe_publish)),
            ..Default::default()
        };
        let mut calculator = TransactionCalculator::default();
        calculator.instruction(publish_upgradeable(&signer, fake_artifact(), 100_000_000));
        let skeleton = calculator.new_skeleton(&rpc).await.unwrap();

        assert_eq!(skeleton.sender, Some(signer.address()));
        assert_eq!(skeleton.tx_bytes, b"publish tx data");
        assert_eq!(skeleton.signatures.len(), 1);
        assert_eq!(
            skeleton.signing_digest().unwrap(),
            transaction_signing_digest(b"publish tx data")
        );
        assert_eq!(
            skeleton.signatures[0],
            signer.sign_transaction(b"publish tx data")
        );
    }

    #[tokio::test]
    async fn empty_package_is_not_published() {
        let signer = Keypair::from_secret_bytes([3u8; 32]);
        let rpc = FakeRpcClient::default();
        let mut calculator = TransactionCalculator::default();
        calculator.instruction(publish_upgradeable(
            &signer,
            BuildArtifact::default(),
            100_000_000,
        ));
        assert!(calculator.new_skeleton(&rpc).await.is_err());
    }
}
