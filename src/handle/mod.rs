use std::path::Path;

use cooler_deployer_calculator::{
    builder::{PackageBuilder, SuiMoveBuilder},
    instruction::{predefined::publish_upgradeable, TransactionCalculator},
    keypair::{KeyConfig, KeySource, Keypair},
    re_exports::eyre,
    rpc::{Network, TransactionBlockResponseOptions, RPC},
};
use tracing::info;

use crate::object::DeployedObjects;

mod helper;
pub use helper::*;

/// Compile the package, publish it from `signer` and record the created objects
pub async fn publish_package<T: RPC, B: PackageBuilder>(
    rpc: &T,
    builder: &B,
    signer: &Keypair,
    contract_path: &Path,
    deployment_path: &Path,
    gas_budget: u64,
) -> eyre::Result<DeployedObjects> {
    let artifact = builder.build(contract_path)?;
    info!("Deploying contracts...");
    info!("Deploying from {}", signer.address());
    let mut calculator = TransactionCalculator::default();
    calculator.instruction(publish_upgradeable(signer, artifact, gas_budget));
    let skeleton = calculator.new_skeleton(rpc).await?;
    let response = skeleton
        .send_and_wait(rpc, TransactionBlockResponseOptions::full_changes())
        .await?;
    info!("Transaction digest: {}", response.digest);
    record_deployment(&response, deployment_path)
}

/// Publish the package found under `contract_path` to `network`
pub async fn deploy_package(
    network: String,
    key_source: KeySource,
    keys: KeyConfig,
    contract_path: String,
    deployment_path: String,
    sui_bin: String,
    gas_budget: u64,
) -> eyre::Result<()> {
    let signer = keys.keypair(key_source)?;
    let network: Network = network.parse()?;
    let rpc = create_rpc_from_network(&network)?;
    info!("Publishing to {network} via {}", rpc.url());
    let builder = SuiMoveBuilder::new(sui_bin);
    let deployed = publish_package(
        &rpc,
        &builder,
        &signer,
        Path::new(&contract_path),
        Path::new(&deployment_path),
        gas_budget,
    )
    .await?;
    println!("Package ID: {}", deployed.package_id);
    Ok(())
}

/// Print the address that would sign and pay for a deployment
pub fn show_address(key_source: KeySource, keys: KeyConfig) -> eyre::Result<()> {
    let signer = keys.keypair(key_source)?;
    println!("{}", signer.address());
    Ok(())
}

#[cfg(test)]
mod tests {
    use cooler_deployer_calculator::{
        changes::TransactionBlockResponse,
        error::CredentialError,
        re_exports::base64::{engine::general_purpose::STANDARD, Engine},
        simulation::{
            fake_artifact, fake_gas_change, fake_publish_changes, random_object_id, FakeBuilder,
            FakeRpcClient,
        },
    };

    use super::*;
    use crate::object::expected_objects;

    fn fake_node(drop_last_object: bool) -> (FakeRpcClient, Vec<String>) {
        let package_id = random_object_id();
        let types: Vec<_> = expected_objects(&package_id)
            .into_iter()
            .map(|expected| expected.object_type)
            .collect();
        let (mut changes, ids) = fake_publish_changes(package_id, &types);
        if drop_last_object {
            changes.pop();
        }
        let response = TransactionBlockResponse {
            digest: "fake-tx-digest".into(),
            object_changes: Some(changes),
            balance_changes: Some(vec![fake_gas_change(-2_500_000_000)]),
            ..Default::default()
        };
        let rpc = FakeRpcClient::with_response(&STANDARD.encode(b"tx"), response);
        (rpc, ids.iter().map(ToString::to_string).collect())
    }

    #[tokio::test]
    async fn publish_records_created_objects() {
        let dir = tempfile::tempdir().unwrap();
        let (rpc, ids) = fake_node(false);
        let signer = Keypair::from_secret_bytes([5u8; 32]);
        let deployed = publish_package(
            &rpc,
            &FakeBuilder::new(fake_artifact()),
            &signer,
            Path::new("sources"),
            dir.path(),
            500_000_000,
        )
        .await
        .unwrap();
        assert_eq!(deployed.cooler_factory.cooler_factory, ids[0]);
        assert_eq!(deployed.water_cooler.water_cooler_publisher, ids[5]);
        assert_eq!(load_deployed_objects(dir.path()).unwrap(), deployed);
    }

    #[tokio::test]
    async fn failed_build_stops_before_submission() {
        let dir = tempfile::tempdir().unwrap();
        // an unconfigured fake node panics if it is ever called
        let rpc = FakeRpcClient::default();
        let signer = Keypair::from_secret_bytes([5u8; 32]);
        let result = publish_package(
            &rpc,
            &FakeBuilder::default(),
            &signer,
            Path::new("sources"),
            dir.path(),
            500_000_000,
        )
        .await;
        assert!(result.is_err());
        assert!(!deployed_objects_path(dir.path()).exists());
    }

    #[tokio::test]
    async fn incomplete_effects_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (rpc, _) = fake_node(true);
        let signer = Keypair::from_secret_bytes([5u8; 32]);
        let err = publish_package(
            &rpc,
            &FakeBuilder::new(fake_artifact()),
            &signer,
            Path::new("sources"),
            dir.path(),
            500_000_000,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Could not find water_cooler_publisher object");
        assert!(!deployed_objects_path(dir.path()).exists());
        assert!(!object_changes_path(dir.path()).exists());
    }

    #[tokio::test]
    async fn missing_credentials_abort_deployment() {
        let dir = tempfile::tempdir().unwrap();
        let err = deploy_package(
            "testnet".into(),
            KeySource::SeedPhrase,
            KeyConfig::default(),
            "sources".into(),
            dir.path().to_string_lossy().into_owned(),
            "sui".into(),
            500_000_000,
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CredentialError>(),
            Some(&CredentialError::MissingSeedPhrase)
        );
    }
}
