use std::{
    fs,
    path::{Path, PathBuf},
};

use cooler_deployer_calculator::{
    changes::{spent_fee, ObjectChange, TransactionBlockResponse},
    re_exports::eyre,
    rpc::{Network, RpcClient},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::object::DeployedObjects;

pub const DEPLOYED_OBJECTS_FILE: &str = "deployed_objects.json";
pub const OBJECT_CHANGES_FILE: &str = "object_change.json";

pub fn create_rpc_from_network(network: &Network) -> eyre::Result<RpcClient> {
    RpcClient::new_with_network(network)
}

pub fn deployed_objects_path(deployment_path: &Path) -> PathBuf {
    deployment_path.join(DEPLOYED_OBJECTS_FILE)
}

pub fn object_changes_path(deployment_path: &Path) -> PathBuf {
    deployment_path.join(OBJECT_CHANGES_FILE)
}

/// Validate the publish response, fill the manifest and persist it next to the raw changes
///
/// Nothing is written unless every expected object has been found.
pub fn record_deployment(
    response: &TransactionBlockResponse,
    deployment_path: &Path,
) -> eyre::Result<DeployedObjects> {
    let balance_changes = response.balance_changes()?;
    let object_changes = response.object_changes()?;
    debug!("object changes: {object_changes:#?}");
    info!("Spent {} on deploy", spent_fee(balance_changes)?);
    let deployed = DeployedObjects::from_object_changes(object_changes)?;
    save_deployment(deployment_path, &deployed, object_changes)?;
    Ok(deployed)
}

pub fn save_deployment(
    deployment_path: &Path,
    deployed: &DeployedObjects,
    object_changes: &[ObjectChange],
) -> eyre::Result<()> {
    let manifest = to_indented_json(deployed)?;
    let changes = to_indented_json(&object_changes)?;
    fs::create_dir_all(deployment_path)?;
    // manifest last, its presence marks a completed run
    fs::write(object_changes_path(deployment_path), changes)?;
    let manifest_path = deployed_objects_path(deployment_path);
    fs::write(&manifest_path, manifest)?;
    info!("Deployment recorded in {}", manifest_path.display());
    Ok(())
}

pub fn load_deployed_objects(deployment_path: &Path) -> eyre::Result<DeployedObjects> {
    let file = fs::File::open(deployed_objects_path(deployment_path))?;
    Ok(serde_json::from_reader(file)?)
}

fn to_indented_json<T: Serialize>(value: &T) -> eyre::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
