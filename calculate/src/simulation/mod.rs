use std::path::Path;

use eyre::{eyre, Result};
use rand::Rng;

use crate::{
    address::{ObjectId, SUI_ADDRESS_LENGTH},
    builder::{BuildArtifact, PackageBuilder},
    changes::{BalanceChange, ObjectChange},
};

mod rpc;

pub use rpc::*;

pub fn random_object_id() -> ObjectId {
    let mut rng = rand::thread_rng();
    let mut buf = [0u8; SUI_ADDRESS_LENGTH];
    rng.fill(&mut buf);
    buf.into()
}

/// Identifier of a system package such as `0x1` or `0x2`
pub fn framework_id(last_byte: u8) -> ObjectId {
    let mut buf = [0u8; SUI_ADDRESS_LENGTH];
    buf[SUI_ADDRESS_LENGTH - 1] = last_byte;
    buf.into()
}

pub fn fake_artifact() -> BuildArtifact {
    BuildArtifact {
        modules: vec!["oRzrCwYAAAAKAQAIAggQAxgiBDoEBT4wB24=".into()],
        dependencies: vec![framework_id(1), framework_id(2)],
    }
}

pub fn fake_gas_change(amount: i64) -> BalanceChange {
    BalanceChange {
        owner: serde_json::Value::Null,
        coin_type: "0x2::sui::SUI".into(),
        amount: amount.to_string(),
    }
}

/// `published` record followed by one `created` record per type tag, identifiers are random
pub fn fake_publish_changes(
    package_id: ObjectId,
    object_types: &[String],
) -> (Vec<ObjectChange>, Vec<ObjectId>) {
    let mut changes = vec![ObjectChange::published(package_id, "fake-package-digest")];
    let ids = object_types
        .iter()
        .map(|object_type| {
            let id = random_object_id();
            changes.push(ObjectChange::created(object_type.clone(), id));
            id
        })
        .collect();
    (changes, ids)
}

/// Builder returning a prepared artifact, or failing as a broken toolchain would
#[derive(Clone, Default)]
pub struct FakeBuilder {
    pub artifact: Option<BuildArtifact>,
}

impl FakeBuilder {
    pub fn new(artifact: BuildArtifact) -> Self {
        FakeBuilder {
            artifact: Some(artifact),
        }
    }
}

impl PackageBuilder for FakeBuilder {
    fn build(&self, contract_path: &Path) -> Result<BuildArtifact> {
        self.artifact
            .clone()
            .ok_or(eyre!("fake build failure: {}", contract_path.display()))
    }
}
