use cooler_deployer_calculator::{
    address::ObjectId,
    changes::{find_one_by_type, find_published, ObjectChange},
    error::DeployError,
};
use serde::{Deserialize, Serialize};

/// Address of the Sui framework package as it appears in type tags
pub const SUI_FRAMEWORK: &str = "0x2";

pub fn package_type(package_id: &ObjectId, module: &str, name: &str) -> String {
    format!("{package_id}::{module}::{name}")
}

pub fn framework_type(module: &str, name: &str, type_param: Option<&str>) -> String {
    match type_param {
        Some(param) => format!("{SUI_FRAMEWORK}::{module}::{name}<{param}>"),
        None => format!("{SUI_FRAMEWORK}::{module}::{name}"),
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CoolerFactoryObjects {
    pub cooler_factory: String,
    pub factory_owner_cap: String,
    pub factory_settings: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageObjects {
    pub image_publisher: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MintObjects {
    pub mint_publisher: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterObjects {
    pub register_publisher: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WaterCoolerObjects {
    pub water_cooler_publisher: String,
    pub policy_cap: String,
    pub policy: String,
}

/// Deployment manifest consumed by the follow-up scripts
///
/// `image`, `mint` and `register` publishers are not distinguishable in the publish effects, they
/// stay empty until whoever owns the manifest schema decides how to fill them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeployedObjects {
    #[serde(rename = "packageId")]
    pub package_id: String,
    pub digest: String,
    pub cooler_factory: CoolerFactoryObjects,
    pub image: ImageObjects,
    pub mint: MintObjects,
    pub register: RegisterObjects,
    pub water_cooler: WaterCoolerObjects,
}

/// Created object the manifest requires, together with the field it lands in
pub struct ExpectedObject {
    pub name: &'static str,
    pub object_type: String,
    slot: fn(&mut DeployedObjects) -> &mut String,
}

/// Objects created by the package initializers, in lookup order
pub fn expected_objects(package_id: &ObjectId) -> Vec<ExpectedObject> {
    let rinoco = package_type(package_id, "rinoco", "Rinoco");
    vec![
        ExpectedObject {
            name: "cooler_factory",
            object_type: package_type(package_id, "cooler_factory", "CoolerFactory"),
            slot: |d| &mut d.cooler_factory.cooler_factory,
        },
        // struct name as declared on-chain
        ExpectedObject {
            name: "factory_setting",
            object_type: package_type(package_id, "factory_settings", "FactorySetings"),
            slot: |d| &mut d.cooler_factory.factory_settings,
        },
        ExpectedObject {
            name: "cooler_factory_cap",
            object_type: package_type(package_id, "cooler_factory", "FactoryOwnerCap"),
            slot: |d| &mut d.cooler_factory.factory_owner_cap,
        },
        ExpectedObject {
            name: "policy",
            object_type: framework_type("transfer_policy", "TransferPolicy", Some(&rinoco)),
            slot: |d| &mut d.water_cooler.policy,
        },
        ExpectedObject {
            name: "policy_cap",
            object_type: framework_type("transfer_policy", "TransferPolicyCap", Some(&rinoco)),
            slot: |d| &mut d.water_cooler.policy_cap,
        },
        ExpectedObject {
            name: "water_cooler_publisher",
            object_type: framework_type("package", "Publisher", None),
            slot: |d| &mut d.water_cooler.water_cooler_publisher,
        },
    ]
}

impl DeployedObjects {
    /// Manifest with every object placeholder still empty
    pub fn new(package_id: &ObjectId, digest: &str) -> Self {
        DeployedObjects {
            package_id: package_id.to_string(),
            digest: digest.to_string(),
            ..Default::default()
        }
    }

    /// Fill the manifest from the change list of the publish transaction
    ///
    /// Every expected object must be found, the first `created` record of a type wins.
    pub fn from_object_changes(changes: &[ObjectChange]) -> Result<Self, DeployError> {
        let published = find_published(changes)?;
        let package_id = published
            .package_id
            .ok_or(DeployError::MissingPublishedChange)?;
        let mut deployed =
            DeployedObjects::new(&package_id, published.digest.as_deref().unwrap_or_default());
        for expected in expected_objects(&package_id) {
            let object_id = find_one_by_type(changes, &expected.object_type)
                .ok_or(DeployError::MissingObject(expected.name))?;
            *(expected.slot)(&mut deployed) = object_id.to_string();
        }
        Ok(deployed)
    }
}
