use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{address::ObjectId, error::DeployError};

/// Fixed-point divisor between MIST and SUI
pub const MIST_PER_SUI: f64 = 1_000_000_000.0;

/// Discriminant of an object change record
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Published,
    Transferred,
    Mutated,
    Deleted,
    Wrapped,
    Created,
}

/// One object effect of an executed transaction
///
/// Only the fields used for lookups are typed, everything else the node returns is kept in
/// `extra` so that the record can be written back without loss.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObjectChange {
    pub fn created(object_type: impl Into<String>, object_id: ObjectId) -> Self {
        ObjectChange {
            kind: ChangeKind::Created,
            object_type: Some(object_type.into()),
            object_id: Some(object_id),
            package_id: None,
            digest: None,
            extra: Map::new(),
        }
    }

    pub fn published(package_id: ObjectId, digest: impl Into<String>) -> Self {
        ObjectChange {
            kind: ChangeKind::Published,
            object_type: None,
            object_id: None,
            package_id: Some(package_id),
            digest: Some(digest.into()),
            extra: Map::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    #[serde(default)]
    pub owner: Value,
    pub coin_type: String,
    /// Signed amount in MIST, encoded as a decimal string
    pub amount: String,
}

/// Subset of `SuiTransactionBlockResponse` this tool reads
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_changes: Option<Vec<ObjectChange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_changes: Option<Vec<BalanceChange>>,
}

impl TransactionBlockResponse {
    pub fn object_changes(&self) -> Result<&[ObjectChange], DeployError> {
        self.object_changes
            .as_deref()
            .ok_or(DeployError::MissingObjectChanges)
    }

    pub fn balance_changes(&self) -> Result<&[BalanceChange], DeployError> {
        self.balance_changes
            .as_deref()
            .filter(|changes| !changes.is_empty())
            .ok_or(DeployError::MissingBalanceChanges)
    }
}

/// First `published` record of the change list
pub fn find_published(changes: &[ObjectChange]) -> Result<&ObjectChange, DeployError> {
    changes
        .iter()
        .find(|change| change.kind == ChangeKind::Published && change.package_id.is_some())
        .ok_or(DeployError::MissingPublishedChange)
}

/// Identifier of the first `created` record whose type tag equals `object_type` exactly
pub fn find_one_by_type(changes: &[ObjectChange], object_type: &str) -> Option<ObjectId> {
    changes
        .iter()
        .find(|change| {
            change.kind == ChangeKind::Created && change.object_type.as_deref() == Some(object_type)
        })
        .and_then(|change| change.object_id)
}

/// Convert a MIST amount string into SUI
pub fn parse_amount(amount: &str) -> Result<f64, DeployError> {
    let mist: i128 = amount
        .trim()
        .parse()
        .map_err(|_| DeployError::InvalidAmount(amount.to_string()))?;
    Ok(mist as f64 / MIST_PER_SUI)
}

/// Gas paid by the sender, read from the first balance change
pub fn spent_fee(balance_changes: &[BalanceChange]) -> Result<f64, DeployError> {
    let first = balance_changes
        .first()
        .ok_or(DeployError::MissingBalanceChanges)?;
    Ok(parse_amount(&first.amount)?.abs())
}
