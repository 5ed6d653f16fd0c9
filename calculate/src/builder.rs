use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};

use crate::address::ObjectId;

/// Compiled Move package ready to be published
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BuildArtifact {
    /// Base64 encoded bytecode of every module
    pub modules: Vec<String>,
    /// Packages the modules link against
    pub dependencies: Vec<ObjectId>,
}

impl BuildArtifact {
    pub fn from_build_output(stdout: &str) -> Result<Self> {
        serde_json::from_str(stdout.trim())
            .map_err(|e| eyre!("failed to parse build output as json: {e}"))
    }
}

/// Anything that can turn a contract source directory into publishable bytecode
pub trait PackageBuilder {
    fn build(&self, contract_path: &Path) -> Result<BuildArtifact>;
}

/// Builder backed by the `sui` command line tool
///
/// note: this requires the Sui CLI to be installed, refer to https://docs.sui.io/guides/developer/getting-started/sui-install
pub struct SuiMoveBuilder {
    pub sui_bin: PathBuf,
}

impl SuiMoveBuilder {
    pub fn new(sui_bin: impl Into<PathBuf>) -> Self {
        SuiMoveBuilder {
            sui_bin: sui_bin.into(),
        }
    }
}

impl PackageBuilder for SuiMoveBuilder {
    fn build(&self, contract_path: &Path) -> Result<BuildArtifact> {
        let contract_path = contract_path
            .to_str()
            .ok_or(eyre!("contract path is not valid utf-8"))?;
        tracing::debug!(sui = %self.sui_bin.display(), contract_path, "building move package");
        let output = Command::new(&self.sui_bin)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .stdout(Stdio::piped())
            .args(["move", "build"])
            .arg("--dump-bytecode-as-base64")
            .args(["--path", contract_path])
            .output()
            .map_err(|e| eyre!("failed to run {}: {e}", self.sui_bin.display()))?;
        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(eyre!("sui move build error: {}", error.trim()));
        }
        let stdout = String::from_utf8(output.stdout)?;
        BuildArtifact::from_build_output(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compiler_json() {
        let stdout = r#"
            {"modules":["oRzrCwYAAAAK","oRzrCwYAAAAL"],"dependencies":["0x1","0x2"],"digest":[1,2,3]}
        "#;
        let artifact = BuildArtifact::from_build_output(stdout).unwrap();
        assert_eq!(artifact.modules.len(), 2);
        assert_eq!(artifact.dependencies[1], "0x2".parse().unwrap());
    }

    #[test]
    fn rejects_non_json_output() {
        assert!(BuildArtifact::from_build_output("BUILDING cooler").is_err());
    }

    #[test]
    fn missing_binary_is_an_error() {
        let builder = SuiMoveBuilder::new("/nonexistent/sui-binary");
        assert!(builder.build(Path::new("sources")).is_err());
    }
}
