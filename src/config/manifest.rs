//! Desired-state manifest loading.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_MANIFEST: &str = include_str!("../../config/desired.yaml");

/// Ordered classifier names per type. Duplicates are passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    #[serde(default)]
    pub intents: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    /// Listed for completeness; prebuilts cannot be created remotely.
    #[serde(default)]
    pub prebuilts: Vec<String>,
}

impl DesiredState {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_yaml_str(&content)
    }

    /// The manifest shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_MANIFEST)
    }
}
