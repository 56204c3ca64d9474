//! Classifier types.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The closed set of classifier collections exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierType {
    Intents,
    Entities,
    Prebuilts,
}

impl ClassifierType {
    pub const ALL: [ClassifierType; 3] = [
        ClassifierType::Intents,
        ClassifierType::Entities,
        ClassifierType::Prebuilts,
    ];

    /// Collection resource, relative to the application.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierType::Intents => "intents",
            ClassifierType::Entities => "entities",
            ClassifierType::Prebuilts => "prebuilts",
        }
    }

    /// Resource of a single classifier inside the collection.
    pub fn item_resource(&self, id: &str) -> String {
        format!("{}/{}", self.as_str(), id)
    }

    /// Whether new classifiers of this type can be created remotely.
    ///
    /// The creation payload for prebuilts is not `{Name, children}` and has
    /// not been worked out yet.
    pub fn supports_add(&self) -> bool {
        match self {
            ClassifierType::Intents | ClassifierType::Entities => true,
            ClassifierType::Prebuilts => false,
        }
    }

    /// Whether a listed classifier must survive a `remove_all`.
    pub fn is_protected(&self, classifier: &Classifier) -> bool {
        match self {
            ClassifierType::Intents => classifier.name == NONE_INTENT,
            ClassifierType::Entities | ClassifierType::Prebuilts => false,
        }
    }
}

/// Name of the default intent every application must keep.
pub const NONE_INTENT: &str = "None";

/// Parse a type name, rejecting anything outside the closed set.
pub fn validate_type(value: &str) -> Result<ClassifierType> {
    value.parse()
}

impl FromStr for ClassifierType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "intents" => Ok(ClassifierType::Intents),
            "entities" => Ok(ClassifierType::Entities),
            "prebuilts" => Ok(ClassifierType::Prebuilts),
            other => Err(Error::InvalidClassifierType(other.to_string())),
        }
    }
}

impl fmt::Display for ClassifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A classifier record as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    #[serde(rename = "ID", deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Empty when the service omits the name or reports `null`.
    #[serde(rename = "Name", default, deserialize_with = "name_or_empty")]
    pub name: String,
    /// Any other fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Classifier {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Input {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Input::deserialize(deserializer)? {
        Input::Text(s) => s,
        Input::Number(n) => n.to_string(),
    })
}

fn name_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of clearing one classifier collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    /// IDs deleted, in deletion order.
    pub deleted: Vec<String>,
    /// IDs left in place because they are protected.
    pub preserved: Vec<String>,
}
