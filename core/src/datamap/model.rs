use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One data-processing activity as declared upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RawPrivacyDeclaration {
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default)]
    pub data_subjects: Vec<String>,
    #[serde(default)]
    pub data_use: String,
    #[serde(default)]
    pub name: String,
}

/// A system record in the upstream catalog format. `id` is not guaranteed unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RawSystem {
    #[serde(rename = "fides_key", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub privacy_declarations: Vec<RawPrivacyDeclaration>,
    #[serde(rename = "system_dependencies", alias = "dependency_ids", default)]
    pub dependency_ids: Vec<String>,
    #[serde(default)]
    pub system_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SystemType {
    Application,
    Service,
    Database,
    Integration,
    Unknown(String),
}

impl SystemType {
    /// Display order of the known types; `Unknown` has no slot.
    pub const KNOWN_ORDER: [SystemType; 4] = [
        SystemType::Application,
        SystemType::Service,
        SystemType::Database,
        SystemType::Integration,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SystemType::Application => "Application",
            SystemType::Service => "Service",
            SystemType::Database => "Database",
            SystemType::Integration => "Integration",
            SystemType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SystemType::Unknown(_))
    }
}

impl From<&str> for SystemType {
    fn from(raw: &str) -> Self {
        match raw {
            "Application" => SystemType::Application,
            "Service" => SystemType::Service,
            "Database" => SystemType::Database,
            "Integration" => SystemType::Integration,
            other => SystemType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SystemType {
    fn from(raw: String) -> Self {
        SystemType::from(raw.as_str())
    }
}

impl From<SystemType> for String {
    fn from(t: SystemType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceType {
    Derived,
    Provided,
}

impl DataSourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSourceType::Derived => "derived",
            DataSourceType::Provided => "provided",
        }
    }
}

impl FromStr for DataSourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "derived" => Ok(DataSourceType::Derived),
            "provided" => Ok(DataSourceType::Provided),
            other => Err(CoreError::InvalidInput(format!(
                "unknown data source type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    SystemType,
    DataUse,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::SystemType => "system_type",
            LayoutMode::DataUse => "data_use",
        }
    }
}

impl FromStr for LayoutMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "system_type" => Ok(LayoutMode::SystemType),
            "data_use" => Ok(LayoutMode::DataUse),
            other => Err(CoreError::InvalidInput(format!(
                "unknown layout mode: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivacyDeclaration {
    pub name: String,
    /// Simplified (leaf) categories, one per raw path, not deduplicated.
    pub data_categories: Vec<String>,
    pub data_subjects: Vec<String>,
    pub data_use: String,
}

/// Canonical system produced by the normalizer. Set-valued fields are sorted and deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedSystem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub system_type: SystemType,
    pub data_categories: Vec<String>,
    pub full_data_categories: Vec<String>,
    pub derived_categories: Vec<String>,
    pub provided_categories: Vec<String>,
    pub data_uses: Vec<String>,
    pub privacy_declarations: Vec<PrivacyDeclaration>,
    pub dependencies: Vec<String>,
}

impl ParsedSystem {
    /// Distinct data subjects across declarations, in first-seen order.
    pub fn data_subjects(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.privacy_declarations
            .iter()
            .flat_map(|d| d.data_subjects.iter())
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect()
    }

    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemGroup {
    pub group_key: String,
    pub group_label: String,
    pub systems: Vec<ParsedSystem>,
}
