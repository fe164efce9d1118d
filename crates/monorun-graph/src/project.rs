use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of buildable unit a project represents. Selection never looks at
/// this, it only travels with the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[serde(alias = "application")]
    App,
    #[default]
    #[serde(alias = "library")]
    Lib,
    E2e,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectType::App => "app",
            ProjectType::Lib => "lib",
            ProjectType::E2e => "e2e",
        })
    }
}

/// Target definitions are opaque to everything in this workspace, so they
/// are kept as raw JSON.
pub type TargetConfiguration = serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub targets: IndexMap<String, TargetConfiguration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A single node of the project graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub data: ProjectData,
}

impl ProjectRecord {
    pub fn new(name: impl Into<String>, project_type: ProjectType) -> Self {
        let name = name.into();
        Self {
            data: ProjectData {
                root: name.clone(),
                ..Default::default()
            },
            name,
            project_type,
        }
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.data.root = root.into();
        self
    }

    /// Declares `target` with an empty configuration.
    pub fn with_target(self, target: impl Into<String>) -> Self {
        self.with_target_configuration(target, TargetConfiguration::Object(Default::default()))
    }

    pub fn with_target_configuration(
        mut self,
        target: impl Into<String>,
        configuration: TargetConfiguration,
    ) -> Self {
        self.data.targets.insert(target.into(), configuration);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn root(&self) -> &str {
        &self.data.root
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.data.targets.keys().map(String::as_str)
    }

    pub fn has_target(&self, target: &str) -> bool {
        self.data.targets.contains_key(target)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    #[default]
    Static,
    Dynamic,
    Implicit,
}

/// A directed edge `source -> target` meaning `source` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub dependency_type: DependencyType,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            dependency_type: DependencyType::default(),
        }
    }

    pub fn with_type(mut self, dependency_type: DependencyType) -> Self {
        self.dependency_type = dependency_type;
        self
    }
}
