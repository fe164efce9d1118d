//! The workspace project graph.
//!
//! The graph is built elsewhere (from workspace configuration on disk) and
//! handed to consumers as an immutable snapshot. This crate only owns the
//! data model, its validation, and loading a serialized graph.

mod builder;
mod project;

use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use builder::{Error, ProjectGraphBuilder};
pub use project::{
    DependencyEdge, DependencyType, ProjectData, ProjectRecord, ProjectType, TargetConfiguration,
};

/// All projects of a workspace keyed by name, plus their dependency edges.
///
/// Node order is the order projects were added (or appeared in the
/// serialized graph) and is what consumers iterate in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectGraph {
    nodes: IndexMap<String, ProjectRecord>,
    dependencies: IndexMap<String, Vec<DependencyEdge>>,
}

// Mirrors the serialized shape so that node keys can be checked against the
// records they hold before anything is trusted.
#[derive(Debug, Deserialize)]
struct RawProjectGraph {
    #[serde(default)]
    nodes: IndexMap<String, ProjectRecord>,
    #[serde(default)]
    dependencies: IndexMap<String, Vec<DependencyEdge>>,
}

impl ProjectGraph {
    pub fn builder() -> ProjectGraphBuilder {
        ProjectGraphBuilder::new()
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let raw: RawProjectGraph = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let raw: RawProjectGraph = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawProjectGraph) -> Result<Self, Error> {
        for (key, record) in &raw.nodes {
            if key != &record.name {
                return Err(Error::NameMismatch {
                    key: key.clone(),
                    name: record.name.clone(),
                });
            }
        }
        for (key, edges) in &raw.dependencies {
            if let Some(edge) = edges.iter().find(|edge| &edge.source != key) {
                return Err(Error::MisplacedDependency {
                    key: key.clone(),
                    source_project: edge.source.clone(),
                    target_project: edge.target.clone(),
                });
            }
        }

        ProjectGraphBuilder::new()
            .with_projects(raw.nodes.into_values())
            .with_dependencies(raw.dependencies.into_values().flatten())
            .build()
    }

    /// Number of projects in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn project(&self, name: &str) -> Option<&ProjectRecord> {
        self.nodes.get(name)
    }

    pub fn projects(&self) -> impl Iterator<Item = (&str, &ProjectRecord)> {
        self.nodes.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// The direct dependency edges leaving `name`. Unknown projects and
    /// projects without dependencies both yield an empty slice.
    pub fn dependencies(&self, name: &str) -> &[DependencyEdge] {
        self.dependencies
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn two_project_json() -> serde_json::Value {
        json!({
            "nodes": {
                "proj1": {
                    "name": "proj1",
                    "type": "lib",
                    "data": { "root": "proj1", "targets": { "build": {}, "test": {} } }
                },
                "proj2": {
                    "name": "proj2",
                    "type": "lib",
                    "data": { "root": "proj2", "targets": { "test": {} } }
                }
            },
            "dependencies": {
                "proj1": [{ "source": "proj1", "target": "proj2", "type": "static" }]
            }
        })
    }

    #[test]
    fn loads_serialized_graph() {
        let graph = ProjectGraph::from_json_str(&two_project_json().to_string()).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.project_names().collect::<Vec<_>>(), vec!["proj1", "proj2"]);
        assert!(graph.project("proj1").unwrap().has_target("build"));
        assert!(!graph.project("proj2").unwrap().has_target("build"));
        assert_eq!(graph.dependencies("proj1")[0].target, "proj2");
        assert!(graph.dependencies("nope").is_empty());
    }

    #[test]
    fn loads_from_reader() {
        let raw = two_project_json().to_string();
        let graph = ProjectGraph::from_reader(raw.as_bytes()).unwrap();
        assert!(graph.contains("proj2"));
    }

    #[test]
    fn rejects_key_name_mismatch() {
        let raw = json!({
            "nodes": { "proj1": { "name": "other", "type": "lib" } }
        });
        let err = ProjectGraph::from_json_str(&raw.to_string()).unwrap_err();
        assert!(matches!(err, Error::NameMismatch { key, name } if key == "proj1" && name == "other"));
    }

    #[test]
    fn rejects_misplaced_dependency() {
        let mut raw = two_project_json();
        raw["dependencies"] = json!({
            "proj2": [{ "source": "proj1", "target": "proj2" }]
        });
        let err = ProjectGraph::from_json_str(&raw.to_string()).unwrap_err();
        assert!(matches!(err, Error::MisplacedDependency { key, .. } if key == "proj2"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ProjectGraph::from_json_str("{ nodes: ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn empty_graph() {
        let graph = ProjectGraph::from_json_str("{}").unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph, ProjectGraph::default());
    }
}
