use indexmap::{map::Entry, IndexMap};
use tracing::debug;

use crate::{DependencyEdge, ProjectGraph, ProjectRecord};

#[derive(Debug, Default)]
pub struct ProjectGraphBuilder {
    projects: Vec<ProjectRecord>,
    dependencies: Vec<DependencyEdge>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("project graph node \"{key}\" holds a record named \"{name}\"")]
    NameMismatch { key: String, name: String },
    #[error("project names must not be empty")]
    EmptyName,
    #[error("project \"{0}\" was added to the graph more than once")]
    DuplicateProject(String),
    #[error("dependency {source_project} -> {target_project} references unknown project \"{unknown}\"")]
    UnknownDependency {
        source_project: String,
        target_project: String,
        unknown: String,
    },
    #[error("dependency {source_project} -> {target_project} is listed under \"{key}\"")]
    MisplacedDependency {
        key: String,
        source_project: String,
        target_project: String,
    },
    #[error("unable to read project graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse project graph: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProjectGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: ProjectRecord) -> Self {
        self.projects.push(project);
        self
    }

    pub fn with_projects(mut self, projects: impl IntoIterator<Item = ProjectRecord>) -> Self {
        self.projects.extend(projects);
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyEdge) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_dependencies(
        mut self,
        dependencies: impl IntoIterator<Item = DependencyEdge>,
    ) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    #[tracing::instrument(skip(self), fields(projects = self.projects.len()))]
    pub fn build(self) -> Result<ProjectGraph, Error> {
        let mut nodes = IndexMap::with_capacity(self.projects.len());
        for project in self.projects {
            if project.name.is_empty() {
                return Err(Error::EmptyName);
            }
            match nodes.entry(project.name.clone()) {
                Entry::Occupied(entry) => {
                    return Err(Error::DuplicateProject(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(project);
                }
            }
        }

        let mut dependencies: IndexMap<String, Vec<DependencyEdge>> = IndexMap::new();
        for edge in self.dependencies {
            for end in [&edge.source, &edge.target] {
                if !nodes.contains_key(end) {
                    return Err(Error::UnknownDependency {
                        source_project: edge.source.clone(),
                        target_project: edge.target.clone(),
                        unknown: end.clone(),
                    });
                }
            }
            dependencies
                .entry(edge.source.clone())
                .or_default()
                .push(edge);
        }

        debug!(
            "built project graph with {} projects and {} dependency lists",
            nodes.len(),
            dependencies.len()
        );

        Ok(ProjectGraph {
            nodes,
            dependencies,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ProjectType;

    #[test]
    fn rejects_duplicates() {
        let result = ProjectGraphBuilder::new()
            .with_project(ProjectRecord::new("a", ProjectType::Lib))
            .with_project(ProjectRecord::new("a", ProjectType::App))
            .build();
        assert!(matches!(result, Err(Error::DuplicateProject(name)) if name == "a"));
    }

    #[test]
    fn rejects_empty_name() {
        let result = ProjectGraphBuilder::new()
            .with_project(ProjectRecord::new("", ProjectType::Lib))
            .build();
        assert!(matches!(result, Err(Error::EmptyName)));
    }

    #[test]
    fn rejects_dangling_dependency() {
        let result = ProjectGraphBuilder::new()
            .with_project(ProjectRecord::new("a", ProjectType::Lib))
            .with_dependency(DependencyEdge::new("a", "missing"))
            .build();
        assert!(matches!(
            result,
            Err(Error::UnknownDependency { unknown, .. }) if unknown == "missing"
        ));
    }

    #[test]
    fn groups_dependencies_by_source() {
        let graph = ProjectGraphBuilder::new()
            .with_projects(["a", "b", "c"].map(|name| ProjectRecord::new(name, ProjectType::Lib)))
            .with_dependencies([
                DependencyEdge::new("a", "b"),
                DependencyEdge::new("a", "c"),
                DependencyEdge::new("b", "c"),
            ])
            .build()
            .unwrap();

        let a_deps = graph
            .dependencies("a")
            .iter()
            .map(|edge| edge.target.as_str())
            .collect::<Vec<_>>();
        assert_eq!(a_deps, vec!["b", "c"]);
        assert_eq!(graph.dependencies("b").len(), 1);
        assert!(graph.dependencies("c").is_empty());
    }
}
