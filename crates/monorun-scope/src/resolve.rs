//! Resolution of selection criteria against a project graph.

use indexmap::{IndexMap, IndexSet};
use miette::Diagnostic;
use monorun_graph::{ProjectGraph, ProjectRecord};
use tracing::debug;

use crate::{
    criteria::SelectionCriteria,
    glob::Match,
    selector::ProjectSelector,
};

/// Errors that can occur while selecting projects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ScopeError {
    #[error("No projects matched the pattern '{0}'")]
    #[diagnostic(
        code(unmatched_pattern),
        help("patterns containing `*` have to match at least one project in the workspace")
    )]
    UnmatchedPattern(String),
}

/// Resolves selection criteria into the projects of one graph.
///
/// The resolver only ever reads the graph, so one resolver (or one graph
/// shared between several) can be used from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ProjectResolver<'a> {
    graph: &'a ProjectGraph,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(graph: &'a ProjectGraph) -> Self {
        Self { graph }
    }

    /// Selects the projects matching `criteria`. The result only holds
    /// projects declaring `criteria.target`, each at most once, in the order
    /// they were first selected.
    ///
    /// It applies the following rules:
    /// - `all` selects every project in graph order and ignores `projects`
    /// - otherwise every entry of `projects` is resolved in order, see
    ///   [`ProjectResolver::resolve_names`]
    /// - projects without the target are dropped
    /// - everything `exclude` resolves to is dropped last
    pub fn resolve(
        &self,
        criteria: &SelectionCriteria,
    ) -> Result<Vec<&'a ProjectRecord>, ScopeError> {
        let candidates: IndexMap<&'a str, &'a ProjectRecord> = if criteria.all {
            self.graph.projects().collect()
        } else {
            self.resolve_names(&criteria.projects)?
                .into_iter()
                .filter_map(|name| self.graph.project(name).map(|record| (name, record)))
                .collect()
        };
        debug!("{} candidate projects before filtering", candidates.len());

        // resolved even when nothing is left to exclude from, so that a bad
        // exclude pattern is always reported
        let excluded = if criteria.exclude.is_empty() {
            IndexSet::new()
        } else {
            self.resolve_names(&criteria.exclude)?
        };

        let selected = candidates
            .into_iter()
            .filter(|(_, record)| record.has_target(&criteria.target))
            .filter(|(name, _)| !excluded.contains(name))
            .map(|(_, record)| record)
            .collect::<Vec<_>>();

        debug!(
            "selected {} projects for target '{}' ({} excluded by name)",
            selected.len(),
            criteria.target,
            excluded.len()
        );

        Ok(selected)
    }

    /// Resolves a list of exact names and patterns into project names.
    ///
    /// Exact names that aren't in the graph are skipped. A pattern that
    /// matches no project at all fails the whole resolution.
    pub fn resolve_names(&self, entries: &[String]) -> Result<IndexSet<&'a str>, ScopeError> {
        let mut resolved = IndexSet::new();

        for entry in entries {
            match ProjectSelector::classify(entry) {
                ProjectSelector::Exact(name) => match self.graph.project(name) {
                    Some(record) => {
                        resolved.insert(record.name.as_str());
                    }
                    None => debug!("skipping '{}', no project has that name", name),
                },
                selector @ ProjectSelector::Pattern(pattern) => {
                    let matcher = selector.to_glob();
                    let before = resolved.len();
                    let mut matched_any = false;
                    for name in self.graph.project_names() {
                        if matcher.is_match(name) {
                            matched_any = true;
                            resolved.insert(name);
                        }
                    }
                    if !matched_any {
                        return Err(ScopeError::UnmatchedPattern(pattern.to_string()));
                    }
                    debug!(
                        "pattern '{}' added {} projects",
                        pattern,
                        resolved.len() - before
                    );
                }
            }
        }

        Ok(resolved)
    }
}
