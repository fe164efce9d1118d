//! Project selection for monorun.
//!
//! Given a project graph and a target, this crate decides which projects a
//! command should run against, based on:
//! - every project declaring the target (`all`)
//! - explicit project names
//! - `*` name patterns
//! - exclusions, with the same name and pattern rules
//!
//! Selection is a pure function of its inputs. It never touches the disk
//! and never mutates the graph.

mod criteria;
pub mod glob;
mod resolve;
pub mod selector;

pub use criteria::SelectionCriteria;
pub use glob::{match_names, SimpleGlob};
use monorun_graph::{ProjectGraph, ProjectRecord};
pub use resolve::{ProjectResolver, ScopeError};
pub use selector::{is_pattern, ProjectSelector};

/// Select the projects of `graph` that `criteria` asks for.
///
/// # Errors
/// Fails with [`ScopeError::UnmatchedPattern`] when a pattern in either
/// `projects` or `exclude` doesn't match any project in the graph. Exact
/// names that aren't in the graph are skipped instead.
#[tracing::instrument(skip(graph), fields(graph_size = graph.len()))]
pub fn select_projects<'a>(
    criteria: &SelectionCriteria,
    graph: &'a ProjectGraph,
) -> Result<Vec<&'a ProjectRecord>, ScopeError> {
    ProjectResolver::new(graph).resolve(criteria)
}
