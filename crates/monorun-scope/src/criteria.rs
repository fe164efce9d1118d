use serde::{Deserialize, Serialize};

/// What to select: projects declaring `target`, taken either from the whole
/// graph (`all`) or from `projects`, minus whatever `exclude` names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionCriteria {
    pub target: String,
    /// Start from every project in the graph. Takes precedence over
    /// `projects`, which is then ignored.
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl SelectionCriteria {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_all(mut self) -> Self {
        self.all = true;
        self
    }

    pub fn with_projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects.extend(projects.into_iter().map(Into::into));
        self
    }

    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }
}
