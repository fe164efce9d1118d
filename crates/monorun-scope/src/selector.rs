//! Classification of the entries of a project or exclude list.

use std::fmt;

use crate::glob::{SimpleGlob, WILDCARD};

/// An entry of `projects` or `exclude`. Whether an entry is a pattern only
/// depends on whether it contains a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSelector<'a> {
    /// Looked up directly. Missing projects are skipped without an error.
    Exact(&'a str),
    /// Expanded against every project name, and has to match at least one.
    Pattern(&'a str),
}

pub fn is_pattern(entry: &str) -> bool {
    entry.contains(WILDCARD)
}

impl<'a> ProjectSelector<'a> {
    pub fn classify(entry: &'a str) -> Self {
        if is_pattern(entry) {
            ProjectSelector::Pattern(entry)
        } else {
            ProjectSelector::Exact(entry)
        }
    }

    pub fn raw(&self) -> &'a str {
        match self {
            ProjectSelector::Exact(raw) | ProjectSelector::Pattern(raw) => raw,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, ProjectSelector::Pattern(_))
    }

    pub fn to_glob(&self) -> SimpleGlob {
        SimpleGlob::new(self.raw())
    }
}

impl<'a> From<&'a str> for ProjectSelector<'a> {
    fn from(entry: &'a str) -> Self {
        Self::classify(entry)
    }
}

impl fmt::Display for ProjectSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}
