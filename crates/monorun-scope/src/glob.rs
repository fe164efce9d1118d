//! Simple glob matching for project names.
//!
//! Only `*` is special. It matches any run of characters, including an
//! empty one, and a pattern always has to match the whole name.

use indexmap::IndexSet;

pub const WILDCARD: char = '*';

/// A compiled name pattern. Compiling splits the pattern into its literal
/// segments once, so matching a name is a handful of string comparisons and
/// never backtracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleGlob {
    Any,
    Exact(String),
    Pattern {
        prefix: String,
        // literals between two wildcards, in order, never empty
        infixes: Vec<String>,
        suffix: String,
        // the shortest name that can possibly match
        min_len: usize,
    },
}

pub trait Match {
    fn is_match(&self, s: &str) -> bool;
}

impl SimpleGlob {
    pub fn new(pattern: &str) -> Self {
        if !pattern.contains(WILDCARD) {
            return SimpleGlob::Exact(pattern.to_string());
        }
        if pattern.chars().all(|c| c == WILDCARD) {
            return SimpleGlob::Any;
        }

        let mut segments = pattern.split(WILDCARD);
        // a pattern with at least one wildcard always splits into >= 2 pieces
        let prefix = segments.next().unwrap_or_default().to_string();
        let mut rest = segments.map(str::to_string).collect::<Vec<_>>();
        let suffix = rest.pop().unwrap_or_default();
        let infixes = rest
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();
        let min_len = prefix.len() + suffix.len() + infixes.iter().map(String::len).sum::<usize>();

        SimpleGlob::Pattern {
            prefix,
            infixes,
            suffix,
            min_len,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl Match for SimpleGlob {
    fn is_match(&self, s: &str) -> bool {
        match self {
            SimpleGlob::Any => true,
            SimpleGlob::Exact(exact) => exact == s,
            SimpleGlob::Pattern {
                prefix,
                infixes,
                suffix,
                min_len,
            } => {
                if s.len() < *min_len
                    || !s.starts_with(prefix.as_str())
                    || !s.ends_with(suffix.as_str())
                {
                    return false;
                }
                // prefix and suffix can't overlap thanks to the length check,
                // so the infixes have to be found in what lies between them
                let mut middle = &s[prefix.len()..s.len() - suffix.len()];
                for infix in infixes {
                    match middle.find(infix.as_str()) {
                        Some(idx) => middle = &middle[idx + infix.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

/// Returns the names out of `names` that `pattern` matches, in the order
/// they were provided. No match is not an error here, callers decide.
pub fn match_names<'a, I>(names: I, pattern: &str) -> IndexSet<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = SimpleGlob::new(pattern);
    names
        .into_iter()
        .filter(|name| matcher.is_match(name))
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("proj*", "proj1", true ; "prefix")]
    #[test_case("proj*", "proj", true ; "star matches empty run")]
    #[test_case("proj*", "myproj1", false ; "anchored at start")]
    #[test_case("*-e2e", "web-e2e", true ; "suffix")]
    #[test_case("*-e2e", "web-e2e-utils", false ; "anchored at end")]
    #[test_case("*ui*", "shared-ui-kit", true ; "substring")]
    #[test_case("*ui*", "ui", true ; "substring is whole name")]
    #[test_case("a*b*c", "abc", true ; "infix with empty runs")]
    #[test_case("a*b*c", "axxbyyc", true ; "infix with runs")]
    #[test_case("a*b*c", "acb", false ; "infix out of order")]
    #[test_case("ab*ba", "aba", false ; "prefix and suffix cannot overlap")]
    #[test_case("a**b", "ab", true ; "consecutive stars collapse")]
    #[test_case("*", "anything", true ; "lone star")]
    #[test_case("**", "", true ; "stars match the empty name")]
    #[test_case("proj1", "proj1", true ; "exact")]
    #[test_case("proj1", "proj10", false ; "exact is not a prefix")]
    #[test_case("proj?", "proj1", false ; "question mark is literal")]
    #[test_case("proj?", "proj?", true ; "question mark matches itself")]
    #[test_case("@scope/*", "@scope/ui", true ; "scoped names")]
    fn glob_matching(pattern: &str, name: &str, expected: bool) {
        assert_eq!(SimpleGlob::new(pattern).is_match(name), expected);
    }

    #[test]
    fn compiles_to_the_cheapest_variant() {
        assert_eq!(SimpleGlob::new("*"), SimpleGlob::Any);
        assert_eq!(SimpleGlob::new("web"), SimpleGlob::Exact("web".to_string()));
        assert!(SimpleGlob::new("web").is_exact());
        assert_eq!(
            SimpleGlob::new("a*bc**d*e"),
            SimpleGlob::Pattern {
                prefix: "a".to_string(),
                infixes: vec!["bc".to_string(), "d".to_string()],
                suffix: "e".to_string(),
                min_len: 5,
            }
        );
    }

    #[test]
    fn match_names_keeps_input_order() {
        let names = ["proj2", "other", "proj10", "proj1"];
        let matched = match_names(names, "proj*");
        assert_eq!(
            matched.into_iter().collect::<Vec<_>>(),
            vec!["proj2", "proj10", "proj1"]
        );
    }

    #[test]
    fn match_names_empty_result_is_not_an_error() {
        assert!(match_names(["proj1", "proj2"], "nomatch*").is_empty());
    }
}
