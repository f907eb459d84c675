// crates/sman-core/src/tags.rs - Tag Expression Evaluator
//
// EXPRESSION FORMAT:
//   group1,group2,...     a snippet matches if it matches ANY group
//   tag1+tag2+...         a snippet matches a group if it has ALL its tags
//
// '+' binds tighter than ',', so "docker+prod,k8s" reads as
// (docker AND prod) OR k8s. Tags compare exactly and case-sensitively.
//
// An empty expression selects nothing. Callers that want "no filter" must
// skip the evaluator themselves (search does).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::snippet::Snippet;

/// Separator between alternative groups (OR)
pub const GROUP_SEPARATOR: &str = ",";

/// Separator between tags of one group (AND)
pub const TAG_SEPARATOR: &str = "+";

/// A parsed OR-of-ANDs tag expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagExpression {
    groups: Vec<Vec<String>>,
}

impl TagExpression {
    /// Parse an expression; parsing never fails
    ///
    /// Empty tag literals (from "a+" or ",b") are kept as-is and simply never
    /// match a real tag.
    pub fn parse(expression: &str) -> Self {
        if expression.is_empty() {
            return Self::default();
        }

        let groups = expression
            .split(GROUP_SEPARATOR)
            .map(|group| group.split(TAG_SEPARATOR).map(str::to_string).collect())
            .collect();

        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Whether a tag set satisfies at least one group
    pub fn matches(&self, tags: &[String]) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|tag| tags.contains(tag)))
    }

    /// Whether a snippet's tags satisfy the expression
    pub fn matches_snippet(&self, snippet: &Snippet) -> bool {
        self.matches(&snippet.tags)
    }

    /// Keep the matching snippets, in their original order
    ///
    /// Each snippet appears at most once even when it satisfies several
    /// groups. An empty expression keeps nothing.
    pub fn filter(&self, snippets: &[Snippet]) -> Vec<Snippet> {
        snippets
            .iter()
            .filter(|snippet| self.matches_snippet(snippet))
            .cloned()
            .collect()
    }
}

impl FromStr for TagExpression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .groups
            .iter()
            .map(|group| group.join(TAG_SEPARATOR))
            .collect();
        write!(f, "{}", groups.join(GROUP_SEPARATOR))
    }
}

/// Parse `expression` and keep the snippets matching it
///
/// Same as [`TagExpression::filter`]; an empty expression returns an empty
/// vector.
pub fn filter_by_tag(snippets: &[Snippet], expression: &str) -> Vec<Snippet> {
    TagExpression::parse(expression).filter(snippets)
}
