// crates/sman-core/src/search.rs - Snippet collection and search pipeline
//
// PIPELINE (each stage builds a new collection, inputs are never mutated):
// 1. File filter   - exact file-name equality, skipped when empty
// 2. Tag filter    - tag expression evaluator, skipped when empty
// 3. Text filter   - regex over name, command and description
// 4. Ordering      - (file, name), so listings are reproducible
//
// An empty text pattern compiles to a regex that matches every string, so it
// needs no special case.

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::snippet::Snippet;
use crate::tags::TagExpression;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type SearchResult<T> = Result<T, SearchError>;

/// What the caller is looking for
///
/// Every field is optional in the sense that an empty string disables the
/// corresponding stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Regular expression matched against name, command and description
    pub pattern: String,

    /// Restrict to snippets from this file
    pub file: String,

    /// Tag expression, see [`crate::tags`]
    pub tags: String,
}

impl SearchQuery {
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn with_file<S: Into<String>>(mut self, file: S) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: S) -> Self {
        self.tags = tags.into();
        self
    }
}

/// Ordered set of loaded snippets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SnippetCollection {
    snippets: Vec<Snippet>,
}

impl SnippetCollection {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self { snippets }
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snippet> {
        self.snippets.iter()
    }

    pub fn as_slice(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Look up a snippet by its identity
    pub fn find(&self, file: &str, name: &str) -> Option<&Snippet> {
        self.snippets
            .iter()
            .find(|s| s.file == file && s.name == name)
    }

    /// Snippets with the given name, across all files
    pub fn named(&self, name: &str) -> Vec<&Snippet> {
        self.snippets.iter().filter(|s| s.name == name).collect()
    }

    /// Runs of consecutive snippets sharing a file
    ///
    /// On a sorted collection this yields exactly one group per file, which
    /// is what the grouped listing relies on.
    pub fn group_by_file(&self) -> Vec<(&str, &[Snippet])> {
        self.snippets
            .chunk_by(|a, b| a.file == b.file)
            .map(|group| (group[0].file.as_str(), group))
            .collect()
    }

    /// Stage 1: keep snippets from one file
    pub fn restrict_to_file(&self, file: &str) -> Self {
        self.snippets
            .iter()
            .filter(|s| s.file == file)
            .cloned()
            .collect()
    }

    /// Stage 2: keep snippets matching a tag expression
    pub fn filter_by_tag(&self, expression: &TagExpression) -> Self {
        Self::new(expression.filter(&self.snippets))
    }

    /// Stage 3: keep snippets whose text matches a compiled pattern
    pub fn filter_by_pattern(&self, pattern: &Regex) -> Self {
        self.snippets
            .iter()
            .filter(|s| matches_pattern(pattern, s))
            .cloned()
            .collect()
    }

    /// Stage 4: order by (file, name)
    pub fn sorted(mut self) -> Self {
        self.snippets
            .sort_by(|a, b| (a.file.as_str(), a.name.as_str()).cmp(&(b.file.as_str(), b.name.as_str())));
        self
    }

    /// Run the whole pipeline
    pub fn search(&self, query: &SearchQuery) -> SearchResult<Self> {
        search(self, query)
    }
}

impl FromIterator<Snippet> for SnippetCollection {
    fn from_iter<I: IntoIterator<Item = Snippet>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Snippet>> for SnippetCollection {
    fn from(snippets: Vec<Snippet>) -> Self {
        Self::new(snippets)
    }
}

impl IntoIterator for SnippetCollection {
    type Item = Snippet;
    type IntoIter = std::vec::IntoIter<Snippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.snippets.into_iter()
    }
}

impl<'a> IntoIterator for &'a SnippetCollection {
    type Item = &'a Snippet;
    type IntoIter = std::slice::Iter<'a, Snippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.snippets.iter()
    }
}

/// Text predicate: does the pattern match name, command or description?
pub fn matches_pattern(pattern: &Regex, snippet: &Snippet) -> bool {
    pattern.is_match(&snippet.name)
        || pattern.is_match(&snippet.command)
        || pattern.is_match(&snippet.description)
}

/// Compile a text pattern, mapping failures to [`SearchError::InvalidPattern`]
pub fn compile_pattern(pattern: &str) -> SearchResult<Regex> {
    Regex::new(pattern).map_err(|source| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Filter and order a collection
///
/// The pattern is compiled before any filtering so an invalid pattern
/// aborts the query without partial results.
pub fn search(collection: &SnippetCollection, query: &SearchQuery) -> SearchResult<SnippetCollection> {
    let pattern = compile_pattern(&query.pattern)?;

    let mut result = if query.file.is_empty() {
        collection.clone()
    } else {
        collection.restrict_to_file(&query.file)
    };
    debug!(file = %query.file, remaining = result.len(), "file filter applied");

    if !query.tags.is_empty() {
        result = result.filter_by_tag(&TagExpression::parse(&query.tags));
        debug!(tags = %query.tags, remaining = result.len(), "tag filter applied");
    }

    let result = result.filter_by_pattern(&pattern).sorted();
    debug!(pattern = %query.pattern, matched = result.len(), "search finished");

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> SnippetCollection {
        SnippetCollection::new(vec![
            Snippet::new("restart", "systemctl restart <<unit>>")
                .with_file("systemd")
                .with_tags(["admin"]),
            Snippet::new("add_user", "useradd -m <<user>>")
                .with_file("users")
                .with_tags(["admin", "users"]),
            Snippet::new("ps", "docker ps -a")
                .with_file("docker")
                .with_description("list all containers")
                .with_tags(["docker"]),
            Snippet::new("logs", "docker logs -f <<container>>")
                .with_file("docker")
                .with_tags(["docker", "debug"]),
            Snippet::new("del_user", "userdel <<user>>")
                .with_file("users")
                .with_description("remove a user account")
                .with_tags(["admin", "users"]),
        ])
    }

    fn ids(collection: &SnippetCollection) -> Vec<(&str, &str)> {
        collection
            .iter()
            .map(|s| (s.file.as_str(), s.name.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_query_matches_everything_sorted() {
        let result = search(&collection(), &SearchQuery::default()).unwrap();
        assert_eq!(
            ids(&result),
            vec![
                ("docker", "logs"),
                ("docker", "ps"),
                ("systemd", "restart"),
                ("users", "add_user"),
                ("users", "del_user"),
            ]
        );
    }

    #[test]
    fn test_pattern_matches_name() {
        let result = search(&collection(), &SearchQuery::new("add")).unwrap();
        assert_eq!(ids(&result), vec![("users", "add_user")]);
    }

    #[test]
    fn test_pattern_matches_command_and_description() {
        let result = search(&collection(), &SearchQuery::new("docker")).unwrap();
        assert_eq!(ids(&result), vec![("docker", "logs"), ("docker", "ps")]);

        let result = search(&collection(), &SearchQuery::new("account")).unwrap();
        assert_eq!(ids(&result), vec![("users", "del_user")]);
    }

    #[test]
    fn test_pattern_is_a_regex() {
        let result = search(&collection(), &SearchQuery::new("^(ps|logs)$")).unwrap();
        assert_eq!(ids(&result), vec![("docker", "logs"), ("docker", "ps")]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = search(&collection(), &SearchQuery::new("user(")).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { ref pattern, .. } if pattern == "user("));
        assert!(err.to_string().starts_with("Invalid search pattern"));
    }

    #[test]
    fn test_file_filter() {
        let query = SearchQuery::default().with_file("users");
        let result = search(&collection(), &query).unwrap();
        assert_eq!(ids(&result), vec![("users", "add_user"), ("users", "del_user")]);

        let query = SearchQuery::default().with_file("user");
        assert!(search(&collection(), &query).unwrap().is_empty());
    }

    #[test]
    fn test_tag_filter_composes_with_pattern() {
        let query = SearchQuery::new("user").with_tags("admin");
        let result = search(&collection(), &query).unwrap();
        assert_eq!(ids(&result), vec![("users", "add_user"), ("users", "del_user")]);

        let query = SearchQuery::default().with_tags("docker+debug,systemd");
        let result = search(&collection(), &query).unwrap();
        assert_eq!(ids(&result), vec![("docker", "logs")]);
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let original = collection();
        let before = original.clone();
        let _ = search(&original, &SearchQuery::new("docker").with_tags("docker")).unwrap();
        assert_eq!(original, before);
    }

    #[test]
    fn test_group_by_file_on_sorted_result() {
        let result = search(&collection(), &SearchQuery::default()).unwrap();
        let groups: Vec<(&str, usize)> = result
            .group_by_file()
            .into_iter()
            .map(|(file, snippets)| (file, snippets.len()))
            .collect();
        assert_eq!(groups, vec![("docker", 2), ("systemd", 1), ("users", 2)]);
    }

    #[test]
    fn test_find_and_named() {
        let collection = collection();
        assert!(collection.find("docker", "ps").is_some());
        assert!(collection.find("users", "ps").is_none());
        assert_eq!(collection.named("logs").len(), 1);
    }
}
