// crates/sman-core/src/snippet.rs - Snippet model
//
// A snippet is a named command template loaded from a snippet file. The raw
// on-disk shape is SnippetRecord; the loader turns each record into a
// Snippet, assigns its name and provenance, and derives its placeholders.

use serde::{Deserialize, Serialize};

use crate::placeholder::{self, Placeholder};

/// Raw snippet definition as written in a snippet file
///
/// ```yaml
/// add_user:
///   do: useradd -m <<user#login name>>
///   desc: create a user with a home directory
///   tags: [admin, users]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRecord {
    /// Command template; empty means "read it from the external command file"
    #[serde(default, rename = "do")]
    pub command: String,

    #[serde(default)]
    pub desc: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// A loaded, queryable command template
///
/// Identity within a collection is the (file, name) pair. Placeholders are
/// derived from `command` once, at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub name: String,
    pub command: String,
    pub description: String,
    pub tags: Vec<String>,

    /// Name of the snippet file this snippet came from
    pub file: String,

    #[serde(skip)]
    pub placeholders: Vec<Placeholder>,
}

impl Snippet {
    /// Create a snippet and derive its placeholders
    pub fn new<S: Into<String>>(name: S, command: S) -> Self {
        let mut snippet = Self {
            name: name.into(),
            command: command.into(),
            ..Self::default()
        };
        snippet.parse_command();
        snippet
    }

    /// Build a snippet from a raw record
    pub fn from_record(name: &str, file: &str, record: SnippetRecord) -> Self {
        Self::new(name.to_string(), record.command)
            .with_description(record.desc)
            .with_tags(record.tags)
            .with_file(file)
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file<S: Into<String>>(mut self, file: S) -> Self {
        self.file = file.into();
        self
    }

    /// Re-derive placeholders from the current command
    pub fn parse_command(&mut self) {
        self.placeholders = placeholder::parse_command(&self.command);
    }

    /// Rewrite the command with the resolved placeholder inputs
    ///
    /// This is a terminal step: the markers recorded in each placeholder no
    /// longer exist in the command afterwards, so it must run only once.
    pub fn replace_placeholders(&mut self) {
        self.command = placeholder::replace_placeholders(&self.command, &self.placeholders);
    }

    /// Assign the input of a placeholder; returns false for unknown names
    pub fn set_input(&mut self, name: &str, value: &str) -> bool {
        match self.placeholder_mut(name) {
            Some(placeholder) => {
                placeholder.set_input(value);
                true
            }
            None => false,
        }
    }

    pub fn placeholder(&self, name: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.name == name)
    }

    pub fn placeholder_mut(&mut self, name: &str) -> Option<&mut Placeholder> {
        self.placeholders.iter_mut().find(|p| p.name == name)
    }

    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_placeholders() {
        let snippet = Snippet::new("greet", "hello <<name(one,two)#desc>>");
        assert_eq!(snippet.placeholders.len(), 1);
        assert_eq!(snippet.placeholders[0].options, vec!["one", "two"]);
    }

    #[test]
    fn test_from_record() {
        let record = SnippetRecord {
            command: "useradd -m <<user>>".to_string(),
            desc: "create a user".to_string(),
            tags: vec!["admin".to_string()],
        };
        let snippet = Snippet::from_record("add_user", "users", record);

        assert_eq!(snippet.name, "add_user");
        assert_eq!(snippet.file, "users");
        assert_eq!(snippet.description, "create a user");
        assert!(snippet.has_tag("admin"));
        assert!(!snippet.has_tag("Admin"));
        assert!(snippet.placeholder("user").is_some());
    }

    #[test]
    fn test_replace_placeholders_in_place() {
        let mut snippet = Snippet::new("greet", "hello <<name#desc>> sup <<name>>");
        assert!(snippet.set_input("name", "test"));
        assert!(!snippet.set_input("missing", "value"));

        snippet.replace_placeholders();
        assert_eq!(snippet.command, "hello test sup test");
    }

    #[test]
    fn test_replace_without_placeholders_is_identity() {
        let mut snippet = Snippet::new("echo", "hello world");
        snippet.replace_placeholders();
        assert_eq!(snippet.command, "hello world");
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: SnippetRecord = serde_yaml::from_str("do: ls -la").unwrap();
        assert_eq!(record.command, "ls -la");
        assert!(record.desc.is_empty());
        assert!(record.tags.is_empty());
    }
}
