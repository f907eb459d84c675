// crates/sman-core/src/placeholder.rs - Placeholder Engine
//
// Commands stored in snippet files can carry placeholder markers that are
// filled in right before execution:
//
//   docker exec -it <<container(web,db)#running container>> <<shell(bash,sh)>>
//
// MARKER GRAMMAR:
// - <<name>>                     plain placeholder
// - <<name#description>>         annotated placeholder
// - <<name(opt1,opt2)>>          placeholder with suggested values
// - <<name(opt1,opt2)#desc>>     both (the description always comes last)
//
// TOKENIZER RULES:
// Markers are found with a single leftmost, non-overlapping scan. A marker
// body never contains '<' or '>', so an unterminated "<<" can not swallow a
// later marker, and with nested open tokens ("<<a <<b>> >>") only the
// innermost well-formed marker is matched. Text that does not fit the
// grammar is not a marker and passes through untouched.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Marker pattern
///
/// REGEX PATTERN: <<([^\s<>()#]+)(?:\(([^<>()]*)\))?(#[^<>]*)?>>
/// - group 1: name, no whitespace and none of the marker punctuation
/// - group 2: raw option list between the parentheses
/// - group 3: description, including its leading '#'
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<<([^\s<>()#]+)(?:\(([^<>()]*)\))?(#[^<>]*)?>>")
        .expect("placeholder marker regex is valid")
});

/// A single logical placeholder inside a command
///
/// One placeholder may be written several times in the same command. Every
/// literal marker that binds to the name is kept in `patterns`, so that
/// substitution can replace each of them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// Identifier parsed out of the marker
    pub name: String,

    /// Annotation including its leading '#', e.g. "#target branch"
    pub description: Option<String>,

    /// Suggested values, shown when prompting; never enforced
    pub options: Vec<String>,

    /// Literal marker substrings bound to this name, in order of appearance
    pub patterns: Vec<String>,

    /// Value supplied by the caller, empty until resolved
    #[serde(skip)]
    pub input: String,
}

impl Placeholder {
    /// Create a placeholder from its first marker occurrence
    pub fn new<S: Into<String>>(name: S, pattern: S) -> Self {
        Self {
            name: name.into(),
            patterns: vec![pattern.into()],
            ..Self::default()
        }
    }

    /// Attach suggested values
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a description (the leading '#' is part of the value)
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the value that replaces every marker of this placeholder
    pub fn set_input<S: Into<String>>(&mut self, input: S) {
        self.input = input.into();
    }

    /// Description without its leading '#', for display
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(|desc| desc.strip_prefix('#').unwrap_or(desc))
    }

    /// Look up a suggested value by its 1-based position
    pub fn option(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    /// Fold a later occurrence of the same name into this placeholder
    ///
    /// The first occurrence that supplies a description or options wins.
    fn absorb(&mut self, pattern: String, description: Option<String>, options: Vec<String>) {
        self.patterns.push(pattern);
        if self.description.is_none() {
            self.description = description;
        }
        if self.options.is_empty() {
            self.options = options;
        }
    }
}

/// Extract the placeholders of a command, grouped by name
///
/// Placeholders come back in order of first appearance. A command without
/// markers yields an empty vector.
///
/// EXAMPLES:
/// - "hello <<name(one,two)#desc>>" -> [name: options [one, two], "#desc"]
/// - "hello <<name#desc>> <<name>>" -> [name: two patterns, "#desc"]
/// - "hello world" -> []
pub fn parse_command(command: &str) -> Vec<Placeholder> {
    let mut placeholders: Vec<Placeholder> = Vec::new();

    for captures in MARKER_REGEX.captures_iter(command) {
        let (Some(marker), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let pattern = marker.as_str().to_string();
        let options = captures
            .get(2)
            .map(|opts| split_options(opts.as_str()))
            .unwrap_or_default();
        let description = captures.get(3).map(|desc| desc.as_str().to_string());

        match placeholders.iter_mut().find(|p| p.name == name.as_str()) {
            Some(existing) => existing.absorb(pattern, description, options),
            None => placeholders.push(Placeholder {
                name: name.as_str().to_string(),
                description,
                options,
                patterns: vec![pattern],
                input: String::new(),
            }),
        }
    }

    placeholders
}

/// Substitute every marker with its placeholder's input
///
/// Matching is exact string replacement, not regex. Placeholders that were
/// never resolved substitute the empty string. Options are not checked.
pub fn replace_placeholders(command: &str, placeholders: &[Placeholder]) -> String {
    placeholders
        .iter()
        .fold(command.to_string(), |command, placeholder| {
            placeholder
                .patterns
                .iter()
                .fold(command, |command, pattern| {
                    command.replace(pattern.as_str(), &placeholder.input)
                })
        })
}

fn split_options(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_without_markers() {
        assert!(parse_command("hello world").is_empty());
        assert!(parse_command("").is_empty());
    }

    #[test]
    fn test_parse_full_marker() {
        let placeholders = parse_command("hello <<name(one,two)#desc>>");
        assert_eq!(
            placeholders,
            vec![
                Placeholder::new("name", "<<name(one,two)#desc>>")
                    .with_options(["one", "two"])
                    .with_description("#desc")
            ]
        );
    }

    #[test]
    fn test_parse_groups_repeated_name() {
        let placeholders = parse_command("hello <<name#desc>> <<name>>");
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].name, "name");
        assert_eq!(placeholders[0].description.as_deref(), Some("#desc"));
        assert_eq!(placeholders[0].patterns, vec!["<<name#desc>>", "<<name>>"]);
    }

    #[test]
    fn test_parse_identical_markers_keep_both_patterns() {
        let placeholders = parse_command("cp <<file>> <<file>>.bak");
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].patterns, vec!["<<file>>", "<<file>>"]);
    }

    #[test]
    fn test_parse_later_occurrence_supplies_metadata() {
        let placeholders = parse_command("git checkout <<branch>> && git log <<branch(main,dev)#target>>");
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].options, vec!["main", "dev"]);
        assert_eq!(placeholders[0].description.as_deref(), Some("#target"));
    }

    #[test]
    fn test_parse_keeps_first_appearance_order() {
        let names: Vec<_> = parse_command("hello <<name>> <<last>> <<name>>")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["name", "last"]);
    }

    #[test]
    fn test_parse_options_only() {
        let placeholders = parse_command("ls <<flags(-l,-la,)>>");
        assert_eq!(placeholders[0].options, vec!["-l", "-la", ""]);
        assert!(placeholders[0].description.is_none());

        let placeholders = parse_command("ls <<flags()>>");
        assert!(placeholders[0].options.is_empty());
    }

    #[test]
    fn test_parse_description_with_spaces() {
        let placeholders = parse_command("ssh <<host#remote host name>>");
        assert_eq!(placeholders[0].description.as_deref(), Some("#remote host name"));
        assert_eq!(placeholders[0].description_text(), Some("remote host name"));
    }

    #[test]
    fn test_malformed_markers_pass_through() {
        assert!(parse_command("echo <<unterminated").is_empty());
        assert!(parse_command("echo <<has space>>").is_empty());
        assert!(parse_command("echo <<>>").is_empty());
        assert!(parse_command("echo <<bad(open>>").is_empty());

        let command = "echo <<unterminated and <<has space>>";
        assert_eq!(replace_placeholders(command, &parse_command(command)), command);
    }

    #[test]
    fn test_nested_markers_match_innermost() {
        let placeholders = parse_command("echo <<a <<b>> >>");
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].name, "b");
        assert_eq!(placeholders[0].patterns, vec!["<<b>>"]);
    }

    #[test]
    fn test_replace_single_pattern() {
        let mut placeholders = parse_command("hello <<name>>");
        placeholders[0].set_input("test");
        assert_eq!(replace_placeholders("hello <<name>>", &placeholders), "hello test");
    }

    #[test]
    fn test_replace_multiple_patterns() {
        let command = "hello <<name#desc>> sup <<name>>";
        let mut placeholders = parse_command(command);
        placeholders[0].set_input("test");
        assert_eq!(replace_placeholders(command, &placeholders), "hello test sup test");
    }

    #[test]
    fn test_replace_repeated_marker() {
        let command = "echo <<name>> <<name>>";
        let mut placeholders = parse_command(command);
        assert_eq!(placeholders[0].patterns.len(), 2);
        placeholders[0].set_input("X");
        assert_eq!(replace_placeholders(command, &placeholders), "echo X X");
    }

    #[test]
    fn test_replace_unresolved_with_empty() {
        let command = "tar czf <<archive(out.tgz)>> .";
        let placeholders = parse_command(command);
        assert_eq!(replace_placeholders(command, &placeholders), "tar czf  .");
    }

    #[test]
    fn test_input_is_not_checked_against_options() {
        let command = "git checkout <<branch(main,dev)>>";
        let mut placeholders = parse_command(command);
        placeholders[0].set_input("feature/x");
        assert_eq!(replace_placeholders(command, &placeholders), "git checkout feature/x");
    }

    #[test]
    fn test_option_lookup() {
        let placeholder = Placeholder::new("b", "<<b(x,y)>>").with_options(["x", "y"]);
        assert_eq!(placeholder.option(1), Some("x"));
        assert_eq!(placeholder.option(2), Some("y"));
        assert_eq!(placeholder.option(0), None);
        assert_eq!(placeholder.option(3), None);
    }

    proptest! {
        #[test]
        fn prop_marker_free_command_is_unchanged(command in "[^<>]*") {
            let placeholders = parse_command(&command);
            prop_assert!(placeholders.is_empty());
            prop_assert_eq!(replace_placeholders(&command, &placeholders), command);
        }
    }
}
