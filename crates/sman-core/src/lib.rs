// crates/sman-core/src/lib.rs - Snippet query and templating engine
//
// MODULE MAP:
// - placeholder: <<marker>> parsing and substitution
// - tags:        OR-of-ANDs tag expressions
// - snippet:     Snippet / SnippetRecord model
// - search:      SnippetCollection and the search pipeline
// - loader:      snippet files on disk -> SnippetCollection
// - config:      SmanConfig and its loading hierarchy
//
// Everything except `loader` and `config` is pure and does no I/O.

pub mod config;
pub mod loader;
pub mod placeholder;
pub mod search;
pub mod snippet;
pub mod tags;

pub use config::{ConfigError, ConfigManager, FileColor, SmanConfig};
pub use loader::{LoadError, load_snippets};
pub use placeholder::{Placeholder, parse_command, replace_placeholders};
pub use search::{SearchError, SearchQuery, SnippetCollection, search};
pub use snippet::{Snippet, SnippetRecord};
pub use tags::{TagExpression, filter_by_tag};
