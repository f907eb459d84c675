use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};
use sman_core::{ConfigManager, FileColor, SearchQuery, SmanConfig, SnippetCollection};

use crate::cli::FilterArgs;
use crate::services::SnippetService;

/// Application context that gets passed to command handlers
///
/// Holds the validated configuration and the snippet service. It is built
/// once in `main`; command handlers never read settings on their own.
pub struct Context {
    pub snippet_service: SnippetService,
    config: SmanConfig,
    file_color: FileColor,
}

impl Context {
    /// Load configuration and resolve the snippet directory
    ///
    /// Precedence for the snippet directory: CLI arg > environment > config
    /// file > default. An invalid configuration aborts here, before any
    /// query runs.
    pub fn new(config_path: Option<&Path>, snippet_dir: Option<PathBuf>) -> Result<Self> {
        let config = ConfigManager::load_config(config_path).context("Failed to load configuration")?;
        let file_color = config.file_color()?;

        let snippet_dir = snippet_dir.unwrap_or_else(|| config.snippet_path());
        let snippet_service = SnippetService::new(snippet_dir);

        Ok(Self {
            snippet_service,
            config,
            file_color,
        })
    }

    /// Load the snippets a filter can see and run the search pipeline
    pub fn search(&self, filter: &FilterArgs) -> Result<SnippetCollection> {
        let snippets = self.snippet_service.load(&filter.file)?;
        let query = SearchQuery::new(filter.pattern.as_str())
            .with_file(filter.file.as_str())
            .with_tags(filter.tags.as_str());
        Ok(snippets.search(&query)?)
    }

    pub fn config(&self) -> &SmanConfig {
        &self.config
    }

    /// Color for file headers in listings
    pub fn file_color(&self) -> FileColor {
        self.file_color
    }
}
