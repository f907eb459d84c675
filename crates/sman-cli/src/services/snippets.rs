// crates/sman-cli/src/services/snippets.rs - Snippet directory service
//
// This service handles the file system side of snippets: loading the
// collection through sman-core's loader and laying out a fresh snippet
// directory for `sman init`. It knows HOW to touch the disk, never WHAT a
// command wants to do with the result.

use anyhow::{Context as AnyhowContext, Result};
use sman_core::loader;
use sman_core::{ConfigManager, SnippetCollection};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Example snippet file written by `sman init`
const EXAMPLE_SNIPPETS: &str = r#"# Snippets of file "examples"
#
# Each entry maps a snippet name to:
#   do:   the command; <<name>>, <<name#description>> and
#         <<name(option1,option2)#description>> mark placeholders
#   desc: free text shown by `sman ls`
#   tags: labels for `sman ls -t`
#
# Leave `do` empty to read the command from examples/<name> instead.

hello:
  do: echo "Hello, <<who(world,there)#who to greet>>!"
  desc: greet somebody
  tags: [demo]

find_large:
  do: find <<dir(.)#where to look>> -type f -size +<<size(100M,1G)>>
  desc: find files larger than a size
  tags: [demo, files]
"#;

/// Handles snippet directory operations
pub struct SnippetService {
    /// Root directory holding the snippet files
    snippet_dir: PathBuf,
}

impl SnippetService {
    /// Create a service for a snippet directory; the path is not checked here
    pub fn new(snippet_dir: PathBuf) -> Self {
        Self { snippet_dir }
    }

    /// Load all snippets, or only those of `file_filter` when non-empty
    pub fn load(&self, file_filter: &str) -> Result<SnippetCollection> {
        loader::load_snippets(&self.snippet_dir, file_filter).with_context(|| {
            format!(
                "Failed to load snippets from {} (run `sman init` to create it)",
                self.snippet_dir.display()
            )
        })
    }

    /// Create the snippet directory with an example file
    ///
    /// Existing files are never overwritten. Returns the paths that were
    /// actually created.
    pub fn init_snippet_dir(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();

        if !self.snippet_dir.exists() {
            fs::create_dir_all(&self.snippet_dir).with_context(|| {
                format!(
                    "Failed to create snippet directory: {}",
                    self.snippet_dir.display()
                )
            })?;
            created.push(self.snippet_dir.clone());
        }

        let example = self.snippet_dir.join("examples.yml");
        if write_if_missing(&example, EXAMPLE_SNIPPETS)? {
            created.push(example);
        }

        Ok(created)
    }

    /// Write the default config file unless one already exists
    pub fn init_config(config_path: &Path) -> Result<Option<PathBuf>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let written = write_if_missing(config_path, &ConfigManager::generate_default_config())?;
        Ok(written.then(|| config_path.to_path_buf()))
    }

    pub fn snippet_dir(&self) -> &Path {
        &self.snippet_dir
    }
}

fn write_if_missing(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, content).with_context(|| format!("Failed to create file: {}", path.display()))?;
    info!(path = %path.display(), "created file");
    Ok(true)
}
