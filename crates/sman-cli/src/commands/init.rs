// crates/sman-cli/src/commands/init.rs - Snippet directory initialization
//
// Like the rest of the commands, init runs with a loaded configuration, but
// it must not require the snippet directory to exist: creating it is the
// whole point.

use anyhow::{Result, anyhow};
use sman_core::ConfigManager;
use sman_core::config::CONFIG_ENV;
use std::env;
use std::path::{Path, PathBuf};

use crate::services::SnippetService;

/// Create the snippet directory, an example snippet file and a config file
///
/// CREATED STRUCTURE:
/// ```
/// ~/.config/sman/config.toml     (only if no config exists)
/// ~/snippets/
/// └── examples.yml
/// ```
///
/// Nothing that already exists is overwritten.
pub fn handle(snippet_dir: PathBuf, config_path: Option<&Path>) -> Result<()> {
    let service = SnippetService::new(snippet_dir);
    let created = service.init_snippet_dir()?;

    let config_path = config_path
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(ConfigManager::default_config_path)
        .ok_or_else(|| anyhow!("Cannot determine the config directory for this platform"))?;
    let config = SnippetService::init_config(&config_path)?;

    println!("✅ Snippet directory: {}", service.snippet_dir().display());
    for path in created.iter().chain(config.iter()) {
        println!("📁 Created {}", path.display());
    }
    println!();
    println!("💡 Next steps:");
    println!("   sman ls");
    println!("   sman run hello");
    println!("   sman --help");

    Ok(())
}
