// crates/sman-cli/src/commands/mod.rs - Command Handler Modules
//
// MODULE ORGANIZATION:
// - init: snippet directory and config file creation
// - list: searching and listing snippets (human, porcelain, JSON)
// - show: details of a single snippet
// - run: placeholder resolution and execution
// - completions: shell completion scripts

#[cfg(feature = "completions")]
pub mod completions;
pub mod init;
pub mod list;
pub mod run;
pub mod show;
