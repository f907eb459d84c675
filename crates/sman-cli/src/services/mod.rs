// crates/sman-cli/src/services/mod.rs - Service layer modules
pub mod executor;
pub mod snippets;

pub use executor::ExecutorService;
pub use snippets::SnippetService;
