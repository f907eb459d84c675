// crates/sman-core/src/loader.rs - Snippet file loading
//
// SNIPPET DIRECTORY LAYOUT:
// ```
// ~/snippets/
// ├── docker.yml          # snippets of file "docker"
// ├── users.yaml          # snippets of file "users"
// └── docker/
//     └── cleanup         # external command for docker.yml's "cleanup"
// ```
//
// Each snippet file is a YAML mapping from snippet name to record. A record
// with an empty `do` takes its command from the external command file
// <dir>/<file>/<name>, which keeps long scripts out of the YAML. Records
// that still have no command are skipped with a warning; the rest of the
// core never sees them.

use indexmap::IndexMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::search::SnippetCollection;
use crate::snippet::{Snippet, SnippetRecord};

/// File extensions recognised as snippet files
pub const SNIPPET_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Snippet directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Invalid YAML in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("I/O error reading {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan snippet directory: {0}")]
    WalkError(#[from] walkdir::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Records of one snippet file, in definition order
pub type SnippetMap = IndexMap<String, SnippetRecord>;

/// Load every snippet under `dir`
///
/// When `file_filter` is non-empty only the snippet file with that name is
/// read. If two files share a name (docker.yml and docker.yaml) the one
/// loaded later wins for each snippet name they share.
pub fn load_snippets(dir: &Path, file_filter: &str) -> LoadResult<SnippetCollection> {
    let mut loaded: IndexMap<(String, String), Snippet> = IndexMap::new();

    for path in snippet_files(dir)? {
        let Some(file) = file_name(&path) else {
            continue;
        };
        if !file_filter.is_empty() && file != file_filter {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|source| LoadError::IoError {
            path: path.clone(),
            source,
        })?;
        let records = parse_snippet_file(&content, &path.display().to_string())?;

        for snippet in init_snippets(records, &file, dir) {
            loaded.insert((snippet.file.clone(), snippet.name.clone()), snippet);
        }
    }

    debug!(dir = %dir.display(), count = loaded.len(), "snippets loaded");
    Ok(loaded.into_values().collect())
}

/// Snippet files directly inside `dir`, sorted by path
pub fn snippet_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_snippet_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Name a snippet file is known by: its stem
pub fn file_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

fn is_snippet_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SNIPPET_EXTENSIONS.contains(&ext))
}

/// Parse the YAML content of one snippet file
///
/// The document must be a mapping (or empty); anything else is a
/// `ParseError`. Each entry is then decoded on its own: a bare `name:` is an
/// empty record (which then needs an external command file), and an entry
/// that does not fit the record shape is skipped with a warning so the rest
/// of the file still loads.
pub fn parse_snippet_file(content: &str, source: &str) -> LoadResult<SnippetMap> {
    if content.trim().is_empty() {
        return Ok(SnippetMap::new());
    }

    let raw: Option<IndexMap<String, serde_yaml::Value>> =
        serde_yaml::from_str(content).map_err(|e| LoadError::ParseError {
            file: source.to_string(),
            error: e.to_string(),
        })?;

    let mut records = SnippetMap::new();
    for (name, value) in raw.unwrap_or_default() {
        if value.is_null() {
            records.insert(name, SnippetRecord::default());
            continue;
        }
        match serde_yaml::from_value::<SnippetRecord>(value) {
            Ok(record) => {
                records.insert(name, record);
            }
            Err(e) => warn!(file = source, snippet = %name, error = %e, "skipping malformed snippet"),
        }
    }

    Ok(records)
}

/// Turn the records of one file into snippets
///
/// Assigns name and file, resolves external commands, derives placeholders
/// and drops records that end up without a name or command.
pub fn init_snippets(records: SnippetMap, file: &str, dir: &Path) -> Vec<Snippet> {
    let mut snippets = Vec::new();

    for (name, mut record) in records {
        if name.is_empty() {
            warn!(file, "skipping snippet with empty name");
            continue;
        }
        if !is_plain_name(&name) {
            warn!(file, snippet = %name, "skipping snippet whose name is not a plain file name");
            continue;
        }

        if record.command.is_empty() {
            if let Some(command) = read_external_command(dir, file, &name) {
                record.command = command;
            }
        }

        if record.command.is_empty() {
            warn!(file, snippet = %name, "skipping snippet without command");
            continue;
        }

        snippets.push(Snippet::from_record(&name, file, record));
    }

    snippets
}

/// A name usable as a single path component below the snippet directory
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Path of the external command file for a snippet
pub fn external_command_path(dir: &Path, file: &str, name: &str) -> PathBuf {
    dir.join(file).join(name)
}

fn read_external_command(dir: &Path, file: &str, name: &str) -> Option<String> {
    let path = external_command_path(dir, file, name);
    let content = fs::read_to_string(&path).ok()?;
    debug!(path = %path.display(), "read external command");
    Some(content.trim_end_matches(['\n', '\r']).to_string())
}
