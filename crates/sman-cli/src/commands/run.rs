// crates/sman-cli/src/commands/run.rs - Snippet execution command
//
// FLOW:
// 1. Search with the same filter as `sman ls`
// 2. Select exactly one snippet
// 3. Fill placeholders from -i NAME=VALUE, prompt for the rest
// 4. Substitute (single shot, the snippet is a private clone)
// 5. Confirm if exec_confirm is set and -y was not given
// 6. Execute through the shell, append to $HISTFILE if configured

use anyhow::{Result, anyhow, bail};
use console::style;
use sman_core::{Snippet, SnippetCollection};
use std::collections::HashMap;
use std::io::{self, Write};
use tracing::warn;

use crate::cli::FilterArgs;
use crate::context::Context;
use crate::services::ExecutorService;
use crate::stdin;

pub fn handle(ctx: &Context, filter: FilterArgs, inputs: Vec<String>, yes: bool, dry_run: bool) -> Result<()> {
    let matches = ctx.search(&filter)?;
    let mut snippet = select_snippet(&matches, &filter.pattern)?.clone();

    let supplied = parse_inputs(&inputs)?;
    let input = io::stdin();
    let mut reader = input.lock();
    let mut prompt_out = io::stderr();

    resolve_placeholders(&mut snippet, &supplied, &mut reader, &mut prompt_out)?;
    snippet.replace_placeholders();

    if dry_run {
        println!("{}", snippet.command);
        return Ok(());
    }

    eprintln!("{} {}", style("$").dim(), style(&snippet.command).bold());
    if ctx.config().exec_confirm
        && !yes
        && !stdin::confirm(&mut reader, &mut prompt_out, "Execute?")?
    {
        bail!("Aborted");
    }

    let status = ExecutorService::execute(&snippet.command)?;

    if ctx.config().append_history {
        if let Some(history) = ExecutorService::history_file() {
            ExecutorService::append_history(&history, &snippet.command);
        }
    }

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

/// Pick the snippet to run from the search result
///
/// A single match wins outright. With several matches, a snippet whose name
/// equals the pattern exactly is preferred; otherwise the choice is
/// ambiguous and the candidates are listed.
pub fn select_snippet<'a>(matches: &'a SnippetCollection, pattern: &str) -> Result<&'a Snippet> {
    if matches.is_empty() {
        bail!("No snippet matches '{}'", pattern);
    }
    if matches.len() == 1 {
        return Ok(&matches.as_slice()[0]);
    }

    let exact = matches.named(pattern);
    if let [snippet] = exact.as_slice() {
        return Ok(*snippet);
    }

    let candidates: Vec<String> = matches
        .iter()
        .map(|s| format!("  {}/{}", s.file, s.name))
        .collect();
    Err(anyhow!(
        "'{}' matches {} snippets, narrow it down with a pattern, --file or --tags:\n{}",
        pattern,
        matches.len(),
        candidates.join("\n")
    ))
}

/// Parse `NAME=VALUE` pairs; the value may itself contain '='
pub fn parse_inputs(inputs: &[String]) -> Result<HashMap<String, String>> {
    inputs
        .iter()
        .map(|input| {
            input
                .split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("Invalid input '{}', expected NAME=VALUE", input))
        })
        .collect()
}

/// Assign every placeholder an input, prompting for the ones not supplied
pub fn resolve_placeholders<R, W>(
    snippet: &mut Snippet,
    supplied: &HashMap<String, String>,
    reader: &mut R,
    writer: &mut W,
) -> Result<()>
where
    R: io::BufRead,
    W: Write,
{
    for name in supplied.keys() {
        if snippet.placeholder(name).is_none() {
            warn!(placeholder = %name, snippet = %snippet.name, "ignoring input for unknown placeholder");
        }
    }

    for placeholder in &mut snippet.placeholders {
        let value = match supplied.get(&placeholder.name) {
            Some(value) => value.clone(),
            None => stdin::prompt_placeholder(reader, writer, placeholder)?,
        };
        placeholder.set_input(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collection() -> SnippetCollection {
        SnippetCollection::new(vec![
            Snippet::new("add", "git add <<path(.)>>").with_file("git"),
            Snippet::new("add_user", "useradd <<user>>").with_file("users"),
        ])
    }

    #[test]
    fn test_select_single_match() {
        let matches = SnippetCollection::new(vec![Snippet::new("st", "git status")]);
        assert_eq!(select_snippet(&matches, "s").unwrap().name, "st");
    }

    #[test]
    fn test_select_prefers_exact_name() {
        assert_eq!(select_snippet(&collection(), "add").unwrap().name, "add");
    }

    #[test]
    fn test_select_ambiguous_lists_candidates() {
        let err = select_snippet(&collection(), "a").unwrap_err().to_string();
        assert!(err.contains("git/add"));
        assert!(err.contains("users/add_user"));
    }

    #[test]
    fn test_select_nothing() {
        assert!(select_snippet(&SnippetCollection::default(), "x").is_err());
    }

    #[test]
    fn test_parse_inputs() {
        let inputs = vec!["user=alice".to_string(), "query=a=b".to_string()];
        let parsed = parse_inputs(&inputs).unwrap();
        assert_eq!(parsed["user"], "alice");
        assert_eq!(parsed["query"], "a=b");

        assert!(parse_inputs(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn test_resolve_mixes_supplied_and_prompted() {
        let mut snippet = Snippet::new("cp", "cp <<src>> <<dst(/tmp,/srv)>> && ls <<dst>>");
        let supplied = HashMap::from([("src".to_string(), "a.txt".to_string())]);
        let mut reader = Cursor::new("2\n");
        let mut writer = Vec::new();

        resolve_placeholders(&mut snippet, &supplied, &mut reader, &mut writer).unwrap();
        snippet.replace_placeholders();

        assert_eq!(snippet.command, "cp a.txt /srv && ls /srv");
        let prompts = String::from_utf8(writer).unwrap();
        assert!(prompts.contains("dst: "));
        assert!(!prompts.contains("src: "));
    }
}
