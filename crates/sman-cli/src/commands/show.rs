use anyhow::{Result, anyhow};
use console::{Style, style};
use sman_core::{Snippet, SnippetCollection};
use std::io::{self, Write};

use crate::commands::list::header_style;
use crate::context::Context;

/// Display a single snippet and its placeholders
pub fn handle(ctx: &Context, name: String, file: String) -> Result<()> {
    let snippets = ctx.snippet_service.load(&file)?;
    let snippet = find_unique(&snippets, &name)?;

    let stdout = io::stdout();
    write_details(&mut stdout.lock(), snippet, &header_style(ctx.file_color()))?;
    Ok(())
}

/// Find a snippet by exact name; a name defined in several files is ambiguous
pub fn find_unique<'a>(snippets: &'a SnippetCollection, name: &str) -> Result<&'a Snippet> {
    match snippets.named(name).as_slice() {
        [] => Err(anyhow!("No snippet named '{}'", name)),
        [snippet] => Ok(*snippet),
        many => {
            let files: Vec<&str> = many.iter().map(|s| s.file.as_str()).collect();
            Err(anyhow!(
                "Snippet '{}' exists in several files ({}); pick one with --file",
                name,
                files.join(", ")
            ))
        }
    }
}

/// Header uses the same style as file headers in `sman ls`
pub fn write_details<W: Write>(out: &mut W, snippet: &Snippet, header: &Style) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        header.apply_to(format!("{}:", snippet.file)),
        style(&snippet.name).bold()
    )?;
    writeln!(out, "  command:     {}", snippet.command)?;
    if !snippet.description.is_empty() {
        writeln!(out, "  description: {}", snippet.description)?;
    }
    if !snippet.tags.is_empty() {
        writeln!(out, "  tags:        {}", snippet.tags.join(", "))?;
    }

    if !snippet.placeholders.is_empty() {
        writeln!(out, "  placeholders:")?;
        for placeholder in &snippet.placeholders {
            let mut line = format!("    {}", placeholder.name);
            if let Some(description) = placeholder.description_text() {
                line.push_str(&format!(" - {}", description));
            }
            if !placeholder.options.is_empty() {
                line.push_str(&format!(" [{}]", placeholder.options.join(" | ")));
            }
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
