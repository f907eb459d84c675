use anyhow::Result;
use console::{Color, Style};
use sman_core::{FileColor, SnippetCollection};
use std::io::{self, Write};

use crate::cli::FilterArgs;
use crate::context::Context;

/// Minimum width of a column in the human listing
const MIN_COLUMN_WIDTH: usize = 25;

/// Spaces between the widest cell of a column and the next column
const COLUMN_PADDING: usize = 2;

/// List the snippets matching a filter
///
/// Three output modes:
/// - Human-readable: grouped by file, one colored header per file
/// - Porcelain: tab-separated `file name tags description` per line
/// - JSON: array of snippet objects for scripting
pub fn handle(ctx: &Context, filter: FilterArgs, porcelain: bool, json: bool) -> Result<()> {
    let snippets = ctx.search(&filter)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &snippets)?;
        writeln!(out)?;
    } else if porcelain {
        write_porcelain(&mut out, &snippets)?;
    } else {
        write_human(&mut out, &snippets, &header_style(ctx.file_color()))?;
    }

    Ok(())
}

/// Style for file headers
pub fn header_style(color: FileColor) -> Style {
    let color = match color {
        FileColor::Black => Color::Black,
        FileColor::Red => Color::Red,
        FileColor::Green => Color::Green,
        FileColor::Yellow => Color::Yellow,
        FileColor::Blue => Color::Blue,
        FileColor::Magenta => Color::Magenta,
        FileColor::Cyan => Color::Cyan,
        FileColor::White => Color::White,
    };
    Style::new().fg(color)
}

/// Grouped, column-aligned listing
///
/// Expects a sorted collection so that every file forms a single group.
/// Columns are aligned within each group.
pub fn write_human<W: Write>(out: &mut W, snippets: &SnippetCollection, header: &Style) -> io::Result<()> {
    for (file, group) in snippets.group_by_file() {
        writeln!(out, "{}", header.apply_to(format!("{}:", file)))?;

        let rows: Vec<(String, String, &str)> = group
            .iter()
            .map(|s| {
                (
                    format!("   {}", s.name),
                    format!("[{}]", s.tags.join(", ")),
                    s.description.as_str(),
                )
            })
            .collect();

        let name_width = column_width(rows.iter().map(|(name, _, _)| name.chars().count()));
        let tags_width = column_width(rows.iter().map(|(_, tags, _)| tags.chars().count()));

        for (name, tags, description) in rows {
            let line = format!("{name:<name_width$}{tags:<tags_width$}{description}");
            writeln!(out, "{}", line.trim_end())?;
        }
    }
    Ok(())
}

/// One tab-separated record per snippet: file, name, tags, description
pub fn write_porcelain<W: Write>(out: &mut W, snippets: &SnippetCollection) -> io::Result<()> {
    for snippet in snippets {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            snippet.file,
            snippet.name,
            snippet.tags.join(","),
            snippet.description
        )?;
    }
    Ok(())
}

fn column_width<I: Iterator<Item = usize>>(widths: I) -> usize {
    (widths.max().unwrap_or(0) + COLUMN_PADDING).max(MIN_COLUMN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sman_core::{SearchQuery, Snippet};

    fn sorted_collection() -> SnippetCollection {
        SnippetCollection::new(vec![
            Snippet::new("ps", "docker ps -a")
                .with_file("docker")
                .with_description("list containers")
                .with_tags(["docker", "ops"]),
            Snippet::new("add_user", "useradd <<user>>").with_file("users"),
            Snippet::new("logs", "docker logs <<c>>").with_file("docker"),
        ])
        .search(&SearchQuery::default())
        .unwrap()
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_porcelain_output() {
        let output = render(|out| write_porcelain(out, &sorted_collection()));
        assert_eq!(
            output,
            "docker\tlogs\t\t\n\
             docker\tps\tdocker,ops\tlist containers\n\
             users\tadd_user\t\t\n"
        );
    }

    #[test]
    fn test_human_output_groups_by_file() {
        let output = render(|out| write_human(out, &sorted_collection(), &Style::new()));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "docker:");
        assert!(lines[1].starts_with("   logs"));
        assert!(lines[1].ends_with("[]"));
        assert!(lines[2].starts_with("   ps"));
        assert!(lines[2].ends_with("list containers"));
        assert_eq!(lines[3], "users:");
        assert!(lines[4].starts_with("   add_user"));
    }

    #[test]
    fn test_human_output_aligns_columns() {
        let output = render(|out| write_human(out, &sorted_collection(), &Style::new()));
        let ps = output.lines().find(|l| l.starts_with("   ps")).unwrap();

        assert_eq!(ps.find('['), Some(MIN_COLUMN_WIDTH));
        assert_eq!(ps.find("list"), Some(2 * MIN_COLUMN_WIDTH));
    }

    #[test]
    fn test_empty_tags_render_as_brackets() {
        let snippets = SnippetCollection::new(vec![
            Snippet::new("x", "true").with_file("f").with_description("d"),
        ]);
        let output = render(|out| write_human(out, &snippets, &Style::new()));
        assert!(output.lines().nth(1).unwrap().contains("[]"));
    }
}
