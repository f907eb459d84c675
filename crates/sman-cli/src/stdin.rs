// crates/sman-cli/src/stdin.rs - Interactive input helpers
//
// Prompts are written to a writer (stderr in practice, so stdout stays clean
// for the command output) and answers are read line by line from a reader.
// Taking both as parameters keeps the helpers testable without a terminal.

use anyhow::{Result, anyhow};
use console::style;
use std::io::{BufRead, Write};

use sman_core::Placeholder;

/// Print a prompt and read one trimmed line
///
/// End of input is an error: a prompt that can never be answered must not
/// silently become an empty value.
pub fn read_line<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut buffer = String::new();
    if reader.read_line(&mut buffer)? == 0 {
        return Err(anyhow!("No input provided for: {}", prompt.trim_end()));
    }
    Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
}

/// Ask for a placeholder value, showing its description and options
///
/// ```text
/// branch (target branch)
///   1) main
///   2) dev
/// branch:
/// ```
///
/// A number picks the matching option; anything else is taken verbatim.
/// Options are suggestions only, so values outside the list are accepted.
pub fn prompt_placeholder<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    placeholder: &Placeholder,
) -> Result<String> {
    if let Some(description) = placeholder.description_text() {
        writeln!(writer, "{} ({})", style(&placeholder.name).bold(), description)?;
    } else if !placeholder.options.is_empty() {
        writeln!(writer, "{}", style(&placeholder.name).bold())?;
    }

    for (index, option) in placeholder.options.iter().enumerate() {
        writeln!(writer, "  {}) {}", index + 1, option)?;
    }

    let answer = read_line(reader, writer, &format!("{}: ", placeholder.name))?;
    let selected = answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|position| placeholder.option(position));

    Ok(selected.map(str::to_string).unwrap_or(answer))
}

/// Ask a yes/no question; only "y" or "yes" confirms
pub fn confirm<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, question: &str) -> Result<bool> {
    let answer = read_line(reader, writer, &format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn placeholder() -> Placeholder {
        Placeholder::new("branch", "<<branch(main,dev)#target branch>>")
            .with_options(["main", "dev"])
            .with_description("#target branch")
    }

    #[test]
    fn test_prompt_picks_option_by_number() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let value = prompt_placeholder(&mut input, &mut output, &placeholder()).unwrap();
        assert_eq!(value, "dev");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("target branch"));
        assert!(shown.contains("1) main"));
        assert!(shown.contains("2) dev"));
    }

    #[test]
    fn test_prompt_accepts_free_text() {
        let mut input = Cursor::new("feature/x\n");
        let mut output = Vec::new();
        let value = prompt_placeholder(&mut input, &mut output, &placeholder()).unwrap();
        assert_eq!(value, "feature/x");
    }

    #[test]
    fn test_prompt_out_of_range_number_is_verbatim() {
        let mut input = Cursor::new("7\n");
        let mut output = Vec::new();
        let value = prompt_placeholder(&mut input, &mut output, &placeholder()).unwrap();
        assert_eq!(value, "7");
    }

    #[test]
    fn test_read_line_at_eof_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(read_line(&mut input, &mut output, "name: ").is_err());
    }

    #[test]
    fn test_confirm() {
        let mut output = Vec::new();
        assert!(confirm(&mut Cursor::new("y\n"), &mut output, "Run?").unwrap());
        assert!(confirm(&mut Cursor::new("YES\n"), &mut output, "Run?").unwrap());
        assert!(!confirm(&mut Cursor::new("\n"), &mut output, "Run?").unwrap());
        assert!(!confirm(&mut Cursor::new("nope\n"), &mut output, "Run?").unwrap());
    }
}
