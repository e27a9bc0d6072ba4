//! Grid serialization as a constant declaration for embedding in other code.

use serde::Deserialize;

use crate::error::Result;
use crate::models::Grid;

/// Default declaration name
pub const DEFAULT_NAME: &str = "ASCII_WORLD";

/// Textual framing of the serialized rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `const NAME = [ "...", ];`
    #[default]
    Js,
    /// `pub const NAME: &[&str] = &[ "...", ];`
    Rust,
    /// JSON array of row strings
    Json,
    /// Bare rows, one per line
    Plain,
}

/// Serialize the grid rows top to bottom in the chosen framing.
/// Every framing ends with a newline.
pub fn serialize(grid: &Grid, format: OutputFormat, name: &str) -> Result<String> {
    let rows: Vec<String> = grid.rows().collect();

    let text = match format {
        OutputFormat::Js => declaration(&format!("const {} = [", name), &rows)?,
        OutputFormat::Rust => declaration(&format!("pub const {}: &[&str] = &[", name), &rows)?,
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&rows)?;
            out.push('\n');
            out
        }
        OutputFormat::Plain => rows.iter().map(|row| format!("{}\n", row)).collect(),
    };

    Ok(text)
}

fn declaration(header: &str, rows: &[String]) -> Result<String> {
    let mut out = String::with_capacity(rows.iter().map(|r| r.len() + 8).sum::<usize>() + 64);
    out.push_str(header);
    out.push('\n');
    for row in rows {
        // JSON string literals are valid JS and, for printable labels, valid Rust
        out.push_str("    ");
        out.push_str(&serde_json::to_string(row)?);
        out.push_str(",\n");
    }
    out.push_str("];\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BACKGROUND;

    fn sample() -> Grid {
        let mut grid = Grid::filled(4, 2, BACKGROUND);
        grid.set(0, 1, 'N');
        grid.set(1, 3, 'E');
        grid
    }

    #[test]
    fn test_js_framing() {
        let text = serialize(&sample(), OutputFormat::Js, DEFAULT_NAME).unwrap();
        assert_eq!(
            text,
            "const ASCII_WORLD = [\n    \".N..\",\n    \"...E\",\n];\n"
        );
    }

    #[test]
    fn test_rust_framing() {
        let text = serialize(&sample(), OutputFormat::Rust, "WORLD").unwrap();
        assert_eq!(
            text,
            "pub const WORLD: &[&str] = &[\n    \".N..\",\n    \"...E\",\n];\n"
        );
    }

    #[test]
    fn test_json_rows_parse_back() {
        let text = serialize(&sample(), OutputFormat::Json, DEFAULT_NAME).unwrap();
        let rows: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows, vec![".N..", "...E"]);
    }

    #[test]
    fn test_plain_framing() {
        let text = serialize(&sample(), OutputFormat::Plain, DEFAULT_NAME).unwrap();
        assert_eq!(text, ".N..\n...E\n");
    }

    #[test]
    fn test_quote_label_escaped() {
        let mut grid = Grid::filled(2, 1, BACKGROUND);
        grid.set(0, 0, '"');
        let text = serialize(&grid, OutputFormat::Js, "G").unwrap();
        assert!(text.contains(r#"    "\".","#));
    }
}
