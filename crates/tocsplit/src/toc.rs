use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use tocsplit_core::{build_toc, TocEntry};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TocOptions {
    /// Path to the page sequence JSON file
    pub path: std::path::PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(options: TocOptions, global: crate::Global) -> Result<()> {
    let pages = crate::input::read_pages(&options.path)?;
    let entries = build_toc(&pages).to_entries();

    if global.verbose {
        eprintln!("Recovered {} TOC entries", entries.len());
    }

    if options.json {
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_toc_text(&entries));
    }

    Ok(())
}

fn format_toc_text(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", "No table of contents found.".yellow());
    }

    let mut table = new_table();
    for entry in entries {
        let title = if entry.title.is_empty() {
            "(no title)".to_string()
        } else {
            entry.title.clone()
        };
        table.add_row(prettytable::row![entry.number, title]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_toc_text_empty() {
        colored::control::set_override(false);
        assert_eq!(format_toc_text(&[]), "No table of contents found.\n");
    }

    #[test]
    fn test_format_toc_text_rows() {
        let entries = vec![
            TocEntry {
                number: "1".to_string(),
                title: "개요".to_string(),
            },
            TocEntry {
                number: "가".to_string(),
                title: String::new(),
            },
        ];
        let text = format_toc_text(&entries);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("개요"));
        assert!(lines[1].contains("(no title)"));
    }
}
