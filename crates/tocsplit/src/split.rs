use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use tocsplit_core::{Section, SegmentOptions, Segmentation, Segmenter, ValidationReport};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SplitOptions {
    /// Path to the page sequence JSON file
    pub path: std::path::PathBuf,

    /// Title of the whole-document section used when no TOC is found
    #[arg(long, env = "TOCSPLIT_FALLBACK_TITLE", default_value = "전체 문서")]
    pub fallback_title: String,

    /// Output format: table or json (default: table)
    #[arg(long, env = "TOCSPLIT_OUTPUT", default_value = "table")]
    pub output: OutputFormat,

    /// Output as JSON (alias for --output json)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One row per section followed by the validation report
    Table,
    /// The full segmentation result as JSON
    Json,
}

pub fn run(options: SplitOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Reading pages from {}", options.path.display());
    }

    let output = split_data(&options)?;
    print!("{}", render_split(&output, &options)?);

    Ok(())
}

/// Everything `split` writes to stdout. Diagnostics go to stderr so the JSON
/// form stays parseable.
fn render_split(output: &Segmentation, options: &SplitOptions) -> Result<String> {
    // --json flag takes precedence
    if options.json || matches!(options.output, OutputFormat::Json) {
        Ok(format!("{}\n", format_split_json(output)?))
    } else {
        Ok(format_split_text(output))
    }
}

/// Read the page file and run the segmentation pipeline.
pub fn split_data(options: &SplitOptions) -> Result<Segmentation> {
    let pages = crate::input::read_pages(&options.path)?;
    let segmenter = Segmenter::new(SegmentOptions {
        fallback_title: options.fallback_title.clone(),
    });
    segmenter.segment(&pages).map_err(|e| eyre!(e))
}

fn format_split_json(output: &Segmentation) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_split_text(output: &Segmentation) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "SECTIONS ({} found, {} TOC entries{})",
            output.sections.len(),
            output.toc.len(),
            if output.used_fallback { ", no TOC" } else { "" }
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.sections.is_empty() {
        result.push_str(&format!("\n{}\n", "No sections.".yellow()));
    } else {
        result.push('\n');
        result.push_str(&format_sections_table(&output.sections));
    }

    result.push_str(&format_report_text(&output.report));
    result
}

fn format_sections_table(sections: &[Section]) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["#", "Title", "Pages", "Items", "Preview"]);
    for section in sections {
        table.add_row(prettytable::row![
            section.number,
            section.title,
            format!("{}-{}", section.start_page, section.end_page),
            section.content.len(),
            content_preview(&section.content.join(" "), 60)
        ]);
    }
    table.to_string()
}

/// Render a validation report; shared with the `validate` subcommand.
pub fn format_report_text(report: &ValidationReport) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "VALIDATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    let verdict = if report.passed {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    result.push_str(&format!("\n{}: {}\n", "Result".bright_white(), verdict));
    if report.is_fallback {
        result.push_str(&format!("  {}\n", "Single whole-document section".bright_black()));
    }
    if report.section_count == 0 {
        result.push_str(&format!("  {}\n", "No sections were produced".red()));
    }

    if !report.empty_sections.is_empty() {
        result.push_str(&format!(
            "  {}: {}\n",
            "Empty sections".green(),
            report.empty_sections.join(", ")
        ));
    }
    for gap in &report.gaps {
        let pages: Vec<String> = gap.missing_pages.iter().map(|p| p.to_string()).collect();
        result.push_str(&format!(
            "  {}: between {} and {} (pages {})\n",
            "Gap".green(),
            gap.after,
            gap.before,
            pages.join(", ")
        ));
    }
    for overlap in &report.overlaps {
        result.push_str(&format!(
            "  {}: {} ends on page {} after {} starts on page {}\n",
            "Overlap".green(),
            overlap.first,
            overlap.first_end,
            overlap.second,
            overlap.second_start
        ));
    }
    for range in &report.inverted_ranges {
        result.push_str(&format!(
            "  {}: {} starts on page {} but ends on page {}\n",
            "Inverted range".green(),
            range.number,
            range.start_page,
            range.end_page
        ));
    }

    result.push('\n');
    result
}

/// Produce a content preview truncated to approximately `max_chars` characters on a word boundary.
///
/// If the text fits, it is returned as-is. Otherwise it is cut at the last space
/// before `max_chars` and an ellipsis is appended.
fn content_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let boundary = trimmed
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let search_region = &trimmed[..boundary];
    match search_region.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", &trimmed[..last_space]),
        // No space found; hard-truncate at the char boundary.
        _ => format!("{}...", search_region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tocsplit_core::{segment, Page};

    fn sample_output() -> Segmentation {
        let pages = vec![
            Page::new(0, ["목차", "1. 개요", "2. 목표", "- 1 -"]),
            Page::new(1, ["1. 개요", "배경 설명"]),
            Page::new(2, ["2. 목표", "목표 설명"]),
        ];
        segment(&pages).unwrap()
    }

    // --- content_preview tests ---

    #[test]
    fn test_content_preview_short_text() {
        assert_eq!(content_preview("hello world", 100), "hello world");
    }

    #[test]
    fn test_content_preview_word_boundary() {
        let text = "the quick brown fox jumps over the lazy dog";
        assert_eq!(content_preview(text, 12), "the quick...");
    }

    #[test]
    fn test_content_preview_no_space() {
        let text = "a".repeat(20);
        assert_eq!(content_preview(&text, 10), format!("{}...", "a".repeat(10)));
    }

    #[test]
    fn test_content_preview_multibyte_chars() {
        // Hangul syllables are 3 bytes each; cutting by bytes would panic.
        let preview = content_preview("가나다라마바사아자차", 4);
        assert_eq!(preview, "가나다라...");
    }

    #[test]
    fn test_content_preview_empty() {
        assert_eq!(content_preview("   ", 10), "");
    }

    fn json_options() -> SplitOptions {
        SplitOptions {
            path: std::path::PathBuf::from("pages.json"),
            fallback_title: "전체 문서".to_string(),
            output: OutputFormat::Table,
            json: true,
        }
    }

    // --- formatting tests ---

    #[test]
    fn test_render_split_json_is_a_single_document() {
        let output = sample_output();
        let rendered = render_split(&output, &json_options()).unwrap();
        let parsed: Segmentation = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, output);
    }

    #[test]
    fn test_render_split_json_readable_by_validate() {
        use std::io::Write;

        let output = sample_output();
        let rendered = render_split(&output, &json_options()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(rendered.as_bytes()).unwrap();

        let read = crate::input::read_sections(file.path()).unwrap();
        assert_eq!(read.sections, output.sections);
        assert_eq!(read.used_fallback, Some(false));
    }

    #[test]
    fn test_format_split_json_structure() {
        let json = format_split_json(&sample_output()).unwrap();
        assert!(json.contains("\"sections\""));
        assert!(json.contains("\"report\""));
        assert!(json.contains("\"start_page\": 1"));
        assert!(json.contains("\"used_fallback\": false"));
    }

    #[test]
    fn test_format_split_text_lists_sections() {
        colored::control::set_override(false);
        let text = format_split_text(&sample_output());
        assert!(text.contains("SECTIONS (2 found, 2 TOC entries)"));
        assert!(text.contains("개요"));
        assert!(text.contains("1-1"));
        assert!(text.contains("PASSED"));
    }

    #[test]
    fn test_format_report_text_failures() {
        colored::control::set_override(false);
        let report = tocsplit_core::validate(&[]);
        let text = format_report_text(&report);
        assert!(text.contains("FAILED"));
        assert!(text.contains("No sections were produced"));
    }

    #[test]
    fn test_format_report_text_gap() {
        colored::control::set_override(false);
        let sections = vec![
            Section {
                number: "1".to_string(),
                title: "a".to_string(),
                content: vec!["x".to_string()],
                start_page: 0,
                end_page: 0,
            },
            Section {
                number: "2".to_string(),
                title: "b".to_string(),
                content: vec!["y".to_string()],
                start_page: 3,
                end_page: 3,
            },
        ];
        let text = format_report_text(&tocsplit_core::validate(&sections));
        assert!(text.contains("Gap: between 1 and 2 (pages 1, 2)"));
    }
}
