use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ValidateOptions {
    /// Path to a section list written by `tocsplit split --json`
    pub path: std::path::PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(options: ValidateOptions, global: crate::Global) -> Result<()> {
    let file = crate::input::read_sections(&options.path)?;
    if global.verbose {
        eprintln!("Validating {} sections", file.sections.len());
    }

    let report = match file.used_fallback {
        Some(is_fallback) => tocsplit_core::validate_with(&file.sections, is_fallback),
        None => tocsplit_core::validate(&file.sections),
    };

    if options.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", crate::split::format_report_text(&report));
    }

    if report.passed {
        Ok(())
    } else {
        Err(eyre!(Error::ValidationFailed(report.section_count)))
    }
}
