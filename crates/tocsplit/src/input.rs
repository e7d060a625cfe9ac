use std::path::Path;

use crate::prelude::*;
use tocsplit_core::{Page, Section};

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        eyre!(Error::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })
}

/// Read a page sequence JSON file.
pub fn read_pages(path: &Path) -> Result<Vec<Page>> {
    let json = read_to_string(path)?;
    let pages = tocsplit_core::parse_pages(&json).map_err(|e| eyre!(e))?;
    log::debug!("Read {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// A section list read back from disk. `used_fallback` is only known when the
/// file is a whole `split --json` output.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFile {
    pub sections: Vec<Section>,
    pub used_fallback: Option<bool>,
}

/// Read a section list written by `tocsplit split --json` (either the whole
/// output object or just its `sections` array).
pub fn read_sections(path: &Path) -> Result<SectionFile> {
    let json = read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&json)
        .wrap_err_with(|| format!("Invalid section JSON in {}", path.display()))?;
    let file = match value.get("sections") {
        Some(sections) => SectionFile {
            sections: serde_json::from_value(sections.clone())
                .wrap_err_with(|| format!("Invalid `sections` array in {}", path.display()))?,
            used_fallback: value.get("used_fallback").and_then(|v| v.as_bool()),
        },
        None => SectionFile {
            sections: tocsplit_core::parse_sections(&json).map_err(|e| eyre!(e))?,
            used_fallback: None,
        },
    };
    Ok(file)
}
