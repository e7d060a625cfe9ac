use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::parser::{extract_numbering, FragmentRole, TocRegion};
use crate::types::{Page, Toc};

/// State of the TOC pass between two fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildState {
    OutsideToc,
    InToc,
    /// A number was seen on its own; its title should be on the next line.
    InTocPendingNumber(String),
}

impl BuildState {
    fn region(&self) -> TocRegion {
        match self {
            BuildState::OutsideToc => TocRegion::Outside,
            BuildState::InToc | BuildState::InTocPendingNumber(_) => TocRegion::Inside,
        }
    }
}

/// Collect every TOC entry in the document.
///
/// Each TOC caption (re)opens a block that runs until a page-number-only
/// fragment. All blocks feed the same mapping; the first occurrence of a
/// number wins. Returns an empty [`Toc`] when no caption is present.
pub fn build_toc(pages: &[Page]) -> Toc {
    let (_, toc) = pages
        .iter()
        .flat_map(|page| page.fragments.iter())
        .fold((BuildState::OutsideToc, Toc::new()), |(state, mut toc), fragment| {
            let next = step(state, fragment, &mut toc);
            (next, toc)
        });
    toc
}

fn step(state: BuildState, fragment: &str, toc: &mut Toc) -> BuildState {
    let (_, role) = state.region().step(fragment);
    match role {
        FragmentRole::Caption => {
            debug!("TOC caption: {:?}", fragment.trim());
            BuildState::InToc
        }
        FragmentRole::TocEnd => {
            if let BuildState::InTocPendingNumber(number) = &state {
                debug!("TOC ended with number {number:?} still waiting for a title");
            }
            debug!("TOC end marker: {:?}", fragment.trim());
            BuildState::OutsideToc
        }
        FragmentRole::TocBody => read_toc_line(state, fragment.trim(), toc),
        FragmentRole::PageNumber | FragmentRole::Body => BuildState::OutsideToc,
    }
}

fn read_toc_line(state: BuildState, line: &str, toc: &mut Toc) -> BuildState {
    match state {
        BuildState::InTocPendingNumber(number) => {
            if line.is_empty() {
                return BuildState::InTocPendingNumber(number);
            }
            match extract_numbering(line) {
                Some(next) if !next.has_title() => BuildState::InTocPendingNumber(next.number),
                _ => {
                    record(toc, number, line);
                    BuildState::InToc
                }
            }
        }
        _ => match extract_numbering(line) {
            Some(found) if found.has_title() => {
                record(toc, found.number, &found.title);
                BuildState::InToc
            }
            Some(found) => BuildState::InTocPendingNumber(found.number),
            // Decorative or blank lines inside a TOC are ignored.
            None => BuildState::InToc,
        },
    }
}

fn record(toc: &mut Toc, number: String, title: &str) {
    let title = strip_leaders(title);
    if toc.insert(number.clone(), title.clone()) {
        debug!("TOC entry {number:?} -> {title:?}");
    } else {
        debug!("TOC entry {number:?} already recorded, ignoring {title:?}");
    }
}

/// Drop a trailing dot leader and page number (`개요 ....... 3`).
fn strip_leaders(title: &str) -> String {
    static RE_LEADER: OnceLock<Regex> = OnceLock::new();
    let re = RE_LEADER.get_or_init(|| Regex::new(r"\s*[.·…‥・]{2,}\s*\d*\s*$").unwrap());
    let stripped = re.replace(title.trim(), "");
    if stripped.trim().is_empty() {
        title.trim().to_string()
    } else {
        stripped.trim().to_string()
    }
}
