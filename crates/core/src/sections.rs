use log::debug;

use crate::normalize::loosely_equal;
use crate::parser::{extract_numbering, FragmentRole, TocRegion};
use crate::types::{Page, Section, Toc, FALLBACK_NUMBER};

/// Accumulator threaded through the body pass.
#[derive(Debug, Default)]
struct Cutter {
    region: TocRegion,
    open: Option<Section>,
    done: Vec<Section>,
}

impl Cutter {
    fn feed(mut self, toc: &Toc, page: usize, fragment: &str) -> Self {
        let (region, role) = self.region.step(fragment);
        self.region = region;
        if role != FragmentRole::Body {
            return self;
        }

        if let Some((number, title)) = match_heading(toc, fragment) {
            self.close_before(page);
            debug!("Section {number:?} starts on page {page}");
            self.open = Some(Section {
                number: number.to_string(),
                title: title.to_string(),
                content: Vec::new(),
                start_page: page,
                end_page: page,
            });
        } else if let Some(section) = self.open.as_mut() {
            section.content.push(fragment.to_string());
            section.end_page = page;
        }
        // Text before the first heading has no section to attach to.
        self
    }

    /// Close the open section because a new heading starts on `page`.
    fn close_before(&mut self, page: usize) {
        if let Some(mut section) = self.open.take() {
            section.end_page = if page == section.start_page {
                page
            } else {
                page.saturating_sub(1)
            };
            self.done.push(section);
        }
    }

    fn finish(mut self, last_page: usize) -> Vec<Section> {
        if let Some(mut section) = self.open.take() {
            section.end_page = last_page;
            self.done.push(section);
        }
        self.done
    }
}

/// Find the TOC entry a body line is the heading of.
///
/// The line's numbering must equal the entry's number. When both carry a
/// title, one normalized title must contain the other. Entries are tried in
/// TOC order and the first match wins.
pub fn match_heading<'a>(toc: &'a Toc, line: &str) -> Option<(&'a str, &'a str)> {
    let found = extract_numbering(line)?;
    toc.iter().find(|(number, title)| {
        *number == found.number
            && (title.is_empty() || !found.has_title() || loosely_equal(title, &found.title))
    })
}

/// Cut the page sequence into sections at every line that matches a TOC entry.
///
/// TOC blocks and page-number lines are skipped. Heading lines are not part
/// of any section's content.
pub fn build_sections(pages: &[Page], toc: &Toc) -> Vec<Section> {
    let Some(last) = pages.last() else {
        return Vec::new();
    };
    pages
        .iter()
        .flat_map(|page| page.fragments.iter().map(move |f| (page.index, f)))
        .fold(Cutter::default(), |cutter, (page, fragment)| {
            cutter.feed(toc, page, fragment)
        })
        .finish(last.index)
}

/// A single section spanning the whole document, used when no TOC is found.
pub fn build_fallback(pages: &[Page], title: &str) -> Vec<Section> {
    let Some(last) = pages.last() else {
        return Vec::new();
    };
    vec![Section {
        number: FALLBACK_NUMBER.to_string(),
        title: title.to_string(),
        content: pages
            .iter()
            .flat_map(|page| page.fragments.iter().cloned())
            .collect(),
        start_page: 0,
        end_page: last.index,
    }]
}
