use super::caption::{is_page_number, is_toc_caption};

/// Whether the scan is currently inside a table-of-contents block.
///
/// Both the TOC pass and the body pass drive the same transitions so they
/// always agree on which fragments belong to the TOC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TocRegion {
    #[default]
    Outside,
    Inside,
}

/// What a fragment turned out to be once the region transition is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentRole {
    /// A TOC caption; opens (or re-opens) the TOC block.
    Caption,
    /// The page number that closes a TOC block.
    TocEnd,
    /// Any other line inside a TOC block.
    TocBody,
    /// A page number outside any TOC block.
    PageNumber,
    /// Ordinary document text.
    Body,
}

impl TocRegion {
    /// Classify `fragment` and return the region the next fragment is read in.
    pub fn step(self, fragment: &str) -> (TocRegion, FragmentRole) {
        if is_toc_caption(fragment) {
            return (TocRegion::Inside, FragmentRole::Caption);
        }
        let page_number = is_page_number(fragment);
        match (self, page_number) {
            (TocRegion::Inside, true) => (TocRegion::Outside, FragmentRole::TocEnd),
            (TocRegion::Inside, false) => (TocRegion::Inside, FragmentRole::TocBody),
            (TocRegion::Outside, true) => (TocRegion::Outside, FragmentRole::PageNumber),
            (TocRegion::Outside, false) => (TocRegion::Outside, FragmentRole::Body),
        }
    }

    pub fn is_inside(self) -> bool {
        self == TocRegion::Inside
    }
}
