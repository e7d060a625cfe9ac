//! Line-level recognizers shared by the TOC pass and the body pass.

pub mod caption;
pub mod numbering;
pub mod span;

pub use caption::{is_page_number, is_toc_caption};
pub use numbering::{extract_numbering, Numbering, Scheme};
pub use span::{FragmentRole, TocRegion};
