use crate::units::Pt;
use thiserror::Error;

/// Contract breaches the pagination engine cannot recover from. Content that merely
/// doesn't fit is never an error; see [PolicyViolation](crate::PolicyViolation).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("renderer occupied {occupied} on page {page_index} but only {remaining} remained")]
    /// A renderer reported using more height than the area had left
    AreaOverrun {
        page_index: usize,
        occupied: Pt,
        remaining: Pt,
    },

    #[error("area provider returned an area of height {height} for page {page_index}")]
    /// The area provider handed out an area that can't hold anything
    DegenerateArea { page_index: usize, height: Pt },

    #[error("renderer still placed nothing on empty page {page_index} after forced placement")]
    /// A renderer ignored forced placement, which would otherwise loop forever
    NoProgress { page_index: usize },
}
