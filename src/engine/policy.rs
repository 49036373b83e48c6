use derive_more::Display;

/// A placement constraint the engine had to give up on so that layout could make
/// progress. These are logged and recorded, never raised as errors.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    #[display("element does not fit the area on page {page_index}; keep-together will be ignored")]
    KeepTogetherIgnored { page_index: usize },

    #[display("element does not fit the area on page {page_index}; it will be force placed")]
    ForcedPlacement { page_index: usize },

    #[display("element on page {page_index} was force placed; keep-with-next will be ignored")]
    KeepWithNextIgnoredForForcedPlacement { page_index: usize },

    #[display("could not keep the element on page {page_index} with the next one")]
    KeepWithNextNotHonored { page_index: usize },
}

impl PolicyViolation {
    pub fn page_index(&self) -> usize {
        match *self {
            PolicyViolation::KeepTogetherIgnored { page_index }
            | PolicyViolation::ForcedPlacement { page_index }
            | PolicyViolation::KeepWithNextIgnoredForForcedPlacement { page_index }
            | PolicyViolation::KeepWithNextNotHonored { page_index } => page_index,
        }
    }
}
