use super::{LayoutArea, Renderer};
use crate::pagesize::PageSize;

/// Request to continue on a new area, carried by page-break markers
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AreaBreak {
    /// Size of the page to break onto. `None` keeps the document's default size.
    pub page_size: Option<PageSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    Full,
    Partial,
    Nothing,
}

/// The outcome of asking a [Renderer] to lay itself out into an area.
#[derive(Debug)]
pub enum LayoutResult {
    /// Everything fit
    Full { occupied: LayoutArea },
    /// Some of the content fit. `split` holds what fit into the area and `overflow`
    /// the remainder, to be continued on another area.
    Partial {
        occupied: LayoutArea,
        split: Box<dyn Renderer>,
        overflow: Box<dyn Renderer>,
    },
    /// Nothing fit. `overflow` replaces the renderer for the next attempt; `None` means
    /// the renderer continues as it is. `area_break` is set by page-break markers.
    Nothing {
        overflow: Option<Box<dyn Renderer>>,
        area_break: Option<AreaBreak>,
    },
}

impl LayoutResult {
    pub fn full(occupied: LayoutArea) -> LayoutResult {
        LayoutResult::Full { occupied }
    }

    pub fn partial(
        occupied: LayoutArea,
        split: Box<dyn Renderer>,
        overflow: Box<dyn Renderer>,
    ) -> LayoutResult {
        LayoutResult::Partial {
            occupied,
            split,
            overflow,
        }
    }

    /// Nothing fit and the renderer should be retried as is
    pub fn nothing() -> LayoutResult {
        LayoutResult::Nothing {
            overflow: None,
            area_break: None,
        }
    }

    pub fn status(&self) -> LayoutStatus {
        match self {
            LayoutResult::Full { .. } => LayoutStatus::Full,
            LayoutResult::Partial { .. } => LayoutStatus::Partial,
            LayoutResult::Nothing { .. } => LayoutStatus::Nothing,
        }
    }

    pub fn is_nothing(&self) -> bool {
        self.status() == LayoutStatus::Nothing
    }

    /// The area that was actually used, if anything was
    pub fn occupied_area(&self) -> Option<&LayoutArea> {
        match self {
            LayoutResult::Full { occupied } | LayoutResult::Partial { occupied, .. } => {
                Some(occupied)
            }
            LayoutResult::Nothing { .. } => None,
        }
    }
}
