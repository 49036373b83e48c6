//! Building blocks shared by everything that takes part in pagination.
//!
//! A [Renderer] is asked to lay itself out into a [LayoutArea] and answers with a
//! [LayoutResult]: everything fit, some of it fit (with the rest handed back as an
//! overflow renderer), or nothing fit. The
//! [PaginationEngine](crate::PaginationEngine) strings these answers together into pages.
//!
//! # Example
//!
//! ```
//! use pageflow::layout::{LayoutArea, LayoutContext, LayoutStatus, Renderer};
//! use pageflow::blocks::Block;
//! use pageflow::{Pt, Rect};
//!
//! let area = LayoutArea::new(0, Rect::new(Pt(0.0), Pt(0.0), Pt(200.0), Pt(100.0)));
//! let mut block = Block::lines("paragraph", 8, Pt(20.0));
//!
//! let result = block.layout(&LayoutContext::new(area));
//! assert_eq!(result.status(), LayoutStatus::Partial);
//! ```

mod area;
mod margins;
mod renderer;
mod result;

pub use area::*;
pub use margins::*;
pub use renderer::*;
pub use result::*;
