//! Paginates a stream of layoutable renderers into pages.
//!
//! Content is pushed into a [PaginationEngine] one [Renderer](layout::Renderer) at a time.
//! The engine pulls areas from an [AreaProvider], decides how much of each renderer fits,
//! continues the overflow on the next area, honours keep-together and keep-with-next
//! where it can, and hands finished renderers to a [Flusher]. [Document] is a ready-made
//! driver that does both, collecting the result page by page in memory.

mod document;
pub use document::*;

mod engine;
pub use engine::*;

/// Areas, layout results and the renderer interface
pub mod layout;

/// Simple geometric renderers
pub mod blocks;

mod page;
pub use page::*;

/// Common page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

mod units;
pub use units::*;

mod error;
pub use error::*;
