use super::{LayoutArea, LayoutContext, LayoutResult};
use crate::units::Pt;
use std::any::Any;
use std::fmt;

/// Horizontal placement of a renderer inside the width of the area it was committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// An explicit, out-of-flow position. Renderers carrying one are laid out once and never
/// paginated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition {
    pub left: Pt,
    pub bottom: Pt,
}

/// The placement settings the pagination engine reads from (and, when it has to relax a
/// constraint, writes to) a renderer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlacementProperties {
    /// The content must not be split across areas
    pub keep_together: bool,
    /// The content must end up in the same area as whatever is added after it
    pub keep_with_next: bool,
    /// Place the content even though it doesn't fit. Set by the engine as a last resort.
    pub forced_placement: bool,
    /// Page a positioned renderer lands on; defaults to the current page
    pub page_index: Option<usize>,
    pub fixed_position: Option<FixedPosition>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
}

impl PlacementProperties {
    pub fn with_keep_together(mut self, keep_together: bool) -> PlacementProperties {
        self.keep_together = keep_together;
        self
    }

    pub fn with_keep_with_next(mut self, keep_with_next: bool) -> PlacementProperties {
        self.keep_with_next = keep_with_next;
        self
    }

    pub fn with_fixed_position(
        mut self,
        left: Pt,
        bottom: Pt,
        page_index: Option<usize>,
    ) -> PlacementProperties {
        self.fixed_position = Some(FixedPosition { left, bottom });
        self.page_index = page_index;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> PlacementProperties {
        self.horizontal_alignment = Some(alignment);
        self
    }

    /// Whether the renderer sits outside of the flow
    pub fn is_positioned(&self) -> bool {
        self.fixed_position.is_some()
    }
}

/// Capability of content that never splits but can shrink itself to fit, such as images
pub trait ImageLike {
    /// Height of the content before any scaling
    fn natural_height(&self) -> Pt;

    /// Scale the content down so that it fits within `area`
    fn auto_scale(&mut self, area: &LayoutArea);
}

/// Anything that can be placed by the [PaginationEngine](crate::PaginationEngine).
///
/// Laying out must be repeatable: calling [Renderer::layout] again with a different area
/// replaces the outcome of the previous attempt instead of building on it. The only state
/// a call may leave behind is the renderer's own occupied area. The engine relies on this
/// to try layouts speculatively and throw the attempt away.
pub trait Renderer: fmt::Debug {
    fn layout(&mut self, context: &LayoutContext) -> LayoutResult;

    /// Where the renderer ended up during its most recent layout
    fn occupied_area(&self) -> Option<&LayoutArea>;

    fn properties(&self) -> &PlacementProperties;

    fn properties_mut(&mut self) -> &mut PlacementProperties;

    /// Shift already laid out content
    fn move_by(&mut self, dx: Pt, dy: Pt);

    /// Image-like renderers are scaled instead of being split
    fn as_image_like(&mut self) -> Option<&mut dyn ImageLike> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Moves a laid out renderer within `available_width` according to its
/// [HorizontalAlignment]. Renderers are expected to be laid out flush left.
pub fn align_horizontally(renderer: &mut dyn Renderer, available_width: Pt) {
    let Some(alignment) = renderer.properties().horizontal_alignment else {
        return;
    };
    let Some(occupied) = renderer.occupied_area() else {
        return;
    };

    let free_space = available_width - occupied.bbox.width;
    if free_space <= Pt(0.0) {
        return;
    }

    match alignment {
        HorizontalAlignment::Left => {}
        HorizontalAlignment::Center => renderer.move_by(free_space / 2.0, Pt(0.0)),
        HorizontalAlignment::Right => renderer.move_by(free_space, Pt(0.0)),
    }
}
