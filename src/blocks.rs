//! Plain geometric renderers: stacks of lines, images and page breaks.
//!
//! These carry no content of their own beyond their dimensions, which makes them handy for
//! driving the [PaginationEngine](crate::PaginationEngine) when all that matters is how
//! much space things take up.

use crate::layout::{
    AreaBreak, ImageLike, LayoutArea, LayoutContext, LayoutResult, PlacementProperties,
    Renderer,
};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use std::any::Any;

/// Slack for floating point noise when checking whether scaled content fits
const FIT_TOLERANCE: f32 = 1e-3;

/// A vertical stack of lines. A block can be split between any two lines but never
/// through a line, so a block with a single line is unbreakable.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    label: String,
    lines: Vec<Pt>,
    width: Option<Pt>,
    properties: PlacementProperties,
    occupied: Option<LayoutArea>,
}

impl Block {
    /// An unbreakable block of the given height
    pub fn fixed<S: ToString>(label: S, height: Pt) -> Block {
        Block::with_line_heights(label, vec![height])
    }

    /// `count` lines of `line_height` each
    pub fn lines<S: ToString>(label: S, count: usize, line_height: Pt) -> Block {
        Block::with_line_heights(label, vec![line_height; count])
    }

    pub fn with_line_heights<S: ToString>(label: S, lines: Vec<Pt>) -> Block {
        Block {
            label: label.to_string(),
            lines,
            width: None,
            properties: PlacementProperties::default(),
            occupied: None,
        }
    }

    /// Give the block a fixed width instead of spanning the whole area
    pub fn with_width(mut self, width: Pt) -> Block {
        self.width = Some(width);
        self
    }

    pub fn with_properties(mut self, properties: PlacementProperties) -> Block {
        self.properties = properties;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Height of all lines together
    pub fn height(&self) -> Pt {
        self.lines.iter().copied().sum()
    }

    /// A block holding some of this block's lines. Forced placement applies to a single
    /// attempt, so pieces don't inherit it.
    fn piece(&self, lines: &[Pt], occupied: Option<LayoutArea>) -> Box<Block> {
        let mut properties = self.properties.clone();
        properties.forced_placement = false;
        Box::new(Block {
            label: self.label.clone(),
            lines: lines.to_vec(),
            width: self.width,
            properties,
            occupied,
        })
    }

    fn occupy(&self, area: &LayoutArea, height: Pt) -> LayoutArea {
        let mut bbox = area.bbox.top_slice(height);
        if let Some(width) = self.width {
            bbox.width = width;
        }
        LayoutArea::new(area.page_index, bbox)
    }
}

impl Renderer for Block {
    fn layout(&mut self, context: &LayoutContext) -> LayoutResult {
        let area = &context.area;

        if let Some(position) = self.properties.fixed_position {
            let width = self.width.unwrap_or(area.bbox.width);
            let bbox = Rect::new(position.left, position.bottom, width, self.height());
            let occupied = LayoutArea::new(area.page_index, bbox);
            self.occupied = Some(occupied.clone());
            return LayoutResult::full(occupied);
        }

        let available = area.height();
        let mut used = Pt(0.0);
        let mut fitting = 0;
        for &line in self.lines.iter() {
            if used + line > available {
                break;
            }
            used += line;
            fitting += 1;
        }

        if fitting < self.lines.len() {
            if self.properties.forced_placement {
                if fitting == 0 {
                    // doesn't fit at all; place one line and let it be clipped
                    used = self.lines[0].min(available);
                    fitting = 1;
                }
            } else if fitting == 0 || self.properties.keep_together {
                self.occupied = None;
                return LayoutResult::nothing();
            }
        }

        let occupied = self.occupy(area, used);
        self.occupied = Some(occupied.clone());
        if fitting == self.lines.len() {
            return LayoutResult::full(occupied);
        }

        let split = self.piece(&self.lines[..fitting], Some(occupied.clone()));
        let overflow = self.piece(&self.lines[fitting..], None);
        LayoutResult::partial(occupied, split, overflow)
    }

    fn occupied_area(&self) -> Option<&LayoutArea> {
        self.occupied.as_ref()
    }

    fn properties(&self) -> &PlacementProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PlacementProperties {
        &mut self.properties
    }

    fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.bbox.move_by(dx, dy);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An image of fixed proportions. Images never split; when one doesn't fit into an area
/// it is scaled down until it does.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    label: String,
    natural_width: Pt,
    natural_height: Pt,
    scale: f32,
    properties: PlacementProperties,
    occupied: Option<LayoutArea>,
}

impl ImageBlock {
    pub fn new<S: ToString>(label: S, natural_width: Pt, natural_height: Pt) -> ImageBlock {
        ImageBlock {
            label: label.to_string(),
            natural_width,
            natural_height,
            scale: 1.0,
            properties: PlacementProperties::default(),
            occupied: None,
        }
    }

    pub fn with_properties(mut self, properties: PlacementProperties) -> ImageBlock {
        self.properties = properties;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size after scaling, as (width, height)
    pub fn size(&self) -> (Pt, Pt) {
        (self.natural_width * self.scale, self.natural_height * self.scale)
    }
}

impl Renderer for ImageBlock {
    fn layout(&mut self, context: &LayoutContext) -> LayoutResult {
        let area = &context.area;
        let (width, height) = self.size();

        let bbox = match self.properties.fixed_position {
            Some(position) => Rect::new(position.left, position.bottom, width, height),
            None => {
                let fits = height.0 <= area.height().0 + FIT_TOLERANCE;
                if !fits && !self.properties.forced_placement {
                    self.occupied = None;
                    return LayoutResult::nothing();
                }
                let mut bbox = area.bbox.top_slice(height.min(area.height()));
                bbox.width = width;
                bbox
            }
        };

        let occupied = LayoutArea::new(area.page_index, bbox);
        self.occupied = Some(occupied.clone());
        LayoutResult::full(occupied)
    }

    fn occupied_area(&self) -> Option<&LayoutArea> {
        self.occupied.as_ref()
    }

    fn properties(&self) -> &PlacementProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PlacementProperties {
        &mut self.properties
    }

    fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.bbox.move_by(dx, dy);
        }
    }

    fn as_image_like(&mut self) -> Option<&mut dyn ImageLike> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ImageLike for ImageBlock {
    fn natural_height(&self) -> Pt {
        self.natural_height
    }

    fn auto_scale(&mut self, area: &LayoutArea) {
        let mut scale: f32 = 1.0;
        if self.natural_height > Pt(0.0) {
            scale = scale.min(area.height().0 / self.natural_height.0);
        }
        if self.natural_width > Pt(0.0) {
            scale = scale.min(area.bbox.width.0 / self.natural_width.0);
        }
        self.scale = scale.max(0.0);
    }
}

/// Ends the current area; content added afterwards starts on a new one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBreak {
    area_break: AreaBreak,
    properties: PlacementProperties,
}

impl PageBreak {
    pub fn new() -> PageBreak {
        PageBreak::default()
    }

    /// Break onto a page of a different size
    pub fn with_page_size(page_size: PageSize) -> PageBreak {
        PageBreak {
            area_break: AreaBreak {
                page_size: Some(page_size),
            },
            properties: PlacementProperties::default(),
        }
    }
}

impl Renderer for PageBreak {
    fn layout(&mut self, _context: &LayoutContext) -> LayoutResult {
        LayoutResult::Nothing {
            overflow: None,
            area_break: Some(self.area_break),
        }
    }

    fn occupied_area(&self) -> Option<&LayoutArea> {
        None
    }

    fn properties(&self) -> &PlacementProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PlacementProperties {
        &mut self.properties
    }

    fn move_by(&mut self, _dx: Pt, _dy: Pt) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutStatus;

    fn context(height: f32) -> LayoutContext {
        LayoutContext::new(LayoutArea::new(
            0,
            Rect::new(Pt(0.0), Pt(0.0), Pt(100.0), Pt(height)),
        ))
    }

    #[test]
    fn block_splits_between_lines() {
        let mut block = Block::lines("p", 5, Pt(10.0));
        match block.layout(&context(32.0)) {
            LayoutResult::Partial {
                occupied,
                split,
                overflow,
            } => {
                assert_eq!(occupied.height(), Pt(30.0));
                assert_eq!(occupied.bbox.y, Pt(2.0));
                assert_eq!(split.occupied_area(), Some(&occupied));
                let overflow = overflow.as_any().downcast_ref::<Block>().unwrap();
                assert_eq!(overflow.line_count(), 2);
                assert!(overflow.occupied_area().is_none());
            }
            other => panic!("expected a split, got {other:?}"),
        }
    }

    #[test]
    fn keep_together_refuses_to_split() {
        let mut block = Block::lines("p", 5, Pt(10.0))
            .with_properties(PlacementProperties::default().with_keep_together(true));
        assert!(block.layout(&context(32.0)).is_nothing());
        assert!(block.occupied_area().is_none());
        assert_eq!(block.layout(&context(50.0)).status(), LayoutStatus::Full);
    }

    #[test]
    fn forced_block_is_clipped_to_the_area() {
        let mut block = Block::fixed("tall", Pt(300.0));
        assert!(block.layout(&context(200.0)).is_nothing());

        block.properties_mut().forced_placement = true;
        let result = block.layout(&context(200.0));
        assert_eq!(result.status(), LayoutStatus::Full);
        assert_eq!(result.occupied_area().unwrap().height(), Pt(200.0));
    }

    #[test]
    fn forced_pieces_do_not_stay_forced() {
        let mut block = Block::lines("p", 3, Pt(300.0));
        block.properties_mut().forced_placement = true;
        let LayoutResult::Partial { overflow, .. } = block.layout(&context(200.0)) else {
            panic!("expected a split");
        };
        assert!(!overflow.properties().forced_placement);
    }

    #[test]
    fn image_scales_down_to_fit() {
        let mut image = ImageBlock::new("logo", Pt(50.0), Pt(300.0));
        assert!(image.layout(&context(200.0)).is_nothing());

        let area = context(200.0).area;
        image.as_image_like().unwrap().auto_scale(&area);
        let result = image.layout(&context(200.0));
        assert_eq!(result.status(), LayoutStatus::Full);
        assert!((result.occupied_area().unwrap().height().0 - 200.0).abs() < 1e-3);
    }

    #[test]
    fn image_never_scales_up() {
        let mut image = ImageBlock::new("logo", Pt(50.0), Pt(20.0));
        let area = context(200.0).area;
        image.as_image_like().unwrap().auto_scale(&area);
        assert_eq!(image.scale(), 1.0);
    }

    #[test]
    fn page_break_asks_for_a_new_area() {
        let mut page_break = PageBreak::new();
        match page_break.layout(&context(200.0)) {
            LayoutResult::Nothing {
                overflow: None,
                area_break: Some(_),
            } => {}
            other => panic!("expected an area break, got {other:?}"),
        }
    }
}
