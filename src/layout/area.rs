use crate::rect::Rect;
use crate::units::Pt;

/// A page-scoped rectangle of space that content can be laid out into. As content is
/// committed the box shrinks from the top, so `bbox` is always the space that remains.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutArea {
    /// 0-based index of the page this area lives on
    pub page_index: usize,
    pub bbox: Rect,
    /// `true` until something has been committed into this area
    pub is_empty: bool,
}

impl LayoutArea {
    /// A fresh, empty area
    pub fn new(page_index: usize, bbox: Rect) -> LayoutArea {
        LayoutArea {
            page_index,
            bbox,
            is_empty: true,
        }
    }

    /// The height that is still available in this area
    pub fn height(&self) -> Pt {
        self.bbox.height
    }

    /// A copy of this area with `used` taken off the top
    pub fn remainder_after(&self, used: Pt) -> LayoutArea {
        let mut rest = self.clone();
        rest.bbox.set_height(self.bbox.height - used);
        rest
    }

    /// Takes `used` off the top of the area and marks it as holding content
    pub fn consume(&mut self, used: Pt) {
        self.bbox.set_height(self.bbox.height - used);
        self.is_empty = false;
    }
}

/// Everything a [Renderer](crate::layout::Renderer) gets to see while laying itself out.
/// The area is always a private copy; nothing a renderer does to it leaks back into the
/// engine's bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    pub area: LayoutArea,
}

impl LayoutContext {
    pub fn new(area: LayoutArea) -> LayoutContext {
        LayoutContext { area }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> LayoutArea {
        LayoutArea::new(0, Rect::new(Pt(0.0), Pt(0.0), Pt(100.0), Pt(200.0)))
    }

    #[test]
    fn remainder_leaves_the_original_alone() {
        let a = area();
        let rest = a.remainder_after(Pt(50.0));
        assert_eq!(rest.height(), Pt(150.0));
        assert_eq!(a.height(), Pt(200.0));
        assert!(rest.is_empty);
    }

    #[test]
    fn consuming_marks_the_area_used() {
        let mut a = area();
        a.consume(Pt(40.0));
        assert_eq!(a.height(), Pt(160.0));
        assert_eq!(a.bbox.y, Pt(0.0));
        assert!(!a.is_empty);
    }
}
