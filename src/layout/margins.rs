use crate::rect::Rect;
use crate::units::Pt;

/// Space kept clear around the edges of a page. The document driver applies them to the
/// page size to get the content box that layout areas are cut from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// The part of `media_box` that lies within the margins
    pub fn apply(&self, media_box: Rect) -> Rect {
        Rect {
            x: media_box.x + self.left,
            y: media_box.y + self.bottom,
            width: media_box.width - self.left - self.right,
            height: media_box.height - self.top - self.bottom,
        }
    }
}
