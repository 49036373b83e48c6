use crate::units::*;

/// A rectangle anchored at its lower-left corner, following the PDF convention of
/// y-coordinates growing upwards.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Rect {
    pub fn new(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// The y-coordinate of the upper edge
    pub fn top(&self) -> Pt {
        self.y + self.height
    }

    /// The x-coordinate of the right edge
    pub fn right(&self) -> Pt {
        self.x + self.width
    }

    /// Changes the height while keeping the bottom edge where it is, i.e. the top edge moves.
    /// This is how the remaining space of an area shrinks as content is stacked into it
    /// from the top.
    pub fn set_height(&mut self, height: Pt) -> &mut Rect {
        self.height = height;
        self
    }

    /// Moves the rectangle up by `dy` without changing its size
    pub fn move_up(&mut self, dy: Pt) -> &mut Rect {
        self.y += dy;
        self
    }

    /// Moves the rectangle by the given offsets without changing its size
    pub fn move_by(&mut self, dx: Pt, dy: Pt) -> &mut Rect {
        self.x += dx;
        self.y += dy;
        self
    }

    /// A rectangle of the given height sitting flush against the top edge of this one
    pub fn top_slice(&self, height: Pt) -> Rect {
        Rect {
            x: self.x,
            y: self.top() - height,
            width: self.width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinking_keeps_the_bottom_edge() {
        let mut r = Rect::new(Pt(10.0), Pt(20.0), Pt(100.0), Pt(200.0));
        r.set_height(Pt(150.0));
        assert_eq!(r.y, Pt(20.0));
        assert_eq!(r.top(), Pt(170.0));
    }

    #[test]
    fn top_slice_is_flush_with_the_top() {
        let r = Rect::new(Pt(0.0), Pt(0.0), Pt(100.0), Pt(200.0));
        let slice = r.top_slice(Pt(50.0));
        assert_eq!(slice.y, Pt(150.0));
        assert_eq!(slice.top(), r.top());
        assert_eq!(slice.right(), Pt(100.0));
    }

    #[test]
    fn chained_moves() {
        let mut r = Rect::new(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0));
        r.set_height(Pt(5.0)).move_up(Pt(5.0)).move_by(Pt(2.0), Pt(1.0));
        assert_eq!(r, Rect::new(Pt(2.0), Pt(6.0), Pt(10.0), Pt(5.0)));
    }
}
