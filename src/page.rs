use crate::layout::{LayoutArea, Margins, Renderer};
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::Pt;

/// A single page and the renderers that were flushed onto it
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Renderers placed on this page, in the order they were flushed
    pub contents: Vec<Box<dyn Renderer>>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let media_box = pagesize::media_box(size);
        let content_box = match margins {
            Some(margins) => margins.apply(media_box),
            None => media_box,
        };
        Page {
            media_box,
            content_box,
            contents: Vec::default(),
        }
    }

    pub fn add_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.contents.push(renderer);
    }

    /// Areas taken up by the page's renderers, in flush order
    pub fn occupied_areas(&self) -> impl Iterator<Item = &LayoutArea> + '_ {
        self.contents.iter().filter_map(|r| r.occupied_area())
    }

    /// Total height of everything on the page that is part of the flow
    pub fn flow_height(&self) -> Pt {
        self.contents
            .iter()
            .filter(|r| !r.properties().is_positioned())
            .filter_map(|r| r.occupied_area())
            .map(|a| a.height())
            .sum()
    }

    pub fn is_blank(&self) -> bool {
        self.contents.is_empty()
    }
}
