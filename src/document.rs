use crate::engine::{AreaProvider, Flusher};
use crate::layout::{AreaBreak, LayoutArea, Margins, Renderer};
use crate::page::Page;
use crate::pagesize::{self, PageSize};
use crate::units::Pt;
use id_arena::{Arena, Id};

/// How far past the last page positioned content may ask to be placed
const MAX_PAGES_AHEAD: usize = 1024;

/// An in-memory document that hands out one layout area per page and collects the
/// renderers flushed onto each page. Pages are created on demand as the
/// [PaginationEngine](crate::PaginationEngine) asks for areas.
pub struct Document {
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    page_size: PageSize,
    margins: Margins,
    /// Index of the page the next area comes from
    next_page: usize,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(pagesize::LETTER, Margins::all(Pt(72.0)))
    }
}

impl Document {
    /// A document whose pages are `page_size` large unless a page break asks otherwise
    pub fn new(page_size: PageSize, margins: Margins) -> Document {
        Document {
            pages: Arena::new(),
            page_order: Vec::new(),
            page_size,
            margins,
            next_page: 0,
        }
    }

    /// Add a page to the end of the document, returning its ID
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The page at the given 0-based index
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.page_order.get(index).map(|&id| &self.pages[id])
    }

    /// All pages, in document order
    pub fn pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.page_order.iter().map(|&id| &self.pages[id])
    }

    /// Get the 0-based index of a page given its ID
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|&p| p == page)
    }

    fn new_page(&self, size: PageSize) -> Page {
        Page::new(size, Some(self.margins.clone()))
    }

    /// Make sure the document has at least `count` pages
    fn ensure_pages(&mut self, count: usize) {
        while self.page_order.len() < count {
            let page = self.new_page(self.page_size);
            self.add_page(page);
        }
    }
}

impl AreaProvider for Document {
    fn next_area(&mut self, area_break: Option<&AreaBreak>) -> LayoutArea {
        let index = self.next_page;
        self.next_page += 1;

        // positioned content may already have created this page
        let id = match self.page_order.get(index) {
            Some(&id) => id,
            None => {
                let size = area_break
                    .and_then(|b| b.page_size)
                    .unwrap_or(self.page_size);
                let page = self.new_page(size);
                self.add_page(page)
            }
        };
        LayoutArea::new(index, self.pages[id].content_box)
    }
}

impl Flusher for Document {
    fn flush_renderer(&mut self, renderer: Box<dyn Renderer>) {
        let index = renderer
            .occupied_area()
            .map(|area| area.page_index)
            .unwrap_or_else(|| self.next_page.saturating_sub(1));
        let limit = self.page_order.len().max(self.next_page) + MAX_PAGES_AHEAD;
        if index >= limit {
            tracing::warn!(
                page_index = index,
                page_count = self.page_count(),
                "dropping content placed too far past the last page"
            );
            return;
        }
        self.ensure_pages(index + 1);
        let id = self.page_order[index];
        self.pages[id].add_renderer(renderer);
    }
}
