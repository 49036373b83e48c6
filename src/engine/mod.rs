//! The pagination engine: flows renderers into areas, one renderer at a time.
//!
//! For every renderer added, the engine keeps asking it to lay itself out into the
//! current area. Whatever fits is committed, whatever overflows is continued on the next
//! area pulled from the [AreaProvider], and committed renderers are handed to the
//! [Flusher]. When content can't fit even into an empty area, its constraints are relaxed
//! (first keep-together, then placement is forced) so that layout always terminates.
//!
//! A renderer marked keep-with-next is held back until the next renderer arrives, so the
//! two can be placed together, splitting or moving the held renderer if needed.
//!
//! ```
//! use pageflow::blocks::Block;
//! use pageflow::layout::Margins;
//! use pageflow::{pagesize, Document, PaginationEngine, Pt};
//!
//! let document = Document::new(pagesize::LETTER, Margins::all(Pt(72.0)));
//! let mut engine = PaginationEngine::new(document);
//!
//! engine.add_child(Box::new(Block::lines("intro", 40, Pt(14.0)))).unwrap();
//! engine.add_child(Box::new(Block::fixed("figure", Pt(300.0)))).unwrap();
//!
//! let document = engine.close().unwrap();
//! assert_eq!(document.page_count(), 2);
//! ```

mod config;
mod keep_with_next;
mod policy;

pub use config::*;
pub use policy::*;

use crate::error::LayoutError;
use crate::layout::{align_horizontally, AreaBreak, LayoutArea, LayoutContext, LayoutResult, Renderer};
use crate::units::Pt;

/// Slack allowed when checking a committed height against the space remaining
const HEIGHT_TOLERANCE: f32 = 1e-3;

/// Supplies the areas content is flowed into, typically one per page
pub trait AreaProvider {
    /// The area to continue in. `area_break` is set when a page-break marker asked for
    /// the new area.
    fn next_area(&mut self, area_break: Option<&AreaBreak>) -> LayoutArea;
}

/// Receives renderers whose placement is final
pub trait Flusher {
    fn flush_renderer(&mut self, renderer: Box<dyn Renderer>);
}

/// A keep-with-next renderer that has been laid out but not committed yet
struct Hanging {
    renderer: Box<dyn Renderer>,
    occupied: LayoutArea,
    laid_out_in: LayoutArea,
}

/// Flows renderers into the areas supplied by a driver `D`, which both provides areas and
/// flushes finished renderers. See the [module documentation](self).
pub struct PaginationEngine<D> {
    driver: D,
    config: EngineConfig,
    current_area: Option<LayoutArea>,
    current_page_index: usize,
    /// Area already obtained from the driver but not used yet; the next advance takes it
    deferred_area: Option<LayoutArea>,
    children: Vec<Box<dyn Renderer>>,
    positioned: Vec<Box<dyn Renderer>>,
    hanging: Option<Hanging>,
    violations: Vec<PolicyViolation>,
}

impl<D> PaginationEngine<D> {
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    /// Every constraint that had to be relaxed so far, oldest first
    pub fn policy_violations(&self) -> &[PolicyViolation] {
        &self.violations
    }

    /// Whether a keep-with-next renderer is waiting for its successor
    pub fn is_hanging(&self) -> bool {
        self.hanging.is_some()
    }

    /// Renderers placed but not flushed yet; always empty in immediate-flush mode
    pub fn queued(&self) -> usize {
        self.children.len() + self.positioned.len()
    }

    fn report(&mut self, violation: PolicyViolation) {
        tracing::warn!(page_index = violation.page_index(), "{violation}");
        self.violations.push(violation);
    }
}

impl<D: AreaProvider + Flusher> PaginationEngine<D> {
    pub fn new(driver: D) -> Self {
        PaginationEngine::with_config(driver, EngineConfig::default())
    }

    pub fn with_config(driver: D, config: EngineConfig) -> Self {
        PaginationEngine {
            driver,
            config,
            current_area: None,
            current_page_index: 0,
            deferred_area: None,
            children: Vec::new(),
            positioned: Vec::new(),
            hanging: None,
            violations: Vec::new(),
        }
    }

    /// The area content is currently flowing into, requesting the first one if needed
    pub fn current_area(&mut self) -> Result<&LayoutArea, LayoutError> {
        Ok(self.area()?)
    }

    /// Places `renderer`, flushing (or queueing) everything whose placement became final.
    ///
    /// On error `renderer` is dropped. A keep-with-next renderer that was waiting for it
    /// keeps waiting when no area could be had to resolve it.
    pub fn add_child(&mut self, renderer: Box<dyn Renderer>) -> Result<(), LayoutError> {
        self.area()?;

        if renderer.properties().is_positioned() {
            return self.add_positioned(renderer);
        }

        let mut renderer = renderer;
        self.resolve_keep_with_next(renderer.as_mut())?;

        // area abandoned after the renderer last failed to fit into it
        let mut stored_area: Option<LayoutArea> = None;
        let occupied = loop {
            let context = LayoutContext::new(self.area()?.clone());
            match renderer.layout(&context) {
                LayoutResult::Full { occupied } => break Some(occupied),
                LayoutResult::Partial {
                    split, overflow, ..
                } => {
                    renderer = overflow;
                    if let Some(image) = renderer.as_image_like() {
                        image.auto_scale(&context.area);
                        continue;
                    }
                    self.process_renderer(split)?;
                    self.advance_area(None)?;
                }
                LayoutResult::Nothing {
                    overflow,
                    area_break,
                } => {
                    if let Some(overflow) = overflow {
                        renderer = overflow;
                    }
                    if let Some(area_break) = area_break {
                        self.advance_area(Some(&area_break))?;
                        break None;
                    }

                    let area = context.area;
                    if let Some(image) = renderer.as_image_like() {
                        if area.height() < image.natural_height() && !area.is_empty {
                            self.advance_area(None)?;
                        }
                        let target = self.area()?.clone();
                        image.auto_scale(&target);
                        continue;
                    }

                    if area.is_empty {
                        let page_index = area.page_index;
                        let properties = renderer.properties_mut();
                        if properties.keep_together {
                            properties.keep_together = false;
                            self.report(PolicyViolation::KeepTogetherIgnored { page_index });
                            if let Some(stored) = stored_area.take() {
                                // split the content where it first failed to fit
                                self.deferred_area = self.current_area.take();
                                self.set_area(stored);
                            }
                            stored_area = Some(self.area()?.clone());
                        } else if properties.forced_placement {
                            return Err(LayoutError::NoProgress { page_index });
                        } else {
                            properties.forced_placement = true;
                            self.report(PolicyViolation::ForcedPlacement { page_index });
                        }
                        continue;
                    }

                    stored_area = Some(area);
                    self.advance_area(None)?;
                }
            }
        };

        let Some(occupied) = occupied else {
            return Ok(());
        };

        let keep_with_next = renderer.properties().keep_with_next;
        let forced = renderer.properties().forced_placement;
        if keep_with_next && forced {
            let page_index = occupied.page_index;
            self.report(PolicyViolation::KeepWithNextIgnoredForForcedPlacement { page_index });
            self.commit(renderer, &occupied)
        } else if keep_with_next {
            let laid_out_in = self.area()?.clone();
            self.hanging = Some(Hanging {
                renderer,
                occupied,
                laid_out_in,
            });
            Ok(())
        } else {
            self.commit(renderer, &occupied)
        }
    }

    /// Hands every queued renderer to the flusher. Only needed when immediate flushing
    /// is turned off. A renderer still waiting for its successor is not flushed; that
    /// happens on [close](Self::close).
    pub fn flush(&mut self) -> Result<(), LayoutError> {
        for renderer in self.children.drain(..) {
            self.driver.flush_renderer(renderer);
        }
        for renderer in self.positioned.drain(..) {
            self.driver.flush_renderer(renderer);
        }
        Ok(())
    }

    /// Places any renderer still waiting for a successor, flushes everything and returns
    /// the driver.
    pub fn close(mut self) -> Result<D, LayoutError> {
        if let Some(Hanging { mut renderer, .. }) = self.hanging.take() {
            renderer.properties_mut().keep_with_next = false;
            self.add_child(renderer)?;
        }
        if !self.config.immediate_flush {
            self.flush()?;
        }
        Ok(self.driver)
    }

    /// Positioned renderers are laid out once, on their own page, and kept as they are
    fn add_positioned(&mut self, mut renderer: Box<dyn Renderer>) -> Result<(), LayoutError> {
        let bbox = self.area()?.bbox;
        let page_index = renderer
            .properties()
            .page_index
            .unwrap_or(self.current_page_index);
        renderer.layout(&LayoutContext::new(LayoutArea::new(page_index, bbox)));

        if self.config.immediate_flush {
            self.driver.flush_renderer(renderer);
        } else {
            self.positioned.push(renderer);
        }
        Ok(())
    }

    fn area(&mut self) -> Result<&mut LayoutArea, LayoutError> {
        let area = match self.current_area.take() {
            Some(area) => area,
            None => {
                let area = self.request_area(None)?;
                self.current_page_index = area.page_index;
                area
            }
        };
        Ok(self.current_area.insert(area))
    }

    fn request_area(&mut self, area_break: Option<&AreaBreak>) -> Result<LayoutArea, LayoutError> {
        if let Some(area) = self.deferred_area.take() {
            return Ok(area);
        }

        let area = self.driver.next_area(area_break);
        if area.height() <= Pt(0.0) {
            return Err(LayoutError::DegenerateArea {
                page_index: area.page_index,
                height: area.height(),
            });
        }
        tracing::debug!(
            page_index = area.page_index,
            height = area.height().0,
            "advanced to a new area"
        );
        Ok(area)
    }

    fn set_area(&mut self, area: LayoutArea) {
        self.current_page_index = area.page_index;
        self.current_area = Some(area);
    }

    fn advance_area(&mut self, area_break: Option<&AreaBreak>) -> Result<(), LayoutError> {
        let area = self.request_area(area_break)?;
        self.set_area(area);
        Ok(())
    }

    /// Takes the renderer's height off the current area and processes it
    fn commit(
        &mut self,
        renderer: Box<dyn Renderer>,
        occupied: &LayoutArea,
    ) -> Result<(), LayoutError> {
        let area = self.area()?;
        let used = occupied.height();
        if used.0 > area.height().0 + HEIGHT_TOLERANCE {
            return Err(LayoutError::AreaOverrun {
                page_index: area.page_index,
                occupied: used,
                remaining: area.height(),
            });
        }
        let used = used.min(area.height());
        area.consume(used);
        self.process_renderer(renderer)
    }

    fn process_renderer(&mut self, mut renderer: Box<dyn Renderer>) -> Result<(), LayoutError> {
        let available_width = self.area()?.bbox.width;
        align_horizontally(renderer.as_mut(), available_width);
        if self.config.immediate_flush {
            self.driver.flush_renderer(renderer);
        } else {
            self.children.push(renderer);
        }
        Ok(())
    }
}
