use super::{AreaProvider, Flusher, Hanging, PaginationEngine, PolicyViolation};
use crate::error::LayoutError;
use crate::layout::{LayoutArea, LayoutContext, LayoutResult, Renderer};
use crate::units::Pt;

/// Where a hanging renderer ends up relative to the renderer that follows it
enum Placement {
    /// Both fit as the hanging renderer was laid out
    AsLaidOut,
    Split(Split),
    /// The hanging renderer moves to a fresh area
    Moved {
        area: LayoutArea,
        occupied: LayoutArea,
    },
    GiveUp,
}

/// A hanging renderer split so its overflow and the next renderer share the next area
struct Split {
    split_area: LayoutArea,
    occupied: LayoutArea,
    split: Box<dyn Renderer>,
    next_area: LayoutArea,
    overflow: Box<dyn Renderer>,
    overflow_occupied: LayoutArea,
}

impl<D: AreaProvider + Flusher> PaginationEngine<D> {
    /// Commits the hanging keep-with-next renderer, if there is one, in a way that lets
    /// `next` follow it without a page break in between.
    ///
    /// In order of preference: place both as laid out; split the hanging renderer so its
    /// overflow and `next` share the following area; move the hanging renderer to a fresh
    /// area with `next` behind it. If none of that works the constraint is dropped.
    ///
    /// If the driver fails to supply an area while looking for a placement, nothing is
    /// committed and the renderer keeps hanging.
    pub(super) fn resolve_keep_with_next(
        &mut self,
        next: &mut dyn Renderer,
    ) -> Result<(), LayoutError> {
        let Some(mut hanging) = self.hanging.take() else {
            return Ok(());
        };

        let placement = match self.find_placement(&mut hanging, next) {
            Ok(placement) => placement,
            Err(err) => {
                hanging
                    .renderer
                    .layout(&LayoutContext::new(hanging.laid_out_in.clone()));
                self.hanging = Some(hanging);
                return Err(err);
            }
        };

        match placement {
            Placement::AsLaidOut => self.commit(hanging.renderer, &hanging.occupied),
            Placement::Split(split) => {
                self.set_area(split.split_area);
                self.commit(split.split, &split.occupied)?;
                self.set_area(split.next_area);
                self.commit(split.overflow, &split.overflow_occupied)
            }
            Placement::Moved { area, occupied } => {
                self.set_area(area);
                self.commit(hanging.renderer, &occupied)
            }
            Placement::GiveUp => {
                let Hanging {
                    mut renderer,
                    occupied,
                    laid_out_in,
                } = hanging;
                self.report(PolicyViolation::KeepWithNextNotHonored {
                    page_index: occupied.page_index,
                });
                // undo the speculative layouts
                let occupied = match renderer.layout(&LayoutContext::new(laid_out_in)) {
                    LayoutResult::Full { occupied } => occupied,
                    _ => occupied,
                };
                self.commit(renderer, &occupied)
            }
        }
    }

    /// Probes the placements in order of preference. Areas requested along the way but
    /// not used are kept as the deferred area.
    fn find_placement(
        &mut self,
        hanging: &mut Hanging,
        next: &mut dyn Renderer,
    ) -> Result<Placement, LayoutError> {
        let current = self.area()?.clone();
        let original_height = hanging.occupied.height();

        let rest = current.remainder_after(original_height);
        if !next.layout(&LayoutContext::new(rest)).is_nothing() {
            return Ok(Placement::AsLaidOut);
        }

        for split_height in self.config.split_search.candidates(original_height) {
            let renderer = hanging.renderer.as_mut();
            if let Some(split) = self.split_across_break(renderer, next, &current, split_height)? {
                return Ok(Placement::Split(split));
            }
        }

        if !current.is_empty {
            let fresh = self.request_area(None)?;
            if let LayoutResult::Full { occupied } =
                hanging.renderer.layout(&LayoutContext::new(fresh.clone()))
            {
                let behind = fresh.remainder_after(occupied.height());
                if !next.layout(&LayoutContext::new(behind)).is_nothing() {
                    return Ok(Placement::Moved {
                        area: fresh,
                        occupied,
                    });
                }
            }
            self.deferred_area = Some(fresh);
        }

        Ok(Placement::GiveUp)
    }

    /// Tries laying `hanging` out into the top `split_height` of `current`, continuing its
    /// overflow on the next area and `next` right behind that. Succeeds only if all three
    /// pieces fit.
    fn split_across_break(
        &mut self,
        hanging: &mut dyn Renderer,
        next: &mut dyn Renderer,
        current: &LayoutArea,
        split_height: Pt,
    ) -> Result<Option<Split>, LayoutError> {
        let mut split_area = current.clone();
        split_area
            .bbox
            .set_height(split_height)
            .move_up(current.height() - split_height);

        let LayoutResult::Partial {
            occupied,
            split,
            mut overflow,
        } = hanging.layout(&LayoutContext::new(split_area.clone()))
        else {
            return Ok(None);
        };

        let next_area = self.request_area(None)?;
        let overflow_occupied = match overflow.layout(&LayoutContext::new(next_area.clone())) {
            LayoutResult::Full { occupied } => occupied,
            _ => {
                self.deferred_area = Some(next_area);
                return Ok(None);
            }
        };

        let behind = next_area.remainder_after(overflow_occupied.height());
        if next.layout(&LayoutContext::new(behind)).is_nothing() {
            self.deferred_area = Some(next_area);
            return Ok(None);
        }

        Ok(Some(Split {
            split_area,
            occupied,
            split,
            next_area,
            overflow,
            overflow_occupied,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::Block;
    use crate::engine::{AreaProvider, Flusher, PaginationEngine, PolicyViolation};
    use crate::error::LayoutError;
    use crate::layout::{AreaBreak, LayoutArea, Renderer};
    use crate::rect::Rect;
    use crate::units::Pt;

    /// Hands out 100x200 areas and remembers what was flushed, in order. Areas past
    /// `limit` have no height.
    #[derive(Default)]
    struct Pages {
        handed_out: usize,
        limit: Option<usize>,
        flushed: Vec<(String, usize, Pt)>,
    }

    impl AreaProvider for Pages {
        fn next_area(&mut self, _area_break: Option<&AreaBreak>) -> LayoutArea {
            let height = match self.limit {
                Some(limit) if self.handed_out >= limit => Pt(0.0),
                _ => Pt(200.0),
            };
            let area = LayoutArea::new(
                self.handed_out,
                Rect::new(Pt(0.0), Pt(0.0), Pt(100.0), height),
            );
            self.handed_out += 1;
            area
        }
    }

    impl Flusher for Pages {
        fn flush_renderer(&mut self, renderer: Box<dyn Renderer>) {
            let block = renderer
                .as_any()
                .downcast_ref::<Block>()
                .expect("only blocks are used here");
            let occupied = block.occupied_area().expect("flushed blocks are laid out");
            self.flushed
                .push((block.label().to_string(), occupied.page_index, occupied.height()));
        }
    }

    fn kept(block: Block) -> Box<Block> {
        let mut block = block;
        block.properties_mut().keep_with_next = true;
        Box::new(block)
    }

    #[test]
    fn holds_renderer_until_the_next_arrives() {
        let mut engine = PaginationEngine::new(Pages::default());
        engine.add_child(kept(Block::fixed("a", Pt(50.0)))).unwrap();
        assert!(engine.is_hanging());
        assert!(engine.driver().flushed.is_empty());

        engine.add_child(Box::new(Block::fixed("b", Pt(40.0)))).unwrap();
        assert!(!engine.is_hanging());
        assert_eq!(engine.current_area().unwrap().height(), Pt(110.0));
    }

    #[test]
    fn splits_hanging_renderer_so_next_follows_its_overflow() {
        let mut engine = PaginationEngine::new(Pages::default());
        engine.add_child(kept(Block::lines("a", 19, Pt(10.0)))).unwrap();
        engine.add_child(Box::new(Block::fixed("b", Pt(40.0)))).unwrap();

        let pages = engine.close().unwrap();
        assert_eq!(
            pages.flushed,
            vec![
                ("a".to_string(), 0, Pt(150.0)),
                ("a".to_string(), 1, Pt(40.0)),
                ("b".to_string(), 1, Pt(40.0)),
            ]
        );
        assert_eq!(pages.handed_out, 2);
    }

    #[test]
    fn moves_hanging_renderer_to_a_fresh_area() {
        let mut engine = PaginationEngine::new(Pages::default());
        engine.add_child(Box::new(Block::fixed("intro", Pt(100.0)))).unwrap();
        engine.add_child(kept(Block::fixed("heading", Pt(80.0)))).unwrap();
        engine.add_child(Box::new(Block::fixed("body", Pt(40.0)))).unwrap();

        assert!(engine.policy_violations().is_empty());
        let pages = engine.close().unwrap();
        assert_eq!(
            pages.flushed,
            vec![
                ("intro".to_string(), 0, Pt(100.0)),
                ("heading".to_string(), 1, Pt(80.0)),
                ("body".to_string(), 1, Pt(40.0)),
            ]
        );
    }

    #[test]
    fn gives_up_when_nothing_works() {
        let mut engine = PaginationEngine::new(Pages::default());
        engine.add_child(kept(Block::fixed("a", Pt(190.0)))).unwrap();
        engine.add_child(Box::new(Block::fixed("b", Pt(40.0)))).unwrap();

        assert_eq!(
            engine.policy_violations(),
            &[PolicyViolation::KeepWithNextNotHonored { page_index: 0 }]
        );
        let pages = engine.close().unwrap();
        assert_eq!(
            pages.flushed,
            vec![
                ("a".to_string(), 0, Pt(190.0)),
                ("b".to_string(), 1, Pt(40.0)),
            ]
        );
    }

    #[test]
    fn gives_up_with_the_layout_it_was_held_with() {
        let mut engine = PaginationEngine::new(Pages::default());
        engine.add_child(kept(Block::lines("a", 19, Pt(10.0)))).unwrap();
        // too tall to follow any overflow of "a", so every split attempt fails
        engine.add_child(Box::new(Block::fixed("b", Pt(200.0)))).unwrap();

        assert_eq!(
            engine.policy_violations(),
            &[PolicyViolation::KeepWithNextNotHonored { page_index: 0 }]
        );
        let pages = engine.close().unwrap();
        assert_eq!(
            pages.flushed,
            vec![
                ("a".to_string(), 0, Pt(190.0)),
                ("b".to_string(), 1, Pt(200.0)),
            ]
        );
    }

    #[test]
    fn keeps_hanging_when_no_area_can_be_had() {
        let pages = Pages {
            limit: Some(1),
            ..Pages::default()
        };
        let mut engine = PaginationEngine::new(pages);
        engine.add_child(kept(Block::lines("a", 19, Pt(10.0)))).unwrap();

        let err = engine
            .add_child(Box::new(Block::fixed("b", Pt(40.0))))
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::DegenerateArea {
                page_index: 1,
                height: Pt(0.0),
            }
        );
        assert!(engine.is_hanging());
        assert!(engine.driver().flushed.is_empty());
        assert_eq!(engine.current_area().unwrap().height(), Pt(200.0));
    }
}
