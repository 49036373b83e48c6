use crate::units::Pt;

/// How hard the engine tries to split a keep-with-next renderer so that the renderer
/// following it still fits right behind its overflow.
///
/// The defaults were tuned by eye rather than derived; treat them as knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSearch {
    /// How much shorter each successive split attempt is
    pub step: Pt,
    pub max_attempts: usize,
}

impl Default for SplitSearch {
    fn default() -> Self {
        SplitSearch {
            step: Pt(35.0),
            max_attempts: 5,
        }
    }
}

impl SplitSearch {
    /// Heights to try splitting a renderer of height `original` at, tallest first.
    /// Candidates never go down to half of the original height.
    pub fn candidates(&self, original: Pt) -> Vec<Pt> {
        (1..=self.max_attempts)
            .map(|i| original - self.step * i as f32)
            .take_while(|&height| height > original / 2.0)
            .collect()
    }
}

/// Settings for a [PaginationEngine](super::PaginationEngine)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Hand finished renderers to the flusher as soon as they are placed. When `false`
    /// they are queued until [flush](super::PaginationEngine::flush) or close.
    pub immediate_flush: bool,
    pub split_search: SplitSearch,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            immediate_flush: true,
            split_search: SplitSearch::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_immediate_flush(mut self, immediate_flush: bool) -> EngineConfig {
        self.immediate_flush = immediate_flush;
        self
    }

    pub fn with_split_search(mut self, split_search: SplitSearch) -> EngineConfig {
        self.split_search = split_search;
        self
    }
}
