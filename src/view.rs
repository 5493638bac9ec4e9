// ABOUTME: View contract between the slide navigator and whatever displays the deck
// ABOUTME: Includes DeckView, an in-memory view whose counter and controls may be absent

use log::debug;

/// Rendering contract the navigator drives.
///
/// Implementations reflect navigation state; they never decide it.
pub trait SlideView {
    /// Mark `index` as the only active slide.
    fn set_active(&mut self, index: usize);

    /// Show the 1-based position of the active slide.
    fn set_counter(&mut self, position: usize);

    /// Enable or disable the previous/next controls.
    fn set_controls_enabled(&mut self, prev: bool, next: bool);

    /// Show the deck size. Called once when the navigator is created.
    fn set_total(&mut self, _total: usize) {}
}

/// Enabled state of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// In-memory view of a deck.
///
/// The counter and the controls are optional, matching pages that omit
/// those elements. Updates to a missing element are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckView {
    active: Vec<bool>,
    counter: Option<usize>,
    total: Option<usize>,
    controls: Option<Controls>,
}

impl DeckView {
    /// A view with a counter and both controls present
    pub fn new(slide_count: usize) -> Self {
        Self {
            active: vec![false; slide_count],
            counter: Some(0),
            total: Some(0),
            controls: Some(Controls::default()),
        }
    }

    /// Drop the counter and total labels
    pub fn without_counter(mut self) -> Self {
        self.counter = None;
        self.total = None;
        self
    }

    /// Drop the previous/next controls
    pub fn without_controls(mut self) -> Self {
        self.controls = None;
        self
    }

    pub fn active_slides(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, active)| active.then_some(i))
            .collect()
    }

    pub fn counter(&self) -> Option<usize> {
        self.counter
    }

    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn controls(&self) -> Option<Controls> {
        self.controls
    }
}

impl SlideView for DeckView {
    fn set_active(&mut self, index: usize) {
        for (i, active) in self.active.iter_mut().enumerate() {
            *active = i == index;
        }
    }

    fn set_counter(&mut self, position: usize) {
        match self.counter.as_mut() {
            Some(counter) => *counter = position,
            None => debug!("No counter element, skipping counter update"),
        }
    }

    fn set_controls_enabled(&mut self, prev: bool, next: bool) {
        match self.controls.as_mut() {
            Some(controls) => {
                controls.prev_enabled = prev;
                controls.next_enabled = next;
            }
            None => debug!("No navigation controls, skipping control update"),
        }
    }

    fn set_total(&mut self, total: usize) {
        if let Some(t) = self.total.as_mut() {
            *t = total;
        }
    }
}
