// ABOUTME: Slide navigation controller for the workshop-deck application
// ABOUTME: Owns the current slide index, keeps the view in sync and persists/restores the position

use crate::deck::Deck;
use crate::input::{Direction, NavCommand};
use crate::store::KeyValueStore;
use crate::view::SlideView;
use log::{debug, info, warn};

/// Owns the current slide index of a deck.
///
/// The index always satisfies `0 <= current <= last_index`. Out-of-range targets are
/// ignored rather than clamped, and nothing here ever fails: a bad target or
/// a corrupt saved position must not block the deck.
#[derive(Debug)]
pub struct SlideNavigator<V: SlideView> {
    last_index: usize,
    current: usize,
    view: V,
}

impl<V: SlideView> SlideNavigator<V> {
    /// Create a navigator positioned on the first slide.
    ///
    /// The view only learns the deck size here; call [`restore`](Self::restore)
    /// to render the initial slide.
    pub fn new(deck: &Deck, mut view: V) -> Self {
        view.set_total(deck.len());
        Self {
            last_index: deck.last_index(),
            current: 0,
            view,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.last_index + 1
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Show slide `index`. Returns false and changes nothing if it is out of range.
    pub fn go_to(&mut self, index: isize) -> bool {
        let index = match usize::try_from(index) {
            Ok(i) if i <= self.last_index => i,
            _ => {
                debug!(
                    "Ignoring out-of-range slide {} (deck has {})",
                    index,
                    self.slide_count()
                );
                return false;
            }
        };

        self.current = index;
        self.view.set_active(index);
        self.view.set_counter(index + 1);
        self.view
            .set_controls_enabled(index != 0, index != self.last_index);
        true
    }

    /// Move one slide in `direction`. Saturates at both ends.
    pub fn step(&mut self, direction: Direction) -> bool {
        match self.current.checked_add_signed(direction.offset()) {
            Some(target) if target <= self.last_index => self.go_to(target as isize),
            _ => {
                debug!("Already at the {:?} boundary", direction);
                false
            }
        }
    }

    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.last_index as isize)
    }

    /// Apply a navigation command. Commands that do not move the deck are ignored.
    pub fn apply(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::Step(direction) => self.step(direction),
            NavCommand::GoTo(index) => match isize::try_from(index) {
                Ok(index) => self.go_to(index),
                Err(_) => false,
            },
            NavCommand::First => self.first(),
            NavCommand::Last => self.last(),
            NavCommand::TogglePresentation | NavCommand::ToggleTheme => false,
        }
    }

    /// Restore a saved position, falling back to the first slide when the
    /// value is missing, not an integer, or out of range.
    pub fn restore(&mut self, saved: Option<&str>) {
        let target = saved.and_then(|raw| match raw.trim().parse::<isize>() {
            Ok(index) => Some(index),
            Err(e) => {
                warn!("Ignoring saved slide {:?}: {}", raw, e);
                None
            }
        });

        match target {
            Some(index) if self.go_to(index) => {
                info!("Restored slide {} of {}", index + 1, self.slide_count());
            }
            _ => {
                self.go_to(0);
            }
        }
    }

    /// The index to persist
    pub fn snapshot(&self) -> usize {
        self.current
    }

    /// Read the saved position from `store` and restore it
    pub fn restore_from<S: KeyValueStore + ?Sized>(&mut self, store: &S, key: &str) {
        let saved = store.get(key);
        self.restore(saved.as_deref());
    }

    /// Save the current position. A failed write is logged and dropped.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S, key: &str) {
        let value = self.snapshot().to_string();
        match store.set(key, &value) {
            Ok(()) => debug!("Saved slide index {} under {:?}", value, key),
            Err(e) => warn!("Failed to save slide index: {}", e),
        }
    }
}
