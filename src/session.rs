// ABOUTME: Deck session lifecycle: load, handle input, unload
// ABOUTME: Ties the navigator to its store and tracks theme and presentation mode

use crate::deck::Deck;
use crate::input::{map_event, InputEvent, NavCommand};
use crate::navigator::SlideNavigator;
use crate::store::KeyValueStore;
use crate::theme::Theme;
use crate::view::SlideView;
use log::{debug, info};

/// One viewing of a deck, from page load to unload.
pub struct DeckSession<V: SlideView, S: KeyValueStore> {
    navigator: SlideNavigator<V>,
    store: S,
    key: String,
    theme: Theme,
    presenting: bool,
}

impl<V: SlideView, S: KeyValueStore> DeckSession<V, S> {
    /// Load the deck and restore the saved position from `store`
    pub fn open(deck: &Deck, view: V, store: S, key: &str, theme: Theme) -> Self {
        let mut navigator = SlideNavigator::new(deck, view);
        navigator.restore_from(&store, key);
        info!(
            "Opened deck of {} slides at slide {}",
            deck.len(),
            navigator.current() + 1
        );

        Self {
            navigator,
            store,
            key: key.to_string(),
            theme,
            presenting: false,
        }
    }

    /// Handle one input event. Returns true if anything visible changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match map_event(event) {
            Some(command) => self.apply(command),
            None => {
                debug!("Ignoring input {:?}", event);
                false
            }
        }
    }

    pub fn apply(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::ToggleTheme => {
                self.theme = self.theme.toggle();
                info!("Switched to {} theme", self.theme);
                true
            }
            NavCommand::TogglePresentation => {
                self.presenting = !self.presenting;
                info!(
                    "Presentation mode {}",
                    if self.presenting { "on" } else { "off" }
                );
                true
            }
            command => self.navigator.apply(command),
        }
    }

    /// Persist the current position, as on page unload
    pub fn save(&mut self) {
        self.navigator.persist(&mut self.store, &self.key);
    }

    /// Persist and hand back the view and store
    pub fn close(mut self) -> (V, S) {
        self.save();
        (self.navigator.into_view(), self.store)
    }

    pub fn navigator(&self) -> &SlideNavigator<V> {
        &self.navigator
    }

    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_presenting(&self) -> bool {
        self.presenting
    }
}
