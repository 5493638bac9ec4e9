// ABOUTME: Library module for the workshop-deck program.
// ABOUTME: Contains slide navigation, deck config loading and HTML deck rendering.

// Reexport modules
pub mod config;
pub mod deck;
pub mod errors;
pub mod html;
pub mod input;
pub mod navigator;
pub mod present;
pub mod resources;
pub mod session;
pub mod store;
pub mod template;
pub mod theme;
pub mod utils;
pub mod view;
pub mod watch;

// Reexport common types and functions
pub use config::{Config, DeckConfig};
pub use deck::Deck;
pub use errors::{DeckError, Result};
pub use html::{generate_html, write_html_to_file};
pub use input::{map_event, Control, Direction, InputEvent, Key, NavCommand};
pub use navigator::SlideNavigator;
pub use present::present;
pub use resources::ResourceFile;
pub use session::DeckSession;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;
pub use view::{DeckView, SlideView};
pub use watch::{watch_deck, WatchConfig};

#[cfg(test)]
mod tests;
