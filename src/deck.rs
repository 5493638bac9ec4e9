// ABOUTME: Deck module for the workshop-deck application
// ABOUTME: Holds the fixed, ordered list of slide identifiers for one session

use crate::config::DeckConfig;
use crate::errors::{DeckError, Result};

/// An ordered, fixed-length sequence of slide identifiers.
///
/// Built once at startup and never mutated afterwards. A deck always holds at
/// least one slide, so `0` is always a valid index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<String>,
}

impl Deck {
    /// Create a deck from slide identifiers
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slides: Vec<String> = ids.into_iter().map(Into::into).collect();
        if slides.is_empty() {
            return Err(DeckError::ValidationError(
                "Deck must contain at least one slide".to_string(),
            ));
        }
        Ok(Self { slides })
    }

    /// Build a deck from the slides of a deck config.
    /// Slides without an id are named `slide{n}`, counting from 1.
    pub fn from_config(config: &DeckConfig) -> Result<Self> {
        Self::new(
            config
                .slides
                .iter()
                .enumerate()
                .map(|(i, slide)| slide.id_or_default(i)),
        )
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    // Never true for a constructed deck, kept for clippy's len_without_is_empty
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeckConfig, SlideConfig};

    #[test]
    fn test_empty_deck_is_rejected() {
        let result = Deck::new(Vec::<String>::new());
        assert!(matches!(result, Err(DeckError::ValidationError(_))));
    }

    #[test]
    fn test_from_config_names_missing_ids() {
        let config = DeckConfig {
            slides: vec![
                SlideConfig {
                    id: Some("intro".to_string()),
                    ..Default::default()
                },
                SlideConfig::default(),
            ],
            ..Default::default()
        };

        let deck = Deck::from_config(&config).expect("Failed to build deck");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get(0), Some("intro"));
        assert_eq!(deck.get(1), Some("slide2"));
        assert_eq!(deck.get(2), None);
        assert_eq!(deck.last_index(), 1);
    }
}
