// ABOUTME: Stylesheet and script resources for rendered decks
// ABOUTME: Loads local or remote CSS/JS and turns it into embedded or linked HTML tags

use crate::errors::{DeckError, Result};
use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

const FETCH_ATTEMPTS: u32 = 3;

/// Which tag a resource is emitted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Css,
    Js,
}

/// A CSS or JS file, either a local path or an http(s) URL.
#[derive(Debug, Clone)]
pub struct ResourceFile {
    pub path: String,
    pub is_remote: bool,
    pub timeout_ms: u64,
}

impl ResourceFile {
    /// Create a new ResourceFile from a path string.
    /// The path can be either a local file path or a URL.
    pub fn new(path: &str) -> Self {
        let is_remote = path.starts_with("http://") || path.starts_with("https://");
        Self {
            path: path.to_string(),
            is_remote,
            timeout_ms: 10000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Read the resource, fetching it over HTTP when remote
    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.fetch_remote_content()
        } else {
            self.read_local_content()
        }
    }

    /// Fetch content from a remote URL, retrying with exponential backoff
    fn fetch_remote_content(&self) -> Result<String> {
        info!("Fetching remote resource: {}", self.path);

        let client = Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()?;

        let mut retry_delay = 500;
        let mut last_error = None;

        for attempt in 1..=FETCH_ATTEMPTS {
            match client.get(&self.path).send() {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.text()?);
                }
                Ok(response) => {
                    last_error = Some(DeckError::ValidationError(format!(
                        "HTTP error: {}",
                        response.status()
                    )));
                }
                Err(e) => last_error = Some(DeckError::FetchError(e)),
            }

            if attempt < FETCH_ATTEMPTS {
                info!(
                    "Fetch attempt {} failed, retrying in {} ms",
                    attempt, retry_delay
                );
                std::thread::sleep(Duration::from_millis(retry_delay));
                retry_delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DeckError::ValidationError("Unknown error fetching resource".to_string())
        }))
    }

    fn read_local_content(&self) -> Result<String> {
        info!("Reading local resource: {}", self.path);
        let path = Path::new(&self.path);
        if !path.exists() {
            return Err(DeckError::PathNotFoundError(path.to_path_buf()));
        }

        fs::read_to_string(path).map_err(DeckError::FileReadError)
    }

    /// HTML tag for the resource. Remote resources are always linked; local
    /// ones are inlined when `embed` is set.
    pub fn tag(&self, kind: ResourceKind, embed: bool) -> Result<String> {
        if self.is_remote || !embed {
            return Ok(match kind {
                ResourceKind::Css => format!(r#"<link rel="stylesheet" href="{}">"#, self.path),
                ResourceKind::Js => format!(r#"<script src="{}"></script>"#, self.path),
            });
        }

        let content = self.content()?;
        Ok(match kind {
            ResourceKind::Css => format!("<style>{}</style>", content),
            ResourceKind::Js => format!("<script>{}</script>", content),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_remote_resources_are_linked() {
        let css = ResourceFile::new("https://example.com/deck.css");
        assert!(css.is_remote);
        assert_eq!(
            css.tag(ResourceKind::Css, true).unwrap(),
            r#"<link rel="stylesheet" href="https://example.com/deck.css">"#
        );

        let js = ResourceFile::new("http://example.com/deck.js");
        assert_eq!(
            js.tag(ResourceKind::Js, true).unwrap(),
            r#"<script src="http://example.com/deck.js"></script>"#
        );
    }

    #[test]
    fn test_local_resource_embedded_or_linked() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b".slide { display: none; }")
            .expect("Failed to write temp file");
        let path = file.path().to_str().unwrap();

        let css = ResourceFile::new(path);
        assert!(!css.is_remote);
        assert_eq!(
            css.tag(ResourceKind::Css, true).unwrap(),
            "<style>.slide { display: none; }</style>"
        );
        assert_eq!(
            css.tag(ResourceKind::Css, false).unwrap(),
            format!(r#"<link rel="stylesheet" href="{}">"#, path)
        );
    }

    #[test]
    fn test_missing_local_resource() {
        let js = ResourceFile::new("/nonexistent/deck/nav.js");
        let result = js.tag(ResourceKind::Js, true);
        assert!(matches!(result, Err(DeckError::PathNotFoundError(_))));
    }
}
