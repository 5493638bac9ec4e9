// ABOUTME: Configuration module for the workshop-deck application
// ABOUTME: Provides environment-driven settings and the JSON deck config with fallback defaults

use crate::errors::{DeckError, Result};
use crate::resources::ResourceFile;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::template::resolve_template;
use crate::theme::Theme;
use log::{error, info};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Footer shown on every slide when the config does not set `global.footer_text`
pub const DEFAULT_FOOTER: &str = "Mastering LLMs Workshop";

const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_STATE_PATH: &str = ".deck-state.json";

/// Global configuration for the application
pub struct Config {
    pub config_path: PathBuf,
    pub state_path: PathBuf,
    pub storage_key: String,
    pub theme: Theme,
    pub embed_resources: bool,
    pub default_css: Option<String>,
    pub default_js: Option<String>,
    pub fetch_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            theme: Theme::Light,
            embed_resources: true,
            default_css: None,
            default_js: None,
            fetch_timeout_ms: 10000, // 10 seconds
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config_path = env::var("DECK_CONFIG_PATH")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.config_path);
        let state_path = env::var("DECK_STATE_PATH")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.state_path);
        let storage_key = env::var("DECK_STORAGE_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.storage_key);
        let theme = Theme::from_preference(env::var("DECK_THEME").ok().as_deref());
        let embed_resources = env::var("EMBED_RESOURCES")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(true);
        let fetch_timeout_ms = env::var("FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.fetch_timeout_ms);

        Self {
            config_path,
            state_path,
            storage_key,
            theme,
            embed_resources,
            default_css: env::var("DEFAULT_CSS").ok().filter(|s| !s.is_empty()),
            default_js: env::var("DEFAULT_JS").ok().filter(|s| !s.is_empty()),
            fetch_timeout_ms,
        }
    }

    /// Resources to include when the command line names none
    pub fn resources_or_defaults(
        &self,
        css: Option<&[String]>,
        js: Option<&[String]>,
    ) -> (Vec<ResourceFile>, Vec<ResourceFile>) {
        let pick = |given: Option<&[String]>, fallback: &Option<String>| -> Vec<ResourceFile> {
            match given {
                Some(paths) => paths
                    .iter()
                    .map(|p| ResourceFile::new(p).with_timeout_ms(self.fetch_timeout_ms))
                    .collect(),
                None => fallback
                    .iter()
                    .map(|p| ResourceFile::new(p).with_timeout_ms(self.fetch_timeout_ms))
                    .collect(),
            }
        };
        (pick(css, &self.default_css), pick(js, &self.default_js))
    }
}

/// Text of a JSON scalar. Numbers and booleans are stringified; null,
/// arrays and objects count as absent.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_text_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_globals<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
        .collect())
}

/// Accepts `slides` as a list, or as an object of named slides
/// (`{"slide1": {...}, "slide2": {...}}`) kept in document order with the
/// names used as ids.
struct SlidesVisitor;

impl<'de> Visitor<'de> for SlidesVisitor {
    type Value = Vec<SlideConfig>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of slides or an object of named slides")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut slides = Vec::new();
        while let Some(slide) = seq.next_element::<Option<SlideConfig>>()? {
            slides.extend(slide);
        }
        Ok(slides)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut slides = Vec::new();
        while let Some((name, slide)) = map.next_entry::<String, Option<SlideConfig>>()? {
            if let Some(mut slide) = slide {
                if slide.id.is_none() {
                    slide.id = Some(name);
                }
                slides.push(slide);
            }
        }
        Ok(slides)
    }
}

fn slides_list_or_map<'de, D>(deserializer: D) -> std::result::Result<Vec<SlideConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(SlidesVisitor)
}

/// One agenda entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaModule {
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub description: String,
    /// Length in minutes, shown as written
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
}

/// One entry in the breaks schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakItem {
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideLink {
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub href: String,
}

/// Content of a single slide. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub instructor: Option<String>,
    /// Markdown body
    #[serde(default, deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(default)]
    pub modules: Vec<AgendaModule>,
    #[serde(default)]
    pub breaks: Vec<BreakItem>,
    #[serde(default)]
    pub link: Option<SlideLink>,
    /// Shown as `git clone <url>`
    #[serde(default, deserialize_with = "lenient_text")]
    pub repository_link: Option<String>,
    /// Shown as `Open: <url>`
    #[serde(default, deserialize_with = "lenient_text")]
    pub materials_link: Option<String>,
}

impl SlideConfig {
    /// The slide id, or `slide{n}` for the `index`-th slide
    pub fn id_or_default(&self, index: usize) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => format!("slide{}", index + 1),
        }
    }

    /// Links to show on the slide, skipping any without a target
    pub fn links(&self) -> Vec<SlideLink> {
        let mut links: Vec<SlideLink> = self.link.iter().cloned().collect();
        if let Some(repo) = &self.repository_link {
            links.push(SlideLink {
                label: Some(format!("git clone {}", repo)),
                href: repo.clone(),
            });
        }
        if let Some(materials) = &self.materials_link {
            links.push(SlideLink {
                label: Some(format!("Open: {}", materials)),
                href: materials.clone(),
            });
        }
        links.retain(|link| !link.href.trim().is_empty());
        links
    }
}

/// Deck content loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Values available to `{{global.key}}` placeholders
    #[serde(default, deserialize_with = "lenient_globals")]
    pub global: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "slides_list_or_map")]
    pub slides: Vec<SlideConfig>,
}

impl DeckConfig {
    /// Parse a deck config from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DeckConfig = serde_json::from_str(json)?;
        if config.slides.is_empty() {
            return Err(DeckError::ConfigError(
                "Deck config defines no slides".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a deck config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DeckError::PathNotFoundError(path.to_path_buf()));
        }
        let json = fs::read_to_string(path).map_err(DeckError::FileReadError)?;
        let config = Self::from_json(&json)?;
        info!(
            "Loaded deck config from {:?} ({} slides)",
            path,
            config.slides.len()
        );
        Ok(config)
    }

    /// Load a deck config, falling back to the built-in workshop deck on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Error loading config {:?}: {}. Using defaults.", path, e);
                Self::workshop_default()
            }
        }
    }

    /// The built-in five-slide workshop opener
    pub fn workshop_default() -> Self {
        let slide = |id: &str, title: &str| SlideConfig {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        };

        let mut intro = slide("intro", "Mastering LLMs");
        intro.subtitle = Some("Training, Fine-Tuning and Best Practices".to_string());

        Self {
            global: BTreeMap::new(),
            slides: vec![
                intro,
                slide("agenda", "Agenda"),
                slide("instructor", "Your Instructor"),
                slide("getting-started", "Getting Started"),
                slide("lets-go", "Let's Get Started"),
            ],
        }
    }

    /// Resolve `{{global.key}}` placeholders against this config
    pub fn resolve(&self, text: &str) -> String {
        resolve_template(text, &self.global)
    }

    /// Footer text, template-resolved, with the workshop default as fallback
    pub fn footer_text(&self) -> String {
        match self.global.get("footer_text") {
            Some(text) if !text.trim().is_empty() => self.resolve(text),
            _ => DEFAULT_FOOTER.to_string(),
        }
    }

    /// Title of each slide for display, falling back to the slide id
    pub fn slide_titles(&self) -> Vec<String> {
        self.slides
            .iter()
            .enumerate()
            .map(|(i, slide)| match &slide.title {
                Some(title) => self.resolve(title),
                None => slide.id_or_default(i),
            })
            .collect()
    }
}
