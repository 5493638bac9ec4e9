// ABOUTME: Template resolution for deck config text
// ABOUTME: Substitutes {{global.key}} placeholders with values from the config's global table

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{global\.([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
    })
}

/// Replace every `{{global.KEY}}` in `template` with `global[KEY]`.
///
/// `KEY` must be one or more ASCII letters, digits or underscores. Unknown
/// keys, empty values and malformed placeholders are left as written.
pub fn resolve_template(template: &str, global: &BTreeMap<String, String>) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| match global.get(&caps[1]) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> BTreeMap<String, String> {
        let mut global = BTreeMap::new();
        global.insert("workshop".to_string(), "Mastering LLMs".to_string());
        global.insert("repo_url".to_string(), "https://example.com/repo".to_string());
        global.insert("blank".to_string(), String::new());
        global
    }

    #[test]
    fn test_resolves_known_keys() {
        let text = resolve_template("Welcome to {{global.workshop}}!", &globals());
        assert_eq!(text, "Welcome to Mastering LLMs!");

        let text = resolve_template(
            "{{global.workshop}}: git clone {{global.repo_url}}",
            &globals(),
        );
        assert_eq!(text, "Mastering LLMs: git clone https://example.com/repo");
    }

    #[test]
    fn test_unknown_key_is_left_verbatim() {
        let text = resolve_template("Hi {{global.nope}} there", &globals());
        assert_eq!(text, "Hi {{global.nope}} there");
    }

    #[test]
    fn test_empty_value_keeps_placeholder() {
        let text = resolve_template("[{{global.blank}}] {{global.workshop}}", &globals());
        assert_eq!(text, "[{{global.blank}}] Mastering LLMs");
    }

    #[test]
    fn test_malformed_placeholders_are_left_verbatim() {
        let g = globals();
        assert_eq!(resolve_template("{{global.}}", &g), "{{global.}}");
        assert_eq!(
            resolve_template("{{global.work shop}}", &g),
            "{{global.work shop}}"
        );
        assert_eq!(
            resolve_template("{{global.workshop", &g),
            "{{global.workshop"
        );
        assert_eq!(
            resolve_template("{{other.workshop}}", &g),
            "{{other.workshop}}"
        );
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(resolve_template("plain text", &globals()), "plain text");
        assert_eq!(resolve_template("", &globals()), "");
    }
}
