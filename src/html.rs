// ABOUTME: HTML generation module for the workshop-deck application
// ABOUTME: Populates a standalone slide deck document from the JSON deck config

use crate::config::{DeckConfig, SlideConfig};
use crate::errors::{DeckError, Result};
use crate::resources::{ResourceFile, ResourceKind};
use crate::theme::Theme;
use crate::utils::{self, escape_html};
use comrak::{markdown_to_html, ComrakOptions};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Generate the deck document for `config`
pub fn generate_html(
    config: &DeckConfig,
    css_files: &[ResourceFile],
    js_files: &[ResourceFile],
    embed_resources: bool,
    theme: Theme,
) -> Result<String> {
    if config.slides.is_empty() {
        return Err(DeckError::HtmlError("No slides to render".to_string()));
    }
    info!("Generating HTML for {} slides", config.slides.len());

    let titles = config.slide_titles();
    let footer = escape_html(&config.footer_text());
    let total = config.slides.len();

    let mut html_doc = String::from("<!DOCTYPE html>\n");
    html_doc.push_str(&format!(
        "<html lang=\"en\" data-color-scheme=\"{}\">\n<head>\n",
        theme.as_str()
    ));
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", escape_html(&titles[0])));
    push_resources(&mut html_doc, css_files, ResourceKind::Css, embed_resources);
    html_doc.push_str("</head>\n<body>\n<main class=\"deck\">\n");

    for (i, slide) in config.slides.iter().enumerate() {
        let class = if i == 0 { "slide active" } else { "slide" };
        html_doc.push_str(&format!(
            "<section class=\"{}\" id=\"{}\" aria-hidden=\"{}\">\n",
            class,
            escape_html(&slide.id_or_default(i)),
            i != 0
        ));
        html_doc.push_str(&render_slide_body(config, slide));
        html_doc.push_str(&format!("<footer class=\"slide-footer\">{}</footer>\n", footer));
        html_doc.push_str("</section>\n");
    }

    html_doc.push_str("</main>\n");
    html_doc.push_str("<nav class=\"navigation\">\n");
    html_doc.push_str(
        "<button id=\"prevBtn\" aria-label=\"Previous slide\" disabled>&larr;</button>\n",
    );
    html_doc.push_str(&format!(
        "<span class=\"slide-counter\"><span id=\"currentSlide\">1</span> / <span id=\"totalSlides\">{}</span></span>\n",
        total
    ));
    html_doc.push_str(&format!(
        "<button id=\"nextBtn\" aria-label=\"Next slide\"{}>&rarr;</button>\n",
        if total == 1 { " disabled" } else { "" }
    ));
    html_doc.push_str(&format!(
        "<button id=\"themeToggle\" aria-label=\"Toggle theme\">{}</button>\n",
        theme.toggle_label()
    ));
    html_doc.push_str("</nav>\n");

    push_resources(&mut html_doc, js_files, ResourceKind::Js, embed_resources);
    html_doc.push_str("</body>\n</html>");

    Ok(html_doc)
}

fn push_resources(
    html_doc: &mut String,
    resources: &[ResourceFile],
    kind: ResourceKind,
    embed_resources: bool,
) {
    for resource in resources {
        match resource.tag(kind, embed_resources) {
            Ok(tag) => {
                html_doc.push_str(&tag);
                html_doc.push('\n');
            }
            Err(e) => {
                // Carry on without it rather than failing the whole deck
                warn!("Failed to include {:?} resource {}: {}", kind, resource.path, e);
            }
        }
    }
}

/// Render the inner content of one slide. Plain text fields are
/// template-resolved and escaped; the body is markdown.
fn render_slide_body(config: &DeckConfig, slide: &SlideConfig) -> String {
    let text = |value: &str| escape_html(&config.resolve(value));
    let mut out = String::new();

    if let Some(title) = &slide.title {
        out.push_str(&format!("<h1>{}</h1>\n", text(title)));
    }
    if let Some(subtitle) = &slide.subtitle {
        out.push_str(&format!("<h2 class=\"subtitle\">{}</h2>\n", text(subtitle)));
    }
    if let Some(instructor) = &slide.instructor {
        out.push_str(&format!("<p class=\"instructor\">{}</p>\n", text(instructor)));
    }

    if let Some(body) = &slide.body {
        let mut options = ComrakOptions::default();
        options.render.unsafe_ = true; // Allow raw HTML in slide bodies
        out.push_str("<div class=\"slide-body\">\n");
        out.push_str(&markdown_to_html(&config.resolve(body), &options));
        out.push_str("</div>\n");
    }

    if !slide.modules.is_empty() {
        out.push_str("<div class=\"agenda\">\n");
        for module in &slide.modules {
            out.push_str("<div class=\"agenda-item\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", text(&module.title)));
            if !module.description.is_empty() {
                out.push_str(&format!("<p>{}</p>\n", text(&module.description)));
            }
            if let Some(minutes) = &module.duration {
                out.push_str(&format!(
                    "<span class=\"agenda-duration\">{} mins</span>\n",
                    text(minutes)
                ));
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }

    if !slide.breaks.is_empty() {
        out.push_str("<div class=\"breaks-list\">\n");
        for item in &slide.breaks {
            out.push_str(&format!(
                "<div class=\"break-item\"><span class=\"break-name\">{}</span><span class=\"break-time\">{}</span></div>\n",
                text(&item.name),
                text(&item.time)
            ));
        }
        out.push_str("</div>\n");
    }

    for link in slide.links() {
        let href = text(&link.href);
        let label = match &link.label {
            Some(label) => text(label),
            None => href.clone(),
        };
        out.push_str(&format!(
            "<p class=\"slide-link\"><a href=\"{}\" target=\"_blank\"><code>{}</code></a></p>\n",
            href, label
        ));
    }

    out
}

/// Write HTML content to a file, creating parent directories
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    utils::ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, html_content).map_err(DeckError::FileReadError)?;
    info!("HTML written to {:?}", output_path);
    Ok(())
}
