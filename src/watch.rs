// ABOUTME: Watch module for monitoring deck config changes and re-rendering the HTML deck
// ABOUTME: Optionally serves the latest render over HTTP while watching

use log::{debug, error, info};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::config::DeckConfig;
use crate::errors::{DeckError, Result};
use crate::html;
use crate::resources::ResourceFile;
use crate::theme::Theme;
use crate::utils;

/// Configuration for watch mode
pub struct WatchConfig {
    /// Deck config JSON to watch
    pub config_path: PathBuf,

    /// Output HTML file path
    pub html_output: PathBuf,

    pub css_files: Vec<ResourceFile>,

    pub js_files: Vec<ResourceFile>,

    pub embed_resources: bool,

    pub theme: Theme,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,

    /// Serve the rendered deck over HTTP
    pub serve: bool,

    pub port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            html_output: PathBuf::new(),
            css_files: Vec::new(),
            js_files: Vec::new(),
            embed_resources: true,
            theme: Theme::Light,
            debounce_ms: 500,
            serve: false,
            port: 8080,
        }
    }
}

/// Latest rendered deck, shared with the HTTP server thread
type SharedHtml = Arc<RwLock<String>>;

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn respond_with<R: std::io::Read>(request: tiny_http::Request, response: Response<R>, ctype: &str) {
    let response = match Header::from_bytes("Content-Type", ctype) {
        Ok(header) => response.with_header(header),
        Err(_) => response,
    };
    if let Err(e) = request.respond(response) {
        error!("Failed to send response: {}", e);
    }
}

/// Start an HTTP server: `/` serves the latest render, other paths are
/// served from the output directory
fn start_server(html: SharedHtml, root: PathBuf, port: u16) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| DeckError::ServeError(format!("Failed to start HTTP server: {}", e)))?;

    thread::spawn(move || {
        info!("HTTP server listening on http://localhost:{}", port);
        println!("Serving deck on http://localhost:{}", port);

        for request in server.incoming_requests() {
            let url_path = request.url().split('?').next().unwrap_or("/").to_string();
            debug!("Request for {}", url_path);

            if url_path == "/" || url_path == "/index.html" {
                let body = html.read().clone();
                respond_with(request, Response::from_string(body), "text/html; charset=utf-8");
                continue;
            }

            let clean_path = url_path.trim_start_matches('/');
            if clean_path.split('/').any(|part| part == "..") {
                let _ = request.respond(
                    Response::from_string("403 Forbidden").with_status_code(StatusCode(403)),
                );
                continue;
            }

            let file_path = root.join(clean_path);
            if !file_path.is_file() {
                let _ = request.respond(
                    Response::from_string("404 Not Found").with_status_code(StatusCode(404)),
                );
                continue;
            }

            match fs::read(&file_path) {
                Ok(content) => {
                    respond_with(request, Response::from_data(content), content_type(&file_path))
                }
                Err(e) => {
                    error!("Failed to read file {:?}: {}", file_path, e);
                    let _ = request.respond(
                        Response::from_string(format!("Failed to read file: {}", e))
                            .with_status_code(StatusCode(500)),
                    );
                }
            }
        }
    });

    Ok(())
}

/// Render once, then re-render whenever the deck config or its resources change
pub fn watch_deck(config: WatchConfig) -> Result<()> {
    utils::validate_file_exists(&config.config_path)?;
    utils::ensure_parent_directory_exists(&config.html_output)?;

    let shared: SharedHtml = Arc::new(RwLock::new(regenerate_output(&config)?));

    if config.serve {
        let root = match config.html_output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        start_server(shared.clone(), root, config.port)?;
    }

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| DeckError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let watch_path = match config.config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let abs_watch_path = utils::get_absolute_path(watch_path)?;

    debouncer
        .watcher()
        .watch(&abs_watch_path, RecursiveMode::Recursive)
        .map_err(|e| {
            DeckError::WatchError(format!("Failed to watch {:?}: {}", abs_watch_path, e))
        })?;

    info!("Watching for changes in {:?}", abs_watch_path);
    println!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        watch_path
    );

    let output_abs = utils::get_absolute_path(&config.html_output).ok();
    let mut last_processed = Instant::now();

    for result in rx {
        match result {
            Ok(events) => {
                let relevant = events.iter().any(|event| {
                    event.paths.iter().any(|path| {
                        // Our own output lands in the watched tree too
                        if output_abs.as_deref() == Some(path.as_path()) {
                            return false;
                        }
                        is_relevant_path(path, &config)
                    })
                });

                let now = Instant::now();
                if relevant
                    && now.duration_since(last_processed)
                        > Duration::from_millis(config.debounce_ms)
                {
                    match regenerate_output(&config) {
                        Ok(rendered) => {
                            *shared.write() = rendered;
                            info!("Deck re-rendered");
                            last_processed = now;
                        }
                        Err(e) => error!("Failed to re-render deck: {}", e),
                    }
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        }
    }

    Ok(())
}

/// Whether a change to `path` should trigger a re-render
pub fn is_relevant_path(path: &Path, config: &WatchConfig) -> bool {
    let path_abs = utils::get_absolute_path(path).unwrap_or_else(|_| path.to_path_buf());
    let config_abs =
        utils::get_absolute_path(&config.config_path).unwrap_or_else(|_| config.config_path.clone());

    if path_abs == config_abs || path == config.config_path {
        return true;
    }

    let path_str = path.to_string_lossy();
    let path_abs_str = path_abs.to_string_lossy();
    let is_local_resource = config
        .css_files
        .iter()
        .chain(config.js_files.iter())
        .filter(|r| !r.is_remote)
        .any(|r| r.path == path_str || r.path == path_abs_str);
    if is_local_resource {
        return true;
    }

    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "json" || ext == "css" || ext == "js"
        }
        None => false,
    }
}

/// Load the config, render the deck and write it to the output file
fn regenerate_output(config: &WatchConfig) -> Result<String> {
    info!("Rendering deck from {:?}", config.config_path);

    // A broken edit should fail this render, not fall back to the default deck
    let deck_config = DeckConfig::load(&config.config_path)?;
    let rendered = html::generate_html(
        &deck_config,
        &config.css_files,
        &config.js_files,
        config.embed_resources,
        config.theme,
    )?;

    html::write_html_to_file(&rendered, &config.html_output)?;
    Ok(rendered)
}
