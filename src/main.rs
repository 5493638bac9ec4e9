// ABOUTME: Main entry point for the workshop-deck program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;

use workshop_deck::{
    Config, Deck, DeckConfig, DeckSession, DeckView, FileStore, Theme, WatchConfig,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an HTML deck from a JSON config
    Render(RenderArgs),

    /// Step through a deck in the terminal, remembering the last slide
    Present(PresentArgs),

    /// Re-render the deck whenever its config changes
    Watch(WatchArgs),
}

#[derive(Args)]
struct ResourceArgs {
    /// CSS files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// JavaScript files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    js: Option<Vec<String>>,

    /// Mode for CSS/JS: 'embed' to embed content or 'link' to reference
    #[arg(long)]
    mode: Option<String>,

    /// Color scheme: 'light' or 'dark'
    #[arg(long)]
    theme: Option<String>,
}

#[derive(Args)]
struct RenderArgs {
    /// Path to the deck config JSON
    #[arg(short, long)]
    config: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    resources: ResourceArgs,
}

#[derive(Args)]
struct PresentArgs {
    /// Path to the deck config JSON (falls back to the built-in deck)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File that remembers the last viewed slide
    #[arg(long)]
    state: Option<PathBuf>,

    /// Storage key for the slide index
    #[arg(long)]
    key: Option<String>,
}

#[derive(Args)]
struct WatchArgs {
    #[arg(short, long)]
    config: PathBuf,

    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    resources: ResourceArgs,

    /// Serve the deck over HTTP while watching
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn embed_from_mode(mode: Option<&str>, app_config: &Config) -> workshop_deck::Result<bool> {
    match mode {
        None => Ok(app_config.embed_resources),
        Some("embed") => Ok(true),
        Some("link") => Ok(false),
        Some(other) => Err(workshop_deck::DeckError::ValidationError(format!(
            "Unknown resource mode '{}', expected 'embed' or 'link'",
            other
        ))),
    }
}

fn theme_from_args(theme: Option<&str>, app_config: &Config) -> Theme {
    match theme {
        Some(t) => Theme::from_preference(Some(t)),
        None => app_config.theme,
    }
}

fn run(command: Commands, app_config: &Config) -> workshop_deck::Result<()> {
    match command {
        Commands::Render(args) => {
            let deck_config = DeckConfig::load(&args.config)?;
            let (css, js) = app_config
                .resources_or_defaults(args.resources.css.as_deref(), args.resources.js.as_deref());
            let embed = embed_from_mode(args.resources.mode.as_deref(), app_config)?;
            let theme = theme_from_args(args.resources.theme.as_deref(), app_config);

            let html = workshop_deck::generate_html(&deck_config, &css, &js, embed, theme)?;
            workshop_deck::write_html_to_file(&html, &args.output)?;
            println!("HTML generated successfully: {:?}", args.output);
            Ok(())
        }
        Commands::Present(args) => {
            let config_path = args.config.unwrap_or_else(|| app_config.config_path.clone());
            let deck_config = DeckConfig::load_or_default(&config_path);
            let deck = Deck::from_config(&deck_config)?;
            let titles = deck_config.slide_titles();

            let store = FileStore::new(args.state.unwrap_or_else(|| app_config.state_path.clone()));
            let key = args.key.unwrap_or_else(|| app_config.storage_key.clone());
            let session = DeckSession::open(
                &deck,
                DeckView::new(deck.len()),
                store,
                &key,
                app_config.theme,
            );

            let stdin = io::stdin();
            let last = workshop_deck::present(session, &titles, stdin.lock(), io::stdout())?;
            info!("Stopped on slide {}", last + 1);
            Ok(())
        }
        Commands::Watch(args) => {
            let (css_files, js_files) = app_config
                .resources_or_defaults(args.resources.css.as_deref(), args.resources.js.as_deref());
            let watch_config = WatchConfig {
                config_path: args.config,
                html_output: args.output,
                css_files,
                js_files,
                embed_resources: embed_from_mode(args.resources.mode.as_deref(), app_config)?,
                theme: theme_from_args(args.resources.theme.as_deref(), app_config),
                serve: args.serve,
                port: args.port,
                ..Default::default()
            };
            workshop_deck::watch_deck(watch_config)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let app_config = Config::from_env();

    let Some(command) = cli.command else {
        println!("No command specified. Use --help for usage information.");
        return;
    };

    if let Err(e) = run(command, &app_config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
