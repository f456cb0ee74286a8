mod action;
mod app;
mod app_state;
mod audio;
mod component;
mod components;
mod focus;
mod session;
mod theme;
mod transition;
mod widgets;
mod workspace;

use clap::Parser;

use songbook_core::config::Config;

#[derive(Parser, Debug)]
#[command(name = "songbook")]
#[command(about = "Browse song lyrics in the terminal")]
struct Args {
    /// Catalog to load: a YAML file path or an http(s) URL.
    #[arg(long)]
    catalog: Option<String>,

    /// Start location as a query string, e.g. "?song=Yesterday&search=a:Beatles".
    #[arg(long)]
    location: Option<String>,

    /// Width (columns) at which list and lyrics go side by side.
    #[arg(long)]
    breakpoint: Option<u16>,

    /// Start without animations.
    #[arg(long)]
    no_animations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = songbook_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("songbook.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("songbook log: {}", log_path.display());
    tracing::info!("songbook starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("config unreadable, using defaults: {:#}", e);
            Config::default()
        }
    };
    if let Some(source) = args.catalog {
        config.catalog.source = source;
    }
    if let Some(bp) = args.breakpoint {
        config.layout.breakpoint = bp;
    }
    if args.no_animations {
        config.layout.animations = false;
    }
    tracing::info!("catalog source: {}", config.catalog.source);

    // ── Restore the last location ────────────────────────────────────────────
    let saved = session::load_ui_session_state(&config.paths.session_file);
    let location =
        session::initial_location(args.location.as_deref(), config.session.restore, &saved);

    app::App::new(config, location, saved).run().await
}
