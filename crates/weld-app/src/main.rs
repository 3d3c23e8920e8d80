mod app_state;
mod cli;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use weld_common::ConfigError;
use weld_config::WeldConfig;
use winit::event_loop::EventLoop;

const DEFAULT_LOG_DIRECTIVE: &str = "weld=info";

fn load_config(args: &cli::Args) -> Result<WeldConfig, ConfigError> {
    match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            weld_config::load_from_path(path)
        }
        None => weld_config::load_config(),
    }
}

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let directive: Directive = log_directive.parse().unwrap_or_else(|_| {
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .expect("default log directive is valid")
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("Weld v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        WeldConfig::default()
    });
    tracing::info!(
        widget = %config.widget.name,
        input_mask = config.mask.enabled,
        sync_dimension = config.dimension.sync,
        "Config loaded"
    );

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::WeldApp::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
