use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, filter::Targets, fmt::time::ChronoLocal, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use tool_inventory::inventory::AUDIT_TARGET;
use tool_inventory::server::{AppState, create_router, run_capture_loop};
use tool_inventory::{
    ColorDetector, Config, EventLog, SharedTracker, ToolTracker, TracingSink, TrackerPipeline,
};

#[derive(Debug, Parser)]
#[command(version, about = "Color-tag tool inventory tracker")]
struct Args {
    /// YAML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "TOOL_INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the audit log directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Console logging filtered by `RUST_LOG`, plus one audit file per run.
fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_name = format!(
        "tool_tracking_{}.log",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, file_name));

    let console = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "tool_inventory=info,tower_http=info".into()),
    );
    let audit = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_filter(Targets::new().with_target(AUDIT_TARGET, Level::INFO));

    tracing_subscriber::registry()
        .with(console)
        .with(audit)
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(log_dir) = args.log_dir {
        config.log_dir = log_dir;
    }

    let _guard = init_logging(&config.log_dir)?;
    info!("Starting tool inventory v{}", env!("CARGO_PKG_VERSION"));
    info!(
        bind = %config.bind,
        log_dir = %config.log_dir.display(),
        classes = config.color_ranges.len(),
        "Configuration loaded"
    );

    let mut log = EventLog::with_capacity(config.log_capacity, Box::new(TracingSink));
    log.note(Level::INFO, "Starting tool tracking system");
    let tracker = SharedTracker::new(ToolTracker::new(log));

    let mut pipeline = TrackerPipeline::new(
        ColorDetector::new(config.min_area),
        config.color_ranges.clone(),
        config.cameras.camera_set(),
        tracker,
    )
    .with_frame_size(config.frame_width, config.frame_height);

    if let Err(e) = pipeline.initialize() {
        warn!(error = %e, "Initial tool counts unavailable, use /reinitialize_tool_counts");
    }

    let state = AppState::new(pipeline, config.log_dir.clone());

    let capture_state = state.clone();
    let interval = Duration::from_millis(config.tick_interval_ms);
    let quality = config.jpeg_quality;
    tokio::task::spawn_blocking(move || run_capture_loop(capture_state, interval, quality));

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!("Listening on {}", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
