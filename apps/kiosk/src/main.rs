use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use catalog::Catalog;
use clap::Parser;
use page_motion::{MotionTimings, ScriptedPageMotion, SimulatedViewport, StripMetrics};
use shared::{domain::DetailTicket, protocol::TourCommand};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tour_core::{Collaborators, RuntimeError, TourHandle, TourOrchestrator, TourRuntime};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

mod collaborators;
mod commands;
mod config;

use collaborators::{LoggingPresenter, LoggingViewer};
use config::{apply_env_overrides, load_config, parse_time_scale};

const PAGE_HEIGHT_PX: f64 = 3200.0;
const VIEWPORT_HEIGHT_PX: f64 = 900.0;
const FEATURE_STRIP: StripMetrics = StripMetrics {
    scroll_width: 1800.0,
    client_width: 1280.0,
};

#[derive(Parser, Debug)]
#[command(about = "Runs the product tour headless, logging every stage")]
struct Args {
    /// Tour config file; `tour.toml` is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Catalog file (.toml or .json) replacing the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Multiplies every delay, e.g. 0.1 for a ten times faster rehearsal.
    #[arg(long, default_value_t = 1.0, value_parser = parse_time_scale)]
    time_scale: f64,
    /// How long a simulated video plays before it reports completion.
    #[arg(long, default_value_t = 8000)]
    video_playback_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    apply_env_overrides(&mut config, std::env::vars());
    if let Some(path) = args.catalog {
        config.catalog_path = Some(path);
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
        None => Catalog::builtin(),
    };
    let settings = config.settings.scaled(args.time_scale);
    let landing = Url::parse(&settings.landing_url)
        .with_context(|| format!("invalid landing url '{}'", settings.landing_url))?;

    let viewport = Arc::new(SimulatedViewport::new(
        PAGE_HEIGHT_PX,
        VIEWPORT_HEIGHT_PX,
        Some(FEATURE_STRIP),
    ));
    let motion = ScriptedPageMotion::new(
        viewport.clone(),
        MotionTimings::default().scaled(args.time_scale),
        landing,
    );
    let (playback_tx, playback_rx) = mpsc::unbounded_channel();
    let presenter = Arc::new(LoggingPresenter::new(playback_tx));

    let collaborators = Collaborators {
        viewer: Arc::new(LoggingViewer),
        presenter: presenter.clone(),
        motion: Arc::new(motion),
    };
    let orchestrator = TourOrchestrator::new(Arc::new(catalog), settings);
    let (runtime, handle) = TourRuntime::new(orchestrator, collaborators);
    let runtime_task = runtime.spawn();

    let playback = Duration::from_millis(args.video_playback_ms).mul_f64(args.time_scale);
    tokio::spawn(play_videos(handle.clone(), playback_rx, playback));
    tokio::spawn(read_console(handle.clone(), presenter));

    let mut navigation = viewport.subscribe_navigation();
    tokio::select! {
        result = async { navigation.wait_for(|url| url.is_some()).await.map(|_| ()) } => {
            if result.is_err() {
                warn!("viewport dropped before navigation");
            }
            info!("tour finished and navigated away");
            if let Err(err) = handle.dismiss().await {
                warn!(error = %err, "dismiss after navigation");
            }
            runtime_task.await.context("tour runtime task failed")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            info!("interrupted, stopping tour");
            if let Err(err) = handle.stop().await {
                warn!(error = %err, "stop after interrupt");
            }
            if let Err(err) = handle.dismiss().await {
                warn!(error = %err, "dismiss after interrupt");
            }
            runtime_task.await.context("tour runtime task failed")?;
        }
    }

    Ok(())
}

async fn play_videos(
    handle: TourHandle,
    mut playback_rx: mpsc::UnboundedReceiver<DetailTicket>,
    playback: Duration,
) {
    while let Some(ticket) = playback_rx.recv().await {
        let handle = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(playback).await;
            if let Err(err) = handle.send(TourCommand::VideoFinished { ticket }).await {
                warn!(error = %err, ticket = ticket.0, "could not report video end");
            }
        });
    }
}

async fn read_console(handle: TourHandle, presenter: Arc<LoggingPresenter>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("{}", commands::HELP);
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "console read failed");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match commands::parse_command(&line, presenter.current_ticket()) {
            Ok(command) => {
                if let Err(RuntimeError::Closed) = handle.try_send(command) {
                    return;
                }
            }
            Err(err) => warn!(error = %err, "{}", commands::HELP),
        }
    }
}
