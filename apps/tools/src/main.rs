use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use catalog::Catalog;
use clap::{Parser, Subcommand, ValueEnum};
use shared::domain::{TourStage, View};
use tour_core::{
    reading_time::word_count, TourEffect, TourOrchestrator, TourSettings, VirtualTour,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Catalog maintenance and tour timing tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewArg {
    Front,
    Back,
}

impl From<ViewArg> for View {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Front => View::Front,
            ViewArg::Back => View::Back,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Toml,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loads and validates a catalog file.
    Validate { file: PathBuf },
    /// Lists the parts with a hotspot in each view, in tour order.
    Parts {
        #[arg(long)]
        view: Option<ViewArg>,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Prints the reading-time estimate for a description.
    ReadingTime { text: Vec<String> },
    /// Writes the built-in catalog to stdout.
    DumpBuiltin {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Prints when each tour event happens, without waiting in real time.
    Timeline {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        showcase_features: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { file } => {
            let catalog = load(&file)?;
            println!(
                "ok: {} parts ({} front, {} back), {} features, {} slides, {} gallery images",
                catalog.parts.len(),
                catalog.visible_count(View::Front),
                catalog.visible_count(View::Back),
                catalog.features.len(),
                catalog.slideshow.len(),
                catalog.gallery.len()
            );
        }
        Command::Parts { view, catalog } => {
            let catalog = load_or_builtin(catalog.as_deref())?;
            let views = match view {
                Some(view) => vec![View::from(view)],
                None => vec![View::Front, View::Back],
            };
            for view in views {
                println!("{view}:");
                for (index, part) in catalog.parts_in_view(view).enumerate() {
                    let media = part
                        .media
                        .as_ref()
                        .map(|media| media.src.as_str())
                        .unwrap_or("(placeholder)");
                    println!("  {index}: #{} {} [{media}]", part.id, part.name);
                }
            }
        }
        Command::ReadingTime { text } => {
            let text = text.join(" ");
            let settings = TourSettings::default();
            let description = (!text.trim().is_empty()).then_some(text.as_str());
            println!(
                "words={} estimate_ms={} dwell_ms={}",
                word_count(description),
                settings.reading_time().estimate(description).as_millis(),
                settings.detail_dwell(description).as_millis()
            );
        }
        Command::DumpBuiltin { format } => {
            let catalog = Catalog::builtin();
            let out = match format {
                Format::Toml => catalog.to_toml_string()?,
                Format::Json => serde_json::to_string_pretty(&catalog)?,
            };
            println!("{out}");
        }
        Command::Timeline {
            catalog,
            showcase_features,
        } => {
            let catalog = load_or_builtin(catalog.as_deref())?;
            let settings = TourSettings {
                showcase_features,
                ..TourSettings::default()
            };
            print_timeline(catalog, settings);
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("failed to load catalog '{}'", path.display()))
}

fn load_or_builtin(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => load(path),
        None => Ok(Catalog::builtin()),
    }
}

/// Video details wait for playback, which the timeline stands in for with the
/// minimum dwell.
fn print_timeline(catalog: Catalog, settings: TourSettings) {
    let video_playback = settings.min_detail_dwell();
    let mut tour = VirtualTour::started(TourOrchestrator::new(Arc::new(catalog), settings));
    let limit = Duration::from_secs(3600);

    while tour.now() < limit && tour.orchestrator().stage() != TourStage::Done {
        let waiting_on_video = tour.pending_timers().is_empty()
            && tour.orchestrator().detail_view().is_some();
        if waiting_on_video {
            if let Some(ticket) = tour.orchestrator().detail_view().map(|detail| detail.ticket) {
                tour.advance(video_playback);
                tour.act(|orchestrator| orchestrator.video_finished(ticket));
            }
            continue;
        }
        if tour.fire_next().is_none() {
            break;
        }
    }

    for timed in tour.log() {
        let at = timed.at.as_secs_f64();
        match &timed.effect {
            TourEffect::StageChanged { from, to } => println!("{at:>7.1}s  stage {from} -> {to}"),
            TourEffect::ShowDetail(detail) => {
                println!("{at:>7.1}s  open #{} {} ({:?})", detail.part_id, detail.name, detail.media.kind)
            }
            TourEffect::CloseDetail => println!("{at:>7.1}s  close detail"),
            TourEffect::ShowSlide(slide) => {
                println!("{at:>7.1}s  slide {}/{}", slide.index + 1, slide.total)
            }
            TourEffect::HighlightFeature(Some(index)) => println!("{at:>7.1}s  feature {index}"),
            TourEffect::ScrollNudge => println!("{at:>7.1}s  scroll nudge"),
            TourEffect::RunExitSequence => println!("{at:>7.1}s  exit sequence"),
            _ => {}
        }
    }
}
