use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use tour_core::{ManualClosePolicy, TourSettings};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "tour.toml";
const ENV_PREFIX: &str = "TOUR__";
pub const TIME_SCALE_RANGE: std::ops::RangeInclusive<f64> = 0.01..=100.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KioskConfig {
    pub settings: TourSettings,
    /// Catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    catalog: Option<PathBuf>,
    tour: TourSettings,
}

/// Defaults, overlaid with the config file when there is one. An explicit
/// path must exist; the default `tour.toml` is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<KioskConfig> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if explicit.is_none() && err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(KioskConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config '{}'", path.display()))
        }
    };

    let file: FileConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config '{}'", path.display()))?;
    Ok(KioskConfig {
        settings: file.tour,
        catalog_path: file.catalog,
    })
}

/// Parses `--time-scale`, rejecting factors outside [`TIME_SCALE_RANGE`].
pub fn parse_time_scale(raw: &str) -> Result<f64, String> {
    let factor: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if TIME_SCALE_RANGE.contains(&factor) {
        Ok(factor)
    } else {
        Err(format!(
            "time scale must be between {} and {}",
            TIME_SCALE_RANGE.start(),
            TIME_SCALE_RANGE.end()
        ))
    }
}

/// Overlays `TOUR__<KEY>` variables, e.g. `TOUR__WAITING_DELAY_MS=3000` or
/// `TOUR__CATALOG=./catalog.toml`.
pub fn apply_env_overrides<I>(config: &mut KioskConfig, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in vars {
        let Some(key) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key = key.to_ascii_lowercase();
        let tour = &mut config.settings;

        let millis = match key.as_str() {
            "waiting_delay_ms" => Some(&mut tour.waiting_delay_ms),
            "inter_detail_delay_ms" => Some(&mut tour.inter_detail_delay_ms),
            "close_settle_ms" => Some(&mut tour.close_settle_ms),
            "min_detail_dwell_ms" => Some(&mut tour.min_detail_dwell_ms),
            "reading_ms_per_word" => Some(&mut tour.reading_ms_per_word),
            "reading_min_ms" => Some(&mut tour.reading_min_ms),
            "reading_max_ms" => Some(&mut tour.reading_max_ms),
            "switch_to_back_delay_ms" => Some(&mut tour.switch_to_back_delay_ms),
            "scroll_nudge_ms" => Some(&mut tour.scroll_nudge_ms),
            "slideshow_lead_in_ms" => Some(&mut tour.slideshow_lead_in_ms),
            "slideshow_frame_ms" => Some(&mut tour.slideshow_frame_ms),
            "carousel_item_ms" => Some(&mut tour.carousel_item_ms),
            "skip_settle_ms" => Some(&mut tour.skip_settle_ms),
            _ => None,
        };
        if let Some(field) = millis {
            match value.parse::<u64>() {
                Ok(parsed) => *field = parsed,
                Err(_) => warn!(variable = %name, %value, "ignoring non-numeric tour setting"),
            }
            continue;
        }

        match key.as_str() {
            "manual_close_policy" => match value.to_ascii_lowercase().as_str() {
                "advance" => tour.manual_close_policy = ManualClosePolicy::Advance,
                "hold" => tour.manual_close_policy = ManualClosePolicy::Hold,
                _ => warn!(variable = %name, %value, "expected 'advance' or 'hold'"),
            },
            "showcase_features" => match value.parse::<bool>() {
                Ok(parsed) => tour.showcase_features = parsed,
                Err(_) => warn!(variable = %name, %value, "expected 'true' or 'false'"),
            },
            "landing_url" => tour.landing_url = value,
            "catalog" => config.catalog_path = Some(PathBuf::from(value)),
            _ => warn!(variable = %name, "unknown tour setting"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
