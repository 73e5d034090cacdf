use std::path::PathBuf;

use shared::domain::{PartId, View};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported catalog format for '{0}' (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("duplicate part id {0}")]
    DuplicatePartId(PartId),
    #[error("part {0} has an empty name")]
    EmptyPartName(PartId),
    #[error("part {part_id} {view} hotspot ({x}, {y}) is outside 0..=100")]
    PositionOutOfRange {
        part_id: PartId,
        view: View,
        x: f32,
        y: f32,
    },
}
