//! Read-only product catalog: parts with per-view hotspots, feature cards and
//! the image lists used by the slideshow and the accessories gallery.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{FeatureCard, Part, PartId, Slide, View},
    protocol::Hotspot,
};

mod builtin;
pub mod error;

pub use error::CatalogError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub features: Vec<FeatureCard>,
    #[serde(default)]
    pub slideshow: Vec<Slide>,
    #[serde(default)]
    pub gallery: Vec<Slide>,
}

impl Catalog {
    /// The Caterwil GTS-4WD showcase content.
    pub fn builtin() -> Self {
        builtin::caterwil_gts_4wd()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&raw)?,
            Some("json") => Self::from_json_str(&raw)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(
            path = %path.display(),
            parts = catalog.parts.len(),
            features = catalog.features.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn to_toml_string(&self) -> Result<String, CatalogError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for part in &self.parts {
            if !seen.insert(part.id) {
                return Err(CatalogError::DuplicatePartId(part.id));
            }
            if part.name.trim().is_empty() {
                return Err(CatalogError::EmptyPartName(part.id));
            }
            for view in [View::Front, View::Back] {
                if let Some(position) = part.position(view) {
                    if !position.is_within_bounds() {
                        return Err(CatalogError::PositionOutOfRange {
                            part_id: part.id,
                            view,
                            x: position.x,
                            y: position.y,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn part(&self, part_id: PartId) -> Option<&Part> {
        self.parts.iter().find(|part| part.id == part_id)
    }

    /// Parts with a hotspot in `view`, in catalog order.
    pub fn parts_in_view(&self, view: View) -> impl Iterator<Item = &Part> + '_ {
        self.parts.iter().filter(move |part| part.is_visible_in(view))
    }

    pub fn visible_count(&self, view: View) -> usize {
        self.parts_in_view(view).count()
    }

    pub fn part_in_view_at(&self, view: View, index: usize) -> Option<&Part> {
        self.parts_in_view(view).nth(index)
    }

    pub fn hotspots(&self, view: View) -> Vec<Hotspot> {
        self.parts_in_view(view)
            .filter_map(|part| {
                part.position(view).map(|position| Hotspot {
                    part_id: part.id,
                    name: part.name.clone(),
                    position,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
