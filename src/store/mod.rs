// src/store/mod.rs

pub mod catalog;
pub mod dataset;
pub mod layer;

pub use layer::{BoundaryFeature, BoundaryLayer};

use crate::error::AppError;
use geo::Point;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Attribute columns expected on GADM layers.
pub const GID_FIELD: &str = "GID_0";
pub const COUNTRY_FIELD: &str = "COUNTRY";

const COUNTRY_OUTLINES_FILE: &str = "EA_ADM0.shp";
const ADM_LEVELS_DIR: &str = "adm_levels";

/// Owns the country outline layer and a lazy cache of per-country
/// ADM level layers.
pub struct BoundaryStore {
    levels_dir: PathBuf,
    countries: BoundaryLayer,
    cache: RwLock<HashMap<(String, u8), Arc<BoundaryLayer>>>,
}

impl BoundaryStore {
    /// Loads and indexes the country outlines. Called once at startup;
    /// a missing or unreadable dataset is fatal.
    pub fn open(data_dir: &Path) -> Result<Self, AppError> {
        let countries = dataset::read_layer(&data_dir.join(COUNTRY_OUTLINES_FILE))?;
        if countries.is_empty() {
            return Err(AppError::InternalServerError(format!(
                "country outline layer in {} contains no polygons",
                data_dir.display()
            )));
        }
        Ok(Self {
            levels_dir: data_dir.join(ADM_LEVELS_DIR),
            countries,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Resolves the country containing the point, if any.
    pub fn country_at(&self, point: Point<f64>) -> Option<&BoundaryFeature> {
        self.countries.locate(point)
    }

    /// ADM levels with a dataset on disk for the country, ascending.
    pub fn available_levels(&self, gid: &str) -> Result<Vec<u8>, AppError> {
        catalog::available_levels(&self.levels_dir, gid)
    }

    /// The most detailed ADM level available for the country.
    pub fn highest_level(&self, gid: &str) -> Result<Option<u8>, AppError> {
        Ok(self.available_levels(gid)?.pop())
    }

    /// Returns the ADM layer for `(gid, level)`, loading and caching it on
    /// first use. Shapefile parsing happens on the blocking thread pool.
    pub async fn level_layer(&self, gid: &str, level: u8) -> Result<Arc<BoundaryLayer>, AppError> {
        let key = (gid.to_string(), level);
        if let Some(layer) = self.cache.read().await.get(&key) {
            return Ok(layer.clone());
        }

        let path = catalog::level_file(&self.levels_dir, gid, level);
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "No ADM_{level} dataset found for {gid}"
            )));
        }

        tracing::info!("Loading boundary layer {}", path.display());
        let layer = tokio::task::spawn_blocking(move || dataset::read_layer(&path)).await??;
        let layer = Arc::new(layer);

        // Two requests may race on the first load; last write wins and
        // both get a usable layer.
        self.cache.write().await.insert(key, layer.clone());
        Ok(layer)
    }
}
