// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Everything the dashboard needs besides the user's widget selections.
///
/// Every field has a default, so an empty YAML document (or no file at all)
/// reproduces the stock dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataPaths,
    pub heatmap: HeatmapConfig,
    pub bubble: BubbleConfig,
    pub bar: BarConfig,
}

impl DashboardConfig {
    /// Read a YAML config, or fall back to defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub national_by_industry: PathBuf,
    pub national_by_category: PathBuf,
    pub prefecture_by_industry: PathBuf,
    pub geo_lookup: PathBuf,
    /// WHATWG label of the wage CSV encoding.
    pub wage_encoding: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            national_by_industry: PathBuf::from(
                "./csv_data/雇用_医療福祉_一人当たり賃金_全国_全産業.csv",
            ),
            national_by_category: PathBuf::from(
                "./csv_data/雇用_医療福祉_一人当たり賃金_全国_大分類.csv",
            ),
            prefecture_by_industry: PathBuf::from(
                "./csv_data/雇用_医療福祉_一人当たり賃金_都道府県_全産業.csv",
            ),
            geo_lookup: PathBuf::from("./pref_lat_lon.csv"),
            wage_encoding: "shift_jis".to_string(),
        }
    }
}

impl DataPaths {
    /// Resolve every relative path against `base`.
    pub fn rooted_at(&self, base: &Path) -> Self {
        Self {
            national_by_industry: base.join(&self.national_by_industry),
            national_by_category: base.join(&self.national_by_category),
            prefecture_by_industry: base.join(&self.prefecture_by_industry),
            geo_lookup: base.join(&self.geo_lookup),
            wage_encoding: self.wage_encoding.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for MapView {
    fn default() -> Self {
        // Tokyo
        Self {
            longitude: 139.691648,
            latitude: 35.689185,
            zoom: 4.0,
            pitch: 40.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Aggregation year shown on the map.
    pub year: i32,
    pub view: MapView,
    pub opacity: f64,
    pub threshold: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            year: 2019,
            view: MapView::default(),
            opacity: 0.5,
            threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    /// Largest rendered point diameter in pixels.
    pub size_max: f64,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            x_range: [150.0, 700.0],
            y_range: [0.0, 150.0],
            size_max: 38.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Added to the largest bar to get the x-axis upper bound.
    pub headroom: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            headroom: 50.0,
            width: 800,
            height: 500,
        }
    }
}
