// src/dashboard/mod.rs

//! One dashboard run: selections in, panel documents out.
//!
//! [`render`] is pure over already-loaded tables. [`run`] is the rerun
//! entry point: it reloads every CSV and renders from scratch.

pub mod html;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::build::{
    bubble_frames, build_bubbles, build_category, build_trend, join_geo, widget_options,
    CategoryView, GeoWageRow, TrendPoint, WidgetOptions,
};
use crate::chart::{DeckWriter, VegaLiteWriter};
use crate::config::DashboardConfig;
use crate::load::{load_tables, WageTables};
use crate::model::{WageMetric, WageRecord};

pub const TITLE: &str = "日本の賃金データ ダッシュボード";
pub const TREND_HEADER: &str = "■集計年別の一人当たり賃金（万円）の推移";
pub const BUBBLE_HEADER: &str = "■年齢階級別の全国一人当たり平均賃金";
pub const CATEGORY_HEADER: &str = "■産業別の一人当たり平均賃金";
pub const SHOW_SOURCE_LABEL: &str = "ソースを表示する";
pub const FOOTER: [&str; 2] = [
    "出典：RESAS（地域経済分析システム）",
    "本結果はRESAS（地域経済分析システム）を加工して作成",
];

pub fn heatmap_header(year: i32) -> String {
    format!("■{}年：一人当たり賃金のヒートマップ", year)
}

/// Widget state for one run. `None` means "first option", which is what a
/// select box shows before the user touches it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selections {
    pub prefecture: Option<String>,
    pub year: Option<i32>,
    pub metric: WageMetric,
    pub show_source: bool,
}

impl Selections {
    /// Fill unset choices from `options`.
    pub fn resolve(&self, options: &WidgetOptions) -> Selections {
        let prefecture = self
            .prefecture
            .clone()
            .or_else(|| options.prefectures.first().cloned());
        let year = self.year.or_else(|| options.years.first().copied());

        if let Some(p) = &prefecture {
            if !options.prefectures.contains(p) {
                warn!(prefecture = %p, "selected prefecture not in data");
            }
        }
        if let Some(y) = year {
            if !options.years.contains(&y) {
                warn!(year = y, "selected year not in data");
            }
        }

        Selections {
            prefecture,
            year,
            metric: self.metric,
            show_source: self.show_source,
        }
    }
}

/// All derived tables for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTables {
    pub geo: Vec<GeoWageRow>,
    pub trend: Vec<TrendPoint>,
    pub bubbles: Vec<WageRecord>,
    pub category: CategoryView,
}

/// Run every builder against `tables` using already-resolved selections.
pub fn derive(
    tables: &WageTables,
    selections: &Selections,
    config: &DashboardConfig,
) -> DerivedTables {
    let geo = join_geo(&tables.prefectural, &tables.geo, config.heatmap.year);
    let trend = match selections.prefecture.as_deref() {
        Some(p) => build_trend(&tables.national, &tables.prefectural, p),
        None => Vec::new(),
    };
    let bubbles = build_bubbles(&tables.national);
    let category = match selections.year {
        Some(year) => build_category(
            &tables.by_category,
            year,
            selections.metric,
            config.bar.headroom,
        ),
        None => CategoryView::empty(selections.metric),
    };
    DerivedTables {
        geo,
        trend,
        bubbles,
        category,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Renderer {
    VegaLite,
    Deck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: &'static str,
    pub header: String,
    pub renderer: Renderer,
    pub spec: Value,
}

/// Everything the page shows for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub selections: Selections,
    pub options: WidgetOptions,
    pub panels: Vec<Panel>,
    /// Geo-joined rows behind the heatmap, present when requested.
    pub source_table: Option<Vec<GeoWageRow>>,
    pub footer: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Dashboard {
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the dashboard for `selections` over `tables`.
#[instrument(level = "info", skip(tables, config))]
pub fn render(
    tables: &WageTables,
    selections: &Selections,
    config: &DashboardConfig,
) -> Result<Dashboard> {
    let options = widget_options(tables);
    let selections = selections.resolve(&options);
    let derived = derive(tables, &selections, config);

    let vega = VegaLiteWriter::new();
    let deck = DeckWriter::new();
    let frames = bubble_frames(&derived.bubbles);

    let panels = vec![
        Panel {
            id: "heatmap",
            header: heatmap_header(config.heatmap.year),
            renderer: Renderer::Deck,
            spec: deck.heatmap(&derived.geo, &config.heatmap),
        },
        Panel {
            id: "trend",
            header: TREND_HEADER.to_string(),
            renderer: Renderer::VegaLite,
            spec: vega.trend(&derived.trend),
        },
        Panel {
            id: "bubble",
            header: BUBBLE_HEADER.to_string(),
            renderer: Renderer::VegaLite,
            spec: vega.bubble(&derived.bubbles, &frames, &config.bubble),
        },
        Panel {
            id: "category",
            header: CATEGORY_HEADER.to_string(),
            renderer: Renderer::VegaLite,
            spec: vega.category(&derived.category, &config.bar),
        },
    ];

    info!(
        heatmap = derived.geo.len(),
        trend = derived.trend.len(),
        bubbles = derived.bubbles.len(),
        category = derived.category.rows.len(),
        "rendered dashboard"
    );

    Ok(Dashboard {
        title: TITLE.to_string(),
        source_table: selections.show_source.then(|| derived.geo.clone()),
        selections,
        options,
        panels,
        footer: FOOTER.iter().map(|s| s.to_string()).collect(),
        generated_at: None,
    })
}

/// Reload every table from disk and render. One call is one rerun.
pub fn run(config: &DashboardConfig, selections: &Selections) -> Result<Dashboard> {
    let tables = load_tables(&config.data)?;
    let mut dashboard = render(&tables, selections, config)?;
    dashboard.generated_at = Some(Utc::now());
    Ok(dashboard)
}
