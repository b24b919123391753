// src/chart/vegalite.rs

use serde_json::{json, Map, Value};

use crate::build::{CategoryView, TrendPoint};
use crate::config::{BarConfig, BubbleConfig};
use crate::model::{columns, WageRecord};

/// Legend/axis labels for the folded trend series.
const SERIES: &str = "系列";
const WAGE: &str = "賃金";

/// Vega-Lite JSON writer for the three non-map panels.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VegaLiteWriter {
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v6.json".to_string(),
        }
    }

    fn base(&self) -> Map<String, Value> {
        let mut spec = Map::new();
        spec.insert("$schema".into(), json!(self.schema));
        spec
    }

    /// Year-indexed national vs. prefecture lines.
    pub fn trend(&self, points: &[TrendPoint]) -> Value {
        let values: Vec<Value> = points
            .iter()
            .map(|p| {
                json!({
                    (columns::YEAR): p.year,
                    (columns::NATIONAL_WAGE): p.national_wage,
                    (columns::PREFECTURE_WAGE): p.prefecture_wage,
                })
            })
            .collect();

        let mut spec = self.base();
        spec.insert("data".into(), json!({ "values": values }));
        spec.insert(
            "transform".into(),
            json!([{
                "fold": [columns::NATIONAL_WAGE, columns::PREFECTURE_WAGE],
                "as": [SERIES, WAGE],
            }]),
        );
        spec.insert("mark".into(), json!({ "type": "line", "point": true }));
        spec.insert(
            "encoding".into(),
            json!({
                "x": { "field": columns::YEAR, "type": "ordinal", "sort": "ascending" },
                "y": { "field": WAGE, "type": "quantitative" },
                "color": { "field": SERIES, "type": "nominal" },
            }),
        );
        spec.insert("width".into(), json!("container"));
        Value::Object(spec)
    }

    /// Age-bracket bubbles, one frame per year.
    ///
    /// Frames are driven by a select over the years present, bound to
    /// `frame`; `detail` on the age bracket keeps each bracket a single mark
    /// across frames.
    pub fn bubble(&self, rows: &[WageRecord], frames: &[i32], cfg: &BubbleConfig) -> Value {
        let values: Vec<Value> = rows
            .iter()
            .map(|r| {
                json!({
                    (columns::YEAR): r.year,
                    (columns::AGE): r.age_bracket,
                    (columns::PER_CAPITA_WAGE): r.per_capita_wage,
                    (columns::CONTRACTED_WAGE): r.contracted_wage,
                    (columns::SPECIAL_BONUS): r.special_bonus,
                })
            })
            .collect();

        // size is an area in px²; size_max is a diameter
        let max_area = std::f64::consts::PI * (cfg.size_max / 2.0).powi(2);

        let mut spec = self.base();
        spec.insert("data".into(), json!({ "values": values }));
        if let Some(first) = frames.first() {
            spec.insert(
                "params".into(),
                json!([{
                    "name": "frame",
                    "value": first,
                    "bind": {
                        "input": "select",
                        "options": frames,
                        "name": format!("{} ", columns::YEAR),
                    },
                }]),
            );
            spec.insert(
                "transform".into(),
                json!([{ "filter": format!("datum['{}'] == frame", columns::YEAR) }]),
            );
        }
        spec.insert("mark".into(), json!({ "type": "circle", "opacity": 0.7 }));
        spec.insert(
            "encoding".into(),
            json!({
                "x": {
                    "field": columns::PER_CAPITA_WAGE,
                    "type": "quantitative",
                    "scale": { "domain": cfg.x_range, "clamp": true },
                },
                "y": {
                    "field": columns::SPECIAL_BONUS,
                    "type": "quantitative",
                    "scale": { "domain": cfg.y_range, "clamp": true },
                },
                "size": {
                    "field": columns::CONTRACTED_WAGE,
                    "type": "quantitative",
                    "scale": { "range": [0.0, max_area] },
                },
                "color": { "field": columns::AGE, "type": "nominal" },
                "detail": { "field": columns::AGE, "type": "nominal" },
                "tooltip": [
                    { "field": columns::AGE, "type": "nominal" },
                    { "field": columns::PER_CAPITA_WAGE, "type": "quantitative" },
                    { "field": columns::CONTRACTED_WAGE, "type": "quantitative" },
                    { "field": columns::SPECIAL_BONUS, "type": "quantitative" },
                ],
            }),
        );
        Value::Object(spec)
    }

    /// Horizontal bars per industry category, one frame per age bracket.
    pub fn category(&self, view: &CategoryView, cfg: &BarConfig) -> Value {
        let metric = view.metric.column();
        let values: Vec<Value> = view
            .rows
            .iter()
            .map(|r| {
                json!({
                    (metric): r.metric(view.metric),
                    (columns::INDUSTRY_CATEGORY): r.industry_category,
                    (columns::AGE): r.age_bracket,
                })
            })
            .collect();
        let frames = view.frames();

        let mut spec = self.base();
        spec.insert("data".into(), json!({ "values": values }));
        if let Some(first) = frames.first() {
            spec.insert(
                "params".into(),
                json!([{
                    "name": "frame",
                    "value": first,
                    "bind": {
                        "input": "select",
                        "options": frames,
                        "name": format!("{} ", columns::AGE),
                    },
                }]),
            );
            spec.insert(
                "transform".into(),
                json!([{ "filter": format!("datum['{}'] == frame", columns::AGE) }]),
            );
        }

        let mut x = json!({ "field": metric, "type": "quantitative" });
        if let Some(max) = view.axis_max {
            x["scale"] = json!({ "domain": [0.0, max] });
        }
        spec.insert("mark".into(), json!("bar"));
        spec.insert(
            "encoding".into(),
            json!({
                "x": x,
                "y": { "field": columns::INDUSTRY_CATEGORY, "type": "nominal" },
                "color": { "field": columns::INDUSTRY_CATEGORY, "type": "nominal" },
            }),
        );
        spec.insert("width".into(), json!(cfg.width));
        spec.insert("height".into(), json!(cfg.height));
        Value::Object(spec)
    }
}
