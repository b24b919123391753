// src/chart/deck.rs

use serde_json::{json, Value};

use crate::build::GeoWageRow;
use crate::config::HeatmapConfig;

/// deck.gl JSON writer for the prefecture heatmap.
///
/// The document uses the `@@type` / `@@=` conventions understood by
/// `@deck.gl/json`'s `JSONConverter`, so it can be rendered as-is.
#[derive(Default)]
pub struct DeckWriter;

impl DeckWriter {
    pub fn new() -> Self {
        Self
    }

    /// Heatmap layer over `rows`. Only position and weight are shipped.
    pub fn heatmap(&self, rows: &[GeoWageRow], cfg: &HeatmapConfig) -> Value {
        let data: Vec<Value> = rows
            .iter()
            .map(|r| {
                json!({
                    "lon": r.longitude,
                    "lat": r.latitude,
                    "normalized_wage": r.normalized_wage,
                })
            })
            .collect();

        json!({
            "initialViewState": {
                "longitude": cfg.view.longitude,
                "latitude": cfg.view.latitude,
                "zoom": cfg.view.zoom,
                "pitch": cfg.view.pitch,
            },
            "layers": [{
                "@@type": "HeatmapLayer",
                "id": "wage-heatmap",
                "data": data,
                "opacity": cfg.opacity,
                "threshold": cfg.threshold,
                "getPosition": "@@=[lon, lat]",
                "getWeight": "@@=normalized_wage",
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lon: f64, lat: f64, w: f64) -> GeoWageRow {
        GeoWageRow {
            year: 2019,
            prefecture: "東京都".into(),
            per_capita_wage: 600.0,
            longitude: lon,
            latitude: lat,
            normalized_wage: w,
        }
    }

    #[test]
    fn heatmap_carries_view_and_three_numeric_columns() {
        let doc = DeckWriter::new().heatmap(
            &[row(139.69, 35.69, 1.0), row(127.68, 26.21, 0.0)],
            &HeatmapConfig::default(),
        );
        let view = &doc["initialViewState"];
        assert_eq!(view["longitude"], json!(139.691648));
        assert_eq!(view["latitude"], json!(35.689185));
        assert_eq!(view["zoom"], json!(4.0));
        assert_eq!(view["pitch"], json!(40.5));

        let layer = &doc["layers"][0];
        assert_eq!(layer["@@type"], json!("HeatmapLayer"));
        assert_eq!(layer["opacity"], json!(0.5));
        assert_eq!(layer["threshold"], json!(0.3));

        let first = layer["data"][0].as_object().unwrap();
        assert_eq!(first.len(), 3);
        assert!(first.values().all(Value::is_number));
    }

    #[test]
    fn undefined_weight_becomes_null() {
        let doc = DeckWriter::new().heatmap(&[row(1.0, 2.0, f64::NAN)], &HeatmapConfig::default());
        assert_eq!(doc["layers"][0]["data"][0]["normalized_wage"], Value::Null);
    }
}
