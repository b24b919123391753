mod common;

use anyhow::Result;
use common::write_inputs;
use serde_json::{json, Value};
use tempfile::tempdir;
use wagedash::{model::columns, run, DashboardConfig, Selections, WageMetric};

fn values(panel: &Value) -> &Vec<Value> {
    panel["spec"]["data"]["values"].as_array().unwrap()
}

#[test]
fn tokyo_trend_covers_2015_to_2019() -> Result<()> {
    let dir = tempdir()?;
    let config = DashboardConfig {
        data: write_inputs(dir.path())?,
        ..DashboardConfig::default()
    };
    let selections = Selections {
        prefecture: Some("東京都".into()),
        ..Selections::default()
    };

    let dash: Value = serde_json::from_str(&run(&config, &selections)?.to_json()?)?;
    let trend = values(&dash["panels"][1]);
    assert_eq!(trend.len(), 5);
    let years: Vec<i64> = trend.iter().map(|v| v[columns::YEAR].as_i64().unwrap()).collect();
    assert_eq!(years, vec![2015, 2016, 2017, 2018, 2019]);
    for v in trend {
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key(columns::NATIONAL_WAGE));
        assert!(obj.contains_key(columns::PREFECTURE_WAGE));
    }
    Ok(())
}

#[test]
fn heatmap_for_2019_spans_zero_to_one() -> Result<()> {
    let dir = tempdir()?;
    let config = DashboardConfig {
        data: write_inputs(dir.path())?,
        ..DashboardConfig::default()
    };
    let dash: Value = serde_json::from_str(&run(&config, &Selections::default())?.to_json()?)?;

    let data = dash["panels"][0]["spec"]["layers"][0]["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["normalized_wage"], json!(1.0));
    assert_eq!(data[1]["normalized_wage"], json!(0.0));
    Ok(())
}

#[test]
fn metric_switch_moves_only_the_bar_axis() -> Result<()> {
    let dir = tempdir()?;
    let config = DashboardConfig {
        data: write_inputs(dir.path())?,
        ..DashboardConfig::default()
    };
    let pick = |metric| Selections {
        year: Some(2019),
        metric,
        ..Selections::default()
    };

    let per_capita = run(&config, &pick(WageMetric::PerCapita))?;
    let contracted = run(&config, &pick(WageMetric::Contracted))?;

    let domain = |d: &wagedash::Dashboard| {
        d.panel("category").unwrap().spec["encoding"]["x"]["scale"]["domain"].clone()
    };
    assert_eq!(domain(&per_capita), json!([0.0, 574.0]));
    assert_eq!(domain(&contracted), json!([0.0, 410.0]));
    assert_eq!(
        per_capita.panel("bubble").unwrap().spec,
        contracted.panel("bubble").unwrap().spec
    );
    Ok(())
}
