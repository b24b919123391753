// src/model.rs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Column labels as they appear in the RESAS wage exports.
pub mod columns {
    pub const YEAR: &str = "集計年";
    pub const AGE: &str = "年齢";
    pub const PREFECTURE: &str = "都道府県名";
    pub const INDUSTRY_CATEGORY: &str = "産業大分類名";
    pub const PER_CAPITA_WAGE: &str = "一人当たり賃金（万円）";
    pub const CONTRACTED_WAGE: &str = "所定内給与額（万円）";
    pub const SPECIAL_BONUS: &str = "年間賞与その他特別給与額（万円）";

    /// Min-max normalized per-capita wage, added by the geo join.
    pub const NORMALIZED_WAGE: &str = "一人当たり賃金（相対値）";
    pub const NATIONAL_WAGE: &str = "全国_一人当たり賃金（万円）";
    pub const PREFECTURE_WAGE: &str = "都道府県別_一人当たり賃金（万円）";

    /// Geo lookup headers.
    pub const GEO_PREFECTURE: &str = "pref_name";
    pub const LONGITUDE: &str = "lon";
    pub const LATITUDE: &str = "lat";
}

/// Label of the "all ages combined" row.
pub const AGE_TOTAL: &str = "年齢計";

/// One row of the national or prefectural wage table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    pub year: i32,
    pub age_bracket: String,
    /// Only present in the prefectural table.
    pub prefecture: Option<String>,
    pub per_capita_wage: f64,
    pub contracted_wage: f64,
    pub special_bonus: f64,
}

impl WageRecord {
    pub fn is_age_total(&self) -> bool {
        self.age_bracket == AGE_TOTAL
    }

    pub fn metric(&self, metric: WageMetric) -> f64 {
        match metric {
            WageMetric::PerCapita => self.per_capita_wage,
            WageMetric::Contracted => self.contracted_wage,
            WageMetric::SpecialBonus => self.special_bonus,
        }
    }
}

/// One row of the national wage table broken down by industry category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryWageRecord {
    pub year: i32,
    pub age_bracket: String,
    pub industry_category: String,
    pub per_capita_wage: f64,
    pub contracted_wage: f64,
    pub special_bonus: f64,
}

impl IndustryWageRecord {
    pub fn metric(&self, metric: WageMetric) -> f64 {
        match metric {
            WageMetric::PerCapita => self.per_capita_wage,
            WageMetric::Contracted => self.contracted_wage,
            WageMetric::SpecialBonus => self.special_bonus,
        }
    }
}

/// Prefectural capital coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLookup {
    pub prefecture: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// The wage columns a user can pick for the industry chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WageMetric {
    #[default]
    PerCapita,
    Contracted,
    SpecialBonus,
}

impl WageMetric {
    pub const ALL: [WageMetric; 3] = [
        WageMetric::PerCapita,
        WageMetric::Contracted,
        WageMetric::SpecialBonus,
    ];

    /// Column label in the source CSVs.
    pub fn column(self) -> &'static str {
        match self {
            WageMetric::PerCapita => columns::PER_CAPITA_WAGE,
            WageMetric::Contracted => columns::CONTRACTED_WAGE,
            WageMetric::SpecialBonus => columns::SPECIAL_BONUS,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            WageMetric::PerCapita => "per-capita",
            WageMetric::Contracted => "contracted",
            WageMetric::SpecialBonus => "bonus",
        }
    }
}

impl fmt::Display for WageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for WageMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        for m in WageMetric::ALL {
            if s == m.column() || s.eq_ignore_ascii_case(m.short_name()) {
                return Ok(m);
            }
        }
        bail!(
            "unknown wage metric {:?}; expected one of: {}",
            s,
            WageMetric::ALL
                .iter()
                .map(|m| m.short_name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parses_label_and_short_name() {
        assert_eq!(
            "所定内給与額（万円）".parse::<WageMetric>().unwrap(),
            WageMetric::Contracted
        );
        assert_eq!("BONUS".parse::<WageMetric>().unwrap(), WageMetric::SpecialBonus);
        assert_eq!(WageMetric::PerCapita.to_string(), columns::PER_CAPITA_WAGE);
        assert!("overtime".parse::<WageMetric>().is_err());
    }

    #[test]
    fn record_metric_picks_column() {
        let r = IndustryWageRecord {
            year: 2019,
            age_bracket: "20-24歳".into(),
            industry_category: "製造業".into(),
            per_capita_wage: 300.0,
            contracted_wage: 250.0,
            special_bonus: 50.0,
        };
        assert_eq!(r.metric(WageMetric::PerCapita), 300.0);
        assert_eq!(r.metric(WageMetric::Contracted), 250.0);
        assert_eq!(r.metric(WageMetric::SpecialBonus), 50.0);
    }
}
