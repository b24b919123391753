// src/load/convert.rs

use anyhow::{Context, Result};
use arrow::{array::StringArray, record_batch::RecordBatch};

use crate::load::csv::{cell, string_column};
use crate::load::utils::{parse_label, parse_wage, parse_year};
use crate::model::{columns, GeoLookup, IndustryWageRecord, WageRecord};

/// Borrowed wage columns shared by every wage table.
struct WageColumns<'a> {
    years: &'a StringArray,
    ages: &'a StringArray,
    per_capita: &'a StringArray,
    contracted: &'a StringArray,
    bonus: &'a StringArray,
}

impl<'a> WageColumns<'a> {
    fn from_batch(batch: &'a RecordBatch) -> Result<Self> {
        Ok(Self {
            years: string_column(batch, columns::YEAR)?,
            ages: string_column(batch, columns::AGE)?,
            per_capita: string_column(batch, columns::PER_CAPITA_WAGE)?,
            contracted: string_column(batch, columns::CONTRACTED_WAGE)?,
            bonus: string_column(batch, columns::SPECIAL_BONUS)?,
        })
    }

    fn year(&self, row: usize) -> Result<i32> {
        parse_year(cell(self.years, row)).context(columns::YEAR)
    }

    fn age(&self, row: usize) -> Result<String> {
        parse_label(cell(self.ages, row)).context(columns::AGE)
    }

    /// (per-capita, contracted, bonus)
    fn wages(&self, row: usize) -> Result<(f64, f64, f64)> {
        Ok((
            parse_wage(cell(self.per_capita, row)).context(columns::PER_CAPITA_WAGE)?,
            parse_wage(cell(self.contracted, row)).context(columns::CONTRACTED_WAGE)?,
            parse_wage(cell(self.bonus, row)).context(columns::SPECIAL_BONUS)?,
        ))
    }
}

/// Turn a national or prefectural wage batch into typed rows.
/// `with_prefecture` selects whether the prefecture column is required.
pub fn to_wage_records(batch: &RecordBatch, with_prefecture: bool) -> Result<Vec<WageRecord>> {
    let cols = WageColumns::from_batch(batch)?;
    let prefs = if with_prefecture {
        Some(string_column(batch, columns::PREFECTURE)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let ctx = || format!("data row {}", row + 1);
        let prefecture = match prefs {
            Some(p) => Some(
                parse_label(cell(p, row))
                    .context(columns::PREFECTURE)
                    .with_context(ctx)?,
            ),
            None => None,
        };
        let (per_capita_wage, contracted_wage, special_bonus) =
            cols.wages(row).with_context(ctx)?;
        out.push(WageRecord {
            year: cols.year(row).with_context(ctx)?,
            age_bracket: cols.age(row).with_context(ctx)?,
            prefecture,
            per_capita_wage,
            contracted_wage,
            special_bonus,
        });
    }
    Ok(out)
}

/// Turn the industry-category batch into typed rows.
pub fn to_industry_records(batch: &RecordBatch) -> Result<Vec<IndustryWageRecord>> {
    let cols = WageColumns::from_batch(batch)?;
    let categories = string_column(batch, columns::INDUSTRY_CATEGORY)?;

    let mut out = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let ctx = || format!("data row {}", row + 1);
        let (per_capita_wage, contracted_wage, special_bonus) =
            cols.wages(row).with_context(ctx)?;
        out.push(IndustryWageRecord {
            year: cols.year(row).with_context(ctx)?,
            age_bracket: cols.age(row).with_context(ctx)?,
            industry_category: parse_label(cell(categories, row))
                .context(columns::INDUSTRY_CATEGORY)
                .with_context(ctx)?,
            per_capita_wage,
            contracted_wage,
            special_bonus,
        });
    }
    Ok(out)
}

/// Turn the prefecture coordinate batch into typed rows.
pub fn to_geo_lookup(batch: &RecordBatch) -> Result<Vec<GeoLookup>> {
    let names = string_column(batch, columns::GEO_PREFECTURE)?;
    let lons = string_column(batch, columns::LONGITUDE)?;
    let lats = string_column(batch, columns::LATITUDE)?;

    let mut out = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let geo = GeoLookup {
            prefecture: parse_label(cell(names, row))
                .with_context(|| format!("data row {}: {}", row + 1, columns::GEO_PREFECTURE))?,
            longitude: parse_wage(cell(lons, row))
                .with_context(|| format!("data row {}: {}", row + 1, columns::LONGITUDE))?,
            latitude: parse_wage(cell(lats, row))
                .with_context(|| format!("data row {}: {}", row + 1, columns::LATITUDE))?,
        };
        out.push(geo);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::csv::csv_to_string_batch;

    const PREF_CSV: &str = "集計年,都道府県コード,都道府県名,年齢,一人当たり賃金（万円）,所定内給与額（万円）,年間賞与その他特別給与額（万円）
2019,13,東京都,年齢計,620.5,450.2,120.3
2019,13,東京都,20-24歳,300,250,
";

    #[test]
    fn prefectural_rows_convert_and_keep_extra_columns_out() -> Result<()> {
        let batch = csv_to_string_batch(PREF_CSV)?;
        let rows = to_wage_records(&batch, true)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prefecture.as_deref(), Some("東京都"));
        assert!(rows[0].is_age_total());
        assert_eq!(rows[0].per_capita_wage, 620.5);
        assert!(rows[1].special_bonus.is_nan());
        Ok(())
    }

    #[test]
    fn national_rows_do_not_need_a_prefecture() -> Result<()> {
        let batch = csv_to_string_batch(
            "集計年,年齢,一人当たり賃金（万円）,所定内給与額（万円）,年間賞与その他特別給与額（万円）\n2015,年齢計,480,350,90\n",
        )?;
        let rows = to_wage_records(&batch, false)?;
        assert_eq!(rows[0].prefecture, None);
        assert_eq!(rows[0].year, 2015);
        assert!(to_wage_records(&batch, true).is_err());
        Ok(())
    }

    #[test]
    fn bad_cell_reports_row_and_column() -> Result<()> {
        let batch = csv_to_string_batch(
            "集計年,年齢,産業大分類名,一人当たり賃金（万円）,所定内給与額（万円）,年間賞与その他特別給与額（万円）\n2019,年齢計,製造業,abc,1,1\n",
        )?;
        let err = format!("{:#}", to_industry_records(&batch).unwrap_err());
        assert!(err.contains("data row 1"), "{}", err);
        assert!(err.contains(columns::PER_CAPITA_WAGE), "{}", err);
        Ok(())
    }

    #[test]
    fn geo_rows_convert() -> Result<()> {
        let batch = csv_to_string_batch("pref_name,lon,lat\n東京都,139.69,35.68\n")?;
        let geo = to_geo_lookup(&batch)?;
        assert_eq!(
            geo,
            vec![GeoLookup {
                prefecture: "東京都".into(),
                longitude: 139.69,
                latitude: 35.68,
            }]
        );
        Ok(())
    }
}
