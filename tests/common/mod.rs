//! Shift-JIS input files shared by the integration tests.

use anyhow::Result;
use encoding_rs::SHIFT_JIS;
use std::{fs, path::Path};
use wagedash::{config::DataPaths, model::AGE_TOTAL};

fn write_sjis(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let (bytes, _, unmappable) = SHIFT_JIS.encode(text);
    assert!(!unmappable);
    fs::write(path, bytes)?;
    Ok(())
}

pub fn write_inputs(dir: &Path) -> Result<DataPaths> {
    let paths = DataPaths::default().rooted_at(dir);

    let mut national = String::from(
        "集計年,年齢,一人当たり賃金（万円）,所定内給与額（万円）,年間賞与その他特別給与額（万円）\n",
    );
    let mut prefectural = String::from(
        "集計年,都道府県名,年齢,一人当たり賃金（万円）,所定内給与額（万円）,年間賞与その他特別給与額（万円）\n",
    );
    let mut category = String::from(
        "集計年,産業大分類名,年齢,一人当たり賃金（万円）,所定内給与額（万円）,年間賞与その他特別給与額（万円）\n",
    );
    for year in (2015..=2019).rev() {
        let k = f64::from(year - 2015);
        national.push_str(&format!("{},{},{},{},{}\n", year, AGE_TOTAL, 480.0 + k, 330.0, 90.0));
        national.push_str(&format!("{},30-34歳,{},{},{}\n", year, 400.0 + k, 300.0, 70.0));
        prefectural.push_str(&format!("{},東京都,{},{},{},{}\n", year, AGE_TOTAL, 600.0 + k, 420.0, 130.0));
        prefectural.push_str(&format!("{},沖縄県,{},{},{},{}\n", year, AGE_TOTAL, 400.0 + k, 300.0, 60.0));
        category.push_str(&format!("{},製造業,{},{},{},{}\n", year, AGE_TOTAL, 500.0 + k, 340.0, 110.0));
        category.push_str(&format!("{},建設業,{},{},{},{}\n", year, AGE_TOTAL, 520.0 + k, 360.0, 100.0));
    }

    write_sjis(&paths.national_by_industry, &national)?;
    write_sjis(&paths.prefecture_by_industry, &prefectural)?;
    write_sjis(&paths.national_by_category, &category)?;
    fs::write(
        &paths.geo_lookup,
        "pref_name,lon,lat\n東京都,139.691648,35.689185\n沖縄県,127.681231,26.212401\n",
    )?;
    Ok(paths)
}
