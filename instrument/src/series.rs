// Day-indexed series pulled out of recorded town telemetry

use polars::prelude::*;

fn u64_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<u64>> {
    Ok(df.column(name)?.u64()?.into_no_null_iter().collect())
}

fn i64_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<i64>> {
    Ok(df.column(name)?.i64()?.into_no_null_iter().collect())
}

/// `(day, price)` for one material from the `prices` table, skipping days
/// on which the material had never traded.
pub fn price_series(prices: &DataFrame, material: &str) -> PolarsResult<Vec<(u64, i64)>> {
    let df = prices
        .clone()
        .lazy()
        .filter(col("material").eq(lit(material)).and(col("known")))
        .sort(["day"], Default::default())
        .collect()?;

    let days = u64_column(&df, "day")?;
    let values = i64_column(&df, "price")?;
    Ok(days.into_iter().zip(values).collect())
}

/// `(day, population)` from the `population` table.
pub fn population_series(population: &DataFrame) -> PolarsResult<Vec<(u64, u64)>> {
    let df = population
        .clone()
        .lazy()
        .sort(["day"], Default::default())
        .collect()?;

    let days = u64_column(&df, "day")?;
    let counts = u64_column(&df, "population")?;
    Ok(days.into_iter().zip(counts).collect())
}

/// `(day, count)` for one profession from the `professions` table.
pub fn profession_series(professions: &DataFrame, name: &str) -> PolarsResult<Vec<(u64, u64)>> {
    let df = professions
        .clone()
        .lazy()
        .filter(col("profession").eq(lit(name)))
        .sort(["day"], Default::default())
        .collect()?;

    let days = u64_column(&df, "day")?;
    let counts = u64_column(&df, "count")?;
    Ok(days.into_iter().zip(counts).collect())
}

/// Total units produced per day, from the `production` table.
pub fn output_per_day(production: &DataFrame) -> PolarsResult<Vec<(u64, u64)>> {
    let df = production
        .clone()
        .lazy()
        .group_by([col("day")])
        .agg([col("quantity").sum().alias("units")])
        .sort(["day"], Default::default())
        .collect()?;

    let days = u64_column(&df, "day")?;
    let units = u64_column(&df, "units")?;
    Ok(days.into_iter().zip(units).collect())
}
