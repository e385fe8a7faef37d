use anyhow::Context;
use chrono::{Datelike, NaiveDate};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::report::CSV_DATE_FORMAT;

/// Converts a nominal amount observed at one date into its equivalent
/// purchasing power at another date.
///
/// The reporter only depends on this trait, so the index data can come from
/// any provider.
pub trait Inflation {
    fn inflate(&self, amount: f64, from: NaiveDate, to: NaiveDate) -> anyhow::Result<f64>;
}

/// Monthly consumer price index series, loaded from a JSON object keyed by
/// first-of-month `YYYY-MM-DD` dates.
#[derive(Debug)]
pub struct CpiTable {
    index: HashMap<NaiveDate, f64>,
}

impl CpiTable {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read CPI series file {}", path.display()))?;
        let raw: HashMap<String, f64> = serde_json::from_str(&text)
            .with_context(|| format!("malformed CPI series file {}", path.display()))?;

        let mut index = HashMap::with_capacity(raw.len());
        for (date, value) in raw {
            let date = NaiveDate::parse_from_str(&date, CSV_DATE_FORMAT)
                .with_context(|| format!("bad date key in CPI series: {date}"))?;
            index.insert(first_of_month(date), value);
        }
        Ok(Self { index })
    }

    pub fn from_series<I>(series: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let index = series
            .into_iter()
            .map(|(date, value)| (first_of_month(date), value))
            .collect();
        Self { index }
    }

    fn index_at(&self, date: NaiveDate) -> anyhow::Result<f64> {
        self.index
            .get(&first_of_month(date))
            .copied()
            .with_context(|| format!("no CPI value for {}", date.format("%Y-%m")))
    }
}

impl Inflation for CpiTable {
    fn inflate(&self, amount: f64, from: NaiveDate, to: NaiveDate) -> anyhow::Result<f64> {
        Ok(amount * self.index_at(to)? / self.index_at(from)?)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists for every month.
    date.with_day(1).unwrap()
}
