use anyhow::Context;
use chrono::{Local, NaiveDate};
use log::warn;

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::inflation::Inflation;
use crate::report::{CSV_DATE_FORMAT, DATE_FIELD, ParsedReport};

/// Label suffix of the synthetic adjusted column paired with each series.
const ADJUSTED_SUFFIX: &str = " (inflation-adjusted)";

/// Writes one CSV report per city, pairing every price series with an
/// inflation-adjusted column.
pub struct CsvReporter {
    destination_folder: PathBuf,
    inflate_to: NaiveDate,
    inflation: Box<dyn Inflation>,
}

impl CsvReporter {
    /// All conversions of a run target January 1 of the configured year.
    pub fn new(config: &AppConfig, inflation: Box<dyn Inflation>) -> anyhow::Result<Self> {
        let inflate_to = NaiveDate::from_ymd_opt(config.inflation_adjustment_year, 1, 1)
            .context("invalid inflation adjustment year")?;
        Ok(Self {
            destination_folder: config.destination_folder.clone(),
            inflate_to,
            inflation,
        })
    }

    /// Write the accumulated report for `city` and return the file path.
    ///
    /// The same city on the same calendar day maps to the same path, so a
    /// rerun overwrites its earlier report.
    pub fn generate_report(&self, city: &str, report: &ParsedReport) -> anyhow::Result<PathBuf> {
        let mut fields = Vec::new();
        for field in report.records.keys() {
            fields.push(field.clone());
            if field != DATE_FIELD {
                fields.push(format!("{field}{ADJUSTED_SUFFIX}"));
            }
        }

        let file_name = format!("{city}-{}.csv", Local::now().format("%d-%m-%Y"));
        let report_file = self.destination_folder.join(file_name);
        let file = File::create(&report_file)
            .with_context(|| format!("could not create report file {}", report_file.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(&fields)?;
        writer.flush()?;

        for i in 0..report.len() {
            let mut row: HashMap<String, String> = HashMap::new();
            for (district, values) in &report.records {
                // A failed cell leaves its columns empty; the row is still
                // written and the run continues.
                if let Err(e) = self.fill_row_cells(&mut row, district, values, i) {
                    warn!("{city} report, row {i}, series {district}: {e}");
                }
            }
            let record: Vec<&str> = fields
                .iter()
                .map(|field| row.get(field).map_or("", String::as_str))
                .collect();
            writer.write_record(&record)?;
            // Flush every row so a failed run keeps its finished prefix.
            writer.flush()?;
        }

        Ok(report_file)
    }

    fn fill_row_cells(
        &self,
        row: &mut HashMap<String, String>,
        district: &str,
        values: &[String],
        i: usize,
    ) -> anyhow::Result<()> {
        let value = values
            .get(i)
            .with_context(|| format!("series holds no value at row {i}"))?;
        row.insert(district.to_string(), value.clone());

        if district != DATE_FIELD {
            let date = row.get(DATE_FIELD).context("row has no date")?;
            let date = NaiveDate::parse_from_str(date, CSV_DATE_FORMAT)?;
            let amount: f64 = value.parse()?;
            let adjusted = self.inflation.inflate(amount, date, self.inflate_to)?;
            row.insert(
                format!("{district}{ADJUSTED_SUFFIX}"),
                (adjusted.round() as i64).to_string(),
            );
        }
        Ok(())
    }
}
