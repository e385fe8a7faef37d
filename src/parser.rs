use anyhow::Context;
use log::debug;
use scraper::{Html, Selector};

use crate::report::ParsedReport;
use crate::text_manipulators::extract_text;

/// Marker the source prints for districts without data in a month.
const NO_DATA: &str = "-";

/// Extracts the price table of one result page into a report fragment.
#[derive(Debug, Default)]
pub struct RawInfoParser;

impl RawInfoParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one page of raw source HTML into a single-date report.
    ///
    /// A page without the price table or its date header is a fatal error;
    /// individual rows that do not look like `label / price` are skipped.
    pub fn parse(&self, html: &str) -> anyhow::Result<ParsedReport> {
        let document = Html::parse_document(html);
        let table_selector = Selector::parse("table.tHH").unwrap();
        let row_selector = Selector::parse("tr.vals").unwrap();
        let header_selector = Selector::parse("tr.headHH2").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        document
            .select(&table_selector)
            .next()
            .context("price table (table.tHH) not found in page")?;

        let header = document
            .select(&header_selector)
            .next()
            .context("header row (tr.headHH2) not found in page")?;
        let date = header
            .select(&cell_selector)
            .nth(1)
            .map(extract_text)
            .context("date cell missing from header row")?;
        let date = date.trim();

        let mut result = ParsedReport::new();
        for row in document.select(&row_selector) {
            let text = extract_text(row);
            let segments: Vec<&str> = text.trim().split('\n').map(str::trim).collect();
            // Districts without data for a month show a lone dash; skip them
            // without failing the page.
            if let [label, price] = segments[..] {
                if price != NO_DATA {
                    let price = price.trim_matches('$');
                    debug!("{label} {date} {price}");
                    result.append(label, date, price);
                }
            }
        }

        Ok(result)
    }
}
