use indexmap::IndexMap;

/// Name of the reserved series holding one entry per observation date.
pub const DATE_FIELD: &str = "Date";

/// Date format used in report rows and the generated CSV files.
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered collection of named value series sharing a common date index.
///
/// Series keep their insertion order; the CSV column order depends on it.
#[derive(Debug, Default)]
pub struct ParsedReport {
    pub records: IndexMap<String, Vec<String>>,
}

impl ParsedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observed value for `field` at `date`.
    ///
    /// The date series grows only when `date` starts a new observation, so
    /// appending every district of one page keeps a single date entry.
    pub fn append(&mut self, field: &str, date: &str, value: &str) {
        let dates = self.records.entry(DATE_FIELD.to_string()).or_default();
        if dates.last().map(String::as_str) != Some(date) {
            dates.push(date.to_string());
        }
        self.records
            .entry(field.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// Fold another report's rows into this one, row by row.
    pub fn merge(&mut self, other: ParsedReport) {
        let Some(dates) = other.records.get(DATE_FIELD) else {
            return;
        };
        for (i, date) in dates.iter().enumerate() {
            for (field, values) in &other.records {
                if field == DATE_FIELD {
                    continue;
                }
                if let Some(value) = values.get(i) {
                    self.append(field, date, value);
                }
            }
        }
    }

    /// Number of date observations collected so far.
    pub fn len(&self) -> usize {
        self.records.get(DATE_FIELD).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_series_lengths_in_step() {
        let mut report = ParsedReport::new();
        report.append("Center", "2024-05-01", "1200");
        report.append("Suburbs", "2024-05-01", "800");
        assert_eq!(report.len(), 1);
        for values in report.records.values() {
            assert_eq!(values.len(), 1);
        }

        report.append("Center", "2024-06-01", "1250");
        report.append("Suburbs", "2024-06-01", "810");
        assert_eq!(report.len(), 2);
        for values in report.records.values() {
            assert_eq!(values.len(), 2);
        }
    }

    #[test]
    fn append_records_each_date_once() {
        let mut report = ParsedReport::new();
        report.append("Center", "2024-05-01", "1200");
        report.append("Suburbs", "2024-05-01", "800");
        report.append("Pecherskyi", "2024-05-01", "2400");
        assert_eq!(report.records[DATE_FIELD], vec!["2024-05-01"]);
    }

    #[test]
    fn append_preserves_series_insertion_order() {
        let mut report = ParsedReport::new();
        report.append("Center", "2024-05-01", "1200");
        report.append("Suburbs", "2024-05-01", "800");
        let order: Vec<&String> = report.records.keys().collect();
        assert_eq!(order, [DATE_FIELD, "Center", "Suburbs"]);
    }

    #[test]
    fn merge_replays_rows_in_order() {
        let mut may = ParsedReport::new();
        may.append("Center", "2024-05-01", "1200");
        may.append("Suburbs", "2024-05-01", "800");
        let mut june = ParsedReport::new();
        june.append("Center", "2024-06-01", "1250");
        june.append("Suburbs", "2024-06-01", "810");

        let mut report = ParsedReport::new();
        report.merge(may);
        report.merge(june);

        assert_eq!(report.records[DATE_FIELD], vec!["2024-05-01", "2024-06-01"]);
        assert_eq!(report.records["Center"], vec!["1200", "1250"]);
        assert_eq!(report.records["Suburbs"], vec!["800", "810"]);
    }

    #[test]
    fn merge_tolerates_series_missing_from_a_fragment() {
        let mut may = ParsedReport::new();
        may.append("Center", "2024-05-01", "1200");
        may.append("Suburbs", "2024-05-01", "800");
        // Suburbs reported no data in June.
        let mut june = ParsedReport::new();
        june.append("Center", "2024-06-01", "1250");

        let mut report = ParsedReport::new();
        report.merge(may);
        report.merge(june);

        assert_eq!(report.len(), 2);
        assert_eq!(report.records["Center"].len(), 2);
        assert_eq!(report.records["Suburbs"].len(), 1);
    }

    #[test]
    fn merge_of_empty_fragment_is_a_no_op() {
        let mut report = ParsedReport::new();
        report.merge(ParsedReport::new());
        assert!(report.is_empty());
    }
}
