//! Report generation for parsed records
//!
//! This module writes the dataset in formats a rendering surface or a
//! spreadsheet can consume:
//!
//! - **JSON**: full document with summary, flat records and rejected rows
//! - **CSV**: one flat row per country
//!
//! # Usage
//!
//! ```ignore
//! use wartoll::{report, Dataset};
//!
//! let dataset = Dataset::embedded();
//! // Automatically picks format based on extension
//! report::generate("deaths.json", &dataset)?;  // JSON
//! report::generate("deaths.csv", &dataset)?;   // CSV
//! ```

pub mod csv;
pub mod json;

use crate::narrative::equivalence::Equivalence;
use crate::narrative::{Category, Cumulative, NarrativeMode, NarrativeRow, Selection};
use crate::record::{CountryRecord, Dataset, RejectedRow};
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::info;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, dataset: &Dataset) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, dataset)?,
        _ => csv::write(&mut file, &dataset.records)?,
    }

    info!(path = %path.display(), records = dataset.len(), "report written");
    Ok(())
}

/// Write a selection document as JSON.
pub fn write_selection<P: AsRef<Path>>(path: P, selection: &Selection) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;
    json::write_selection(&mut file, selection)?;

    info!(path = %path.display(), countries = selection.len(), "selection written");
    Ok(())
}

/// Summary statistics for a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub countries: usize,
    pub known_military: usize,
    pub known_total: usize,
    pub derived_civilian: usize,
    pub with_population: usize,
    pub rejected: usize,
    /// Sum of the low and high total estimates over countries with a figure.
    pub total_deaths_low: f64,
    pub total_deaths_high: f64,
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut summary = Self::from_records(&dataset.records);
        summary.rejected = dataset.rejected.len();
        summary
    }

    pub fn from_records(records: &[CountryRecord]) -> Self {
        let mut summary = Self {
            countries: records.len(),
            ..Self::default()
        };

        for r in records {
            if r.military.is_some() {
                summary.known_military += 1;
            }
            if let Some(total) = r.total {
                summary.known_total += 1;
                summary.total_deaths_low += total.low;
                summary.total_deaths_high += total.high;
            }
            if r.civilian.is_some() {
                summary.derived_civilian += 1;
            }
            if r.population_1939.is_some() {
                summary.with_population += 1;
            }
        }

        summary
    }
}

/// Full dataset document.
#[derive(Debug, Serialize)]
pub struct DatasetReport<'a> {
    pub generated: String,
    pub summary: Summary,
    pub records: &'a [CountryRecord],
    pub rejected: &'a [RejectedRow],
}

impl<'a> DatasetReport<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            generated: chrono::Local::now().to_rfc3339(),
            summary: Summary::from_dataset(dataset),
            records: &dataset.records,
            rejected: &dataset.rejected,
        }
    }
}

/// Selection document handed to the animated chart.
#[derive(Debug, Serialize)]
pub struct SelectionReport<'a> {
    pub generated: String,
    pub focus: Category,
    pub focus_title: &'static str,
    pub mode: NarrativeMode,
    pub mode_label: &'static str,
    pub count: usize,
    pub ranked: &'a [NarrativeRow],
    pub reveal: &'a [NarrativeRow],
    pub cumulative: Cumulative,
    /// City comparison for each reveal step, in reveal order.
    pub equivalences: Vec<Equivalence>,
    /// The comparison shown once every bar is on screen.
    pub equivalence: Option<Equivalence>,
}

impl<'a> SelectionReport<'a> {
    pub fn new(selection: &'a Selection) -> Self {
        let equivalences = selection.equivalences();
        Self {
            generated: chrono::Local::now().to_rfc3339(),
            focus: selection.focus,
            focus_title: selection.focus.title(),
            mode: selection.mode,
            mode_label: selection.mode.label(),
            count: selection.len(),
            ranked: &selection.ranked,
            reveal: &selection.reveal,
            cumulative: selection.cumulative(),
            equivalence: equivalences.last().copied(),
            equivalences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::select;
    use crate::record::RecordInput;

    // ==========================================================================
    // SUMMARY STATISTICS TESTS
    // ==========================================================================
    //
    // The Summary counts how much of the table is actually known. It is
    // shown at the top of reports next to the records themselves.
    // ==========================================================================

    fn dataset(rows: &[(&str, &str, &str, Option<u64>)]) -> Dataset {
        let inputs: Vec<RecordInput> = rows
            .iter()
            .map(|(c, m, t, p)| RecordInput::new(c, m, t, *p))
            .collect();
        Dataset::build(&inputs)
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_dataset(&Dataset::default());

        assert_eq!(summary, Summary::default());
        assert_eq!(summary.countries, 0);
    }

    #[test]
    fn test_summary_mixed() {
        let ds = dataset(&[
            ("A", "1,000", "2,000", Some(10_000)),
            ("B", "--", "3,000-5,000", None),
            ("C", "--", "--", Some(5_000)),
            ("D", "oops", "1,000", None),
        ]);
        let summary = Summary::from_dataset(&ds);

        assert_eq!(summary.countries, 3);
        assert_eq!(summary.known_military, 1);
        assert_eq!(summary.known_total, 2);
        assert_eq!(summary.derived_civilian, 1);
        assert_eq!(summary.with_population, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.total_deaths_low, 5_000.0);
        assert_eq!(summary.total_deaths_high, 7_000.0);
    }

    #[test]
    fn test_summary_embedded() {
        let summary = Summary::from_dataset(&Dataset::embedded());

        assert_eq!(summary.countries, 40);
        assert_eq!(summary.known_total, 40);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.derived_civilian, summary.known_military);
        assert!(summary.total_deaths_low <= summary.total_deaths_high);
    }

    // ==========================================================================
    // DOCUMENTS
    // ==========================================================================

    #[test]
    fn test_dataset_report_fields() {
        let ds = dataset(&[("A", "1,000", "2,000", None)]);
        let json = serde_json::to_value(DatasetReport::new(&ds)).unwrap();

        assert!(json["generated"].is_string());
        assert_eq!(json["summary"]["countries"], 1);
        assert_eq!(json["records"][0]["civilian_avg"], 1_000.0);
        assert!(json["rejected"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_selection_report_fields() {
        let ds = Dataset::embedded();
        let sel = select(&ds.records, Category::Civilian, 5, NarrativeMode::PerCapita100k);
        let json = serde_json::to_value(SelectionReport::new(&sel)).unwrap();

        assert_eq!(json["focus"], "civilian");
        assert_eq!(json["focus_title"], "Civilian burden");
        assert_eq!(json["mode"], "per100k");
        assert_eq!(json["count"], 5);
        assert_eq!(json["ranked"].as_array().unwrap().len(), 5);
        assert_eq!(json["cumulative"]["countries"], 5);
        assert!(json["equivalence"]["city"].is_string());
        assert_eq!(json["equivalences"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_selection_report_final_equivalence_is_last_step() {
        let ds = Dataset::embedded();
        let sel = select(&ds.records, Category::Total, 5, NarrativeMode::Absolute);
        let report = SelectionReport::new(&sel);

        let eqs = sel.equivalences();
        assert_eq!(report.equivalences, eqs);
        assert_eq!(report.equivalence, eqs.last().copied());

        // Based on the last revealed country, not the cumulative total
        let last = sel.reveal.last().unwrap().total_avg.unwrap();
        let eq = report.equivalence.unwrap();
        assert!((eq.reference_multiple - last / 229_447.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_selection_has_no_equivalence() {
        let sel = select(&[], Category::Total, 5, NarrativeMode::Absolute);
        let json = serde_json::to_value(SelectionReport::new(&sel)).unwrap();
        assert!(json["equivalence"].is_null());
        assert!(json["equivalences"].as_array().unwrap().is_empty());
    }

    // ==========================================================================
    // FILE OUTPUT
    // ==========================================================================

    #[test]
    fn test_generate_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ds = dataset(&[("A", "1,000", "2,000", None)]);

        let json_path = dir.path().join("deaths.JSON");
        generate(&json_path, &ds).unwrap();
        let text = std::fs::read_to_string(&json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["summary"]["countries"], 1);

        let csv_path = dir.path().join("deaths.csv");
        generate(&csv_path, &ds).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("country,"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_generate_unknown_extension_is_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deaths.txt");
        generate(&path, &Dataset::embedded()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 41);
    }

    #[test]
    fn test_generate_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/deaths.csv");
        assert!(generate(&path, &Dataset::default()).is_err());
    }

    #[test]
    fn test_write_selection_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");
        let ds = Dataset::embedded();
        let sel = select(&ds.records, Category::Total, 8, NarrativeMode::Absolute);

        write_selection(&path, &sel).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["reveal"].as_array().unwrap().len(), 8);
        assert_eq!(value["ranked"][0]["country"], "Soviet Union");
    }
}
