//! Per-country records and the derived civilian metrics
//!
//! A [`CountryRecord`] is built from the raw military and total death text of
//! one country. Everything else is derived eagerly at construction:
//!
//! ```text
//! military_text --parse--> military bounds --+--> civilian bounds
//! total_text    --parse--> total bounds    --+
//!                                              each --> midpoint + label
//! ```
//!
//! Civilian deaths are never published directly. They are whatever part of
//! the total is not military, so the widest civilian range consistent with
//! both estimates is:
//!
//! ```text
//! civilian.low  = max(0, total.low  - military.high)
//! civilian.high = max(0, total.high - military.low)
//! ```
//!
//! If either estimate is unknown the civilian figure is unknown too.

use crate::dataset::{self, DeathRow};
use crate::estimate::{self, Bounds, ParseError};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::{debug, info, warn};

/// Which death figure of a record to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Military,
    #[default]
    Total,
    Civilian,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Total, Category::Military, Category::Civilian];

    /// Heading used by the visualization for this focus.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Total => "Total impact",
            Category::Military => "Military burden",
            Category::Civilian => "Civilian burden",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Military => write!(f, "military"),
            Category::Total => write!(f, "total"),
            Category::Civilian => write!(f, "civilian"),
        }
    }
}

/// Source field a parse error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Military,
    Total,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Military => write!(f, "military deaths"),
            Field::Total => write!(f, "total deaths"),
        }
    }
}

/// A record whose text could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    pub country: String,
    pub field: Field,
    pub source: ParseError,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.country, self.field, self.source)
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Raw inputs for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInput {
    pub country: String,
    pub military_text: String,
    pub total_text: String,
    pub population_1939: Option<u64>,
}

impl RecordInput {
    pub fn new(
        country: &str,
        military_text: &str,
        total_text: &str,
        population_1939: Option<u64>,
    ) -> Self {
        Self {
            country: country.to_string(),
            military_text: military_text.to_string(),
            total_text: total_text.to_string(),
            population_1939,
        }
    }

    /// Pair a death-table row with its population entry.
    pub fn from_row(row: &DeathRow) -> Self {
        Self::new(
            row.country,
            row.military,
            row.total,
            dataset::population_1939(row.country),
        )
    }

    /// Inputs for every row of the embedded tables, in table order.
    pub fn embedded() -> Vec<Self> {
        dataset::DEATH_TABLE.iter().map(Self::from_row).collect()
    }

    fn error(&self, field: Field, source: ParseError) -> RecordError {
        RecordError {
            country: self.country.clone(),
            field,
            source,
        }
    }
}

/// Parsed and derived figures for one country. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub country: String,
    pub population_1939: Option<u64>,
    pub military_text: String,
    pub total_text: String,
    pub military: Option<Bounds>,
    pub total: Option<Bounds>,
    pub civilian: Option<Bounds>,
    pub military_avg: Option<f64>,
    pub total_avg: Option<f64>,
    pub civilian_avg: Option<f64>,
    pub military_range_label: String,
    pub total_range_label: String,
    pub civilian_range_label: String,
}

impl CountryRecord {
    pub fn bounds(&self, category: Category) -> Option<Bounds> {
        match category {
            Category::Military => self.military,
            Category::Total => self.total,
            Category::Civilian => self.civilian,
        }
    }

    pub fn average(&self, category: Category) -> Option<f64> {
        match category {
            Category::Military => self.military_avg,
            Category::Total => self.total_avg,
            Category::Civilian => self.civilian_avg,
        }
    }

    pub fn range_label(&self, category: Category) -> &str {
        match category {
            Category::Military => &self.military_range_label,
            Category::Total => &self.total_range_label,
            Category::Civilian => &self.civilian_range_label,
        }
    }
}

/// Widest civilian range consistent with both estimates, floored at zero.
pub fn derive_civilian(military: Option<Bounds>, total: Option<Bounds>) -> Option<Bounds> {
    let (military, total) = (military?, total?);
    Some(Bounds::new(
        (total.low - military.high).max(0.0),
        (total.high - military.low).max(0.0),
    ))
}

/// Build one record. Pure: the same input always gives the same record.
pub fn compute(input: &RecordInput) -> Result<CountryRecord, RecordError> {
    let military = estimate::parse(&input.military_text)
        .map_err(|source| input.error(Field::Military, source))?;
    let total = estimate::parse(&input.total_text)
        .map_err(|source| input.error(Field::Total, source))?;
    let civilian = derive_civilian(military, total);

    Ok(CountryRecord {
        country: input.country.clone(),
        population_1939: input.population_1939,
        military_text: input.military_text.clone(),
        total_text: input.total_text.clone(),
        military,
        total,
        civilian,
        military_avg: military.map(|b| b.midpoint()),
        total_avg: total.map(|b| b.midpoint()),
        civilian_avg: civilian.map(|b| b.midpoint()),
        military_range_label: label(military),
        total_range_label: label(total),
        civilian_range_label: label(civilian),
    })
}

fn label(bounds: Option<Bounds>) -> String {
    estimate::format_range(bounds.map(|b| b.low), bounds.map(|b| b.high))
}

// Flat layout: one top-level column per bound, so the same record serializes
// cleanly to both JSON objects and CSV rows.
impl Serialize for CountryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CountryRecord", 16)?;
        s.serialize_field("country", &self.country)?;
        s.serialize_field("pop_1939", &self.population_1939)?;
        s.serialize_field("military_text", &self.military_text)?;
        s.serialize_field("total_text", &self.total_text)?;
        s.serialize_field("military_min", &self.military.map(|b| b.low))?;
        s.serialize_field("military_max", &self.military.map(|b| b.high))?;
        s.serialize_field("military_avg", &self.military_avg)?;
        s.serialize_field("total_min", &self.total.map(|b| b.low))?;
        s.serialize_field("total_max", &self.total.map(|b| b.high))?;
        s.serialize_field("total_avg", &self.total_avg)?;
        s.serialize_field("civilian_min", &self.civilian.map(|b| b.low))?;
        s.serialize_field("civilian_max", &self.civilian.map(|b| b.high))?;
        s.serialize_field("civilian_avg", &self.civilian_avg)?;
        s.serialize_field("military_range_label", &self.military_range_label)?;
        s.serialize_field("total_range_label", &self.total_range_label)?;
        s.serialize_field("civilian_range_label", &self.civilian_range_label)?;
        s.end()
    }
}

/// A row left out of the dataset, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub country: String,
    pub field: Field,
    pub text: String,
    pub reason: String,
}

impl From<&RecordError> for RejectedRow {
    fn from(e: &RecordError) -> Self {
        let text = match &e.source {
            ParseError::Empty { text }
            | ParseError::InvalidNumber { text, .. }
            | ParseError::Overflow { text } => text.clone(),
        };
        Self {
            country: e.country.clone(),
            field: e.field,
            text,
            reason: e.source.to_string(),
        }
    }
}

/// All records built from a table, plus the rows that failed to parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<CountryRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl Dataset {
    /// Compute every record in input order.
    ///
    /// Malformed rows are skipped and listed in `rejected`; they never
    /// affect other rows.
    pub fn build(inputs: &[RecordInput]) -> Self {
        let mut dataset = Self::default();

        for input in inputs {
            match compute(input) {
                Ok(record) => {
                    debug!(
                        country = %record.country,
                        military = %record.military_range_label,
                        total = %record.total_range_label,
                        civilian = %record.civilian_range_label,
                        "parsed record"
                    );
                    dataset.records.push(record);
                }
                Err(e) => {
                    warn!(error = %e, "skipping record");
                    dataset.rejected.push(RejectedRow::from(&e));
                }
            }
        }

        info!(
            records = dataset.records.len(),
            rejected = dataset.rejected.len(),
            "dataset built"
        );
        dataset
    }

    /// Dataset from the embedded reference tables.
    pub fn embedded() -> Self {
        Self::build(&RecordInput::embedded())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, country: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.country == country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(military: &str, total: &str) -> CountryRecord {
        compute(&RecordInput::new("Testland", military, total, Some(1_000_000))).unwrap()
    }

    // ==========================================================================
    // CIVILIAN DERIVATION
    // ==========================================================================
    //
    // Civilian = total - military, taken as the widest range that is
    // consistent with both estimates and never negative.
    // ==========================================================================

    #[test]
    fn test_germany_end_to_end() {
        let input =
            RecordInput::new("Germany", "5,533,000", "6,600,000-8,800,000", Some(69_000_000));
        let r = compute(&input).unwrap();

        assert_eq!(r.military, Some(Bounds::exact(5_533_000.0)));
        assert_eq!(r.total, Some(Bounds::new(6_600_000.0, 8_800_000.0)));
        assert_eq!(r.civilian, Some(Bounds::new(1_067_000.0, 3_267_000.0)));
        assert_eq!(r.civilian_avg, Some(2_167_000.0));
        assert_eq!(r.civilian_range_label, "1,067,000 to 3,267,000");
    }

    #[test]
    fn test_civilian_clamped_at_zero() {
        // Military range overlaps the total: low end would go negative
        let r = record("20,000-35,000", "30,000");
        let civ = r.civilian.unwrap();
        assert_eq!(civ.low, 0.0);
        assert_eq!(civ.high, 10_000.0);
    }

    #[test]
    fn test_civilian_zero_when_all_military() {
        // Canada: every death was military
        let r = record("45,400", "45,400");
        assert_eq!(r.civilian, Some(Bounds::exact(0.0)));
        assert_eq!(r.civilian_range_label, "0");
    }

    #[test]
    fn test_civilian_absent_without_military() {
        let r = record("--", "51,000");
        assert!(r.military.is_none());
        assert!(r.civilian.is_none());
        assert!(r.civilian_avg.is_none());
        assert_eq!(r.civilian_range_label, "Unknown");
    }

    #[test]
    fn test_civilian_absent_without_total() {
        let r = record("5,000", "");
        assert!(r.total.is_none());
        assert!(r.civilian.is_none());
    }

    #[test]
    fn test_derive_civilian_formula() {
        let military = Some(Bounds::new(8_800_000.0, 10_700_000.0));
        let total = Some(Bounds::exact(24_000_000.0));
        let civ = derive_civilian(military, total).unwrap();
        assert_eq!(civ.low, 13_300_000.0);
        assert_eq!(civ.high, 15_200_000.0);
    }

    // ==========================================================================
    // AVERAGES AND LABELS
    // ==========================================================================

    #[test]
    fn test_averages_are_midpoints() {
        let r = record("20,000-35,000", "300,000-800,000");
        assert_eq!(r.military_avg, Some(27_500.0));
        assert_eq!(r.total_avg, Some(550_000.0));
        let civ = r.civilian.unwrap();
        assert_eq!(r.civilian_avg, Some((civ.low + civ.high) / 2.0));
    }

    #[test]
    fn test_labels() {
        let r = record("3-4,000,000", "20,000,000");
        assert_eq!(r.military_range_label, "3,000,000 to 4,000,000");
        assert_eq!(r.total_range_label, "20,000,000");
        assert_eq!(r.civilian_range_label, "16,000,000 to 17,000,000");
    }

    #[test]
    fn test_text_preserved() {
        let r = record(" 3-4,000,000 ", "--");
        assert_eq!(r.military_text, " 3-4,000,000 ");
        assert_eq!(r.total_text, "--");
    }

    #[test]
    fn test_category_accessors() {
        let r = record("1,000", "3,000");
        assert_eq!(r.average(Category::Military), Some(1_000.0));
        assert_eq!(r.average(Category::Total), Some(3_000.0));
        assert_eq!(r.average(Category::Civilian), Some(2_000.0));
        assert_eq!(r.bounds(Category::Civilian), Some(Bounds::exact(2_000.0)));
        assert_eq!(r.range_label(Category::Total), "3,000");
    }

    // ==========================================================================
    // ERRORS
    // ==========================================================================

    #[test]
    fn test_error_names_country_and_field() {
        let input = RecordInput::new("Nowhere", "lots", "1,000", None);
        let err = compute(&input).unwrap_err();
        assert_eq!(err.country, "Nowhere");
        assert_eq!(err.field, Field::Military);
        assert!(err.to_string().starts_with("Nowhere: military deaths"));
    }

    #[test]
    fn test_total_error_reported_as_total() {
        let input = RecordInput::new("Nowhere", "1,000", "1,000-", None);
        let err = compute(&input).unwrap_err();
        assert_eq!(err.field, Field::Total);
    }

    // ==========================================================================
    // DATASET
    // ==========================================================================

    #[test]
    fn test_embedded_dataset_parses_cleanly() {
        let ds = Dataset::embedded();
        assert_eq!(ds.len(), crate::dataset::DEATH_TABLE.len());
        assert!(ds.rejected.is_empty());
    }

    #[test]
    fn test_embedded_invariants_hold() {
        let ds = Dataset::embedded();
        for r in &ds.records {
            for cat in Category::ALL {
                match r.bounds(cat) {
                    Some(b) => {
                        assert!(b.low <= b.high, "{} {}", r.country, cat);
                        assert_eq!(r.average(cat), Some((b.low + b.high) / 2.0));
                    }
                    None => assert!(r.average(cat).is_none()),
                }
            }
            if let (Some(m), Some(t)) = (r.military, r.total) {
                let civ = r.civilian.unwrap();
                assert_eq!(civ.low, (t.low - m.high).max(0.0));
                assert_eq!(civ.high, (t.high - m.low).max(0.0));
            } else {
                assert!(r.civilian.is_none());
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(Dataset::embedded(), Dataset::embedded());
    }

    #[test]
    fn test_bad_row_skipped_others_kept() {
        let inputs = vec![
            RecordInput::new("A", "1,000", "2,000", None),
            RecordInput::new("B", "1,000", "two thousand", None),
            RecordInput::new("C", "--", "3,000", None),
        ];
        let ds = Dataset::build(&inputs);

        assert_eq!(ds.len(), 2);
        assert!(ds.get("A").is_some());
        assert!(ds.get("B").is_none());
        assert!(ds.get("C").is_some());
        assert_eq!(ds.rejected.len(), 1);
        assert_eq!(ds.rejected[0].country, "B");
        assert_eq!(ds.rejected[0].field, Field::Total);
        assert_eq!(ds.rejected[0].text, "two thousand");
    }

    #[test]
    fn test_embedded_population_attached() {
        let ds = Dataset::embedded();
        assert_eq!(ds.get("Poland").unwrap().population_1939, Some(35_000_000));
    }

    // ==========================================================================
    // SERIALIZATION
    // ==========================================================================

    #[test]
    fn test_serializes_flat() {
        let r = record("--", "51,000");
        let json = serde_json::to_value(&r).unwrap();

        assert_eq!(json["country"], "Testland");
        assert_eq!(json["pop_1939"], 1_000_000);
        assert!(json["military_min"].is_null());
        assert!(json["military_avg"].is_null());
        assert_eq!(json["total_min"], 51_000.0);
        assert_eq!(json["total_max"], 51_000.0);
        assert!(json["civilian_avg"].is_null());
        assert_eq!(json["military_range_label"], "Unknown");
        assert_eq!(json.as_object().unwrap().len(), 16);
    }
}
