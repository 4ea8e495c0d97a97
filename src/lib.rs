//! Wartoll - WWII death estimates, parsed and normalized
//!
//! Wartoll turns the free-text casualty figures of a WWII losses table into
//! numbers a chart can use. The source figures are messy: exact counts,
//! explicit ranges, shorthand ranges and "unknown" markers all appear in the
//! same column.
//!
//! # Overview
//!
//! 1. **Parsing**: each death figure becomes a `(low, high)` pair, or nothing
//!    when the table does not know.
//!
//! 2. **Derivation**: civilian losses are not published, so they are derived
//!    as the part of the total that is not military, as a range floored at
//!    zero. Every range also gets a midpoint and a display label.
//!
//! 3. **Narrative scaling**: values can be shown as absolute deaths, deaths
//!    per 100,000 people, or a share of the 1939 population.
//!
//! # Quick Start
//!
//! ```no_run
//! use wartoll::{select, Category, Dataset, NarrativeMode};
//!
//! let dataset = Dataset::embedded();
//! let germany = dataset.get("Germany").unwrap();
//! println!("Civilian deaths: {}", germany.civilian_range_label);
//!
//! let top = select(&dataset.records, Category::Civilian, 10, NarrativeMode::PercentOfPopulation);
//! for row in &top.ranked {
//!     let value = NarrativeMode::PercentOfPopulation.format_value(row.metric_value);
//!     println!("{:<20} {}", row.country, value);
//! }
//! ```
//!
//! # Missing data
//!
//! Unknown figures are `None` all the way through: an unknown military count
//! makes the civilian count unknown, and a missing population makes the
//! per-capita value unknown. Nothing is ever filled in with zero.
//!
//! # Modules
//!
//! - [`estimate`]: range-text parser and labels
//! - [`record`]: per-country records and derived civilian figures
//! - [`narrative`]: mode scaling, top-N selection, city equivalence
//! - [`dataset`]: the embedded reference tables
//! - [`report`]: output formatters (JSON, CSV)
//! - [`serve`]: local JSON API

pub mod dataset;
pub mod estimate;
pub mod narrative;
pub mod record;
pub mod report;
pub mod serve;

pub use estimate::{format_range, parse, Bounds, ParseError};
pub use narrative::{scale, select, NarrativeMode, NarrativeRow, Scaled, Selection};
pub use record::{compute, Category, CountryRecord, Dataset, RecordError, RecordInput};
