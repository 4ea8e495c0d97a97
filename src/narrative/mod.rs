//! Narrative scaling
//!
//! The animated chart can tell the same story three ways:
//!
//! | Mode | Value shown | Needs population |
//! |------|-------------|------------------|
//! | Absolute | deaths | no |
//! | PerCapita100k | deaths per 100,000 people | yes |
//! | PercentOfPopulation | % of the 1939 population | yes |
//!
//! [`scale`] applies one factor to the average and to both bounds, so the
//! relative width of an estimate survives the change of unit. A country with
//! no known population has no per-capita value at all; it is left out
//! rather than shown as zero or as a huge ratio.
//!
//! - [`selection`]: top-N ranking and reveal order for the chart
//! - [`equivalence`]: "about N times the size of city X" comparisons

pub mod equivalence;
pub mod selection;

pub use crate::record::Category;
pub use selection::{select, Cumulative, NarrativeRow, Selection};

use crate::estimate::label::{format_grouped, group_thousands};
use crate::record::CountryRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How values are normalized before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NarrativeMode {
    #[default]
    #[serde(rename = "absolute")]
    Absolute,
    #[serde(rename = "per100k")]
    PerCapita100k,
    #[serde(rename = "percent")]
    PercentOfPopulation,
}

impl NarrativeMode {
    pub const ALL: [NarrativeMode; 3] = [
        NarrativeMode::Absolute,
        NarrativeMode::PerCapita100k,
        NarrativeMode::PercentOfPopulation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NarrativeMode::Absolute => "Absolute deaths",
            NarrativeMode::PerCapita100k => "Deaths per 100k people",
            NarrativeMode::PercentOfPopulation => "% of 1939 population",
        }
    }

    pub fn needs_population(&self) -> bool {
        !matches!(self, NarrativeMode::Absolute)
    }

    /// Multiplier for this mode, or `None` when the population is unusable.
    pub fn factor(&self, population: Option<u64>) -> Option<f64> {
        match self {
            NarrativeMode::Absolute => Some(1.0),
            NarrativeMode::PerCapita100k => {
                population.filter(|&p| p > 0).map(|p| 100_000.0 / p as f64)
            }
            NarrativeMode::PercentOfPopulation => {
                population.filter(|&p| p > 0).map(|p| 100.0 / p as f64)
            }
        }
    }

    /// Format a scaled value the way the chart labels it.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            NarrativeMode::Absolute => group_thousands(value.round() as i64),
            NarrativeMode::PerCapita100k => format_grouped(value, 1),
            NarrativeMode::PercentOfPopulation => format!("{:.2}%", value),
        }
    }
}

impl fmt::Display for NarrativeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeMode::Absolute => write!(f, "absolute"),
            NarrativeMode::PerCapita100k => write!(f, "per100k"),
            NarrativeMode::PercentOfPopulation => write!(f, "percent"),
        }
    }
}

impl FromStr for NarrativeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" | "abs" => Ok(NarrativeMode::Absolute),
            "per100k" | "per-100k" | "per_capita" | "percapita" => Ok(NarrativeMode::PerCapita100k),
            "percent" | "pct" | "%" => Ok(NarrativeMode::PercentOfPopulation),
            other => Err(format!(
                "unknown narrative mode '{}' (expected absolute, per100k or percent)",
                other
            )),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(Category::Total),
            "military" => Ok(Category::Military),
            "civilian" => Ok(Category::Civilian),
            other => Err(format!(
                "unknown category '{}' (expected total, military or civilian)",
                other
            )),
        }
    }
}

/// A value with its bounds, in the units of one narrative mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled {
    pub value: f64,
    pub low: f64,
    pub high: f64,
}

/// Scale one category of a record.
///
/// `None` when the category is unknown, or when the mode needs a population
/// the record does not have.
pub fn scale(record: &CountryRecord, category: Category, mode: NarrativeMode) -> Option<Scaled> {
    let value = record.average(category)?;
    let factor = mode.factor(record.population_1939)?;
    let bounds = record.bounds(category)?.scaled(factor);

    Some(Scaled {
        value: value * factor,
        low: bounds.low,
        high: bounds.high,
    })
}
