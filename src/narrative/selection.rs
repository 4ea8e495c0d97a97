//! Top-N selection for the animated chart
//!
//! The chart ranks countries by one focus category, keeps the top N, and
//! then reveals them smallest first so the bars build up to the largest
//! loss. [`select`] produces both orders.
//!
//! Only countries whose focus value is known (and, for per-capita modes,
//! whose population is known) take part. Missing values are never ranked as
//! zero.

use super::equivalence::{self, Equivalence};
use super::{scale, Category, NarrativeMode, Scaled};
use crate::record::CountryRecord;
use serde::Serialize;
use std::cmp::Ordering;

/// One country as the chart consumes it: flat, mode-scaled values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRow {
    pub country: String,
    /// Scaled value of the focus category, the ranking key.
    pub metric_value: f64,
    pub pop_1939: Option<u64>,
    pub total_scaled: Option<f64>,
    pub total_scaled_min: Option<f64>,
    pub total_scaled_max: Option<f64>,
    pub military_avg: Option<f64>,
    pub military_scaled: Option<f64>,
    pub civilian_avg: Option<f64>,
    pub civilian_scaled: Option<f64>,
    pub total_avg: Option<f64>,
    pub military_scaled_min: Option<f64>,
    pub military_scaled_max: Option<f64>,
    pub civilian_scaled_min: Option<f64>,
    pub civilian_scaled_max: Option<f64>,
    pub military_range_label: String,
    pub total_range_label: String,
    pub civilian_range_label: String,
    /// Share of the 1939 population lost, from the total midpoint.
    pub loss_pct: Option<f64>,
    pub survived_pct: Option<f64>,
}

impl NarrativeRow {
    /// `None` when the focus category has no value in this mode.
    pub fn from_record(
        record: &CountryRecord,
        focus: Category,
        mode: NarrativeMode,
    ) -> Option<Self> {
        let metric_value = scale(record, focus, mode)?.value;
        let total = scale(record, Category::Total, mode);
        let military = scale(record, Category::Military, mode);
        let civilian = scale(record, Category::Civilian, mode);

        let loss_pct = match (record.total_avg, record.population_1939) {
            (Some(avg), Some(pop)) if pop > 0 => Some(100.0 * avg / pop as f64),
            _ => None,
        };

        Some(Self {
            country: record.country.clone(),
            metric_value,
            pop_1939: record.population_1939,
            total_scaled: value(total),
            total_scaled_min: low(total),
            total_scaled_max: high(total),
            military_avg: record.military_avg,
            military_scaled: value(military),
            civilian_avg: record.civilian_avg,
            civilian_scaled: value(civilian),
            total_avg: record.total_avg,
            military_scaled_min: low(military),
            military_scaled_max: high(military),
            civilian_scaled_min: low(civilian),
            civilian_scaled_max: high(civilian),
            military_range_label: record.military_range_label.clone(),
            total_range_label: record.total_range_label.clone(),
            civilian_range_label: record.civilian_range_label.clone(),
            loss_pct,
            survived_pct: loss_pct.map(|p| (100.0 - p).max(0.0)),
        })
    }
}

fn value(s: Option<Scaled>) -> Option<f64> {
    s.map(|s| s.value)
}

fn low(s: Option<Scaled>) -> Option<f64> {
    s.map(|s| s.low)
}

fn high(s: Option<Scaled>) -> Option<f64> {
    s.map(|s| s.high)
}

/// Running totals over the rows revealed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Cumulative {
    pub countries: usize,
    pub total_scaled: f64,
    pub military_scaled: f64,
    pub civilian_scaled: f64,
    /// Absolute total deaths regardless of mode.
    pub total_absolute: f64,
}

impl Cumulative {
    /// Sum the rows. Absent values add nothing.
    pub fn over(rows: &[NarrativeRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, r| {
            acc.countries += 1;
            acc.total_scaled += r.total_scaled.unwrap_or_default();
            acc.military_scaled += r.military_scaled.unwrap_or_default();
            acc.civilian_scaled += r.civilian_scaled.unwrap_or_default();
            acc.total_absolute += r.total_avg.unwrap_or_default();
            acc
        })
    }
}

/// The chosen countries in both orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub focus: Category,
    pub mode: NarrativeMode,
    /// Largest first, truncated to the requested count.
    pub ranked: Vec<NarrativeRow>,
    /// Same rows, smallest first: the order bars appear in.
    pub reveal: Vec<NarrativeRow>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Totals after `step` rows of the reveal order have appeared.
    pub fn cumulative_at(&self, step: usize) -> Cumulative {
        Cumulative::over(&self.reveal[..step.min(self.reveal.len())])
    }

    /// Totals once every row is shown.
    pub fn cumulative(&self) -> Cumulative {
        Cumulative::over(&self.reveal)
    }

    /// One city comparison per reveal step, for the country just revealed.
    ///
    /// Each step compares that country's absolute total and never repeats
    /// the city named by the step before it.
    pub fn equivalences(&self) -> Vec<Equivalence> {
        let mut previous: Option<&'static str> = None;
        self.reveal
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let total = row.total_avg.unwrap_or_default();
                let eq = equivalence::equivalence(total, i + 1, previous);
                previous = Some(eq.city);
                eq
            })
            .collect()
    }
}

/// Rank records by the focus category and keep the top `count`.
///
/// Ties keep their input order in `ranked`.
pub fn select(
    records: &[CountryRecord],
    focus: Category,
    count: usize,
    mode: NarrativeMode,
) -> Selection {
    let mut ranked: Vec<NarrativeRow> = records
        .iter()
        .filter_map(|r| NarrativeRow::from_record(r, focus, mode))
        .collect();

    ranked.sort_by(|a, b| descending(a.metric_value, b.metric_value));
    ranked.truncate(count);

    let mut reveal = ranked.clone();
    reveal.sort_by(|a, b| a.metric_value.total_cmp(&b.metric_value));

    Selection {
        focus,
        mode,
        ranked,
        reveal,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
