//! City-size equivalence
//!
//! Millions of deaths are hard to picture, so the chart restates a running
//! total as "about N times the population of city X". A fixed reference
//! city is always quoted alongside the varying comparison city.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub population: u64,
}

impl City {
    pub const fn new(name: &'static str, population: u64) -> Self {
        Self { name, population }
    }
}

/// Always quoted next to the comparison city, never picked as one.
pub const REFERENCE_CITY: City = City::new("Spokane", 229_447);

/// Multiples the comparison cycles through as countries are revealed.
const TARGET_MULTIPLES: [f64; 8] = [2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 18.0, 25.0];

pub static US_CITIES: &[City] = &[
    City::new("New York", 8_336_817),
    City::new("Los Angeles", 3_820_914),
    City::new("Chicago", 2_664_452),
    City::new("Houston", 2_304_580),
    City::new("Phoenix", 1_650_070),
    City::new("Philadelphia", 1_553_697),
    City::new("San Antonio", 1_492_510),
    City::new("San Diego", 1_386_932),
    City::new("Dallas", 1_304_379),
    City::new("San Jose", 1_013_240),
    City::new("Seattle", 755_078),
    City::new("Denver", 716_577),
    City::new("Boston", 653_833),
    City::new("Portland", 630_498),
    City::new("Las Vegas", 660_929),
    City::new("Boise", 235_684),
    City::new("Spokane Valley", 108_235),
    City::new("Coeur d'Alene", 56_208),
    City::new("Post Falls", 38_950),
    City::new("Yakima", 97_044),
    City::new("Kennewick", 83_921),
    City::new("Pasco", 80_446),
    City::new("Richland", 64_206),
    City::new("Walla Walla", 34_655),
    City::new("Moscow (ID)", 25_852),
    City::new("Pullman", 32_495),
    City::new("Lewiston", 34_668),
    City::new("Clarkston", 7_310),
    City::new("Sandpoint", 9_277),
    City::new("Missoula", 76_788),
    City::new("Billings", 119_960),
    City::new("Great Falls", 60_252),
    City::new("Bend", 104_557),
    City::new("Salem", 177_723),
    City::new("Eugene", 176_654),
    REFERENCE_CITY,
];

fn comparison_cities() -> impl Iterator<Item = &'static City> {
    US_CITIES.iter().filter(|c| c.name != REFERENCE_CITY.name)
}

/// The comparison city closest in size to `city_unit`.
pub fn base_city(city_unit: u64) -> &'static City {
    comparison_cities()
        .min_by_key(|c| c.population.abs_diff(city_unit))
        .unwrap_or(&REFERENCE_CITY)
}

/// Pick a comparison city for the `step`-th revealed country.
///
/// Prefers the city that makes `total_abs` closest to the step's target
/// multiple, skipping `previous` so consecutive steps name different cities.
pub fn pick_city(total_abs: f64, step: usize, previous: Option<&str>) -> &'static City {
    let target = TARGET_MULTIPLES[step.saturating_sub(1) % TARGET_MULTIPLES.len()];
    let distance = |c: &City| (total_abs / c.population as f64 - target).abs();

    let mut ranked: Vec<&'static City> = comparison_cities().collect();
    ranked.sort_by(|a, b| distance(*a).total_cmp(&distance(*b)));

    ranked
        .iter()
        .find(|c| Some(c.name) != previous)
        .or_else(|| ranked.first())
        .copied()
        .unwrap_or(&REFERENCE_CITY)
}

/// A death count restated in city populations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equivalence {
    pub city: &'static str,
    pub multiple: f64,
    pub reference_multiple: f64,
}

impl Equivalence {
    pub fn against(total_abs: f64, city: &City) -> Self {
        Self {
            city: city.name,
            multiple: total_abs / city.population as f64,
            reference_multiple: total_abs / REFERENCE_CITY.population as f64,
        }
    }
}

impl fmt::Display for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Equivalent to about {:.1} x {} | {}: {:.1} x",
            self.multiple, self.city, REFERENCE_CITY.name, self.reference_multiple
        )
    }
}

/// Equivalence for the `step`-th reveal, see [`pick_city`].
pub fn equivalence(total_abs: f64, step: usize, previous: Option<&str>) -> Equivalence {
    Equivalence::against(total_abs, pick_city(total_abs, step, previous))
}
