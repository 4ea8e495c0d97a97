//! Embedded reference tables
//!
//! WWII military and total death estimates by country, as published in the
//! usual summary tables, and each country's 1939 population. The figures are
//! kept exactly as written (ranges, shorthand and `--` markers included) so
//! that parsing stays auditable against the source.

/// One row of the death-estimate table, before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathRow {
    pub country: &'static str,
    pub military: &'static str,
    pub total: &'static str,
}

impl DeathRow {
    pub const fn new(country: &'static str, military: &'static str, total: &'static str) -> Self {
        Self {
            country,
            military,
            total,
        }
    }
}

/// Military and total deaths per country.
pub static DEATH_TABLE: &[DeathRow] = &[
    DeathRow::new("Albania", "30,000", "30,200"),
    DeathRow::new("Australia", "39,800", "40,500"),
    DeathRow::new("Austria", "261,000", "384,700"),
    DeathRow::new("Belgium", "12,100", "86,100"),
    DeathRow::new("Brazil", "1,000", "2,000"),
    DeathRow::new("Bulgaria", "22,000", "25,000"),
    DeathRow::new("Canada", "45,400", "45,400"),
    DeathRow::new("China", "3-4,000,000", "20,000,000"),
    DeathRow::new("Czechoslovakia", "25,000", "345,000"),
    DeathRow::new("Denmark", "2,100", "3,200"),
    DeathRow::new("Dutch East Indies", "--", "3-4,000,000"),
    DeathRow::new("Estonia", "--", "51,000"),
    DeathRow::new("Ethiopia", "5,000", "100,000"),
    DeathRow::new("Finland", "95,000", "97,000"),
    DeathRow::new("France", "217,600", "567,600"),
    DeathRow::new("French Indochina", "--", "1-1,500,000"),
    DeathRow::new("Germany", "5,533,000", "6,600,000-8,800,000"),
    DeathRow::new("Greece", "20,000-35,000", "300,000-800,000"),
    DeathRow::new("Hungary", "300,000", "580,000"),
    DeathRow::new("India", "87,000", "1,500,000-2,500,000"),
    DeathRow::new("Italy", "301,400", "457,000"),
    DeathRow::new("Japan", "2,120,000", "2,600,000-3,100,000"),
    DeathRow::new("Korea", "--", "378,000-473,000"),
    DeathRow::new("Latvia", "--", "227,000"),
    DeathRow::new("Lithuania", "--", "353,000"),
    DeathRow::new("Luxembourg", "--", "2,000"),
    DeathRow::new("Malaya", "--", "100,000"),
    DeathRow::new("Netherlands", "17,000", "301,000"),
    DeathRow::new("New Zealand", "11,900", "11,900"),
    DeathRow::new("Norway", "3,000", "9,500"),
    DeathRow::new("Papua New Guinea", "--", "15,000"),
    DeathRow::new("Philippines", "57,000", "500,000-1,000,000"),
    DeathRow::new("Poland", "240,000", "5,600,000"),
    DeathRow::new("Romania", "300,000", "833,000"),
    DeathRow::new("Singapore", "--", "50,000"),
    DeathRow::new("South Africa", "11,900", "11,900"),
    DeathRow::new("Soviet Union", "8,800,000-10,700,000", "24,000,000"),
    DeathRow::new("United Kingdom", "383,600", "450,700"),
    DeathRow::new("United States", "416,800", "418,500"),
    DeathRow::new("Yugoslavia", "446,000", "1,000,000"),
];

/// Population in 1939, used for per-capita and percentage modes.
pub static POPULATION_1939: &[(&str, u64)] = &[
    ("Albania", 1_073_000),
    ("Australia", 7_000_000),
    ("Austria", 6_760_000),
    ("Belgium", 8_300_000),
    ("Brazil", 41_000_000),
    ("Bulgaria", 6_300_000),
    ("Canada", 11_400_000),
    ("China", 517_000_000),
    ("Czechoslovakia", 14_800_000),
    ("Denmark", 3_800_000),
    ("Dutch East Indies", 70_000_000),
    ("Estonia", 1_100_000),
    ("Ethiopia", 17_000_000),
    ("Finland", 3_700_000),
    ("France", 41_700_000),
    ("French Indochina", 24_000_000),
    ("Germany", 69_000_000),
    ("Greece", 7_200_000),
    ("Hungary", 9_100_000),
    ("India", 389_000_000),
    ("Italy", 44_400_000),
    ("Japan", 72_000_000),
    ("Korea", 25_000_000),
    ("Latvia", 1_900_000),
    ("Lithuania", 2_600_000),
    ("Luxembourg", 300_000),
    ("Malaya", 4_800_000),
    ("Netherlands", 8_900_000),
    ("New Zealand", 1_600_000),
    ("Norway", 3_000_000),
    ("Papua New Guinea", 1_000_000),
    ("Philippines", 16_700_000),
    ("Poland", 35_000_000),
    ("Romania", 19_900_000),
    ("Singapore", 900_000),
    ("South Africa", 10_200_000),
    ("Soviet Union", 168_000_000),
    ("United Kingdom", 47_000_000),
    ("United States", 131_000_000),
    ("Yugoslavia", 15_400_000),
];

/// Look up a country's 1939 population.
pub fn population_1939(country: &str) -> Option<u64> {
    POPULATION_1939
        .iter()
        .find(|(name, _)| *name == country)
        .map(|&(_, pop)| pop)
}
