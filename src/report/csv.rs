//! CSV report: one flat row per country

use crate::record::CountryRecord;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, records: &[CountryRecord]) -> io::Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record).map_err(io::Error::from)?;
    }
    wtr.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{compute, Dataset, RecordInput};

    fn to_string(records: &[CountryRecord]) -> String {
        let mut buf = Vec::new();
        write(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_matches_flat_layout() {
        let out = to_string(&Dataset::embedded().records);
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "country,pop_1939,military_text,total_text,\
             military_min,military_max,military_avg,\
             total_min,total_max,total_avg,\
             civilian_min,civilian_max,civilian_avg,\
             military_range_label,total_range_label,civilian_range_label"
        );
    }

    #[test]
    fn test_one_row_per_country() {
        let ds = Dataset::embedded();
        let out = to_string(&ds.records);
        assert_eq!(out.lines().count(), ds.len() + 1);
    }

    #[test]
    fn test_unknown_values_are_empty_fields() {
        let r = compute(&RecordInput::new("Estonia", "--", "51,000", None)).unwrap();
        let out = to_string(&[r]);

        let mut rdr = ::csv::Reader::from_reader(out.as_bytes());
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Estonia");
        assert_eq!(&row[1], "");
        assert_eq!(&row[2], "--");
        assert_eq!(&row[4], "");
        assert_eq!(&row[13], "Unknown");
        assert_eq!(&row[14], "51,000");
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let input = RecordInput::new("Greece", "20,000-35,000", "300,000-800,000", None);
        let r = compute(&input).unwrap();
        let out = to_string(&[r]);
        assert!(out.contains("\"20,000 to 35,000\""));
    }
}
