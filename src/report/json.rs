//! JSON report output

use super::{DatasetReport, SelectionReport};
use crate::narrative::Selection;
use crate::record::Dataset;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, dataset: &Dataset) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &DatasetReport::new(dataset))?;
    writeln!(writer)
}

pub fn write_selection<W: Write>(writer: &mut W, selection: &Selection) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &SelectionReport::new(selection))?;
    writeln!(writer)
}
