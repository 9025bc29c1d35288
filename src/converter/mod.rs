//! Rule file readers.

mod csv;

pub use csv::{split_record, CsvParser, FIELD_COUNT};
