//! Comma-separated rule file parser.
//!
//! One rule per line: `direction,protocol,port,ip_address`, for example
//!
//! ```text
//! inbound,tcp,80,192.168.1.2
//! outbound,tcp,10000-20000,192.168.10.11
//! inbound,udp,53,192.168.1.1-192.168.2.5
//! ```
//!
//! Blank lines and `#` comments are ignored.

use std::io::{BufRead, BufReader, Read};

use crate::rule::RuleRecord;
use crate::{Error, Result};

/// Number of fields in a rule or query line.
pub const FIELD_COUNT: usize = 4;

/// Rule file parser.
#[derive(Debug, Clone)]
pub struct CsvParser {
    skip_header: bool,
}

impl CsvParser {
    /// Create a parser that skips a header line.
    pub fn new() -> Self {
        Self { skip_header: true }
    }

    /// Choose whether a first line starting with `direction` is skipped.
    pub fn skip_header(mut self, skip: bool) -> Self {
        self.skip_header = skip;
        self
    }

    /// Parse every rule from a reader.
    ///
    /// The first malformed line aborts parsing with [`Error::MalformedRecord`].
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<RuleRecord>> {
        let buf_reader = BufReader::new(reader);
        let mut records = Vec::new();
        let mut seen_content = false;

        for (idx, line) in buf_reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;

            let Some(fields) = split_record(&line).map_err(|reason| Error::MalformedRecord {
                line: line_no,
                reason,
            })?
            else {
                continue;
            };

            if !seen_content {
                seen_content = true;
                if self.skip_header && fields[0].eq_ignore_ascii_case("direction") {
                    log::debug!("skipping header line {}", line_no);
                    continue;
                }
            }

            let record = RuleRecord::parse_fields(fields[0], fields[1], fields[2], fields[3])
                .map_err(|e| Error::MalformedRecord {
                    line: line_no,
                    reason: e.to_string(),
                })?;
            log::debug!("line {}: {}", line_no, record);
            records.push(record);
        }

        Ok(records)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split one line into its four trimmed fields.
///
/// Returns `Ok(None)` for blank and comment-only lines.
pub fn split_record(line: &str) -> std::result::Result<Option<[&str; FIELD_COUNT]>, String> {
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    match <[&str; FIELD_COUNT]>::try_from(fields.as_slice()) {
        Ok(fields) => Ok(Some(fields)),
        Err(_) => Err(format!(
            "expected {} fields, got {}",
            FIELD_COUNT,
            fields.len()
        )),
    }
}
