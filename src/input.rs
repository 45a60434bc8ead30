//! Line-oriented input reader.
//!
//! Produces one string value per line, in input order, with `idx` set to
//! the line position and `src` recording the originating file. Labels are
//! left at zero; they are opaque to the engine.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;
use crate::value::StringValue;

/// Read string values from a file, one per line.
pub fn read_lines(path: &Path) -> Result<Vec<StringValue>, Error> {
    let file = File::open(path)?;
    read_from(BufReader::new(file), path.to_str())
}

/// Read string values from any buffered reader.
pub fn read_from<R: BufRead>(reader: R, src: Option<&str>) -> Result<Vec<StringValue>, Error> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let mut value = StringValue::from_text(&line?).with_idx(idx);
        if let Some(src) = src {
            value = value.with_src(src);
        }
        values.push(value);
    }
    Ok(values)
}
