use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use log::warn;

use crate::errors::CoursevecError;
use crate::types::CourseRecord;

/// read the course catalog from a CSV file with a header row
pub fn read_courses(path: &Path) -> Result<Vec<CourseRecord>, CoursevecError> {
    let raw = fs::read(path)?;
    let text = decode_text(&raw);
    read_courses_from_reader(text.as_bytes())
}

pub fn read_courses_from_reader<R: Read>(reader: R) -> Result<Vec<CourseRecord>, CoursevecError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records: Vec<CourseRecord> = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

// exports of the catalog are frequently Latin-1 rather than UTF-8;
// fall back to Windows-1252 when the bytes do not decode as UTF-8
fn decode_text(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(raw);
            if had_errors {
                warn!("input contained byte sequences with no Windows-1252 mapping");
            }
            Cow::Owned(decoded.into_owned())
        }
    }
}
