use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::job::ProcessRecord;
use crate::error::InputError;

/// Read records from `path`: a JSON array of records when the extension is
/// `.json`, otherwise whitespace-separated `id arrival burst` triples.
pub fn load_records(path: &Path) -> Result<Vec<ProcessRecord>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text)?,
        _ => parse_records(&text)?,
    };
    debug!(path = %path.display(), count = records.len(), "records read");

    reject_duplicate_ids(&records)?;
    Ok(records)
}

/// Integers are consumed three at a time regardless of line breaks.
pub fn parse_records(text: &str) -> Result<Vec<ProcessRecord>, InputError> {
    let mut values = Vec::with_capacity(3);
    let mut records = Vec::new();
    let mut last_line = 0;

    for (line_no, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            let value = token.parse::<i64>().map_err(|_| InputError::BadToken {
                line: line_no + 1,
                token: token.to_string(),
            })?;
            values.push(value);
            last_line = line_no + 1;

            if let [id, arrival, burst] = values[..] {
                records.push(ProcessRecord::new(id, arrival, burst));
                values.clear();
            }
        }
    }

    if !values.is_empty() {
        return Err(InputError::PartialRecord { line: last_line });
    }
    Ok(records)
}

pub fn reject_duplicate_ids(records: &[ProcessRecord]) -> Result<(), InputError> {
    let mut seen = FxHashSet::default();
    for record in records {
        if !seen.insert(record.id) {
            return Err(InputError::DuplicateId(record.id));
        }
    }
    Ok(())
}
