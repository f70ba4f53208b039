use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::input::InputError;

/// One population snapshot: numeric feature rows aligned to the classifier
/// schema, plus optional group ids read from a designated column. Immutable
/// once loaded.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub schema: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub groups: Option<Vec<String>>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.schema.iter().position(|n| n == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }
}

/// Parses a tab-separated population table with one header row.
///
/// Every schema feature must be present in the header and numeric in every
/// record; anything else is a fatal schema mismatch, surfaced here at the
/// ingestion boundary rather than inside the metric computations. Columns
/// outside the schema are ignored, except `group_column` when requested.
pub fn load_table(
    path: &Path,
    schema: &[String],
    group_column: Option<&str>,
) -> Result<FeatureTable, InputError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            InputError::MissingInput(format!("population table not found at {}", path.display()))
        } else {
            InputError::Io(e)
        }
    })?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(InputError::Parse(format!(
            "population table {} is empty",
            path.display()
        )));
    }
    let header: Vec<&str> = buf.trim_end().split('\t').map(|s| s.trim()).collect();

    let mut feature_cols = Vec::with_capacity(schema.len());
    for name in schema {
        let idx = header.iter().position(|h| *h == name.as_str()).ok_or_else(|| {
            InputError::InvalidInput(format!(
                "population table {} is missing required feature {name:?}",
                path.display()
            ))
        })?;
        feature_cols.push(idx);
    }

    let group_col = match group_column {
        Some(name) => Some(header.iter().position(|h| *h == name).ok_or_else(|| {
            InputError::InvalidInput(format!(
                "population table {} has no {name:?} column for group ids",
                path.display()
            ))
        })?),
        None => None,
    };

    let mut rows = Vec::new();
    let mut groups = group_col.map(|_| Vec::new());
    let mut line_no = 1usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();

        let mut row = Vec::with_capacity(schema.len());
        for (name, &idx) in schema.iter().zip(&feature_cols) {
            let raw = fields.get(idx).map(|s| s.trim()).unwrap_or("");
            if raw.is_empty() {
                return Err(InputError::Parse(format!(
                    "{} line {line_no}: record is missing required feature {name:?}",
                    path.display()
                )));
            }
            let value: f64 = raw.parse().map_err(|_| {
                InputError::Parse(format!(
                    "{} line {line_no}: feature {name:?} value {raw:?} is not numeric",
                    path.display()
                ))
            })?;
            row.push(value);
        }
        rows.push(row);

        if let (Some(idx), Some(out)) = (group_col, groups.as_mut()) {
            let id = fields.get(idx).map(|s| s.trim()).unwrap_or("");
            if id.is_empty() {
                return Err(InputError::Parse(format!(
                    "{} line {line_no}: record has an empty group id",
                    path.display()
                )));
            }
            out.push(id.to_string());
        }
    }

    Ok(FeatureTable {
        schema: schema.to_vec(),
        rows,
        groups,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
