//! CSV-backed training data.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row (auto-detected: first row is a header if it contains
//!   any non-numeric, non-empty cell)
//! - Double-quoted fields with embedded commas are handled correctly
//! - The last column is the expected output; every preceding column is an
//!   input. All rows must share the same width.
//!
//! A file is parsed fully up front into a [`MemorySource`]; parse errors name
//! the offending row.

use crate::data::source::{MemorySource, TrainingRecord};

#[derive(Debug)]
pub struct CsvParseError(pub String);

impl std::fmt::Display for CsvParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CsvParseError {}

/// Reads a CSV file from disk into a restartable record source.
pub fn load_csv(path: &str) -> Result<MemorySource, CsvParseError> {
    let bytes = std::fs::read(path)
        .map_err(|e| CsvParseError(format!("could not read '{}': {}", path, e)))?;
    parse_csv(&bytes)
}

/// Parses CSV bytes into a record source.
///
/// Each row becomes one `TrainingRecord` with the last column as the
/// expected output.
pub fn parse_csv(data: &[u8]) -> Result<MemorySource, CsvParseError> {
    let text = std::str::from_utf8(data)
        .map_err(|_| CsvParseError("CSV data is not valid UTF-8".into()))?;

    let mut lines = text.lines().peekable();

    // Auto-detect header: skip first line if any cell is non-numeric.
    if let Some(first) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut records: Vec<TrainingRecord> = Vec::new();

    for (row_idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        if cells.is_empty() {
            continue;
        }
        if cells.len() < 2 {
            return Err(CsvParseError(format!(
                "Row {}: expected at least 2 columns (inputs + output), got {}",
                row_idx + 1,
                cells.len()
            )));
        }

        let split = cells.len() - 1;
        let inputs = parse_floats(&cells[..split], row_idx + 1)?;
        let expected = parse_floats(&cells[split..], row_idx + 1)?;
        records.push(TrainingRecord::new(inputs, expected));
    }

    // Verify all rows have the same input width.
    if let Some(first) = records.first() {
        let width = first.inputs.len();
        for (i, record) in records.iter().enumerate() {
            if record.inputs.len() != width {
                return Err(CsvParseError(format!(
                    "Row {}: input count {} does not match first row's {}",
                    i + 1,
                    record.inputs.len(),
                    width
                )));
            }
        }
    }

    Ok(MemorySource::new(records))
}

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str) -> bool {
    let cells = parse_csv_row(line);
    cells.iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => {
                if in_quotes && i + 1 < chars.len() && chars[i + 1] == '"' {
                    // Escaped quote inside quoted field.
                    current.push('"');
                    i += 2;
                    continue;
                }
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            c => current.push(c),
        }
        i += 1;
    }
    fields.push(current);
    fields
}

/// Parses a slice of string cells as `f64`, returning an error with row info on failure.
fn parse_floats(cells: &[String], row_num: usize) -> Result<Vec<f64>, CsvParseError> {
    cells.iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| {
                CsvParseError(format!(
                    "Row {}: '{}' is not a valid number",
                    row_num, c
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::RecordSource;

    #[test]
    fn parses_rows_with_last_column_as_output() {
        let csv = b"1.0,0.5,0.0,1.0\n0.2,0.4,0.6,0.0\n";
        let mut source = parse_csv(csv).unwrap();
        assert_eq!(source.len(), 2);

        let first = source.next_record().unwrap();
        assert_eq!(first.inputs, vec![1.0, 0.5, 0.0]);
        assert_eq!(first.expected, vec![1.0]);
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let csv = b"Input1,Input2,Input3,Output\n\n1,2,3,4\n";
        let mut source = parse_csv(csv).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.next_record().unwrap().expected, vec![4.0]);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let err = parse_csv(b"1,2,3,4\n1,abc,3,4\n").unwrap_err();
        assert!(err.0.contains("Row 2"));
        assert!(err.0.contains("abc"));
    }

    #[test]
    fn rejects_inconsistent_row_widths() {
        let err = parse_csv(b"1,2,3,4\n1,2,4\n").unwrap_err();
        assert!(err.0.contains("does not match"));
    }

    #[test]
    fn rejects_single_column_rows() {
        let err = parse_csv(b"1.0\n").unwrap_err();
        assert!(err.0.contains("at least 2 columns"));
    }

    #[test]
    fn empty_input_yields_empty_source() {
        let source = parse_csv(b"").unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn handles_quoted_fields() {
        let mut source = parse_csv(b"\"1.0\",\"2.5\",3.0\n").unwrap();
        let record = source.next_record().unwrap();
        assert_eq!(record.inputs, vec![1.0, 2.5]);
        assert_eq!(record.expected, vec![3.0]);
    }
}
