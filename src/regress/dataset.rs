//! Tabular dataset ingestion.
//!
//! Parses CSV into named numeric columns. Missing columns and unparseable
//! cells fail fast with errors naming the column (and row), per the
//! fail-fast contract for the regression path.

use crate::errors::{Result, SpanRankError};
use std::io::Read;

/// A column-major numeric table with named columns
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Dataset {
    /// Parse a dataset from CSV text with a header row
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::from_reader(data.as_bytes())
    }

    /// Parse a dataset from any CSV reader with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            for (col, cell) in record.iter().enumerate() {
                if col >= columns.len() {
                    continue;
                }
                let value = cell
                    .parse::<f64>()
                    .map_err(|_| SpanRankError::MalformedValue {
                        column: headers[col].clone(),
                        row,
                        value: cell.to_string(),
                    })?;
                columns[col].push(value);
            }
        }

        Ok(Self { headers, columns })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// A single column by name.
    ///
    /// A missing column is a [`SpanRankError::MissingColumn`] naming it.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| SpanRankError::MissingColumn(name.to_string()))
    }

    /// Row-major feature matrix for the named columns, in the given order
    pub fn features(&self, names: &[&str]) -> Result<Vec<Vec<f64>>> {
        let cols: Vec<&[f64]> = names
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<_>>()?;

        Ok((0..self.num_rows())
            .map(|row| cols.iter().map(|c| c[row]).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "x1,x2,y\n1.0,2.0,3.0\n4.0,5.0,6.0\n7.0,8.0,9.0\n";

    #[test]
    fn test_parse_headers_and_rows() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        assert_eq!(ds.headers(), &["x1", "x2", "y"]);
        assert_eq!(ds.num_rows(), 3);
    }

    #[test]
    fn test_column_by_name() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        assert_eq!(ds.column("x2").unwrap(), &[2.0, 5.0, 8.0]);
    }

    #[test]
    fn test_missing_column_names_it() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let err = ds.column("price").unwrap_err();
        assert!(matches!(err, SpanRankError::MissingColumn(ref c) if c == "price"));
    }

    #[test]
    fn test_features_row_major() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let x = ds.features(&["x1", "x2"]).unwrap();
        assert_eq!(x, vec![vec![1.0, 2.0], vec![4.0, 5.0], vec![7.0, 8.0]]);
    }

    #[test]
    fn test_features_respect_order() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let x = ds.features(&["x2", "x1"]).unwrap();
        assert_eq!(x[0], vec![2.0, 1.0]);
    }

    #[test]
    fn test_malformed_cell_reports_location() {
        let err = Dataset::from_csv_str("a,b\n1.0,oops\n").unwrap_err();
        match err {
            SpanRankError::MalformedValue { column, row, value } => {
                assert_eq!(column, "b");
                assert_eq!(row, 0);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_data() {
        let ds = Dataset::from_csv_str("a,b\n").unwrap();
        assert_eq!(ds.num_rows(), 0);
        assert!(ds.column("a").unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let ds = Dataset::from_csv_str("a, b\n 1.0 , 2.0\n").unwrap();
        assert_eq!(ds.column("b").unwrap(), &[2.0]);
    }
}
