// Dweve NVV - Nuclear-data Verification & Validation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Load material lookup tables from CSV.
//!
//! The expected layout is a header row with `Symbol` and `Name` columns
//! (extra columns are ignored):
//!
//! ```text
//! Symbol,Name
//! M10,Stainless steel SS316
//! M203,Concrete
//! ```

use crate::error::{CsvError, Result};
use nvv_core::MaterialTable;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Configuration for CSV parsing.
#[derive(Debug, Clone)]
pub struct FromCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Whether to trim leading/trailing whitespace from fields (default: `true`).
    pub trim: bool,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MaterialRow {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Name")]
    name: String,
}

/// Parse a material table from a CSV string.
///
/// # Example
/// ```
/// use nvv_core::NameResolver;
/// use nvv_csv::read_material_table;
///
/// let table = read_material_table("Symbol,Name\nm10,Steel\n").unwrap();
/// assert_eq!(table.resolve("M10", "FENDL"), Some("Steel".to_string()));
/// ```
pub fn read_material_table(csv: &str) -> Result<MaterialTable> {
    read_material_table_from_reader(csv.as_bytes(), &FromCsvConfig::default())
}

/// Load a material table from a file on disk.
pub fn load_material_table(path: &Path) -> Result<MaterialTable> {
    let file = File::open(path).map_err(|e| CsvError::from_io(e, path.to_path_buf()))?;
    let table = read_material_table_from_reader(file, &FromCsvConfig::default())
        .map_err(|e| e.with_context(path.display().to_string()))?;
    debug!(path = %path.display(), materials = table.len(), "loaded material table");
    Ok(table)
}

/// Parse a material table from any reader.
pub fn read_material_table_from_reader<R: Read>(
    reader: R,
    config: &FromCsvConfig,
) -> Result<MaterialTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["Symbol", "Name"] {
        if !headers.iter().any(|h| h == required) {
            return Err(CsvError::MissingColumn(required.to_string()));
        }
    }

    let mut table = MaterialTable::new();
    for (record_idx, result) in csv_reader.deserialize::<MaterialRow>().enumerate() {
        let row = result.map_err(|e| CsvError::ParseError {
            line: record_idx + 2,
            message: e.to_string(),
        })?;
        if row.symbol.is_empty() {
            continue;
        }
        table.insert(row.symbol, row.name);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvv_core::NameResolver;

    #[test]
    fn test_read_with_extra_columns_and_whitespace() {
        let table =
            read_material_table("Symbol, Name ,Density\n M10 , SS316 ,7.9\nM203,Concrete,2.3\n")
                .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("m10", "any"), Some("SS316".to_string()));
        assert!(table.contains("M203"));
    }

    #[test]
    fn test_blank_symbol_skipped() {
        let table = read_material_table("Symbol,Name\n,Nameless\nM1,Water\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let err = read_material_table("Symbol,Label\nM1,Water\n").unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(ref c) if c == "Name"));
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let err = read_material_table("Symbol,Name\nM1,Water\nM2\n").unwrap_err();
        assert!(matches!(err, CsvError::ParseError { line: 3, .. }));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let config = FromCsvConfig {
            delimiter: b';',
            ..Default::default()
        };
        let table =
            read_material_table_from_reader("Symbol;Name\nM5;Lead\n".as_bytes(), &config).unwrap();
        assert_eq!(table.resolve("M5", ""), Some("Lead".to_string()));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_material_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, CsvError::Other(_)));
    }
}
