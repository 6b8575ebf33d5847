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

//! Folding per-case results into per-library summary tables.

use crate::case::{parse_case_folder, CaseKey, CaseResult, NameResolver};
use crate::config::Code;
use crate::error::{NvvError, NvvResult};
use crate::parser::parse_case;
use crate::raw::RawOutputReader;
use crate::source::CaseSource;
use crate::strategy::{Action, CaseRow, Reduction};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// One cell of an aggregated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric content; text cells are `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A row of an aggregated table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    cells: BTreeMap<usize, Cell>,
}

/// Sparse case-by-column table with deterministic row order.
///
/// Rows are ordered by [`CaseKey`] regardless of insertion order; columns keep
/// the order in which they first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedTable {
    columns: Vec<String>,
    rows: BTreeMap<CaseKey, Row>,
}

impl AggregatedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &CaseKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Row keys in sort order.
    pub fn keys(&self) -> impl Iterator<Item = &CaseKey> {
        self.rows.keys()
    }

    pub fn name(&self, key: &CaseKey) -> Option<&str> {
        self.rows.get(key).map(|r| r.name.as_str())
    }

    fn column_index(&mut self, column: &str) -> usize {
        match self.columns.iter().position(|c| c == column) {
            Some(idx) => idx,
            None => {
                self.columns.push(column.to_string());
                self.columns.len() - 1
            }
        }
    }

    /// Ensure a row exists for `key`, even if it ends up without cells.
    pub fn ensure_row(&mut self, key: CaseKey, name: &str) {
        self.rows.entry(key).or_insert_with(|| Row {
            name: name.to_string(),
            cells: BTreeMap::new(),
        });
    }

    pub fn insert(&mut self, key: CaseKey, name: &str, column: &str, cell: Cell) {
        let idx = self.column_index(column);
        self.ensure_row(key.clone(), name);
        if let Some(row) = self.rows.get_mut(&key) {
            row.cells.insert(idx, cell);
        }
    }

    pub fn get(&self, key: &CaseKey, column: &str) -> Option<&Cell> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(key)?.cells.get(&idx)
    }

    /// Numeric cell value; missing and text cells read as NaN.
    pub fn number(&self, key: &CaseKey, column: &str) -> f64 {
        self.get(key, column)
            .and_then(Cell::as_number)
            .unwrap_or(f64::NAN)
    }

    /// Rows in sort order with one optional cell per column.
    pub fn iter(&self) -> impl Iterator<Item = (&CaseKey, &str, Vec<Option<&Cell>>)> {
        let width = self.columns.len();
        self.rows.iter().map(move |(key, row)| {
            let cells = (0..width).map(|i| row.cells.get(&i)).collect();
            (key, row.name.as_str(), cells)
        })
    }
}

/// The three summary tables of one library run.
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySummary {
    pub benchmark: String,
    pub library: String,
    pub code: Code,
    pub values: AggregatedTable,
    pub errors: AggregatedTable,
    pub stat_checks: AggregatedTable,
    /// Tallies and cases that were skipped, with their reason.
    pub skipped: Vec<NvvError>,
}

impl LibrarySummary {
    pub fn new(benchmark: &str, library: &str, code: Code) -> Self {
        Self {
            benchmark: benchmark.to_string(),
            library: library.to_string(),
            code,
            values: AggregatedTable::new(),
            errors: AggregatedTable::new(),
            stat_checks: AggregatedTable::new(),
            skipped: Vec::new(),
        }
    }

    fn fold(&mut self, key: &CaseKey, name: &str, row: CaseRow) {
        self.values.ensure_row(key.clone(), name);
        for (column, cell) in row.values {
            self.values.insert(key.clone(), name, &column, cell);
        }
        for (column, cell) in row.errors {
            self.errors.insert(key.clone(), name, &column, cell);
        }
        for (column, cell) in row.stat_checks {
            self.stat_checks.insert(key.clone(), name, &column, cell);
        }
        self.skipped.extend(row.skipped);
    }
}

/// Receives every parsed case before it is folded and dropped.
pub trait CaseSink {
    fn record(&mut self, case: &CaseResult) -> NvvResult<()>;
}

/// Aggregates the cases of one (library, code) run, one case at a time.
pub struct SingleLibraryAggregator<'a> {
    source: &'a dyn CaseSource,
    reader: &'a dyn RawOutputReader,
    names: &'a dyn NameResolver,
}

impl<'a> SingleLibraryAggregator<'a> {
    pub fn new(
        source: &'a dyn CaseSource,
        reader: &'a dyn RawOutputReader,
        names: &'a dyn NameResolver,
    ) -> Self {
        Self {
            source,
            reader,
            names,
        }
    }

    /// Build the summary tables of `benchmark` for `library`.
    ///
    /// Only a missing library/benchmark directory or an empty case list fails
    /// the run; malformed cases and tallies are logged and skipped.
    pub fn aggregate(
        &self,
        benchmark: &str,
        library: &str,
        code: Code,
        strategy: &dyn Reduction,
        action: Action,
        mut sink: Option<&mut dyn CaseSink>,
    ) -> NvvResult<LibrarySummary> {
        let locations = self.source.cases(library, benchmark, code)?;
        if locations.is_empty() {
            return Err(NvvError::missing_input(format!(
                "no {code} case folders for benchmark '{benchmark}' in library '{library}'"
            )));
        }
        info!(benchmark, library, %code, cases = locations.len(), "aggregating cases");

        let mut summary = LibrarySummary::new(benchmark, library, code);
        for location in &locations {
            let parsed =
                parse_case_folder(&location.folder, strategy.shape(), library, self.names);
            let label = match parsed {
                Ok(label) => label,
                Err(err) => {
                    warn!(case = %location.folder, error = %err, "skipping case");
                    summary.skipped.push(err.with_context(format!("case {}", location.folder)));
                    continue;
                }
            };

            if summary.values.contains(&label.id.key) {
                warn!(
                    case = %label.id,
                    folder = %location.folder,
                    "duplicate case id, keeping the first"
                );
                summary.skipped.push(
                    NvvError::parse(format!("duplicate case id {}", label.id.key))
                        .with_context(format!("case {}", location.folder)),
                );
                continue;
            }

            let raw = match self.reader.read(location) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(case = %label.id, error = %err, "skipping unreadable case");
                    summary.skipped.push(err.with_context(format!("case {}", label.id)));
                    continue;
                }
            };

            let (tables, skipped) = parse_case(&location.folder, &raw);
            summary.skipped.extend(skipped);
            let case = CaseResult {
                label,
                tables,
                stat_checks: raw.stat_checks,
            };

            if let Some(sink) = sink.as_deref_mut() {
                if let Err(err) = sink.record(&case) {
                    warn!(case = %case.id(), error = %err, "could not archive raw data");
                }
            }

            let row = strategy.extract(&case, action);
            debug!(case = %case.id(), columns = row.values.len(), "folded case");
            summary.fold(&case.id().key, &case.label.name, row);
        }

        Ok(summary)
    }
}
