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

//! Report model handed to report writers.
//!
//! Reports are sheets of titled table sections. Layout is limited to what a
//! writer needs to reproduce it: a header pair, the column cut width, and a
//! number format.

use crate::aggregate::{AggregatedTable, Cell, LibrarySummary};
use crate::axis::Axis;
use crate::compare::{BucketSummary, ComparisonResult, OutcomeTable};
use crate::error::NvvResult;
use std::path::PathBuf;

/// Display format of numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    #[default]
    General,
    /// `0`
    Integer,
    /// `0.00E+00`
    Scientific,
    /// `0.00%`
    Percent,
}

impl NumberFormat {
    /// Format used for bin labels along `axis`.
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Energy => NumberFormat::Scientific,
            _ => NumberFormat::Integer,
        }
    }

    pub fn format(self, x: f64) -> String {
        if !x.is_finite() {
            return x.to_string();
        }
        match self {
            NumberFormat::General => x.to_string(),
            NumberFormat::Integer => format!("{x:.0}"),
            NumberFormat::Percent => format!("{:.2}%", x * 100.0),
            NumberFormat::Scientific => {
                let s = format!("{x:.2E}");
                match s.split_once('E') {
                    Some((mantissa, exp)) => {
                        let exp: i32 = exp.parse().unwrap_or(0);
                        let sign = if exp < 0 { '-' } else { '+' };
                        format!("{mantissa}E{sign}{:02}", exp.abs())
                    }
                    None => s,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Empty,
    Number(f64),
    Text(String),
}

impl ReportCell {
    pub fn render(&self, format: NumberFormat) -> String {
        match self {
            ReportCell::Empty => String::new(),
            ReportCell::Number(x) => format.format(*x),
            ReportCell::Text(s) => s.clone(),
        }
    }
}

impl From<Option<&Cell>> for ReportCell {
    fn from(cell: Option<&Cell>) -> Self {
        match cell {
            None => ReportCell::Empty,
            Some(Cell::Number(x)) => ReportCell::Number(*x),
            Some(Cell::Text(s)) => ReportCell::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub index: Vec<String>,
    pub cells: Vec<ReportCell>,
}

/// A rectangular table with index columns on the left.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTable {
    pub index_columns: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Split into chunks of at most `width` data columns, each repeating the
    /// index columns.
    pub fn split_columns(&self, width: usize) -> Vec<ReportTable> {
        let width = width.max(1);
        if self.columns.len() <= width {
            return vec![self.clone()];
        }
        (0..self.columns.len())
            .step_by(width)
            .map(|start| {
                let end = (start + width).min(self.columns.len());
                ReportTable {
                    index_columns: self.index_columns.clone(),
                    columns: self.columns[start..end].to_vec(),
                    rows: self
                        .rows
                        .iter()
                        .map(|row| ReportRow {
                            index: row.index.clone(),
                            cells: row.cells[start..end].to_vec(),
                        })
                        .collect(),
                }
            })
            .collect()
    }

    fn from_aggregated(table: &AggregatedTable) -> Self {
        let triple = table.keys().any(|k| k.reaction.is_some());
        let index_columns = if triple {
            vec!["Parent", "Parent Name", "MT"]
        } else {
            vec!["Zaid", "Zaid/Mat Name"]
        };
        Self {
            index_columns: index_columns.into_iter().map(String::from).collect(),
            columns: table.columns().to_vec(),
            rows: table
                .iter()
                .map(|(key, name, cells)| {
                    let mut index = vec![key.parent.clone(), name.to_string()];
                    if triple {
                        index.push(key.reaction.clone().unwrap_or_default());
                    }
                    ReportRow {
                        index,
                        cells: cells.into_iter().map(ReportCell::from).collect(),
                    }
                })
                .collect(),
        }
    }

    fn from_outcomes(table: &OutcomeTable) -> Self {
        let triple = table.rows.iter().any(|r| r.key.reaction.is_some());
        let index_columns = if triple {
            vec!["Parent", "Parent Name", "MT"]
        } else {
            vec!["Zaid", "Zaid/Mat Name"]
        };
        Self {
            index_columns: index_columns.into_iter().map(String::from).collect(),
            columns: table.columns.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| {
                    let mut index = vec![row.key.parent.clone(), row.name.clone()];
                    if triple {
                        index.push(row.key.reaction.clone().unwrap_or_default());
                    }
                    ReportRow {
                        index,
                        cells: row
                            .cells
                            .iter()
                            .map(|o| match (o.value(), o.label()) {
                                (Some(x), _) => ReportCell::Number(x),
                                (None, Some(label)) => ReportCell::Text(label.to_string()),
                                (None, None) => ReportCell::Empty,
                            })
                            .collect(),
                    }
                })
                .collect(),
        }
    }

    fn from_buckets(summary: &BucketSummary) -> Self {
        Self {
            index_columns: vec!["Range".to_string()],
            columns: summary.columns.clone(),
            rows: summary
                .labels
                .iter()
                .zip(&summary.fractions)
                .map(|(label, fractions)| ReportRow {
                    index: vec![label.clone()],
                    cells: fractions.iter().map(|f| ReportCell::Number(*f)).collect(),
                })
                .collect(),
        }
    }
}

/// How one section should be laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutHints {
    /// Title and subtitle printed above the table.
    pub header: (String, String),
    /// Maximum data columns per block.
    pub cut_width: usize,
    pub number_format: NumberFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub sheet: String,
    pub layout: LayoutHints,
    pub table: ReportTable,
}

/// A finished report; immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub name: String,
    pub sections: Vec<Section>,
}

impl Report {
    /// Values, errors and statistical checks of one library run.
    pub fn single(summary: &LibrarySummary, cut_width: usize) -> Self {
        let title = format!("{} {} [{}]", summary.benchmark, summary.library, summary.code);
        let section = |sheet: &str, table: &AggregatedTable, format: NumberFormat| Section {
            sheet: sheet.to_string(),
            layout: LayoutHints {
                header: (title.clone(), sheet.to_string()),
                cut_width,
                number_format: format,
            },
            table: ReportTable::from_aggregated(table),
        };

        let mut sections = vec![
            section("Values", &summary.values, NumberFormat::Scientific),
            section("Errors", &summary.errors, NumberFormat::General),
            section("Statistical Checks", &summary.stat_checks, NumberFormat::General),
        ];
        if !summary.skipped.is_empty() {
            sections.push(diagnostics(&title, summary.skipped.iter().map(|e| e.to_string())));
        }

        Self {
            name: format!("{}_{}_{}", summary.benchmark, summary.library, summary.code),
            sections,
        }
    }

    /// Difference tables and bucket summary of one library pair.
    pub fn comparison(result: &ComparisonResult, cut_width: usize) -> Self {
        let title = format!("{} {} [{}]", result.benchmark, result.name, result.code);
        let outcome = |sheet: &str, table: &OutcomeTable, format: NumberFormat| Section {
            sheet: sheet.to_string(),
            layout: LayoutHints {
                header: (title.clone(), sheet.to_string()),
                cut_width,
                number_format: format,
            },
            table: ReportTable::from_outcomes(table),
        };

        let mut sections = vec![
            outcome("Comparison (%)", &result.relative, NumberFormat::Percent),
            outcome("Comparison (Abs diff)", &result.absolute, NumberFormat::Scientific),
            outcome("Comparison (Std dev)", &result.normalized, NumberFormat::General),
            Section {
                sheet: "Summary".to_string(),
                layout: LayoutHints {
                    header: (title.clone(), "Summary".to_string()),
                    cut_width,
                    number_format: NumberFormat::Percent,
                },
                table: ReportTable::from_buckets(&result.summary),
            },
        ];

        if !result.reference_only.is_empty() || !result.target_only.is_empty() {
            let rows = result
                .reference_only
                .iter()
                .map(|k| (k, &result.reference))
                .chain(result.target_only.iter().map(|k| (k, &result.target)))
                .map(|(key, library)| ReportRow {
                    index: vec![key.to_string()],
                    cells: vec![ReportCell::Text(format!("only in {library}"))],
                })
                .collect();
            sections.push(Section {
                sheet: "Coverage".to_string(),
                layout: LayoutHints {
                    header: (title.clone(), "Cases excluded from comparison".to_string()),
                    cut_width,
                    number_format: NumberFormat::General,
                },
                table: ReportTable {
                    index_columns: vec!["Case".to_string()],
                    columns: vec!["Coverage".to_string()],
                    rows,
                },
            });
        }

        Self {
            name: format!("{}_{}_{}", result.benchmark, result.name, result.code),
            sections,
        }
    }

    /// Append the values and errors `summary` contributed, one sheet each,
    /// named after its library.
    pub fn attach_library(&mut self, summary: &LibrarySummary, cut_width: usize) {
        let title = format!("{} {} [{}]", summary.benchmark, summary.library, summary.code);
        let tables = [
            ("Values", &summary.values, NumberFormat::Scientific),
            ("Errors", &summary.errors, NumberFormat::General),
        ];
        for (kind, table, number_format) in tables {
            let sheet = format!("{} {kind}", summary.library);
            self.sections.push(Section {
                sheet: sheet.clone(),
                layout: LayoutHints {
                    header: (title.clone(), sheet),
                    cut_width,
                    number_format,
                },
                table: ReportTable::from_aggregated(table),
            });
        }
    }

    /// Sheet names in first-appearance order.
    pub fn sheets(&self) -> Vec<&str> {
        let mut sheets: Vec<&str> = Vec::new();
        for section in &self.sections {
            if !sheets.contains(&section.sheet.as_str()) {
                sheets.push(&section.sheet);
            }
        }
        sheets
    }
}

fn diagnostics(title: &str, messages: impl Iterator<Item = String>) -> Section {
    Section {
        sheet: "Skipped".to_string(),
        layout: LayoutHints {
            header: (title.to_string(), "Skipped cases and tallies".to_string()),
            cut_width: 1,
            number_format: NumberFormat::General,
        },
        table: ReportTable {
            index_columns: vec!["#".to_string()],
            columns: vec!["Reason".to_string()],
            rows: messages
                .enumerate()
                .map(|(i, message)| ReportRow {
                    index: vec![(i + 1).to_string()],
                    cells: vec![ReportCell::Text(message)],
                })
                .collect(),
        },
    }
}

/// Renders finished reports somewhere.
pub trait ReportWriter {
    /// Write every section; returns the files produced.
    fn write(&mut self, report: &Report) -> NvvResult<Vec<PathBuf>>;
}
