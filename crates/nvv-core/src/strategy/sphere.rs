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

//! Sphere leakage family.

use super::{push_binned, Action, CaseRow, Reduction};
use crate::aggregate::Cell;
use crate::axis::Axis;
use crate::case::{CaseKeyShape, CaseResult};
use crate::config::CodeTallies;
use crate::tally::TallyTable;

/// Single-library verdicts with estimator cross-checks; binned and integral
/// series for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereStrategy {
    tallies: CodeTallies,
}

impl SphereStrategy {
    pub fn new(tallies: CodeTallies) -> Self {
        Self { tallies }
    }

    fn single(&self, case: &CaseResult) -> CaseRow {
        let mut row = CaseRow::default();
        let mut notes = String::new();

        for &tally in &self.tallies.single {
            let Some(table) = case.tally(tally) else {
                continue;
            };
            let (verdict, negative) = verdict(table);
            if !negative.is_empty() {
                notes.push_str(&format!("\n({}): {}", tally, negative.join(", ")));
            }
            row.push(
                column_name(table),
                Cell::Text(verdict),
                Cell::Number(table.table.mean_error()),
            );
            row.push_stat_check(case, table);
        }

        for pair in &self.tallies.estimators {
            let (Some(reference), Some(alternate)) =
                (first_value(case, pair.reference), first_value(case, pair.alternate))
            else {
                continue;
            };
            let ratio = if reference == 0.0 {
                0.0
            } else {
                (reference - alternate) / reference
            };
            row.values.push((pair.label.clone(), Cell::Number(ratio)));
        }

        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!("Negative Bins:{notes}")
        };
        row.values.push(("Notes".to_string(), Cell::Text(notes)));
        row
    }

    fn compare(&self, case: &CaseResult) -> CaseRow {
        let mut row = CaseRow::default();
        for &tally in &self.tallies.binned {
            if let Some(table) = case.tally(tally) {
                push_binned(&mut row, table, true);
            }
        }
        for &tally in &self.tallies.integral {
            if let Some(table) = case.tally(tally) {
                if let Some(bin) = table.table.bins().next() {
                    row.push_number(column_name(table), bin.value, bin.error);
                }
            }
        }
        row
    }
}

impl Reduction for SphereStrategy {
    fn shape(&self) -> CaseKeyShape {
        CaseKeyShape::Plain
    }

    fn supports(&self, _action: Action) -> bool {
        true
    }

    fn extract(&self, case: &CaseResult, action: Action) -> CaseRow {
        let mut row = match action {
            Action::Single => self.single(case),
            Action::Compare => self.compare(case),
        };
        row.skip_unconfigured(case, |tally| self.tallies.mentions(tally));
        row
    }
}

fn column_name(table: &TallyTable) -> String {
    if table.description().is_empty() {
        format!("Tally {}", table.tally())
    } else {
        table.description().to_string()
    }
}

fn first_value(case: &CaseResult, tally: u32) -> Option<f64> {
    case.tally(tally)?.table.bins().next().map(|r| r.value)
}

/// Verdict text plus the energy labels of negative bins.
fn verdict(table: &TallyTable) -> (String, Vec<String>) {
    let bins: Vec<_> = table.table.bins().collect();
    let negative: Vec<String> = bins
        .iter()
        .filter(|r| r.value < 0.0)
        .map(|r| {
            r.coord(Axis::Energy)
                .map(|e| e.to_string())
                .unwrap_or_default()
        })
        .collect();

    let text = if !negative.is_empty() {
        format!("Value < 0 in {} bin(s)", negative.len())
    } else if bins.iter().all(|r| r.value == 0.0) {
        "Value = 0 for all bins".to_string()
    } else {
        "Value > 0 for all bins".to_string()
    };
    (text, negative)
}
