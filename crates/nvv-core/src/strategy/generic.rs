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

//! Fallback reduction: one column per (tally, bin).

use super::{Action, CaseRow, Reduction};
use crate::aggregate::Cell;
use crate::case::{CaseKeyShape, CaseResult};
use crate::tally::TallyRecord;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct GenericStrategy {
    shape: CaseKeyShape,
    /// `None` takes every tally; otherwise unlisted tallies are skipped.
    tallies: Option<BTreeSet<u32>>,
}

impl GenericStrategy {
    /// Strategy for families without any configuration.
    pub fn all_tallies(shape: CaseKeyShape) -> Self {
        Self {
            shape,
            tallies: None,
        }
    }

    /// Strategy restricted to the configured tallies.
    pub fn configured(shape: CaseKeyShape, tallies: impl IntoIterator<Item = u32>) -> Self {
        Self {
            shape,
            tallies: Some(tallies.into_iter().collect()),
        }
    }

    fn takes(&self, tally: u32) -> bool {
        self.tallies.as_ref().map_or(true, |allowed| allowed.contains(&tally))
    }
}

impl Reduction for GenericStrategy {
    fn shape(&self) -> CaseKeyShape {
        self.shape
    }

    fn supports(&self, _action: Action) -> bool {
        true
    }

    fn extract(&self, case: &CaseResult, action: Action) -> CaseRow {
        let mut row = CaseRow::default();
        for table in case.tables.values() {
            if !self.takes(table.tally()) {
                continue;
            }
            for record in &table.table.rows {
                row.push(
                    bin_column(record),
                    Cell::Number(record.value),
                    Cell::Number(record.error),
                );
            }
            if action == Action::Single {
                row.push_stat_check(case, table);
            }
        }
        row.skip_unconfigured(case, |tally| self.takes(tally));
        row
    }
}

fn bin_column(record: &TallyRecord) -> String {
    if record.coords.is_empty() {
        return format!("t{}", record.tally);
    }
    let coords: Vec<String> = record
        .coords
        .iter()
        .map(|(axis, label)| format!("{axis}={label}"))
        .collect();
    format!("t{} {}", record.tally, coords.join(", "))
}
