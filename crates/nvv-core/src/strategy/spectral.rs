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

//! Spectral-shape (experimental) families. Comparison only.

use super::{push_binned, Action, CaseRow, Reduction};
use crate::case::{CaseKeyShape, CaseResult};

/// Energy spectra of the configured tallies; every tally when none are listed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralStrategy {
    tallies: Vec<u32>,
}

impl SpectralStrategy {
    pub fn new(tallies: Vec<u32>) -> Self {
        Self { tallies }
    }

    fn takes(&self, tally: u32) -> bool {
        self.tallies.is_empty() || self.tallies.contains(&tally)
    }
}

impl Reduction for SpectralStrategy {
    fn shape(&self) -> CaseKeyShape {
        CaseKeyShape::Plain
    }

    fn supports(&self, action: Action) -> bool {
        action == Action::Compare
    }

    fn extract(&self, case: &CaseResult, _action: Action) -> CaseRow {
        let mut row = CaseRow::default();
        for table in case.tables.values() {
            if self.takes(table.tally()) {
                push_binned(&mut row, table, false);
            }
        }
        row.skip_unconfigured(case, |tally| self.takes(tally));
        row
    }
}
