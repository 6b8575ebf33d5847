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

//! Builders for raw tally fixtures.

use nvv_core::{Axis, BinLabel, RawAxis, RawCaseOutput, RawTally};
use std::collections::BTreeMap;

/// Builder for one raw tally.
///
/// # Examples
///
/// ```
/// use nvv_core::Axis;
/// use nvv_test::fixtures::builders::RawTallyBuilder;
///
/// let tally = RawTallyBuilder::new(12)
///     .axis(Axis::Energy, [1.0, 14.0])
///     .values([(3.0, 0.1), (4.0, 0.1)])
///     .total(Axis::Energy, [(7.0, 0.05)])
///     .build();
/// assert_eq!(tally.totals, vec![Axis::Energy]);
/// ```
#[derive(Debug, Clone)]
pub struct RawTallyBuilder {
    tally: RawTally,
}

impl RawTallyBuilder {
    pub fn new(tally: u32) -> Self {
        Self {
            tally: RawTally {
                tally,
                description: format!("Tally {tally}"),
                axes: Vec::new(),
                values: Vec::new(),
                totals: Vec::new(),
                cell_totals: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.tally.description = description.into();
        self
    }

    /// Declares numeric bins along `axis`.
    pub fn axis(self, axis: Axis, bins: impl IntoIterator<Item = f64>) -> Self {
        self.labels(axis, bins.into_iter().map(BinLabel::Number).collect())
    }

    /// Declares arbitrary bin labels along `axis`.
    pub fn labels(mut self, axis: Axis, bins: Vec<BinLabel>) -> Self {
        self.tally.axes.retain(|a| a.axis != axis);
        self.tally.axes.push(RawAxis { axis, bins });
        self
    }

    pub fn values(mut self, values: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.tally.values = values.into_iter().collect();
        self
    }

    /// Fills every leaf with the same value and error.
    pub fn uniform(mut self, value: f64, error: f64) -> Self {
        self.tally.values = vec![(value, error); self.tally.leaf_count()];
        self
    }

    /// Declares a total bin on `axis` with one grand total per cell.
    pub fn total(mut self, axis: Axis, cell_totals: impl IntoIterator<Item = (f64, f64)>) -> Self {
        if !self.tally.totals.contains(&axis) {
            self.tally.totals.push(axis);
        }
        self.tally.cell_totals = cell_totals.into_iter().collect();
        self
    }

    pub fn build(self) -> RawTally {
        self.tally
    }
}

/// Builder for the raw output of one case.
#[derive(Debug, Clone, Default)]
pub struct RawCaseBuilder {
    tallies: Vec<RawTally>,
    stat_checks: BTreeMap<String, String>,
}

impl RawCaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(mut self, tally: RawTally) -> Self {
        self.tallies.push(tally);
        self
    }

    /// Records a verdict under `"<description> [<tally>]"`.
    pub fn stat_check(mut self, description: &str, tally: u32, verdict: impl Into<String>) -> Self {
        self.stat_checks
            .insert(format!("{description} [{tally}]"), verdict.into());
        self
    }

    pub fn build(self) -> RawCaseOutput {
        RawCaseOutput {
            tallies: self.tallies,
            stat_checks: self.stat_checks,
        }
    }
}

/// Scalar tally with a single bin.
pub fn scalar(tally: u32, description: &str, value: f64, error: f64) -> RawTally {
    RawTallyBuilder::new(tally)
        .description(description)
        .values([(value, error)])
        .build()
}

/// Energy-binned tally with an energy total.
pub fn spectrum(
    tally: u32,
    description: &str,
    energies: &[f64],
    values: &[f64],
    error: f64,
) -> RawTally {
    let total: f64 = values.iter().sum();
    RawTallyBuilder::new(tally)
        .description(description)
        .axis(Axis::Energy, energies.iter().copied())
        .values(values.iter().map(|v| (*v, error)))
        .total(Axis::Energy, [(total, error / 2.0)])
        .build()
}
