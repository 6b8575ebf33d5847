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

//! Canonical tally rows and tables.

use crate::axis::{Axis, BinLabel};

/// One scored bin of a tally.
#[derive(Debug, Clone)]
pub struct TallyRecord {
    pub tally: u32,
    pub description: String,
    /// Coordinates along the kept axes, in nesting order.
    pub coords: Vec<(Axis, BinLabel)>,
    pub value: f64,
    /// Relative statistical error; NaN whenever `value <= 0`.
    pub error: f64,
}

impl TallyRecord {
    /// Build a record. Non-positive values always carry a NaN error.
    pub fn new(
        tally: u32,
        description: impl Into<String>,
        coords: Vec<(Axis, BinLabel)>,
        value: f64,
        error: f64,
    ) -> Self {
        let error = if value > 0.0 { error } else { f64::NAN };
        Self {
            tally,
            description: description.into(),
            coords,
            value,
            error,
        }
    }

    /// Label along `axis`, if that axis was kept.
    pub fn coord(&self, axis: Axis) -> Option<&BinLabel> {
        self.coords
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, label)| label)
    }

    /// Whether this row is a synthesised total row.
    pub fn is_total(&self) -> bool {
        self.coords.iter().any(|(_, label)| label.is_total())
    }
}

// NaN errors compare equal so that repeated parses can be checked for equality.
impl PartialEq for TallyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.tally == other.tally
            && self.description == other.description
            && self.coords == other.coords
            && self.value.to_bits() == other.value.to_bits()
            && self.error.to_bits() == other.error.to_bits()
    }
}

/// The rows of one tally, in nesting order of the kept axes.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    pub tally: u32,
    pub description: String,
    pub axes: Vec<Axis>,
    pub rows: Vec<TallyRecord>,
}

impl CanonicalTable {
    pub fn new(tally: u32, description: impl Into<String>, axes: Vec<Axis>) -> Self {
        Self {
            tally,
            description: description.into(),
            axes,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row: kept axes followed by `Value` and `Error`.
    pub fn column_names(&self) -> Vec<String> {
        self.axes
            .iter()
            .map(|a| a.column_name().to_string())
            .chain(["Value".to_string(), "Error".to_string()])
            .collect()
    }

    /// Rows that are not synthesised totals.
    pub fn bins(&self) -> impl Iterator<Item = &TallyRecord> {
        self.rows.iter().filter(|r| !r.is_total())
    }

    /// Mean of the finite errors of the ordinary bins; NaN when there are none.
    pub fn mean_error(&self) -> f64 {
        let (sum, count) = self
            .bins()
            .map(|r| r.error)
            .filter(|e| e.is_finite())
            .fold((0.0, 0usize), |(s, n), e| (s + e, n + 1));
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    /// Group ordinary bins by their label on `axis`, preserving first-appearance
    /// order. Rows without that axis fall into a single unlabelled group.
    pub fn group_by(&self, axis: Axis) -> Vec<(Option<BinLabel>, Vec<&TallyRecord>)> {
        let mut groups: Vec<(Option<BinLabel>, Vec<&TallyRecord>)> = Vec::new();
        for row in self.bins() {
            let key = row.coord(axis).cloned();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(row),
                None => groups.push((key, vec![row])),
            }
        }
        groups
    }
}

/// A parsed tally: the canonical table plus its optional totals companion.
#[derive(Debug, Clone, PartialEq)]
pub struct TallyTable {
    pub table: CanonicalTable,
    pub totals: Option<CanonicalTable>,
    /// Axis the total bin was declared on.
    pub total_axis: Option<Axis>,
}

impl TallyTable {
    pub fn tally(&self) -> u32 {
        self.table.tally
    }

    pub fn description(&self) -> &str {
        &self.table.description
    }

    /// First grand-total row, if the tally declared one.
    pub fn first_total(&self) -> Option<&TallyRecord> {
        self.totals.as_ref().and_then(|t| t.rows.first())
    }
}
