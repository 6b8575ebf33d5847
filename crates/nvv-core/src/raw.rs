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

//! Raw tally output as handed over by a transport-code reader.
//!
//! The core never parses native output formats. A [`RawOutputReader`] turns
//! whatever the transport code produced into [`RawCaseOutput`]; the shipped
//! [`JsonOutputReader`] reads a structured `tallies.json` next to the run.

use crate::axis::{Axis, BinLabel};
use crate::error::{NvvError, NvvResult};
use crate::source::CaseLocation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// Declared bins of one active axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAxis {
    pub axis: Axis,
    pub bins: Vec<BinLabel>,
}

/// One tally of one case, exactly as scored.
///
/// `values` holds `(value, relative error)` pairs laid out row-major in
/// [`Axis::NESTING`] order. Axes missing from `axes` count as a single
/// implicit bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTally {
    pub tally: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub axes: Vec<RawAxis>,
    pub values: Vec<(f64, f64)>,
    /// Axes on which the code declared a total bin.
    #[serde(default)]
    pub totals: Vec<Axis>,
    /// Precomputed grand total per cell bin.
    #[serde(default)]
    pub cell_totals: Vec<(f64, f64)>,
}

impl RawTally {
    /// Declared bins along `axis`, or `None` for an implicit single bin.
    pub fn bins(&self, axis: Axis) -> Option<&[BinLabel]> {
        self.axes
            .iter()
            .find(|a| a.axis == axis)
            .map(|a| a.bins.as_slice())
    }

    /// Number of bins along `axis` (1 when undeclared).
    pub fn bin_count(&self, axis: Axis) -> usize {
        self.bins(axis).map_or(1, <[BinLabel]>::len)
    }

    /// Product of all bin counts, saturating at `usize::MAX`.
    pub fn leaf_count(&self) -> usize {
        Axis::NESTING
            .iter()
            .fold(1usize, |acc, a| acc.saturating_mul(self.bin_count(*a)))
    }
}

/// Everything a reader extracts from one case folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCaseOutput {
    pub tallies: Vec<RawTally>,
    /// Statistical-check verdicts keyed by `"<description> [<tally>]"`.
    #[serde(default)]
    pub stat_checks: BTreeMap<String, String>,
}

/// Supplies raw tally output for one case location.
pub trait RawOutputReader {
    fn read(&self, location: &CaseLocation) -> NvvResult<RawCaseOutput>;
}

/// Reads `<case>/<code>/tallies.json`.
#[derive(Debug, Clone)]
pub struct JsonOutputReader {
    file_name: String,
}

impl JsonOutputReader {
    pub const DEFAULT_FILE: &'static str = "tallies.json";

    pub fn new() -> Self {
        Self::with_file_name(Self::DEFAULT_FILE)
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Default for JsonOutputReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RawOutputReader for JsonOutputReader {
    fn read(&self, location: &CaseLocation) -> NvvResult<RawCaseOutput> {
        let path = location.path.join(&self.file_name);
        let text = fs::read_to_string(&path).map_err(|e| {
            NvvError::from(e).with_context(format!("reading {}", path.display()))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| NvvError::from(e).with_context(format!("parsing {}", path.display())))
    }
}
