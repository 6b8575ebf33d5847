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

//! Per-family reduction strategies and their dispatch.
//!
//! Families differ in case-key shape, tally set and derived quantities. Each
//! family maps onto one variant of [`Strategy`], which implements the shared
//! [`Reduction`] capability used by the aggregator.

mod activation;
mod generic;
mod spectral;
mod sphere;

pub use activation::ActivationStrategy;
pub use generic::GenericStrategy;
pub use spectral::SpectralStrategy;
pub use sphere::SphereStrategy;

use crate::aggregate::Cell;
use crate::axis::Axis;
use crate::case::{CaseKeyShape, CaseResult};
use crate::config::{Code, FamilyKind, PostProcessConfig};
use crate::error::NvvError;
use crate::tally::{TallyRecord, TallyTable};
use std::fmt;
use tracing::warn;

/// What the caller wants from a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Summarise one library.
    Single,
    /// Extract numeric series for a cross-library comparison.
    Compare,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Single => f.write_str("single"),
            Action::Compare => f.write_str("compare"),
        }
    }
}

/// Columns one case contributes to the summary tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseRow {
    pub values: Vec<(String, Cell)>,
    pub errors: Vec<(String, Cell)>,
    pub stat_checks: Vec<(String, Cell)>,
    pub skipped: Vec<NvvError>,
}

impl CaseRow {
    pub(crate) fn push(&mut self, column: impl Into<String>, value: Cell, error: Cell) {
        let column = column.into();
        self.values.push((column.clone(), value));
        self.errors.push((column, error));
    }

    pub(crate) fn push_number(&mut self, column: impl Into<String>, value: f64, error: f64) {
        self.push(column, Cell::Number(value), Cell::Number(error));
    }

    /// Record every tally of `case` that `configured` rejects as skipped.
    pub(crate) fn skip_unconfigured(
        &mut self,
        case: &CaseResult,
        configured: impl Fn(u32) -> bool,
    ) {
        for tally in case.tables.keys().copied().filter(|&t| !configured(t)) {
            warn!(case = %case.id(), tally, "tally has no extraction settings, skipped");
            self.skipped.push(
                NvvError::missing_config(format!("tally {tally} is not in the configuration"))
                    .with_context(format!("case {}, tally {tally}", case.id())),
            );
        }
    }

    /// Copy the reader's verdict for `tally`, if it reported one.
    pub(crate) fn push_stat_check(&mut self, case: &CaseResult, table: &TallyTable) {
        let key = stat_check_key(table);
        if let Some(verdict) = case.stat_checks.get(&key) {
            self.stat_checks.push((key, Cell::Text(verdict.clone())));
        }
    }
}

/// Key under which readers report a tally's statistical check.
pub fn stat_check_key(table: &TallyTable) -> String {
    format!("{} [{}]", table.description(), table.tally())
}

/// The capability every family strategy provides.
pub trait Reduction {
    /// Folder-name convention of the family's cases.
    fn shape(&self) -> CaseKeyShape;

    fn supports(&self, action: Action) -> bool;

    /// Columns contributed by one case.
    fn extract(&self, case: &CaseResult, action: Action) -> CaseRow;
}

/// Closed set of reduction strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Sphere(SphereStrategy),
    Activation(ActivationStrategy),
    Spectral(SpectralStrategy),
    Generic(GenericStrategy),
}

impl Reduction for Strategy {
    fn shape(&self) -> CaseKeyShape {
        match self {
            Strategy::Sphere(s) => s.shape(),
            Strategy::Activation(s) => s.shape(),
            Strategy::Spectral(s) => s.shape(),
            Strategy::Generic(s) => s.shape(),
        }
    }

    fn supports(&self, action: Action) -> bool {
        match self {
            Strategy::Sphere(s) => s.supports(action),
            Strategy::Activation(s) => s.supports(action),
            Strategy::Spectral(s) => s.supports(action),
            Strategy::Generic(s) => s.supports(action),
        }
    }

    fn extract(&self, case: &CaseResult, action: Action) -> CaseRow {
        match self {
            Strategy::Sphere(s) => s.extract(case, action),
            Strategy::Activation(s) => s.extract(case, action),
            Strategy::Spectral(s) => s.extract(case, action),
            Strategy::Generic(s) => s.extract(case, action),
        }
    }
}

/// Outcome of routing a (family, code, action) request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Run(Strategy),
    /// Nothing to do; the notice is shown to the user.
    Unsupported { notice: String },
}

/// Select the strategy for `family` run with `code`.
///
/// Unknown families fall back to the generic strategy over every tally.
pub fn dispatch(config: &PostProcessConfig, family: &str, code: Code, action: Action) -> Dispatch {
    let Some(settings) = config.family(family) else {
        tracing::debug!(family, "unknown benchmark family, using generic reduction");
        return Dispatch::Run(Strategy::Generic(GenericStrategy::all_tallies(CaseKeyShape::Plain)));
    };

    let Some(tallies) = settings.codes.get(&code) else {
        return Dispatch::Unsupported {
            notice: format!("No {code} post-processing is configured for {family}"),
        };
    };

    let strategy = match settings.kind {
        FamilyKind::Sphere => Strategy::Sphere(SphereStrategy::new(tallies.clone())),
        FamilyKind::Activation => Strategy::Activation(ActivationStrategy::new(tallies.clone())),
        FamilyKind::Spectral => Strategy::Spectral(SpectralStrategy::new(tallies.binned.clone())),
        FamilyKind::Generic => Strategy::Generic(GenericStrategy::configured(
            settings.shape,
            tallies.single.iter().copied(),
        )),
    };

    if strategy.supports(action) {
        Dispatch::Run(strategy)
    } else {
        Dispatch::Unsupported {
            notice: format!("No single-library post-processing is foreseen for {family}"),
        }
    }
}

/// Column name of an energy-binned cell: `"<E> [MeV] [t<N>]"`, with any other
/// kept coordinates appended.
pub(crate) fn energy_column(row: &TallyRecord) -> String {
    let energy = row
        .coord(Axis::Energy)
        .map(|e| e.to_string())
        .unwrap_or_else(|| "All".to_string());
    let mut name = format!("{} [MeV] [t{}]", energy, row.tally);
    for (axis, label) in row.coords.iter().filter(|(a, _)| *a != Axis::Energy) {
        name.push_str(&format!(" [{axis} {label}]"));
    }
    name
}

/// One numeric column per ordinary bin; optionally `"Total [t<N>]"` from the
/// companion totals table.
pub(crate) fn push_binned(row: &mut CaseRow, table: &TallyTable, with_total: bool) {
    for bin in table.table.bins() {
        row.push_number(energy_column(bin), bin.value, bin.error);
    }
    if with_total {
        if let Some(total) = table.first_total() {
            row.push_number(format!("Total [t{}]", table.tally()), total.value, total.error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_known_families() {
        let config = PostProcessConfig::default();
        assert!(matches!(
            dispatch(&config, "Sphere", Code::Mcnp, Action::Single),
            Dispatch::Run(Strategy::Sphere(_))
        ));
        assert!(matches!(
            dispatch(&config, "SphereSDDR", Code::D1s, Action::Compare),
            Dispatch::Run(Strategy::Activation(_))
        ));
        assert!(matches!(
            dispatch(&config, "Oktavian", Code::Mcnp, Action::Compare),
            Dispatch::Run(Strategy::Spectral(_))
        ));
    }

    #[test]
    fn test_spectral_single_is_unsupported() {
        let config = PostProcessConfig::default();
        match dispatch(&config, "FNG", Code::Mcnp, Action::Single) {
            Dispatch::Unsupported { notice } => assert!(notice.contains("FNG")),
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_family_falls_back_to_generic() {
        let config = PostProcessConfig::default();
        match dispatch(&config, "ITER_1D", Code::Mcnp, Action::Single) {
            Dispatch::Run(Strategy::Generic(g)) => assert_eq!(g.shape(), CaseKeyShape::Plain),
            other => panic!("expected generic, got {other:?}"),
        }
    }

    #[test]
    fn test_unconfigured_code_is_unsupported() {
        let config = PostProcessConfig::default();
        assert!(matches!(
            dispatch(&config, "Sphere", Code::Serpent, Action::Compare),
            Dispatch::Unsupported { .. }
        ));
    }

    #[test]
    fn test_strategy_shapes() {
        let config = PostProcessConfig::default();
        let Dispatch::Run(s) = dispatch(&config, "SphereSDDR", Code::D1s, Action::Single) else {
            panic!("expected a strategy");
        };
        assert_eq!(s.shape(), CaseKeyShape::ReactionTriple);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::axis::{Axis, BinLabel};
    use crate::case::{CaseId, CaseKey, CaseLabel, CaseResult};
    use crate::parser::parse_tally;
    use crate::raw::{RawAxis, RawTally};
    use std::collections::BTreeMap;

    /// Energy-binned raw tally; `total` adds an energy total bin.
    pub fn energy_tally(
        tally: u32,
        description: &str,
        energies: &[f64],
        values: &[f64],
        total: Option<f64>,
    ) -> RawTally {
        RawTally {
            tally,
            description: description.to_string(),
            axes: vec![RawAxis {
                axis: Axis::Energy,
                bins: energies.iter().map(|e| BinLabel::Number(*e)).collect(),
            }],
            values: values.iter().map(|v| (*v, 0.1)).collect(),
            totals: total.map(|_| vec![Axis::Energy]).unwrap_or_default(),
            cell_totals: total.map(|t| vec![(t, 0.05)]).unwrap_or_default(),
        }
    }

    pub fn scalar_tally(tally: u32, description: &str, value: f64) -> RawTally {
        RawTally {
            tally,
            description: description.to_string(),
            axes: Vec::new(),
            values: vec![(value, 0.02)],
            totals: Vec::new(),
            cell_totals: Vec::new(),
        }
    }

    pub fn case(parent: &str, tallies: Vec<RawTally>) -> CaseResult {
        CaseResult {
            label: CaseLabel {
                id: CaseId {
                    key: CaseKey::new(parent),
                    library: "31c".to_string(),
                },
                name: parent.to_string(),
            },
            tables: tallies
                .iter()
                .map(|t| (t.tally, parse_tally(t).expect("valid fixture")))
                .collect(),
            stat_checks: BTreeMap::new(),
        }
    }
}
