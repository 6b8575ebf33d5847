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

//! Shutdown dose-rate (activation) family.
//!
//! Time-binned tallies are reduced per time bin: values are summed over the
//! remaining bins and errors averaged. The neutron flux keeps one column per
//! energy bin. Total rows never contribute.

use super::{push_binned, Action, CaseRow, Reduction};
use crate::axis::Axis;
use crate::case::{CaseKeyShape, CaseResult};
use crate::config::CodeTallies;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationStrategy {
    tallies: CodeTallies,
}

impl ActivationStrategy {
    pub fn new(tallies: CodeTallies) -> Self {
        Self { tallies }
    }
}

impl Reduction for ActivationStrategy {
    fn shape(&self) -> CaseKeyShape {
        CaseKeyShape::ReactionTriple
    }

    fn supports(&self, _action: Action) -> bool {
        true
    }

    fn extract(&self, case: &CaseResult, action: Action) -> CaseRow {
        let mut row = CaseRow::default();

        for &tally in &self.tallies.binned {
            if let Some(table) = case.tally(tally) {
                push_binned(&mut row, table, false);
                if action == Action::Single {
                    row.push_stat_check(case, table);
                }
            }
        }

        for series in &self.tallies.time_series {
            let Some(table) = case.tally(series.tally) else {
                continue;
            };
            for (time, members) in table.table.group_by(Axis::Time) {
                let value: f64 = members.iter().map(|r| r.value).sum();
                let errors: Vec<f64> = members
                    .iter()
                    .map(|r| r.error)
                    .filter(|e| !e.is_nan())
                    .collect();
                let error = if errors.is_empty() {
                    f64::NAN
                } else {
                    errors.iter().sum::<f64>() / errors.len() as f64
                };
                let label = time.map(|t| t.to_string()).unwrap_or_default();
                row.push_number(format!("{}{}", series.prefix, label), value, error);
            }
            if action == Action::Single {
                row.push_stat_check(case, table);
            }
        }

        row.skip_unconfigured(case, |tally| self.tallies.mentions(tally));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{case, energy_tally};
    use super::*;
    use crate::aggregate::Cell;
    use crate::axis::BinLabel;
    use crate::config::{Code, PostProcessConfig};
    use crate::error::NvvErrorKind;
    use crate::raw::{RawAxis, RawTally};

    fn strategy() -> ActivationStrategy {
        let config = PostProcessConfig::default();
        ActivationStrategy::new(config.family("SphereSDDR").unwrap().codes[&Code::D1s].clone())
    }

    fn time_tally(tally: u32, values: &[(f64, f64)]) -> RawTally {
        RawTally {
            tally,
            description: format!("Tally {tally}"),
            axes: vec![
                RawAxis {
                    axis: Axis::Energy,
                    bins: vec![BinLabel::Number(1.0), BinLabel::Number(2.0)],
                },
                RawAxis {
                    axis: Axis::Time,
                    bins: vec![BinLabel::Number(1.0), BinLabel::Number(2.0)],
                },
            ],
            values: values.to_vec(),
            totals: vec![Axis::Time],
            cell_totals: vec![(100.0, 0.01)],
        }
    }

    #[test]
    fn test_time_bins_sum_values_and_average_errors() {
        // (energy, time) order: (1,1) (1,2) (2,1) (2,2)
        let c = case(
            "26056",
            vec![time_tally(32, &[(1.0, 0.1), (10.0, 0.2), (2.0, 0.3), (20.0, 0.4)])],
        );
        let row = strategy().extract(&c, Action::Compare);
        let columns: Vec<&str> = row.values.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(columns, vec!["F1", "F2"]);
        assert_eq!(row.values[0].1, Cell::Number(3.0));
        assert_eq!(row.values[1].1, Cell::Number(30.0));
        assert!((row.errors[0].1.as_number().unwrap() - 0.2).abs() < 1e-12);
        assert!((row.errors[1].1.as_number().unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_nan_errors_skipped_in_mean() {
        let c = case(
            "26056",
            vec![time_tally(104, &[(0.0, 0.0), (1.0, 0.1), (4.0, 0.4), (1.0, 0.3)])],
        );
        let row = strategy().extract(&c, Action::Compare);
        assert_eq!(row.values[0].0, "D1");
        assert_eq!(row.values[0].1, Cell::Number(4.0));
        assert!((row.errors[0].1.as_number().unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_neutron_flux_per_energy_without_total() {
        let c = case(
            "26056",
            vec![energy_tally(12, "Neutron flux", &[1.0, 14.0], &[5.0, 6.0], Some(11.0))],
        );
        let row = strategy().extract(&c, Action::Compare);
        let columns: Vec<&str> = row.values.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(columns, vec!["1 [MeV] [t12]", "14 [MeV] [t12]"]);
    }

    #[test]
    fn test_single_carries_stat_checks() {
        let mut c = case("26056", vec![time_tally(46, &[(1.0, 0.1); 4])]);
        c.stat_checks
            .insert("Tally 46 [46]".to_string(), "Missed".to_string());
        let row = strategy().extract(&c, Action::Single);
        assert_eq!(row.stat_checks, vec![("Tally 46 [46]".to_string(), Cell::from("Missed"))]);
        assert_eq!(row.values[0].0, "H1");
    }

    #[test]
    fn test_unlisted_tally_recorded_as_missing_config() {
        let c = case(
            "26056",
            vec![time_tally(32, &[(1.0, 0.1); 4]), time_tally(64, &[(1.0, 0.1); 4])],
        );
        let row = strategy().extract(&c, Action::Compare);
        let columns: Vec<&str> = row.values.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(columns, vec!["F1", "F2"]);
        assert_eq!(row.skipped.len(), 1);
        assert_eq!(row.skipped[0].kind, NvvErrorKind::MissingConfig);
        assert!(row.skipped[0].context.as_ref().unwrap().ends_with("tally 64"));
    }
}
