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

//! Raw tally output to canonical tables.

use crate::axis::{Axis, BinLabel};
use crate::error::{NvvError, NvvResult};
use crate::raw::{RawCaseOutput, RawTally};
use crate::tally::{CanonicalTable, TallyRecord, TallyTable};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Parse one raw tally into its canonical table.
///
/// Axes with a single bin are dropped, except the axis carrying the total
/// bin. Rows follow the Cartesian product of the kept axes in nesting order;
/// when a total is declared, one total row per cell closes that cell's block
/// and is also collected in the companion totals table.
pub fn parse_tally(raw: &RawTally) -> NvvResult<TallyTable> {
    let counts: Vec<usize> = Axis::NESTING.iter().map(|a| raw.bin_count(*a)).collect();
    let expected = match counts.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n)) {
        Some(n) if n == raw.values.len() => n,
        product => {
            return Err(NvvError::shape(format!(
                "expected {} values from the axis product, found {}",
                product.map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string()),
                raw.values.len()
            ))
            .with_context(format!("tally {}", raw.tally)));
        }
    };

    let total_axis = Axis::TOTAL_PRIORITY
        .iter()
        .copied()
        .find(|a| raw.totals.contains(a) && raw.bins(*a).is_some());
    if total_axis.is_none() && !raw.totals.is_empty() {
        warn!(
            tally = raw.tally,
            "total bin declared on an axis without bins, ignored"
        );
    }

    let kept: Vec<usize> = (0..Axis::NESTING.len())
        .filter(|&i| counts[i] > 1 || Some(Axis::NESTING[i]) == total_axis)
        .collect();
    let axes: Vec<Axis> = kept.iter().map(|&i| Axis::NESTING[i]).collect();

    let mut table = CanonicalTable::new(raw.tally, raw.description.clone(), axes.clone());
    if expected == 0 {
        return Ok(TallyTable {
            table,
            totals: None,
            total_axis: None,
        });
    }

    let cells = counts[0];
    if total_axis.is_some() && raw.cell_totals.len() != cells {
        return Err(NvvError::shape(format!(
            "expected {} per-cell totals, found {}",
            cells,
            raw.cell_totals.len()
        ))
        .with_context(format!("tally {}", raw.tally)));
    }

    // Row-major strides, innermost axis last.
    let mut strides = vec![1usize; counts.len()];
    for i in (0..counts.len() - 1).rev() {
        strides[i] = strides[i + 1] * counts[i + 1];
    }

    let label = |axis_idx: usize, bin: usize| -> BinLabel {
        raw.bins(Axis::NESTING[axis_idx])
            .and_then(|b| b.get(bin))
            .cloned()
            .unwrap_or(BinLabel::Index(bin))
    };

    let mut totals =
        total_axis.map(|_| CanonicalTable::new(raw.tally, raw.description.clone(), axes.clone()));
    let block = expected / cells;

    for cell in 0..cells {
        for leaf in cell * block..(cell + 1) * block {
            let coords = kept
                .iter()
                .map(|&i| (Axis::NESTING[i], label(i, (leaf / strides[i]) % counts[i])))
                .collect();
            let (value, error) = raw.values[leaf];
            table
                .rows
                .push(TallyRecord::new(raw.tally, raw.description.clone(), coords, value, error));
        }

        if let Some(totals) = totals.as_mut() {
            let coords: Vec<(Axis, BinLabel)> = axes
                .iter()
                .map(|&a| {
                    if a == Axis::Cell {
                        (a, label(0, cell))
                    } else {
                        (a, BinLabel::Total)
                    }
                })
                .collect();
            let (value, error) = raw.cell_totals[cell];
            let record = TallyRecord::new(raw.tally, raw.description.clone(), coords, value, error);
            table.rows.push(record.clone());
            totals.rows.push(record);
        }
    }

    Ok(TallyTable {
        table,
        totals,
        total_axis,
    })
}

/// Parse every tally of a case. Malformed tallies are logged with the case
/// and tally id and skipped; the rest of the case is kept.
pub fn parse_case(case: &str, raw: &RawCaseOutput) -> (BTreeMap<u32, TallyTable>, Vec<NvvError>) {
    let mut tables = BTreeMap::new();
    let mut skipped = Vec::new();

    for tally in &raw.tallies {
        match parse_tally(tally) {
            Ok(parsed) => {
                debug!(case, tally = tally.tally, rows = parsed.table.len(), "parsed tally");
                tables.insert(tally.tally, parsed);
            }
            Err(err) => {
                warn!(case, tally = tally.tally, error = %err, "skipping malformed tally");
                skipped.push(err.with_context(format!("case {}, tally {}", case, tally.tally)));
            }
        }
    }

    (tables, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NvvErrorKind;
    use crate::raw::RawAxis;

    fn raw(axes: Vec<(Axis, Vec<BinLabel>)>, values: Vec<(f64, f64)>) -> RawTally {
        RawTally {
            tally: 4,
            description: "Neutron flux".to_string(),
            axes: axes
                .into_iter()
                .map(|(axis, bins)| RawAxis { axis, bins })
                .collect(),
            values,
            totals: Vec::new(),
            cell_totals: Vec::new(),
        }
    }

    fn numbers(ns: &[f64]) -> Vec<BinLabel> {
        ns.iter().map(|n| BinLabel::Number(*n)).collect()
    }

    #[test]
    fn test_single_bin_axes_dropped() {
        let t = raw(
            vec![(Axis::Cell, numbers(&[2.0])), (Axis::Energy, numbers(&[1.0, 2.0]))],
            vec![(1.0, 0.1), (2.0, 0.2)],
        );
        let parsed = parse_tally(&t).unwrap();
        assert_eq!(parsed.table.axes, vec![Axis::Energy]);
        assert_eq!(parsed.table.len(), 2);
        assert!(parsed.totals.is_none());
    }

    #[test]
    fn test_cartesian_order_inner_axis_fastest() {
        let t = raw(
            vec![(Axis::Cell, numbers(&[10.0, 20.0])), (Axis::Energy, numbers(&[1.0, 2.0, 3.0]))],
            (0..6).map(|i| (i as f64 + 1.0, 0.1)).collect(),
        );
        let parsed = parse_tally(&t).unwrap();
        let rows = &parsed.table.rows;
        assert_eq!(rows[0].coord(Axis::Cell), Some(&BinLabel::Number(10.0)));
        assert_eq!(rows[2].coord(Axis::Energy), Some(&BinLabel::Number(3.0)));
        assert_eq!(rows[3].coord(Axis::Cell), Some(&BinLabel::Number(20.0)));
        assert_eq!(rows[3].coord(Axis::Energy), Some(&BinLabel::Number(1.0)));
        assert_eq!(rows[5].value, 6.0);
    }

    #[test]
    fn test_total_row_per_cell() {
        let mut t = raw(
            vec![(Axis::Cell, numbers(&[10.0, 20.0])), (Axis::Energy, numbers(&[1.0, 2.0]))],
            vec![(1.0, 0.1), (2.0, 0.1), (3.0, 0.1), (4.0, 0.1)],
        );
        t.totals = vec![Axis::Energy];
        t.cell_totals = vec![(3.0, 0.05), (7.0, 0.04)];
        let parsed = parse_tally(&t).unwrap();

        assert_eq!(parsed.total_axis, Some(Axis::Energy));
        assert_eq!(parsed.table.len(), 6);
        assert!(parsed.table.rows[2].is_total());
        assert_eq!(parsed.table.rows[2].value, 3.0);
        assert!(parsed.table.rows[5].is_total());

        let totals = parsed.totals.unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.rows[1].coord(Axis::Cell), Some(&BinLabel::Number(20.0)));
        assert_eq!(totals.rows[1].coord(Axis::Energy), Some(&BinLabel::Total));
    }

    #[test]
    fn test_total_priority_time_over_energy() {
        let mut t = raw(
            vec![(Axis::Energy, numbers(&[1.0, 2.0])), (Axis::Time, numbers(&[1.0, 2.0]))],
            vec![(1.0, 0.1); 4],
        );
        t.totals = vec![Axis::Energy, Axis::Time];
        t.cell_totals = vec![(4.0, 0.05)];
        let parsed = parse_tally(&t).unwrap();
        assert_eq!(parsed.total_axis, Some(Axis::Time));
    }

    #[test]
    fn test_total_axis_kept_with_single_bin() {
        let mut t = raw(vec![(Axis::Energy, numbers(&[14.0]))], vec![(5.0, 0.1)]);
        t.totals = vec![Axis::Energy];
        t.cell_totals = vec![(5.0, 0.1)];
        let parsed = parse_tally(&t).unwrap();
        assert_eq!(parsed.table.axes, vec![Axis::Energy]);
        assert_eq!(parsed.table.len(), 2);
    }

    #[test]
    fn test_non_positive_values_get_nan_error() {
        let t = raw(
            vec![(Axis::Energy, numbers(&[1.0, 2.0, 3.0]))],
            vec![(1.0, 0.1), (0.0, 0.0), (-1.0, 0.5)],
        );
        let parsed = parse_tally(&t).unwrap();
        assert_eq!(parsed.table.rows[0].error, 0.1);
        assert!(parsed.table.rows[1].error.is_nan());
        assert!(parsed.table.rows[2].error.is_nan());
    }

    #[test]
    fn test_zero_bins_gives_empty_table() {
        let t = raw(vec![(Axis::Energy, Vec::new())], Vec::new());
        let parsed = parse_tally(&t).unwrap();
        assert!(parsed.table.is_empty());
    }

    #[test]
    fn test_length_mismatch_is_shape_error() {
        let t = raw(vec![(Axis::Energy, numbers(&[1.0, 2.0]))], vec![(1.0, 0.1)]);
        let err = parse_tally(&t).unwrap_err();
        assert_eq!(err.kind, NvvErrorKind::Shape);
    }

    #[test]
    fn test_overflowing_axis_product_is_shape_error() {
        let bins: Vec<f64> = (0..64).map(f64::from).collect();
        let axes = Axis::NESTING.iter().map(|a| (*a, numbers(&bins))).collect();
        let err = parse_tally(&raw(axes, Vec::new())).unwrap_err();
        assert_eq!(err.kind, NvvErrorKind::Shape);
        assert!(err.message.contains("more than usize::MAX"));
    }

    #[test]
    fn test_missing_cell_totals_is_shape_error() {
        let mut t = raw(vec![(Axis::Energy, numbers(&[1.0, 2.0]))], vec![(1.0, 0.1); 2]);
        t.totals = vec![Axis::Energy];
        let err = parse_tally(&t).unwrap_err();
        assert_eq!(err.kind, NvvErrorKind::Shape);
    }

    #[test]
    fn test_parse_case_skips_bad_tally() {
        let good = raw(vec![(Axis::Energy, numbers(&[1.0, 2.0]))], vec![(1.0, 0.1); 2]);
        let mut bad = good.clone();
        bad.tally = 14;
        bad.values.pop();
        let output = RawCaseOutput {
            tallies: vec![good, bad],
            ..Default::default()
        };
        let (tables, skipped) = parse_case("Sphere_1001_H-1", &output);
        assert_eq!(tables.len(), 1);
        assert!(tables.contains_key(&4));
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].context.as_ref().unwrap().contains("tally 14"));
    }
}
