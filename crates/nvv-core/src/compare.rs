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

//! Cross-library comparison of aggregated tables.
//!
//! Two summaries are aligned on the case keys they share. For every shared
//! cell the engine computes
//!
//! - `absolute = reference - target`
//! - `relative = absolute / reference`
//! - `normalized = absolute / reference_error`
//!
//! with plain IEEE arithmetic, then classifies each result into an
//! [`Outcome`]. Degenerate arithmetic never raises: it turns into sentinels.

use crate::aggregate::LibrarySummary;
use crate::case::CaseKey;
use crate::config::Code;
use crate::error::{NvvError, NvvResult};
use std::fmt;
use tracing::{info, warn};

/// Classified result of one difference cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Value(f64),
    /// The difference is NaN (missing operand or 0/0).
    NotAvailable,
    /// The difference is exactly zero.
    Identical,
    /// The difference is -∞: the reference is 0 and the target positive.
    ReferenceZero,
    /// The ratio is exactly 1 because the target is 0.
    TargetZero,
}

impl Outcome {
    /// Classify `x` in fixed order: NaN, zero, -∞, one.
    ///
    /// `target` is the target operand of the cell; an exact 1 is only a
    /// sentinel when the target really is 0, otherwise it stays numeric.
    pub fn classify(x: f64, target: f64) -> Self {
        if x.is_nan() {
            Outcome::NotAvailable
        } else if x == 0.0 {
            Outcome::Identical
        } else if x == f64::NEG_INFINITY {
            Outcome::ReferenceZero
        } else if x == 1.0 && target == 0.0 {
            Outcome::TargetZero
        } else {
            Outcome::Value(x)
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Outcome::Value(_) => None,
            Outcome::NotAvailable => Some("Not Available"),
            Outcome::Identical => Some("Identical"),
            Outcome::ReferenceZero => Some("Reference = 0"),
            Outcome::TargetZero => Some("Target = 0"),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(x) => write!(f, "{x}"),
            other => f.write_str(other.label().unwrap_or_default()),
        }
    }
}

/// One aligned row of a difference table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRow {
    pub key: CaseKey,
    pub name: String,
    pub cells: Vec<Outcome>,
}

/// Difference table over the shared case keys, in case-key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeTable {
    pub columns: Vec<String>,
    pub rows: Vec<OutcomeRow>,
}

impl OutcomeTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &CaseKey, column: &str) -> Option<Outcome> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| &r.key == key)
            .and_then(|r| r.cells.get(idx).copied())
    }
}

/// Validated, ascending bucket boundaries starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketThresholds(Vec<f64>);

impl BucketThresholds {
    pub fn new(thresholds: Vec<f64>) -> NvvResult<Self> {
        if thresholds.is_empty() {
            return Err(NvvError::config("bucket thresholds must not be empty"));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(NvvError::config("bucket thresholds must be finite"));
        }
        if thresholds[0] != 0.0 {
            return Err(NvvError::config("the first bucket threshold must be 0"));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(NvvError::config("bucket thresholds must be strictly ascending"));
        }
        Ok(Self(thresholds))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Bucket of `|x|`: `[t_i, t_{i+1})`, the last one unbounded.
    pub fn bucket(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            return None;
        }
        let magnitude = x.abs();
        self.0.iter().rposition(|t| magnitude >= *t)
    }

    /// Row labels, in percent.
    pub fn labels(&self) -> Vec<String> {
        let last = self.0.len() - 1;
        (0..self.0.len())
            .map(|i| {
                if i == last {
                    format!("% of cells > {}", percent(self.0[i]))
                } else {
                    format!(
                        "{} < % of cells < {}",
                        percent(self.0[i]),
                        percent(self.0[i + 1])
                    )
                }
            })
            .collect()
    }
}

impl Default for BucketThresholds {
    fn default() -> Self {
        Self(vec![0.0, 0.05, 0.1, 0.2])
    }
}

fn percent(fraction: f64) -> String {
    let pct = (fraction * 100.0 * 1e6).round() / 1e6;
    format!("{pct}")
}

/// Per-column distribution of relative differences over the buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    pub labels: Vec<String>,
    pub columns: Vec<String>,
    /// `fractions[bucket][column]`; NaN when a column has no defined value.
    pub fractions: Vec<Vec<f64>>,
}

impl BucketSummary {
    fn build(thresholds: &BucketThresholds, columns: &[String], relative: &[Vec<f64>]) -> Self {
        let buckets = thresholds.as_slice().len();
        let mut fractions = vec![vec![f64::NAN; columns.len()]; buckets];

        for (col, values) in relative.iter().enumerate() {
            let mut counts = vec![0usize; buckets];
            let mut defined = 0usize;
            for &x in values {
                if let Some(b) = thresholds.bucket(x) {
                    counts[b] += 1;
                    defined += 1;
                }
            }
            if defined > 0 {
                for (b, count) in counts.into_iter().enumerate() {
                    fractions[b][col] = count as f64 / defined as f64;
                }
            }
        }

        Self {
            labels: thresholds.labels(),
            columns: columns.to_vec(),
            fractions,
        }
    }

    /// Fractions of one column, bucket by bucket.
    pub fn column(&self, column: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == column)?;
        Some(self.fractions.iter().map(|row| row[idx]).collect())
    }
}

/// Comparison of one target library against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// `"<reference>_Vs_<target>"`.
    pub name: String,
    pub benchmark: String,
    pub code: Code,
    pub reference: String,
    pub target: String,
    pub relative: OutcomeTable,
    pub absolute: OutcomeTable,
    pub normalized: OutcomeTable,
    pub summary: BucketSummary,
    /// Cases only the reference has.
    pub reference_only: Vec<CaseKey>,
    /// Cases only the target has.
    pub target_only: Vec<CaseKey>,
}

/// Aligns library summaries and computes their differences.
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    thresholds: BucketThresholds,
}

impl ComparisonEngine {
    pub fn new(thresholds: BucketThresholds) -> Self {
        Self { thresholds }
    }

    pub fn compare(&self, reference: &LibrarySummary, target: &LibrarySummary) -> ComparisonResult {
        let name = format!("{}_Vs_{}", reference.library, target.library);

        let mut columns: Vec<String> = reference.values.columns().to_vec();
        for column in target.values.columns() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }

        let reference_only: Vec<CaseKey> = reference
            .values
            .keys()
            .filter(|k| !target.values.contains(k))
            .cloned()
            .collect();
        let target_only: Vec<CaseKey> = target
            .values
            .keys()
            .filter(|k| !reference.values.contains(k))
            .cloned()
            .collect();
        for key in &reference_only {
            warn!(
                comparison = %name,
                case = %key,
                library = %reference.library,
                "case missing from target, excluded"
            );
        }
        for key in &target_only {
            warn!(
                comparison = %name,
                case = %key,
                library = %target.library,
                "case missing from reference, excluded"
            );
        }

        let mut relative = OutcomeTable {
            columns: columns.clone(),
            rows: Vec::new(),
        };
        let mut absolute = relative.clone();
        let mut normalized = relative.clone();
        let mut raw_relative = vec![Vec::new(); columns.len()];

        for key in reference.values.keys().filter(|k| target.values.contains(k)) {
            let name = reference.values.name(key).unwrap_or_default().to_string();
            let mut rel_cells = Vec::with_capacity(columns.len());
            let mut abs_cells = Vec::with_capacity(columns.len());
            let mut norm_cells = Vec::with_capacity(columns.len());

            for (idx, column) in columns.iter().enumerate() {
                let r = reference.values.number(key, column);
                let t = target.values.number(key, column);
                let err = reference.errors.number(key, column);
                let abs = r - t;
                let rel = abs / r;
                let norm = abs / err;

                raw_relative[idx].push(rel);
                rel_cells.push(Outcome::classify(rel, t));
                abs_cells.push(Outcome::classify(abs, t));
                norm_cells.push(Outcome::classify(norm, t));
            }

            relative.rows.push(OutcomeRow {
                key: key.clone(),
                name: name.clone(),
                cells: rel_cells,
            });
            absolute.rows.push(OutcomeRow {
                key: key.clone(),
                name: name.clone(),
                cells: abs_cells,
            });
            normalized.rows.push(OutcomeRow {
                key: key.clone(),
                name,
                cells: norm_cells,
            });
        }

        let summary = BucketSummary::build(&self.thresholds, &columns, &raw_relative);
        info!(
            comparison = %name,
            rows = relative.len(),
            columns = columns.len(),
            "compared libraries"
        );

        ComparisonResult {
            name,
            benchmark: reference.benchmark.clone(),
            code: reference.code,
            reference: reference.library.clone(),
            target: target.library.clone(),
            relative,
            absolute,
            normalized,
            summary,
            reference_only,
            target_only,
        }
    }

    /// Compare the first summary against each of the others, in order.
    pub fn compare_all(&self, summaries: &[LibrarySummary]) -> NvvResult<Vec<ComparisonResult>> {
        match summaries {
            [reference, targets @ ..] if !targets.is_empty() => Ok(targets
                .iter()
                .map(|target| self.compare(reference, target))
                .collect()),
            _ => Err(NvvError::config(
                "a comparison needs a reference and at least one target library",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Cell;

    fn summary(library: &str, rows: &[(&str, f64, f64)]) -> LibrarySummary {
        let mut s = LibrarySummary::new("Sphere", library, Code::Mcnp);
        for (parent, value, error) in rows {
            let key = CaseKey::new(*parent);
            s.values.insert(key.clone(), parent, "Flux", Cell::Number(*value));
            s.errors.insert(key, parent, "Flux", Cell::Number(*error));
        }
        s
    }

    fn flux(result: &OutcomeTable, parent: &str) -> Outcome {
        result.get(&CaseKey::new(parent), "Flux").unwrap()
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(Outcome::classify(f64::NAN, 1.0), Outcome::NotAvailable);
        assert_eq!(Outcome::classify(0.0, 1.0), Outcome::Identical);
        assert_eq!(Outcome::classify(-0.0, 1.0), Outcome::Identical);
        assert_eq!(Outcome::classify(f64::NEG_INFINITY, 5.0), Outcome::ReferenceZero);
        assert_eq!(Outcome::classify(1.0, 0.0), Outcome::TargetZero);
        assert_eq!(Outcome::classify(1.0, 2.0), Outcome::Value(1.0));
        assert_eq!(Outcome::classify(f64::INFINITY, -1.0), Outcome::Value(f64::INFINITY));
        assert_eq!(Outcome::classify(0.25, 1.0), Outcome::Value(0.25));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::NotAvailable.to_string(), "Not Available");
        assert_eq!(Outcome::ReferenceZero.to_string(), "Reference = 0");
        assert_eq!(Outcome::TargetZero.to_string(), "Target = 0");
        assert_eq!(Outcome::Value(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_identical_values() {
        let engine = ComparisonEngine::default();
        let r = engine.compare(
            &summary("31c", &[("1001", 10.0, 0.1)]),
            &summary("32c", &[("1001", 10.0, 0.2)]),
        );
        assert_eq!(r.name, "31c_Vs_32c");
        assert_eq!(flux(&r.relative, "1001"), Outcome::Identical);
        assert_eq!(flux(&r.absolute, "1001"), Outcome::Identical);
        assert_eq!(flux(&r.normalized, "1001"), Outcome::Identical);
    }

    #[test]
    fn test_reference_zero() {
        let engine = ComparisonEngine::default();
        let r = engine.compare(
            &summary("31c", &[("1001", 0.0, 0.0)]),
            &summary("32c", &[("1001", 5.0, 0.1)]),
        );
        assert_eq!(flux(&r.relative, "1001"), Outcome::ReferenceZero);
        assert_eq!(flux(&r.absolute, "1001"), Outcome::Value(-5.0));
    }

    #[test]
    fn test_target_zero() {
        let engine = ComparisonEngine::default();
        let r = engine.compare(
            &summary("31c", &[("1001", 5.0, 0.5)]),
            &summary("32c", &[("1001", 0.0, 0.0)]),
        );
        assert_eq!(flux(&r.relative, "1001"), Outcome::TargetZero);
        assert_eq!(flux(&r.absolute, "1001"), Outcome::Value(5.0));
        assert_eq!(flux(&r.normalized, "1001"), Outcome::Value(10.0));
    }

    #[test]
    fn test_one_sided_cases_recorded() {
        let engine = ComparisonEngine::default();
        let r = engine.compare(
            &summary("31c", &[("1001", 1.0, 0.1), ("2004", 1.0, 0.1)]),
            &summary("32c", &[("1001", 1.0, 0.1), ("3006", 1.0, 0.1)]),
        );
        assert_eq!(r.relative.len(), 1);
        assert_eq!(r.reference_only, vec![CaseKey::new("2004")]);
        assert_eq!(r.target_only, vec![CaseKey::new("3006")]);
    }

    #[test]
    fn test_missing_cell_is_not_available() {
        let engine = ComparisonEngine::default();
        let reference = summary("31c", &[("1001", 1.0, 0.1)]);
        let mut target = summary("32c", &[("1001", 1.0, 0.1)]);
        target
            .values
            .insert(CaseKey::new("1001"), "1001", "Dose", Cell::Number(2.0));
        let r = engine.compare(&reference, &target);
        assert_eq!(r.relative.columns, vec!["Flux", "Dose"]);
        assert_eq!(
            r.relative.get(&CaseKey::new("1001"), "Dose"),
            Some(Outcome::NotAvailable)
        );
    }

    #[test]
    fn test_bucket_summary() {
        let engine = ComparisonEngine::default();
        let reference = summary(
            "31c",
            &[("1", 1.0, 0.1), ("2", 1.0, 0.1), ("3", 1.0, 0.1), ("4", 1.0, 0.1)],
        );
        let target = summary(
            "32c",
            &[("1", 0.99, 0.1), ("2", 0.94, 0.1), ("3", 1.15, 0.1), ("4", 0.75, 0.1)],
        );
        let r = engine.compare(&reference, &target);
        let fractions = r.summary.column("Flux").unwrap();
        assert_eq!(fractions, vec![0.25, 0.25, 0.25, 0.25]);
        assert_eq!(r.summary.labels[0], "0 < % of cells < 5");
        assert_eq!(r.summary.labels[3], "% of cells > 20");
    }

    #[test]
    fn test_bucket_summary_undefined_column() {
        let engine = ComparisonEngine::default();
        let r = engine.compare(
            &summary("31c", &[("1", 0.0, 0.0)]),
            &summary("32c", &[("1", 0.0, 0.0)]),
        );
        assert!(r.summary.column("Flux").unwrap().iter().all(|f| f.is_nan()));
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(BucketThresholds::new(vec![]).is_err());
        assert!(BucketThresholds::new(vec![0.05, 0.1]).is_err());
        assert!(BucketThresholds::new(vec![0.0, 0.1, 0.1]).is_err());
        assert!(BucketThresholds::new(vec![0.0, f64::INFINITY]).is_err());
        assert!(BucketThresholds::new(vec![0.0, 0.025]).is_ok());
    }

    #[test]
    fn test_bucket_boundaries() {
        let t = BucketThresholds::default();
        assert_eq!(t.bucket(0.0), Some(0));
        assert_eq!(t.bucket(0.05), Some(1));
        assert_eq!(t.bucket(-0.07), Some(1));
        assert_eq!(t.bucket(0.2), Some(3));
        assert_eq!(t.bucket(f64::NEG_INFINITY), Some(3));
        assert_eq!(t.bucket(f64::NAN), None);
    }

    #[test]
    fn test_compare_all_pairs_with_first() {
        let engine = ComparisonEngine::default();
        let libs = vec![
            summary("31c", &[("1001", 1.0, 0.1)]),
            summary("32c", &[("1001", 1.0, 0.1)]),
            summary("00c", &[("1001", 1.0, 0.1)]),
        ];
        let results = engine.compare_all(&libs).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["31c_Vs_32c", "31c_Vs_00c"]);
        assert!(engine.compare_all(&libs[..1]).is_err());
    }
}
