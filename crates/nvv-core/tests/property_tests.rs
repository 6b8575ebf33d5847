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

//! Property-based tests for parsing and comparison invariants.

use nvv_core::{
    parse_tally, Axis, CaseKey, Cell, Code, ComparisonEngine, LibrarySummary, Outcome,
};
use nvv_test::fixtures::builders::RawTallyBuilder;
use proptest::prelude::*;

fn summary(library: &str, rows: &[(u32, f64, f64)]) -> LibrarySummary {
    let mut s = LibrarySummary::new("Sphere", library, Code::Mcnp);
    for (parent, value, error) in rows {
        let key = CaseKey::new(parent.to_string());
        let name = parent.to_string();
        s.values.insert(key.clone(), &name, "Flux", Cell::Number(*value));
        s.errors.insert(key, &name, "Flux", Cell::Number(*error));
    }
    s
}

fn tally_strategy() -> impl Strategy<Value = (usize, usize, Vec<(f64, f64)>)> {
    (1usize..4, 0usize..6).prop_flat_map(|(cells, energies)| {
        let values = prop::collection::vec((-10.0f64..10.0, 0.0f64..1.0), cells * energies);
        (Just(cells), Just(energies), values)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: every non-positive value carries a NaN error.
    #[test]
    fn prop_non_positive_value_has_nan_error((cells, energies, values) in tally_strategy()) {
        let raw = RawTallyBuilder::new(4)
            .axis(Axis::Cell, (0..cells).map(|c| c as f64 + 1.0))
            .axis(Axis::Energy, (0..energies).map(|e| e as f64))
            .values(values)
            .build();
        let parsed = parse_tally(&raw).unwrap();
        for row in &parsed.table.rows {
            if row.value <= 0.0 {
                prop_assert!(row.error.is_nan());
            } else {
                prop_assert!(!row.error.is_nan());
            }
        }
        prop_assert_eq!(parsed.table.len(), cells * energies);
    }

    /// Property: parsing the same raw tally twice yields identical tables.
    #[test]
    fn prop_parse_is_deterministic((cells, energies, values) in tally_strategy()) {
        let totals: Vec<(f64, f64)> = (0..cells).map(|c| (c as f64, 0.1)).collect();
        let raw = RawTallyBuilder::new(12)
            .axis(Axis::Cell, (0..cells).map(|c| c as f64 + 1.0))
            .axis(Axis::Energy, (0..energies).map(|e| e as f64))
            .values(values)
            .total(Axis::Energy, totals)
            .build();
        let first = parse_tally(&raw).unwrap();
        let second = parse_tally(&raw).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: bucket fractions sum to one, or are all NaN.
    #[test]
    fn prop_bucket_fractions_sum_to_one(
        rows in prop::collection::vec((1u32..500, -5.0f64..5.0, -5.0f64..5.0), 0..40)
    ) {
        let reference: Vec<(u32, f64, f64)> = rows.iter().map(|(p, r, _)| (*p, *r, 0.1)).collect();
        let target: Vec<(u32, f64, f64)> = rows.iter().map(|(p, _, t)| (*p, *t, 0.1)).collect();
        let result = ComparisonEngine::default()
            .compare(&summary("a", &reference), &summary("b", &target));
        if let Some(fractions) = result.summary.column("Flux") {
            if fractions.iter().all(|f| f.is_nan()) {
                prop_assert!(true);
            } else {
                let total: f64 = fractions.iter().sum();
                prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
            }
        }
    }

    /// Property: a library compared with itself is identical wherever the
    /// absolute difference is zero, and never reports a zero reference.
    #[test]
    fn prop_self_comparison(
        rows in prop::collection::vec((1u32..500, -5.0f64..5.0, 0.0f64..1.0), 1..40)
    ) {
        let s = summary("31c", &rows);
        let result = ComparisonEngine::default().compare(&s, &s);
        for row in &result.absolute.rows {
            prop_assert_eq!(row.cells[0], Outcome::Identical);
        }
        for row in &result.relative.rows {
            prop_assert_ne!(row.cells[0], Outcome::ReferenceZero);
        }
        prop_assert!(result.reference_only.is_empty());
    }

    /// Property: comparison rows never exceed the smaller library.
    #[test]
    fn prop_row_count_bounded(
        a in prop::collection::vec(1u32..60, 0..30),
        b in prop::collection::vec(1u32..60, 0..30),
    ) {
        let ra: Vec<(u32, f64, f64)> = a.iter().map(|p| (*p, 1.0, 0.1)).collect();
        let rb: Vec<(u32, f64, f64)> = b.iter().map(|p| (*p, 2.0, 0.1)).collect();
        let sa = summary("a", &ra);
        let sb = summary("b", &rb);
        let result = ComparisonEngine::default().compare(&sa, &sb);
        prop_assert!(result.relative.len() <= sa.values.len().min(sb.values.len()));
        prop_assert_eq!(
            result.relative.len() + result.reference_only.len(),
            sa.values.len()
        );
    }

    /// Property: row order does not depend on insertion order.
    #[test]
    fn prop_row_order_independent_of_insertion(
        parents in prop::collection::vec(prop_oneof!["[0-9]{1,6}", "M[A-Z0-9]{1,5}"], 1..20)
    ) {
        let mut forward = LibrarySummary::new("Sphere", "31c", Code::Mcnp);
        let mut backward = LibrarySummary::new("Sphere", "31c", Code::Mcnp);
        for p in &parents {
            forward.values.insert(CaseKey::new(p.clone()), p, "Flux", Cell::Number(1.0));
        }
        for p in parents.iter().rev() {
            backward.values.insert(CaseKey::new(p.clone()), p, "Flux", Cell::Number(1.0));
        }
        let a: Vec<&CaseKey> = forward.values.keys().collect();
        let b: Vec<&CaseKey> = backward.values.keys().collect();
        prop_assert_eq!(a, b);
    }
}
