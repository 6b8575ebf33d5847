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

//! Malformed raw outputs for error-path tests.

use super::builders::{scalar, RawCaseBuilder, RawTallyBuilder};
use nvv_core::{Axis, RawCaseOutput};

/// A case whose tally 14 has one value fewer than its axis product.
pub fn short_values_case() -> RawCaseOutput {
    let broken = RawTallyBuilder::new(14)
        .description("Neutron leakage current")
        .axis(Axis::Energy, [1.0, 2.0, 3.0])
        .values([(1.0, 0.1), (2.0, 0.1)])
        .build();
    RawCaseBuilder::new()
        .tally(scalar(24, "Neutron dose", 3.0, 0.02))
        .tally(broken)
        .build()
}

/// A case declaring a total bin without the per-cell totals.
pub fn missing_totals_case() -> RawCaseOutput {
    let mut tally = RawTallyBuilder::new(12)
        .axis(Axis::Energy, [1.0, 2.0])
        .uniform(1.0, 0.1)
        .build();
    tally.totals.push(Axis::Energy);
    RawCaseBuilder::new().tally(tally).build()
}

/// Invalid `tallies.json` documents as (name, text) pairs.
pub fn invalid_json_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("truncated", r#"{"tallies": [{"tally": 4, "values": [[1.0, 0.1]"#),
        ("wrong_type", r#"{"tallies": "none"}"#),
        ("missing_values", r#"{"tallies": [{"tally": 4}]}"#),
    ]
}
