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

#![no_main]

//! Fuzz target for the tally parser.
//!
//! Arbitrary bytes are read as a `tallies.json` document; whatever
//! deserializes is pushed through `parse_case`. Malformed tallies must come
//! back as skipped errors, never as panics, whatever the declared axis sizes.
//!
//! # Running the Fuzzer
//!
//! ```bash
//! cargo install cargo-fuzz
//!
//! # Run the fuzzer (from nvv-core directory)
//! cargo fuzz run fuzz_parse
//!
//! cargo fuzz run fuzz_parse -- -max_len=100000 -max_total_time=300
//! ```

use libfuzzer_sys::fuzz_target;
use nvv_core::{parse_case, RawCaseOutput};

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = serde_json::from_slice::<RawCaseOutput>(data) {
        let (tables, skipped) = parse_case("fuzz", &raw);
        assert!(tables.len() + skipped.len() <= raw.tallies.len());
        for table in tables.values() {
            for row in &table.table.rows {
                assert!(row.value > 0.0 || row.error.is_nan());
            }
        }
    }
});
