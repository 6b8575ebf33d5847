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

//! Fuzz target for case folder name parsing in both key shapes.

use libfuzzer_sys::fuzz_target;
use nvv_core::{parse_case_folder, CaseKeyShape, MaterialTable};

fuzz_target!(|data: &[u8]| {
    if let Ok(folder) = std::str::from_utf8(data) {
        let names: MaterialTable = [("M10", "Concrete")].into_iter().collect();
        for shape in [CaseKeyShape::Plain, CaseKeyShape::ReactionTriple] {
            if let Ok(label) = parse_case_folder(folder, shape, "fuzz", &names) {
                assert!(!label.id.parent().is_empty());
            }
        }
    }
});
