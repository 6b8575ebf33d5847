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

//! In-memory run: case source and raw reader in one.

use nvv_core::{
    CaseLocation, CaseSource, Code, NvvError, NvvResult, RawCaseOutput, RawOutputReader,
};
use std::collections::BTreeMap;
use std::path::{Component, PathBuf};

/// Raw outputs keyed by library, benchmark and case folder.
///
/// Locations are virtual paths `<library>/<benchmark>/<folder>/<code>`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRun {
    cases: BTreeMap<(String, String), BTreeMap<String, RawCaseOutput>>,
}

impl MemoryRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case(
        mut self,
        library: &str,
        benchmark: &str,
        folder: &str,
        output: RawCaseOutput,
    ) -> Self {
        self.insert(library, benchmark, folder, output);
        self
    }

    pub fn insert(&mut self, library: &str, benchmark: &str, folder: &str, output: RawCaseOutput) {
        self.cases
            .entry((library.to_string(), benchmark.to_string()))
            .or_default()
            .insert(folder.to_string(), output);
    }

    pub fn case_count(&self) -> usize {
        self.cases.values().map(BTreeMap::len).sum()
    }
}

impl CaseSource for MemoryRun {
    fn cases(&self, library: &str, benchmark: &str, code: Code) -> NvvResult<Vec<CaseLocation>> {
        let cases = self
            .cases
            .get(&(library.to_string(), benchmark.to_string()))
            .ok_or_else(|| {
                NvvError::missing_input(format!(
                    "benchmark '{benchmark}' was not run for library '{library}'"
                ))
            })?;
        Ok(cases
            .keys()
            .map(|folder| {
                let path: PathBuf = [library, benchmark, folder.as_str(), code.as_str()]
                    .iter()
                    .collect();
                CaseLocation::new(folder.clone(), path)
            })
            .collect())
    }
}

impl RawOutputReader for MemoryRun {
    fn read(&self, location: &CaseLocation) -> NvvResult<RawCaseOutput> {
        let parts: Vec<String> = location
            .path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let [library, benchmark, folder, _code] = parts.as_slice() else {
            return Err(NvvError::io(format!("not a memory location: {}", location.path.display())));
        };
        self.cases
            .get(&(library.clone(), benchmark.clone()))
            .and_then(|cases| cases.get(folder))
            .cloned()
            .ok_or_else(|| NvvError::io(format!("no output for case {folder}")))
    }
}
