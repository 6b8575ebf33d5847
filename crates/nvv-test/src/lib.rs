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

//! Shared test fixtures and utilities for NVV crates.
//!
//! # Quick Start
//!
//! ```rust
//! use nvv_core::{Axis, Code};
//! use nvv_test::fixtures::{self, builders::RawTallyBuilder, memory::MemoryRun};
//!
//! // Canned sphere case, values scaled by 1.0
//! let case = fixtures::sphere_case(1.0);
//!
//! // Custom tally
//! let tally = RawTallyBuilder::new(4)
//!     .description("Neutron flux")
//!     .axis(Axis::Energy, [0.1, 1.0, 14.0])
//!     .values([(1.0, 0.1), (2.0, 0.1), (3.0, 0.1)])
//!     .build();
//! assert_eq!(tally.leaf_count(), 3);
//!
//! // In-memory run usable as both case source and reader
//! let run = MemoryRun::new().case("31c", "Sphere", "Sphere_1001_H-1", case);
//! assert_eq!(run.case_count(), 1);
//! ```

pub mod fixtures;

pub use fixtures::memory::MemoryRun;
pub use fixtures::tree::TempRunTree;
