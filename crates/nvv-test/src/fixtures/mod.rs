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

//! Canned raw outputs for each benchmark family.
//!
//! - **builders**: fluent builders for raw tallies and cases
//! - **memory**: in-memory case source and reader
//! - **tree**: on-disk run trees in a temporary directory
//! - **errors**: malformed raw outputs

pub mod builders;
mod cases;
pub mod errors;
pub mod memory;
pub mod tree;

pub use cases::*;
