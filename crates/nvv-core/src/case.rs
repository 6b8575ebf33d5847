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

//! Case identifiers, folder-name conventions and display-name lookup.

use crate::error::{NvvError, NvvResult};
use crate::tally::TallyTable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// How a benchmark family encodes case ids in its folder names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseKeyShape {
    /// `<Bench>_<zaid>_<name>` or `<Bench>_<MATERIAL>`.
    #[default]
    Plain,
    /// `<Bench>_<zaid>_<name>_<mt>` or `<Bench>_<MATERIAL>`.
    ReactionTriple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    Nuclide,
    Material,
}

/// Sort token: numeric ids sort before text, each in their natural order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortToken {
    Numeric(u64),
    Text(String),
}

impl SortToken {
    pub fn of(token: &str) -> Self {
        token
            .parse::<u64>()
            .map(SortToken::Numeric)
            .unwrap_or_else(|_| SortToken::Text(token.to_string()))
    }
}

/// Library-independent part of a case id; the row key of aggregated tables.
///
/// Ordering is by numeric interpretation of the parent id (text ids after all
/// numeric ones, lexicographic among themselves), then the reaction code under
/// the same rule, then the raw strings as a tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseKey {
    pub parent: String,
    pub reaction: Option<String>,
}

impl CaseKey {
    pub fn new(parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            reaction: None,
        }
    }

    pub fn with_reaction(parent: impl Into<String>, reaction: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            reaction: Some(reaction.into()),
        }
    }

    pub fn kind(&self) -> CaseKind {
        match SortToken::of(&self.parent) {
            SortToken::Numeric(_) => CaseKind::Nuclide,
            SortToken::Text(_) => CaseKind::Material,
        }
    }

    fn sort_key(&self) -> (SortToken, Option<SortToken>) {
        (
            SortToken::of(&self.parent),
            self.reaction.as_deref().map(SortToken::of),
        )
    }
}

impl Ord for CaseKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.parent.cmp(&other.parent))
            .then_with(|| self.reaction.cmp(&other.reaction))
    }
}

impl PartialOrd for CaseKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reaction {
            Some(mt) => write!(f, "{}_{}", self.parent, mt),
            None => f.write_str(&self.parent),
        }
    }
}

/// Full case identifier: the case key plus the library that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseId {
    pub key: CaseKey,
    pub library: String,
}

impl CaseId {
    pub fn parent(&self) -> &str {
        &self.key.parent
    }

    pub fn reaction(&self) -> Option<&str> {
        self.key.reaction.as_deref()
    }

    pub fn kind(&self) -> CaseKind {
        self.key.kind()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.key, self.library)
    }
}

/// Resolves display names of cases; labelling only.
pub trait NameResolver {
    fn resolve(&self, id: &str, library: &str) -> Option<String>;
}

/// Material symbol to display-name table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    names: BTreeMap<String, String>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, name: impl Into<String>) {
        self.names.insert(symbol.into().to_uppercase(), name.into());
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.names.contains_key(&symbol.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>, N: Into<String>> FromIterator<(S, N)> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, name) in iter {
            table.insert(symbol, name);
        }
        table
    }
}

impl NameResolver for MaterialTable {
    fn resolve(&self, id: &str, _library: &str) -> Option<String> {
        self.names.get(&id.to_uppercase()).cloned()
    }
}

/// A case id together with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLabel {
    pub id: CaseId,
    pub name: String,
}

/// Derive the case id and display name from a case folder name.
pub fn parse_case_folder(
    folder: &str,
    shape: CaseKeyShape,
    library: &str,
    names: &dyn NameResolver,
) -> NvvResult<CaseLabel> {
    let pieces: Vec<&str> = folder.split('_').collect();
    if pieces.len() < 2 || pieces.iter().any(|p| p.is_empty()) {
        return Err(NvvError::parse(format!(
            "case folder '{folder}' does not follow <benchmark>_<id> naming"
        )));
    }

    let material = |symbol: &str| -> CaseLabel {
        let id = symbol.to_uppercase();
        let name = names.resolve(&id, library).unwrap_or_else(|| {
            tracing::warn!(case = %id, "material has no display name, using its symbol");
            id.clone()
        });
        case_label(CaseKey::new(id), name, library)
    };

    match shape {
        CaseKeyShape::Plain => {
            let zaid = pieces[pieces.len() - 2];
            let last = pieces[pieces.len() - 1];
            if zaid == pieces[0] {
                Ok(material(last))
            } else {
                Ok(case_label(CaseKey::new(zaid), last.to_string(), library))
            }
        }
        CaseKeyShape::ReactionTriple => {
            let parent = pieces[1];
            if pieces.len() == 2 || names.resolve(parent, library).is_some() {
                let mut label = material(parent);
                label.id.key.reaction = Some("All".to_string());
                return Ok(label);
            }
            match (pieces.get(2), pieces.get(3)) {
                (Some(name), Some(mt)) => Ok(case_label(
                    CaseKey::with_reaction(parent, *mt),
                    name.to_string(),
                    library,
                )),
                _ => Err(NvvError::parse(format!(
                    "case folder '{folder}' does not follow <benchmark>_<zaid>_<name>_<mt> naming"
                ))),
            }
        }
    }
}

fn case_label(key: CaseKey, name: String, library: &str) -> CaseLabel {
    CaseLabel {
        id: CaseId {
            key,
            library: library.to_string(),
        },
        name,
    }
}

/// One simulated case, parsed. Lives until folded into a summary.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub label: CaseLabel,
    pub tables: BTreeMap<u32, TallyTable>,
    pub stat_checks: BTreeMap<String, String>,
}

impl CaseResult {
    pub fn id(&self) -> &CaseId {
        &self.label.id
    }

    pub fn tally(&self, tally: u32) -> Option<&TallyTable> {
        self.tables.get(&tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials() -> MaterialTable {
        [("M10", "Stainless steel"), ("MSTEEL", "Steel")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_numeric_before_text() {
        let mut keys = vec![
            CaseKey::new("MSTEEL"),
            CaseKey::new("92238"),
            CaseKey::new("11023"),
        ];
        keys.sort();
        let order: Vec<&str> = keys.iter().map(|k| k.parent.as_str()).collect();
        assert_eq!(order, vec!["11023", "92238", "MSTEEL"]);
    }

    #[test]
    fn test_numeric_order_not_lexicographic() {
        let mut keys = vec![
            CaseKey::new("26056"),
            CaseKey::new("1001"),
            CaseKey::new("M10"),
            CaseKey::new("M2"),
        ];
        keys.sort();
        let order: Vec<&str> = keys.iter().map(|k| k.parent.as_str()).collect();
        assert_eq!(order, vec!["1001", "26056", "M10", "M2"]);
    }

    #[test]
    fn test_reaction_secondary_key() {
        let mut keys = vec![
            CaseKey::with_reaction("26056", "All"),
            CaseKey::with_reaction("26056", "103"),
            CaseKey::with_reaction("26056", "16"),
            CaseKey::with_reaction("1001", "102"),
        ];
        keys.sort();
        let order: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(order, vec!["1001_102", "26056_16", "26056_103", "26056_All"]);
    }

    #[test]
    fn test_kind() {
        assert_eq!(CaseKey::new("1001").kind(), CaseKind::Nuclide);
        assert_eq!(CaseKey::new("M10").kind(), CaseKind::Material);
    }

    #[test]
    fn test_plain_nuclide_folder() {
        let label =
            parse_case_folder("Sphere_1001_H-1", CaseKeyShape::Plain, "31c", &materials()).unwrap();
        assert_eq!(label.id.parent(), "1001");
        assert_eq!(label.id.reaction(), None);
        assert_eq!(label.id.library, "31c");
        assert_eq!(label.name, "H-1");
    }

    #[test]
    fn test_plain_material_folder() {
        let label =
            parse_case_folder("Sphere_m10", CaseKeyShape::Plain, "31c", &materials()).unwrap();
        assert_eq!(label.id.parent(), "M10");
        assert_eq!(label.name, "Stainless steel");
        assert_eq!(label.id.kind(), CaseKind::Material);
    }

    #[test]
    fn test_plain_material_without_name_falls_back() {
        let label =
            parse_case_folder("Sphere_M99", CaseKeyShape::Plain, "31c", &materials()).unwrap();
        assert_eq!(label.name, "M99");
    }

    #[test]
    fn test_triple_nuclide_folder() {
        let label = parse_case_folder(
            "SphereSDDR_26056_Fe-56_103",
            CaseKeyShape::ReactionTriple,
            "31c",
            &materials(),
        )
        .unwrap();
        assert_eq!(label.id.parent(), "26056");
        assert_eq!(label.id.reaction(), Some("103"));
        assert_eq!(label.name, "Fe-56");
    }

    #[test]
    fn test_triple_material_folder() {
        let label =
            parse_case_folder("SphereSDDR_M10", CaseKeyShape::ReactionTriple, "31c", &materials())
                .unwrap();
        assert_eq!(label.id.parent(), "M10");
        assert_eq!(label.id.reaction(), Some("All"));
    }

    #[test]
    fn test_triple_unknown_material_uses_symbol() {
        let label =
            parse_case_folder("SphereSDDR_m99", CaseKeyShape::ReactionTriple, "31c", &materials())
                .unwrap();
        assert_eq!(label.id.parent(), "M99");
        assert_eq!(label.id.reaction(), Some("All"));
        assert_eq!(label.name, "M99");
    }

    #[test]
    fn test_triple_missing_reaction_is_error() {
        assert!(parse_case_folder(
            "SphereSDDR_26056_Fe-56",
            CaseKeyShape::ReactionTriple,
            "31c",
            &materials()
        )
        .is_err());
    }

    #[test]
    fn test_malformed_folder_is_error() {
        assert!(parse_case_folder("Sphere", CaseKeyShape::Plain, "31c", &materials()).is_err());
        assert!(parse_case_folder("Sphere__x", CaseKeyShape::Plain, "31c", &materials()).is_err());
    }
}
