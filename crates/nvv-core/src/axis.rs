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

//! Bin axes and bin labels of a tally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eleven binning dimensions a tally can be split along.
///
/// The declaration order is the fixed nesting order: raw values are laid out
/// with `Cell` as the outermost dimension and `MeshA` as the innermost one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    Cell,
    Direction,
    User,
    Segment,
    Multiplier,
    Cosine,
    Energy,
    Time,
    MeshC,
    MeshB,
    MeshA,
}

impl Axis {
    /// All axes in nesting order.
    pub const NESTING: [Axis; 11] = [
        Axis::Cell,
        Axis::Direction,
        Axis::User,
        Axis::Segment,
        Axis::Multiplier,
        Axis::Cosine,
        Axis::Energy,
        Axis::Time,
        Axis::MeshC,
        Axis::MeshB,
        Axis::MeshA,
    ];

    /// Axes that may carry a total bin, highest priority first.
    pub const TOTAL_PRIORITY: [Axis; 3] = [Axis::Time, Axis::Energy, Axis::Cosine];

    /// Column header used in tables and archives.
    pub fn column_name(self) -> &'static str {
        match self {
            Axis::Cell => "Cells",
            Axis::Direction => "Dir",
            Axis::User => "User",
            Axis::Segment => "Segments",
            Axis::Multiplier => "Multiplier",
            Axis::Cosine => "Cosine",
            Axis::Energy => "Energy",
            Axis::Time => "Time",
            Axis::MeshC => "Cor C",
            Axis::MeshB => "Cor B",
            Axis::MeshA => "Cor A",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// The label of one bin along an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LabelRepr", into = "LabelRepr")]
pub enum BinLabel {
    /// Numeric bin boundary or cell number.
    Number(f64),
    /// Ordinal bin without a physical value.
    Index(usize),
    /// Named bin (e.g. a user bin or a reaction).
    Text(String),
    /// The synthesised total bin.
    Total,
}

impl BinLabel {
    pub fn is_total(&self) -> bool {
        matches!(self, BinLabel::Total)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            BinLabel::Number(n) => Some(*n),
            BinLabel::Index(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinLabel::Number(n) => write!(f, "{n}"),
            BinLabel::Index(i) => write!(f, "{i}"),
            BinLabel::Text(s) => f.write_str(s),
            BinLabel::Total => f.write_str("total"),
        }
    }
}

impl From<f64> for BinLabel {
    fn from(n: f64) -> Self {
        BinLabel::Number(n)
    }
}

impl From<&str> for BinLabel {
    fn from(s: &str) -> Self {
        LabelRepr::Text(s.to_string()).into()
    }
}

// On-disk form: plain numbers, plain strings ("total" is reserved), or
// `{"index": n}` for ordinal bins.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Number(f64),
    Text(String),
    Index { index: usize },
}

impl From<LabelRepr> for BinLabel {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Number(n) => BinLabel::Number(n),
            LabelRepr::Index { index } => BinLabel::Index(index),
            LabelRepr::Text(s) if s.eq_ignore_ascii_case("total") => BinLabel::Total,
            LabelRepr::Text(s) => BinLabel::Text(s),
        }
    }
}

impl From<BinLabel> for LabelRepr {
    fn from(label: BinLabel) -> Self {
        match label {
            BinLabel::Number(n) => LabelRepr::Number(n),
            BinLabel::Index(index) => LabelRepr::Index { index },
            BinLabel::Text(s) => LabelRepr::Text(s),
            BinLabel::Total => LabelRepr::Text("total".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_order_matches_declaration() {
        let mut sorted = Axis::NESTING;
        sorted.sort();
        assert_eq!(sorted, Axis::NESTING);
        assert_eq!(Axis::NESTING[0], Axis::Cell);
        assert_eq!(Axis::NESTING[10], Axis::MeshA);
    }

    #[test]
    fn test_column_names() {
        assert_eq!(Axis::Energy.to_string(), "Energy");
        assert_eq!(Axis::Cell.to_string(), "Cells");
        assert_eq!(Axis::MeshC.to_string(), "Cor C");
    }

    #[test]
    fn test_label_display() {
        assert_eq!(BinLabel::Number(2.0).to_string(), "2");
        assert_eq!(BinLabel::Number(0.001).to_string(), "0.001");
        assert_eq!(BinLabel::Index(3).to_string(), "3");
        assert_eq!(BinLabel::Total.to_string(), "total");
    }

    #[test]
    fn test_label_json_forms() {
        let labels: Vec<BinLabel> =
            serde_json::from_str(r#"[1.5, "up", "total", {"index": 2}]"#).unwrap();
        assert_eq!(
            labels,
            vec![
                BinLabel::Number(1.5),
                BinLabel::Text("up".to_string()),
                BinLabel::Total,
                BinLabel::Index(2),
            ]
        );
        let back = serde_json::to_string(&labels).unwrap();
        assert_eq!(back, r#"[1.5,"up","total",{"index":2}]"#);
    }

    #[test]
    fn test_axis_json_name() {
        assert_eq!(serde_json::to_string(&Axis::MeshC).unwrap(), r#""mesh-c""#);
        let axis: Axis = serde_json::from_str(r#""energy""#).unwrap();
        assert_eq!(axis, Axis::Energy);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(BinLabel::Number(14.0).as_number(), Some(14.0));
        assert_eq!(BinLabel::Index(4).as_number(), Some(4.0));
        assert_eq!(BinLabel::Total.as_number(), None);
    }
}
