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

//! Post-processing configuration.
//!
//! Built-in defaults cover every known benchmark family. A JSON file may
//! override the thresholds, the report cut width, or individual families:
//!
//! ```json
//! {
//!   "thresholds": [0.0, 0.02, 0.1],
//!   "families": {
//!     "Sphere": {
//!       "kind": "sphere",
//!       "codes": { "mcnp": { "single": [4], "integral": [4] } }
//!     }
//!   }
//! }
//! ```

use crate::case::CaseKeyShape;
use crate::compare::BucketThresholds;
use crate::error::{NvvError, NvvResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Transport code that produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Code {
    Mcnp,
    Openmc,
    Serpent,
    D1s,
}

impl Code {
    pub const ALL: [Code; 4] = [Code::Mcnp, Code::Openmc, Code::Serpent, Code::D1s];

    pub fn as_str(self) -> &'static str {
        match self {
            Code::Mcnp => "mcnp",
            Code::Openmc => "openmc",
            Code::Serpent => "serpent",
            Code::D1s => "d1s",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Code {
    type Err = NvvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Code::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NvvError::config(format!("unknown transport code '{s}'")))
    }
}

/// Reduction strategy a family uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FamilyKind {
    Sphere,
    Activation,
    Spectral,
    Generic,
}

/// A time-binned tally reduced per time bin, columns named `<prefix><time>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub tally: u32,
    pub prefix: String,
}

/// Two estimators of the same quantity; the derived column is
/// `(reference - alternate) / reference`, 0 when the reference is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorPair {
    pub label: String,
    pub reference: u32,
    pub alternate: u32,
}

/// Tallies of interest for one transport code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeTallies {
    /// Tallies summarised in the single-library report.
    pub single: Vec<u32>,
    /// Energy-binned tallies; one comparison column per energy bin.
    pub binned: Vec<u32>,
    /// Integral tallies; one comparison column each.
    pub integral: Vec<u32>,
    pub time_series: Vec<TimeSeries>,
    pub estimators: Vec<EstimatorPair>,
}

impl CodeTallies {
    /// Whether any extraction role mentions `tally`.
    pub fn mentions(&self, tally: u32) -> bool {
        self.single.contains(&tally)
            || self.binned.contains(&tally)
            || self.integral.contains(&tally)
            || self.time_series.iter().any(|t| t.tally == tally)
            || self
                .estimators
                .iter()
                .any(|e| e.reference == tally || e.alternate == tally)
    }
}

/// Settings of one benchmark family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySettings {
    pub kind: FamilyKind,
    #[serde(default)]
    pub shape: CaseKeyShape,
    #[serde(default)]
    pub codes: BTreeMap<Code, CodeTallies>,
}

impl FamilySettings {
    pub fn new(kind: FamilyKind, shape: CaseKeyShape) -> Self {
        Self {
            kind,
            shape,
            codes: BTreeMap::new(),
        }
    }

    pub fn with_code(mut self, code: Code, tallies: CodeTallies) -> Self {
        self.codes.insert(code, tallies);
        self
    }
}

/// Spectral-shape families; comparison only.
pub const SPECTRAL_FAMILIES: [&str; 12] = [
    "Oktavian",
    "Tiara-BC",
    "FNS-TOF",
    "TUD-Fe",
    "TUD-W",
    "TUD-FNG",
    "Tiara-FC",
    "Tiara-BS",
    "FNG-BKT",
    "FNG-W",
    "ASPIS-Fe88",
    "FNG",
];

/// Complete post-processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostProcessConfig {
    /// Ascending relative-difference bucket boundaries.
    pub thresholds: Vec<f64>,
    /// Maximum data columns per report section before splitting.
    pub cut_width: usize,
    pub families: BTreeMap<String, FamilySettings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    thresholds: Option<Vec<f64>>,
    cut_width: Option<usize>,
    #[serde(default)]
    families: BTreeMap<String, FamilySettings>,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        let mut families = BTreeMap::new();
        families.insert("Sphere".to_string(), sphere_defaults());
        families.insert("SphereSDDR".to_string(), sddr_defaults());
        for name in SPECTRAL_FAMILIES {
            let spectral = FamilySettings::new(FamilyKind::Spectral, CaseKeyShape::Plain)
                .with_code(Code::Mcnp, CodeTallies::default())
                .with_code(Code::Openmc, CodeTallies::default());
            families.insert(name.to_string(), spectral);
        }

        Self {
            thresholds: vec![0.0, 0.05, 0.1, 0.2],
            cut_width: 20,
            families,
        }
    }
}

fn sphere_defaults() -> FamilySettings {
    let mcnp = CodeTallies {
        single: vec![2, 4, 6, 12, 14, 24, 34, 22, 32, 44, 46],
        binned: vec![12, 22],
        integral: vec![24, 14, 34, 6, 46],
        time_series: Vec::new(),
        estimators: vec![
            EstimatorPair {
                label: "Neutron Heating comparison [F4 vs F6]".to_string(),
                reference: 6,
                alternate: 4,
            },
            EstimatorPair {
                label: "Gamma Heating comparison [F4 vs F6]".to_string(),
                reference: 46,
                alternate: 44,
            },
        ],
    };
    let openmc = CodeTallies {
        single: vec![4, 14],
        binned: vec![4, 14],
        ..Default::default()
    };
    FamilySettings::new(FamilyKind::Sphere, CaseKeyShape::Plain)
        .with_code(Code::Mcnp, mcnp)
        .with_code(Code::Openmc, openmc)
}

fn sddr_defaults() -> FamilySettings {
    let d1s = CodeTallies {
        single: vec![12, 32, 104, 46],
        binned: vec![12],
        integral: Vec::new(),
        time_series: [(32, "F"), (104, "D"), (46, "H")]
            .into_iter()
            .map(|(tally, prefix)| TimeSeries {
                tally,
                prefix: prefix.to_string(),
            })
            .collect(),
        estimators: Vec::new(),
    };
    FamilySettings::new(FamilyKind::Activation, CaseKeyShape::ReactionTriple)
        .with_code(Code::D1s, d1s.clone())
        .with_code(Code::Mcnp, d1s)
}

impl PostProcessConfig {
    /// Parse a JSON override document and apply it on top of the defaults.
    pub fn from_json_str(text: &str) -> NvvResult<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(text)
            .map_err(|e| NvvError::config(e.to_string()))?;
        let mut config = Self::default();
        if let Some(thresholds) = overrides.thresholds {
            config.thresholds = thresholds;
        }
        if let Some(cut_width) = overrides.cut_width {
            config.cut_width = cut_width;
        }
        config.families.extend(overrides.families);
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from a JSON file.
    pub fn from_path(path: &Path) -> NvvResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| NvvError::from(e).with_context(path.display().to_string()))?;
        Self::from_json_str(&text).map_err(|e| e.with_context(path.display().to_string()))
    }

    pub fn validate(&self) -> NvvResult<()> {
        BucketThresholds::new(self.thresholds.clone())?;
        if self.cut_width == 0 {
            return Err(NvvError::config("cut_width must be at least 1"));
        }
        Ok(())
    }

    pub fn bucket_thresholds(&self) -> NvvResult<BucketThresholds> {
        BucketThresholds::new(self.thresholds.clone())
    }

    pub fn family(&self, name: &str) -> Option<&FamilySettings> {
        self.families.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NvvErrorKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = PostProcessConfig::default();
        config.validate().unwrap();
        assert_eq!(config.thresholds, vec![0.0, 0.05, 0.1, 0.2]);
        assert_eq!(config.family("Sphere").unwrap().kind, FamilyKind::Sphere);
        assert_eq!(
            config.family("SphereSDDR").unwrap().shape,
            CaseKeyShape::ReactionTriple
        );
        assert_eq!(config.family("Oktavian").unwrap().kind, FamilyKind::Spectral);
        assert!(config.family("Unknown").is_none());
    }

    #[test]
    fn test_sphere_mcnp_defaults() {
        let config = PostProcessConfig::default();
        let mcnp = &config.family("Sphere").unwrap().codes[&Code::Mcnp];
        assert_eq!(mcnp.single.len(), 11);
        assert_eq!(mcnp.binned, vec![12, 22]);
        assert_eq!(mcnp.estimators[0].reference, 6);
        assert!(mcnp.mentions(44));
        assert!(!mcnp.mentions(999));
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let text = r#"{
            "cut_width": 5,
            "families": {"Custom": {"kind": "generic", "codes": {"mcnp": {"single": [4]}}}}
        }"#;
        let config = PostProcessConfig::from_json_str(text).unwrap();
        assert_eq!(config.cut_width, 5);
        assert_eq!(config.thresholds, vec![0.0, 0.05, 0.1, 0.2]);
        assert!(config.family("Sphere").is_some());
        let custom = config.family("Custom").unwrap();
        assert_eq!(custom.kind, FamilyKind::Generic);
        assert_eq!(custom.shape, CaseKeyShape::Plain);
        assert_eq!(custom.codes[&Code::Mcnp].single, vec![4]);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let err = PostProcessConfig::from_json_str(r#"{"thresholds": [0.1, 0.05]}"#).unwrap_err();
        assert_eq!(err.kind, NvvErrorKind::Config);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PostProcessConfig::from_json_str(r#"{"treshold": [0.0]}"#).unwrap_err();
        assert_eq!(err.kind, NvvErrorKind::Config);
    }

    #[test]
    fn test_zero_cut_width_rejected() {
        assert!(PostProcessConfig::from_json_str(r#"{"cut_width": 0}"#).is_err());
    }

    #[test]
    fn test_code_from_str() {
        assert_eq!("MCNP".parse::<Code>().unwrap(), Code::Mcnp);
        assert_eq!("d1s".parse::<Code>().unwrap(), Code::D1s);
        assert!("geant".parse::<Code>().is_err());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = PostProcessConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let back: PostProcessConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
