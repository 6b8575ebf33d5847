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

//! Representative raw outputs per benchmark family.

use super::builders::{scalar, spectrum, RawCaseBuilder, RawTallyBuilder};
use nvv_core::{Axis, RawCaseOutput};

/// Energy group boundaries used by the canned spectra, in MeV.
pub const ENERGIES: [f64; 4] = [0.1, 1.0, 10.0, 20.0];

/// Cooling-time bins of the activation fixtures.
pub const TIMES: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

fn scaled(base: &[f64], scale: f64) -> Vec<f64> {
    base.iter().map(|v| v * scale).collect()
}

/// MCNP sphere leakage case; every value is multiplied by `scale`.
pub fn sphere_case(scale: f64) -> RawCaseOutput {
    let mut builder = RawCaseBuilder::new()
        .tally(spectrum(
            2,
            "Neutron flux",
            &ENERGIES,
            &scaled(&[1.0, 2.0, 3.0, 4.0], scale),
            0.01,
        ))
        .tally(scalar(4, "Neutron heating F4", 8.0 * scale, 0.02))
        .tally(scalar(6, "Neutron heating F6", 10.0 * scale, 0.02))
        .tally(spectrum(
            12,
            "Neutron leakage",
            &ENERGIES,
            &scaled(&[5.0, 6.0, 7.0, 8.0], scale),
            0.01,
        ))
        .tally(scalar(14, "Neutron leakage current", 26.0 * scale, 0.01))
        .tally(spectrum(
            22,
            "Photon leakage",
            &ENERGIES,
            &scaled(&[0.5, 0.6, 0.7, 0.8], scale),
            0.03,
        ))
        .tally(scalar(24, "Neutron dose", 3.0 * scale, 0.02))
        .tally(spectrum(
            32,
            "Photon flux",
            &ENERGIES,
            &scaled(&[0.1, 0.2, 0.3, 0.4], scale),
            0.03,
        ))
        .tally(scalar(34, "Photon dose", 0.3 * scale, 0.04))
        .tally(scalar(44, "Photon heating F4", 4.0 * scale, 0.05))
        .tally(scalar(46, "Photon heating F6", 5.0 * scale, 0.05));
    for (description, tally) in [("Neutron leakage", 12), ("Photon leakage", 22)] {
        builder = builder.stat_check(description, tally, "Passed");
    }
    builder.build()
}

/// OpenMC sphere leakage case.
pub fn sphere_openmc_case(scale: f64) -> RawCaseOutput {
    RawCaseBuilder::new()
        .tally(spectrum(
            4,
            "Neutron leakage",
            &ENERGIES,
            &scaled(&[5.0, 6.0, 7.0, 8.0], scale),
            0.01,
        ))
        .tally(spectrum(
            14,
            "Photon leakage",
            &ENERGIES,
            &scaled(&[0.5, 0.6, 0.7, 0.8], scale),
            0.03,
        ))
        .build()
}

/// Shutdown dose-rate case with time-binned photon flux, dose and heating.
pub fn sddr_case(scale: f64) -> RawCaseOutput {
    let time_values = |base: f64| -> Vec<(f64, f64)> {
        TIMES.iter().map(|t| (base * scale / t, 0.05)).collect()
    };
    let time_total = |base: f64| -> (f64, f64) {
        (TIMES.iter().map(|t| base * scale / t).sum(), 0.02)
    };

    let flux_total = time_total(1.0).0 + time_total(2.0).0;
    let photon_flux = RawTallyBuilder::new(32)
        .description("Photon flux")
        .axis(Axis::Energy, [1.0, 10.0])
        .axis(Axis::Time, TIMES)
        .values(
            [1.0, 2.0]
                .iter()
                .flat_map(|e| TIMES.iter().map(move |t| (e * scale / t, 0.05))),
        )
        .total(Axis::Time, [(flux_total, 0.02)])
        .build();
    let dose = RawTallyBuilder::new(104)
        .description("Shutdown dose rate")
        .axis(Axis::Time, TIMES)
        .values(time_values(6.0))
        .total(Axis::Time, [time_total(6.0)])
        .build();
    let heating = RawTallyBuilder::new(46)
        .description("Decay heating")
        .axis(Axis::Time, TIMES)
        .values(time_values(0.6))
        .build();

    RawCaseBuilder::new()
        .tally(spectrum(
            12,
            "Neutron flux",
            &ENERGIES,
            &scaled(&[1.0, 2.0, 3.0, 4.0], scale),
            0.01,
        ))
        .tally(photon_flux)
        .tally(dose)
        .tally(heating)
        .stat_check("Shutdown dose rate", 104, "Passed")
        .build()
}

/// Experimental spectrum case with neutron and photon spectra.
pub fn spectral_case(scale: f64) -> RawCaseOutput {
    RawCaseBuilder::new()
        .tally(spectrum(
            21,
            "Neutron spectrum",
            &ENERGIES,
            &scaled(&[4.0, 3.0, 2.0, 1.0], scale),
            0.02,
        ))
        .tally(spectrum(
            41,
            "Photon spectrum",
            &ENERGIES,
            &scaled(&[0.4, 0.3, 0.2, 0.1], scale),
            0.04,
        ))
        .build()
}
