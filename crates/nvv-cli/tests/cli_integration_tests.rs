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

//! CLI integration tests against on-disk run trees.

use assert_cmd::Command;
use nvv_core::Code;
use nvv_test::fixtures;
use nvv_test::TempRunTree;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn nvv_cmd() -> Command {
    Command::cargo_bin("nvv").expect("Failed to find nvv binary")
}

fn run_tree() -> TempRunTree {
    let tree = TempRunTree::new().expect("temp run tree");
    for (lib, scale) in [("31c", 1.0), ("32c", 1.1)] {
        tree.add_case(lib, "Sphere", "Sphere_1001_H-1", Code::Mcnp, &fixtures::sphere_case(scale))
            .unwrap();
        tree.add_case(lib, "Sphere", "Sphere_M10", Code::Mcnp, &fixtures::sphere_case(scale))
            .unwrap();
        tree.add_case(lib, "Oktavian", "Oktavian_Al", Code::Mcnp, &fixtures::spectral_case(scale))
            .unwrap();
    }
    tree.add_materials(&[("M10", "Concrete")]).unwrap();
    tree
}

fn run_args(cmd: &mut Command, tree: &TempRunTree, out: &Path) {
    cmd.arg("--runs").arg(tree.path()).arg("--out").arg(out);
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    nvv_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("single"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("families"));
}

#[test]
fn test_version_output() {
    nvv_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nvv"));
}

// ===== Families =====

#[test]
fn test_families_listing() {
    nvv_cmd()
        .arg("families")
        .assert()
        .success()
        .stdout(predicate::str::contains("SphereSDDR"))
        .stdout(predicate::str::contains("Oktavian"))
        .stdout(predicate::str::contains("generic reduction"));
}

#[test]
fn test_families_json() {
    let output = nvv_cmd().args(["families", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cut_width"], 20);
    assert!(json["families"]["Sphere"].is_object());
}

#[test]
fn test_families_with_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nvv.json");
    fs::write(&config, r#"{"thresholds": [0.1, 0.05]}"#).unwrap();
    nvv_cmd()
        .arg("families")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

// ===== Single =====

#[test]
fn test_single_writes_report_and_raw_data() {
    let tree = run_tree();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = nvv_cmd();
    cmd.args(["single", "--library", "31c", "--benchmark", "Sphere"]);
    run_args(&mut cmd, &tree, out.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sphere [mcnp]: 2 cases"));

    let job = out.path().join("Single_Libraries/31c/Sphere/mcnp");
    let values = fs::read_to_string(job.join("Report/Sphere_31c_mcnp_Values.csv")).unwrap();
    assert!(values.contains("M10,Concrete,"));
    assert!(job.join("Raw_Data/metadata.json").exists());
    assert!(job.join("Raw_Data/1001/1001_12.csv").exists());
}

#[test]
fn test_single_spectral_family_is_a_notice() {
    let tree = run_tree();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = nvv_cmd();
    cmd.args(["single", "--library", "31c", "--benchmark", "Oktavian"]);
    run_args(&mut cmd, &tree, out.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "No single-library post-processing is foreseen for Oktavian",
        ));

    assert!(!out.path().join("Single_Libraries/31c/Oktavian").exists());
}

#[test]
fn test_failing_job_does_not_stop_others() {
    let tree = run_tree();
    let out = tempfile::tempdir().unwrap();

    // ITER-1D has no output for 31c; Sphere still runs.
    let mut cmd = nvv_cmd();
    cmd.args(["single", "--library", "31c", "--benchmark", "ITER-1D", "Sphere", "--code", "mcnp"]);
    run_args(&mut cmd, &tree, out.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 benchmark jobs failed"));

    assert!(out
        .path()
        .join("Single_Libraries/31c/Sphere/mcnp/Report/Sphere_31c_mcnp_Values.csv")
        .exists());
}

#[test]
fn test_missing_run_tree() {
    let out = tempfile::tempdir().unwrap();
    nvv_cmd()
        .args(["single", "--library", "31c", "--benchmark", "Sphere", "--runs"])
        .arg(out.path().join("nowhere"))
        .arg("--out")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input"));
}

// ===== Compare =====

#[test]
fn test_compare_two_libraries() {
    let tree = run_tree();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = nvv_cmd();
    cmd.args([
        "compare",
        "--library",
        "31c",
        "32c",
        "--benchmark",
        "Sphere",
        "Oktavian",
        "--parallel",
    ]);
    run_args(&mut cmd, &tree, out.path());
    cmd.assert().success();

    let pair = out.path().join("Comparisons/31c_Vs_32c");
    let relative = pair.join("Sphere/mcnp/Report/Sphere_31c_Vs_32c_mcnp_Comparison_pct.csv");
    assert!(fs::read_to_string(relative).unwrap().contains("-10.00%"));
    for library in ["31c", "32c"] {
        for kind in ["Values", "Errors"] {
            let sheet = format!("Sphere/mcnp/Report/Sphere_31c_Vs_32c_mcnp_{library}_{kind}.csv");
            assert!(pair.join(&sheet).exists(), "missing {sheet}");
        }
    }
    assert!(pair
        .join("Oktavian/mcnp/Report/Oktavian_31c_Vs_32c_mcnp_Summary.csv")
        .exists());
}

#[test]
fn test_compare_needs_two_libraries() {
    let tree = run_tree();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = nvv_cmd();
    cmd.args(["compare", "--library", "31c", "--benchmark", "Sphere"]);
    run_args(&mut cmd, &tree, out.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("at least two libraries"));
}

#[test]
fn test_unknown_code_rejected() {
    nvv_cmd()
        .args([
            "single",
            "--library",
            "31c",
            "--benchmark",
            "Sphere",
            "--runs",
            ".",
            "--code",
            "geant",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("geant"));
}
