mod common;

use common::TestEnv;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::{Value, json};

#[test]
fn missing_path_exits_one_without_output_file() {
    let env = TestEnv::new();
    env.cmd()
        .assert()
        .code(1)
        .stderr(contains("no path was given or path is invalid"));
    assert!(!env.output_file().exists());
}

#[test]
fn missing_path_plain_error_for_table_output() {
    let env = TestEnv::new();
    env.cmd()
        .args(["summary", "--output", "table"])
        .assert()
        .code(1)
        .stderr(contains("Error: no path was given or path is invalid"));
}

#[test]
fn runs_skips_subjects_without_sessions() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_T1w.nii.gz")
        .touch("sub-02/anat/sub-02_T1w.nii.gz");

    env.cmd().arg(&env.dataset).assert().success();

    assert_eq!(
        env.read_output_file(),
        json!([{"subject": "01", "session": "pre", "runs": [null]}])
    );
}

#[test]
fn runs_lists_matching_run_ids() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-1_part-mag_T2w.nii.gz")
        .touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-2_part-mag_T2w.nii.gz")
        .touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-3_part-phase_T2w.nii.gz")
        .touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-4_part-mag_T2w.json");

    env.cmd().arg("runs").arg(&env.dataset).assert().success();

    let out = env.read_output_file();
    assert_eq!(out[0]["runs"], json!([1, 2]));
}

#[test]
fn runs_file_is_indented_with_four_spaces() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_T1w.nii.gz");

    env.cmd().arg(&env.dataset).assert().success();

    let text = std::fs::read_to_string(env.output_file()).unwrap();
    assert!(text.starts_with("[\n    {\n        \"subject\": \"01\""));
}

#[test]
fn runs_rerun_overwrites_output_file() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-1_part-mag_T2w.nii.gz");

    env.cmd().arg(&env.dataset).assert().success();
    let first = std::fs::read_to_string(env.output_file()).unwrap();
    env.cmd().arg(&env.dataset).assert().success();
    let second = std::fs::read_to_string(env.output_file()).unwrap();

    assert_eq!(first, second);
    let parsed: Value = serde_json::from_str(&second).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn runs_custom_filter_to_stdout() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-1_T1w.nii.gz");

    let assert = env
        .cmd()
        .arg("runs")
        .arg(&env.dataset)
        .args(["--suffix", "T1w", "--part", "mag", "--stdout", "--output", "ndjson"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let line: Value = serde_json::from_str(stdout.trim()).unwrap();
    // The fixture file has no part entity, so nothing matches.
    assert_eq!(line["runs"], json!([null]));
    assert!(!env.output_file().exists());
}

#[test]
fn summary_prints_single_line_json() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_T1w.nii.gz")
        .touch("sub-01/ses-post/anat/sub-01_ses-post_T1w.nii.gz");

    env.cmd()
        .arg("summary")
        .arg(&env.dataset)
        .assert()
        .success()
        .stdout("{\"subjects\": [\"01\"], \"sessions\": [\"post\", \"pre\"]}\n");
    assert!(!env.output_file().exists());
}

#[test]
fn scans_lists_files_per_run() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-1_part-mag_T2w.nii.gz")
        .touch("sub-01/ses-post/anat/sub-01_ses-post_T1w.nii.gz");

    let assert = env.cmd().arg("scans").arg(&env.dataset).assert().success();
    let out: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        out,
        json!([
            {"subject": "01", "session": "post", "run": null, "files": []},
            {
                "subject": "01",
                "session": "pre",
                "run": 1,
                "files": ["sub-01/ses-pre/anat/sub-01_ses-pre_run-1_part-mag_T2w.nii.gz"]
            }
        ])
    );
}

#[test]
fn scans_keeps_files_without_run_entity() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_part-mag_T2w.nii.gz");

    let assert = env.cmd().arg("scans").arg(&env.dataset).assert().success();
    let out: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        out,
        json!([{
            "subject": "01",
            "session": "pre",
            "run": null,
            "files": ["sub-01/ses-pre/anat/sub-01_ses-pre_part-mag_T2w.nii.gz"]
        }])
    );
}

#[test]
fn scans_lists_unnumbered_files_beside_runs() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_part-mag_T2w.nii.gz")
        .touch("sub-01/ses-pre/anat/sub-01_ses-pre_run-1_part-mag_T2w.nii.gz");

    let assert = env.cmd().arg("scans").arg(&env.dataset).assert().success();
    let out: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        out,
        json!([
            {
                "subject": "01",
                "session": "pre",
                "run": null,
                "files": ["sub-01/ses-pre/anat/sub-01_ses-pre_part-mag_T2w.nii.gz"]
            },
            {
                "subject": "01",
                "session": "pre",
                "run": 1,
                "files": ["sub-01/ses-pre/anat/sub-01_ses-pre_run-1_part-mag_T2w.nii.gz"]
            }
        ])
    );
}

#[test]
fn summary_id_output_uses_bare_labels() {
    let env = TestEnv::new();
    env.touch("sub-01/ses-pre/anat/sub-01_ses-pre_T1w.nii.gz")
        .touch("sub-02/ses-post/anat/sub-02_ses-post_T1w.nii.gz");

    env.cmd()
        .args(["summary", "--output", "id"])
        .arg(&env.dataset)
        .assert()
        .success()
        .stdout("01\t02\npost\tpre\n");
}

#[test]
fn missing_description_exits_two_unless_disabled() {
    let env = TestEnv::new();
    std::fs::remove_file(env.dataset.join("dataset_description.json")).unwrap();
    env.touch("sub-01/anat/sub-01_T1w.nii.gz");

    env.cmd()
        .arg("summary")
        .arg(&env.dataset)
        .assert()
        .code(2)
        .stderr(contains("missing_description"));

    env.cmd()
        .arg("summary")
        .arg(&env.dataset)
        .arg("--no-validate")
        .assert()
        .success()
        .stdout("{\"subjects\": [\"01\"], \"sessions\": []}\n");
}

#[test]
fn nonexistent_dataset_exits_two() {
    let env = TestEnv::new();
    env.cmd()
        .arg(env.dataset.join("missing"))
        .assert()
        .code(2)
        .stderr(contains("does not exist"));
    assert!(!env.output_file().exists());
}

#[test]
fn derivatives_are_not_indexed() {
    let env = TestEnv::new();
    env.touch("sub-01/anat/sub-01_T1w.nii.gz")
        .touch("derivatives/pipeline/sub-99/anat/sub-99_T1w.nii.gz");

    env.cmd()
        .arg("summary")
        .arg(&env.dataset)
        .assert()
        .success()
        .stdout(contains("\"01\"").and(contains("99").not()));
}
