use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch working directory plus a BIDS dataset built inside it.
pub struct TestEnv {
    _tmp: TempDir,
    pub cwd: PathBuf,
    pub dataset: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let cwd = tmp.path().join("work");
        fs::create_dir_all(&cwd).expect("create work dir");
        let dataset = tmp.path().join("ds");
        fs::create_dir_all(&dataset).expect("create dataset root");
        fs::write(
            dataset.join("dataset_description.json"),
            r#"{"Name": "fixture", "BIDSVersion": "1.9.0"}"#,
        )
        .expect("write description");

        Self {
            _tmp: tmp,
            cwd,
            dataset,
        }
    }

    /// Create an empty file inside the dataset.
    pub fn touch(&self, relative: &str) -> &Self {
        let path = self.dataset.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, b"").expect("write file");
        self
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bidsq").expect("binary built");
        cmd.current_dir(&self.cwd);
        cmd
    }

    pub fn output_file(&self) -> PathBuf {
        self.cwd.join("sub_ses_run_description.json")
    }

    pub fn read_output_file(&self) -> Value {
        read_json(&self.output_file())
    }
}

pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read json file");
    serde_json::from_str(&text).expect("parse json")
}
