//! Isolated test environment for running the Edgeship binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::WORKER_SOURCE;

/// Environment variables that must not leak in from the developer's shell
const SCRUBBED_VARS: &[&str] = &[
    "EDGESHIP_ACCOUNT_ID",
    "EDGESHIP_API_TOKEN",
    "EDGESHIP_API_BASE_URL",
    "EDGESHIP_ENV",
    "EDGESHIP_LOG",
    "EDGESHIP_LOG_FORMAT",
];

/// Result of running an Edgeship CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {l}"))
            })
            .collect()
    }
}

/// Project directory plus an empty config home
pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create project dir"),
            config_home: tempfile::tempdir().expect("Failed to create config dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_edgeship")),
        }
    }

    /// A project with `edgeship.toml` and a modules-format `src/index.js`
    pub fn with_manifest(manifest: &str) -> Self {
        let env = Self::new();
        env.write_project_file("edgeship.toml", manifest);
        env.write_project_file("src/index.js", WORKER_SOURCE);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Run edgeship from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("NO_COLOR", "1")
            .env("TERM", "dumb")
            .env("LC_ALL", "C");
        for key in SCRUBBED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute edgeship");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
