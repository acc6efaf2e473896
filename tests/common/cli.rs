use assert_cmd::Command;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tempfile::TempDir;

#[derive(Debug)]
pub struct PerfRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl PerfRun {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse the structured error document printed to stderr.
    pub fn error_json(&self) -> Value {
        let start = self
            .stderr
            .find("{\n  \"error\"")
            .unwrap_or_else(|| panic!("no structured error in stderr: {}", self.stderr));
        serde_json::from_str(&self.stderr[start..])
            .unwrap_or_else(|e| panic!("stderr error is not JSON ({e}): {}", self.stderr))
    }

    /// Parse stdout as a single JSON document.
    pub fn json(&self) -> Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

/// A temporary working directory with a `benchmark/` input directory.
pub struct PerfWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub bench_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PerfWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let bench_dir = root.join("benchmark");
        let log_dir = root.join("logs");
        fs::create_dir_all(&bench_dir).expect("bench dir");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            bench_dir,
            log_dir,
        }
    }

    /// Write `<name>.json` into the benchmark directory.
    pub fn write_bench(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bench_dir.join(format!("{name}.json"));
        fs::write(&path, body).expect("write benchmark file");
        path
    }

    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    pub fn read_json(&self, rel: impl AsRef<Path>) -> Value {
        let text = fs::read_to_string(self.path(rel)).expect("read output");
        serde_json::from_str(&text).expect("parse output json")
    }
}

pub fn run_perf<I, S>(workspace: &PerfWorkspace, args: I, label: &str) -> PerfRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_perf_with_env(
        workspace,
        args,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_perf_with_env<I, S, E, K, V>(
    workspace: &PerfWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> PerfRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("perfbase"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env_remove("PERFBASE_DIR");
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "perfbase=debug");
    cmd.env("HOME", &workspace.root);
    cmd.envs(env_vars);

    let start = Instant::now();
    let output = cmd.output().expect("run perfbase");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let log_body = format!(
        "label: {label}\nstarted: {:?}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        SystemTime::now(),
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    PerfRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}
