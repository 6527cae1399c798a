//! Shared fixtures: a CLI builder with fluent assertions and a fake cluster.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

/// Builder for one `kubectl-x` invocation.
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

/// `kubectl-x` with no cluster: colors off and no config file.
pub fn cli() -> CliBuilder {
    CliBuilder { args: Vec::new(), envs: Vec::new() }
        .env("NO_COLOR", "1")
        .env("KX_CONFIG", "/nonexistent/kubectl-x/config.toml")
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.envs.push((key.to_string(), value.into()));
        self
    }

    fn run(self) -> RunAssert {
        let mut cmd = assert_cmd::Command::cargo_bin("kubectl-x").expect("kubectl-x binary is built");
        cmd.env_remove("KUBECONFIG")
            .env_remove("KX_BATCH_SIZE")
            .env_remove("KX_KUBECTL")
            .env_remove("KX_LOG")
            .env_remove("COLOR")
            .args(&self.args)
            .timeout(std::time::Duration::from_secs(30));
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("kubectl-x runs");
        RunAssert {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and assert exit code 0.
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert_eq!(run.code, Some(0), "expected success\n{run}");
        run
    }

    /// Run and assert a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert_ne!(run.code, Some(0), "expected failure\n{run}");
        run
    }
}

/// Captured result of one invocation.
pub struct RunAssert {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl std::fmt::Display for RunAssert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit: {:?}\n--- stdout ---\n{}--- stderr ---\n{}", self.code, self.stdout, self.stderr)
    }
}

impl RunAssert {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn code_eq(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "unexpected exit code\n{self}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}\n{self}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}\n{self}");
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(!self.stderr.contains(needle), "stderr has {needle:?}\n{self}");
        self
    }
}

/// A kubeconfig plus a scripted kubectl, both in a temp directory.
///
/// The script sees `$ctx` (the context name), `$sub` (the subcommand),
/// and the forwarded arguments as `$@`.
pub struct Cluster {
    dir: TempDir,
}

impl Cluster {
    pub fn with_contexts(names: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let contexts: String = names
            .iter()
            .map(|n| format!("- name: {n}\n  context:\n    cluster: {n}\n    user: {n}\n"))
            .collect();
        let body = if names.is_empty() {
            "apiVersion: v1\nkind: Config\ncontexts: []\n".to_string()
        } else {
            format!("apiVersion: v1\nkind: Config\ncontexts:\n{contexts}")
        };
        fs::write(dir.path().join("kubeconfig"), body).expect("write kubeconfig");
        let cluster = Self { dir };
        cluster.kubectl("exit 0");
        cluster
    }

    /// Replace the fake kubectl's behavior with a shell snippet.
    pub fn kubectl(&self, body: &str) -> &Self {
        let path = self.kubectl_path();
        let script = format!("#!/bin/sh\nctx=\"$2\"\nsub=\"$3\"\nshift 3\n{body}\n");
        fs::write(&path, script).expect("write fake kubectl");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake kubectl");
        self
    }

    /// Write a TOML config file and return its path.
    pub fn config(&self, toml: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        fs::write(&path, toml).expect("write config");
        path
    }

    pub fn kubectl_path(&self) -> PathBuf {
        self.dir.path().join("kubectl")
    }

    pub fn kubeconfig_path(&self) -> PathBuf {
        self.dir.path().join("kubeconfig")
    }

    /// `kubectl-x` pointed at this cluster.
    pub fn kx(&self) -> CliBuilder {
        cli()
            .env("KUBECONFIG", self.kubeconfig_path().display().to_string())
            .env("KX_KUBECTL", self.kubectl_path().display().to_string())
    }
}
