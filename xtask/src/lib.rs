use anyhow::{bail, Context, Result};
use std::env;
use std::process::{Command, ExitStatus};

/// Cargo features and demo selection derived from the host machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    pub example: String,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }
}

/// Detect build configuration from the current machine and `KDCT_FEATURES`.
pub fn detect_config() -> BuildConfig {
    let extra = env::var("KDCT_FEATURES").unwrap_or_default();
    compute_config(detect_nproc(), &extra)
}

fn detect_nproc() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(nproc: usize, extra: &str) -> BuildConfig {
    let mut features: Vec<String> = Vec::new();
    if nproc > 1 {
        features.push("parallel".into());
    }
    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }

    let example = if features.iter().any(|f| f == "parallel") {
        "parallel_batch".to_string()
    } else {
        "dct_usage".to_string()
    };

    BuildConfig { features, example }
}

fn with_features(mut cmd: Command, cfg: &BuildConfig) -> Command {
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
    cmd
}

fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    with_features(cargo(&["build"]), cfg)
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    with_features(cargo(&["test"]), cfg)
}

pub fn clippy_command() -> Command {
    cargo(&["clippy", "--all-targets", "--all-features"])
}

pub fn fmt_command() -> Command {
    cargo(&["fmt", "--all"])
}

pub fn demo_command(cfg: &BuildConfig) -> Command {
    with_features(cargo(&["run", "--example", &cfg.example, "--release"]), cfg)
}

/// Criterion benches live in their own workspace member and forward the
/// `parallel` feature only.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo(&["bench", "--manifest-path", "kdct-bench/Cargo.toml"]);
    if cfg.features.iter().any(|f| f == "parallel") {
        cmd.args(["--features", "parallel"]);
    }
    cmd
}

/// Run `cmd`, failing with its rendered command line if it exits non-zero.
pub fn run(mut cmd: Command) -> Result<ExitStatus> {
    let line = format!("{:?}", cmd);
    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn {}", line))?;
    if !status.success() {
        bail!("{} exited with {}", line, status);
    }
    Ok(status)
}
