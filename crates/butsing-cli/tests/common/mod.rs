//! Shared E2E test helpers for `butsing` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables read by the config loader.
const BUTSING_ENV_VARS: &[&str] = &[
    "BUTSING_DEBUG",
    "BUTSING_APP_NAME",
    "BUTSING_COMPOSERY_HOME",
    "BUTSING_LOG_LEVEL",
    "BUTSING_PLUGINS",
    "RUST_LOG",
];

/// Build a Command for the `butsing` binary rooted in a fresh project dir.
///
/// The caller's `BUTSING_*` environment is cleared so results depend only
/// on the files the test writes. Returns (command, _guard); keep the guard
/// alive for the test's duration.
pub fn butsing_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp project dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("butsing");
    cmd.timeout(TIMEOUT_BASIC);
    for var in BUTSING_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.args(["-C", tmp.path().to_str().expect("valid utf8")]);
    (cmd, tmp)
}

/// Writes `<root>/.butsing/config.toml`.
pub fn write_project_config(root: &Path, content: &str) {
    let dir = root.join(".butsing");
    std::fs::create_dir_all(&dir).expect("create .butsing dir");
    std::fs::write(dir.join("config.toml"), content).expect("write config");
}
