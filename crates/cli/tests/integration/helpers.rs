//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use assert_cmd::Command;

/// Anvil's default account 0 private key
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// An RPC URL nothing listens on.
pub const CLOSED_RPC_URL: &str = "http://127.0.0.1:1";

/// Create a CLI command isolated from the caller's environment.
pub fn tcdp_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tcdp").unwrap();
    cmd.env_remove("ETH_RPC_URL")
        .env_remove("PRIVATE_KEY")
        .env_remove("TCDP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a thresholds file into a fresh temporary directory.
pub fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thresholds.json");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
