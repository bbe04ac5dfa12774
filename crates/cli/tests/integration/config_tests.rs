//! Threshold configuration and deployment selection tests.

use predicates::prelude::*;

use super::helpers::{tcdp_cmd, write_config, CLOSED_RPC_URL};

#[test]
fn test_missing_config_file() {
    tcdp_cmd()
        .args([
            "--config",
            "/nonexistent/thresholds.json",
            "status",
            "--rpc-url",
            CLOSED_RPC_URL,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_malformed_config_file() {
    let (_dir, path) = write_config("{ not json");
    tcdp_cmd()
        .arg("--config")
        .arg(&path)
        .args(["status", "--rpc-url", CLOSED_RPC_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_unordered_ratio_band_is_rejected() {
    // lower (3.0) above ideal (2.5)
    let (_dir, path) = write_config(r#"{"lowerRatio":"0x29a2241af62c0000"}"#);
    tcdp_cmd()
        .arg("--config")
        .arg(&path)
        .args(["status", "--rpc-url", CLOSED_RPC_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lower < ideal < upper"));
}

#[test]
fn test_config_from_environment() {
    let (_dir, path) = write_config("{ not json");
    tcdp_cmd()
        .env("TCDP_CONFIG", &path)
        .args(["status", "--rpc-url", CLOSED_RPC_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_chain_without_deployment() {
    tcdp_cmd()
        .args(["status", "--rpc-url", CLOSED_RPC_URL, "--chain", "kovan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tCDP deployment for Kovan"));
}

#[test]
fn test_invalid_address_override() {
    tcdp_cmd()
        .env("TCDP_ADDRESS_4_TCDP", "0xnot-an-address")
        .args(["status", "--rpc-url", CLOSED_RPC_URL, "--chain", "rinkeby"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid address"));
}
