//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages without requiring network access.

use predicates::prelude::*;

use super::helpers::{tcdp_cmd, CLOSED_RPC_URL, TEST_PRIVATE_KEY};

#[test]
fn test_help_output() {
    tcdp_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tcdp"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("deposit"))
        .stdout(predicate::str::contains("withdraw"))
        .stdout(predicate::str::contains("approve"))
        .stdout(predicate::str::contains("rebalance"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_deposit_help() {
    tcdp_cmd()
        .args(["deposit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AMOUNT"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--rpc-url"))
        .stdout(predicate::str::contains("--chain"));
}

#[test]
fn test_status_help() {
    tcdp_cmd()
        .args(["status", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--account"))
        .stdout(predicate::str::contains("--private-key").not());
}

#[test]
fn test_invalid_command() {
    tcdp_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_deposit_missing_amount() {
    tcdp_cmd()
        .args(["deposit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_status_missing_rpc_url() {
    tcdp_cmd()
        .args(["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rpc-url"));
}

#[test]
fn test_deposit_missing_private_key() {
    tcdp_cmd()
        .args(["deposit", "1", "--rpc-url", CLOSED_RPC_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--private-key"));
}

#[test]
fn test_invalid_chain_value() {
    tcdp_cmd()
        .args(["status", "--rpc-url", CLOSED_RPC_URL, "--chain", "polygon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported chain"));
}

#[test]
fn test_invalid_output_format() {
    tcdp_cmd()
        .args(["status", "--format", "invalid_format", "--rpc-url", CLOSED_RPC_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_private_key() {
    tcdp_cmd()
        .args([
            "rebalance",
            "--rpc-url",
            CLOSED_RPC_URL,
            "--private-key",
            "not-a-key",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid private key"));
}

#[test]
fn test_invalid_rpc_url() {
    tcdp_cmd()
        .args([
            "migrate",
            "--rpc-url",
            "not a url",
            "--private-key",
            TEST_PRIVATE_KEY,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RPC connection failed"));
}

#[test]
fn test_invalid_account_address() {
    tcdp_cmd()
        .args(["status", "--rpc-url", CLOSED_RPC_URL, "--account", "0x1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid account address"));
}

#[test]
fn test_invalid_approve_amount() {
    tcdp_cmd()
        .args([
            "approve",
            "--amount",
            "1.2.3",
            "--rpc-url",
            CLOSED_RPC_URL,
            "--private-key",
            TEST_PRIVATE_KEY,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_unreachable_rpc_fails_cleanly() {
    tcdp_cmd()
        .args(["status", "--rpc-url", CLOSED_RPC_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to get chain id"));
}
