//! End-to-end CLI tests for kakaoday.
//!
//! These tests run the actual binary and check its output.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const CHAT: &str = "\
러스트 스터디 님과 카카오톡 대화
저장한 날짜 : 2024-05-04 21:13:07

2024년 5월 1일 수요일
2024년 5월 1일 오전 3:30, 철수 : 새벽
2024년 5월 1일 오전 10:00, 철수 : 안녕하세요
두 번째 줄
2024년 5월 1일 오후 2:00, 영희님이 들어왔습니다.
2024년 5월 1일 오후 9:00, 영희 : 안녕
";

fn setup() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("chat.txt");
    fs::write(&path, CHAT).unwrap();
    (dir, path)
}

fn kakaoday() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_kakaoday"));
    Command::from_std(cmd)
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_help() {
    kakaoday()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("split"));
}

#[test]
fn test_version() {
    kakaoday()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_dates() {
    let (_dir, path) = setup();
    kakaoday()
        .arg("dates")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1  2024-04-30"))
        .stdout(predicate::str::contains("2  2024-05-01"));
}

#[test]
fn test_page_prints_json() {
    let (_dir, path) = setup();
    let output = kakaoday()
        .arg("page")
        .arg(&path)
        .args(["--page", "2", "--slug", "스터디=study"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["korean_title"], "러스트 스터디");
    assert_eq!(record["date"], "2024년 05월 01일 10:00");
    assert_eq!(record["unique_id"], "study_2024년 05월 01일 10:00");
    assert_eq!(record["total_items"], 2);
    assert_eq!(record["total_pages"], 2);
    assert_eq!(
        record["content"],
        "2024년 5월 1일 오전 10:00, 철수 : 안녕하세요\n두 번째 줄\n2024년 5월 1일 오후 9:00, 영희 : 안녕"
    );
}

#[test]
fn test_page_scan_retrieval() {
    let (_dir, path) = setup();
    kakaoday()
        .arg("page")
        .arg(&path)
        .args(["--retrieval", "scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024년 04월 30일 03:30"));
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn test_meta_listing_json() {
    let (_dir, path) = setup();
    let output = kakaoday().arg("meta").arg(&path).output().unwrap();
    assert!(output.status.success());

    let days: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(days.as_array().unwrap().len(), 2);
    assert_eq!(days[1]["total_items"], 2);
}

#[test]
fn test_meta_csv_to_file() {
    let (dir, path) = setup();
    let out = dir.path().join("days.csv");
    kakaoday()
        .arg("meta")
        .arg(&path)
        .args(["--format", "csv", "-o"])
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Page;Day;Date;UniqueId;Items;FirstMessageAt"));
    assert!(csv.contains("2;2024년 05월 01일;2024년 05월 01일 10:00;;2;2024-05-01 10:00"));
}

#[test]
fn test_meta_single_page_csv_rejected() {
    let (_dir, path) = setup();
    kakaoday()
        .arg("meta")
        .arg(&path)
        .args(["--page", "1", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV"));
}

// ============================================================================
// Split
// ============================================================================

#[test]
fn test_split() {
    let (dir, path) = setup();
    let out = dir.path().join("days");
    kakaoday()
        .arg("split")
        .arg(&path)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 days"));

    let april = fs::read_to_string(out.join("chat_20240430.txt")).unwrap();
    assert_eq!(april, "2024년 5월 1일 오전 3:30, 철수 : 새벽");
    assert!(out.join("chat_20240501.txt").exists());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_missing_file() {
    kakaoday()
        .args(["page", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_page() {
    let (_dir, path) = setup();
    kakaoday()
        .arg("page")
        .arg(&path)
        .args(["--page", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page number 3"));
}

#[test]
fn test_not_a_kakao_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    fs::write(&path, "hello\nworld\n").unwrap();
    kakaoday()
        .arg("dates")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chat format"));
}

#[test]
fn test_bad_slug_rule() {
    let (_dir, path) = setup();
    kakaoday()
        .arg("page")
        .arg(&path)
        .args(["--slug", "missing-separator"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATTERN=SLUG"));
}
