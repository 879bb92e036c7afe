#![forbid(unsafe_code)]

//! End-to-end command tests against the shipped Qt catalogs.
//!
//! Run:
//!   cargo test -p tscat-cli --test cli_commands

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::tempdir;
use tscat_cli::cli::{Cli, execute};
use tscat_cli::error::CliError;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../tscat-i18n/tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

fn run(args: &[&str]) -> (Result<(), CliError>, String) {
    let cli = Cli::try_parse_from(std::iter::once("tscat").chain(args.iter().copied())).unwrap();
    let mut out = Vec::new();
    let result = execute(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

const ANNOUNCED: &str = "announced %n section(s), each %1 byte(s), exceed file size";

// ── lookup ──────────────────────────────────────────────────────────

#[test]
fn lookup_translated() {
    let it = fixture("qt_it.ts");
    let (result, out) = run(&["lookup", &it, "--context", "CloseButton", "--source", "Close Tab"]);
    result.unwrap();
    assert_eq!(out, "Chiudi scheda\n");
}

#[test]
fn lookup_with_comment_and_args() {
    let it = fixture("qt_it.ts");
    let (result, out) = run(&[
        "lookup",
        &it,
        "--context",
        "QCoreApplication",
        "--source",
        "%1: key is empty",
        "--comment",
        "QSystemSemaphore",
        "--arg",
        "QSystemSemaphore::acquire",
    ]);
    result.unwrap();
    assert_eq!(out, "QSystemSemaphore::acquire: la chiave è vuota\n");
}

#[test]
fn lookup_plural() {
    let ar = fixture("qt_ar.ts");
    let (result, out) = run(&[
        "lookup", &ar, "--context", "QLibrary", "--source", ANNOUNCED, "--count", "3", "--arg", "512",
    ]);
    result.unwrap();
    assert!(out.starts_with("أُعلنت 3 أقسام، بطول 512 بايت"), "{out}");
}

#[test]
fn lookup_untranslated_prints_source() {
    let sl = fixture("qt_sl.ts");
    let (result, out) = run(&["lookup", &sl, "--context", "CloseButton", "--source", "Close Tab"]);
    result.unwrap();
    assert_eq!(out, "Close Tab\n");
}

#[test]
fn lookup_later_file_wins() {
    let dir = tempdir().unwrap();
    let patch = write(
        dir.path(),
        "patch.ts",
        "<TS version=\"2.1\" language=\"it_IT\"><context><name>CloseButton</name>\
         <message><source>Close Tab</source><translation>Chiudi la scheda</translation></message>\
         </context></TS>",
    );
    let it = fixture("qt_it.ts");
    let (result, out) = run(&[
        "lookup", &it, &patch, "--context", "CloseButton", "--source", "Close Tab",
    ]);
    result.unwrap();
    assert_eq!(out, "Chiudi la scheda\n");
}

#[test]
fn lookup_surplus_args_is_a_usage_error() {
    let it = fixture("qt_it.ts");
    let (result, out) = run(&[
        "lookup",
        &it,
        "--context",
        "CloseButton",
        "--source",
        "Close Tab",
        "--arg",
        "x",
    ]);
    let error = result.unwrap_err();
    assert!(matches!(error, CliError::InvalidArgument { .. }));
    assert_eq!(error.exit_code(), 64);
    assert_eq!(
        error.to_string(),
        "invalid argument: 1 --arg value(s) given, but the source uses 0 argument placeholder(s)"
    );
    assert!(out.is_empty());
}

#[test]
fn lookup_fewer_args_leaves_placeholders() {
    let (result, out) = run(&[
        "lookup",
        &fixture("qt_sl.ts"),
        "--context",
        "C",
        "--source",
        "%1 of %2",
        "--arg",
        "3",
    ]);
    result.unwrap();
    assert_eq!(out, "3 of %2\n");
}

#[test]
fn lookup_malformed_catalog_exits_two() {
    let dir = tempdir().unwrap();
    let bad = write(dir.path(), "bad.ts", "<TS><context><name>C</nome></context></TS>");
    let (result, out) = run(&["lookup", &bad, "--context", "C", "--source", "x"]);
    let error = result.unwrap_err();
    assert_eq!(error.exit_code(), 2);
    assert!(error.to_string().starts_with("malformed XML"), "{error}");
    assert!(out.is_empty());
}

// ── stats ───────────────────────────────────────────────────────────

#[test]
fn stats_text() {
    let it = fixture("qt_it.ts");
    let (result, out) = run(&["stats", &it]);
    result.unwrap();
    assert!(
        out.ends_with(": it_IT 1772/1775 translated (99.8%), 3 unfinished, 1 numerus, 123 contexts\n"),
        "{out}"
    );
}

#[test]
fn stats_per_context() {
    let it = fixture("qt_it.ts");
    let (result, out) = run(&["stats", &it, "--contexts"]);
    result.unwrap();
    assert!(out.contains("\n  CloseButton: 1/1 (100.0%)\n"), "{out}");
    assert_eq!(out.lines().count(), 124);
}

#[test]
fn stats_json() {
    let (result, out) = run(&["stats", &fixture("qt_ar.ts"), &fixture("qt_sl.ts"), "--json"]);
    result.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let files = value.as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["stats"]["unfinished"], 217);
    assert_eq!(files[0]["coverage"]["language"], "ar");
    assert_eq!(files[1]["stats"]["translated"], 0);
}

// ── check ───────────────────────────────────────────────────────────

#[test]
fn check_clean_file_passes() {
    let (result, out) = run(&["check", &fixture("qt_it.ts")]);
    result.unwrap();
    assert!(out.is_empty(), "{out}");
}

#[test]
fn check_reports_errors_and_fails() {
    let (result, out) = run(&["check", &fixture("qt_ar.ts")]);
    match result.unwrap_err() {
        CliError::CheckFailed { errors, warnings } => {
            assert_eq!((errors, warnings), (1, 0));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        out.ends_with("qt_ar.ts: error[empty-translation] QShortcut: \"+\": finished translation is empty\n"),
        "{out}"
    );
}

#[test]
fn check_warnings_only_pass_unless_strict() {
    let dir = tempdir().unwrap();
    let file = write(
        dir.path(),
        "qt_it.ts",
        "<TS version=\"2.1\" language=\"it_IT\"><context><name>QAbstractSpinBox</name>\
         <message><source>&amp;Step up</source><translation>Aumenta</translation></message>\
         </context></TS>",
    );
    let (result, out) = run(&["check", &file]);
    result.unwrap();
    assert!(out.contains("warning[missing-accelerator]"), "{out}");

    let (result, _) = run(&["check", &file, "--warnings-as-errors"]);
    assert_eq!(result.unwrap_err().exit_code(), 1);

    let config = write(dir.path(), "tscat.toml", "[check]\nwarnings-as-errors = true\n");
    let (result, _) = run(&["--config", &config, "check", &file]);
    assert!(matches!(
        result.unwrap_err(),
        CliError::CheckFailed {
            errors: 0,
            warnings: 1
        }
    ));
}

#[test]
fn check_json() {
    let (result, out) = run(&["check", &fixture("qt_ar.ts"), "--json"]);
    assert!(result.is_err());
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let issue = &value[0]["issues"][0];
    assert_eq!(issue["code"], "empty-translation");
    assert_eq!(issue["severity"], "error");
    assert_eq!(issue["context"], "QShortcut");
}

#[test]
fn check_numerus_rule_from_config() {
    let dir = tempdir().unwrap();
    let config = write(dir.path(), "tscat.toml", "[catalog]\nnumerus-rule = \"slovenian\"\n");
    let (result, out) = run(&["check", &fixture("qt_it.ts"), "--config", &config]);
    assert!(result.is_err());
    assert!(out.contains("error[numerus-form-count] QLibrary"), "{out}");
}

// ── dump ────────────────────────────────────────────────────────────

#[test]
fn dump_json_lines() {
    let (result, out) = run(&["dump", &fixture("qt_it.ts")]);
    result.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1775);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["context"], "CloseButton");
    assert_eq!(first["source"], "Close Tab");
    assert_eq!(first["translation"], "Chiudi scheda");
    assert_eq!(first["finished"], true);
    assert!(first["comment"].is_null());
}

// ── locate ──────────────────────────────────────────────────────────

#[test]
fn locate_prints_best_match() {
    let dir = tempdir().unwrap();
    write(dir.path(), "qt_it.ts", "<TS/>");
    let (result, out) = run(&[
        "locate",
        &dir.path().display().to_string(),
        "--locale",
        "it_IT.UTF-8",
    ]);
    result.unwrap();
    assert_eq!(out.trim_end(), dir.path().join("qt_it.ts").display().to_string());
}

#[test]
fn locate_miss_exits_one() {
    let dir = tempdir().unwrap();
    let (result, _) = run(&[
        "locate",
        &dir.path().display().to_string(),
        "--prefix",
        "app",
        "--locale",
        "de",
    ]);
    let error = result.unwrap_err();
    assert!(matches!(error, CliError::NotFound { .. }));
    assert_eq!(error.exit_code(), 1);
}
