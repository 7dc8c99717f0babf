use std::env;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use tempfile::TempDir;

use marmor_cli::commands::{audit, export, init, panel, record, register, report, summary};

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "MARMOR_DATABASE_URL",
        "MARMOR_DATABASE_MAX_CONNECTIONS",
        "MARMOR_DATABASE_TIMEOUT_SECS",
        "MARMOR_ADMIN_SECRET",
        "MARMOR_LOG_LEVEL",
        "MARMOR_LOG_FORMAT",
    ];

    let previous: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();
    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

/// File-backed scratch database so state survives across per-command pools.
fn scratch_db(dir: &TempDir) -> String {
    format!("sqlite://{}/marmor-test.db?mode=rwc", dir.path().display())
}

#[test]
fn init_bootstraps_a_fresh_database() {
    let dir = TempDir::new().expect("temp dir");
    with_env(&[("MARMOR_DATABASE_URL", &scratch_db(&dir))], || {
        let result = init::run();
        assert_eq!(result.exit_code, 0, "expected successful init");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "init");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn init_fails_fast_on_invalid_configuration() {
    with_env(&[("MARMOR_DATABASE_URL", "postgres://nope")], || {
        let result = init::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn duplicate_registration_degrades_to_a_warning() {
    let dir = TempDir::new().expect("temp dir");
    with_env(&[("MARMOR_DATABASE_URL", &scratch_db(&dir))], || {
        let first = register::run("Ana".into(), "2021-03-15".into());
        assert_eq!(first.exit_code, 0);
        assert_eq!(parse_payload(&first.output)["status"], "ok");

        let second = register::run("Ana".into(), "2022-01-01".into());
        assert_eq!(second.exit_code, 0, "duplicate registration is non-fatal");

        let payload = parse_payload(&second.output);
        assert_eq!(payload["status"], "warning");
        assert_eq!(payload["error_class"], "duplicate_employee");
    });
}

#[test]
fn register_rejects_malformed_dates() {
    let dir = TempDir::new().expect("temp dir");
    with_env(&[("MARMOR_DATABASE_URL", &scratch_db(&dir))], || {
        let result = register::run("Ana".into(), "15/03/2021".into());
        assert_eq!(result.exit_code, 5);
        assert_eq!(parse_payload(&result.output)["error_class"], "validation");
    });
}

#[test]
fn record_requires_a_registered_employee_and_a_known_month() {
    let dir = TempDir::new().expect("temp dir");
    with_env(&[("MARMOR_DATABASE_URL", &scratch_db(&dir))], || {
        let result =
            record::run("Nina".into(), "Jan".into(), "0".into(), "0".into(), "0".into());
        assert_eq!(result.exit_code, 6);
        assert_eq!(parse_payload(&result.output)["error_class"], "not_found");

        assert_eq!(parse_payload(&register::run("Ana".into(), "2021-03-15".into()).output)["status"], "ok");
        let result =
            record::run("Ana".into(), "January".into(), "0".into(), "0".into(), "0".into());
        assert_eq!(result.exit_code, 5);
        assert_eq!(parse_payload(&result.output)["error_class"], "validation");
    });
}

#[test]
fn record_report_summary_and_export_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    with_env(&[("MARMOR_DATABASE_URL", &scratch_db(&dir))], || {
        register::run("Ana".into(), "2021-03-15".into());
        let recorded = record::run(
            "Ana".into(),
            "Jan".into(),
            "2000".into(),
            "0".into(),
            "4000".into(),
        );
        assert_eq!(recorded.exit_code, 0);
        let message = parse_payload(&recorded.output)["message"].as_str().unwrap().to_string();
        assert!(message.contains("path C"), "unexpected message: {message}");

        let reported = report::run(Some("Jan".into()));
        assert_eq!(reported.exit_code, 0);
        let message = parse_payload(&reported.output)["message"].as_str().unwrap().to_string();
        assert!(message.contains("Ana [C]"), "unexpected message: {message}");

        let summarized = summary::run("Ana".into());
        assert_eq!(summarized.exit_code, 0);
        let message = parse_payload(&summarized.output)["message"].as_str().unwrap().to_string();
        assert!(message.contains("total 6000"), "unexpected message: {message}");

        let target = dir.path().join("sales_report.csv");
        let exported = export::run(None, target.clone());
        assert_eq!(exported.exit_code, 0);

        let text = std::fs::read_to_string(&target).expect("exported file");
        let records = marmor_core::parse_delimited_text(&text).expect("parse export");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee, "Ana");
    });
}

#[test]
fn panel_commands_fail_closed_on_wrong_secret() {
    let dir = TempDir::new().expect("temp dir");
    with_env(
        &[
            ("MARMOR_DATABASE_URL", &scratch_db(&dir)),
            ("MARMOR_ADMIN_SECRET", "marmorize2025"),
        ],
        || {
            register::run("Ana".into(), "2021-03-15".into());
            record::run("Ana".into(), "Jan".into(), "100".into(), "0".into(), "1600".into());

            let denied = panel::delete_employee("Ana".into(), "wrong".into());
            assert_eq!(denied.exit_code, 7);
            assert_eq!(parse_payload(&denied.output)["error_class"], "access_denied");

            let summarized = summary::run("Ana".into());
            let message =
                parse_payload(&summarized.output)["message"].as_str().unwrap().to_string();
            assert!(message.contains("1 sale(s)"), "storage must be untouched: {message}");

            let log = audit::run();
            let message = parse_payload(&log.output)["message"].as_str().unwrap().to_string();
            assert!(message.contains("no deletions"), "denied ops must not log: {message}");
        },
    );
}

#[test]
fn panel_commands_delete_and_log_with_the_right_secret() {
    let dir = TempDir::new().expect("temp dir");
    with_env(
        &[
            ("MARMOR_DATABASE_URL", &scratch_db(&dir)),
            ("MARMOR_ADMIN_SECRET", "marmorize2025"),
        ],
        || {
            register::run("Ana".into(), "2021-03-15".into());
            record::run("Ana".into(), "Jan".into(), "100".into(), "0".into(), "1600".into());
            record::run("Ana".into(), "Fev".into(), "100".into(), "0".into(), "1600".into());

            let deleted = panel::delete_month("Ana".into(), "Jan".into(), "marmorize2025".into());
            assert_eq!(deleted.exit_code, 0);
            let message = parse_payload(&deleted.output)["message"].as_str().unwrap().to_string();
            assert!(message.contains("1 sale record(s) removed"), "message: {message}");

            let reset = panel::reset("Ana".into(), "marmorize2025".into());
            assert_eq!(reset.exit_code, 0);

            let log = audit::run();
            let message = parse_payload(&log.output)["message"].as_str().unwrap().to_string();
            assert!(message.contains("Data Reset"), "log: {message}");
            assert!(message.contains("Monthly Deletion"), "log: {message}");
        },
    );
}

#[test]
fn panel_denies_everything_when_no_secret_is_configured() {
    let dir = TempDir::new().expect("temp dir");
    with_env(&[("MARMOR_DATABASE_URL", &scratch_db(&dir))], || {
        register::run("Ana".into(), "2021-03-15".into());

        let denied = panel::reset("Ana".into(), "".into());
        assert_eq!(denied.exit_code, 7);
        assert_eq!(parse_payload(&denied.output)["error_class"], "access_denied");
    });
}
