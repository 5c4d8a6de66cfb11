//! Basic CLI E2E tests.
//!
//! Tests run the built binary with HOME pointed at a scratch directory so
//! config files never touch the real home.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as HOME and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str], envs: &[(&str, &str)]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_sleepplot"))
        .args(args)
        .env("HOME", home)
        .env_remove("SLEEPPLOT_ENV")
        .env_remove("SLEEPPLOT_TOKEN")
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

/// Eight nights of flattened data, the third one without an id.
fn write_fixture(path: &Path) {
    let mut csv = String::from(
        ",id,calendarDate,sleepStartTimestampLocal,sleepEndTimestampLocal,sleepTimeSeconds\n",
    );
    // 2024-01-01T00:00:00 as epoch millis
    let jan1: i64 = 1_704_067_200_000;
    let day: i64 = 86_400_000;
    for i in 0..8i64 {
        let bed = jan1 + (i - 1) * day + 23 * 3_600_000;
        let wake = jan1 + i * day + 7 * 3_600_000;
        let id = if i == 2 { String::new() } else { (100 + i).to_string() };
        csv.push_str(&format!(
            "{i},{id},2024-01-{:02},{bed},{wake},28800\n",
            i + 1
        ));
    }
    std::fs::write(path, csv).unwrap();
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["--help"], &[]);
    assert_eq!(code, 0);
    for cmd in ["fetch", "plot", "table", "config", "auth"] {
        assert!(stdout.contains(cmd), "missing {cmd} in help");
    }
}

/// Point chart.plotly_js_path at a stand-in library so nothing is downloaded.
fn use_local_plotly(home: &Path) -> String {
    let library = home.join("plotly.min.js");
    std::fs::write(&library, "window.Plotly = { newPlot: function () {} };").unwrap();
    let (code, _, stderr) = run_cli(
        home,
        &["config", "set", "chart.plotly_js_path", library.to_str().unwrap()],
        &[],
    );
    assert_eq!(code, 0, "config set failed: {stderr}");
    std::fs::read_to_string(library).unwrap()
}

#[test]
fn test_plot_writes_html() {
    let home = tempfile::tempdir().unwrap();
    let csv = home.path().join("sleep.csv");
    let html = home.path().join("chart.html");
    write_fixture(&csv);
    let library = use_local_plotly(home.path());

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &[
            "plot",
            "--input",
            csv.to_str().unwrap(),
            "--out",
            html.to_str().unwrap(),
            "--no-show",
        ],
        &[],
    );
    assert_eq!(code, 0, "plot failed: {stderr}");
    assert!(stdout.contains("chart written to"));

    let page = std::fs::read_to_string(&html).unwrap();
    assert!(page.contains("Plotly.newPlot"));
    assert!(page.contains("Sleeping Hours"));
    assert!(page.contains(&library));
    assert!(!page.contains("<script src="));
}

#[test]
fn test_plot_can_link_remote_library() {
    let home = tempfile::tempdir().unwrap();
    let csv = home.path().join("sleep.csv");
    let html = home.path().join("chart.html");
    write_fixture(&csv);

    let (code, _, _) = run_cli(
        home.path(),
        &["config", "set", "chart.inline_plotly_js", "false"],
        &[],
    );
    assert_eq!(code, 0);

    let (code, _, stderr) = run_cli(
        home.path(),
        &[
            "plot",
            "--input",
            csv.to_str().unwrap(),
            "--out",
            html.to_str().unwrap(),
            "--no-show",
        ],
        &[],
    );
    assert_eq!(code, 0, "plot failed: {stderr}");
    let page = std::fs::read_to_string(&html).unwrap();
    assert!(page.contains("<script src=\"https://cdn.plot.ly/"));
}

#[test]
fn test_table_prints_normalized_rows() {
    let home = tempfile::tempdir().unwrap();
    let csv = home.path().join("sleep.csv");
    write_fixture(&csv);

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["table", "--input", csv.to_str().unwrap()],
        &[],
    );
    assert_eq!(code, 0, "table failed: {stderr}");

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["f_bedtime"], "11:00 PM");
    assert_eq!(rows[0]["f_wakeup"], "07:00 AM");
    assert!(rows[5]["rm_bedtime"].is_null());
    assert_eq!(rows[6]["rm_bedtime"], 3600.0);
}

#[test]
fn test_config_get_and_set() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "chart.title"], &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Sleep Schedule");

    let (code, _, _) = run_cli(
        home.path(),
        &["config", "set", "wellness.sleep_buffer_minutes", "45"],
        &[],
    );
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(
        home.path(),
        &["config", "get", "wellness.sleep_buffer_minutes"],
        &[],
    );
    assert_eq!(stdout.trim(), "45");

    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "chart.nope"], &[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key: chart.nope"));
}

#[test]
fn test_config_path_and_list() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["config", "path"], &[]);
    assert_eq!(code, 0);
    let expected = home.path().join(".config").join("sleepplot").join("config.toml");
    assert_eq!(stdout.trim(), expected.to_str().unwrap());

    let (code, stdout, _) = run_cli(home.path(), &["config", "list"], &[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[chart]"));
    assert!(stdout.contains("inline_plotly_js = true"));
    assert!(expected.exists());
}

#[test]
fn test_fetch_rejects_reversed_range() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["fetch", "--start", "2024-02-01", "--end", "2024-01-01"],
        &[],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid date range"));
}

#[test]
fn test_fetch_requires_display_name() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["fetch", "--days", "3"],
        &[("SLEEPPLOT_TOKEN", "token")],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("display_name"));
}

#[test]
fn test_plot_missing_input_fails() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.csv");
    let (code, _, stderr) = run_cli(
        home.path(),
        &["plot", "--input", missing.to_str().unwrap(), "--no-show"],
        &[],
    );
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:") || stderr.contains("error:"));
}
