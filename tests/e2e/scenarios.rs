use super::helpers::{stderr, TestProject};

const NESTED_LOCKFILE: &str = r#"{
  "name": "app",
  "version": "1.0.0",
  "lockfileVersion": 1,
  "requires": true,
  "dependencies": {
    "a": {
      "version": "1.0.0",
      "dependencies": {
        "b": { "version": "2.0.0" }
      }
    }
  }
}"#;

fn nested_project() -> TestProject {
    let project = TestProject::new();
    project.write_lockfile(NESTED_LOCKFILE);
    project.install("a", r#"{"name": "a", "version": "1.0.0", "license": "MIT"}"#);
    project.install("a/node_modules/b", r#"{"name": "b", "version": "2.0.0", "license": "ISC"}"#);
    project
}

#[test]
fn test_nested_dependency_report() {
    let project = nested_project();

    let output = project.run(&["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report = project.read_report();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec!["id,version,dev,license", "a,1.0.0,false,MIT", "b,2.0.0,false,ISC"]
    );
}

#[test]
fn test_duplicates_are_collapsed_and_sorted() {
    let project = TestProject::new();
    project.write_lockfile(
        r#"{
  "lockfileVersion": 1,
  "dependencies": {
    "zed": { "version": "1.0.0" },
    "dup": { "version": "1.10.0" },
    "x": {
      "version": "1.0.0",
      "dev": true,
      "dependencies": { "dup": { "version": "1.9.0", "dev": true } }
    },
    "y": {
      "version": "1.0.0",
      "dependencies": { "dup": { "version": "1.9.0" } }
    }
  }
}"#,
    );
    project.install("zed", r#"{"license": "MIT"}"#);
    project.install("dup", r#"{"license": "MIT"}"#);
    project.install("x", r#"{"licenses": [{"type": "MIT"}, "ISC"]}"#);
    project.install("x/node_modules/dup", r#"{"license": {"type": "BSD-2-Clause"}}"#);
    project.install("y", r#"{"license": "Apache-2.0"}"#);
    project.install("y/node_modules/dup", r#"{"license": {"type": "BSD-2-Clause"}}"#);

    let output = project.run(&["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report = project.read_report();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,version,dev,license",
            "dup,1.9.0,false,BSD-2-Clause",
            "dup,1.10.0,false,MIT",
            "x,1.0.0,true,\"MIT,ISC\"",
            "y,1.0.0,false,Apache-2.0",
            "zed,1.0.0,false,MIT",
        ]
    );
}

#[test]
fn test_missing_manifest_fails_without_report() {
    let project = TestProject::new();
    project.write_lockfile(NESTED_LOCKFILE);
    project.install("a", r#"{"license": "MIT"}"#);

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Cannot read file"));
    assert!(err.contains("npm ci"));
    assert!(!project.report_path().exists());
}

#[test]
fn test_malformed_manifest_fails_without_report() {
    let project = TestProject::new();
    project.write_lockfile(NESTED_LOCKFILE);
    project.install("a", r#"{"license": "MIT"}"#);
    project.install("a/node_modules/b", r#"{"license": "#);

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Cannot parse manifest"));
    assert!(err.contains("package.json"));
    assert!(!project.report_path().exists());
}

#[test]
fn test_missing_lockfile_fails() {
    let project = TestProject::new();

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Cannot find package-lock.json"));
    assert!(!project.report_path().exists());
}

#[test]
fn test_whitelist_violation_still_writes_report() {
    let project = nested_project();
    project.write_rc(r#"{"whitelist": ["MIT"]}"#);

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("have not been whitelisted"));
    assert!(err.contains("b@2.0.0 => ISC"));
    assert!(!err.contains("a@1.0.0"));
    assert!(project.read_report().contains("b,2.0.0,false,ISC"));
}

#[test]
fn test_blacklist_violation() {
    let project = nested_project();
    project.write_rc(r#"{"blacklist": ["ISC"]}"#);

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("b@2.0.0 => ISC"));
}

#[test]
fn test_exit_zero_reports_but_succeeds() {
    let project = nested_project();
    project.write_rc(r#"{"blacklist": ["ISC"]}"#);

    let output = project.run(&["check", "--exit-zero"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("have been blacklisted"));
}

#[test]
fn test_unlicensed_package_and_defaults() {
    let project = nested_project();
    project.install("a/node_modules/b", r#"{"name": "b"}"#);

    let output = project.run(&["check"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Licenses could not be found for 1 package:"));
    assert!(err.contains("b@2.0.0"));

    project.write_rc(r#"{"defaults": {"b@2.0.0": "Unlicense"}}"#);
    let output = project.run(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.read_report().contains("b,2.0.0,false,Unlicense"));
}

#[test]
fn test_output_flag_overrides_config() {
    let project = nested_project();
    project.write_rc(r#"{"output": "from-rc.csv"}"#);

    let output = project.run(&["check", "--output", "reports/cli.csv"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.path().join("reports").join("cli.csv").exists());
    assert!(!project.path().join("from-rc.csv").exists());
}

#[test]
fn test_config_show_and_validate() {
    let project = nested_project();
    project.write_rc(r#"{"whitelist": ["MIT", "ISC"]}"#);

    let show = project.run(&["config", "--show"]);
    assert!(show.status.success());
    assert!(String::from_utf8_lossy(&show.stdout).contains("\"whitelist\""));

    project.write_rc("whitelist = [");
    let validate = project.run(&["config", "--validate"]);
    assert!(!validate.status.success());
}
