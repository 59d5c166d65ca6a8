use super::helpers::{stderr, TestProject};

#[test]
fn test_lockfile_v3_packages_map() {
    let project = TestProject::new();
    project.write_lockfile(
        r#"{
  "name": "modern-app",
  "version": "0.1.0",
  "lockfileVersion": 3,
  "requires": true,
  "packages": {
    "": { "name": "modern-app", "version": "0.1.0", "dependencies": { "@scope/core": "^1.0.0" } },
    "node_modules/@scope/core": { "version": "1.2.0", "license": "MIT" },
    "node_modules/@scope/core/node_modules/semver": { "version": "5.7.2", "dev": true, "license": "ISC" },
    "node_modules/semver": { "version": "7.6.0", "license": "ISC" }
  }
}"#,
    );
    project.install("@scope/core", r#"{"name": "@scope/core", "license": "MIT"}"#);
    project.install("@scope/core/node_modules/semver", r#"{"name": "semver", "license": "ISC"}"#);
    project.install("semver", r#"{"name": "semver", "license": "ISC"}"#);

    let output = project.run(&["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report = project.read_report();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,version,dev,license",
            "@scope/core,1.2.0,false,MIT",
            "semver,5.7.2,true,ISC",
            "semver,7.6.0,false,ISC",
        ]
    );
}

#[test]
fn test_empty_lockfile_writes_header_only() {
    let project = TestProject::new();
    project.write_lockfile(r#"{"name": "empty", "lockfileVersion": 1, "requires": true}"#);

    let output = project.run(&["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.read_report().trim_end(), "id,version,dev,license");
}

#[test]
fn test_toml_rc_is_accepted() {
    let project = TestProject::new();
    project.write_lockfile(r#"{"lockfileVersion": 1, "dependencies": {"gpl-thing": {"version": "1.0.0"}}}"#);
    project.install("gpl-thing", r#"{"license": "GPL-3.0"}"#);
    project.write_rc("blacklist = [\"GPL-3.0\"]\noutput = \"audit.csv\"\n");

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("gpl-thing@1.0.0 => GPL-3.0"));
    assert!(project.path().join("audit.csv").exists());
}

#[test]
fn test_ini_rc_layers_over_system_rc() {
    let project = TestProject::new();
    project.write_lockfile(r#"{"lockfileVersion": 1, "dependencies": {"gpl-thing": {"version": "1.0.0"}}}"#);
    project.install("gpl-thing", r#"{"license": "GPL-3.0"}"#);
    project.write_system_rc(r#"{ // shared defaults
  "output": "system.csv",
  "blacklist": ["AGPL-3.0"]
}"#);
    project.write_rc("output=report.csv\nwhitelist[]=MIT\n");

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("have not been whitelisted"));
    assert!(project.path().join("report.csv").exists());
    assert!(!project.path().join("system.csv").exists());
}

#[test]
fn test_system_rc_is_read_from_configured_dir() {
    let project = TestProject::new();
    project.write_lockfile(r#"{"lockfileVersion": 1, "dependencies": {"gpl-thing": {"version": "1.0.0"}}}"#);
    project.install("gpl-thing", r#"{"license": "GPL-3.0"}"#);
    project.write_system_rc("blacklist[]=GPL-3.0\n");

    let output = project.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("gpl-thing@1.0.0 => GPL-3.0"));
}
