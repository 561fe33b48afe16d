use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    // Helper function to initialize the command to test.
    fn scoopdesk(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_scoopdesk"));
        cmd.env("HOME", self.dir.path())
            .env("USERPROFILE", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("SCOOPDESK_CONFIG")
            .arg("--config")
            .arg(self.config());
        cmd
    }

    fn saved_config(&self) -> serde_json::Value {
        read_json(&self.config())
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_version_flag() {
    let expected = format!("scoopdesk {}", env!("CARGO_PKG_VERSION"));
    Command::new(env!("CARGO_BIN_EXE_scoopdesk"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_unknown_command_prints_usage() {
    Command::new(env!("CARGO_BIN_EXE_scoopdesk"))
        .arg("unknown-command-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: scoopdesk"));
}

#[test]
fn test_plan_template_is_loadable_json() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .scoopdesk()
        .args(["plan", "template"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = plan["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        ["bucket-add", "source-config", "app-install", "raw-command"]
    );
}

#[test]
fn test_plan_load_persists_and_show_lists_steps() {
    let sandbox = Sandbox::new();
    let plan = sandbox.write(
        "plan.json",
        r#"{"title": "Workstation", "steps": [
            {"type": "scoop-bucket", "name": "extras"},
            {"type": "command", "name": "Say hello", "command": "echo hello"}
        ]}"#,
    );

    sandbox
        .scoopdesk()
        .args(["plan", "load"])
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workstation"));

    let saved = sandbox.saved_config();
    assert_eq!(saved["advanced"]["steps"][0]["type"], "bucket-add");
    assert_eq!(saved["advanced"]["steps"][1]["type"], "raw-command");

    sandbox
        .scoopdesk()
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Say hello").and(predicate::str::contains("pending")));
}

#[test]
fn test_plan_with_unknown_step_type_fails_that_step_only() {
    let sandbox = Sandbox::new();
    let plan = sandbox.write(
        "plan.json",
        r#"{"steps": [{"type": "reboot"}]}"#,
    );

    sandbox
        .scoopdesk()
        .args(["plan", "load"])
        .arg(&plan)
        .assert()
        .success();

    sandbox
        .scoopdesk()
        .args(["plan", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 1 failed"));
}

#[cfg(unix)]
#[test]
fn test_plan_run_continues_after_failed_step() {
    let sandbox = Sandbox::new();
    let plan = sandbox.write(
        "plan.json",
        r#"{"steps": [
            {"type": "raw-command", "command": "echo first"},
            {"type": "raw-command", "command": "exit 3"},
            {"type": "raw-command", "commands": ["echo third", "echo again"]}
        ]}"#,
    );
    sandbox
        .scoopdesk()
        .args(["plan", "load"])
        .arg(&plan)
        .assert()
        .success();

    sandbox
        .scoopdesk()
        .args(["plan", "run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Step 1 done").and(predicate::str::contains("Step 3 done")))
        .stderr(predicate::str::contains("Step 2 failed"));
}

#[test]
fn test_plan_run_without_plan_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["plan", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no plan loaded"));
}

#[test]
fn test_plan_step_numbers_start_at_one() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["plan", "step", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("step numbers start at 1"));
}

#[test]
fn test_managers_persist_active_set() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["managers", "winget", "choco", "nope"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown managers ignored: nope"));

    let saved = sandbox.saved_config();
    assert_eq!(saved["store"]["managers"], serde_json::json!(["winget", "choco"]));
    assert_eq!(saved["store"]["manager"], "winget");
}

#[test]
fn test_categories_add_and_remove() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["categories", "add", " Tools "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Categories: Tools"));
    sandbox
        .scoopdesk()
        .args(["categories", "add", "Tools"])
        .assert()
        .success();

    assert_eq!(
        sandbox.saved_config()["store"]["categories"],
        serde_json::json!(["Tools"])
    );

    sandbox
        .scoopdesk()
        .args(["categories", "rm", "Tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No category filters"));
}

#[test]
fn test_snapshot_show_lists_apps() {
    let sandbox = Sandbox::new();
    let snapshot = sandbox.write(
        "backup.json",
        r#"{"exportedAt": "2026-01-02T03:04:05.000Z",
            "buckets": [{"name": "main"}, {"name": "extras", "url": "https://example.com/extras.git"}],
            "apps": ["git", "7zip"]}"#,
    );

    sandbox
        .scoopdesk()
        .args(["snapshot", "show"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("extras")
                .and(predicate::str::contains("7zip"))
                .and(predicate::str::contains("2026-01-02T03:04:05.000Z")),
        );
}

#[test]
fn test_snapshot_import_previews_restore_tasks() {
    let sandbox = Sandbox::new();
    let snapshot = sandbox.write(
        "backup.json",
        r#"{"buckets": [{"name": "extras"}], "apps": ["git"]}"#,
    );

    sandbox
        .scoopdesk()
        .args(["snapshot", "import"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1. Prepare restore")
                .and(predicate::str::contains("2. Restore bucket: extras"))
                .and(predicate::str::contains("3. Restore app: git"))
                .and(predicate::str::contains("4. Refresh installed list")),
        );
}

#[test]
fn test_snapshot_import_rejects_missing_apps() {
    let sandbox = Sandbox::new();
    let snapshot = sandbox.write("backup.json", r#"{"buckets": []}"#);

    sandbox
        .scoopdesk()
        .args(["snapshot", "import"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid snapshot"));
}

#[test]
fn test_bucket_list_falls_back_to_config_without_scoop() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["bucket", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main").and(predicate::str::contains("extras")))
        .stderr(predicate::str::contains("Scoop not detected"));
}

#[test]
fn test_search_needs_scoop_when_scoop_is_active() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["search", "git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scoop was not detected"));
}

#[test]
fn test_corrupt_config_is_backed_up() {
    let sandbox = Sandbox::new();
    sandbox.write("config.json", "{ not json");

    sandbox.scoopdesk().arg("status").assert().success();

    let backup = sandbox.dir.path().join("config.json.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), "{ not json");
    assert_eq!(sandbox.saved_config()["store"]["managers"], serde_json::json!(["scoop"]));
}

#[test]
fn test_status_reports_missing_scoop() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("not detected")
                .and(predicate::str::contains("Install Scoop: available")),
        );
}

#[test]
fn test_completions_bash() {
    let sandbox = Sandbox::new();
    sandbox
        .scoopdesk()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scoopdesk"));
}
