use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `ckl` with config, token, and server isolated from the host
/// environment. Port 1 is unroutable; commands under test must fail
/// before reaching the network.
fn ckl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ckl").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("CKL_API_URL", "http://127.0.0.1:1");
    cmd
}

#[test]
fn test_help_names_the_subcommands() {
    let home = TempDir::new().unwrap();
    ckl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("lists"))
        .stdout(predicate::str::contains("items"));
}

#[test]
fn test_auth_status_starts_logged_out() {
    let home = TempDir::new().unwrap();
    ckl(&home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"))
        .stdout(predicate::str::contains("http://127.0.0.1:1"));
}

#[test]
fn test_auth_status_reports_stored_token() {
    let home = TempDir::new().unwrap();
    let token_dir = home.path().join(".config/checklist");
    std::fs::create_dir_all(&token_dir).unwrap();
    std::fs::write(token_dir.join("token"), "tok-abc").unwrap();

    ckl(&home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"));
}

#[test]
fn test_logout_removes_the_token_file() {
    let home = TempDir::new().unwrap();
    let token_dir = home.path().join(".config/checklist");
    std::fs::create_dir_all(&token_dir).unwrap();
    let token_path = token_dir.join("token");
    std::fs::write(&token_path, "tok-abc").unwrap();

    ckl(&home)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!token_path.exists());
}

#[test]
fn test_lists_without_session_fails_before_network() {
    let home = TempDir::new().unwrap();
    ckl(&home)
        .arg("lists")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_create_list_rejects_blank_title() {
    let home = TempDir::new().unwrap();
    ckl(&home)
        .args(["lists", "create", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title must not be empty"));
}

#[test]
fn test_items_requires_a_list_id() {
    let home = TempDir::new().unwrap();
    ckl(&home)
        .arg("items")
        .assert()
        .failure()
        .stderr(predicate::str::contains("list_id").or(predicate::str::contains("LIST_ID")));
}

#[test]
fn test_config_file_supplies_api_url() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config/checklist");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "api_url = \"http://example.invalid:9\"\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("ckl").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("CKL_API_URL");
    cmd.args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.invalid:9"));
}

#[test]
fn test_env_var_overrides_config_file() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config/checklist");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "api_url = \"http://example.invalid:9\"\n",
    )
    .unwrap();

    ckl(&home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:1"));
}
