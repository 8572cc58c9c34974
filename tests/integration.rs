use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn catalog_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_catalog"))
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/catalog.sqlite"

[server]
bind = "127.0.0.1:7341"

[pagination]
default_limit = 10
max_limit = 50

[logging]
level = "warn"
"#,
        root.display()
    );

    let config_path = config_dir.join("catalog.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_catalog(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = catalog_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run catalog binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn create(config_path: &Path, title: &str) -> String {
    let (stdout, stderr, success) = run_catalog(
        config_path,
        &["create", "--title", title, "--gender", "unisex", "--size", "M"],
    );
    assert!(success, "create failed: stdout={}, stderr={}", stdout, stderr);
    // "Created product <uuid> (slug: ...)"
    stdout
        .split_whitespace()
        .nth(2)
        .expect("id in create output")
        .to_string()
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_catalog(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data").join("catalog.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_catalog(&config_path, &["init"]);
    assert!(success1, "First init failed");
    let (_, _, success2) = run_catalog(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_create_normalizes_slug() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);

    let (stdout, _, success) = run_catalog(
        &config_path,
        &[
            "create", "--title", "Men's T-Shirt", "--gender", "men", "--size", "S", "--size", "M",
            "--price", "19.5", "--tag", "shirt",
        ],
    );
    assert!(success);
    assert!(stdout.contains("(slug: men_s_t_shirt)"), "got: {}", stdout);
}

#[test]
fn test_get_by_title_slug_and_id() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);
    let id = create(&config_path, "Red Shoes");

    for term in ["red shoes", "red_shoes", id.as_str()] {
        let (stdout, stderr, success) = run_catalog(&config_path, &["get", term]);
        assert!(success, "get {} failed: {}", term, stderr);
        assert!(stdout.contains(&id));
        assert!(stdout.contains("slug:        red_shoes"));
    }
}

#[test]
fn test_get_missing_fails() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);

    let (_, stderr, success) = run_catalog(&config_path, &["get", "nonexistent"]);
    assert!(!success);
    assert!(stderr.contains("Product with nonexistent not found"), "got: {}", stderr);
}

#[test]
fn test_duplicate_title_fails() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);
    create(&config_path, "Red Shoes");

    let (_, stderr, success) = run_catalog(
        &config_path,
        &["create", "--title", "Red Shoes", "--gender", "men", "--size", "L"],
    );
    assert!(!success);
    assert!(stderr.contains("UNIQUE"), "got: {}", stderr);
}

#[test]
fn test_list_pagination() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);
    for t in ["One", "Two", "Three", "Four", "Five"] {
        create(&config_path, t);
    }

    let (stdout, _, success) =
        run_catalog(&config_path, &["list", "--limit", "2", "--offset", "1"]);
    assert!(success);
    assert!(stdout.contains("2 product(s)"));
    assert!(stdout.contains("Two"));
    assert!(stdout.contains("Three"));
    assert!(!stdout.contains("One "));
    assert!(!stdout.contains("Four"));

    let (_, _, success) = run_catalog(&config_path, &["list", "--limit", "500"]);
    assert!(!success, "limit above max_limit should fail");
}

#[test]
fn test_update_keeps_slug_on_rename() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);
    let id = create(&config_path, "Red Shoes");

    let (stdout, stderr, success) = run_catalog(
        &config_path,
        &["update", &id, "--title", "Blue Shoes", "--stock", "8"],
    );
    assert!(success, "update failed: {}", stderr);
    assert!(stdout.contains("title:       Blue Shoes"));
    assert!(stdout.contains("slug:        red_shoes"));
    assert!(stdout.contains("stock:       8"));
}

#[test]
fn test_update_rejects_non_uuid() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);

    let (_, stderr, success) = run_catalog(&config_path, &["update", "red_shoes", "--stock", "1"]);
    assert!(!success);
    assert!(stderr.contains("must be a UUID"), "got: {}", stderr);
}

#[test]
fn test_delete_then_get_fails() {
    let (_tmp, config_path) = setup_test_env();
    run_catalog(&config_path, &["init"]);
    let id = create(&config_path, "Red Shoes");

    let (_, stderr, success) = run_catalog(&config_path, &["delete", &id]);
    assert!(success, "delete failed: {}", stderr);

    let (_, _, success) = run_catalog(&config_path, &["get", &id]);
    assert!(!success);
}

#[test]
fn test_missing_config_fails() {
    let (_, stderr, success) = run_catalog(Path::new("/nonexistent/catalog.toml"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
