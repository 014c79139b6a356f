use assert_cmd::Command;
use std::fs;
use tempfile::{tempdir, TempDir};

/// Returns a configured Command for `sinkddl`
pub fn sinkddl_cmd() -> Command {
    Command::cargo_bin("sinkddl").expect("Binary not found")
}

/// Prepares a temp dir holding a valid table descriptor file
pub fn setup_test_descriptor() -> (TempDir, String) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let descriptor_path = temp_dir.path().join("orders.toml");

    fs::write(
        &descriptor_path,
        r#"
database = "sales"
table = "orders"
comment = "order facts"

[[columns]]
name = "id"
type = "bigint"

[[columns]]
name = "amount"
type = "decimal(10,2)"
comment = "gross amount"
        "#,
    )
    .unwrap();

    let path = descriptor_path.to_str().unwrap().to_string();
    (temp_dir, path)
}
