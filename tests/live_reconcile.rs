#![cfg(feature = "integration")]
//! Reconciliation tests against a live store.
//!
//! These only run when SINKDDL_TEST_URL (plus SINKDDL_TEST_USER and
//! SINKDDL_TEST_PASSWORD) point at a reachable engine with an installed
//! ODBC driver; otherwise each test skips itself.

use std::env;

use sinkddl::model::descriptor::{ColumnDescriptor, StorageOptions, TableDescriptor};
use sinkddl::reconciler::{self, ConnectOptions};

struct LiveTarget {
    url: String,
    user: String,
    password: String,
}

fn live_target() -> Option<LiveTarget> {
    let url = env::var("SINKDDL_TEST_URL").ok()?;
    Some(LiveTarget {
        url,
        user: env::var("SINKDDL_TEST_USER").unwrap_or_default(),
        password: env::var("SINKDDL_TEST_PASSWORD").unwrap_or_default(),
    })
}

fn test_table() -> TableDescriptor {
    TableDescriptor {
        database: "sinkddl_it".into(),
        table: "reconcile_probe".into(),
        comment: None,
        columns: vec![
            ColumnDescriptor::new("id", "bigint"),
            ColumnDescriptor::new("payload", "varchar(255)"),
        ],
        storage: StorageOptions::default(),
    }
}

#[test]
fn create_db_twice_is_a_no_op() {
    let Some(target) = live_target() else {
        eprintln!("SINKDDL_TEST_URL not set, skipping live test");
        return;
    };
    let options = ConnectOptions::default();

    reconciler::run_create_db(
        &target.url,
        &target.user,
        &target.password,
        "sinkddl_it",
        &options,
    )
    .expect("first create_db");

    // Second call must observe the database and do nothing.
    reconciler::run_create_db(
        &target.url,
        &target.user,
        &target.password,
        "sinkddl_it",
        &options,
    )
    .expect("second create_db");
}

#[test]
fn add_columns_only_appends_the_missing_ones() {
    let Some(target) = live_target() else {
        eprintln!("SINKDDL_TEST_URL not set, skipping live test");
        return;
    };
    let options = ConnectOptions::default();
    let table = test_table();

    reconciler::run_create_db(
        &target.url,
        &target.user,
        &target.password,
        &table.database,
        &options,
    )
    .expect("create_db");
    reconciler::run_create_table(
        &target.url,
        &target.user,
        &target.password,
        &table,
        false,
        &options,
    )
    .expect("create_table");

    // Declared columns all exist already: zero DDL.
    let added = reconciler::run_add_columns(
        &target.url,
        &target.user,
        &target.password,
        &table,
        false,
        &options,
    )
    .expect("add_columns on identical schema");
    assert!(added.is_empty());

    // Extend the descriptor by two columns: exactly those get added, in order.
    let mut extended = table.clone();
    extended
        .columns
        .push(ColumnDescriptor::new("region", "varchar(64)"));
    extended
        .columns
        .push(ColumnDescriptor::new("score", "bigint"));

    let added = reconciler::run_add_columns(
        &target.url,
        &target.user,
        &target.password,
        &extended,
        false,
        &options,
    )
    .expect("add_columns with extension");
    let names: Vec<&str> = added.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["region", "score"]);

    // Introspection reports every declared column afterwards.
    let columns = reconciler::run_describe(
        &target.url,
        &target.user,
        &target.password,
        &extended.database,
        &extended.table,
        &options,
    )
    .expect("describe");
    for declared in &extended.columns {
        assert!(columns.iter().any(|c| c.name == declared.name));
    }
}
