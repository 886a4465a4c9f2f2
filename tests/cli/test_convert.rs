//! Tests for the convert command

use crate::common::{create_test_services, write_dump, PageBuilder};
use readorder::cli::commands::convert::{execute, ConvertArgs};
use readorder::cli::OutputFormat;

#[test]
fn test_convert_default_save_directory() {
    let (services, temp) = create_test_services();
    let dump = write_dump(
        temp.path(),
        "memo.json",
        vec![PageBuilder::new(1).line("Dear team", 100.0).build()],
    );

    let args = ConvertArgs { dump, out: None };
    let result = execute(args, &services, OutputFormat::Human);
    assert!(result.is_ok(), "convert should succeed: {:?}", result.err());
    assert!(temp
        .path()
        .join("processed_sources")
        .join("memo")
        .join("memo.md")
        .exists());
}

#[test]
fn test_convert_explicit_out_json() {
    let (services, temp) = create_test_services();
    let dump = write_dump(
        temp.path(),
        "memo.json",
        vec![PageBuilder::new(1).line("Dear team", 100.0).build()],
    );
    let out = temp.path().join("elsewhere");

    let args = ConvertArgs {
        dump,
        out: Some(out.clone()),
    };
    assert!(execute(args, &services, OutputFormat::Json).is_ok());
    assert!(out.join("memo").join("memo.md").exists());
}

#[test]
fn test_convert_missing_dump_fails() {
    let (services, temp) = create_test_services();
    let args = ConvertArgs {
        dump: temp.path().join("absent.json"),
        out: None,
    };
    assert!(execute(args, &services, OutputFormat::Human).is_err());
}
