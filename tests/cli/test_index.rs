//! Tests for the index command

use crate::common::{create_test_services, write_dump, PageBuilder};
use readorder::cli::commands::index::{execute, IndexArgs};
use readorder::cli::OutputFormat;

#[test]
fn test_index_directory_human() {
    let (services, temp) = create_test_services();
    let dumps = temp.path().join("dumps");
    write_dump(&dumps, "a.json", vec![PageBuilder::new(1).line("alpha", 100.0).build()]);
    write_dump(&dumps, "b.json", vec![PageBuilder::new(1).line("beta", 100.0).build()]);

    let args = IndexArgs {
        path: dumps,
        quiet: true,
    };
    let result = execute(args, &services, OutputFormat::Human);
    assert!(result.is_ok(), "index should succeed: {:?}", result.err());
    assert_eq!(services.index.document_count().unwrap(), 2);
}

#[test]
fn test_index_single_file_json() {
    let (services, temp) = create_test_services();
    let dump = write_dump(
        temp.path(),
        "one.json",
        vec![PageBuilder::new(1).line("x", 100.0).line("y", 120.0).line("z", 140.0).build()],
    );

    let args = IndexArgs {
        path: dump.clone(),
        quiet: false,
    };
    assert!(execute(args, &services, OutputFormat::Json).is_ok());
    assert_eq!(services.index.list_nodes(&dump).unwrap().len(), 2);
}

#[test]
fn test_index_nonexistent_path() {
    let (services, temp) = create_test_services();
    let args = IndexArgs {
        path: temp.path().join("nope"),
        quiet: true,
    };
    let err = execute(args, &services, OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
