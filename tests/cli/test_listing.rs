//! Tests for list-documents and list-nodes

use crate::common::{create_test_services, write_dump, PageBuilder};
use readorder::cli::commands::{documents, nodes};
use readorder::cli::OutputFormat;

#[test]
fn test_list_documents_empty_index() {
    let (services, _temp) = create_test_services();
    for format in [OutputFormat::Human, OutputFormat::Json] {
        assert!(documents::execute(documents::DocumentsArgs {}, &services, format).is_ok());
    }
}

#[test]
fn test_list_nodes_after_indexing() {
    let (services, temp) = create_test_services();
    let dump = write_dump(
        temp.path(),
        "doc.json",
        vec![PageBuilder::new(1).line("first", 100.0).build()],
    );
    services.index_file(&dump).unwrap();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = nodes::NodesArgs {
            path: dump.clone(),
            width: 20,
        };
        assert!(nodes::execute(args, &services, format).is_ok());
    }
    assert!(documents::execute(documents::DocumentsArgs {}, &services, OutputFormat::Human).is_ok());
}

#[test]
fn test_list_nodes_unknown_path_is_empty_not_error() {
    let (services, temp) = create_test_services();
    let args = nodes::NodesArgs {
        path: temp.path().join("never-indexed.pdf"),
        width: 60,
    };
    assert!(nodes::execute(args, &services, OutputFormat::Human).is_ok());
}
