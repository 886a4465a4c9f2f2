//! Document index: recording documents and appending nodes

use readorder::core::index::{hash_file, DocumentIndex};
use readorder::core::node::TextNode;
use readorder::core::types::NewNodeRecord;
use std::fs;
use tempfile::TempDir;

fn node(id: &str) -> NewNodeRecord {
    NewNodeRecord {
        node_id: id.to_string(),
        embedding: None,
        metadata: None,
    }
}

fn source(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_index_twice_keeps_one_document_and_appends_nodes() {
    let dir = TempDir::new().unwrap();
    let index = DocumentIndex::open(dir.path().join("index.db")).unwrap();
    let path = source(&dir, "a.pdf", "same bytes");

    let first = index.index_document(&path, Some(&[node("n1")])).unwrap();
    let second = index.index_document(&path, Some(&[node("n2")])).unwrap();

    assert_eq!(first, second);
    assert_eq!(index.document_count().unwrap(), 1);
    let ids: Vec<_> = index
        .list_nodes(&path)
        .unwrap()
        .into_iter()
        .map(|n| n.node_id)
        .collect();
    assert_eq!(ids, vec!["n1", "n2"]);
}

#[test]
fn test_record_carries_name_and_content_hash() {
    let dir = TempDir::new().unwrap();
    let index = DocumentIndex::open(dir.path().join("index.db")).unwrap();
    let path = source(&dir, "report.pdf", "abc");

    index.index_document(&path, None).unwrap();

    let docs = index.list_documents().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "report.pdf");
    assert_eq!(docs[0].path, path.to_string_lossy());
    assert_eq!(
        docs[0].hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(docs[0].hash, hash_file(&path).unwrap());
    assert_eq!(index.node_count().unwrap(), 0);
}

#[test]
fn test_reopening_existing_database_keeps_data() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("nested").join("index.db");
    let path = source(&dir, "a.pdf", "x");

    DocumentIndex::open(&db)
        .unwrap()
        .index_document(&path, Some(&[node("n1")]))
        .unwrap();

    let reopened = DocumentIndex::open(&db).unwrap();
    reopened.ensure_schema().unwrap();
    assert_eq!(reopened.document_count().unwrap(), 1);
    assert_eq!(reopened.node_count().unwrap(), 1);
}

#[test]
fn test_distinct_paths_get_distinct_ids() {
    let dir = TempDir::new().unwrap();
    let index = DocumentIndex::open(dir.path().join("index.db")).unwrap();
    let a = source(&dir, "a.pdf", "same");
    let b = source(&dir, "b.pdf", "same");

    let id_a = index.index_document(&a, Some(&[node("a1")])).unwrap();
    let id_b = index.index_document(&b, Some(&[node("b1"), node("b2")])).unwrap();

    assert_ne!(id_a, id_b);
    assert_eq!(index.list_nodes(&a).unwrap().len(), 1);
    assert_eq!(index.list_nodes(&b).unwrap().len(), 2);
}

#[test]
fn test_missing_file_leaves_index_untouched() {
    let dir = TempDir::new().unwrap();
    let index = DocumentIndex::open(dir.path().join("index.db")).unwrap();

    let err = index
        .index_document(&dir.path().join("gone.pdf"), Some(&[node("n1")]))
        .unwrap_err();
    assert!(!err.is_persistence());
    assert_eq!(index.document_count().unwrap(), 0);
    assert_eq!(index.node_count().unwrap(), 0);
}

#[test]
fn test_text_node_metadata_round_trips_links() {
    let dir = TempDir::new().unwrap();
    let index = DocumentIndex::open(dir.path().join("index.db")).unwrap();
    let path = source(&dir, "a.pdf", "x");

    let arena = readorder::core::node::NodeArena::linked(vec![
        TextNode::new("first"),
        TextNode::new("second"),
    ]);
    let records: Vec<_> = arena
        .iter()
        .map(|n| NewNodeRecord::from_text_node(n, Some(vec![1, 2, 3])))
        .collect::<Result<_, _>>()
        .unwrap();
    index.index_document(&path, Some(&records)).unwrap();

    let stored = index.list_nodes(&path).unwrap();
    assert_eq!(stored[0].embedding, Some(vec![1, 2, 3]));

    let meta: serde_json::Value =
        serde_json::from_str(stored[0].metadata.as_deref().unwrap()).unwrap();
    assert_eq!(meta["text"], "first");
    assert_eq!(meta["relationships"]["next"], stored[1].node_id.as_str());
    assert!(meta["relationships"].get("previous").is_none());
}
