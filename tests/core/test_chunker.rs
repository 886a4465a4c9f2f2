//! Node chunking and linking

use crate::common::{pipe_linearizer, PageBuilder};
use readorder::core::chunker::NodeChunker;
use readorder::core::format::PipeTableFormatter;
use readorder::core::node::NodeArena;
use readorder::core::table::{Row, Table};

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| Some(c.to_string())).collect()
}

fn texts(arena: &NodeArena) -> Vec<&str> {
    arena.iter().map(|n| n.text.as_str()).collect()
}

fn assert_linked_chain(arena: &NodeArena) {
    let nodes = arena.as_slice();
    for (i, node) in nodes.iter().enumerate() {
        let expected_prev = i.checked_sub(1).map(|p| &nodes[p].node_id);
        let expected_next = nodes.get(i + 1).map(|n| &n.node_id);
        assert_eq!(node.previous(), expected_prev, "node {i}");
        assert_eq!(node.next(), expected_next, "node {i}");
    }
}

#[test]
fn test_line_windows_are_linked_in_order() {
    let arena = NodeChunker::new(2).chunk_text("l1\nl2\nl3\nl4\nl5");

    assert_eq!(texts(&arena), vec!["l1\nl2", "l3\nl4", "l5"]);
    assert_linked_chain(&arena);

    let first = arena.first().unwrap();
    let second = arena.next_of(&first.node_id).unwrap();
    assert_eq!(second.text, "l3\nl4");
    assert_eq!(arena.previous_of(&second.node_id).unwrap().node_id, first.node_id);
}

#[test]
fn test_single_node_has_no_links() {
    let arena = NodeChunker::new(10).chunk_text("just one line");
    assert_eq!(arena.len(), 1);
    assert!(arena.first().unwrap().relationships.is_empty());
}

#[test]
fn test_node_ids_are_unique() {
    let arena = NodeChunker::new(1).chunk_text(&"x\n".repeat(50));
    let mut ids: Vec<_> = arena.iter().map(|n| n.node_id.to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), arena.len());
}

#[test]
fn test_table_rows_repeat_the_header() {
    let table = Table::with_header(row(&["h1", "h2"]), vec![row(&["a", "b"]), row(&["c", "d"])])
        .unwrap();

    let arena = NodeChunker::default()
        .chunk_table(&table, &PipeTableFormatter)
        .unwrap();
    assert_eq!(
        texts(&arena),
        vec![
            "<table_data>\nh1|h2\na|b\n</table_data>",
            "<table_data>\nh1|h2\nc|d\n</table_data>"
        ]
    );
    assert_linked_chain(&arena);
}

#[test]
fn test_continued_table_inherits_header() {
    let first = Table::new(vec![row(&["Name", "Qty"]), row(&["pen", "3"])]);
    let continued = Table::derived(&first, vec![row(&["ink", "7"])]).unwrap();

    let arena = NodeChunker::default()
        .chunk_table(&continued, &PipeTableFormatter)
        .unwrap();
    assert_eq!(texts(&arena), vec!["<table_data>\nName|Qty\nink|7\n</table_data>"]);
}

#[test]
fn test_mismatched_row_is_validation_error() {
    let table = Table::new(vec![row(&["A", "B"]), row(&["only"])]);
    let err = NodeChunker::default()
        .chunk_table(&table, &PipeTableFormatter)
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_pages_form_one_chain() {
    let linearizer = pipe_linearizer();
    let pages: Vec<_> = [
        PageBuilder::new(1).line("p1a", 100.0).line("p1b", 120.0).line("p1c", 140.0),
        PageBuilder::new(2).line("p2a", 100.0),
    ]
    .into_iter()
    .map(|builder| linearizer.linearize(&builder.build()).unwrap())
    .collect();

    let arena = NodeChunker::new(2).chunk_pages(&pages);
    assert_eq!(texts(&arena), vec!["p1a\np1b", "p1c", "p2a"]);
    assert_linked_chain(&arena);
}
