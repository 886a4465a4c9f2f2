//! Linearization of whole pages: filter plus merge

use crate::common::{pipe_linearizer, PageBuilder};
use readorder::core::geometry::BBox;
use readorder::core::layout::{filter_fragments, Fragment};
use readorder::core::page::RawPage;

#[test]
fn test_table_below_text_is_appended_at_tail() {
    let page = PageBuilder::new(1)
        .line("Hello", 100.0)
        .line("World", 120.0)
        .table(BBox::new(50.0, 200.0, 300.0, 240.0), &[&["A", "B"], &["1", "2"]])
        .build();

    let linear = pipe_linearizer().linearize(&page).unwrap();
    assert_eq!(
        linear.text(),
        "Hello\nWorld\n<table_data>\nA|B\n1|2\n</table_data>"
    );
}

#[test]
fn test_image_above_text_is_placed_at_head() {
    let page = PageBuilder::new(1)
        .line("Top", 100.0)
        .line("Bottom", 200.0)
        .image("fig", 20.0, 60.0)
        .build();

    let linear = pipe_linearizer().linearize(&page).unwrap();
    assert_eq!(linear.text(), "![fig](images/fig.png)\nTop\nBottom");
    assert!(linear.fragments[0].bbox.is_some());
}

#[test]
fn test_image_between_lines_is_placed_in_gap() {
    let page = PageBuilder::new(1)
        .line("Top", 100.0)
        .line("Bottom", 200.0)
        .image("fig", 130.0, 180.0)
        .build();

    let linear = pipe_linearizer().linearize(&page).unwrap();
    assert_eq!(linear.text(), "Top\n![fig](images/fig.png)\n\nBottom");
}

#[test]
fn test_image_straddling_gap_falls_to_tail() {
    // Starts inside the first line's vertical extent
    let page = PageBuilder::new(1)
        .line("Top", 100.0)
        .line("Bottom", 200.0)
        .image("fig", 105.0, 150.0)
        .build();

    let linear = pipe_linearizer().linearize(&page).unwrap();
    assert_eq!(linear.text(), "Top\nBottom\n![fig](images/fig.png)");
}

#[test]
fn test_text_inside_table_region_is_replaced() {
    let page = PageBuilder::new(1)
        .line("Top", 100.0)
        .line("hidden", 190.0)
        .line("Bottom", 300.0)
        .table(BBox::new(40.0, 150.0, 300.0, 250.0), &[&["A", "B"], &["1", "2"]])
        .build();

    let text = pipe_linearizer().linearize(&page).unwrap().text();
    assert_eq!(
        text,
        "Top\n<table_data>\nA|B\n1|2\n</table_data>\n\nBottom"
    );
}

#[test]
fn test_table_covering_line_keeps_its_position() {
    let page = PageBuilder::new(1)
        .line("Intro", 100.0)
        .line("cell", 120.0)
        .line("Outro", 140.0)
        .table(BBox::new(40.0, 115.0, 300.0, 135.0), &[&["cell"]])
        .build();

    let text = pipe_linearizer().linearize(&page).unwrap().text();
    let table = text.find("<table_data>").unwrap();
    let outro = text.find("Outro").unwrap();
    assert!(text.starts_with("Intro\n"));
    assert!(table < outro, "{text}");
    assert_eq!(text.matches("cell").count(), 1);
}

#[test]
fn test_image_between_blank_separated_lines() {
    let mut page = PageBuilder::new(1)
        .line("Top", 100.0)
        .line("Bottom", 200.0)
        .image("fig", 130.0, 180.0)
        .build();
    // Blank line between the two text lines
    page.text_map.insert(1, Fragment::sentinel());

    let text = pipe_linearizer().linearize(&page).unwrap().text();
    assert_eq!(text, "Top\n![fig](images/fig.png)\n\n\nBottom");
}

#[test]
fn test_covered_last_line_leaves_no_trailing_break() {
    let page = PageBuilder::new(1)
        .line("Body", 100.0)
        .line("caption", 300.0)
        .table(BBox::new(40.0, 250.0, 300.0, 350.0), &[&["cap"]])
        .build();

    let text = pipe_linearizer().linearize(&page).unwrap().text();
    assert_eq!(text, "Body\n<table_data>\ncap\n</table_data>");
}

#[test]
fn test_each_element_appears_once() {
    let page = PageBuilder::new(1)
        .line("a", 100.0)
        .line("b", 200.0)
        .line("c", 300.0)
        .image("one", 20.0, 40.0)
        .image("two", 130.0, 180.0)
        .image("three", 400.0, 450.0)
        .build();

    let text = pipe_linearizer().linearize(&page).unwrap().text();
    for name in ["one", "two", "three"] {
        assert_eq!(text.matches(&format!("images/{name}.png")).count(), 1, "{text}");
    }
    let head = text.find("one.png").unwrap();
    let gap = text.find("two.png").unwrap();
    let tail = text.find("three.png").unwrap();
    assert!(head < gap && gap < tail);
}

#[test]
fn test_page_without_regions_passes_through() {
    let page = PageBuilder::new(3).line("only", 100.0).line("text", 120.0).build();

    let linear = pipe_linearizer().linearize(&page).unwrap();
    assert_eq!(linear.page_number, 3);
    assert_eq!(linear.fragments, page.text_map);
    assert_eq!(linear.text(), "only\ntext");
}

#[test]
fn test_inverted_table_box_is_page_error() {
    let page = PageBuilder::new(1)
        .line("x", 100.0)
        .table(BBox::new(0.0, 300.0, 100.0, 200.0), &[&["A"], &["1"]])
        .build();

    let err = pipe_linearizer().linearize(&page).unwrap_err();
    assert!(err.is_page_local());
}

#[test]
fn test_page_dump_json_shape() {
    let json = r#"{
        "page_number": 1,
        "width": 612,
        "height": 792,
        "text_map": [
            {"text": "Hi", "bbox": {"x0": 50, "top": 100, "x1": 70, "bottom": 110}},
            {},
            {"text": "there", "bbox": {"x0": 50, "top": 120, "x1": 90, "bottom": 130}}
        ],
        "images": [{"name": "logo", "x0": 300, "x1": 400, "y0": 742, "y1": 772}]
    }"#;
    let page: RawPage = serde_json::from_str(json).unwrap();

    // y0/y1 are bottom-origin: top = 792 - 772 = 20
    let text = pipe_linearizer().linearize(&page).unwrap().text();
    assert_eq!(text, "![logo](images/logo.png)\nHi\nthere");
}

#[test]
fn test_centroid_rule_keeps_edge_glyphs() {
    let region = BBox::new(0.0, 100.0, 100.0, 200.0);
    let fragments = vec![
        // centroid (50, 95): outside although the box overlaps
        Fragment::glyph("edge", BBox::new(40.0, 90.0, 60.0, 100.0)),
        Fragment::sentinel(),
        Fragment::glyph("inside", BBox::new(40.0, 140.0, 60.0, 150.0)),
        Fragment::text("anchorless"),
    ];

    let kept = filter_fragments(&fragments, &[region]);
    let texts: Vec<_> = kept.iter().map(Fragment::as_str).collect();
    assert_eq!(texts, vec!["edge", "\n", "anchorless"]);
}
