use super::*;
use pretty_assertions::assert_eq;

#[test]
fn single_line() {
    let source = "int x = 1;";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.offset_to_line_col(source, 4), (1, 5));
}

#[test]
fn offsets_on_newline_belong_to_their_line() {
    let source = "a\nbb\nccc";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_from_offset(1), 1);
    assert_eq!(table.line_from_offset(2), 2);
    assert_eq!(table.line_from_offset(5), 3);
    assert_eq!(table.offset_to_line_col(source, 7), (3, 3));
}

#[test]
fn columns_count_characters() {
    let source = "string s = \"é\"; x";
    let table = LineOffsetTable::build(source);
    // 'x' is byte 17 but the 17th character.
    assert_eq!(table.offset_to_line_col(source, 17), (1, 17));
}

#[test]
fn line_text_strips_newline() {
    let source = "first\r\nsecond\nthird";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some("third"));
    assert_eq!(table.line_text(source, 4), None);
    assert_eq!(table.line_text(source, 0), None);
}

#[test]
fn span_helper_uses_span_start() {
    let source = "int a;\nint b;";
    assert_eq!(span_start_line_col(source, Span::new(11, 12)), (2, 5));
}
