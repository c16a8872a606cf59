use pretty_assertions::assert_eq;

use super::*;

#[test]
fn buffer_captures_lines() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.println("world");
    assert_eq!(handler.output(), "hello\nworld\n");
}

#[test]
fn buffer_clear_empties_output() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.clear();
    assert!(handler.output().is_empty());
}

#[test]
fn silent_discards_output() {
    let handler = silent_handler();
    handler.println("hello");
    assert_eq!(handler.output(), "");
}

#[test]
fn stdout_does_not_capture() {
    let handler = stdout_handler();
    handler.clear();
    assert_eq!(handler.output(), "");
}

#[test]
fn shared_handler_sees_writes_from_clones() {
    let handler = buffer_handler();
    let clone = Arc::clone(&handler);
    clone.println("from clone");
    assert_eq!(handler.output(), "from clone\n");
}
