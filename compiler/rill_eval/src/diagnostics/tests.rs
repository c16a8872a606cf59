#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;
use rill_ir::StringInterner;

use super::*;
use crate::errors::EvalErrorKind;

#[test]
fn empty_stack() {
    let stack = CallStack::new(100);
    assert!(stack.is_empty());
    assert_eq!(stack.depth(), 0);
}

#[test]
fn push_and_pop() {
    let interner = StringInterner::new();
    let name = interner.intern("foo");
    let mut stack = CallStack::new(100);
    stack.push(CallFrame::new(name, None)).unwrap();
    assert_eq!(stack.depth(), 1);
    let frame = stack.pop().unwrap();
    assert_eq!(frame.name, name);
    assert!(stack.is_empty());
}

#[test]
fn depth_limit_enforced() {
    let interner = StringInterner::new();
    let name = interner.intern("recurse");
    let mut stack = CallStack::new(3);
    for _ in 0..3 {
        stack.push(CallFrame::new(name, None)).unwrap();
    }
    let err = stack.push(CallFrame::new(name, None)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 3 });
    assert_eq!(stack.depth(), 3);
}

#[test]
fn return_slot_belongs_to_the_innermost_frame() {
    let interner = StringInterner::new();
    let outer = interner.intern("outer");
    let inner = interner.intern("inner");
    let mut stack = CallStack::default();
    stack.push(CallFrame::new(outer, None)).unwrap();
    stack.push(CallFrame::new(inner, None)).unwrap();
    stack.current_frame_mut().unwrap().return_value = Some(Value::Int(7));

    let frame = stack.pop().unwrap();
    assert_eq!(frame.return_value, Some(Value::Int(7)));
    assert_eq!(stack.current_frame_mut().unwrap().return_value, None);
}

#[test]
fn capture_lists_innermost_first() {
    let interner = StringInterner::new();
    let mut stack = CallStack::default();
    stack
        .push(CallFrame::new(interner.intern("main"), None))
        .unwrap();
    stack
        .push(CallFrame::new(interner.intern("helper"), None))
        .unwrap();
    assert_eq!(
        stack.capture(&interner),
        vec!["helper".to_string(), "main".to_string()]
    );
}
