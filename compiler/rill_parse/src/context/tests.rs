use super::*;
use pretty_assertions::assert_eq;
use rill_ir::StringInterner;

#[test]
fn lookup_walks_outward() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut ctx = CompilationContext::new(ValueType::Void);
    assert!(ctx.declare(x, ValueType::INT));
    ctx.push(ScopeFlags::empty());
    assert_eq!(ctx.lookup(x), Some(&Symbol::Variable(ValueType::INT)));
    ctx.pop();
    assert_eq!(ctx.depth(), 1);
}

#[test]
fn shadowing_an_enclosing_name_is_refused() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut ctx = CompilationContext::new(ValueType::Void);
    assert!(ctx.declare(x, ValueType::INT));
    ctx.push(ScopeFlags::empty());
    assert!(!ctx.declare(x, ValueType::DOUBLE));
    assert!(!ctx.declare_constant(x, Literal::Int(1)));
}

#[test]
fn sibling_scopes_may_reuse_names() {
    let interner = StringInterner::new();
    let i = interner.intern("i");
    let mut ctx = CompilationContext::new(ValueType::Void);
    ctx.push(ScopeFlags::LOOP);
    assert!(ctx.declare(i, ValueType::INT));
    ctx.pop();
    ctx.push(ScopeFlags::LOOP);
    assert!(ctx.declare(i, ValueType::INT));
}

#[test]
fn loop_flags_stop_at_function_boundary() {
    let mut ctx = CompilationContext::new(ValueType::Void);
    ctx.push(ScopeFlags::LOOP);
    assert!(ctx.in_loop());
    ctx.push_function(ValueType::INT);
    assert!(!ctx.in_loop());
    assert!(!ctx.in_breakable());
    assert_eq!(ctx.return_type(), &ValueType::INT);
}

#[test]
fn switch_allows_break_but_not_continue() {
    let mut ctx = CompilationContext::new(ValueType::Void);
    ctx.push(ScopeFlags::SWITCH);
    assert!(ctx.in_breakable());
    assert!(!ctx.in_loop());
}

#[test]
fn root_scope_is_never_popped() {
    let mut ctx = CompilationContext::new(ValueType::BOOL);
    ctx.pop();
    ctx.pop();
    assert!(ctx.is_top_level());
    assert_eq!(ctx.return_type(), &ValueType::BOOL);
}
