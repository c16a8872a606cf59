use pretty_assertions::assert_eq;
use rill_ir::ast::{ControlKind, Conversion, InPlacePlan, Place, Stmt};
use rill_ir::{ArithOp, CompoundOp, Literal, PrimitiveKind, ValueType};

use super::{initializer, parse_source};

fn primitive_plan(stmt: &Stmt) -> rill_ir::PrimitivePlan {
    match stmt {
        Stmt::NumericInPlace(op) => match &op.plan {
            InPlacePlan::Primitive(plan) => *plan,
            InPlacePlan::Host(_) => panic!("expected a primitive plan"),
        },
        other => panic!("expected an in-place operation, found {other:?}"),
    }
}

#[test]
fn declarations_and_compound_assignment() {
    let script = parse_source("int x = 1; x += 2;");
    assert_eq!(script.body.len(), 2);
    let plan = primitive_plan(&script.body[1]);
    assert_eq!(plan.target, PrimitiveKind::Int);
    assert!(!plan.widen);
    assert_eq!(plan.op, ArithOp::Add);
}

#[test]
fn literal_operand_narrows_to_byte() {
    let script = parse_source("byte b = 5; b += 3;");
    let Stmt::NumericInPlace(op) = &script.body[1] else {
        panic!("expected in-place operation");
    };
    assert!(matches!(op.operand.as_literal(), Some(Literal::Byte(3))));
    assert!(!primitive_plan(&script.body[1]).widen);
}

#[test]
fn narrower_operand_widens() {
    let script = parse_source("int x = 5; x += (byte)3;");
    let plan = primitive_plan(&script.body[1]);
    assert!(plan.widen);
    assert_eq!(plan.operand, PrimitiveKind::Int);
}

#[test]
fn float_xor_assign_is_power() {
    let script = parse_source("double d = 2; d ^= 3;");
    assert_eq!(primitive_plan(&script.body[1]).op, ArithOp::Pow);
}

#[test]
fn shift_right_assign_from_adjacent_tokens() {
    let script = parse_source("long v = 64; v >>= 2;");
    let Stmt::NumericInPlace(op) = &script.body[1] else {
        panic!("expected in-place operation");
    };
    assert_eq!(op.op, CompoundOp::Shr);
    assert_eq!(primitive_plan(&script.body[1]).operand, PrimitiveKind::Int);
}

#[test]
fn increments_are_in_place_operations() {
    let script = parse_source("int i = 0; i++; --i;");
    let Stmt::NumericInPlace(inc) = &script.body[1] else {
        panic!("expected in-place operation");
    };
    assert_eq!(inc.op, CompoundOp::Add);
    let Stmt::NumericInPlace(dec) = &script.body[2] else {
        panic!("expected in-place operation");
    };
    assert_eq!(dec.op, CompoundOp::Sub);
}

#[test]
fn string_plus_assign_is_concatenation() {
    let script = parse_source(r#"string s = "a"; s += 1;"#);
    assert!(matches!(script.body[1], Stmt::StringConcat(_)));
}

#[test]
fn logical_assign() {
    let script = parse_source("bool ok = true; ok &&= false; ok ||= true;");
    assert!(matches!(script.body[1], Stmt::BooleanInPlace(_)));
    assert!(matches!(script.body[2], Stmt::BooleanInPlace(_)));
}

#[test]
fn multi_declaration() {
    let script = parse_source("int a = 1, b, c = 3;");
    let Stmt::Multi(multi) = &script.body[0] else {
        panic!("expected multi statement");
    };
    assert_eq!(multi.statements.len(), 3);
    assert!(matches!(multi.statements[1], Stmt::Declaration(_)));
}

#[test]
fn constants_are_inlined() {
    let script = parse_source("const int N = 4; int x = N;");
    assert_eq!(script.body.len(), 1);
    assert!(matches!(initializer(&script, 0).as_literal(), Some(Literal::Int(4))));
}

#[test]
fn cast_constant_is_folded() {
    let script = parse_source("const byte B = (byte)300; int x = B;");
    assert!(matches!(initializer(&script, 0).as_literal(), Some(Literal::Byte(44))));
    let Stmt::DeclarationAssignment(decl) = &script.body[0] else {
        panic!("expected declaration");
    };
    assert_eq!(decl.conversion, Conversion::Numeric(PrimitiveKind::Int));
}

#[test]
fn declaration_records_conversion() {
    let script = parse_source("long l = 1;");
    let Stmt::DeclarationAssignment(decl) = &script.body[0] else {
        panic!("expected declaration");
    };
    assert_eq!(decl.conversion, Conversion::Numeric(PrimitiveKind::Long));
}

#[test]
fn else_if_chain_is_flattened() {
    let script = parse_source(
        "int x = 2; if (x == 1) { x = 10; } else if (x == 2) x = 20; else { x = 30; }",
    );
    let Stmt::If(stmt) = &script.body[1] else {
        panic!("expected if");
    };
    assert_eq!(stmt.branches.len(), 2);
    assert!(stmt.otherwise.is_some());
}

#[test]
fn for_loop_parts() {
    let script = parse_source("int s = 0; for (int i = 0; i < 3; i++) { s += i; }");
    let Stmt::For(stmt) = &script.body[1] else {
        panic!("expected for");
    };
    assert_eq!(stmt.initializers.len(), 1);
    assert!(stmt.condition.is_some());
    assert_eq!(stmt.increments.len(), 1);
    assert_eq!(stmt.body.statements.len(), 1);
}

#[test]
fn for_loop_without_condition() {
    let script = parse_source("for (;;) { break; }");
    let Stmt::For(stmt) = &script.body[0] else {
        panic!("expected for");
    };
    assert!(stmt.condition.is_none());
    assert!(matches!(
        stmt.body.statements[0],
        Stmt::Control(ref c) if c.kind == ControlKind::Break
    ));
}

#[test]
fn loop_variables_may_be_reused_by_sibling_loops() {
    let script = parse_source(
        "for (int i = 0; i < 2; i++) {} for (int i = 0; i < 2; i++) {}",
    );
    assert_eq!(script.body.len(), 2);
}

#[test]
fn foreach_converts_elements() {
    let script = parse_source(
        "List<int> xs = new List<int>() { 1, 2 }; foreach (long v in xs) { print(v); }",
    );
    let Stmt::ForEach(stmt) = &script.body[1] else {
        panic!("expected foreach");
    };
    assert_eq!(stmt.conversion, Conversion::Numeric(PrimitiveKind::Long));
    assert_eq!(stmt.variable_ty, ValueType::Primitive(PrimitiveKind::Long));
}

#[test]
fn switch_sections_and_default() {
    let script = parse_source(
        "int x = 2; int y = 0;
         switch (x) {
             case 1:
             case 2: y = 12; break;
             case 3: y = 3; break;
             default: y = -1; break;
         }",
    );
    let Stmt::Switch(stmt) = &script.body[2] else {
        panic!("expected switch");
    };
    assert_eq!(stmt.sections.len(), 3);
    assert_eq!(stmt.cases.get(&Literal::Int(1)), Some(&0));
    assert_eq!(stmt.cases.get(&Literal::Int(2)), Some(&0));
    assert_eq!(stmt.cases.get(&Literal::Int(3)), Some(&1));
    assert_eq!(stmt.default, Some(2));
}

#[test]
fn switch_labels_take_the_subject_type() {
    let script = parse_source("long v = 1; switch (v) { case 1: break; }");
    let Stmt::Switch(stmt) = &script.body[1] else {
        panic!("expected switch");
    };
    assert!(stmt.cases.contains_key(&Literal::Long(1)));
    assert!(!stmt.cases.contains_key(&Literal::Int(1)));
}

#[test]
fn continue_inside_switch_inside_loop() {
    let script = parse_source(
        "for (int i = 0; i < 3; i++) { switch (i) { case 1: continue; default: break; } }",
    );
    assert_eq!(script.body.len(), 1);
}

#[test]
fn functions_are_collected_and_skipped() {
    let script = parse_source(
        "int twice(int v) { return helper(v) * 2; }
         int helper(int v) { return v; }
         int r = twice(4);",
    );
    assert_eq!(script.functions.len(), 2);
    assert_eq!(script.body.len(), 1);
    let twice = script.function_named("twice").unwrap();
    assert_eq!(twice.params.len(), 1);
    assert_eq!(twice.return_type, ValueType::INT);
}

#[test]
fn function_bodies_see_top_level_names() {
    let script = parse_source("void bump() { counter += 1; } int counter = 0; bump();");
    assert_eq!(script.body.len(), 2);
    assert!(script.function_named("bump").is_some());
}

#[test]
fn list_element_assignment() {
    let script = parse_source("List<int> xs = new List<int>() { 1 }; xs[0] = 5; xs[0] += 1;");
    let Stmt::Assignment(assign) = &script.body[1] else {
        panic!("expected assignment");
    };
    assert!(matches!(assign.target, Place::Index { .. }));
    assert!(matches!(script.body[2], Stmt::NumericInPlace(_)));
}

#[test]
fn nested_generic_types_close() {
    let script = parse_source("List<List<int>> grid = new List<List<int>>();");
    let Stmt::DeclarationAssignment(decl) = &script.body[0] else {
        panic!("expected declaration");
    };
    assert_eq!(decl.ty, ValueType::list_of(ValueType::list_of(ValueType::INT)));
}

#[test]
fn extern_and_global_declarations() {
    let script = parse_source("extern int limit = 10; global string name = \"rill\";");
    assert!(matches!(script.body[0], Stmt::Extern(_)));
    assert!(matches!(script.body[1], Stmt::Global(_)));
}

#[test]
fn empty_statements_produce_nothing() {
    let script = parse_source(";; int x = 1;;");
    assert_eq!(script.body.len(), 1);
}
