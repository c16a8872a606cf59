use super::*;
use crate::{Literal, PrimitiveKind, Span, Spanned, ValueType};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn compiled_nodes_are_thread_safe() {
    assert_send_sync::<Stmt>();
    assert_send_sync::<Expr>();
    assert_send_sync::<Script>();
}

#[test]
fn convert_to_same_kind_is_identity() {
    let expr = Expr::literal(Literal::Int(3), Span::new(0, 1));
    let converted = expr.convert_to(PrimitiveKind::Int);
    assert!(matches!(converted.kind, ExprKind::Literal(Literal::Int(3))));
}

#[test]
fn convert_to_wider_kind_wraps() {
    let expr = Expr::literal(Literal::Byte(3), Span::new(0, 1));
    let converted = expr.convert_to(PrimitiveKind::Int);
    assert_eq!(converted.ty, ValueType::INT);
    assert!(matches!(
        converted.kind,
        ExprKind::Convert {
            to: PrimitiveKind::Int,
            ..
        }
    ));
}

#[test]
fn conversion_between_types() {
    assert_eq!(
        Conversion::between(&ValueType::Primitive(PrimitiveKind::Byte), &ValueType::INT),
        Conversion::Numeric(PrimitiveKind::Int)
    );
    assert_eq!(
        Conversion::between(&ValueType::INT, &ValueType::INT),
        Conversion::Identity
    );
    assert_eq!(
        Conversion::between(&ValueType::String, &ValueType::String),
        Conversion::Identity
    );
}

#[test]
fn switch_falls_back_to_default_section() {
    let mut cases = FxHashMap::default();
    cases.insert(Literal::Int(1), 0);
    cases.insert(Literal::Int(2), 0);
    let switch = SwitchStatement {
        subject: Expr::literal(Literal::Int(1), Span::DUMMY),
        cases,
        sections: vec![
            Block::new(Vec::new(), Span::new(10, 12)),
            Block::new(Vec::new(), Span::new(20, 22)),
        ],
        default: Some(1),
        span: Span::DUMMY,
    };
    assert_eq!(switch.section_for(&Literal::Int(2)).map(|b| b.span), Some(Span::new(10, 12)));
    assert_eq!(switch.section_for(&Literal::Int(9)).map(|b| b.span), Some(Span::new(20, 22)));
    // Exact-kind keys: a long 1 is not the int label 1.
    assert_eq!(switch.section_for(&Literal::Long(1)).map(|b| b.span), Some(Span::new(20, 22)));
}

#[test]
fn single_statement_block_takes_statement_span() {
    let stmt = Stmt::Control(ControlStatement {
        kind: ControlKind::Break,
        span: Span::new(4, 10),
    });
    let block = Block::single(stmt);
    assert_eq!(block.span, Span::new(4, 10));
    assert_eq!(block.statements.len(), 1);
    assert_eq!(block.statements[0].span(), Span::new(4, 10));
}
