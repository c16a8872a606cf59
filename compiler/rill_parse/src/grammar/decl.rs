//! Types and declarations.

use rill_ir::ast::{
    Declaration, DeclarationAssignment, Expr, ExternDeclaration, GlobalDeclaration,
    MultiStatement, Stmt,
};
use rill_ir::{Keyword, Literal, Op, PrimitiveKind, Sep, Span, TokenKind, TypeKeyword, ValueType};

use crate::error::{ParseError, ParseErrorKind};
use crate::Parser;

impl Parser<'_> {
    /// `void`, a primitive, `string`, `List<T>` or a host type name.
    pub(crate) fn parse_type(&mut self) -> Result<ValueType, ParseError> {
        let span = self.cursor.current_span();
        let ty = match self.cursor.current_kind() {
            TokenKind::Type(TypeKeyword::Void) => ValueType::Void,
            TokenKind::Type(TypeKeyword::Primitive(kind)) => ValueType::Primitive(*kind),
            TokenKind::Type(TypeKeyword::String) => ValueType::String,
            TokenKind::Type(TypeKeyword::List) => {
                self.cursor.advance();
                self.cursor.expect_op(Op::Lt)?;
                let element_span = self.cursor.current_span();
                let element = self.parse_type()?;
                if element.is_void() {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedType {
                            found: "`void`".to_string(),
                        },
                        element_span,
                    ));
                }
                // Closes one `>` token at a time, so `List<List<int>>` works.
                self.cursor.expect_op(Op::Gt)?;
                return Ok(ValueType::list_of(element));
            }
            TokenKind::Ident(name) => {
                let text = self.text(*name);
                match self.host.lookup_type(text) {
                    Some(ty) => ty,
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnknownType {
                                name: text.to_string(),
                            },
                            span,
                        ))
                    }
                }
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedType {
                        found: other.describe(),
                    },
                    span,
                ))
            }
        };
        self.cursor.advance();
        Ok(ty)
    }

    /// A type that can hold a variable.
    fn parse_variable_type(&mut self) -> Result<ValueType, ParseError> {
        let span = self.cursor.current_span();
        let ty = self.parse_type()?;
        if ty.is_void() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedType {
                    found: "`void`".to_string(),
                },
                span,
            )
            .with_help("variables cannot have type `void`"));
        }
        Ok(ty)
    }

    /// `T a [= e] (, b [= e])*` without the terminating `;`.
    pub(crate) fn parse_local_declaration(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let ty = self.parse_variable_type()?;
        let mut statements = Vec::new();
        loop {
            let (name, name_span) = self.cursor.expect_ident()?;
            if self.cursor.check_sep(Sep::LParen) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidFunction {
                        reason: "functions can only be declared at the top level".to_string(),
                    },
                    name_span,
                ));
            }
            let stmt = if self.cursor.eat_op(Op::Assign) {
                let value = self.parse_expr()?;
                let (value, conversion) = self.coerce(value, &ty)?;
                Stmt::DeclarationAssignment(DeclarationAssignment {
                    name,
                    ty: ty.clone(),
                    value,
                    conversion,
                    span: self.span_from(name_span),
                })
            } else {
                Stmt::Declaration(Declaration {
                    name,
                    ty: ty.clone(),
                    span: name_span,
                })
            };
            self.declare_variable(name, ty.clone(), name_span)?;
            statements.push(stmt);
            if !self.cursor.eat_sep(Sep::Comma) {
                break;
            }
        }
        if statements.len() == 1 {
            if let Some(stmt) = statements.pop() {
                return Ok(stmt);
            }
        }
        Ok(Stmt::Multi(MultiStatement {
            statements,
            span: self.span_from(start),
        }))
    }

    /// Declare `name` in the innermost compile scope.
    pub(crate) fn declare_variable(
        &mut self,
        name: rill_ir::Name,
        ty: ValueType,
        span: Span,
    ) -> Result<(), ParseError> {
        if self.ctx.declare(name, ty) {
            Ok(())
        } else {
            Err(self.duplicate(name, span))
        }
    }

    #[cold]
    pub(crate) fn duplicate(&self, name: rill_ir::Name, span: Span) -> ParseError {
        ParseError::new(
            ParseErrorKind::DuplicateDeclaration {
                name: self.text(name).to_string(),
            },
            span,
        )
    }

    /// `const T a = literal (, b = literal)*;`
    ///
    /// Constants produce no runtime node; their uses become literals.
    pub(crate) fn parse_const(&mut self) -> Result<(), ParseError> {
        self.cursor.expect_keyword(Keyword::Const)?;
        let ty = self.parse_variable_type()?;
        loop {
            let (name, name_span) = self.cursor.expect_ident()?;
            self.cursor.expect_op(Op::Assign)?;
            let value = self.parse_expr()?;
            let value = self.coerce_expr(value, &ty)?;
            let Some(literal) = constant_value(&value) else {
                return Err(ParseError::new(
                    ParseErrorKind::NotConstant {
                        context: "constant initializer",
                    },
                    value.span,
                ));
            };
            if !self.ctx.declare_constant(name, literal) {
                return Err(self.duplicate(name, name_span));
            }
            if !self.cursor.eat_sep(Sep::Comma) {
                break;
            }
        }
        self.cursor.expect_sep(Sep::Semicolon)?;
        Ok(())
    }

    /// `extern T name [= default];` or `global T name [= default];`
    pub(crate) fn parse_top_level_declaration(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let is_global = self.cursor.check_keyword(Keyword::Global);
        let keyword = if is_global { "global" } else { "extern" };
        if !self.ctx.is_top_level() {
            return Err(ParseError::new(
                ParseErrorKind::TopLevelOnly { keyword },
                start,
            ));
        }
        self.cursor.advance();

        let ty_span = self.cursor.current_span();
        let ty = self.parse_variable_type()?;
        if is_global && !is_persistable(&ty) {
            return Err(ParseError::type_mismatch(
                "string, bool, double, int or a List of those",
                &ty,
                ty_span,
            )
            .with_help("global variables are persisted and limited to storable types"));
        }
        let (name, name_span) = self.cursor.expect_ident()?;
        let (default, conversion) = if self.cursor.eat_op(Op::Assign) {
            let value = self.parse_expr()?;
            let (value, conversion) = self.coerce(value, &ty)?;
            (Some(value), conversion)
        } else {
            (None, rill_ir::ast::Conversion::Identity)
        };
        self.cursor.expect_sep(Sep::Semicolon)?;
        self.declare_variable(name, ty.clone(), name_span)?;

        let span = self.span_from(start);
        Ok(if is_global {
            Stmt::Global(GlobalDeclaration {
                name,
                ty,
                default,
                conversion,
                span,
            })
        } else {
            Stmt::Extern(ExternDeclaration {
                name,
                ty,
                default,
                conversion,
                span,
            })
        })
    }
}

/// Types a `global` can persist.
fn is_persistable(ty: &ValueType) -> bool {
    fn scalar(ty: &ValueType) -> bool {
        matches!(
            ty,
            ValueType::String
                | ValueType::Primitive(
                    PrimitiveKind::Bool | PrimitiveKind::Double | PrimitiveKind::Int
                )
        )
    }
    match ty {
        ValueType::List(element) => scalar(element),
        other => scalar(other),
    }
}

/// Compile-time value of `expr`: a literal, or a cast of one.
pub(crate) fn constant_value(expr: &Expr) -> Option<Literal> {
    match &expr.kind {
        rill_ir::ast::ExprKind::Literal(literal) => Some(literal.clone()),
        rill_ir::ast::ExprKind::Convert { to, operand } => {
            let value = constant_value(operand)?.to_value().convert(*to)?;
            Literal::from_value(&value)
        }
        _ => None,
    }
}
