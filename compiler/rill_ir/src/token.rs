//! Token stream produced by the lexer and consumed by the parser.

use std::fmt;

use crate::{Literal, Name, PrimitiveKind, Span};

/// Reserved words that start or shape statements.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    If,
    Else,
    While,
    For,
    Foreach,
    In,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Const,
    Extern,
    Global,
    New,
    True,
    False,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Foreach => "foreach",
            Keyword::In => "in",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Default => "default",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Return => "return",
            Keyword::Const => "const",
            Keyword::Extern => "extern",
            Keyword::Global => "global",
            Keyword::New => "new",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }
}

/// Built-in type names, including the static-only `Math` class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKeyword {
    Void,
    Primitive(PrimitiveKind),
    String,
    List,
    Math,
}

impl TypeKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKeyword::Void => "void",
            TypeKeyword::Primitive(kind) => kind.name(),
            TypeKeyword::String => "string",
            TypeKeyword::List => "List",
            TypeKeyword::Math => "Math",
        }
    }
}

/// Operator tokens.
///
/// `>` is never combined by the lexer; the parser recognises `>=`, `>>` and
/// `>>=` from adjacent spans so that `List<List<int>>` closes correctly.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Bang,
    Assign,
    Lt,
    Gt,
    AmpAmp,
    PipePipe,
    EqEq,
    BangEq,
    LtEq,
    Shl,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    CaretEq,
    AmpEq,
    PipeEq,
    ShlEq,
    AmpAmpEq,
    PipePipeEq,
    Question,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Percent => "%",
            Op::Caret => "^",
            Op::Amp => "&",
            Op::Pipe => "|",
            Op::Tilde => "~",
            Op::Bang => "!",
            Op::Assign => "=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::AmpAmp => "&&",
            Op::PipePipe => "||",
            Op::EqEq => "==",
            Op::BangEq => "!=",
            Op::LtEq => "<=",
            Op::Shl => "<<",
            Op::PlusPlus => "++",
            Op::MinusMinus => "--",
            Op::PlusEq => "+=",
            Op::MinusEq => "-=",
            Op::StarEq => "*=",
            Op::SlashEq => "/=",
            Op::PercentEq => "%=",
            Op::CaretEq => "^=",
            Op::AmpEq => "&=",
            Op::PipeEq => "|=",
            Op::ShlEq => "<<=",
            Op::AmpAmpEq => "&&=",
            Op::PipePipeEq => "||=",
            Op::Question => "?",
        }
    }
}

/// Punctuation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Sep {
    Semicolon,
    Comma,
    Dot,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl Sep {
    pub fn as_str(self) -> &'static str {
        match self {
            Sep::Semicolon => ";",
            Sep::Comma => ",",
            Sep::Dot => ".",
            Sep::Colon => ":",
            Sep::LParen => "(",
            Sep::RParen => ")",
            Sep::LBrace => "{",
            Sep::RBrace => "}",
            Sep::LBracket => "[",
            Sep::RBracket => "]",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Ident(Name),
    Literal(Literal),
    Operator(Op),
    Separator(Sep),
    Type(TypeKeyword),
    Eof,
}

impl TokenKind {
    /// Description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
            TokenKind::Ident(_) => "identifier".to_string(),
            TokenKind::Literal(lit) => format!("literal `{lit}`"),
            TokenKind::Operator(op) => format!("`{}`", op.as_str()),
            TokenKind::Separator(sep) => format!("`{}`", sep.as_str()),
            TokenKind::Type(ty) => format!("type `{}`", ty.as_str()),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lexer output. Always terminated by exactly one `Eof` token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append the terminating `Eof` at `offset`.
    pub fn finish(&mut self, offset: u32) {
        self.tokens.push(Token::new(TokenKind::Eof, Span::point(offset)));
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind.clone()).collect()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
