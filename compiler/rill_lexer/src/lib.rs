//! Lexer for Rill using logos with string interning.
//!
//! Produces a [`TokenList`] terminated by `Eof`, or the first
//! [`LexError`]. Comments and whitespace are dropped.

mod escape;
mod lex_error;
mod number;

use logos::Logos;
use rill_ir::{
    Keyword, Literal, Op, PrimitiveKind, Sep, Span, StringInterner, Token, TokenKind, TokenList,
    TypeKeyword,
};

pub use lex_error::{LexError, LexErrorKind};

/// Failure reported by a logos callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum RawError {
    #[default]
    Invalid,
    UnterminatedComment,
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Result<(), RawError> {
    if let Some(end) = lex.remainder().find("*/") {
        lex.bump(end + 2);
        Ok(())
    } else {
        lex.bump(lex.remainder().len());
        Err(RawError::UnterminatedComment)
    }
}

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("in")]
    In,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("const")]
    Const,
    #[token("extern")]
    Extern,
    #[token("global")]
    Global,
    #[token("new")]
    New,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Type keywords
    #[token("void")]
    VoidType,
    #[token("bool")]
    BoolType,
    #[token("char")]
    CharType,
    #[token("byte")]
    ByteType,
    #[token("sbyte")]
    SByteType,
    #[token("short")]
    ShortType,
    #[token("ushort")]
    UShortType,
    #[token("int")]
    IntType,
    #[token("uint")]
    UIntType,
    #[token("long")]
    LongType,
    #[token("ulong")]
    ULongType,
    #[token("float")]
    FloatType,
    #[token("double")]
    DoubleType,
    #[token("string")]
    StringType,
    #[token("List")]
    ListType,
    #[token("Math")]
    MathType,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    Shl,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("^=")]
    CaretEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("<<=")]
    ShlEq,
    #[token("&&=")]
    AmpAmpEq,
    #[token("||=")]
    PipePipeEq,
    #[token("?")]
    Question,

    // Separators
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Literals
    #[regex(r"[0-9]+([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F]+([uU][lL]?|[lL][uU]?)?")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9]+[fFdD]")]
    Real,

    // No unescaped newlines in string or char literals.
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    Str,

    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedStr,

    #[regex(r"'([^'\\\n\r]|\\.|\\u[0-9a-fA-F]{4})'")]
    Char,

    #[token("'")]
    StrayQuote,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a `TokenList`.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => {}
            Ok(raw) => {
                let kind = convert_token(raw, slice, span, interner)?;
                result.push(Token::new(kind, span));
            }
            Err(RawError::UnterminatedComment) => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedComment,
                    Span::new(span.start, span.start + 2),
                ));
            }
            Err(RawError::Invalid) => {
                let ch = slice.chars().next().unwrap_or('\0');
                return Err(LexError::new(LexErrorKind::InvalidCharacter { ch }, span));
            }
        }
    }

    result.finish(u32::try_from(source.len()).unwrap_or(u32::MAX));
    Ok(result)
}

/// Convert a raw token to a `TokenKind`, interning identifiers.
fn convert_token(
    raw: RawToken,
    slice: &str,
    span: Span,
    interner: &StringInterner,
) -> Result<TokenKind, LexError> {
    let kind = match raw {
        // Literals
        RawToken::Integer => TokenKind::Literal(
            number::integer_literal(slice)
                .ok_or_else(|| LexError::new(LexErrorKind::InvalidNumber, span))?,
        ),
        RawToken::Real => TokenKind::Literal(
            number::real_literal(slice)
                .ok_or_else(|| LexError::new(LexErrorKind::InvalidNumber, span))?,
        ),
        RawToken::Str => {
            let text = unescape_body(&slice[1..slice.len() - 1], span)?;
            TokenKind::Literal(Literal::string(&text))
        }
        RawToken::Char => {
            let text = unescape_body(&slice[1..slice.len() - 1], span)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => TokenKind::Literal(Literal::Char(c)),
                _ => return Err(LexError::new(LexErrorKind::UnterminatedChar, span)),
            }
        }
        RawToken::UnterminatedStr => {
            return Err(LexError::new(LexErrorKind::UnterminatedString, span));
        }
        RawToken::StrayQuote => {
            return Err(LexError::new(LexErrorKind::UnterminatedChar, span));
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        // Keywords
        RawToken::If => TokenKind::Keyword(Keyword::If),
        RawToken::Else => TokenKind::Keyword(Keyword::Else),
        RawToken::While => TokenKind::Keyword(Keyword::While),
        RawToken::For => TokenKind::Keyword(Keyword::For),
        RawToken::Foreach => TokenKind::Keyword(Keyword::Foreach),
        RawToken::In => TokenKind::Keyword(Keyword::In),
        RawToken::Switch => TokenKind::Keyword(Keyword::Switch),
        RawToken::Case => TokenKind::Keyword(Keyword::Case),
        RawToken::Default => TokenKind::Keyword(Keyword::Default),
        RawToken::Break => TokenKind::Keyword(Keyword::Break),
        RawToken::Continue => TokenKind::Keyword(Keyword::Continue),
        RawToken::Return => TokenKind::Keyword(Keyword::Return),
        RawToken::Const => TokenKind::Keyword(Keyword::Const),
        RawToken::Extern => TokenKind::Keyword(Keyword::Extern),
        RawToken::Global => TokenKind::Keyword(Keyword::Global),
        RawToken::New => TokenKind::Keyword(Keyword::New),
        RawToken::True => TokenKind::Keyword(Keyword::True),
        RawToken::False => TokenKind::Keyword(Keyword::False),

        // Type keywords
        RawToken::VoidType => TokenKind::Type(TypeKeyword::Void),
        RawToken::BoolType => primitive(PrimitiveKind::Bool),
        RawToken::CharType => primitive(PrimitiveKind::Char),
        RawToken::ByteType => primitive(PrimitiveKind::Byte),
        RawToken::SByteType => primitive(PrimitiveKind::SByte),
        RawToken::ShortType => primitive(PrimitiveKind::Short),
        RawToken::UShortType => primitive(PrimitiveKind::UShort),
        RawToken::IntType => primitive(PrimitiveKind::Int),
        RawToken::UIntType => primitive(PrimitiveKind::UInt),
        RawToken::LongType => primitive(PrimitiveKind::Long),
        RawToken::ULongType => primitive(PrimitiveKind::ULong),
        RawToken::FloatType => primitive(PrimitiveKind::Float),
        RawToken::DoubleType => primitive(PrimitiveKind::Double),
        RawToken::StringType => TokenKind::Type(TypeKeyword::String),
        RawToken::ListType => TokenKind::Type(TypeKeyword::List),
        RawToken::MathType => TokenKind::Type(TypeKeyword::Math),

        // Operators
        RawToken::Plus => TokenKind::Operator(Op::Plus),
        RawToken::Minus => TokenKind::Operator(Op::Minus),
        RawToken::Star => TokenKind::Operator(Op::Star),
        RawToken::Slash => TokenKind::Operator(Op::Slash),
        RawToken::Percent => TokenKind::Operator(Op::Percent),
        RawToken::Caret => TokenKind::Operator(Op::Caret),
        RawToken::Amp => TokenKind::Operator(Op::Amp),
        RawToken::Pipe => TokenKind::Operator(Op::Pipe),
        RawToken::Tilde => TokenKind::Operator(Op::Tilde),
        RawToken::Bang => TokenKind::Operator(Op::Bang),
        RawToken::Assign => TokenKind::Operator(Op::Assign),
        RawToken::Lt => TokenKind::Operator(Op::Lt),
        RawToken::Gt => TokenKind::Operator(Op::Gt),
        RawToken::AmpAmp => TokenKind::Operator(Op::AmpAmp),
        RawToken::PipePipe => TokenKind::Operator(Op::PipePipe),
        RawToken::EqEq => TokenKind::Operator(Op::EqEq),
        RawToken::BangEq => TokenKind::Operator(Op::BangEq),
        RawToken::LtEq => TokenKind::Operator(Op::LtEq),
        RawToken::Shl => TokenKind::Operator(Op::Shl),
        RawToken::PlusPlus => TokenKind::Operator(Op::PlusPlus),
        RawToken::MinusMinus => TokenKind::Operator(Op::MinusMinus),
        RawToken::PlusEq => TokenKind::Operator(Op::PlusEq),
        RawToken::MinusEq => TokenKind::Operator(Op::MinusEq),
        RawToken::StarEq => TokenKind::Operator(Op::StarEq),
        RawToken::SlashEq => TokenKind::Operator(Op::SlashEq),
        RawToken::PercentEq => TokenKind::Operator(Op::PercentEq),
        RawToken::CaretEq => TokenKind::Operator(Op::CaretEq),
        RawToken::AmpEq => TokenKind::Operator(Op::AmpEq),
        RawToken::PipeEq => TokenKind::Operator(Op::PipeEq),
        RawToken::ShlEq => TokenKind::Operator(Op::ShlEq),
        RawToken::AmpAmpEq => TokenKind::Operator(Op::AmpAmpEq),
        RawToken::PipePipeEq => TokenKind::Operator(Op::PipePipeEq),
        RawToken::Question => TokenKind::Operator(Op::Question),

        // Separators
        RawToken::Semicolon => TokenKind::Separator(Sep::Semicolon),
        RawToken::Comma => TokenKind::Separator(Sep::Comma),
        RawToken::Dot => TokenKind::Separator(Sep::Dot),
        RawToken::Colon => TokenKind::Separator(Sep::Colon),
        RawToken::LParen => TokenKind::Separator(Sep::LParen),
        RawToken::RParen => TokenKind::Separator(Sep::RParen),
        RawToken::LBrace => TokenKind::Separator(Sep::LBrace),
        RawToken::RBrace => TokenKind::Separator(Sep::RBrace),
        RawToken::LBracket => TokenKind::Separator(Sep::LBracket),
        RawToken::RBracket => TokenKind::Separator(Sep::RBracket),

        // Trivia is filtered before conversion.
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Eof,
    };
    Ok(kind)
}

fn primitive(kind: PrimitiveKind) -> TokenKind {
    TokenKind::Type(TypeKeyword::Primitive(kind))
}

/// Unescape a string or char body, mapping failures to a span covering the
/// bad escape.
fn unescape_body(body: &str, literal_span: Span) -> Result<String, LexError> {
    escape::unescape(body).map_err(|(offset, escape_char)| {
        let start = literal_span.start + 1 + u32::try_from(offset).unwrap_or(0);
        LexError::new(
            LexErrorKind::InvalidEscape { escape_char },
            Span::new(start, start + 2),
        )
    })
}
