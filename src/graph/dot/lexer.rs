//! Splits DOT source into tokens.
//!
//! Whitespace and the three comment styles DOT allows (`//`, `#` and
//! `/* */`) are skipped. Keywords are case-insensitive.

use std::fmt::Display;

use logos::{FilterResult, Lexer, Logos};

use crate::document::{Span, Spanned};

use super::DotError;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+|//[^\n]*|#[^\n]*")]
pub enum Token<'src> {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("->")]
    Arrow,
    #[token("--")]
    Line,

    // Reserved keywords
    #[token("strict", ignore(ascii_case))]
    Strict,
    #[token("digraph", ignore(ascii_case))]
    Digraph,
    #[token("graph", ignore(ascii_case))]
    Graph,
    #[token("node", ignore(ascii_case))]
    Node,
    #[token("edge", ignore(ascii_case))]
    Edge,

    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z_0-9\x{80}-\x{10FFFF}]*")]
    Id(&'src str),

    #[regex(r"-?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)")]
    Numeral(&'src str),

    // A double-quoted string with `\"` and `\\` escapes resolved.
    #[regex(r#""(?:[^"\\]|\\.)*""#, unquote)]
    Quoted(String),

    // Never produced: the callback skips the whole comment.
    #[token("/*", skip_block_comment)]
    BlockComment,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Eq => write!(f, "="),
            Token::Arrow => write!(f, "->"),
            Token::Line => write!(f, "--"),
            Token::Strict => write!(f, "strict"),
            Token::Digraph => write!(f, "digraph"),
            Token::Graph => write!(f, "graph"),
            Token::Node => write!(f, "node"),
            Token::Edge => write!(f, "edge"),
            Token::Id(id) | Token::Numeral(id) => write!(f, "{}", id),
            Token::Quoted(s) => write!(f, "{:?}", s),
            Token::BlockComment => write!(f, "/* */"),
        }
    }
}

/// Takes DOT source and splits it into a sequence of tokens.
///
/// Fails on the first character that cannot start any token.
pub fn tokenize(src: &str) -> Result<Vec<Spanned<Token<'_>>>, DotError> {
    Token::lexer(src)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Spanned::new(token, Span::from(span))),
            Err(_) if src[span.clone()].starts_with("/*") => Err(DotError::Syntax {
                message: "unterminated block comment".to_string(),
                span: Span::from(span),
            }),
            Err(_) => Err(DotError::Syntax {
                message: format!(
                    "unexpected character `{}`",
                    src[span.start..].chars().next().unwrap_or_default()
                ),
                span: Span::from(span),
            }),
        })
        .collect()
}

fn unquote<'src>(lex: &Lexer<'src, Token<'src>>) -> String {
    // Strip the surrounding quotes.
    let inner = &lex.slice()[1..lex.slice().len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('\\', Some(escaped @ ('"' | '\\'))) => {
                out.push(escaped);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

// Consumes everything up to and including the closing `*/`.
fn skip_block_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}
