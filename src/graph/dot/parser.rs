use chumsky::{prelude::*, Stream};

use crate::document::{Span, Spanned};

use super::lexer::Token;

pub type ParseError<'src> = Simple<Token<'src>, Span>;

/// A graph as written, before edge operators are checked against its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGraph {
    pub strict: bool,
    pub kind: Spanned<GraphKind>,
    pub name: Option<String>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphKind {
    Directed,
    Undirected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeOp {
    Directed,
    Undirected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `a -> b -> c`: the first vertex followed by each operator and the
    /// vertex it leads to.
    Edges {
        head: String,
        tail: Vec<(Spanned<EdgeOp>, String)>,
    },
    Node(String),
    /// Attribute statements and `id = id` assignments.
    Ignored,
}

pub fn parse<'src>(
    tokens: Vec<Spanned<Token<'src>>>,
    src_len: usize,
) -> Result<ParsedGraph, Vec<ParseError<'src>>> {
    let end_of_input = Span::new(src_len, src_len);
    let stream = Stream::from_iter(
        end_of_input,
        tokens
            .into_iter()
            .map(|Spanned { span, value }| (value, span)),
    );

    graph_parser().parse(stream)
}

fn graph_parser<'src>() -> impl Parser<Token<'src>, ParsedGraph, Error = ParseError<'src>> {
    let kind = select! {
        Token::Digraph => GraphKind::Directed,
        Token::Graph => GraphKind::Undirected,
    }
    .map_with_span(Spanned::new)
    .labelled("graph kind");

    just(Token::Strict)
        .or_not()
        .map(|strict| strict.is_some())
        .then(kind)
        .then(id_parser().or_not())
        .then(
            statement_parser()
                .then_ignore(separator().or_not())
                .repeated()
                .delimited_by(just(Token::LBrace), just(Token::RBrace)),
        )
        .then_ignore(end())
        .map(|(((strict, kind), name), statements)| ParsedGraph {
            strict,
            kind,
            name,
            statements,
        })
        .labelled("graph")
}

fn id_parser<'src>() -> impl Parser<Token<'src>, String, Error = ParseError<'src>> + Clone {
    select! {
        Token::Id(id) => id.to_string(),
        Token::Numeral(n) => n.to_string(),
        Token::Quoted(s) => s,
    }
    .labelled("identifier")
}

fn separator<'src>() -> impl Parser<Token<'src>, Token<'src>, Error = ParseError<'src>> + Clone {
    just(Token::Semicolon).or(just(Token::Comma))
}

fn statement_parser<'src>() -> impl Parser<Token<'src>, Statement, Error = ParseError<'src>> + Clone
{
    let id = id_parser();

    // [k = v, k = v; ...] [...]
    let attribute = id
        .clone()
        .then_ignore(just(Token::Eq))
        .then(id.clone())
        .then_ignore(separator().or_not());
    let attr_list = attribute
        .repeated()
        .delimited_by(just(Token::LBracket), just(Token::RBracket))
        .repeated()
        .at_least(1)
        .ignored()
        .labelled("attribute list");

    let attr_stmt = choice((just(Token::Graph), just(Token::Node), just(Token::Edge)))
        .ignore_then(attr_list.clone())
        .to(Statement::Ignored)
        .labelled("attribute statement");

    let assignment = id
        .clone()
        .then_ignore(just(Token::Eq))
        .then(id.clone())
        .to(Statement::Ignored)
        .labelled("assignment");

    let edge_op = select! {
        Token::Arrow => EdgeOp::Directed,
        Token::Line => EdgeOp::Undirected,
    }
    .map_with_span(Spanned::new)
    .labelled("edge operator");

    let edge_stmt = id
        .clone()
        .then(edge_op.then(id.clone()).repeated().at_least(1))
        .then_ignore(attr_list.clone().or_not())
        .map(|(head, tail)| Statement::Edges { head, tail })
        .labelled("edge statement");

    let node_stmt = id
        .then_ignore(attr_list.or_not())
        .map(Statement::Node)
        .labelled("node statement");

    choice((attr_stmt, assignment, edge_stmt, node_stmt))
}
