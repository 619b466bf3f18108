//! Reading and writing graphs in the DOT language.
//!
//! Only directed graphs are accepted. Attributes are parsed so that ordinary
//! Graphviz files load, but their values are discarded.

mod lexer;
mod parser;

use std::{borrow::Cow, collections::HashSet, fs, hash::Hash, path::Path};

use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use thiserror::Error;

use crate::document::Span;

use self::parser::{EdgeOp, GraphKind, ParseError, Statement};
use super::Graph;

/// Number of random edges per vertex in [`random_dot`].
pub const EDGE_FACTOR: usize = 2;

static KEYWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["strict", "graph", "digraph", "node", "edge", "subgraph"]));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DotError {
    #[error("Syntax error at {span}: {message}")]
    Syntax { message: String, span: Span },

    #[error("DOT graph must be directed (i.e., digraph)")]
    Undirected,

    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
}

impl From<ParseError<'_>> for DotError {
    fn from(error: ParseError<'_>) -> Self {
        let found = match error.found() {
            Some(token) => format!("unexpected `{}`", token),
            None => "unexpected end of input".to_string(),
        };

        let mut expected: Vec<String> = error
            .expected()
            .map(|token| match token {
                Some(token) => format!("`{}`", token),
                None => "end of input".to_string(),
            })
            .collect();
        expected.sort();
        expected.dedup();

        let message = match (error.label(), expected.is_empty()) {
            (Some(label), _) => format!("{} while parsing {}", found, label),
            (None, true) => found,
            (None, false) => format!("{}, expected {}", found, expected.join(" or ")),
        };

        DotError::Syntax {
            message,
            span: error.span(),
        }
    }
}

/// The vertices and edges of a parsed digraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DotGraph {
    pub strict: bool,
    pub name: Option<String>,
    /// Every vertex in order of first mention.
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl DotGraph {
    pub fn sources(&self) -> Vec<String> {
        self.edges.iter().map(|(from, _)| from.clone()).collect()
    }

    pub fn destinations(&self) -> Vec<String> {
        self.edges.iter().map(|(_, to)| to.clone()).collect()
    }

    fn add_vertex(&mut self, seen: &mut HashSet<String>, vertex: &str) {
        if seen.insert(vertex.to_string()) {
            self.vertices.push(vertex.to_string());
        }
    }
}

/// Parses DOT source into its vertices and edges.
///
/// A chain `a -> b -> c` contributes the edges `a -> b` and `b -> c`. In a
/// `strict` digraph repeated edges are kept only once.
pub fn parse_dot(src: &str) -> Result<DotGraph, DotError> {
    let tokens = lexer::tokenize(src)?;
    let parsed = parser::parse(tokens, src.len()).map_err(|errors| {
        match errors.into_iter().next() {
            Some(error) => DotError::from(error),
            None => DotError::Syntax {
                message: "invalid graph".to_string(),
                span: Span::new(0, src.len()),
            },
        }
    })?;

    if parsed.kind.value == GraphKind::Undirected {
        return Err(DotError::Undirected);
    }

    let mut graph = DotGraph {
        strict: parsed.strict,
        name: parsed.name,
        ..DotGraph::default()
    };
    let mut seen_vertices = HashSet::new();
    let mut seen_edges = HashSet::new();

    for statement in parsed.statements {
        match statement {
            Statement::Node(vertex) => graph.add_vertex(&mut seen_vertices, &vertex),
            Statement::Edges { head, tail } => {
                graph.add_vertex(&mut seen_vertices, &head);
                let mut from = head;
                for (op, to) in tail {
                    if op.value == EdgeOp::Undirected {
                        return Err(DotError::Syntax {
                            message: "`--` is not allowed in a digraph, use `->`".to_string(),
                            span: op.span,
                        });
                    }
                    graph.add_vertex(&mut seen_vertices, &to);
                    let edge = (from, to.clone());
                    if !graph.strict || seen_edges.insert(edge.clone()) {
                        graph.edges.push(edge);
                    }
                    from = to;
                }
            }
            Statement::Ignored => {}
        }
    }

    debug!(
        "parsed digraph {} with {} vertices and {} edges",
        graph.name.as_deref().unwrap_or("<anonymous>"),
        graph.vertices.len(),
        graph.edges.len()
    );
    Ok(graph)
}

/// Parses DOT source into parallel source and destination lists, one entry
/// per edge.
pub fn build_lists_from_dot(src: &str) -> Result<(Vec<String>, Vec<String>), DotError> {
    let graph = parse_dot(src)?;
    Ok(graph.edges.into_iter().unzip())
}

pub fn read_dot_file(path: impl AsRef<Path>) -> Result<DotGraph, DotError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|e| DotError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_dot(&src)
}

/// A random digraph over the vertices `v0`, `v1`, ... with
/// `EDGE_FACTOR * vertex_count` edges whose endpoints are drawn uniformly.
/// Self-loops and parallel edges may occur.
pub fn random_dot<R: Rng + ?Sized>(vertex_count: usize, rng: &mut R) -> String {
    let mut dot = String::from("digraph G {\n");
    if vertex_count > 0 {
        for _ in 0..EDGE_FACTOR * vertex_count {
            let from = rng.gen_range(0..vertex_count);
            let to = rng.gen_range(0..vertex_count);
            dot.push_str(&format!("\tv{} -> v{}\n", from, to));
        }
    }
    dot.push_str("}\n");
    dot
}

/// Writes `id` as a DOT identifier, quoting it unless it is a plain
/// identifier or numeral.
pub(crate) fn format_id(id: &str) -> Cow<'_, str> {
    let is_identifier = id
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(id.to_ascii_lowercase().as_str());
    let is_numeral = !id.is_empty() && id.chars().all(|c| c.is_ascii_digit());

    if is_identifier || is_numeral {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!(
            "\"{}\"",
            id.replace('\\', "\\\\").replace('"', "\\\"")
        ))
    }
}

impl Graph<String> {
    /// Builds a graph from DOT source, keeping isolated vertices.
    pub fn from_dot(src: &str) -> Result<Self, DotError> {
        Ok(Self::from(parse_dot(src)?))
    }
}

impl<T: From<String> + Hash + Eq + Clone> From<DotGraph> for Graph<T> {
    fn from(dot: DotGraph) -> Self {
        let mut graph = Graph::new();
        for vertex in dot.vertices {
            graph.add_vertex(T::from(vertex));
        }
        for (from, to) in dot.edges {
            graph.add_edge(T::from(from), T::from(to));
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn parses_vertices_in_order_of_mention() {
        let graph = parse_dot(indoc! {r#"
            digraph courses {
                "CS 1410" -> "CS 2420";
                isolated
                "CS 2420" -> "CS 3500" -> "CS 4400"
            }
        "#})
        .unwrap();
        assert_eq!(graph.name, Some("courses".to_string()));
        assert_eq!(
            graph.vertices,
            vec!["CS 1410", "CS 2420", "isolated", "CS 3500", "CS 4400"]
        );
        assert_eq!(
            graph.edges,
            edges(&[
                ("CS 1410", "CS 2420"),
                ("CS 2420", "CS 3500"),
                ("CS 3500", "CS 4400"),
            ])
        );
    }

    #[test]
    fn strict_graphs_drop_repeated_edges() {
        let src = "strict digraph { a -> b; a -> b; b -> a }";
        assert_eq!(parse_dot(src).unwrap().edges, edges(&[("a", "b"), ("b", "a")]));

        let src = "digraph { a -> b; a -> b }";
        assert_eq!(parse_dot(src).unwrap().edges.len(), 2);
    }

    #[test]
    fn rejects_undirected_graphs() {
        assert_eq!(parse_dot("graph { a -- b }"), Err(DotError::Undirected));
    }

    #[test]
    fn rejects_undirected_edges_in_digraph() {
        assert_eq!(
            parse_dot("digraph { a -- b }"),
            Err(DotError::Syntax {
                message: "`--` is not allowed in a digraph, use `->`".to_string(),
                span: Span::new(12, 14),
            })
        );
    }

    #[test]
    fn syntax_errors_carry_a_span() {
        let Err(DotError::Syntax { span, .. }) = parse_dot("digraph { a -> b") else {
            panic!("expected a syntax error");
        };
        assert_eq!(span.line_col("digraph { a -> b"), (1, 17));
    }

    #[test]
    fn builds_parallel_lists() {
        let (sources, destinations) =
            build_lists_from_dot("digraph { a -> b -> c; c -> a }").unwrap();
        assert_eq!(sources, vec!["a", "b", "c"]);
        assert_eq!(destinations, vec!["b", "c", "a"]);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_dot_file("/nonexistent/graph.dot"),
            Err(DotError::Io { .. })
        ));
    }

    #[test]
    fn graph_round_trip() {
        let graph = Graph::from_dot("digraph { x; a -> \"b b\"; \"b b\" -> c }").unwrap();
        let again = Graph::from_dot(&graph.to_dot()).unwrap();
        assert_eq!(again.vertices().collect::<Vec<_>>(), graph.vertices().collect::<Vec<_>>());
        assert_eq!(again.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
    }

    #[test]
    fn backslashes_and_quotes_round_trip() {
        let mut graph = Graph::new();
        graph.add_edge("C:\\".to_string(), "b".to_string());
        graph.add_edge("say \"hi\"".to_string(), "a\\\"b".to_string());

        let dot = graph.to_dot();
        assert!(dot.contains(r#""C:\\" -> b"#), "{}", dot);

        let again = Graph::from_dot(&dot).unwrap();
        assert_eq!(again.vertices().collect::<Vec<_>>(), graph.vertices().collect::<Vec<_>>());
        assert_eq!(again.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
    }

    #[test]
    fn non_ascii_identifiers() {
        let graph = parse_dot("digraph { café -> 東京 }").unwrap();
        assert_eq!(graph.edges, edges(&[("café", "東京")]));
    }

    #[test]
    fn random_dot_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let dot = random_dot(8, &mut rng);
        let graph = parse_dot(&dot).unwrap();
        assert_eq!(graph.edges.len(), 16);
        assert!(graph
            .vertices
            .iter()
            .all(|v| v.starts_with('v') && v[1..].parse::<usize>().unwrap() < 8));
    }

    #[test]
    fn random_dot_is_reproducible() {
        let first = random_dot(5, &mut StdRng::seed_from_u64(42));
        let second = random_dot(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn random_dot_without_vertices() {
        let dot = random_dot(0, &mut StdRng::seed_from_u64(1));
        assert_eq!(dot, "digraph G {\n}\n");
        let graph = parse_dot(&dot).unwrap();
        assert!(graph.vertices.is_empty() && graph.edges.is_empty());
    }

    #[test]
    fn quoting() {
        assert_eq!(format_id("plain_1"), "plain_1");
        assert_eq!(format_id("42"), "42");
        assert_eq!(format_id("Node"), "\"Node\"");
        assert_eq!(format_id("two words"), "\"two words\"");
        assert_eq!(format_id("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(format_id(""), "\"\"");
    }
}
