//! A directed, unweighted graph stored as adjacency lists.
//!
//! Vertices live in a vector in the order they were first added and are
//! looked up by their data through a hash index. Traversals keep their
//! visited/came-from/in-degree bookkeeping in per-call vectors indexed by
//! vertex position, so the graph itself is never mutated by a query.

pub mod dot;
mod error;
pub mod utility;

pub use dot::{build_lists_from_dot, parse_dot, random_dot, read_dot_file, DotError, DotGraph};
pub use error::GraphError;

use std::{
    collections::{HashMap, VecDeque},
    fmt::{self, Display},
    hash::Hash,
};

struct Vertex<T> {
    data: T,
    edges: Vec<usize>,
    in_degree: usize,
}

pub struct Graph<T> {
    vertices: Vec<Vertex<T>>,
    index: HashMap<T, usize>,
    edge_count: usize,
}

impl<T: Hash + Eq + Clone> Graph<T> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Adds a vertex with no edges, returning `false` if it already exists.
    pub fn add_vertex(&mut self, data: T) -> bool {
        let before = self.vertices.len();
        self.position_or_insert(data);
        self.vertices.len() > before
    }

    /// Adds a directed edge, creating either endpoint if it does not exist.
    /// Parallel edges are kept.
    pub fn add_edge(&mut self, from: T, to: T) {
        let from = self.position_or_insert(from);
        let to = self.position_or_insert(to);
        self.vertices[from].edges.push(to);
        self.vertices[to].in_degree += 1;
        self.edge_count += 1;
    }

    fn position_or_insert(&mut self, data: T) -> usize {
        if let Some(&position) = self.index.get(&data) {
            return position;
        }
        let position = self.vertices.len();
        self.index.insert(data.clone(), position);
        self.vertices.push(Vertex {
            data,
            edges: Vec::new(),
            in_degree: 0,
        });
        position
    }

    fn position(&self, data: &T) -> Option<usize> {
        self.index.get(data).copied()
    }

    pub fn contains_vertex(&self, data: &T) -> bool {
        self.index.contains_key(data)
    }

    /// The direct successors of `data` in edge insertion order; empty if the
    /// vertex does not exist.
    pub fn successors<'a>(&'a self, data: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.position(data)
            .into_iter()
            .flat_map(move |position| self.vertices[position].edges.iter())
            .map(move |&next| &self.vertices[next].data)
    }

    pub fn in_degree(&self, data: &T) -> Option<usize> {
        self.position(data)
            .map(|position| self.vertices[position].in_degree)
    }

    /// Whether a path leads from `src` to `dst`. Every vertex reaches itself.
    pub fn is_reachable(&self, src: &T, dst: &T) -> Result<bool, GraphError> {
        let (start, goal) = self.endpoints(src, dst)?;

        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == goal {
                return Ok(true);
            }
            if visited[current] {
                continue;
            }
            visited[current] = true;
            stack.extend(
                self.vertices[current]
                    .edges
                    .iter()
                    .rev()
                    .filter(|&&next| !visited[next]),
            );
        }
        Ok(false)
    }

    /// The path with the fewest edges from `src` to `dst`, both included.
    pub fn shortest_path(&self, src: &T, dst: &T) -> Result<Vec<T>, GraphError> {
        let (start, goal) = self.endpoints(src, dst)?;

        let mut came_from: Vec<Option<usize>> = vec![None; self.vertices.len()];
        let mut visited = vec![false; self.vertices.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(current) = queue.pop_front() {
            if current == goal {
                return Ok(self.trace_back(&came_from, goal));
            }
            for &next in &self.vertices[current].edges {
                if !visited[next] {
                    visited[next] = true;
                    came_from[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }
        Err(GraphError::NoPath)
    }

    fn trace_back(&self, came_from: &[Option<usize>], goal: usize) -> Vec<T> {
        let mut path = vec![self.vertices[goal].data.clone()];
        let mut current = goal;
        while let Some(previous) = came_from[current] {
            path.push(self.vertices[previous].data.clone());
            current = previous;
        }
        path.reverse();
        path
    }

    fn endpoints(&self, src: &T, dst: &T) -> Result<(usize, usize), GraphError> {
        let start = self.position(src).ok_or(GraphError::SourceNotFound)?;
        let goal = self.position(dst).ok_or(GraphError::DestinationNotFound)?;
        Ok((start, goal))
    }

    /// Orders the vertices so that every edge points forward (Kahn's
    /// algorithm). Vertices that become ready at the same time keep their
    /// insertion order.
    pub fn topological_sort(&self) -> Result<Vec<T>, GraphError> {
        let mut in_degree: Vec<usize> = self.vertices.iter().map(|v| v.in_degree).collect();
        let mut ready: VecDeque<usize> = (0..self.vertices.len())
            .filter(|&v| in_degree[v] == 0)
            .collect();

        let mut ordering = Vec::with_capacity(self.vertices.len());
        while let Some(current) = ready.pop_front() {
            ordering.push(self.vertices[current].data.clone());
            for &next in &self.vertices[current].edges {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push_back(next);
                }
            }
        }

        if ordering.len() == self.vertices.len() {
            Ok(ordering)
        } else {
            Err(GraphError::Cycle)
        }
    }
}

impl<T> Graph<T> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> + '_ {
        self.vertices.iter().map(|v| &v.data)
    }

    /// Edges grouped by source vertex, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.vertices.iter().flat_map(move |v| {
            v.edges
                .iter()
                .map(move |&next| (&v.data, &self.vertices[next].data))
        })
    }

    /// Renders the graph as a DOT digraph. Vertices without any edge are
    /// listed as node statements so they survive a round trip.
    pub fn to_dot(&self) -> String
    where
        T: Display,
    {
        let mut out = String::from("digraph d {\n");
        for vertex in &self.vertices {
            if vertex.edges.is_empty() && vertex.in_degree == 0 {
                out.push_str(&format!("\t{}\n", dot::format_id(&vertex.data.to_string())));
            }
        }
        for (from, to) in self.edges() {
            out.push_str(&format!(
                "\t{} -> {}\n",
                dot::format_id(&from.to_string()),
                dot::format_id(&to.to_string())
            ));
        }
        out.push('}');
        out
    }
}

impl<T: Hash + Eq + Clone> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> FromIterator<(T, T)> for Graph<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (from, to) in iter {
            graph.add_edge(from, to);
        }
        graph
    }
}

/// One line per vertex: `data -> successor, successor`.
impl<T: Display> Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.vertices {
            write!(f, "{} ->", vertex.data)?;
            for (i, &next) in vertex.edges.iter().enumerate() {
                let separator = if i == 0 { " " } else { ", " };
                write!(f, "{}{}", separator, self.vertices[next].data)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.vertices.iter().map(|v| {
                let successors: Vec<_> = v.edges.iter().map(|&n| &self.vertices[n].data).collect();
                (&v.data, successors)
            }))
            .finish()
    }
}
