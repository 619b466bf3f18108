//! Graph queries over edges given as two parallel lists, where
//! `sources[i] -> destinations[i]` is the `i`th edge.

use std::hash::Hash;

use super::{Graph, GraphError};

/// Whether a path leads from `src` to `dst`.
pub fn are_connected<T: Hash + Eq + Clone>(
    sources: &[T],
    destinations: &[T],
    src: &T,
    dst: &T,
) -> Result<bool, GraphError> {
    build(sources, destinations)?.is_reachable(src, dst)
}

/// The path with the fewest edges from `src` to `dst`, both included.
pub fn shortest_path<T: Hash + Eq + Clone>(
    sources: &[T],
    destinations: &[T],
    src: &T,
    dst: &T,
) -> Result<Vec<T>, GraphError> {
    build(sources, destinations)?.shortest_path(src, dst)
}

/// A topological ordering of every vertex mentioned in the lists.
pub fn sort<T: Hash + Eq + Clone>(sources: &[T], destinations: &[T]) -> Result<Vec<T>, GraphError> {
    build(sources, destinations)?.topological_sort()
}

fn build<T: Hash + Eq + Clone>(sources: &[T], destinations: &[T]) -> Result<Graph<T>, GraphError> {
    if sources.len() != destinations.len() {
        return Err(GraphError::MismatchedEdgeLists {
            sources: sources.len(),
            destinations: destinations.len(),
        });
    }

    Ok(sources
        .iter()
        .cloned()
        .zip(destinations.iter().cloned())
        .collect())
}
