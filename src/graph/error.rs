use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Source data not found in graph")]
    SourceNotFound,

    #[error("Destination data not found in graph")]
    DestinationNotFound,

    #[error("There is no path between the two vertices")]
    NoPath,

    #[error("Graph contains a cycle")]
    Cycle,

    #[error("Edge lists differ in length: {sources} sources, {destinations} destinations")]
    MismatchedEdgeLists { sources: usize, destinations: usize },
}
