pub use document::{Span, Spanned};
pub use error::CollectionError;

pub mod browser;
pub mod bst;
pub mod compare;
mod document;
mod error;
pub mod facility;
pub mod graph;
pub mod hash_table;
pub mod heap;
pub mod largest_number;
pub mod linked_list;
pub mod markov;
pub mod priority_queue;
pub mod sorting;
pub mod spell_checker;
pub mod stack;
pub mod text;
