use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use textbook_dsa::facility::VisitDate;

#[derive(Parser)]
#[command(
    name = "textbook-dsa",
    about = "Classic data structures and algorithms on files",
    version
)]
pub struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate text from the word successions of a corpus
    Generate {
        corpus: PathBuf,
        seed: String,
        count: usize,
        #[arg(long, value_enum, default_value_t = GenerationMode::Default)]
        mode: GenerationMode,
        /// Seed for the `all` mode's random choices
        #[arg(long = "rng-seed")]
        rng_seed: Option<u64>,
    },
    /// Print the shortest path between two vertices of a DOT digraph
    Path {
        dot: PathBuf,
        src: String,
        dst: String,
    },
    /// Tell whether one vertex of a DOT digraph reaches another
    Reachable {
        dot: PathBuf,
        src: String,
        dst: String,
    },
    /// Print a topological ordering of a DOT digraph
    Topo { dot: PathBuf },
    /// Print a random DOT digraph with twice as many edges as vertices
    RandomDot {
        vertices: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the words of a document missing from a dictionary
    Spell {
        dictionary: PathBuf,
        document: PathBuf,
    },
    /// Print the largest concatenation of every line of integers and their sum
    LargestNumber {
        file: PathBuf,
        /// Print only the line ranking `k`th by largest number, from 0
        #[arg(long)]
        kth: Option<usize>,
    },
    /// Summarise a patient list
    Patients {
        file: PathBuf,
        /// Only list patients whose last visit was before this date (YYYY-MM-DD)
        #[arg(long = "inactive-before")]
        inactive_before: Option<VisitDate>,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum GenerationMode {
    /// The most probable successors of the seed
    Default,
    /// A walk sampling successors by probability
    All,
    /// A walk following the most probable successor
    One,
}
