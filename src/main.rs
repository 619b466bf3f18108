mod cli;

use std::error::Error;

use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use rand::{rngs::StdRng, SeedableRng};

use cli::{Cli, Command, GenerationMode};
use textbook_dsa::{
    facility::Facility,
    graph::{self, Graph},
    largest_number,
    markov::WordProbabilityModel,
    spell_checker::SpellChecker,
};

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate {
            corpus,
            seed,
            count,
            mode,
            rng_seed,
        } => {
            let model = WordProbabilityModel::from_file(corpus)?;
            let text = match mode {
                GenerationMode::Default => model.generate_text(&seed, count),
                GenerationMode::One => model.generate_text_one(&seed, count),
                GenerationMode::All => model.generate_text_all(&seed, count, &mut rng(rng_seed)),
            };
            println!("{text}");
        }
        Command::Path { dot, src, dst } => {
            let graph = load_graph(dot)?;
            println!("{}", graph.shortest_path(&src, &dst)?.join(" -> "));
        }
        Command::Reachable { dot, src, dst } => {
            let graph = load_graph(dot)?;
            println!("{}", graph.is_reachable(&src, &dst)?);
        }
        Command::Topo { dot } => {
            let graph = load_graph(dot)?;
            println!("{}", graph.topological_sort()?.join(" "));
        }
        Command::RandomDot { vertices, seed } => {
            print!("{}", graph::random_dot(vertices, &mut rng(seed)));
        }
        Command::Spell {
            dictionary,
            document,
        } => {
            let checker = SpellChecker::from_file(dictionary)?;
            let misspelled = checker.spell_check_file(document)?;
            if misspelled.is_empty() {
                println!("No misspelled words.");
            }
            for word in misspelled {
                println!("{word}");
            }
        }
        Command::LargestNumber { file, kth } => {
            let lists = largest_number::read_file(file)?;
            match kth {
                Some(k) => {
                    let list = largest_number::find_kth_largest(&lists, k)?;
                    let numbers: Vec<String> = list.iter().map(u32::to_string).collect();
                    println!("{}", numbers.join(" "));
                }
                None => {
                    for list in &lists {
                        println!("{}", largest_number::find_largest_number(list));
                    }
                    println!("sum: {}", largest_number::sum(&lists));
                }
            }
        }
        Command::Patients {
            file,
            inactive_before,
        } => {
            let mut facility: Facility<String> = Facility::new();
            facility.add_all_from_file(file)?;
            let patients = match inactive_before {
                Some(date) => facility.inactive_patients(&date),
                None => facility.ordered_by_id(),
            };
            for p in patients {
                println!(
                    "{}\t{}\tphysician {}\tlast visit {}",
                    p.id(),
                    p.patient.full_name(),
                    p.physician,
                    p.last_visit
                );
            }
        }
    }
    Ok(())
}

fn load_graph(path: std::path::PathBuf) -> Result<Graph<String>, graph::DotError> {
    Ok(Graph::from(graph::read_dot_file(path)?))
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
