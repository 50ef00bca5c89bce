use std::error::Error;
use std::io::{self as stdio, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::io;
use rs_markov_core::{ChainBuilder, GenerationInput, StartSeed, TextGenerator};

/// Generate random text that mimics a corpus, using a word-level Markov chain.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Corpus file (UTF-8 text)
    path: PathBuf,

    /// N-gram order; prompted for when omitted on a terminal, 2 otherwise
    #[arg(short = 'n', long = "order", allow_negative_numbers = true)]
    order: Option<i64>,

    /// Seed for a reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Number of texts to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Maximum number of words appended to the start key (0 = automatic)
    #[arg(long, default_value_t = 0)]
    max_steps: usize,

    /// Retries when a text only repeats the corpus
    #[arg(long, default_value_t = 0)]
    nb_try: usize,

    /// Start from these exact words instead of a random capitalized key
    #[arg(long, conflicts_with = "any_start")]
    start: Option<String>,

    /// Start from any key, capitalized or not
    #[arg(long, default_value_t = false)]
    any_start: bool,
}

const DEFAULT_ORDER: i64 = 2;

impl Cli {
    fn start_seed(&self) -> StartSeed {
        match (&self.start, self.any_start) {
            (Some(words), _) => StartSeed::Custom(words.clone()),
            (None, true) => StartSeed::Random,
            (None, false) => StartSeed::Capitalized,
        }
    }
}

/// Asks for the n-gram order on stderr and reads it from stdin.
fn prompt_order() -> Result<i64, Box<dyn Error>> {
    eprint!("N-gram order: ");
    stdio::stderr().flush()?;

    let mut line = String::new();
    stdio::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    line.parse::<i64>()
        .map_err(|e| format!("invalid n-gram order {line:?}: {e}").into())
}

fn resolve_order(cli: &Cli) -> Result<i64, Box<dyn Error>> {
    match cli.order {
        Some(order) => Ok(order),
        None if stdio::stdin().is_terminal() => prompt_order(),
        None => Ok(DEFAULT_ORDER),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let order = ChainBuilder::parse_order(resolve_order(cli)?)?;

    info!("Reading corpus {}", cli.path.display());
    let text = io::read_file(&cli.path)
        .map_err(|e| format!("cannot read {}: {e}", cli.path.display()))?;

    let table = ChainBuilder::build(&text, order)?;
    info!("Chain table ready: {} keys of order {}", table.len(), table.n());

    let generator = TextGenerator::new(GenerationInput {
        max_steps: cli.max_steps,
        nb_try: cli.nb_try,
        start_seed: cli.start_seed(),
    });

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut out = stdio::stdout().lock();
    for _ in 0..cli.count {
        writeln!(out, "{}", generator.generate(&table, &mut rng)?)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
