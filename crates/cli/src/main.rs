use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use sr5_lookup_core::{
    flatten_file, load_json, process, render_json, sample_file, FlatStore, LookupConfig,
    QueryEngine, Session, DEFAULT_CONFIG,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "sr5-lookup", version = VERSION, about = "Shadowrun 5 rulebook data lookup")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
    #[arg(long = "no-color", global = true, action = ArgAction::SetTrue)]
    no_color: bool,
    #[command(flatten)]
    paths: PathArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct PathArgs {
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    processed: Option<PathBuf>,
    #[arg(long, global = true)]
    flattened: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert the rulebook XML directory into the normalized JSON store
    Process,
    /// Merge the normalized store into the flat lookup table
    Flatten,
    /// Print random entries from the flat lookup table
    Inspect {
        #[arg(short = 'n', long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fuzzy-search the flat lookup table interactively
    Query {
        /// how many results to return from query
        #[arg(long = "max-results")]
        max_results: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = LookupConfig::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let paths = resolve_paths(&cli.paths, &config);
    let highlight = !cli.no_color && io::stdout().is_terminal();

    match cli.command {
        Commands::Process => {
            let normalized = process(&paths.data_dir, &paths.processed)?;
            println!(
                "[sr5-lookup] normalized {} documents into {}",
                normalized.len(),
                paths.processed.display()
            );
        }
        Commands::Flatten => {
            let flat = flatten_file(&paths.processed, &paths.flattened)?;
            println!(
                "[sr5-lookup] flattened {} entries into {}",
                flat.len(),
                paths.flattened.display()
            );
        }
        Commands::Inspect { count, seed } => {
            let count = count.unwrap_or(config.inspect.count);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let picked = sample_file(&paths.flattened, count, &mut rng)?;
            println!("inspecting {count} random items");
            println!("from: {}", paths.flattened.display());
            println!("{}", render_json(&Value::Object(picked), highlight));
        }
        Commands::Query { max_results } => {
            let max_results = max_results.unwrap_or(config.query.max_results);
            let flat: FlatStore = load_json(&paths.flattened)?;
            let engine = QueryEngine::new(flat, max_results);
            tracing::debug!(keys = engine.keys().len(), max_results, "query engine ready");
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session =
                Session::new(&engine, stdin.lock(), stdout.lock()).highlight(highlight);
            let answered = session.run()?;
            tracing::debug!(answered, "query session closed");
        }
    }
    Ok(())
}

#[derive(Debug)]
struct ResolvedPaths {
    data_dir: PathBuf,
    processed: PathBuf,
    flattened: PathBuf,
}

fn resolve_paths(args: &PathArgs, config: &LookupConfig) -> ResolvedPaths {
    ResolvedPaths {
        data_dir: args
            .data_dir
            .clone()
            .unwrap_or_else(|| config.paths.data_dir.clone()),
        processed: args
            .processed
            .clone()
            .unwrap_or_else(|| config.paths.processed.clone()),
        flattened: args
            .flattened
            .clone()
            .unwrap_or_else(|| config.paths.flattened.clone()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
