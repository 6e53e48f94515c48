use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nandkit::{components, persist, CircuitSim, Repository, TruthTable};

#[derive(Parser)]
#[command(name = "nandkit", version, about = "Build and evaluate NAND-based logic blueprints")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Blueprint file to import before running the command. Repeatable.
    #[arg(long)]
    load: Vec<PathBuf>,

    /// Start from NAND alone instead of the standard library.
    #[arg(long, default_value_t = false)]
    no_library: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Registered blueprint ids with their arity.
    List,
    /// Print the truth table of a blueprint.
    Table { id: String },
    /// Evaluate a blueprint on a 0/1 string, input 0 first.
    Eval { id: String, bits: String },
    /// Write a blueprint to a JSON file.
    Export { id: String, file: PathBuf },
    /// Validate and register a JSON blueprint file.
    Import { file: PathBuf },
}

fn parse_bits(bits: &str) -> Result<Vec<bool>> {
    bits.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("invalid bit {other:?}, expected 0 or 1"),
        })
        .collect()
}

fn format_bits(bits: &[bool]) -> String {
    bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let repository = Repository::new();
    if !cli.no_library {
        components::register_all(&repository).context("registering the standard library")?;
    }
    for path in &cli.load {
        let blueprint = persist::import(&repository, path)
            .with_context(|| format!("importing {}", path.display()))?;
        info!(blueprint = blueprint.id(), "imported");
    }

    match cli.command {
        Commands::List => {
            for id in repository.ids() {
                let blueprint = repository.lookup(&id)?;
                println!(
                    "{id}: {} -> {}",
                    blueprint.num_inputs(),
                    blueprint.num_outputs()
                );
            }
        }
        Commands::Table { id } => {
            let blueprint = repository.lookup(&id)?;
            print!("{}", TruthTable::generate(&blueprint)?);
        }
        Commands::Eval { id, bits } => {
            let outputs = repository.evaluate(&id, &parse_bits(&bits)?)?;
            println!("{}", format_bits(&outputs));
        }
        Commands::Export { id, file } => {
            let blueprint = repository.lookup(&id)?;
            persist::save(&blueprint, &file)
                .with_context(|| format!("exporting {id} to {}", file.display()))?;
        }
        Commands::Import { file } => {
            let blueprint = persist::import(&repository, &file)
                .with_context(|| format!("importing {}", file.display()))?;
            println!(
                "{}: {} -> {}",
                blueprint.id(),
                blueprint.num_inputs(),
                blueprint.num_outputs()
            );
        }
    }
    Ok(())
}
